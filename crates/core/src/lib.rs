//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate contains the hexagonal grid, its adjacency rules and the power
//! propagation that decides whether a puzzle is solved. It has **zero
//! dependencies** on UI, networking, or I/O:
//!
//! - **Deterministic**: the same definition and moves always yield the same powers
//! - **Incremental**: a move touches at most one emitter's range, never the whole grid
//! - **Allocation-light**: ranges and change lists are fixed-capacity `ArrayVec`s
//!
//! # Module Structure
//!
//! - [`cell`]: state of one hexagonal cell (kind, facing, power, goal)
//! - [`grid`]: definition parsing, neighbors, power ranges, rotate/switch
//! - [`error`]: definition parse errors
//!
//! # Power Rules
//!
//! - **Emitters** (circle, triangle, rectangle, directional families) toggle between
//!   0 and +1, or 0 and -1 for their inverse variants
//! - **Path** cells add up whatever the emitters in range currently project
//! - **Target** cells read the sum of their Path neighbors and are satisfied when it
//!   equals their goal
//!
//! # Example
//!
//! ```
//! use hex_power_core::Grid;
//! use hex_power_types::Position;
//!
//! let mut grid = Grid::from_definition("hex 3x3 0,1,dn,bb,up,0 2,1,tg,tt,up,1").unwrap();
//! let emitter = Position::new(0, 1);
//! let target = Position::new(2, 1);
//!
//! assert_eq!(grid.surrounding_power(target), 0);
//!
//! // Switching the emitter on powers the Path cell between it and the target
//! let changed = grid.switch(emitter).unwrap();
//! assert_eq!(changed.as_slice(), &[emitter, Position::new(1, 1)]);
//! assert_eq!(grid.surrounding_power(target), 1);
//!
//! // Receivers ignore player input
//! assert!(grid.rotate(target).is_none());
//! ```

pub mod cell;
pub mod error;
pub mod grid;

pub use hex_power_types as types;

// Re-export commonly used types for convenience
pub use cell::Cell;
pub use error::ParseError;
pub use grid::{Changes, Grid, PowerRange, MAX_CELLS};
