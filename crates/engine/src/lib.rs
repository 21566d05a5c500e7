//! Puzzle controller - the layer between player intents and the grid
//!
//! The grid in `hex_power_core` only knows how power moves. This crate adds the
//! lifecycle around it:
//!
//! - selecting the topology from the definition's kind tag (`hex`; `sqr` is rejected)
//! - refusing moves on receivers, outside the grid, or after the puzzle is solved
//! - re-checking every target after each accepted move
//! - resetting to the loaded state
//! - replaying scripted move lists
//!
//! # Example
//!
//! ```
//! use hex_power_engine::{HexPuzzle, Move};
//! use hex_power_types::Position;
//!
//! let mut puzzle = HexPuzzle::load("hex 3x3 0,1,dn,bb,up,0 2,1,tg,tt,up,1").unwrap();
//! let outcome = puzzle.apply(Move::Switch(Position::new(0, 1))).unwrap();
//! assert!(outcome.completed);
//! assert!(puzzle.is_completed());
//! ```

pub mod puzzle;
pub mod replay;

pub use hex_power_core as core;
pub use hex_power_types as types;

pub use puzzle::{HexPuzzle, LoadError, Move, MoveOutcome, Rejection, TargetStatus};
pub use replay::{parse_script, replay, ReplayStep, ScriptError};
