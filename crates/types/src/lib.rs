//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the puzzle.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (grid logic, puzzle controller, wire protocol).
//!
//! # Grid Coordinates
//!
//! The hexagonal tiling is stored in a rectangular array addressed by
//! `(row, col)`. Rows grow downwards, columns grow to the right, and odd columns
//! sit half a cell lower than even columns:
//!
//! ```text
//!  col:  0     1     2
//!      (0,0)       (0,2)
//!            (0,1)
//!      (1,0)       (1,2)
//!            (1,1)
//! ```
//!
//! # Definition Codes
//!
//! Puzzles are described by a single line of text (see `hex_power_core::Grid`).
//! Each non-default cell uses short codes:
//!
//! | Field | Codes |
//! |-------|-------|
//! | kind | `bk` `pt` `tg` `cn` `ci` `tn` `ti` `tn2` `ti2` `rn` `ri` `rn2` `ri2` `dn` `di` `dn2` `di2` |
//! | direction | `tt` `tr` `br` `bb` `bl` `tl` |
//! | state | `up` (unpowered) `pw` (powered) |
//!
//! # Examples
//!
//! ```
//! use hex_power_types::{CellKind, Direction, Polarity};
//!
//! let kind = CellKind::from_code("ti2").unwrap();
//! assert_eq!(kind, CellKind::TriangleInverse2);
//! assert_eq!(kind.polarity(), Some(Polarity::Inverse));
//!
//! // Rotation walks the six facings counter-clockwise
//! assert_eq!(Direction::Top.rotate_ccw(), Direction::TopLeft);
//! assert_eq!(Direction::TopRight.rotate_ccw(), Direction::Top);
//! ```

use std::fmt;

/// Maximum number of neighbor slots a single cell can project power onto
pub const MAX_RANGE: usize = 6;

/// Capacity of a changed-cell list.
///
/// A rotation touches at most the previous and the current range (6 + 6).
/// A switch touches the cell itself plus its range (1 + 6).
pub const MAX_CHANGED: usize = 2 * MAX_RANGE;

/// Puzzle loaded when nothing else is configured.
pub const DEFAULT_DEFINITION: &str = "hex 8x8 1,3,tg,tt,up,2 2,2,tg,tt,up,2 3,2,tg,tt,up,2 2,3,tg,tt,up,2 1,1,dn,tt,up,0 1,4,dn,tt,up,0 4,1,dn2,tt,up,0 4,4,dn,tr,up,0";

/// Position of a cell in the grid as `(row, col)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Odd columns are shifted half a cell down.
    #[inline]
    pub const fn is_odd_column(&self) -> bool {
        self.col % 2 == 1
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Facing of a hexagonal cell
///
/// The rotation cycle (counter-clockwise) goes:
/// Top → TopLeft → BottomLeft → Bottom → BottomRight → TopRight → Top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    TopRight,
    BottomRight,
    Bottom,
    BottomLeft,
    TopLeft,
}

impl Direction {
    /// All six facings, clockwise from Top
    pub const ALL: [Direction; 6] = [
        Direction::Top,
        Direction::TopRight,
        Direction::BottomRight,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::TopLeft,
    ];

    /// Next facing when a cell is rotated (60° counter-clockwise)
    ///
    /// # Examples
    ///
    /// ```
    /// use hex_power_types::Direction;
    ///
    /// let mut d = Direction::Bottom;
    /// for _ in 0..6 {
    ///     d = d.rotate_ccw();
    /// }
    /// assert_eq!(d, Direction::Bottom);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Direction::Top => Direction::TopLeft,
            Direction::TopLeft => Direction::BottomLeft,
            Direction::BottomLeft => Direction::Bottom,
            Direction::Bottom => Direction::BottomRight,
            Direction::BottomRight => Direction::TopRight,
            Direction::TopRight => Direction::Top,
        }
    }

    /// The facing pointing the other way
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::TopLeft => Direction::BottomRight,
            Direction::BottomRight => Direction::TopLeft,
            Direction::TopRight => Direction::BottomLeft,
            Direction::BottomLeft => Direction::TopRight,
        }
    }

    /// Parse a definition direction code (`tt`, `tr`, `br`, `bb`, `bl`, `tl`)
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "tt" => Some(Direction::Top),
            "tr" => Some(Direction::TopRight),
            "br" => Some(Direction::BottomRight),
            "bb" => Some(Direction::Bottom),
            "bl" => Some(Direction::BottomLeft),
            "tl" => Some(Direction::TopLeft),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Direction::Top => "tt",
            Direction::TopRight => "tr",
            Direction::BottomRight => "br",
            Direction::Bottom => "bb",
            Direction::BottomLeft => "bl",
            Direction::TopLeft => "tl",
        }
    }
}

/// Sign of the power an emitter produces when switched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Emits +1
    Normal,
    /// Emits -1
    Inverse,
}

impl Polarity {
    /// Power of a switched-on emitter with this polarity
    pub fn unit(&self) -> i32 {
        match self {
            Polarity::Normal => 1,
            Polarity::Inverse => -1,
        }
    }
}

/// Geometric footprint of an emitter, independent of polarity and reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// All six neighbors
    Circle,
    /// Three alternating neighbors
    Triangle,
    /// Two opposite neighbors along one axis
    Rectangle,
    /// The single neighbor the cell faces
    Directional,
}

/// How an emitter projects power: footprint plus number of hops along each arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Emission {
    pub shape: Shape,
    pub reach: u8,
}

/// Type of a cell, i.e. its power behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Blank,
    Path,
    Target,
    Circle,
    CircleInverse,
    Triangle,
    TriangleInverse,
    Triangle2,
    TriangleInverse2,
    Rectangle,
    RectangleInverse,
    Rectangle2,
    RectangleInverse2,
    Directional,
    DirectionalInverse,
    Directional2,
    DirectionalInverse2,
}

impl CellKind {
    pub const ALL: [CellKind; 17] = [
        CellKind::Blank,
        CellKind::Path,
        CellKind::Target,
        CellKind::Circle,
        CellKind::CircleInverse,
        CellKind::Triangle,
        CellKind::TriangleInverse,
        CellKind::Triangle2,
        CellKind::TriangleInverse2,
        CellKind::Rectangle,
        CellKind::RectangleInverse,
        CellKind::Rectangle2,
        CellKind::RectangleInverse2,
        CellKind::Directional,
        CellKind::DirectionalInverse,
        CellKind::Directional2,
        CellKind::DirectionalInverse2,
    ];

    /// Parse a definition kind code
    ///
    /// # Examples
    ///
    /// ```
    /// use hex_power_types::CellKind;
    ///
    /// assert_eq!(CellKind::from_code("tg"), Some(CellKind::Target));
    /// assert_eq!(CellKind::from_code("dn2"), Some(CellKind::Directional2));
    /// assert_eq!(CellKind::from_code("xx"), None);
    /// ```
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "bk" => Some(CellKind::Blank),
            "pt" => Some(CellKind::Path),
            "tg" => Some(CellKind::Target),
            "cn" => Some(CellKind::Circle),
            "ci" => Some(CellKind::CircleInverse),
            "tn" => Some(CellKind::Triangle),
            "ti" => Some(CellKind::TriangleInverse),
            "tn2" => Some(CellKind::Triangle2),
            "ti2" => Some(CellKind::TriangleInverse2),
            "rn" => Some(CellKind::Rectangle),
            "ri" => Some(CellKind::RectangleInverse),
            "rn2" => Some(CellKind::Rectangle2),
            "ri2" => Some(CellKind::RectangleInverse2),
            "dn" => Some(CellKind::Directional),
            "di" => Some(CellKind::DirectionalInverse),
            "dn2" => Some(CellKind::Directional2),
            "di2" => Some(CellKind::DirectionalInverse2),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            CellKind::Blank => "bk",
            CellKind::Path => "pt",
            CellKind::Target => "tg",
            CellKind::Circle => "cn",
            CellKind::CircleInverse => "ci",
            CellKind::Triangle => "tn",
            CellKind::TriangleInverse => "ti",
            CellKind::Triangle2 => "tn2",
            CellKind::TriangleInverse2 => "ti2",
            CellKind::Rectangle => "rn",
            CellKind::RectangleInverse => "ri",
            CellKind::Rectangle2 => "rn2",
            CellKind::RectangleInverse2 => "ri2",
            CellKind::Directional => "dn",
            CellKind::DirectionalInverse => "di",
            CellKind::Directional2 => "dn2",
            CellKind::DirectionalInverse2 => "di2",
        }
    }

    /// Polarity of an emitter; `None` for Blank, Path and Target
    pub fn polarity(&self) -> Option<Polarity> {
        match self {
            CellKind::Blank | CellKind::Path | CellKind::Target => None,
            CellKind::Circle
            | CellKind::Triangle
            | CellKind::Triangle2
            | CellKind::Rectangle
            | CellKind::Rectangle2
            | CellKind::Directional
            | CellKind::Directional2 => Some(Polarity::Normal),
            CellKind::CircleInverse
            | CellKind::TriangleInverse
            | CellKind::TriangleInverse2
            | CellKind::RectangleInverse
            | CellKind::RectangleInverse2
            | CellKind::DirectionalInverse
            | CellKind::DirectionalInverse2 => Some(Polarity::Inverse),
        }
    }

    /// True for the negative-power variant of each emitter family
    pub fn is_inverse(&self) -> bool {
        self.polarity() == Some(Polarity::Inverse)
    }

    /// Emission footprint; `None` for kinds that never project power
    pub fn emission(&self) -> Option<Emission> {
        let (shape, reach) = match self {
            CellKind::Blank | CellKind::Path | CellKind::Target => return None,
            CellKind::Circle | CellKind::CircleInverse => (Shape::Circle, 1),
            CellKind::Triangle | CellKind::TriangleInverse => (Shape::Triangle, 1),
            CellKind::Triangle2 | CellKind::TriangleInverse2 => (Shape::Triangle, 2),
            CellKind::Rectangle | CellKind::RectangleInverse => (Shape::Rectangle, 1),
            CellKind::Rectangle2 | CellKind::RectangleInverse2 => (Shape::Rectangle, 2),
            CellKind::Directional | CellKind::DirectionalInverse => (Shape::Directional, 1),
            CellKind::Directional2 | CellKind::DirectionalInverse2 => (Shape::Directional, 2),
        };
        Some(Emission { shape, reach })
    }

    /// Path and Target cells only receive power and ignore player input
    pub fn is_interactive(&self) -> bool {
        !matches!(self, CellKind::Path | CellKind::Target)
    }
}

/// Initial on/off state of a cell in a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    Unpowered,
    Powered,
}

impl PowerState {
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "up" => Some(PowerState::Unpowered),
            "pw" => Some(PowerState::Powered),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            PowerState::Unpowered => "up",
            PowerState::Powered => "pw",
        }
    }
}

/// Puzzle topology named by the first definition token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PuzzleKind {
    Hexagonal,
    /// Referenced by definitions but has no grid implementation
    Square,
}

impl PuzzleKind {
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "hex" => Some(PuzzleKind::Hexagonal),
            "sqr" => Some(PuzzleKind::Square),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            PuzzleKind::Hexagonal => "hex",
            PuzzleKind::Square => "sqr",
        }
    }
}
