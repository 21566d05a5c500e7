//! Definition parse errors.

use thiserror::Error;

use crate::types::Position;

/// Reasons a puzzle definition string is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("definition is empty")]
    Empty,

    #[error("definition is missing the grid size")]
    MissingSize,

    #[error("invalid grid size `{0}`, expected ROWSxCOLUMNS")]
    InvalidSize(String),

    #[error("grid size `{0}` has no cells")]
    EmptyGrid(String),

    #[error("grid size `{size}` exceeds {limit} cells")]
    TooLarge { size: String, limit: usize },

    #[error("cell `{token}` has {found} fields, expected 6")]
    FieldCount { token: String, found: usize },

    #[error("cell `{token}`: invalid {field} `{value}`")]
    InvalidNumber {
        token: String,
        field: &'static str,
        value: String,
    },

    #[error("cell `{token}`: unknown kind code `{code}`")]
    UnknownKind { token: String, code: String },

    #[error("cell `{token}`: unknown direction code `{code}`")]
    UnknownDirection { token: String, code: String },

    #[error("cell `{token}`: unknown state code `{code}`")]
    UnknownState { token: String, code: String },

    #[error("cell `{token}` lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        token: String,
        rows: usize,
        cols: usize,
    },

    #[error("cell {0} is defined more than once")]
    DuplicateCell(Position),
}

impl ParseError {
    /// Stable machine-readable code, used on the wire
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::Empty | ParseError::MissingSize => "missing_header",
            ParseError::InvalidSize(_)
            | ParseError::EmptyGrid(_)
            | ParseError::TooLarge { .. } => "invalid_size",
            ParseError::FieldCount { .. } | ParseError::InvalidNumber { .. } => "invalid_cell",
            ParseError::UnknownKind { .. }
            | ParseError::UnknownDirection { .. }
            | ParseError::UnknownState { .. } => "unknown_code",
            ParseError::OutOfBounds { .. } | ParseError::DuplicateCell(_) => "invalid_placement",
        }
    }
}
