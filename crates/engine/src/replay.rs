//! Scripted move replay.
//!
//! Applies a list of moves in order and records what each one did. Used by the
//! command-line runner and by tests that walk a puzzle to its solution.

use thiserror::Error;

use crate::puzzle::{HexPuzzle, Move, MoveOutcome, Rejection};

/// What happened to one move of a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStep {
    pub mv: Move,
    pub result: Result<MoveOutcome, Rejection>,
}

/// A move script token that is not `r:row,col` or `s:row,col`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid move `{0}`, expected r:ROW,COL or s:ROW,COL")]
pub struct ScriptError(pub String);

/// Parse a whitespace-separated move script such as `s:0,1 r:0,1`.
///
/// Fails on the first token that is not a valid move.
pub fn parse_script(script: &str) -> Result<Vec<Move>, ScriptError> {
    script
        .split_whitespace()
        .map(|token| Move::from_str(token).ok_or_else(|| ScriptError(token.to_string())))
        .collect()
}

/// Apply every move in order. Rejected moves are recorded and skipped.
pub fn replay(puzzle: &mut HexPuzzle, moves: &[Move]) -> Vec<ReplayStep> {
    moves
        .iter()
        .map(|&mv| ReplayStep {
            mv,
            result: puzzle.apply(mv),
        })
        .collect()
}
