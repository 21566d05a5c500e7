//! Puzzle controller - drives a grid from player moves to completion
//!
//! `HexPuzzle` owns the grid, dispatches rotate/switch requests, re-checks
//! every target after each accepted move and locks itself once solved.

use log::{debug, info};
use thiserror::Error;

use crate::core::{Changes, Grid, ParseError};
use crate::types::{Position, PuzzleKind};

/// Reasons a definition cannot be turned into a playable puzzle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("unknown puzzle kind `{0}`")]
    UnknownKind(String),

    #[error("`{}` puzzles are not supported", .0.as_code())]
    Unsupported(PuzzleKind),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl LoadError {
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::UnknownKind(_) | LoadError::Unsupported(_) => "unsupported_puzzle",
            LoadError::Parse(err) => err.code(),
        }
    }
}

/// Why a move was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    OutOfBounds,
    NotInteractive,
    Completed,
}

impl Rejection {
    pub fn code(self) -> &'static str {
        match self {
            Rejection::OutOfBounds => "out_of_bounds",
            Rejection::NotInteractive => "not_interactive",
            Rejection::Completed => "puzzle_completed",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Rejection::OutOfBounds => "position lies outside the grid",
            Rejection::NotInteractive => "path and target cells cannot be rotated or switched",
            Rejection::Completed => "puzzle is already completed",
        }
    }
}

/// A player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Rotate(Position),
    Switch(Position),
}

impl Move {
    /// Parse `r:row,col` (rotate) or `s:row,col` (switch)
    ///
    /// # Examples
    ///
    /// ```
    /// use hex_power_engine::Move;
    /// use hex_power_types::Position;
    ///
    /// assert_eq!(Move::from_str("r:1,2"), Some(Move::Rotate(Position::new(1, 2))));
    /// assert_eq!(Move::from_str("S:0,3"), Some(Move::Switch(Position::new(0, 3))));
    /// assert_eq!(Move::from_str("x:0,0"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let (verb, coords) = s.trim().split_once(':')?;
        let (row, col) = coords.split_once(',')?;
        let pos = Position::new(row.trim().parse().ok()?, col.trim().parse().ok()?);
        match verb.to_lowercase().as_str() {
            "r" | "rotate" => Some(Move::Rotate(pos)),
            "s" | "switch" => Some(Move::Switch(pos)),
            _ => None,
        }
    }

    pub fn position(&self) -> Position {
        match *self {
            Move::Rotate(pos) | Move::Switch(pos) => pos,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Rotate(_) => "rotate",
            Move::Switch(_) => "switch",
        }
    }
}

/// Progress of one target cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetStatus {
    pub position: Position,
    pub power: i32,
    pub target_power: i32,
    pub satisfied: bool,
}

/// Result of an accepted move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Cells whose power changed, as reported by the grid
    pub changed: Changes,
    /// Every target after the completion check
    pub targets: Vec<TargetStatus>,
    /// True when every target is satisfied
    pub completed: bool,
}

/// A loaded hexagonal puzzle
#[derive(Debug, Clone)]
pub struct HexPuzzle {
    definition: String,
    initial: Grid,
    grid: Grid,
    targets: Vec<Position>,
    completed: bool,
}

impl HexPuzzle {
    /// Identify the topology a definition asks for
    pub fn kind_of(definition: &str) -> Result<PuzzleKind, LoadError> {
        let tag = definition
            .split_whitespace()
            .next()
            .ok_or(LoadError::Parse(ParseError::Empty))?;
        PuzzleKind::from_code(tag).ok_or_else(|| LoadError::UnknownKind(tag.to_string()))
    }

    /// Build a puzzle from a definition line.
    ///
    /// Only hexagonal definitions are playable.
    pub fn load(definition: &str) -> Result<Self, LoadError> {
        match Self::kind_of(definition)? {
            PuzzleKind::Hexagonal => {}
            kind => return Err(LoadError::Unsupported(kind)),
        }

        let grid = Grid::from_definition(definition)?;
        let targets: Vec<Position> = grid.targets().collect();
        info!(
            "loaded {}x{} puzzle with {} targets",
            grid.rows(),
            grid.cols(),
            targets.len()
        );

        let mut puzzle = Self {
            definition: definition.trim().to_string(),
            initial: grid.clone(),
            grid,
            targets,
            completed: false,
        };
        puzzle.refresh_targets();
        Ok(puzzle)
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn targets(&self) -> &[Position] {
        &self.targets
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Restore the grid to the state it was loaded in
    pub fn reload(&mut self) {
        self.grid = self.initial.clone();
        self.completed = false;
        self.refresh_targets();
        debug!("puzzle reloaded");
    }

    pub fn rotate(&mut self, pos: Position) -> Result<MoveOutcome, Rejection> {
        self.apply(Move::Rotate(pos))
    }

    pub fn switch(&mut self, pos: Position) -> Result<MoveOutcome, Rejection> {
        self.apply(Move::Switch(pos))
    }

    /// Apply a move and re-check every target.
    ///
    /// Moves are refused once the puzzle is completed.
    pub fn apply(&mut self, mv: Move) -> Result<MoveOutcome, Rejection> {
        if self.completed {
            return Err(Rejection::Completed);
        }
        let pos = mv.position();
        if !self.grid.contains(pos) {
            return Err(Rejection::OutOfBounds);
        }

        let changed = match mv {
            Move::Rotate(pos) => self.grid.rotate(pos),
            Move::Switch(pos) => self.grid.switch(pos),
        }
        .ok_or(Rejection::NotInteractive)?;

        let completed = self.check_completion();
        Ok(MoveOutcome {
            changed,
            targets: self.target_statuses(),
            completed,
        })
    }

    /// Recompute every target's power; true when all of them match.
    ///
    /// A puzzle without targets never completes.
    pub fn check_completion(&mut self) -> bool {
        let all_satisfied = self.refresh_targets();
        if all_satisfied && !self.completed {
            info!("puzzle completed");
        }
        self.completed = all_satisfied;
        all_satisfied
    }

    /// Overwrite every target's power with its live surrounding power
    fn refresh_targets(&mut self) -> bool {
        let mut all_satisfied = !self.targets.is_empty();
        for &target in &self.targets {
            let satisfied = self.grid.update_target_power(target);
            all_satisfied = all_satisfied && satisfied;
        }
        all_satisfied
    }

    pub fn target_statuses(&self) -> Vec<TargetStatus> {
        self.targets
            .iter()
            .map(|&position| {
                let cell = &self.grid[position];
                TargetStatus {
                    position,
                    power: cell.power(),
                    target_power: cell.target_power(),
                    satisfied: cell.is_satisfied(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn square_puzzles_are_rejected() {
        let err = HexPuzzle::load("sqr 4x4").unwrap_err();
        assert_eq!(err, LoadError::Unsupported(PuzzleKind::Square));
        assert_eq!(err.code(), "unsupported_puzzle");
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = HexPuzzle::load("tri 4x4").unwrap_err();
        assert_eq!(err, LoadError::UnknownKind("tri".to_string()));
    }

    #[test]
    fn grid_errors_are_wrapped() {
        let err = HexPuzzle::load("hex 2x2 0,0,zz,tt,up,0").unwrap_err();
        assert!(matches!(err, LoadError::Parse(ParseError::UnknownKind { .. })));
        assert_eq!(err.code(), "unknown_code");
    }

    #[test]
    fn completion_locks_further_moves() {
        let mut puzzle = HexPuzzle::load("hex 3x3 0,1,dn,bb,up,0 2,1,tg,tt,up,1").unwrap();
        assert!(!puzzle.is_completed());

        let outcome = puzzle.switch(pos(0, 1)).unwrap();
        assert!(outcome.completed);
        assert!(puzzle.is_completed());
        assert_eq!(puzzle.rotate(pos(0, 1)), Err(Rejection::Completed));

        puzzle.reload();
        assert!(!puzzle.is_completed());
        assert_eq!(puzzle.grid()[pos(1, 1)].power(), 0);
    }

    #[test]
    fn receivers_are_rejected_without_mutation() {
        let mut puzzle = HexPuzzle::load("hex 3x3 0,1,dn,bb,pw,0 2,1,tg,tt,up,2").unwrap();
        let before = puzzle.grid().clone();
        assert_eq!(puzzle.switch(pos(2, 1)), Err(Rejection::NotInteractive));
        assert_eq!(puzzle.rotate(pos(1, 1)), Err(Rejection::NotInteractive));
        assert_eq!(puzzle.grid(), &before);
    }

    #[test]
    fn load_reports_target_power_without_completing() {
        let puzzle = HexPuzzle::load("hex 3x3 0,1,dn,bb,pw,0 2,1,tg,tt,up,1").unwrap();
        let status = puzzle.target_statuses();
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].power, 1);
        assert!(status[0].satisfied);
        // completion is only declared in response to a move
        assert!(!puzzle.is_completed());
    }

    #[test]
    fn out_of_bounds_move_is_rejected() {
        let mut puzzle = HexPuzzle::load("hex 2x2 0,0,cn,tt,up,0").unwrap();
        assert_eq!(puzzle.switch(pos(5, 0)), Err(Rejection::OutOfBounds));
    }

    #[test]
    fn puzzle_without_targets_never_completes() {
        let mut puzzle = HexPuzzle::load("hex 2x2 0,0,cn,tt,up,0").unwrap();
        let outcome = puzzle.switch(pos(0, 0)).unwrap();
        assert!(!outcome.completed);
        assert!(outcome.targets.is_empty());
    }

    #[test]
    fn move_parsing() {
        assert_eq!(Move::from_str("rotate:2,3"), Some(Move::Rotate(pos(2, 3))));
        assert_eq!(Move::from_str(" s: 1 , 1 "), Some(Move::Switch(pos(1, 1))));
        assert_eq!(Move::from_str("r:1"), None);
        assert_eq!(Move::from_str("r:-1,0"), None);
    }
}
