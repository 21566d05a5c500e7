//! Cell module - state of a single hexagonal location
//!
//! A cell knows its own kind, facing, position and power. It has no knowledge
//! of neighbors; everything that involves adjacency lives in [`crate::Grid`].

use crate::types::{CellKind, Direction, Position};

/// One hexagonal cell of the puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    position: Position,
    kind: CellKind,
    direction: Direction,
    /// Emitters: 0 or their polarity unit. Path cells: sum of inbound contributions.
    power: i32,
    /// Only meaningful for Target cells
    target_power: i32,
}

impl Cell {
    /// Create a cell whose position is stamped later by the grid layout.
    ///
    /// `target_power` is kept only for Target cells and dropped for every other kind.
    pub fn new(kind: CellKind, direction: Direction, power: i32, target_power: i32) -> Self {
        Self {
            position: Position::default(),
            kind,
            direction,
            power,
            target_power: if kind == CellKind::Target {
                target_power
            } else {
                0
            },
        }
    }

    /// Inert conduit used for every position a definition leaves out
    pub fn path(position: Position) -> Self {
        let mut cell = Self::new(CellKind::Path, Direction::Top, 0, 0);
        cell.set_position(position);
        cell
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn power(&self) -> i32 {
        self.power
    }

    pub fn target_power(&self) -> i32 {
        self.target_power
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Stamp the cell's place in the grid; only the grid layout calls this
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Switch an emitter on or off.
    ///
    /// Normal emitters flip between 0 and +1, inverse emitters between 0 and -1.
    /// Blank cells have no polarity and stay at 0. Path and Target cells must
    /// never be toggled; the grid filters them out before calling this.
    pub fn toggle_power(&mut self) {
        debug_assert!(
            self.kind.is_interactive(),
            "toggle_power called on a {:?} cell at {}",
            self.kind,
            self.position
        );
        if let Some(polarity) = self.kind.polarity() {
            self.power = if self.power == 0 { polarity.unit() } else { 0 };
        }
    }

    pub fn is_inverse(&self) -> bool {
        self.kind.is_inverse()
    }

    pub fn is_interactive(&self) -> bool {
        self.kind.is_interactive()
    }

    pub fn is_path(&self) -> bool {
        self.kind == CellKind::Path
    }

    pub fn is_target(&self) -> bool {
        self.kind == CellKind::Target
    }

    pub fn is_powered(&self) -> bool {
        self.power != 0
    }

    /// A target is satisfied once its last recorded power equals its goal
    pub fn is_satisfied(&self) -> bool {
        self.is_target() && self.power == self.target_power
    }

    pub(crate) fn add_power(&mut self, delta: i32) {
        self.power += delta;
    }

    pub(crate) fn set_power(&mut self, power: i32) {
        self.power = power;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_normal_emitter() {
        let mut cell = Cell::new(CellKind::Triangle2, Direction::Top, 0, 0);
        cell.toggle_power();
        assert_eq!(cell.power(), 1);
        cell.toggle_power();
        assert_eq!(cell.power(), 0);
    }

    #[test]
    fn toggle_inverse_emitter() {
        let mut cell = Cell::new(CellKind::DirectionalInverse, Direction::Bottom, 0, 0);
        assert!(cell.is_inverse());
        cell.toggle_power();
        assert_eq!(cell.power(), -1);
        cell.toggle_power();
        assert_eq!(cell.power(), 0);
    }

    #[test]
    fn toggle_blank_is_inert() {
        let mut cell = Cell::new(CellKind::Blank, Direction::Top, 0, 0);
        cell.toggle_power();
        assert_eq!(cell.power(), 0);
    }

    #[test]
    fn target_power_only_kept_for_targets() {
        let target = Cell::new(CellKind::Target, Direction::Top, 0, 2);
        assert_eq!(target.target_power(), 2);

        let emitter = Cell::new(CellKind::Circle, Direction::Top, 0, 2);
        assert_eq!(emitter.target_power(), 0);
    }

    #[test]
    fn satisfied_requires_target_kind() {
        let pos = Position::new(0, 0);
        let mut target = Cell::new(CellKind::Target, Direction::Top, 0, 1);
        assert!(!target.is_satisfied());
        target.set_power(1);
        assert!(target.is_satisfied());

        let path = Cell::path(pos);
        assert!(!path.is_satisfied());
    }

    #[test]
    fn set_position_and_direction_overwrite() {
        let mut cell = Cell::new(CellKind::Rectangle, Direction::Top, 0, 0);
        cell.set_position(Position::new(4, 2));
        cell.set_direction(Direction::BottomLeft);
        assert_eq!(cell.position(), Position::new(4, 2));
        assert_eq!(cell.direction(), Direction::BottomLeft);
    }
}
