//! Grid module - hexagonal layout and power propagation
//!
//! The grid is a hexagonal tiling stored as a dense, row-major `Vec<Cell>`.
//! Odd columns sit half a cell lower than even columns, so the four diagonal
//! neighbors depend on column parity:
//!
//! | direction   | even column  | odd column   |
//! |-------------|--------------|--------------|
//! | Top         | (r-1, c)     | (r-1, c)     |
//! | Bottom      | (r+1, c)     | (r+1, c)     |
//! | TopLeft     | (r-1, c-1)   | (r, c-1)     |
//! | TopRight    | (r-1, c+1)   | (r, c+1)     |
//! | BottomLeft  | (r, c-1)     | (r+1, c-1)   |
//! | BottomRight | (r, c+1)     | (r+1, c+1)   |
//!
//! Power is maintained incrementally: `rotate` and `switch` only touch the
//! cells inside one emitter's range and report exactly those cells back.

use std::fmt::Write as _;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use arrayvec::ArrayVec;
use log::{debug, trace};

use crate::cell::Cell;
use crate::error::ParseError;
use crate::types::{
    CellKind, Direction, Position, PowerState, PuzzleKind, Shape, MAX_CHANGED, MAX_RANGE,
};

/// Neighbor slots a cell projects power onto; `None` marks a slot past the grid edge
pub type PowerRange = ArrayVec<Option<Position>, MAX_RANGE>;

/// Cells whose power changed after a rotate or switch
pub type Changes = ArrayVec<Position, MAX_CHANGED>;

/// Number of comma-separated fields in a cell token
const CELL_FIELDS: usize = 6;

/// Largest grid a definition may ask for
pub const MAX_CELLS: usize = 1 << 16;

/// The puzzle grid - owns every cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major (row * cols + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid of inert Path cells
    pub fn new(rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::path(Position::new(row, col))))
            .collect();
        Self { rows, cols, cells }
    }

    /// Parse a one-line puzzle definition.
    ///
    /// Format: `<kind-tag> <rows>x<columns> <cell>*`, where each cell is
    /// `row,column,kind,direction,state,target`. The kind tag is left to the
    /// puzzle selector and not interpreted here.
    ///
    /// # Examples
    ///
    /// ```
    /// use hex_power_core::Grid;
    /// use hex_power_types::{CellKind, Direction, Position};
    ///
    /// let grid = Grid::from_definition("hex 4x5 1,3,tg,tt,up,2").unwrap();
    /// let cell = grid.get_cell(1, 3);
    /// assert_eq!(cell.kind(), CellKind::Target);
    /// assert_eq!(cell.direction(), Direction::Top);
    /// assert_eq!(cell.target_power(), 2);
    /// assert_eq!(grid[Position::new(0, 0)].kind(), CellKind::Path);
    /// ```
    pub fn from_definition(definition: &str) -> Result<Self, ParseError> {
        let mut tokens = definition.split_whitespace();
        tokens.next().ok_or(ParseError::Empty)?;
        let size = tokens.next().ok_or(ParseError::MissingSize)?;
        let (rows, cols) = parse_size(size)?;

        let mut grid = Self::new(rows, cols);
        let mut defined = vec![false; rows * cols];

        for token in tokens {
            let (position, mut cell) = parse_cell(token, rows, cols)?;
            let idx = grid.flat_index(position);
            if defined[idx] {
                return Err(ParseError::DuplicateCell(position));
            }
            defined[idx] = true;
            cell.set_position(position);
            grid.cells[idx] = cell;
        }

        grid.settle();
        Ok(grid)
    }

    /// Write the grid back as a definition line (default cells are omitted)
    pub fn to_definition(&self) -> String {
        let mut out = format!("{} {}x{}", PuzzleKind::Hexagonal.as_code(), self.rows, self.cols);
        for cell in &self.cells {
            let is_default = cell.is_path() && cell.direction() == Direction::Top;
            if is_default {
                continue;
            }
            let state = if cell.is_interactive() && cell.is_powered() {
                PowerState::Powered
            } else {
                PowerState::Unpowered
            };
            let pos = cell.position();
            let _ = write!(
                out,
                " {},{},{},{},{},{}",
                pos.row,
                pos.col,
                cell.kind().as_code(),
                cell.direction().as_code(),
                state.as_code(),
                cell.target_power()
            );
        }
        out
    }

    /// Push the contribution of every emitter that starts powered into its range
    fn settle(&mut self) {
        for idx in 0..self.cells.len() {
            let cell = self.cells[idx];
            if !cell.is_interactive() || !cell.is_powered() {
                continue;
            }
            for slot in self.cells_in_power_range(cell.position()).into_iter().flatten() {
                self.add_to_path(slot, cell.power());
            }
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Size as `(rows, columns)`
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Flat index of an in-bounds position.
    ///
    /// Panics when the position lies outside the grid.
    #[inline(always)]
    fn flat_index(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "position {} outside {}x{} grid",
            pos,
            self.rows,
            self.cols
        );
        pos.row * self.cols + pos.col
    }

    /// Get the cell at `pos`, or None if out of bounds
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if self.contains(pos) {
            Some(&self.cells[pos.row * self.cols + pos.col])
        } else {
            None
        }
    }

    /// Get the cell at `(row, col)`. Panics when out of bounds.
    pub fn get_cell(&self, row: usize, col: usize) -> &Cell {
        &self[Position::new(row, col)]
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Positions of every Target cell, row-major
    pub fn targets(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter(|c| c.is_target())
            .map(|c| c.position())
    }

    pub fn top(&self, pos: Position) -> Option<Position> {
        self.neighbor(pos, Direction::Top)
    }

    pub fn bottom(&self, pos: Position) -> Option<Position> {
        self.neighbor(pos, Direction::Bottom)
    }

    pub fn top_left(&self, pos: Position) -> Option<Position> {
        self.neighbor(pos, Direction::TopLeft)
    }

    pub fn top_right(&self, pos: Position) -> Option<Position> {
        self.neighbor(pos, Direction::TopRight)
    }

    pub fn bottom_left(&self, pos: Position) -> Option<Position> {
        self.neighbor(pos, Direction::BottomLeft)
    }

    pub fn bottom_right(&self, pos: Position) -> Option<Position> {
        self.neighbor(pos, Direction::BottomRight)
    }

    /// Adjacent position in `dir`, or None past the grid edge
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let odd = pos.is_odd_column();
        let (dr, dc): (isize, isize) = match dir {
            Direction::Top => (-1, 0),
            Direction::Bottom => (1, 0),
            Direction::TopLeft if odd => (0, -1),
            Direction::TopLeft => (-1, -1),
            Direction::TopRight if odd => (0, 1),
            Direction::TopRight => (-1, 1),
            Direction::BottomLeft if odd => (1, -1),
            Direction::BottomLeft => (0, -1),
            Direction::BottomRight if odd => (1, 1),
            Direction::BottomRight => (0, 1),
        };
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Position::new(row, col);
        self.contains(next).then_some(next)
    }

    /// All six neighbor slots: Top, Bottom, TopLeft, TopRight, BottomLeft, BottomRight
    pub fn neighbors(&self, pos: Position) -> [Option<Position>; 6] {
        [
            self.top(pos),
            self.bottom(pos),
            self.top_left(pos),
            self.top_right(pos),
            self.bottom_left(pos),
            self.bottom_right(pos),
        ]
    }

    /// Neighbor slots the cell at `pos` currently projects power onto.
    ///
    /// Derived from the cell's kind and current facing on every call.
    /// Blank, Path and Target cells have an empty range.
    pub fn cells_in_power_range(&self, pos: Position) -> PowerRange {
        let cell = &self[pos];
        let mut range = PowerRange::new();
        let Some(emission) = cell.kind().emission() else {
            return range;
        };

        let facing = cell.direction();
        let arms: &[Direction] = match emission.shape {
            Shape::Circle => &[
                Direction::Top,
                Direction::Bottom,
                Direction::TopLeft,
                Direction::TopRight,
                Direction::BottomLeft,
                Direction::BottomRight,
            ],
            Shape::Triangle => match facing {
                Direction::Top | Direction::BottomLeft | Direction::BottomRight => {
                    &[Direction::Top, Direction::BottomLeft, Direction::BottomRight]
                }
                Direction::Bottom | Direction::TopLeft | Direction::TopRight => {
                    &[Direction::Bottom, Direction::TopLeft, Direction::TopRight]
                }
            },
            Shape::Rectangle => match facing {
                Direction::Top | Direction::Bottom => &[Direction::Top, Direction::Bottom],
                Direction::TopLeft | Direction::BottomRight => {
                    &[Direction::TopLeft, Direction::BottomRight]
                }
                Direction::TopRight | Direction::BottomLeft => {
                    &[Direction::TopRight, Direction::BottomLeft]
                }
            },
            Shape::Directional => std::slice::from_ref(&facing),
        };

        for &dir in arms {
            let mut cursor = Some(pos);
            for _ in 0..emission.reach {
                cursor = cursor.and_then(|p| self.neighbor(p, dir));
                range.push(cursor);
            }
        }
        range
    }

    /// Rotate the cell at `pos` one step counter-clockwise.
    ///
    /// Returns None for Path and Target cells (nothing is mutated). Otherwise
    /// returns every Path cell that left or entered the cell's range; the
    /// rotated cell itself is not part of the list.
    pub fn rotate(&mut self, pos: Position) -> Option<Changes> {
        let cell = self[pos];
        if !cell.is_interactive() {
            return None;
        }

        let power = cell.power();
        let previous = self.cells_in_power_range(pos);
        self[pos].set_direction(cell.direction().rotate_ccw());
        let current = self.cells_in_power_range(pos);

        // Power is constant during a rotation, so a cell in both ranges nets zero.
        let mut changes = Changes::new();
        for slot in previous.into_iter().flatten() {
            if self.add_to_path(slot, -power) {
                push_unique(&mut changes, slot);
            }
        }
        for slot in current.into_iter().flatten() {
            if self.add_to_path(slot, power) {
                push_unique(&mut changes, slot);
            }
        }

        trace!(
            "rotate {} {:?} -> {:?}: {} path cells changed",
            pos,
            cell.direction(),
            self[pos].direction(),
            changes.len()
        );
        Some(changes)
    }

    /// Switch the cell at `pos` on or off.
    ///
    /// Returns None for Path and Target cells (nothing is mutated). Otherwise
    /// the list starts with the switched cell, followed by every Path cell in
    /// its range.
    pub fn switch(&mut self, pos: Position) -> Option<Changes> {
        if !self[pos].is_interactive() {
            return None;
        }

        let before = self[pos].power();
        self[pos].toggle_power();
        let difference = before - self[pos].power();

        let mut changes = Changes::new();
        changes.push(pos);
        for slot in self.cells_in_power_range(pos).into_iter().flatten() {
            if self.add_to_path(slot, -difference) {
                push_unique(&mut changes, slot);
            }
        }

        trace!(
            "switch {} power {} -> {}: {} cells changed",
            pos,
            before,
            self[pos].power(),
            changes.len()
        );
        Some(changes)
    }

    /// Total power the cell at `pos` receives from adjacent Path cells
    pub fn surrounding_power(&self, pos: Position) -> i32 {
        let power = self
            .neighbors(pos)
            .into_iter()
            .flatten()
            .map(|n| &self[n])
            .filter(|c| c.is_path())
            .map(|c| c.power())
            .sum();
        debug!("surrounding power for {}: {}", pos, power);
        power
    }

    /// Overwrite a Target's power with its surrounding power.
    ///
    /// Returns true when the target now matches its goal. Non-target cells are
    /// left untouched and report false.
    pub fn update_target_power(&mut self, pos: Position) -> bool {
        if !self[pos].is_target() {
            return false;
        }
        let power = self.surrounding_power(pos);
        let target = &mut self[pos];
        target.set_power(power);
        target.is_satisfied()
    }

    /// Add `delta` to a Path cell. Returns false (and does nothing) for other kinds.
    fn add_to_path(&mut self, pos: Position, delta: i32) -> bool {
        let cell = &mut self[pos];
        if !cell.is_path() {
            return false;
        }
        cell.add_power(delta);
        true
    }
}

impl Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Cell {
        &self.cells[self.flat_index(pos)]
    }
}

impl IndexMut<Position> for Grid {
    fn index_mut(&mut self, pos: Position) -> &mut Cell {
        let idx = self.flat_index(pos);
        &mut self.cells[idx]
    }
}

impl FromStr for Grid {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_definition(s)
    }
}

fn push_unique(changes: &mut Changes, pos: Position) {
    if !changes.contains(&pos) {
        changes.push(pos);
    }
}

fn parse_size(size: &str) -> Result<(usize, usize), ParseError> {
    let invalid = || ParseError::InvalidSize(size.to_string());
    let (rows, cols) = size.split_once('x').ok_or_else(invalid)?;
    let rows: usize = rows.parse().map_err(|_| invalid())?;
    let cols: usize = cols.parse().map_err(|_| invalid())?;
    if rows == 0 || cols == 0 {
        return Err(ParseError::EmptyGrid(size.to_string()));
    }
    match rows.checked_mul(cols) {
        Some(cells) if cells <= MAX_CELLS => Ok((rows, cols)),
        _ => Err(ParseError::TooLarge {
            size: size.to_string(),
            limit: MAX_CELLS,
        }),
    }
}

fn parse_cell(token: &str, rows: usize, cols: usize) -> Result<(Position, Cell), ParseError> {
    let fields: ArrayVec<&str, CELL_FIELDS> = {
        let found = token.split(',').count();
        if found != CELL_FIELDS {
            return Err(ParseError::FieldCount {
                token: token.to_string(),
                found,
            });
        }
        token.split(',').collect()
    };

    let number = |field: &'static str, value: &str| {
        value.parse::<i64>().map_err(|_| ParseError::InvalidNumber {
            token: token.to_string(),
            field,
            value: value.to_string(),
        })
    };
    let row = number("row", fields[0])?;
    let col = number("column", fields[1])?;
    let target_power = number("target power", fields[5])?;
    let target_power = i32::try_from(target_power).map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
        field: "target power",
        value: fields[5].to_string(),
    })?;

    let in_bounds = (0..rows as i64).contains(&row) && (0..cols as i64).contains(&col);
    if !in_bounds {
        return Err(ParseError::OutOfBounds {
            token: token.to_string(),
            rows,
            cols,
        });
    }

    let kind = CellKind::from_code(fields[2]).ok_or_else(|| ParseError::UnknownKind {
        token: token.to_string(),
        code: fields[2].to_string(),
    })?;
    let direction = Direction::from_code(fields[3]).ok_or_else(|| ParseError::UnknownDirection {
        token: token.to_string(),
        code: fields[3].to_string(),
    })?;
    let state = PowerState::from_code(fields[4]).ok_or_else(|| ParseError::UnknownState {
        token: token.to_string(),
        code: fields[4].to_string(),
    })?;

    // Path power is derived from its neighbors when the grid settles.
    let power = match (state, kind.polarity()) {
        (PowerState::Powered, Some(polarity)) => polarity.unit(),
        _ => 0,
    };

    Ok((
        Position::new(row as usize, col as usize),
        Cell::new(kind, direction, power, target_power),
    ))
}
