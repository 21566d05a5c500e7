use hex_power::core::{Grid, ParseError};
use hex_power::types::{CellKind, Direction, Position};

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

#[test]
fn test_neighbors_are_symmetric() {
    let grid = Grid::new(5, 6);
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let here = pos(row, col);
            for dir in Direction::ALL {
                if let Some(n) = grid.neighbor(here, dir) {
                    assert_eq!(
                        grid.neighbor(n, dir.opposite()),
                        Some(here),
                        "{:?} of {} is {}, but its {:?} is not {}",
                        dir,
                        here,
                        n,
                        dir.opposite(),
                        here
                    );
                }
            }
        }
    }
}

#[test]
fn test_even_column_offsets() {
    let grid = Grid::new(4, 4);
    let here = pos(2, 2);
    assert_eq!(grid.top(here), Some(pos(1, 2)));
    assert_eq!(grid.bottom(here), Some(pos(3, 2)));
    assert_eq!(grid.top_left(here), Some(pos(1, 1)));
    assert_eq!(grid.top_right(here), Some(pos(1, 3)));
    assert_eq!(grid.bottom_left(here), Some(pos(2, 1)));
    assert_eq!(grid.bottom_right(here), Some(pos(2, 3)));
}

#[test]
fn test_odd_column_offsets() {
    let grid = Grid::new(4, 4);
    let here = pos(1, 1);
    assert_eq!(grid.top(here), Some(pos(0, 1)));
    assert_eq!(grid.bottom(here), Some(pos(2, 1)));
    assert_eq!(grid.top_left(here), Some(pos(1, 0)));
    assert_eq!(grid.top_right(here), Some(pos(1, 2)));
    assert_eq!(grid.bottom_left(here), Some(pos(2, 0)));
    assert_eq!(grid.bottom_right(here), Some(pos(2, 2)));
}

#[test]
fn test_edges_have_no_neighbors() {
    let grid = Grid::new(3, 4);
    let corner = pos(0, 0);
    assert_eq!(grid.top(corner), None);
    assert_eq!(grid.top_left(corner), None);
    assert_eq!(grid.top_right(corner), None);
    assert_eq!(grid.bottom_left(corner), None);

    // Odd last column on the last row: everything below or right is gone.
    let far = pos(2, 3);
    assert_eq!(grid.bottom(far), None);
    assert_eq!(grid.bottom_left(far), None);
    assert_eq!(grid.bottom_right(far), None);
    assert_eq!(grid.top_right(far), None);
    assert_eq!(grid.top_left(far), Some(pos(2, 2)));
}

#[test]
fn test_non_square_grid_keeps_rows_and_columns_apart() {
    let grid = Grid::from_definition("hex 2x5 1,4,cn,tt,up,0").unwrap();
    assert_eq!(grid.size(), (2, 5));
    assert_eq!(grid.get_cell(1, 4).kind(), CellKind::Circle);
    assert!(grid.get(pos(4, 1)).is_none());
    assert!(grid.contains(pos(1, 4)));
    assert!(!grid.contains(pos(2, 0)));
}

#[test]
fn test_parse_target_cell() {
    let grid = Grid::from_definition("hex 3x5 1,3,tg,tt,up,2").unwrap();
    let cell = &grid[pos(1, 3)];
    assert_eq!(cell.kind(), CellKind::Target);
    assert_eq!(cell.direction(), Direction::Top);
    assert_eq!(cell.target_power(), 2);
    assert_eq!(cell.position(), pos(1, 3));
    assert_eq!(grid.targets().collect::<Vec<_>>(), vec![pos(1, 3)]);
}

#[test]
fn test_parse_errors_name_the_problem() {
    assert_eq!(Grid::from_definition(""), Err(ParseError::Empty));
    assert_eq!(Grid::from_definition("hex"), Err(ParseError::MissingSize));
    assert!(matches!(
        Grid::from_definition("hex 3by3"),
        Err(ParseError::InvalidSize(_))
    ));
    assert!(matches!(
        Grid::from_definition("hex 0x4"),
        Err(ParseError::EmptyGrid(_))
    ));
    assert!(matches!(
        Grid::from_definition("hex 3x3 1,1,cn,tt,up"),
        Err(ParseError::FieldCount { found: 5, .. })
    ));
    assert!(matches!(
        Grid::from_definition("hex 3x3 1,x,cn,tt,up,0"),
        Err(ParseError::InvalidNumber { field: "column", .. })
    ));
    assert!(matches!(
        Grid::from_definition("hex 3x3 1,1,cn,up,up,0"),
        Err(ParseError::UnknownDirection { .. })
    ));
    assert!(matches!(
        Grid::from_definition("hex 3x3 1,1,cn,tt,on,0"),
        Err(ParseError::UnknownState { .. })
    ));
    assert!(matches!(
        Grid::from_definition("hex 3x3 3,0,cn,tt,up,0"),
        Err(ParseError::OutOfBounds { rows: 3, cols: 3, .. })
    ));
    assert_eq!(
        Grid::from_definition("hex 3x3 1,1,cn,tt,up,0 1,1,tg,tt,up,1"),
        Err(ParseError::DuplicateCell(pos(1, 1)))
    );
}

#[test]
fn test_definition_round_trip_keeps_layout_and_power() {
    let definition = "hex 4x4 0,1,dn,bb,pw,0 2,1,tg,tt,up,1 3,3,ri2,tl,up,0 1,2,bk,tr,up,0";
    let grid = Grid::from_definition(definition).unwrap();
    let written = grid.to_definition();
    let reparsed = Grid::from_definition(&written).unwrap();
    assert_eq!(reparsed, grid);
    assert!(written.starts_with("hex 4x4 "));
    assert!(written.contains("0,1,dn,bb,pw,0"));
}
