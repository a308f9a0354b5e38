use naval_battle::{Board, BoardError, Coordinate, Mark, ShipKind, BOARD_COLS, BOARD_ROWS};

#[test]
fn new_board_is_empty() {
    let board = Board::new(BOARD_ROWS, BOARD_COLS);
    assert!(board.is_empty());
    assert_eq!(board.coordinates().count(), 25);
    assert!(board.coordinates().all(|c| board.get(c) == Ok(Mark::Empty)));
}

#[test]
fn set_and_get_marks() -> Result<(), BoardError> {
    let mut board = Board::new(5, 5);
    let c = Coordinate::new(2, 3);
    board.set(c, Mark::Ship(ShipKind::Submarine))?;
    assert_eq!(board.get(c)?, Mark::Ship(ShipKind::Submarine));
    board.set(c, Mark::Hit)?;
    assert_eq!(board.get(c)?, Mark::Hit);
    assert_eq!(board.count(Mark::Hit), 1);
    assert!(!board.is_empty());
    Ok(())
}

#[test]
fn out_of_bounds_access_fails() {
    let mut board = Board::new(5, 5);
    let outside = Coordinate::new(5, 0);
    assert_eq!(
        board.get(outside),
        Err(BoardError::OutOfBounds { row: 5, col: 0 })
    );
    assert_eq!(
        board.set(Coordinate::new(0, 5), Mark::Miss),
        Err(BoardError::OutOfBounds { row: 0, col: 5 })
    );
    assert!(board.is_empty());
}

#[test]
fn symbols_cover_every_cell() -> Result<(), BoardError> {
    let mut board = Board::new(5, 5);
    board.set("A1".parse().unwrap(), Mark::Ship(ShipKind::Battleship))?;
    board.set("B2".parse().unwrap(), Mark::Miss)?;
    board.set("C3".parse().unwrap(), Mark::Hit)?;
    let symbols = board.symbols();
    assert_eq!(symbols.len(), 25);
    assert_eq!(symbols["A1"], 'B');
    assert_eq!(symbols["B2"], 'O');
    assert_eq!(symbols["C3"], 'X');
    assert_eq!(symbols["E5"], '~');
    Ok(())
}

#[test]
fn non_square_board_bounds() {
    let board = Board::new(2, 4);
    assert!(board.contains(Coordinate::new(1, 3)));
    assert!(!board.contains(Coordinate::new(2, 0)));
    let names: Vec<String> = board.coordinates().map(|c| c.to_string()).collect();
    assert_eq!(names, vec!["A1", "A2", "A3", "A4", "B1", "B2", "B3", "B4"]);
}
