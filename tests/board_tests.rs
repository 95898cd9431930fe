//! Board tests through the facade crate.

use blockfall::core::Board;
use blockfall::types::{Block, PieceKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

#[test]
fn test_default_board_starts_empty() {
    let board = Board::new(DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH).unwrap();
    assert_eq!(board.height(), 18);
    assert_eq!(board.width(), 10);

    for v in 0..board.height() {
        for h in 0..board.width() {
            assert!(board.is_inside(v, h));
            assert!(board.get(v, h).is_none());
        }
    }
}

#[test]
fn test_accessors_are_total() {
    let mut board = Board::new(DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH).unwrap();

    assert!(board.get(-1, 0).is_none());
    assert!(board.get(0, -1).is_none());
    assert!(board.get(DEFAULT_BOARD_HEIGHT, 0).is_none());
    assert!(board.get(0, DEFAULT_BOARD_WIDTH).is_none());

    // Out-of-range writes are dropped, in-range writes stick.
    board.set(-1, 3, Some(Block::new(PieceKind::T)));
    board.set(9, 3, Some(Block::new(PieceKind::T)));
    assert!(board.get(9, 3).is_some());
    assert_eq!(board.get(9, 3).unwrap().kind(), PieceKind::T);
}

#[test]
fn test_removing_a_row_keeps_the_stack_below() {
    let mut board = Board::new(6, 3).unwrap();
    for h in 0..3 {
        board.set(3, h, Some(Block::new(PieceKind::S)));
    }
    board.set(2, 1, Some(Block::new(PieceKind::Z)));
    board.set(4, 0, Some(Block::new(PieceKind::L)));

    assert!(board.is_row_full(3));
    board.remove_row(3);

    assert_eq!(board.height(), 6);
    // The marker above the removed row shifted down by one.
    assert!(board.get(3, 1).is_some());
    assert!(board.get(2, 1).is_none());
    // The marker below did not move.
    assert!(board.get(4, 0).is_some());
    // A fresh empty row appeared on top.
    assert!((0..3).all(|h| board.get(0, h).is_none()));
}
