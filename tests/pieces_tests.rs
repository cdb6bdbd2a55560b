//! Piece catalog and rotation tests

use ultra_tetris::core::{get_shape, piece_color, Board, Piece, PieceRandomizer, Shape};
use ultra_tetris::types::{Color, PieceKind, BOARD_WIDTH, SPAWN_POSITION};

fn rows(shape: &Shape) -> Vec<Vec<u8>> {
    (0..shape.height() as usize)
        .map(|r| {
            (0..shape.width() as usize)
                .map(|c| u8::from(shape.is_filled(r, c)))
                .collect()
        })
        .collect()
}

// ============== Catalog ==============

#[test]
fn test_i_piece_shape() {
    assert_eq!(rows(&get_shape(PieceKind::I)), vec![vec![1, 1, 1, 1]]);
    assert_eq!(piece_color(PieceKind::I), Color::CYAN);
}

#[test]
fn test_o_piece_shape() {
    assert_eq!(rows(&get_shape(PieceKind::O)), vec![vec![1, 1], vec![1, 1]]);
    assert_eq!(piece_color(PieceKind::O), Color::YELLOW);
}

#[test]
fn test_three_wide_piece_shapes() {
    let cases = [
        (PieceKind::T, [[0, 1, 0], [1, 1, 1]], Color::MAGENTA),
        (PieceKind::S, [[0, 1, 1], [1, 1, 0]], Color::GREEN),
        (PieceKind::Z, [[1, 1, 0], [0, 1, 1]], Color::RED),
        (PieceKind::J, [[1, 0, 0], [1, 1, 1]], Color::BLUE),
        (PieceKind::L, [[0, 0, 1], [1, 1, 1]], Color::ORANGE),
    ];
    for (kind, expected, color) in cases {
        let expected: Vec<Vec<u8>> = expected.iter().map(|r| r.to_vec()).collect();
        assert_eq!(rows(&get_shape(kind)), expected, "{kind:?}");
        assert_eq!(piece_color(kind), color, "{kind:?}");
    }
}

#[test]
fn test_catalog_copies_are_independent() {
    let mut piece = Piece::spawn(PieceKind::T);
    assert!(piece.rotate_with_kick(&Board::new()));
    assert_ne!(*piece.shape(), get_shape(PieceKind::T));
    assert_eq!(rows(&get_shape(PieceKind::T)), vec![vec![0, 1, 0], vec![1, 1, 1]]);
}

// ============== Rotation ==============

#[test]
fn test_i_rotates_to_vertical_in_place() {
    let board = Board::new();
    let mut piece = Piece::spawn(PieceKind::I);
    piece.y = 5;

    assert!(piece.rotate_with_kick(&board));
    assert_eq!((piece.x, piece.y), (SPAWN_POSITION.0, 5));
    assert_eq!((piece.shape().height(), piece.shape().width()), (4, 1));
}

#[test]
fn test_vertical_i_cannot_rotate_against_right_wall() {
    let board = Board::new();
    let mut piece = Piece::new(
        get_shape(PieceKind::I).rotated_cw(),
        Color::CYAN,
        BOARD_WIDTH as i8 - 1,
        5,
    );
    let before = piece;

    // Both orientations would stick out past the wall; no kick translates it.
    assert!(!piece.rotate_with_kick(&board));
    assert_eq!(piece, before);
}

#[test]
fn test_rotation_may_reach_above_the_top() {
    let board = Board::new();
    let mut piece = Piece::spawn(PieceKind::I);
    piece.y = -1;
    assert!(piece.rotate_with_kick(&board));
    assert!(piece.cells().any(|(_, y)| y < 0));
}

#[test]
fn test_o_rotation_is_a_no_op_shape() {
    let board = Board::new();
    let mut piece = Piece::spawn(PieceKind::O);
    assert!(piece.rotate_with_kick(&board));
    assert_eq!(*piece.shape(), get_shape(PieceKind::O));
}

// ============== Randomizer ==============

#[test]
fn test_same_seed_same_sequence() {
    let mut a = PieceRandomizer::new(12345);
    let mut b = PieceRandomizer::new(12345);
    for _ in 0..100 {
        assert_eq!(a.draw(), b.draw());
    }
}

#[test]
fn test_every_kind_eventually_appears() {
    let mut rng = PieceRandomizer::new(7);
    let mut seen = [false; 7];
    for _ in 0..500 {
        seen[rng.draw().index()] = true;
    }
    assert!(seen.iter().all(|&s| s));
}
