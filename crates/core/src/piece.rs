//! Active piece: a shape bound to a board origin and a color.

use crate::pieces::{get_shape, piece_color, Shape};
use crate::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_POSITION};
use crate::Board;

/// The falling piece
///
/// Occupied cells are at `(x + col, y + row)` for every filled `shape[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    shape: Shape,
    color: Color,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    pub fn new(shape: Shape, color: Color, x: i8, y: i8) -> Self {
        Self { shape, color, x, y }
    }

    /// A catalog piece at the spawn origin.
    pub fn spawn(kind: PieceKind) -> Self {
        let (x, y) = SPAWN_POSITION;
        Self::new(get_shape(kind), piece_color(kind), x, y)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Collision rule shared by movement and rotation.
    ///
    /// Columns must stay in `[0, COLS)` and rows below `ROWS`; rows above the
    /// top skip the occupancy check.
    fn fits(board: &Board, shape: &Shape, x: i8, y: i8) -> bool {
        shape.filled().all(|(dx, dy)| {
            let nx = x + dx;
            let ny = y + dy;
            if nx < 0 || nx >= BOARD_WIDTH as i8 || ny >= BOARD_HEIGHT as i8 {
                return false;
            }
            ny < 0 || !board.is_occupied(nx, ny)
        })
    }

    /// Whether the current shape fits with its origin at `(new_x, new_y)`.
    pub fn can_move(&self, board: &Board, new_x: i8, new_y: i8) -> bool {
        Self::fits(board, &self.shape, new_x, new_y)
    }

    /// Move by `(dx, dy)` if the target is free. Returns whether it moved.
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        if self.can_move(board, self.x + dx, self.y + dy) {
            self.x += dx;
            self.y += dy;
            true
        } else {
            false
        }
    }

    /// Rotate in place: clockwise if it fits, else counter-clockwise, else not at all.
    ///
    /// The origin never moves. Because the fallback orientation is derived from
    /// the current matrix rather than a rotation index, alternating attempts on
    /// an asymmetric piece can cycle between only two orientations.
    pub fn rotate_with_kick(&mut self, board: &Board) -> bool {
        let cw = self.shape.rotated_cw();
        if Self::fits(board, &cw, self.x, self.y) {
            self.shape = cw;
            return true;
        }

        let ccw = self.shape.rotated_ccw();
        if Self::fits(board, &ccw, self.x, self.y) {
            self.shape = ccw;
            return true;
        }

        false
    }

    /// Landing row if hard-dropped now.
    pub fn ghost_y(&self, board: &Board) -> i8 {
        let mut gy = self.y;
        while self.can_move(board, self.x, gy + 1) {
            gy += 1;
        }
        gy
    }

    /// Whether the piece rests on the floor or a locked cell.
    pub fn is_grounded(&self, board: &Board) -> bool {
        !self.can_move(board, self.x, self.y + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_uses_catalog_origin() {
        let piece = Piece::spawn(PieceKind::T);
        assert_eq!((piece.x, piece.y), (3, 0));
        assert_eq!(piece.color(), Color::MAGENTA);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(4, 0), (3, 1), (4, 1), (5, 1)]);
    }

    #[test]
    fn can_move_ignores_occupancy_above_top() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::O);
        assert!(piece.can_move(&board, 0, -2));
        assert!(!piece.can_move(&board, -1, -2));
        assert!(!piece.can_move(&board, 9, 0));
    }

    #[test]
    fn try_move_stops_at_walls() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::I);
        let mut moved = 0;
        while piece.try_move(&board, -1, 0) {
            moved += 1;
        }
        assert_eq!(moved, 3);
        assert_eq!(piece.x, 0);
    }

    #[test]
    fn ghost_y_lands_on_floor() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::I);
        assert_eq!(piece.ghost_y(&board), 19);
        let o = Piece::spawn(PieceKind::O);
        assert_eq!(o.ghost_y(&board), 18);
    }

    #[test]
    fn ghost_y_lands_on_stack() {
        let mut board = Board::new();
        board.set(4, 10, Some(Color::RED));
        let piece = Piece::spawn(PieceKind::O);
        assert_eq!(piece.ghost_y(&board), 8);
        assert_eq!(piece.y, 0);
    }

    #[test]
    fn rotate_prefers_clockwise() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::T);
        assert!(piece.rotate_with_kick(&board));
        assert_eq!(*piece.shape(), get_shape(PieceKind::T).rotated_cw());
    }

    #[test]
    fn rotate_falls_back_to_counter_clockwise() {
        // L at (0, 0): cw is 10/10/11, ccw is 11/01/01. Block only the cw cell.
        let mut board = Board::new();
        let mut l = Piece::new(get_shape(PieceKind::L), Color::ORANGE, 0, 0);
        board.set(0, 2, Some(Color::RED));
        assert!(l.rotate_with_kick(&board));
        assert_eq!(*l.shape(), get_shape(PieceKind::L).rotated_ccw());
        assert_eq!((l.x, l.y), (0, 0));
    }

    #[test]
    fn rotate_never_translates() {
        // A vertical I against the right wall: both horizontal orientations
        // would need columns 7..=10.
        let board = Board::new();
        let vertical = get_shape(PieceKind::I).rotated_cw();
        let mut piece = Piece::new(vertical, Color::CYAN, 7, 10);
        assert!(!piece.rotate_with_kick(&board));
        assert_eq!(*piece.shape(), vertical);
        assert_eq!((piece.x, piece.y), (7, 10));
    }

    #[test]
    fn rotate_fails_without_mutation_when_both_blocked() {
        let mut board = Board::new();
        board.set(0, 2, Some(Color::RED));
        board.set(1, 2, Some(Color::RED));
        let mut l = Piece::new(get_shape(PieceKind::L), Color::ORANGE, 0, 0);
        let before = l;
        assert!(!l.rotate_with_kick(&board));
        assert_eq!(l, before);
    }

    #[test]
    fn s_piece_has_two_orientations() {
        let board = Board::new();
        let mut s = Piece::spawn(PieceKind::S);
        let spawn_shape = *s.shape();
        assert!(s.rotate_with_kick(&board));
        assert!(s.rotate_with_kick(&board));
        assert_eq!(*s.shape(), spawn_shape);
    }
}
