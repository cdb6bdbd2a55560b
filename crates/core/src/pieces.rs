//! Pieces module - tetromino catalog and shape-matrix transforms
//!
//! Shapes are small binary occupancy matrices (at most 4x4) stored inline, so
//! every copy is a deep copy and no piece ever aliases the catalog.

use crate::types::{Color, PieceKind};

/// Largest shape dimension (the I piece is 4 long).
pub const MAX_SHAPE_DIM: usize = 4;

/// A rectangular binary occupancy matrix, row-major, top row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    height: u8,
    width: u8,
    cells: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Returns `None` for empty, ragged or oversized input.
    ///
    /// ```
    /// use ultra_tetris_core::Shape;
    ///
    /// let t = Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]).unwrap();
    /// assert_eq!((t.height(), t.width()), (2, 3));
    /// assert!(Shape::from_rows(&[&[1, 1], &[1]]).is_none());
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height > MAX_SHAPE_DIM || width == 0 || width > MAX_SHAPE_DIM {
            return None;
        }
        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return None;
            }
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = u8::from(v != 0);
            }
        }
        Some(Self {
            height: height as u8,
            width: width as u8,
            cells,
        })
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    /// True if cell (row, col) is filled. Out-of-range cells are empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height as usize && col < self.width as usize && self.cells[row][col] == 1
    }

    /// Offsets `(dx, dy)` = `(col, row)` of every filled cell.
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height as usize).flat_map(move |r| {
            (0..self.width as usize)
                .filter(move |&c| self.cells[r][c] == 1)
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// 90° clockwise transform: an `h x w` matrix becomes `w x h` with
    /// `new[c][h-1-r] = old[r][c]`.
    pub fn rotated_cw(&self) -> Self {
        let h = self.height as usize;
        let w = self.width as usize;
        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for r in 0..h {
            for c in 0..w {
                cells[c][h - 1 - r] = self.cells[r][c];
            }
        }
        Self {
            height: self.width,
            width: self.height,
            cells,
        }
    }

    /// 90° counter-clockwise transform, composed from three clockwise ones.
    pub fn rotated_ccw(&self) -> Self {
        self.rotated_cw().rotated_cw().rotated_cw()
    }
}

const fn shape(height: u8, width: u8, cells: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM]) -> Shape {
    Shape {
        height,
        width,
        cells,
    }
}

const I_SHAPE: Shape = shape(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
const O_SHAPE: Shape = shape(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const T_SHAPE: Shape = shape(2, 3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const S_SHAPE: Shape = shape(2, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const Z_SHAPE: Shape = shape(2, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);
const J_SHAPE: Shape = shape(2, 3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const L_SHAPE: Shape = shape(2, 3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);

/// Spawn shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Display color for a piece kind
pub fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::CYAN,
        PieceKind::O => Color::YELLOW,
        PieceKind::T => Color::MAGENTA,
        PieceKind::S => Color::GREEN,
        PieceKind::Z => Color::RED,
        PieceKind::J => Color::BLUE,
        PieceKind::L => Color::ORANGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_piece_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(get_shape(kind).filled().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn rotate_cw_swaps_dimensions() {
        let i = get_shape(PieceKind::I).rotated_cw();
        assert_eq!((i.height(), i.width()), (4, 1));
        assert!((0..4).all(|r| i.is_filled(r, 0)));
    }

    #[test]
    fn rotate_cw_matches_matrix_formula() {
        // T: 010 / 111  ->  10 / 11 / 10
        let t = get_shape(PieceKind::T).rotated_cw();
        let expected = Shape::from_rows(&[&[1, 0], &[1, 1], &[1, 0]]).unwrap();
        assert_eq!(t, expected);
    }

    #[test]
    fn four_clockwise_turns_are_identity() {
        for kind in PieceKind::ALL {
            let s = get_shape(kind);
            assert_eq!(s.rotated_cw().rotated_cw().rotated_cw().rotated_cw(), s);
        }
    }

    #[test]
    fn ccw_undoes_cw() {
        for kind in PieceKind::ALL {
            let s = get_shape(kind);
            assert_eq!(s.rotated_cw().rotated_ccw(), s);
        }
    }

    #[test]
    fn filled_reports_col_row_offsets() {
        let j: Vec<_> = get_shape(PieceKind::J).filled().collect();
        assert_eq!(j, vec![(0, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn catalog_colors() {
        assert_eq!(piece_color(PieceKind::I), Color::CYAN);
        assert_eq!(piece_color(PieceKind::L), Color::new(255, 140, 0));
    }
}
