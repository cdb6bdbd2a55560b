//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color of a
//! locked piece. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the board (y < 0) are open space: pieces may spawn and rotate there.

use crate::pieces::Shape;
use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row-major grid of cell colors, as handed to renderers.
pub type ColorGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Collision query used by piece movement.
    ///
    /// Walls and the floor count as occupied, rows above the top never do.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            return false;
        }
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Copy every filled shape cell into the board at `(x + col, y + row)`.
    ///
    /// Cells that land outside the board (in particular above row 0) are dropped.
    pub fn place_block(&mut self, x: i8, y: i8, shape: &Shape, color: Color) {
        for (dx, dy) in shape.filled() {
            self.set(x + dx, y + dy, Some(color));
        }
    }

    /// Shift every row above `y` down by one and empty row 0.
    fn collapse_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;
        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }
        self.cells[..width].fill(None);
    }

    /// Remove full rows in one top-to-bottom pass and return how many were removed.
    ///
    /// After a row collapses the same index is checked again before advancing,
    /// so the row shifted into it is also evaluated.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = 0usize;
        while y < BOARD_HEIGHT as usize {
            if self.is_row_full(y) {
                self.collapse_row(y);
                cleared += 1;
            } else {
                y += 1;
            }
        }
        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the board into a row-major color grid.
    pub fn write_color_grid(&self, out: &mut ColorGrid) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Fill row `y` completely except for the listed columns.
    #[cfg(test)]
    pub(crate) fn fill_row_except(&mut self, y: i8, holes: &[i8], color: Color) {
        for x in 0..BOARD_WIDTH as i8 {
            if !holes.contains(&x) {
                self.set(x, y, Some(color));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
