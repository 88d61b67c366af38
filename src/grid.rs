use crate::{Cell, GridInt};

pub const VIEWPORT_WIDTH: GridInt = 600;
pub const VIEWPORT_HEIGHT: GridInt = 400;
pub const CELL_SIZE: GridInt = 20;

/// The playfield, measured in cells. Built once at startup and never mutated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: GridInt,
    rows: GridInt,
    cell_size: GridInt,
}

impl Grid {
    pub fn from_viewport(width: GridInt, height: GridInt, cell_size: GridInt) -> Self {
        assert!(cell_size > 0, "cell size must be positive");
        Grid { cols: width / cell_size, rows: height / cell_size, cell_size }
    }

    pub fn cols(&self) -> GridInt {
        self.cols
    }

    pub fn rows(&self) -> GridInt {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.cols).contains(&cell.0) && (0..self.rows).contains(&cell.1)
    }

    /// Top-left corner of `cell` in viewport units.
    pub fn to_pixels(&self, cell: Cell) -> (GridInt, GridInt) {
        (cell.0 * self.cell_size, cell.1 * self.cell_size)
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| (x, y)))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::from_viewport(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, CELL_SIZE)
    }
}
