//! Greedy first-fit placement of a chromosome onto the grid.
//!
//! Departments are placed strictly in chromosome order. A single-cell
//! department takes the first empty cell in row-major order; a double
//! takes the first horizontal pair `(r, c)`, `(r, c + 1)` with both cells
//! empty. There are no vertical pairs and no wraparound between rows.
//!
//! The placer never backtracks. If some department finds no room the whole
//! placement fails, even when a different order of the same departments
//! would have fit. That is an accepted limitation of the heuristic: the GA
//! searches over orders, so an unlucky order is simply out-competed.

use crate::model::{Cell, GridWeight, PositionMap};

/// Default grid rows.
pub const DEFAULT_ROWS: usize = 5;
/// Default grid columns.
pub const DEFAULT_COLS: usize = 5;

/// Places chromosomes on a fixed `rows × cols` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlacer {
    rows: usize,
    cols: usize,
}

impl Default for GridPlacer {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl GridPlacer {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, saturating for grids too large to address.
    pub fn capacity(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Realizes `chromosome` as a position map.
    ///
    /// `weights` is indexed by department id. Returns `None` as soon as one
    /// department cannot be placed; no partial layout is ever returned.
    ///
    /// # Panics
    /// Panics if the chromosome names a department id outside `weights`.
    pub fn place(&self, chromosome: &[usize], weights: &[GridWeight]) -> Option<PositionMap> {
        let mut occupied = vec![false; self.capacity()];
        let mut positions = PositionMap::with_departments(weights.len());

        for &dept in chromosome {
            let cells = match weights[dept] {
                GridWeight::Double => self.first_free_pair(&occupied)?,
                GridWeight::Single => self.first_free_cell(&occupied)?,
            };
            for cell in &cells {
                occupied[cell.row * self.cols + cell.col] = true;
            }
            positions.assign(dept, cells);
        }

        Some(positions)
    }

    fn first_free_cell(&self, occupied: &[bool]) -> Option<Vec<Cell>> {
        let idx = occupied.iter().position(|&taken| !taken)?;
        Some(vec![Cell::new(idx / self.cols, idx % self.cols)])
    }

    fn first_free_pair(&self, occupied: &[bool]) -> Option<Vec<Cell>> {
        for row in 0..self.rows {
            for col in 0..self.cols.saturating_sub(1) {
                let idx = row * self.cols + col;
                if !occupied[idx] && !occupied[idx + 1] {
                    return Some(vec![Cell::new(row, col), Cell::new(row, col + 1)]);
                }
            }
        }
        None
    }
}
