//! Grid cells, position maps and the derived grid view.
//!
//! The [`PositionMap`] is the only authoritative record of a layout. A
//! [`Grid`] is rebuilt from it whenever a cell matrix is needed.

use super::department::DepartmentSet;
use std::collections::BTreeMap;
use std::fmt;

/// A grid cell at `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the two cells share an edge (Manhattan distance exactly 1).
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// Cells occupied by each department, indexed by department id.
///
/// Each footprint holds one cell, or two horizontally adjacent cells
/// listed left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionMap {
    footprints: Vec<Vec<Cell>>,
}

impl PositionMap {
    /// An empty map for `n` departments.
    pub fn with_departments(n: usize) -> Self {
        Self {
            footprints: vec![Vec::new(); n],
        }
    }

    pub(crate) fn assign(&mut self, department: usize, cells: Vec<Cell>) {
        self.footprints[department] = cells;
    }

    /// Cells of `department`; empty if it was never placed.
    pub fn cells(&self, department: usize) -> &[Cell] {
        self.footprints
            .get(department)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `(department, cells)` for every placed department.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Cell])> {
        self.footprints
            .iter()
            .enumerate()
            .filter(|(_, cells)| !cells.is_empty())
            .map(|(id, cells)| (id, cells.as_slice()))
    }

    /// Total occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.footprints.iter().map(Vec::len).sum()
    }

    /// Whether any cell of `a` touches any cell of `b`.
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        let cells_b = self.cells(b);
        self.cells(a)
            .iter()
            .any(|&ca| cells_b.iter().any(|&cb| ca.is_adjacent(cb)))
    }

    /// The map keyed by department name.
    pub fn to_named(&self, departments: &DepartmentSet) -> BTreeMap<String, Vec<Cell>> {
        self.iter()
            .map(|(id, cells)| (departments.name(id).to_string(), cells.to_vec()))
            .collect()
    }
}

/// Row-major cell matrix derived from a [`PositionMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<String>>,
}

impl Grid {
    /// Builds the cell view of `positions`.
    ///
    /// Cells outside `rows × cols` are ignored.
    pub fn from_positions(
        rows: usize,
        cols: usize,
        positions: &PositionMap,
        departments: &DepartmentSet,
    ) -> Self {
        Self::from_footprints(
            rows,
            cols,
            positions.iter().map(|(id, cells)| (departments.name(id), cells)),
        )
    }

    /// Builds the cell view from `(name, cells)` footprints.
    pub fn from_footprints<'a, I>(rows: usize, cols: usize, footprints: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [Cell])>,
    {
        let mut cells = vec![None; rows * cols];
        for (name, footprint) in footprints {
            for cell in footprint {
                if cell.row < rows && cell.col < cols {
                    cells[cell.row * cols + cell.col] = Some(name.to_string());
                }
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Department occupying `(row, col)`, if any.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col].as_deref()
    }

    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }
}

impl fmt::Display for Grid {
    /// One line per row, columns padded to the longest label, `.` for empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .cells
            .iter()
            .flatten()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(1);

        for row in 0..self.rows {
            let line: Vec<String> = (0..self.cols)
                .map(|col| format!("{:<width$}", self.get(row, col).unwrap_or(".")))
                .collect();
            writeln!(f, "{}", line.join(" | ").trim_end())?;
        }
        Ok(())
    }
}
