use super::GridSpec;
use crate::error::{LandGridError, Result};

/// Row-major land/sea mask, row 0 northernmost
///
/// Only `GridBuilder` can mutate a grid. Everything outside the crate sees
/// a finished, read-only mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl DenseGrid {
    /// All-sea grid
    pub(crate) fn sea(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a grid from explicit rows; every row must have the same width
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            if row.len() != width {
                return Err(LandGridError::dimensions((width, height), (row.len(), height)));
            }
            cells.extend(row);
        }

        Ok(Self::from_cells(width, height, cells))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_land(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        (0..self.height).map(move |r| self.row(r))
    }

    pub fn land_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Fail unless this grid has exactly the dimensions of `spec`
    pub fn check_spec(&self, spec: &GridSpec) -> Result<()> {
        if self.dimensions() != spec.dimensions() {
            return Err(LandGridError::dimensions(spec.dimensions(), self.dimensions()));
        }
        Ok(())
    }

    pub(crate) fn mark(&mut self, row: usize, col: usize) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = true;
        }
    }

    /// Mark a cell and its 8-connected neighbors, dropping any that fall off the grid
    pub(crate) fn mark_neighborhood(&mut self, row: usize, col: usize) {
        for r in row.saturating_sub(1)..=row + 1 {
            for c in col.saturating_sub(1)..=col + 1 {
                self.mark(r, c);
            }
        }
    }
}
