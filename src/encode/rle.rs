use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{LandGridError, Result};
use crate::grid::DenseGrid;

/// A maximal run of land cells within one row
///
/// Serialized as a `[start, length]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Run {
    pub start: usize,
    pub length: usize,
}

impl Run {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// One past the last column of the run; `None` if that overflows
    pub fn end(&self) -> Option<usize> {
        self.start.checked_add(self.length)
    }
}

impl From<(usize, usize)> for Run {
    fn from((start, length): (usize, usize)) -> Self {
        Self { start, length }
    }
}

impl From<Run> for (usize, usize) {
    fn from(run: Run) -> Self {
        (run.start, run.length)
    }
}

/// Land runs of one row, sorted by start column; empty for an all-sea row
pub type RleRow = Vec<Run>;

/// Run-length encoding of a whole grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEncoding {
    /// One entry per grid row, northernmost first
    pub rows: Vec<RleRow>,
    pub total_land_cells: usize,
}

/// Encode one row as maximal land runs
///
/// A run still open at the last column closes at the row boundary; there is
/// no wraparound to column 0.
pub fn encode_row(row: &[bool]) -> RleRow {
    let mut runs = Vec::new();
    let mut start = None;

    for (col, &land) in row.iter().enumerate() {
        match (land, start) {
            (true, None) => start = Some(col),
            (false, Some(s)) => {
                runs.push(Run::new(s, col - s));
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        runs.push(Run::new(s, row.len() - s));
    }

    runs
}

/// Encode every row of the grid, in row order
pub fn encode_rows(grid: &DenseGrid) -> RowEncoding {
    let rows: Vec<RleRow> = (0..grid.height())
        .into_par_iter()
        .map(|r| encode_row(grid.row(r)))
        .collect();

    let total_land_cells = rows.iter().flatten().map(|run| run.length).sum();

    RowEncoding {
        rows,
        total_land_cells,
    }
}

/// Replay runs into a row of `width` cells
///
/// Runs must lie within the row, sorted by start column and not overlapping.
pub fn decode_row(runs: &[Run], width: usize) -> Result<Vec<bool>> {
    let mut row = vec![false; width];
    let mut prev_end = 0;

    for run in runs {
        let end = match run.end() {
            Some(end) if end <= width => end,
            _ => {
                return Err(LandGridError::ResolutionMismatch {
                    expected: format!("runs within {} columns", width),
                    actual: format!("run of {} cells at column {}", run.length, run.start),
                });
            }
        };
        if run.start < prev_end {
            return Err(LandGridError::ResolutionMismatch {
                expected: format!("runs starting at or after column {}", prev_end),
                actual: format!("run starting at column {}", run.start),
            });
        }

        row[run.start..end].fill(true);
        prev_end = end;
    }

    Ok(row)
}
