//! Persisted grid artifacts
//!
//! Sparse JSON (the canonical form):
//! ```json
//! {
//!   "resolution": 0.02, "width": 18000, "height": 9000,
//!   "originLat": 90.0, "originLon": -180.0,
//!   "description": "...", "sources": ["ne_10m_land", ...],
//!   "totalLandCells": 123, "landPercentage": 0.01,
//!   "rows": [[], [[start, length], ...], ...]
//! }
//! ```
//!
//! Dense binary: raw packed bits with no header; dimensions come from the
//! sparse artifact's metadata.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::encode::{self, RleRow};
use crate::error::{LandGridError, Result};
use crate::grid::{DenseGrid, GridSpec};

/// Sparse, run-length encoded land grid plus its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridArtifact {
    pub resolution: f64,
    pub width: usize,
    pub height: usize,
    pub origin_lat: f64,
    pub origin_lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    pub total_land_cells: usize,
    #[serde(default)]
    pub land_percentage: f64,
    /// Indexed by row number, northernmost first
    pub rows: Vec<RleRow>,
}

impl GridArtifact {
    /// Encode a finished grid; fails if the grid does not have the dimensions of `spec`
    pub fn from_grid(spec: &GridSpec, grid: &DenseGrid) -> Result<Self> {
        grid.check_spec(spec)?;
        let encoding = encode::encode_rows(grid);

        Ok(Self {
            resolution: spec.resolution(),
            width: spec.width(),
            height: spec.height(),
            origin_lat: spec.origin_lat(),
            origin_lon: spec.origin_lon(),
            description: None,
            sources: Vec::new(),
            total_land_cells: encoding.total_land_cells,
            land_percentage: land_percentage(encoding.total_land_cells, spec.cell_count()),
            rows: encoding.rows,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    /// Rebuild the grid spec from the stored metadata
    pub fn spec(&self) -> Result<GridSpec> {
        let spec = GridSpec::new(self.resolution)?;
        if spec.dimensions() != (self.width, self.height) {
            return Err(LandGridError::dimensions(
                spec.dimensions(),
                (self.width, self.height),
            ));
        }
        Ok(spec)
    }

    /// Replay every row back into a dense grid
    pub fn to_grid(&self) -> Result<DenseGrid> {
        if self.rows.len() != self.height {
            return Err(LandGridError::dimensions(
                (self.width, self.height),
                (self.width, self.rows.len()),
            ));
        }

        let rows = self
            .rows
            .iter()
            .map(|runs| encode::decode_row(runs, self.width))
            .collect::<Result<Vec<_>>>()?;

        DenseGrid::from_rows(rows)
    }
}

/// Share of land cells, rounded to two decimals
pub fn land_percentage(land_cells: usize, total_cells: usize) -> f64 {
    if total_cells == 0 {
        return 0.0;
    }
    (10_000.0 * land_cells as f64 / total_cells as f64).round() / 100.0
}

/// Write the sparse artifact as compact JSON
pub fn write_json(path: &Path, artifact: &GridArtifact) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, artifact)?;
    writer.flush()?;
    Ok(())
}

pub fn read_json(path: &Path) -> Result<GridArtifact> {
    let file = File::open(path)?;
    let artifact = serde_json::from_reader(BufReader::new(file))?;
    Ok(artifact)
}

/// Write a grid as packed bits after checking it against `spec`
///
/// Returns the number of bytes written.
pub fn write_bits(path: &Path, spec: &GridSpec, grid: &DenseGrid) -> Result<usize> {
    let packed = encode::pack_for(grid, spec)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&packed)?;
    writer.flush()?;
    Ok(packed.len())
}

/// Read a packed-bit file whose dimensions are given by `spec`
pub fn read_bits(path: &Path, spec: &GridSpec) -> Result<DenseGrid> {
    let bytes = std::fs::read(path)?;
    encode::unpack_for(&bytes, spec)
}
