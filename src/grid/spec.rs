use crate::error::{LandGridError, Result};

/// Latitude of the top edge of row 0.
pub const ORIGIN_LAT: f64 = 90.0;
/// Longitude of the left edge of column 0.
pub const ORIGIN_LON: f64 = -180.0;
/// Largest grid accepted, in cells (about a 0.005° grid).
pub const MAX_CELLS: usize = 3_000_000_000;

/// Fixed-resolution equirectangular grid covering the whole globe
///
/// Row 0 is the northernmost row, column 0 starts at the antimeridian.
/// Cells are addressed by `(row, col)` and classified by their center point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    resolution: f64,
    width: usize,
    height: usize,
    origin_lat: f64,
    origin_lon: f64,
}

impl GridSpec {
    /// Create a grid spec for the given cell size in degrees
    ///
    /// `width = round(360 / resolution)`, `height = round(180 / resolution)`.
    /// Resolutions whose grid would exceed [`MAX_CELLS`] are rejected.
    pub fn new(resolution: f64) -> Result<Self> {
        if !resolution.is_finite() || resolution <= 0.0 || resolution > 180.0 {
            return Err(LandGridError::InvalidResolution(resolution));
        }

        let width = (360.0 / resolution).round() as usize;
        let height = (180.0 / resolution).round() as usize;
        match width.checked_mul(height) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => return Err(LandGridError::InvalidResolution(resolution)),
        }

        Ok(Self {
            resolution,
            width,
            height,
            origin_lat: ORIGIN_LAT,
            origin_lon: ORIGIN_LON,
        })
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn origin_lat(&self) -> f64 {
        self.origin_lat
    }

    pub fn origin_lon(&self) -> f64 {
        self.origin_lon
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Map a coordinate to the cell containing it
    ///
    /// Out-of-range coordinates saturate to the nearest boundary cell, so the
    /// poles and the antimeridian never produce an invalid index.
    pub fn to_cell(&self, lat: f64, lon: f64) -> (usize, usize) {
        let row = ((self.origin_lat - lat) / self.resolution).floor();
        let col = ((lon - self.origin_lon) / self.resolution).floor();
        (saturate(row, self.height), saturate(col, self.width))
    }

    /// Center coordinate of a cell as `(lat, lon)`
    pub fn to_center(&self, row: usize, col: usize) -> (f64, f64) {
        let lat = self.origin_lat - (row as f64 + 0.5) * self.resolution;
        let lon = self.origin_lon + (col as f64 + 0.5) * self.resolution;
        (lat, lon)
    }
}

fn saturate(index: f64, len: usize) -> usize {
    let max = len.saturating_sub(1) as i64;
    // NaN casts to 0
    (index as i64).clamp(0, max) as usize
}
