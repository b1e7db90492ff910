use tracing::debug;

use super::{DenseGrid, GridSpec};
use crate::classify;
use crate::domain::Shape;

/// Counts of shapes applied to (or skipped by) a `GridBuilder`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStats {
    pub polygons: usize,
    pub lines: usize,
    pub points: usize,
    /// Malformed shapes that contributed no cells
    pub skipped: usize,
}

impl BuildStats {
    pub fn applied(&self) -> usize {
        self.polygons + self.lines + self.points
    }

    pub fn summary(&self) -> String {
        format!(
            "{} shapes ({} polygons, {} lines, {} points), {} skipped",
            self.applied(),
            self.polygons,
            self.lines,
            self.points,
            self.skipped
        )
    }
}

/// Owns the grid under construction and unions shapes into it
///
/// Classification only ever sets cells, so the finished grid does not depend
/// on the order shapes are added in.
#[derive(Debug)]
pub struct GridBuilder {
    spec: GridSpec,
    grid: DenseGrid,
    stats: BuildStats,
}

impl GridBuilder {
    /// Start from an all-sea grid
    pub fn new(spec: GridSpec) -> Self {
        Self {
            grid: DenseGrid::sea(spec.width(), spec.height()),
            spec,
            stats: BuildStats::default(),
        }
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Classify one shape onto the grid
    ///
    /// Returns `false` when the shape is malformed; it is skipped and the
    /// grid is left untouched.
    pub fn add(&mut self, shape: &Shape) -> bool {
        if let Err(e) = shape.validate() {
            debug!(kind = shape.kind(), error = %e, "skipping shape");
            self.stats.skipped += 1;
            return false;
        }

        classify::classify(&mut self.grid, &self.spec, shape);

        match shape {
            Shape::Polygon(_) => self.stats.polygons += 1,
            Shape::Line(_) => self.stats.lines += 1,
            Shape::Point { .. } => self.stats.points += 1,
        }
        true
    }

    /// Classify every shape of a (possibly lazy) sequence
    pub fn extend<I>(&mut self, shapes: I)
    where
        I: IntoIterator<Item = Shape>,
    {
        for shape in shapes {
            self.add(&shape);
        }
    }

    /// Hand over the finished, read-only grid
    pub fn finish(self) -> (DenseGrid, BuildStats) {
        (self.grid, self.stats)
    }
}

/// Build a grid from a sequence of shapes in one call
pub fn build_grid<I>(spec: GridSpec, shapes: I) -> DenseGrid
where
    I: IntoIterator<Item = Shape>,
{
    let mut builder = GridBuilder::new(spec);
    builder.extend(shapes);
    builder.finish().0
}
