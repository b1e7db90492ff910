use super::BBox;
use crate::error::{LandGridError, Result};

/// `(lon, lat)` vertices plus the bounding box computed from them
///
/// The box is only ever derived from the vertices, so it always covers them.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertices {
    points: Vec<(f64, f64)>,
    bbox: Option<BBox>,
}

impl Vertices {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        let bbox = BBox::from_points(&points);
        Self { points, bbox }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// `None` only when there are no vertices
    pub fn bbox(&self) -> Option<BBox> {
        self.bbox
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<(f64, f64)>> for Vertices {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points)
    }
}

/// A single classifiable feature
///
/// Coordinates are `(lon, lat)` pairs in degrees. Multi-part input is split
/// into one `Shape` per part before classification, and polygon holes are
/// dropped: only the outer ring is ever tested.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(Vertices),
    Line(Vertices),
    Point { lon: f64, lat: f64 },
}

impl Shape {
    pub fn polygon(ring: Vec<(f64, f64)>) -> Self {
        Shape::Polygon(Vertices::new(ring))
    }

    pub fn line(points: Vec<(f64, f64)>) -> Self {
        Shape::Line(Vertices::new(points))
    }

    pub fn point(lon: f64, lat: f64) -> Self {
        Shape::Point { lon, lat }
    }

    pub fn bbox(&self) -> Option<BBox> {
        match self {
            Shape::Polygon(vertices) | Shape::Line(vertices) => vertices.bbox(),
            Shape::Point { lon, lat } => Some(BBox::point(*lon, *lat)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Polygon(_) => "polygon",
            Shape::Line(_) => "line",
            Shape::Point { .. } => "point",
        }
    }

    /// Check that the shape can contribute cells
    ///
    /// Polygons need three distinct vertices (a repeated closing vertex does
    /// not count), lines need two, and every coordinate must be finite.
    pub fn validate(&self) -> Result<()> {
        match self {
            Shape::Polygon(vertices) => {
                let ring = vertices.points();
                let closed = ring.len() > 1 && ring.first() == ring.last();
                let vertices = if closed { ring.len() - 1 } else { ring.len() };
                if vertices < 3 {
                    return Err(LandGridError::malformed(format!(
                        "polygon ring has {} vertices",
                        vertices
                    )));
                }
                check_finite(ring)
            }
            Shape::Line(vertices) => {
                let points = vertices.points();
                if points.len() < 2 {
                    return Err(LandGridError::malformed(format!(
                        "line has {} points",
                        points.len()
                    )));
                }
                check_finite(points)
            }
            Shape::Point { lon, lat } => check_finite(&[(*lon, *lat)]),
        }
    }
}

fn check_finite(points: &[(f64, f64)]) -> Result<()> {
    match points
        .iter()
        .find(|(lon, lat)| !lon.is_finite() || !lat.is_finite())
    {
        Some(&(lon, lat)) => Err(LandGridError::malformed(format!(
            "non-finite coordinate ({}, {})",
            lon, lat
        ))),
        None => Ok(()),
    }
}
