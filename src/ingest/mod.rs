//! Geometry ingestion
//!
//! Turns decoded geometry records into the uniform `Shape` representation.
//! Multi-part records split into one shape per part; polygon holes are
//! dropped, so the mask over-covers land around inland water.

pub mod geojson;

use geo::{Coord, Geometry, LineString, Polygon};
use std::path::Path;
use tracing::debug;

use crate::domain::Shape;
use crate::error::Result;

pub use geojson::{FeatureCollection, read_feature_collection};

/// Shapes decoded from one input file
#[derive(Debug, Default)]
pub struct SourceShapes {
    pub shapes: Vec<Shape>,
    /// Records that could not be decoded (unknown kind, malformed coordinates)
    pub rejected: usize,
}

fn coords(line: &LineString<f64>) -> Vec<(f64, f64)> {
    line.0.iter().map(|c: &Coord<f64>| (c.x, c.y)).collect()
}

fn outer_ring(polygon: &Polygon<f64>) -> Shape {
    Shape::polygon(coords(polygon.exterior()))
}

/// Decompose one geometry into independent shapes
pub fn shapes_from_geometry(geometry: &Geometry<f64>) -> Vec<Shape> {
    let mut shapes = Vec::new();
    collect_shapes(geometry, &mut shapes);
    shapes
}

fn collect_shapes(geometry: &Geometry<f64>, shapes: &mut Vec<Shape>) {
    match geometry {
        Geometry::Point(p) => shapes.push(Shape::point(p.x(), p.y())),
        Geometry::MultiPoint(mp) => {
            shapes.extend(mp.0.iter().map(|p| Shape::point(p.x(), p.y())));
        }
        Geometry::Line(line) => shapes.push(Shape::line(vec![
            (line.start.x, line.start.y),
            (line.end.x, line.end.y),
        ])),
        Geometry::LineString(ls) => shapes.push(Shape::line(coords(ls))),
        Geometry::MultiLineString(mls) => {
            shapes.extend(mls.0.iter().map(|ls| Shape::line(coords(ls))));
        }
        Geometry::Polygon(polygon) => shapes.push(outer_ring(polygon)),
        Geometry::MultiPolygon(mp) => shapes.extend(mp.0.iter().map(outer_ring)),
        Geometry::Rect(rect) => shapes.push(outer_ring(&rect.to_polygon())),
        Geometry::Triangle(triangle) => shapes.push(outer_ring(&triangle.to_polygon())),
        Geometry::GeometryCollection(collection) => {
            for child in &collection.0 {
                collect_shapes(child, shapes);
            }
        }
    }
}

/// Read a GeoJSON file and decompose every feature into shapes
///
/// Records that fail to decode are counted and skipped.
pub fn load_shapes(path: &Path) -> Result<SourceShapes> {
    let collection = read_feature_collection(path)?;
    let mut source = SourceShapes::default();

    for geometry in collection.geometries() {
        match geometry {
            Ok(geometry) => collect_shapes(&geometry, &mut source.shapes),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping feature");
                source.rejected += 1;
            }
        }
    }

    Ok(source)
}
