use geo::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{LandGridError, Result};

/// GeoJSON position: `[lon, lat]` with an optional altitude that is ignored
type Position = Vec<f64>;

/// A GeoJSON `FeatureCollection`, as published by Natural Earth
#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
}

/// Geometry object before its coordinates are interpreted
#[derive(Debug, Deserialize)]
pub struct RawGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: serde_json::Value,
    #[serde(default)]
    pub geometries: Vec<RawGeometry>,
}

impl FeatureCollection {
    /// Decode every feature geometry, skipping features without one
    ///
    /// Each record decodes independently; one bad record does not affect the rest.
    pub fn geometries(self) -> impl Iterator<Item = Result<Geometry<f64>>> {
        self.features
            .into_iter()
            .filter_map(|f| f.geometry)
            .map(RawGeometry::into_geometry)
    }
}

impl RawGeometry {
    pub fn into_geometry(self) -> Result<Geometry<f64>> {
        let geometry = match self.kind.as_str() {
            "Point" => Geometry::Point(point(coordinates(self.coordinates)?)?),
            "MultiPoint" => {
                let points: Vec<Position> = coordinates(self.coordinates)?;
                Geometry::MultiPoint(MultiPoint::new(
                    points.into_iter().map(point).collect::<Result<_>>()?,
                ))
            }
            "LineString" => Geometry::LineString(line_string(coordinates(self.coordinates)?)?),
            "MultiLineString" => {
                let lines: Vec<Vec<Position>> = coordinates(self.coordinates)?;
                Geometry::MultiLineString(MultiLineString::new(
                    lines.into_iter().map(line_string).collect::<Result<_>>()?,
                ))
            }
            "Polygon" => Geometry::Polygon(polygon(coordinates(self.coordinates)?)?),
            "MultiPolygon" => {
                let polygons: Vec<Vec<Vec<Position>>> = coordinates(self.coordinates)?;
                Geometry::MultiPolygon(MultiPolygon::new(
                    polygons.into_iter().map(polygon).collect::<Result<_>>()?,
                ))
            }
            "GeometryCollection" => Geometry::GeometryCollection(GeometryCollection(
                self.geometries
                    .into_iter()
                    .map(RawGeometry::into_geometry)
                    .collect::<Result<_>>()?,
            )),
            other => return Err(LandGridError::UnknownGeometryKind(other.to_string())),
        };

        Ok(geometry)
    }
}

/// Read and parse a GeoJSON `FeatureCollection` file
pub fn read_feature_collection(path: &Path) -> Result<FeatureCollection> {
    let file = File::open(path)?;
    let collection = serde_json::from_reader(BufReader::new(file))?;
    Ok(collection)
}

fn coordinates<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| LandGridError::malformed(format!("bad coordinates: {}", e)))
}

fn coord(position: Position) -> Result<Coord<f64>> {
    match position.as_slice() {
        [lon, lat, ..] => Ok(geo::coord! { x: *lon, y: *lat }),
        _ => Err(LandGridError::malformed(format!(
            "position has {} values",
            position.len()
        ))),
    }
}

fn point(position: Position) -> Result<Point<f64>> {
    coord(position).map(Point::from)
}

fn line_string(positions: Vec<Position>) -> Result<LineString<f64>> {
    positions
        .into_iter()
        .map(coord)
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

/// First ring is the exterior, the rest are holes
fn polygon(rings: Vec<Vec<Position>>) -> Result<Polygon<f64>> {
    let mut rings = rings.into_iter().map(line_string);
    let exterior = rings.next().transpose()?.unwrap_or_else(|| LineString::new(vec![]));
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn parse(json: &str) -> Result<Geometry<f64>> {
        let raw: RawGeometry = serde_json::from_str(json).unwrap();
        raw.into_geometry()
    }

    #[test]
    fn test_parse_point() {
        let geometry = parse(r#"{"type": "Point", "coordinates": [12.5, -3.25]}"#).unwrap();
        assert_eq!(geometry, Geometry::Point(Point::new(12.5, -3.25)));
    }

    #[test]
    fn test_parse_point_with_altitude() {
        let geometry = parse(r#"{"type": "Point", "coordinates": [1.0, 2.0, 300.0]}"#).unwrap();
        assert_eq!(geometry, Geometry::Point(Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_parse_polygon_with_hole() {
        let geometry = parse(
            r#"{"type": "Polygon", "coordinates": [
                [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
                [[2, 2], [4, 2], [4, 4], [2, 2]]
            ]}"#,
        )
        .unwrap();

        let Geometry::Polygon(polygon) = geometry else {
            panic!("expected polygon");
        };
        assert_eq!(polygon.exterior().0.len(), 5);
        assert_eq!(polygon.interiors().len(), 1);
    }

    #[test]
    fn test_parse_multi_line_string() {
        let geometry = parse(
            r#"{"type": "MultiLineString", "coordinates": [
                [[0, 0], [1, 1]],
                [[5, 5], [6, 6], [7, 5]]
            ]}"#,
        )
        .unwrap();

        let Geometry::MultiLineString(lines) = geometry else {
            panic!("expected multi line string");
        };
        assert_eq!(lines.0.len(), 2);
        assert_eq!(lines.0[1].0.len(), 3);
    }

    #[test]
    fn test_unknown_kind() {
        let result = parse(r#"{"type": "Circle", "coordinates": [0, 0]}"#);
        assert!(matches!(result, Err(LandGridError::UnknownGeometryKind(k)) if k == "Circle"));
    }

    #[test]
    fn test_malformed_coordinates() {
        let result = parse(r#"{"type": "Point", "coordinates": [1.0]}"#);
        assert!(matches!(result, Err(LandGridError::MalformedShape(_))));

        let result = parse(r#"{"type": "LineString", "coordinates": "nope"}"#);
        assert!(matches!(result, Err(LandGridError::MalformedShape(_))));
    }

    #[test]
    fn test_read_feature_collection() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("islands.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "type": "FeatureCollection",
                "features": [
                    {{"type": "Feature", "properties": {{}}, "geometry":
                        {{"type": "Point", "coordinates": [5, 5]}}}},
                    {{"type": "Feature", "properties": {{}}, "geometry": null}},
                    {{"type": "Feature", "properties": {{}}, "geometry":
                        {{"type": "Hexagon", "coordinates": []}}}},
                    {{"type": "Feature", "properties": {{}}, "geometry":
                        {{"type": "MultiPoint", "coordinates": [[1, 1], [2, 2]]}}}}
                ]
            }}"#
        )
        .unwrap();

        let collection = read_feature_collection(&path).unwrap();
        assert_eq!(collection.features.len(), 4);

        let results: Vec<_> = collection.geometries().collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_feature_collection(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(LandGridError::Io(_))));
    }
}
