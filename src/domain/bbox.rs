/// Bounding box in geographic coordinates (degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BBox {
    /// Box around a single point
    pub fn point(lon: f64, lat: f64) -> Self {
        Self {
            min_lon: lon,
            min_lat: lat,
            max_lon: lon,
            max_lat: lat,
        }
    }

    /// Create a box from `(lon, lat)` points
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let (&(lon, lat), rest) = points.split_first()?;

        let mut bbox = Self::point(lon, lat);
        bbox.expand(rest);
        Some(bbox)
    }

    /// Expand the box to include another set of points
    pub fn expand(&mut self, points: &[(f64, f64)]) {
        for &(lon, lat) in points {
            self.min_lon = self.min_lon.min(lon);
            self.max_lon = self.max_lon.max(lon);
            self.min_lat = self.min_lat.min(lat);
            self.max_lat = self.max_lat.max(lat);
        }
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}
