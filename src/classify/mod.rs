//! Cell classification
//!
//! Three policies, one per `Shape` variant:
//! - polygons fill every cell whose center passes the ray-casting test
//! - lines are sampled densely and each sample is dilated to its 8-neighborhood
//! - points mark their cell plus its 8-neighborhood
//!
//! Every policy only ever turns cells to land, so classification order never
//! changes the result.

use crate::domain::{BBox, Shape};
use crate::grid::{DenseGrid, GridSpec};

/// Ray-casting parity test of `(lon, lat)` against a ring of `(lon, lat)` vertices
///
/// An edge toggles the result when it straddles `lat` (upper endpoint strict,
/// lower endpoint inclusive) and the crossing lies strictly right of `lon`.
/// Horizontal edges never toggle, which also keeps the division well defined.
pub fn is_inside(lon: f64, lat: f64, ring: &[(f64, f64)]) -> bool {
    let mut inside = false;
    let Some(&last) = ring.last() else {
        return false;
    };

    let mut prev = last;
    for &(xi, yi) in ring {
        let (xj, yj) = prev;
        if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        prev = (xi, yi);
    }

    inside
}

/// Classify one shape onto the grid
pub(crate) fn classify(grid: &mut DenseGrid, spec: &GridSpec, shape: &Shape) {
    match shape {
        Shape::Polygon(ring) => {
            if let Some(bbox) = ring.bbox() {
                fill_polygon(grid, spec, ring.points(), &bbox);
            }
        }
        Shape::Line(points) => dilate_line(grid, spec, points.points()),
        Shape::Point { lon, lat } => dilate_point(grid, spec, *lon, *lat),
    }
}

/// Mark every cell inside `ring`, scanning only the cells its bounding box covers
pub(crate) fn fill_polygon(
    grid: &mut DenseGrid,
    spec: &GridSpec,
    ring: &[(f64, f64)],
    bbox: &BBox,
) {
    let (start_row, start_col) = spec.to_cell(bbox.max_lat, bbox.min_lon);
    let (end_row, end_col) = spec.to_cell(bbox.min_lat, bbox.max_lon);

    for row in start_row..=end_row {
        for col in start_col..=end_col {
            let (lat, lon) = spec.to_center(row, col);
            if is_inside(lon, lat, ring) {
                grid.mark(row, col);
            }
        }
    }
}

/// Number of interpolation intervals for a segment, at least two and about
/// two samples per cell along the longer axis
pub(crate) fn segment_steps(from: (f64, f64), to: (f64, f64), resolution: f64) -> usize {
    let dist = (to.0 - from.0).abs().max((to.1 - from.1).abs());
    let steps = (2.0 * dist / resolution).round() as usize;
    steps.max(2)
}

/// Mark the 8-neighborhood of evenly spaced samples along every segment
pub(crate) fn dilate_line(grid: &mut DenseGrid, spec: &GridSpec, points: &[(f64, f64)]) {
    for segment in points.windows(2) {
        let (from, to) = (segment[0], segment[1]);
        let steps = segment_steps(from, to, spec.resolution());

        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            let lon = from.0 + t * (to.0 - from.0);
            let lat = from.1 + t * (to.1 - from.1);
            let (row, col) = spec.to_cell(lat, lon);
            grid.mark_neighborhood(row, col);
        }
    }
}

pub(crate) fn dilate_point(grid: &mut DenseGrid, spec: &GridSpec, lon: f64, lat: f64) {
    let (row, col) = spec.to_cell(lat, lon);
    grid.mark_neighborhood(row, col);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_grid() -> (GridSpec, DenseGrid) {
        let spec = GridSpec::new(1.0).unwrap();
        let grid = DenseGrid::sea(spec.width(), spec.height());
        (spec, grid)
    }

    fn square(half: f64) -> Vec<(f64, f64)> {
        vec![(-half, -half), (half, -half), (half, half), (-half, half)]
    }

    #[test]
    fn test_is_inside_square() {
        let ring = square(10.0);
        assert!(is_inside(0.0, 0.0, &ring));
        assert!(is_inside(9.5, -9.5, &ring));
        assert!(!is_inside(10.5, 0.0, &ring));
        assert!(!is_inside(0.0, -10.5, &ring));
        assert!(!is_inside(0.0, 0.0, &[]));
    }

    #[test]
    fn test_is_inside_closed_ring() {
        let mut ring = square(10.0);
        ring.push(ring[0]);
        assert!(is_inside(0.0, 0.0, &ring));
        assert!(!is_inside(20.0, 0.0, &ring));
    }

    #[test]
    fn test_is_inside_concave() {
        // U shape open to the north
        let ring = vec![
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ];
        assert!(is_inside(0.5, 2.0, &ring));
        assert!(is_inside(2.5, 2.0, &ring));
        assert!(!is_inside(1.5, 2.0, &ring));
        assert!(is_inside(1.5, 0.5, &ring));
    }

    #[test]
    fn test_boundary_is_deterministic() {
        let ring = square(10.0);
        // left edge counts as inside, right edge as outside
        assert!(is_inside(-10.0, 0.0, &ring));
        assert!(!is_inside(10.0, 0.0, &ring));
        // bottom edge inside, top edge outside
        assert!(is_inside(0.0, -10.0, &ring));
        assert!(!is_inside(0.0, 10.0, &ring));

        for _ in 0..10 {
            assert!(is_inside(-10.0, 0.0, &ring));
            assert!(!is_inside(10.0, 0.0, &ring));
        }
    }

    #[test]
    fn test_horizontal_edges_never_toggle() {
        let ring = vec![(0.0, 0.0), (4.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)];
        assert!(is_inside(2.0, 1.0, &ring));
        assert!(!is_inside(5.0, 1.0, &ring));
    }

    #[test]
    fn test_fill_square() {
        let (spec, mut grid) = unit_grid();
        let shape = Shape::polygon(square(10.0));
        classify(&mut grid, &spec, &shape);

        assert_eq!(grid.land_cells(), 400);
        for row in 0..spec.height() {
            for col in 0..spec.width() {
                let (lat, lon) = spec.to_center(row, col);
                let expected = (-10.0..10.0).contains(&lon) && (-10.0..10.0).contains(&lat);
                assert_eq!(grid.is_land(row, col), expected, "cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_fill_stays_in_bbox_cells() {
        let (spec, mut grid) = unit_grid();
        let ring = vec![(100.2, 40.2), (103.8, 40.2), (103.8, 43.8), (100.2, 43.8)];
        let shape = Shape::polygon(ring);
        classify(&mut grid, &spec, &shape);

        // centers 100.5..103.5 by 40.5..43.5
        assert_eq!(grid.land_cells(), 16);
        let (row, col) = spec.to_cell(40.5, 100.5);
        assert!(grid.is_land(row, col));
        let (row, col) = spec.to_cell(40.5, 99.5);
        assert!(!grid.is_land(row, col));
    }

    #[test]
    fn test_point_dilation() {
        let (spec, mut grid) = unit_grid();
        classify(&mut grid, &spec, &Shape::point(0.0, 0.0));

        assert_eq!(grid.land_cells(), 9);
        for row in 89..=91 {
            for col in 179..=181 {
                assert!(grid.is_land(row, col));
            }
        }
    }

    #[test]
    fn test_point_dilation_at_corner() {
        let (spec, mut grid) = unit_grid();
        classify(&mut grid, &spec, &Shape::point(-180.0, 90.0));
        assert_eq!(grid.land_cells(), 4);

        classify(&mut grid, &spec, &Shape::point(180.0, -90.0));
        assert_eq!(grid.land_cells(), 8);
    }

    #[test]
    fn test_segment_steps() {
        assert_eq!(segment_steps((0.0, 0.0), (0.0, 0.0), 1.0), 2);
        assert_eq!(segment_steps((0.0, 0.0), (0.4, 0.1), 1.0), 2);
        assert_eq!(segment_steps((0.0, 0.0), (10.0, 3.0), 1.0), 20);
        assert_eq!(segment_steps((0.0, 0.0), (-1.0, 5.0), 0.5), 20);
    }

    #[test]
    fn test_line_dilation_has_no_gaps() {
        let (spec, mut grid) = unit_grid();
        classify(&mut grid, &spec, &Shape::line(vec![(0.5, 0.5), (20.5, 0.5)]));

        let (row, start) = spec.to_cell(0.5, 0.5);
        let (_, end) = spec.to_cell(0.5, 20.5);
        for col in start - 1..=end + 1 {
            assert!(grid.is_land(row - 1, col));
            assert!(grid.is_land(row, col));
            assert!(grid.is_land(row + 1, col));
        }
        assert_eq!(grid.land_cells(), 3 * (end - start + 3));
    }

    #[test]
    fn test_diagonal_line_is_connected() {
        let (spec, mut grid) = unit_grid();
        classify(&mut grid, &spec, &Shape::line(vec![(-30.0, -20.0), (15.0, 33.0)]));

        let (start_row, _) = spec.to_cell(33.0, 15.0);
        let (end_row, _) = spec.to_cell(-20.0, -30.0);
        for row in start_row..=end_row {
            assert!(grid.row(row).iter().any(|&c| c), "row {row} empty");
        }
    }
}
