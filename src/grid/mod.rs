pub mod builder;
pub mod dense;
pub mod spec;

pub use builder::{BuildStats, GridBuilder, build_grid};
pub use dense::DenseGrid;
pub use spec::{GridSpec, MAX_CELLS, ORIGIN_LAT, ORIGIN_LON};
