pub mod bbox;
pub mod shape;

pub use bbox::BBox;
pub use shape::{Shape, Vertices};
