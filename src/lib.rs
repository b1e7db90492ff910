//! landgrid - Rasterize Natural Earth land features into a compact global land/sea mask

pub mod artifact;
pub mod classify;
pub mod config;
pub mod domain;
pub mod encode;
pub mod error;
pub mod grid;
pub mod ingest;
pub mod logging;

pub use error::{LandGridError, Result};
