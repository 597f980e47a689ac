//! Pure geometry data for the carousel crates
//!
//! Points, sizes and rectangles in logical pixels. No dependencies, no
//! platform types.

mod geometry;

pub use geometry::*;
