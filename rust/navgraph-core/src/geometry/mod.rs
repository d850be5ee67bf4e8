//! Planar helpers shared by candidate ranking and obstruction sampling.

pub mod raster;

pub use raster::{clip_segment, rasterize_segment};

use crate::models::Point;

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
