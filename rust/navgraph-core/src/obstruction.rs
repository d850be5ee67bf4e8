//! Floor-plan rasters used to reject edges whose straight line crosses a wall.
//!
//! Walls are drawn as thick dark strokes. A segment counts as blocked only once
//! a run of consecutive dark pixels is seen along its Bresenham path, which lets
//! anti-aliased hairlines and node markers through.

use std::collections::BTreeMap;
use std::path::Path;

use image::{DynamicImage, GrayImage, Luma};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, ObstructionError};
use crate::geometry::{clip_segment, rasterize_segment};
use crate::models::{Floor, Point};
use crate::options::ObstructionParams;

/// Node-space to pixel-space mapping: `px = (x - origin.x) / units_per_px_x`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelScale {
    pub units_per_px_x: f64,
    pub units_per_px_y: f64,
    #[serde(default = "PixelScale::zero_origin")]
    pub origin: Point,
}

impl PixelScale {
    pub fn new(units_per_px_x: f64, units_per_px_y: f64) -> Self {
        Self { units_per_px_x, units_per_px_y, origin: Self::zero_origin() }
    }

    /// One node unit per pixel.
    pub fn identity() -> Self {
        Self::new(1.0, 1.0)
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    fn zero_origin() -> Point {
        Point::new(0.0, 0.0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.units_per_px_x) && ok(self.units_per_px_y) {
            Ok(())
        } else {
            Err(ConfigError::InvalidScale(self.units_per_px_x, self.units_per_px_y))
        }
    }

    pub fn to_pixel(&self, p: Point) -> (i64, i64) {
        let (px, py) = self.project(p);
        (px as i64, py as i64)
    }

    /// Rounded pixel position kept in floating point, so far-off nodes do not
    /// saturate before clipping.
    fn project(&self, p: Point) -> (f64, f64) {
        let px = ((p.x - self.origin.x) / self.units_per_px_x).round();
        let py = ((p.y - self.origin.y) / self.units_per_px_y).round();
        (px, py)
    }
}

pub struct ObstructionMap {
    brightness: GrayImage,
    scale: PixelScale,
    params: ObstructionParams,
}

impl ObstructionMap {
    /// Brightness is the mean of the colour channels (alpha ignored), or the
    /// single channel for grayscale input.
    pub fn from_image(img: &DynamicImage, scale: PixelScale, params: ObstructionParams) -> Result<Self, ConfigError> {
        scale.validate()?;
        let brightness = if img.color().has_color() {
            let rgb = img.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let p = rgb.get_pixel(x, y).0;
                let sum = p[0] as u16 + p[1] as u16 + p[2] as u16;
                Luma([(sum / 3) as u8])
            })
        } else {
            img.to_luma8()
        };
        Ok(Self { brightness, scale, params })
    }

    pub fn from_brightness(brightness: GrayImage, scale: PixelScale, params: ObstructionParams) -> Result<Self, ConfigError> {
        scale.validate()?;
        Ok(Self { brightness, scale, params })
    }

    pub fn open(path: impl AsRef<Path>, scale: PixelScale, params: ObstructionParams) -> Result<Self, ObstructionError> {
        let img = image::open(path.as_ref())?;
        Ok(Self::from_image(&img, scale, params)?)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.brightness.dimensions()
    }

    fn contains(&self, (px, py): (f64, f64)) -> bool {
        let (w, h) = self.dimensions();
        px >= 0.0 && py >= 0.0 && px < w as f64 && py < h as f64
    }

    fn in_bounds(&self, (px, py): (i64, i64)) -> bool {
        let (w, h) = self.dimensions();
        px >= 0 && py >= 0 && px < w as i64 && py < h as i64
    }

    /// Off-image pixels are never dark.
    fn is_dark(&self, (px, py): (i64, i64)) -> bool {
        if !self.in_bounds((px, py)) { return false; }
        self.brightness.get_pixel(px as u32, py as u32).0[0] < self.params.dark_threshold
    }

    /// True when the straight segment a→b crosses a dark run of at least
    /// `min_dark_run` pixels. Segments with both endpoints off the image are
    /// never judged blocked.
    ///
    /// An off-image endpoint is first pulled in to a box `end_margin + 1`
    /// pixels wider than the image. Only off-image pixels are dropped that
    /// way, and the margin trimmed at that end stays off the image.
    pub fn is_blocked(&self, a: Point, b: Point) -> bool {
        let pa = self.scale.project(a);
        let pb = self.scale.project(b);
        if !self.contains(pa) && !self.contains(pb) { return false; }

        let margin = self.params.end_margin;
        let pad = margin as f64 + 1.0;
        let (w, h) = self.dimensions();
        let hi = (w as f64 - 1.0 + pad, h as f64 - 1.0 + pad);
        let Some((ca, cb)) = clip_segment(pa, pb, (-pad, -pad), hi) else { return false };

        let path = rasterize_segment(ca.0.round() as i64, ca.1.round() as i64, cb.0.round() as i64, cb.1.round() as i64);
        if path.len() <= 2 * margin { return false; }

        let min_run = self.params.min_dark_run.max(1);
        let mut run = 0usize;
        for &px in &path[margin..path.len() - margin] {
            if self.is_dark(px) {
                run += 1;
                if run >= min_run { return true; }
            } else {
                run = 0;
            }
        }
        false
    }
}

/// Obstruction maps keyed by floor. Floors without an entry are unfiltered.
#[derive(Default)]
pub struct FloorPlans {
    maps: BTreeMap<Floor, ObstructionMap>,
}

impl FloorPlans {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, floor: Floor, map: ObstructionMap) {
        self.maps.insert(floor, map);
    }

    /// Keeps the map on success; on failure logs and leaves the floor unfiltered.
    pub fn insert_or_degrade(&mut self, floor: Floor, loaded: Result<ObstructionMap, ObstructionError>) {
        match loaded {
            Ok(map) => {
                let (w, h) = map.dimensions();
                debug!(floor = %floor, width = w, height = h, "loaded floor plan");
                self.maps.insert(floor, map);
            }
            Err(e) => {
                warn!(floor = %floor, error = %e, "floor plan unusable, obstruction filtering disabled for floor");
            }
        }
    }

    pub fn has_plan(&self, floor: &Floor) -> bool {
        self.maps.contains_key(floor)
    }

    pub fn blocked(&self, floor: &Floor, a: Point, b: Point) -> bool {
        self.maps.get(floor).map_or(false, |m| m.is_blocked(a, b))
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
