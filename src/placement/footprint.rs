//! Rendered footprint of one placement: the asset rasterized at its render size, its page
//! bounding box and its opaque-pixel count.

use std::sync::Arc;

use image::{RgbaImage, imageops::FilterType};

use crate::assets::library::StampAsset;
use crate::foundation::core::{Point, Rect, Size};
use crate::foundation::pixels::resample_straight;

/// Fraction of the nominal size stamps are rendered at (before the size multiplier).
pub const DEFAULT_RENDER_FRACTION: f64 = 1.0 / 3.0;

/// Renders an asset at an arbitrary pixel size.
pub trait StampRasterizer: Send + Sync {
    fn rasterize(&self, asset: &StampAsset, width: u32, height: u32) -> RgbaImage;
}

/// Rasterizer backed by `image`'s resampling filters (bilinear by default, like a canvas
/// drawing an image with smoothing enabled).
#[derive(Clone, Copy, Debug)]
pub struct ResampleRasterizer {
    pub filter: FilterType,
}

impl Default for ResampleRasterizer {
    fn default() -> Self {
        Self {
            filter: FilterType::Triangle,
        }
    }
}

impl StampRasterizer for ResampleRasterizer {
    fn rasterize(&self, asset: &StampAsset, width: u32, height: u32) -> RgbaImage {
        resample_straight(&asset.raster, width, height, self.filter)
    }
}

/// `(nominal / longest raster edge) * render_fraction * size_multiplier`.
pub fn render_scale(asset: &StampAsset, render_fraction: f64, size_multiplier: f64) -> f64 {
    let extent = f64::from(asset.raster_extent().max(1));
    (f64::from(asset.nominal_size) / extent) * render_fraction * size_multiplier
}

/// Rendered pixel size for `scale`, never smaller than 1x1.
pub fn render_size(asset: &StampAsset, scale: f64) -> (u32, u32) {
    let w = (f64::from(asset.raster.width()) * scale).round().max(1.0) as u32;
    let h = (f64::from(asset.raster.height()) * scale).round().max(1.0) as u32;
    (w, h)
}

/// Axis-aligned page box of a `width x height` render centered on `center`.
pub fn centered_bounds(center: Point, width: u32, height: u32) -> Rect {
    Rect::from_center_size(center, Size::new(f64::from(width), f64::from(height)))
}

#[derive(Clone, Debug)]
pub struct Footprint {
    /// Page-space box covered by `raster`.
    pub bounds: Rect,
    /// Asset rendered at its placement size.
    pub raster: Arc<RgbaImage>,
    /// Number of pixels in `raster` with non-zero alpha.
    pub opaque_pixels: u64,
}

impl Footprint {
    pub fn compute(
        asset: &StampAsset,
        center: Point,
        render_fraction: f64,
        size_multiplier: f64,
        rasterizer: &dyn StampRasterizer,
    ) -> Self {
        let scale = render_scale(asset, render_fraction, size_multiplier);
        let (w, h) = render_size(asset, scale);
        let raster = rasterizer.rasterize(asset, w, h);
        Self::from_raster(center, raster)
    }

    /// Wrap an already rendered raster centered on `center`.
    pub fn from_raster(center: Point, raster: RgbaImage) -> Self {
        let bounds = centered_bounds(center, raster.width(), raster.height());
        let opaque_pixels = count_opaque(&raster);
        Self {
            bounds,
            raster: Arc::new(raster),
            opaque_pixels,
        }
    }

    /// Page pixel holding local pixel `(0, 0)`.
    pub fn pixel_origin(&self) -> (i64, i64) {
        pixel_origin(self.bounds)
    }

    /// Whether page pixel `(px, py)` lands on a non-transparent pixel of this footprint.
    ///
    /// The page pixel maps into the local raster by flooring its offset from the box origin,
    /// which for integer pixels is `px - ceil(x0)`.
    pub fn opaque_at(&self, px: i64, py: i64) -> bool {
        let (ox, oy) = self.pixel_origin();
        let (lx, ly) = (px - ox, py - oy);
        if lx < 0 || ly < 0 {
            return false;
        }
        let (Ok(lx), Ok(ly)) = (u32::try_from(lx), u32::try_from(ly)) else {
            return false;
        };
        if lx >= self.raster.width() || ly >= self.raster.height() {
            return false;
        }
        self.raster.get_pixel(lx, ly)[3] != 0
    }

    /// Hit test for a page-space point (e.g. a pointer position).
    pub fn hit(&self, p: Point) -> bool {
        self.opaque_at(p.x.floor() as i64, p.y.floor() as i64)
    }
}

/// Integer page pixel where a raster whose box starts at `bounds.x0/y0` begins.
pub fn pixel_origin(bounds: Rect) -> (i64, i64) {
    (bounds.x0.ceil() as i64, bounds.y0.ceil() as i64)
}

pub fn count_opaque(raster: &RgbaImage) -> u64 {
    raster.pixels().filter(|p| p[3] != 0).count() as u64
}

#[cfg(test)]
#[path = "../../tests/unit/placement/footprint.rs"]
mod tests;
