//! Stamp preprocessing: edge trim, corner-estimated background removal, thumbnails.

use image::{RgbaImage, imageops::FilterType};

use crate::assets::source::SourceImage;
use crate::config::PreprocessConfig;
use crate::foundation::pixels::resample_straight;

/// Default Euclidean RGB distance under which a pixel is treated as background.
pub const DEFAULT_BG_TOLERANCE: f64 = 85.0;
/// Default thumbnail edge length.
pub const DEFAULT_THUMBNAIL_BOX: u32 = 80;

/// Crop `margin` pixels from every side.
///
/// Sources narrower or shorter than `2 * margin` clamp to a single centered row/column
/// instead of failing. The input is left untouched.
pub fn trim(image: &RgbaImage, margin: u32) -> RgbaImage {
    fn axis(len: u32, margin: u32) -> (u32, u32) {
        match margin.checked_mul(2) {
            Some(m2) if len > m2 => (margin, len - m2),
            _ => (len.saturating_sub(1) / 2, 1),
        }
    }

    if margin == 0 {
        return image.clone();
    }
    let (x, w) = axis(image.width(), margin);
    let (y, h) = axis(image.height(), margin);
    image::imageops::crop_imm(image, x, y, w, h).to_image()
}

/// Average RGB of the four corner pixels.
pub fn estimate_background(raster: &RgbaImage) -> [f64; 3] {
    let (w, h) = raster.dimensions();
    if w == 0 || h == 0 {
        return [0.0; 3];
    }
    let corners = [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)];
    let mut sum = [0.0f64; 3];
    for (x, y) in corners {
        let px = raster.get_pixel(x, y);
        for c in 0..3 {
            sum[c] += f64::from(px[c]);
        }
    }
    sum.map(|s| s / 4.0)
}

/// Make every pixel close to the corner-estimated background fully transparent.
///
/// This is a global color key, not a flood fill: interior pixels that match the background
/// color are cleared too. RGB values are preserved; only alpha changes.
pub fn remove_background(raster: &RgbaImage, tolerance: f64) -> RgbaImage {
    let bg = estimate_background(raster);
    let tol_sq = tolerance * tolerance;
    let mut out = raster.clone();
    for px in out.pixels_mut() {
        let dr = f64::from(px[0]) - bg[0];
        let dg = f64::from(px[1]) - bg[1];
        let db = f64::from(px[2]) - bg[2];
        if dr * dr + dg * dg + db * db <= tol_sq {
            px[3] = 0;
        }
    }
    out
}

/// Scale `raster` to fit a `box_size` square (Lanczos3), centered on a transparent canvas.
pub fn generate_thumbnail(raster: &RgbaImage, box_size: u32) -> RgbaImage {
    let box_size = box_size.max(1);
    let (w, h) = raster.dimensions();
    let longest = w.max(h).max(1);
    let scale = f64::from(box_size) / f64::from(longest);
    let tw = ((f64::from(w) * scale).round() as u32).clamp(1, box_size);
    let th = ((f64::from(h) * scale).round() as u32).clamp(1, box_size);

    let scaled = resample_straight(raster, tw, th, FilterType::Lanczos3);
    let mut thumb = RgbaImage::new(box_size, box_size);
    let ox = (box_size - tw) / 2;
    let oy = (box_size - th) / 2;
    image::imageops::replace(&mut thumb, &scaled, i64::from(ox), i64::from(oy));
    thumb
}

/// Base scale reference of a processed stamp: its longest edge.
pub fn compute_nominal_size(raster: &RgbaImage) -> u32 {
    raster.width().max(raster.height())
}

/// Resize an authored stamp to `height` pixels tall, keeping its aspect ratio.
pub fn normalize_height(raster: &RgbaImage, height: u32) -> RgbaImage {
    let height = height.max(1);
    let (w, h) = raster.dimensions();
    let ratio = f64::from(w) / f64::from(h.max(1));
    let width = ((f64::from(height) * ratio) as u32).max(1);
    resample_straight(raster, width, height, FilterType::Lanczos3)
}

/// Output of [`Preprocessor::process`].
#[derive(Clone, Debug)]
pub struct ProcessedStamp {
    pub raster: RgbaImage,
    pub thumbnail: RgbaImage,
    pub nominal_size: u32,
}

/// Trim → background removal → thumbnail, with fixed parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preprocessor {
    pub trim_margin: u32,
    pub bg_tolerance: f64,
    pub thumbnail_box: u32,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::from_config(&PreprocessConfig::default())
    }
}

impl Preprocessor {
    pub fn from_config(cfg: &PreprocessConfig) -> Self {
        Self {
            trim_margin: cfg.trim_margin,
            bg_tolerance: cfg.bg_tolerance,
            thumbnail_box: cfg.thumbnail_box,
        }
    }

    #[tracing::instrument(skip(self, source), fields(file = %source.file_name))]
    pub fn process(&self, source: &SourceImage) -> ProcessedStamp {
        let trimmed = trim(&source.raster, self.trim_margin);
        let raster = remove_background(&trimmed, self.bg_tolerance);
        let thumbnail = generate_thumbnail(&raster, self.thumbnail_box);
        let nominal_size = compute_nominal_size(&raster);
        tracing::debug!(
            width = raster.width(),
            height = raster.height(),
            nominal_size,
            "stamp processed"
        );
        ProcessedStamp {
            raster,
            thumbnail,
            nominal_size,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/preprocess.rs"]
mod tests;
