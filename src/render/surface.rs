//! The drawing surface the page is rendered onto.
//!
//! Hosts with their own 2D canvas implement [`Surface`]; [`CpuSurface`] is the in-crate
//! raster used for headless rendering, export and tests.

use std::f64::consts::TAU;

use image::{RgbaImage, imageops::FilterType};

use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul};
use crate::foundation::pixels::{resample_straight, unpremultiply_rgba8_in_place};
use crate::placement::footprint::pixel_origin;
use crate::render::composite::{over, over_straight_at};

pub trait Surface {
    fn canvas(&self) -> Canvas;

    /// Opacity applied to every following draw call, in `[0, 1]`.
    fn set_global_alpha(&mut self, alpha: f64);

    /// Replace every pixel with `color`, ignoring global alpha.
    fn clear(&mut self, color: Rgba8Premul);

    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8Premul);

    /// Stroke an arc of `radius` and line `width`, sweeping clockwise (y down) from
    /// `start_rad` to `end_rad`.
    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        start_rad: f64,
        end_rad: f64,
        color: Rgba8Premul,
    );

    /// Draw a straight-alpha raster scaled into `dest`. The raster starts at the first
    /// whole pixel at or after `dest`'s top-left corner, matching footprint hit tests.
    fn draw_image(&mut self, image: &RgbaImage, dest: Rect);

    /// Read the surface back as straight-alpha RGBA.
    fn read_pixels(&self) -> RgbaImage;
}

/// Premultiplied RGBA8 raster surface.
#[derive(Clone, Debug)]
pub struct CpuSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
    global_alpha: f32,
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> Self {
        let len = (canvas.width as usize) * (canvas.height as usize) * 4;
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0u8; len],
            global_alpha: 1.0,
        }
    }

    /// Raw premultiplied bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Composite `color` over every pixel whose center satisfies `covers`, limited to `bounds`.
    fn fill_where(&mut self, bounds: Rect, color: Rgba8Premul, covers: impl Fn(f64, f64) -> bool) {
        let x0 = bounds.x0.floor().max(0.0) as u32;
        let y0 = bounds.y0.floor().max(0.0) as u32;
        let x1 = (bounds.x1.ceil().max(0.0) as u32).min(self.width);
        let y1 = (bounds.y1.ceil().max(0.0) as u32).min(self.height);
        let src = color.to_array();
        for y in y0..y1 {
            for x in x0..x1 {
                if !covers(f64::from(x) + 0.5, f64::from(y) + 0.5) {
                    continue;
                }
                let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
                let d = [
                    self.data[idx],
                    self.data[idx + 1],
                    self.data[idx + 2],
                    self.data[idx + 3],
                ];
                self.data[idx..idx + 4].copy_from_slice(&over(d, src, self.global_alpha));
            }
        }
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.global_alpha = alpha.clamp(0.0, 1.0) as f32;
    }

    fn clear(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) {
        let rect = rect.abs();
        self.fill_where(rect, color, |x, y| {
            x >= rect.x0 && x < rect.x1 && y >= rect.y0 && y < rect.y1
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8Premul) {
        if radius <= 0.0 {
            return;
        }
        let bounds = Rect::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        );
        let r2 = radius * radius;
        self.fill_where(bounds, color, |x, y| {
            let dx = x - center.x;
            let dy = y - center.y;
            dx * dx + dy * dy <= r2
        });
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        start_rad: f64,
        end_rad: f64,
        color: Rgba8Premul,
    ) {
        let sweep = end_rad - start_rad;
        if width <= 0.0 || sweep <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let outer = radius + half;
        let inner = (radius - half).max(0.0);
        let bounds = Rect::new(
            center.x - outer,
            center.y - outer,
            center.x + outer,
            center.y + outer,
        );
        self.fill_where(bounds, color, |x, y| {
            let dx = x - center.x;
            let dy = y - center.y;
            let d = (dx * dx + dy * dy).sqrt();
            if d < inner || d > outer {
                return false;
            }
            sweep >= TAU || (dy.atan2(dx) - start_rad).rem_euclid(TAU) <= sweep
        });
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Rect) {
        let dest = dest.abs();
        let w = dest.width().round() as u32;
        let h = dest.height().round() as u32;
        if w == 0 || h == 0 {
            return;
        }
        let scaled;
        let src = if image.dimensions() == (w, h) {
            image
        } else {
            scaled = resample_straight(image, w, h, FilterType::CatmullRom);
            &scaled
        };
        let (ox, oy) = pixel_origin(dest);
        over_straight_at(
            &mut self.data,
            self.width,
            self.height,
            src,
            ox,
            oy,
            self.global_alpha,
        );
    }

    fn read_pixels(&self) -> RgbaImage {
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        RgbaImage::from_raw(self.width, self.height, data)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
