//! Pixel-accurate overlap between two placed stamps.
//!
//! The metric is the number of page pixels where both stamps are opaque, as a percentage
//! of the smaller stamp's opaque-pixel count. Using the smaller footprint as denominator
//! keeps the metric independent of transparent padding and of size disparity: a small
//! stamp entirely covered by a large one reads 100%.

use std::sync::Arc;

use crate::assets::library::StampAsset;
use crate::foundation::core::{Point, Rect};
use crate::placement::footprint::{
    DEFAULT_RENDER_FRACTION, Footprint, ResampleRasterizer, StampRasterizer, centered_bounds,
    render_scale, render_size,
};

/// An asset at a page position and size, not yet rasterized.
#[derive(Clone, Debug)]
pub struct PlacementSpec {
    pub asset: Arc<StampAsset>,
    pub center: Point,
    pub size_multiplier: f64,
}

/// Overlap between two rendered footprints, in percent `[0, 100]`.
///
/// Disjoint bounding boxes short-circuit to `0` before any pixel is inspected. A fully
/// transparent footprint also yields `0`.
pub fn overlap_percent(a: &Footprint, b: &Footprint) -> f64 {
    let Some(inter) = box_intersection(a.bounds, b.bounds) else {
        return 0.0;
    };
    let denom = a.opaque_pixels.min(b.opaque_pixels);
    if denom == 0 {
        return 0.0;
    }

    let overlap = count_overlap_pixels(a, b, inter);
    overlap as f64 / denom as f64 * 100.0
}

/// Intersection of two boxes, `None` when they do not share any area.
pub fn box_intersection(a: Rect, b: Rect) -> Option<Rect> {
    let inter = a.intersect(b);
    if inter.width() > 0.0 && inter.height() > 0.0 {
        Some(inter)
    } else {
        None
    }
}

fn count_overlap_pixels(a: &Footprint, b: &Footprint, inter: Rect) -> u64 {
    let x0 = inter.x0.floor() as i64;
    let x1 = inter.x1.ceil() as i64;
    let y0 = inter.y0.floor() as i64;
    let y1 = inter.y1.ceil() as i64;

    let mut n = 0u64;
    for py in y0..y1 {
        for px in x0..x1 {
            if a.opaque_at(px, py) && b.opaque_at(px, py) {
                n += 1;
            }
        }
    }
    n
}

/// Computes footprints and overlap metrics for placements at a fixed render fraction.
pub struct OverlapEvaluator {
    render_fraction: f64,
    rasterizer: Box<dyn StampRasterizer>,
}

impl Default for OverlapEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_RENDER_FRACTION)
    }
}

impl std::fmt::Debug for OverlapEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlapEvaluator")
            .field("render_fraction", &self.render_fraction)
            .finish_non_exhaustive()
    }
}

impl OverlapEvaluator {
    pub fn new(render_fraction: f64) -> Self {
        Self::with_rasterizer(render_fraction, Box::new(ResampleRasterizer::default()))
    }

    pub fn with_rasterizer(render_fraction: f64, rasterizer: Box<dyn StampRasterizer>) -> Self {
        Self {
            render_fraction,
            rasterizer,
        }
    }

    pub fn render_fraction(&self) -> f64 {
        self.render_fraction
    }

    /// Page box a placement would cover, without rasterizing it.
    pub fn bounds(&self, spec: &PlacementSpec) -> Rect {
        let scale = render_scale(&spec.asset, self.render_fraction, spec.size_multiplier);
        let (w, h) = render_size(&spec.asset, scale);
        centered_bounds(spec.center, w, h)
    }

    pub fn footprint(&self, spec: &PlacementSpec) -> Footprint {
        Footprint::compute(
            &spec.asset,
            spec.center,
            self.render_fraction,
            spec.size_multiplier,
            self.rasterizer.as_ref(),
        )
    }

    /// Overlap of two unrasterized placements; rasterizes only when their boxes meet.
    pub fn evaluate(&self, a: &PlacementSpec, b: &PlacementSpec) -> f64 {
        if box_intersection(self.bounds(a), self.bounds(b)).is_none() {
            return 0.0;
        }
        overlap_percent(&self.footprint(a), &self.footprint(b))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/overlap.rs"]
mod tests;
