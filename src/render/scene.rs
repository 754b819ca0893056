//! Drawing the page: placed stamps, the rainbow progress indicator and the particle burst.
//!
//! Rendering is a pure function of the page content and animation state, except for the
//! per-frame particle hue which is drawn from the caller's [`RandomSource`].

use std::f64::consts::PI;

use crate::effects::celebration::Particle;
use crate::foundation::core::{Canvas, Point, Rgba8Premul, hsl_to_rgb};
use crate::foundation::rng::RandomSource;
use crate::placement::session::PlacedStamp;
use crate::render::surface::Surface;

/// Band colors, outermost first.
pub const RAINBOW: [[u8; 3]; 7] = [
    [255, 0, 0],
    [255, 127, 0],
    [255, 255, 0],
    [0, 200, 0],
    [0, 0, 255],
    [75, 0, 130],
    [148, 0, 211],
];

/// Unfilled part of each band.
pub const TRACK_RGB: [u8; 3] = [230, 230, 230];

pub const PARTICLE_RADIUS: f64 = 5.0;

/// Where the indicator sits on a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorGeometry {
    pub center: Point,
    pub outer_radius: f64,
    pub band_width: f64,
}

impl IndicatorGeometry {
    /// Horizontally centered near the top edge; the bands take the outer half of the radius.
    pub fn for_canvas(canvas: Canvas) -> Self {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let outer_radius = w * 0.2;
        Self {
            center: Point::new(w / 2.0, h * 0.16),
            outer_radius,
            band_width: outer_radius * 0.5 / RAINBOW.len() as f64,
        }
    }

    /// Stroke radius of band `i` (0 = outermost).
    pub fn band_radius(&self, i: usize) -> f64 {
        self.outer_radius - self.band_width * (i as f64 + 0.5)
    }
}

/// Full gray track, then each band swept clockwise from the left by `fraction` of the
/// upper semicircle.
pub fn render_indicator(surface: &mut dyn Surface, geom: &IndicatorGeometry, fraction: f64) {
    let fraction = fraction.clamp(0.0, 1.0);
    surface.set_global_alpha(1.0);
    for (i, rgb) in RAINBOW.iter().enumerate() {
        let r = geom.band_radius(i);
        surface.stroke_arc(
            geom.center,
            r,
            geom.band_width,
            PI,
            2.0 * PI,
            Rgba8Premul::opaque(TRACK_RGB),
        );
        if fraction > 0.0 {
            surface.stroke_arc(
                geom.center,
                r,
                geom.band_width,
                PI,
                PI + PI * fraction,
                Rgba8Premul::opaque(*rgb),
            );
        }
    }
}

/// Draw placements bottom to top at their cached render size.
pub fn render_placements(surface: &mut dyn Surface, placements: &[PlacedStamp]) {
    surface.set_global_alpha(1.0);
    for p in placements {
        surface.draw_image(&p.footprint.raster, p.footprint.bounds);
    }
}

pub fn render_particles(
    surface: &mut dyn Surface,
    particles: &[Particle],
    rng: &mut dyn RandomSource,
) {
    for p in particles {
        let hue = rng.range(0.0, 360.0);
        surface.set_global_alpha(p.life);
        surface.fill_circle(
            p.position,
            PARTICLE_RADIUS,
            Rgba8Premul::opaque(hsl_to_rgb(hue, 1.0, 0.5)),
        );
    }
    surface.set_global_alpha(1.0);
}

/// Everything that goes on the page for one frame.
pub struct SceneFrame<'a> {
    pub background: [u8; 3],
    pub placements: &'a [PlacedStamp],
    pub progress_fraction: f64,
    /// `None` for export, which never includes the celebration.
    pub particles: Option<&'a [Particle]>,
}

pub fn render_scene(surface: &mut dyn Surface, frame: &SceneFrame<'_>, rng: &mut dyn RandomSource) {
    surface.set_global_alpha(1.0);
    surface.clear(Rgba8Premul::opaque(frame.background));
    render_placements(surface, frame.placements);
    let geom = IndicatorGeometry::for_canvas(surface.canvas());
    render_indicator(surface, &geom, frame.progress_fraction);
    if let Some(particles) = frame.particles {
        render_particles(surface, particles, rng);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
