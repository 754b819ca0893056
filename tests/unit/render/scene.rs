use std::sync::Arc;

use super::*;
use crate::assets::library::{StampAsset, StampId};
use crate::effects::celebration::CelebrationEngine;
use crate::foundation::rng::FixedSequence;
use crate::placement::session::PlacementSession;
use crate::render::surface::CpuSurface;

const WHITE: [u8; 4] = [255, 255, 255, 255];

fn frame(fraction: f64) -> image::RgbaImage {
    let mut s = CpuSurface::new(Canvas {
        width: 400,
        height: 1000,
    });
    let scene = SceneFrame {
        background: [255, 255, 255],
        placements: &[],
        progress_fraction: fraction,
        particles: None,
    };
    render_scene(&mut s, &scene, &mut FixedSequence::constant(0.0));
    s.read_pixels()
}

#[test]
fn geometry_follows_canvas() {
    let g = IndicatorGeometry::for_canvas(Canvas {
        width: 400,
        height: 1000,
    });
    assert_eq!(g.center, Point::new(200.0, 160.0));
    assert_eq!(g.outer_radius, 80.0);
    assert!(g.band_radius(0) > g.band_radius(6));
}

#[test]
fn empty_progress_draws_only_the_track() {
    let img = frame(0.0);
    // Left end of the outer band.
    let mut expected = TRACK_RGB.to_vec();
    expected.push(255);
    assert_eq!(img.get_pixel(123, 158).0.to_vec(), expected);
    assert_eq!(img.get_pixel(200, 237).0, WHITE);
}

#[test]
fn half_progress_fills_left_side_only() {
    let img = frame(0.5);
    assert_eq!(img.get_pixel(123, 158).0, [255, 0, 0, 255]);
    let mut track = TRACK_RGB.to_vec();
    track.push(255);
    assert_eq!(img.get_pixel(277, 158).0.to_vec(), track);
}

#[test]
fn full_progress_fills_both_ends() {
    let img = frame(1.0);
    assert_eq!(img.get_pixel(123, 158).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(277, 158).0, [255, 0, 0, 255]);
    // Lower half never drawn.
    assert_eq!(img.get_pixel(200, 237).0, WHITE);
}

#[test]
fn placements_and_particles_are_drawn() {
    let raster = image::RgbaImage::from_pixel(30, 30, image::Rgba([0, 0, 255, 255]));
    let asset = Arc::new(StampAsset::from_raster(StampId(0), "1.png", raster, 80));
    let mut session = PlacementSession::default();
    session.place_with_multiplier(asset, Point::new(200.0, 600.0), 3.0);

    let mut burst = CelebrationEngine::default();
    burst.trigger(Point::new(100.0, 900.0), &mut FixedSequence::constant(0.0));

    let mut s = CpuSurface::new(Canvas {
        width: 400,
        height: 1000,
    });
    let scene = SceneFrame {
        background: [255, 255, 255],
        placements: session.placements(),
        progress_fraction: 0.0,
        particles: Some(burst.particles()),
    };
    render_scene(&mut s, &scene, &mut FixedSequence::constant(0.0));
    let img = s.read_pixels();
    assert_eq!(img.get_pixel(200, 600).0, [0, 0, 255, 255]);
    assert_eq!(img.get_pixel(100, 900).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(10, 990).0, WHITE);
}

#[test]
fn drawn_pixels_match_footprint_hits_at_half_pixel_origins() {
    // Only the left column is opaque.
    let raster = image::RgbaImage::from_fn(3, 3, |x, _| {
        if x == 0 {
            image::Rgba([255, 0, 0, 255])
        } else {
            image::Rgba([0, 0, 0, 0])
        }
    });
    let asset = Arc::new(StampAsset::from_raster(StampId(0), "1.png", raster, 80));
    let mut session = PlacementSession::default();
    // Renders 3x3 (nominal 3, fraction 1/3, multiplier 3) with its box at -0.5..2.5.
    session.place_with_multiplier(asset, Point::new(1.0, 1.0), 3.0);
    let fp = &session.placements()[0].footprint;
    assert_eq!(fp.bounds.x0, -0.5);

    let mut s = CpuSurface::new(Canvas {
        width: 4,
        height: 4,
    });
    render_placements(&mut s, session.placements());
    let img = s.read_pixels();
    for y in 0..4u32 {
        for x in 0..4u32 {
            let drawn = img.get_pixel(x, y)[3] != 0;
            assert_eq!(drawn, fp.opaque_at(i64::from(x), i64::from(y)), "({x}, {y})");
        }
    }
    assert!(fp.opaque_at(0, 0));
}
