use image::RgbaImage;

use super::*;
use crate::assets::library::StampId;

fn square_asset(side: u32) -> Arc<StampAsset> {
    Arc::new(StampAsset::from_raster(
        StampId(0),
        "square.png",
        RgbaImage::from_pixel(side, side, image::Rgba([20, 20, 20, 255])),
        8,
    ))
}

fn spec(asset: &Arc<StampAsset>, x: f64, y: f64) -> PlacementSpec {
    PlacementSpec {
        asset: Arc::clone(asset),
        center: Point::new(x, y),
        size_multiplier: 1.0,
    }
}

#[test]
fn identical_placements_overlap_fully() {
    let eval = OverlapEvaluator::new(1.0);
    let a = square_asset(40);
    assert_eq!(eval.evaluate(&spec(&a, 50.0, 50.0), &spec(&a, 50.0, 50.0)), 100.0);
}

#[test]
fn disjoint_boxes_short_circuit_to_zero() {
    let eval = OverlapEvaluator::new(1.0);
    let a = square_asset(40);
    assert_eq!(eval.evaluate(&spec(&a, 0.0, 0.0), &spec(&a, 100.0, 0.0)), 0.0);
    // Touching edges share no area.
    assert_eq!(eval.evaluate(&spec(&a, 0.0, 0.0), &spec(&a, 40.0, 0.0)), 0.0);
}

#[test]
fn partial_offset_gives_column_fraction() {
    let eval = OverlapEvaluator::new(1.0);
    let a = square_asset(100);
    let p = spec(&a, 100.0, 100.0);
    assert_eq!(eval.evaluate(&p, &spec(&a, 190.0, 100.0)), 10.0);
    assert_eq!(eval.evaluate(&p, &spec(&a, 185.0, 100.0)), 15.0);
    assert_eq!(eval.evaluate(&p, &spec(&a, 150.0, 150.0)), 25.0);
}

#[test]
fn small_stamp_under_large_reads_full() {
    let eval = OverlapEvaluator::new(1.0);
    let big = square_asset(200);
    let small = square_asset(10);
    assert_eq!(eval.evaluate(&spec(&big, 100.0, 100.0), &spec(&small, 100.0, 100.0)), 100.0);
}

#[test]
fn transparent_asset_reads_zero() {
    let eval = OverlapEvaluator::new(1.0);
    let clear = Arc::new(StampAsset::from_raster(
        StampId(1),
        "clear.png",
        RgbaImage::new(30, 30),
        8,
    ));
    let solid = square_asset(30);
    assert_eq!(eval.evaluate(&spec(&clear, 0.0, 0.0), &spec(&solid, 0.0, 0.0)), 0.0);
}

#[test]
fn overlap_is_symmetric() {
    let eval = OverlapEvaluator::new(1.0 / 3.0);
    let ring = Arc::new(StampAsset::from_raster(
        StampId(2),
        "ring.png",
        RgbaImage::from_fn(90, 60, |x, y| {
            let dx = x as f64 - 45.0;
            let dy = y as f64 - 30.0;
            let r = (dx * dx + dy * dy).sqrt();
            if (12.0..28.0).contains(&r) {
                image::Rgba([0, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 0, 0])
            }
        }),
        8,
    ));
    let sq = square_asset(60);
    let cases = [
        (spec(&ring, 10.0, 10.0), spec(&sq, 17.3, 4.9)),
        (spec(&sq, 0.5, 0.5), spec(&ring, 3.0, -7.25)),
        (spec(&ring, 0.0, 0.0), spec(&ring, 11.0, 2.0)),
    ];
    for (a, b) in &cases {
        assert_eq!(eval.evaluate(a, b), eval.evaluate(b, a));
    }
}

#[test]
fn moving_apart_never_increases_overlap() {
    let eval = OverlapEvaluator::new(1.0);
    let a = square_asset(50);
    let anchor = spec(&a, 0.0, 0.0);
    let mut prev = f64::INFINITY;
    for d in 0..60 {
        let o = eval.evaluate(&anchor, &spec(&a, f64::from(d), f64::from(d) * 0.5));
        assert!(o <= prev, "distance {d}: {o} > {prev}");
        prev = o;
    }
    assert_eq!(prev, 0.0);
}
