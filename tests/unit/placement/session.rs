use image::RgbaImage;

use super::*;
use crate::assets::library::StampId;
use crate::foundation::rng::FixedSequence;

fn square(id: u32, side: u32) -> Arc<StampAsset> {
    Arc::new(StampAsset::from_raster(
        StampId(id),
        format!("{}.png", id + 1),
        RgbaImage::from_pixel(side, side, image::Rgba([0, 0, 0, 255])),
        8,
    ))
}

fn unit_session() -> PlacementSession {
    PlacementSession::new(OverlapEvaluator::new(1.0), ReplacePolicy::default(), (0.6, 1.4))
}

#[test]
fn fifteen_percent_overlap_replaces() {
    let mut s = unit_session();
    let a = square(0, 100);
    assert!(s.place_with_multiplier(Arc::clone(&a), Point::new(100.0, 100.0), 1.0).is_distinct());
    let out = s.place_with_multiplier(Arc::clone(&a), Point::new(185.0, 100.0), 1.0);
    assert_eq!(out.removed_count(), 1);
    assert_eq!(out.removed[0].center, Point::new(100.0, 100.0));
    assert_eq!(s.len(), 1);
    assert_eq!(s.placements()[0].center, Point::new(185.0, 100.0));
}

#[test]
fn threshold_boundary_is_inclusive() {
    let mut s = unit_session();
    let a = square(0, 100);
    s.place_with_multiplier(Arc::clone(&a), Point::new(100.0, 100.0), 1.0);
    // Exactly 10%: 10 shared columns out of 100.
    let out = s.place_with_multiplier(Arc::clone(&a), Point::new(190.0, 100.0), 1.0);
    assert_eq!(out.removed_count(), 1);
    assert_eq!(s.len(), 1);
}

#[test]
fn small_overlap_coexists() {
    let mut s = unit_session();
    let a = square(0, 100);
    s.place_with_multiplier(Arc::clone(&a), Point::new(100.0, 100.0), 1.0);
    // 5% overlap stays below the threshold.
    let out = s.place_with_multiplier(Arc::clone(&a), Point::new(195.0, 100.0), 1.0);
    assert!(out.is_distinct());
    assert_eq!(s.len(), 2);
}

#[test]
fn candidate_removes_every_overlapped_placement() {
    let mut s = unit_session();
    let small = square(0, 20);
    s.place_with_multiplier(Arc::clone(&small), Point::new(40.0, 40.0), 1.0);
    s.place_with_multiplier(Arc::clone(&small), Point::new(80.0, 40.0), 1.0);
    s.place_with_multiplier(Arc::clone(&small), Point::new(400.0, 400.0), 1.0);
    assert_eq!(s.len(), 3);

    let big = square(1, 120);
    let out = s.place_with_multiplier(big, Point::new(60.0, 40.0), 1.0);
    assert_eq!(out.removed_count(), 2);
    assert_eq!(s.len(), 2);
    assert_eq!(s.placements()[0].center, Point::new(400.0, 400.0));
    assert_eq!(s.placements()[1].asset.id, StampId(1));
}

#[test]
fn place_draws_multiplier_from_rng() {
    let mut s = unit_session();
    let mut rng = FixedSequence::new(vec![0.0, 0.999]);
    s.place(square(0, 10), Point::new(0.0, 0.0), &mut rng);
    s.place(square(0, 10), Point::new(500.0, 0.0), &mut rng);
    let m0 = s.placements()[0].size_multiplier;
    let m1 = s.placements()[1].size_multiplier;
    assert!((m0 - 0.6).abs() < 1e-12);
    assert!(m1 > 1.39 && m1 < 1.4);
}

#[test]
fn erase_removes_topmost_hit() {
    let mut s = unit_session();
    let a = square(0, 40);
    let b = square(1, 40);
    s.place_with_multiplier(Arc::clone(&a), Point::new(100.0, 100.0), 1.0);
    // 5% overlap: both stay, b on top.
    s.place_with_multiplier(Arc::clone(&b), Point::new(138.0, 100.0), 1.0);
    assert_eq!(s.len(), 2);

    let gone = s.erase_at(Point::new(119.0, 100.0)).unwrap();
    assert_eq!(gone.asset.id, StampId(1));
    assert!(s.erase_at(Point::new(300.0, 300.0)).is_none());
    assert_eq!(s.len(), 1);
}

#[test]
fn policy_never_displaces_without_contact() {
    let p = ReplacePolicy { threshold_pct: 0.0 };
    assert!(!p.displaces(0.0));
    assert!(p.displaces(0.5));
    let p = ReplacePolicy::default();
    assert!(p.displaces(10.0));
    assert!(!p.displaces(9.999));
}
