use super::*;
use crate::foundation::rng::{FixedSequence, SeededRandom};

#[test]
fn trigger_spawns_full_batch_at_origin() {
    let mut c = CelebrationEngine::default();
    assert!(!c.is_active());
    c.trigger(Point::new(10.0, 20.0), &mut SeededRandom::new(1));
    assert_eq!(c.particles().len(), 150);
    for p in c.particles() {
        assert_eq!(p.position, Point::new(10.0, 20.0));
        assert_eq!(p.life, 1.0);
        let speed = p.velocity.hypot();
        assert!((12.0 - 1e-9..20.0 + 1e-9).contains(&speed), "{speed}");
    }
}

#[test]
fn particles_move_by_velocity() {
    let mut c = CelebrationEngine::default();
    // angle 0, speed at the low end of the range
    c.trigger(Point::ZERO, &mut FixedSequence::constant(0.0));
    assert!(c.tick());
    let p = c.particles()[0];
    assert_eq!(p.position, Point::new(12.0, 0.0));
    assert!((p.life - 0.996).abs() < 1e-12);
}

#[test]
fn burst_dies_after_exactly_250_ticks() {
    let mut c = CelebrationEngine::default();
    c.trigger(Point::ZERO, &mut SeededRandom::new(99));
    for tick in 1..250 {
        assert!(c.tick(), "field emptied early at tick {tick}");
        assert_eq!(c.particles().len(), 150);
    }
    assert!(!c.tick());
    assert!(c.particles().is_empty());
    // Self-terminated: further ticks stay empty.
    assert!(!c.tick());
}
