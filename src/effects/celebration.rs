use std::f64::consts::TAU;

use crate::config::CelebrationConfig;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::rng::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Vec2,
    /// Remaining life in `[0, 1]`; also the particle's opacity.
    pub life: f64,
    age: u32,
}

impl Particle {
    fn new(position: Point, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            life: 1.0,
            age: 0,
        }
    }

    fn advance(&mut self, decay: f64) {
        self.position += self.velocity;
        self.age = self.age.saturating_add(1);
        // Derived from age so the burst dies on a whole tick count.
        self.life = (1.0 - f64::from(self.age) * decay).max(0.0);
    }

    fn is_dead(&self) -> bool {
        self.life <= 1e-9
    }
}

/// Particle burst raised when the progress indicator fills.
#[derive(Clone, Debug)]
pub struct CelebrationEngine {
    particles: Vec<Particle>,
    count: usize,
    speed_min: f64,
    speed_max: f64,
    decay: f64,
}

impl Default for CelebrationEngine {
    fn default() -> Self {
        Self::from_config(&CelebrationConfig::default())
    }
}

impl CelebrationEngine {
    pub fn from_config(cfg: &CelebrationConfig) -> Self {
        Self {
            particles: Vec::new(),
            count: cfg.particle_count,
            speed_min: cfg.speed_min,
            speed_max: cfg.speed_max,
            decay: cfg.decay,
        }
    }

    /// Spawn a full batch radiating from `origin` in uniformly random directions.
    pub fn trigger(&mut self, origin: Point, rng: &mut dyn RandomSource) {
        self.particles.reserve(self.count);
        for _ in 0..self.count {
            let angle = rng.range(0.0, TAU);
            let speed = rng.range(self.speed_min, self.speed_max);
            let velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);
            self.particles.push(Particle::new(origin, velocity));
        }
        tracing::info!(particles = self.particles.len(), "celebration started");
    }

    /// Advance every particle one frame and drop the dead ones.
    ///
    /// Returns whether another tick is wanted (the field is not empty).
    pub fn tick(&mut self) -> bool {
        let decay = self.decay;
        for p in &mut self.particles {
            p.advance(decay);
        }
        self.particles.retain(|p| !p.is_dead());
        !self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/celebration.rs"]
mod tests;
