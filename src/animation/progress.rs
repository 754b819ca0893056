//! Target-tracking progress value behind the rainbow indicator.
//!
//! `target` moves in whole increments when a distinct placement happens; `current` chases
//! it a bounded step per frame. Completion is tied to `current`, so the celebration starts
//! when the indicator is visibly full rather than on the click that earned it.

use crate::config::ProgressConfig;

pub const PROGRESS_MAX: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressPhase {
    Idle,
    Animating,
}

/// What a single animation tick produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Another tick should be scheduled.
    pub keep_animating: bool,
    /// `current` reached 100 on this tick.
    pub completed: bool,
}

#[derive(Clone, Debug)]
pub struct ProgressAnimator {
    current: f64,
    target: f64,
    phase: ProgressPhase,
    full_reported: bool,
    increment: f64,
    step: f64,
    epsilon: f64,
}

impl Default for ProgressAnimator {
    fn default() -> Self {
        Self::from_config(&ProgressConfig::default())
    }
}

impl ProgressAnimator {
    pub fn from_config(cfg: &ProgressConfig) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            phase: ProgressPhase::Idle,
            full_reported: false,
            increment: cfg.increment,
            step: cfg.tick_step,
            epsilon: cfg.epsilon,
        }
    }

    /// Record a distinct placement: raise the target (clamped at 100) and start animating
    /// if there is now a gap to close.
    pub fn on_distinct_placement(&mut self) {
        self.target = (self.target + self.increment).min(PROGRESS_MAX);
        if self.phase == ProgressPhase::Idle && self.current < self.target {
            self.phase = ProgressPhase::Animating;
        }
        tracing::debug!(target = self.target, "progress target raised");
    }

    /// Advance one frame. Does nothing while idle.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase == ProgressPhase::Idle {
            return TickOutcome::default();
        }

        let gap = self.target - self.current;
        self.current += gap.min(self.step);
        if self.target - self.current <= self.epsilon {
            self.current = self.target;
            self.phase = ProgressPhase::Idle;
        }

        let mut completed = false;
        if self.current >= PROGRESS_MAX {
            if !self.full_reported {
                self.full_reported = true;
                completed = true;
                tracing::info!("progress complete");
            }
        } else {
            self.full_reported = false;
        }

        TickOutcome {
            keep_animating: self.phase == ProgressPhase::Animating,
            completed,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == ProgressPhase::Animating
    }

    /// `current` as a fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        (self.current / PROGRESS_MAX).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/progress.rs"]
mod tests;
