//! The interactive page: gestures in, frames and exports out.

use std::sync::Arc;

use image::RgbaImage;

use crate::animation::progress::ProgressAnimator;
use crate::assets::library::{AssetLibrary, StampAsset};
use crate::audio::cue::{Cue, CueSink, NullCueSink};
use crate::config::StampbookConfig;
use crate::effects::celebration::CelebrationEngine;
use crate::export::page::PageSetup;
use crate::export::sink::DocumentSink;
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::StampResult;
use crate::foundation::rng::{FixedSequence, RandomSource, SeededRandom};
use crate::input::{Shortcut, resolve_shortcut};
use crate::placement::session::{PlacedStamp, PlacementOutcome, PlacementSession};
use crate::render::scene::{IndicatorGeometry, SceneFrame, render_scene};
use crate::render::surface::{CpuSurface, Surface};

/// A stamp page session.
///
/// Owns the finished asset library and every piece of mutable page state. Components talk
/// only through return values: a distinct placement raises the progress target, a
/// completed progress tick starts the celebration.
pub struct StampBook<C: CueSink = NullCueSink> {
    config: StampbookConfig,
    library: AssetLibrary,
    selected: Option<usize>,
    session: PlacementSession,
    progress: ProgressAnimator,
    celebration: CelebrationEngine,
    rng: Box<dyn RandomSource>,
    cues: C,
}

impl StampBook<NullCueSink> {
    /// Silent session with a seeded random source.
    pub fn new(library: AssetLibrary, config: StampbookConfig, seed: u64) -> StampResult<Self> {
        Self::with_parts(library, config, Box::new(SeededRandom::new(seed)), NullCueSink)
    }
}

impl<C: CueSink> StampBook<C> {
    pub fn with_parts(
        library: AssetLibrary,
        config: StampbookConfig,
        rng: Box<dyn RandomSource>,
        cues: C,
    ) -> StampResult<Self> {
        config.validate()?;
        let selected = (!library.is_empty()).then_some(0);
        Ok(Self {
            session: PlacementSession::from_config(&config.placement),
            progress: ProgressAnimator::from_config(&config.progress),
            celebration: CelebrationEngine::from_config(&config.celebration),
            config,
            library,
            selected,
            rng,
            cues,
        })
    }

    /// Make stamp `index` the active one. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.library.len() {
            tracing::debug!(index, "selection ignored");
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Apply a keyboard shortcut; returns whether it changed the selection.
    pub fn shortcut(&mut self, shortcut: &Shortcut) -> bool {
        resolve_shortcut(shortcut).is_some_and(|idx| self.select(idx))
    }

    pub fn selected(&self) -> Option<&Arc<StampAsset>> {
        self.selected.and_then(|idx| self.library.get(idx))
    }

    /// Place the selected stamp at `point`. `None` when nothing is selected.
    pub fn click(&mut self, point: Point) -> Option<PlacementOutcome> {
        let asset = Arc::clone(self.selected()?);
        let outcome = self.session.place(asset, point, self.rng.as_mut());
        self.cues.play(Cue::random_placement(self.rng.as_mut()));
        if outcome.is_distinct() {
            self.progress.on_distinct_placement();
        }
        tracing::debug!(
            x = point.x,
            y = point.y,
            removed = outcome.removed_count(),
            target = self.progress.target(),
            "click"
        );
        Some(outcome)
    }

    /// Remove the topmost stamp under `point`. Progress is never taken back.
    pub fn erase(&mut self, point: Point) -> Option<PlacedStamp> {
        self.session.erase_at(point)
    }

    /// Advance one frame; returns whether another frame is wanted.
    pub fn tick(&mut self) -> bool {
        let outcome = self.progress.tick();
        // The burst shows at its origin for one frame before it starts moving.
        let particles_alive = if outcome.completed {
            let origin = self.celebration_origin();
            self.cues.play(Cue::Celebration);
            self.celebration.trigger(origin, self.rng.as_mut());
            self.celebration.is_active()
        } else {
            self.celebration.tick()
        };
        outcome.keep_animating || particles_alive
    }

    /// Whether a frame should be scheduled without further input.
    pub fn wants_frame(&self) -> bool {
        self.progress.is_animating() || self.celebration.is_active()
    }

    /// Tick until quiescent or `max_frames` ticks ran; returns the number of ticks.
    pub fn run_until_idle(&mut self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.wants_frame() {
            self.tick();
            frames += 1;
        }
        frames
    }

    fn celebration_origin(&self) -> Point {
        match self.config.celebration.origin {
            Some([x, y]) => Point::new(x, y),
            None => IndicatorGeometry::for_canvas(self.canvas()).center,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.config.page.canvas
    }

    /// The current frame, particles included.
    pub fn render(&mut self) -> RgbaImage {
        let mut surface = CpuSurface::new(self.canvas());
        let frame = SceneFrame {
            background: self.config.page.background_rgb,
            placements: self.session.placements(),
            progress_fraction: self.progress.fraction(),
            particles: self
                .celebration
                .is_active()
                .then(|| self.celebration.particles()),
        };
        render_scene(&mut surface, &frame, self.rng.as_mut());
        surface.read_pixels()
    }

    /// The page as exported: stamps and indicator, never particles.
    pub fn render_export(&self) -> RgbaImage {
        let mut surface = CpuSurface::new(self.canvas());
        let frame = SceneFrame {
            background: self.config.page.background_rgb,
            placements: self.session.placements(),
            progress_fraction: self.progress.fraction(),
            particles: None,
        };
        render_scene(&mut surface, &frame, &mut FixedSequence::constant(0.0));
        surface.read_pixels()
    }

    /// Render the page and hand it to `sink` fitted onto the configured paper.
    /// Returns where the image was placed, in points.
    #[tracing::instrument(skip_all, fields(stamps = self.session.len()))]
    pub fn export(&self, sink: &mut dyn DocumentSink) -> StampResult<Rect> {
        let setup = PageSetup::from_config(&self.config.page)?;
        let image = self.render_export();
        let placement = setup.fit(image.width(), image.height())?;
        sink.begin(setup)?;
        sink.embed_page(&image, placement)?;
        sink.end()?;
        tracing::info!("page exported");
        Ok(placement)
    }

    pub fn library(&self) -> &AssetLibrary {
        &self.library
    }

    pub fn session(&self) -> &PlacementSession {
        &self.session
    }

    pub fn progress(&self) -> &ProgressAnimator {
        &self.progress
    }

    pub fn celebration(&self) -> &CelebrationEngine {
        &self.celebration
    }

    pub fn config(&self) -> &StampbookConfig {
        &self.config
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }
}

#[cfg(test)]
#[path = "../tests/unit/app.rs"]
mod tests;
