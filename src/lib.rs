//! Stampbook is the engine behind a stamp page: click stamp artwork onto a virtual page,
//! watch a rainbow fill as distinct stamps accumulate, celebrate when it is full.
//!
//! - Build an [`AssetLibrary`] from stamp files or an atlas (trim, background removal,
//!   thumbnails)
//! - Drive a [`StampBook`] with gestures and frame ticks
//! - Render frames or export the page into a [`DocumentSink`]
//!
//! Placement uses a pixel-accurate overlap metric: a new stamp removes every existing
//! stamp it covers by at least the replace threshold.
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod deck;
pub mod effects;
pub mod export;
pub mod input;
pub mod placement;
pub mod render;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul, Size, Vec2, hsl_to_rgb};
pub use crate::foundation::error::{StampError, StampResult};
pub use crate::foundation::rng::{FixedSequence, RandomSource, SeededRandom};

pub use crate::animation::progress::{ProgressAnimator, ProgressPhase, TickOutcome};
pub use crate::app::StampBook;
pub use crate::assets::library::{AssetLibrary, StampAsset, StampId};
pub use crate::assets::preprocess::{ProcessedStamp, Preprocessor};
pub use crate::assets::source::{AssetFailure, AtlasSource, SourceBatch, SourceImage};
pub use crate::audio::cue::{Cue, CueSink, NullCueSink, RecordingCueSink};
pub use crate::config::StampbookConfig;
pub use crate::effects::celebration::{CelebrationEngine, Particle};
pub use crate::export::page::PageSetup;
pub use crate::export::sink::{DocumentSink, InMemoryDocument, PngPageDocument};
pub use crate::input::{Shortcut, resolve_shortcut};
pub use crate::placement::footprint::{Footprint, ResampleRasterizer, StampRasterizer};
pub use crate::placement::overlap::{OverlapEvaluator, PlacementSpec, overlap_percent};
pub use crate::placement::session::{
    PlacedStamp, PlacementOutcome, PlacementSession, ReplacePolicy,
};
pub use crate::render::surface::{CpuSurface, Surface};
