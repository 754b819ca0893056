//! Runtime configuration.
//!
//! Every field has a default, so a partial JSON document (or none at all) is valid input.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Canvas;
use crate::foundation::error::{StampError, StampResult};

/// Top-level configuration for a stampbook session and its tooling.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StampbookConfig {
    pub preprocess: PreprocessConfig,
    pub placement: PlacementConfig,
    pub progress: ProgressConfig,
    pub celebration: CelebrationConfig,
    pub page: PageConfig,
}

/// Asset preprocessing parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Pixels cropped from every side before background removal.
    pub trim_margin: u32,
    /// Euclidean RGB distance (0-255 per channel) under which a pixel counts as background.
    pub bg_tolerance: f64,
    /// Edge length of the square thumbnail canvas.
    pub thumbnail_box: u32,
    /// Target height used when normalizing authored stamps.
    pub normalize_height: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            trim_margin: 4,
            bg_tolerance: 85.0,
            thumbnail_box: 80,
            normalize_height: 512,
        }
    }
}

/// Placement policy parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Fraction of the nominal size a stamp is rendered at before the size multiplier.
    pub render_fraction: f64,
    /// Overlap percentage at or above which an existing placement is replaced.
    pub replace_threshold_pct: f64,
    pub multiplier_min: f64,
    pub multiplier_max: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            render_fraction: 1.0 / 3.0,
            replace_threshold_pct: 10.0,
            multiplier_min: 0.6,
            multiplier_max: 1.4,
        }
    }
}

/// Progress animator parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Target increase per distinct placement.
    pub increment: f64,
    /// Maximum movement of `current` per tick.
    pub tick_step: f64,
    /// Remaining gap under which `current` snaps to `target`.
    pub epsilon: f64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            increment: 10.0,
            tick_step: 3.0,
            epsilon: 0.1,
        }
    }
}

/// Celebration particle burst parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    pub particle_count: usize,
    pub speed_min: f64,
    pub speed_max: f64,
    /// Life lost per tick.
    pub decay: f64,
    /// Burst origin in page space; `None` uses the progress indicator's center.
    pub origin: Option<[f64; 2]>,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            particle_count: 150,
            speed_min: 12.0,
            speed_max: 20.0,
            decay: 0.004,
            origin: None,
        }
    }
}

/// Page canvas and export layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Portrait scene canvas in pixels.
    pub canvas: Canvas,
    pub background_rgb: [u8; 3],
    /// Export page width in points (US letter).
    pub export_width_pt: f64,
    /// Export page height in points (US letter).
    pub export_height_pt: f64,
    pub export_margin_pt: f64,
    /// Raster resolution used by the PNG page exporter.
    pub export_dpi: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1700,
                height: 2200,
            },
            background_rgb: [255, 255, 255],
            export_width_pt: 612.0,
            export_height_pt: 792.0,
            export_margin_pt: 36.0,
            export_dpi: 150.0,
        }
    }
}

impl StampbookConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> StampResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| StampError::serde(format!("parse config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: &Path) -> StampResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> StampResult<()> {
        let p = &self.preprocess;
        if !p.bg_tolerance.is_finite() || p.bg_tolerance < 0.0 {
            return Err(StampError::validation("preprocess.bg_tolerance must be >= 0"));
        }
        if p.thumbnail_box == 0 || p.normalize_height == 0 {
            return Err(StampError::validation(
                "preprocess.thumbnail_box and normalize_height must be > 0",
            ));
        }

        let pl = &self.placement;
        if !(pl.render_fraction > 0.0 && pl.render_fraction.is_finite()) {
            return Err(StampError::validation("placement.render_fraction must be > 0"));
        }
        if !(pl.multiplier_min > 0.0 && pl.multiplier_min <= pl.multiplier_max) {
            return Err(StampError::validation(
                "placement multiplier range must satisfy 0 < min <= max",
            ));
        }
        if !(0.0..=100.0).contains(&pl.replace_threshold_pct) {
            return Err(StampError::validation(
                "placement.replace_threshold_pct must be within [0, 100]",
            ));
        }

        let pr = &self.progress;
        if !(pr.increment > 0.0 && pr.tick_step > 0.0 && pr.epsilon >= 0.0) {
            return Err(StampError::validation(
                "progress increment and tick_step must be > 0, epsilon >= 0",
            ));
        }

        let c = &self.celebration;
        if !(c.decay > 0.0 && c.decay.is_finite()) {
            return Err(StampError::validation("celebration.decay must be > 0"));
        }
        if c.speed_min > c.speed_max {
            return Err(StampError::validation(
                "celebration.speed_min must be <= speed_max",
            ));
        }

        let pg = &self.page;
        Canvas::new(pg.canvas.width, pg.canvas.height)?;
        if pg.export_width_pt <= 2.0 * pg.export_margin_pt
            || pg.export_height_pt <= 2.0 * pg.export_margin_pt
        {
            return Err(StampError::validation(
                "page export margin leaves no printable area",
            ));
        }
        if !(pg.export_dpi > 0.0) {
            return Err(StampError::validation("page.export_dpi must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
