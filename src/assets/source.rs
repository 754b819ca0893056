//! Raw stamp sources: individual raster files or one atlas raster plus its index.
//!
//! Both forms are normalized into [`SourceImage`] values so the preprocessor never needs to
//! know where a stamp came from.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::RgbaImage;

use crate::assets::atlas::AtlasIndex;
use crate::foundation::error::{StampError, StampResult};

/// Number of stamp slots the page offers (one per shortcut letter A..M).
pub const STAMP_SLOTS: usize = 13;

/// One undecorated stamp raster plus the filename it was authored under.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Original filename, e.g. `"3.png"`.
    pub file_name: String,
    /// Straight-alpha RGBA pixels.
    pub raster: RgbaImage,
}

impl SourceImage {
    /// Human-facing name derived from the filename (`"3.png"` becomes `"Stamp 3"`).
    pub fn display_name(&self) -> String {
        display_name_for(&self.file_name)
    }
}

/// A stamp that could not be loaded or processed; it is left out of the library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetFailure {
    pub file_name: String,
    pub reason: String,
}

/// Sources that loaded successfully plus a record of every one that did not.
#[derive(Clone, Debug, Default)]
pub struct SourceBatch {
    pub sources: Vec<SourceImage>,
    pub failures: Vec<AssetFailure>,
}

pub fn display_name_for(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    if stem.chars().all(|c| c.is_ascii_digit()) && !stem.is_empty() {
        format!("Stamp {stem}")
    } else {
        stem.to_string()
    }
}

/// Decode an encoded raster (PNG, JPEG, ...) into straight-alpha RGBA8.
pub fn decode_raster(bytes: &[u8]) -> StampResult<RgbaImage> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| StampError::decode(e.to_string()))?;
    Ok(dyn_img.to_rgba8())
}

/// File names of the numbered stamp slots: `1.png` through `13.png`.
pub fn stamp_file_names() -> Vec<String> {
    (1..=STAMP_SLOTS).map(|i| format!("{i}.png")).collect()
}

/// Load the numbered stamp files from `dir`.
///
/// A missing or undecodable file is recorded as an [`AssetFailure`] and loading continues
/// with the remaining files.
#[tracing::instrument(skip_all, fields(dir = %dir.display()))]
pub fn load_stamp_dir(dir: &Path) -> SourceBatch {
    let mut batch = SourceBatch::default();
    for file_name in stamp_file_names() {
        let path = dir.join(&file_name);
        match read_raster_file(&path) {
            Ok(raster) => batch.sources.push(SourceImage { file_name, raster }),
            Err(err) => {
                tracing::warn!(file = %file_name, error = %err, "skipping stamp");
                batch.failures.push(AssetFailure {
                    file_name,
                    reason: err.to_string(),
                });
            }
        }
    }
    batch
}

fn read_raster_file(path: &Path) -> StampResult<RgbaImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read stamp '{}'", path.display()))?;
    decode_raster(&bytes)
}

/// Location of an atlas raster and its side-car index.
#[derive(Clone, Debug)]
pub struct AtlasSource {
    pub image_path: PathBuf,
    pub index_path: PathBuf,
}

/// Load every stamp described by an atlas index.
///
/// Unlike individual files, a malformed index is fatal: every entry must fall inside the
/// atlas and, when `expected_count` is given, the entry count must match it.
#[tracing::instrument(skip_all, fields(atlas = %src.image_path.display()))]
pub fn load_atlas(src: &AtlasSource, expected_count: Option<usize>) -> StampResult<SourceBatch> {
    let index_text = std::fs::read_to_string(&src.index_path)
        .with_context(|| format!("read atlas index '{}'", src.index_path.display()))?;
    let index = AtlasIndex::from_json_str(&index_text)?;

    let atlas = read_raster_file(&src.image_path)
        .map_err(|e| StampError::atlas(format!("atlas raster unreadable: {e}")))?;

    let sources = index.slice(&atlas, expected_count)?;
    tracing::debug!(count = sources.len(), "atlas sliced");
    Ok(SourceBatch {
        sources,
        failures: Vec::new(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
