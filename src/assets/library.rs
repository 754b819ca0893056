use std::sync::Arc;

use image::RgbaImage;
use rayon::prelude::*;

use crate::assets::preprocess::{
    Preprocessor, ProcessedStamp, compute_nominal_size, generate_thumbnail,
};
use crate::assets::source::{AssetFailure, SourceBatch, display_name_for};

/// Position of a stamp within its [`AssetLibrary`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct StampId(pub u32);

/// A processed, immutable stamp. Shared by every placement that uses it.
#[derive(Clone, Debug)]
pub struct StampAsset {
    pub id: StampId,
    /// Display name, e.g. `"Stamp 3"`.
    pub name: String,
    /// Filename the stamp was authored under.
    pub file_name: String,
    /// Longest edge of `raster` in pixels; the base scale reference.
    pub nominal_size: u32,
    /// Background-removed straight-alpha RGBA.
    pub raster: RgbaImage,
    pub thumbnail: RgbaImage,
}

impl StampAsset {
    pub fn from_processed(id: StampId, file_name: impl Into<String>, p: ProcessedStamp) -> Self {
        let file_name = file_name.into();
        Self {
            id,
            name: display_name_for(&file_name),
            file_name,
            nominal_size: p.nominal_size,
            raster: p.raster,
            thumbnail: p.thumbnail,
        }
    }

    /// Wrap an already-clean raster (no trimming or background removal).
    pub fn from_raster(
        id: StampId,
        file_name: impl Into<String>,
        raster: RgbaImage,
        thumbnail_box: u32,
    ) -> Self {
        let thumbnail = generate_thumbnail(&raster, thumbnail_box);
        let nominal_size = compute_nominal_size(&raster);
        Self::from_processed(
            id,
            file_name,
            ProcessedStamp {
                raster,
                thumbnail,
                nominal_size,
            },
        )
    }

    /// Longest edge of the stored raster.
    pub fn raster_extent(&self) -> u32 {
        self.raster.width().max(self.raster.height())
    }
}

/// Every stamp available to a session, in slot order, plus the ones that failed to load.
#[derive(Clone, Debug, Default)]
pub struct AssetLibrary {
    assets: Vec<Arc<StampAsset>>,
    failures: Vec<AssetFailure>,
}

impl AssetLibrary {
    /// Preprocess every source. Returns once all of them are done.
    #[tracing::instrument(skip_all, fields(sources = batch.sources.len()))]
    pub fn build(batch: SourceBatch, pre: &Preprocessor) -> Self {
        let processed: Vec<ProcessedStamp> =
            batch.sources.par_iter().map(|s| pre.process(s)).collect();

        let assets = batch
            .sources
            .into_iter()
            .zip(processed)
            .enumerate()
            .map(|(i, (src, p))| {
                Arc::new(StampAsset::from_processed(
                    StampId(i as u32),
                    src.file_name,
                    p,
                ))
            })
            .collect::<Vec<_>>();

        for f in &batch.failures {
            tracing::warn!(file = %f.file_name, reason = %f.reason, "stamp unavailable");
        }
        tracing::info!(
            loaded = assets.len(),
            failed = batch.failures.len(),
            "asset library ready"
        );

        Self {
            assets,
            failures: batch.failures,
        }
    }

    pub fn from_assets(assets: Vec<StampAsset>) -> Self {
        Self {
            assets: assets.into_iter().map(Arc::new).collect(),
            failures: Vec::new(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Arc<StampAsset>> {
        self.assets.get(index)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<StampAsset>> {
        self.assets.iter()
    }

    pub fn failures(&self) -> &[AssetFailure] {
        &self.failures
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/library.rs"]
mod tests;
