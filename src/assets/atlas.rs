use image::RgbaImage;

use crate::assets::source::SourceImage;
use crate::foundation::error::{StampError, StampResult};

/// Side-car index describing where each stamp lives inside an atlas raster.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AtlasIndex {
    pub width: u32,
    pub height: u32,
    pub entries: Vec<AtlasEntry>,
}

/// One stamp's pixel rectangle within the atlas.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AtlasEntry {
    /// Filename the stamp was authored under.
    pub file: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AtlasIndex {
    pub fn from_json_str(json: &str) -> StampResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| StampError::serde(format!("parse atlas index: {e}")))
    }

    pub fn to_json_pretty(&self) -> StampResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StampError::serde(format!("encode atlas index: {e}")))
    }

    /// Check every entry against the atlas dimensions (and the expected stamp count).
    pub fn validate(
        &self,
        atlas_w: u32,
        atlas_h: u32,
        expected: Option<usize>,
    ) -> StampResult<()> {
        if self.width != atlas_w || self.height != atlas_h {
            return Err(StampError::atlas(format!(
                "index describes a {}x{} atlas but the raster is {atlas_w}x{atlas_h}",
                self.width, self.height
            )));
        }
        if self.entries.is_empty() {
            return Err(StampError::atlas("atlas index has no entries"));
        }
        if let Some(n) = expected
            && self.entries.len() != n
        {
            return Err(StampError::atlas(format!(
                "atlas index lists {} stamps, expected {n}",
                self.entries.len()
            )));
        }
        for e in &self.entries {
            if e.width == 0 || e.height == 0 {
                return Err(StampError::atlas(format!("entry '{}' is empty", e.file)));
            }
            let fits_x = e.x.checked_add(e.width).is_some_and(|r| r <= atlas_w);
            let fits_y = e.y.checked_add(e.height).is_some_and(|b| b <= atlas_h);
            if !fits_x || !fits_y {
                return Err(StampError::atlas(format!(
                    "entry '{}' ({},{} {}x{}) lies outside the {atlas_w}x{atlas_h} atlas",
                    e.file, e.x, e.y, e.width, e.height
                )));
            }
        }
        Ok(())
    }

    /// Cut the atlas into one [`SourceImage`] per entry, in index order.
    pub fn slice(
        &self,
        atlas: &RgbaImage,
        expected: Option<usize>,
    ) -> StampResult<Vec<SourceImage>> {
        self.validate(atlas.width(), atlas.height(), expected)?;
        Ok(self
            .entries
            .iter()
            .map(|e| SourceImage {
                file_name: e.file.clone(),
                raster: image::imageops::crop_imm(atlas, e.x, e.y, e.width, e.height)
                    .to_image(),
            })
            .collect())
    }
}

/// Pack sources into a grid atlas (row-major, cells sized to the largest source).
pub fn build_atlas(sources: &[SourceImage]) -> StampResult<(RgbaImage, AtlasIndex)> {
    if sources.is_empty() {
        return Err(StampError::validation("cannot build an atlas from zero stamps"));
    }
    let cell_w = sources.iter().map(|s| s.raster.width()).max().unwrap_or(1);
    let cell_h = sources.iter().map(|s| s.raster.height()).max().unwrap_or(1);
    let cols = (sources.len() as f64).sqrt().ceil().max(1.0) as u32;
    let rows = (sources.len() as u32).div_ceil(cols);

    let width = cell_w
        .checked_mul(cols)
        .ok_or_else(|| StampError::validation("atlas width overflow"))?;
    let height = cell_h
        .checked_mul(rows)
        .ok_or_else(|| StampError::validation("atlas height overflow"))?;

    let mut atlas = RgbaImage::new(width, height);
    let mut entries = Vec::with_capacity(sources.len());
    for (i, src) in sources.iter().enumerate() {
        let i = i as u32;
        let x = (i % cols) * cell_w;
        let y = (i / cols) * cell_h;
        image::imageops::replace(&mut atlas, &src.raster, i64::from(x), i64::from(y));
        entries.push(AtlasEntry {
            file: src.file_name.clone(),
            x,
            y,
            width: src.raster.width(),
            height: src.raster.height(),
        });
    }

    Ok((
        atlas,
        AtlasIndex {
            width,
            height,
            entries,
        },
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/atlas.rs"]
mod tests;
