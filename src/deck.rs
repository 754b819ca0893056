//! Stream-deck profile: one hotkey button per stamp, laid out in reading order.
//!
//! The profile is a directory holding `manifest.json` and an `Images/` folder of
//! thumbnail icons named by the SHA-256 of the stamp file they were made from.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use image::RgbaImage;
use sha2::{Digest, Sha256};

use crate::assets::preprocess::generate_thumbnail;
use crate::assets::source::{AssetFailure, decode_raster, display_name_for, stamp_file_names};
use crate::export::sink::save_png;
use crate::foundation::error::{StampError, StampResult};
use crate::input::shortcut_letter;

pub const DECK_COLUMNS: usize = 5;
pub const DECK_ICON_SIZE: u32 = 80;
pub const DEFAULT_DEVICE_MODEL: &str = "D200H";
pub const HOTKEY_ACTION: &str = "com.ulanzi.ulanzideck.system.hotkey";
pub const IMAGES_DIR: &str = "Images";

/// A stamp file as read from disk.
#[derive(Clone, Debug)]
pub struct DeckStamp {
    pub file_name: String,
    /// Lowercase hex SHA-256 of the encoded file.
    pub content_hash: String,
    pub raster: RgbaImage,
}

impl DeckStamp {
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> StampResult<Self> {
        Ok(Self {
            file_name: file_name.into(),
            content_hash: sha256_hex(bytes),
            raster: decode_raster(bytes)?,
        })
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Read the numbered stamp files from `dir`, recording missing or broken ones.
pub fn load_deck_stamps(dir: &Path) -> (Vec<DeckStamp>, Vec<AssetFailure>) {
    let mut stamps = Vec::new();
    let mut failures = Vec::new();
    for file_name in stamp_file_names() {
        let path = dir.join(&file_name);
        let loaded = std::fs::read(&path)
            .with_context(|| format!("read stamp '{}'", path.display()))
            .map_err(StampError::from)
            .and_then(|bytes| DeckStamp::from_bytes(file_name.clone(), &bytes));
        match loaded {
            Ok(stamp) => stamps.push(stamp),
            Err(err) => {
                tracing::warn!(file = %file_name, error = %err, "stamp left off the deck");
                failures.push(AssetFailure {
                    file_name,
                    reason: err.to_string(),
                });
            }
        }
    }
    (stamps, failures)
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeckButton {
    pub action: String,
    #[serde(rename = "ActionID")]
    pub action_id: String,
    pub hotkey: String,
    pub title: String,
    /// Path relative to the profile directory.
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeckManifest {
    pub name: String,
    pub device_model: String,
    pub version: String,
    /// Buttons keyed by `"{col}_{row}"`.
    pub keypad: BTreeMap<String, DeckButton>,
}

#[derive(Clone, Debug)]
pub struct DeckProfile {
    pub manifest: DeckManifest,
    /// Icon file name and image, one per button.
    pub icons: Vec<(String, RgbaImage)>,
}

/// Grid key for button `index`.
pub fn position_key(index: usize) -> String {
    format!("{}_{}", index % DECK_COLUMNS, index / DECK_COLUMNS)
}

/// Lay out up to thirteen stamps; stamps past the last shortcut letter are left off.
pub fn build_profile(name: &str, stamps: &[DeckStamp]) -> StampResult<DeckProfile> {
    if stamps.is_empty() {
        return Err(StampError::validation("no stamps to put on the deck"));
    }
    let mut keypad = BTreeMap::new();
    let mut icons = Vec::new();
    for (idx, stamp) in stamps.iter().enumerate() {
        let Some(letter) = shortcut_letter(idx) else {
            tracing::warn!(file = %stamp.file_name, "no hotkey left for stamp");
            break;
        };
        let key = position_key(idx);
        let icon_name = format!("{}.png", stamp.content_hash);
        let short_hash = stamp.content_hash.get(..12).unwrap_or(&stamp.content_hash);
        keypad.insert(
            key.clone(),
            DeckButton {
                action: HOTKEY_ACTION.to_string(),
                action_id: format!("{short_hash}-{key}"),
                hotkey: format!("Ctrl+Shift+Alt+{letter}"),
                title: display_name_for(&stamp.file_name),
                icon: format!("{IMAGES_DIR}/{icon_name}"),
            },
        );
        icons.push((icon_name, generate_thumbnail(&stamp.raster, DECK_ICON_SIZE)));
    }
    Ok(DeckProfile {
        manifest: DeckManifest {
            name: name.to_string(),
            device_model: DEFAULT_DEVICE_MODEL.to_string(),
            version: "2.0".to_string(),
            keypad,
        },
        icons,
    })
}

impl DeckProfile {
    #[tracing::instrument(skip(self), fields(dir = %dir.display()))]
    pub fn write_to(&self, dir: &Path) -> StampResult<()> {
        let images = dir.join(IMAGES_DIR);
        std::fs::create_dir_all(&images)
            .with_context(|| format!("create {}", images.display()))?;
        for (name, icon) in &self.icons {
            save_png(icon, &images.join(name))?;
        }
        let json = serde_json::to_string_pretty(&self.manifest)
            .map_err(|e| StampError::serde(e.to_string()))?;
        let manifest = dir.join("manifest.json");
        std::fs::write(&manifest, json)
            .with_context(|| format!("write {}", manifest.display()))?;
        tracing::info!(buttons = self.manifest.keypad.len(), "deck profile written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/deck.rs"]
mod tests;
