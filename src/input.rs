//! Keyboard shortcut mapping: Ctrl+Alt+Shift + A..M selects stamp 0..12.

use std::fmt;

use crate::assets::source::STAMP_SLOTS;

/// Letters bound to the stamp slots, in slot order.
pub const SHORTCUT_KEYS: [char; STAMP_SLOTS] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
];

/// A key press with its modifier state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Shortcut {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    pub key: char,
}

impl Shortcut {
    /// `key` with all three modifiers held.
    pub fn chord(key: char) -> Self {
        Self {
            ctrl: true,
            alt: true,
            shift: true,
            key,
        }
    }

    /// Parse `"Ctrl+Alt+Shift+C"`-style text. Modifier order and case are free.
    pub fn parse(text: &str) -> Option<Self> {
        let mut out = Self {
            ctrl: false,
            alt: false,
            shift: false,
            key: '\0',
        };
        let mut key = None;
        for part in text.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => out.ctrl = true,
                "alt" | "option" => out.alt = true,
                "shift" => out.shift = true,
                _ => {
                    let mut chars = part.chars();
                    let (Some(c), None) = (chars.next(), chars.next()) else {
                        return None;
                    };
                    if key.replace(c).is_some() {
                        return None;
                    }
                }
            }
        }
        out.key = key?;
        Some(out)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

/// Stamp slot selected by `shortcut`, if any. Incomplete chords are ignored.
pub fn resolve_shortcut(shortcut: &Shortcut) -> Option<usize> {
    if !(shortcut.ctrl && shortcut.alt && shortcut.shift) {
        return None;
    }
    let key = shortcut.key.to_ascii_uppercase();
    SHORTCUT_KEYS.iter().position(|&k| k == key)
}

/// Letter bound to slot `index`.
pub fn shortcut_letter(index: usize) -> Option<char> {
    SHORTCUT_KEYS.get(index).copied()
}

#[cfg(test)]
#[path = "../tests/unit/input.rs"]
mod tests;
