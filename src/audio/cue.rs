//! Audio cue requests. Synthesis itself belongs to the host; the core only decides which cue
//! plays and describes it as a short note sequence.

use crate::foundation::rng::RandomSource;

/// Everything the core can ask the host to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Cue {
    /// One of the placement sounds, `0..PLACEMENT_CUES`.
    Placement(u8),
    /// Rising arpeggio played when the indicator fills.
    Celebration,
}

pub const PLACEMENT_CUES: u8 = 5;

/// One tone of a cue.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Note {
    pub frequency_hz: f64,
    /// Offset from the start of the cue.
    pub start_s: f64,
    pub duration_s: f64,
}

const fn note(frequency_hz: f64, start_s: f64, duration_s: f64) -> Note {
    Note {
        frequency_hz,
        start_s,
        duration_s,
    }
}

const PLACEMENT_NOTES: [&[Note]; PLACEMENT_CUES as usize] = [
    &[note(523.25, 0.0, 0.12)],
    &[note(659.25, 0.0, 0.08), note(783.99, 0.06, 0.1)],
    &[note(440.0, 0.0, 0.06), note(880.0, 0.05, 0.09)],
    &[note(392.0, 0.0, 0.15)],
    &[note(587.33, 0.0, 0.07), note(698.46, 0.05, 0.07), note(880.0, 0.1, 0.08)],
];

// C major arpeggio up to the octave, last note held.
const CELEBRATION_NOTES: &[Note] = &[
    note(523.25, 0.0, 0.15),
    note(659.25, 0.12, 0.15),
    note(783.99, 0.24, 0.15),
    note(1046.5, 0.36, 0.4),
];

impl Cue {
    /// Pick one of the placement cues uniformly at random.
    pub fn random_placement(rng: &mut dyn RandomSource) -> Self {
        Self::Placement(rng.index(usize::from(PLACEMENT_CUES)) as u8)
    }

    pub fn notes(self) -> &'static [Note] {
        match self {
            Self::Placement(i) => PLACEMENT_NOTES[usize::from(i % PLACEMENT_CUES)],
            Self::Celebration => CELEBRATION_NOTES,
        }
    }

    /// Total length of the cue in seconds.
    pub fn duration_s(self) -> f64 {
        self.notes()
            .iter()
            .map(|n| n.start_s + n.duration_s)
            .fold(0.0, f64::max)
    }
}

/// Fire-and-forget cue playback provided by the host.
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Sink that drops every cue (headless runs).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCueSink;

impl CueSink for NullCueSink {
    fn play(&mut self, _cue: Cue) {}
}

/// Sink that records cues in order, for tests and diagnostics.
#[derive(Clone, Debug, Default)]
pub struct RecordingCueSink {
    played: Vec<Cue>,
}

impl RecordingCueSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> &[Cue] {
        &self.played
    }
}

impl CueSink for RecordingCueSink {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/cue.rs"]
mod tests;
