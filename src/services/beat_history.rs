//! Beat history: prefloat attributes remembered per beat and track.
//!
//! The prefloat resolver reads earlier beats through the [`BeatHistory`]
//! trait; callers own the history and pass it in explicitly.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::models::{MotionType, RotationDirection, Track};

/// Read/write access to remembered prefloat attributes.
pub trait BeatHistory {
    /// Prefloat rotation recorded for a beat and track.
    fn get_prefloat_rotation(&self, beat_index: usize, track: Track) -> Option<RotationDirection>;

    /// Prefloat motion type recorded for a beat and track.
    fn get_prefloat_motion_type(&self, beat_index: usize, track: Track) -> Option<MotionType>;

    /// Records a prefloat rotation.
    fn set_prefloat_rotation(&mut self, beat_index: usize, track: Track, rotation: RotationDirection);

    /// Records a prefloat motion type.
    fn set_prefloat_motion_type(&mut self, beat_index: usize, track: Track, motion_type: MotionType);
}

/// Attributes remembered for one track of one beat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// As-if motion type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion_type: Option<MotionType>,
    /// As-if rotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_direction: Option<RotationDirection>,
}

/// Map-backed history, serializable as `{"<beat>": {"a": {...}, "b": {...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryBeatHistory {
    beats: BTreeMap<usize, BTreeMap<Track, HistoryEntry>>,
}

impl InMemoryBeatHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a history from JSON text.
    pub fn from_json(json_data: &str) -> Result<Self> {
        serde_json::from_str(json_data).context("Failed to parse beat history JSON")
    }

    /// Loads a history from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read beat history: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid beat history file: {}", path.display()))
    }

    /// Number of beats with at least one recorded entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.beats.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    fn entry(&self, beat_index: usize, track: Track) -> Option<&HistoryEntry> {
        self.beats.get(&beat_index)?.get(&track)
    }

    fn entry_mut(&mut self, beat_index: usize, track: Track) -> &mut HistoryEntry {
        self.beats
            .entry(beat_index)
            .or_default()
            .entry(track)
            .or_default()
    }
}

impl BeatHistory for InMemoryBeatHistory {
    fn get_prefloat_rotation(&self, beat_index: usize, track: Track) -> Option<RotationDirection> {
        self.entry(beat_index, track)?.rotation_direction
    }

    fn get_prefloat_motion_type(&self, beat_index: usize, track: Track) -> Option<MotionType> {
        self.entry(beat_index, track)?.motion_type
    }

    fn set_prefloat_rotation(&mut self, beat_index: usize, track: Track, rotation: RotationDirection) {
        self.entry_mut(beat_index, track).rotation_direction = Some(rotation);
    }

    fn set_prefloat_motion_type(&mut self, beat_index: usize, track: Track, motion_type: MotionType) {
        self.entry_mut(beat_index, track).motion_type = Some(motion_type);
    }
}
