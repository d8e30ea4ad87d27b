//! Exemplar dataset for letter classification.
//!
//! Each letter owns an ordered list of template pictographs. The dataset is
//! embedded in the binary and parsed once by the caller; classification scans
//! it in order, so order is significant.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{
    GridLocation, Letter, ModelError, MotionAttributes, MotionType, PictographMotionPair,
    RotationDirection, Track, TurnCount,
};

/// Schema of exemplars.json.
#[derive(Debug, Deserialize)]
struct ExemplarFile {
    #[allow(dead_code)]
    version: String,
    letters: Vec<LetterEntry>,
}

/// One letter and its compact exemplar rows.
#[derive(Debug, Deserialize)]
struct LetterEntry {
    letter: Letter,
    /// `[track A motion, track B motion]`, each `"<motion> <start> <end> <rotation>"`
    exemplars: Vec<[String; 2]>,
}

/// Immutable letter → exemplar lookup.
#[derive(Debug, Clone, Default)]
pub struct ExemplarDataset {
    /// Letters in dataset order with their exemplars
    entries: Vec<(Letter, Vec<PictographMotionPair>)>,
    /// Fast lookup by letter
    lookup: HashMap<Letter, usize>,
}

impl ExemplarDataset {
    /// Loads the dataset from the embedded JSON file.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("../data/exemplars.json");
        Self::from_json(json_data).context("Failed to parse embedded exemplars.json")
    }

    /// Parses a dataset from JSON text in the exemplars.json schema.
    pub fn from_json(json_data: &str) -> Result<Self> {
        let file: ExemplarFile = serde_json::from_str(json_data)?;

        let mut entries = Vec::with_capacity(file.letters.len());
        for entry in file.letters {
            let exemplars = entry
                .exemplars
                .iter()
                .map(|[a, b]| parse_exemplar(entry.letter, a, b))
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("Invalid exemplar for letter {}", entry.letter))?;
            entries.push((entry.letter, exemplars));
        }

        Ok(Self::from_entries(entries))
    }

    /// Builds a dataset from already-constructed exemplars, keeping their order.
    ///
    /// Repeated letters are merged into the first occurrence.
    #[must_use]
    pub fn from_entries(entries: Vec<(Letter, Vec<PictographMotionPair>)>) -> Self {
        let mut merged: Vec<(Letter, Vec<PictographMotionPair>)> = Vec::new();
        let mut lookup: HashMap<Letter, usize> = HashMap::new();

        for (letter, exemplars) in entries {
            if let Some(&idx) = lookup.get(&letter) {
                merged[idx].1.extend(exemplars);
            } else {
                lookup.insert(letter, merged.len());
                merged.push((letter, exemplars));
            }
        }

        Self {
            entries: merged,
            lookup,
        }
    }

    /// Exemplars for one letter (empty if the letter has none).
    #[must_use]
    pub fn lookup_exemplars(&self, letter: Letter) -> &[PictographMotionPair] {
        self.lookup
            .get(&letter)
            .and_then(|idx| self.entries.get(*idx))
            .map(|(_, exemplars)| exemplars.as_slice())
            .unwrap_or_default()
    }

    /// All letters with their exemplars, in dataset order.
    #[must_use]
    pub fn all_exemplars(&self) -> &[(Letter, Vec<PictographMotionPair>)] {
        &self.entries
    }

    /// Iterates `(letter, exemplar)` in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (Letter, &PictographMotionPair)> {
        self.entries
            .iter()
            .flat_map(|(letter, exemplars)| exemplars.iter().map(move |e| (*letter, e)))
    }

    /// Number of letters with exemplars.
    #[must_use]
    pub fn letter_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of exemplars.
    #[must_use]
    pub fn exemplar_count(&self) -> usize {
        self.entries.iter().map(|(_, e)| e.len()).sum()
    }
}

fn parse_exemplar(letter: Letter, a: &str, b: &str) -> Result<PictographMotionPair, ModelError> {
    let pair = PictographMotionPair::new(
        parse_motion(Track::A, a)?,
        parse_motion(Track::B, b)?,
    )?;
    Ok(pair.with_letter(letter))
}

/// Parses `"<motion> <start> <end> <rotation>"` into a zero-turn motion.
fn parse_motion(track: Track, raw: &str) -> Result<MotionAttributes, ModelError> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    let [motion, start, end, rotation] = parts.as_slice() else {
        return Err(ModelError::MalformedExemplar(raw.to_string()));
    };

    let motion_type: MotionType = motion.parse()?;
    let start_loc: GridLocation = start.parse()?;
    let end_loc: GridLocation = end.parse()?;
    let rotation: RotationDirection = rotation.parse()?;

    if motion_type == MotionType::Float {
        return Ok(MotionAttributes::float(track, start_loc, end_loc));
    }

    Ok(MotionAttributes::new(
        track,
        motion_type,
        start_loc,
        end_loc,
        rotation,
        TurnCount::ZERO,
    ))
}
