//! Classify-and-place facade.
//!
//! Motion records go in; a letter and one offset per track come out.

use serde::Serialize;
use thiserror::Error;

use crate::exemplar_db::ExemplarDataset;
use crate::models::{Letter, LetterType, Offset, PictographMotionPair, Track};
use crate::placement_db::DefaultPlacementTable;
use crate::services::beat_history::BeatHistory;
use crate::services::classifier::{ClassifyError, LetterClassifier};
use crate::services::override_store::OverrideStore;
use crate::services::placement::{PlacementError, PlacementResolver};
use crate::services::prefloat::{PrefloatError, PrefloatResolver};

/// Any failure along the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Prefloat attributes could not be resolved
    #[error(transparent)]
    Prefloat(#[from] PrefloatError),
    /// The pictograph could not be classified
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    /// An offset could not be resolved
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Offsets of both arrows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackOffsets {
    /// Track A arrow
    pub track_a: Offset,
    /// Track B arrow
    pub track_b: Offset,
}

impl TrackOffsets {
    /// Offset of one track.
    #[must_use]
    pub const fn get(&self, track: Track) -> Offset {
        match track {
            Track::A => self.track_a,
            Track::B => self.track_b,
        }
    }
}

/// Result of [`Pipeline::classify_and_place`].
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    /// Classified letter
    pub letter: Letter,
    /// The input with prefloat attributes resolved and the letter set
    pub pictograph: PictographMotionPair,
    /// Final arrow offsets
    pub offsets: TrackOffsets,
}

/// Borrowed resources for the full pipeline.
pub struct Pipeline<'a> {
    dataset: &'a ExemplarDataset,
    defaults: &'a DefaultPlacementTable,
    store: &'a dyn OverrideStore,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline.
    #[must_use]
    pub const fn new(
        dataset: &'a ExemplarDataset,
        defaults: &'a DefaultPlacementTable,
        store: &'a dyn OverrideStore,
    ) -> Self {
        Self {
            dataset,
            defaults,
            store,
        }
    }

    /// Resolves prefloat attributes, classifies, then places both arrows.
    ///
    /// # Arguments
    ///
    /// * `pair` - Pictograph as edited
    /// * `previous` - Letter type before the edit (selects the matching strategy)
    /// * `beat_index` - Position in the sequence, for history lookups
    /// * `history` - Prefloat attributes of earlier beats
    pub fn classify_and_place(
        &self,
        pair: &PictographMotionPair,
        previous: Option<LetterType>,
        beat_index: usize,
        history: &dyn BeatHistory,
    ) -> Result<PipelineOutput, PipelineError> {
        let resolved = PrefloatResolver::resolve(pair, beat_index, history)?;
        let letter = LetterClassifier::new(self.dataset).classify(&resolved, previous)?;
        let pictograph = resolved.with_letter(letter);

        let placement = PlacementResolver::new(self.defaults, self.store);
        let offsets = TrackOffsets {
            track_a: placement.resolve(&pictograph, Track::A)?,
            track_b: placement.resolve(&pictograph, Track::B)?,
        };

        Ok(PipelineOutput {
            letter,
            pictograph,
            offsets,
        })
    }
}
