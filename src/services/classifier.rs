//! Exemplar-based letter classification.
//!
//! A pair is matched against the exemplar dataset in order and the first
//! matching exemplar names the letter. Pairs with a Float track take the
//! float path, which compares against both literal and prefloat attributes.
//! All other pairs are matched with a strategy picked from the letter type
//! the pictograph had *before* the edit being classified, so a pictograph
//! keeps its matching rules while its attributes migrate.

use thiserror::Error;

use crate::exemplar_db::ExemplarDataset;
use crate::models::{Letter, LetterType, MotionAttributes, PictographMotionPair};

/// Classification failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// No exemplar matched; the pictograph stays unclassified.
    #[error("no exemplar matches the pictograph ({strategy} matching)")]
    NoMatchingExemplar {
        /// Strategy that was exhausted
        strategy: MatchStrategy,
    },
}

/// Dispatch path chosen from the pair's Float tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationPath {
    /// Both tracks float
    DualFloat,
    /// Exactly one track floats
    SingleFloat,
    /// No float
    Standard,
}

impl ClassificationPath {
    /// Picks the path for a pair.
    #[must_use]
    pub fn of(pair: &PictographMotionPair) -> Self {
        match pair.float_tracks().len() {
            2 => Self::DualFloat,
            1 => Self::SingleFloat,
            _ => Self::Standard,
        }
    }
}

/// Matching rules of the standard path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Both tracks by start, end and rotation
    DualShift,
    /// Shift track by start, end and rotation; other track by start, end and motion type
    ShiftWithNonShift,
    /// Keep the current letter; only unlettered pairs are matched
    Retained,
    /// Both tracks by start, end and motion type
    DualNonShift,
    /// Float path: literal or prefloat attributes on both tracks
    Float,
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::DualShift => "dual-shift",
            Self::ShiftWithNonShift => "shift/non-shift",
            Self::Retained => "retained",
            Self::DualNonShift => "dual non-shift",
            Self::Float => "float",
        };
        f.write_str(name)
    }
}

/// Compares a pair against one exemplar.
type Matcher = fn(&PictographMotionPair, &PictographMotionPair) -> bool;

/// Standard-path strategy per letter type, indexed by [`LetterType::index`].
const STRATEGY_TABLE: [MatchStrategy; 6] = [
    MatchStrategy::DualShift,
    MatchStrategy::ShiftWithNonShift,
    MatchStrategy::ShiftWithNonShift,
    MatchStrategy::Retained,
    MatchStrategy::Retained,
    MatchStrategy::Retained,
];

impl MatchStrategy {
    /// Strategy for a previous letter type.
    #[must_use]
    pub const fn for_letter_type(letter_type: LetterType) -> Self {
        STRATEGY_TABLE[letter_type.index()]
    }

    /// Strategy for a pictograph with no previous letter type, from its motion types.
    #[must_use]
    pub fn infer(pair: &PictographMotionPair) -> Self {
        match (
            pair.track_a.motion_type.is_shift(),
            pair.track_b.motion_type.is_shift(),
        ) {
            (true, true) => Self::DualShift,
            (false, false) => Self::DualNonShift,
            _ => Self::ShiftWithNonShift,
        }
    }

    const fn matcher(self) -> Option<Matcher> {
        match self {
            Self::DualShift => Some(match_dual_shift),
            Self::ShiftWithNonShift => Some(match_shift_with_non_shift),
            Self::DualNonShift => Some(match_dual_non_shift),
            Self::Float => Some(match_float),
            Self::Retained => None,
        }
    }
}

/// Classifies pairs against a borrowed exemplar dataset.
pub struct LetterClassifier<'a> {
    dataset: &'a ExemplarDataset,
}

impl<'a> LetterClassifier<'a> {
    /// Creates a classifier over a dataset.
    #[must_use]
    pub const fn new(dataset: &'a ExemplarDataset) -> Self {
        Self { dataset }
    }

    /// Classifies a pair whose prefloat attributes are already resolved.
    ///
    /// # Arguments
    ///
    /// * `pair` - Pictograph to classify
    /// * `previous` - Letter type the pictograph had before the current edit
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::NoMatchingExemplar`] when the scan is exhausted.
    pub fn classify(
        &self,
        pair: &PictographMotionPair,
        previous: Option<LetterType>,
    ) -> Result<Letter, ClassifyError> {
        let strategy = match ClassificationPath::of(pair) {
            ClassificationPath::DualFloat | ClassificationPath::SingleFloat => MatchStrategy::Float,
            ClassificationPath::Standard => {
                previous.map_or_else(|| MatchStrategy::infer(pair), MatchStrategy::for_letter_type)
            }
        };

        let matcher = match (strategy.matcher(), pair.letter) {
            (Some(matcher), _) => matcher,
            (None, Some(letter)) => return Ok(letter),
            (None, None) => match_dual_non_shift,
        };

        self.scan(pair, matcher)
            .ok_or(ClassifyError::NoMatchingExemplar { strategy })
    }

    fn scan(&self, pair: &PictographMotionPair, matcher: Matcher) -> Option<Letter> {
        self.dataset
            .iter()
            .find(|(_, exemplar)| matcher(pair, exemplar))
            .map(|(letter, _)| letter)
    }
}

fn same_locations(motion: &MotionAttributes, exemplar: &MotionAttributes) -> bool {
    motion.start_loc == exemplar.start_loc && motion.end_loc == exemplar.end_loc
}

fn rotation_matches(motion: &MotionAttributes, exemplar: &MotionAttributes) -> bool {
    motion.rotation_direction == exemplar.rotation_direction
        || motion.prefloat_rotation_direction == Some(exemplar.rotation_direction)
}

fn motion_type_matches(motion: &MotionAttributes, exemplar: &MotionAttributes) -> bool {
    motion.motion_type == exemplar.motion_type
        || motion.prefloat_motion_type == Some(exemplar.motion_type)
}

fn match_shift(motion: &MotionAttributes, exemplar: &MotionAttributes) -> bool {
    same_locations(motion, exemplar) && rotation_matches(motion, exemplar)
}

fn match_non_shift(motion: &MotionAttributes, exemplar: &MotionAttributes) -> bool {
    same_locations(motion, exemplar) && motion.motion_type == exemplar.motion_type
}

fn match_dual_shift(pair: &PictographMotionPair, exemplar: &PictographMotionPair) -> bool {
    match_shift(&pair.track_a, &exemplar.track_a) && match_shift(&pair.track_b, &exemplar.track_b)
}

fn match_shift_with_non_shift(pair: &PictographMotionPair, exemplar: &PictographMotionPair) -> bool {
    let Some(shift_track) = pair
        .motions()
        .into_iter()
        .find(|m| m.motion_type.is_shift())
        .map(|m| m.track)
    else {
        return false;
    };
    let other = shift_track.other();
    match_shift(pair.motion(shift_track), exemplar.motion(shift_track))
        && match_non_shift(pair.motion(other), exemplar.motion(other))
}

fn match_dual_non_shift(pair: &PictographMotionPair, exemplar: &PictographMotionPair) -> bool {
    match_non_shift(&pair.track_a, &exemplar.track_a)
        && match_non_shift(&pair.track_b, &exemplar.track_b)
}

fn match_float(pair: &PictographMotionPair, exemplar: &PictographMotionPair) -> bool {
    pair.motions()
        .into_iter()
        .zip(exemplar.motions())
        .all(|(motion, ex)| {
            same_locations(motion, ex)
                && rotation_matches(motion, ex)
                && motion_type_matches(motion, ex)
        })
}
