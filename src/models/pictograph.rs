//! Pictograph motion pairs and the derived grid/position facts about them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::error::ModelError;
use crate::models::letter::{Letter, LetterType};
use crate::models::motion::{
    GridLocation, LeadState, MotionAttributes, OrientationLayer, Track,
};

/// Which four compass points are the canonical hand locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// N/E/S/W
    Diamond,
    /// NE/SE/SW/NW
    Box,
}

impl GridMode {
    /// Both grid modes.
    pub const ALL: [Self; 2] = [Self::Diamond, Self::Box];

    /// Derives the grid mode from a set of locations.
    ///
    /// All diamond points give `Diamond`, all box points give `Box`; a mix is
    /// rejected.
    pub fn derive(locations: impl IntoIterator<Item = GridLocation>) -> Result<Self, ModelError> {
        let mut diamond = 0usize;
        let mut boxed = 0usize;
        for location in locations {
            if location.is_diamond_point() {
                diamond += 1;
            } else {
                boxed += 1;
            }
        }
        match (diamond, boxed) {
            (_, 0) => Ok(Self::Diamond),
            (0, _) => Ok(Self::Box),
            _ => Err(ModelError::MixedGridLocations),
        }
    }

    /// Lowercase token used in store keys and file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diamond => "diamond",
            Self::Box => "box",
        }
    }
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diamond" => Ok(Self::Diamond),
            "box" => Ok(Self::Box),
            _ => Err(ModelError::unknown("grid mode", s)),
        }
    }
}

/// Relative placement of the two hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Opposite each other
    Alpha,
    /// Same location
    Beta,
    /// 90 degrees apart
    Gamma,
}

impl Position {
    /// Classifies two hand locations.
    #[must_use]
    pub const fn between(a: GridLocation, b: GridLocation) -> Self {
        match a.clockwise_distance(b) {
            0 => Self::Beta,
            4 => Self::Alpha,
            _ => Self::Gamma,
        }
    }

    /// Lowercase token used in default-placement keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Gamma => "gamma",
        }
    }
}

/// A single beat: two concurrent motions plus its classification.
///
/// # Invariants
///
/// - `track_a.track == Track::A` and `track_b.track == Track::B`
/// - `grid_mode` is derived from the four locations
/// - both motions satisfy the Float invariant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PictographRecord", into = "PictographRecord")]
pub struct PictographMotionPair {
    /// First track's motion
    pub track_a: MotionAttributes,
    /// Second track's motion
    pub track_b: MotionAttributes,
    /// Grid mode derived from locations
    pub grid_mode: GridMode,
    /// Classified letter, if any
    pub letter: Option<Letter>,
    /// Letter type the pictograph had before the current edit
    pub letter_type: Option<LetterType>,
    /// Float rotation should be the opposite of the partner's
    pub opposite_rotation: bool,
}

impl PictographMotionPair {
    /// Builds a pair, assigning track identities and deriving the grid mode.
    pub fn new(
        mut track_a: MotionAttributes,
        mut track_b: MotionAttributes,
    ) -> Result<Self, ModelError> {
        track_a.track = Track::A;
        track_b.track = Track::B;
        track_a.validate()?;
        track_b.validate()?;
        let grid_mode = GridMode::derive([
            track_a.start_loc,
            track_a.end_loc,
            track_b.start_loc,
            track_b.end_loc,
        ])?;
        Ok(Self {
            track_a,
            track_b,
            grid_mode,
            letter: None,
            letter_type: None,
            opposite_rotation: false,
        })
    }

    /// Sets the letter and its static type.
    #[must_use]
    pub const fn with_letter(mut self, letter: Letter) -> Self {
        self.letter = Some(letter);
        self.letter_type = Some(letter.letter_type());
        self
    }

    /// Sets the opposite-rotation tag.
    #[must_use]
    pub const fn with_opposite_rotation(mut self, opposite: bool) -> Self {
        self.opposite_rotation = opposite;
        self
    }

    /// Motion on the given track.
    #[must_use]
    pub const fn motion(&self, track: Track) -> &MotionAttributes {
        match track {
            Track::A => &self.track_a,
            Track::B => &self.track_b,
        }
    }

    /// Mutable motion on the given track.
    pub fn motion_mut(&mut self, track: Track) -> &mut MotionAttributes {
        match track {
            Track::A => &mut self.track_a,
            Track::B => &mut self.track_b,
        }
    }

    /// Both motions in canonical track order.
    #[must_use]
    pub const fn motions(&self) -> [&MotionAttributes; 2] {
        [&self.track_a, &self.track_b]
    }

    /// Tracks whose literal motion is Float.
    #[must_use]
    pub fn float_tracks(&self) -> Vec<Track> {
        Track::BOTH
            .into_iter()
            .filter(|t| self.motion(*t).is_float())
            .collect()
    }

    /// Tracks differ in motion type and neither floats.
    #[must_use]
    pub fn is_hybrid(&self) -> bool {
        !self.track_a.is_float()
            && !self.track_b.is_float()
            && self.track_a.motion_type != self.track_b.motion_type
    }

    /// Hand position at the start of the beat.
    #[must_use]
    pub const fn start_position(&self) -> Position {
        Position::between(self.track_a.start_loc, self.track_b.start_loc)
    }

    /// Hand position at the end of the beat.
    #[must_use]
    pub const fn end_position(&self) -> Position {
        Position::between(self.track_a.end_loc, self.track_b.end_loc)
    }

    /// Layer tag of the end orientations: `layer1`, `layer2` or `layer3` (mixed).
    #[must_use]
    pub fn end_layer_tag(&self) -> &'static str {
        match (
            self.track_a.end_orientation.layer(),
            self.track_b.end_orientation.layer(),
        ) {
            (OrientationLayer::Layer1, OrientationLayer::Layer1) => "layer1",
            (OrientationLayer::Layer2, OrientationLayer::Layer2) => "layer2",
            _ => "layer3",
        }
    }

    /// Lead state of a track: the explicit value, else derived from the chase pattern.
    #[must_use]
    pub fn lead_state(&self, track: Track) -> Option<LeadState> {
        let motion = self.motion(track);
        if let Some(state) = motion.lead_state {
            return Some(state);
        }
        if let Some(partner_state) = self.motion(track.other()).lead_state {
            return Some(partner_state.other());
        }
        let partner = self.motion(track.other());
        if motion.start_loc == partner.end_loc && partner.start_loc != motion.end_loc {
            Some(LeadState::Leading)
        } else if partner.start_loc == motion.end_loc && motion.start_loc != partner.end_loc {
            Some(LeadState::Trailing)
        } else {
            None
        }
    }

    /// Track currently leading, if the pair forms a chase.
    #[must_use]
    pub fn leading_track(&self) -> Option<Track> {
        Track::BOTH
            .into_iter()
            .find(|t| self.lead_state(*t) == Some(LeadState::Leading))
    }

    /// Copy with unset lead states filled in from the chase pattern.
    #[must_use]
    pub fn with_derived_lead_states(mut self) -> Self {
        for track in Track::BOTH {
            if self.motion(track).lead_state.is_none() {
                let derived = self.lead_state(track);
                self.motion_mut(track).lead_state = derived;
            }
        }
        self
    }

    /// Exchanges the two motions between tracks.
    ///
    /// This is the structural mirror used for override maintenance: each
    /// motion keeps all its attributes but changes owner.
    #[must_use]
    pub fn swapped(&self) -> Self {
        let mut track_a = self.track_b.clone();
        let mut track_b = self.track_a.clone();
        track_a.track = Track::A;
        track_b.track = Track::B;
        Self {
            track_a,
            track_b,
            ..self.clone()
        }
    }
}

/// Serialized form of a pictograph; the grid mode is re-derived on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PictographRecord {
    track_a: MotionAttributes,
    track_b: MotionAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    letter: Option<Letter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    letter_type: Option<LetterType>,
    #[serde(default)]
    opposite_rotation: bool,
}

impl TryFrom<PictographRecord> for PictographMotionPair {
    type Error = ModelError;

    fn try_from(record: PictographRecord) -> Result<Self, Self::Error> {
        let mut pair = Self::new(record.track_a, record.track_b)?;
        pair.letter = record.letter;
        pair.letter_type = record
            .letter_type
            .or_else(|| record.letter.map(Letter::letter_type));
        pair.opposite_rotation = record.opposite_rotation;
        Ok(pair)
    }
}

impl From<PictographMotionPair> for PictographRecord {
    fn from(pair: PictographMotionPair) -> Self {
        Self {
            track_a: pair.track_a,
            track_b: pair.track_b,
            letter: pair.letter,
            letter_type: pair.letter_type,
            opposite_rotation: pair.opposite_rotation,
        }
    }
}
