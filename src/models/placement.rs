//! Placement offsets and the keys that address override entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use crate::models::letter::Letter;
use crate::models::motion::{LeadState, MotionType, OrientationLayer, Track, TurnCount};
use crate::models::pictograph::GridMode;

/// Visual offset of an arrow glyph, stored as a `[dx, dy]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Offset {
    /// Horizontal offset
    pub dx: f64,
    /// Vertical offset
    pub dy: f64,
}

impl Offset {
    /// No offset.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates an offset.
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl Add for Offset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl From<[f64; 2]> for Offset {
    fn from([dx, dy]: [f64; 2]) -> Self {
        Self::new(dx, dy)
    }
}

impl From<Offset> for [f64; 2] {
    fn from(offset: Offset) -> Self {
        [offset.dx, offset.dy]
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

/// Orientation bucket of an override entry.
///
/// The two mixed keys are distinct and never interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrientationKey {
    /// Both tracks start radial
    #[serde(rename = "from_layer1")]
    FromLayer1,
    /// Both tracks start nonradial
    #[serde(rename = "from_layer2")]
    FromLayer2,
    /// Track A radial, track B nonradial
    #[serde(rename = "from_layer3_a1_b2")]
    FromLayer3AOn1,
    /// Track A nonradial, track B radial
    #[serde(rename = "from_layer3_a2_b1")]
    FromLayer3AOn2,
}

impl OrientationKey {
    /// All keys.
    pub const ALL: [Self; 4] = [
        Self::FromLayer1,
        Self::FromLayer2,
        Self::FromLayer3AOn1,
        Self::FromLayer3AOn2,
    ];

    /// Returns true for the two mixed (layer 3) keys.
    #[must_use]
    pub const fn is_mixed(self) -> bool {
        matches!(self, Self::FromLayer3AOn1 | Self::FromLayer3AOn2)
    }

    /// Key string used in stores.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FromLayer1 => "from_layer1",
            Self::FromLayer2 => "from_layer2",
            Self::FromLayer3AOn1 => "from_layer3_a1_b2",
            Self::FromLayer3AOn2 => "from_layer3_a2_b1",
        }
    }
}

impl fmt::Display for OrientationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical turns key of a pictograph, e.g. `"1_0.5"` or `"fl_2"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnsTuple(String);

impl TurnsTuple {
    /// Joins two turn counts in the given order.
    #[must_use]
    pub fn new(first: TurnCount, second: TurnCount) -> Self {
        Self(format!("{first}_{second}"))
    }

    /// Key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TurnsTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Leaf axis of the override table for one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    /// `"TrackA"` / `"TrackB"`
    Track(Track),
    /// `"leading"` / `"trailing"` (mixed orientation chase letters)
    LeadState(LeadState),
    /// `"TrackA_leading"` (standard orientation chase letters)
    TrackLeadState(Track, LeadState),
    /// `"pro"` (hybrid motions)
    MotionType(MotionType),
    /// `"pro_from_layer1"` (hybrid motions in mixed orientation)
    LayeredMotionType(MotionType, OrientationLayer),
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Track(track) => write!(f, "{track}"),
            Self::LeadState(state) => write!(f, "{state}"),
            Self::TrackLeadState(track, state) => write!(f, "{track}_{state}"),
            Self::MotionType(motion) => write!(f, "{motion}"),
            Self::LayeredMotionType(motion, layer) => {
                write!(f, "{motion}_from_layer{}", layer.number())
            }
        }
    }
}

/// Full address of one override entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacementKeys {
    /// Grid mode (file/top-level bucket)
    pub grid_mode: GridMode,
    /// Orientation bucket
    pub orientation_key: OrientationKey,
    /// Classified letter
    pub letter: Letter,
    /// Turns key
    pub turns_tuple: TurnsTuple,
    /// Leaf key
    pub attribute_key: AttributeKey,
}

impl PlacementKeys {
    /// The (grid mode, orientation key) pair identifying the bucket.
    #[must_use]
    pub const fn bucket(&self) -> (GridMode, OrientationKey) {
        (self.grid_mode, self.orientation_key)
    }
}

impl fmt::Display for PlacementKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.grid_mode, self.orientation_key, self.letter, self.turns_tuple, self.attribute_key
        )
    }
}
