//! Motion attribute data structures.
//!
//! A pictograph carries two of these, one per track. Everything here is plain
//! data: the as-if ("prefloat") fields are filled by the prefloat resolver and
//! only ever read by classification and placement.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::error::ModelError;

/// Kind of motion a track performs during one beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionType {
    /// Prop rotates with the hand path
    Pro,
    /// Prop rotates against the hand path
    Anti,
    /// Hand stays in place
    Static,
    /// Hand travels straight through the center
    Dash,
    /// Rotation deferred to context
    Float,
}

impl MotionType {
    /// All motion types in table order.
    pub const ALL: [Self; 5] = [Self::Pro, Self::Anti, Self::Static, Self::Dash, Self::Float];

    /// Returns true for motions that travel 90 degrees around the grid.
    #[must_use]
    pub const fn is_shift(self) -> bool {
        matches!(self, Self::Pro | Self::Anti | Self::Float)
    }

    /// Lowercase token used in keys and data files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pro => "pro",
            Self::Anti => "anti",
            Self::Static => "static",
            Self::Dash => "dash",
            Self::Float => "float",
        }
    }
}

impl fmt::Display for MotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MotionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::unknown("motion type", s))
    }
}

/// Prop rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    /// Clockwise
    #[serde(rename = "cw")]
    Clockwise,
    /// Counter-clockwise
    #[serde(rename = "ccw")]
    CounterClockwise,
    /// No rotation (zero-turn static/dash, float)
    #[serde(rename = "no_rot")]
    NoRotation,
}

impl RotationDirection {
    /// Reverses a rotation. `NoRotation` stays put.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
            Self::NoRotation => Self::NoRotation,
        }
    }

    /// Short token used in data files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clockwise => "cw",
            Self::CounterClockwise => "ccw",
            Self::NoRotation => "no_rot",
        }
    }
}

impl fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationDirection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cw" | "clockwise" => Ok(Self::Clockwise),
            "ccw" | "counter_clockwise" | "counterclockwise" => Ok(Self::CounterClockwise),
            "no_rot" | "none" => Ok(Self::NoRotation),
            _ => Err(ModelError::unknown("rotation direction", s)),
        }
    }
}

/// Orientation layer of a prop: radial (layer 1) or nonradial (layer 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrientationLayer {
    /// In/out orientations
    Layer1,
    /// Clock/counter orientations
    Layer2,
}

impl OrientationLayer {
    /// Layer number as written in keys ("layer1", "from_layer2", ...).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Layer1 => 1,
            Self::Layer2 => 2,
        }
    }
}

/// Prop orientation at the start or end of a motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Orientation {
    /// Radial, pointing in
    #[default]
    #[serde(rename = "in")]
    RadialIn,
    /// Radial, pointing out
    #[serde(rename = "out")]
    RadialOut,
    /// Nonradial, clockwise
    #[serde(rename = "clock")]
    NonRadialClockwise,
    /// Nonradial, counter-clockwise
    #[serde(rename = "counter")]
    NonRadialCounterClockwise,
}

impl Orientation {
    /// Which layer this orientation belongs to.
    #[must_use]
    pub const fn layer(self) -> OrientationLayer {
        match self {
            Self::RadialIn | Self::RadialOut => OrientationLayer::Layer1,
            Self::NonRadialClockwise | Self::NonRadialCounterClockwise => OrientationLayer::Layer2,
        }
    }
}

impl FromStr for Orientation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" => Ok(Self::RadialIn),
            "out" => Ok(Self::RadialOut),
            "clock" => Ok(Self::NonRadialClockwise),
            "counter" => Ok(Self::NonRadialCounterClockwise),
            _ => Err(ModelError::unknown("orientation", s)),
        }
    }
}

/// One of the eight compass points of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridLocation {
    /// North
    N,
    /// North-east
    NE,
    /// East
    E,
    /// South-east
    SE,
    /// South
    S,
    /// South-west
    SW,
    /// West
    W,
    /// North-west
    NW,
}

impl GridLocation {
    /// All locations, clockwise from north.
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Clockwise index from north (0..8).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Location at a clockwise index, wrapping.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 8]
    }

    /// Returns true for N/E/S/W.
    #[must_use]
    pub const fn is_diamond_point(self) -> bool {
        self.index() % 2 == 0
    }

    /// Steps clockwise by `eighths` compass points (negative steps go counter-clockwise).
    #[must_use]
    pub const fn rotated(self, eighths: i32) -> Self {
        Self::from_index((self.index() as i32 + eighths).rem_euclid(8) as usize)
    }

    /// The diametrically opposite location.
    #[must_use]
    pub const fn opposite(self) -> Self {
        self.rotated(4)
    }

    /// Clockwise distance to `other` in eighths (0..8).
    #[must_use]
    pub const fn clockwise_distance(self, other: Self) -> usize {
        (other.index() + 8 - self.index()) % 8
    }

    /// The location halfway between two points 90 degrees apart.
    ///
    /// Returns `None` for any other pair.
    #[must_use]
    pub const fn midpoint(self, other: Self) -> Option<Self> {
        match self.clockwise_distance(other) {
            2 => Some(self.rotated(1)),
            6 => Some(self.rotated(-1)),
            _ => None,
        }
    }

    /// Lowercase token used in data files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::NE => "ne",
            Self::E => "e",
            Self::SE => "se",
            Self::S => "s",
            Self::SW => "sw",
            Self::W => "w",
            Self::NW => "nw",
        }
    }
}

impl fmt::Display for GridLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridLocation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|loc| loc.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::unknown("location", s))
    }
}

/// Quantized turn count (0-3 in half steps) or the Float sentinel.
///
/// Stored as half-turn steps so equality and hashing are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTurns", into = "RawTurns")]
pub enum TurnCount {
    /// Number of half turns (0..=6)
    Halves(u8),
    /// Not yet assigned
    Float,
}

impl TurnCount {
    /// Zero turns.
    pub const ZERO: Self = Self::Halves(0);

    /// Highest representable turn count in half steps.
    pub const MAX_HALVES: u8 = 6;

    /// Builds a turn count from a numeric value.
    pub fn from_f64(value: f64) -> Result<Self, ModelError> {
        let halves = value * 2.0;
        if !(0.0..=f64::from(Self::MAX_HALVES)).contains(&halves) || halves.fract() != 0.0 {
            return Err(ModelError::InvalidTurns(value.to_string()));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self::Halves(halves as u8))
    }

    /// Numeric value, or `None` for Float.
    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::Halves(h) => Some(f64::from(h) / 2.0),
            Self::Float => None,
        }
    }

    /// Returns true for the Float sentinel.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float)
    }
}

/// Renders "fl" for Float, whole numbers without a fractional part ("1"),
/// half steps with one decimal ("1.5").
impl fmt::Display for TurnCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float => f.write_str("fl"),
            Self::Halves(h) if h % 2 == 0 => write!(f, "{}", h / 2),
            Self::Halves(h) => write!(f, "{}.5", h / 2),
        }
    }
}

impl FromStr for TurnCount {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("fl") || s.eq_ignore_ascii_case("float") {
            return Ok(Self::Float);
        }
        let value: f64 = s
            .parse()
            .map_err(|_| ModelError::InvalidTurns(s.to_string()))?;
        Self::from_f64(value)
    }
}

/// Wire form of a turn count: a JSON number or the string "fl".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawTurns {
    Number(f64),
    Text(String),
}

impl TryFrom<RawTurns> for TurnCount {
    type Error = ModelError;

    fn try_from(raw: RawTurns) -> Result<Self, Self::Error> {
        match raw {
            RawTurns::Number(n) => Self::from_f64(n),
            RawTurns::Text(s) => s.parse(),
        }
    }
}

impl From<TurnCount> for RawTurns {
    fn from(turns: TurnCount) -> Self {
        match turns.as_f64() {
            Some(n) => Self::Number(n),
            None => Self::Text("fl".to_string()),
        }
    }
}

/// One of the two independent tracks of a pictograph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Track {
    /// First track (canonical first position in keys)
    #[default]
    #[serde(rename = "a", alias = "TrackA")]
    A,
    /// Second track
    #[serde(rename = "b", alias = "TrackB")]
    B,
}

impl Track {
    /// Both tracks in canonical order.
    pub const BOTH: [Self; 2] = [Self::A, Self::B];

    /// The partner track.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Identity token used as an attribute key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "TrackA",
            Self::B => "TrackB",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Track {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "tracka" => Ok(Self::A),
            "b" | "trackb" => Ok(Self::B),
            _ => Err(ModelError::unknown("track", s)),
        }
    }
}

/// Whether a motion leads or trails its partner in a chase pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadState {
    /// Ahead of the partner
    Leading,
    /// Following into the partner's previous location
    Trailing,
}

impl LeadState {
    /// Lowercase token used in keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leading => "leading",
            Self::Trailing => "trailing",
        }
    }

    /// The complementary state.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Leading => Self::Trailing,
            Self::Trailing => Self::Leading,
        }
    }
}

impl fmt::Display for LeadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything known about one track's motion in a single beat.
///
/// # Invariants
///
/// - `motion_type == Float` implies `turns == Float` and `rotation_direction == NoRotation`
/// - `prefloat_*` are classification/placement inputs only, never rendering state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionAttributes {
    /// Owning track (pictograph records set this from the slot)
    #[serde(default)]
    pub track: Track,
    /// Literal motion type
    pub motion_type: MotionType,
    /// Start location
    pub start_loc: GridLocation,
    /// End location
    pub end_loc: GridLocation,
    /// Literal prop rotation
    pub rotation_direction: RotationDirection,
    /// Turn count
    pub turns: TurnCount,
    /// Prop orientation at the start of the beat
    #[serde(default)]
    pub start_orientation: Orientation,
    /// Prop orientation at the end of the beat
    #[serde(default)]
    pub end_orientation: Orientation,
    /// As-if-not-floating motion type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefloat_motion_type: Option<MotionType>,
    /// As-if-not-floating rotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefloat_rotation_direction: Option<RotationDirection>,
    /// Lead/trail role for chase letters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_state: Option<LeadState>,
}

impl MotionAttributes {
    /// Creates a motion with radial-in orientations and no as-if attributes.
    #[must_use]
    pub const fn new(
        track: Track,
        motion_type: MotionType,
        start_loc: GridLocation,
        end_loc: GridLocation,
        rotation_direction: RotationDirection,
        turns: TurnCount,
    ) -> Self {
        Self {
            track,
            motion_type,
            start_loc,
            end_loc,
            rotation_direction,
            turns,
            start_orientation: Orientation::RadialIn,
            end_orientation: Orientation::RadialIn,
            prefloat_motion_type: None,
            prefloat_rotation_direction: None,
            lead_state: None,
        }
    }

    /// Creates a Float motion, which by definition has no rotation and Float turns.
    #[must_use]
    pub const fn float(track: Track, start_loc: GridLocation, end_loc: GridLocation) -> Self {
        Self::new(
            track,
            MotionType::Float,
            start_loc,
            end_loc,
            RotationDirection::NoRotation,
            TurnCount::Float,
        )
    }

    /// Sets start and end orientations.
    #[must_use]
    pub const fn with_orientations(mut self, start: Orientation, end: Orientation) -> Self {
        self.start_orientation = start;
        self.end_orientation = end;
        self
    }

    /// Sets the as-if-not-floating attributes.
    #[must_use]
    pub const fn with_prefloat(
        mut self,
        motion_type: MotionType,
        rotation: RotationDirection,
    ) -> Self {
        self.prefloat_motion_type = Some(motion_type);
        self.prefloat_rotation_direction = Some(rotation);
        self
    }

    /// Sets the lead state.
    #[must_use]
    pub const fn with_lead_state(mut self, lead_state: LeadState) -> Self {
        self.lead_state = Some(lead_state);
        self
    }

    /// Checks the Float invariant.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.motion_type == MotionType::Float
            && (!self.turns.is_float() || self.rotation_direction != RotationDirection::NoRotation)
        {
            return Err(ModelError::FloatInvariant {
                track: self.track,
                turns: self.turns.to_string(),
                rotation: self.rotation_direction.to_string(),
            });
        }
        Ok(())
    }

    /// Returns true if the literal motion is Float.
    #[must_use]
    pub fn is_float(&self) -> bool {
        self.motion_type == MotionType::Float
    }

    /// Motion type used for placement: the prefloat type for floats when known.
    #[must_use]
    pub fn effective_motion_type(&self) -> MotionType {
        match (self.motion_type, self.prefloat_motion_type) {
            (MotionType::Float, Some(prefloat)) => prefloat,
            (literal, _) => literal,
        }
    }

    /// Rotation used for placement: the prefloat rotation for floats when known.
    #[must_use]
    pub fn effective_rotation(&self) -> RotationDirection {
        match (self.motion_type, self.prefloat_rotation_direction) {
            (MotionType::Float, Some(prefloat)) => prefloat,
            (_, _) => self.rotation_direction,
        }
    }

    /// Layer of the start orientation.
    #[must_use]
    pub const fn start_layer(&self) -> OrientationLayer {
        self.start_orientation.layer()
    }

    /// Where the arrow glyph sits on the grid.
    ///
    /// Shift arrows sit between their start and end points; everything else
    /// sits on its end point.
    #[must_use]
    pub fn arrow_location(&self) -> GridLocation {
        if self.motion_type.is_shift() {
            if let Some(mid) = self.start_loc.midpoint(self.end_loc) {
                return mid;
            }
        }
        self.end_loc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_count_display() {
        assert_eq!(TurnCount::ZERO.to_string(), "0");
        assert_eq!(TurnCount::from_f64(1.0).unwrap().to_string(), "1");
        assert_eq!(TurnCount::from_f64(0.5).unwrap().to_string(), "0.5");
        assert_eq!(TurnCount::from_f64(2.5).unwrap().to_string(), "2.5");
        assert_eq!(TurnCount::Float.to_string(), "fl");
    }

    #[test]
    fn test_turn_count_rejects_out_of_range() {
        assert!(TurnCount::from_f64(-0.5).is_err());
        assert!(TurnCount::from_f64(3.5).is_err());
        assert!(TurnCount::from_f64(1.25).is_err());
        assert!("abc".parse::<TurnCount>().is_err());
        assert_eq!("fl".parse::<TurnCount>().unwrap(), TurnCount::Float);
        assert_eq!("3".parse::<TurnCount>().unwrap(), TurnCount::Halves(6));
    }

    #[test]
    fn test_turn_count_serde() {
        let turns: TurnCount = serde_json::from_str("1.5").unwrap();
        assert_eq!(turns, TurnCount::Halves(3));
        let float: TurnCount = serde_json::from_str("\"fl\"").unwrap();
        assert_eq!(float, TurnCount::Float);
        assert_eq!(serde_json::to_string(&TurnCount::Float).unwrap(), "\"fl\"");
        assert!(serde_json::from_str::<TurnCount>("4").is_err());
    }

    #[test]
    fn test_location_midpoint() {
        assert_eq!(GridLocation::N.midpoint(GridLocation::E), Some(GridLocation::NE));
        assert_eq!(GridLocation::N.midpoint(GridLocation::W), Some(GridLocation::NW));
        assert_eq!(GridLocation::SW.midpoint(GridLocation::NW), Some(GridLocation::W));
        assert_eq!(GridLocation::N.midpoint(GridLocation::S), None);
        assert_eq!(GridLocation::N.midpoint(GridLocation::N), None);
    }

    #[test]
    fn test_location_rotation() {
        assert_eq!(GridLocation::N.rotated(-1), GridLocation::NW);
        assert_eq!(GridLocation::NW.rotated(1), GridLocation::N);
        assert_eq!(GridLocation::E.opposite(), GridLocation::W);
        assert!(GridLocation::S.is_diamond_point());
        assert!(!GridLocation::SE.is_diamond_point());
    }

    #[test]
    fn test_float_invariant() {
        let float = MotionAttributes::float(Track::A, GridLocation::N, GridLocation::E);
        assert!(float.validate().is_ok());

        let mut broken = float.clone();
        broken.rotation_direction = RotationDirection::Clockwise;
        assert!(matches!(
            broken.validate(),
            Err(ModelError::FloatInvariant { track: Track::A, .. })
        ));
    }

    #[test]
    fn test_effective_attributes_only_apply_to_floats() {
        let float = MotionAttributes::float(Track::A, GridLocation::N, GridLocation::E)
            .with_prefloat(MotionType::Anti, RotationDirection::CounterClockwise);
        assert_eq!(float.effective_motion_type(), MotionType::Anti);
        assert_eq!(float.effective_rotation(), RotationDirection::CounterClockwise);

        let pro = MotionAttributes::new(
            Track::B,
            MotionType::Pro,
            GridLocation::N,
            GridLocation::E,
            RotationDirection::Clockwise,
            TurnCount::ZERO,
        )
        .with_prefloat(MotionType::Anti, RotationDirection::CounterClockwise);
        assert_eq!(pro.effective_motion_type(), MotionType::Pro);
        assert_eq!(pro.effective_rotation(), RotationDirection::Clockwise);
    }

    #[test]
    fn test_arrow_location() {
        let pro = MotionAttributes::new(
            Track::A,
            MotionType::Pro,
            GridLocation::S,
            GridLocation::W,
            RotationDirection::Clockwise,
            TurnCount::ZERO,
        );
        assert_eq!(pro.arrow_location(), GridLocation::SW);

        let dash = MotionAttributes::new(
            Track::A,
            MotionType::Dash,
            GridLocation::N,
            GridLocation::S,
            RotationDirection::NoRotation,
            TurnCount::ZERO,
        );
        assert_eq!(dash.arrow_location(), GridLocation::S);
    }
}
