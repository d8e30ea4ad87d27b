//! Canonical lookup-key encoders for a motion pair.
//!
//! Both encoders are pure and total over well-typed pairs.

use crate::models::{OrientationKey, OrientationLayer, PictographMotionPair, TurnsTuple};

/// Encodes the turns key of a pair.
///
/// Chase letters use `"{lead}_{trail}"` when the lead can be established;
/// everything else uses `"{trackA}_{trackB}"`. Float renders as `"fl"` and
/// whole numbers drop their fractional part.
///
/// # Examples
///
/// ```
/// use pictograph::models::{
///     GridLocation, MotionAttributes, MotionType, PictographMotionPair, RotationDirection,
///     Track, TurnCount,
/// };
/// use pictograph::services::encoders::encode_turns_tuple;
///
/// let a = MotionAttributes::new(Track::A, MotionType::Pro, GridLocation::N, GridLocation::E,
///     RotationDirection::Clockwise, TurnCount::Halves(2));
/// let b = MotionAttributes::float(Track::B, GridLocation::S, GridLocation::W);
/// let pair = PictographMotionPair::new(a, b).unwrap();
/// assert_eq!(encode_turns_tuple(&pair).as_str(), "1_fl");
/// ```
#[must_use]
pub fn encode_turns_tuple(pair: &PictographMotionPair) -> TurnsTuple {
    if pair.letter.is_some_and(|l| l.is_lead_state_letter()) {
        if let Some(lead) = pair.leading_track() {
            return TurnsTuple::new(pair.motion(lead).turns, pair.motion(lead.other()).turns);
        }
    }
    TurnsTuple::new(pair.track_a.turns, pair.track_b.turns)
}

/// Buckets a pair by the layers of its start orientations.
///
/// Same layer gives `FromLayer1`/`FromLayer2`; a mix gives the Layer 3 key
/// tagged by which track is radial.
#[must_use]
pub fn generate_orientation_key(pair: &PictographMotionPair) -> OrientationKey {
    match (pair.track_a.start_layer(), pair.track_b.start_layer()) {
        (OrientationLayer::Layer1, OrientationLayer::Layer1) => OrientationKey::FromLayer1,
        (OrientationLayer::Layer2, OrientationLayer::Layer2) => OrientationKey::FromLayer2,
        (OrientationLayer::Layer1, OrientationLayer::Layer2) => OrientationKey::FromLayer3AOn1,
        (OrientationLayer::Layer2, OrientationLayer::Layer1) => OrientationKey::FromLayer3AOn2,
    }
}
