//! Leaf-key derivation for the override table.

use crate::models::{AttributeKey, PictographMotionPair, Track};
use crate::services::encoders::generate_orientation_key;

/// Derives the attribute key of one track in a classified pictograph.
///
/// Rules are tried in priority order and the track identity is always the
/// fallback, so the function is total. A chase letter whose lead cannot be
/// established falls through to the next rule.
#[must_use]
pub fn generate_attribute_key(pair: &PictographMotionPair, track: Track) -> AttributeKey {
    let motion = pair.motion(track);
    let lead_state = pair
        .letter
        .filter(|l| l.is_lead_state_letter())
        .and_then(|_| pair.lead_state(track));

    if generate_orientation_key(pair).is_mixed() {
        if let Some(state) = lead_state {
            return AttributeKey::LeadState(state);
        }
        if pair.is_hybrid() {
            return AttributeKey::LayeredMotionType(motion.motion_type, motion.start_layer());
        }
        return AttributeKey::Track(track);
    }

    if let Some(state) = lead_state {
        return AttributeKey::TrackLeadState(track, state);
    }
    if pair.is_hybrid() {
        return AttributeKey::MotionType(motion.motion_type);
    }
    AttributeKey::Track(track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        GridLocation, LeadState, Letter, MotionAttributes, MotionType, Orientation,
        OrientationLayer, RotationDirection, TurnCount,
    };

    fn motion(
        track: Track,
        motion_type: MotionType,
        start: GridLocation,
        end: GridLocation,
    ) -> MotionAttributes {
        MotionAttributes::new(
            track,
            motion_type,
            start,
            end,
            RotationDirection::Clockwise,
            TurnCount::ZERO,
        )
    }

    fn clock(m: MotionAttributes) -> MotionAttributes {
        m.with_orientations(Orientation::NonRadialClockwise, Orientation::NonRadialClockwise)
    }

    #[test]
    fn test_standard_non_hybrid_is_track_identity() {
        let pair = PictographMotionPair::new(
            motion(Track::A, MotionType::Pro, GridLocation::N, GridLocation::E),
            motion(Track::B, MotionType::Pro, GridLocation::S, GridLocation::W),
        )
        .unwrap()
        .with_letter(Letter::A);
        assert_eq!(generate_attribute_key(&pair, Track::A), AttributeKey::Track(Track::A));
        assert_eq!(generate_attribute_key(&pair, Track::B), AttributeKey::Track(Track::B));
    }

    #[test]
    fn test_standard_hybrid_is_motion_type() {
        let pair = PictographMotionPair::new(
            motion(Track::A, MotionType::Pro, GridLocation::N, GridLocation::E),
            motion(Track::B, MotionType::Anti, GridLocation::S, GridLocation::W),
        )
        .unwrap()
        .with_letter(Letter::C);
        assert_eq!(
            generate_attribute_key(&pair, Track::B),
            AttributeKey::MotionType(MotionType::Anti)
        );
    }

    #[test]
    fn test_standard_lead_state_letter() {
        let pair = PictographMotionPair::new(
            motion(Track::A, MotionType::Pro, GridLocation::N, GridLocation::E),
            motion(Track::B, MotionType::Pro, GridLocation::E, GridLocation::S),
        )
        .unwrap()
        .with_letter(Letter::S);
        assert_eq!(
            generate_attribute_key(&pair, Track::B),
            AttributeKey::TrackLeadState(Track::B, LeadState::Leading)
        );
        assert_eq!(
            generate_attribute_key(&pair, Track::A).to_string(),
            "TrackA_trailing"
        );
    }

    #[test]
    fn test_mixed_lead_state_letter() {
        let pair = PictographMotionPair::new(
            motion(Track::A, MotionType::Pro, GridLocation::N, GridLocation::E),
            clock(motion(Track::B, MotionType::Anti, GridLocation::E, GridLocation::S)),
        )
        .unwrap()
        .with_letter(Letter::U);
        assert_eq!(
            generate_attribute_key(&pair, Track::B),
            AttributeKey::LeadState(LeadState::Leading)
        );
    }

    #[test]
    fn test_mixed_hybrid_is_layered_motion_type() {
        let pair = PictographMotionPair::new(
            motion(Track::A, MotionType::Pro, GridLocation::N, GridLocation::E),
            clock(motion(Track::B, MotionType::Static, GridLocation::S, GridLocation::S)),
        )
        .unwrap()
        .with_letter(Letter::Y);
        assert_eq!(
            generate_attribute_key(&pair, Track::A),
            AttributeKey::LayeredMotionType(MotionType::Pro, OrientationLayer::Layer1)
        );
        assert_eq!(
            generate_attribute_key(&pair, Track::B).to_string(),
            "static_from_layer2"
        );
    }

    #[test]
    fn test_mixed_non_hybrid_is_track_regardless_of_letter() {
        for letter in [Letter::A, Letter::B, Letter::G, Letter::P] {
            let pair = PictographMotionPair::new(
                motion(Track::A, MotionType::Pro, GridLocation::N, GridLocation::E),
                clock(motion(Track::B, MotionType::Pro, GridLocation::S, GridLocation::W)),
            )
            .unwrap()
            .with_letter(letter);
            assert_eq!(generate_attribute_key(&pair, Track::A), AttributeKey::Track(Track::A));
        }
    }

    #[test]
    fn test_float_pair_is_never_hybrid() {
        let pair = PictographMotionPair::new(
            MotionAttributes::float(Track::A, GridLocation::N, GridLocation::E),
            motion(Track::B, MotionType::Anti, GridLocation::S, GridLocation::W),
        )
        .unwrap()
        .with_letter(Letter::C);
        assert_eq!(generate_attribute_key(&pair, Track::A), AttributeKey::Track(Track::A));
    }
}
