//! Prefloat ("as-if-not-floating") attribute resolution.
//!
//! A Float motion has no rotation and no real motion type of its own. For
//! classification and placement it borrows them from context: the partner
//! track when that partner is a shift, otherwise the previous beat. The
//! literal Float fields are never touched.

use thiserror::Error;

use crate::models::{MotionType, PictographMotionPair, RotationDirection, Track};
use crate::services::beat_history::BeatHistory;

/// Beats to look back when reading prefloat history.
pub const PREFLOAT_HISTORY_OFFSET: usize = 1;

/// Prefloat attribute that could not be found in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAttribute {
    /// Prefloat rotation
    Rotation,
    /// Prefloat motion type
    MotionType,
}

impl std::fmt::Display for HistoryAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rotation => f.write_str("prefloat rotation"),
            Self::MotionType => f.write_str("prefloat motion type"),
        }
    }
}

/// Prefloat resolution failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrefloatError {
    /// History required for a float had no entry.
    #[error("no {attribute} recorded for {track} before beat {beat_index}")]
    MissingHistory {
        /// Beat being resolved
        beat_index: usize,
        /// Float track that needed history
        track: Track,
        /// Attribute that was missing
        attribute: HistoryAttribute,
    },
}

/// Fills prefloat attributes on Float motions.
pub struct PrefloatResolver;

impl PrefloatResolver {
    /// Resolves prefloat attributes for every Float track of a pair.
    ///
    /// Non-float pairs are returned unchanged. Tracks that already carry both
    /// prefloat attributes are kept as given.
    ///
    /// # Arguments
    ///
    /// * `pair` - Pictograph to resolve
    /// * `beat_index` - Position of the pictograph in its sequence
    /// * `history` - Prefloat attributes of earlier beats
    ///
    /// # Errors
    ///
    /// Returns [`PrefloatError::MissingHistory`] when a float depends on the
    /// previous beat and nothing was recorded there (always the case at beat 0).
    pub fn resolve(
        pair: &PictographMotionPair,
        beat_index: usize,
        history: &dyn BeatHistory,
    ) -> Result<PictographMotionPair, PrefloatError> {
        let mut resolved = pair.clone();

        for track in pair.float_tracks() {
            let motion = pair.motion(track);
            if motion.prefloat_motion_type.is_some() && motion.prefloat_rotation_direction.is_some()
            {
                continue;
            }

            let partner = pair.motion(track.other());
            let (motion_type, rotation) = match partner.motion_type {
                MotionType::Pro | MotionType::Anti => {
                    let rotation = if partner.rotation_direction == RotationDirection::NoRotation {
                        Self::history_rotation(beat_index, track, history)?.opposite()
                    } else if pair.opposite_rotation {
                        partner.rotation_direction.opposite()
                    } else {
                        partner.rotation_direction
                    };
                    (partner.motion_type, rotation)
                }
                // Dual float, or a float beside a non-shift: nothing to mirror
                MotionType::Float | MotionType::Static | MotionType::Dash => (
                    Self::history_motion_type(beat_index, track, history)?,
                    Self::history_rotation(beat_index, track, history)?,
                ),
            };

            let target = resolved.motion_mut(track);
            target.prefloat_motion_type = Some(motion_type);
            target.prefloat_rotation_direction = Some(rotation);
        }

        Ok(resolved)
    }

    /// Records the as-if attributes of a pair at its beat.
    ///
    /// Non-float motions record their literal values; floats record their
    /// resolved prefloat values and are skipped if unresolved.
    pub fn record(pair: &PictographMotionPair, beat_index: usize, history: &mut dyn BeatHistory) {
        for motion in pair.motions() {
            if motion.is_float()
                && (motion.prefloat_motion_type.is_none()
                    || motion.prefloat_rotation_direction.is_none())
            {
                continue;
            }
            history.set_prefloat_motion_type(beat_index, motion.track, motion.effective_motion_type());
            history.set_prefloat_rotation(beat_index, motion.track, motion.effective_rotation());
        }
    }

    fn history_beat(
        beat_index: usize,
        track: Track,
        attribute: HistoryAttribute,
    ) -> Result<usize, PrefloatError> {
        beat_index
            .checked_sub(PREFLOAT_HISTORY_OFFSET)
            .ok_or(PrefloatError::MissingHistory {
                beat_index,
                track,
                attribute,
            })
    }

    fn history_rotation(
        beat_index: usize,
        track: Track,
        history: &dyn BeatHistory,
    ) -> Result<RotationDirection, PrefloatError> {
        let attribute = HistoryAttribute::Rotation;
        let beat = Self::history_beat(beat_index, track, attribute)?;
        history
            .get_prefloat_rotation(beat, track)
            .ok_or(PrefloatError::MissingHistory {
                beat_index,
                track,
                attribute,
            })
    }

    fn history_motion_type(
        beat_index: usize,
        track: Track,
        history: &dyn BeatHistory,
    ) -> Result<MotionType, PrefloatError> {
        let attribute = HistoryAttribute::MotionType;
        let beat = Self::history_beat(beat_index, track, attribute)?;
        history
            .get_prefloat_motion_type(beat, track)
            .ok_or(PrefloatError::MissingHistory {
                beat_index,
                track,
                attribute,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GridLocation, MotionAttributes, TurnCount};
    use crate::services::beat_history::InMemoryBeatHistory;

    fn float(track: Track) -> MotionAttributes {
        MotionAttributes::float(track, GridLocation::N, GridLocation::E)
    }

    fn shift(track: Track, motion_type: MotionType, rotation: RotationDirection) -> MotionAttributes {
        MotionAttributes::new(
            track,
            motion_type,
            GridLocation::S,
            GridLocation::W,
            rotation,
            TurnCount::Halves(2),
        )
    }

    #[test]
    fn test_non_float_pair_is_unchanged() {
        let pair = PictographMotionPair::new(
            shift(Track::A, MotionType::Pro, RotationDirection::Clockwise),
            shift(Track::B, MotionType::Anti, RotationDirection::CounterClockwise),
        )
        .unwrap();
        let history = InMemoryBeatHistory::new();
        assert_eq!(PrefloatResolver::resolve(&pair, 0, &history).unwrap(), pair);
    }

    #[test]
    fn test_float_mirrors_shift_partner() {
        let pair = PictographMotionPair::new(
            float(Track::A),
            shift(Track::B, MotionType::Anti, RotationDirection::CounterClockwise),
        )
        .unwrap();
        let history = InMemoryBeatHistory::new();
        let resolved = PrefloatResolver::resolve(&pair, 0, &history).unwrap();

        assert_eq!(resolved.track_a.prefloat_motion_type, Some(MotionType::Anti));
        assert_eq!(
            resolved.track_a.prefloat_rotation_direction,
            Some(RotationDirection::CounterClockwise)
        );
        // Literal state untouched
        assert_eq!(resolved.track_a.rotation_direction, RotationDirection::NoRotation);
        assert_eq!(resolved.track_a.turns, TurnCount::Float);
    }

    #[test]
    fn test_opposite_rotation_tag_flips() {
        let pair = PictographMotionPair::new(
            shift(Track::A, MotionType::Pro, RotationDirection::Clockwise),
            float(Track::B),
        )
        .unwrap()
        .with_opposite_rotation(true);
        let history = InMemoryBeatHistory::new();
        let resolved = PrefloatResolver::resolve(&pair, 4, &history).unwrap();
        assert_eq!(
            resolved.track_b.prefloat_rotation_direction,
            Some(RotationDirection::CounterClockwise)
        );
    }

    #[test]
    fn test_unrotated_partner_uses_opposite_of_history() {
        let pair = PictographMotionPair::new(
            float(Track::A),
            shift(Track::B, MotionType::Pro, RotationDirection::NoRotation),
        )
        .unwrap();
        let mut history = InMemoryBeatHistory::new();
        history.set_prefloat_rotation(2, Track::A, RotationDirection::Clockwise);

        let resolved = PrefloatResolver::resolve(&pair, 3, &history).unwrap();
        assert_eq!(
            resolved.track_a.prefloat_rotation_direction,
            Some(RotationDirection::CounterClockwise)
        );
        assert_eq!(resolved.track_a.prefloat_motion_type, Some(MotionType::Pro));
    }

    #[test]
    fn test_dual_float_reads_history() {
        let pair = PictographMotionPair::new(float(Track::A), float(Track::B)).unwrap();
        let mut history = InMemoryBeatHistory::new();
        for (track, motion, rotation) in [
            (Track::A, MotionType::Pro, RotationDirection::Clockwise),
            (Track::B, MotionType::Anti, RotationDirection::Clockwise),
        ] {
            history.set_prefloat_motion_type(6, track, motion);
            history.set_prefloat_rotation(6, track, rotation);
        }

        let resolved = PrefloatResolver::resolve(&pair, 7, &history).unwrap();
        assert_eq!(resolved.track_a.prefloat_motion_type, Some(MotionType::Pro));
        assert_eq!(resolved.track_b.prefloat_motion_type, Some(MotionType::Anti));
        assert_eq!(
            resolved.track_b.prefloat_rotation_direction,
            Some(RotationDirection::Clockwise)
        );
    }

    #[test]
    fn test_missing_history_propagates() {
        let pair = PictographMotionPair::new(float(Track::A), float(Track::B)).unwrap();
        let history = InMemoryBeatHistory::new();

        let err = PrefloatResolver::resolve(&pair, 0, &history).unwrap_err();
        assert_eq!(
            err,
            PrefloatError::MissingHistory {
                beat_index: 0,
                track: Track::A,
                attribute: HistoryAttribute::MotionType,
            }
        );
        assert!(PrefloatResolver::resolve(&pair, 5, &history).is_err());
    }

    #[test]
    fn test_explicit_prefloat_is_kept() {
        let pair = PictographMotionPair::new(
            float(Track::A).with_prefloat(MotionType::Pro, RotationDirection::Clockwise),
            float(Track::B).with_prefloat(MotionType::Anti, RotationDirection::Clockwise),
        )
        .unwrap();
        let history = InMemoryBeatHistory::new();
        assert_eq!(PrefloatResolver::resolve(&pair, 0, &history).unwrap(), pair);
    }

    #[test]
    fn test_record_then_resolve_next_beat() {
        let mut history = InMemoryBeatHistory::new();
        let first = PictographMotionPair::new(
            shift(Track::A, MotionType::Pro, RotationDirection::Clockwise),
            shift(Track::B, MotionType::Anti, RotationDirection::CounterClockwise),
        )
        .unwrap();
        PrefloatResolver::record(&first, 0, &mut history);

        let second = PictographMotionPair::new(float(Track::A), float(Track::B)).unwrap();
        let resolved = PrefloatResolver::resolve(&second, 1, &history).unwrap();
        assert_eq!(resolved.track_a.prefloat_motion_type, Some(MotionType::Pro));
        assert_eq!(
            resolved.track_b.prefloat_rotation_direction,
            Some(RotationDirection::CounterClockwise)
        );

        // Unresolved floats are not recorded
        PrefloatResolver::record(&second, 1, &mut history);
        assert_eq!(history.get_prefloat_motion_type(1, Track::A), None);
    }
}
