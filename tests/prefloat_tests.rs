//! Integration tests for float resolution across a sequence of beats.

use pictograph::exemplar_db::ExemplarDataset;
use pictograph::models::{
    GridLocation, Letter, MotionAttributes, MotionType, RotationDirection, Track,
};
use pictograph::placement_db::DefaultPlacementTable;
use pictograph::services::beat_history::BeatHistory;
use pictograph::services::prefloat::HistoryAttribute;
use pictograph::services::{
    InMemoryBeatHistory, InMemoryOverrideStore, Pipeline, PipelineError, PrefloatError,
    PrefloatResolver,
};

mod fixtures;
use fixtures::*;

fn dual_float() -> pictograph::models::PictographMotionPair {
    pair(
        MotionAttributes::float(Track::A, GridLocation::N, GridLocation::E),
        MotionAttributes::float(Track::B, GridLocation::S, GridLocation::W),
    )
}

#[test]
fn test_dual_float_reads_previous_beat() {
    let mut history = InMemoryBeatHistory::new();
    PrefloatResolver::record(&pro_pair(2, 2), 0, &mut history);

    let resolved = PrefloatResolver::resolve(&dual_float(), 1, &history).unwrap();
    for track in Track::BOTH {
        let motion = resolved.motion(track);
        assert_eq!(motion.prefloat_motion_type, Some(MotionType::Pro));
        assert_eq!(
            motion.prefloat_rotation_direction,
            Some(RotationDirection::Clockwise)
        );
        // The literal motion is untouched
        assert_eq!(motion.motion_type, MotionType::Float);
    }
}

#[test]
fn test_resolved_floats_chain_through_the_sequence() {
    let dataset = ExemplarDataset::load().unwrap();
    let defaults = DefaultPlacementTable::load().unwrap();
    let store = InMemoryOverrideStore::new();
    let pipeline = Pipeline::new(&dataset, &defaults, &store);

    let mut history = InMemoryBeatHistory::new();
    let first = pipeline
        .classify_and_place(&pro_pair(2, 2), None, 0, &history)
        .unwrap();
    assert_eq!(first.letter, Letter::A);
    PrefloatResolver::record(&first.pictograph, 0, &mut history);

    let second = pipeline
        .classify_and_place(&dual_float(), None, 1, &history)
        .unwrap();
    assert_eq!(second.letter, Letter::A);
    PrefloatResolver::record(&second.pictograph, 1, &mut history);

    assert_eq!(
        history.get_prefloat_motion_type(1, Track::B),
        Some(MotionType::Pro)
    );
    let third = pipeline
        .classify_and_place(&dual_float(), None, 2, &history)
        .unwrap();
    assert_eq!(third.letter, Letter::A);
}

#[test]
fn test_float_beside_shift_without_rotation_uses_opposite_history() {
    let mut history = InMemoryBeatHistory::new();
    history.set_prefloat_rotation(3, Track::A, RotationDirection::Clockwise);

    let pictograph = pair(
        MotionAttributes::float(Track::A, GridLocation::N, GridLocation::E),
        motion(
            Track::B,
            MotionType::Pro,
            GridLocation::S,
            GridLocation::W,
            RotationDirection::NoRotation,
            0,
        ),
    );

    let resolved = PrefloatResolver::resolve(&pictograph, 4, &history).unwrap();
    assert_eq!(resolved.track_a.prefloat_motion_type, Some(MotionType::Pro));
    assert_eq!(
        resolved.track_a.prefloat_rotation_direction,
        Some(RotationDirection::CounterClockwise)
    );
}

#[test]
fn test_missing_history_is_reported() {
    let err = PrefloatResolver::resolve(&dual_float(), 5, &InMemoryBeatHistory::new()).unwrap_err();
    assert!(matches!(
        err,
        PrefloatError::MissingHistory {
            beat_index: 5,
            track: Track::A,
            attribute: HistoryAttribute::MotionType,
        }
    ));

    let dataset = ExemplarDataset::load().unwrap();
    let defaults = DefaultPlacementTable::load().unwrap();
    let store = InMemoryOverrideStore::new();
    let result = Pipeline::new(&dataset, &defaults, &store).classify_and_place(
        &dual_float(),
        None,
        0,
        &InMemoryBeatHistory::new(),
    );
    assert!(matches!(result, Err(PipelineError::Prefloat(_))));
}
