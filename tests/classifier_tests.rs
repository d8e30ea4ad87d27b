//! Integration tests for letter classification.

use pictograph::exemplar_db::ExemplarDataset;
use pictograph::models::{
    GridLocation, Letter, LetterType, MotionAttributes, MotionType, RotationDirection, Track,
};
use pictograph::services::{
    ClassifyError, InMemoryBeatHistory, LetterClassifier, MatchStrategy, PrefloatResolver,
};

mod fixtures;
use fixtures::*;

/// Dataset holding a single X exemplar: Pro N→E CW with Anti N→W CCW.
fn x_dataset() -> ExemplarDataset {
    let exemplar = pair(
        motion(
            Track::A,
            MotionType::Pro,
            GridLocation::N,
            GridLocation::E,
            RotationDirection::Clockwise,
            0,
        ),
        motion(
            Track::B,
            MotionType::Anti,
            GridLocation::N,
            GridLocation::W,
            RotationDirection::CounterClockwise,
            0,
        ),
    )
    .with_letter(Letter::X);
    ExemplarDataset::from_entries(vec![(Letter::X, vec![exemplar])])
}

fn anti_north_west() -> MotionAttributes {
    motion(
        Track::B,
        MotionType::Anti,
        GridLocation::N,
        GridLocation::W,
        RotationDirection::CounterClockwise,
        2,
    )
}

#[test]
fn test_every_exemplar_classifies_as_its_letter() {
    let dataset = ExemplarDataset::load().unwrap();
    let classifier = LetterClassifier::new(&dataset);

    for (letter, exemplar) in dataset.iter() {
        let result = classifier.classify(exemplar, Some(letter.letter_type()));
        assert_eq!(
            result.unwrap(),
            letter,
            "exemplar {:?} misclassified",
            exemplar
        );
    }
}

#[test]
fn test_dual_shift_pair_matches_exemplar() {
    let dataset = x_dataset();
    let pictograph = pair(
        motion(
            Track::A,
            MotionType::Pro,
            GridLocation::N,
            GridLocation::E,
            RotationDirection::Clockwise,
            2,
        ),
        anti_north_west(),
    );

    let letter = LetterClassifier::new(&dataset)
        .classify(&pictograph, None)
        .unwrap();
    assert_eq!(letter, Letter::X);
}

#[test]
fn test_float_with_prefloat_matches_like_its_shift() {
    let dataset = x_dataset();
    let pictograph = pair(
        MotionAttributes::float(Track::A, GridLocation::N, GridLocation::E)
            .with_prefloat(MotionType::Pro, RotationDirection::Clockwise),
        anti_north_west(),
    );

    // Explicit prefloat values survive resolution
    let resolved = PrefloatResolver::resolve(&pictograph, 0, &InMemoryBeatHistory::new()).unwrap();
    assert_eq!(
        resolved.track_a.prefloat_motion_type,
        Some(MotionType::Pro)
    );

    let letter = LetterClassifier::new(&dataset)
        .classify(&resolved, Some(LetterType::Type6))
        .unwrap();
    assert_eq!(letter, Letter::X);
}

fn static_pair() -> pictograph::models::PictographMotionPair {
    pair(
        motion(
            Track::A,
            MotionType::Static,
            GridLocation::N,
            GridLocation::N,
            RotationDirection::NoRotation,
            0,
        ),
        motion(
            Track::B,
            MotionType::Static,
            GridLocation::S,
            GridLocation::S,
            RotationDirection::NoRotation,
            0,
        ),
    )
}

#[test]
fn test_previous_type_selects_strategy() {
    let dataset = ExemplarDataset::load().unwrap();
    let classifier = LetterClassifier::new(&dataset);

    // The same pair is re-examined with the dual-shift matcher or kept as is
    let edited = pro_pair(0, 0).with_letter(Letter::Phi);
    assert_eq!(
        classifier
            .classify(&edited, Some(LetterType::Type1))
            .unwrap(),
        Letter::A
    );
    assert_eq!(
        classifier
            .classify(&edited, Some(LetterType::Type4))
            .unwrap(),
        Letter::Phi
    );
}

#[test]
fn test_unlettered_retained_pair_falls_back_to_dual_non_shift() {
    let dataset = ExemplarDataset::load().unwrap();
    let letter = LetterClassifier::new(&dataset)
        .classify(&static_pair(), Some(LetterType::Type6))
        .unwrap();
    assert_eq!(letter, Letter::Alpha);
}

#[test]
fn test_strategy_without_candidates_is_unclassified() {
    let dataset = ExemplarDataset::load().unwrap();
    let err = LetterClassifier::new(&dataset)
        .classify(&static_pair(), Some(LetterType::Type2))
        .unwrap_err();
    assert!(matches!(
        err,
        ClassifyError::NoMatchingExemplar {
            strategy: MatchStrategy::ShiftWithNonShift
        }
    ));
}
