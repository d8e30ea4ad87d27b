//! Arrow placement resolution.
//!
//! The final offset of an arrow is its stored override if one exists, else
//! the default table entry for its most specific composite key. Either value
//! is authored for a reference quadrant and is rotated into the arrow's own
//! quadrant last.

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{GridLocation, GridMode, Offset, PictographMotionPair, PlacementKeys, Track};
use crate::placement_db::DefaultPlacementTable;
use crate::services::attribute_key::generate_attribute_key;
use crate::services::encoders::{encode_turns_tuple, generate_orientation_key};
use crate::services::override_store::{OverrideStore, StoreError};
use crate::services::quadrant::{directional_offsets, quadrant_index};

/// Placement failure.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// The arrow's location is missing from the quadrant table.
    #[error("no quadrant for location {location} in {grid_mode} grid")]
    QuadrantIndexOutOfRange {
        /// Grid mode of the pictograph
        grid_mode: GridMode,
        /// Arrow location that could not be mapped
        location: GridLocation,
    },

    /// The override store could not be read
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Full override address of one track, or `None` while the letter is unset.
#[must_use]
pub fn placement_keys(pair: &PictographMotionPair, track: Track) -> Option<PlacementKeys> {
    Some(PlacementKeys {
        grid_mode: pair.grid_mode,
        orientation_key: generate_orientation_key(pair),
        letter: pair.letter?,
        turns_tuple: encode_turns_tuple(pair),
        attribute_key: generate_attribute_key(pair, track),
    })
}

/// Default-table keys for one track, most specific first.
///
/// `{motion}_to_{end layer}_{end position}` with the letter's dash suffix,
/// then without it, then the bare motion type.
#[must_use]
pub fn composite_key_candidates(pair: &PictographMotionPair, track: Track) -> Vec<String> {
    let motion_type = pair.motion(track).motion_type;
    let base = format!(
        "{motion_type}_to_{}_{}",
        pair.end_layer_tag(),
        pair.end_position().as_str()
    );

    let mut candidates = Vec::with_capacity(3);
    if let Some(suffix) = pair.letter.and_then(|l| l.dash_key_suffix()) {
        candidates.push(format!("{base}{suffix}"));
    }
    candidates.push(base);
    candidates.push(motion_type.to_string());
    candidates
}

/// Resolves arrow offsets against the default table and an override store.
pub struct PlacementResolver<'a> {
    defaults: &'a DefaultPlacementTable,
    store: &'a dyn OverrideStore,
}

impl<'a> PlacementResolver<'a> {
    /// Creates a resolver.
    #[must_use]
    pub const fn new(defaults: &'a DefaultPlacementTable, store: &'a dyn OverrideStore) -> Self {
        Self { defaults, store }
    }

    /// Final offset of one track's arrow.
    ///
    /// An unset letter yields `(0, 0)` with a warning; that is expected
    /// while a pictograph is first being built.
    ///
    /// # Errors
    ///
    /// - [`PlacementError::QuadrantIndexOutOfRange`] if the arrow location
    ///   has no entry in the quadrant table
    /// - [`PlacementError::Store`] if the override store fails
    pub fn resolve(
        &self,
        pair: &PictographMotionPair,
        track: Track,
    ) -> Result<Offset, PlacementError> {
        let Some(keys) = placement_keys(pair, track) else {
            warn!(%track, "placement requested for a pictograph without a letter");
            return Ok(Offset::ZERO);
        };

        let base = match self.store.get(&keys)? {
            Some(offset) => {
                debug!(%keys, %offset, "using placement override");
                offset
            }
            None => self.default_offset(pair, track),
        };

        let motion = pair.motion(track);
        let out_of_range = || PlacementError::QuadrantIndexOutOfRange {
            grid_mode: pair.grid_mode,
            location: motion.arrow_location(),
        };
        let index = quadrant_index(motion, pair.grid_mode).ok_or_else(out_of_range)?;
        directional_offsets(motion, base)
            .get(index)
            .copied()
            .ok_or_else(out_of_range)
    }

    /// Default offset of one track before quadrant rotation.
    ///
    /// Falls back through [`composite_key_candidates`] and returns `(0, 0)`
    /// if no candidate has an entry for the track's turns.
    #[must_use]
    pub fn default_offset(&self, pair: &PictographMotionPair, track: Track) -> Offset {
        let motion = pair.motion(track);
        let turns = motion.turns.to_string();

        for key in composite_key_candidates(pair, track) {
            if let Some(offset) = self
                .defaults
                .get(pair.grid_mode, motion.motion_type, &key, &turns)
            {
                debug!(%track, %key, %turns, %offset, "using default placement");
                return offset;
            }
        }

        debug!(%track, motion_type = %motion.motion_type, %turns, "no default placement");
        Offset::ZERO
    }

    /// The override store this resolver reads.
    #[must_use]
    pub fn store(&self) -> &'a dyn OverrideStore {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AttributeKey, Letter, MotionAttributes, MotionType, Orientation, OrientationKey,
        RotationDirection, TurnCount,
    };
    use crate::services::override_store::InMemoryOverrideStore;

    fn get_test_table() -> DefaultPlacementTable {
        DefaultPlacementTable::load().expect("Failed to load default placements")
    }

    fn alpha_pair(halves: u8) -> PictographMotionPair {
        PictographMotionPair::new(
            MotionAttributes::new(
                Track::A,
                MotionType::Pro,
                GridLocation::N,
                GridLocation::E,
                RotationDirection::Clockwise,
                TurnCount::Halves(halves),
            ),
            MotionAttributes::new(
                Track::B,
                MotionType::Pro,
                GridLocation::S,
                GridLocation::W,
                RotationDirection::Clockwise,
                TurnCount::Halves(halves),
            ),
        )
        .unwrap()
        .with_letter(Letter::A)
    }

    #[test]
    fn test_composite_key_candidates() {
        let pair = alpha_pair(2);
        assert_eq!(
            composite_key_candidates(&pair, Track::A),
            vec!["pro_to_layer1_alpha".to_string(), "pro".to_string()]
        );

        let dash = PictographMotionPair::new(
            MotionAttributes::new(
                Track::A,
                MotionType::Pro,
                GridLocation::N,
                GridLocation::E,
                RotationDirection::Clockwise,
                TurnCount::ZERO,
            ),
            MotionAttributes::new(
                Track::B,
                MotionType::Dash,
                GridLocation::S,
                GridLocation::N,
                RotationDirection::NoRotation,
                TurnCount::ZERO,
            )
            .with_orientations(Orientation::RadialIn, Orientation::NonRadialClockwise),
        )
        .unwrap()
        .with_letter(Letter::WDash);
        assert_eq!(
            composite_key_candidates(&dash, Track::A)[0],
            "pro_to_layer3_gamma_W_dash"
        );
    }

    #[test]
    fn test_default_offset_uses_specific_key() {
        let table = get_test_table();
        let store = InMemoryOverrideStore::new();
        let resolver = PlacementResolver::new(&table, &store);
        assert_eq!(
            resolver.default_offset(&alpha_pair(2), Track::A),
            Offset::new(50.0, 50.0)
        );
    }

    #[test]
    fn test_resolve_rotates_into_quadrant() {
        let table = get_test_table();
        let store = InMemoryOverrideStore::new();
        let resolver = PlacementResolver::new(&table, &store);
        let pair = alpha_pair(2);

        // A's arrow sits at NE (quadrant 0), B's at SW (quadrant 2)
        assert_eq!(resolver.resolve(&pair, Track::A).unwrap(), Offset::new(50.0, 50.0));
        assert_eq!(resolver.resolve(&pair, Track::B).unwrap(), Offset::new(-50.0, -50.0));
    }

    #[test]
    fn test_override_wins() {
        let table = get_test_table();
        let store = InMemoryOverrideStore::new();
        let pair = alpha_pair(2);
        let keys = placement_keys(&pair, Track::A).unwrap();
        assert_eq!(keys.orientation_key, OrientationKey::FromLayer1);
        assert_eq!(keys.attribute_key, AttributeKey::Track(Track::A));
        store.put(&keys, Offset::new(1.0, 2.0)).unwrap();

        let resolver = PlacementResolver::new(&table, &store);
        assert_eq!(resolver.resolve(&pair, Track::A).unwrap(), Offset::new(1.0, 2.0));
        // Track B has no override
        assert_eq!(resolver.resolve(&pair, Track::B).unwrap(), Offset::new(-50.0, -50.0));
    }

    #[test]
    fn test_unset_letter_is_zero() {
        let table = get_test_table();
        let store = InMemoryOverrideStore::new();
        let resolver = PlacementResolver::new(&table, &store);
        let mut pair = alpha_pair(2);
        pair.letter = None;
        assert_eq!(resolver.resolve(&pair, Track::A).unwrap(), Offset::ZERO);
        assert!(placement_keys(&pair, Track::A).is_none());
    }

    #[test]
    fn test_unmapped_arrow_location_is_an_error() {
        let table = get_test_table();
        let store = InMemoryOverrideStore::new();
        // N -> S has no midpoint, and S is not a diamond shift quadrant
        let pair = PictographMotionPair::new(
            MotionAttributes::new(
                Track::A,
                MotionType::Pro,
                GridLocation::N,
                GridLocation::S,
                RotationDirection::Clockwise,
                TurnCount::ZERO,
            ),
            MotionAttributes::new(
                Track::B,
                MotionType::Pro,
                GridLocation::E,
                GridLocation::W,
                RotationDirection::Clockwise,
                TurnCount::ZERO,
            ),
        )
        .unwrap()
        .with_letter(Letter::A);
        let keys = placement_keys(&pair, Track::A).unwrap();
        store.put(&keys, Offset::new(10.0, 20.0)).unwrap();

        let resolver = PlacementResolver::new(&table, &store);
        match resolver.resolve(&pair, Track::A) {
            Err(PlacementError::QuadrantIndexOutOfRange {
                grid_mode,
                location,
            }) => {
                assert_eq!(grid_mode, GridMode::Diamond);
                assert_eq!(location, GridLocation::S);
            }
            other => panic!("expected QuadrantIndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_default_is_zero() {
        let store = InMemoryOverrideStore::new();
        let empty = DefaultPlacementTable::default();
        let resolver = PlacementResolver::new(&empty, &store);
        assert_eq!(resolver.default_offset(&alpha_pair(2), Track::A), Offset::ZERO);
    }
}
