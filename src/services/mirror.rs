//! Mirror-consistent override editing.
//!
//! Every manual adjustment is written at its primary key and copied to the
//! structurally mirrored key, the slot the same motion would occupy with the
//! tracks exchanged. Mirror maintenance is best effort: a failed mirror write
//! is logged and reported, and the primary write stands.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{GridMode, Offset, OrientationKey, PictographMotionPair, PlacementKeys, Track};
use crate::placement_db::DefaultPlacementTable;
use crate::services::encoders::generate_orientation_key;
use crate::services::override_store::{OverrideStore, StoreError};
use crate::services::placement::{placement_keys, PlacementResolver};

/// Mirror maintenance failure; never fails the primary operation.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The bucket holding the mirror entry does not exist.
    #[error("mirror bucket {grid_mode}/{orientation_key} not found")]
    MissingMirrorTarget {
        /// Grid mode of the mirror bucket
        grid_mode: GridMode,
        /// Orientation key of the mirror bucket
        orientation_key: OrientationKey,
    },

    /// Reading or writing the mirror bucket failed
    #[error("mirror write failed: {0}")]
    Store(#[source] StoreError),
}

/// Failure of the primary part of an adjustment.
#[derive(Debug, Error)]
pub enum AdjustmentError {
    /// Overrides are keyed by letter; unclassified pictographs have none.
    #[error("cannot adjust placement of a pictograph without a letter")]
    UnsetLetter,

    /// The primary bucket could not be read or written
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why no mirror entry is maintained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorSkip {
    /// Pictograph has no letter
    UnsetLetter,
    /// Chase letters are keyed by lead state and never mirror in standard orientation
    LeadStateLetter,
    /// Both tracks have the same turns, so the mirror would be the same slot
    EqualTurns,
}

/// What happened to the mirror entry.
#[derive(Debug)]
pub enum MirrorOutcome {
    /// Mirror entry written (or deleted) at these keys
    Applied(PlacementKeys),
    /// No mirror for this pictograph
    Skipped(MirrorSkip),
    /// Mirror maintenance failed and was logged
    Failed(MirrorError),
}

/// Result of [`MirrorConsistencyManager::apply_user_adjustment`].
#[derive(Debug)]
pub struct AdjustmentReport {
    /// Keys written
    pub primary: PlacementKeys,
    /// Absolute offset now stored
    pub value: Offset,
    /// Mirror outcome
    pub mirror: MirrorOutcome,
}

/// Result of [`MirrorConsistencyManager::remove_user_adjustment`].
#[derive(Debug)]
pub struct RemovalReport {
    /// Keys deleted
    pub primary: PlacementKeys,
    /// Offset that was stored at the primary keys, if any
    pub removed: Option<Offset>,
    /// Mirror outcome
    pub mirror: MirrorOutcome,
}

/// Keys of the mirrored entry for one track.
///
/// The mirror is the same motion on the other track of the swapped pair. In
/// mixed orientation that lands in the other layer 3 bucket; in standard
/// orientation it stays in the same bucket and is skipped for chase letters
/// and equal turns.
pub fn mirror_keys(pair: &PictographMotionPair, track: Track) -> Result<PlacementKeys, MirrorSkip> {
    let letter = pair.letter.ok_or(MirrorSkip::UnsetLetter)?;

    if !generate_orientation_key(pair).is_mixed() {
        if letter.is_lead_state_letter() {
            return Err(MirrorSkip::LeadStateLetter);
        }
        if pair.track_a.turns == pair.track_b.turns {
            return Err(MirrorSkip::EqualTurns);
        }
    }

    placement_keys(&pair.swapped(), track.other()).ok_or(MirrorSkip::UnsetLetter)
}

type BucketId = (GridMode, OrientationKey);

/// One mutex per bucket, created on first use.
#[derive(Debug, Default)]
struct BucketLocks {
    locks: Mutex<HashMap<BucketId, Arc<Mutex<()>>>>,
}

impl BucketLocks {
    /// Lock handles for a set of buckets in a fixed order.
    fn handles(&self, buckets: &[BucketId]) -> Result<Vec<Arc<Mutex<()>>>, StoreError> {
        let mut ids = buckets.to_vec();
        ids.sort();
        ids.dedup();

        let mut locks = self.locks.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(ids
            .into_iter()
            .map(|id| Arc::clone(locks.entry(id).or_default()))
            .collect())
    }
}

fn lock_all(handles: &[Arc<Mutex<()>>]) -> Result<Vec<MutexGuard<'_, ()>>, StoreError> {
    handles
        .iter()
        .map(|handle| handle.lock().map_err(|_| StoreError::Poisoned))
        .collect()
}

/// Applies and removes user overrides, keeping mirror entries in step.
///
/// Share one manager between call sites: primary and mirror buckets are
/// locked together for the whole read-modify-write.
pub struct MirrorConsistencyManager<'a> {
    resolver: PlacementResolver<'a>,
    locks: BucketLocks,
}

impl<'a> MirrorConsistencyManager<'a> {
    /// Creates a manager over a default table and an override store.
    #[must_use]
    pub fn new(defaults: &'a DefaultPlacementTable, store: &'a dyn OverrideStore) -> Self {
        Self {
            resolver: PlacementResolver::new(defaults, store),
            locks: BucketLocks::default(),
        }
    }

    /// Resolver sharing this manager's default table and store.
    #[must_use]
    pub const fn resolver(&self) -> &PlacementResolver<'a> {
        &self.resolver
    }

    /// Nudges one track's arrow by `delta` and mirrors the result.
    ///
    /// The stored value is absolute: an existing override is shifted by
    /// `delta`, otherwise the default offset plus `delta` is stored.
    ///
    /// # Errors
    ///
    /// Fails only if the pictograph has no letter or the primary bucket
    /// cannot be read or written. Mirror problems are reported in
    /// [`AdjustmentReport::mirror`].
    pub fn apply_user_adjustment(
        &self,
        pair: &PictographMotionPair,
        track: Track,
        delta: Offset,
    ) -> Result<AdjustmentReport, AdjustmentError> {
        let primary = placement_keys(pair, track).ok_or(AdjustmentError::UnsetLetter)?;
        let mirror = mirror_keys(pair, track);

        let handles = self.locks.handles(&Self::bucket_ids(&primary, mirror.as_ref().ok()))?;
        let _guards = lock_all(&handles)?;

        let store = self.resolver.store();
        let mut bucket = store
            .load_bucket(primary.grid_mode, primary.orientation_key)?
            .unwrap_or_default();
        let current = bucket
            .get(primary.letter, &primary.turns_tuple, &primary.attribute_key)
            .unwrap_or_else(|| self.resolver.default_offset(pair, track));
        let value = current + delta;
        bucket.insert(primary.letter, &primary.turns_tuple, &primary.attribute_key, value);
        store.save_bucket(primary.grid_mode, primary.orientation_key, &bucket)?;
        debug!(keys = %primary, %value, "stored placement override");

        let mirror = match mirror {
            Err(skip) => MirrorOutcome::Skipped(skip),
            Ok(keys) => match Self::write_mirror(store, &keys, value) {
                Ok(()) => MirrorOutcome::Applied(keys),
                Err(err) => {
                    warn!(keys = %keys, error = %err, "failed to mirror placement override");
                    MirrorOutcome::Failed(MirrorError::Store(err))
                }
            },
        };

        Ok(AdjustmentReport {
            primary,
            value,
            mirror,
        })
    }

    /// Deletes one track's override and its mirror.
    ///
    /// Removing an entry that does not exist is not an error. A missing
    /// mirror bucket is logged and reported unless it is the primary's own
    /// bucket, pruned by this deletion. The primary deletion stands.
    ///
    /// # Errors
    ///
    /// Fails only if the pictograph has no letter or the primary bucket
    /// cannot be read or written.
    pub fn remove_user_adjustment(
        &self,
        pair: &PictographMotionPair,
        track: Track,
    ) -> Result<RemovalReport, AdjustmentError> {
        let primary = placement_keys(pair, track).ok_or(AdjustmentError::UnsetLetter)?;
        let mirror = mirror_keys(pair, track);

        let handles = self.locks.handles(&Self::bucket_ids(&primary, mirror.as_ref().ok()))?;
        let _guards = lock_all(&handles)?;

        let store = self.resolver.store();
        let removed = store.delete(&primary)?;
        debug!(keys = %primary, removed = removed.is_some(), "removed placement override");

        let mirror = match mirror {
            Err(skip) => MirrorOutcome::Skipped(skip),
            Ok(keys) => match store.load_bucket(keys.grid_mode, keys.orientation_key) {
                Ok(Some(mut bucket)) => {
                    let removed_mirror =
                        bucket.remove(keys.letter, &keys.turns_tuple, &keys.attribute_key);
                    let saved = if removed_mirror.is_some() {
                        store.save_bucket(keys.grid_mode, keys.orientation_key, &bucket)
                    } else {
                        Ok(())
                    };
                    match saved {
                        Ok(()) => MirrorOutcome::Applied(keys),
                        Err(err) => {
                            warn!(keys = %keys, error = %err, "failed to remove mirrored override");
                            MirrorOutcome::Failed(MirrorError::Store(err))
                        }
                    }
                }
                // Deleting the primary pruned the shared bucket, so the mirror is already gone
                Ok(None) if removed.is_some() && keys.bucket() == primary.bucket() => {
                    MirrorOutcome::Applied(keys)
                }
                Ok(None) => {
                    warn!(keys = %keys, "mirror bucket not found; primary override removed");
                    MirrorOutcome::Failed(MirrorError::MissingMirrorTarget {
                        grid_mode: keys.grid_mode,
                        orientation_key: keys.orientation_key,
                    })
                }
                Err(err) => {
                    warn!(keys = %keys, error = %err, "failed to load mirror bucket");
                    MirrorOutcome::Failed(MirrorError::Store(err))
                }
            },
        };

        Ok(RemovalReport {
            primary,
            removed,
            mirror,
        })
    }

    fn bucket_ids(primary: &PlacementKeys, mirror: Option<&PlacementKeys>) -> Vec<BucketId> {
        std::iter::once(primary)
            .chain(mirror)
            .map(PlacementKeys::bucket)
            .collect()
    }

    fn write_mirror(
        store: &dyn OverrideStore,
        keys: &PlacementKeys,
        value: Offset,
    ) -> Result<(), StoreError> {
        let mut bucket = store
            .load_bucket(keys.grid_mode, keys.orientation_key)?
            .unwrap_or_default();
        bucket.insert(keys.letter, &keys.turns_tuple, &keys.attribute_key, value);
        store.save_bucket(keys.grid_mode, keys.orientation_key, &bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AttributeKey, GridLocation, Letter, MotionAttributes, MotionType, Orientation,
        RotationDirection, TurnCount,
    };
    use crate::services::override_store::InMemoryOverrideStore;

    fn pair(halves_a: u8, halves_b: u8, letter: Letter) -> PictographMotionPair {
        PictographMotionPair::new(
            MotionAttributes::new(
                Track::A,
                MotionType::Pro,
                GridLocation::N,
                GridLocation::E,
                RotationDirection::Clockwise,
                TurnCount::Halves(halves_a),
            ),
            MotionAttributes::new(
                Track::B,
                MotionType::Pro,
                GridLocation::S,
                GridLocation::W,
                RotationDirection::Clockwise,
                TurnCount::Halves(halves_b),
            ),
        )
        .unwrap()
        .with_letter(letter)
    }

    #[test]
    fn test_standard_mirror_swaps_turns_and_track() {
        let keys = mirror_keys(&pair(2, 0, Letter::A), Track::A).unwrap();
        assert_eq!(keys.orientation_key, OrientationKey::FromLayer1);
        assert_eq!(keys.turns_tuple.as_str(), "0_1");
        assert_eq!(keys.attribute_key, AttributeKey::Track(Track::B));
    }

    #[test]
    fn test_standard_mirror_skips() {
        assert_eq!(
            mirror_keys(&pair(2, 2, Letter::A), Track::A).unwrap_err(),
            MirrorSkip::EqualTurns
        );
        assert_eq!(
            mirror_keys(&pair(2, 0, Letter::S), Track::A).unwrap_err(),
            MirrorSkip::LeadStateLetter
        );
    }

    #[test]
    fn test_mixed_mirror_uses_other_layer3_bucket() {
        let mut mixed = pair(2, 2, Letter::A);
        mixed.track_b = mixed
            .track_b
            .with_orientations(Orientation::NonRadialClockwise, Orientation::NonRadialClockwise);
        let keys = mirror_keys(&mixed, Track::A).unwrap();
        assert_eq!(keys.orientation_key, OrientationKey::FromLayer3AOn2);
        assert_eq!(keys.attribute_key, AttributeKey::Track(Track::B));
    }

    #[test]
    fn test_apply_seeds_from_default_then_accumulates() {
        let table = DefaultPlacementTable::load().unwrap();
        let store = InMemoryOverrideStore::new();
        let manager = MirrorConsistencyManager::new(&table, &store);
        let pictograph = pair(2, 0, Letter::A);
        let default = manager.resolver().default_offset(&pictograph, Track::A);

        let report = manager
            .apply_user_adjustment(&pictograph, Track::A, Offset::new(5.0, 0.0))
            .unwrap();
        assert_eq!(report.value, default + Offset::new(5.0, 0.0));
        let MirrorOutcome::Applied(mirror) = report.mirror else {
            panic!("expected mirror to be applied");
        };
        assert_eq!(store.get(&mirror).unwrap(), Some(report.value));

        let second = manager
            .apply_user_adjustment(&pictograph, Track::A, Offset::new(0.0, -3.0))
            .unwrap();
        assert_eq!(second.value, default + Offset::new(5.0, -3.0));
        assert_eq!(store.get(&mirror).unwrap(), Some(second.value));
    }

    #[test]
    fn test_apply_without_letter_fails() {
        let table = DefaultPlacementTable::default();
        let store = InMemoryOverrideStore::new();
        let manager = MirrorConsistencyManager::new(&table, &store);
        let mut pictograph = pair(2, 0, Letter::A);
        pictograph.letter = None;
        assert!(matches!(
            manager.apply_user_adjustment(&pictograph, Track::A, Offset::ZERO),
            Err(AdjustmentError::UnsetLetter)
        ));
    }

    #[test]
    fn test_remove_deletes_primary_and_mirror() {
        let table = DefaultPlacementTable::load().unwrap();
        let store = InMemoryOverrideStore::new();
        let manager = MirrorConsistencyManager::new(&table, &store);
        let pictograph = pair(2, 0, Letter::A);

        manager
            .apply_user_adjustment(&pictograph, Track::A, Offset::new(1.0, 1.0))
            .unwrap();
        let report = manager.remove_user_adjustment(&pictograph, Track::A).unwrap();
        assert!(report.removed.is_some());
        assert!(store
            .load_bucket(GridMode::Diamond, OrientationKey::FromLayer1)
            .unwrap()
            .is_none());
    }
}
