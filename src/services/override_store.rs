//! Placement override storage.
//!
//! Overrides are nested maps addressed by
//! grid mode → orientation key → letter → turns tuple → attribute key.
//! A *bucket* is everything under one (grid mode, orientation key) pair and
//! is the unit of bulk load/save. Stored offsets are absolute.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;

use crate::models::{
    AttributeKey, GridMode, Letter, Offset, OrientationKey, PlacementKeys, TurnsTuple,
};

/// Override storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a store file failed
    #[error("override store I/O error at {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A store file is not valid JSON in the expected shape
    #[error("malformed override file {path}: {source}")]
    Malformed {
        /// Offending file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A lock guarding in-memory data was poisoned
    #[error("override store lock poisoned")]
    Poisoned,
}

/// attribute key → offset
type AttributeMap = BTreeMap<String, Offset>;
/// turns tuple → attribute key → offset
type TurnsMap = BTreeMap<String, AttributeMap>;

/// All overrides for one (grid mode, orientation key): letter → turns → attribute → offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideBucket(BTreeMap<String, TurnsMap>);

impl OverrideBucket {
    /// Creates an empty bucket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored offset, if any.
    #[must_use]
    pub fn get(
        &self,
        letter: Letter,
        turns: &TurnsTuple,
        attribute: &AttributeKey,
    ) -> Option<Offset> {
        self.0
            .get(letter.symbol())?
            .get(turns.as_str())?
            .get(&attribute.to_string())
            .copied()
    }

    /// Inserts or replaces an offset, returning the previous value.
    pub fn insert(
        &mut self,
        letter: Letter,
        turns: &TurnsTuple,
        attribute: &AttributeKey,
        offset: Offset,
    ) -> Option<Offset> {
        self.0
            .entry(letter.symbol().to_string())
            .or_default()
            .entry(turns.as_str().to_string())
            .or_default()
            .insert(attribute.to_string(), offset)
    }

    /// Removes an offset, pruning parents left empty.
    pub fn remove(
        &mut self,
        letter: Letter,
        turns: &TurnsTuple,
        attribute: &AttributeKey,
    ) -> Option<Offset> {
        let by_turns = self.0.get_mut(letter.symbol())?;
        let by_attribute = by_turns.get_mut(turns.as_str())?;
        let removed = by_attribute.remove(&attribute.to_string())?;

        if by_attribute.is_empty() {
            by_turns.remove(turns.as_str());
        }
        if by_turns.is_empty() {
            self.0.remove(letter.symbol());
        }
        Some(removed)
    }

    /// Returns true if the bucket holds no offsets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of stored offsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }
}

/// Nested key-value store of placement overrides.
///
/// Implementations must give read-after-write within a process: a value
/// returned by `load_bucket` reflects every earlier `save_bucket`.
pub trait OverrideStore: Send + Sync {
    /// Loads a bucket, or `None` if nothing is stored for it.
    fn load_bucket(
        &self,
        grid_mode: GridMode,
        orientation_key: OrientationKey,
    ) -> Result<Option<OverrideBucket>, StoreError>;

    /// Replaces a bucket. Saving an empty bucket removes it.
    fn save_bucket(
        &self,
        grid_mode: GridMode,
        orientation_key: OrientationKey,
        bucket: &OverrideBucket,
    ) -> Result<(), StoreError>;

    /// Stored offset at a full key.
    fn get(&self, keys: &PlacementKeys) -> Result<Option<Offset>, StoreError> {
        Ok(self
            .load_bucket(keys.grid_mode, keys.orientation_key)?
            .and_then(|bucket| bucket.get(keys.letter, &keys.turns_tuple, &keys.attribute_key)))
    }

    /// Stores an offset at a full key.
    fn put(&self, keys: &PlacementKeys, offset: Offset) -> Result<(), StoreError> {
        let mut bucket = self
            .load_bucket(keys.grid_mode, keys.orientation_key)?
            .unwrap_or_default();
        bucket.insert(keys.letter, &keys.turns_tuple, &keys.attribute_key, offset);
        self.save_bucket(keys.grid_mode, keys.orientation_key, &bucket)
    }

    /// Deletes the offset at a full key, returning it if it existed.
    fn delete(&self, keys: &PlacementKeys) -> Result<Option<Offset>, StoreError> {
        let Some(mut bucket) = self.load_bucket(keys.grid_mode, keys.orientation_key)? else {
            return Ok(None);
        };
        let removed = bucket.remove(keys.letter, &keys.turns_tuple, &keys.attribute_key);
        if removed.is_some() {
            self.save_bucket(keys.grid_mode, keys.orientation_key, &bucket)?;
        }
        Ok(removed)
    }
}

/// Process-local store, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryOverrideStore {
    buckets: RwLock<HashMap<(GridMode, OrientationKey), OverrideBucket>>,
}

impl InMemoryOverrideStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverrideStore for InMemoryOverrideStore {
    fn load_bucket(
        &self,
        grid_mode: GridMode,
        orientation_key: OrientationKey,
    ) -> Result<Option<OverrideBucket>, StoreError> {
        let buckets = self.buckets.read().map_err(|_| StoreError::Poisoned)?;
        Ok(buckets.get(&(grid_mode, orientation_key)).cloned())
    }

    fn save_bucket(
        &self,
        grid_mode: GridMode,
        orientation_key: OrientationKey,
        bucket: &OverrideBucket,
    ) -> Result<(), StoreError> {
        let mut buckets = self.buckets.write().map_err(|_| StoreError::Poisoned)?;
        if bucket.is_empty() {
            buckets.remove(&(grid_mode, orientation_key));
        } else {
            buckets.insert((grid_mode, orientation_key), bucket.clone());
        }
        Ok(())
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

/// orientation key → bucket, the content of one grid file
type GridFile = BTreeMap<OrientationKey, OverrideBucket>;

/// One JSON file per grid mode under a directory.
///
/// Files are read on every access and written atomically, so there is no
/// cache to go stale. A grid file whose last bucket is removed is deleted.
///
/// Saving a bucket rewrites its whole grid file, so saves are serialized
/// across every clone of the store. Separate processes sharing a directory
/// are not coordinated.
#[derive(Debug, Clone)]
pub struct JsonFileOverrideStore {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileOverrideStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::default(),
        }
    }

    /// Root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding one grid mode, e.g. `diamond_placements.json`.
    #[must_use]
    pub fn grid_file_path(&self, grid_mode: GridMode) -> PathBuf {
        self.dir.join(format!("{grid_mode}_placements.json"))
    }

    fn read_grid_file(&self, grid_mode: GridMode) -> Result<GridFile, StoreError> {
        let path = self.grid_file_path(grid_mode);
        if !path.exists() {
            return Ok(GridFile::new());
        }
        let content = fs::read_to_string(&path).map_err(io_error(&path))?;
        serde_json::from_str(&content).map_err(|source| StoreError::Malformed { path, source })
    }

    fn write_grid_file(&self, grid_mode: GridMode, file: &GridFile) -> Result<(), StoreError> {
        let path = self.grid_file_path(grid_mode);

        if file.is_empty() {
            if path.exists() {
                fs::remove_file(&path).map_err(io_error(&path))?;
            }
            return Ok(());
        }

        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let content = serde_json::to_string_pretty(file).map_err(|source| StoreError::Malformed {
            path: path.clone(),
            source,
        })?;

        // Write to temp file, then rename into place
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(io_error(&temp_path))?;
        fs::rename(&temp_path, &path).map_err(io_error(&path))?;
        Ok(())
    }
}

impl OverrideStore for JsonFileOverrideStore {
    fn load_bucket(
        &self,
        grid_mode: GridMode,
        orientation_key: OrientationKey,
    ) -> Result<Option<OverrideBucket>, StoreError> {
        Ok(self.read_grid_file(grid_mode)?.remove(&orientation_key))
    }

    fn save_bucket(
        &self,
        grid_mode: GridMode,
        orientation_key: OrientationKey,
        bucket: &OverrideBucket,
    ) -> Result<(), StoreError> {
        // Held from read to rename so saves of sibling buckets are not lost
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut file = self.read_grid_file(grid_mode)?;
        if bucket.is_empty() {
            file.remove(&orientation_key);
        } else {
            file.insert(orientation_key, bucket.clone());
        }
        self.write_grid_file(grid_mode, &file)
    }
}
