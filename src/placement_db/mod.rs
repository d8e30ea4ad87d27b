//! Default arrow placement table.
//!
//! Offsets keyed by grid mode → motion type → composite key → turns string.
//! The table is embedded in the binary and immutable for the process lifetime.

use anyhow::{Context, Result};
use std::collections::HashMap;

use crate::models::{GridMode, MotionType, Offset};

/// composite key → turns string → offset
type KeyTable = HashMap<String, HashMap<String, Offset>>;

/// Default placement lookup.
#[derive(Debug, Clone, Default)]
pub struct DefaultPlacementTable {
    tables: HashMap<GridMode, HashMap<MotionType, KeyTable>>,
}

impl DefaultPlacementTable {
    /// Loads the table from the embedded JSON file.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("../data/default_placements.json");
        Self::from_json(json_data).context("Failed to parse embedded default_placements.json")
    }

    /// Parses a table from JSON text.
    pub fn from_json(json_data: &str) -> Result<Self> {
        let tables: HashMap<GridMode, HashMap<MotionType, KeyTable>> =
            serde_json::from_str(json_data)?;
        Ok(Self { tables })
    }

    /// Looks up a single default offset.
    #[must_use]
    pub fn get(
        &self,
        grid_mode: GridMode,
        motion_type: MotionType,
        composite_key: &str,
        turns: &str,
    ) -> Option<Offset> {
        self.tables
            .get(&grid_mode)?
            .get(&motion_type)?
            .get(composite_key)?
            .get(turns)
            .copied()
    }

    /// Returns true if the composite key exists for the motion type.
    #[must_use]
    pub fn contains_key(&self, grid_mode: GridMode, motion_type: MotionType, composite_key: &str) -> bool {
        self.tables
            .get(&grid_mode)
            .and_then(|by_motion| by_motion.get(&motion_type))
            .is_some_and(|keys| keys.contains_key(composite_key))
    }

    /// Number of composite keys across all grids and motion types.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.tables
            .values()
            .flat_map(HashMap::values)
            .map(HashMap::len)
            .sum()
    }
}
