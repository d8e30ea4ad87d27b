//! Resolve the arrow offset of one track.

use crate::cli::common::{
    load_databases, load_pictograph, open_store, prepare_pictograph, BeatArgs, CliError, CliResult,
};
use crate::models::Track;
use crate::services::{placement_keys, OverrideStore, PlacementResolver};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Resolve the arrow offset of a pictograph track
#[derive(Debug, Clone, Args)]
pub struct PlaceArgs {
    /// Pictograph JSON file (classified first if it has no letter)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Track to place (a or b)
    #[arg(short, long, default_value = "a")]
    pub track: Track,

    #[command(flatten)]
    pub beat: BeatArgs,

    /// Override store directory (defaults to the configured one)
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct PlaceOutput {
    track: Track,
    keys: String,
    overridden: bool,
    dx: f64,
    dy: f64,
}

impl PlaceArgs {
    /// Execute the place command
    pub fn execute(&self) -> CliResult<()> {
        let (dataset, defaults) = load_databases()?;
        let pair = prepare_pictograph(&load_pictograph(&self.input)?, &self.beat, &dataset)?;
        let store = open_store(self.store.as_ref())?;

        let keys = placement_keys(&pair, self.track)
            .ok_or_else(|| CliError::validation("Pictograph has no letter"))?;
        let overridden = store
            .get(&keys)
            .map_err(|e| CliError::io(format!("Failed to read overrides: {e}")))?
            .is_some();

        let offset = PlacementResolver::new(&defaults, &store)
            .resolve(&pair, self.track)
            .map_err(|e| CliError::io(format!("Placement failed: {e}")))?;

        if self.json {
            let output = PlaceOutput {
                track: self.track,
                keys: keys.to_string(),
                overridden,
                dx: offset.dx,
                dy: offset.dy,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            let source = if overridden { "override" } else { "default" };
            println!("{} ({}): {}", self.track, source, offset);
            println!("  Keys: {keys}");
        }

        Ok(())
    }
}
