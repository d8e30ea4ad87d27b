//! Classify a pictograph and resolve its arrow offsets.

use crate::cli::common::{
    load_databases, load_pictograph, open_store, parse_letter_type, BeatArgs, CliError, CliResult,
};
use crate::models::Track;
use crate::services::{Pipeline, PipelineError};
use clap::Args;
use std::path::PathBuf;

/// Classify a pictograph and place both arrows
#[derive(Debug, Clone, Args)]
pub struct ClassifyArgs {
    /// Pictograph JSON file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Letter type before the edit (Type1..Type6)
    #[arg(long, value_name = "TYPE")]
    pub previous_type: Option<String>,

    #[command(flatten)]
    pub beat: BeatArgs,

    /// Override store directory (defaults to the configured one)
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl ClassifyArgs {
    /// Execute the classify command
    pub fn execute(&self) -> CliResult<()> {
        let pair = load_pictograph(&self.input)?;
        let previous = parse_letter_type(self.previous_type.as_deref())?
            .or(pair.letter_type);

        let history = self.beat.load_history()?;

        let (dataset, defaults) = load_databases()?;
        let store = open_store(self.store.as_ref())?;
        let pipeline = Pipeline::new(&dataset, &defaults, &store);

        let output = pipeline
            .classify_and_place(&pair, previous, self.beat.beat, &history)
            .map_err(|e| match e {
                PipelineError::Placement(e) => CliError::io(format!("Placement failed: {e}")),
                other => CliError::validation(other.to_string()),
            })?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            println!(
                "Letter: {} ({})",
                output.letter,
                output.letter.letter_type()
            );
            for track in Track::BOTH {
                println!("  {}: {}", track, output.offsets.get(track));
            }
        }

        Ok(())
    }
}
