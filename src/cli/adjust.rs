//! Manual arrow adjustments with mirror maintenance.

use crate::cli::common::{
    load_databases, load_pictograph, open_store, prepare_pictograph, BeatArgs, CliError, CliResult,
};
use crate::models::{Offset, Track};
use crate::services::{AdjustmentError, MirrorConsistencyManager, MirrorOutcome, MirrorSkip};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Nudge an arrow and store the result as an override
#[derive(Debug, Clone, Args)]
pub struct NudgeArgs {
    /// Pictograph JSON file (classified first if it has no letter)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Track to adjust (a or b)
    #[arg(short, long, default_value = "a")]
    pub track: Track,

    #[command(flatten)]
    pub beat: BeatArgs,

    /// Horizontal delta
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub dx: f64,

    /// Vertical delta
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub dy: f64,

    /// Override store directory (defaults to the configured one)
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Remove the override of an arrow and its mirror
#[derive(Debug, Clone, Args)]
pub struct ResetArgs {
    /// Pictograph JSON file (classified first if it has no letter)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Track to reset (a or b)
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

/// Mirror outcome as printed by the CLI.
#[derive(Serialize, Debug)]
struct MirrorOutput {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    keys: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl From<&MirrorOutcome> for MirrorOutput {
    fn from(outcome: &MirrorOutcome) -> Self {
        match outcome {
            MirrorOutcome::Applied(keys) => Self {
                status: "applied",
                keys: Some(keys.to_string()),
                reason: None,
            },
            MirrorOutcome::Skipped(skip) => Self {
                status: "skipped",
                keys: None,
                reason: Some(
                    match skip {
                        MirrorSkip::UnsetLetter => "no letter",
                        MirrorSkip::LeadStateLetter => "lead-state letter",
                        MirrorSkip::EqualTurns => "equal turns",
                    }
                    .to_string(),
                ),
            },
            MirrorOutcome::Failed(err) => Self {
                status: "failed",
                keys: None,
                reason: Some(err.to_string()),
            },
        }
    }
}

#[derive(Serialize, Debug)]
struct NudgeOutput {
    keys: String,
    value: Offset,
    mirror: MirrorOutput,
}

#[derive(Serialize, Debug)]
struct ResetOutput {
    keys: String,
    removed: Option<Offset>,
    mirror: MirrorOutput,
}

fn adjustment_error(e: AdjustmentError) -> CliError {
    match e {
        AdjustmentError::UnsetLetter => CliError::validation(e.to_string()),
        AdjustmentError::Store(e) => CliError::io(format!("Failed to update overrides: {e}")),
    }
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value)
            .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
    );
    Ok(())
}

fn print_mirror(mirror: &MirrorOutput) {
    match (&mirror.keys, &mirror.reason) {
        (Some(keys), _) => println!("  Mirror {}: {keys}", mirror.status),
        (None, Some(reason)) => println!("  Mirror {}: {reason}", mirror.status),
        (None, None) => println!("  Mirror {}", mirror.status),
    }
}

impl NudgeArgs {
    /// Execute the nudge command
    pub fn execute(&self) -> CliResult<()> {
        let (dataset, defaults) = load_databases()?;
        let pair = prepare_pictograph(&load_pictograph(&self.input)?, &self.beat, &dataset)?;
        let store = open_store(self.store.as_ref())?;

        let report = MirrorConsistencyManager::new(&defaults, &store)
            .apply_user_adjustment(&pair, self.track, Offset::new(self.dx, self.dy))
            .map_err(adjustment_error)?;

        let output = NudgeOutput {
            keys: report.primary.to_string(),
            value: report.value,
            mirror: MirrorOutput::from(&report.mirror),
        };

        if self.json {
            print_json(&output)?;
        } else {
            println!("{} set to {}", self.track, output.value);
            println!("  Keys: {}", output.keys);
            print_mirror(&output.mirror);
        }

        Ok(())
    }
}

impl ResetArgs {
    /// Execute the reset command
    pub fn execute(&self) -> CliResult<()> {
        let (dataset, defaults) = load_databases()?;
        let pair = prepare_pictograph(&load_pictograph(&self.input)?, &self.beat, &dataset)?;
        let store = open_store(self.store.as_ref())?;

        let report = MirrorConsistencyManager::new(&defaults, &store)
            .remove_user_adjustment(&pair, self.track)
            .map_err(adjustment_error)?;

        let output = ResetOutput {
            keys: report.primary.to_string(),
            removed: report.removed,
            mirror: MirrorOutput::from(&report.mirror),
        };

        if self.json {
            print_json(&output)?;
        } else {
            match output.removed {
                Some(offset) => println!("{} override {} removed", self.track, offset),
                None => println!("{} had no override", self.track),
            }
            println!("  Keys: {}", output.keys);
            print_mirror(&output.mirror);
        }

        Ok(())
    }
}
