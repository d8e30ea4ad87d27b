//! Shared types and helpers for CLI commands.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::exemplar_db::ExemplarDataset;
use crate::models::{LetterType, PictographMotionPair};
use crate::placement_db::DefaultPlacementTable;
use crate::services::{InMemoryBeatHistory, JsonFileOverrideStore, LetterClassifier, PrefloatResolver};
use clap::Args;

/// Process exit codes used by CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input, unclassifiable pictograph, or failed validation
    Validation = 1,
    /// File system or serialization failure
    Io = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by a CLI command.
#[derive(Debug)]
pub struct CliError {
    /// Message printed to stderr
    pub message: String,
    /// Exit code the process terminates with
    pub exit_code: ExitCode,
}

impl CliError {
    /// Invalid input or a domain failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::Validation,
        }
    }

    /// File system or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::Io,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Reads a pictograph JSON file.
pub fn load_pictograph(path: &Path) -> CliResult<PictographMotionPair> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::validation(format!("Invalid pictograph {}: {e}", path.display())))
}

/// Loads both embedded databases.
pub fn load_databases() -> CliResult<(ExemplarDataset, DefaultPlacementTable)> {
    let dataset = ExemplarDataset::load()
        .map_err(|e| CliError::io(format!("Failed to load exemplar dataset: {e}")))?;
    let defaults = DefaultPlacementTable::load()
        .map_err(|e| CliError::io(format!("Failed to load default placements: {e}")))?;
    Ok((dataset, defaults))
}

/// Opens the override store at `dir`, or at the configured directory.
pub fn open_store(dir: Option<&PathBuf>) -> CliResult<JsonFileOverrideStore> {
    let dir = match dir {
        Some(dir) => dir.clone(),
        None => Config::load()
            .and_then(|config| config.override_dir())
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e}")))?,
    };
    Ok(JsonFileOverrideStore::new(dir))
}

/// Parses a `--previous-type` value.
pub fn parse_letter_type(value: Option<&str>) -> CliResult<Option<LetterType>> {
    value
        .map(|v| {
            v.parse::<LetterType>()
                .map_err(|e| CliError::validation(e.to_string()))
        })
        .transpose()
}

/// Sequence position of a pictograph, for resolving float motions.
#[derive(Debug, Clone, Default, Args)]
pub struct BeatArgs {
    /// Beat index of the pictograph in its sequence
    #[arg(long, default_value_t = 0)]
    pub beat: usize,

    /// Beat history JSON file, for resolving float motions
    #[arg(long, value_name = "FILE")]
    pub history: Option<PathBuf>,
}

impl BeatArgs {
    /// Loads the history file, or an empty history when none is given.
    pub fn load_history(&self) -> CliResult<InMemoryBeatHistory> {
        match &self.history {
            Some(path) => InMemoryBeatHistory::load(path)
                .map_err(|e| CliError::io(format!("Failed to load beat history: {e}"))),
            None => Ok(InMemoryBeatHistory::new()),
        }
    }
}

/// Resolves float motions and sets the letter, classifying when unlettered.
///
/// Placement commands key overrides by letter and place floats by their
/// as-if handedness, so a bare pair goes through the same prefloat step as
/// `classify` before it can be placed or adjusted.
pub fn prepare_pictograph(
    pair: &PictographMotionPair,
    beat: &BeatArgs,
    dataset: &ExemplarDataset,
) -> CliResult<PictographMotionPair> {
    let history = beat.load_history()?;
    let resolved = PrefloatResolver::resolve(pair, beat.beat, &history)
        .map_err(|e| CliError::validation(e.to_string()))?;
    if resolved.letter.is_some() {
        return Ok(resolved);
    }
    let letter = LetterClassifier::new(dataset)
        .classify(&resolved, resolved.letter_type)
        .map_err(|e| CliError::validation(format!("Failed to classify pictograph: {e}")))?;
    Ok(resolved.with_letter(letter))
}
