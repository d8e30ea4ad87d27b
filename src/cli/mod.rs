//! CLI command handlers for Pictograph.
//!
//! This module provides headless, scriptable access to classification and
//! placement for automation, testing, and CI integration.

pub mod adjust;
pub mod classify;
pub mod common;
pub mod config;
pub mod letters;
pub mod place;

// Re-export types used by main.rs and tests
pub use adjust::{NudgeArgs, ResetArgs};
pub use classify::ClassifyArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use letters::LettersArgs;
pub use place::PlaceArgs;
