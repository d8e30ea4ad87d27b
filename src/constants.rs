//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and directory conventions.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Pictograph";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "pictograph";

/// Directory name under the platform config directory.
pub const APP_DATA_DIR: &str = "Pictograph";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "PICTOGRAPH_CONFIG_DIR";
