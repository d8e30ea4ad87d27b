//! Pictograph Library
//!
//! This library classifies two-track motion pictographs into letters and
//! resolves the visual offset of each arrow, including user overrides that
//! are kept consistent across mirrored slots.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod exemplar_db;
pub mod models;
pub mod placement_db;
pub mod services;
