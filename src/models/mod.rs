//! Data models for motions, pictographs, letters, and placement keys.
//!
//! This module contains the core data structures used throughout the crate.
//! Models are plain data and independent of classification and placement logic.

pub mod error;
pub mod letter;
pub mod motion;
pub mod pictograph;
pub mod placement;

// Re-export all model types
pub use error::ModelError;
pub use letter::{Letter, LetterType};
pub use motion::{
    GridLocation, LeadState, MotionAttributes, MotionType, Orientation, OrientationLayer,
    RotationDirection, Track, TurnCount,
};
pub use pictograph::{GridMode, PictographMotionPair, Position};
pub use placement::{AttributeKey, Offset, OrientationKey, PlacementKeys, TurnsTuple};
