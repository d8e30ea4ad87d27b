//! Errors raised while building or parsing model values.

use thiserror::Error;

use crate::models::motion::Track;

/// Invalid model input.
///
/// These are raised at the edges (parsing JSON records, CLI arguments,
/// embedded tables). Once a value is constructed the key-generation paths
/// over it are total.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Turn count outside `[0, 3]`, not a multiple of 0.5, or unparseable.
    #[error("invalid turn count '{0}': expected 0-3 in steps of 0.5 or \"fl\"")]
    InvalidTurns(String),

    /// A Float motion must carry Float turns and no rotation.
    #[error("{track} is a float motion but has turns={turns} and rotation={rotation}")]
    FloatInvariant {
        /// Offending track
        track: Track,
        /// Turns found on the motion
        turns: String,
        /// Rotation found on the motion
        rotation: String,
    },

    /// Locations mix diamond points and box points.
    #[error("pictograph mixes diamond and box locations")]
    MixedGridLocations,

    /// Unknown enum token (motion type, location, letter, ...).
    #[error("unknown {kind} '{value}'")]
    UnknownToken {
        /// What was being parsed (e.g. "location")
        kind: &'static str,
        /// The rejected input
        value: String,
    },

    /// Malformed compact exemplar record.
    #[error("malformed exemplar motion '{0}': expected '<motion> <start> <end> <rotation>'")]
    MalformedExemplar(String),
}

impl ModelError {
    pub(crate) fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownToken {
            kind,
            value: value.into(),
        }
    }
}
