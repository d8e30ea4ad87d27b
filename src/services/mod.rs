//! Classification and placement services.
//!
//! Everything here is a pure function of its inputs except the override
//! store and beat history, which callers pass in explicitly.

pub mod attribute_key;
pub mod beat_history;
pub mod classifier;
pub mod encoders;
pub mod mirror;
pub mod override_store;
pub mod pipeline;
pub mod placement;
pub mod prefloat;
pub mod quadrant;

// Re-export commonly used types and functions
pub use attribute_key::generate_attribute_key;
pub use beat_history::{BeatHistory, InMemoryBeatHistory};
pub use classifier::{ClassifyError, LetterClassifier, MatchStrategy};
pub use encoders::{encode_turns_tuple, generate_orientation_key};
pub use mirror::{
    AdjustmentError, AdjustmentReport, MirrorConsistencyManager, MirrorError, MirrorOutcome,
    MirrorSkip, RemovalReport,
};
pub use override_store::{
    InMemoryOverrideStore, JsonFileOverrideStore, OverrideBucket, OverrideStore, StoreError,
};
pub use pipeline::{Pipeline, PipelineError, PipelineOutput, TrackOffsets};
pub use placement::{placement_keys, PlacementError, PlacementResolver};
pub use prefloat::{PrefloatError, PrefloatResolver};
