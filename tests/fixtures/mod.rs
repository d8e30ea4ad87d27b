//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use pictograph::models::{
    GridLocation, Letter, MotionAttributes, MotionType, PictographMotionPair, RotationDirection,
    Track, TurnCount,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Path to the pictograph binary
pub fn pictograph_bin() -> String {
    std::env::var("CARGO_BIN_EXE_pictograph")
        .unwrap_or_else(|_| "target/debug/pictograph".to_string())
}

/// Creates a Command with an isolated config directory.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(pictograph_bin());
    cmd.env("PICTOGRAPH_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Builds one motion.
///
/// # Arguments
/// * `track` - Owning track
/// * `motion_type` - Literal motion type
/// * `start` / `end` - Grid locations
/// * `rotation` - Prop rotation
/// * `halves` - Turns in half steps
pub fn motion(
    track: Track,
    motion_type: MotionType,
    start: GridLocation,
    end: GridLocation,
    rotation: RotationDirection,
    halves: u8,
) -> MotionAttributes {
    MotionAttributes::new(
        track,
        motion_type,
        start,
        end,
        rotation,
        TurnCount::Halves(halves),
    )
}

/// Builds a pair from two motions.
pub fn pair(track_a: MotionAttributes, track_b: MotionAttributes) -> PictographMotionPair {
    PictographMotionPair::new(track_a, track_b).expect("valid test pictograph")
}

/// Diamond "A": both tracks pro clockwise, N→E and S→W.
///
/// # Returns
/// An unlettered pair with the given turns (half steps) per track.
pub fn pro_pair(halves_a: u8, halves_b: u8) -> PictographMotionPair {
    pair(
        motion(
            Track::A,
            MotionType::Pro,
            GridLocation::N,
            GridLocation::E,
            RotationDirection::Clockwise,
            halves_a,
        ),
        motion(
            Track::B,
            MotionType::Pro,
            GridLocation::S,
            GridLocation::W,
            RotationDirection::Clockwise,
            halves_b,
        ),
    )
}

/// [`pro_pair`] with its letter set.
pub fn letter_a(halves_a: u8, halves_b: u8) -> PictographMotionPair {
    pro_pair(halves_a, halves_b).with_letter(Letter::A)
}

/// Writes a pictograph as JSON and returns its path.
pub fn write_pictograph(dir: &Path, name: &str, pair: &PictographMotionPair) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(pair).expect("serialize pictograph");
    fs::write(&path, json).expect("write pictograph");
    path
}
