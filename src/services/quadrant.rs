//! Quadrant remapping of placement offsets.
//!
//! Offsets are authored once for a reference quadrant. Each arrow picks one
//! of four rotated variants by where it sits on the grid. The compass tables
//! are fixed data.

use crate::models::{GridLocation, GridMode, MotionAttributes, MotionType, Offset, RotationDirection};

type QuadrantTable = [(GridLocation, usize); 4];

const DIAMOND_SHIFT: QuadrantTable = [
    (GridLocation::NE, 0),
    (GridLocation::SE, 1),
    (GridLocation::SW, 2),
    (GridLocation::NW, 3),
];

const BOX_SHIFT: QuadrantTable = [
    (GridLocation::N, 0),
    (GridLocation::E, 1),
    (GridLocation::S, 2),
    (GridLocation::W, 3),
];

const DIAMOND_NON_SHIFT: QuadrantTable = [
    (GridLocation::N, 0),
    (GridLocation::E, 1),
    (GridLocation::S, 2),
    (GridLocation::W, 3),
];

const BOX_NON_SHIFT: QuadrantTable = [
    (GridLocation::NE, 0),
    (GridLocation::SE, 1),
    (GridLocation::SW, 2),
    (GridLocation::NW, 3),
];

const fn table(grid_mode: GridMode, shift: bool) -> &'static QuadrantTable {
    match (grid_mode, shift) {
        (GridMode::Diamond, true) => &DIAMOND_SHIFT,
        (GridMode::Box, true) => &BOX_SHIFT,
        (GridMode::Diamond, false) => &DIAMOND_NON_SHIFT,
        (GridMode::Box, false) => &BOX_NON_SHIFT,
    }
}

fn lookup(table: &QuadrantTable, location: GridLocation) -> Option<usize> {
    table
        .iter()
        .find(|(loc, _)| *loc == location)
        .map(|(_, index)| *index)
}

/// Quadrant index (0..4) of a motion's arrow.
///
/// The arrow location is tried first (the midpoint for shifts), then the
/// literal end location. `None` means neither is in the compass table for
/// this grid mode.
#[must_use]
pub fn quadrant_index(motion: &MotionAttributes, grid_mode: GridMode) -> Option<usize> {
    let table = table(grid_mode, motion.motion_type.is_shift());
    lookup(table, motion.arrow_location()).or_else(|| lookup(table, motion.end_loc))
}

/// Returns +1 when the prop turns with the hand path, -1 otherwise.
fn shift_handedness(motion: &MotionAttributes) -> i8 {
    match (motion.effective_motion_type(), motion.effective_rotation()) {
        (MotionType::Pro, RotationDirection::Clockwise)
        | (MotionType::Anti, RotationDirection::CounterClockwise)
        | (MotionType::Float, _) => 1,
        _ => -1,
    }
}

/// The four quadrant variants of a base offset for this motion.
///
/// Shift motions rotate by handedness (an unresolved float counts as
/// right-handed); static and dash motions rotate by their literal rotation.
#[must_use]
pub fn directional_offsets(motion: &MotionAttributes, base: Offset) -> [Offset; 4] {
    let Offset { dx: x, dy: y } = base;
    let o = Offset::new;

    if motion.motion_type.is_shift() {
        return if shift_handedness(motion) > 0 {
            [o(x, y), o(-y, x), o(-x, -y), o(y, -x)]
        } else {
            [o(-x, y), o(-y, -x), o(x, -y), o(y, x)]
        };
    }

    match motion.rotation_direction {
        RotationDirection::Clockwise => [o(x, -y), o(y, x), o(-x, y), o(-y, -x)],
        RotationDirection::CounterClockwise => [o(-x, -y), o(y, -x), o(x, y), o(-y, x)],
        RotationDirection::NoRotation => [o(x, y), o(-y, x), o(-x, -y), o(y, -x)],
    }
}
