//! Wheel geometry for the presentation layer.
//!
//! None of this affects which prize wins; it only lines the pointer up with
//! the segment the selector already chose.
use crate::constants::FULL_TURN_DEGREES;

fn segment_width(len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = len as f64;
    FULL_TURN_DEGREES / n
}

/// Final wheel angle in degrees: `base_turns` full turns plus the offset that
/// brings segment `index` under the pointer.
#[must_use]
pub fn target_rotation(index: usize, len: usize, base_turns: u32) -> f64 {
    if len == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let i = index as f64;
    FULL_TURN_DEGREES * f64::from(base_turns) + (FULL_TURN_DEGREES - segment_width(len) * i)
}

/// Start angle of segment `index`.
#[must_use]
pub fn segment_angle(index: usize, len: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let i = index as f64;
    segment_width(len) * i
}

/// Rotation that centers a segment's label between its edges.
#[must_use]
pub fn segment_label_angle(len: usize) -> f64 {
    segment_width(len) / 2.0
}
