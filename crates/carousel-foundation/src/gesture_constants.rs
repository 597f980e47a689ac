//! Shared gesture constants, in logical pixels.
//!
//! High-density touch screens may want these scaled by the device density;
//! the recognizer accepts overrides for that reason.

/// Horizontal travel from the press position before a press becomes a drag.
///
/// Large enough to ignore finger jitter, small enough to feel immediate.
/// Matches the common platform touch slop of ~8dp.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum release velocity in logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
