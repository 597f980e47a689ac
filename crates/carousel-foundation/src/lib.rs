//! Pointer-level building blocks: gesture constants, velocity tracking and
//! the horizontal drag recognizer.

pub mod gesture_constants;
pub mod gestures;
mod velocity_tracker;

pub use gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
pub use gestures::{DragEvent, DragGesture};
pub use velocity_tracker::{VelocityTracker1D, ASSUME_STOPPED_MS};
