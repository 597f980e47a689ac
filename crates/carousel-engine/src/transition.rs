//! Transition requests emitted when the committed offset changes.
//!
//! The engine never animates on its own. It commits the new state at once
//! and describes the visual move; an animation driver such as
//! [`OffsetAnimator`](crate::OffsetAnimator) produces the frames.

use carousel_animation::SpringSpec;

pub type TransitionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionReason {
    /// First layout moved the row onto the middle item.
    InitialCentering,
    /// A released drag snapped to its resolved item.
    GestureSettle,
    /// `scroll_to_index`, `next` or `previous`.
    Programmatic,
}

/// Request to animate the row between two offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetTransition {
    pub id: TransitionId,
    pub from_offset: f32,
    pub to_offset: f32,
    /// Nominal duration in seconds: the spring's response time.
    pub duration_secs: f32,
    pub curve: SpringSpec,
    pub reason: TransitionReason,
}

impl OffsetTransition {
    pub fn distance(&self) -> f32 {
        self.to_offset - self.from_offset
    }
}
