//! Scroll state published by the engine.

use crate::transition::TransitionId;

/// Where the engine is in the drag-to-settle cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No gesture and no settle in flight.
    #[default]
    Idle,
    /// A drag is in progress; `drag_delta` follows the pointer.
    Dragging,
    /// State is committed; the row is still animating to it.
    Settling { transition: TransitionId },
}

/// Immutable view of the scroll state at one point in time.
///
/// When no drag is active, `committed_offset == -resting_index * stride`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollSnapshot {
    pub committed_offset: f32,
    pub drag_delta: f32,
    pub resting_index: usize,
    pub item_count: usize,
    pub phase: GesturePhase,
}

impl ScrollSnapshot {
    pub(crate) fn new(item_count: usize) -> Self {
        Self {
            item_count,
            ..Self::default()
        }
    }

    /// Committed offset plus the in-progress drag.
    #[inline]
    pub fn effective_offset(&self) -> f32 {
        self.committed_offset + self.drag_delta
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }
}
