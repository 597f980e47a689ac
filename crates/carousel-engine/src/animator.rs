//! Offset animation driver.
//!
//! Plays [`OffsetTransition`]s on the frame clock and reports completion so
//! the engine can leave the settling phase.

use carousel_animation::Animatable;
use carousel_core::{FrameClock, State};

use crate::transition::OffsetTransition;

/// Animated, presented row offset.
#[derive(Clone)]
pub struct OffsetAnimator {
    offset: Animatable<f32>,
}

impl OffsetAnimator {
    pub fn new(initial_offset: f32, clock: FrameClock) -> Self {
        Self {
            offset: Animatable::new(initial_offset, clock),
        }
    }

    /// Start `transition`, calling `on_finished` when the row comes to rest.
    ///
    /// An idle animator jumps to the transition's start first. A running one
    /// is retargeted from wherever it is, so interrupted settles stay
    /// continuous; the interrupted completion is dropped.
    pub fn run(&self, transition: &OffsetTransition, on_finished: impl FnOnce() + 'static) {
        if !self.offset.is_running() {
            self.offset.snap_to(transition.from_offset);
        }
        log::trace!(
            "animating carousel offset {} -> {} ({:?})",
            transition.from_offset,
            transition.to_offset,
            transition.reason
        );
        self.offset
            .animate_to_then(transition.to_offset, transition.curve, on_finished);
    }

    /// Stop any running transition and rest at `offset`.
    pub fn stop_at(&self, offset: f32) {
        self.offset.snap_to(offset);
    }

    pub fn value(&self) -> f32 {
        self.offset.value()
    }

    pub fn target(&self) -> f32 {
        self.offset.target()
    }

    pub fn is_running(&self) -> bool {
        self.offset.is_running()
    }

    /// Observable presented offset, updated every frame.
    pub fn presented(&self) -> State<f32> {
        self.offset.state()
    }
}

impl std::fmt::Debug for OffsetAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OffsetAnimator")
            .field("value", &self.value())
            .field("target", &self.target())
            .field("running", &self.is_running())
            .finish()
    }
}
