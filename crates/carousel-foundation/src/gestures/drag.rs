//! Horizontal drag recognizer.
//!
//! Turns raw pointer samples into drag events. A press only becomes a drag
//! once it travels past the touch slop; from then on every move reports the
//! translation from the press position. On release the recognizer estimates
//! the release velocity and predicts where momentum would carry the
//! translation.

use carousel_animation::{DecaySpec, SplineBasedDecaySpec};
use web_time::Instant;

use crate::gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
use crate::velocity_tracker::VelocityTracker1D;

/// Output of [`DragGesture`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// The press crossed the touch slop.
    Started { translation: f32 },
    Updated { translation: f32 },
    Ended {
        translation: f32,
        /// Translation once release momentum has decayed.
        predicted_translation: f32,
        /// Release velocity in px/s, clamped to the maximum fling velocity.
        velocity: f32,
    },
    /// The host abandoned the pointer stream mid-drag.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragPhase {
    Idle,
    Pressed { press_x: f32 },
    Dragging { press_x: f32 },
}

/// Horizontal drag recognizer with momentum prediction.
#[derive(Debug, Clone)]
pub struct DragGesture<D = SplineBasedDecaySpec> {
    phase: DragPhase,
    tracker: VelocityTracker1D,
    decay: D,
    touch_slop: f32,
    max_velocity: f32,
    origin: Instant,
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl DragGesture {
    pub fn new() -> Self {
        Self::with_decay(SplineBasedDecaySpec::default())
    }
}

impl<D: DecaySpec> DragGesture<D> {
    pub fn with_decay(decay: D) -> Self {
        Self {
            phase: DragPhase::Idle,
            tracker: VelocityTracker1D::new(),
            decay,
            touch_slop: DRAG_THRESHOLD,
            max_velocity: MAX_FLING_VELOCITY,
            origin: Instant::now(),
        }
    }

    /// Override the touch slop, e.g. scaled by display density.
    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop.max(0.0);
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    pub fn is_pressed(&self) -> bool {
        !matches!(self.phase, DragPhase::Idle)
    }

    /// Pointer went down at `x`. Restarts tracking if a stream was in flight.
    pub fn press(&mut self, time_ms: i64, x: f32) {
        self.tracker.reset();
        self.tracker.add_position(time_ms, x);
        self.phase = DragPhase::Pressed { press_x: x };
    }

    pub fn move_to(&mut self, time_ms: i64, x: f32) -> Option<DragEvent> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Pressed { press_x } => {
                self.tracker.add_position(time_ms, x);
                let translation = x - press_x;
                if translation.abs() > self.touch_slop {
                    self.phase = DragPhase::Dragging { press_x };
                    log::trace!("drag started, translation {translation}");
                    Some(DragEvent::Started { translation })
                } else {
                    None
                }
            }
            DragPhase::Dragging { press_x } => {
                self.tracker.add_position(time_ms, x);
                Some(DragEvent::Updated {
                    translation: x - press_x,
                })
            }
        }
    }

    /// Pointer went up. Returns `None` for a press that never became a drag.
    pub fn release(&mut self, time_ms: i64, x: f32) -> Option<DragEvent> {
        let phase = std::mem::replace(&mut self.phase, DragPhase::Idle);
        let DragPhase::Dragging { press_x } = phase else {
            self.tracker.reset();
            return None;
        };

        self.tracker.add_position(time_ms, x);
        let translation = x - press_x;
        let velocity = self.tracker.velocity_clamped(self.max_velocity);
        let predicted_translation = self.decay.target_value(translation, velocity);
        self.tracker.reset();

        log::trace!(
            "drag ended: translation {translation}, velocity {velocity}, predicted {predicted_translation}"
        );
        Some(DragEvent::Ended {
            translation,
            predicted_translation,
            velocity,
        })
    }

    /// Host cancelled the pointer stream.
    pub fn cancel(&mut self) -> Option<DragEvent> {
        let was_dragging = self.is_dragging();
        self.phase = DragPhase::Idle;
        self.tracker.reset();
        was_dragging.then_some(DragEvent::Cancelled)
    }

    pub fn press_now(&mut self, x: f32) {
        let now = self.now_ms();
        self.press(now, x);
    }

    pub fn move_now(&mut self, x: f32) -> Option<DragEvent> {
        let now = self.now_ms();
        self.move_to(now, x)
    }

    pub fn release_now(&mut self, x: f32) -> Option<DragEvent> {
        let now = self.now_ms();
        self.release(now, x)
    }

    /// Milliseconds since the recognizer was created.
    fn now_ms(&self) -> i64 {
        self.origin.elapsed().as_millis() as i64
    }
}
