//! Pointer-driven carousel: engine, drag recognizer and offset animator
//! wired together.

use carousel_animation::{DecaySpec, SplineBasedDecaySpec};
use carousel_core::{FrameClock, State};
use carousel_foundation::{DragEvent, DragGesture};
use carousel_ui_graphics::Size;

use crate::animator::OffsetAnimator;
use crate::config::CarouselConfig;
use crate::engine::{CarouselEngine, ItemPlacement, Placements};
use crate::indicator::PageIndicator;
use crate::item::CarouselItem;
use crate::scroll::GesturePhase;
use crate::transition::OffsetTransition;

/// A carousel driven by raw pointer samples and a frame clock.
///
/// The host forwards layout bounds and pointer events, pumps the frame
/// clock, and draws [`Carousel::placements`] at [`Carousel::display_offset`].
pub struct Carousel<D: DecaySpec = SplineBasedDecaySpec> {
    engine: CarouselEngine,
    gesture: DragGesture<D>,
    animator: OffsetAnimator,
}

impl Carousel {
    pub fn new(config: CarouselConfig, item_count: usize, clock: FrameClock) -> Self {
        Self::with_gesture(config, item_count, clock, DragGesture::new())
    }
}

impl<D: DecaySpec> Carousel<D> {
    pub fn with_gesture(
        config: CarouselConfig,
        item_count: usize,
        clock: FrameClock,
        gesture: DragGesture<D>,
    ) -> Self {
        let engine = CarouselEngine::new(config, item_count);
        let animator = OffsetAnimator::new(engine.committed_offset(), clock);
        Self {
            engine,
            gesture,
            animator,
        }
    }

    pub fn engine(&self) -> &CarouselEngine {
        &self.engine
    }

    pub fn animator(&self) -> &OffsetAnimator {
        &self.animator
    }

    /// Forward container bounds from a layout pass.
    pub fn measure(&mut self, container: Size) {
        if let Some(transition) = self.engine.measure(container) {
            self.run_transition(&transition);
            return;
        }
        // A resize re-derives the committed offset without animating.
        match self.engine.phase() {
            GesturePhase::Idle => {
                if self.animator.is_running()
                    || self.animator.value() != self.engine.committed_offset()
                {
                    self.animator.stop_at(self.engine.committed_offset());
                }
            }
            GesturePhase::Dragging | GesturePhase::Settling { .. } => {}
        }
    }

    /// Start a pointer stream. A drag the previous stream left unfinished
    /// is abandoned first.
    pub fn pointer_down(&mut self, time_ms: i64, x: f32) {
        if self.engine.phase() == GesturePhase::Dragging {
            log::debug!("carousel press while dragging; abandoning the drag");
            self.engine.cancel_drag();
            self.animator.stop_at(self.engine.committed_offset());
        }
        self.gesture.press(time_ms, x);
    }

    /// Returns the drag event the move produced, if any, so the host can
    /// decide whether to consume the pointer.
    pub fn pointer_move(&mut self, time_ms: i64, x: f32) -> Option<DragEvent> {
        let event = self.gesture.move_to(time_ms, x)?;
        match event {
            DragEvent::Started { translation } => {
                // The drag starts from committed state, even mid-settle.
                self.animator.stop_at(self.engine.committed_offset());
                self.engine.begin_drag();
                self.engine.update_drag(translation);
            }
            DragEvent::Updated { translation } => self.engine.update_drag(translation),
            DragEvent::Ended { .. } | DragEvent::Cancelled => {}
        }
        Some(event)
    }

    /// Release the pointer. Returns the settle transition a drag produced.
    pub fn pointer_up(&mut self, time_ms: i64, x: f32) -> Option<OffsetTransition> {
        let DragEvent::Ended {
            translation,
            predicted_translation,
            ..
        } = self.gesture.release(time_ms, x)?
        else {
            return None;
        };

        match self.engine.end_drag(translation, predicted_translation) {
            Some(transition) => {
                self.run_transition(&transition);
                Some(transition)
            }
            None => {
                self.animator.stop_at(self.engine.committed_offset());
                None
            }
        }
    }

    /// The host abandoned the pointer stream.
    pub fn pointer_cancel(&mut self) {
        if self.gesture.cancel().is_some() {
            self.engine.cancel_drag();
            self.animator.stop_at(self.engine.committed_offset());
        }
    }

    pub fn scroll_to_index(&self, index: usize) -> Option<OffsetTransition> {
        let transition = self.engine.scroll_to_index(index)?;
        self.run_transition(&transition);
        Some(transition)
    }

    pub fn next(&self) -> Option<OffsetTransition> {
        let transition = self.engine.next()?;
        self.run_transition(&transition);
        Some(transition)
    }

    pub fn previous(&self) -> Option<OffsetTransition> {
        let transition = self.engine.previous()?;
        self.run_transition(&transition);
        Some(transition)
    }

    fn run_transition(&self, transition: &OffsetTransition) {
        let engine = self.engine.clone();
        let id = transition.id;
        self.animator
            .run(transition, move || engine.transition_finished(id));
    }

    /// Offset to draw the row at this frame.
    pub fn display_offset(&self) -> f32 {
        if self.engine.phase() == GesturePhase::Dragging {
            self.engine.effective_offset()
        } else if self.animator.is_running() {
            self.animator.value()
        } else {
            self.engine.committed_offset()
        }
    }

    /// Observable animated offset.
    pub fn presented_offset(&self) -> State<f32> {
        self.animator.presented()
    }

    pub fn resting_index(&self) -> usize {
        self.engine.resting_index()
    }

    pub fn placements<T: CarouselItem>(&self, items: &[T]) -> Placements<T::Key> {
        self.engine.placements(items, self.display_offset())
    }

    pub fn compose<T, R>(
        &self,
        items: &[T],
        render: impl FnMut(&ItemPlacement<T::Key>, &T) -> R,
    ) -> Vec<R>
    where
        T: CarouselItem,
    {
        self.engine.compose(items, self.display_offset(), render)
    }

    pub fn page_indicator(&self) -> PageIndicator {
        PageIndicator::from_snapshot(&self.engine.snapshot())
    }
}
