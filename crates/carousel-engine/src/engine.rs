//! The carousel engine: scroll state plus the drag-to-settle state machine.
//!
//! The engine is a cheap, clonable handle. Every logical change is applied
//! immediately and published through an observable [`ScrollSnapshot`]; moves
//! of the committed offset are additionally described as
//! [`OffsetTransition`]s for an animation driver to play.
//!
//! Observers are invoked synchronously from engine calls. They may read the
//! engine or drive it; a move committed from inside an observer supersedes
//! the one being published, and the outer call returns the newer move.

use std::cell::Cell;
use std::ops::Range;
use std::rc::Rc;

use carousel_core::{MutableState, State, Subscription};
use carousel_ui_graphics::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::config::CarouselConfig;
use crate::gesture::resolve_release;
use crate::item::CarouselItem;
use crate::layout::ItemLayout;
use crate::scroll::{GesturePhase, ScrollSnapshot};
use crate::transition::{OffsetTransition, TransitionId, TransitionReason};
use crate::visuals::ItemVisual;

/// Where and how to draw one visible item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPlacement<K> {
    pub index: usize,
    pub key: K,
    /// Unscaled item size; apply `scale` around `center`.
    pub size: Size,
    pub center: Point,
    pub scale: f32,
    pub z_order: f32,
}

impl<K> ItemPlacement<K> {
    /// Frame after scaling around the center.
    pub fn frame(&self) -> Rect {
        Rect::from_center(self.center, self.size.scaled(self.scale))
    }
}

pub type Placements<K> = SmallVec<[ItemPlacement<K>; 8]>;

struct EngineInner {
    config: CarouselConfig,
    item_count: usize,
    layout: Cell<Option<ItemLayout>>,
    mounted: Cell<bool>,
    next_transition_id: Cell<TransitionId>,
    snapshot: MutableState<ScrollSnapshot>,
    transitions: MutableState<Option<OffsetTransition>>,
}

/// Carousel engine handle. Clones share state.
#[derive(Clone)]
pub struct CarouselEngine {
    inner: Rc<EngineInner>,
}

impl std::fmt::Debug for CarouselEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselEngine")
            .field("config", &self.inner.config)
            .field("item_count", &self.inner.item_count)
            .field("layout", &self.inner.layout.get())
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

impl CarouselEngine {
    pub fn new(config: CarouselConfig, item_count: usize) -> Self {
        config.check();
        Self {
            inner: Rc::new(EngineInner {
                config,
                item_count,
                layout: Cell::new(None),
                mounted: Cell::new(false),
                next_transition_id: Cell::new(1),
                snapshot: MutableState::new(ScrollSnapshot::new(item_count)),
                transitions: MutableState::new(None),
            }),
        }
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.inner.config
    }

    pub fn item_count(&self) -> usize {
        self.inner.item_count
    }

    /// Geometry of the last measure pass, if any.
    pub fn layout(&self) -> Option<ItemLayout> {
        self.inner.layout.get()
    }

    /// Stride of the last measure pass, zero before the first.
    pub fn stride(&self) -> f32 {
        self.layout().map_or(0.0, |layout| layout.stride)
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        self.inner.snapshot.get()
    }

    pub fn resting_index(&self) -> usize {
        self.inner.snapshot.with(|snapshot| snapshot.resting_index)
    }

    pub fn committed_offset(&self) -> f32 {
        self.inner.snapshot.with(|snapshot| snapshot.committed_offset)
    }

    pub fn effective_offset(&self) -> f32 {
        self.inner.snapshot.with(ScrollSnapshot::effective_offset)
    }

    pub fn phase(&self) -> GesturePhase {
        self.inner.snapshot.with(|snapshot| snapshot.phase)
    }

    /// Observable scroll state.
    pub fn state(&self) -> State<ScrollSnapshot> {
        self.inner.snapshot.as_state()
    }

    pub fn subscribe(&self, observer: impl Fn(&ScrollSnapshot) + 'static) -> Subscription {
        self.inner.snapshot.subscribe(observer)
    }

    /// Observe only changes of the resting index.
    pub fn on_resting_index_changed(&self, observer: impl Fn(usize) + 'static) -> Subscription {
        let last = Cell::new(self.resting_index());
        self.inner.snapshot.subscribe(move |snapshot| {
            if last.replace(snapshot.resting_index) != snapshot.resting_index {
                observer(snapshot.resting_index);
            }
        })
    }

    /// Observable stream of transition requests; holds the latest one.
    pub fn transitions(&self) -> State<Option<OffsetTransition>> {
        self.inner.transitions.as_state()
    }

    /// Apply container bounds from a layout pass.
    ///
    /// The first call centers the row on the middle item and returns the
    /// centering transition. Later calls with a new stride re-derive the
    /// committed offset for the resting index without animating.
    pub fn measure(&self, container: Size) -> Option<OffsetTransition> {
        let layout = ItemLayout::measure(container, self.inner.config.item_aspect_ratio);
        let previous = self.inner.layout.replace(Some(layout));

        if !self.inner.mounted.replace(true) {
            return self.center_initially(&layout);
        }

        let stride_changed = previous.map_or(true, |previous| previous.stride != layout.stride);
        if stride_changed {
            let resting_index = self.resting_index();
            let committed_offset = -(resting_index as f32) * layout.stride;
            log::debug!(
                "carousel resized to {:?}: stride {}, committed offset {}",
                container,
                layout.stride,
                committed_offset
            );
            self.inner.snapshot.update(|snapshot| {
                snapshot.committed_offset = committed_offset;
                // An in-flight settle targets the old geometry.
                if matches!(snapshot.phase, GesturePhase::Settling { .. }) {
                    snapshot.phase = GesturePhase::Idle;
                }
            });
        }
        None
    }

    fn center_initially(&self, layout: &ItemLayout) -> Option<OffsetTransition> {
        let count = self.inner.item_count;
        if count == 0 {
            log::debug!("carousel has no items; skipping initial centering");
            return None;
        }

        let resting_index = (count / 2).min(count - 1);
        let committed_offset = -(resting_index as f32) * layout.stride;
        log::debug!(
            "carousel centering on item {} of {} (offset {})",
            resting_index,
            count,
            committed_offset
        );
        if self.phase() == GesturePhase::Dragging {
            // Rebase the drag onto the centered item; release settles it.
            self.inner.snapshot.update(|snapshot| {
                snapshot.resting_index = resting_index;
                snapshot.committed_offset = committed_offset;
            });
            return None;
        }
        let from_offset = self.committed_offset();
        self.commit(
            resting_index,
            committed_offset,
            from_offset,
            TransitionReason::InitialCentering,
        )
    }

    /// Enter the dragging state. No-op while already dragging.
    pub fn begin_drag(&self) {
        if self.phase() == GesturePhase::Dragging {
            return;
        }
        log::trace!("carousel drag began at offset {}", self.committed_offset());
        self.inner.snapshot.update(|snapshot| {
            snapshot.drag_delta = 0.0;
            snapshot.phase = GesturePhase::Dragging;
        });
    }

    /// Report the horizontal translation since the drag began.
    pub fn update_drag(&self, translation: f32) {
        if !translation.is_finite() {
            log::warn!("ignoring non-finite drag translation {}", translation);
            return;
        }
        if self.phase() != GesturePhase::Dragging {
            self.begin_drag();
        }
        log::trace!("carousel drag translation {}", translation);
        self.inner.snapshot.update(|snapshot| snapshot.drag_delta = translation);
    }

    /// Release the drag and snap to the item momentum would reach.
    ///
    /// `translation` is where the pointer let go; `predicted_translation`
    /// extrapolates the release velocity. Returns the settle transition, or
    /// `None` if no drag was active or the row did not move.
    pub fn end_drag(&self, translation: f32, predicted_translation: f32) -> Option<OffsetTransition> {
        let snapshot = self.snapshot();
        if snapshot.phase != GesturePhase::Dragging {
            return None;
        }

        let committed_before = snapshot.committed_offset;
        let released_offset = committed_before + translation;
        let (resting_index, committed_offset) = match resolve_release(
            committed_before,
            predicted_translation,
            self.stride(),
            self.inner.item_count,
        ) {
            Some(resolution) => {
                log::debug!(
                    "carousel drag released: predicted offset {} resolves to item {}",
                    resolution.predicted_offset,
                    resolution.target_index
                );
                (resolution.target_index, resolution.committed_offset)
            }
            None => (snapshot.resting_index, committed_before),
        };

        let from_offset = if released_offset.is_finite() {
            released_offset
        } else {
            committed_before
        };
        self.commit(
            resting_index,
            committed_offset,
            from_offset,
            TransitionReason::GestureSettle,
        )
    }

    /// Abandon the drag without changing committed state.
    pub fn cancel_drag(&self) {
        if self.phase() != GesturePhase::Dragging {
            return;
        }
        log::debug!("carousel drag cancelled");
        self.inner.snapshot.update(|snapshot| {
            snapshot.drag_delta = 0.0;
            snapshot.phase = GesturePhase::Idle;
        });
    }

    /// Settle on `index`, clamped into the row. Ignored while dragging.
    pub fn scroll_to_index(&self, index: usize) -> Option<OffsetTransition> {
        let count = self.inner.item_count;
        let snapshot = self.snapshot();
        if count == 0 || snapshot.phase == GesturePhase::Dragging {
            return None;
        }
        let target = index.min(count - 1);
        if target == snapshot.resting_index {
            return None;
        }
        let committed_offset = -(target as f32) * self.stride();
        self.commit(
            target,
            committed_offset,
            snapshot.committed_offset,
            TransitionReason::Programmatic,
        )
    }

    pub fn next(&self) -> Option<OffsetTransition> {
        self.scroll_to_index(self.resting_index().saturating_add(1))
    }

    pub fn previous(&self) -> Option<OffsetTransition> {
        let resting_index = self.resting_index();
        if resting_index == 0 {
            return None;
        }
        self.scroll_to_index(resting_index - 1)
    }

    /// The driver finished playing transition `id`. Stale ids are ignored.
    pub fn transition_finished(&self, id: TransitionId) {
        if self.phase() == (GesturePhase::Settling { transition: id }) {
            log::trace!("carousel settle {} finished", id);
            self.inner
                .snapshot
                .update(|snapshot| snapshot.phase = GesturePhase::Idle);
        }
    }

    /// Commit a resting index and publish the move from `from_offset`.
    fn commit(
        &self,
        resting_index: usize,
        committed_offset: f32,
        from_offset: f32,
        reason: TransitionReason,
    ) -> Option<OffsetTransition> {
        let transition = (from_offset != committed_offset).then(|| {
            let id = self.inner.next_transition_id.get();
            self.inner.next_transition_id.set(id + 1);
            let spring = self.inner.config.settle_spring;
            OffsetTransition {
                id,
                from_offset,
                to_offset: committed_offset,
                duration_secs: spring.response(),
                curve: spring,
                reason,
            }
        });

        self.inner.snapshot.update(|snapshot| {
            snapshot.resting_index = resting_index;
            snapshot.committed_offset = committed_offset;
            snapshot.drag_delta = 0.0;
            snapshot.phase = match &transition {
                Some(transition) => GesturePhase::Settling {
                    transition: transition.id,
                },
                None => GesturePhase::Idle,
            };
        });
        if let Some(transition) = transition {
            if self.phase() == (GesturePhase::Settling { transition: transition.id }) {
                self.inner.transitions.set(Some(transition));
            }
        }
        // Observers may have committed a newer move while this one was
        // being published.
        self.current_transition()
    }

    /// The published transition the engine is settling on, if any.
    fn current_transition(&self) -> Option<OffsetTransition> {
        let GesturePhase::Settling { transition: id } = self.phase() else {
            return None;
        };
        self.inner
            .transitions
            .with(|latest| latest.filter(|transition| transition.id == id))
    }

    /// Scale and stacking order of item `index` at the current offset.
    pub fn item_visual(&self, index: usize) -> ItemVisual {
        self.item_visual_at(index, self.effective_offset())
    }

    pub fn item_visual_at(&self, index: usize, offset: f32) -> ItemVisual {
        ItemVisual::derive(index, offset, self.stride(), &self.inner.config)
    }

    /// Indices intersecting the container at `offset`.
    pub fn visible_range(&self, offset: f32) -> Range<usize> {
        match self.layout() {
            Some(layout) => layout.visible_range(
                offset,
                self.inner.item_count,
                self.inner.config.max_scale_factor.max(self.inner.config.min_scale_factor),
            ),
            None => 0..0,
        }
    }

    /// Placements of the items whose scaled frame overlaps the container at
    /// `offset`, ordered by index.
    pub fn placements<T: CarouselItem>(&self, items: &[T], offset: f32) -> Placements<T::Key> {
        let Some(layout) = self.layout() else {
            return Placements::new();
        };
        if items.len() != self.inner.item_count {
            log::warn!(
                "carousel built for {} items was given {}",
                self.inner.item_count,
                items.len()
            );
        }
        let range = self.visible_range(offset);
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        let viewport = Rect::from_size(layout.container);

        items[start..end]
            .iter()
            .enumerate()
            .filter_map(|(position, item)| {
                let index = start + position;
                let visual = ItemVisual::derive(index, offset, layout.stride, &self.inner.config);
                // The range assumes every item at max scale; cull by the real frame.
                let center = layout.item_center(index, offset);
                let frame = Rect::from_center(center, layout.item_size.scaled(visual.scale));
                frame
                    .intersects_horizontally(&viewport)
                    .then(|| ItemPlacement {
                        index,
                        key: item.key(),
                        size: layout.item_size,
                        center,
                        scale: visual.scale,
                        z_order: visual.z_order,
                    })
            })
            .collect()
    }

    /// Call `render` once per visible item at `offset`.
    pub fn compose<T, R>(
        &self,
        items: &[T],
        offset: f32,
        mut render: impl FnMut(&ItemPlacement<T::Key>, &T) -> R,
    ) -> Vec<R>
    where
        T: CarouselItem,
    {
        self.placements(items, offset)
            .iter()
            .map(|placement| render(placement, &items[placement.index]))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
