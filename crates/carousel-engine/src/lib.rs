//! Horizontal carousel engine.
//!
//! Sizes items from the container, derives per-item scale and stacking order
//! from the row offset, and turns drags into snapped paging with momentum.
//! [`CarouselEngine`] holds the state machine; [`Carousel`] wires it to a drag
//! recognizer and a frame-driven [`OffsetAnimator`].

mod animator;
mod carousel;
mod config;
mod engine;
pub mod gesture;
mod indicator;
mod item;
pub mod layout;
mod scroll;
mod transition;
pub mod visuals;

pub use animator::OffsetAnimator;
pub use carousel::Carousel;
pub use config::CarouselConfig;
pub use engine::{CarouselEngine, ItemPlacement, Placements};
pub use gesture::{resolve_release, resolve_target_index, GestureResolution};
pub use indicator::{IndicatorMarker, PageIndicator};
pub use item::CarouselItem;
pub use layout::{item_size, item_stride, ItemLayout};
pub use scroll::{GesturePhase, ScrollSnapshot};
pub use transition::{OffsetTransition, TransitionId, TransitionReason};
pub use visuals::{item_scale, item_z_order, normalized_distance, ItemVisual};

pub mod prelude {
    pub use crate::{
        Carousel, CarouselConfig, CarouselEngine, CarouselItem, GesturePhase, ItemPlacement,
        OffsetTransition, PageIndicator, ScrollSnapshot,
    };
    pub use carousel_core::FrameClock;
    pub use carousel_ui_graphics::{Point, Rect, Size};
}
