//! Per-instance carousel configuration.

use carousel_animation::SpringSpec;

/// Immutable configuration of one carousel.
///
/// Values are validated by convention: a non-positive aspect ratio or a
/// minimum scale above the maximum degrade the output instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Item width divided by item height.
    pub item_aspect_ratio: f32,
    /// Scale of the centered item.
    pub max_scale_factor: f32,
    /// Scale of items half a stride or more away from the center.
    pub min_scale_factor: f32,
    /// Spring used for centering and settle transitions.
    pub settle_spring: SpringSpec,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            item_aspect_ratio: 1.0,
            max_scale_factor: 1.2,
            min_scale_factor: 1.0,
            settle_spring: SpringSpec::settle(),
        }
    }
}

impl CarouselConfig {
    pub fn with_item_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.item_aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_scale_range(mut self, min_scale_factor: f32, max_scale_factor: f32) -> Self {
        self.min_scale_factor = min_scale_factor;
        self.max_scale_factor = max_scale_factor;
        self
    }

    pub fn with_settle_spring(mut self, spring: SpringSpec) -> Self {
        self.settle_spring = spring;
        self
    }

    /// Warn about values that will produce degenerate output.
    pub(crate) fn check(&self) {
        if self.min_scale_factor > self.max_scale_factor {
            log::warn!(
                "carousel min scale factor {} exceeds max scale factor {}; scaling is inverted",
                self.min_scale_factor,
                self.max_scale_factor
            );
        }
        if !(self.item_aspect_ratio > 0.0) {
            log::warn!(
                "carousel aspect ratio {} is not positive; item size will be degenerate",
                self.item_aspect_ratio
            );
        }
        if !(self.min_scale_factor > 0.0) {
            log::warn!(
                "carousel min scale factor {} is not positive",
                self.min_scale_factor
            );
        }
    }
}
