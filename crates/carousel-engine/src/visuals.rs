//! Per-item emphasis derived from the row offset.
//!
//! Both scale and stacking order depend only on how far an item sits from
//! the viewport center, measured in half-strides and clamped to one. All
//! functions here are pure.

use crate::config::CarouselConfig;

/// Distance of item `index` from the viewport center in half-strides,
/// clamped to `[0, 1]`.
#[inline]
pub fn normalized_distance(index: usize, effective_offset: f32, stride: f32) -> f32 {
    let max_distance = stride / 2.0;
    let distance = (effective_offset + index as f32 * stride).abs();
    // NaN from a zero stride collapses to the far end.
    (distance / max_distance).min(1.0).max(0.0)
}

/// Scale of item `index`: `max` when centered, `min` at half a stride or more.
#[inline]
pub fn item_scale(index: usize, effective_offset: f32, stride: f32, config: &CarouselConfig) -> f32 {
    let normalized = normalized_distance(index, effective_offset, stride);
    let max = config.max_scale_factor;
    let min = config.min_scale_factor;
    let scale = max - normalized * (max - min);
    // Guard rounding at the ends of the interpolation.
    scale.max(min.min(max)).min(max.max(min))
}

/// Stacking order of item `index`: `1.0` when centered, `0.0` at half a
/// stride or more. Items past the threshold tie.
#[inline]
pub fn item_z_order(index: usize, effective_offset: f32, stride: f32) -> f32 {
    let item_position = -effective_offset - index as f32 * stride;
    let max_distance = stride / 2.0;
    let normalized = (item_position.abs() / max_distance).min(1.0).max(0.0);
    1.0 - normalized
}

/// Scale and stacking order for one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemVisual {
    pub scale: f32,
    pub z_order: f32,
}

impl ItemVisual {
    pub fn derive(index: usize, effective_offset: f32, stride: f32, config: &CarouselConfig) -> Self {
        Self {
            scale: item_scale(index, effective_offset, stride, config),
            z_order: item_z_order(index, effective_offset, stride),
        }
    }
}
