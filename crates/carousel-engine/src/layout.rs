//! Item sizing and horizontal placement.

use std::ops::Range;

use carousel_ui_graphics::{Point, Rect, Size};

/// Largest share of the container width one item may take, leaving room
/// for a partially visible neighbor on each side.
const MAX_WIDTH_FRACTION: f32 = 0.5;

/// Uniform item size for a container and aspect ratio.
///
/// `width = min(container.width * 0.5, container.height * aspect_ratio)`,
/// `height = width / aspect_ratio`. Degenerate inputs give a degenerate size.
pub fn item_size(container: Size, aspect_ratio: f32) -> Size {
    let width = (container.width * MAX_WIDTH_FRACTION).min(container.height * aspect_ratio);
    let height = if width == 0.0 { 0.0 } else { width / aspect_ratio };
    Size::new(width, height)
}

/// Distance between the centers of two adjacent items.
#[inline]
pub fn item_stride(item_width: f32) -> f32 {
    item_width + item_width / 2.0
}

/// Geometry derived from one measure pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemLayout {
    pub container: Size,
    pub item_size: Size,
    pub stride: f32,
}

impl ItemLayout {
    pub fn measure(container: Size, aspect_ratio: f32) -> Self {
        let item_size = item_size(container, aspect_ratio);
        Self {
            container,
            item_size,
            stride: item_stride(item_size.width),
        }
    }

    /// Whether paging has a usable unit of distance.
    pub fn has_stride(&self) -> bool {
        self.stride > 0.0 && self.stride.is_finite()
    }

    /// Center of item `index` in container coordinates for a row offset.
    pub fn item_center(&self, index: usize, offset: f32) -> Point {
        Point::new(
            self.container.width / 2.0 + offset + index as f32 * self.stride,
            self.container.height / 2.0,
        )
    }

    /// Frame of item `index` after scaling around its center.
    pub fn item_frame(&self, index: usize, offset: f32, scale: f32) -> Rect {
        Rect::from_center(self.item_center(index, offset), self.item_size.scaled(scale))
    }

    /// Indices whose frame, scaled by `max_scale`, overlaps the container.
    pub fn visible_range(&self, offset: f32, item_count: usize, max_scale: f32) -> Range<usize> {
        if item_count == 0 || !self.has_stride() || self.container.width <= 0.0 {
            return 0..0;
        }

        let reach = self.container.width / 2.0 + self.item_size.width * max_scale.abs() / 2.0;
        let is_visible = |index: usize| (offset + index as f32 * self.stride).abs() < reach;

        // Estimate, widen by one on each side, then trim with the exact test.
        let last = item_count - 1;
        let lower = ((-reach - offset) / self.stride).floor().max(0.0);
        let upper = ((reach - offset) / self.stride).ceil().min(last as f32);
        if !(lower <= upper) {
            return 0..0;
        }
        let mut start = (lower as usize).saturating_sub(1);
        let mut end = (upper as usize + 1).min(last) + 1;

        while start < end && !is_visible(start) {
            start += 1;
        }
        while end > start && !is_visible(end - 1) {
            end -= 1;
        }
        start..end
    }
}
