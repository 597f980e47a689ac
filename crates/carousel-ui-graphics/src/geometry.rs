//! Geometric primitives: Point, Size, Rect

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Uniformly scale both dimensions.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    /// Rectangle of `size` whose center sits at `center`.
    pub fn from_center(center: Point, size: Size) -> Self {
        Self {
            x: center.x - size.width / 2.0,
            y: center.y - size.height / 2.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the horizontal extents of the two rectangles overlap.
    pub fn intersects_horizontally(&self, other: &Rect) -> bool {
        self.x < other.x + other.width && other.x < self.x + self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_center_round_trips_center() {
        let rect = Rect::from_center(Point::new(50.0, 20.0), Size::new(10.0, 4.0));
        assert_eq!(rect.x, 45.0);
        assert_eq!(rect.y, 18.0);
        assert_eq!(rect.center(), Point::new(50.0, 20.0));
    }

    #[test]
    fn horizontal_intersection_ignores_touching_edges() {
        let a = Rect::from_size(Size::new(10.0, 10.0));
        let touching = Rect::from_center(Point::new(15.0, 5.0), Size::new(10.0, 10.0));
        let below = Rect::from_center(Point::new(14.5, 105.0), Size::new(10.0, 10.0));
        assert!(!a.intersects_horizontally(&touching));
        assert!(a.intersects_horizontally(&below));
    }

    #[test]
    fn scaling_keeps_aspect() {
        assert_eq!(Size::new(4.0, 2.0).scaled(1.5), Size::new(6.0, 3.0));
        assert_eq!(Size::ZERO.scaled(3.0), Size::ZERO);
    }
}
