//! Core geometry types for Mosaic.
//!
//! Everything is in CSS pixels, f32, with the origin at the top-left.

use serde::{Deserialize, Serialize};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
///
/// Used both for container-relative placements (what the writer applies)
/// and for viewport-relative bounding boxes (what the culler reads).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Top edge (same as `y`, named for the culler's edge tests).
    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Translate this rectangle by an offset.
    #[inline]
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    /// True when every component is finite (no NaN / infinity).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height, or `None` when either side is unusable.
    #[inline]
    pub fn aspect_ratio(&self) -> Option<f32> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if usable(self.width) && usable(self.height) {
            Some(self.width / self.height)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn rect_translate_keeps_size() {
        let r = Rect::new(0.0, 100.0, 40.0, 30.0).translate(Point::new(0.0, -250.0));
        assert_eq!(r, Rect::new(0.0, -150.0, 40.0, 30.0));
    }

    #[test]
    fn rect_finite() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!Rect::new(0.0, 0.0, f32::NAN, 1.0).is_finite());
        assert!(!Rect::new(0.0, f32::INFINITY, 1.0, 1.0).is_finite());
    }

    #[test]
    fn aspect_ratio_rejects_degenerate_sizes() {
        assert_eq!(Size::new(300.0, 200.0).aspect_ratio(), Some(1.5));
        assert_eq!(Size::new(300.0, 0.0).aspect_ratio(), None);
        assert_eq!(Size::new(0.0, 200.0).aspect_ratio(), None);
        assert_eq!(Size::new(-3.0, 2.0).aspect_ratio(), None);
        assert_eq!(Size::new(f32::INFINITY, 2.0).aspect_ratio(), None);
    }
}
