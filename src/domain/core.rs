//! Core geometry types for the preview surface
//!
//! Everything is expressed in whole preview pixels. The renderer converts
//! to tiny-skia floating point rectangles only at draw time.

/// Rectangle in preview pixel coordinates
///
/// This is the building block for the preview layout: label buttons,
/// the grid frame and every cell are plain `Rect`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Returns true if this rectangle contains the given point
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Returns the center point, rounded towards the top-left
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Shrinks the rectangle by `amount` on every side
    ///
    /// Never produces negative dimensions; a rectangle too small to shrink
    /// collapses to zero width/height at its center.
    pub fn inset(&self, amount: i32) -> Rect {
        let w = (self.w - amount * 2).max(0);
        let h = (self.h - amount * 2).max(0);
        let x = if w == 0 { self.x + self.w / 2 } else { self.x + amount };
        let y = if h == 0 { self.y + self.h / 2 } else { self.y + amount };
        Rect::new(x, y, w, h)
    }

    /// Returns true if the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}
