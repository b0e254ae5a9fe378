//! Sizes and child placements produced by `fit` and `layout`.

pub use crate::widgets::Rect;
use crate::widgets::Widget;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Grow by `amount` on every side.
    pub fn outset(&self, amount: f32) -> Self {
        Self {
            width: self.width + 2.0 * amount,
            height: self.height + 2.0 * amount,
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::zero()
    }
}

/// A child widget and the rectangle it occupies in its parent's user space.
pub struct Placement<'a> {
    pub widget: &'a dyn Widget,
    pub rect: Rect,
}

impl<'a> Placement<'a> {
    pub fn new(widget: &'a dyn Widget, rect: Rect) -> Self {
        Self { widget, rect }
    }
}

impl std::fmt::Debug for Placement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Placement")
            .field("rect", &self.rect)
            .finish_non_exhaustive()
    }
}
