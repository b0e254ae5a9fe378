use crate::canvas::Canvas;
use crate::context::DrawContext;
use crate::error::Result;
use crate::layout::{Placement, Size};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Shrink by `amount` on every side. The result may have a negative size.
    pub fn inset(&self, amount: f32) -> Self {
        Self {
            x: self.x + amount,
            y: self.y + amount,
            width: self.width - amount * 2.0,
            height: self.height - amount * 2.0,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// A node of the widget tree as seen by the host.
///
/// The host draws a widget in this order, with the canvas user space set to
/// the widget's own `[0, width] x [0, height]` box:
/// `draw`, `before_draw_children`, every placement from `layout` (each
/// translated to its rect), `after_draw_children`.
pub trait Widget {
    /// Preferred size within the available `width` x `height`.
    fn fit(&self, ctx: &DrawContext, width: f32, height: f32) -> Size;

    /// Placements of the children for a `width` x `height` box.
    fn layout(&self, _ctx: &DrawContext, _width: f32, _height: f32) -> Vec<Placement<'_>> {
        Vec::new()
    }

    fn draw(
        &self,
        _ctx: &DrawContext,
        _canvas: &mut dyn Canvas,
        _width: f32,
        _height: f32,
    ) -> Result<()> {
        Ok(())
    }

    fn before_draw_children(
        &self,
        _ctx: &DrawContext,
        _canvas: &mut dyn Canvas,
        _width: f32,
        _height: f32,
    ) -> Result<()> {
        Ok(())
    }

    fn after_draw_children(
        &self,
        _ctx: &DrawContext,
        _canvas: &mut dyn Canvas,
        _width: f32,
        _height: f32,
    ) -> Result<()> {
        Ok(())
    }
}

impl Widget for Box<dyn Widget> {
    fn fit(&self, ctx: &DrawContext, width: f32, height: f32) -> Size {
        (**self).fit(ctx, width, height)
    }
    fn layout(&self, ctx: &DrawContext, width: f32, height: f32) -> Vec<Placement<'_>> {
        (**self).layout(ctx, width, height)
    }
    fn draw(&self, ctx: &DrawContext, canvas: &mut dyn Canvas, width: f32, height: f32) -> Result<()> {
        (**self).draw(ctx, canvas, width, height)
    }
    fn before_draw_children(
        &self,
        ctx: &DrawContext,
        canvas: &mut dyn Canvas,
        width: f32,
        height: f32,
    ) -> Result<()> {
        (**self).before_draw_children(ctx, canvas, width, height)
    }
    fn after_draw_children(
        &self,
        ctx: &DrawContext,
        canvas: &mut dyn Canvas,
        width: f32,
        height: f32,
    ) -> Result<()> {
        (**self).after_draw_children(ctx, canvas, width, height)
    }
}
