//! Clip-based compositing for canvases whose groups cannot be reused as
//! sources. The shape clips the background and the child; the border is a
//! band recorded once and masked on top with the clip lifted.

use crate::canvas::{record_surface, Canvas, Operator, SurfaceId};
use crate::context::DrawContext;
use crate::error::Result;
use crate::paint::{Color, PaintSource};
use crate::shape::Shape;

use super::primary::trace_interior;
use super::Background;

pub(super) fn before_children(
    bg: &Background,
    ctx: &DrawContext,
    canvas: &mut dyn Canvas,
    width: f32,
    height: f32,
) -> Result<()> {
    let bw = bg.border_width;
    let shape = bg.active_shape().unwrap_or_else(Shape::rectangle);

    if let Err(err) = trace_interior(canvas, &shape, width, height, bw) {
        canvas.new_path();
        return Err(err);
    }

    if let Some(source) = &bg.bg {
        canvas.save();
        canvas.set_source(source);
        let filled = canvas.fill_preserve();
        canvas.restore();
        if let Err(err) = filled {
            canvas.new_path();
            return Err(err);
        }
    }
    canvas.clip();

    bg.paint_bgimage(ctx, canvas, width, height)?;

    if let Some(fg) = &bg.fg {
        canvas.set_source(fg);
    }
    Ok(())
}

pub(super) fn after_children(
    bg: &Background,
    ctx: &DrawContext,
    canvas: &mut dyn Canvas,
    width: f32,
    height: f32,
) -> Result<()> {
    let bw = bg.border_width;
    if bw <= 0.0 {
        return Ok(());
    }
    let shape = bg.active_shape().unwrap_or_else(Shape::rectangle);

    canvas.save();
    canvas.reset_clip();
    let result = border_band(canvas, &shape, width, height, bw).and_then(|band| {
        canvas.set_source(bg.border_source(ctx));
        canvas.set_operator(Operator::Over);
        let masked = canvas.mask(band);
        canvas.release(band);
        masked
    });
    canvas.restore();
    result
}

/// Coverage of the stroke around the interior outline, minus the interior.
fn border_band(
    canvas: &mut dyn Canvas,
    shape: &Shape,
    width: f32,
    height: f32,
    bw: f32,
) -> Result<SurfaceId> {
    record_surface(canvas, width, height, |cr| {
        cr.set_operator(Operator::Clear);
        cr.paint()?;
        cr.set_operator(Operator::Source);
        cr.set_source(&PaintSource::Solid(Color::BLACK));
        trace_interior(cr, shape, width, height, bw)?;
        cr.set_line_width(2.0 * bw);
        cr.stroke_preserve()?;
        cr.set_operator(Operator::Clear);
        cr.fill()
    })
}
