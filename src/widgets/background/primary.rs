//! Group-based compositing.
//!
//! With an active shape, everything the decorator and its child draw goes
//! into an off-screen content group. Afterwards the shape path is traced
//! once and reused three times: to cut the border outside the shape, to build
//! the ring mask (shape plus half the stroke), and implicitly as the clip of
//! the final composite.

use crate::canvas::{discard_group, record_group, Canvas, Content, Operator, SurfaceId};
use crate::context::DrawContext;
use crate::error::Result;
use crate::paint::{Color, PaintSource};
use crate::shape::Shape;

use super::Background;

const OPAQUE: PaintSource = PaintSource::Solid(Color::BLACK);
const CLEAR: PaintSource = PaintSource::Solid(Color::TRANSPARENT);

pub(super) fn before_children(
    bg: &Background,
    ctx: &DrawContext,
    canvas: &mut dyn Canvas,
    width: f32,
    height: f32,
) -> Result<()> {
    let shaped = bg.active_shape().is_some();
    if shaped {
        canvas.push_group(Content::ColorAlpha)?;
    }

    let painted = bg
        .paint_bg(canvas, width, height)
        .and_then(|()| bg.paint_bgimage(ctx, canvas, width, height));
    if let Err(err) = painted {
        if shaped {
            discard_group(canvas);
        }
        return Err(err);
    }

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
    let Some(shape) = bg.active_shape() else {
        return Ok(());
    };
    let bw = bg.border_width;

    let ring = trace_interior(canvas, &shape, width, height, bw)
        .and_then(|()| {
            if bw > 0.0 {
                paint_border(canvas, bg.border_source(ctx))
            } else {
                Ok(())
            }
        })
        .and_then(|()| ring_mask(canvas, bw));
    let content = canvas.pop_group();

    match (ring, content) {
        (Ok(ring), Ok(content)) => {
            let result = composite(canvas, content, ring);
            canvas.release(content);
            canvas.release(ring);
            result
        }
        (Ok(ring), Err(err)) => {
            canvas.release(ring);
            canvas.new_path();
            Err(err)
        }
        (Err(err), content) => {
            if let Ok(content) = content {
                canvas.release(content);
            }
            canvas.new_path();
            Err(err)
        }
    }
}

/// Trace the shape inset by the border width on every side.
pub(super) fn trace_interior(
    canvas: &mut dyn Canvas,
    shape: &Shape,
    width: f32,
    height: f32,
    bw: f32,
) -> Result<()> {
    canvas.translate(bw, bw);
    let traced = shape.trace(canvas, width - 2.0 * bw, height - 2.0 * bw);
    canvas.translate(-bw, -bw);
    traced
}

/// Replace everything outside the current path with the border source.
/// The path is preserved.
fn paint_border(canvas: &mut dyn Canvas, border: &PaintSource) -> Result<()> {
    let outside = record_group(canvas, Content::Alpha, |cr| {
        cr.set_operator(Operator::Source);
        cr.set_source(&OPAQUE);
        cr.paint()?;
        cr.set_source(&CLEAR);
        cr.fill_preserve()
    })?;

    canvas.save();
    canvas.set_source(border);
    canvas.set_operator(Operator::Source);
    let result = canvas.mask(outside);
    canvas.restore();
    canvas.release(outside);
    result
}

/// Coverage of the current path grown by `bw` outwards. Consumes the path.
fn ring_mask(canvas: &mut dyn Canvas, bw: f32) -> Result<SurfaceId> {
    record_group(canvas, Content::Alpha, |cr| {
        cr.set_operator(Operator::Over);
        cr.set_source(&OPAQUE);
        cr.set_line_width(2.0 * bw);
        cr.stroke_preserve()?;
        cr.fill()
    })
}

fn composite(canvas: &mut dyn Canvas, content: SurfaceId, ring: SurfaceId) -> Result<()> {
    canvas.save();
    canvas.set_operator(Operator::Over);
    let result = canvas
        .set_source_surface(content)
        .and_then(|()| canvas.mask(ring));
    canvas.restore();
    result
}
