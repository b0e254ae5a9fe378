//! The 2D drawing context consumed by widgets.
//!
//! The model is cairo's: a graphics state (transform, clip, source, operator,
//! line width) with a save/restore stack, a current path kept in device space,
//! and off-screen groups that can be turned back into sources or masks.
//!
//! Every surface produced by [`Canvas::pop_group`] or [`Canvas::end_recording`]
//! is owned by the caller until it is handed back with [`Canvas::release`].
//! [`record_group`] and [`record_surface`] wrap the open/close pair so that a
//! failing drawing closure never leaves a surface open.

pub mod raster;

pub use raster::RasterCanvas;

use std::fmt;

use crate::error::Result;
use crate::paint::PaintSource;

/// Compositing operator applied by fill, stroke, paint and mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    /// Replace the destination (bounded by coverage)
    Source,
    /// Paint over the destination
    #[default]
    Over,
    /// Erase the destination (bounded by coverage)
    Clear,
}

/// What an off-screen group keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    ColorAlpha,
    /// Coverage only; color channels are discarded
    Alpha,
}

/// Handle to an off-screen surface owned by a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub(crate) u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, tx: f32, ty: f32);
    fn scale(&mut self, sx: f32, sy: f32);

    fn new_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32);
    /// Circular arc around `(xc, yc)` from `angle1` to `angle2` (radians,
    /// increasing angles). Connects to the current point with a line.
    fn arc(&mut self, xc: f32, yc: f32, radius: f32, angle1: f32, angle2: f32);
    fn close_path(&mut self);

    fn rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close_path();
    }

    /// Make `source` current. Patterns and gradients are locked to the user
    /// space in effect at this call.
    fn set_source(&mut self, source: &PaintSource);
    fn set_source_surface(&mut self, surface: SurfaceId) -> Result<()>;
    fn set_operator(&mut self, operator: Operator);
    fn set_line_width(&mut self, width: f32);

    fn fill_preserve(&mut self) -> Result<()>;
    fn stroke_preserve(&mut self) -> Result<()>;

    fn fill(&mut self) -> Result<()> {
        let result = self.fill_preserve();
        self.new_path();
        result
    }

    fn stroke(&mut self) -> Result<()> {
        let result = self.stroke_preserve();
        self.new_path();
        result
    }

    /// Paint the current source everywhere inside the clip.
    fn paint(&mut self) -> Result<()>;

    /// Intersect the clip with the current path and consume the path.
    fn clip(&mut self);
    fn reset_clip(&mut self);

    /// Paint the current source using the alpha of `surface` as coverage.
    fn mask(&mut self, surface: SurfaceId) -> Result<()>;

    /// Redirect drawing into a transparent group. Saves the graphics state.
    fn push_group(&mut self, content: Content) -> Result<()>;
    /// Finish the innermost group and restore the state saved by its push.
    fn pop_group(&mut self) -> Result<SurfaceId>;

    /// Redirect drawing into a fresh `width` x `height` surface with a reset
    /// state. The surface is placed with the transform current at this call.
    fn begin_recording(&mut self, width: f32, height: f32) -> Result<()>;
    fn end_recording(&mut self) -> Result<SurfaceId>;

    /// Hand a surface back. Unknown handles are ignored.
    fn release(&mut self, surface: SurfaceId);

    /// Number of surfaces popped or recorded but not yet released.
    fn live_surfaces(&self) -> usize;
}

/// Draw `f` into a group and return it as a surface. The group is closed and
/// released if `f` fails.
pub fn record_group<F>(canvas: &mut dyn Canvas, content: Content, f: F) -> Result<SurfaceId>
where
    F: FnOnce(&mut dyn Canvas) -> Result<()>,
{
    canvas.push_group(content)?;
    if let Err(err) = f(canvas) {
        discard_group(canvas);
        return Err(err);
    }
    canvas.pop_group()
}

/// Draw `f` into a recording surface of the given extent.
pub fn record_surface<F>(canvas: &mut dyn Canvas, width: f32, height: f32, f: F) -> Result<SurfaceId>
where
    F: FnOnce(&mut dyn Canvas) -> Result<()>,
{
    canvas.begin_recording(width, height)?;
    if let Err(err) = f(canvas) {
        if let Ok(surface) = canvas.end_recording() {
            canvas.release(surface);
        }
        return Err(err);
    }
    canvas.end_recording()
}

/// Close the innermost group without using it.
pub fn discard_group(canvas: &mut dyn Canvas) {
    if let Ok(surface) = canvas.pop_group() {
        canvas.release(surface);
    }
}
