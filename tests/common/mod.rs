#![allow(dead_code)]

use backdrop::canvas::{Canvas, Content, Operator, SurfaceId};
use backdrop::error::{DrawError, Result};
use backdrop::paint::{Color, PaintSource};
use backdrop::prelude::*;

/// Canvas wrapper counting off-screen surfaces opened, closed and released,
/// with an optional injected allocation failure.
pub struct CountingCanvas<C> {
    pub inner: C,
    pub groups_pushed: usize,
    pub groups_popped: usize,
    pub recordings_begun: usize,
    pub recordings_ended: usize,
    pub released: usize,
    /// Fail the n-th (0-based) push_group/begin_recording
    pub fail_open_at: Option<usize>,
    opens: usize,
}

impl<C: Canvas> CountingCanvas<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            groups_pushed: 0,
            groups_popped: 0,
            recordings_begun: 0,
            recordings_ended: 0,
            released: 0,
            fail_open_at: None,
            opens: 0,
        }
    }

    pub fn failing_open_at(mut self, index: usize) -> Self {
        self.fail_open_at = Some(index);
        self
    }

    pub fn opened(&self) -> usize {
        self.groups_pushed + self.recordings_begun
    }

    pub fn closed(&self) -> usize {
        self.groups_popped + self.recordings_ended
    }

    fn open(&mut self) -> Result<()> {
        let index = self.opens;
        self.opens += 1;
        if self.fail_open_at == Some(index) {
            return Err(DrawError::SurfaceAllocation {
                width: 0,
                height: 0,
            });
        }
        Ok(())
    }
}

impl<C: Canvas> Canvas for CountingCanvas<C> {
    fn save(&mut self) {
        self.inner.save()
    }
    fn restore(&mut self) {
        self.inner.restore()
    }
    fn translate(&mut self, tx: f32, ty: f32) {
        self.inner.translate(tx, ty)
    }
    fn scale(&mut self, sx: f32, sy: f32) {
        self.inner.scale(sx, sy)
    }
    fn new_path(&mut self) {
        self.inner.new_path()
    }
    fn move_to(&mut self, x: f32, y: f32) {
        self.inner.move_to(x, y)
    }
    fn line_to(&mut self, x: f32, y: f32) {
        self.inner.line_to(x, y)
    }
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.inner.curve_to(x1, y1, x2, y2, x, y)
    }
    fn arc(&mut self, xc: f32, yc: f32, radius: f32, angle1: f32, angle2: f32) {
        self.inner.arc(xc, yc, radius, angle1, angle2)
    }
    fn close_path(&mut self) {
        self.inner.close_path()
    }
    fn set_source(&mut self, source: &PaintSource) {
        self.inner.set_source(source)
    }
    fn set_source_surface(&mut self, surface: SurfaceId) -> Result<()> {
        self.inner.set_source_surface(surface)
    }
    fn set_operator(&mut self, operator: Operator) {
        self.inner.set_operator(operator)
    }
    fn set_line_width(&mut self, width: f32) {
        self.inner.set_line_width(width)
    }
    fn fill_preserve(&mut self) -> Result<()> {
        self.inner.fill_preserve()
    }
    fn stroke_preserve(&mut self) -> Result<()> {
        self.inner.stroke_preserve()
    }
    fn paint(&mut self) -> Result<()> {
        self.inner.paint()
    }
    fn clip(&mut self) {
        self.inner.clip()
    }
    fn reset_clip(&mut self) {
        self.inner.reset_clip()
    }
    fn mask(&mut self, surface: SurfaceId) -> Result<()> {
        self.inner.mask(surface)
    }
    fn push_group(&mut self, content: Content) -> Result<()> {
        self.open()?;
        self.inner.push_group(content)?;
        self.groups_pushed += 1;
        Ok(())
    }
    fn pop_group(&mut self) -> Result<SurfaceId> {
        let surface = self.inner.pop_group()?;
        self.groups_popped += 1;
        Ok(surface)
    }
    fn begin_recording(&mut self, width: f32, height: f32) -> Result<()> {
        self.open()?;
        self.inner.begin_recording(width, height)?;
        self.recordings_begun += 1;
        Ok(())
    }
    fn end_recording(&mut self) -> Result<SurfaceId> {
        let surface = self.inner.end_recording()?;
        self.recordings_ended += 1;
        Ok(surface)
    }
    fn release(&mut self, surface: SurfaceId) {
        self.released += 1;
        self.inner.release(surface)
    }
    fn live_surfaces(&self) -> usize {
        self.inner.live_surfaces()
    }
}

/// Leaf widget filling its whole box with the inherited source.
pub struct Fill(pub Size);

impl Widget for Fill {
    fn fit(&self, _ctx: &DrawContext, _width: f32, _height: f32) -> Size {
        self.0
    }

    fn draw(&self, _ctx: &DrawContext, canvas: &mut dyn Canvas, width: f32, height: f32) -> Result<()> {
        canvas.rectangle(0.0, 0.0, width, height);
        canvas.fill()
    }
}

/// Leaf widget whose draw always fails.
pub struct Broken;

impl Widget for Broken {
    fn fit(&self, _ctx: &DrawContext, width: f32, height: f32) -> Size {
        Size::new(width, height)
    }

    fn draw(&self, _: &DrawContext, _: &mut dyn Canvas, _: f32, _: f32) -> Result<()> {
        Err(DrawError::Callback("broken child".into()))
    }
}

pub fn solid(color: Color) -> PaintSource {
    PaintSource::Solid(color)
}

/// Straight-alpha RGBA of a pixel.
pub fn px(canvas: &RasterCanvas, x: u32, y: u32) -> [u8; 4] {
    canvas
        .pixel_rgba(x, y)
        .unwrap_or_else(|| panic!("pixel ({x}, {y}) out of bounds"))
}

/// The 100x50 decorator with a 5px border around a rounded rect of radius 10.
pub fn bordered(pipeline: Pipeline) -> Background {
    background()
        .with_bg(Color::BLUE)
        .with_shape(Shape::rounded_rect(10.0))
        .with_border_width(5.0)
        .with_border_color(Color::RED)
        .with_pipeline(pipeline)
}

pub const PIPELINES: [Pipeline; 2] = [Pipeline::Primary, Pipeline::Fallback];

/// Signed distance from `(x, y)` to a rounded rectangle, negative inside.
pub fn rounded_rect_distance(x: f32, y: f32, rect: Rect, radius: f32) -> f32 {
    let qx = (x - rect.x - rect.width / 2.0).abs() - (rect.width / 2.0 - radius);
    let qy = (y - rect.y - rect.height / 2.0).abs() - (rect.height / 2.0 - radius);
    qx.max(0.0).hypot(qy.max(0.0)) + qx.max(qy).min(0.0) - radius
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Interior,
    Border,
    Outside,
    /// Within a pixel of an outline, where anti-aliasing mixes colors.
    Edge,
}

/// Where pixel `(x, y)` of the 100x50 [`bordered`] decorator falls. The
/// interior is the rounded rect of radius 10 inset by the 5px border; the
/// outer outline is that shape grown by the border, radius 15.
pub fn bordered_region(x: u32, y: u32) -> Region {
    let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
    let inner = rounded_rect_distance(cx, cy, Rect::new(5.0, 5.0, 90.0, 40.0), 10.0);
    let outer = rounded_rect_distance(cx, cy, Rect::new(0.0, 0.0, 100.0, 50.0), 15.0);
    if inner < -1.0 {
        Region::Interior
    } else if inner > 1.0 && outer < -1.0 {
        Region::Border
    } else if outer > 1.0 {
        Region::Outside
    } else {
        Region::Edge
    }
}
