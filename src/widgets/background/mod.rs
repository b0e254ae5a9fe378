//! Background decorator widget.
//!
//! Paints a background fill, an optional background image, an optional
//! shape clip with a border that follows the shape outline, and sets the
//! foreground as the default source for its single child.
//!
//! Two compositing pipelines are available. [`Pipeline::Primary`] routes all
//! content through off-screen groups and masks built from one traced path.
//! [`Pipeline::Fallback`] uses the canvas clip and a single recorded border
//! mask, for backends whose groups cannot be reused as sources.

mod fallback;
mod image;
mod primary;

pub use image::{BackgroundImage, ImagePaintFn};

use std::rc::Rc;

use crate::canvas::Canvas;
use crate::context::DrawContext;
use crate::error::{ImageLoadError, ResolveError, Result};
use crate::image_loader::{ImageLoader, ImageSource};
use crate::layout::{Placement, Size};
use crate::notify::{Notification, NotificationSink, Property};
use crate::paint::PaintSource;
use crate::resolve::ColorResolver;
use crate::shape::Shape;

use super::widget::{Rect, Widget};

/// Whether the border eats into the space given to the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStrategy {
    /// The child gets the whole widget box
    #[default]
    None,
    /// The child is inset by the border width on every side
    Inner,
}

/// Compositing pipeline, chosen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pipeline {
    #[default]
    Primary,
    Fallback,
}

pub struct Background {
    child: Option<Box<dyn Widget>>,
    bg: Option<PaintSource>,
    fg: Option<PaintSource>,
    bgimage: Option<BackgroundImage>,
    shape: Option<Shape>,
    border_width: f32,
    border_color: Option<PaintSource>,
    border_strategy: BorderStrategy,
    pipeline: Pipeline,
    sink: Option<Rc<dyn NotificationSink>>,
}

impl Background {
    pub fn new() -> Self {
        Self {
            child: None,
            bg: None,
            fg: None,
            bgimage: None,
            shape: None,
            border_width: 0.0,
            border_color: None,
            border_strategy: BorderStrategy::None,
            pipeline: Pipeline::Primary,
            sink: None,
        }
    }

    // Builder-style construction

    pub fn with_child(mut self, child: impl Widget + 'static) -> Self {
        self.set_widget(Some(Box::new(child)));
        self
    }

    pub fn with_bg(mut self, bg: impl Into<PaintSource>) -> Self {
        self.set_bg(Some(bg.into()));
        self
    }

    pub fn with_fg(mut self, fg: impl Into<PaintSource>) -> Self {
        self.set_fg(Some(fg.into()));
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.set_shape(Some(shape));
        self
    }

    pub fn with_border_width(mut self, width: f32) -> Self {
        self.set_border_width(width);
        self
    }

    pub fn with_border_color(mut self, color: impl Into<PaintSource>) -> Self {
        self.set_border_color(Some(color.into()));
        self
    }

    pub fn with_border_strategy(mut self, strategy: BorderStrategy) -> Self {
        self.set_border_strategy(strategy);
        self
    }

    pub fn with_bgimage(mut self, image: impl Into<BackgroundImage>) -> Self {
        self.set_bgimage(Some(image.into()));
        self
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.set_pipeline(pipeline);
        self
    }

    pub fn with_sink(mut self, sink: Rc<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    // Getters

    pub fn widget(&self) -> Option<&dyn Widget> {
        self.child.as_deref()
    }

    pub fn bg(&self) -> Option<&PaintSource> {
        self.bg.as_ref()
    }

    pub fn fg(&self) -> Option<&PaintSource> {
        self.fg.as_ref()
    }

    pub fn bgimage(&self) -> Option<&BackgroundImage> {
        self.bgimage.as_ref()
    }

    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }

    pub fn border_width(&self) -> f32 {
        self.border_width
    }

    pub fn border_color(&self) -> Option<&PaintSource> {
        self.border_color.as_ref()
    }

    pub fn border_strategy(&self) -> BorderStrategy {
        self.border_strategy
    }

    pub fn pipeline(&self) -> Pipeline {
        self.pipeline
    }

    // Setters. Each one is a no-op when the value is unchanged and carries no
    // parameters; otherwise it replaces the value and notifies the sink.

    /// Put `child` in the single slot and hand back the detached previous one.
    pub fn set_widget(&mut self, child: Option<Box<dyn Widget>>) -> Option<Box<dyn Widget>> {
        if self.child.is_none() && child.is_none() {
            return None;
        }
        let previous = std::mem::replace(&mut self.child, child);
        self.emit(Property::Widget, Notification::LayoutChanged);
        previous
    }

    pub fn set_bg(&mut self, bg: Option<PaintSource>) {
        if self.bg == bg {
            return;
        }
        self.bg = bg;
        self.emit(Property::Bg, Notification::RedrawNeeded);
    }

    pub fn set_fg(&mut self, fg: Option<PaintSource>) {
        if self.fg == fg {
            return;
        }
        self.fg = fg;
        self.emit(Property::Fg, Notification::RedrawNeeded);
    }

    pub fn set_shape(&mut self, shape: Option<Shape>) {
        let has_params = shape.as_ref().is_some_and(|s| !s.params().is_empty());
        if self.shape == shape && !has_params {
            return;
        }
        self.shape = shape;
        self.emit(Property::Shape, Notification::RedrawNeeded);
    }

    /// Negative and non-finite widths are stored as 0.
    ///
    /// Emits `property::border_width` followed by `layout_changed` when the
    /// strategy is [`BorderStrategy::Inner`], since the child box shrinks
    /// with the width, and by `redraw_needed` otherwise.
    pub fn set_border_width(&mut self, width: f32) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        if self.border_width == width {
            return;
        }
        self.border_width = width;
        // With an inner strategy the child placement depends on the width.
        let change = match self.border_strategy {
            BorderStrategy::Inner => Notification::LayoutChanged,
            BorderStrategy::None => Notification::RedrawNeeded,
        };
        self.emit(Property::BorderWidth, change);
    }

    pub fn set_border_color(&mut self, color: Option<PaintSource>) {
        if self.border_color == color {
            return;
        }
        self.border_color = color;
        self.emit(Property::BorderColor, Notification::RedrawNeeded);
    }

    pub fn set_border_strategy(&mut self, strategy: BorderStrategy) {
        if self.border_strategy == strategy {
            return;
        }
        self.border_strategy = strategy;
        self.emit(Property::BorderStrategy, Notification::LayoutChanged);
    }

    pub fn set_bgimage(&mut self, image: Option<BackgroundImage>) {
        let has_params = image.as_ref().is_some_and(|i| !i.params().is_empty());
        if self.bgimage == image && !has_params {
            return;
        }
        self.bgimage = image;
        self.emit(Property::BgImage, Notification::RedrawNeeded);
    }

    pub fn set_pipeline(&mut self, pipeline: Pipeline) {
        if self.pipeline == pipeline {
            return;
        }
        self.pipeline = pipeline;
        if let Some(sink) = &self.sink {
            sink.notify(Notification::RedrawNeeded);
        }
    }

    pub fn set_sink(&mut self, sink: Option<Rc<dyn NotificationSink>>) {
        self.sink = sink;
    }

    /// Set the background from a color spec understood by `resolver`.
    pub fn set_bg_spec(
        &mut self,
        resolver: &dyn ColorResolver,
        spec: &str,
    ) -> std::result::Result<(), ResolveError> {
        let source = resolver.resolve(spec)?;
        self.set_bg(Some(source));
        Ok(())
    }

    pub fn set_fg_spec(
        &mut self,
        resolver: &dyn ColorResolver,
        spec: &str,
    ) -> std::result::Result<(), ResolveError> {
        let source = resolver.resolve(spec)?;
        self.set_fg(Some(source));
        Ok(())
    }

    pub fn set_border_color_spec(
        &mut self,
        resolver: &dyn ColorResolver,
        spec: &str,
    ) -> std::result::Result<(), ResolveError> {
        let source = resolver.resolve(spec)?;
        self.set_border_color(Some(source));
        Ok(())
    }

    /// Load a static background image through `loader`.
    pub fn set_bgimage_from(
        &mut self,
        loader: &dyn ImageLoader,
        source: impl Into<ImageSource>,
    ) -> std::result::Result<(), ImageLoadError> {
        let image = loader.load(&source.into())?;
        self.set_bgimage(Some(BackgroundImage::Static(image)));
        Ok(())
    }

    fn emit(&self, property: Property, change: Notification) {
        if let Some(sink) = &self.sink {
            sink.notify(Notification::PropertyChanged(property));
            sink.notify(change);
        }
    }

    /// The shape to clip and border with: the explicit one, or a rectangle
    /// when only a border width is set.
    fn active_shape(&self) -> Option<Shape> {
        match &self.shape {
            Some(shape) => Some(shape.clone()),
            None if self.border_width > 0.0 => Some(Shape::rectangle()),
            None => None,
        }
    }

    fn border_source<'a>(&'a self, ctx: &'a DrawContext) -> &'a PaintSource {
        self.border_color
            .as_ref()
            .or(self.fg.as_ref())
            .unwrap_or(&ctx.theme.fg_normal)
    }

    fn child_inset(&self) -> f32 {
        match self.border_strategy {
            BorderStrategy::Inner => self.border_width,
            BorderStrategy::None => 0.0,
        }
    }

    fn paint_bg(&self, canvas: &mut dyn Canvas, width: f32, height: f32) -> Result<()> {
        let Some(bg) = &self.bg else {
            return Ok(());
        };
        canvas.save();
        canvas.set_source(bg);
        canvas.rectangle(0.0, 0.0, width, height);
        let result = canvas.fill();
        canvas.restore();
        result
    }

    fn paint_bgimage(
        &self,
        ctx: &DrawContext,
        canvas: &mut dyn Canvas,
        width: f32,
        height: f32,
    ) -> Result<()> {
        match &self.bgimage {
            Some(image) => image.paint(ctx, canvas, width, height),
            None => Ok(()),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Background {
    fn fit(&self, ctx: &DrawContext, width: f32, height: f32) -> Size {
        let Some(child) = &self.child else {
            return Size::zero();
        };
        let inset = self.child_inset();
        child
            .fit(ctx, width - 2.0 * inset, height - 2.0 * inset)
            .outset(inset)
    }

    fn layout(&self, _ctx: &DrawContext, width: f32, height: f32) -> Vec<Placement<'_>> {
        let Some(child) = &self.child else {
            return Vec::new();
        };
        let rect = Rect::new(0.0, 0.0, width, height).inset(self.child_inset());
        vec![Placement::new(child.as_ref(), rect)]
    }

    fn before_draw_children(
        &self,
        ctx: &DrawContext,
        canvas: &mut dyn Canvas,
        width: f32,
        height: f32,
    ) -> Result<()> {
        match self.pipeline {
            Pipeline::Primary => primary::before_children(self, ctx, canvas, width, height),
            Pipeline::Fallback => fallback::before_children(self, ctx, canvas, width, height),
        }
    }

    fn after_draw_children(
        &self,
        ctx: &DrawContext,
        canvas: &mut dyn Canvas,
        width: f32,
        height: f32,
    ) -> Result<()> {
        match self.pipeline {
            Pipeline::Primary => primary::after_children(self, ctx, canvas, width, height),
            Pipeline::Fallback => fallback::after_children(self, ctx, canvas, width, height),
        }
    }
}

/// Create an empty background decorator.
pub fn background() -> Background {
    Background::new()
}
