//! A background decorator widget for 2D widget toolkits.
//!
//! [`widgets::Background`] wraps a single child and paints a fill, an
//! optional image, a shape clip and a border that follows the shape, on any
//! [`canvas::Canvas`]. [`canvas::RasterCanvas`] renders to pixels with
//! tiny-skia; [`hierarchy`] drives a widget tree the way a host toolkit does.

pub mod canvas;
pub mod compat;
pub mod context;
pub mod error;
pub mod hierarchy;
pub mod image_loader;
pub mod layout;
pub mod notify;
pub mod paint;
pub mod resolve;
pub mod shape;
pub mod widgets;

pub mod prelude {
    pub use crate::canvas::{Canvas, Operator, RasterCanvas};
    pub use crate::context::{DrawContext, Theme};
    pub use crate::error::{DrawError, ImageLoadError, ResolveError};
    pub use crate::hierarchy::{draw_widget, fit_widget, render};
    pub use crate::image_loader::{FileImageLoader, ImageLoader, ImageSource};
    pub use crate::layout::{Placement, Size};
    pub use crate::notify::{ChangeFlags, ChangeTracker, Notification, NotificationSink, Property};
    pub use crate::paint::{Color, ImageSurface, LinearGradient, PaintSource};
    pub use crate::resolve::ColorResolver;
    pub use crate::shape::{Param, Shape};
    pub use crate::widgets::{
        background, Background, BackgroundImage, BorderStrategy, Pipeline, Rect, Widget,
    };
}
