//! Background image: a decoded surface or a paint callback.

use std::fmt;
use std::sync::Arc;

use crate::canvas::Canvas;
use crate::context::DrawContext;
use crate::error::Result;
use crate::paint::{ImageSurface, PaintSource};
use crate::shape::Param;

/// Callback painting the background image for `(width, height, params)`.
pub type ImagePaintFn =
    Arc<dyn Fn(&DrawContext, &mut dyn Canvas, f32, f32, &[Param]) -> Result<()> + Send + Sync>;

#[derive(Clone)]
pub enum BackgroundImage {
    /// Drawn at the widget origin, unscaled and clipped to the widget box
    Static(ImageSurface),
    Parametric {
        paint: ImagePaintFn,
        params: Arc<[Param]>,
    },
}

impl BackgroundImage {
    pub fn parametric<F>(paint: F) -> Self
    where
        F: Fn(&DrawContext, &mut dyn Canvas, f32, f32, &[Param]) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        BackgroundImage::Parametric {
            paint: Arc::new(paint),
            params: Vec::new().into(),
        }
    }

    /// Replace the parameter list of a parametric image. Static images have
    /// no parameters and are returned unchanged.
    pub fn with_params(self, params: impl IntoIterator<Item = Param>) -> Self {
        match self {
            BackgroundImage::Parametric { paint, .. } => BackgroundImage::Parametric {
                paint,
                params: params.into_iter().collect(),
            },
            image => image,
        }
    }

    pub fn params(&self) -> &[Param] {
        match self {
            BackgroundImage::Static(_) => &[],
            BackgroundImage::Parametric { params, .. } => params,
        }
    }

    /// Paint into the `[0, width] x [0, height]` box. The graphics state is
    /// restored afterwards, also on failure.
    pub(crate) fn paint(
        &self,
        ctx: &DrawContext,
        canvas: &mut dyn Canvas,
        width: f32,
        height: f32,
    ) -> Result<()> {
        canvas.save();
        let result = match self {
            BackgroundImage::Parametric { paint, params } => {
                paint(ctx, canvas, width, height, params)
            }
            BackgroundImage::Static(image) => {
                canvas.set_source(&PaintSource::Pattern(image.clone()));
                canvas.rectangle(
                    0.0,
                    0.0,
                    width.min(image.width() as f32),
                    height.min(image.height() as f32),
                );
                canvas.fill()
            }
        };
        canvas.restore();
        result
    }
}

impl From<ImageSurface> for BackgroundImage {
    fn from(image: ImageSurface) -> Self {
        BackgroundImage::Static(image)
    }
}

impl PartialEq for BackgroundImage {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BackgroundImage::Static(a), BackgroundImage::Static(b)) => a == b,
            (
                BackgroundImage::Parametric {
                    paint: a,
                    params: pa,
                },
                BackgroundImage::Parametric {
                    paint: b,
                    params: pb,
                },
            ) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)) && pa == pb,
            _ => false,
        }
    }
}

impl fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundImage::Static(image) => f.debug_tuple("Static").field(image).finish(),
            BackgroundImage::Parametric { params, .. } => f
                .debug_struct("Parametric")
                .field("params", params)
                .finish_non_exhaustive(),
        }
    }
}
