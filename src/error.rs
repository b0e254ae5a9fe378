//! Error types for drawing, image loading and color resolution.

use thiserror::Error;

use crate::canvas::SurfaceId;

/// Failure of a draw pass.
///
/// A failed pass drops (or partially renders) one frame; the next redraw runs
/// the pass again from scratch, so nothing here is retried.
#[derive(Error, Debug)]
pub enum DrawError {
    #[error("failed to allocate a {width}x{height} off-screen surface")]
    SurfaceAllocation { width: u32, height: u32 },
    #[error("pop_group called without a matching push_group")]
    UnbalancedGroup,
    #[error("end_recording called without a matching begin_recording")]
    UnbalancedRecording,
    #[error("surface {0} is not alive")]
    UnknownSurface(SurfaceId),
    #[error("invalid shape parameter at index {index}: {reason}")]
    ShapeParam { index: usize, reason: &'static str },
    #[error("paint callback failed: {0}")]
    Callback(String),
}

pub type Result<T> = std::result::Result<T, DrawError>;

#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("SVG error: {0}")]
    Svg(String),
    #[error("image has no pixels")]
    EmptyImage,
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("unrecognized color spec {0:?}")]
    Unrecognized(String),
}
