//! Image loading for static background images.
//!
//! Raster formats (PNG, JPEG, GIF, WebP) decode through `image`; SVG is
//! rasterized through `resvg` at its intrinsic size times `svg_scale`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ImageLoadError;
use crate::paint::ImageSurface;

/// Source for an image - can be a file path or in-memory bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Raster image from a file path (PNG, JPEG, GIF, WebP)
    Path(PathBuf),
    /// Raster image from in-memory bytes
    Bytes(Arc<[u8]>),
    /// SVG from a file path
    SvgPath(PathBuf),
    /// SVG from in-memory bytes
    SvgBytes(Arc<[u8]>),
}

impl ImageSource {
    /// Check if this is an SVG source
    pub fn is_svg(&self) -> bool {
        matches!(self, ImageSource::SvgPath(_) | ImageSource::SvgBytes(_))
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
        {
            ImageSource::SvgPath(path)
        } else {
            ImageSource::Path(path)
        }
    }
}

impl From<&str> for ImageSource {
    fn from(path: &str) -> Self {
        ImageSource::from(PathBuf::from(path))
    }
}

impl From<String> for ImageSource {
    fn from(path: String) -> Self {
        ImageSource::from(PathBuf::from(path))
    }
}

/// Loads an image surface from a path or bytes.
pub trait ImageLoader {
    fn load(&self, source: &ImageSource) -> Result<ImageSurface, ImageLoadError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileImageLoader {
    pub svg_scale: f32,
}

impl FileImageLoader {
    pub fn new() -> Self {
        Self { svg_scale: 1.0 }
    }

    pub fn svg_scale(mut self, scale: f32) -> Self {
        self.svg_scale = scale;
        self
    }

    fn load_svg_file(&self, path: &Path) -> Result<ImageSurface, ImageLoadError> {
        let data = std::fs::read(path)?;
        self.load_svg_bytes(&data)
    }

    fn load_svg_bytes(&self, bytes: &[u8]) -> Result<ImageSurface, ImageLoadError> {
        let tree = resvg::usvg::Tree::from_data(bytes, &resvg::usvg::Options::default())
            .map_err(|err| ImageLoadError::Svg(err.to_string()))?;
        let size = tree.size();

        let scaled_width = (size.width() * self.svg_scale).ceil() as u32;
        let scaled_height = (size.height() * self.svg_scale).ceil() as u32;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(scaled_width, scaled_height)
            .ok_or(ImageLoadError::EmptyImage)?;

        let transform = resvg::tiny_skia::Transform::from_scale(self.svg_scale, self.svg_scale);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        Ok(ImageSurface::from_pixmap(pixmap))
    }
}

impl Default for FileImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader for FileImageLoader {
    fn load(&self, source: &ImageSource) -> Result<ImageSurface, ImageLoadError> {
        let rgba = match source {
            ImageSource::Path(path) => image::open(path)?.to_rgba8(),
            ImageSource::Bytes(bytes) => image::load_from_memory(bytes)?.to_rgba8(),
            ImageSource::SvgPath(path) => return self.load_svg_file(path),
            ImageSource::SvgBytes(bytes) => return self.load_svg_bytes(bytes),
        };
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageLoadError::EmptyImage);
        }
        ImageSurface::from_rgba8(width, height, rgba.into_raw()).ok_or(ImageLoadError::EmptyImage)
    }
}
