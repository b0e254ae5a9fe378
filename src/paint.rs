//! Paint sources: what a fill, stroke, paint or mask draws with.

use std::fmt;
use std::sync::Arc;

use resvg::tiny_skia::{IntSize, Pixmap};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Linear gradient between two points in the user space that is current when
/// the gradient becomes the canvas source.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub fn new(from: (f32, f32), to: (f32, f32)) -> Self {
        Self {
            from,
            to,
            stops: Vec::new(),
        }
    }

    pub fn stop(mut self, offset: f32, color: Color) -> Self {
        self.stops.push(GradientStop::new(offset, color));
        self
    }

    /// Convenience: left to right over `width`
    pub fn horizontal(width: f32, start: Color, end: Color) -> Self {
        Self::new((0.0, 0.0), (width, 0.0))
            .stop(0.0, start)
            .stop(1.0, end)
    }

    /// Convenience: top to bottom over `height`
    pub fn vertical(height: f32, start: Color, end: Color) -> Self {
        Self::new((0.0, 0.0), (0.0, height))
            .stop(0.0, start)
            .stop(1.0, end)
    }
}

/// A decoded image held as premultiplied RGBA8 rows.
///
/// The pixels live in a tiny-skia pixmap built once at construction, so
/// using the surface as a pattern never copies them. Cloning shares the
/// pixmap; two surfaces compare equal only when they share it.
#[derive(Clone)]
pub struct ImageSurface {
    pixmap: Arc<Pixmap>,
}

impl ImageSurface {
    /// Build from premultiplied RGBA8 pixels. Returns `None` when a dimension
    /// is zero or the buffer length does not match the dimensions.
    pub fn from_premultiplied(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let size = IntSize::from_wh(width, height)?;
        Pixmap::from_vec(data, size).map(Self::from_pixmap)
    }

    pub(crate) fn from_pixmap(pixmap: Pixmap) -> Self {
        Self {
            pixmap: Arc::new(pixmap),
        }
    }

    /// Build from straight (non-premultiplied) RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> Option<Self> {
        for px in data.chunks_exact_mut(4) {
            let a = px[3] as u16;
            for c in &mut px[..3] {
                *c = ((*c as u16 * a + 127) / 255) as u8;
            }
        }
        Self::from_premultiplied(width, height, data)
    }

    /// A surface filled with one color.
    pub fn solid(width: u32, height: u32, color: Color) -> Option<Self> {
        let px = [
            (color.r * 255.0).round() as u8,
            (color.g * 255.0).round() as u8,
            (color.b * 255.0).round() as u8,
            (color.a * 255.0).round() as u8,
        ];
        let data = px.repeat((width as usize) * (height as usize));
        Self::from_rgba8(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub(crate) fn pixmap(&self) -> &Arc<Pixmap> {
        &self.pixmap
    }
}

impl PartialEq for ImageSurface {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixmap, &other.pixmap)
    }
}

impl fmt::Debug for ImageSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageSurface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

/// An opaque fill/stroke specification.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintSource {
    Solid(Color),
    LinearGradient(LinearGradient),
    /// Image pattern anchored at the user-space origin.
    Pattern(ImageSurface),
}

impl From<Color> for PaintSource {
    fn from(color: Color) -> Self {
        PaintSource::Solid(color)
    }
}

impl From<LinearGradient> for PaintSource {
    fn from(gradient: LinearGradient) -> Self {
        PaintSource::LinearGradient(gradient)
    }
}

impl From<ImageSurface> for PaintSource {
    fn from(image: ImageSurface) -> Self {
        PaintSource::Pattern(image)
    }
}
