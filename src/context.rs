//! Per-draw context handed to widgets by the host.

use crate::paint::{Color, PaintSource};

/// Theme values the decorator falls back on.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Border color used when neither a border color nor a foreground is set.
    pub fg_normal: PaintSource,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg_normal: PaintSource::Solid(Color::from_hex(0xAAAAAA)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawContext {
    pub theme: Theme,
    pub dpi: f32,
}

impl DrawContext {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            dpi: 96.0,
        }
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn fg_normal(mut self, source: impl Into<PaintSource>) -> Self {
        self.theme.fg_normal = source.into();
        self
    }

    pub fn dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }
}

impl Default for DrawContext {
    fn default() -> Self {
        Self::new()
    }
}
