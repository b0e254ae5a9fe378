//! Shapes: closed paths traced into a canvas for a given width and height.
//!
//! A shape is a callback plus an immutable parameter list captured when the
//! shape is built. Tracing only appends to the current path; it never fills,
//! strokes or changes the graphics state.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::sync::Arc;

use crate::canvas::Canvas;
use crate::error::{DrawError, Result};

/// Extra argument passed to a shape or background-image callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Param {
    Number(f32),
    Flag(bool),
}

impl From<f32> for Param {
    fn from(value: f32) -> Self {
        Param::Number(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Flag(value)
    }
}

/// Read a numeric parameter, falling back to `default` when absent.
pub fn number_param(params: &[Param], index: usize, default: f32) -> Result<f32> {
    match params.get(index) {
        None => Ok(default),
        Some(Param::Number(value)) if value.is_finite() => Ok(*value),
        Some(Param::Number(_)) => Err(DrawError::ShapeParam {
            index,
            reason: "number must be finite",
        }),
        Some(Param::Flag(_)) => Err(DrawError::ShapeParam {
            index,
            reason: "expected a number, got a flag",
        }),
    }
}

/// Read a boolean parameter, falling back to `default` when absent.
pub fn flag_param(params: &[Param], index: usize, default: bool) -> Result<bool> {
    match params.get(index) {
        None => Ok(default),
        Some(Param::Flag(value)) => Ok(*value),
        Some(Param::Number(_)) => Err(DrawError::ShapeParam {
            index,
            reason: "expected a flag, got a number",
        }),
    }
}

/// Callback tracing a closed path for `(width, height, params)`.
pub type ShapeFn = Arc<dyn Fn(&mut dyn Canvas, f32, f32, &[Param]) -> Result<()> + Send + Sync>;

#[derive(Clone)]
pub enum ShapeKind {
    Rectangle,
    /// params: `[radius = 10]`
    RoundedRect,
    RoundedBar,
    /// params: `[radius = min(width, height) / 2]`
    Circle,
    /// params: `[top_left, top_right, bottom_right, bottom_left, radius = 10]`
    PartiallyRoundedRect,
    Custom(ShapeFn),
}

impl PartialEq for ShapeKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ShapeKind::Custom(a), ShapeKind::Custom(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (ShapeKind::Custom(_), _) | (_, ShapeKind::Custom(_)) => false,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl fmt::Debug for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Rectangle => f.write_str("Rectangle"),
            ShapeKind::RoundedRect => f.write_str("RoundedRect"),
            ShapeKind::RoundedBar => f.write_str("RoundedBar"),
            ShapeKind::Circle => f.write_str("Circle"),
            ShapeKind::PartiallyRoundedRect => f.write_str("PartiallyRoundedRect"),
            ShapeKind::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    params: Arc<[Param]>,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            params: Vec::new().into(),
        }
    }

    pub fn custom<F>(path: F) -> Self
    where
        F: Fn(&mut dyn Canvas, f32, f32, &[Param]) -> Result<()> + Send + Sync + 'static,
    {
        Self::new(ShapeKind::Custom(Arc::new(path)))
    }

    pub fn rectangle() -> Self {
        Self::new(ShapeKind::Rectangle)
    }

    pub fn rounded_rect(radius: f32) -> Self {
        Self::new(ShapeKind::RoundedRect).with_params([Param::Number(radius)])
    }

    pub fn rounded_bar() -> Self {
        Self::new(ShapeKind::RoundedBar)
    }

    pub fn circle() -> Self {
        Self::new(ShapeKind::Circle)
    }

    pub fn partially_rounded_rect(
        top_left: bool,
        top_right: bool,
        bottom_right: bool,
        bottom_left: bool,
        radius: f32,
    ) -> Self {
        Self::new(ShapeKind::PartiallyRoundedRect).with_params([
            Param::Flag(top_left),
            Param::Flag(top_right),
            Param::Flag(bottom_right),
            Param::Flag(bottom_left),
            Param::Number(radius),
        ])
    }

    /// Replace the parameter list.
    pub fn with_params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params = params.into_iter().collect();
        self
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Append this shape's outline for a `width` x `height` box at the user
    /// space origin to the current path.
    pub fn trace(&self, canvas: &mut dyn Canvas, width: f32, height: f32) -> Result<()> {
        let params = &self.params[..];
        match &self.kind {
            ShapeKind::Rectangle => {
                canvas.rectangle(0.0, 0.0, width, height);
                Ok(())
            }
            ShapeKind::RoundedRect => {
                let radius = number_param(params, 0, 10.0)?;
                rounded_corners(canvas, width, height, [true; 4], radius);
                Ok(())
            }
            ShapeKind::RoundedBar => {
                rounded_corners(canvas, width, height, [true; 4], height / 2.0);
                Ok(())
            }
            ShapeKind::Circle => {
                let radius = number_param(params, 0, width.min(height) / 2.0)?;
                canvas.move_to(width / 2.0 + radius, height / 2.0);
                canvas.arc(width / 2.0, height / 2.0, radius, 0.0, TAU);
                canvas.close_path();
                Ok(())
            }
            ShapeKind::PartiallyRoundedRect => {
                let corners = [
                    flag_param(params, 0, false)?,
                    flag_param(params, 1, false)?,
                    flag_param(params, 2, false)?,
                    flag_param(params, 3, false)?,
                ];
                let radius = number_param(params, 4, 10.0)?;
                rounded_corners(canvas, width, height, corners, radius);
                Ok(())
            }
            ShapeKind::Custom(path) => path(canvas, width, height, params),
        }
    }
}

/// Rectangle with the selected corners (top-left, top-right, bottom-right,
/// bottom-left) rounded. The radius is clamped to half the shorter side.
fn rounded_corners(
    canvas: &mut dyn Canvas,
    width: f32,
    height: f32,
    corners: [bool; 4],
    radius: f32,
) {
    let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    let [top_left, top_right, bottom_right, bottom_left] = corners;

    if top_left {
        canvas.move_to(0.0, r);
        canvas.arc(r, r, r, PI, 3.0 * FRAC_PI_2);
    } else {
        canvas.move_to(0.0, 0.0);
    }
    if top_right {
        canvas.arc(width - r, r, r, 3.0 * FRAC_PI_2, TAU);
    } else {
        canvas.line_to(width, 0.0);
    }
    if bottom_right {
        canvas.arc(width - r, height - r, r, 0.0, FRAC_PI_2);
    } else {
        canvas.line_to(width, height);
    }
    if bottom_left {
        canvas.arc(r, height - r, r, FRAC_PI_2, PI);
    } else {
        canvas.line_to(0.0, height);
    }
    canvas.close_path();
}
