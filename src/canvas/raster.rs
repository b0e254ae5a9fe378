//! Software canvas backed by tiny-skia pixmaps.
//!
//! Groups swap the draw target for a transparent pixmap of the same size, so
//! popped groups are aligned with device space. Recordings get their own
//! pixmap sized to the requested extent and remember the transform they were
//! opened under. Clips and masks are 8-bit coverage masks over the target.

use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, TAU};
use std::sync::Arc;

use resvg::tiny_skia::{
    self, BlendMode, FillRule, FilterQuality, Mask, MaskType, Paint, Path, PathBuilder,
    PathStroker, Pattern, Pixmap, PixmapPaint, Point, PremultipliedColorU8, Shader, SpreadMode,
    Stroke, Transform,
};

use super::{Canvas, Content, Operator, SurfaceId};
use crate::error::{DrawError, Result};
use crate::paint::{Color, LinearGradient, PaintSource};

#[derive(Clone)]
enum Source {
    Solid(Color),
    Gradient(LinearGradient, Transform),
    Pixmap(Arc<Pixmap>, Transform),
}

#[derive(Clone)]
struct GraphicsState {
    transform: Transform,
    clip: Option<Arc<Mask>>,
    source: Source,
    operator: Operator,
    line_width: f32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            clip: None,
            source: Source::Solid(Color::BLACK),
            operator: Operator::Over,
            line_width: 2.0,
        }
    }
}

/// Device-space region a draw call covers before masking.
#[derive(Clone, Copy)]
enum Area<'a> {
    Path(&'a Path),
    Rect(tiny_skia::Rect),
}

impl Area<'_> {
    fn draw(self, target: &mut Pixmap, paint: &Paint, mask: Option<&Mask>) {
        match self {
            Area::Path(path) => {
                target.fill_path(path, paint, FillRule::Winding, Transform::identity(), mask)
            }
            Area::Rect(rect) => target.fill_rect(rect, paint, Transform::identity(), mask),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Segment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    Close,
}

#[derive(Default)]
struct PathState {
    segments: Vec<Segment>,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

enum FrameKind {
    Group(Content),
    Recording {
        placement: Transform,
        path: PathState,
    },
}

/// A redirected draw target waiting to be restored.
struct Frame {
    parent: Pixmap,
    saved_state: GraphicsState,
    saved_stack: Vec<GraphicsState>,
    kind: FrameKind,
}

struct Surface {
    pixmap: Arc<Pixmap>,
    placement: Transform,
}

pub struct RasterCanvas {
    target: Pixmap,
    state: GraphicsState,
    stack: Vec<GraphicsState>,
    path: PathState,
    frames: Vec<Frame>,
    surfaces: HashMap<SurfaceId, Surface>,
    next_surface: u64,
}

impl RasterCanvas {
    /// Create a transparent canvas.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let target =
            Pixmap::new(width, height).ok_or(DrawError::SurfaceAllocation { width, height })?;
        Ok(Self {
            target,
            state: GraphicsState::default(),
            stack: Vec::new(),
            path: PathState::default(),
            frames: Vec::new(),
            surfaces: HashMap::new(),
            next_surface: 1,
        })
    }

    pub fn width(&self) -> u32 {
        self.target.width()
    }

    pub fn height(&self) -> u32 {
        self.target.height()
    }

    /// Fill the current target with `color`, ignoring state.
    pub fn clear(&mut self, color: Color) {
        self.target.fill(skia_color(color));
    }

    /// The current draw target (the innermost group while one is open).
    pub fn pixmap(&self) -> &Pixmap {
        &self.target
    }

    /// Straight-alpha RGBA of one pixel of the current target.
    pub fn pixel_rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let px = self.target.pixel(x, y)?.demultiply();
        Some([px.red(), px.green(), px.blue(), px.alpha()])
    }

    /// Number of groups and recordings currently open.
    pub fn open_frames(&self) -> usize {
        self.frames.len()
    }

    /// Copy the current target into an `image` buffer (straight alpha).
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut img = image::RgbaImage::new(self.target.width(), self.target.height());
        for (dst, src) in img.pixels_mut().zip(self.target.pixels()) {
            let c = src.demultiply();
            *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }

    fn device_point(&self, x: f32, y: f32) -> Point {
        let ts = self.state.transform;
        Point::from_xy(
            ts.sx * x + ts.kx * y + ts.tx,
            ts.ky * x + ts.sy * y + ts.ty,
        )
    }

    fn build_path(&self) -> Option<Path> {
        let mut pb = PathBuilder::new();
        for segment in &self.path.segments {
            match *segment {
                Segment::MoveTo(p) => pb.move_to(p.x, p.y),
                Segment::LineTo(p) => pb.line_to(p.x, p.y),
                Segment::CubicTo(p1, p2, p) => pb.cubic_to(p1.x, p1.y, p2.x, p2.y, p.x, p.y),
                Segment::Close => pb.close(),
            }
        }
        pb.finish()
    }

    fn target_rect(&self) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_xywh(
            0.0,
            0.0,
            self.target.width() as f32,
            self.target.height() as f32,
        )
    }

    fn fill_device_path(&mut self, path: &Path) {
        let clip = self.state.clip.clone();
        self.composite(Area::Path(path), clip.as_deref());
    }

    /// Applies the current source and operator to `area` through `mask`.
    ///
    /// tiny-skia applies an external mask by scaling the source, which is only
    /// right for OVER. SOURCE and CLEAR first take the destination out by the
    /// coverage, then SOURCE adds the source scaled by the same coverage, so a
    /// pixel ends up as `dst * (1 - c) + src * c`.
    fn composite(&mut self, area: Area<'_>, mask: Option<&Mask>) {
        let operator = self.state.operator;
        if operator != Operator::Over {
            let mut erase = Paint {
                anti_alias: true,
                blend_mode: BlendMode::DestinationOut,
                ..Paint::default()
            };
            erase.set_color(tiny_skia::Color::BLACK);
            area.draw(&mut self.target, &erase, mask);
        }
        let blend_mode = match operator {
            Operator::Over => BlendMode::SourceOver,
            Operator::Source => BlendMode::Plus,
            Operator::Clear => return,
        };
        let paint = make_paint(&self.state.source, blend_mode);
        area.draw(&mut self.target, &paint, mask);
    }

    fn insert_surface(&mut self, pixmap: Pixmap, placement: Transform) -> SurfaceId {
        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;
        self.surfaces.insert(
            id,
            Surface {
                pixmap: Arc::new(pixmap),
                placement,
            },
        );
        id
    }

    fn pop_frame(&mut self) -> Option<(Pixmap, FrameKind)> {
        let frame = self.frames.pop()?;
        let layer = std::mem::replace(&mut self.target, frame.parent);
        self.state = frame.saved_state;
        self.stack = frame.saved_stack;
        Some((layer, frame.kind))
    }
}

impl Canvas for RasterCanvas {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => log::warn!("restore without matching save"),
        }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.state.transform = self.state.transform.pre_translate(tx, ty);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.transform = self.state.transform.pre_scale(sx, sy);
    }

    fn new_path(&mut self) {
        self.path = PathState::default();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.device_point(x, y);
        self.path.segments.push(Segment::MoveTo(p));
        self.path.current = Some(p);
        self.path.subpath_start = Some(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        if self.path.current.is_none() {
            self.move_to(x, y);
            return;
        }
        let p = self.device_point(x, y);
        self.path.segments.push(Segment::LineTo(p));
        self.path.current = Some(p);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        if self.path.current.is_none() {
            self.move_to(x1, y1);
        }
        let p1 = self.device_point(x1, y1);
        let p2 = self.device_point(x2, y2);
        let p = self.device_point(x, y);
        self.path.segments.push(Segment::CubicTo(p1, p2, p));
        self.path.current = Some(p);
    }

    fn arc(&mut self, xc: f32, yc: f32, radius: f32, angle1: f32, angle2: f32) {
        let mut angle2 = angle2;
        while angle2 < angle1 {
            angle2 += TAU;
        }
        let (sin1, cos1) = angle1.sin_cos();
        self.line_to(xc + radius * cos1, yc + radius * sin1);
        let sweep = angle2 - angle1;
        if sweep <= 0.0 || radius <= 0.0 {
            return;
        }

        // One cubic per quarter turn at most.
        let segments = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / segments as f32;
        let k = 4.0 / 3.0 * (step / 4.0).tan();
        for i in 0..segments {
            let t0 = angle1 + step * i as f32;
            let t1 = t0 + step;
            let (s0, c0) = t0.sin_cos();
            let (s1, c1) = t1.sin_cos();
            self.curve_to(
                xc + radius * (c0 - k * s0),
                yc + radius * (s0 + k * c0),
                xc + radius * (c1 + k * s1),
                yc + radius * (s1 - k * c1),
                xc + radius * c1,
                yc + radius * s1,
            );
        }
    }

    fn close_path(&mut self) {
        if self.path.current.is_none() {
            return;
        }
        self.path.segments.push(Segment::Close);
        self.path.current = self.path.subpath_start;
    }

    fn set_source(&mut self, source: &PaintSource) {
        self.state.source = match source {
            PaintSource::Solid(color) => Source::Solid(*color),
            PaintSource::LinearGradient(gradient) => {
                Source::Gradient(gradient.clone(), self.state.transform)
            }
            PaintSource::Pattern(image) => {
                Source::Pixmap(image.pixmap().clone(), self.state.transform)
            }
        };
    }

    fn set_source_surface(&mut self, surface: SurfaceId) -> Result<()> {
        let surface = self
            .surfaces
            .get(&surface)
            .ok_or(DrawError::UnknownSurface(surface))?;
        self.state.source = Source::Pixmap(surface.pixmap.clone(), surface.placement);
        Ok(())
    }

    fn set_operator(&mut self, operator: Operator) {
        self.state.operator = operator;
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
    }

    fn fill_preserve(&mut self) -> Result<()> {
        if let Some(path) = self.build_path() {
            self.fill_device_path(&path);
        }
        Ok(())
    }

    fn stroke_preserve(&mut self) -> Result<()> {
        let width = self.state.line_width;
        // tiny-skia treats a zero width as a hairline; a zero-width stroke covers nothing here.
        if !(width > 0.0) {
            return Ok(());
        }
        let ts = self.state.transform;
        let outline = self
            .build_path()
            .zip(ts.invert())
            .and_then(|(path, inverse)| path.transform(inverse))
            .and_then(|user_path| {
                let stroke = Stroke {
                    width,
                    ..Stroke::default()
                };
                user_path.stroke(&stroke, PathStroker::compute_resolution_scale(&ts))
            })
            .and_then(|outline| outline.transform(ts));
        if let Some(outline) = outline {
            self.fill_device_path(&outline);
        }
        Ok(())
    }

    fn paint(&mut self) -> Result<()> {
        let Some(rect) = self.target_rect() else {
            return Ok(());
        };
        let clip = self.state.clip.clone();
        self.composite(Area::Rect(rect), clip.as_deref());
        Ok(())
    }

    fn clip(&mut self) {
        let path = self.build_path();
        self.new_path();

        let (width, height) = (self.target.width(), self.target.height());
        let mut mask = match self.state.clip.as_deref() {
            Some(current) => current.clone(),
            None => {
                let Some(mut mask) = Mask::new(width, height) else {
                    return;
                };
                if let Some(path) = &path {
                    mask.fill_path(path, FillRule::Winding, true, Transform::identity());
                }
                self.state.clip = Some(Arc::new(mask));
                return;
            }
        };
        match &path {
            Some(path) => {
                mask.intersect_path(path, FillRule::Winding, true, Transform::identity())
            }
            None => mask.data_mut().fill(0),
        }
        self.state.clip = Some(Arc::new(mask));
    }

    fn reset_clip(&mut self) {
        self.state.clip = None;
    }

    fn mask(&mut self, surface: SurfaceId) -> Result<()> {
        let (pixmap, placement) = {
            let surface = self
                .surfaces
                .get(&surface)
                .ok_or(DrawError::UnknownSurface(surface))?;
            (surface.pixmap.clone(), surface.placement)
        };
        let (width, height) = (self.target.width(), self.target.height());

        let aligned =
            placement.is_identity() && pixmap.width() == width && pixmap.height() == height;
        let mut coverage = if aligned {
            Mask::from_pixmap(Pixmap::as_ref(&pixmap), MaskType::Alpha)
        } else {
            let mut scratch =
                Pixmap::new(width, height).ok_or(DrawError::SurfaceAllocation { width, height })?;
            let paint = PixmapPaint {
                quality: FilterQuality::Bilinear,
                ..PixmapPaint::default()
            };
            scratch.draw_pixmap(0, 0, Pixmap::as_ref(&pixmap), &paint, placement, None);
            Mask::from_pixmap(scratch.as_ref(), MaskType::Alpha)
        };
        if let Some(clip) = self.state.clip.as_deref() {
            for (c, k) in coverage.data_mut().iter_mut().zip(clip.data()) {
                *c = ((*c as u16 * *k as u16 + 127) / 255) as u8;
            }
        }

        let Some(rect) = self.target_rect() else {
            return Ok(());
        };
        self.composite(Area::Rect(rect), Some(&coverage));
        Ok(())
    }

    fn push_group(&mut self, content: Content) -> Result<()> {
        let (width, height) = (self.target.width(), self.target.height());
        let layer =
            Pixmap::new(width, height).ok_or(DrawError::SurfaceAllocation { width, height })?;
        let parent = std::mem::replace(&mut self.target, layer);
        self.frames.push(Frame {
            parent,
            saved_state: self.state.clone(),
            saved_stack: std::mem::take(&mut self.stack),
            kind: FrameKind::Group(content),
        });
        log::trace!("push_group {:?} depth={}", content, self.frames.len());
        Ok(())
    }

    fn pop_group(&mut self) -> Result<SurfaceId> {
        if !matches!(
            self.frames.last().map(|f| &f.kind),
            Some(FrameKind::Group(_))
        ) {
            return Err(DrawError::UnbalancedGroup);
        }
        let Some((mut layer, kind)) = self.pop_frame() else {
            return Err(DrawError::UnbalancedGroup);
        };
        if matches!(kind, FrameKind::Group(Content::Alpha)) {
            for px in layer.pixels_mut() {
                *px = PremultipliedColorU8::from_rgba(0, 0, 0, px.alpha())
                    .unwrap_or(PremultipliedColorU8::TRANSPARENT);
            }
        }
        let id = self.insert_surface(layer, Transform::identity());
        log::trace!("pop_group -> surface {} depth={}", id, self.frames.len());
        Ok(id)
    }

    fn begin_recording(&mut self, width: f32, height: f32) -> Result<()> {
        let ts = self.state.transform;
        let sx = ts.sx.hypot(ts.ky);
        let sy = ts.kx.hypot(ts.sy);
        let pixel_width = (width * sx).ceil();
        let pixel_height = (height * sy).ceil();
        let alloc_error = DrawError::SurfaceAllocation {
            width: pixel_width.max(0.0) as u32,
            height: pixel_height.max(0.0) as u32,
        };
        if !(pixel_width >= 1.0 && pixel_height >= 1.0) || !(sx > 0.0 && sy > 0.0) {
            return Err(alloc_error);
        }
        let recording =
            Pixmap::new(pixel_width as u32, pixel_height as u32).ok_or(alloc_error)?;

        let parent = std::mem::replace(&mut self.target, recording);
        let fresh = GraphicsState {
            transform: Transform::from_scale(sx, sy),
            ..GraphicsState::default()
        };
        self.frames.push(Frame {
            parent,
            saved_state: std::mem::replace(&mut self.state, fresh),
            saved_stack: std::mem::take(&mut self.stack),
            kind: FrameKind::Recording {
                placement: ts.pre_scale(1.0 / sx, 1.0 / sy),
                path: std::mem::take(&mut self.path),
            },
        });
        log::trace!("begin_recording {}x{}", pixel_width, pixel_height);
        Ok(())
    }

    fn end_recording(&mut self) -> Result<SurfaceId> {
        if !matches!(
            self.frames.last().map(|f| &f.kind),
            Some(FrameKind::Recording { .. })
        ) {
            return Err(DrawError::UnbalancedRecording);
        }
        let Some((layer, FrameKind::Recording { placement, path })) = self.pop_frame() else {
            return Err(DrawError::UnbalancedRecording);
        };
        self.path = path;
        let id = self.insert_surface(layer, placement);
        log::trace!("end_recording -> surface {}", id);
        Ok(id)
    }

    fn release(&mut self, surface: SurfaceId) {
        if self.surfaces.remove(&surface).is_some() {
            log::trace!("released surface {}", surface);
        } else {
            log::debug!("skipping finalization of surface {}: not alive", surface);
        }
    }

    fn live_surfaces(&self) -> usize {
        self.surfaces.len()
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(
        color.r.clamp(0.0, 1.0),
        color.g.clamp(0.0, 1.0),
        color.b.clamp(0.0, 1.0),
        color.a.clamp(0.0, 1.0),
    )
    .unwrap_or(tiny_skia::Color::TRANSPARENT)
}

fn gradient_shader(gradient: &LinearGradient, transform: Transform) -> Shader<'static> {
    let stops = gradient
        .stops
        .iter()
        .map(|s| tiny_skia::GradientStop::new(s.offset, skia_color(s.color)))
        .collect();
    tiny_skia::LinearGradient::new(
        Point::from_xy(gradient.from.0, gradient.from.1),
        Point::from_xy(gradient.to.0, gradient.to.1),
        stops,
        SpreadMode::Pad,
        transform,
    )
    .unwrap_or_else(|| {
        // Degenerate gradients (no stops, coincident points) paint their first stop.
        let color = gradient
            .stops
            .first()
            .map(|s| skia_color(s.color))
            .unwrap_or(tiny_skia::Color::TRANSPARENT);
        Shader::SolidColor(color)
    })
}

fn make_paint(source: &Source, blend_mode: BlendMode) -> Paint<'_> {
    let mut paint = Paint {
        anti_alias: true,
        blend_mode,
        ..Paint::default()
    };
    match source {
        Source::Solid(color) => paint.set_color(skia_color(*color)),
        Source::Gradient(gradient, transform) => {
            paint.shader = gradient_shader(gradient, *transform)
        }
        Source::Pixmap(pixmap, transform) => {
            let pixmap: &Pixmap = pixmap;
            paint.shader = Pattern::new(
                pixmap.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Bilinear,
                1.0,
                *transform,
            );
        }
    }
    paint
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{record_group, record_surface};
    use crate::paint::ImageSurface;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    fn canvas() -> RasterCanvas {
        RasterCanvas::new(20, 20).unwrap()
    }

    #[test]
    fn test_fill_rectangle() {
        let mut c = canvas();
        c.set_source(&PaintSource::Solid(Color::RED));
        c.rectangle(5.0, 5.0, 10.0, 10.0);
        c.fill().unwrap();
        assert_eq!(c.pixel_rgba(10, 10), Some(RED));
        assert_eq!(c.pixel_rgba(2, 2), Some(CLEAR));
    }

    #[test]
    fn test_translate_moves_path() {
        let mut c = canvas();
        c.translate(10.0, 10.0);
        c.rectangle(0.0, 0.0, 5.0, 5.0);
        c.translate(-10.0, -10.0);
        c.fill().unwrap();
        assert_eq!(c.pixel_rgba(12, 12), Some([0, 0, 0, 255]));
        assert_eq!(c.pixel_rgba(2, 2), Some(CLEAR));
    }

    #[test]
    fn test_group_round_trip_releases() {
        let mut c = canvas();
        c.push_group(Content::ColorAlpha).unwrap();
        assert_eq!(c.open_frames(), 1);
        let id = c.pop_group().unwrap();
        assert_eq!(c.open_frames(), 0);
        assert_eq!(c.live_surfaces(), 1);
        c.release(id);
        assert_eq!(c.live_surfaces(), 0);
        // Second release is skipped.
        c.release(id);
        assert_eq!(c.live_surfaces(), 0);
    }

    #[test]
    fn test_pop_without_push() {
        let mut c = canvas();
        assert!(matches!(c.pop_group(), Err(DrawError::UnbalancedGroup)));
        assert!(matches!(
            c.end_recording(),
            Err(DrawError::UnbalancedRecording)
        ));
    }

    #[test]
    fn test_group_restores_state() {
        let mut c = canvas();
        c.set_source(&PaintSource::Solid(Color::BLUE));
        c.push_group(Content::ColorAlpha).unwrap();
        c.set_source(&PaintSource::Solid(Color::RED));
        c.translate(100.0, 100.0);
        let id = c.pop_group().unwrap();
        c.release(id);
        c.rectangle(0.0, 0.0, 4.0, 4.0);
        c.fill().unwrap();
        assert_eq!(c.pixel_rgba(1, 1), Some(BLUE));
    }

    #[test]
    fn test_path_survives_group() {
        let mut c = canvas();
        c.rectangle(0.0, 0.0, 10.0, 10.0);
        let id = record_group(&mut c, Content::ColorAlpha, |_| Ok(())).unwrap();
        c.release(id);
        c.fill().unwrap();
        assert_eq!(c.pixel_rgba(5, 5), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_alpha_group_drops_color() {
        let mut c = canvas();
        let id = record_group(&mut c, Content::Alpha, |c| {
            c.set_source(&PaintSource::Solid(Color::RED));
            c.paint()
        })
        .unwrap();
        c.set_source_surface(id).unwrap();
        c.paint().unwrap();
        c.release(id);
        assert_eq!(c.pixel_rgba(3, 3), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_clip_limits_paint() {
        let mut c = canvas();
        c.rectangle(0.0, 0.0, 10.0, 20.0);
        c.clip();
        c.set_source(&PaintSource::Solid(Color::RED));
        c.paint().unwrap();
        assert_eq!(c.pixel_rgba(5, 5), Some(RED));
        assert_eq!(c.pixel_rgba(15, 5), Some(CLEAR));
        c.reset_clip();
        c.set_source(&PaintSource::Solid(Color::BLUE));
        c.paint().unwrap();
        assert_eq!(c.pixel_rgba(15, 5), Some(BLUE));
    }

    #[test]
    fn test_source_mask_replaces_covered_pixels_only() {
        let mut c = canvas();
        c.set_source(&PaintSource::Solid(Color::BLUE));
        c.paint().unwrap();
        let mask = record_group(&mut c, Content::Alpha, |c| {
            c.rectangle(0.0, 0.0, 10.0, 20.0);
            c.fill()
        })
        .unwrap();
        c.set_source(&PaintSource::Solid(Color::RED.with_alpha(0.0)));
        c.set_operator(Operator::Source);
        c.mask(mask).unwrap();
        c.release(mask);
        assert_eq!(c.pixel_rgba(5, 5), Some(CLEAR));
        assert_eq!(c.pixel_rgba(15, 5), Some(BLUE));
    }

    #[test]
    fn test_translucent_source_mask_replaces_instead_of_blending() {
        let mut c = canvas();
        c.set_source(&PaintSource::Solid(Color::BLUE));
        c.paint().unwrap();
        let mask = record_group(&mut c, Content::Alpha, |c| {
            c.rectangle(0.0, 0.0, 10.0, 20.0);
            c.fill()
        })
        .unwrap();
        c.set_source(&PaintSource::Solid(Color::RED.with_alpha(0.5)));
        c.set_operator(Operator::Source);
        c.mask(mask).unwrap();
        c.release(mask);

        let mut reference = canvas();
        reference.set_source(&PaintSource::Solid(Color::RED.with_alpha(0.5)));
        reference.paint().unwrap();
        assert_eq!(c.pixel_rgba(0, 0), reference.pixel_rgba(0, 0));
        assert_eq!(c.pixel_rgba(9, 19), reference.pixel_rgba(0, 0));
        assert_eq!(c.pixel_rgba(10, 0), Some(BLUE));
        assert_eq!(c.pixel_rgba(19, 19), Some(BLUE));
    }

    #[test]
    fn test_clipped_source_leaves_outside_untouched() {
        let mut c = canvas();
        c.set_source(&PaintSource::Solid(Color::BLUE));
        c.paint().unwrap();
        c.rectangle(0.0, 0.0, 10.0, 20.0);
        c.clip();
        c.set_operator(Operator::Source);
        c.set_source(&PaintSource::Solid(Color::RED));
        c.rectangle(0.0, 0.0, 20.0, 10.0);
        c.fill().unwrap();
        assert_eq!(c.pixel_rgba(5, 5), Some(RED));
        assert_eq!(c.pixel_rgba(15, 5), Some(BLUE));
        assert_eq!(c.pixel_rgba(5, 15), Some(BLUE));

        c.set_operator(Operator::Clear);
        c.paint().unwrap();
        assert_eq!(c.pixel_rgba(5, 15), Some(CLEAR));
        assert_eq!(c.pixel_rgba(15, 15), Some(BLUE));
    }

    #[test]
    fn test_pattern_source_shares_image_pixels() {
        let image = ImageSurface::solid(4, 4, Color::GREEN).unwrap();
        let mut c = canvas();
        c.set_source(&PaintSource::Pattern(image.clone()));
        match &c.state.source {
            Source::Pixmap(pixmap, _) => assert!(Arc::ptr_eq(pixmap, image.pixmap())),
            _ => panic!("pattern did not become a pixmap source"),
        }
        c.rectangle(0.0, 0.0, 4.0, 4.0);
        c.fill().unwrap();
        assert_eq!(c.pixel_rgba(2, 2), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_zero_width_stroke_is_empty() {
        let mut c = canvas();
        c.set_line_width(0.0);
        c.rectangle(5.0, 5.0, 10.0, 10.0);
        c.stroke().unwrap();
        assert_eq!(c.pixel_rgba(5, 5), Some(CLEAR));
    }

    #[test]
    fn test_recording_is_placed_with_captured_transform() {
        let mut c = canvas();
        c.translate(10.0, 10.0);
        let id = record_surface(&mut c, 5.0, 5.0, |c| {
            c.set_source(&PaintSource::Solid(Color::BLACK));
            c.paint()
        })
        .unwrap();
        c.translate(-10.0, -10.0);
        c.set_source(&PaintSource::Solid(Color::RED));
        c.mask(id).unwrap();
        c.release(id);
        assert_eq!(c.pixel_rgba(12, 12), Some(RED));
        assert_eq!(c.pixel_rgba(5, 5), Some(CLEAR));
        assert_eq!(c.live_surfaces(), 0);
    }

    #[test]
    fn test_empty_recording_fails() {
        let mut c = canvas();
        assert!(matches!(
            c.begin_recording(0.0, 10.0),
            Err(DrawError::SurfaceAllocation { .. })
        ));
        assert_eq!(c.open_frames(), 0);
    }

    #[test]
    fn test_arc_draws_circle() {
        let mut c = canvas();
        c.arc(10.0, 10.0, 8.0, 0.0, TAU);
        c.close_path();
        c.fill().unwrap();
        assert_eq!(c.pixel_rgba(10, 10), Some([0, 0, 0, 255]));
        assert_eq!(c.pixel_rgba(0, 0), Some(CLEAR));
    }
}
