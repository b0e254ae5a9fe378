//! Host-side driver walking a widget tree.
//!
//! For each widget the driver calls `draw`, then `before_draw_children`,
//! then recurses into every placement returned by `layout` with the canvas
//! translated to the placement rectangle, and finally calls
//! `after_draw_children`. Each widget is drawn between a save/restore pair so
//! state set by a widget for its children never leaks to its siblings.

use crate::canvas::{Canvas, RasterCanvas};
use crate::context::DrawContext;
use crate::error::Result;
use crate::layout::Size;
use crate::widgets::Widget;

/// Preferred size of `widget`, clamped to `[0, width] x [0, height]`.
pub fn fit_widget(ctx: &DrawContext, widget: &dyn Widget, width: f32, height: f32) -> Size {
    let width = width.max(0.0);
    let height = height.max(0.0);
    let size = widget.fit(ctx, width, height);
    Size::new(
        size.width.clamp(0.0, width),
        size.height.clamp(0.0, height),
    )
}

/// Draw `widget` and its descendants into the `[0, width] x [0, height]` box
/// of the current user space.
///
/// When `before_draw_children` fails the children and `after_draw_children`
/// are skipped. A failing child does not stop its siblings, and
/// `after_draw_children` still runs so that anything the widget opened
/// before its children gets closed. The first error is returned.
pub fn draw_widget(
    ctx: &DrawContext,
    canvas: &mut dyn Canvas,
    widget: &dyn Widget,
    width: f32,
    height: f32,
) -> Result<()> {
    canvas.save();
    let result = draw_tree(ctx, canvas, widget, width, height);
    canvas.restore();
    result
}

fn draw_tree(
    ctx: &DrawContext,
    canvas: &mut dyn Canvas,
    widget: &dyn Widget,
    width: f32,
    height: f32,
) -> Result<()> {
    widget.draw(ctx, canvas, width, height)?;
    widget.before_draw_children(ctx, canvas, width, height)?;

    let mut children = Ok(());
    for placement in widget.layout(ctx, width, height) {
        let rect = placement.rect;
        if rect.size().is_empty() {
            log::trace!("Skipping empty placement {:?}", rect);
            continue;
        }
        canvas.save();
        canvas.translate(rect.x, rect.y);
        let drawn = draw_tree(ctx, canvas, placement.widget, rect.width, rect.height);
        canvas.restore();
        if let Err(err) = drawn {
            log::debug!("Child at {:?} failed to draw: {}", rect, err);
            if children.is_ok() {
                children = Err(err);
            }
        }
    }

    let after = widget.after_draw_children(ctx, canvas, width, height);
    children.and(after)
}

/// Draw `widget` into a fresh transparent raster canvas of the given size.
pub fn render(ctx: &DrawContext, widget: &dyn Widget, width: u32, height: u32) -> Result<RasterCanvas> {
    let mut canvas = RasterCanvas::new(width, height)?;
    draw_widget(ctx, &mut canvas, widget, width as f32, height as f32)?;
    log::trace!(
        "Rendered {}x{}, {} surfaces still alive",
        width,
        height,
        canvas.live_surfaces()
    );
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::DrawError;
    use crate::layout::Placement;
    use crate::widgets::Rect;

    /// Records the hook calls it receives into a shared log.
    struct Recorder<'a> {
        name: &'static str,
        log: &'a RefCell<Vec<String>>,
        children: Vec<Recorder<'a>>,
        fail_before: bool,
        fail_draw: bool,
    }

    impl<'a> Recorder<'a> {
        fn new(name: &'static str, log: &'a RefCell<Vec<String>>) -> Self {
            Self {
                name,
                log,
                children: Vec::new(),
                fail_before: false,
                fail_draw: false,
            }
        }

        fn record(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}.{}", self.name, hook));
        }
    }

    impl Widget for Recorder<'_> {
        fn fit(&self, _ctx: &DrawContext, width: f32, height: f32) -> Size {
            Size::new(width * 2.0, height * 2.0)
        }

        fn layout(&self, _ctx: &DrawContext, width: f32, height: f32) -> Vec<Placement<'_>> {
            self.children
                .iter()
                .map(|c| Placement::new(c, Rect::new(1.0, 1.0, width - 2.0, height - 2.0)))
                .collect()
        }

        fn draw(&self, _: &DrawContext, _: &mut dyn Canvas, _: f32, _: f32) -> Result<()> {
            self.record("draw");
            if self.fail_draw {
                return Err(DrawError::Callback(self.name.into()));
            }
            Ok(())
        }

        fn before_draw_children(
            &self,
            _: &DrawContext,
            _: &mut dyn Canvas,
            _: f32,
            _: f32,
        ) -> Result<()> {
            self.record("before");
            if self.fail_before {
                return Err(DrawError::Callback(self.name.into()));
            }
            Ok(())
        }

        fn after_draw_children(
            &self,
            _: &DrawContext,
            _: &mut dyn Canvas,
            _: f32,
            _: f32,
        ) -> Result<()> {
            self.record("after");
            Ok(())
        }
    }

    #[test]
    fn test_hook_order() {
        let log = RefCell::new(Vec::new());
        let mut root = Recorder::new("root", &log);
        root.children.push(Recorder::new("a", &log));
        root.children.push(Recorder::new("b", &log));

        let mut canvas = RasterCanvas::new(10, 10).unwrap();
        draw_widget(&DrawContext::default(), &mut canvas, &root, 10.0, 10.0).unwrap();
        assert_eq!(
            log.into_inner(),
            [
                "root.draw", "root.before", "a.draw", "a.before", "a.after", "b.draw",
                "b.before", "b.after", "root.after",
            ]
        );
    }

    #[test]
    fn test_failing_before_skips_children_and_after() {
        let log = RefCell::new(Vec::new());
        let mut root = Recorder::new("root", &log);
        root.fail_before = true;
        root.children.push(Recorder::new("a", &log));

        let mut canvas = RasterCanvas::new(10, 10).unwrap();
        assert!(draw_widget(&DrawContext::default(), &mut canvas, &root, 10.0, 10.0).is_err());
        assert_eq!(log.into_inner(), ["root.draw", "root.before"]);
    }

    #[test]
    fn test_failing_child_still_runs_after() {
        let log = RefCell::new(Vec::new());
        let mut root = Recorder::new("root", &log);
        let mut broken = Recorder::new("a", &log);
        broken.fail_draw = true;
        root.children.push(broken);
        root.children.push(Recorder::new("b", &log));

        let mut canvas = RasterCanvas::new(10, 10).unwrap();
        let err = draw_widget(&DrawContext::default(), &mut canvas, &root, 10.0, 10.0);
        assert!(matches!(err, Err(DrawError::Callback(name)) if name == "a"));
        assert_eq!(log.borrow().last().map(String::as_str), Some("root.after"));
        assert!(log.borrow().iter().any(|entry| entry == "b.draw"));
        assert_eq!(canvas.open_frames(), 0);
    }

    #[test]
    fn test_empty_placements_are_skipped() {
        let log = RefCell::new(Vec::new());
        let mut root = Recorder::new("root", &log);
        root.children.push(Recorder::new("a", &log));

        let mut canvas = RasterCanvas::new(10, 10).unwrap();
        draw_widget(&DrawContext::default(), &mut canvas, &root, 2.0, 2.0).unwrap();
        assert_eq!(log.into_inner(), ["root.draw", "root.before", "root.after"]);
    }

    #[test]
    fn test_fit_is_clamped() {
        let log = RefCell::new(Vec::new());
        let leaf = Recorder::new("root", &log);
        let ctx = DrawContext::default();
        assert_eq!(fit_widget(&ctx, &leaf, 10.0, 5.0), Size::new(10.0, 5.0));
        assert_eq!(fit_widget(&ctx, &leaf, -3.0, 5.0), Size::new(0.0, 5.0));
    }
}
