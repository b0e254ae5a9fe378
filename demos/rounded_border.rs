//! Renders a bordered, rounded background around a fixed-size child and
//! writes one PNG per pipeline, `<stem>_primary.png` and
//! `<stem>_fallback.png` (stem defaults to `rounded_border`).
//!
//! Run with `RUST_LOG=trace` to see the driver's log output.

use backdrop::prelude::*;

/// Leaf widget with a fixed preferred size that fills itself with the
/// inherited source.
struct Swatch(Size);

impl Widget for Swatch {
    fn fit(&self, _ctx: &DrawContext, _width: f32, _height: f32) -> Size {
        self.0
    }

    fn draw(
        &self,
        _ctx: &DrawContext,
        canvas: &mut dyn Canvas,
        width: f32,
        height: f32,
    ) -> Result<(), DrawError> {
        canvas.rectangle(width / 4.0, height / 4.0, width / 2.0, height / 2.0);
        canvas.fill()
    }
}

fn main() {
    env_logger::init();

    let stem = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "rounded_border".to_string());

    let ctx = DrawContext::default();
    let mut widget = background()
        .with_child(Swatch(Size::new(80.0, 30.0)))
        .with_bg(Color::rgb(0.1, 0.1, 0.15))
        .with_fg(Color::rgb(0.9, 0.9, 0.9))
        .with_shape(Shape::rounded_rect(10.0))
        .with_border_width(5.0)
        .with_border_color(Color::from_hex(0xE06C75))
        .with_border_strategy(BorderStrategy::Inner);

    let size = fit_widget(&ctx, &widget, 400.0, 400.0);
    log::info!("Fitted size {}x{}", size.width, size.height);

    for (pipeline, suffix) in [(Pipeline::Primary, "primary"), (Pipeline::Fallback, "fallback")] {
        widget.set_pipeline(pipeline);
        let canvas = match render(&ctx, &widget, size.width as u32, size.height as u32) {
            Ok(canvas) => canvas,
            Err(err) => {
                log::error!("Failed to render with {:?}: {}", pipeline, err);
                std::process::exit(1);
            }
        };
        let path = format!("{}_{}.png", stem, suffix);
        if let Err(err) = canvas.to_rgba_image().save(&path) {
            log::error!("Failed to write {}: {}", path, err);
            std::process::exit(1);
        }
        log::info!("Wrote {}", path);
    }
}
