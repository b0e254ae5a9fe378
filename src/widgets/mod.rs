pub mod background;
mod widget;

pub use background::{background, Background, BackgroundImage, BorderStrategy, Pipeline};
pub use widget::{Rect, Widget};
