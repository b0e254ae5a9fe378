//! Deprecated property names kept for older configurations.
//!
//! `shape_border_width` and `shape_border_color` are aliases of
//! `border_width` and `border_color`. Reads and writes through them behave
//! exactly like the canonical names and log a deprecation warning.

use crate::notify::Property;
use crate::paint::PaintSource;
use crate::widgets::Background;

const ALIASES: [(&str, Property); 2] = [
    ("shape_border_width", Property::BorderWidth),
    ("shape_border_color", Property::BorderColor),
];

/// Map a property name, canonical or deprecated, to its property.
pub fn canonical_property(name: &str) -> Option<Property> {
    if let Some(property) = Property::from_name(name) {
        return Some(property);
    }
    let (alias, property) = ALIASES.into_iter().find(|(alias, _)| *alias == name)?;
    log::warn!(
        "Property `{}` is deprecated, use `{}` instead",
        alias,
        property.name()
    );
    Some(property)
}

pub trait DeprecatedProperties {
    #[deprecated(note = "use `border_width`")]
    fn shape_border_width(&self) -> f32;
    #[deprecated(note = "use `set_border_width`")]
    fn set_shape_border_width(&mut self, width: f32);
    #[deprecated(note = "use `border_color`")]
    fn shape_border_color(&self) -> Option<&PaintSource>;
    #[deprecated(note = "use `set_border_color`")]
    fn set_shape_border_color(&mut self, color: Option<PaintSource>);
}

impl DeprecatedProperties for Background {
    fn shape_border_width(&self) -> f32 {
        log::warn!("`shape_border_width` is deprecated, use `border_width`");
        self.border_width()
    }

    fn set_shape_border_width(&mut self, width: f32) {
        log::warn!("`shape_border_width` is deprecated, use `border_width`");
        self.set_border_width(width);
    }

    fn shape_border_color(&self) -> Option<&PaintSource> {
        log::warn!("`shape_border_color` is deprecated, use `border_color`");
        self.border_color()
    }

    fn set_shape_border_color(&mut self, color: Option<PaintSource>) {
        log::warn!("`shape_border_color` is deprecated, use `border_color`");
        self.set_border_color(color);
    }
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::notify::{ChangeTracker, Notification};
    use crate::paint::Color;
    use crate::widgets::background;

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(canonical_property("border_width"), Some(Property::BorderWidth));
        assert_eq!(
            canonical_property("shape_border_width"),
            Some(Property::BorderWidth)
        );
        assert_eq!(
            canonical_property("shape_border_color"),
            Some(Property::BorderColor)
        );
        assert_eq!(canonical_property("shape_clip"), None);
    }

    #[test]
    fn test_alias_setters_notify_canonical_names() {
        let tracker = Rc::new(ChangeTracker::new());
        let mut bg = background().with_sink(tracker.clone());

        bg.set_shape_border_width(3.0);
        bg.set_shape_border_color(Some(Color::RED.into()));
        assert_eq!(bg.shape_border_width(), 3.0);
        assert_eq!(bg.border_width(), 3.0);
        assert_eq!(bg.shape_border_color(), bg.border_color());
        assert_eq!(
            tracker.take_notifications(),
            vec![
                Notification::PropertyChanged(Property::BorderWidth),
                Notification::RedrawNeeded,
                Notification::PropertyChanged(Property::BorderColor),
                Notification::RedrawNeeded,
            ]
        );
    }
}
