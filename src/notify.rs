//! Change notifications emitted by property setters.
//!
//! Widgets do not talk to an event bus directly; they hold a
//! [`NotificationSink`] supplied by the host and report two things per
//! change: which property changed, and whether the host must redraw or
//! re-run layout.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

/// Canonical property names of the background decorator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Widget,
    Bg,
    Fg,
    Shape,
    BorderWidth,
    BorderColor,
    BorderStrategy,
    BgImage,
}

impl Property {
    pub const ALL: [Property; 8] = [
        Property::Widget,
        Property::Bg,
        Property::Fg,
        Property::Shape,
        Property::BorderWidth,
        Property::BorderColor,
        Property::BorderStrategy,
        Property::BgImage,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Property::Widget => "widget",
            Property::Bg => "bg",
            Property::Fg => "fg",
            Property::Shape => "shape",
            Property::BorderWidth => "border_width",
            Property::BorderColor => "border_color",
            Property::BorderStrategy => "border_strategy",
            Property::BgImage => "bgimage",
        }
    }

    /// Look up a canonical name. Deprecated aliases are handled by
    /// [`crate::compat::canonical_property`].
    pub fn from_name(name: &str) -> Option<Property> {
        Property::ALL.into_iter().find(|p| p.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// `property::<name>`
    PropertyChanged(Property),
    /// `widget::redraw_needed`
    RedrawNeeded,
    /// `widget::layout_changed`
    LayoutChanged,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::PropertyChanged(property) => write!(f, "property::{}", property.name()),
            Notification::RedrawNeeded => f.write_str("widget::redraw_needed"),
            Notification::LayoutChanged => f.write_str("widget::layout_changed"),
        }
    }
}

pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}

impl<T: NotificationSink + ?Sized> NotificationSink for Rc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

bitflags! {
    /// Flags indicating what aspects of rendering need to be updated
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ChangeFlags: u8 {
        /// Widget needs layout recalculation (size/position may change)
        const NEEDS_LAYOUT = 0b01;
        /// Widget needs repainting (visual appearance changed)
        const NEEDS_PAINT  = 0b10;
    }
}

/// Sink that accumulates change flags and the full notification log until
/// the host drains them.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    flags: Cell<ChangeFlags>,
    log: RefCell<Vec<Notification>>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(&self) -> ChangeFlags {
        self.flags.get()
    }

    pub fn needs_layout(&self) -> bool {
        self.flags.get().contains(ChangeFlags::NEEDS_LAYOUT)
    }

    pub fn needs_paint(&self) -> bool {
        self.flags.get().contains(ChangeFlags::NEEDS_PAINT)
    }

    /// Take the accumulated flags, leaving them empty.
    pub fn take_flags(&self) -> ChangeFlags {
        self.flags.replace(ChangeFlags::empty())
    }

    /// Take the notifications received so far.
    pub fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    pub fn notification_count(&self) -> usize {
        self.log.borrow().len()
    }
}

impl NotificationSink for ChangeTracker {
    fn notify(&self, notification: Notification) {
        let flags = match notification {
            Notification::PropertyChanged(_) => ChangeFlags::empty(),
            // Layout changes always repaint too.
            Notification::LayoutChanged => ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            Notification::RedrawNeeded => ChangeFlags::NEEDS_PAINT,
        };
        self.flags.set(self.flags.get() | flags);
        self.log.borrow_mut().push(notification);
    }
}
