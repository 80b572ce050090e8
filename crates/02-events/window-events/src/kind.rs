//! Event kind tags as they appear on the wire.

use serde::{Deserialize, Serialize};

/// Tag the native layer uses for "no event pending".
pub const EVENT_NONE_TAG: u32 = 18;

/// Number of defined event kinds.
pub const EVENT_KIND_COUNT: usize = 18;

/// The eighteen defined event kinds, numbered as the native layer numbers them.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Wire tag 0, decoded as [`Event::Closed`](crate::Event::Closed).
    Closed = 0,
    /// Wire tag 1, decoded as [`Event::Resized`](crate::Event::Resized).
    Resized = 1,
    /// Wire tag 2, decoded as [`Event::LostFocus`](crate::Event::LostFocus).
    LostFocus = 2,
    /// Wire tag 3, decoded as [`Event::GainedFocus`](crate::Event::GainedFocus).
    GainedFocus = 3,
    /// Wire tag 4, decoded as [`Event::TextEntered`](crate::Event::TextEntered).
    TextEntered = 4,
    /// Wire tag 5, decoded as [`Event::KeyPressed`](crate::Event::KeyPressed).
    KeyPressed = 5,
    /// Wire tag 6, decoded as [`Event::KeyReleased`](crate::Event::KeyReleased).
    KeyReleased = 6,
    /// Wire tag 7, decoded as [`Event::MouseWheelMoved`](crate::Event::MouseWheelMoved).
    MouseWheelMoved = 7,
    /// Wire tag 8, decoded as [`Event::MouseButtonPressed`](crate::Event::MouseButtonPressed).
    MouseButtonPressed = 8,
    /// Wire tag 9, decoded as [`Event::MouseButtonReleased`](crate::Event::MouseButtonReleased).
    MouseButtonReleased = 9,
    /// Wire tag 10, decoded as [`Event::MouseMoved`](crate::Event::MouseMoved).
    MouseMoved = 10,
    /// Wire tag 11, decoded as [`Event::MouseEntered`](crate::Event::MouseEntered).
    MouseEntered = 11,
    /// Wire tag 12, decoded as [`Event::MouseLeft`](crate::Event::MouseLeft).
    MouseLeft = 12,
    /// Wire tag 13, decoded as [`Event::JoystickButtonPressed`](crate::Event::JoystickButtonPressed).
    JoystickButtonPressed = 13,
    /// Wire tag 14, decoded as [`Event::JoystickButtonReleased`](crate::Event::JoystickButtonReleased).
    JoystickButtonReleased = 14,
    /// Wire tag 15, decoded as [`Event::JoystickMoved`](crate::Event::JoystickMoved).
    JoystickMoved = 15,
    /// Wire tag 16, decoded as [`Event::JoystickConnected`](crate::Event::JoystickConnected).
    JoystickConnected = 16,
    /// Wire tag 17, decoded as [`Event::JoystickDisconnected`](crate::Event::JoystickDisconnected).
    JoystickDisconnected = 17,
}

impl EventKind {
    /// Every defined kind in tag order.
    pub const ALL: [EventKind; EVENT_KIND_COUNT] = [
        EventKind::Closed,
        EventKind::Resized,
        EventKind::LostFocus,
        EventKind::GainedFocus,
        EventKind::TextEntered,
        EventKind::KeyPressed,
        EventKind::KeyReleased,
        EventKind::MouseWheelMoved,
        EventKind::MouseButtonPressed,
        EventKind::MouseButtonReleased,
        EventKind::MouseMoved,
        EventKind::MouseEntered,
        EventKind::MouseLeft,
        EventKind::JoystickButtonPressed,
        EventKind::JoystickButtonReleased,
        EventKind::JoystickMoved,
        EventKind::JoystickConnected,
        EventKind::JoystickDisconnected,
    ];

    /// Maps a wire tag to its kind. The sentinel and unknown tags yield `None`.
    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::ALL.get(usize::try_from(tag).ok()?).copied()
    }

    /// Wire tag of this kind.
    pub fn tag(self) -> u32 {
        self as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_in_order() {
        for (idx, kind) in EventKind::ALL.iter().enumerate() {
            assert_eq!(kind.tag(), idx as u32);
            assert_eq!(EventKind::from_tag(idx as u32), Some(*kind));
        }
    }

    #[test]
    fn sentinel_and_unknown_tags_have_no_kind() {
        assert_eq!(EventKind::from_tag(EVENT_NONE_TAG), None);
        assert_eq!(EventKind::from_tag(19), None);
        assert_eq!(EventKind::from_tag(u32::MAX), None);
    }
}
