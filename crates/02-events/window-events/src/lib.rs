#![deny(missing_docs)]
//! Window event records and their decoder.
//!
//! The native windowing layer reports input as fixed-size tagged records
//! ([`RawEvent`]). [`decode`] turns one record into exactly one [`Event`],
//! or `None` for the "no event" sentinel and for tags it does not know.
//! Decoding is total: malformed payloads still produce a well-formed value.

mod decode;
mod event;
mod kind;
mod raw;

pub use decode::decode;
pub use event::{
    Event, JoystickAxis, JoystickButtonEvent, JoystickConnectEvent, JoystickMoveEvent, KeyCode,
    KeyEvent, MouseButton, MouseButtonEvent, MouseMoveEvent, MouseWheelEvent, SizeEvent,
    TextEvent,
};
pub use kind::{EventKind, EVENT_KIND_COUNT, EVENT_NONE_TAG};
pub use raw::{KeyModifiers, RawEvent, WireError, RAW_EVENT_LEN, RAW_PAYLOAD_LEN};
