//! Typed event variants and their payload shapes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kind::EventKind;

/// Keyboard key identifier as reported by the native layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub i32);

impl KeyCode {
    /// Key the native layer could not identify.
    pub const UNKNOWN: KeyCode = KeyCode(-1);
    /// Letter A; letters run contiguously up to `Z`.
    pub const A: KeyCode = KeyCode(0);
    /// Letter Z.
    pub const Z: KeyCode = KeyCode(25);
    /// Top-row digit 0; digits run contiguously up to `NUM9`.
    pub const NUM0: KeyCode = KeyCode(26);
    /// Top-row digit 9.
    pub const NUM9: KeyCode = KeyCode(35);
    /// Escape.
    pub const ESCAPE: KeyCode = KeyCode(36);
    /// Left Control.
    pub const LCONTROL: KeyCode = KeyCode(37);
    /// Left Shift.
    pub const LSHIFT: KeyCode = KeyCode(38);
    /// Left Alt.
    pub const LALT: KeyCode = KeyCode(39);
    /// Space bar.
    pub const SPACE: KeyCode = KeyCode(57);
    /// Return / Enter.
    pub const RETURN: KeyCode = KeyCode(58);
    /// Backspace.
    pub const BACK: KeyCode = KeyCode(59);
    /// Tab.
    pub const TAB: KeyCode = KeyCode(60);
    /// Left arrow.
    pub const LEFT: KeyCode = KeyCode(71);
    /// Right arrow.
    pub const RIGHT: KeyCode = KeyCode(72);
    /// Up arrow.
    pub const UP: KeyCode = KeyCode(73);
    /// Down arrow.
    pub const DOWN: KeyCode = KeyCode(74);
}

/// Mouse button identifier. Ids the native layer adds later are kept as `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Id 0.
    Left,
    /// Id 1.
    Right,
    /// Id 2.
    Middle,
    /// Id 3, the first extra button.
    XButton1,
    /// Id 4, the second extra button.
    XButton2,
    /// Any id outside `0..=4`, kept verbatim.
    Other(i32),
}

impl MouseButton {
    /// Maps a native button id; never fails.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => MouseButton::Left,
            1 => MouseButton::Right,
            2 => MouseButton::Middle,
            3 => MouseButton::XButton1,
            4 => MouseButton::XButton2,
            other => MouseButton::Other(other),
        }
    }

    /// Native id of the button. Inverse of [`MouseButton::from_raw`].
    pub fn to_raw(self) -> i32 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::XButton1 => 3,
            MouseButton::XButton2 => 4,
            MouseButton::Other(other) => other,
        }
    }
}

/// Joystick axis identifier. Unknown ids are kept as `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoystickAxis {
    /// Id 0.
    X,
    /// Id 1.
    Y,
    /// Id 2.
    Z,
    /// Id 3.
    R,
    /// Id 4.
    U,
    /// Id 5.
    V,
    /// Id 6, horizontal point-of-view hat.
    PovX,
    /// Id 7, vertical point-of-view hat.
    PovY,
    /// Any id outside `0..=7`, kept verbatim.
    Other(i32),
}

impl JoystickAxis {
    /// Maps a native axis id; never fails.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => JoystickAxis::X,
            1 => JoystickAxis::Y,
            2 => JoystickAxis::Z,
            3 => JoystickAxis::R,
            4 => JoystickAxis::U,
            5 => JoystickAxis::V,
            6 => JoystickAxis::PovX,
            7 => JoystickAxis::PovY,
            other => JoystickAxis::Other(other),
        }
    }

    /// Native id of the axis. Inverse of [`JoystickAxis::from_raw`].
    pub fn to_raw(self) -> i32 {
        match self {
            JoystickAxis::X => 0,
            JoystickAxis::Y => 1,
            JoystickAxis::Z => 2,
            JoystickAxis::R => 3,
            JoystickAxis::U => 4,
            JoystickAxis::V => 5,
            JoystickAxis::PovX => 6,
            JoystickAxis::PovY => 7,
            JoystickAxis::Other(other) => other,
        }
    }
}

/// New client area size after a resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeEvent {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Text input; `unicode` is the raw 32-bit code point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextEvent {
    /// Code point exactly as reported, valid or not.
    pub unicode: u32,
}

impl TextEvent {
    /// The entered character, or `None` for surrogates and out-of-range values.
    pub fn character(&self) -> Option<char> {
        char::from_u32(self.unicode)
    }
}

/// Key press or release together with the modifier state at that moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key that changed state.
    pub code: KeyCode,
    /// Alt held.
    pub alt: bool,
    /// Control held.
    pub control: bool,
    /// Shift held.
    pub shift: bool,
    /// System key (Windows, Command, Super) held.
    pub system: bool,
}

/// Wheel movement at a cursor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MouseWheelEvent {
    /// Ticks moved; positive is away from the user.
    pub delta: i32,
    /// Cursor x relative to the window.
    pub x: i32,
    /// Cursor y relative to the window.
    pub y: i32,
}

/// Mouse button press or release at a cursor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MouseButtonEvent {
    /// Button that changed state.
    pub button: MouseButton,
    /// Cursor x relative to the window.
    pub x: i32,
    /// Cursor y relative to the window.
    pub y: i32,
}

/// Cursor position relative to the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MouseMoveEvent {
    /// Cursor x.
    pub x: i32,
    /// Cursor y.
    pub y: i32,
}

/// Joystick button press or release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JoystickButtonEvent {
    /// Joystick index.
    pub joystick_id: u32,
    /// Button index on that joystick.
    pub button: u32,
}

/// Joystick axis movement.
///
/// `position` serialises non-finite values as the strings `"NaN"`, `"inf"`
/// and `"-inf"` so JSON output reads back to the same event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JoystickMoveEvent {
    /// Joystick index.
    pub joystick_id: u32,
    /// Axis that moved.
    pub axis: JoystickAxis,
    /// New axis position, nominally in `-100.0..=100.0`.
    #[serde(with = "float_repr")]
    pub position: f32,
}

/// Joystick plugged in or removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JoystickConnectEvent {
    /// Joystick index.
    pub joystick_id: u32,
}

mod float_repr {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f32),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f32(*value)
        } else {
            serializer.serialize_str(&value.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => text
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid float {text:?}"))),
        }
    }
}

/// A decoded window event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The user asked to close the window.
    Closed,
    /// The window was resized.
    Resized(SizeEvent),
    /// The window lost input focus.
    LostFocus,
    /// The window gained input focus.
    GainedFocus,
    /// A character was typed.
    TextEntered(TextEvent),
    /// A key went down.
    KeyPressed(KeyEvent),
    /// A key went up.
    KeyReleased(KeyEvent),
    /// The mouse wheel turned.
    MouseWheelMoved(MouseWheelEvent),
    /// A mouse button went down.
    MouseButtonPressed(MouseButtonEvent),
    /// A mouse button went up.
    MouseButtonReleased(MouseButtonEvent),
    /// The cursor moved inside the window.
    MouseMoved(MouseMoveEvent),
    /// The cursor entered the window.
    MouseEntered,
    /// The cursor left the window.
    MouseLeft,
    /// A joystick button went down.
    JoystickButtonPressed(JoystickButtonEvent),
    /// A joystick button went up.
    JoystickButtonReleased(JoystickButtonEvent),
    /// A joystick axis moved.
    JoystickMoved(JoystickMoveEvent),
    /// A joystick was connected.
    JoystickConnected(JoystickConnectEvent),
    /// A joystick was disconnected.
    JoystickDisconnected(JoystickConnectEvent),
}

impl Event {
    /// Kind tag of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Closed => EventKind::Closed,
            Event::Resized(_) => EventKind::Resized,
            Event::LostFocus => EventKind::LostFocus,
            Event::GainedFocus => EventKind::GainedFocus,
            Event::TextEntered(_) => EventKind::TextEntered,
            Event::KeyPressed(_) => EventKind::KeyPressed,
            Event::KeyReleased(_) => EventKind::KeyReleased,
            Event::MouseWheelMoved(_) => EventKind::MouseWheelMoved,
            Event::MouseButtonPressed(_) => EventKind::MouseButtonPressed,
            Event::MouseButtonReleased(_) => EventKind::MouseButtonReleased,
            Event::MouseMoved(_) => EventKind::MouseMoved,
            Event::MouseEntered => EventKind::MouseEntered,
            Event::MouseLeft => EventKind::MouseLeft,
            Event::JoystickButtonPressed(_) => EventKind::JoystickButtonPressed,
            Event::JoystickButtonReleased(_) => EventKind::JoystickButtonReleased,
            Event::JoystickMoved(_) => EventKind::JoystickMoved,
            Event::JoystickConnected(_) => EventKind::JoystickConnected,
            Event::JoystickDisconnected(_) => EventKind::JoystickDisconnected,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn key(f: &mut fmt::Formatter<'_>, verb: &str, ev: &KeyEvent) -> fmt::Result {
            write!(
                f,
                "Key {verb}: {} Shift: {} Control: {} Alt: {} System: {}",
                ev.code.0, ev.shift, ev.control, ev.alt, ev.system
            )
        }

        fn mouse(f: &mut fmt::Formatter<'_>, verb: &str, ev: &MouseButtonEvent) -> fmt::Result {
            write!(
                f,
                "Mouse {verb}: {} [X: {} Y: {}]",
                ev.button.to_raw(),
                ev.x,
                ev.y
            )
        }

        match self {
            Event::Closed => f.write_str("Closed"),
            Event::Resized(ev) => write!(f, "Resized width: {} height: {}", ev.width, ev.height),
            Event::LostFocus => f.write_str("Lost Focus"),
            Event::GainedFocus => f.write_str("Gained Focus"),
            Event::TextEntered(ev) => match ev.character() {
                Some(ch) => write!(f, "Text entered: {ch}"),
                None => write!(f, "Text entered: U+{:04X}", ev.unicode),
            },
            Event::KeyPressed(ev) => key(f, "pressed", ev),
            Event::KeyReleased(ev) => key(f, "released", ev),
            Event::MouseWheelMoved(ev) => write!(f, "Mouse wheel moved: {}", ev.delta),
            Event::MouseButtonPressed(ev) => mouse(f, "pressed", ev),
            Event::MouseButtonReleased(ev) => mouse(f, "released", ev),
            Event::MouseMoved(ev) => write!(f, "Mouse moved: [X: {} Y: {}]", ev.x, ev.y),
            Event::MouseEntered => f.write_str("Mouse entered"),
            Event::MouseLeft => f.write_str("Mouse left"),
            Event::JoystickButtonPressed(ev) => {
                write!(f, "Joystick {} button pressed: {}", ev.joystick_id, ev.button)
            }
            Event::JoystickButtonReleased(ev) => {
                write!(f, "Joystick {} button released: {}", ev.joystick_id, ev.button)
            }
            Event::JoystickMoved(ev) => write!(
                f,
                "Joystick {} moved: [Axis {} Value: {}]",
                ev.joystick_id,
                ev.axis.to_raw(),
                ev.position
            ),
            Event::JoystickConnected(ev) => write!(f, "Joystick connected id: {}", ev.joystick_id),
            Event::JoystickDisconnected(ev) => {
                write!(f, "Joystick disconnected id: {}", ev.joystick_id)
            }
        }
    }
}
