//! Tag dispatch from raw records to typed events, and back.

use crate::event::{
    Event, JoystickAxis, JoystickButtonEvent, JoystickConnectEvent, JoystickMoveEvent, KeyCode,
    KeyEvent, MouseButton, MouseButtonEvent, MouseMoveEvent, MouseWheelEvent, SizeEvent,
    TextEvent,
};
use crate::kind::EventKind;
use crate::raw::{KeyModifiers, RawEvent};

/// Decodes one raw record.
///
/// Only the payload words belonging to the record's kind are read. The
/// "none" sentinel and any tag without a defined kind yield `None`; this
/// never panics.
pub fn decode(raw: &RawEvent) -> Option<Event> {
    let kind = EventKind::from_tag(raw.tag())?;
    let event = match kind {
        EventKind::Closed => Event::Closed,
        EventKind::Resized => Event::Resized(SizeEvent {
            width: raw.u32_at(0),
            height: raw.u32_at(1),
        }),
        EventKind::LostFocus => Event::LostFocus,
        EventKind::GainedFocus => Event::GainedFocus,
        EventKind::TextEntered => Event::TextEntered(TextEvent {
            unicode: raw.u32_at(0),
        }),
        EventKind::KeyPressed => Event::KeyPressed(key_event(raw)),
        EventKind::KeyReleased => Event::KeyReleased(key_event(raw)),
        EventKind::MouseWheelMoved => Event::MouseWheelMoved(MouseWheelEvent {
            delta: raw.i32_at(0),
            x: raw.i32_at(1),
            y: raw.i32_at(2),
        }),
        EventKind::MouseButtonPressed => Event::MouseButtonPressed(mouse_button_event(raw)),
        EventKind::MouseButtonReleased => Event::MouseButtonReleased(mouse_button_event(raw)),
        EventKind::MouseMoved => Event::MouseMoved(MouseMoveEvent {
            x: raw.i32_at(0),
            y: raw.i32_at(1),
        }),
        EventKind::MouseEntered => Event::MouseEntered,
        EventKind::MouseLeft => Event::MouseLeft,
        EventKind::JoystickButtonPressed => {
            Event::JoystickButtonPressed(joystick_button_event(raw))
        }
        EventKind::JoystickButtonReleased => {
            Event::JoystickButtonReleased(joystick_button_event(raw))
        }
        EventKind::JoystickMoved => Event::JoystickMoved(JoystickMoveEvent {
            joystick_id: raw.u32_at(0),
            axis: JoystickAxis::from_raw(raw.i32_at(1)),
            position: raw.f32_at(2),
        }),
        EventKind::JoystickConnected => Event::JoystickConnected(joystick_connect_event(raw)),
        EventKind::JoystickDisconnected => {
            Event::JoystickDisconnected(joystick_connect_event(raw))
        }
    };
    Some(event)
}

fn key_event(raw: &RawEvent) -> KeyEvent {
    KeyEvent {
        code: KeyCode(raw.i32_at(0)),
        alt: raw.flag_at(1),
        control: raw.flag_at(2),
        shift: raw.flag_at(3),
        system: raw.flag_at(4),
    }
}

fn mouse_button_event(raw: &RawEvent) -> MouseButtonEvent {
    MouseButtonEvent {
        button: MouseButton::from_raw(raw.i32_at(0)),
        x: raw.i32_at(1),
        y: raw.i32_at(2),
    }
}

fn joystick_button_event(raw: &RawEvent) -> JoystickButtonEvent {
    JoystickButtonEvent {
        joystick_id: raw.u32_at(0),
        button: raw.u32_at(1),
    }
}

fn joystick_connect_event(raw: &RawEvent) -> JoystickConnectEvent {
    JoystickConnectEvent {
        joystick_id: raw.u32_at(0),
    }
}

impl Event {
    /// Encodes the event into the record a native source would produce for it.
    pub fn to_raw(&self) -> RawEvent {
        let kind = self.kind();
        match self {
            Event::Closed
            | Event::LostFocus
            | Event::GainedFocus
            | Event::MouseEntered
            | Event::MouseLeft => RawEvent::bare(kind),
            Event::Resized(ev) => RawEvent::resized(ev.width, ev.height),
            Event::TextEntered(ev) => RawEvent::text_entered(ev.unicode),
            Event::KeyPressed(ev) | Event::KeyReleased(ev) => RawEvent::key(
                kind,
                ev.code.0,
                KeyModifiers {
                    alt: ev.alt,
                    control: ev.control,
                    shift: ev.shift,
                    system: ev.system,
                },
            ),
            Event::MouseWheelMoved(ev) => RawEvent::mouse_wheel_moved(ev.delta, ev.x, ev.y),
            Event::MouseButtonPressed(ev) | Event::MouseButtonReleased(ev) => {
                RawEvent::mouse_button(kind, ev.button.to_raw(), ev.x, ev.y)
            }
            Event::MouseMoved(ev) => RawEvent::mouse_moved(ev.x, ev.y),
            Event::JoystickButtonPressed(ev) | Event::JoystickButtonReleased(ev) => {
                RawEvent::joystick_button(kind, ev.joystick_id, ev.button)
            }
            Event::JoystickMoved(ev) => {
                RawEvent::joystick_moved(ev.joystick_id, ev.axis.to_raw(), ev.position)
            }
            Event::JoystickConnected(ev) | Event::JoystickDisconnected(ev) => {
                RawEvent::joystick_connection(kind, ev.joystick_id)
            }
        }
    }
}
