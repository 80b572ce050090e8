//! Fixed-size raw event records produced by the native layer.
//!
//! A record is a little-endian `u32` kind tag followed by a 20-byte payload.
//! The payload is a union: which words are meaningful depends on the tag, and
//! only [`decode`](crate::decode) knows which ones to read. Every field is a
//! 32-bit word at a 4-byte aligned offset.

use thiserror::Error;

use crate::kind::{EventKind, EVENT_NONE_TAG};

/// Size of the payload area in bytes.
pub const RAW_PAYLOAD_LEN: usize = 20;
/// Size of a whole record (tag + payload) in bytes.
pub const RAW_EVENT_LEN: usize = 4 + RAW_PAYLOAD_LEN;

const WORDS: usize = RAW_PAYLOAD_LEN / 4;

/// Errors raised while framing raw records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// The input was not exactly one record long.
    #[error("raw event record must be {expected} bytes, got {actual}")]
    Length {
        /// Required length, [`RAW_EVENT_LEN`].
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
}

/// One tagged record as read from the native event queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawEvent {
    tag: u32,
    payload: [u8; RAW_PAYLOAD_LEN],
}

impl RawEvent {
    /// Builds a record from a tag and an untouched payload area.
    pub const fn new(tag: u32, payload: [u8; RAW_PAYLOAD_LEN]) -> Self {
        Self { tag, payload }
    }

    /// The "no event" sentinel record.
    pub const fn none() -> Self {
        Self::new(EVENT_NONE_TAG, [0; RAW_PAYLOAD_LEN])
    }

    /// Kind tag, possibly undefined.
    pub fn tag(&self) -> u32 {
        self.tag
    }

    /// Payload area exactly as reported.
    pub fn payload(&self) -> &[u8; RAW_PAYLOAD_LEN] {
        &self.payload
    }

    /// Reads a record from its wire form. Any 24 bytes are a valid record.
    pub fn from_bytes(bytes: &[u8; RAW_EVENT_LEN]) -> Self {
        let mut tag = [0u8; 4];
        tag.copy_from_slice(&bytes[..4]);
        let mut payload = [0u8; RAW_PAYLOAD_LEN];
        payload.copy_from_slice(&bytes[4..]);
        Self::new(u32::from_le_bytes(tag), payload)
    }

    /// Frames a record from an arbitrary byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, WireError> {
        let bytes: &[u8; RAW_EVENT_LEN] = bytes.try_into().map_err(|_| WireError::Length {
            expected: RAW_EVENT_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Wire form of the record.
    pub fn to_bytes(&self) -> [u8; RAW_EVENT_LEN] {
        let mut out = [0u8; RAW_EVENT_LEN];
        out[..4].copy_from_slice(&self.tag.to_le_bytes());
        out[4..].copy_from_slice(&self.payload);
        out
    }

    pub(crate) fn word(&self, index: usize) -> [u8; 4] {
        let start = index * 4;
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.payload[start..start + 4]);
        word
    }

    pub(crate) fn u32_at(&self, index: usize) -> u32 {
        u32::from_le_bytes(self.word(index))
    }

    pub(crate) fn i32_at(&self, index: usize) -> i32 {
        i32::from_le_bytes(self.word(index))
    }

    pub(crate) fn f32_at(&self, index: usize) -> f32 {
        f32::from_le_bytes(self.word(index))
    }

    pub(crate) fn flag_at(&self, index: usize) -> bool {
        self.i32_at(index) != 0
    }

    fn from_words(kind: EventKind, words: &[[u8; 4]]) -> Self {
        debug_assert!(words.len() <= WORDS);
        let mut payload = [0u8; RAW_PAYLOAD_LEN];
        for (chunk, word) in payload.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(word);
        }
        Self::new(kind.tag(), payload)
    }

    /// A record for a kind that carries no payload.
    pub fn bare(kind: EventKind) -> Self {
        Self::from_words(kind, &[])
    }

    /// Resize record.
    pub fn resized(width: u32, height: u32) -> Self {
        Self::from_words(
            EventKind::Resized,
            &[width.to_le_bytes(), height.to_le_bytes()],
        )
    }

    /// Text record carrying a raw code point.
    pub fn text_entered(unicode: u32) -> Self {
        Self::from_words(EventKind::TextEntered, &[unicode.to_le_bytes()])
    }

    /// Key record; `kind` must be `KeyPressed` or `KeyReleased`.
    pub fn key(kind: EventKind, code: i32, modifiers: KeyModifiers) -> Self {
        let flag = |on: bool| i32::from(on).to_le_bytes();
        Self::from_words(
            kind,
            &[
                code.to_le_bytes(),
                flag(modifiers.alt),
                flag(modifiers.control),
                flag(modifiers.shift),
                flag(modifiers.system),
            ],
        )
    }

    /// Wheel record.
    pub fn mouse_wheel_moved(delta: i32, x: i32, y: i32) -> Self {
        Self::from_words(
            EventKind::MouseWheelMoved,
            &[delta.to_le_bytes(), x.to_le_bytes(), y.to_le_bytes()],
        )
    }

    /// Mouse button record; `kind` must be `MouseButtonPressed` or `MouseButtonReleased`.
    pub fn mouse_button(kind: EventKind, button: i32, x: i32, y: i32) -> Self {
        Self::from_words(
            kind,
            &[button.to_le_bytes(), x.to_le_bytes(), y.to_le_bytes()],
        )
    }

    /// Cursor move record.
    pub fn mouse_moved(x: i32, y: i32) -> Self {
        Self::from_words(EventKind::MouseMoved, &[x.to_le_bytes(), y.to_le_bytes()])
    }

    /// Joystick button record; `kind` must be `JoystickButtonPressed` or `JoystickButtonReleased`.
    pub fn joystick_button(kind: EventKind, joystick_id: u32, button: u32) -> Self {
        Self::from_words(kind, &[joystick_id.to_le_bytes(), button.to_le_bytes()])
    }

    /// Joystick axis record; `axis` is the native axis id.
    pub fn joystick_moved(joystick_id: u32, axis: i32, position: f32) -> Self {
        Self::from_words(
            EventKind::JoystickMoved,
            &[
                joystick_id.to_le_bytes(),
                axis.to_le_bytes(),
                position.to_le_bytes(),
            ],
        )
    }

    /// Joystick connection record; `kind` must be `JoystickConnected` or `JoystickDisconnected`.
    pub fn joystick_connection(kind: EventKind, joystick_id: u32) -> Self {
        Self::from_words(kind, &[joystick_id.to_le_bytes()])
    }
}

/// Modifier flags carried by key records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyModifiers {
    /// Alt held.
    pub alt: bool,
    /// Control held.
    pub control: bool,
    /// Shift held.
    pub shift: bool,
    /// System key held.
    pub system: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_round_trip() {
        let raw = RawEvent::resized(800, 600);
        let bytes = raw.to_bytes();
        assert_eq!(&bytes[..4], &1u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &800u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &600u32.to_le_bytes());
        assert_eq!(RawEvent::from_bytes(&bytes), raw);
    }

    #[test]
    fn from_slice_checks_length() {
        let bytes = RawEvent::none().to_bytes();
        assert_eq!(RawEvent::from_slice(&bytes), Ok(RawEvent::none()));
        assert_eq!(
            RawEvent::from_slice(&bytes[..10]),
            Err(WireError::Length {
                expected: RAW_EVENT_LEN,
                actual: 10
            })
        );
    }

    #[test]
    fn key_flags_are_words() {
        let raw = RawEvent::key(
            EventKind::KeyPressed,
            36,
            KeyModifiers {
                shift: true,
                ..KeyModifiers::default()
            },
        );
        assert_eq!(raw.i32_at(0), 36);
        assert!(!raw.flag_at(1));
        assert!(!raw.flag_at(2));
        assert!(raw.flag_at(3));
        assert!(!raw.flag_at(4));
    }
}
