//! Line-oriented scripts describing raw native event records.
//!
//! One record per line; blank lines and `#` comments are ignored:
//!
//! ```text
//! resized 800 600
//! key_pressed 36 0 1 0 0   # code alt control shift system
//! text 104
//! joy_moved 0 1 -50.5
//! raw 42                   # arbitrary tag, empty payload
//! ```

use anyhow::{anyhow, bail, Context, Result};
use std::str::FromStr;
use window_events::{EventKind, KeyModifiers, RawEvent, RAW_PAYLOAD_LEN};

/// Session replayed when no script file is given.
pub const DEFAULT_SCRIPT: &str = "\
# window comes up and gains focus
gained_focus
resized 1024 768
mouse_entered
mouse_moved 120 80
mouse_pressed 0 120 80
mouse_released 0 120 80
wheel -1 120 80
text 104
text 105
key_pressed 57 0 0 1 0
key_released 57 0 0 1 0
joy_connected 0
joy_pressed 0 3
joy_moved 0 1 -42.5
joy_released 0 3
joy_disconnected 0
raw 99
mouse_left
lost_focus
key_pressed 36 0 0 0 0
";

pub fn parse_script(source: &str) -> Result<Vec<RawEvent>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = line.split('#').next().unwrap_or("").trim();
            (!line.is_empty()).then_some((idx + 1, line))
        })
        .map(|(lineno, line)| {
            parse_line(line).with_context(|| format!("line {lineno}: {line:?}"))
        })
        .collect()
}

fn parse_line(line: &str) -> Result<RawEvent> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().ok_or_else(|| anyhow!("empty record"))?;
    let args: Vec<&str> = tokens.collect();

    let raw = match name {
        "closed" => bare(EventKind::Closed, &args)?,
        "lost_focus" => bare(EventKind::LostFocus, &args)?,
        "gained_focus" => bare(EventKind::GainedFocus, &args)?,
        "mouse_entered" => bare(EventKind::MouseEntered, &args)?,
        "mouse_left" => bare(EventKind::MouseLeft, &args)?,
        "resized" => {
            expect_args(&args, 2)?;
            RawEvent::resized(num(args[0])?, num(args[1])?)
        }
        "text" => {
            expect_args(&args, 1)?;
            RawEvent::text_entered(num(args[0])?)
        }
        "key_pressed" | "key_released" => {
            let kind = if name == "key_pressed" {
                EventKind::KeyPressed
            } else {
                EventKind::KeyReleased
            };
            if args.len() != 1 && args.len() != 5 {
                bail!("expected a key code and optionally four modifier flags");
            }
            let flag = |idx: usize| -> Result<bool> {
                Ok(args.get(idx).map(|t| num::<i32>(t)).transpose()?.unwrap_or(0) != 0)
            };
            let modifiers = KeyModifiers {
                alt: flag(1)?,
                control: flag(2)?,
                shift: flag(3)?,
                system: flag(4)?,
            };
            RawEvent::key(kind, num(args[0])?, modifiers)
        }
        "wheel" => {
            expect_args(&args, 3)?;
            RawEvent::mouse_wheel_moved(num(args[0])?, num(args[1])?, num(args[2])?)
        }
        "mouse_pressed" | "mouse_released" => {
            expect_args(&args, 3)?;
            let kind = if name == "mouse_pressed" {
                EventKind::MouseButtonPressed
            } else {
                EventKind::MouseButtonReleased
            };
            RawEvent::mouse_button(kind, num(args[0])?, num(args[1])?, num(args[2])?)
        }
        "mouse_moved" => {
            expect_args(&args, 2)?;
            RawEvent::mouse_moved(num(args[0])?, num(args[1])?)
        }
        "joy_pressed" | "joy_released" => {
            expect_args(&args, 2)?;
            let kind = if name == "joy_pressed" {
                EventKind::JoystickButtonPressed
            } else {
                EventKind::JoystickButtonReleased
            };
            RawEvent::joystick_button(kind, num(args[0])?, num(args[1])?)
        }
        "joy_moved" => {
            expect_args(&args, 3)?;
            RawEvent::joystick_moved(num(args[0])?, num(args[1])?, num(args[2])?)
        }
        "joy_connected" | "joy_disconnected" => {
            expect_args(&args, 1)?;
            let kind = if name == "joy_connected" {
                EventKind::JoystickConnected
            } else {
                EventKind::JoystickDisconnected
            };
            RawEvent::joystick_connection(kind, num(args[0])?)
        }
        "raw" => {
            expect_args(&args, 1)?;
            RawEvent::new(num(args[0])?, [0; RAW_PAYLOAD_LEN])
        }
        other => bail!("unknown record kind {other:?}"),
    };
    Ok(raw)
}

fn bare(kind: EventKind, args: &[&str]) -> Result<RawEvent> {
    expect_args(args, 0)?;
    Ok(RawEvent::bare(kind))
}

fn expect_args(args: &[&str], count: usize) -> Result<()> {
    if args.len() != count {
        bail!("expected {count} argument(s), got {}", args.len());
    }
    Ok(())
}

fn num<T>(token: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    token
        .parse::<T>()
        .with_context(|| format!("invalid number {token:?}"))
}
