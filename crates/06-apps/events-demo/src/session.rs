//! Frame loop replaying decoded events until the window closes or input runs dry.

use anyhow::Result;
use clap::ValueEnum;
use log::debug;
use std::io::Write;
use window::{NativeWindow, Window};
use window_events::{Event, KeyCode};

/// How decoded events are written out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per event.
    Text,
    /// One JSON object per line.
    Ndjson,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub events: usize,
    pub frames: u64,
    pub closed: bool,
}

/// Text helpers used by the session output.
pub mod render {
    use super::OutputFormat;
    use anyhow::Result;
    use window_events::Event;

    /// One output line for `event`. NDJSON lines parse back into the same
    /// [`Event`]; non-finite joystick positions are written as strings.
    pub fn line(format: OutputFormat, event: &Event) -> Result<String> {
        Ok(match format {
            OutputFormat::Text => event.to_string(),
            OutputFormat::Ndjson => serde_json::to_string(event)?,
        })
    }
}

/// True for events that end the session: the close button or Escape.
pub fn requests_close(event: &Event) -> bool {
    match event {
        Event::Closed => true,
        Event::KeyPressed(key) => key.code == KeyCode::ESCAPE,
        _ => false,
    }
}

/// Drives the frame loop.
///
/// `batch == 0` polls one event per round trip; otherwise up to `batch`
/// events are pulled per round trip.
pub fn run<W: NativeWindow>(
    window: &Window<W>,
    format: OutputFormat,
    batch: usize,
    out: &mut impl Write,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    while window.is_open()? {
        let events: Vec<Event> = if batch > 0 {
            window.drain_events(batch)?.into_vec()
        } else {
            window.events().collect::<Result<_, _>>()?
        };
        if events.is_empty() {
            debug!("no pending input after {} frames", summary.frames);
            break;
        }

        for event in events {
            writeln!(out, "{}", render::line(format, &event)?)?;
            summary.events += 1;
            if requests_close(&event) {
                window.close()?;
                summary.closed = true;
            }
        }

        window.display()?;
        summary.frames += 1;
    }

    Ok(summary)
}
