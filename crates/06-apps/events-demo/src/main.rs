//! Replays a scripted native event session through the command stream and
//! prints every decoded event.

mod script;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use command_stream::{CommandStream, StreamConfig};
use log::info;
use session::OutputFormat;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use window::{ScriptedWindow, Window, WindowSettings};

/// Drive a scripted window and print its decoded events.
#[derive(Parser, Debug)]
#[command(author, version, about = "Replay native window events", long_about = None)]
struct Cli {
    /// Event script to replay (defaults to a built-in session).
    #[arg(short, long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Output format for decoded events.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Command queue capacity; runs on a private stream instead of the global one.
    #[arg(long, value_name = "N")]
    capacity: Option<usize>,

    /// Maximum events pulled per worker round trip (0 polls one at a time).
    #[arg(long, default_value_t = 0)]
    batch: usize,

    /// Window title.
    #[arg(long, default_value = "Events")]
    title: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let records = match &cli.script {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read script {path:?}"))?;
            script::parse_script(&source).with_context(|| format!("in script {path:?}"))?
        }
        None => script::parse_script(script::DEFAULT_SCRIPT)?,
    };

    let stream = match cli.capacity {
        Some(capacity) => CommandStream::with_config(
            StreamConfig::from_env()
                .capacity(capacity)
                .thread_name("events-demo"),
        )
        .context("failed to start command stream")?,
        None => CommandStream::global().clone(),
    };
    info!(
        "replaying {} records on a stream with capacity {}",
        records.len(),
        stream.config().capacity
    );

    let settings = WindowSettings::new(cli.title.as_str(), 800, 600).framerate_limit(60);
    let window = Window::open_in(&stream, settings, ScriptedWindow::new)
        .context("failed to open window")?;
    window.with_native(move |native| native.push_raw(records))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = session::run(&window, cli.format, cli.batch, &mut out)?;
    out.flush()?;

    info!(
        "{} events over {} frames (closed: {})",
        summary.events, summary.frames, summary.closed
    );
    Ok(())
}
