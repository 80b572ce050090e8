//! Window handle: every native call travels through the command stream.

use command_stream::{Affine, CommandStream};
use log::{trace, warn};
use smallvec::SmallVec;
use window_events::{decode, Event, RawEvent, EVENT_NONE_TAG};

use crate::error::{WindowError, WindowResult};
use crate::native::NativeWindow;
use crate::settings::{ContextSettings, WindowSettings};

/// Handle to a native window living on a command stream's worker.
///
/// Queries and calls whose completion matters (`is_open`, `size`, `close`,
/// `display`, event polling) block on the worker. Plain setters are queued
/// and return immediately.
pub struct Window<W: NativeWindow> {
    native: Affine<W>,
}

impl<W: NativeWindow> Window<W> {
    /// Opens a window on the global command stream.
    pub fn open<F>(settings: WindowSettings, create: F) -> WindowResult<Self>
    where
        F: FnOnce(&WindowSettings) -> W + Send + 'static,
    {
        Self::open_in(CommandStream::global(), settings, create)
    }

    /// Opens a window whose backend is created on `stream`'s worker.
    pub fn open_in<F>(
        stream: &CommandStream,
        settings: WindowSettings,
        create: F,
    ) -> WindowResult<Self>
    where
        F: FnOnce(&WindowSettings) -> W + Send + 'static,
    {
        let native = Affine::new_in(stream, move || {
            let mut native = create(&settings);
            if let Some(limit) = settings.framerate_limit {
                native.set_framerate_limit(limit);
            }
            native.set_key_repeat_enabled(settings.key_repeat);
            native.set_mouse_cursor_visible(settings.mouse_cursor_visible);
            native
        })?;
        Ok(Self { native })
    }

    /// Whether the window is still open.
    pub fn is_open(&self) -> WindowResult<bool> {
        Ok(self.native.with(|w| w.is_open())?)
    }

    /// Closes the window and waits until the backend has done so.
    pub fn close(&self) -> WindowResult<()> {
        Ok(self.native.with(|w| w.close())?)
    }

    /// Context the backend created.
    pub fn settings(&self) -> WindowResult<ContextSettings> {
        Ok(self.native.with(|w| w.settings())?)
    }

    /// Client area size in pixels.
    pub fn size(&self) -> WindowResult<(u32, u32)> {
        Ok(self.native.with(|w| w.size())?)
    }

    /// Queues a resize of the client area.
    pub fn set_size(&self, width: u32, height: u32) {
        self.native.post(move |w| w.set_size(width, height));
    }

    /// Top-left corner on screen.
    pub fn position(&self) -> WindowResult<(i32, i32)> {
        Ok(self.native.with(|w| w.position())?)
    }

    /// Queues a move of a top-level window.
    pub fn set_position(&self, x: i32, y: i32) {
        self.native.post(move |w| w.set_position(x, y));
    }

    /// Current title.
    pub fn title(&self) -> WindowResult<String> {
        Ok(self.native.with(|w| w.title())?)
    }

    /// Queues a title change.
    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.native.post(move |w| w.set_title(&title));
    }

    /// Queues an icon change from RGBA pixels.
    ///
    /// `pixels` must hold at least `width * height * 4` bytes; extra bytes
    /// are ignored. A short buffer is rejected before anything is queued.
    pub fn set_icon(&self, width: u32, height: u32, pixels: &[u8]) -> WindowResult<()> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4));
        let expected = match expected {
            Some(expected) if pixels.len() >= expected => expected,
            _ => {
                return Err(WindowError::IconSize {
                    width,
                    height,
                    expected: expected.unwrap_or(usize::MAX),
                    actual: pixels.len(),
                })
            }
        };
        let pixels = pixels[..expected].to_vec();
        self.native.post(move |w| w.set_icon(width, height, &pixels));
        Ok(())
    }

    /// Queues a frame cap; 0 disables it.
    pub fn set_framerate_limit(&self, limit: u32) {
        self.native.post(move |w| w.set_framerate_limit(limit));
    }

    /// Queues a vertical sync change.
    pub fn set_vertical_sync_enabled(&self, enabled: bool) {
        self.native.post(move |w| w.set_vertical_sync_enabled(enabled));
    }

    /// Queues a new joystick dead zone, in `0.0..=100.0`.
    pub fn set_joystick_threshold(&self, threshold: f32) {
        self.native.post(move |w| w.set_joystick_threshold(threshold));
    }

    /// Queues a key repeat change.
    pub fn set_key_repeat_enabled(&self, enabled: bool) {
        self.native.post(move |w| w.set_key_repeat_enabled(enabled));
    }

    /// Queues a cursor visibility change.
    pub fn set_mouse_cursor_visible(&self, visible: bool) {
        self.native.post(move |w| w.set_mouse_cursor_visible(visible));
    }

    /// Activates or deactivates the window as rendering target and reports
    /// whether the backend managed to.
    pub fn set_active(&self, active: bool) -> WindowResult<bool> {
        Ok(self.native.with(move |w| w.set_active(active))?)
    }

    /// Text on the system clipboard.
    pub fn clipboard(&self) -> WindowResult<String> {
        Ok(self.native.with(|w| w.clipboard())?)
    }

    /// Queues a clipboard update.
    pub fn set_clipboard(&self, text: impl Into<String>) {
        let text = text.into();
        self.native.post(move |w| w.set_clipboard(&text));
    }

    /// Presents the frame and waits until the backend has done so.
    pub fn display(&self) -> WindowResult<()> {
        Ok(self.native.with(|w| w.display())?)
    }

    /// Pops the next decodable event, or `None` once the native queue is empty.
    ///
    /// Each native poll is one blocking round trip to the worker. Records
    /// that decode to "no event" are skipped.
    pub fn poll_event(&self) -> WindowResult<Option<Event>> {
        loop {
            let Some(raw) = self.native.with(|w| w.poll_raw_event())? else {
                return Ok(None);
            };
            if let Some(event) = decode_logged(&raw) {
                return Ok(Some(event));
            }
        }
    }

    /// Blocks the worker until a decodable event arrives.
    ///
    /// Returns `None` if the backend reports a failure while waiting.
    pub fn wait_event(&self) -> WindowResult<Option<Event>> {
        loop {
            let Some(raw) = self.native.with(|w| w.wait_raw_event())? else {
                return Ok(None);
            };
            if let Some(event) = decode_logged(&raw) {
                return Ok(Some(event));
            }
        }
    }

    /// Iterator over pending events; ends when the native queue is empty.
    pub fn events(&self) -> PollEvents<'_, W> {
        PollEvents {
            window: self,
            done: false,
        }
    }

    /// Pulls up to `max` events in a single round trip to the worker.
    pub fn drain_events(&self, max: usize) -> WindowResult<SmallVec<[Event; 8]>> {
        if max == 0 {
            return Ok(SmallVec::new());
        }

        Ok(self.native.with(move |w| {
            let mut out = SmallVec::<[Event; 8]>::new();
            while out.len() < max {
                let Some(raw) = w.poll_raw_event() else {
                    break;
                };
                if let Some(event) = decode_logged(&raw) {
                    out.push(event);
                }
            }
            out
        })?)
    }

    /// Feeds every pending event to `handler` and returns how many were dispatched.
    pub fn dispatch_events(&self, mut handler: impl FnMut(Event)) -> WindowResult<usize> {
        let mut dispatched = 0;
        while let Some(event) = self.poll_event()? {
            handler(event);
            dispatched += 1;
        }
        Ok(dispatched)
    }

    /// Runs `f` against the backend on the worker.
    pub fn with_native<F, R>(&self, f: F) -> WindowResult<R>
    where
        F: FnOnce(&mut W) -> R + Send + 'static,
        R: Send + 'static,
    {
        Ok(self.native.with(f)?)
    }

    /// Stream the backend lives on.
    pub fn stream(&self) -> &CommandStream {
        self.native.stream()
    }
}

fn decode_logged(raw: &RawEvent) -> Option<Event> {
    let event = decode(raw);
    if event.is_none() {
        if raw.tag() == EVENT_NONE_TAG {
            trace!("skipping empty event record");
        } else {
            warn!("skipping raw event with undefined tag {}", raw.tag());
        }
    }
    event
}

/// Iterator returned by [`Window::events`].
///
/// Yields at most one error, after which it is exhausted.
pub struct PollEvents<'a, W: NativeWindow> {
    window: &'a Window<W>,
    done: bool,
}

impl<W: NativeWindow> Iterator for PollEvents<'_, W> {
    type Item = WindowResult<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.window.poll_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
