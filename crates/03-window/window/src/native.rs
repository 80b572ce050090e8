//! The thread-affine native window seam and an in-memory backend.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::rc::Rc;
use std::thread::{self, ThreadId};

use window_events::RawEvent;

use crate::settings::{ContextSettings, WindowSettings};

/// Joystick dead zone a fresh scripted window starts with.
const DEFAULT_JOYSTICK_THRESHOLD: f32 = 0.1;

/// Calls a native windowing backend exposes.
///
/// Implementations may be `!Send`: a [`Window`](crate::Window) creates them
/// on the command stream's worker and only ever calls them from there.
pub trait NativeWindow: 'static {
    /// Pops the next pending raw record, if any.
    fn poll_raw_event(&mut self) -> Option<RawEvent>;

    /// Blocks until a raw record is available. `None` means the backend failed.
    fn wait_raw_event(&mut self) -> Option<RawEvent>;

    /// Whether the window is still open.
    fn is_open(&self) -> bool;
    /// Closes the window; its resources stay alive until it is dropped.
    fn close(&mut self);
    /// Context the backend actually created.
    fn settings(&self) -> ContextSettings;
    /// Client area size in pixels.
    fn size(&self) -> (u32, u32);
    /// Resizes the client area.
    fn set_size(&mut self, width: u32, height: u32);
    /// Top-left corner on screen.
    fn position(&self) -> (i32, i32);
    /// Moves a top-level window.
    fn set_position(&mut self, x: i32, y: i32);
    /// Current title.
    fn title(&self) -> String;
    /// Replaces the title.
    fn set_title(&mut self, title: &str);
    /// Sets the icon from `width * height` RGBA pixels.
    fn set_icon(&mut self, width: u32, height: u32, pixels: &[u8]);
    /// Caps the frame rate; 0 disables the cap.
    fn set_framerate_limit(&mut self, limit: u32);
    /// Turns vertical synchronisation on or off.
    fn set_vertical_sync_enabled(&mut self, enabled: bool);
    /// Axis movement below this value produces no event.
    fn set_joystick_threshold(&mut self, threshold: f32);
    /// Turns key repeat on or off.
    fn set_key_repeat_enabled(&mut self, enabled: bool);
    /// Shows or hides the cursor.
    fn set_mouse_cursor_visible(&mut self, visible: bool);
    /// Makes the window the current rendering target; `false` on failure.
    fn set_active(&mut self, active: bool) -> bool;
    /// Text on the system clipboard.
    fn clipboard(&self) -> String;
    /// Replaces the system clipboard text.
    fn set_clipboard(&mut self, text: &str);

    /// Presents the current frame.
    fn display(&mut self);
}

/// Scripted backend fed with raw records, used by tests and the demo.
///
/// Remembers the thread that created it and panics if touched from any
/// other, so affinity mistakes show up as test failures.
#[derive(Debug)]
pub struct ScriptedWindow {
    owner: ThreadId,
    pending: VecDeque<RawEvent>,
    open: bool,
    active: bool,
    context: ContextSettings,
    size: (u32, u32),
    position: (i32, i32),
    title: String,
    icon: Option<(u32, u32, Vec<u8>)>,
    framerate_limit: u32,
    vertical_sync: bool,
    joystick_threshold: f32,
    key_repeat: bool,
    cursor_visible: bool,
    clipboard: String,
    frames: u64,
    native_calls: u64,
    _not_send: PhantomData<Rc<()>>,
}

impl ScriptedWindow {
    /// Opens a scripted window owned by the calling thread.
    pub fn new(settings: &WindowSettings) -> Self {
        Self {
            owner: thread::current().id(),
            pending: VecDeque::new(),
            open: true,
            active: true,
            context: settings.context,
            size: (settings.width, settings.height),
            position: (0, 0),
            title: settings.title.clone(),
            icon: None,
            framerate_limit: settings.framerate_limit.unwrap_or(0),
            vertical_sync: false,
            joystick_threshold: DEFAULT_JOYSTICK_THRESHOLD,
            key_repeat: settings.key_repeat,
            cursor_visible: settings.mouse_cursor_visible,
            clipboard: String::new(),
            frames: 0,
            native_calls: 0,
            _not_send: PhantomData,
        }
    }

    /// Appends records to the native queue.
    pub fn push_raw(&mut self, records: impl IntoIterator<Item = RawEvent>) {
        self.touch();
        self.pending.extend(records);
    }

    /// Thread the window was created on.
    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    /// Frames presented so far.
    pub fn frames_displayed(&self) -> u64 {
        self.frames
    }

    /// Current frame cap.
    pub fn framerate_limit(&self) -> u32 {
        self.framerate_limit
    }

    /// Whether vertical sync is on.
    pub fn vertical_sync_enabled(&self) -> bool {
        self.vertical_sync
    }

    /// Current joystick dead zone.
    pub fn joystick_threshold(&self) -> f32 {
        self.joystick_threshold
    }

    /// Whether key repeat is on.
    pub fn key_repeat_enabled(&self) -> bool {
        self.key_repeat
    }

    /// Whether the cursor is shown.
    pub fn mouse_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Whether the window is the current rendering target.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Icon dimensions and pixels, once one has been set.
    pub fn icon(&self) -> Option<(u32, u32, &[u8])> {
        self.icon
            .as_ref()
            .map(|(width, height, pixels)| (*width, *height, pixels.as_slice()))
    }

    /// Number of trait calls served so far.
    pub fn native_calls(&self) -> u64 {
        self.native_calls
    }

    fn touch(&mut self) {
        self.check_thread();
        self.native_calls += 1;
    }

    fn check_thread(&self) {
        let current = thread::current().id();
        assert_eq!(
            current, self.owner,
            "scripted window used from {current:?}, created on {:?}",
            self.owner
        );
    }
}

impl NativeWindow for ScriptedWindow {
    fn poll_raw_event(&mut self) -> Option<RawEvent> {
        self.touch();
        self.pending.pop_front()
    }

    fn wait_raw_event(&mut self) -> Option<RawEvent> {
        // Nothing can arrive while the worker is parked here, so an empty
        // script is reported as a backend failure instead of hanging.
        self.poll_raw_event()
    }

    fn is_open(&self) -> bool {
        self.check_thread();
        self.open
    }

    fn close(&mut self) {
        self.touch();
        self.open = false;
        self.active = false;
    }

    fn settings(&self) -> ContextSettings {
        self.check_thread();
        self.context
    }

    fn size(&self) -> (u32, u32) {
        self.check_thread();
        self.size
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.touch();
        self.size = (width, height);
    }

    fn position(&self) -> (i32, i32) {
        self.check_thread();
        self.position
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.touch();
        self.position = (x, y);
    }

    fn title(&self) -> String {
        self.check_thread();
        self.title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.touch();
        self.title = title.to_owned();
    }

    fn set_icon(&mut self, width: u32, height: u32, pixels: &[u8]) {
        self.touch();
        self.icon = Some((width, height, pixels.to_vec()));
    }

    fn set_framerate_limit(&mut self, limit: u32) {
        self.touch();
        self.framerate_limit = limit;
    }

    fn set_vertical_sync_enabled(&mut self, enabled: bool) {
        self.touch();
        self.vertical_sync = enabled;
    }

    fn set_joystick_threshold(&mut self, threshold: f32) {
        self.touch();
        self.joystick_threshold = threshold;
    }

    fn set_key_repeat_enabled(&mut self, enabled: bool) {
        self.touch();
        self.key_repeat = enabled;
    }

    fn set_mouse_cursor_visible(&mut self, visible: bool) {
        self.touch();
        self.cursor_visible = visible;
    }

    fn set_active(&mut self, active: bool) -> bool {
        self.touch();
        // A closed window has no context left to bind.
        if active && !self.open {
            return false;
        }
        self.active = active;
        true
    }

    fn clipboard(&self) -> String {
        self.check_thread();
        self.clipboard.clone()
    }

    fn set_clipboard(&mut self, text: &str) {
        self.touch();
        self.clipboard = text.to_owned();
    }

    fn display(&mut self) {
        self.touch();
        self.frames += 1;
    }
}
