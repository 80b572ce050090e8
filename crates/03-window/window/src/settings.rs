/// OpenGL context parameters requested for a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextSettings {
    /// Bits of the depth buffer.
    pub depth_bits: u32,
    /// Bits of the stencil buffer.
    pub stencil_bits: u32,
    /// Multisampling level; 0 disables antialiasing.
    pub antialiasing_level: u32,
    /// Major OpenGL version.
    pub major_version: u32,
    /// Minor OpenGL version.
    pub minor_version: u32,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            depth_bits: 0,
            stencil_bits: 0,
            antialiasing_level: 0,
            major_version: 1,
            minor_version: 1,
        }
    }
}

/// Creation parameters applied to a native window when it is opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSettings {
    /// Initial title.
    pub title: String,
    /// Client area width in pixels.
    pub width: u32,
    /// Client area height in pixels.
    pub height: u32,
    /// Frame cap in frames per second; `None` leaves the backend's default.
    pub framerate_limit: Option<u32>,
    /// Whether holding a key repeats `KeyPressed` events.
    pub key_repeat: bool,
    /// Whether the cursor is shown over the window.
    pub mouse_cursor_visible: bool,
    /// Requested context; the backend may grant something close to it.
    pub context: ContextSettings,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "window".to_owned(),
            width: 800,
            height: 600,
            framerate_limit: None,
            key_repeat: true,
            mouse_cursor_visible: true,
            context: ContextSettings::default(),
        }
    }
}

impl WindowSettings {
    /// Settings with the given title and size and defaults elsewhere.
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            ..Self::default()
        }
    }

    /// Caps the frame rate.
    pub fn framerate_limit(mut self, limit: u32) -> Self {
        self.framerate_limit = Some(limit);
        self
    }

    /// Enables or disables key repeat.
    pub fn key_repeat(mut self, enabled: bool) -> Self {
        self.key_repeat = enabled;
        self
    }

    /// Requests a specific context.
    pub fn context(mut self, context: ContextSettings) -> Self {
        self.context = context;
        self
    }
}
