use command_stream::StreamError;
use thiserror::Error;

/// Result alias for window operations.
pub type WindowResult<T> = Result<T, WindowError>;

/// Errors returned by [`Window`](crate::Window) operations.
#[derive(Debug, Error)]
pub enum WindowError {
    /// The call could not run on the command stream.
    #[error("command stream error: {0}")]
    Stream(#[from] StreamError),

    /// An icon's pixel buffer is smaller than its RGBA dimensions require.
    #[error("icon of {width}x{height} needs {expected} RGBA bytes, got {actual}")]
    IconSize {
        /// Icon width in pixels.
        width: u32,
        /// Icon height in pixels.
        height: u32,
        /// `width * height * 4`.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
}
