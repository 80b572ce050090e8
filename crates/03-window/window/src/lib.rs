#![deny(missing_docs)]
//! Native window handle routed through the thread-affine command stream.
//!
//! [`NativeWindow`] is the seam to a windowing backend that must only be
//! driven from one OS thread. [`Window`] owns such a backend on a
//! [`CommandStream`](command_stream::CommandStream) worker and turns the raw
//! records it reports into decoded [`Event`](window_events::Event)s.

mod error;
mod native;
mod settings;
mod window;

pub use error::{WindowError, WindowResult};
pub use native::{NativeWindow, ScriptedWindow};
pub use settings::{ContextSettings, WindowSettings};
pub use window::{PollEvents, Window};
