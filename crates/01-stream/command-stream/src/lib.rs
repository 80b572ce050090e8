#![deny(missing_docs)]
//! Thread-affine command stream.
//!
//! Windowing, graphics and audio back-ends often demand that every call comes
//! from one particular OS thread. This crate owns such a thread and lets any
//! number of callers hand it work:
//! * [`CommandStream::enqueue`] – fire-and-forget, returns once queued.
//! * [`CommandStream::exec`] – blocks until the work has run and returns its value.
//! * [`Affine`] – handle to a value that lives entirely on the worker.
//!
//! The queue is bounded: producers block while it is full, nothing is ever
//! dropped. Commands run in enqueue order, one at a time.

mod affine;
mod command;
pub mod config;
mod error;
mod stream;

pub use affine::Affine;
pub use command::{Command, Completion, CompletionToken};
pub use config::{DetachedFaultPolicy, StreamConfig};
pub use error::{StreamError, StreamResult};
pub use stream::CommandStream;

/// Queues `op` on the global stream without waiting for it.
pub fn enqueue(op: impl FnOnce() + Send + 'static) {
    CommandStream::global().enqueue(op);
}

/// Runs `op` on the global stream's worker and returns its value.
pub fn exec<F, R>(op: F) -> StreamResult<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    CommandStream::global().exec(op)
}
