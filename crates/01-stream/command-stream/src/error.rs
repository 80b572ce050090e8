use thiserror::Error;

/// Convenience result alias for blocking stream submissions.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors surfaced to callers blocked in [`CommandStream::exec`](crate::CommandStream::exec).
#[derive(Debug, Error)]
pub enum StreamError {
    /// The command panicked on the worker thread. The worker keeps running.
    #[error("command panicked on the worker thread: {message}")]
    Panicked {
        /// Panic payload rendered as text.
        message: String,
    },

    /// The worker thread has terminated and can no longer run commands.
    #[error("command stream worker has terminated")]
    WorkerGone,

    /// The worker thread tried to wait on itself: a blocking `exec`, or a
    /// submission into a full queue.
    #[error("submission from the worker thread would deadlock")]
    Reentrant,

    /// The worker thread could not be spawned.
    #[error("failed to spawn command stream worker: {0}")]
    Spawn(#[from] std::io::Error),
}
