//! Units of work and the one-shot tokens used to wait on them.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::error::{StreamError, StreamResult};

/// Result of running a command body: `Err` carries the panic message.
pub(crate) type Outcome = Result<(), String>;

type Operation = Box<dyn FnOnce() + Send + 'static>;

/// An operation bound for the worker thread, optionally paired with a
/// [`CompletionToken`] that is signalled once the operation returns.
pub struct Command {
    op: Operation,
    token: Option<CompletionToken>,
}

impl Command {
    /// Fire-and-forget command: nobody waits on it.
    pub fn detached(op: impl FnOnce() + Send + 'static) -> Self {
        Self {
            op: Box::new(op),
            token: None,
        }
    }

    /// Blocking command: `token` is signalled after `op` returns or panics.
    pub fn with_token(op: impl FnOnce() + Send + 'static, token: CompletionToken) -> Self {
        Self {
            op: Box::new(op),
            token: Some(token),
        }
    }

    /// True when a caller is waiting on this command.
    pub fn is_blocking(&self) -> bool {
        self.token.is_some()
    }

    /// Runs the operation on the current thread.
    ///
    /// Panics are caught. A blocking command hands the fault to its waiter
    /// and reports success; a detached command returns the panic message so
    /// the worker can apply its fault policy.
    pub(crate) fn run(self) -> Outcome {
        let Command { op, token } = self;
        let outcome = panic::catch_unwind(AssertUnwindSafe(op)).map_err(panic_message);
        match token {
            Some(token) => {
                token.signal(outcome);
                Ok(())
            }
            None => outcome,
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("blocking", &self.is_blocking())
            .finish_non_exhaustive()
    }
}

/// One-shot signal fulfilled by the worker after a blocking command finishes.
///
/// `signal` consumes the token, so it fires at most once. Dropping an
/// unsignalled token (the worker died with the command still queued) wakes
/// the waiter with [`StreamError::WorkerGone`].
#[derive(Debug)]
pub struct CompletionToken {
    tx: Sender<Outcome>,
}

/// Waiting half of a [`CompletionToken`].
#[derive(Debug)]
pub struct Completion {
    rx: Receiver<Outcome>,
}

impl CompletionToken {
    /// Creates a token together with the handle used to wait on it.
    pub fn new() -> (CompletionToken, Completion) {
        let (tx, rx) = bounded(1);
        (CompletionToken { tx }, Completion { rx })
    }

    pub(crate) fn signal(self, outcome: Outcome) {
        // The waiter may have gone away if its thread unwound; nothing to report then.
        let _ = self.tx.send(outcome);
    }
}

impl Completion {
    /// Blocks until the paired command has run.
    pub fn wait(self) -> StreamResult<()> {
        match self.rx.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(message)) => Err(StreamError::Panicked { message }),
            Err(_) => Err(StreamError::WorkerGone),
        }
    }
}

pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
