//! The command stream: one bounded FIFO queue drained by one worker thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, error, trace};
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::command::{Command, CompletionToken};
use crate::config::{DetachedFaultPolicy, StreamConfig};
use crate::error::{StreamError, StreamResult};

static GLOBAL: Lazy<CommandStream> = Lazy::new(|| {
    CommandStream::with_config(StreamConfig::from_env())
        .unwrap_or_else(|err| panic!("global command stream unavailable: {err}"))
});

struct Shared {
    tx: Sender<Command>,
    worker: ThreadId,
    halted: Arc<AtomicBool>,
    config: StreamConfig,
}

/// Serialises work from any number of threads onto a single worker thread.
///
/// Commands run one at a time, in the order they were enqueued, always on the
/// same thread. Native state that must only be touched from one OS thread is
/// written exclusively from inside commands.
///
/// Handles are cheap to clone. A stream built with [`CommandStream::with_config`]
/// stops once every handle is gone and the queue has drained; the
/// [`global`](CommandStream::global) stream lives for the rest of the process.
#[derive(Clone)]
pub struct CommandStream {
    shared: Arc<Shared>,
}

impl CommandStream {
    /// Returns the process-wide stream, spawning its worker on first use.
    ///
    /// The capacity honours [`CAPACITY_ENV`](crate::config::CAPACITY_ENV);
    /// detached faults abort the process.
    ///
    /// # Panics
    ///
    /// Panics if the worker thread cannot be spawned.
    pub fn global() -> &'static CommandStream {
        &GLOBAL
    }

    /// Spawns a dedicated worker and returns a handle to it.
    pub fn with_config(config: StreamConfig) -> StreamResult<Self> {
        let config = StreamConfig {
            capacity: config.capacity.max(1),
            ..config
        };
        let (tx, rx) = bounded(config.capacity);
        let halted = Arc::new(AtomicBool::new(false));

        let worker = Worker {
            rx,
            name: config.thread_name.clone(),
            policy: config.detached_fault,
            halted: Arc::clone(&halted),
        };
        let handle = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || worker.run())?;

        debug!(
            "{}: worker spawned (capacity {}, detached faults {:?})",
            config.thread_name, config.capacity, config.detached_fault
        );

        Ok(Self {
            shared: Arc::new(Shared {
                tx,
                worker: handle.thread().id(),
                halted,
                config,
            }),
        })
    }

    /// Queues `op` and returns without waiting for it to run.
    ///
    /// Blocks while the queue is full. A panic inside `op` is fatal for the
    /// stream, see [`DetachedFaultPolicy`].
    ///
    /// # Panics
    ///
    /// Panics if the worker has terminated, or if called from the worker
    /// while the queue is full. The command would otherwise be lost, or the
    /// worker would wait on itself forever.
    pub fn enqueue(&self, op: impl FnOnce() + Send + 'static) {
        if let Err(err) = self.submit(Command::detached(op)) {
            panic!(
                "{}: fire-and-forget command lost: {err}",
                self.shared.config.thread_name
            );
        }
    }

    /// Queues `op`, blocks until it has run on the worker, and returns its value.
    ///
    /// A panic inside `op` comes back as [`StreamError::Panicked`]; the
    /// worker carries on with the next command.
    pub fn exec<F, R>(&self, op: F) -> StreamResult<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.is_worker_thread() {
            return Err(StreamError::Reentrant);
        }

        let slot = Arc::new(Mutex::new(None));
        let out = Arc::clone(&slot);
        let (token, completion) = CompletionToken::new();
        self.submit(Command::with_token(
            move || {
                *out.lock() = Some(op());
            },
            token,
        ))?;
        completion.wait()?;

        let value = slot.lock().take();
        value.ok_or(StreamError::WorkerGone)
    }

    /// Hands a prepared command to the worker, blocking while the queue is full.
    ///
    /// From the worker thread itself the queue is never waited on: a full
    /// queue there yields [`StreamError::Reentrant`], since only the worker
    /// could make room.
    pub fn submit(&self, cmd: Command) -> StreamResult<()> {
        if self.is_halted() {
            return Err(StreamError::WorkerGone);
        }
        if self.is_worker_thread() {
            return self.shared.tx.try_send(cmd).map_err(|err| match err {
                TrySendError::Full(_) => StreamError::Reentrant,
                TrySendError::Disconnected(_) => StreamError::WorkerGone,
            });
        }
        self.shared
            .tx
            .send(cmd)
            .map_err(|_| StreamError::WorkerGone)
    }

    /// True when called from this stream's worker thread.
    pub fn is_worker_thread(&self) -> bool {
        thread::current().id() == self.shared.worker
    }

    /// Identifier of the worker thread.
    pub fn worker_thread_id(&self) -> ThreadId {
        self.shared.worker
    }

    /// True once the worker stopped after a detached fault.
    pub fn is_halted(&self) -> bool {
        self.shared.halted.load(Ordering::Acquire)
    }

    /// Number of commands currently waiting in the queue.
    pub fn pending(&self) -> usize {
        self.shared.tx.len()
    }

    /// Configuration the stream was built with.
    pub fn config(&self) -> &StreamConfig {
        &self.shared.config
    }
}

struct Worker {
    rx: Receiver<Command>,
    name: String,
    policy: DetachedFaultPolicy,
    halted: Arc<AtomicBool>,
}

impl Worker {
    fn run(self) {
        let mut seq: u64 = 0;
        while let Ok(cmd) = self.rx.recv() {
            seq += 1;
            trace!("{}: running command #{seq} (blocking: {})", self.name, cmd.is_blocking());
            let Err(message) = cmd.run() else {
                continue;
            };

            error!(
                "{}: fire-and-forget command #{seq} panicked: {message}",
                self.name
            );
            match self.policy {
                DetachedFaultPolicy::Abort => {
                    error!("{}: aborting process, thread-affine state is undefined", self.name);
                    std::process::abort();
                }
                DetachedFaultPolicy::Halt => {
                    self.halted.store(true, Ordering::Release);
                    error!("{}: worker halted after {seq} commands", self.name);
                    self.discard_remaining();
                    return;
                }
            }
        }
        debug!("{}: all handles dropped, worker stopped after {seq} commands", self.name);
    }

    /// Drops queued commands unrun until every handle is gone. Each dropped
    /// token wakes its waiter with [`StreamError::WorkerGone`].
    fn discard_remaining(&self) {
        let mut discarded = 0usize;
        for cmd in self.rx.iter() {
            discarded += 1;
            drop(cmd);
        }
        debug!("{}: discarded {discarded} commands after halt", self.name);
    }
}
