//! Stream configuration and environment overrides.

use log::warn;

/// Default number of commands buffered before producers block.
pub const DEFAULT_CAPACITY: usize = 16;
/// Default name given to the worker thread.
pub const DEFAULT_THREAD_NAME: &str = "command-stream";
/// Environment variable overriding the global stream's queue capacity.
pub const CAPACITY_ENV: &str = "COMMAND_STREAM_CAPACITY";

/// What the worker does when a fire-and-forget command panics.
///
/// Nobody is waiting on such a command, so the fault cannot be handed back.
/// Both policies treat it as fatal; they differ only in how far the damage
/// spreads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetachedFaultPolicy {
    /// Log the fault and abort the process.
    #[default]
    Abort,
    /// Log the fault and stop the worker. Later submissions fail loudly.
    Halt,
}

/// Construction parameters for a [`CommandStream`](crate::CommandStream).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamConfig {
    /// Queue capacity. Always at least one.
    pub capacity: usize,
    /// Name of the worker thread.
    pub thread_name: String,
    /// Reaction to panics in fire-and-forget commands.
    pub detached_fault: DetachedFaultPolicy,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            detached_fault: DetachedFaultPolicy::Abort,
        }
    }
}

impl StreamConfig {
    /// Default configuration with the capacity taken from [`CAPACITY_ENV`] when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(CAPACITY_ENV) {
            match parse_capacity(&raw) {
                Some(capacity) => config.capacity = capacity,
                None => warn!("ignoring {CAPACITY_ENV}={raw:?}: expected a positive integer"),
            }
        }
        config
    }

    /// Sets the queue capacity, clamped to at least one slot.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Sets the worker thread name.
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Sets the detached fault policy.
    pub fn detached_fault(mut self, policy: DetachedFaultPolicy) -> Self {
        self.detached_fault = policy;
        self
    }
}

fn parse_capacity(raw: &str) -> Option<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(capacity) => Some(capacity),
    }
}
