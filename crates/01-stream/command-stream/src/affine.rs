//! Handles to values that live on a stream's worker thread.
//!
//! Native objects (windows, GL contexts, audio devices) are frequently `!Send`
//! and must stay on the thread that created them. An [`Affine<T>`]
//! keeps the value in a slot table owned by the worker thread and gives
//! callers a `Send + Sync` handle that can only reach the value through the
//! stream.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use crate::command::Command;
use crate::error::StreamResult;
use crate::stream::CommandStream;

static NEXT_SLOT: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static SLOTS: RefCell<HashMap<u64, Box<dyn Any>>> = RefCell::new(HashMap::new());
}

/// Caller-side handle to a `T` owned by a stream's worker thread.
pub struct Affine<T: 'static> {
    stream: CommandStream,
    slot: u64,
    // `T` never leaves the worker, so the handle is Send + Sync whatever `T` is.
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Affine<T> {
    /// Builds the value on the global stream's worker.
    pub fn new<F>(init: F) -> StreamResult<Self>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self::new_in(CommandStream::global(), init)
    }

    /// Builds the value on `stream`'s worker and blocks until it exists.
    pub fn new_in<F>(stream: &CommandStream, init: F) -> StreamResult<Self>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let slot = NEXT_SLOT.fetch_add(1, Ordering::Relaxed);
        stream.exec(move || {
            let value: Box<dyn Any> = Box::new(init());
            SLOTS.with(|slots| slots.borrow_mut().insert(slot, value));
        })?;
        Ok(Self {
            stream: stream.clone(),
            slot,
            _marker: PhantomData,
        })
    }

    /// Runs `f` against the value on the worker and returns its result.
    pub fn with<F, R>(&self, f: F) -> StreamResult<R>
    where
        F: FnOnce(&mut T) -> R + Send + 'static,
        R: Send + 'static,
    {
        let slot = self.slot;
        self.stream.exec(move || with_slot(slot, f))
    }

    /// Queues `f` against the value without waiting for it.
    pub fn post<F>(&self, f: F)
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        let slot = self.slot;
        self.stream.enqueue(move || with_slot(slot, f));
    }

    /// Stream the value lives on.
    pub fn stream(&self) -> &CommandStream {
        &self.stream
    }
}

impl<T: 'static> Drop for Affine<T> {
    fn drop(&mut self) {
        let slot = self.slot;
        if self.stream.is_worker_thread() {
            release(slot);
            return;
        }
        if self
            .stream
            .submit(Command::detached(move || release(slot)))
            .is_err()
        {
            debug!("affine slot {slot} outlived its worker");
        }
    }
}

/// Temporarily removes a value from the slot table so `f` may itself touch
/// other slots; the value goes back even if `f` unwinds.
struct Checkout {
    slot: u64,
    value: Option<Box<dyn Any>>,
}

impl Drop for Checkout {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            SLOTS.with(|slots| slots.borrow_mut().insert(self.slot, value));
        }
    }
}

fn with_slot<T: 'static, R>(slot: u64, f: impl FnOnce(&mut T) -> R) -> R {
    let value = SLOTS.with(|slots| slots.borrow_mut().remove(&slot));
    let mut checkout = Checkout { slot, value };
    let value = checkout
        .value
        .as_mut()
        .and_then(|boxed| boxed.downcast_mut::<T>())
        .unwrap_or_else(|| panic!("affine slot {slot} is not live on this thread"));
    f(value)
}

fn release(slot: u64) {
    let value = SLOTS.with(|slots| slots.borrow_mut().remove(&slot));
    drop(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DetachedFaultPolicy, StreamConfig};
    use std::rc::Rc;

    fn stream() -> CommandStream {
        CommandStream::with_config(
            StreamConfig::default()
                .thread_name("affine-test")
                .detached_fault(DetachedFaultPolicy::Halt),
        )
        .expect("spawn stream")
    }

    #[test]
    fn non_send_value_lives_on_worker() {
        let stream = stream();
        // Rc is !Send; it can only ever be touched on the worker.
        let counter = Affine::new_in(&stream, || Rc::new(std::cell::Cell::new(0u32)))
            .expect("create counter");

        counter.post(|rc| rc.set(rc.get() + 1));
        counter.post(|rc| rc.set(rc.get() + 1));
        let value = counter.with(|rc| rc.get()).expect("read counter");
        assert_eq!(value, 2);
    }

    #[test]
    fn value_survives_panicking_access() {
        let stream = stream();
        let label = Affine::new_in(&stream, || String::from("window")).expect("create label");

        let err = label
            .with(|_: &mut String| {
                panic!("native call failed");
            })
            .expect_err("panic surfaces");
        assert!(err.to_string().contains("native call failed"));

        let len = label.with(|s| s.len()).expect("slot still live");
        assert_eq!(len, 6);
    }

    #[test]
    fn drop_releases_slot_on_worker() {
        let stream = stream();
        let handle = Affine::new_in(&stream, || vec![1u8, 2, 3]).expect("create");
        let slot = handle.slot;
        drop(handle);

        let live = stream
            .exec(move || SLOTS.with(|slots| slots.borrow().contains_key(&slot)))
            .expect("inspect slots");
        assert!(!live);
    }
}
