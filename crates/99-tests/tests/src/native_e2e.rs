#![cfg(all(test, not(target_arch = "wasm32")))]

use command_stream::{Affine, CommandStream, DetachedFaultPolicy, StreamConfig, StreamError};
use crossbeam_channel::unbounded;
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use window::{ScriptedWindow, Window, WindowSettings};
use window_events::{
    Event, EventKind, JoystickAxis, KeyCode, KeyModifiers, RawEvent, RAW_EVENT_LEN,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn private_stream(name: &str, capacity: usize) -> CommandStream {
    CommandStream::with_config(
        StreamConfig::default()
            .capacity(capacity)
            .thread_name(name)
            .detached_fault(DetachedFaultPolicy::Halt),
    )
    .expect("spawn stream")
}

#[test]
fn global_enqueue_then_exec_sees_prior_commands() {
    init_logging();
    let log = Arc::new(Mutex::new(Vec::new()));

    for value in [1, 2] {
        let log = Arc::clone(&log);
        command_stream::enqueue(move || log.lock().push(value));
    }
    let observed = {
        let log = Arc::clone(&log);
        command_stream::exec(move || {
            let mut log = log.lock();
            log.push(3);
            log.clone()
        })
        .expect("exec on global stream")
    };

    assert_eq!(observed, vec![1, 2, 3]);
}

#[test]
fn global_exec_rejects_reentry_from_worker() {
    init_logging();
    let nested = command_stream::exec(|| command_stream::exec(|| ())).expect("outer exec");
    assert!(matches!(nested, Err(StreamError::Reentrant)));
}

#[test]
fn per_producer_order_survives_contention() {
    init_logging();
    const PRODUCERS: usize = 6;
    const PER_PRODUCER: usize = 300;

    // Capacity 1 keeps every producer blocked most of the time.
    let stream = private_stream("contention", 1);
    let log = Arc::new(Mutex::new(Vec::with_capacity(PRODUCERS * PER_PRODUCER)));

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let stream = stream.clone();
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for seq in 0..PER_PRODUCER {
                    let log = Arc::clone(&log);
                    stream.enqueue(move || log.lock().push((producer, seq)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    stream.exec(|| ()).expect("flush");

    let log = log.lock();
    assert_eq!(log.len(), PRODUCERS * PER_PRODUCER);
    let mut next = [0usize; PRODUCERS];
    for &(producer, seq) in log.iter() {
        assert_eq!(seq, next[producer], "producer {producer} reordered");
        next[producer] += 1;
    }
}

#[test]
fn affine_value_follows_worker_across_handles() {
    init_logging();
    let stream = private_stream("affine-e2e", 4);
    let counter = Arc::new(
        Affine::new_in(&stream, || std::rc::Rc::new(std::cell::Cell::new(0u32)))
            .expect("create"),
    );

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                for _ in 0..50 {
                    counter.post(|cell| cell.set(cell.get() + 1));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(counter.with(|cell| cell.get()).unwrap(), 200);
}

#[test]
fn global_window_decodes_records_from_wire_bytes() {
    init_logging();
    let window = Arc::new(
        Window::open(WindowSettings::new("e2e", 640, 480), ScriptedWindow::new)
            .expect("open on global stream"),
    );

    // A device thread frames records onto a byte channel.
    let (tx, rx) = unbounded::<[u8; RAW_EVENT_LEN]>();
    let device = thread::spawn(move || {
        let records = [
            RawEvent::resized(1280, 720),
            RawEvent::joystick_moved(2, 6, 0.25),
            RawEvent::new(1_000, [0xAB; 20]),
            RawEvent::key(EventKind::KeyPressed, KeyCode::ESCAPE.0, KeyModifiers::default()),
        ];
        for raw in records {
            tx.send(raw.to_bytes()).expect("send");
        }
    });
    device.join().unwrap();

    let records: Vec<RawEvent> = rx
        .try_iter()
        .map(|bytes| RawEvent::from_bytes(&bytes))
        .collect();
    window
        .with_native(move |native| native.push_raw(records))
        .expect("feed");

    let poller = {
        let window = Arc::clone(&window);
        thread::spawn(move || {
            let mut seen = Vec::new();
            let mut frames = 0;
            while window.is_open().expect("is_open") {
                let count = window
                    .dispatch_events(|event| {
                        if matches!(event, Event::KeyPressed(key) if key.code == KeyCode::ESCAPE) {
                            window.close().expect("close");
                        }
                        seen.push(event);
                    })
                    .expect("dispatch");
                window.display().expect("display");
                frames += 1;
                if count == 0 {
                    break;
                }
            }
            (seen, frames)
        })
    };
    let (seen, frames) = poller.join().unwrap();

    assert_eq!(frames, 1);
    assert_eq!(seen.len(), 3, "undefined tag is skipped");
    assert_eq!(seen[0].to_string(), "Resized width: 1280 height: 720");
    match seen[1] {
        Event::JoystickMoved(ev) => {
            assert_eq!(ev.joystick_id, 2);
            assert_eq!(ev.axis, JoystickAxis::PovX);
            assert_eq!(ev.position, 0.25);
        }
        other => panic!("expected joystick move, got {other:?}"),
    }
    assert_eq!(seen[2].kind(), EventKind::KeyPressed);
    assert!(!window.is_open().unwrap());
    assert!(!window.stream().is_worker_thread());
}
