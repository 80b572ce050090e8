//! Window handles drive a `!Send` backend exclusively from the worker thread.

use command_stream::{CommandStream, DetachedFaultPolicy, StreamConfig};
use parking_lot::Mutex;
use std::sync::Arc;
use window::{ContextSettings, ScriptedWindow, Window, WindowError, WindowSettings};
use window_events::{
    Event, EventKind, KeyCode, KeyModifiers, MouseMoveEvent, RawEvent, SizeEvent,
    RAW_PAYLOAD_LEN,
};

fn open(settings: WindowSettings) -> Window<ScriptedWindow> {
    let _ = env_logger::builder().is_test(true).try_init();
    let stream = CommandStream::with_config(
        StreamConfig::default()
            .thread_name("window-test")
            .detached_fault(DetachedFaultPolicy::Halt),
    )
    .expect("spawn stream");
    Window::open_in(&stream, settings, ScriptedWindow::new).expect("open window")
}

fn feed(window: &Window<ScriptedWindow>, records: Vec<RawEvent>) {
    window
        .with_native(move |native| native.push_raw(records))
        .expect("feed records");
}

#[test]
fn backend_is_created_on_worker() {
    let window = open(WindowSettings::default());
    let owner = window.with_native(|native| native.owner()).expect("owner");
    assert_eq!(owner, window.stream().worker_thread_id());
}

#[test]
fn settings_are_applied_on_open() {
    let window = open(
        WindowSettings::new("Events", 1024, 768)
            .framerate_limit(60)
            .key_repeat(false),
    );

    assert_eq!(window.title().unwrap(), "Events");
    assert_eq!(window.size().unwrap(), (1024, 768));
    let (limit, repeat) = window
        .with_native(|native| (native.framerate_limit(), native.key_repeat_enabled()))
        .unwrap();
    assert_eq!(limit, 60);
    assert!(!repeat);
}

#[test]
fn queued_setters_are_visible_to_later_queries() {
    let window = open(WindowSettings::default());

    window.set_title("renamed");
    window.set_size(320, 200);
    window.set_mouse_cursor_visible(false);

    assert_eq!(window.title().unwrap(), "renamed");
    assert_eq!(window.size().unwrap(), (320, 200));
    assert!(!window
        .with_native(|native| native.mouse_cursor_visible())
        .unwrap());
}

#[test]
fn context_and_position_are_queried_on_worker() {
    let context = ContextSettings {
        depth_bits: 24,
        stencil_bits: 8,
        antialiasing_level: 4,
        major_version: 3,
        minor_version: 3,
    };
    let window = open(WindowSettings::new("gl", 640, 480).context(context));

    assert_eq!(window.settings().unwrap(), context);
    assert_eq!(window.position().unwrap(), (0, 0));
    window.set_position(100, -20);
    assert_eq!(window.position().unwrap(), (100, -20));
}

#[test]
fn queued_render_switches_reach_backend() {
    let window = open(WindowSettings::default());

    window.set_vertical_sync_enabled(true);
    window.set_joystick_threshold(12.5);
    window.set_clipboard("copied");

    let (vsync, threshold) = window
        .with_native(|native| (native.vertical_sync_enabled(), native.joystick_threshold()))
        .unwrap();
    assert!(vsync);
    assert_eq!(threshold, 12.5);
    assert_eq!(window.clipboard().unwrap(), "copied");
}

#[test]
fn set_active_reports_backend_success() {
    let window = open(WindowSettings::default());

    assert!(window.set_active(false).unwrap());
    assert!(window.set_active(true).unwrap());
    window.close().unwrap();
    assert!(!window.set_active(true).unwrap());
}

#[test]
fn set_icon_checks_pixel_buffer_length() {
    let window = open(WindowSettings::default());

    match window.set_icon(2, 2, &[0xFF; 15]) {
        Err(WindowError::IconSize {
            width: 2,
            height: 2,
            expected: 16,
            actual: 15,
        }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(window
        .with_native(|native| native.icon().is_none())
        .unwrap());

    // Trailing bytes beyond the RGBA area are dropped.
    let mut pixels = vec![0x10; 16];
    pixels.extend([0xEE; 4]);
    window.set_icon(2, 2, &pixels).unwrap();
    let icon = window
        .with_native(|native| native.icon().map(|(w, h, px)| (w, h, px.to_vec())))
        .unwrap();
    assert_eq!(icon, Some((2, 2, vec![0x10; 16])));
}

#[test]
fn poll_event_decodes_in_native_order_and_skips_unknown_tags() {
    let window = open(WindowSettings::default());
    feed(
        &window,
        vec![
            RawEvent::resized(800, 600),
            RawEvent::new(42, [0; RAW_PAYLOAD_LEN]),
            RawEvent::none(),
            RawEvent::mouse_moved(3, 4),
        ],
    );

    assert_eq!(
        window.poll_event().unwrap(),
        Some(Event::Resized(SizeEvent {
            width: 800,
            height: 600
        }))
    );
    assert_eq!(
        window.poll_event().unwrap(),
        Some(Event::MouseMoved(MouseMoveEvent { x: 3, y: 4 }))
    );
    assert_eq!(window.poll_event().unwrap(), None);
}

#[test]
fn events_iterator_drains_queue() {
    let window = open(WindowSettings::default());
    feed(
        &window,
        vec![
            RawEvent::bare(EventKind::GainedFocus),
            RawEvent::key(EventKind::KeyPressed, KeyCode::ESCAPE.0, KeyModifiers::default()),
            RawEvent::bare(EventKind::Closed),
        ],
    );

    let kinds: Vec<EventKind> = window
        .events()
        .map(|event| event.expect("poll").kind())
        .collect();
    assert_eq!(
        kinds,
        vec![EventKind::GainedFocus, EventKind::KeyPressed, EventKind::Closed]
    );
    assert_eq!(window.events().count(), 0);
}

#[test]
fn drain_events_respects_budget() {
    let window = open(WindowSettings::default());
    feed(
        &window,
        (0..10).map(|i| RawEvent::mouse_moved(i, i)).collect(),
    );

    assert!(window.drain_events(0).unwrap().is_empty());
    let first = window.drain_events(4).unwrap();
    assert_eq!(first.len(), 4);
    assert_eq!(first[3], Event::MouseMoved(MouseMoveEvent { x: 3, y: 3 }));

    let rest = window.drain_events(100).unwrap();
    assert_eq!(rest.len(), 6);
    assert!(window.drain_events(1).unwrap().is_empty());
}

#[test]
fn dispatch_events_closes_on_escape() {
    let window = Arc::new(open(WindowSettings::default()));
    feed(
        &window,
        vec![
            RawEvent::text_entered('h' as u32),
            RawEvent::key(EventKind::KeyPressed, KeyCode::ESCAPE.0, KeyModifiers::default()),
        ],
    );

    let seen = Arc::new(Mutex::new(Vec::new()));
    let dispatched = {
        let seen = Arc::clone(&seen);
        let target = Arc::clone(&window);
        window
            .dispatch_events(move |event| {
                if let Event::KeyPressed(key) = event {
                    if key.code == KeyCode::ESCAPE {
                        target.close().expect("close");
                    }
                }
                seen.lock().push(event.to_string());
            })
            .unwrap()
    };

    assert_eq!(dispatched, 2);
    assert_eq!(seen.lock()[0], "Text entered: h");
    assert!(!window.is_open().unwrap());
}

#[test]
fn display_counts_frames() {
    let window = open(WindowSettings::default());
    for _ in 0..3 {
        window.display().unwrap();
    }
    assert_eq!(window.with_native(|native| native.frames_displayed()).unwrap(), 3);
}

#[test]
fn wait_event_reports_backend_failure_as_none() {
    let window = open(WindowSettings::default());
    feed(&window, vec![RawEvent::bare(EventKind::MouseEntered)]);

    assert_eq!(window.wait_event().unwrap(), Some(Event::MouseEntered));
    assert_eq!(window.wait_event().unwrap(), None);
}

#[test]
fn window_handles_share_across_threads() {
    let window = Arc::new(open(WindowSettings::default()));
    let producers: Vec<_> = (0..4)
        .map(|id| {
            let window = Arc::clone(&window);
            std::thread::spawn(move || {
                window
                    .with_native(move |native| {
                        native.push_raw((0..25).map(|i| RawEvent::mouse_moved(id, i)))
                    })
                    .expect("push");
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }

    let mut per_producer = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
    for event in window.events() {
        match event.unwrap() {
            Event::MouseMoved(ev) => per_producer[ev.x as usize].push(ev.y),
            other => panic!("unexpected {other:?}"),
        }
    }
    for ys in per_producer {
        assert_eq!(ys, (0..25).collect::<Vec<_>>());
    }
}
