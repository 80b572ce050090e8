//! Cross-crate tests for the command stream, event decoder and window handle.

#[cfg(all(test, not(target_arch = "wasm32")))]
mod native_e2e;

#[cfg(test)]
mod tests {
    use command_stream::{Command, CompletionToken, StreamConfig};
    use window_events::{decode, Event, EventKind, RawEvent, EVENT_KIND_COUNT, EVENT_NONE_TAG};

    #[test]
    fn every_defined_tag_decodes_to_its_kind() {
        for kind in EventKind::ALL {
            let event = decode(&RawEvent::bare(kind)).expect("defined tag decodes");
            assert_eq!(event.kind(), kind);
        }
        assert_eq!(EventKind::ALL.len(), EVENT_KIND_COUNT);
        assert_eq!(decode(&RawEvent::new(EVENT_NONE_TAG, [0xFF; 20])), None);
    }

    #[test]
    fn completion_token_resolves_after_command_runs() {
        let (token, completion) = CompletionToken::new();
        let cmd = Command::with_token(|| {}, token);
        assert!(cmd.is_blocking());

        let stream = command_stream::CommandStream::with_config(
            StreamConfig::default().thread_name("token-smoke"),
        )
        .expect("spawn stream");
        stream.submit(cmd).expect("submit");
        completion.wait().expect("command completed");
    }

    #[test]
    fn closed_record_displays_by_name() {
        let event = decode(&RawEvent::bare(EventKind::Closed)).unwrap();
        assert_eq!(event, Event::Closed);
        assert_eq!(event.to_string(), "Closed");
    }
}
