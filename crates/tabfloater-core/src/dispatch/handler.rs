use std::any::Any;
use std::io::{Read, Write};
use std::panic::{self, AssertUnwindSafe};

use tabfloater_protocol::{
    ACTION_MAKE_WINDOW_FLOATING, Incoming, MessageChannel, Request, Response,
};
use tracing::{error, info, warn};

use super::errors::{DispatchError, HostError};
use super::types::{DispatchOptions, SessionStats};
use crate::errors::TabfloaterError;
use crate::window::{WindowBackend, make_window_floating};

/// Handle one decoded request.
///
/// `Ok(None)` means the request gets no response.
pub fn handle_request(
    request: &Request,
    backend: &dyn WindowBackend,
    options: DispatchOptions,
) -> Result<Option<Response>, DispatchError> {
    match request.action() {
        Some(ACTION_MAKE_WINDOW_FLOATING) => {
            // A request without a usable title pins nothing.
            let Some(title) = request.window_title() else {
                warn!(
                    event = "core.dispatch.window_title_missing",
                    request = %request
                );
                return Ok(Some(Response::floating(false)));
            };

            info!(event = "core.dispatch.float_requested", title = title);
            let success = make_window_floating(backend, title);
            Ok(Some(Response::floating(success)))
        }
        other => {
            let action = other.unwrap_or("<missing>");
            warn!(
                event = "core.dispatch.unknown_action",
                action = action,
                respond = options.respond_to_unknown_actions
            );
            if options.respond_to_unknown_actions {
                Err(DispatchError::UnknownAction {
                    action: action.to_string(),
                })
            } else {
                Ok(None)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// [`handle_request`] with panics turned into [`DispatchError::Panicked`].
fn handle_request_guarded(
    request: &Request,
    backend: &dyn WindowBackend,
    options: DispatchOptions,
) -> Result<Option<Response>, DispatchError> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        handle_request(request, backend, options)
    }))
    .unwrap_or_else(|payload| {
        Err(DispatchError::Panicked {
            action: request.action().unwrap_or("<missing>").to_string(),
            message: panic_message(payload.as_ref()),
        })
    })
}

fn log_dispatch_error(e: &DispatchError) {
    if e.is_user_error() {
        warn!(
            event = "core.dispatch.request_failed",
            error = %e,
            error_code = e.error_code()
        );
    } else {
        error!(
            event = "core.dispatch.request_failed",
            error = %e,
            error_code = e.error_code()
        );
    }
}

/// Serve requests until the browser closes the channel.
///
/// Returns the session counters on a clean close. Read and write failures of
/// the channel itself end the loop with [`HostError`].
pub fn run_host<R: Read, W: Write>(
    channel: &mut MessageChannel<R, W>,
    backend: &dyn WindowBackend,
    options: DispatchOptions,
) -> Result<SessionStats, HostError> {
    info!(
        event = "core.dispatch.loop_started",
        backend = backend.name(),
        respond_to_unknown_actions = options.respond_to_unknown_actions
    );

    let mut stats = SessionStats::default();

    loop {
        let outcome = match channel.read_message().map_err(HostError::Read)? {
            Incoming::Closed => {
                info!(
                    event = "core.dispatch.loop_completed",
                    reason = "peer_closed",
                    frames_read = stats.frames_read,
                    responses_written = stats.responses_written
                );
                return Ok(stats);
            }
            Incoming::Malformed(e) => {
                stats.frames_read += 1;
                Err(DispatchError::from(e))
            }
            Incoming::Request(request) => {
                stats.frames_read += 1;
                handle_request_guarded(&request, backend, options)
            }
        };

        let response = match outcome {
            Ok(Some(response)) => response,
            Ok(None) => {
                stats.requests_ignored += 1;
                continue;
            }
            Err(e) => {
                log_dispatch_error(&e);
                stats.errors_reported += 1;
                Response::error(e.to_string())
            }
        };

        channel.write_message(&response).map_err(HostError::Write)?;
        stats.responses_written += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{FakeWindowBackend, WindowHandle, WindowInfo};
    use serde_json::{Value, json};
    use std::io::Cursor;
    use tabfloater_protocol::{FrameRead, read_frame};

    fn framed(payload: &[u8]) -> Vec<u8> {
        let mut data = (payload.len() as u32).to_ne_bytes().to_vec();
        data.extend_from_slice(payload);
        data
    }

    fn frames(messages: &[Value]) -> Vec<u8> {
        messages
            .iter()
            .flat_map(|m| framed(&serde_json::to_vec(m).unwrap()))
            .collect()
    }

    fn responses(out: Vec<u8>) -> Vec<Value> {
        let mut cursor = Cursor::new(out);
        let mut values = Vec::new();
        while let FrameRead::Payload(payload) = read_frame(&mut cursor, usize::MAX).unwrap() {
            values.push(serde_json::from_slice(&payload).unwrap());
        }
        values
    }

    fn run(
        input: Vec<u8>,
        backend: &FakeWindowBackend,
        options: DispatchOptions,
    ) -> (Result<SessionStats, HostError>, Vec<Value>) {
        let mut channel = MessageChannel::new(Cursor::new(input), Vec::new());
        let result = run_host(&mut channel, backend, options);
        let (_, out) = channel.into_inner();
        (result, responses(out))
    }

    fn notepad_desktop() -> FakeWindowBackend {
        FakeWindowBackend::with_windows(vec![
            WindowInfo::new(WindowHandle(10), "Downloads"),
            WindowInfo::new(WindowHandle(11), "Untitled - Notepad"),
        ])
    }

    #[test]
    fn test_handle_request_floating_success() {
        let backend = notepad_desktop();
        let request = Request::make_window_floating("notepad");
        let response = handle_request(&request, &backend, DispatchOptions::default()).unwrap();
        assert_eq!(response, Some(Response::floating(true)));
        assert!(backend.is_topmost(WindowHandle(11)));
    }

    #[test]
    fn test_handle_request_missing_title_reports_failure() {
        let backend = notepad_desktop();
        let request = Request::from_value(json!({"action": "makeWindowFloating"})).unwrap();
        let response = handle_request(&request, &backend, DispatchOptions::default()).unwrap();
        assert_eq!(response, Some(Response::floating(false)));
        assert!(backend.topmost_calls().is_empty());
    }

    #[test]
    fn test_handle_request_non_string_title_reports_failure() {
        let backend = notepad_desktop();
        let request = Request::from_value(json!({
            "action": "makeWindowFloating",
            "windowTitle": 42
        }))
        .unwrap();
        let response = handle_request(&request, &backend, DispatchOptions::default()).unwrap();
        assert_eq!(response, Some(Response::floating(false)));
        assert!(backend.topmost_calls().is_empty());
    }

    #[test]
    fn test_handle_request_unknown_action_is_silent_by_default() {
        let backend = notepad_desktop();
        let request = Request::from_value(json!({"action": "doNothing"})).unwrap();
        let response = handle_request(&request, &backend, DispatchOptions::default()).unwrap();
        assert!(response.is_none());
    }

    #[test]
    fn test_handle_request_unknown_action_reported_when_enabled() {
        let backend = notepad_desktop();
        let options = DispatchOptions {
            respond_to_unknown_actions: true,
        };
        let request = Request::from_value(json!({})).unwrap();
        let err = handle_request(&request, &backend, options).unwrap_err();
        assert_eq!(err.to_string(), "unknown action: <missing>");
    }

    #[test]
    fn test_run_host_empty_input_closes_cleanly() {
        let backend = notepad_desktop();
        let (result, out) = run(Vec::new(), &backend, DispatchOptions::default());
        assert_eq!(result.unwrap(), SessionStats::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_host_not_found_then_next_request_served() {
        let backend = notepad_desktop();
        let input = frames(&[
            json!({"action": "makeWindowFloating", "windowTitle": "ZZZ"}),
            json!({"action": "makeWindowFloating", "windowTitle": "Notepad"}),
        ]);
        let (result, out) = run(input, &backend, DispatchOptions::default());

        assert_eq!(
            out,
            vec![
                json!({"success": false, "message": "设置浮动窗口失败"}),
                json!({"success": true, "message": "窗口已设置为浮动"}),
            ]
        );
        let stats = result.unwrap();
        assert_eq!(stats.frames_read, 2);
        assert_eq!(stats.responses_written, 2);
    }

    #[test]
    fn test_run_host_unknown_action_writes_nothing_and_continues() {
        let backend = notepad_desktop();
        let input = frames(&[
            json!({"action": "doNothing"}),
            json!({"action": "makeWindowFloating", "windowTitle": "Downloads"}),
        ]);
        let (result, out) = run(input, &backend, DispatchOptions::default());

        assert_eq!(out, vec![json!({"success": true, "message": "窗口已设置为浮动"})]);
        assert_eq!(result.unwrap().requests_ignored, 1);
    }

    #[test]
    fn test_run_host_malformed_frame_answers_error_and_continues() {
        let backend = notepad_desktop();
        let mut input = framed(b"{not json");
        input.extend(frames(&[json!({"action": "makeWindowFloating", "windowTitle": "Notepad"})]));
        let (result, out) = run(input, &backend, DispatchOptions::default());

        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["success"], false);
        assert!(
            out[0]["error"].as_str().unwrap().starts_with("malformed message:"),
            "got: {}",
            out[0]
        );
        assert!(out[0].get("message").is_none());
        assert_eq!(out[1]["success"], true);
        assert_eq!(result.unwrap().errors_reported, 1);
    }

    #[test]
    fn test_run_host_panic_in_backend_answers_error_and_continues() {
        let backend = notepad_desktop();
        backend.panic_on_enumerate();
        let input = frames(&[
            json!({"action": "makeWindowFloating", "windowTitle": "Notepad"}),
            json!({"action": "makeWindowFloating", "windowTitle": "Notepad"}),
        ]);
        let (result, out) = run(input, &backend, DispatchOptions::default());

        assert_eq!(out.len(), 2);
        for response in &out {
            assert_eq!(response["success"], false);
            let error = response["error"].as_str().unwrap();
            assert!(error.contains("fake window enumeration panicked"), "got: {}", error);
        }
        assert_eq!(result.unwrap().errors_reported, 2);
    }

    #[test]
    fn test_run_host_truncated_frame_is_clean_close() {
        let backend = notepad_desktop();
        let mut input = frames(&[json!({"action": "makeWindowFloating", "windowTitle": "Notepad"})]);
        input.extend(100u32.to_ne_bytes());
        input.extend(br#"{"action":"#);
        let (result, out) = run(input, &backend, DispatchOptions::default());

        assert_eq!(out.len(), 1);
        assert_eq!(result.unwrap().frames_read, 1);
    }

    #[test]
    fn test_run_host_oversized_frame_ends_session_cleanly() {
        let backend = notepad_desktop();
        let input = frames(&[json!({"action": "makeWindowFloating", "windowTitle": "Notepad"})]);
        let mut channel =
            MessageChannel::new(Cursor::new(input), Vec::new()).with_max_incoming_bytes(4);
        let stats = run_host(&mut channel, &backend, DispatchOptions::default()).unwrap();
        assert_eq!(stats, SessionStats::default());
        assert!(backend.topmost_calls().is_empty());
        let (_, out) = channel.into_inner();
        assert!(out.is_empty());
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_run_host_write_failure_is_fatal() {
        let backend = notepad_desktop();
        let input = frames(&[json!({"action": "makeWindowFloating", "windowTitle": "Notepad"})]);
        let mut channel = MessageChannel::new(Cursor::new(input), BrokenWriter);
        let err = run_host(&mut channel, &backend, DispatchOptions::default()).unwrap_err();
        assert!(matches!(err, HostError::Write(_)));
    }

    #[test]
    fn test_panic_message_variants() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");
        let borrowed: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(borrowed.as_ref()), "static");
        let other: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}
