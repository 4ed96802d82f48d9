//! Streams several frames through one channel, as a browser session does.

use std::io::Cursor;

use serde_json::{Value, json};
use tabfloater_protocol::{
    FLOATING_FAILED_MESSAGE, FLOATING_SUCCEEDED_MESSAGE, FrameRead, Incoming, MessageChannel,
    ProtocolError, Request, Response, read_frame, write_frame,
};

fn encode_all(messages: &[Value]) -> Vec<u8> {
    let mut out = Vec::new();
    for message in messages {
        write_frame(&mut out, &serde_json::to_vec(message).unwrap()).unwrap();
    }
    out
}

#[test]
fn test_requests_arrive_in_order() {
    let titles = ["Notepad", "Calculator", "", "设置"];
    let messages: Vec<Value> = titles
        .iter()
        .map(|t| Request::make_window_floating(*t).into_value())
        .collect();

    let mut channel = MessageChannel::new(Cursor::new(encode_all(&messages)), Vec::new());

    for title in titles {
        match channel.read_message().unwrap() {
            Incoming::Request(request) => assert_eq!(request.window_title(), Some(title)),
            other => panic!("expected request, got {:?}", other),
        }
    }
    assert!(matches!(channel.read_message().unwrap(), Incoming::Closed));
}

#[test]
fn test_responses_are_individually_framed() {
    let mut channel = MessageChannel::new(Cursor::new(Vec::new()), Vec::new());
    channel.write_message(&Response::floating(true)).unwrap();
    channel.write_message(&Response::floating(false)).unwrap();
    channel.write_message(&Response::error("unknown action: ping")).unwrap();

    let (_, out) = channel.into_inner();
    let mut cursor = Cursor::new(out);
    let mut decoded = Vec::new();
    while let FrameRead::Payload(payload) = read_frame(&mut cursor, usize::MAX).unwrap() {
        decoded.push(serde_json::from_slice::<Value>(&payload).unwrap());
    }

    assert_eq!(
        decoded,
        vec![
            json!({"success": true, "message": FLOATING_SUCCEEDED_MESSAGE}),
            json!({"success": false, "message": FLOATING_FAILED_MESSAGE}),
            json!({"success": false, "error": "unknown action: ping"}),
        ]
    );
}

#[test]
fn test_malformed_frames_do_not_desync_stream() {
    let mut input = Vec::new();
    write_frame(&mut input, b"[1, 2, 3]").unwrap();
    write_frame(&mut input, &[0xff, 0xfe]).unwrap();
    write_frame(&mut input, b"{\"action\": \"makeWindowFloating\", \"windowTitle\": \"Notepad\"}")
        .unwrap();

    let mut channel = MessageChannel::new(Cursor::new(input), Vec::new());

    assert!(matches!(
        channel.read_message().unwrap(),
        Incoming::Malformed(ProtocolError::NotAnObject { kind: "array" })
    ));
    assert!(matches!(
        channel.read_message().unwrap(),
        Incoming::Malformed(ProtocolError::InvalidUtf8 { .. })
    ));
    match channel.read_message().unwrap() {
        Incoming::Request(request) => assert_eq!(request.window_title(), Some("Notepad")),
        other => panic!("expected request, got {:?}", other),
    }
    assert!(matches!(channel.read_message().unwrap(), Incoming::Closed));
}
