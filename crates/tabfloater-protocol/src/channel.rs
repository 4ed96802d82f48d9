//! The single reader/writer pair connected to the browser.

use std::io::{Read, Write};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::ProtocolError;
use crate::frame::{DEFAULT_MAX_INCOMING_BYTES, FrameRead, read_frame, write_frame};
use crate::messages::Request;

/// Outcome of [`MessageChannel::read_message`].
#[derive(Debug)]
pub enum Incoming {
    /// A complete, decodable request.
    Request(Request),
    /// A complete frame whose payload could not be decoded. The stream is
    /// still aligned on a frame boundary.
    Malformed(ProtocolError),
    /// The peer closed the stream.
    Closed,
}

/// Native messaging channel over any reader/writer pair.
///
/// The host binds this to locked stdin/stdout. Tests bind it to in-memory
/// buffers.
pub struct MessageChannel<R, W> {
    reader: R,
    writer: W,
    max_incoming_bytes: usize,
}

impl<R: Read, W: Write> MessageChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            max_incoming_bytes: DEFAULT_MAX_INCOMING_BYTES,
        }
    }

    /// Cap on the declared length of incoming frames.
    pub fn with_max_incoming_bytes(mut self, max_incoming_bytes: usize) -> Self {
        self.max_incoming_bytes = max_incoming_bytes;
        self
    }

    /// Block until one frame arrives or the stream closes.
    ///
    /// A declared length over the cap is a garbled prefix: the stream can no
    /// longer be aligned on a frame boundary, so it reads as closed. Errors
    /// are reserved for I/O failures.
    pub fn read_message(&mut self) -> Result<Incoming, ProtocolError> {
        let payload = match read_frame(&mut self.reader, self.max_incoming_bytes) {
            Ok(FrameRead::Payload(payload)) => payload,
            Ok(FrameRead::Closed) => {
                debug!(event = "protocol.channel.read_closed");
                return Ok(Incoming::Closed);
            }
            Err(e @ ProtocolError::FrameTooLarge { .. }) => {
                warn!(
                    event = "protocol.channel.read_oversized",
                    error = %e,
                    "Treating oversized length prefix as end of stream"
                );
                return Ok(Incoming::Closed);
            }
            Err(e) => return Err(e),
        };

        let length = payload.len();
        match decode(payload) {
            Ok(request) => {
                debug!(
                    event = "protocol.channel.read_completed",
                    length = length,
                    message = %request
                );
                Ok(Incoming::Request(request))
            }
            Err(e) => {
                warn!(
                    event = "protocol.channel.read_malformed",
                    length = length,
                    error = %e
                );
                Ok(Incoming::Malformed(e))
            }
        }
    }

    /// Serialize `message` and send it as one flushed frame.
    pub fn write_message<T: Serialize + ?Sized>(&mut self, message: &T) -> Result<(), ProtocolError> {
        let payload =
            serde_json::to_vec(message).map_err(|e| ProtocolError::SerializationFailed {
                message: e.to_string(),
            })?;

        debug!(
            event = "protocol.channel.write_started",
            length = payload.len(),
            message = %String::from_utf8_lossy(&payload)
        );

        write_frame(&mut self.writer, &payload)?;

        debug!(event = "protocol.channel.write_completed");
        Ok(())
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

fn decode(payload: Vec<u8>) -> Result<Request, ProtocolError> {
    let text = String::from_utf8(payload).map_err(|e| ProtocolError::InvalidUtf8 {
        message: e.to_string(),
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|e| ProtocolError::InvalidJson {
        message: e.to_string(),
    })?;
    Request::from_value(value)
}
