//! Browser native messaging protocol for the TabFloater companion.
//!
//! Frames are a 4-byte length prefix in host byte order followed by exactly
//! that many bytes of UTF-8 JSON. [`MessageChannel`] owns one reader and one
//! writer and is the only place frames are produced or consumed.

mod channel;
mod errors;
mod frame;
mod messages;

pub use channel::{Incoming, MessageChannel};
pub use errors::ProtocolError;
pub use frame::{
    DEFAULT_MAX_INCOMING_BYTES, FrameRead, MAX_OUTGOING_BYTES, read_frame, write_frame,
};
pub use messages::{
    ACTION_MAKE_WINDOW_FLOATING, FLOATING_FAILED_MESSAGE, FLOATING_SUCCEEDED_MESSAGE, Request,
    Response,
};
