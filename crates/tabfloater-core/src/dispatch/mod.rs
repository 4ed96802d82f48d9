//! The request/response loop.
//!
//! One state, "awaiting request". Each iteration reads a frame, handles it
//! and writes at most one response. Failures inside one request become error
//! responses; failures of the channel itself end the loop with [`HostError`].

mod errors;
pub mod handler;
mod types;

pub use errors::{DispatchError, HostError};
pub use handler::{handle_request, run_host};
pub use types::{DispatchOptions, SessionStats};
