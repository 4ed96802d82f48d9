#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("IO error on native messaging stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("Declared frame length {length} exceeds maximum of {max} bytes")]
    FrameTooLarge { length: usize, max: usize },

    #[error("Outgoing message of {length} bytes exceeds maximum of {max} bytes")]
    ResponseTooLarge { length: usize, max: usize },

    #[error("Message is not valid UTF-8: {message}")]
    InvalidUtf8 { message: String },

    #[error("Message is not valid JSON: {message}")]
    InvalidJson { message: String },

    #[error("Message must be a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },

    #[error("Failed to serialize message: {message}")]
    SerializationFailed { message: String },
}

impl ProtocolError {
    /// True when the frame boundary survived and only its payload was bad.
    ///
    /// The channel can keep reading after a malformed frame. Every other
    /// variant means the stream itself is no longer usable.
    pub fn is_malformed_frame(&self) -> bool {
        matches!(
            self,
            ProtocolError::InvalidUtf8 { .. }
                | ProtocolError::InvalidJson { .. }
                | ProtocolError::NotAnObject { .. }
        )
    }
}
