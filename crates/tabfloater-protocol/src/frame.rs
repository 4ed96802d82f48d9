//! Length-prefixed framing.
//!
//! A frame is a `u32` length in host byte order followed by exactly that many
//! payload bytes. A stream that ends before a frame is complete is treated as
//! closed, never as a shorter frame.

use std::io::{ErrorKind, Read, Write};

use crate::errors::ProtocolError;

/// Largest message the browser accepts from a native host (1 MiB).
pub const MAX_OUTGOING_BYTES: usize = 1024 * 1024;

/// Largest message the browser sends to a native host (64 MiB).
pub const DEFAULT_MAX_INCOMING_BYTES: usize = 64 * 1024 * 1024;

const LENGTH_PREFIX_BYTES: usize = 4;

/// Result of reading one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameRead {
    /// A complete payload of exactly the advertised length.
    Payload(Vec<u8>),
    /// The peer closed the stream before a complete frame arrived.
    Closed,
}

/// Fill `buf` from `reader`, returning how many bytes were read before EOF.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, ProtocolError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            // A vanished peer looks like EOF to the caller.
            Err(e) if matches!(e.kind(), ErrorKind::BrokenPipe | ErrorKind::ConnectionReset) => {
                break;
            }
            Err(e) => return Err(ProtocolError::Io(e)),
        }
    }
    Ok(filled)
}

/// Read one frame, blocking until it is complete or the stream closes.
///
/// Declared lengths above `max_len` fail with [`ProtocolError::FrameTooLarge`]
/// without reading the payload.
pub fn read_frame<R: Read>(reader: &mut R, max_len: usize) -> Result<FrameRead, ProtocolError> {
    let mut prefix = [0u8; LENGTH_PREFIX_BYTES];
    if read_full(reader, &mut prefix)? < LENGTH_PREFIX_BYTES {
        return Ok(FrameRead::Closed);
    }

    let length = u32::from_ne_bytes(prefix) as usize;
    if length > max_len {
        return Err(ProtocolError::FrameTooLarge {
            length,
            max: max_len,
        });
    }

    let mut payload = vec![0u8; length];
    if read_full(reader, &mut payload)? < length {
        return Ok(FrameRead::Closed);
    }

    Ok(FrameRead::Payload(payload))
}

/// Write one frame and flush it.
///
/// Prefix and payload go out in a single `write_all` so a frame is never
/// split by another write on the same stream.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<(), ProtocolError> {
    if payload.len() > MAX_OUTGOING_BYTES {
        return Err(ProtocolError::ResponseTooLarge {
            length: payload.len(),
            max: MAX_OUTGOING_BYTES,
        });
    }

    // Bounded by MAX_OUTGOING_BYTES above, so this cannot truncate.
    let length = payload.len() as u32;
    let mut frame = Vec::with_capacity(LENGTH_PREFIX_BYTES + payload.len());
    frame.extend_from_slice(&length.to_ne_bytes());
    frame.extend_from_slice(payload);

    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn framed(payload: &[u8]) -> Vec<u8> {
        let mut data = (payload.len() as u32).to_ne_bytes().to_vec();
        data.extend_from_slice(payload);
        data
    }

    /// Reader that hands out one byte per call, like a slow pipe.
    struct Trickle(Cursor<Vec<u8>>);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let end = buf.len().min(1);
            self.0.read(&mut buf[..end])
        }
    }

    #[test]
    fn test_read_frame_complete() {
        let mut cursor = Cursor::new(framed(br#"{"action":"x"}"#));
        let frame = read_frame(&mut cursor, 1024).unwrap();
        assert_eq!(frame, FrameRead::Payload(br#"{"action":"x"}"#.to_vec()));
    }

    #[test]
    fn test_read_frame_empty_stream_is_closed() {
        let mut cursor = Cursor::new(Vec::new());
        assert_eq!(read_frame(&mut cursor, 1024).unwrap(), FrameRead::Closed);
    }

    #[test]
    fn test_read_frame_short_prefix_is_closed() {
        let mut cursor = Cursor::new(vec![7u8, 0]);
        assert_eq!(read_frame(&mut cursor, 1024).unwrap(), FrameRead::Closed);
    }

    #[test]
    fn test_read_frame_short_payload_is_closed_not_truncated() {
        let mut data = 50u32.to_ne_bytes().to_vec();
        data.extend_from_slice(br#"{"action":"#);
        let mut cursor = Cursor::new(data);
        assert_eq!(read_frame(&mut cursor, 1024).unwrap(), FrameRead::Closed);
    }

    #[test]
    fn test_read_frame_zero_length_payload() {
        let mut cursor = Cursor::new(0u32.to_ne_bytes().to_vec());
        assert_eq!(
            read_frame(&mut cursor, 1024).unwrap(),
            FrameRead::Payload(Vec::new())
        );
    }

    #[test]
    fn test_read_frame_rejects_oversized_length() {
        let mut cursor = Cursor::new(framed(&[b' '; 32]));
        let err = read_frame(&mut cursor, 16).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::FrameTooLarge { length: 32, max: 16 }
        ));
    }

    #[test]
    fn test_read_frame_assembles_partial_reads() {
        let mut reader = Trickle(Cursor::new(framed(b"{}")));
        assert_eq!(
            read_frame(&mut reader, 1024).unwrap(),
            FrameRead::Payload(b"{}".to_vec())
        );
        assert_eq!(read_frame(&mut reader, 1024).unwrap(), FrameRead::Closed);
    }

    #[test]
    fn test_read_frame_consecutive_frames_keep_boundaries() {
        let mut data = framed(b"[1]");
        data.extend(framed(b"[2,3]"));
        let mut cursor = Cursor::new(data);
        assert_eq!(
            read_frame(&mut cursor, 1024).unwrap(),
            FrameRead::Payload(b"[1]".to_vec())
        );
        assert_eq!(
            read_frame(&mut cursor, 1024).unwrap(),
            FrameRead::Payload(b"[2,3]".to_vec())
        );
    }

    #[test]
    fn test_write_frame_prefixes_length() {
        let mut out = Vec::new();
        write_frame(&mut out, b"{\"success\":true}").unwrap();
        assert_eq!(&out[..4], &16u32.to_ne_bytes());
        assert_eq!(&out[4..], b"{\"success\":true}");
    }

    #[test]
    fn test_write_frame_rejects_oversized_payload() {
        let payload = vec![b'a'; MAX_OUTGOING_BYTES + 1];
        let mut out = Vec::new();
        let err = write_frame(&mut out, &payload).unwrap_err();
        assert!(matches!(err, ProtocolError::ResponseTooLarge { .. }));
        assert!(out.is_empty());
    }
}
