//! Accumulation buffer with literal-marker search.
//!
//! Console markers (`Login:`, `Password:`, the prompt) are literal
//! strings, so lookup uses `memchr::memmem` rather than a regex engine.

use bytes::BytesMut;
use memchr::memmem;

/// Buffer accumulating console output until a caller drains it.
#[derive(Debug, Default)]
pub struct CaptureBuffer {
    buffer: BytesMut,
}

impl CaptureBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
        }
    }

    /// Append new data.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Find a literal marker, returning the offset just past its end.
    pub fn find_end(&self, marker: &[u8]) -> Option<usize> {
        memmem::find(&self.buffer, marker).map(|pos| pos + marker.len())
    }

    /// Remove and return everything up to `end`, leaving the rest pending.
    pub fn drain_to(&mut self, end: usize) -> Vec<u8> {
        self.buffer.split_to(end).to_vec()
    }

    /// Take ownership of the entire contents and reset.
    pub fn take(&mut self) -> BytesMut {
        self.buffer.split()
    }

    /// Get a reference to the buffered bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Current buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_end_spans_chunks() {
        let mut buffer = CaptureBuffer::new();
        buffer.extend(b"Log");
        assert_eq!(buffer.find_end(b"Login:"), None);
        buffer.extend(b"in: ");
        assert_eq!(buffer.find_end(b"Login:"), Some(6));
    }

    #[test]
    fn test_drain_to_leaves_remainder() {
        let mut buffer = CaptureBuffer::new();
        buffer.extend(b"banner Login: leftover");
        let end = buffer.find_end(b"Login:").unwrap();
        assert_eq!(buffer.drain_to(end), b"banner Login:");
        assert_eq!(buffer.as_slice(), b" leftover");
    }

    #[test]
    fn test_take_clears_buffer() {
        let mut buffer = CaptureBuffer::new();
        buffer.extend(b"response text");
        assert_eq!(&buffer.take()[..], b"response text");
        assert!(buffer.is_empty());
    }
}
