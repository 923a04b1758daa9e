//! Shared accumulator for bytes received from the transport

use bytes::BytesMut;

/// Accumulates everything read from the transport that has not yet been
/// consumed by a completed match.
///
/// The session wraps this in its lock; the background reader appends while
/// expect calls snapshot, reset, and reseed. Storage stays raw bytes so a
/// chunk boundary falling inside a multi-byte character does not corrupt
/// data; decoding happens per snapshot.
pub struct OutputBuffer {
    data: BytesMut,
    min_capacity: usize,
}

impl OutputBuffer {
    /// Create a buffer that never shrinks below `min_capacity`.
    pub fn new(min_capacity: usize) -> Self {
        Self {
            data: BytesMut::with_capacity(min_capacity),
            min_capacity,
        }
    }

    /// Append a chunk of received bytes.
    pub fn append(&mut self, chunk: &[u8]) {
        self.data.extend_from_slice(chunk);
    }

    /// Copy the current contents out as text.
    ///
    /// Invalid UTF-8 decodes lossily in the snapshot only; the buffer keeps
    /// the raw bytes.
    pub fn snapshot(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Clear the buffer after a successful match, keeping at least the
    /// configured minimum capacity allocated.
    pub fn reset(&mut self) {
        self.data.clear();
        if self.data.capacity() < self.min_capacity {
            let additional = self.min_capacity - self.data.capacity();
            self.data.reserve(additional);
        }
    }

    /// Seed a freshly reset buffer with text left over past a match end, so
    /// the next call starts from exactly that suffix.
    pub fn reseed(&mut self, leftover: &str) {
        self.data.extend_from_slice(leftover.as_bytes());
    }

    /// Number of buffered bytes.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer = OutputBuffer::new(1024);
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.snapshot(), "");
    }

    #[test]
    fn test_append_and_snapshot() {
        let mut buffer = OutputBuffer::new(1024);
        buffer.append(b"Hello ");
        buffer.append(b"World");
        assert_eq!(buffer.len(), 11);
        assert_eq!(buffer.snapshot(), "Hello World");
    }

    #[test]
    fn test_snapshot_does_not_consume() {
        let mut buffer = OutputBuffer::new(1024);
        buffer.append(b"data");
        assert_eq!(buffer.snapshot(), "data");
        assert_eq!(buffer.snapshot(), "data");
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_reset_retains_capacity_floor() {
        let mut buffer = OutputBuffer::new(256);
        buffer.append(&[b'x'; 512]);
        buffer.reset();
        assert_eq!(buffer.len(), 0);
        assert!(buffer.data.capacity() >= 256);
    }

    #[test]
    fn test_reseed_after_reset() {
        let mut buffer = OutputBuffer::new(64);
        buffer.append(b"consumed|leftover");
        buffer.reset();
        buffer.reseed("leftover");
        assert_eq!(buffer.snapshot(), "leftover");
    }

    #[test]
    fn test_utf8_split_across_appends() {
        let mut buffer = OutputBuffer::new(64);
        let bytes = "prompt 世界".as_bytes();
        // Split inside the first multi-byte character
        buffer.append(&bytes[..8]);
        buffer.append(&bytes[8..]);
        assert_eq!(buffer.snapshot(), "prompt 世界");
    }

    #[test]
    fn test_invalid_utf8_lossy_snapshot() {
        let mut buffer = OutputBuffer::new(64);
        buffer.append(&[0xFF, 0xFE]);
        assert_eq!(buffer.snapshot(), "\u{FFFD}\u{FFFD}");
        assert_eq!(buffer.len(), 2);
    }
}
