//! Staging buffer for bytes submitted to the engine but not yet compressed.

use bytes::{Buf, BytesMut};

/// Append-only byte container with a read cursor.
///
/// The digest engine pushes caller bytes in with [`append`](Self::append),
/// pulls whole blocks out as big-endian words with
/// [`read_u32_be`](Self::read_u32_be), and periodically calls
/// [`compact`](Self::compact) to release what it has already read. Bytes
/// come out in exactly the order they went in.
pub trait ByteBuffer {
    /// Append bytes after everything already buffered.
    fn append(&mut self, data: &[u8]);

    /// Number of bytes appended but not yet read.
    fn remaining(&self) -> usize;

    /// Read the next 4 bytes as a big-endian `u32`, advancing the cursor.
    ///
    /// Returns `None` (and leaves the cursor alone) when fewer than 4
    /// unread bytes remain.
    fn read_u32_be(&mut self) -> Option<u32>;

    /// The unread bytes, in arrival order.
    fn unread(&self) -> &[u8];

    /// Number of bytes read but still held in memory.
    fn consumed(&self) -> usize;

    /// Drop bytes that have already been read.
    fn compact(&mut self);

    /// Drop everything, read or not.
    fn clear(&mut self);
}

/// Default [`ByteBuffer`] backed by [`BytesMut`].
#[derive(Debug, Clone, Default)]
pub struct ByteQueue {
    bytes: BytesMut,
    cursor: usize,
}

impl ByteQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: BytesMut::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Total bytes held, read or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check whether the queue holds no bytes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl ByteBuffer for ByteQueue {
    fn append(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.cursor
    }

    fn read_u32_be(&mut self) -> Option<u32> {
        let mut window = self.bytes.get(self.cursor..self.cursor + 4)?;
        let word = window.get_u32();
        self.cursor += 4;
        Some(word)
    }

    fn unread(&self) -> &[u8] {
        &self.bytes[self.cursor..]
    }

    fn consumed(&self) -> usize {
        self.cursor
    }

    fn compact(&mut self) {
        self.bytes.advance(self.cursor);
        self.cursor = 0;
    }

    fn clear(&mut self) {
        self.bytes.clear();
        self.cursor = 0;
    }
}
