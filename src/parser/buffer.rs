//! Scratch buffer for the field currently being assembled
//!
//! The tokenizer appends one byte at a time and occasionally trims from the
//! end when a field boundary is confirmed. The buffer grows in fixed blocks,
//! backing off to smaller increments when an allocation fails, and never
//! shrinks for the life of the parser.

use crate::error::ErrorKind;

/// Growth increment in bytes
pub(crate) const BLOCK_SIZE: usize = 128;

#[derive(Debug)]
pub struct FieldBuffer {
    data: Vec<u8>,
    /// Hard ceiling on buffer capacity
    limit: usize,
}

impl Default for FieldBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldBuffer {
    pub fn new() -> Self {
        Self::with_limit(usize::MAX)
    }

    /// Create a buffer whose capacity may never reach `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            data: Vec::with_capacity(BLOCK_SIZE.min(limit)),
            limit,
        }
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    /// Check whether at least one more byte can be appended without growing.
    pub fn has_room(&self) -> bool {
        self.data.len() < self.data.capacity()
    }

    /// Grow the buffer by one block, halving the increment on failure.
    ///
    /// The increment is first halved until capacity plus increment stays
    /// below the ceiling; reaching zero there is `BufferTooLarge`. A failed
    /// allocation then halves the increment and retries; reaching zero that
    /// way is `OutOfMemory`.
    pub fn grow(&mut self) -> Result<(), ErrorKind> {
        let room = self.limit.saturating_sub(self.data.capacity());
        let mut to_add = BLOCK_SIZE;
        while to_add > 0 && to_add >= room {
            to_add /= 2;
        }
        if to_add == 0 {
            return Err(ErrorKind::BufferTooLarge);
        }
        loop {
            match self.data.try_reserve_exact(to_add) {
                Ok(()) => return Ok(()),
                Err(_) => {
                    to_add /= 2;
                    if to_add == 0 {
                        return Err(ErrorKind::OutOfMemory);
                    }
                }
            }
        }
    }

    /// Append a byte. The caller must have checked `has_room` first.
    pub fn push(&mut self, byte: u8) {
        debug_assert!(self.has_room());
        self.data.push(byte);
    }

    /// Drop the last `count` bytes.
    pub fn truncate_by(&mut self, count: usize) {
        let len = self.data.len().saturating_sub(count);
        self.data.truncate(len);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Reset length to zero, keeping the allocated capacity for reuse.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
