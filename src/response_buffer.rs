//! Response buffer (C3): a single-slot pending-response store with a size
//! cap, kept separate from the transport's own send buffer (§9 "Buffer
//! sharing") so the response can be finalized well before P2 elapses and so
//! a transport-level send failure can't silently lose it.

use static_assertions::const_assert;

/// Matches `ISO14229_TPORT_SEND_BUFSIZE` in the original source's
/// `iso14229_config.h`.
pub const DEFAULT_CAPACITY: usize = 255;

const_assert!(DEFAULT_CAPACITY >= 3);

#[derive(Debug)]
pub struct ResponseBuffer {
    capacity: usize,
    bytes: Vec<u8>,
    pending: bool,
}

impl ResponseBuffer {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            bytes: Vec::with_capacity(capacity),
            pending: false,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub fn length_used(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Stage `bytes` as the pending response. Returns `false` (and leaves
    /// the buffer untouched) if a response is already pending or `bytes`
    /// would exceed capacity — callers are expected to have logged a
    /// diagnostic before discovering this, per §3's buffer invariant.
    #[must_use]
    pub fn try_set(&mut self, bytes: &[u8]) -> bool {
        if self.pending || bytes.len() > self.capacity {
            return false;
        }
        self.bytes.clear();
        self.bytes.extend_from_slice(bytes);
        self.pending = true;
        true
    }

    /// Clear the pending response after the transport has taken it (poll
    /// step 4).
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.pending = false;
    }
}

impl Default for ResponseBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
