//! Streaming copy: block reads, UTF-8 decoding, conversion and writing
//!
//! - [`reader`] - bounded block-read loop
//! - [`engine`] - boundary-safe decode-and-convert step
//! - [`queue`] - ordered output queue that survives short writes

pub mod engine;
pub mod queue;
pub mod reader;

pub use engine::Engine;
pub use queue::{OutputQueue, SegmentKind};
pub use reader::{BlockReader, DEFAULT_BLOCK_SIZE};

use std::fmt;

use bytes::BytesMut;
use humansize::{format_size, FormatSizeOptions, BINARY};

/// State threaded from one loop iteration to the next
#[derive(Debug, Default)]
pub struct CarryOver {
    /// Input bytes not decoded yet (an incomplete UTF-8 sequence at a chunk tail)
    pub undecoded: BytesMut,
    /// Output produced but not yet accepted by the sink
    pub pending: OutputQueue,
}

impl CarryOver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append freshly read bytes behind whatever is still undecoded
    pub fn extend_input(&mut self, data: &[u8]) {
        self.undecoded.extend_from_slice(data);
    }

    pub fn is_empty(&self) -> bool {
        self.undecoded.is_empty() && self.pending.is_empty()
    }

    /// Total bytes held
    pub fn len(&self) -> usize {
        self.undecoded.len() + self.pending.len()
    }
}

/// Counters collected over one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferStats {
    /// Bytes read from the source (after the offset)
    pub bytes_read: u64,
    /// Bytes accepted by the sink
    pub bytes_written: u64,
    /// Undecodable bytes passed through without conversion
    pub raw_bytes: u64,
    /// Non-empty reads performed
    pub blocks: u64,
    /// Writes where the sink accepted less than offered
    pub short_writes: u64,
}

/// Format byte count as human-readable size (binary units, KiB, MiB, ...)
pub fn format_bytes(bytes: u64, precision: usize) -> String {
    let options = FormatSizeOptions::from(BINARY)
        .decimal_places(precision)
        .decimal_zeroes(precision);
    format_size(bytes, options)
}

impl fmt::Display for TransferStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} read, {} written",
            format_bytes(self.bytes_read, 2),
            format_bytes(self.bytes_written, 2)
        )?;
        if self.raw_bytes > 0 {
            write!(f, ", {} passed through undecoded", format_bytes(self.raw_bytes, 2))?;
        }
        Ok(())
    }
}
