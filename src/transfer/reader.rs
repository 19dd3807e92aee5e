//! Bounded block-read loop

use crate::errors::{Result, StreamconvError};
use crate::streams::{Sink, Source};
use crate::transfer::{CarryOver, Engine, TransferStats};

/// Default size of one read (1KiB)
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Drives the [`Engine`] with fixed-size reads until the byte limit is hit
/// or the source runs dry, then until the carry-over drains.
///
/// While a block or more of output is still waiting for the sink, iterations
/// only flush, so memory stays bounded by a few blocks.
#[derive(Debug, Clone)]
pub struct BlockReader {
    block_size: usize,
    limit: u64,
    interrupted: fn() -> bool,
}

impl BlockReader {
    /// `block_size` below 1 is raised to 1
    pub fn new(block_size: usize, limit: u64) -> Self {
        Self {
            block_size: block_size.max(1),
            limit,
            interrupted: || false,
        }
    }

    /// Check polled once per iteration; returning true stops the loop with
    /// [`StreamconvError::Interrupted`]
    pub fn with_interrupt(mut self, interrupted: fn() -> bool) -> Self {
        self.interrupted = interrupted;
        self
    }

    /// Copy from `source` to `sink` through `engine`
    pub fn run<R, W>(&self, source: &mut R, engine: &mut Engine, sink: &mut W) -> Result<TransferStats>
    where
        R: Source + ?Sized,
        W: Sink + ?Sized,
    {
        let mut buffer = vec![0u8; self.block_size];
        let mut remaining = self.limit;
        let mut carry = CarryOver::new();

        while remaining > 0 || !carry.is_empty() {
            if (self.interrupted)() {
                return Err(StreamconvError::Interrupted);
            }

            if remaining > 0 && carry.pending.len() < self.block_size {
                let want = remaining.min(buffer.len() as u64) as usize;
                let n = source
                    .read(&mut buffer[..want])
                    .map_err(|e| e.context("unable to read from input"))?;
                if n == 0 {
                    tracing::debug!(source = source.id(), "end of input");
                    remaining = 0;
                } else {
                    carry.extend_input(&buffer[..n]);
                    remaining -= n as u64;
                    engine.record_read(n);
                }
                tracing::trace!(read = n, remaining, carried = carry.len(), "block");
            }

            engine.process(&mut carry, remaining == 0, sink)?;
        }

        Ok(engine.stats().clone())
    }
}
