//! Boundary-safe decode-and-convert step
//!
//! Each call decodes whatever input the carry-over holds, sends valid text
//! through the converter chain, and queues undecodable bytes unchanged in
//! their original position. A UTF-8 sequence cut off by the end of a chunk is
//! kept back until more input arrives, or passed through raw if none will.

use bytes::Bytes;

use crate::convert::ConverterChain;
use crate::errors::Result;
use crate::streams::Sink;
use crate::transfer::{CarryOver, SegmentKind, TransferStats};

/// Decodes, converts and writes one carry-over at a time
#[derive(Debug)]
pub struct Engine {
    chain: ConverterChain,
    finished: bool,
    stats: TransferStats,
}

impl Engine {
    pub fn new(chain: ConverterChain) -> Self {
        Self {
            chain,
            finished: false,
            stats: TransferStats::default(),
        }
    }

    pub fn stats(&self) -> &TransferStats {
        &self.stats
    }

    /// Account for bytes the read loop pulled from the source
    pub fn record_read(&mut self, bytes: usize) {
        self.stats.bytes_read += bytes as u64;
        self.stats.blocks += 1;
    }

    /// Process the carry-over and offer the output to the sink.
    ///
    /// `is_final` means no more input will ever be appended. Bytes the sink
    /// did not take stay in `carry.pending` and go first on the next call.
    pub fn process<S: Sink + ?Sized>(
        &mut self,
        carry: &mut CarryOver,
        is_final: bool,
        sink: &mut S,
    ) -> Result<()> {
        self.decode(carry, is_final);

        if is_final && carry.undecoded.is_empty() && !self.finished {
            let tail = self.chain.finish();
            carry.pending.push(SegmentKind::Converted, tail.into_bytes());
            self.finished = true;
        }

        let outcome = carry.pending.flush(sink)?;
        self.stats.bytes_written += outcome.written;
        if outcome.short_write {
            self.stats.short_writes += 1;
        }
        Ok(())
    }

    fn decode(&mut self, carry: &mut CarryOver, is_final: bool) {
        if carry.undecoded.is_empty() {
            return;
        }

        let input = carry.undecoded.split().freeze();
        let mut text = String::new();
        let mut chunks = input.utf8_chunks().peekable();

        while let Some(chunk) = chunks.next() {
            text.push_str(chunk.valid());

            let invalid = chunk.invalid();
            if invalid.is_empty() {
                continue;
            }

            if chunks.peek().is_none() && !is_final && is_incomplete(invalid) {
                tracing::trace!(bytes = invalid.len(), "deferring split character");
                carry.undecoded.extend_from_slice(invalid);
                break;
            }

            self.emit_text(&mut text, carry);
            let released = self.chain.release();
            carry.pending.push(SegmentKind::Converted, Bytes::from(released));
            self.stats.raw_bytes += invalid.len() as u64;
            carry.pending.push(SegmentKind::Raw, input.slice_ref(invalid));
        }

        self.emit_text(&mut text, carry);
    }

    fn emit_text(&mut self, text: &mut String, carry: &mut CarryOver) {
        if text.is_empty() {
            return;
        }
        let converted = self.chain.convert(text);
        text.clear();
        carry.pending.push(SegmentKind::Converted, Bytes::from(converted));
    }
}

/// A prefix of some valid character that only lacks its remaining bytes
fn is_incomplete(bytes: &[u8]) -> bool {
    matches!(std::str::from_utf8(bytes), Err(e) if e.error_len().is_none())
}
