//! Ordered output queue
//!
//! Everything headed for the sink goes through one FIFO of tagged segments.
//! A short write leaves the unwritten suffix at the front, so the next flush
//! offers it before anything produced later.

use std::collections::VecDeque;
use std::io;

use bytes::{Buf, Bytes};

use crate::errors::{Result, StreamconvError};
use crate::streams::Sink;

/// Where a segment's bytes came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Undecodable input, copied through verbatim
    Raw,
    /// Text produced by the converter chain
    Converted,
}

#[derive(Debug)]
struct Segment {
    kind: SegmentKind,
    data: Bytes,
}

/// Result of one [`OutputQueue::flush`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushOutcome {
    /// Bytes accepted by the sink
    pub written: u64,
    /// Whether the sink stopped short of the offered bytes
    pub short_write: bool,
}

/// FIFO of bytes waiting for the sink
#[derive(Debug, Default)]
pub struct OutputQueue {
    segments: VecDeque<Segment>,
    len: usize,
}

impl OutputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes behind everything already pending. Empty input is ignored.
    pub fn push(&mut self, kind: SegmentKind, data: impl Into<Bytes>) {
        let data = data.into();
        if data.is_empty() {
            return;
        }
        self.len += data.len();
        self.segments.push_back(Segment { kind, data });
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes pending
    pub fn len(&self) -> usize {
        self.len
    }

    /// Offer pending bytes to the sink, oldest first.
    ///
    /// Stops at the first short write and keeps the rest queued. A sink that
    /// accepts nothing at all is an error.
    pub fn flush<S: Sink + ?Sized>(&mut self, sink: &mut S) -> Result<FlushOutcome> {
        let mut outcome = FlushOutcome::default();

        while let Some(front) = self.segments.front_mut() {
            let offered = front.data.len();
            let accepted = sink
                .write(&front.data)
                .map_err(|e| e.context("unable to write to output"))?;

            if accepted == 0 {
                return Err(StreamconvError::io(
                    "unable to write to output",
                    io::Error::new(io::ErrorKind::WriteZero, "sink accepted no bytes"),
                ));
            }

            let accepted = accepted.min(offered);
            outcome.written += accepted as u64;
            self.len -= accepted;

            if accepted < offered {
                front.data.advance(accepted);
                outcome.short_write = true;
                tracing::debug!(
                    kind = ?front.kind,
                    accepted,
                    remaining = offered - accepted,
                    "short write"
                );
                break;
            }
            self.segments.pop_front();
        }

        Ok(outcome)
    }
}
