//! Post-processing argument logic
//!
//! Turns parsed [`Args`] into open endpoints and a converter chain. All
//! checks that can fail without touching data happen here, in this order:
//! conversions, input, offset against a known input size, output. The output
//! file is only created once everything before it passed.

use std::fmt;

use crate::cli::args::Args;
use crate::context::Environment;
use crate::convert::ConverterChain;
use crate::errors::{Result, StreamconvError};
use crate::streams::{known_size, ForwardOnly, SeekableFile, Sink, Source};

/// Everything a run needs, ready to stream
pub struct Options {
    pub source: Box<dyn Source>,
    pub sink: Box<dyn Sink>,
    pub chain: ConverterChain,
    pub offset: u64,
    pub limit: u64,
    pub block_size: usize,
}

impl Options {
    /// Close both endpoints, sink first so buffered output is flushed even
    /// when the source fails to close. Safe to call more than once.
    pub fn close(&mut self) -> Result<()> {
        let sink = self
            .sink
            .close()
            .map_err(|e| e.context(format!("unable to close output {}", self.sink.id())));
        let source = self
            .source
            .close()
            .map_err(|e| e.context(format!("unable to close input {}", self.source.id())));
        sink.and(source)
    }
}

impl Drop for Options {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::debug!(error = %e, "close on drop failed");
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("source", &self.source.id())
            .field("sink", &self.sink.id())
            .field("chain", &self.chain.names())
            .field("offset", &self.offset)
            .field("limit", &self.limit)
            .field("block_size", &self.block_size)
            .finish()
    }
}

/// Validate the arguments and open the endpoints
pub fn process_args(args: &Args, env: &Environment) -> Result<Options> {
    let chain = ConverterChain::from_kinds(&args.conv)?;

    let source: Box<dyn Source> = match &args.from {
        Some(path) => Box::new(SeekableFile::open(path)?),
        None => {
            if env.stdin_isatty {
                tracing::info!("reading from a terminal, end input with Ctrl+D");
            }
            Box::new(ForwardOnly::stdin())
        }
    };

    validate_offset(source.as_ref(), args.offset)?;

    let sink: Box<dyn Sink> = match &args.to {
        Some(path) => Box::new(SeekableFile::create_new(path)?),
        None => Box::new(ForwardOnly::stdout()),
    };

    Ok(Options {
        source,
        sink,
        chain,
        offset: args.offset,
        limit: args.limit,
        block_size: args.block_size,
    })
}

/// An offset at or past the end of a file with known size is rejected.
/// Streams of unknown size accept any offset.
pub fn validate_offset<S: Source + ?Sized>(source: &S, offset: u64) -> Result<()> {
    match known_size(source)? {
        Some(size) if offset >= size => Err(StreamconvError::Validation { offset, size }),
        Some(_) => Ok(()),
        None => {
            tracing::debug!(source = source.id(), "input size unknown, offset not checked");
            Ok(())
        }
    }
}
