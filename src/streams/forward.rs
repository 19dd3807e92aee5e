//! Forward-only stream endpoint (stdin, stdout, pipes)

use std::io::{self, Read, SeekFrom, Write};

use crate::errors::{Operation, Result, StreamconvError, Variant};
use crate::streams::{Sink, Source};

/// A stream with unknown size that can only move forward.
///
/// Seeking is limited to `SeekFrom::Current(n)` with `n >= 0`, done by reading
/// and discarding `n` bytes. The position reported by [`seek`](Source::seek)
/// counts every byte consumed from the stream so far.
#[derive(Debug)]
pub struct ForwardOnly<T> {
    id: String,
    inner: Option<T>,
    position: u64,
}

impl<T> ForwardOnly<T> {
    pub fn new(id: impl Into<String>, inner: T) -> Self {
        Self {
            id: id.into(),
            inner: Some(inner),
            position: 0,
        }
    }

    fn inner_mut(&mut self) -> io::Result<&mut T> {
        self.inner
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "stream already closed"))
    }
}

impl ForwardOnly<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new("-", io::stdin().lock())
    }
}

impl ForwardOnly<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new("-", io::stdout())
    }
}

impl<R: Read> Source for ForwardOnly<R> {
    fn id(&self) -> &str {
        &self.id
    }

    fn variant(&self) -> Variant {
        Variant::ForwardOnly
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let inner = self.inner_mut()?;
        let n = loop {
            match inner.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => break other?,
            }
        };
        self.position += n as u64;
        Ok(n)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let skip = match pos {
            SeekFrom::Current(n) if n >= 0 => n as u64,
            _ => return Err(StreamconvError::unsupported(Operation::Seek, Variant::ForwardOnly)),
        };
        let inner = self.inner_mut()?;
        let skipped = io::copy(&mut inner.by_ref().take(skip), &mut io::sink())?;
        if skipped < skip {
            tracing::debug!(requested = skip, skipped, "stream ended while skipping");
        }
        self.position += skipped;
        Ok(self.position)
    }

    fn size(&self) -> Result<u64> {
        Err(StreamconvError::unsupported(Operation::Size, Variant::ForwardOnly))
    }

    fn close(&mut self) -> Result<()> {
        self.inner.take();
        Ok(())
    }
}

impl<W: Write> Sink for ForwardOnly<W> {
    fn id(&self) -> &str {
        &self.id
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let inner = self.inner_mut()?;
        let n = loop {
            match inner.write(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => break other?,
            }
        };
        self.position += n as u64;
        Ok(n)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut inner) = self.inner.take() {
            inner.flush()?;
        }
        Ok(())
    }
}
