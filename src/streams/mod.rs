//! Source and sink endpoints
//!
//! Two variants implement the same capability traits:
//! - [`SeekableFile`]: a regular file, random access, known size
//! - [`ForwardOnly`]: a pipe or terminal, unknown size, relative forward skip only
//!
//! The rest of the crate only sees `Box<dyn Source>` / `Box<dyn Sink>` and
//! branches on the [`Variant`] or on [`StreamconvError::Unsupported`].
//!
//! [`StreamconvError::Unsupported`]: crate::errors::StreamconvError::Unsupported

pub mod file;
pub mod forward;

pub use file::SeekableFile;
pub use forward::ForwardOnly;

use std::io::SeekFrom;

use crate::errors::{Result, Variant};

/// Readable endpoint
pub trait Source {
    /// Identifier used in logs and error messages ("-" for stdin, else a path)
    fn id(&self) -> &str;

    /// Which endpoint variant this is
    fn variant(&self) -> Variant;

    /// Read into `buf`, returning the number of bytes placed there.
    /// `Ok(0)` for a non-empty buffer means end of input.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Move the read position, returning the new position
    fn seek(&mut self, pos: SeekFrom) -> Result<u64>;

    /// Total size in bytes
    fn size(&self) -> Result<u64>;

    /// Release the underlying resource. Safe to call more than once.
    fn close(&mut self) -> Result<()>;
}

/// Writable endpoint
pub trait Sink {
    /// Identifier used in logs and error messages ("-" for stdout, else a path)
    fn id(&self) -> &str;

    /// Offer `buf` to the sink, returning how many leading bytes it accepted.
    /// Accepting fewer than `buf.len()` bytes is not an error.
    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    /// Flush and release the underlying resource. Safe to call more than once.
    fn close(&mut self) -> Result<()>;
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn variant(&self) -> Variant {
        (**self).variant()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        (**self).seek(pos)
    }

    fn size(&self) -> Result<u64> {
        (**self).size()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).write(buf)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Size of a source if it can be known, `None` for forward-only streams.
///
/// Any failure other than the expected "unsupported on a stream" is returned.
pub fn known_size<S: Source + ?Sized>(source: &S) -> Result<Option<u64>> {
    match source.size() {
        Ok(size) => Ok(Some(size)),
        Err(e) if e.is_unsupported() => Ok(None),
        Err(e) => Err(e),
    }
}
