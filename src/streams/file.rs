//! Random-access file endpoint

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::errors::{Result, StreamconvError, Variant};
use crate::streams::{Sink, Source};

/// A regular file with a known size and arbitrary seeking.
///
/// The handle is dropped on [`close`](Source::close); every later operation
/// fails with a "closed" I/O error.
#[derive(Debug)]
pub struct SeekableFile {
    id: String,
    file: Option<File>,
}

impl SeekableFile {
    /// Open an existing file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            StreamconvError::config(format!(
                "can't access the specified input file ({}): {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::from_file(path.display().to_string(), file))
    }

    /// Create a new file for writing. An existing path is refused.
    pub fn create_new(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => StreamconvError::config(format!(
                    "specified output file {} already exists",
                    path.display()
                )),
                _ => StreamconvError::config(format!(
                    "can't create the specified output file ({}): {}",
                    path.display(),
                    e
                )),
            })?;
        Ok(Self::from_file(path.display().to_string(), file))
    }

    /// Wrap an already open file
    pub fn from_file(id: impl Into<String>, file: File) -> Self {
        Self {
            id: id.into(),
            file: Some(file),
        }
    }

    fn handle(&self) -> io::Result<&File> {
        self.file
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "file already closed"))
    }

    fn handle_mut(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "file already closed"))
    }
}

impl Source for SeekableFile {
    fn id(&self) -> &str {
        &self.id
    }

    fn variant(&self) -> Variant {
        Variant::Seekable
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let file = self.handle_mut()?;
        loop {
            match file.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return Ok(other?),
            }
        }
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        Ok(self.handle_mut()?.seek(pos)?)
    }

    fn size(&self) -> Result<u64> {
        let metadata = self
            .handle()?
            .metadata()
            .map_err(|e| StreamconvError::io("unable to get input file info", e))?;
        Ok(metadata.len())
    }

    fn close(&mut self) -> Result<()> {
        self.file.take();
        Ok(())
    }
}

impl Sink for SeekableFile {
    fn id(&self) -> &str {
        &self.id
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let file = self.handle_mut()?;
        loop {
            match file.write(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return Ok(other?),
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        Ok(())
    }
}
