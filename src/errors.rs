//! Error types for streamconv

use std::fmt;

use thiserror::Error;

/// Endpoint operations that a variant may not support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Seeking (absolute, backward or relative)
    Seek,
    /// Querying the total size
    Size,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Seek => write!(f, "seek"),
            Operation::Size => write!(f, "size"),
        }
    }
}

/// The two endpoint variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Random-access file with a known size
    Seekable,
    /// Stream with unknown size, relative forward movement only
    ForwardOnly,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Seekable => write!(f, "seekable file"),
            Variant::ForwardOnly => write!(f, "forward-only stream"),
        }
    }
}

/// Main error type for streamconv
#[derive(Error, Debug)]
pub enum StreamconvError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("invalid offset {offset} >= {size} (input file size)")]
    Validation {
        offset: u64,
        size: u64,
    },

    #[error("unsupported operation: {operation} on a {variant}")]
    Unsupported {
        operation: Operation,
        variant: Variant,
    },

    #[error("{context}: {source}")]
    IoContext {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Interrupted")]
    Interrupted,
}

impl StreamconvError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        StreamconvError::Config(msg.into())
    }

    /// Create an unsupported-operation error
    pub fn unsupported(operation: Operation, variant: Variant) -> Self {
        StreamconvError::Unsupported { operation, variant }
    }

    /// Wrap an I/O error with a short description of what was being done
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        StreamconvError::IoContext {
            context: context.into(),
            source,
        }
    }

    /// Attach a description to a bare I/O error; other kinds pass unchanged
    pub fn context(self, context: impl Into<String>) -> Self {
        match self {
            StreamconvError::Io(source) => StreamconvError::io(context, source),
            other => other,
        }
    }

    /// Whether this is an expected "not supported on this variant" failure
    pub fn is_unsupported(&self) -> bool {
        matches!(self, StreamconvError::Unsupported { .. })
    }

    /// Whether the error was detected before any data was streamed
    pub fn is_usage(&self) -> bool {
        matches!(self, StreamconvError::Config(_) | StreamconvError::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, StreamconvError>;
