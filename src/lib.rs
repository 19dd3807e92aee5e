//! streamconv library interface
//!
//! Copies a byte stream from a file or stdin to a file or stdout, honoring a
//! byte offset and limit, and optionally converting the UTF-8 text on the way.
//!
//! # Module Organization
//!
//! - [`streams`] - Source/sink endpoints (seekable file, forward-only stream)
//! - [`convert`] - Stateful text converters and the converter chain
//! - [`transfer`] - Block-read loop, boundary-safe decoding, output queue
//! - [`cli`] - Argument definitions and processing into ready-to-run options
//! - [`core`] - Main execution logic
//! - [`signals`] - Interrupt handling (install_handler, was_interrupted)
//! - [`errors`] - Error types (StreamconvError, Result)
//! - [`status`] - Exit status codes (ExitStatus)

pub mod cli;
pub mod config;
pub mod context;
pub mod convert;
pub mod core;
pub mod errors;
pub mod logging;
pub mod signals;
pub mod status;
pub mod streams;
pub mod transfer;

pub use errors::{Result, StreamconvError};
pub use status::ExitStatus;
