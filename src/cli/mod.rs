//! CLI argument parsing and processing

pub mod args;
pub mod process;

// Re-exports
pub use args::{Args, LogFormat};
pub use process::{process_args, Options};
