//! CLI argument definitions using clap
//!
//! This module defines all command-line arguments for streamconv.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

use crate::convert::ConversionKind;
use crate::transfer::DEFAULT_BLOCK_SIZE;

/// streamconv - copy a byte stream, optionally converting its UTF-8 text
#[derive(Parser, Debug, Clone)]
#[command(name = "streamconv", version, about, long_about = None)]
#[command(args_override_self = true)] // config defaults come first, the command line wins
pub struct Args {
    // =========================================================================
    // INPUT / OUTPUT
    // =========================================================================

    /// File to read. By default - stdin
    #[arg(long = "from", value_name = "PATH")]
    pub from: Option<PathBuf>,

    /// File to write; must not exist yet. By default - stdout
    #[arg(long = "to", value_name = "PATH")]
    pub to: Option<PathBuf>,

    /// Number of bytes to skip from the beginning of the input
    #[arg(long = "offset", value_name = "BYTES", default_value_t = 0)]
    pub offset: u64,

    /// Number of bytes to read after the offset. By default - the whole input
    #[arg(long = "limit", value_name = "BYTES", default_value_t = u64::MAX, hide_default_value = true)]
    pub limit: u64,

    /// Size of a block read from the input before any conversion or write
    #[arg(
        long = "block-size",
        value_name = "BYTES",
        default_value_t = DEFAULT_BLOCK_SIZE,
        value_parser = parse_block_size
    )]
    pub block_size: usize,

    // =========================================================================
    // CONVERSIONS
    // =========================================================================

    /// One or more text conversions, comma-separated. A later --conv
    /// replaces the earlier list
    #[arg(
        long = "conv",
        value_name = "LIST",
        value_enum,
        value_delimiter = ',',
        action = ArgAction::Set
    )]
    pub conv: Vec<ConversionKind>,

    // =========================================================================
    // TROUBLESHOOTING
    // =========================================================================

    /// Log progress to stderr. Use -vv for debug and -vvv for trace output
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Output format for log messages: text (default) or json (JSON Lines)
    #[arg(long = "log-format", value_name = "FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,

    /// Show error details on failure
    #[arg(long = "traceback", action = ArgAction::SetTrue)]
    pub traceback: bool,

    /// Debug mode (implies --traceback and debug logging)
    #[arg(long = "debug", action = ArgAction::SetTrue)]
    pub debug: bool,
}

impl Args {
    /// Whether error output should include the full error chain
    pub fn traceback(&self) -> bool {
        self.traceback || self.debug
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            offset: 0,
            limit: u64::MAX,
            block_size: DEFAULT_BLOCK_SIZE,
            conv: Vec::new(),
            verbose: 0,
            log_format: None,
            traceback: false,
            debug: false,
        }
    }
}

/// Log format for diagnostic output
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}

fn parse_block_size(s: &str) -> Result<usize, String> {
    let size: usize = s
        .parse()
        .map_err(|e| format!("invalid block size '{}': {}", s, e))?;
    if size == 0 {
        return Err("block size must be at least 1 byte".to_string());
    }
    Ok(size)
}
