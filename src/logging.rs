//! Diagnostic logging setup
//!
//! Everything goes to stderr; stdout may be the output stream.

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, LogFormat};
use crate::context::Environment;

/// Level selected by the command line, before any `RUST_LOG` override
pub fn level_for(args: &Args) -> Level {
    match (args.verbose, args.debug) {
        (v, _) if v >= 3 => Level::TRACE,
        (2, _) | (_, true) => Level::DEBUG,
        (1, _) => Level::INFO,
        _ => Level::WARN,
    }
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init(args: &Args, env: &Environment) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level_for(args)).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match args.log_format.unwrap_or_default() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.with_ansi(env.log_colors()).try_init(),
    };

    if installed.is_err() {
        tracing::debug!("logging already initialized");
    }
}
