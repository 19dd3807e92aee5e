use std::io::SeekFrom;
use std::time::Instant;

use clap::{CommandFactory, Parser};

use crate::cli::{process_args, Args, Options};
use crate::config::Config;
use crate::context::Environment;
use crate::errors::{Result, StreamconvError};
use crate::logging;
use crate::signals;
use crate::status::ExitStatus;
use crate::streams::Source;
use crate::transfer::{BlockReader, Engine, TransferStats};

/// Main entry point for the CLI.
///
/// Loads the config file, parses the merged command line, sets up logging
/// and runs the copy. Every failure is reported here and turned into an
/// exit status.
pub fn run(args: Vec<String>, mut env: Environment) -> ExitStatus {
    if let Some(name) = args.first() {
        if let Some(basename) = std::path::Path::new(name).file_stem() {
            env.program_name = basename.to_string_lossy().to_string();
        }
    }

    let (config, config_warning) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let merged_args = merge_default_options(args, &config);

    let parsed = match Args::try_parse_from(&merged_args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    ExitStatus::Success
                }
                _ => ExitStatus::Usage,
            };
        }
    };

    logging::init(&parsed, &env);
    if let Some(e) = config_warning {
        tracing::warn!(config = %config.config_file().display(), "{}; using defaults", e);
    }
    if parsed.debug {
        tracing::debug!(args = ?parsed, "parsed arguments");
    }

    match program(&parsed, &env) {
        Ok(stats) => {
            tracing::info!(
                blocks = stats.blocks,
                short_writes = stats.short_writes,
                "done: {}",
                stats
            );
            ExitStatus::Success
        }
        Err(e) => handle_error(&env, e, parsed.traceback()),
    }
}

/// Open, validate, copy and close
pub fn program(args: &Args, env: &Environment) -> Result<TransferStats> {
    let options = process_args(args, env)?;
    tracing::debug!(?options, "options");
    execute(options)
}

/// Copy, then close both endpoints whether or not the copy succeeded.
/// A copy error wins over a close error.
fn execute(mut options: Options) -> Result<TransferStats> {
    let result = transfer(&mut options);
    let closed = options.close();

    let stats = result?;
    closed?;
    Ok(stats)
}

fn transfer(options: &mut Options) -> Result<TransferStats> {
    skip_offset(options.source.as_mut(), options.offset)?;
    signals::check_interrupted()?;

    let started = Instant::now();
    let mut engine = Engine::new(std::mem::take(&mut options.chain));
    let reader = BlockReader::new(options.block_size, options.limit)
        .with_interrupt(signals::was_interrupted);

    let stats = reader.run(options.source.as_mut(), &mut engine, options.sink.as_mut())?;
    tracing::debug!(elapsed = ?started.elapsed(), "transfer finished");
    Ok(stats)
}

/// Move past the first `offset` bytes with a relative forward seek
fn skip_offset(source: &mut dyn Source, offset: u64) -> Result<()> {
    if offset == 0 {
        return Ok(());
    }
    let delta = i64::try_from(offset)
        .map_err(|_| StreamconvError::config(format!("offset {} is too large", offset)))?;
    let position = source
        .seek(SeekFrom::Current(delta))
        .map_err(|e| e.context("unable to seek input"))?;
    tracing::debug!(source = source.id(), offset, position, "skipped offset");
    Ok(())
}

/// Put the config file's default flags right after the program name.
///
/// A flag that takes a value may carry it inline (`"--limit=5"`) or as the
/// next entry (`"--limit", "5"`). Entries that are neither are dropped with a
/// warning.
fn merge_default_options(args: Vec<String>, config: &Config) -> Vec<String> {
    if config.default_options.is_empty() {
        return args;
    }

    let command = Args::command();
    let mut defaults = Vec::with_capacity(config.default_options.len());
    let mut ignored = Vec::new();
    let mut expects_value = false;

    for option in &config.default_options {
        if expects_value {
            defaults.push(option.clone());
            expects_value = false;
        } else if option.starts_with('-') {
            expects_value = !option.contains('=') && takes_value(&command, option);
            defaults.push(option.clone());
        } else {
            ignored.push(option.as_str());
        }
    }

    if !ignored.is_empty() {
        eprintln!(
            "streamconv: warning: ignoring default options that are not flags or flag values: {:?}",
            ignored
        );
    }
    if expects_value {
        eprintln!("streamconv: warning: last default option is missing its value");
    }

    let mut args = args.into_iter();
    args.next().into_iter().chain(defaults).chain(args).collect()
}

/// Whether `flag` (`--long` or `-s`) names an argument that takes a value
fn takes_value(command: &clap::Command, flag: &str) -> bool {
    let arg = match flag.strip_prefix("--") {
        Some(long) => command.get_arguments().find(|a| a.get_long() == Some(long)),
        None => {
            let mut shorts = flag.chars().skip(1);
            match (shorts.next(), shorts.next()) {
                (Some(short), None) => command.get_arguments().find(|a| a.get_short() == Some(short)),
                _ => None,
            }
        }
    };
    arg.is_some_and(|a| a.get_action().takes_values())
}

fn handle_error(env: &Environment, error: StreamconvError, traceback: bool) -> ExitStatus {
    eprintln!("{}: error: {}", env.program_name, error);
    if traceback {
        eprintln!("{:?}", error);
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = std::error::Error::source(cause);
        }
    }

    ExitStatus::from_error(&error)
}
