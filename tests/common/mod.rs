//! Common test utilities for streamconv integration tests
//!
//! This module provides shared test infrastructure including:
//! - CLI invocation helpers with piped stdin
//! - An isolated config directory per run
//! - Test fixture management

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Exit status codes matching the Rust application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
    Usage = 2,
    Interrupted = 130,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            2 => ExitStatus::Usage,
            130 => ExitStatus::Interrupted,
            _ => ExitStatus::Error,
        }
    }
}

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    /// Standard output, as raw bytes
    pub stdout: Vec<u8>,
    /// Standard error
    pub stderr: String,
    /// Exit status code
    pub exit_status: ExitStatus,
    /// Raw exit code
    pub exit_code: i32,
}

impl CliResponse {
    /// Standard output decoded as UTF-8 (lossy)
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    pub fn success(&self) -> bool {
        self.exit_status == ExitStatus::Success
    }

    /// Check if stderr contains a substring
    pub fn stderr_contains(&self, needle: &str) -> bool {
        self.stderr.contains(needle)
    }
}

/// Mock environment for testing
pub struct MockEnvironment {
    /// Temporary config directory
    pub config_dir: TempDir,
    /// Environment variables to set
    pub env_vars: HashMap<String, String>,
    /// Standard input content
    pub stdin: Option<Vec<u8>>,
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnvironment {
    /// Create a new mock environment
    pub fn new() -> Self {
        let config_dir = TempDir::new().expect("Failed to create temp config dir");
        Self {
            config_dir,
            env_vars: HashMap::new(),
            stdin: None,
        }
    }

    /// Set an environment variable
    pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Set stdin content
    pub fn set_stdin(&mut self, content: impl Into<Vec<u8>>) -> &mut Self {
        self.stdin = Some(content.into());
        self
    }

    /// Write `config.toml` into the config directory
    pub fn set_config(&mut self, toml: &str) -> &mut Self {
        std::fs::write(self.config_dir.path().join("config.toml"), toml)
            .expect("Failed to write config file");
        self
    }

    /// Get the config directory path
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().to_path_buf()
    }
}

/// Run the CLI with the given arguments and no stdin
pub fn streamconv(args: &[&str]) -> CliResponse {
    streamconv_with_env(args, &MockEnvironment::new())
}

/// Run the CLI with the given arguments, feeding `input` on stdin
pub fn streamconv_stdin(args: &[&str], input: &[u8]) -> CliResponse {
    let mut env = MockEnvironment::new();
    env.set_stdin(input);
    streamconv_with_env(args, &env)
}

/// Run the CLI with the given arguments and environment
pub fn streamconv_with_env(args: &[&str], env: &MockEnvironment) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_streamconv"));
    cmd.args(args);

    // Set up environment
    cmd.env("STREAMCONV_CONFIG_DIR", env.config_path());
    cmd.env_remove("RUST_LOG");
    for (key, value) in &env.env_vars {
        cmd.env(key, value);
    }

    // Configure stdio
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    if let Some(ref stdin_data) = env.stdin {
        cmd.stdin(Stdio::piped());
        let mut child = cmd.spawn().expect("Failed to spawn command");
        {
            let stdin = child.stdin.as_mut().expect("Failed to open stdin");
            // The process may exit before consuming all input (limit, errors)
            match stdin.write_all(stdin_data) {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                other => other.expect("Failed to write to stdin"),
            }
        }
        drop(child.stdin.take());
        let output = child.wait_with_output().expect("Failed to wait for command");
        parse_output(output)
    } else {
        cmd.stdin(Stdio::null());
        let output = cmd.output().expect("Failed to execute command");
        parse_output(output)
    }
}

fn parse_output(output: Output) -> CliResponse {
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(1);

    CliResponse {
        stdout: output.stdout,
        stderr,
        exit_status: ExitStatus::from(exit_code),
        exit_code,
    }
}

/// Create a temporary file with the given content
pub fn create_temp_file(content: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = dir.path().join("input.txt");
    std::fs::write(&file_path, content).expect("Failed to write temp file");
    (dir, file_path)
}

/// Path for an output file that does not exist yet
pub fn output_path(dir: &TempDir) -> PathBuf {
    dir.path().join("output.txt")
}

/// Read a file produced by a run
pub fn read_output(path: &Path) -> Vec<u8> {
    std::fs::read(path).expect("Failed to read output file")
}

/// Convert a path into a command-line argument
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_from_i32() {
        assert_eq!(ExitStatus::from(0), ExitStatus::Success);
        assert_eq!(ExitStatus::from(1), ExitStatus::Error);
        assert_eq!(ExitStatus::from(2), ExitStatus::Usage);
        assert_eq!(ExitStatus::from(130), ExitStatus::Interrupted);
        assert_eq!(ExitStatus::from(42), ExitStatus::Error);
    }
}
