//! Environment struct (terminal detection, program name)

/// Execution environment
#[derive(Debug, Clone)]
pub struct Environment {
    pub stdin_isatty: bool,
    pub stderr_isatty: bool,
    pub program_name: String,
}

impl Environment {
    pub fn init() -> Self {
        Self::default()
    }

    /// Whether log output may use ANSI colors
    pub fn log_colors(&self) -> bool {
        self.stderr_isatty && std::env::var_os("NO_COLOR").is_none()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            stdin_isatty: atty::is(atty::Stream::Stdin),
            stderr_isatty: atty::is(atty::Stream::Stderr),
            program_name: "streamconv".to_string(),
        }
    }
}
