//! Exit status codes for the CLI
//!
//! - 0: Success
//! - 1: Runtime failure (I/O or processing) while streaming
//! - 2: Configuration or validation failure, detected before any data is read
//! - 130: User interrupted (Ctrl+C, standard SIGINT exit code)

use std::process::{ExitCode, Termination};

use crate::errors::StreamconvError;

/// Exit status codes following standard Unix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Successful execution
    Success = 0,
    /// I/O or processing failure
    Error = 1,
    /// Bad flags, conflicting conversions, existing output, offset past end
    Usage = 2,
    /// User interrupted (Ctrl+C) - standard SIGINT code
    Interrupted = 130,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    /// Pick the exit status an error should terminate the process with
    pub fn from_error(error: &StreamconvError) -> Self {
        match error {
            StreamconvError::Interrupted => ExitStatus::Interrupted,
            e if e.is_usage() => ExitStatus::Usage,
            _ => ExitStatus::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Operation, Variant};

    #[test]
    fn test_from_error() {
        assert_eq!(ExitStatus::from_error(&StreamconvError::config("x")), ExitStatus::Usage);
        assert_eq!(
            ExitStatus::from_error(&StreamconvError::Validation { offset: 5, size: 5 }),
            ExitStatus::Usage
        );
        assert_eq!(
            ExitStatus::from_error(&StreamconvError::unsupported(Operation::Seek, Variant::ForwardOnly)),
            ExitStatus::Error
        );
        assert_eq!(ExitStatus::from_error(&StreamconvError::Interrupted), ExitStatus::Interrupted);
    }
}
