//! Interrupt/signal handling
//!
//! The first Ctrl+C only raises a flag. The read loop polls it between blocks
//! and unwinds normally, so source and sink are closed on the way out. A
//! second Ctrl+C exits at once with status 130, which also ends a run that is
//! stuck waiting on input.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::{Result, StreamconvError};
use crate::status::ExitStatus;

/// Global flag for Ctrl+C interrupt handling
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Install the Ctrl+C handler. Failing to install it is not fatal.
pub fn install_handler() {
    let installed = ctrlc::set_handler(|| {
        let repeated = INTERRUPTED.swap(true, Ordering::SeqCst);
        eprintln!("\nInterrupted");

        if repeated {
            // no cleanup: the main thread may be blocked in a read
            std::process::exit(ExitStatus::Interrupted as i32);
        }
    });
    if let Err(e) = installed {
        tracing::debug!(error = %e, "Ctrl+C handler not installed");
    }
}

/// Check if the application was interrupted (Ctrl+C pressed)
#[inline]
pub fn was_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Fail with [`StreamconvError::Interrupted`] once Ctrl+C was pressed
pub fn check_interrupted() -> Result<()> {
    if was_interrupted() {
        Err(StreamconvError::Interrupted)
    } else {
        Ok(())
    }
}
