//! Ctrl+C handling for graceful shutdown.
//!
//! A shared `AtomicBool` is flipped when SIGINT (or SIGTERM/SIGHUP) arrives.
//! The corpus generator checks it between batches and the build loop checks it
//! every few thousand lines; both then stop with an `Interrupted` error and the
//! process exits with code 130 (128 + SIGINT).

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Exit code for SIGINT (Ctrl+C) interruption.
pub const EXIT_CODE_INTERRUPTED: i32 = 130;

/// Shared shutdown flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once Ctrl+C was pressed or [`ShutdownHandler::request_shutdown`] was called.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Manually request a shutdown.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Clone of the flag for `FinderConfig` / `GeneratorConfig`.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Clear the flag.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install the process-wide Ctrl+C handler, or reuse it if one is installed.
///
/// `ctrlc` only accepts one handler per process; repeated calls (e.g. from
/// tests running `run_app` in parallel) get the same shared handler back with
/// its flag reset.
///
/// # Errors
///
/// Returns [`SignalError::InstallFailed`] if the OS refuses the handler and no
/// handler was registered before.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    let installed = ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        let _ = writeln!(std::io::stderr(), "\nInterrupted. Stopping...");
        let _ = std::io::stderr().flush();
        log::info!("Shutdown signal received");
    });

    match installed {
        Ok(()) => {
            let _ = GLOBAL_HANDLER.set(handler);
        }
        Err(ctrlc::Error::MultipleHandlers) => {
            // Registered by a concurrent caller; fall back to a manual-only flag.
            log::debug!("Ctrl+C handler already registered, using unhooked handler");
            let _ = GLOBAL_HANDLER.set(handler);
        }
        Err(e) => return Err(SignalError::InstallFailed(e)),
    }

    let handler = GLOBAL_HANDLER.get_or_init(ShutdownHandler::new);
    Ok(handler.clone())
}
