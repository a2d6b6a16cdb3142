//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the NumDupe application.
///
/// - 0: Success (completed normally, duplicates found or corpus generated)
/// - 1: General error (I/O failure, bad configuration)
/// - 2: No duplicates found (compute completed normally)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the command completed and, for compute, duplicates were found.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// No duplicates: compute completed but every value was unique.
    NoDuplicates = 2,
    /// Interrupted: the run was interrupted by user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "ND000",
            Self::GeneralError => "ND001",
            Self::NoDuplicates => "ND002",
            Self::Interrupted => "ND130",
        }
    }

    /// Map an application error to its exit code.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        let interrupted = err.chain().any(|cause| {
            matches!(
                cause.downcast_ref::<crate::duplicates::FinderError>(),
                Some(crate::duplicates::FinderError::Interrupted)
            ) || matches!(
                cause.downcast_ref::<crate::corpus::GeneratorError>(),
                Some(crate::corpus::GeneratorError::Interrupted)
            )
        });
        if interrupted {
            Self::Interrupted
        } else {
            Self::GeneralError
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "ND001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
    /// Whether the operation was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}
