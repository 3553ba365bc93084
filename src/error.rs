//! Error types for peppy-setup operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SetupError` for domain errors that need distinct handling at the
//!   top-level dispatcher (consent declines, missing tools, refused removals)
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for peppy-setup operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Operator declined a remediation the flow cannot proceed without.
    #[error("Declined: {message}")]
    ConsentDeclined { message: String },

    /// A required external tool is absent and cannot be auto-installed.
    #[error("Required tool '{tool}' is not available: {message}")]
    ToolUnavailable { tool: String, message: String },

    /// A tool was installed but is still not visible to this process.
    ///
    /// Persisted environment changes made by a child installer do not
    /// propagate into a running process; a fresh session is required.
    #[error("'{tool}' was installed but is not visible to this process. \
             Open a new terminal session and run the installer again.")]
    StaleEnvironment { tool: String },

    /// A network fetch or clone failed.
    #[error("Transfer failed for {url}: {message}")]
    Transport { url: String, message: String },

    /// Signature check failed before a destructive operation.
    #[error("Refusing to remove {}: it does not look like a managed installation", .path.display())]
    DestructiveRefused { path: PathBuf },

    /// External tool invocation failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for peppy-setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;
