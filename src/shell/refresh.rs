//! Persisted-environment refresh.
//!
//! A package manager run in a child process updates the *persisted* PATH
//! (the registry on Windows, shell profiles on Unix), but a running process
//! never sees those changes automatically. After any action that may have
//! mutated the persisted environment, the installer rebuilds its own PATH
//! from the persisted stores and then re-probes. If the newly installed tool
//! is still invisible, only a fresh session can fix it.

use crate::error::Result;
use crate::shell::command::run_quiet;

/// Re-read the persisted PATH stores and apply them to this process.
///
/// Returns `true` if the process PATH actually changed. Failure to read
/// the stores is not an error; the caller falls back to re-probing with
/// the unchanged environment.
pub fn refresh_path() -> Result<bool> {
    let before = std::env::var("PATH").unwrap_or_default();

    let Some(refreshed) = read_persisted_path()? else {
        return Ok(false);
    };

    if refreshed.is_empty() || refreshed == before {
        return Ok(false);
    }

    tracing::debug!("PATH refreshed from persisted stores");
    std::env::set_var("PATH", &refreshed);
    Ok(true)
}

/// Read the persisted PATH as a fresh session would see it.
#[cfg(target_os = "windows")]
fn read_persisted_path() -> Result<Option<String>> {
    // Machine-wide entries first, then user entries, matching the order
    // Windows itself uses when composing PATH for a new process.
    let script = "[Environment]::GetEnvironmentVariable('Path','Machine') + ';' + \
                  [Environment]::GetEnvironmentVariable('Path','User')";
    let result = run_quiet("powershell", &["-NoProfile", "-Command", script], None)?;

    if !result.success {
        return Ok(None);
    }
    Ok(Some(result.stdout.trim().to_string()))
}

/// Read the persisted PATH as a fresh session would see it.
#[cfg(not(target_os = "windows"))]
fn read_persisted_path() -> Result<Option<String>> {
    let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string());
    let result = run_quiet(&shell, &["-lc", "printf %s \"$PATH\""], None);

    match result {
        Ok(r) if r.success => Ok(Some(r.stdout.trim().to_string())),
        _ => Ok(None),
    }
}
