//! Repository clone-or-update.
//!
//! A missing checkout gets a shallow clone; an existing one gets a
//! fast-forward-only pull. Never re-clone over an existing checkout.
//! An update failure is deliberately non-fatal: a network hiccup must not
//! block use of an already-present, possibly slightly stale checkout.

use crate::error::{Result, SetupError};
use crate::shell::{display_command, run_quiet};
use std::path::Path;

/// How a repository was brought up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Fresh shallow clone.
    Cloned,
    /// Existing checkout fast-forwarded.
    Updated,
    /// Existing checkout kept as-is after a failed update.
    UpdateSkipped,
}

/// Clones and updates git repositories.
pub struct GitFetcher;

impl GitFetcher {
    pub fn new() -> Self {
        Self
    }

    /// Clone a repository shallowly into `dest`, or update `dest` if it
    /// already exists.
    pub fn clone_or_pull(&self, url: &str, dest: &Path) -> Result<FetchKind> {
        if dest.is_dir() {
            self.update(dest)
        } else {
            self.clone(url, dest)?;
            Ok(FetchKind::Cloned)
        }
    }

    fn clone(&self, url: &str, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let dest_str = dest.to_string_lossy();
        let args = ["clone", "--depth", "1", url, dest_str.as_ref()];
        let result = run_quiet("git", &args, None)?;

        if result.success {
            Ok(())
        } else {
            Err(SetupError::Transport {
                url: url.to_string(),
                message: format!(
                    "{} failed: {}",
                    display_command("git", &args[..1]),
                    result.stderr.trim()
                ),
            })
        }
    }

    fn update(&self, dest: &Path) -> Result<FetchKind> {
        let result = run_quiet("git", &["pull", "--ff-only"], Some(dest))?;

        if result.success {
            Ok(FetchKind::Updated)
        } else {
            tracing::warn!(
                "update of {} failed, keeping existing checkout: {}",
                dest.display(),
                result.stderr.trim()
            );
            Ok(FetchKind::UpdateSkipped)
        }
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new()
    }
}
