//! Destructive-operation safety guard and uninstaller.
//!
//! Every directory removal, whether part of a reinstall or the dedicated
//! uninstall flow, passes through here. The invariant: a directory is
//! deleted only when it carries the installation signature, the minimal
//! file evidence that it is a managed installation. The signature files
//! are completion markers written late in the provisioning flow, so a
//! partially populated directory from a failed run generally fails its
//! own signature check as well.

use crate::error::{Result, SetupError};
use crate::launcher::launcher_paths;
use crate::recipe::CLIENT_SCRIPT;
use std::path::{Path, PathBuf};

/// The file markers proving a directory is a managed installation.
pub fn signature_files(root: &Path) -> Vec<PathBuf> {
    let launchers = launcher_paths(root);
    vec![root.join(CLIENT_SCRIPT), launchers.shell]
}

/// Whether every signature marker is present under `root`.
pub fn verify_signature(root: &Path) -> bool {
    signature_files(root).iter().all(|f| f.is_file())
}

/// Remove a verified installation directory.
///
/// The caller is responsible for having obtained operator confirmation;
/// this function enforces the signature half of the invariant and refuses
/// anything that does not prove itself to be a managed installation.
pub fn remove_installation(root: &Path) -> Result<()> {
    if !verify_signature(root) {
        return Err(SetupError::DestructiveRefused {
            path: root.to_path_buf(),
        });
    }

    tracing::info!("removing installation at {}", root.display());
    std::fs::remove_dir_all(root)?;
    Ok(())
}

/// Remove the client shortcut if one was created. Best-effort.
pub fn remove_shortcut(name: &str) {
    if let Some(link) = crate::shortcut::default_link_path(name) {
        if link.is_file() {
            if let Err(e) = std::fs::remove_file(&link) {
                tracing::warn!("could not remove shortcut {}: {}", link.display(), e);
            }
        }
    }
}
