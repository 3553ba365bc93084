//! Launcher script generation.
//!
//! The client's package layout is not on any default import path, so two
//! equivalent entry-point scripts (one for interactive shell use, one for
//! direct execution) prepend the installation's code directories to the
//! interpreter search path before starting the client with any
//! pass-through arguments. Either launcher is also one of the two
//! completion markers of the installation signature.

use crate::error::Result;
use crate::recipe::CLIENT_SCRIPT;
use std::path::{Path, PathBuf};

/// The two generated launcher entry points.
#[derive(Debug, Clone)]
pub struct LauncherPaths {
    /// Script meant for invocation from an interactive shell.
    pub shell: PathBuf,
    /// Script meant for direct execution (double-click, exec).
    pub direct: PathBuf,
}

/// Launcher locations inside an install root, per platform.
pub fn launcher_paths(root: &Path) -> LauncherPaths {
    if cfg!(target_os = "windows") {
        LauncherPaths {
            shell: root.join("peppy_remote.ps1"),
            direct: root.join("peppy_remote.bat"),
        }
    } else {
        LauncherPaths {
            shell: root.join("peppy_remote.sh"),
            direct: root.join("peppy_remote"),
        }
    }
}

/// Write both launcher scripts, overwriting existing ones.
pub fn write_launchers(root: &Path) -> Result<LauncherPaths> {
    let paths = launcher_paths(root);

    if cfg!(target_os = "windows") {
        std::fs::write(&paths.shell, powershell_script(root))?;
        std::fs::write(&paths.direct, batch_script(root))?;
    } else {
        let script = posix_script(root);
        std::fs::write(&paths.shell, &script)?;
        std::fs::write(&paths.direct, &script)?;
        set_executable(&paths.shell)?;
        set_executable(&paths.direct)?;
    }

    Ok(paths)
}

fn posix_script(root: &Path) -> String {
    let root = root.display();
    format!(
        "#!/bin/sh\n\
         # Launch the PeppyMeter remote client with its bundled environment.\n\
         PEPPY_ROOT=\"{root}\"\n\
         PYTHONPATH=\"$PEPPY_ROOT/screensaver:$PEPPY_ROOT/screensaver/peppymeter${{PYTHONPATH:+:$PYTHONPATH}}\"\n\
         export PYTHONPATH\n\
         cd \"$PEPPY_ROOT\" || exit 1\n\
         exec \"$PEPPY_ROOT/venv/bin/python\" \"$PEPPY_ROOT/{CLIENT_SCRIPT}\" \"$@\"\n"
    )
}

fn batch_script(root: &Path) -> String {
    let root = root.display();
    format!(
        "@echo off\r\n\
         rem Launch the PeppyMeter remote client with its bundled environment.\r\n\
         set \"PEPPY_ROOT={root}\"\r\n\
         set \"PYTHONPATH=%PEPPY_ROOT%\\screensaver;%PEPPY_ROOT%\\screensaver\\peppymeter;%PYTHONPATH%\"\r\n\
         cd /d \"%PEPPY_ROOT%\"\r\n\
         \"%PEPPY_ROOT%\\venv\\Scripts\\python.exe\" \"%PEPPY_ROOT%\\{CLIENT_SCRIPT}\" %*\r\n"
    )
}

fn powershell_script(root: &Path) -> String {
    let root = root.display();
    format!(
        "# Launch the PeppyMeter remote client with its bundled environment.\r\n\
         $env:PEPPY_ROOT = \"{root}\"\r\n\
         $env:PYTHONPATH = \"$env:PEPPY_ROOT\\screensaver;$env:PEPPY_ROOT\\screensaver\\peppymeter;$env:PYTHONPATH\"\r\n\
         Set-Location $env:PEPPY_ROOT\r\n\
         & \"$env:PEPPY_ROOT\\venv\\Scripts\\python.exe\" \"$env:PEPPY_ROOT\\{CLIENT_SCRIPT}\" @args\r\n"
    )
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_launchers_creates_both_entry_points() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = write_launchers(temp.path()).unwrap();

        assert!(paths.shell.is_file());
        assert!(paths.direct.is_file());
    }

    #[test]
    fn launchers_set_search_path_and_invoke_client() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = write_launchers(temp.path()).unwrap();

        let content = std::fs::read_to_string(&paths.shell).unwrap();
        assert!(content.contains("PYTHONPATH"));
        assert!(content.contains("screensaver"));
        assert!(content.contains(CLIENT_SCRIPT));
    }

    #[test]
    fn launchers_forward_arguments() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = write_launchers(temp.path()).unwrap();

        let content = std::fs::read_to_string(&paths.direct).unwrap();
        let forwards = content.contains("\"$@\"") || content.contains("%*");
        assert!(forwards);
    }

    #[cfg(unix)]
    #[test]
    fn unix_launchers_are_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let paths = write_launchers(temp.path()).unwrap();

        let mode = std::fs::metadata(&paths.direct)
            .unwrap()
            .permissions()
            .mode();
        assert_ne!(mode & 0o111, 0);
    }

    #[test]
    fn rewriting_launchers_is_idempotent() {
        let temp = tempfile::TempDir::new().unwrap();
        let first = write_launchers(temp.path()).unwrap();
        let before = std::fs::read_to_string(&first.shell).unwrap();

        let second = write_launchers(temp.path()).unwrap();
        let after = std::fs::read_to_string(&second.shell).unwrap();

        assert_eq!(before, after);
    }
}
