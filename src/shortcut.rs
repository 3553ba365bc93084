//! Launchable shortcut creation.
//!
//! Shortcut creation is a swappable capability: the executor only knows
//! the [`ShortcutWriter`] contract (link path, target, arguments, working
//! directory), not any platform mechanics. Failure here is always reported
//! as a warning, never escalated — the plain launcher scripts are already
//! launchable entry points.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Capability interface for creating a launchable pointer.
pub trait ShortcutWriter {
    /// Create a shortcut at `link_path` pointing at `target`.
    fn create(&self, link_path: &Path, target: &Path, args: &str, working_dir: &Path)
        -> Result<()>;
}

/// Platform-appropriate writer.
pub fn platform_writer() -> Box<dyn ShortcutWriter> {
    if cfg!(target_os = "windows") {
        Box::new(WindowsShellWriter)
    } else {
        Box::new(DesktopEntryWriter)
    }
}

/// Default location for the client shortcut, if the platform has one.
pub fn default_link_path(name: &str) -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        dirs::desktop_dir().map(|d| d.join(format!("{name}.lnk")))
    } else {
        dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .map(|d| d.join("applications").join(format!("{name}.desktop")))
    }
}

/// Writes freedesktop `.desktop` entries.
pub struct DesktopEntryWriter;

impl ShortcutWriter for DesktopEntryWriter {
    fn create(
        &self,
        link_path: &Path,
        target: &Path,
        args: &str,
        working_dir: &Path,
    ) -> Result<()> {
        if let Some(parent) = link_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let exec = if args.is_empty() {
            target.display().to_string()
        } else {
            format!("{} {}", target.display(), args)
        };

        let entry = format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=PeppyMeter Remote\n\
             Comment=Remote display for PeppyMeter on Volumio\n\
             Exec={exec}\n\
             Path={}\n\
             Terminal=false\n\
             Categories=AudioVideo;Audio;\n",
            working_dir.display()
        );

        std::fs::write(link_path, entry)?;
        Ok(())
    }
}

/// Drives the platform automation object through a PowerShell one-liner.
pub struct WindowsShellWriter;

impl ShortcutWriter for WindowsShellWriter {
    fn create(
        &self,
        link_path: &Path,
        target: &Path,
        args: &str,
        working_dir: &Path,
    ) -> Result<()> {
        let script = format!(
            "$s = (New-Object -ComObject WScript.Shell).CreateShortcut('{}'); \
             $s.TargetPath = '{}'; \
             $s.Arguments = '{}'; \
             $s.WorkingDirectory = '{}'; \
             $s.Save()",
            link_path.display(),
            target.display(),
            args,
            working_dir.display()
        );

        crate::shell::run_required("powershell", &["-NoProfile", "-Command", &script], None)?;
        Ok(())
    }
}
