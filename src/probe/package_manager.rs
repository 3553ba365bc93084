//! System package manager detection.
//!
//! Used only by the dependency-remediation sub-flow: when the interpreter
//! or the version-control tool is missing and the operator consents, the
//! first available manager installs them with assume-yes flags. No manager
//! available means the flow falls back to manual install instructions.

use crate::shell::run_check;

/// A dependency the installer can remediate through a package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    Python,
    Git,
}

impl Dependency {
    /// Human-facing tool name.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Dependency::Python => "python3",
            Dependency::Git => "git",
        }
    }

    /// Manual download URL shown when auto-install is not possible.
    pub fn manual_url(&self) -> &'static str {
        match self {
            Dependency::Python => "https://www.python.org/downloads/",
            Dependency::Git => "https://git-scm.com/downloads",
        }
    }
}

/// Supported system package managers, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPackageManager {
    Winget,
    Apt,
    Dnf,
    Pacman,
    Brew,
}

impl SystemPackageManager {
    /// Command name.
    pub fn command(&self) -> &'static str {
        match self {
            SystemPackageManager::Winget => "winget",
            SystemPackageManager::Apt => "apt-get",
            SystemPackageManager::Dnf => "dnf",
            SystemPackageManager::Pacman => "pacman",
            SystemPackageManager::Brew => "brew",
        }
    }

    /// Full argument list for installing a dependency, assume-yes included.
    pub fn install_args(&self, dep: Dependency) -> Vec<&'static str> {
        match (self, dep) {
            (SystemPackageManager::Winget, Dependency::Python) => vec![
                "install",
                "--id",
                "Python.Python.3.12",
                "--accept-package-agreements",
                "--accept-source-agreements",
            ],
            (SystemPackageManager::Winget, Dependency::Git) => vec![
                "install",
                "--id",
                "Git.Git",
                "--accept-package-agreements",
                "--accept-source-agreements",
            ],
            (SystemPackageManager::Apt, Dependency::Python) => {
                vec!["install", "-y", "python3", "python3-venv", "python3-pip"]
            }
            (SystemPackageManager::Apt, Dependency::Git) => vec!["install", "-y", "git"],
            (SystemPackageManager::Dnf, Dependency::Python) => vec!["install", "-y", "python3"],
            (SystemPackageManager::Dnf, Dependency::Git) => vec!["install", "-y", "git"],
            (SystemPackageManager::Pacman, Dependency::Python) => {
                vec!["-S", "--noconfirm", "python"]
            }
            (SystemPackageManager::Pacman, Dependency::Git) => vec!["-S", "--noconfirm", "git"],
            (SystemPackageManager::Brew, Dependency::Python) => vec!["install", "python"],
            (SystemPackageManager::Brew, Dependency::Git) => vec!["install", "git"],
        }
    }

    fn detection_order() -> &'static [SystemPackageManager] {
        if cfg!(target_os = "windows") {
            &[SystemPackageManager::Winget]
        } else {
            &[
                SystemPackageManager::Apt,
                SystemPackageManager::Dnf,
                SystemPackageManager::Pacman,
                SystemPackageManager::Brew,
            ]
        }
    }

    /// Detect the first available manager for this platform.
    pub fn detect() -> Option<SystemPackageManager> {
        Self::detection_order()
            .iter()
            .copied()
            .find(|pm| run_check(pm.command(), &["--version"]))
    }
}
