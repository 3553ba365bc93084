//! Remediation planning.
//!
//! `plan()` compares the desired state against a probed snapshot and emits
//! the ordered action list that moves the machine toward the desired state.
//! It is a pure function: the same (desired, probed) pair always yields the
//! same list, and nothing here touches the filesystem or the network.
//!
//! The interactive gates (overwrite confirmation, dependency consent) run
//! *before* planning, in the install command; by the time `plan()` is
//! called the tools are known present and the install root is known clear
//! or accepted.

use crate::probe::ProbedState;
use crate::recipe::{
    DesiredState, CLIENT_SCRIPT, FONT_FILES, FORMAT_ICONS, HANDLER_FILES, NATIVE_ARCHIVE_URL,
    REPOSITORIES,
};
use std::path::PathBuf;

/// A single remediation step.
///
/// Every action is idempotent: re-running it after its first success
/// produces no further change beyond its postcondition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateDir {
        path: PathBuf,
    },
    DownloadFile {
        url: String,
        dest: PathBuf,
    },
    CloneRepo {
        url: String,
        dest: PathBuf,
    },
    UpdateRepo {
        url: String,
        dest: PathBuf,
    },
    PatchHandlers {
        dir: PathBuf,
    },
    CreateVenv {
        dir: PathBuf,
    },
    InstallPackages {
        venv: PathBuf,
    },
    AcquireNativeRuntime {
        archive_url: String,
        dest: PathBuf,
    },
    WriteConfig {
        path: PathBuf,
        server: Option<String>,
    },
    WriteLauncher {
        dir: PathBuf,
    },
    CreateShortcut {
        dir: PathBuf,
    },
}

impl Action {
    /// Short human-readable description for progress output.
    pub fn describe(&self) -> String {
        match self {
            Action::CreateDir { path } => format!("Creating {}", path.display()),
            Action::DownloadFile { url, .. } => {
                let name = url.rsplit('/').next().unwrap_or(url);
                format!("Downloading {name}")
            }
            Action::CloneRepo { dest, .. } => {
                format!("Cloning {}", dest.file_name().unwrap_or_default().to_string_lossy())
            }
            Action::UpdateRepo { dest, .. } => {
                format!("Updating {}", dest.file_name().unwrap_or_default().to_string_lossy())
            }
            Action::PatchHandlers { .. } => "Patching handlers for local icons".to_string(),
            Action::CreateVenv { .. } => "Creating virtual environment".to_string(),
            Action::InstallPackages { .. } => "Installing Python packages".to_string(),
            Action::AcquireNativeRuntime { .. } => "Acquiring native rendering runtime".to_string(),
            Action::WriteConfig { .. } => "Writing client configuration".to_string(),
            Action::WriteLauncher { .. } => "Writing launcher scripts".to_string(),
            Action::CreateShortcut { .. } => "Creating shortcut".to_string(),
        }
    }
}

/// Compute the ordered action list for one provisioning run.
pub fn plan(desired: &DesiredState, probed: &ProbedState) -> Vec<Action> {
    let mut actions = Vec::new();

    // Directories first; everything else lands inside them.
    for dir in [
        desired.install_dir.clone(),
        desired.screensaver_dir(),
        desired.fonts_dir(),
        desired.icons_dir(),
    ] {
        actions.push(Action::CreateDir { path: dir });
    }

    actions.push(Action::DownloadFile {
        url: DesiredState::remote_url(CLIENT_SCRIPT),
        dest: desired.client_script_path(),
    });

    // Never re-clone over an existing checkout.
    for (name, url) in REPOSITORIES {
        let dest = desired.repo_dir(name);
        if probed.repo_checkout_exists(name) {
            actions.push(Action::UpdateRepo {
                url: (*url).to_string(),
                dest,
            });
        } else {
            actions.push(Action::CloneRepo {
                url: (*url).to_string(),
                dest,
            });
        }
    }

    for handler in HANDLER_FILES {
        actions.push(Action::DownloadFile {
            url: DesiredState::remote_url(handler),
            dest: desired.screensaver_dir().join(handler),
        });
    }

    for font in FONT_FILES {
        actions.push(Action::DownloadFile {
            url: DesiredState::font_url(font),
            dest: desired.fonts_dir().join(font),
        });
    }

    for icon in FORMAT_ICONS {
        actions.push(Action::DownloadFile {
            url: DesiredState::icon_url(icon),
            dest: desired.icons_dir().join(format!("{icon}.svg")),
        });
    }

    // Handlers must be on disk before the patch runs.
    actions.push(Action::PatchHandlers {
        dir: desired.screensaver_dir(),
    });

    // Venv creation is conditional; package installation is not, because
    // the underlying installer is itself idempotent for satisfied packages.
    if !probed.venv_exists {
        actions.push(Action::CreateVenv {
            dir: desired.venv_dir(),
        });
    }
    actions.push(Action::InstallPackages {
        venv: desired.venv_dir(),
    });

    // Skipped entirely when the runtime already imports; a degraded
    // acquisition only warns later, it never aborts.
    if desired.wants_native_runtime && !probed.native_runtime_ok {
        actions.push(Action::AcquireNativeRuntime {
            archive_url: NATIVE_ARCHIVE_URL.to_string(),
            dest: desired.native_dir(),
        });
    }

    actions.push(Action::WriteConfig {
        path: desired.config_path(),
        server: desired.server.clone(),
    });

    // Launcher last among the required steps: it is a completion marker
    // for the installation signature.
    actions.push(Action::WriteLauncher {
        dir: desired.install_dir.clone(),
    });

    actions.push(Action::CreateShortcut {
        dir: desired.install_dir.clone(),
    });

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Interpreter;

    fn desired() -> DesiredState {
        DesiredState {
            install_dir: PathBuf::from("/opt/peppy"),
            server: Some("volumio".into()),
            wants_native_runtime: true,
        }
    }

    fn probed_fresh() -> ProbedState {
        ProbedState {
            interpreter: Some(Interpreter {
                command: "python3".into(),
                major: 3,
                minor: 11,
            }),
            git_available: true,
            install_dir_exists: false,
            venv_exists: false,
            repo_exists: vec![false, false],
            native_runtime_ok: false,
            is_64bit: true,
        }
    }

    #[test]
    fn plan_is_deterministic() {
        let d = desired();
        let p = probed_fresh();
        assert_eq!(plan(&d, &p), plan(&d, &p));
    }

    #[test]
    fn fresh_machine_clones_creates_venv_and_fetches_runtime() {
        let actions = plan(&desired(), &probed_fresh());

        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::CloneRepo { .. })));
        assert!(!actions
            .iter()
            .any(|a| matches!(a, Action::UpdateRepo { .. })));
        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::CreateVenv { .. })));
        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::AcquireNativeRuntime { .. })));
    }

    #[test]
    fn existing_checkouts_are_updated_never_recloned() {
        let mut probed = probed_fresh();
        probed.repo_exists = vec![true, true];

        let actions = plan(&desired(), &probed);

        assert!(!actions
            .iter()
            .any(|a| matches!(a, Action::CloneRepo { .. })));
        assert_eq!(
            actions
                .iter()
                .filter(|a| matches!(a, Action::UpdateRepo { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn existing_venv_skips_creation_but_still_installs_packages() {
        let mut probed = probed_fresh();
        probed.venv_exists = true;

        let actions = plan(&desired(), &probed);

        assert!(!actions
            .iter()
            .any(|a| matches!(a, Action::CreateVenv { .. })));
        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::InstallPackages { .. })));
    }

    #[test]
    fn importable_native_runtime_skips_acquisition() {
        let mut probed = probed_fresh();
        probed.native_runtime_ok = true;

        let actions = plan(&desired(), &probed);

        assert!(!actions
            .iter()
            .any(|a| matches!(a, Action::AcquireNativeRuntime { .. })));
    }

    #[test]
    fn platform_without_native_runtime_never_acquires_it() {
        let mut d = desired();
        d.wants_native_runtime = false;

        let actions = plan(&d, &probed_fresh());

        assert!(!actions
            .iter()
            .any(|a| matches!(a, Action::AcquireNativeRuntime { .. })));
    }

    #[test]
    fn ordering_respects_dependencies() {
        let actions = plan(&desired(), &probed_fresh());

        let pos = |pred: &dyn Fn(&Action) -> bool| actions.iter().position(|a| pred(a)).unwrap();

        let first_dir = pos(&|a| matches!(a, Action::CreateDir { .. }));
        let first_download = pos(&|a| matches!(a, Action::DownloadFile { .. }));
        let patch = pos(&|a| matches!(a, Action::PatchHandlers { .. }));
        let venv = pos(&|a| matches!(a, Action::CreateVenv { .. }));
        let packages = pos(&|a| matches!(a, Action::InstallPackages { .. }));
        let launcher = pos(&|a| matches!(a, Action::WriteLauncher { .. }));
        let shortcut = pos(&|a| matches!(a, Action::CreateShortcut { .. }));

        assert!(first_dir < first_download);
        assert!(first_download < patch);
        assert!(venv < packages);
        assert!(packages < launcher);
        assert!(launcher < shortcut);
    }

    #[test]
    fn config_carries_the_supplied_server() {
        let actions = plan(&desired(), &probed_fresh());

        let config = actions
            .iter()
            .find_map(|a| match a {
                Action::WriteConfig { server, .. } => Some(server.clone()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.as_deref(), Some("volumio"));
    }

    #[test]
    fn downloads_cover_every_declared_asset() {
        let actions = plan(&desired(), &probed_fresh());

        let downloads = actions
            .iter()
            .filter(|a| matches!(a, Action::DownloadFile { .. }))
            .count();

        // client script + handlers + fonts + icons
        assert_eq!(
            downloads,
            1 + HANDLER_FILES.len() + FONT_FILES.len() + FORMAT_ICONS.len()
        );
    }

    #[test]
    fn describe_is_nonempty_for_every_action() {
        for action in plan(&desired(), &probed_fresh()) {
            assert!(!action.describe().is_empty());
        }
    }
}
