//! Action execution.
//!
//! Actions run strictly in plan order; the first unrecoverable error stops
//! the run and is surfaced as a single failure by the top-level dispatcher.
//! There is no rollback of completed actions. Two failures are deliberately
//! downgraded to warnings: a fast-forward update of an existing checkout
//! and native-runtime acquisition.

use crate::client_config::write_config;
use crate::error::Result;
use crate::fetch::{FetchKind, GitFetcher, HttpFetcher};
use crate::launcher::write_launchers;
use crate::native;
use crate::patch::patch_file;
use crate::plan::Action;
use crate::probe::{venv_python, ProbedState};
use crate::recipe::{handler_patch_rules, HANDLER_FILES, NATIVE_LIB_STEMS, PIP_PACKAGES};
use crate::shell::run_required;
use crate::shortcut::{default_link_path, platform_writer};
use crate::ui::UserInterface;
use std::path::Path;

/// Executes a planned action list against the machine.
pub struct Executor {
    interpreter: String,
    is_64bit: bool,
    http: HttpFetcher,
    git: GitFetcher,
}

impl Executor {
    /// Build an executor for one run.
    ///
    /// The probed interpreter must be present; the dependency gate runs
    /// before execution and guarantees it.
    pub fn new(probed: &ProbedState) -> Self {
        let interpreter = probed
            .interpreter
            .as_ref()
            .map(|i| i.command.clone())
            .unwrap_or_else(|| "python3".to_string());

        Self {
            interpreter,
            is_64bit: probed.is_64bit,
            http: HttpFetcher::new(),
            git: GitFetcher::new(),
        }
    }

    /// Execute every action in order, stopping at the first fatal error.
    pub fn execute(&self, actions: &[Action], ui: &mut dyn UserInterface) -> Result<()> {
        for action in actions {
            tracing::debug!("executing: {}", action.describe());
            self.run_action(action, ui)?;
        }
        Ok(())
    }

    fn run_action(&self, action: &Action, ui: &mut dyn UserInterface) -> Result<()> {
        match action {
            Action::CreateDir { path } => {
                std::fs::create_dir_all(path)?;
                Ok(())
            }

            Action::DownloadFile { url, dest } => {
                let mut spinner = ui.start_spinner(&action.describe());
                match self.http.fetch_to_file(url, dest) {
                    Ok(_) => {
                        spinner.finish_success(&action.describe());
                        Ok(())
                    }
                    Err(e) => {
                        spinner.finish_error(&action.describe());
                        Err(e)
                    }
                }
            }

            Action::CloneRepo { url, dest } => {
                let mut spinner = ui.start_spinner(&action.describe());
                match self.git.clone_or_pull(url, dest) {
                    Ok(_) => {
                        spinner.finish_success(&action.describe());
                        Ok(())
                    }
                    Err(e) => {
                        spinner.finish_error(&action.describe());
                        Err(e)
                    }
                }
            }

            Action::UpdateRepo { url, dest } => {
                let mut spinner = ui.start_spinner(&action.describe());
                match self.git.clone_or_pull(url, dest) {
                    Ok(FetchKind::UpdateSkipped) => {
                        spinner.finish_success(&action.describe());
                        ui.warning(&format!(
                            "Could not update {}; keeping the existing checkout",
                            dest.display()
                        ));
                        Ok(())
                    }
                    Ok(_) => {
                        spinner.finish_success(&action.describe());
                        Ok(())
                    }
                    Err(e) => {
                        spinner.finish_error(&action.describe());
                        Err(e)
                    }
                }
            }

            Action::PatchHandlers { dir } => {
                let rules = handler_patch_rules();
                let mut patched = 0;
                for handler in HANDLER_FILES {
                    if patch_file(&dir.join(handler), &rules)? {
                        patched += 1;
                    }
                }
                if patched > 0 {
                    ui.message(&format!("Patched {patched} handler(s) for local icons"));
                }
                Ok(())
            }

            Action::CreateVenv { dir } => {
                let mut spinner = ui.start_spinner(&action.describe());
                let dir_str = dir.to_string_lossy();
                let result =
                    run_required(&self.interpreter, &["-m", "venv", dir_str.as_ref()], None);
                match result {
                    Ok(_) => {
                        spinner.finish_success(&action.describe());
                        Ok(())
                    }
                    Err(e) => {
                        spinner.finish_error(&action.describe());
                        Err(e)
                    }
                }
            }

            Action::InstallPackages { venv } => {
                let mut spinner = ui.start_spinner(&action.describe());
                let python = venv_python(venv);
                let python_str = python.to_string_lossy();

                let mut args = vec!["-m", "pip", "install", "--quiet"];
                args.extend(PIP_PACKAGES);

                match run_required(python_str.as_ref(), &args, None) {
                    Ok(_) => {
                        spinner.finish_success(&action.describe());
                        Ok(())
                    }
                    Err(e) => {
                        spinner.finish_error(&action.describe());
                        Err(e)
                    }
                }
            }

            Action::AcquireNativeRuntime { archive_url, dest } => {
                let mut spinner = ui.start_spinner(&action.describe());
                match native::acquire(&self.http, archive_url, NATIVE_LIB_STEMS, dest, self.is_64bit)
                {
                    Ok(written) if !written.is_empty() => {
                        spinner.finish_success(&action.describe());
                        Ok(())
                    }
                    Ok(_) => {
                        spinner.finish_error(&action.describe());
                        ui.warning(
                            "Native rendering runtime not found in archive; \
                             some visual features will be unavailable",
                        );
                        Ok(())
                    }
                    // Degraded, never fatal: only a subset of visual
                    // features depends on the native runtime.
                    Err(e) => {
                        spinner.finish_error(&action.describe());
                        ui.warning(&format!(
                            "Could not acquire native rendering runtime ({e}); \
                             some visual features will be unavailable"
                        ));
                        Ok(())
                    }
                }
            }

            Action::WriteConfig { path, server } => {
                write_config(path, server.as_deref())?;
                Ok(())
            }

            Action::WriteLauncher { dir } => {
                write_launchers(dir)?;
                Ok(())
            }

            Action::CreateShortcut { dir } => {
                // Best-effort; the launcher scripts already exist.
                if let Err(e) = self.create_shortcut(dir) {
                    ui.warning(&format!("Could not create shortcut: {e}"));
                }
                Ok(())
            }
        }
    }

    fn create_shortcut(&self, install_dir: &Path) -> Result<()> {
        let launchers = crate::launcher::launcher_paths(install_dir);
        let Some(link) = default_link_path("peppy-remote") else {
            tracing::debug!("no shortcut location on this platform");
            return Ok(());
        };

        platform_writer().create(&link, &launchers.direct, "", install_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Interpreter;
    use crate::ui::MockUI;

    fn probed() -> ProbedState {
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
    fn create_dir_action_is_idempotent() {
        let temp = tempfile::TempDir::new().unwrap();
        let p = probed();
        let executor = Executor::new(&p);
        let mut ui = MockUI::new();

        let action = Action::CreateDir {
            path: temp.path().join("screensaver/fonts"),
        };

        executor.execute(std::slice::from_ref(&action), &mut ui).unwrap();
        executor.execute(std::slice::from_ref(&action), &mut ui).unwrap();

        assert!(temp.path().join("screensaver/fonts").is_dir());
    }

    #[test]
    fn write_config_action_emits_server_host() {
        let temp = tempfile::TempDir::new().unwrap();
        let p = probed();
        let executor = Executor::new(&p);
        let mut ui = MockUI::new();

        let action = Action::WriteConfig {
            path: temp.path().join("config.json"),
            server: Some("volumio".into()),
        };
        executor.execute(&[action], &mut ui).unwrap();

        let content = std::fs::read_to_string(temp.path().join("config.json")).unwrap();
        assert!(content.contains("\"volumio\""));
    }

    #[test]
    fn patch_handlers_action_tolerates_missing_files() {
        let temp = tempfile::TempDir::new().unwrap();
        let p = probed();
        let executor = Executor::new(&p);
        let mut ui = MockUI::new();

        let action = Action::PatchHandlers {
            dir: temp.path().join("screensaver"),
        };
        executor.execute(&[action], &mut ui).unwrap();
    }

    #[test]
    fn patch_handlers_action_patches_downloaded_handlers() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("screensaver");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("volumio_basic.py"),
            "local_icons = {'tidal', 'cd', 'qobuz'}\n",
        )
        .unwrap();

        let p = probed();
        let executor = Executor::new(&p);
        let mut ui = MockUI::new();

        let action = Action::PatchHandlers { dir: dir.clone() };
        executor.execute(&[action], &mut ui).unwrap();

        let content = std::fs::read_to_string(dir.join("volumio_basic.py")).unwrap();
        assert!(content.contains("'flac'"));
        assert!(ui.saw("Patched 1 handler"));
    }

    #[test]
    fn write_launcher_action_creates_signature_marker() {
        let temp = tempfile::TempDir::new().unwrap();
        let p = probed();
        let executor = Executor::new(&p);
        let mut ui = MockUI::new();

        let action = Action::WriteLauncher {
            dir: temp.path().to_path_buf(),
        };
        executor.execute(&[action], &mut ui).unwrap();

        let launchers = crate::launcher::launcher_paths(temp.path());
        assert!(launchers.shell.is_file());
    }

    #[test]
    fn download_failure_stops_the_run() {
        let temp = tempfile::TempDir::new().unwrap();
        let p = probed();
        let executor = Executor::new(&p);
        let mut ui = MockUI::new();

        let marker = temp.path().join("later.txt");
        let actions = vec![
            Action::DownloadFile {
                url: "http://nonexistent.invalid/file.py".into(),
                dest: temp.path().join("file.py"),
            },
            Action::CreateDir {
                path: marker.clone(),
            },
        ];

        assert!(executor.execute(&actions, &mut ui).is_err());
        // Nothing after the failed action may run.
        assert!(!marker.exists());
    }

    #[test]
    fn executor_defaults_interpreter_when_probe_empty() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut p = probed();
        p.interpreter = None;

        let executor = Executor::new(&p);
        assert_eq!(executor.interpreter, "python3");
    }
}
