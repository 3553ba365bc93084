//! The `uninstall` command: verify, confirm, remove.
//!
//! The signature check runs before the confirmation prompt so that an
//! unmanaged directory is refused regardless of how the operator answers.

use crate::cli::args::UninstallArgs;
use crate::error::{Result, SetupError};
use crate::guard;
use crate::recipe::DesiredState;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Removes a managed installation.
pub struct UninstallCommand {
    args: UninstallArgs,
}

impl UninstallCommand {
    pub fn new(args: UninstallArgs) -> Self {
        Self { args }
    }
}

impl Command for UninstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let desired = DesiredState::new(self.args.dir.clone(), None);
        let root = &desired.install_dir;

        if !root.exists() {
            ui.message(&format!("Nothing to remove: {} does not exist", root.display()));
            return Ok(CommandResult::success());
        }

        if !guard::verify_signature(root) {
            ui.error(&format!(
                "{} is missing the installation markers; refusing to delete it",
                root.display()
            ));
            return Err(SetupError::DestructiveRefused {
                path: root.clone(),
            });
        }

        // Removal needs both the signature and an explicit confirmation;
        // a declined confirmation refuses the removal with a non-zero exit.
        let question = format!("Remove the PeppyMeter remote client at {}?", root.display());
        if !ui.confirm(&question, false)? {
            ui.message("Removal not confirmed; nothing was deleted.");
            return Ok(CommandResult::failure(1));
        }

        guard::remove_installation(root)?;
        guard::remove_shortcut("peppy-remote");

        ui.success(&format!("Removed {}", root.display()));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::signature_files;
    use crate::ui::MockUI;
    use std::fs;

    fn managed_install(root: &std::path::Path) {
        fs::create_dir_all(root).unwrap();
        for file in signature_files(root) {
            fs::write(file, "marker").unwrap();
        }
    }

    #[test]
    fn missing_directory_is_a_clean_noop() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let cmd = UninstallCommand::new(UninstallArgs {
            dir: Some(temp.path().join("absent")),
            ..Default::default()
        });
        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
    }

    #[test]
    fn unmanaged_directory_is_refused_before_any_prompt() {
        let temp = tempfile::TempDir::new().unwrap();
        let target = temp.path().join("documents");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("keep.txt"), "data").unwrap();

        let mut ui = MockUI::new();
        // Even a queued "yes" must not matter: refusal precedes the prompt.
        ui.push_answer(true);

        let cmd = UninstallCommand::new(UninstallArgs {
            dir: Some(target.clone()),
            ..Default::default()
        });
        let result = cmd.execute(&mut ui);

        assert!(matches!(result, Err(SetupError::DestructiveRefused { .. })));
        assert!(ui.questions.is_empty());
        assert!(target.join("keep.txt").exists());
    }

    #[test]
    fn declined_confirmation_refuses_with_nonzero_exit() {
        let temp = tempfile::TempDir::new().unwrap();
        let target = temp.path().join("peppy_remote");
        managed_install(&target);

        let mut ui = MockUI::new();
        ui.push_answer(false);

        let cmd = UninstallCommand::new(UninstallArgs {
            dir: Some(target.clone()),
            ..Default::default()
        });
        let result = cmd.execute(&mut ui).unwrap();

        // Both guard checks must pass for removal; an unconfirmed removal
        // is a refusal, not a clean decline.
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(ui.saw("nothing was deleted"));
        assert!(target.exists());
    }

    #[test]
    fn confirmed_removal_deletes_the_installation() {
        let temp = tempfile::TempDir::new().unwrap();
        let target = temp.path().join("peppy_remote");
        managed_install(&target);

        let mut ui = MockUI::new();
        ui.push_answer(true);

        let cmd = UninstallCommand::new(UninstallArgs {
            dir: Some(target.clone()),
            ..Default::default()
        });
        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(!target.exists());
    }
}
