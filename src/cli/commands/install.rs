//! The `install` command: probe, gate, plan, execute.
//!
//! Flow: probe the machine, pass the overwrite gate if the install root
//! already exists, remediate missing external tools behind a consent gate,
//! then plan and execute. The planner itself is pure; every interactive
//! branch lives here.

use crate::cli::args::InstallArgs;
use crate::error::{Result, SetupError};
use crate::exec::Executor;
use crate::guard;
use crate::plan;
use crate::probe::{self, Dependency, ProbedState, SystemPackageManager};
use crate::recipe::DesiredState;
use crate::shell::{refresh_path, run_required};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Provisions or updates an installation.
pub struct InstallCommand {
    args: InstallArgs,
}

impl InstallCommand {
    pub fn new(args: InstallArgs) -> Self {
        Self { args }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let desired = DesiredState::new(self.args.dir.clone(), self.args.server.clone());

        ui.message(&format!(
            "Installing PeppyMeter remote client to {}",
            desired.install_dir.display()
        ));

        let mut probed = probe::probe(&desired);

        // Overwrite gate. Declining is a clean exit, not an error.
        if probed.install_dir_exists {
            if self.args.clean {
                let question = format!(
                    "Remove the existing installation at {} and reinstall?",
                    desired.install_dir.display()
                );
                if !ui.confirm(&question, false)? {
                    // Removal is destructive, so an unconfirmed `--clean`
                    // refuses with a non-zero exit instead of falling back
                    // to an in-place update.
                    ui.message("Removal not confirmed; nothing was deleted.");
                    return Ok(CommandResult::failure(1));
                }
                // Signature check happens inside the guard; a directory
                // that is not a managed installation refuses removal.
                guard::remove_installation(&desired.install_dir)?;
            } else {
                let question = format!(
                    "{} already exists. Update the existing installation?",
                    desired.install_dir.display()
                );
                if !ui.confirm(&question, true)? {
                    ui.message("Cancelled.");
                    return Ok(CommandResult::success());
                }
            }
            probed = probe::probe(&desired);
        }

        ensure_tools(&desired, &mut probed, ui)?;

        let actions = plan::plan(&desired, &probed);
        tracing::debug!("planned {} actions", actions.len());

        let executor = Executor::new(&probed);
        executor.execute(&actions, ui)?;

        ui.success(&format!(
            "PeppyMeter remote client installed at {}",
            desired.install_dir.display()
        ));
        if desired.server.is_none() {
            ui.message("No server was given; the client will auto-discover one at startup.");
        }

        Ok(CommandResult::success())
    }
}

/// Make sure the interpreter and the version-control tool are usable,
/// installing them through a system package manager if the operator
/// consents.
///
/// A package-manager install mutates the persisted environment, so the
/// flow refreshes PATH and re-probes afterwards; a tool still missing
/// then needs a fresh session and is a fatal [`SetupError::StaleEnvironment`].
fn ensure_tools(
    desired: &DesiredState,
    probed: &mut ProbedState,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let missing = missing_dependencies(probed);
    if missing.is_empty() {
        return Ok(());
    }

    let names: Vec<&str> = missing.iter().map(|d| d.tool_name()).collect();
    ui.warning(&format!("Missing required tools: {}", names.join(", ")));

    if !ui.confirm("Install them now via the system package manager?", true)? {
        print_manual_instructions(&missing, ui);
        return Err(SetupError::ConsentDeclined {
            message: "dependency installation refused".to_string(),
        });
    }

    let Some(pm) = SystemPackageManager::detect() else {
        print_manual_instructions(&missing, ui);
        return Err(SetupError::ToolUnavailable {
            tool: names.join(", "),
            message: "no supported package manager found".to_string(),
        });
    };

    for dep in &missing {
        let mut spinner = ui.start_spinner(&format!("Installing {}", dep.tool_name()));
        let args = pm.install_args(*dep);
        match run_required(pm.command(), &args, None) {
            Ok(_) => spinner.finish_success(&format!("Installed {}", dep.tool_name())),
            Err(e) => {
                spinner.finish_error(&format!("Installing {} failed", dep.tool_name()));
                return Err(e);
            }
        }
    }

    // The child installer's PATH changes are not visible here; rebuild
    // PATH from the persisted stores, then take a fresh snapshot.
    refresh_path()?;
    *probed = probe::probe(desired);

    verify_tools_present(probed)
}

/// Check the re-probed state after a package-manager install.
///
/// A tool that was just installed but is still invisible means the session
/// environment is stale beyond what a PATH refresh can repair; only a fresh
/// session will see it.
fn verify_tools_present(probed: &ProbedState) -> Result<()> {
    match missing_dependencies(probed).first() {
        Some(still_missing) => Err(SetupError::StaleEnvironment {
            tool: still_missing.tool_name().to_string(),
        }),
        None => Ok(()),
    }
}

fn missing_dependencies(probed: &ProbedState) -> Vec<Dependency> {
    let mut missing = Vec::new();
    if probed.interpreter.is_none() {
        missing.push(Dependency::Python);
    }
    if !probed.git_available {
        missing.push(Dependency::Git);
    }
    missing
}

fn print_manual_instructions(missing: &[Dependency], ui: &mut dyn UserInterface) {
    ui.message("Install the missing tools manually, then re-run the installer:");
    for dep in missing {
        ui.message(&format!("  {}: {}", dep.tool_name(), dep.manual_url()));
    }
}
