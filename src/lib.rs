//! peppy-setup - idempotent provisioning for the PeppyMeter remote client.
//!
//! The installer reconciles a machine's current state with a fixed desired
//! state: a compatible Python interpreter and git present, the client
//! repositories cloned or updated, assets downloaded, a virtual environment
//! populated, launchers and configuration written. The reverse flow removes
//! a prior installation, gated on proof that the target directory is one.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface, argument parsing and dispatch
//! - [`recipe`] - The fixed desired state: paths, URLs, package lists
//! - [`probe`] - Machine state observation (tools, directories, runtimes)
//! - [`plan`] - Pure reconciliation planning: probed state in, actions out
//! - [`exec`] - Action execution
//! - [`fetch`] - HTTP downloads and git clone-or-update
//! - [`shell`] - External tool invocation and environment refresh
//! - [`patch`] - Idempotent text patching of downloaded handlers
//! - [`native`] - Architecture-matched native runtime acquisition
//! - [`launcher`] - Generated entry-point scripts
//! - [`client_config`] - Generated client configuration file
//! - [`shortcut`] - Launchable shortcut capability
//! - [`guard`] - Destructive-operation safety guard and uninstaller
//! - [`ui`] - Prompts, spinners and terminal output
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use peppy_setup::plan::{plan, Action};
//! use peppy_setup::probe::{Interpreter, ProbedState};
//! use peppy_setup::recipe::DesiredState;
//!
//! let desired = DesiredState {
//!     install_dir: "/opt/peppy".into(),
//!     server: None,
//!     wants_native_runtime: false,
//! };
//! let probed = ProbedState {
//!     interpreter: Some(Interpreter { command: "python3".into(), major: 3, minor: 11 }),
//!     git_available: true,
//!     install_dir_exists: false,
//!     venv_exists: false,
//!     repo_exists: vec![false, false],
//!     native_runtime_ok: false,
//!     is_64bit: true,
//! };
//!
//! let actions = plan(&desired, &probed);
//! assert!(actions.iter().any(|a| matches!(a, Action::CloneRepo { .. })));
//! ```

pub mod cli;
pub mod client_config;
pub mod error;
pub mod exec;
pub mod fetch;
pub mod guard;
pub mod launcher;
pub mod native;
pub mod patch;
pub mod plan;
pub mod probe;
pub mod recipe;
pub mod shell;
pub mod shortcut;
pub mod ui;

pub use error::{Result, SetupError};
