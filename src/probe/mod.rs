//! Machine state probing.
//!
//! `probe()` is pure observation: it inspects the machine and reports
//! facts, never mutates anything, and never fails — an absent tool is a
//! valid, reportable fact. The probed snapshot goes stale the moment an
//! external action changes the machine, so callers re-probe explicitly
//! after any mutating step (notably after a package-manager install, whose
//! PATH changes are invisible to this process until refreshed).

pub mod package_manager;

pub use package_manager::{Dependency, SystemPackageManager};

use crate::recipe::{DesiredState, INTERPRETER_CANDIDATES, MIN_PYTHON, REPOSITORIES};
use crate::shell::{run_check, run_quiet};
use regex::Regex;
use std::path::{Path, PathBuf};

/// A usable Python interpreter.
#[derive(Debug, Clone)]
pub struct Interpreter {
    /// Command name to invoke (e.g. `python3`).
    pub command: String,
    pub major: u32,
    pub minor: u32,
}

impl Interpreter {
    /// Whether this interpreter satisfies the minimum version threshold.
    pub fn is_supported(&self) -> bool {
        (self.major, self.minor) >= MIN_PYTHON
    }
}

/// Snapshot of observed machine facts.
#[derive(Debug, Clone)]
pub struct ProbedState {
    /// First usable interpreter, if any.
    pub interpreter: Option<Interpreter>,

    /// Whether the version-control tool responds.
    pub git_available: bool,

    /// Whether the install root already exists.
    pub install_dir_exists: bool,

    /// Whether the virtual environment already exists.
    pub venv_exists: bool,

    /// Per-repository checkout existence, in recipe order.
    pub repo_exists: Vec<bool>,

    /// Whether the native rendering library loads in the interpreter.
    pub native_runtime_ok: bool,

    /// Process bit width.
    pub is_64bit: bool,
}

impl ProbedState {
    /// Whether a named repository checkout already exists.
    pub fn repo_checkout_exists(&self, name: &str) -> bool {
        REPOSITORIES
            .iter()
            .position(|(repo, _)| *repo == name)
            .and_then(|i| self.repo_exists.get(i).copied())
            .unwrap_or(false)
    }
}

/// Inspect the machine and report its current state.
pub fn probe(desired: &DesiredState) -> ProbedState {
    let interpreter = detect_interpreter();
    let native_runtime_ok = interpreter
        .as_ref()
        .map(|i| native_runtime_importable(&i.command))
        .unwrap_or(false);

    ProbedState {
        interpreter,
        git_available: detect_git(),
        install_dir_exists: desired.install_dir.exists(),
        venv_exists: venv_python(&desired.venv_dir()).exists(),
        repo_exists: REPOSITORIES
            .iter()
            .map(|(name, _)| desired.repo_dir(name).is_dir())
            .collect(),
        native_runtime_ok,
        is_64bit: cfg!(target_pointer_width = "64"),
    }
}

/// Interpreter executable inside a virtual environment.
pub fn venv_python(venv: &Path) -> PathBuf {
    if cfg!(target_os = "windows") {
        venv.join("Scripts").join("python.exe")
    } else {
        venv.join("bin").join("python")
    }
}

/// Try interpreter command candidates in order; accept the first whose
/// self-reported version meets the threshold.
fn detect_interpreter() -> Option<Interpreter> {
    for candidate in INTERPRETER_CANDIDATES {
        let Ok(result) = run_quiet(candidate, &["--version"], None) else {
            continue;
        };
        if !result.success {
            continue;
        }

        // Old interpreters print the version banner to stderr.
        let banner = if result.stdout.trim().is_empty() {
            result.stderr
        } else {
            result.stdout
        };

        if let Some((major, minor)) = parse_version(&banner) {
            let interpreter = Interpreter {
                command: candidate.to_string(),
                major,
                minor,
            };
            if interpreter.is_supported() {
                tracing::debug!("using interpreter {} ({}.{})", candidate, major, minor);
                return Some(interpreter);
            }
            tracing::debug!("{} is {}.{}, below threshold", candidate, major, minor);
        }
    }
    None
}

/// Extract major/minor from a `Python X.Y.Z` version banner.
fn parse_version(banner: &str) -> Option<(u32, u32)> {
    let re = Regex::new(r"Python (\d+)\.(\d+)").ok()?;
    let caps = re.captures(banner)?;
    let major = caps[1].parse().ok()?;
    let minor = caps[2].parse().ok()?;
    Some((major, minor))
}

/// Whether the version-control tool is invocable.
fn detect_git() -> bool {
    run_check("git", &["--version"])
}

/// Whether the native rendering library is loadable from the interpreter.
///
/// Probes via `ctypes.util.find_library`, which mirrors how the rendering
/// stack locates the library at runtime.
fn native_runtime_importable(interpreter: &str) -> bool {
    let script = "import ctypes.util, sys; \
                  sys.exit(0 if (ctypes.util.find_library('cairo') \
                  or ctypes.util.find_library('cairo-2')) else 1)";
    run_check(interpreter, &["-c", script])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_version_extracts_major_minor() {
        assert_eq!(parse_version("Python 3.11.4"), Some((3, 11)));
        assert_eq!(parse_version("Python 2.7.18\n"), Some((2, 7)));
        assert_eq!(parse_version("no version here"), None);
    }

    #[test]
    fn interpreter_threshold_check() {
        let old = Interpreter {
            command: "python".into(),
            major: 2,
            minor: 7,
        };
        assert!(!old.is_supported());

        let boundary = Interpreter {
            command: "python3".into(),
            major: MIN_PYTHON.0,
            minor: MIN_PYTHON.1,
        };
        assert!(boundary.is_supported());
    }

    #[test]
    fn venv_python_path_per_platform() {
        let path = venv_python(Path::new("/x/venv"));
        if cfg!(target_os = "windows") {
            assert!(path.ends_with("Scripts/python.exe"));
        } else {
            assert!(path.ends_with("bin/python"));
        }
    }

    #[test]
    fn probe_is_pure_observation() {
        let temp = tempfile::TempDir::new().unwrap();
        let target = temp.path().join("peppy");
        let desired = DesiredState::new(Some(target.clone()), None);

        let probed = probe(&desired);

        // Probing must not create anything.
        assert!(!target.exists());
        assert!(!probed.install_dir_exists);
        assert!(!probed.venv_exists);
        assert_eq!(probed.repo_exists.len(), REPOSITORIES.len());
        assert!(probed.repo_exists.iter().all(|e| !e));
    }

    #[test]
    fn probe_reports_existing_directories() {
        let temp = tempfile::TempDir::new().unwrap();
        let target = temp.path().join("peppy");
        let desired = DesiredState::new(Some(target.clone()), None);

        std::fs::create_dir_all(desired.repo_dir("peppymeter")).unwrap();

        let probed = probe(&desired);

        assert!(probed.install_dir_exists);
        assert!(probed.repo_checkout_exists("peppymeter"));
        assert!(!probed.repo_checkout_exists("spectrum"));
    }

    #[test]
    fn repo_checkout_exists_unknown_name_is_false() {
        let probed = ProbedState {
            interpreter: None,
            git_available: false,
            install_dir_exists: false,
            venv_exists: false,
            repo_exists: vec![true, true],
            native_runtime_ok: false,
            is_64bit: true,
        };
        assert!(!probed.repo_checkout_exists("unknown"));
    }

    #[test]
    fn default_desired_state_probe_does_not_panic() {
        let desired = DesiredState::new(Some(PathBuf::from("/nonexistent/peppy")), None);
        let _ = probe(&desired);
    }
}
