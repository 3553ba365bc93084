//! External tool invocation.
//!
//! Every external collaborator (package manager, git, the Python
//! interpreter) is run as a blocking child process through this module.
//! A non-zero exit is reported through [`CommandResult`], not as an error;
//! callers decide whether a failure is fatal.

use crate::error::{Result, SetupError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing an external tool.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the tool succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for tool execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

/// Render a program and its arguments for error messages.
pub fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Run an external tool and wait for it to finish.
///
/// Spawn failure (tool not on PATH) is an error; a non-zero exit is a
/// normal [`CommandResult`] with `success == false`.
pub fn run(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    cmd.stdin(Stdio::null());

    let output = cmd.output().map_err(|_| SetupError::CommandFailed {
        command: display_command(program, args),
        code: None,
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Run a tool and return only whether it exited successfully.
///
/// Used for presence probes (`git --version`); a spawn failure counts
/// as "not available", never as an error.
pub fn run_check(program: &str, args: &[&str]) -> bool {
    let options = CommandOptions {
        capture_stdout: true,
        capture_stderr: true,
        ..Default::default()
    };

    run(program, args, &options).map(|r| r.success).unwrap_or(false)
}

/// Run a tool with all output captured.
pub fn run_quiet(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CommandResult> {
    let options = CommandOptions {
        cwd: cwd.map(|p| p.to_path_buf()),
        capture_stdout: true,
        capture_stderr: true,
        ..Default::default()
    };
    run(program, args, &options)
}

/// Run a tool, capturing output, and escalate a non-zero exit to an error.
///
/// The captured stderr is surfaced in the error message so that suppressed
/// tool output is still visible on failure.
pub fn run_required(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CommandResult> {
    let result = run_quiet(program, args, cwd)?;
    if result.success {
        Ok(result)
    } else {
        let mut command = display_command(program, args);
        let detail = if result.stderr.trim().is_empty() {
            result.stdout.trim()
        } else {
            result.stderr.trim()
        };
        if !detail.is_empty() {
            command = format!("{command}: {detail}");
        }
        Err(SetupError::CommandFailed {
            command,
            code: result.exit_code,
        })
    }
}
