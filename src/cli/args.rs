//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct. Running without a
//! subcommand behaves like `install`, so the short form
//! `peppy-setup --server volumio` works.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// peppy-setup - provision the PeppyMeter remote client.
#[derive(Debug, Parser)]
#[command(name = "peppy-setup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub install: InstallArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install or update the client (default if no command specified)
    Install(InstallArgs),

    /// Remove a managed installation
    Uninstall(UninstallArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Server host to pre-fill in the client config (default: auto-discover)
    #[arg(short, long)]
    pub server: Option<String>,

    /// Install directory (default: ~/peppy_remote)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Remove an existing installation first instead of updating in place
    #[arg(long)]
    pub clean: bool,

    /// Answer yes to every consent prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the `uninstall` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UninstallArgs {
    /// Install directory (default: ~/peppy_remote)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Answer yes to every consent prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}
