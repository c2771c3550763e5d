//! # CLI Command Implementations
//!
//! Each operation mode of the `mrpatch` command-line tool is a subcommand
//! defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that turns those arguments into an
//!   [`OperationMode`] and hands it to [`run`].
//!
//! [`run`] is shared: it loads the configuration, resolves the roots, drives
//! the orchestrator and converts the verdict into the process exit status.

pub mod apply;
pub mod check;
pub mod forall;
pub mod log;
pub mod show;

use std::path::PathBuf;
use std::process::ExitCode;

use ::log::info;
use anyhow::{Context, Result};

use multi_repo_patch::config::{self, RootOverrides};
use multi_repo_patch::executor::SystemExecutor;
use multi_repo_patch::mode::{OperationMode, RunOptions};
use multi_repo_patch::orchestrator::Orchestrator;
use multi_repo_patch::output::{OutputConfig, Reporter};

/// Everything a subcommand needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config_path: PathBuf,
    pub overrides: RootOverrides,
    pub options: RunOptions,
    pub output: OutputConfig,
}

/// Run `mode` and map the verdict to the process exit status.
pub fn run(context: &RunContext, mode: OperationMode) -> Result<ExitCode> {
    Ok(if run_entries(context, &mode)? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Load the configuration and run `mode` against every entry.
fn run_entries(context: &RunContext, mode: &OperationMode) -> Result<bool> {
    let invocation_dir =
        std::env::current_dir().context("Failed to determine the current directory")?;

    let patch_config = config::from_file(&context.config_path)?;
    let run_config = patch_config.resolve(&context.overrides, &invocation_dir);
    info!(
        "loaded {} entries from {}",
        run_config.entries.len(),
        context.config_path.display()
    );

    let reporter = Reporter::new(context.output.clone());
    let orchestrator = Orchestrator::new(&SystemExecutor, &reporter, context.options);
    Ok(orchestrator.run_all(&run_config, mode))
}
