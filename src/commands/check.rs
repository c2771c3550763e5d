//! Check command implementation
//!
//! Runs `git apply --check` for every patch. The repositories are never
//! modified, so the command can be repeated freely.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use multi_repo_patch::mode::OperationMode;

use super::RunContext;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {}

/// Execute the check command
pub fn execute(context: &RunContext, _args: CheckArgs) -> Result<ExitCode> {
    super::run(context, OperationMode::Check)
}
