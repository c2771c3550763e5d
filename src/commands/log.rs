//! Log command implementation
//!
//! Lists `patches + 1` commits per repository: the patched commits plus the
//! baseline they were applied on.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use multi_repo_patch::mode::OperationMode;

use super::RunContext;

/// Arguments for the log command
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Show the log in one-line format
    #[arg(short, long)]
    pub oneline: bool,
}

/// Execute the log command
pub fn execute(context: &RunContext, args: LogArgs) -> Result<ExitCode> {
    super::run(
        context,
        OperationMode::Log {
            oneline: args.oneline,
        },
    )
}
