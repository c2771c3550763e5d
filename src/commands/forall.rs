//! Forall command implementation
//!
//! Runs an arbitrary command once in every configured repository through the
//! platform shell (`sh -c` or `cmd /C`). Patch lists are ignored.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use multi_repo_patch::mode::OperationMode;

use super::RunContext;

/// Arguments for the forall command
#[derive(Args, Debug)]
pub struct ForallArgs {
    /// Command to run in every repository.
    ///
    /// Either quote the whole command or pass its words after `forall`;
    /// everything following `forall` belongs to the command.
    #[arg(
        value_name = "COMMAND",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl ForallArgs {
    fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

/// Execute the forall command
pub fn execute(context: &RunContext, args: ForallArgs) -> Result<ExitCode> {
    super::run(
        context,
        OperationMode::Forall {
            command: args.command_line(),
        },
    )
}
