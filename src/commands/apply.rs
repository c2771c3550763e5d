//! Apply command implementation
//!
//! Applies every entry's patches in order with `git am`, so each patch lands
//! as a commit carrying its own author and message. With `--check` nothing is
//! applied and the command behaves like `mrpatch <FILE> check`.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use multi_repo_patch::mode::OperationMode;

use super::RunContext;

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Only check whether the patches would apply
    #[arg(short, long)]
    pub check: bool,
}

impl ApplyArgs {
    fn mode(&self) -> OperationMode {
        if self.check {
            OperationMode::Check
        } else {
            OperationMode::Apply
        }
    }
}

/// Execute the apply command
pub fn execute(context: &RunContext, args: ApplyArgs) -> Result<ExitCode> {
    super::run(context, args.mode())
}
