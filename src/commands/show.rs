//! Show command implementation
//!
//! For the patch at position `i` of an entry, shows `HEAD~i`. Right after an
//! apply this lists the applied patches newest first, one per position.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use multi_repo_patch::mode::OperationMode;

use super::RunContext;

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {}

/// Execute the show command
pub fn execute(context: &RunContext, _args: ShowArgs) -> Result<ExitCode> {
    super::run(context, OperationMode::Show)
}
