//! # mrpatch
//!
//! This is the binary entry point for the `mrpatch` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and colour output.
//! - Executing the selected mode and turning the run verdict into an exit
//!   status.
//!
//! The core application logic is defined in the `lib.rs` library crate, ensuring
//! that the binary is a thin wrapper around the reusable library functionality.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse_args();
    cli.execute()
}
