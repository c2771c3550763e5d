//! CLI argument parsing and command dispatch

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

use multi_repo_patch::config::RootOverrides;
use multi_repo_patch::mode::{FailurePolicy, OperationMode, RunOptions};
use multi_repo_patch::output::OutputConfig;

use crate::commands::{self, RunContext};

/// mrpatch - Apply patches to multiple git repositories
#[derive(Parser, Debug)]
#[command(name = "mrpatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON file containing the patch configuration
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Subcommand to execute; may be omitted with `--reset`
    #[command(subcommand)]
    command: Option<Commands>,

    /// Root path of the target repositories (overrides `target_root`)
    #[arg(
        long = "target",
        value_name = "DIR",
        env = "MRPATCH_TARGET_ROOT",
        global = true
    )]
    target_root: Option<PathBuf>,

    /// Root path of the patches (overrides `patch_root`)
    #[arg(
        long = "patch",
        value_name = "DIR",
        env = "MRPATCH_PATCH_ROOT",
        global = true
    )]
    patch_root: Option<PathBuf>,

    /// Rewind each repository by its patch count before running the command
    #[arg(long, global = true)]
    reset: bool,

    /// Keep applying an entry's remaining patches after one fails
    #[arg(long, global = true)]
    keep_going: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply patches using `git am`
    #[command(short_flag = 'a')]
    Apply(commands::apply::ApplyArgs),

    /// Check that patches apply cleanly without changing anything
    #[command(short_flag = 'c')]
    Check(commands::check::CheckArgs),

    /// Show the commits at each patch position below HEAD
    #[command(short_flag = 's')]
    Show(commands::show::ShowArgs),

    /// Display the git log covering each repository's patches
    #[command(short_flag = 'l')]
    Log(commands::log::LogArgs),

    /// Run a command in every repository
    Forall(commands::forall::ForallArgs),
}

impl Cli {
    /// Parse the process arguments, exiting with a usage error when they do
    /// not name a mode.
    pub fn parse_args() -> Self {
        Self::parse().validate().unwrap_or_else(|e| e.exit())
    }

    /// A run needs a subcommand unless `--reset` alone describes it.
    fn validate(self) -> std::result::Result<Self, clap::Error> {
        if self.command.is_none() && !self.reset {
            return Err(Self::command().error(
                ErrorKind::MissingSubcommand,
                "a command is required unless --reset is given",
            ));
        }
        Ok(self)
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        init_logging(&self.log_level);

        let context = RunContext {
            config_path: self.file,
            overrides: RootOverrides {
                target_root: self.target_root,
                patch_root: self.patch_root,
            },
            options: RunOptions {
                reset: self.reset,
                failure_policy: if self.keep_going {
                    FailurePolicy::Continue
                } else {
                    FailurePolicy::StopEntry
                },
            },
            output: OutputConfig::from_env_and_flag(&self.color),
        };

        match self.command {
            Some(Commands::Apply(args)) => commands::apply::execute(&context, args),
            Some(Commands::Check(args)) => commands::check::execute(&context, args),
            Some(Commands::Show(args)) => commands::show::execute(&context, args),
            Some(Commands::Log(args)) => commands::log::execute(&context, args),
            Some(Commands::Forall(args)) => commands::forall::execute(&context, args),
            None => commands::run(&context, OperationMode::Reset),
        }
    }
}

/// `RUST_LOG` wins over `--log-level` when both are given.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under tests
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
