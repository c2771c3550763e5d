//! # Command Execution
//!
//! Every external program mrpatch runs goes through the [`CommandExecutor`]
//! trait. The executor runs the program in the *current* working directory
//! (see [`crate::workdir`] for how that is scoped) and turns whatever happens
//! into a [`CommandOutcome`]: a non-zero exit status or a failure to spawn is
//! a value, never an error that unwinds past this boundary.
//!
//! Two output modes exist:
//!
//! - [`OutputMode::Captured`]: stdout and stderr are both collected. Used for
//!   commands whose output is only interesting on failure (`git apply --check`,
//!   `git am`, `git reset`).
//! - [`OutputMode::Inherited`]: stdout goes straight to the terminal while
//!   stderr is still collected for the failure diagnostic. Used for commands
//!   whose output is meant to be read (`git show`, `git log`, `forall`).
//!
//! The executor never prints. Presenting outcomes is the job of
//! [`crate::output::Reporter`].

use std::ffi::OsString;
use std::process::{Command, Stdio};

use log::debug;

/// How a child process's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Captured,
    Inherited,
}

/// The reified result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    pub succeeded: bool,
    /// Captured stdout. Absent for inherited output and for failures.
    pub output: Option<String>,
    /// What went wrong, when something did.
    pub diagnostic: Option<String>,
}

impl CommandOutcome {
    pub fn success(output: Option<String>) -> Self {
        Self {
            succeeded: true,
            output,
            diagnostic: None,
        }
    }

    pub fn failure<S: Into<String>>(diagnostic: S) -> Self {
        Self {
            succeeded: false,
            output: None,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// Runs external programs on behalf of the patch runner.
///
/// The production implementation is [`SystemExecutor`]; tests substitute a
/// recording double so that no real `git` is needed.
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args` in the current working directory.
    ///
    /// Arguments are OS strings so that paths reach the child unchanged.
    fn execute(&self, program: &str, args: &[OsString], mode: OutputMode) -> CommandOutcome;
}

/// Executes commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(&self, program: &str, args: &[OsString], mode: OutputMode) -> CommandOutcome {
        debug!("running `{}`", render_command(program, args));

        let mut command = Command::new(program);
        command.args(args).stderr(Stdio::piped());
        if mode == OutputMode::Inherited {
            command.stdin(Stdio::inherit()).stdout(Stdio::inherit());
        }

        let output = match command.output() {
            Ok(output) => output,
            Err(e) => return CommandOutcome::failure(format!("failed to run {}: {}", program, e)),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return CommandOutcome::success(match mode {
                OutputMode::Captured => Some(stdout),
                OutputMode::Inherited => None,
            });
        }

        // git am reports the failing hunk on stdout and the reason on stderr
        let stderr = String::from_utf8_lossy(&output.stderr);
        let diagnostic = [stderr.trim(), stdout.trim()]
            .into_iter()
            .find(|text| !text.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} exited with {}", program, output.status));

        CommandOutcome::failure(diagnostic)
    }
}

/// Program and arguments that run `command_line` through the platform shell.
pub fn shell_command(command_line: &str) -> (String, Vec<OsString>) {
    let (shell, flag) = if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") };
    (shell.to_string(), vec![flag.into(), command_line.into()])
}

/// Human-readable command line, for logs. Non-UTF-8 arguments are shown
/// lossily.
pub fn render_command(program: &str, args: &[OsString]) -> String {
    std::iter::once(program.to_string())
        .chain(args.iter().map(|arg| arg.to_string_lossy().into_owned()))
        .collect::<Vec<_>>()
        .join(" ")
}
