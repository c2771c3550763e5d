//! `git` invocations used by the patch runner.
//!
//! Each function builds one `git` command line and hands it to a
//! [`CommandExecutor`]. They assume the working directory is already the
//! target repository.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use crate::executor::{CommandExecutor, CommandOutcome, OutputMode};

const GIT: &str = "git";

fn to_args<I, S>(items: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().to_os_string())
        .collect()
}

/// `git apply --check <patch>`: would the patch apply cleanly?
pub fn check_args(patch: &Path) -> Vec<OsString> {
    to_args([OsStr::new("apply"), OsStr::new("--check"), patch.as_os_str()])
}

/// `git am <patch>`: apply the patch as a commit carrying its own metadata.
pub fn apply_args(patch: &Path) -> Vec<OsString> {
    to_args([OsStr::new("am"), patch.as_os_str()])
}

/// `git am --abort`: drop a half-finished `git am` session.
pub fn abort_apply_args() -> Vec<OsString> {
    to_args(["am", "--abort"])
}

/// `git show HEAD~<index>`
pub fn show_args(index: usize) -> Vec<OsString> {
    to_args(["show".to_string(), format!("HEAD~{}", index)])
}

/// `git log -n <count> [--oneline]`
pub fn log_args(count: usize, oneline: bool) -> Vec<OsString> {
    let mut args = to_args(["log".to_string(), "-n".to_string(), count.to_string()]);
    if oneline {
        args.push("--oneline".into());
    }
    args
}

/// `git reset --hard HEAD~<count>`: drop the last `count` commits.
pub fn reset_args(count: usize) -> Vec<OsString> {
    to_args(["reset".to_string(), "--hard".to_string(), format!("HEAD~{}", count)])
}

pub fn check_patch(executor: &dyn CommandExecutor, patch: &Path) -> CommandOutcome {
    executor.execute(GIT, &check_args(patch), OutputMode::Captured)
}

pub fn apply_patch(executor: &dyn CommandExecutor, patch: &Path) -> CommandOutcome {
    executor.execute(GIT, &apply_args(patch), OutputMode::Captured)
}

pub fn abort_apply(executor: &dyn CommandExecutor) -> CommandOutcome {
    executor.execute(GIT, &abort_apply_args(), OutputMode::Captured)
}

pub fn show_commit(executor: &dyn CommandExecutor, index: usize) -> CommandOutcome {
    executor.execute(GIT, &show_args(index), OutputMode::Inherited)
}

pub fn log_history(executor: &dyn CommandExecutor, count: usize, oneline: bool) -> CommandOutcome {
    executor.execute(GIT, &log_args(count, oneline), OutputMode::Inherited)
}

pub fn reset_history(executor: &dyn CommandExecutor, count: usize) -> CommandOutcome {
    executor.execute(GIT, &reset_args(count), OutputMode::Captured)
}
