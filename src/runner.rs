//! # Patch-Set Runner
//!
//! Runs the selected [`OperationMode`] against a single [`PatchEntry`].
//!
//! ## Steps
//!
//! 1. Resolve the repository directory (`target_root/entry.target`) and print
//!    it as the current target.
//! 2. Enter that directory for the duration of the entry.
//! 3. With `--reset`, or in `reset` mode, rewind `HEAD` by the entry's patch
//!    count. A failed reset fails the entry and skips step 4, since applying
//!    on top of a repository that was not rewound would only produce
//!    misleading conflicts.
//! 4. Run the mode:
//!    - `check`, `apply` and `show` walk the patches in order;
//!    - `log` lists `patches + 1` commits, the extra one being the baseline
//!      the patches were built against;
//!    - `forall` runs its command once and ignores the patch list;
//!    - `reset` has nothing left to do after step 3.
//!
//! The entry succeeds only if every operation it ran succeeded. Under
//! [`FailurePolicy::StopEntry`] a failed `git am` ends the entry's patch loop;
//! `check` and `show` failures are recorded but never stop the loop.
//!
//! A failed `git am` is always followed by `git am --abort`, so the
//! repository is left at the last patch that applied and later `git am` runs
//! are not refused because of a leftover session.

use std::path::Path;

use log::{debug, warn};

use crate::config::PatchEntry;
use crate::executor::{shell_command, CommandExecutor, CommandOutcome, OutputMode};
use crate::git;
use crate::mode::{FailurePolicy, OperationMode, RunOptions};
use crate::output::Reporter;
use crate::workdir::with_directory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatchStep {
    Check,
    Apply,
    Show,
}

/// Applies one mode to one entry.
pub struct PatchSetRunner<'a> {
    executor: &'a dyn CommandExecutor,
    reporter: &'a Reporter,
    options: RunOptions,
}

impl<'a> PatchSetRunner<'a> {
    pub fn new(
        executor: &'a dyn CommandExecutor,
        reporter: &'a Reporter,
        options: RunOptions,
    ) -> Self {
        Self {
            executor,
            reporter,
            options,
        }
    }

    /// Run `mode` for `entry` and return whether everything succeeded.
    pub fn run(
        &self,
        target_root: &Path,
        patch_root: &Path,
        entry: &PatchEntry,
        mode: &OperationMode,
    ) -> bool {
        let target_dir = target_root.join(&entry.target);
        self.reporter.target(&target_dir);

        match with_directory(&target_dir, || self.run_in_repository(patch_root, entry, mode)) {
            Ok(succeeded) => succeeded,
            Err(e) => {
                warn!("skipping {}: {}", target_dir.display(), e);
                self.reporter.outcome(&CommandOutcome::failure(e.to_string()))
            }
        }
    }

    fn run_in_repository(
        &self,
        patch_root: &Path,
        entry: &PatchEntry,
        mode: &OperationMode,
    ) -> bool {
        let rewind = self.options.reset || *mode == OperationMode::Reset;
        if rewind && !self.reset(entry) {
            warn!("reset failed for {:?}, not running {}", entry.target, mode);
            return false;
        }

        match mode {
            OperationMode::Check => self.run_patches(patch_root, entry, PatchStep::Check),
            OperationMode::Apply => self.run_patches(patch_root, entry, PatchStep::Apply),
            OperationMode::Show => self.run_patches(patch_root, entry, PatchStep::Show),
            OperationMode::Log { oneline } => {
                let outcome = git::log_history(self.executor, entry.patches.len() + 1, *oneline);
                self.reporter.outcome(&outcome)
            }
            OperationMode::Forall { command } => {
                let (program, args) = shell_command(command);
                let outcome = self.executor.execute(&program, &args, OutputMode::Inherited);
                self.reporter.outcome(&outcome)
            }
            OperationMode::Reset => true,
        }
    }

    fn reset(&self, entry: &PatchEntry) -> bool {
        let count = entry.patches.len();
        self.reporter.operation(&format!("RESET: HEAD~{}", count));
        self.reporter.outcome(&git::reset_history(self.executor, count))
    }

    fn abort_apply(&self) {
        let outcome = git::abort_apply(self.executor);
        if !outcome.succeeded {
            debug!(
                "git am --abort: {}",
                outcome.diagnostic.as_deref().unwrap_or("failed")
            );
        }
    }

    fn run_patches(&self, patch_root: &Path, entry: &PatchEntry, step: PatchStep) -> bool {
        let mut all_ok = true;

        for (index, patch) in entry.patches.iter().enumerate() {
            self.reporter.patch_separator();
            let patch_path = patch_root.join(patch);
            self.reporter.patch(&patch_path);

            let outcome = match step {
                PatchStep::Check => git::check_patch(self.executor, &patch_path),
                PatchStep::Apply => git::apply_patch(self.executor, &patch_path),
                PatchStep::Show => git::show_commit(self.executor, index),
            };
            let succeeded = self.reporter.outcome(&outcome);
            all_ok &= succeeded;

            if !succeeded && step == PatchStep::Apply {
                self.abort_apply();

                if self.options.failure_policy == FailurePolicy::StopEntry {
                    let remaining = entry.patches.len() - index - 1;
                    if remaining > 0 {
                        warn!(
                            "{} did not apply, skipping {} remaining patch(es)",
                            patch_path.display(),
                            remaining
                        );
                        self.reporter.skipped(remaining);
                    }
                    break;
                }
            }
        }

        debug!("entry {:?} finished, ok = {}", entry.target, all_ok);
        all_ok
    }
}
