//! # Orchestrator
//!
//! Walks every entry of a [`RunConfiguration`] in declaration order and folds
//! the per-entry results into one verdict.
//!
//! Entries are always all attempted: a repository that fails does not stop
//! the others from being checked, patched or listed, so one run gives a view
//! of the whole fleet. Order still matters because entries may share a
//! directory tree and build on each other's patches.

use log::info;

use crate::config::RunConfiguration;
use crate::executor::CommandExecutor;
use crate::mode::{OperationMode, RunOptions};
use crate::output::Reporter;
use crate::runner::PatchSetRunner;

pub struct Orchestrator<'a> {
    executor: &'a dyn CommandExecutor,
    reporter: &'a Reporter,
    options: RunOptions,
}

impl<'a> Orchestrator<'a> {
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

    /// Run `mode` across every entry and print the final `RESULT:` line.
    ///
    /// Returns `true` only if every operation of every entry succeeded.
    pub fn run_all(&self, config: &RunConfiguration, mode: &OperationMode) -> bool {
        info!(
            "running {} on {} entries (targets under {}, patches under {})",
            mode,
            config.entries.len(),
            config.target_root.display(),
            config.patch_root.display()
        );

        let runner = PatchSetRunner::new(self.executor, self.reporter, self.options);
        let mut all_ok = true;
        let mut failed = 0;

        for entry in &config.entries {
            self.reporter.entry_separator();
            let succeeded = runner.run(&config.target_root, &config.patch_root, entry, mode);
            if !succeeded {
                failed += 1;
            }
            all_ok &= succeeded;
        }

        info!("{} of {} entries failed", failed, config.entries.len());
        self.reporter.summary(all_ok);
        all_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatchEntry;
    use crate::executor::mock::RecordingExecutor;
    use crate::output::OutputConfig;
    use proptest::prelude::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn reporter() -> Reporter {
        Reporter::new(OutputConfig::without_color())
    }

    fn patches(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn configuration(root: &std::path::Path, entries: Vec<PatchEntry>) -> RunConfiguration {
        RunConfiguration {
            target_root: root.to_path_buf(),
            patch_root: root.join("patches"),
            entries,
        }
    }

    #[test]
    #[serial]
    fn test_no_entries_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let executor = RecordingExecutor::new();
        let reporter = reporter();
        let orchestrator = Orchestrator::new(&executor, &reporter, RunOptions::default());

        let config = configuration(temp_dir.path(), Vec::new());
        assert!(orchestrator.run_all(&config, &OperationMode::Apply));
        assert!(executor.calls().is_empty());
    }

    #[test]
    #[serial]
    fn test_failing_entry_does_not_stop_later_entries() {
        let temp_dir = TempDir::new().unwrap();
        for repo in ["svc-a", "svc-b", "svc-c"] {
            fs::create_dir(temp_dir.path().join(repo)).unwrap();
        }
        let executor = RecordingExecutor::new().failing_on("a-0001");
        let reporter = reporter();
        let orchestrator = Orchestrator::new(&executor, &reporter, RunOptions::default());
        let config = configuration(
            temp_dir.path(),
            vec![
                PatchEntry::new("svc-a", patches(&["a-0001.patch", "a-0002.patch"])),
                PatchEntry::new("svc-b", patches(&["b-0001.patch"])),
                PatchEntry::new("svc-c", patches(&["c-0001.patch"])),
            ],
        );

        let ok = orchestrator.run_all(&config, &OperationMode::Apply);

        assert!(!ok);
        let lines = executor.command_lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("a-0001.patch"));
        assert_eq!(lines[1], "git am --abort");
        assert!(lines[2].ends_with("b-0001.patch"));
        assert!(lines[3].ends_with("c-0001.patch"));
    }

    #[test]
    #[serial]
    fn test_missing_repository_is_reported_and_skipped() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("svc-b")).unwrap();
        let executor = RecordingExecutor::new();
        let reporter = reporter();
        let orchestrator = Orchestrator::new(&executor, &reporter, RunOptions::default());
        let config = configuration(
            temp_dir.path(),
            vec![
                PatchEntry::new("svc-a", patches(&["0001.patch"])),
                PatchEntry::new("svc-b", patches(&["0001.patch"])),
            ],
        );
        let before = std::env::current_dir().unwrap();

        let ok = orchestrator.run_all(&config, &OperationMode::Check);

        assert!(!ok);
        let calls = executor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            fs::canonicalize(&calls[0].cwd).unwrap(),
            fs::canonicalize(temp_dir.path().join("svc-b")).unwrap()
        );
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_scenario_second_patch_fails() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("svc-a")).unwrap();
        let executor = RecordingExecutor::new().failing_on("0002.patch");
        let reporter = reporter();
        let orchestrator = Orchestrator::new(&executor, &reporter, RunOptions::default());
        let config = configuration(
            temp_dir.path(),
            vec![PatchEntry::new("svc-a", patches(&["0001.patch", "0002.patch"]))],
        );

        assert!(!orchestrator.run_all(&config, &OperationMode::Apply));
        assert_eq!(executor.calls().len(), 3);
    }

    fn entries_strategy() -> impl Strategy<Value = Vec<Vec<bool>>> {
        prop::collection::vec(prop::collection::vec(any::<bool>(), 0..5), 0..5)
    }

    /// One entry per outcome list, every entry targeting the root itself.
    fn entries_for(outcomes: &[Vec<bool>]) -> Vec<PatchEntry> {
        outcomes
            .iter()
            .map(|entry| {
                let names = (0..entry.len()).map(|i| format!("{:04}.patch", i + 1)).collect();
                PatchEntry::new("", names)
            })
            .collect()
    }

    #[test]
    #[serial]
    fn test_result_is_conjunction_of_all_outcomes() {
        proptest!(ProptestConfig::with_cases(64), |(outcomes in entries_strategy())| {
            let temp_dir = TempDir::new().unwrap();
            let script = outcomes.iter().flatten().copied().collect();
            let executor = RecordingExecutor::scripted(script);
            let reporter = reporter();
            let config = configuration(temp_dir.path(), entries_for(&outcomes));

            let ok = Orchestrator::new(&executor, &reporter, RunOptions::default())
                .run_all(&config, &OperationMode::Check);

            let expected = outcomes.iter().flatten().all(|o| *o);
            let total: usize = outcomes.iter().map(Vec::len).sum();
            prop_assert_eq!(ok, expected);
            prop_assert_eq!(executor.calls().len(), total);
        });
    }

    #[test]
    #[serial]
    fn test_apply_attempts_every_entry_up_to_its_first_failure() {
        proptest!(ProptestConfig::with_cases(64), |(outcomes in entries_strategy())| {
            // Each entry consumes its outcomes up to and including the first
            // failure, which is followed by an `am --abort` call.
            let script: Vec<bool> = outcomes
                .iter()
                .flat_map(|entry| match entry.iter().position(|o| !*o) {
                    Some(first_failure) => {
                        let mut consumed = entry[..=first_failure].to_vec();
                        consumed.push(true);
                        consumed
                    }
                    None => entry.clone(),
                })
                .collect();
            let expected_calls = script.len();

            let temp_dir = TempDir::new().unwrap();
            let executor = RecordingExecutor::scripted(script);
            let reporter = reporter();
            let config = configuration(temp_dir.path(), entries_for(&outcomes));

            let ok = Orchestrator::new(&executor, &reporter, RunOptions::default())
                .run_all(&config, &OperationMode::Apply);

            prop_assert_eq!(ok, outcomes.iter().flatten().all(|o| *o));
            prop_assert_eq!(executor.calls().len(), expected_calls);
        });
    }
}
