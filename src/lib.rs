//! # Multi-Repository Patch
//!
//! This library applies ordered patch sets to many independent git
//! repositories. A JSON configuration names, for each repository, the patches
//! that belong to it; one run performs the same operation against every
//! repository and reports a single OK/NG verdict.
//!
//! ## Quick Example
//!
//! ```
//! use multi_repo_patch::config::{self, RootOverrides};
//! use std::path::Path;
//!
//! let patch_config = config::parse(r#"
//! {
//!   "target_root": "repos",
//!   "patch_root": "patches",
//!   "patch_list": [ { "target": "svc-a", "patch": ["0001.patch", "0002.patch"] } ]
//! }
//! "#).unwrap();
//!
//! let run = patch_config.resolve(&RootOverrides::default(), Path::new("/work"));
//! assert_eq!(run.target_root, Path::new("/work/repos"));
//! assert_eq!(run.entries[0].patches.len(), 2);
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the on-disk JSON format and root
//!   resolution into a [`config::RunConfiguration`].
//! - **Modes (`mode`)**: what to do per repository (`check`, `apply`, `show`,
//!   `log`, `forall`) plus the `reset` and failure-policy modifiers.
//! - **Execution (`executor`, `git`)**: running external commands and
//!   reifying their exit status into [`executor::CommandOutcome`] values.
//! - **Working directory (`workdir`)**: entering a repository for the duration
//!   of an entry and always returning afterwards.
//! - **Runner and orchestrator (`runner`, `orchestrator`)**: the per-entry
//!   patch loop and the fleet-wide loop that aggregates results.
//! - **Output (`output`)**: colours, separators and the OK/NG lines.
//!
//! ## Execution Flow
//!
//! 1. The CLI loads the configuration and resolves target and patch roots.
//! 2. The orchestrator visits entries in declaration order.
//! 3. For each entry the runner enters the repository, optionally resets it,
//!    then runs the mode, stopping the entry at the first failed `git am`.
//! 4. Results are ANDed across all entries and printed as `RESULT: OK` or
//!    `RESULT: NG`; the process exit status follows.

pub mod config;
pub mod error;
pub mod executor;
pub mod git;
pub mod mode;
pub mod orchestrator;
pub mod output;
pub mod runner;
pub mod workdir;
