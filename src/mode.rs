//! What a run does to each repository.

use std::fmt;

/// The primary operation performed for every entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationMode {
    /// Dry-run `git apply --check` of every patch.
    Check,
    /// `git am` every patch in order.
    Apply,
    /// Show the commit sitting at each patch's position below `HEAD`.
    Show,
    /// Show the last `patches + 1` commits.
    Log { oneline: bool },
    /// Run one shell command per entry, ignoring the patch list.
    Forall { command: String },
    /// Only rewind `HEAD` by the entry's patch count.
    Reset,
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check => write!(f, "check"),
            Self::Apply => write!(f, "apply"),
            Self::Show => write!(f, "show"),
            Self::Log { oneline: false } => write!(f, "log"),
            Self::Log { oneline: true } => write!(f, "log --oneline"),
            Self::Forall { command } => write!(f, "forall `{}`", command),
            Self::Reset => write!(f, "reset"),
        }
    }
}

/// What happens to an entry's remaining patches after `git am` fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Skip the rest of this entry and move on to the next one.
    #[default]
    StopEntry,
    /// Record the failure and keep applying.
    Continue,
}

/// Modifiers that apply on top of the [`OperationMode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Rewind each repository by its patch count before the mode runs.
    pub reset: bool,
    pub failure_policy: FailurePolicy,
}
