//! Scoped working-directory changes.
//!
//! `git` addresses a repository through the process working directory, so
//! every per-repository operation runs inside a [`DirectoryGuard`]. The guard
//! restores the previous directory when dropped, whether the body returned
//! normally, bailed out early, or panicked.

use std::env;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};

/// Holds the process inside a directory until dropped.
#[derive(Debug)]
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
pub struct DirectoryGuard {
    original: PathBuf,
}

impl DirectoryGuard {
    /// Change into `path`, remembering where we came from.
    pub fn enter(path: &Path) -> Result<Self> {
        let original = env::current_dir()?;
        env::set_current_dir(path).map_err(|e| Error::WorkingDirectory {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("entered {}", path.display());
        Ok(Self { original })
    }
}

impl Drop for DirectoryGuard {
    fn drop(&mut self) {
        match env::set_current_dir(&self.original) {
            Ok(()) => debug!("returned to {}", self.original.display()),
            Err(e) => warn!(
                "could not return to {}: {}",
                self.original.display(),
                e
            ),
        }
    }
}

/// Run `body` with `path` as the working directory.
pub fn with_directory<T, F>(path: &Path, body: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    let _guard = DirectoryGuard::enter(path)?;
    Ok(body())
}
