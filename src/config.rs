//! # Patch Configuration
//!
//! This module defines the JSON configuration that drives a run and the
//! resolution step that turns it into a [`RunConfiguration`] with absolute
//! root directories.
//!
//! ## Format
//!
//! ```json
//! {
//!   "target_root": "repos",
//!   "patch_root": "patches",
//!   "patch_list": [
//!     { "target": "svc-a", "patch": ["svc-a/0001.patch", "svc-a/0002.patch"] },
//!     { "target": "svc-b", "patch": ["svc-b/0001.patch"] }
//!   ]
//! }
//! ```
//!
//! Every key is optional. A missing root resolves to the invocation directory
//! and a missing `patch_list` describes a run with no entries.
//!
//! ## Root Resolution
//!
//! Each root is chosen by precedence: an explicit override (command line or
//! environment), then the value from the file, then the empty path. The
//! chosen value is joined onto the directory mrpatch was invoked from, so
//! relative roots keep working after the process enters a repository.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// One repository and the ordered patches destined for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PatchEntry {
    /// Repository path, relative to the target root.
    #[serde(default)]
    pub target: String,

    /// Patch files in application order, relative to the patch root.
    #[serde(default, rename = "patch")]
    pub patches: Vec<String>,
}

impl PatchEntry {
    /// Create an entry for `target` with the given patches.
    pub fn new<S: Into<String>>(target: S, patches: Vec<String>) -> Self {
        Self {
            target: target.into(),
            patches,
        }
    }
}

/// The configuration file as written on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Base directory for every entry's `target`.
    pub target_root: String,

    /// Base directory for every patch path.
    pub patch_root: String,

    /// Entries in the order they are processed.
    pub patch_list: Vec<PatchEntry>,
}

/// Root directories supplied outside the configuration file.
#[derive(Debug, Clone, Default)]
pub struct RootOverrides {
    pub target_root: Option<PathBuf>,
    pub patch_root: Option<PathBuf>,
}

/// A fully resolved, read-only description of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    pub target_root: PathBuf,
    pub patch_root: PathBuf,
    pub entries: Vec<PatchEntry>,
}

impl PatchConfig {
    /// Resolve roots against `overrides` and `invocation_dir`.
    pub fn resolve(self, overrides: &RootOverrides, invocation_dir: &Path) -> RunConfiguration {
        RunConfiguration {
            target_root: resolve_root(
                overrides.target_root.as_deref(),
                &self.target_root,
                invocation_dir,
            ),
            patch_root: resolve_root(
                overrides.patch_root.as_deref(),
                &self.patch_root,
                invocation_dir,
            ),
            entries: self.patch_list,
        }
    }
}

fn resolve_root(overridden: Option<&Path>, configured: &str, invocation_dir: &Path) -> PathBuf {
    let root = overridden
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(configured));

    if root.as_os_str().is_empty() {
        invocation_dir.to_path_buf()
    } else {
        // `join` keeps absolute roots as they are
        invocation_dir.join(root)
    }
}

/// Parse a JSON configuration string.
///
/// The document and every `patch_list` element must be JSON objects. The
/// derived deserializers would otherwise also take positional arrays.
pub fn parse(json_content: &str) -> Result<PatchConfig> {
    let value: Value = serde_json::from_str(json_content)?;
    expect_object(&value, "configuration")?;
    if let Some(Value::Array(entries)) = value.get("patch_list") {
        for (index, entry) in entries.iter().enumerate() {
            expect_object(entry, &format!("patch_list[{}]", index))?;
        }
    }
    Ok(serde_json::from_value(value)?)
}

fn expect_object(value: &Value, what: &str) -> Result<()> {
    if value.is_object() {
        Ok(())
    } else {
        Err(Error::Json(serde::de::Error::custom(format!(
            "{} must be a JSON object",
            what
        ))))
    }
}

/// Load and parse a configuration file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<PatchConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::ConfigNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })?;

    parse(&content).map_err(|e| match e {
        Error::Json(e) => Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
        other => other,
    })
}
