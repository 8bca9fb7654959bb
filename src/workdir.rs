//! Working-directory discovery.
//!
//! The generator writes relative to the directory it is run from and uses the last
//! segment of that directory as the root package name embedded in templates.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ScaffoldError;

/// Absolute project directory plus its root package name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDirectory {
    path: PathBuf,
    root_package: String,
}

impl WorkingDirectory {
    /// Resolve the process's current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::DirectoryLookupFailed`] when the current directory is
    /// unavailable or has no usable last segment.
    pub fn discover() -> Result<Self, ScaffoldError> {
        let cwd = env::current_dir().map_err(|e| ScaffoldError::DirectoryLookupFailed {
            reason: e.to_string(),
        })?;
        Self::at(&cwd)
    }

    /// Resolve `dir` (made absolute and canonical) as the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::DirectoryLookupFailed`] when `dir` does not exist, is
    /// not a directory, or is the filesystem root.
    pub fn at(dir: &Path) -> Result<Self, ScaffoldError> {
        let path = fs::canonicalize(dir).map_err(|e| ScaffoldError::DirectoryLookupFailed {
            reason: format!("{}: {e}", dir.display()),
        })?;
        if !path.is_dir() {
            return Err(ScaffoldError::DirectoryLookupFailed {
                reason: format!("{} is not a directory", path.display()),
            });
        }
        let root_package = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| ScaffoldError::DirectoryLookupFailed {
                reason: format!("{} has no usable directory name", path.display()),
            })?;
        debug!(path = %path.display(), root_package = %root_package, "resolved working directory");
        Ok(WorkingDirectory { path, root_package })
    }

    /// Absolute path of the working directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last path segment of the working directory.
    #[must_use]
    pub fn root_package(&self) -> &str {
        &self.root_package
    }
}
