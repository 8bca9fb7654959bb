//! Error taxonomy for the scaffolding tool.
//!
//! Every failure surfaces to the command boundary as a [`ScaffoldError`]; nothing
//! is retried. [`ScaffoldError::Render`] is the only variant that indicates a defect
//! in the tool itself rather than a problem with the user's input or working tree.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// A single file task that could not be written.
#[derive(Debug)]
pub struct WriteFailure {
    /// Absolute path of the file that was not created
    pub path: PathBuf,
    /// Underlying I/O error
    pub source: io::Error,
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

/// Errors produced while prompting, planning, rendering or writing.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// The entity name is not strict PascalCase (`Order`, `UserProfile`).
    #[error("entity name \"{name}\" must be in PascalCase (e.g. Order, UserProfile)")]
    InvalidName {
        /// The rejected input
        name: String,
    },

    /// The interactive prompt was aborted or could not read input.
    #[error("prompt failed: {reason}")]
    PromptFailed {
        /// Why the prompt ended
        reason: String,
    },

    /// The working directory could not be resolved.
    #[error("can not get the current directory: {reason}")]
    DirectoryLookupFailed {
        /// Why discovery failed
        reason: String,
    },

    /// A target file or directory is already present.
    #[error("target already exists: {}", .path.display())]
    TargetExists {
        /// The colliding path
        path: PathBuf,
    },

    /// The entity directory could not be created.
    #[error("can not create target dir \"{}\": {source}", .path.display())]
    DirectoryCreateFailed {
        /// Directory that was not created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// One or more files of the plan were not written.
    #[error("can not write {}", describe_failures(.failures))]
    FileWriteFailed {
        /// Every failed file task, in plan order
        failures: Vec<WriteFailure>,
    },

    /// A template could not be compiled or rendered.
    #[error("can not render template \"{template}\": {reason}")]
    Render {
        /// Template id
        template: String,
        /// Engine error message
        reason: String,
    },

    /// Writing confirmation lines or a snippet to standard output failed.
    #[error("can not write to output: {0}")]
    Output(#[from] io::Error),
}

impl ScaffoldError {
    /// `true` when the error points at a broken template catalog rather than user input.
    #[must_use]
    pub fn is_defect(&self) -> bool {
        matches!(self, ScaffoldError::Render { .. })
    }
}

fn describe_failures(failures: &[WriteFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("\"{f}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
