use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{error, info};

use super::plan::GenerationPlan;
use crate::error::{ScaffoldError, WriteFailure};

/// Filesystem operations the writer depends on.
///
/// Both creation operations must be atomic create-if-absent: they fail with
/// [`io::ErrorKind::AlreadyExists`] instead of reusing or truncating an existing entry,
/// so two concurrent runs for the same entity cannot both succeed.
pub trait FileSystem {
    /// Whether anything (file, directory or symlink) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Create a single directory whose parent already exists.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Create a new file containing `contents`.
    fn create_new(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn create_new(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        file.write_all(contents)?;
        file.sync_all()
    }
}

/// A rendered file ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Absolute target path
    pub path: PathBuf,
    /// Rendered template text
    pub contents: String,
}

/// Outcome of writing a plan's files.
///
/// Files are independent: a failure on one does not stop the others, and nothing
/// already written is removed afterwards.
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Files created, in plan order
    pub created: Vec<PathBuf>,
    /// Files that could not be created, in plan order
    pub failures: Vec<WriteFailure>,
}

impl WriteReport {
    /// `true` when every file was created.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn the report into the command result.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::FileWriteFailed`] listing every failed file.
    pub fn into_result(self) -> Result<Vec<PathBuf>, ScaffoldError> {
        if self.failures.is_empty() {
            Ok(self.created)
        } else {
            Err(ScaffoldError::FileWriteFailed {
                failures: self.failures,
            })
        }
    }
}

/// Create the plan's directory (when it owns one) and write every rendered file.
///
/// Every file task is attempted first; a `new: <path>` confirmation line is then
/// written to `out` for each created file, so a broken output sink can not cut the
/// plan short.
///
/// # Errors
///
/// Directory creation is all-or-nothing: an existing directory yields
/// [`ScaffoldError::TargetExists`], any other failure
/// [`ScaffoldError::DirectoryCreateFailed`], and no file is attempted. Per-file
/// failures are collected in the returned report instead. Failing to write a
/// confirmation line yields [`ScaffoldError::Output`] after all files were attempted.
pub fn write_plan(
    plan: &GenerationPlan,
    files: &[RenderedFile],
    fs: &dyn FileSystem,
    out: &mut dyn Write,
) -> Result<WriteReport, ScaffoldError> {
    if plan.create_directory {
        let dir = &plan.target_directory;
        fs.create_dir(dir).map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                ScaffoldError::TargetExists { path: dir.clone() }
            } else {
                error!(path = %dir.display(), error = %source, "can not create target dir");
                ScaffoldError::DirectoryCreateFailed {
                    path: dir.clone(),
                    source,
                }
            }
        })?;
        info!(path = %dir.display(), "created target dir");
    }

    let mut report = WriteReport::default();
    for file in files {
        match fs.create_new(&file.path, file.contents.as_bytes()) {
            Ok(()) => {
                info!(path = %file.path.display(), bytes = file.contents.len(), "wrote file");
                report.created.push(file.path.clone());
            }
            Err(source) => {
                error!(path = %file.path.display(), error = %source, "can not write file");
                report.failures.push(WriteFailure {
                    path: file.path.clone(),
                    source,
                });
            }
        }
    }

    // Confirmations go out only after every task was attempted.
    for path in &report.created {
        writeln!(out, "✅ new: {}", path.display())?;
    }
    Ok(report)
}
