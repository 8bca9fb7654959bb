use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::templates::TemplateId;
use super::writer::FileSystem;
use crate::error::ScaffoldError;
use crate::names::EntityName;
use crate::runtime_config::ScaffoldConfig;
use crate::workdir::WorkingDirectory;

/// The three generation commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// New entity directory with data type, service and tests
    Module,
    /// Repository file in the fixed repository root, plus a database trait snippet
    PersistenceModule,
    /// Controller file in the fixed controller root, plus a route snippet
    Controller,
}

impl CommandKind {
    /// Every command, in selector order.
    pub const ALL: [CommandKind; 3] = [
        CommandKind::Module,
        CommandKind::PersistenceModule,
        CommandKind::Controller,
    ];

    /// Human label shown by the interactive selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CommandKind::Module => "Module",
            CommandKind::PersistenceModule => "Persistence module",
            CommandKind::Controller => "Controller",
        }
    }

    /// Template printed for manual merging after a successful write, if any.
    #[must_use]
    pub fn snippet(self) -> Option<TemplateId> {
        match self {
            CommandKind::Module => None,
            CommandKind::PersistenceModule => Some(TemplateId::RepositorySnippet),
            CommandKind::Controller => Some(TemplateId::RoutesSnippet),
        }
    }

    /// Line printed above the snippet telling the user where it belongs.
    #[must_use]
    pub fn snippet_heading(self) -> &'static str {
        match self {
            CommandKind::Module => "",
            CommandKind::PersistenceModule => {
                "Copy the code snippet below to the Database trait declaration:"
            }
            CommandKind::Controller => "Copy the code snippet with sample routes:",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One file to render and create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    /// File name relative to the plan's target directory
    pub file_name: String,
    /// Template rendered into the file
    pub template: TemplateId,
}

impl FileTask {
    fn new(file_name: impl Into<String>, template: TemplateId) -> Self {
        FileTask {
            file_name: file_name.into(),
            template,
        }
    }
}

/// Everything a single invocation will create, computed before any I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Command that produced the plan
    pub kind: CommandKind,
    /// Directory the file tasks are written into
    pub target_directory: PathBuf,
    /// Whether the target directory is new and must be created (and must not exist)
    pub create_directory: bool,
    /// Files to create, in order
    pub file_tasks: Vec<FileTask>,
    /// Snippet printed after the files are written
    pub snippet: Option<TemplateId>,
}

impl GenerationPlan {
    /// Compute the plan for `kind` and `entity` inside `workdir`.
    #[must_use]
    pub fn build(
        kind: CommandKind,
        entity: &EntityName,
        workdir: &WorkingDirectory,
        config: &ScaffoldConfig,
    ) -> Self {
        let snake = entity.snake();
        let (target_directory, create_directory, file_tasks) = match kind {
            CommandKind::Module => (
                workdir.path().join(snake),
                true,
                vec![
                    FileTask::new("mod.rs", TemplateId::Module),
                    FileTask::new("service.rs", TemplateId::Service),
                    FileTask::new("tests.rs", TemplateId::Tests),
                ],
            ),
            CommandKind::PersistenceModule => (
                workdir.path().join(&config.repository_dir),
                false,
                vec![FileTask::new(format!("{snake}.rs"), TemplateId::Repository)],
            ),
            CommandKind::Controller => (
                workdir.path().join(&config.controller_dir),
                false,
                vec![FileTask::new(format!("{snake}.rs"), TemplateId::Controller)],
            ),
        };
        let plan = GenerationPlan {
            kind,
            target_directory,
            create_directory,
            file_tasks,
            snippet: kind.snippet(),
        };
        debug!(
            command = %kind,
            target = %plan.target_directory.display(),
            files = plan.file_tasks.len(),
            "built generation plan"
        );
        plan
    }

    /// Absolute path of a file task.
    #[must_use]
    pub fn path_of(&self, task: &FileTask) -> PathBuf {
        self.target_directory.join(&task.file_name)
    }

    /// Absolute paths of every file task, in order.
    #[must_use]
    pub fn target_paths(&self) -> Vec<PathBuf> {
        self.file_tasks.iter().map(|t| self.path_of(t)).collect()
    }

    /// Refuse to proceed when anything the plan would create already exists.
    ///
    /// A new entity directory is checked as a whole; for the fixed shared
    /// directories only the individual target files are checked.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TargetExists`] naming the first colliding path.
    pub fn check_collisions(&self, fs: &dyn FileSystem) -> Result<(), ScaffoldError> {
        if self.create_directory {
            return ensure_absent(fs, &self.target_directory);
        }
        for path in self.target_paths() {
            ensure_absent(fs, &path)?;
        }
        Ok(())
    }
}

fn ensure_absent(fs: &dyn FileSystem, path: &Path) -> Result<(), ScaffoldError> {
    if fs.exists(path) {
        warn!(path = %path.display(), "target already exists");
        return Err(ScaffoldError::TargetExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
