use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use super::prompt::{prompt_entity_name, select_command, Prompter};
use crate::error::ScaffoldError;
use crate::generator::{
    CommandKind, FileSystem, GenerationOutcome, Generator, Renderer, TemplateCatalog,
};
use crate::names::EntityName;
use crate::runtime_config::ScaffoldConfig;
use crate::workdir::WorkingDirectory;

/// Dispatches one generation command per invocation.
///
/// Flow: select command (when none was given) → prompt for the entity name (when
/// none was given) → validate → resolve working directory → generate. Validation
/// always happens before the filesystem is touched.
pub struct CommandRouter<P, F, W> {
    prompter: P,
    fs: F,
    out: W,
    catalog: TemplateCatalog,
    config: ScaffoldConfig,
    workdir: Option<PathBuf>,
    dry_run: bool,
}

impl<P, F, W> CommandRouter<P, F, W>
where
    P: Prompter,
    F: FileSystem,
    W: Write,
{
    /// Router with the built-in catalog, default config and the process's current directory.
    #[must_use]
    pub fn new(prompter: P, fs: F, out: W) -> Self {
        CommandRouter {
            prompter,
            fs,
            out,
            catalog: TemplateCatalog::builtin(),
            config: ScaffoldConfig::default(),
            workdir: None,
            dry_run: false,
        }
    }

    /// Render from `catalog` instead of the built-in templates.
    #[must_use]
    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Use `config` for the repository and controller directories.
    #[must_use]
    pub fn with_config(mut self, config: ScaffoldConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate relative to `dir` instead of the current directory.
    #[must_use]
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    /// List the files that would be created instead of writing them.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run `command` (or ask for one) for `name` (or ask for one).
    ///
    /// # Errors
    ///
    /// Any [`ScaffoldError`]; the command is then considered failed.
    pub fn run(
        &mut self,
        command: Option<CommandKind>,
        name: Option<String>,
    ) -> Result<GenerationOutcome, ScaffoldError> {
        let kind = match command {
            Some(kind) => kind,
            None => select_command(&mut self.prompter)?,
        };
        let raw = match name {
            Some(name) => name,
            None => prompt_entity_name(&mut self.prompter)?,
        };
        let entity = EntityName::derive(&raw)?;

        let workdir = match &self.workdir {
            Some(dir) => WorkingDirectory::at(dir)?,
            None => WorkingDirectory::discover()?,
        };
        info!(
            command = %kind,
            entity = entity.pascal(),
            workdir = %workdir.path().display(),
            "generating"
        );

        let renderer = Renderer::new(&self.catalog)?;
        Generator::new(renderer, &self.fs, self.config.clone())
            .dry_run(self.dry_run)
            .generate(kind, &entity, &workdir, &mut self.out)
    }

    /// Give back the output sink (captured output in tests).
    #[must_use]
    pub fn into_output(self) -> W {
        self.out
    }

    /// The prompter, for inspecting what was asked.
    #[must_use]
    pub fn prompter(&self) -> &P {
        &self.prompter
    }
}
