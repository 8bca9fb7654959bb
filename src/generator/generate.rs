use std::io::Write;
use std::path::PathBuf;

use tracing::{info, instrument};

use super::plan::{CommandKind, GenerationPlan};
use super::snippet::SnippetPrinter;
use super::templates::{Renderer, TemplateContext};
use super::writer::{write_plan, FileSystem, RenderedFile};
use crate::error::ScaffoldError;
use crate::names::EntityName;
use crate::runtime_config::ScaffoldConfig;
use crate::workdir::WorkingDirectory;

/// What a finished generation run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// The plan that was executed
    pub plan: GenerationPlan,
    /// Files created on disk (empty for a dry run)
    pub created: Vec<PathBuf>,
    /// Rendered snippet that was printed, if the command has one
    pub snippet: Option<String>,
}

/// Executes generation plans: collision check, render, write, snippet.
pub struct Generator<'a> {
    renderer: Renderer<'a>,
    fs: &'a dyn FileSystem,
    config: ScaffoldConfig,
    dry_run: bool,
}

impl<'a> Generator<'a> {
    /// Create a generator writing through `fs`.
    #[must_use]
    pub fn new(renderer: Renderer<'a>, fs: &'a dyn FileSystem, config: ScaffoldConfig) -> Self {
        Generator {
            renderer,
            fs,
            config,
            dry_run: false,
        }
    }

    /// Render and report instead of writing.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Generate `kind` for `entity` inside `workdir`, printing confirmations and
    /// the snippet to `out`.
    ///
    /// Every template is rendered before anything touches the filesystem, so a
    /// broken template never leaves a half-written module behind.
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::TargetExists`] when the target directory or a target file exists
    /// - [`ScaffoldError::Render`] when the catalog is broken
    /// - [`ScaffoldError::DirectoryCreateFailed`] when the entity directory can not be created
    /// - [`ScaffoldError::FileWriteFailed`] when one or more files were not written;
    ///   the remaining files were still attempted and are left on disk
    /// - [`ScaffoldError::Output`] when `out` can not be written
    #[instrument(skip_all, fields(command = %kind, entity = entity.pascal()))]
    pub fn generate(
        &self,
        kind: CommandKind,
        entity: &EntityName,
        workdir: &WorkingDirectory,
        out: &mut dyn Write,
    ) -> Result<GenerationOutcome, ScaffoldError> {
        let plan = GenerationPlan::build(kind, entity, workdir, &self.config);
        plan.check_collisions(self.fs)?;

        let ctx = TemplateContext::new(workdir.root_package(), entity);
        let files = plan
            .file_tasks
            .iter()
            .map(|task| {
                Ok(RenderedFile {
                    path: plan.path_of(task),
                    contents: self.renderer.render(task.template, &ctx)?,
                })
            })
            .collect::<Result<Vec<_>, ScaffoldError>>()?;
        let snippet = plan
            .snippet
            .map(|id| self.renderer.render(id, &ctx))
            .transpose()?;

        let created = if self.dry_run {
            for file in &files {
                writeln!(out, "would create: {}", file.path.display())?;
            }
            Vec::new()
        } else {
            write_plan(&plan, &files, self.fs, out)?.into_result()?
        };

        if let Some(text) = &snippet {
            SnippetPrinter::new(out).emit(kind.snippet_heading(), text)?;
        }

        info!(files = created.len(), dry_run = self.dry_run, "generation finished");
        Ok(GenerationOutcome {
            plan,
            created,
            snippet,
        })
    }
}
