//! # Generator Module
//!
//! Turns a validated entity name into new source files and integration snippets.
//!
//! ## Overview
//!
//! ```text
//! EntityName → GenerationPlan → collision check → Renderer × N → write_plan → SnippetPrinter
//! ```
//!
//! 1. **Plan** - [`GenerationPlan::build`] computes the target directory and file tasks
//!    for a [`CommandKind`]
//! 2. **Collision check** - [`GenerationPlan::check_collisions`] refuses to touch
//!    anything that already exists, so every name is write-once
//! 3. **Render** - [`Renderer`] binds [`TemplateCatalog`] bodies to a [`TemplateContext`]
//! 4. **Write** - [`write_plan`] creates files with create-if-absent semantics and keeps
//!    going past individual failures
//! 5. **Snippet** - [`SnippetPrinter`] prints the block a human pastes into a shared file
//!
//! ## Generated Structure
//!
//! ```text
//! <workdir>/
//! ├── order/                  # module command
//! │   ├── mod.rs              # Order type + OrderDb trait
//! │   ├── service.rs          # Service over OrderDb
//! │   └── tests.rs            # in-memory OrderDb + service test
//! ├── database/
//! │   └── order.rs            # persistence-module command (+ trait method snippet)
//! └── console/controllers/
//!     └── order.rs            # controller command (+ route block snippet)
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,no_run
//! use scaffoldgen::generator::{CommandKind, Generator, LocalFileSystem, Renderer, TemplateCatalog};
//! use scaffoldgen::names::EntityName;
//! use scaffoldgen::runtime_config::ScaffoldConfig;
//! use scaffoldgen::workdir::WorkingDirectory;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = TemplateCatalog::builtin();
//! let fs = LocalFileSystem;
//! let generator = Generator::new(Renderer::new(&catalog)?, &fs, ScaffoldConfig::default());
//! let entity = EntityName::derive("Order")?;
//! generator.generate(
//!     CommandKind::Module,
//!     &entity,
//!     &WorkingDirectory::discover()?,
//!     &mut std::io::stdout(),
//! )?;
//! # Ok(())
//! # }
//! ```

mod generate;
mod plan;
mod snippet;
mod templates;
mod writer;
#[cfg(test)]
mod tests;

pub use generate::{GenerationOutcome, Generator};
pub use plan::{CommandKind, FileTask, GenerationPlan};
pub use snippet::{extract_snippet, SnippetPrinter, SNIPPET_END, SNIPPET_START};
pub use templates::{Renderer, TemplateCatalog, TemplateContext, TemplateId};
pub use writer::{write_plan, FileSystem, LocalFileSystem, RenderedFile, WriteReport};
