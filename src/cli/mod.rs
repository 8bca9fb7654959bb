//! # CLI Module
//!
//! Command-line front end for the scaffolding tool.
//!
//! ## Commands
//!
//! | command              | prompts for   | writes                                  | prints snippet        |
//! |----------------------|---------------|-----------------------------------------|-----------------------|
//! | `module`             | entity name   | `<snake>/{mod,service,tests}.rs`        | no                    |
//! | `persistence-module` | entity name   | `<repository_dir>/<snake>.rs`           | database trait method |
//! | `controller`         | entity name   | `<controller_dir>/<snake>.rs`           | route block           |
//! | (none)               | command, name | as selected                             | as selected           |
//!
//! `--name <Entity>` skips the name prompt. The tool never overwrites: running the
//! same command twice for the same name fails the second time.
//!
//! ## Usage from Code
//!
//! ```rust,no_run
//! use scaffoldgen::cli::{CommandRouter, ScriptedPrompter};
//! use scaffoldgen::generator::{CommandKind, LocalFileSystem};
//!
//! let mut router = CommandRouter::new(ScriptedPrompter::new(["Order"]), LocalFileSystem, Vec::<u8>::new())
//!     .with_workdir("/path/to/project");
//! router.run(Some(CommandKind::Module), None)?;
//! # Ok::<(), scaffoldgen::error::ScaffoldError>(())
//! ```
//!
//! ## Examples
//!
//! ```bash
//! # Choose a command interactively
//! scaffold-gen
//!
//! # New entity module, no prompt
//! scaffold-gen module --name UserProfile
//!
//! # Repository in a non-default directory, preview only
//! scaffold-gen persistence-module --name Order --repository-dir storage --dry-run
//! ```

mod commands;
mod prompt;
mod router;


pub use commands::{run, run_cli, Cli, Commands};
pub use prompt::{
    parse_selection, prompt_entity_name, select_command, LinePrompter, Prompter,
    ScriptedPrompter, Validator,
};
pub use router::CommandRouter;
