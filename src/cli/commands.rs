use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use super::prompt::LinePrompter;
use super::router::CommandRouter;
use crate::generator::{CommandKind, GenerationOutcome, LocalFileSystem};
use crate::runtime_config::ScaffoldConfig;

/// Command-line interface for the scaffolding tool
///
/// Generates entity modules, repositories and controllers from the built-in
/// template catalog. Without a subcommand an interactive selector asks which
/// one to run.
#[derive(Parser, Debug)]
#[command(name = "scaffold-gen")]
#[command(about = "Code generation tool for entity modules, repositories and controllers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The generation command; prompts for one when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project directory to generate into (default: current directory)
    #[arg(short = 'C', long, global = true)]
    pub workdir: Option<PathBuf>,

    /// Repository directory relative to the project (overrides SCAFFOLD_REPOSITORY_DIR)
    #[arg(long, global = true)]
    pub repository_dir: Option<PathBuf>,

    /// Controller directory relative to the project (overrides SCAFFOLD_CONTROLLER_DIR)
    #[arg(long, global = true)]
    pub controller_dir: Option<PathBuf>,

    /// Render and list the files that would be created without writing anything
    #[arg(long, default_value_t = false, global = true)]
    pub dry_run: bool,
}

/// Available generation commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a new entity module: data type, persistence trait, service and tests
    #[command(alias = "ent")]
    Module {
        /// Entity name in PascalCase; prompts when omitted
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Create a database repository for an entity and print the trait method to add
    #[command(alias = "ent-db")]
    PersistenceModule {
        /// Entity name in PascalCase; prompts when omitted
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Create an HTTP controller for an entity and print the routes to register
    Controller {
        /// Entity name in PascalCase; prompts when omitted
        #[arg(short, long)]
        name: Option<String>,
    },
}

impl Commands {
    /// The generation command and the entity name given on the command line.
    #[must_use]
    pub fn split(&self) -> (CommandKind, Option<String>) {
        match self {
            Commands::Module { name } => (CommandKind::Module, name.clone()),
            Commands::PersistenceModule { name } => (CommandKind::PersistenceModule, name.clone()),
            Commands::Controller { name } => (CommandKind::Controller, name.clone()),
        }
    }
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    #[must_use]
    pub fn config(&self) -> ScaffoldConfig {
        let mut config = ScaffoldConfig::from_env();
        if let Some(dir) = &self.repository_dir {
            config.repository_dir = dir.clone();
        }
        if let Some(dir) = &self.controller_dir {
            config.controller_dir = dir.clone();
        }
        config
    }
}

/// Execute the CLI command provided by the user
///
/// Prompts on the terminal, writes through the local filesystem and prints
/// confirmations and snippets to standard output.
///
/// # Errors
///
/// Returns an error if:
/// - The entity name is not PascalCase or the prompt is aborted
/// - The working directory can not be resolved
/// - A target file or directory already exists
/// - Any file could not be written
pub fn run_cli() -> anyhow::Result<GenerationOutcome> {
    let cli = Cli::parse();
    let outcome = run(&cli, LinePrompter::new(), io::stdout().lock())?;
    Ok(outcome)
}

/// Execute an already-parsed command line with the given prompter and output sink.
///
/// # Errors
///
/// Returns the [`crate::error::ScaffoldError`] that ended the command.
pub fn run<P, W>(
    cli: &Cli,
    prompter: P,
    out: W,
) -> Result<GenerationOutcome, crate::error::ScaffoldError>
where
    P: super::prompt::Prompter,
    W: io::Write,
{
    let (command, name) = match &cli.command {
        Some(cmd) => {
            let (kind, name) = cmd.split();
            (Some(kind), name)
        }
        None => (None, None),
    };
    let mut router = CommandRouter::new(prompter, LocalFileSystem, out)
        .with_config(cli.config())
        .dry_run(cli.dry_run);
    if let Some(dir) = &cli.workdir {
        router = router.with_workdir(dir);
    }
    router.run(command, name)
}
