//! # Runtime Configuration Module
//!
//! Environment-variable configuration for where the generator writes shared-tree files.
//!
//! ## Environment Variables
//!
//! ### `SCAFFOLD_REPOSITORY_DIR`
//!
//! Directory, relative to the working directory, that holds database repositories.
//! The persistence-module command writes `<dir>/<entity_snake>.rs` there.
//!
//! Default: `database`
//!
//! ### `SCAFFOLD_CONTROLLER_DIR`
//!
//! Directory, relative to the working directory, that holds HTTP controllers.
//! The controller command writes `<dir>/<entity_snake>.rs` there.
//!
//! Default: `console/controllers`
//!
//! Both directories must already exist; the generator never creates them.
//!
//! ## Usage
//!
//! ```rust
//! use scaffoldgen::runtime_config::ScaffoldConfig;
//!
//! let config = ScaffoldConfig::from_env();
//! println!("repositories live in {}", config.repository_dir.display());
//! ```

use std::env;
use std::path::PathBuf;

/// Default repository root, relative to the working directory.
pub const DEFAULT_REPOSITORY_DIR: &str = "database";
/// Default controller root, relative to the working directory.
pub const DEFAULT_CONTROLLER_DIR: &str = "console/controllers";

/// Locations of the fixed, pre-existing directories used by the
/// persistence-module and controller commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldConfig {
    /// Repository root relative to the working directory
    pub repository_dir: PathBuf,
    /// Controller root relative to the working directory
    pub controller_dir: PathBuf,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        ScaffoldConfig {
            repository_dir: PathBuf::from(DEFAULT_REPOSITORY_DIR),
            controller_dir: PathBuf::from(DEFAULT_CONTROLLER_DIR),
        }
    }
}

impl ScaffoldConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        ScaffoldConfig {
            repository_dir: non_empty_var("SCAFFOLD_REPOSITORY_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.repository_dir),
            controller_dir: non_empty_var("SCAFFOLD_CONTROLLER_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.controller_dir),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
