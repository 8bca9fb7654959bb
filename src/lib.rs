//! # scaffoldgen
//!
//! **scaffoldgen** generates the boilerplate for a new resource in a service tree: an
//! entity module (data type, persistence trait, service, tests), a database repository
//! and an HTTP controller, all rendered from a fixed template catalog.
//!
//! ## Architecture
//!
//! - **[`names`]** - Validates an entity name and derives its Pascal, camel and snake forms
//! - **[`generator`]** - Template catalog, plan building, collision checks, writing and snippets
//! - **[`cli`]** - clap command line, interactive prompts and the command router
//! - **[`workdir`]** - Working-directory and root-package discovery
//! - **[`runtime_config`]** - Environment configuration for the shared target directories
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`error`]** - The [`ScaffoldError`] taxonomy
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(scaffold-gen)
//!     participant Router as CommandRouter
//!     participant Names as names::EntityName
//!     participant Plan as GenerationPlan
//!     participant Renderer as Renderer
//!     participant FS as File System
//!
//!     User->>CLI: scaffold-gen controller
//!     CLI->>Router: run(Controller, None)
//!     Router->>User: Entity:
//!     User-->>Router: Order
//!     Router->>Names: derive("Order")
//!     Names-->>Router: Order / order / order
//!     Router->>Plan: build + check_collisions
//!     Plan->>FS: exists(console/controllers/order.rs)?
//!     Router->>Renderer: render(controller), render(routes_snippet)
//!     Router->>FS: create_new(console/controllers/order.rs)
//!     Router-->>User: new: .../order.rs
//!     Router-->>User: // Copy starts here >>> ... // Copy end here <<<
//! ```
//!
//! ## Guarantees
//!
//! - A name is written at most once: existing targets are never overwritten, and
//!   creation uses create-if-absent so concurrent runs can not both succeed.
//! - Shared aggregate files (database trait, API router) are never edited; their
//!   additions are printed between `// Copy starts here >>>` and `// Copy end here <<<`.
//! - A failed file write does not stop the remaining writes, and nothing already
//!   written is rolled back.

pub mod cli;
pub mod error;
pub mod generator;
pub mod logging;
pub mod names;
pub mod runtime_config;
pub mod workdir;

pub use error::ScaffoldError;
pub use generator::{CommandKind, GenerationOutcome};
pub use names::EntityName;
