use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

use crate::error::ScaffoldError;
use crate::names::EntityName;

/// Identifier of a template in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateId {
    /// Entity data type and persistence contract (`<snake>/mod.rs`)
    Module,
    /// Entity service (`<snake>/service.rs`)
    Service,
    /// Entity service tests (`<snake>/tests.rs`)
    Tests,
    /// Database repository (`<repository_dir>/<snake>.rs`)
    Repository,
    /// HTTP controller (`<controller_dir>/<snake>.rs`)
    Controller,
    /// Method line for the aggregate database trait
    RepositorySnippet,
    /// Route block for the aggregate API router
    RoutesSnippet,
}

impl TemplateId {
    /// Every template id, in catalog order.
    pub const ALL: [TemplateId; 7] = [
        TemplateId::Module,
        TemplateId::Service,
        TemplateId::Tests,
        TemplateId::Repository,
        TemplateId::Controller,
        TemplateId::RepositorySnippet,
        TemplateId::RoutesSnippet,
    ];

    /// Stable name used as the template key in the rendering environment.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Module => "module",
            TemplateId::Service => "service",
            TemplateId::Tests => "tests",
            TemplateId::Repository => "repository",
            TemplateId::Controller => "controller",
            TemplateId::RepositorySnippet => "repository_snippet",
            TemplateId::RoutesSnippet => "routes_snippet",
        }
    }

    /// Whether this template is printed for manual merging instead of written to a file.
    #[must_use]
    pub fn is_snippet(self) -> bool {
        matches!(
            self,
            TemplateId::RepositorySnippet | TemplateId::RoutesSnippet
        )
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values substituted into every template.
///
/// Field names are the placeholder names (`{{ entity_pascal }}` and so on).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateContext {
    /// Name of the project the code is generated into (last segment of the working directory)
    pub root_package: String,
    /// Module name of the generated entity package (same as `entity_snake`)
    pub package_name: String,
    /// Entity name in PascalCase
    pub entity_pascal: String,
    /// Entity name in camelCase
    pub entity_camel: String,
    /// Entity name in snake_case
    pub entity_snake: String,
}

impl TemplateContext {
    /// Build the rendering context for `entity` inside `root_package`.
    #[must_use]
    pub fn new(root_package: &str, entity: &EntityName) -> Self {
        TemplateContext {
            root_package: root_package.to_string(),
            package_name: entity.snake().to_string(),
            entity_pascal: entity.pascal().to_string(),
            entity_camel: entity.camel().to_string(),
            entity_snake: entity.snake().to_string(),
        }
    }
}

/// Immutable mapping from template id to template body.
///
/// The built-in bodies live under `templates/` and are embedded at compile time.
/// A catalog is passed to the [`Renderer`] by value so tests can swap bodies
/// without touching process-global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCatalog {
    bodies: BTreeMap<TemplateId, Cow<'static, str>>,
}

impl TemplateCatalog {
    /// The fixed catalog shipped with the tool.
    #[must_use]
    pub fn builtin() -> Self {
        let bodies = BTreeMap::from([
            (
                TemplateId::Module,
                Cow::Borrowed(include_str!("../../templates/module.rs.txt")),
            ),
            (
                TemplateId::Service,
                Cow::Borrowed(include_str!("../../templates/service.rs.txt")),
            ),
            (
                TemplateId::Tests,
                Cow::Borrowed(include_str!("../../templates/tests.rs.txt")),
            ),
            (
                TemplateId::Repository,
                Cow::Borrowed(include_str!("../../templates/repository.rs.txt")),
            ),
            (
                TemplateId::Controller,
                Cow::Borrowed(include_str!("../../templates/controller.rs.txt")),
            ),
            (
                TemplateId::RepositorySnippet,
                Cow::Borrowed(include_str!("../../templates/repository_snippet.rs.txt")),
            ),
            (
                TemplateId::RoutesSnippet,
                Cow::Borrowed(include_str!("../../templates/routes_snippet.rs.txt")),
            ),
        ]);
        TemplateCatalog { bodies }
    }

    /// An empty catalog; every render against it fails.
    #[must_use]
    pub fn empty() -> Self {
        TemplateCatalog {
            bodies: BTreeMap::new(),
        }
    }

    /// Return a copy of this catalog with the body of `id` replaced.
    #[must_use]
    pub fn with_template(mut self, id: TemplateId, body: impl Into<Cow<'static, str>>) -> Self {
        self.bodies.insert(id, body.into());
        self
    }

    /// Body of `id`, if present.
    #[must_use]
    pub fn get(&self, id: TemplateId) -> Option<&str> {
        self.bodies.get(&id).map(|b| b.as_ref())
    }

    /// Iterate over `(id, body)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TemplateId, &str)> {
        self.bodies.iter().map(|(id, body)| (*id, body.as_ref()))
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Binds catalog templates to a [`TemplateContext`].
///
/// Templates are compiled once when the renderer is built. Substitution is plain
/// variable interpolation; any placeholder that is not a context field is an error
/// rather than an empty string, and output is never HTML-escaped.
pub struct Renderer<'c> {
    env: Environment<'c>,
}

impl<'c> Renderer<'c> {
    /// Compile every template of `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Render`] when a template body does not parse.
    pub fn new(catalog: &'c TemplateCatalog) -> Result<Self, ScaffoldError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        for (id, body) in catalog.iter() {
            env.add_template(id.as_str(), body)
                .map_err(|e| render_error(id, &e))?;
        }
        Ok(Renderer { env })
    }

    /// Render template `id` against `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Render`] when `id` is missing from the catalog or
    /// the body references a placeholder the context does not define.
    pub fn render(&self, id: TemplateId, ctx: &TemplateContext) -> Result<String, ScaffoldError> {
        let template = self
            .env
            .get_template(id.as_str())
            .map_err(|e| render_error(id, &e))?;
        template.render(ctx).map_err(|e| render_error(id, &e))
    }
}

fn render_error(id: TemplateId, err: &minijinja::Error) -> ScaffoldError {
    ScaffoldError::Render {
        template: id.to_string(),
        reason: err.to_string(),
    }
}
