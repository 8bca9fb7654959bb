#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::error::ScaffoldError;
use crate::names::EntityName;
use crate::runtime_config::ScaffoldConfig;
use crate::workdir::WorkingDirectory;
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn project() -> (TempDir, WorkingDirectory) {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("shop");
    fs::create_dir_all(root.join("database")).unwrap();
    fs::create_dir_all(root.join("console").join("controllers")).unwrap();
    let wd = WorkingDirectory::at(&root).unwrap();
    (tmp, wd)
}

fn order_ctx() -> TemplateContext {
    TemplateContext::new("shop", &EntityName::derive("Order").unwrap())
}

/// Local filesystem that refuses to create the listed file names and records attempts.
struct FlakyFs {
    fail_files: Vec<&'static str>,
    fail_dir: Option<io::ErrorKind>,
    attempts: RefCell<Vec<PathBuf>>,
}

impl FlakyFs {
    fn failing_files(names: &[&'static str]) -> Self {
        FlakyFs {
            fail_files: names.to_vec(),
            fail_dir: None,
            attempts: RefCell::new(Vec::new()),
        }
    }

    fn failing_dir(kind: io::ErrorKind) -> Self {
        FlakyFs {
            fail_files: Vec::new(),
            fail_dir: Some(kind),
            attempts: RefCell::new(Vec::new()),
        }
    }
}

impl FileSystem for FlakyFs {
    fn exists(&self, path: &Path) -> bool {
        LocalFileSystem.exists(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        match self.fail_dir {
            Some(kind) => Err(io::Error::new(kind, "injected dir failure")),
            None => LocalFileSystem.create_dir(path),
        }
    }

    fn create_new(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.attempts.borrow_mut().push(path.to_path_buf());
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if self.fail_files.contains(&name) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "injected failure"));
        }
        LocalFileSystem.create_new(path, contents)
    }
}

#[test]
fn test_builtin_catalog_has_every_template() {
    let catalog = TemplateCatalog::builtin();
    for id in TemplateId::ALL {
        let body = catalog.get(id).unwrap();
        assert!(!body.trim().is_empty(), "{id} is empty");
    }
    assert_eq!(catalog.iter().count(), TemplateId::ALL.len());
}

#[test]
fn test_every_template_renders_without_leftover_placeholders() {
    let catalog = TemplateCatalog::builtin();
    let renderer = Renderer::new(&catalog).unwrap();
    let ctx = order_ctx();
    for id in TemplateId::ALL {
        let text = renderer.render(id, &ctx).unwrap();
        assert!(!text.contains("{{"), "{id} left a placeholder");
        assert!(!text.contains("}}"), "{id} left a placeholder");
        assert!(text.ends_with('\n'), "{id} lost its trailing newline");
    }
}

#[test]
fn test_rendering_is_deterministic() {
    let catalog = TemplateCatalog::builtin();
    let renderer = Renderer::new(&catalog).unwrap();
    let ctx = TemplateContext::new("shop", &EntityName::derive("UserProfile").unwrap());
    for id in TemplateId::ALL {
        assert_eq!(
            renderer.render(id, &ctx).unwrap(),
            renderer.render(id, &ctx).unwrap()
        );
    }
}

#[test]
fn test_module_template_uses_every_case_form() {
    let catalog = TemplateCatalog::builtin();
    let renderer = Renderer::new(&catalog).unwrap();
    let ctx = TemplateContext::new("shop", &EntityName::derive("UserProfile").unwrap());

    let module = renderer.render(TemplateId::Module, &ctx).unwrap();
    assert!(module.contains("pub struct UserProfile {"));
    assert!(module.contains("pub trait UserProfileDb"));
    assert!(module.contains("userProfile does not exist"));
    assert!(module.contains("user_profile: &UserProfile"));
    assert!(module.contains("`shop`"));

    let repo = renderer.render(TemplateId::Repository, &ctx).unwrap();
    assert!(repo.contains("use crate::user_profile::{UserProfile, UserProfileDb"));
    assert!(repo.contains("FROM user_profile"));

    let routes = renderer.render(TemplateId::RoutesSnippet, &ctx).unwrap();
    assert!(routes.contains("nest(\"/userProfile\""));
    assert!(routes.contains("with_state(user_profile_controller)"));
}

#[test]
fn test_output_is_not_escaped() {
    let catalog =
        TemplateCatalog::empty().with_template(TemplateId::Module, "<{{ entity_pascal }}> & \"x\"\n");
    let renderer = Renderer::new(&catalog).unwrap();
    assert_eq!(
        renderer.render(TemplateId::Module, &order_ctx()).unwrap(),
        "<Order> & \"x\"\n"
    );
}

#[test]
fn test_unknown_placeholder_is_render_error() {
    let catalog = TemplateCatalog::builtin().with_template(TemplateId::Service, "{{ entity_plural }}");
    let renderer = Renderer::new(&catalog).unwrap();
    let err = renderer.render(TemplateId::Service, &order_ctx()).unwrap_err();
    assert!(err.is_defect());
    match err {
        ScaffoldError::Render { template, .. } => assert_eq!(template, "service"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_missing_template_is_render_error() {
    let catalog = TemplateCatalog::empty();
    let renderer = Renderer::new(&catalog).unwrap();
    let err = renderer.render(TemplateId::Controller, &order_ctx()).unwrap_err();
    assert!(matches!(err, ScaffoldError::Render { .. }));
}

#[test]
fn test_unparseable_template_fails_at_construction() {
    let catalog = TemplateCatalog::empty().with_template(TemplateId::Tests, "{{ entity_pascal ");
    assert!(matches!(
        Renderer::new(&catalog),
        Err(ScaffoldError::Render { .. })
    ));
}

#[test]
fn test_module_plan() {
    let (_tmp, wd) = project();
    let entity = EntityName::derive("UserProfile").unwrap();
    let plan = GenerationPlan::build(CommandKind::Module, &entity, &wd, &ScaffoldConfig::default());

    assert_eq!(plan.target_directory, wd.path().join("user_profile"));
    assert!(plan.create_directory);
    assert_eq!(plan.snippet, None);
    let names: Vec<_> = plan.file_tasks.iter().map(|t| t.file_name.as_str()).collect();
    assert_eq!(names, vec!["mod.rs", "service.rs", "tests.rs"]);
    let templates: Vec<_> = plan.file_tasks.iter().map(|t| t.template).collect();
    assert_eq!(
        templates,
        vec![TemplateId::Module, TemplateId::Service, TemplateId::Tests]
    );
}

#[test]
fn test_persistence_and_controller_plans_use_config_dirs() {
    let (_tmp, wd) = project();
    let entity = EntityName::derive("Order").unwrap();
    let config = ScaffoldConfig {
        repository_dir: PathBuf::from("storage"),
        controller_dir: PathBuf::from("web/handlers"),
    };

    let repo = GenerationPlan::build(CommandKind::PersistenceModule, &entity, &wd, &config);
    assert_eq!(repo.target_paths(), vec![wd.path().join("storage").join("order.rs")]);
    assert!(!repo.create_directory);
    assert_eq!(repo.snippet, Some(TemplateId::RepositorySnippet));

    let ctrl = GenerationPlan::build(CommandKind::Controller, &entity, &wd, &config);
    assert_eq!(
        ctrl.target_paths(),
        vec![wd.path().join("web").join("handlers").join("order.rs")]
    );
    assert_eq!(ctrl.snippet, Some(TemplateId::RoutesSnippet));
}

#[test]
fn test_module_collision_checks_directory() {
    let (_tmp, wd) = project();
    let entity = EntityName::derive("Order").unwrap();
    let plan = GenerationPlan::build(CommandKind::Module, &entity, &wd, &ScaffoldConfig::default());

    assert!(plan.check_collisions(&LocalFileSystem).is_ok());
    fs::create_dir(wd.path().join("order")).unwrap();
    match plan.check_collisions(&LocalFileSystem) {
        Err(ScaffoldError::TargetExists { path }) => assert_eq!(path, wd.path().join("order")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_shared_dir_collision_checks_only_the_file() {
    let (_tmp, wd) = project();
    let entity = EntityName::derive("Order").unwrap();
    let plan = GenerationPlan::build(
        CommandKind::PersistenceModule,
        &entity,
        &wd,
        &ScaffoldConfig::default(),
    );

    fs::write(wd.path().join("database").join("customer.rs"), "// other").unwrap();
    assert!(plan.check_collisions(&LocalFileSystem).is_ok());

    fs::write(wd.path().join("database").join("order.rs"), "// mine").unwrap();
    assert!(matches!(
        plan.check_collisions(&LocalFileSystem),
        Err(ScaffoldError::TargetExists { .. })
    ));
}

#[test]
fn test_local_create_new_refuses_existing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("order.rs");
    LocalFileSystem.create_new(&path, b"first").unwrap();
    let err = LocalFileSystem.create_new(&path, b"second").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    assert_eq!(fs::read_to_string(&path).unwrap(), "first");
}

#[test]
fn test_write_plan_continues_after_file_failure() {
    let (_tmp, wd) = project();
    let entity = EntityName::derive("Order").unwrap();
    let plan = GenerationPlan::build(CommandKind::Module, &entity, &wd, &ScaffoldConfig::default());
    let files: Vec<RenderedFile> = plan
        .target_paths()
        .into_iter()
        .map(|path| RenderedFile {
            path,
            contents: "// generated\n".into(),
        })
        .collect();
    let fs_fake = FlakyFs::failing_files(&["service.rs"]);
    let mut out = Vec::<u8>::new();

    let report = write_plan(&plan, &files, &fs_fake, &mut out).unwrap();

    assert_eq!(fs_fake.attempts.borrow().len(), 3);
    assert!(!report.is_complete());
    assert_eq!(
        report.created,
        vec![wd.path().join("order/mod.rs"), wd.path().join("order/tests.rs")]
    );
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("new: "));
    assert!(!out.contains("service.rs"));

    // Known limitation: files written before or after a failure stay on disk.
    assert!(wd.path().join("order/mod.rs").exists());
    assert!(wd.path().join("order/tests.rs").exists());
    match report.into_result() {
        Err(ScaffoldError::FileWriteFailed { failures }) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].path, wd.path().join("order/service.rs"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_write_plan_directory_failure_stops_before_files() {
    let (_tmp, wd) = project();
    let entity = EntityName::derive("Order").unwrap();
    let plan = GenerationPlan::build(CommandKind::Module, &entity, &wd, &ScaffoldConfig::default());
    let files = vec![RenderedFile {
        path: plan.target_paths()[0].clone(),
        contents: String::new(),
    }];

    let denied = FlakyFs::failing_dir(io::ErrorKind::PermissionDenied);
    let err = write_plan(&plan, &files, &denied, &mut Vec::<u8>::new()).unwrap_err();
    assert!(matches!(err, ScaffoldError::DirectoryCreateFailed { .. }));
    assert!(denied.attempts.borrow().is_empty());

    let raced = FlakyFs::failing_dir(io::ErrorKind::AlreadyExists);
    let err = write_plan(&plan, &files, &raced, &mut Vec::<u8>::new()).unwrap_err();
    assert!(matches!(err, ScaffoldError::TargetExists { .. }));
    assert!(raced.attempts.borrow().is_empty());
}

#[test]
fn test_generate_module_then_collision() {
    let (_tmp, wd) = project();
    let catalog = TemplateCatalog::builtin();
    let generator = Generator::new(
        Renderer::new(&catalog).unwrap(),
        &LocalFileSystem,
        ScaffoldConfig::default(),
    );
    let entity = EntityName::derive("Order").unwrap();
    let mut out = Vec::<u8>::new();

    let outcome = generator
        .generate(CommandKind::Module, &entity, &wd, &mut out)
        .unwrap();
    assert_eq!(outcome.created.len(), 3);
    assert_eq!(outcome.snippet, None);

    let dir = wd.path().join("order");
    let before: Vec<String> = ["mod.rs", "service.rs", "tests.rs"]
        .iter()
        .map(|f| fs::read_to_string(dir.join(f)).unwrap())
        .collect();
    for text in &before {
        assert!(text.contains("Order"));
    }
    assert!(before[0].contains("order does not exist"));
    assert!(before[1].contains("self.order.get(id)"));
    assert!(before[2].contains("fn test_order_lifecycle()"));

    let err = generator
        .generate(CommandKind::Module, &entity, &wd, &mut Vec::<u8>::new())
        .unwrap_err();
    assert!(matches!(err, ScaffoldError::TargetExists { .. }));
    let after: Vec<String> = ["mod.rs", "service.rs", "tests.rs"]
        .iter()
        .map(|f| fs::read_to_string(dir.join(f)).unwrap())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_generate_controller_prints_bounded_snippet() {
    let (_tmp, wd) = project();
    let catalog = TemplateCatalog::builtin();
    let generator = Generator::new(
        Renderer::new(&catalog).unwrap(),
        &LocalFileSystem,
        ScaffoldConfig::default(),
    );
    let entity = EntityName::derive("Order").unwrap();
    let mut out = Vec::<u8>::new();

    let outcome = generator
        .generate(CommandKind::Controller, &entity, &wd, &mut out)
        .unwrap();
    let out = String::from_utf8(out).unwrap();
    let rendered = outcome.snippet.unwrap();

    let inner = extract_snippet(&out).unwrap();
    assert_eq!(inner.trim(), rendered.trim());
    assert!(wd
        .path()
        .join("console/controllers/order.rs")
        .exists());
    assert!(out.find("new: ").unwrap() < out.find(SNIPPET_START).unwrap());
}

#[test]
fn test_generate_persistence_failure_skips_snippet() {
    let (_tmp, wd) = project();
    fs::remove_dir(wd.path().join("database")).unwrap();
    let catalog = TemplateCatalog::builtin();
    let generator = Generator::new(
        Renderer::new(&catalog).unwrap(),
        &LocalFileSystem,
        ScaffoldConfig::default(),
    );
    let entity = EntityName::derive("Order").unwrap();
    let mut out = Vec::<u8>::new();

    let err = generator
        .generate(CommandKind::PersistenceModule, &entity, &wd, &mut out)
        .unwrap_err();
    assert!(matches!(err, ScaffoldError::FileWriteFailed { .. }));
    assert!(!String::from_utf8(out).unwrap().contains(SNIPPET_START));
}

#[test]
fn test_render_failure_writes_nothing() {
    let (_tmp, wd) = project();
    let catalog = TemplateCatalog::builtin().with_template(TemplateId::Tests, "{{ missing }}");
    let generator = Generator::new(
        Renderer::new(&catalog).unwrap(),
        &LocalFileSystem,
        ScaffoldConfig::default(),
    );
    let entity = EntityName::derive("Order").unwrap();

    let err = generator
        .generate(CommandKind::Module, &entity, &wd, &mut Vec::<u8>::new())
        .unwrap_err();
    assert!(err.is_defect());
    assert!(!wd.path().join("order").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let (_tmp, wd) = project();
    let catalog = TemplateCatalog::builtin();
    let generator = Generator::new(
        Renderer::new(&catalog).unwrap(),
        &LocalFileSystem,
        ScaffoldConfig::default(),
    )
    .dry_run(true);
    let entity = EntityName::derive("Order").unwrap();
    let mut out = Vec::<u8>::new();

    let outcome = generator
        .generate(CommandKind::PersistenceModule, &entity, &wd, &mut out)
        .unwrap();
    assert!(outcome.created.is_empty());
    assert!(!wd.path().join("database/order.rs").exists());
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("would create: "));
    assert!(extract_snippet(&out).unwrap().contains("fn order(&self)"));
}

/// Output sink whose every write fails like a closed pipe.
struct ClosedPipe;

impl io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }
}

#[test]
fn test_closed_output_still_writes_every_file() {
    let (_tmp, wd) = project();
    let catalog = TemplateCatalog::builtin();
    let generator = Generator::new(
        Renderer::new(&catalog).unwrap(),
        &LocalFileSystem,
        ScaffoldConfig::default(),
    );
    let entity = EntityName::derive("Order").unwrap();

    let err = generator
        .generate(CommandKind::Module, &entity, &wd, &mut ClosedPipe)
        .unwrap_err();
    assert!(matches!(err, ScaffoldError::Output(_)));

    let dir = wd.path().join("order");
    for file in ["mod.rs", "service.rs", "tests.rs"] {
        assert!(dir.join(file).is_file(), "{file} was not written");
    }
}

#[test]
fn test_snippet_templates_are_not_file_tasks() {
    let (_tmp, wd) = project();
    let entity = EntityName::derive("Order").unwrap();
    let snippets: Vec<_> = TemplateId::ALL.iter().filter(|id| id.is_snippet()).copied().collect();
    assert_eq!(
        snippets,
        vec![TemplateId::RepositorySnippet, TemplateId::RoutesSnippet]
    );

    for kind in CommandKind::ALL {
        let plan = GenerationPlan::build(kind, &entity, &wd, &ScaffoldConfig::default());
        assert!(plan.file_tasks.iter().all(|t| !t.template.is_snippet()), "{kind}");
        assert!(plan.snippet.map_or(true, TemplateId::is_snippet), "{kind}");
    }
}
