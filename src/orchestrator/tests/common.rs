//! Common test utilities for orchestrator tests.

use std::rc::Rc;

use crate::{
    config::{Config, DEFAULT_ROOT_PACKAGE, Workflow},
    exec::manager::ExecManager,
    orchestrator::{Orchestrator, config::ReleaseOptions},
    package::descriptor::PackageDescriptor,
    prompt::{MockPrompter, Prompter},
    test_helpers::RecordingRunner,
};

pub use crate::{
    orchestrator::ReleaseOutcome,
    test_helpers::{
        CommandLog, TestRepo, command_error, default_response, is_command,
        read_manifest_version,
    },
};

pub const PUBLISH: &str =
    "pnpm publish --access public --registry https://registry.npmjs.org/ --no-git-checks";

pub fn options(
    repo: &TestRepo,
    dry_run: bool,
    workflow: Workflow,
    preid: Option<&str>,
) -> Rc<ReleaseOptions> {
    Rc::new(
        ReleaseOptions::builder()
            .config(Config::default())
            .root(repo.root())
            .dry_run(dry_run)
            .workflow(Some(workflow))
            .preid(preid.map(str::to_string))
            .build()
            .unwrap(),
    )
}

/// Loads `ui`, `utils` or the root sentinel from the test repository.
pub async fn load_package(repo: &TestRepo, name: &str) -> PackageDescriptor {
    if name == DEFAULT_ROOT_PACKAGE {
        return PackageDescriptor::load(name, repo.root(), true)
            .await
            .unwrap();
    }
    PackageDescriptor::load(name, &repo.package_dir(name), false)
        .await
        .unwrap()
}

/// Prompter that picks the release type whose label starts with
/// `increment` and answers the confirmation with `confirm`.
pub fn scripted_prompter(
    increment: &'static str,
    confirm: bool,
) -> MockPrompter {
    let mut prompter = MockPrompter::new();
    prompter
        .expect_select()
        .withf(|p| p.message == "Select release type:")
        .times(1)
        .returning(move |p| {
            Ok(p
                .options
                .iter()
                .find(|o| o.label.starts_with(increment))
                .map(|o| o.value.clone()))
        });
    prompter
        .expect_confirm()
        .times(1)
        .returning(move |_| Ok(confirm));
    prompter
}

/// Prompter that picks `custom` and types `input`.
pub fn custom_version_prompter(input: &'static str) -> MockPrompter {
    let mut prompter = MockPrompter::new();
    prompter
        .expect_select()
        .times(1)
        .returning(|_| Ok(Some("custom".into())));
    prompter
        .expect_input()
        .withf(|p| p.message == "Input custom version:")
        .times(1)
        .returning(move |_| Ok(Some(input.into())));
    prompter
}

pub fn create_test_orchestrator(
    options: Rc<ReleaseOptions>,
    package: PackageDescriptor,
    runner: RecordingRunner,
    prompter: MockPrompter,
) -> Orchestrator {
    let exec = Rc::new(ExecManager::new(Box::new(runner), options.dry_run));
    let prompter: Rc<dyn Prompter> = Rc::new(prompter);

    Orchestrator::builder()
        .options(options)
        .package(package)
        .exec(exec)
        .prompter(prompter)
        .build()
        .unwrap()
}

/// Runs a full release of `name` and returns the outcome with the command
/// log.
pub async fn run_release(
    repo: &TestRepo,
    name: &str,
    options: Rc<ReleaseOptions>,
    runner: RecordingRunner,
    prompter: MockPrompter,
) -> (crate::Result<ReleaseOutcome>, CommandLog) {
    let log = runner.log();
    let package = load_package(repo, name).await;
    let mut orchestrator =
        create_test_orchestrator(options, package, runner, prompter);
    (orchestrator.run().await, log)
}
