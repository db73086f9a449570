//! Interactive single-package release command.
use log::*;
use std::rc::Rc;

use crate::{
    Result,
    cli::Args,
    command::common::{self, Workspace},
    exec::{manager::ExecManager, system::SystemRunner},
    orchestrator::{Orchestrator, ReleaseOutcome, config::ReleaseOptions},
    package::resolver::PackageResolver,
    prompt::{Prompter, terminal::TerminalPrompter},
};

/// Execute the release command against the real terminal and system tools.
pub async fn execute(args: &Args) -> Result<ReleaseOutcome> {
    let workspace = common::load_workspace(args).await?;

    let prompter = TerminalPrompter::new();
    if !prompter.is_interactive() {
        warn!("no interactive terminal: prompts will be treated as cancelled");
    }

    let exec =
        Rc::new(ExecManager::new(Box::new(SystemRunner::new()), args.dry));

    run(args, workspace, exec, Rc::new(prompter)).await
}

/// Resolve the package named by `args` and run its release pipeline.
pub async fn run(
    args: &Args,
    workspace: Workspace,
    exec: Rc<ExecManager>,
    prompter: Rc<dyn Prompter>,
) -> Result<ReleaseOutcome> {
    let options = Rc::new(
        ReleaseOptions::builder()
            .config(workspace.config)
            .root(workspace.root)
            .dry_run(args.dry)
            .dist_tag(args.tag.clone())
            .preid(args.preid.clone())
            .workflow(args.workflow)
            .build()?,
    );

    let resolver =
        PackageResolver::discover(&options.root, &options.config).await?;

    let package = resolver
        .resolve(args.package.as_deref(), prompter.as_ref())
        .await
        .inspect_err(|err| error!("✖ {err}"))?;

    if options.dry_run {
        info!("dry run: git mutations will only be logged");
    }

    info!(
        "releasing {} ({}) from {} using the {:?} workflow",
        package.name,
        package.manifest_name(),
        package.current_version,
        options.workflow
    );

    let mut orchestrator = Orchestrator::builder()
        .options(options)
        .package(package)
        .exec(exec)
        .prompter(prompter)
        .build()?;

    orchestrator.run().await
}
