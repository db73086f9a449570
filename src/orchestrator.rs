//! The release pipeline for a single resolved package.
//!
//! Stages run strictly in order: select version, confirm, test, bump,
//! build, changelog, commit, publish, push. Any error after the run starts
//! triggers a best-effort local rollback. A registry publish or remote push
//! that already happened is never undone.
use derive_builder::Builder;
use log::*;
use semver::Version;
use std::rc::Rc;

use crate::{
    ReleaseError, Result,
    exec::manager::ExecManager,
    orchestrator::{
        config::ReleaseOptions,
        state::{RunState, Stage},
    },
    package::{
        descriptor::PackageDescriptor,
        tag::{ReleaseTag, commit_message, release_target},
    },
    prompt::{ConfirmPrompt, InputPrompt, Prompter, SelectOption, SelectPrompt},
    toolchain::Toolchain,
    version::{self, CUSTOM_CHOICE},
};

pub mod config;
pub mod state;


/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Released { tag: ReleaseTag, dry_run: bool },
    /// The operator declined the confirmation; nothing was changed
    Cancelled,
}

#[derive(Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct OrchestratorParams {
    pub options: Rc<ReleaseOptions>,
    pub package: PackageDescriptor,
    pub exec: Rc<ExecManager>,
    pub prompter: Rc<dyn Prompter>,
}

impl OrchestratorParamsBuilder {
    pub fn build(&self) -> Result<Orchestrator> {
        let params = self._build().map_err(|e| {
            ReleaseError::invalid_config(format!(
                "Failed to build release orchestrator: {}",
                e
            ))
        })?;
        Ok(Orchestrator::new(params))
    }
}

pub struct Orchestrator {
    options: Rc<ReleaseOptions>,
    package: PackageDescriptor,
    exec: Rc<ExecManager>,
    prompter: Rc<dyn Prompter>,
    toolchain: Toolchain,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorParamsBuilder {
        OrchestratorParamsBuilder::default()
    }

    pub fn new(params: OrchestratorParams) -> Self {
        let toolchain = Toolchain::new(
            Rc::clone(&params.exec),
            &params.options.config,
            &params.options.root,
        );

        Self {
            options: params.options,
            package: params.package,
            exec: params.exec,
            prompter: params.prompter,
            toolchain,
        }
    }

    /// Run the full pipeline. On failure the error is logged, local changes
    /// made by this run are rolled back, and the error is returned.
    pub async fn run(&mut self) -> Result<ReleaseOutcome> {
        let mut state = RunState::default();

        match self.execute(&mut state).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                error!(
                    "✖ release of {} failed at the {} stage: {err}",
                    self.package.name, state.stage
                );
                self.rollback(&state).await;
                Err(err)
            }
        }
    }

    async fn execute(
        &mut self,
        state: &mut RunState,
    ) -> Result<ReleaseOutcome> {
        self.enter(state, Stage::SelectVersion);
        let version = self.select_version().await?;
        let tag = ReleaseTag::new(
            &self.package,
            &version,
            self.options.scope_prefix(),
        );
        state.tag = Some(tag.clone());

        self.enter(state, Stage::Confirm);
        if !self.confirm(&tag).await? {
            warn!("release of {tag} cancelled");
            return Ok(ReleaseOutcome::Cancelled);
        }

        self.enter(state, Stage::Test);
        self.test().await?;

        self.enter(state, Stage::Bump);
        self.package.set_version(&version);
        self.package.write_manifest().await?;
        state.manifest_written = true;
        info!(
            "updated {} from {} to {}",
            self.package.manifest_path.display(),
            self.package.current_version,
            version
        );

        self.enter(state, Stage::Build);
        self.build().await?;

        self.enter(state, Stage::Changelog);
        self.toolchain
            .changelog
            .generate(&self.package.directory, self.changelog_scope())
            .await?;

        self.enter(state, Stage::Commit);
        self.commit(state, &version, &tag).await?;

        self.enter(state, Stage::Publish);
        self.publish(&version).await?;

        self.enter(state, Stage::Push);
        self.push(state, &tag).await?;

        self.enter(state, Stage::Done);
        if self.options.dry_run {
            info!("Dry run finished - run git diff to see package changes");
        } else {
            info!("Release successfully: {tag}");
        }

        Ok(ReleaseOutcome::Released {
            tag,
            dry_run: self.options.dry_run,
        })
    }

    fn enter(&self, state: &mut RunState, stage: Stage) {
        state.enter(stage);
        info!("▶ {} ({})", stage, self.package.name);
    }

    async fn select_version(&self) -> Result<Version> {
        let current = &self.package.current_version;
        let preid =
            version::resolve_preid(current, self.options.preid.as_deref());
        let candidates = version::candidates(current, preid.as_deref())?;

        let mut options: Vec<SelectOption> = candidates
            .iter()
            .map(|c| SelectOption::new(c.label(), c.version.to_string()))
            .collect();
        options.push(SelectOption::plain(CUSTOM_CHOICE));

        let choice = self
            .prompter
            .select(SelectPrompt {
                message: "Select release type:".into(),
                options,
            })
            .await?
            .ok_or_else(|| {
                ReleaseError::InvalidVersion("no release type selected".into())
            })?;

        if choice != CUSTOM_CHOICE {
            return version::parse_target_version(&choice);
        }

        let input = self
            .prompter
            .input(InputPrompt {
                message: "Input custom version:".into(),
            })
            .await?
            .unwrap_or_default();

        version::parse_target_version(&input)
    }

    async fn confirm(&self, tag: &ReleaseTag) -> Result<bool> {
        self.prompter
            .confirm(ConfirmPrompt {
                message: format!("Confirm release {tag}?"),
            })
            .await
    }

    async fn test(&self) -> Result<()> {
        if self.options.dry_run {
            warn!("dry run: tests skipped");
            return Ok(());
        }

        if !self.options.workflow.runs_tests(self.package.is_root) {
            warn!("tests skipped for {}", self.package.name);
            return Ok(());
        }

        self.toolchain.scripts.test(&self.options.root).await
    }

    async fn build(&self) -> Result<()> {
        if self.options.dry_run {
            warn!("dry run: build skipped");
            return Ok(());
        }

        self.toolchain.scripts.build(&self.package.directory).await
    }

    fn changelog_scope(&self) -> Option<&str> {
        if self.package.is_root {
            return None;
        }
        Some(release_target(&self.package, self.options.scope_prefix()))
    }

    async fn commit(
        &self,
        state: &mut RunState,
        version: &Version,
        tag: &ReleaseTag,
    ) -> Result<()> {
        let git = &self.toolchain.git;

        if git.diff().await?.trim().is_empty() {
            warn!("No changes to commit");
            return Ok(());
        }

        let message =
            commit_message(&self.package, version, self.options.scope_prefix());

        git.add_all().await?;
        git.commit(&message).await?;
        state.commit_created = true;

        if self.options.workflow.tags_with_commit() {
            git.tag(tag.as_str()).await?;
            state.tag_created = true;
        }

        Ok(())
    }

    async fn publish(&self, version: &Version) -> Result<()> {
        let result = self
            .toolchain
            .registry
            .publish(
                &self.package.directory,
                version,
                self.options.dist_tag.as_deref(),
            )
            .await;

        match result {
            Ok(()) => {
                info!("published {}@{version}", self.package.manifest_name());
                Ok(())
            }
            Err(err) if err.is_already_published() => {
                warn!(
                    "{}@{version} was previously published: skipping",
                    self.package.manifest_name()
                );
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    async fn push(&self, state: &mut RunState, tag: &ReleaseTag) -> Result<()> {
        let git = &self.toolchain.git;

        if !self.options.workflow.tags_with_commit() {
            git.tag(tag.as_str()).await?;
            state.tag_created = true;
        }

        if state.tag_created {
            git.push_ref(&tag.ref_name()).await?;
        } else {
            warn!("no tag was created: skipping tag push");
        }

        git.push().await
    }

    /// Undo local changes recorded in `state`. Failures are logged only.
    async fn rollback(&mut self, state: &RunState) {
        if !state.has_mutations() {
            return;
        }

        warn!("rolling back local changes for {}", self.package.name);
        let git = &self.toolchain.git;

        if state.commit_created
            && let Err(err) = git.reset_hard("HEAD~1").await
        {
            error!("rollback: failed to reset release commit: {err}");
        }

        // the hard reset only restores the manifest when it really ran
        if state.manifest_written
            && (!state.commit_created || self.exec.dry_run())
        {
            let original = self.package.current_version.clone();
            self.package.set_version(&original);
            if let Err(err) = self.package.write_manifest().await {
                error!("rollback: failed to restore manifest: {err}");
            }
        }

        if state.tag_created
            && let Some(tag) = state.tag.as_ref()
            && let Err(err) = git.delete_tag(tag.as_str()).await
        {
            error!("rollback: failed to delete tag {tag}: {err}");
        }
    }
}
