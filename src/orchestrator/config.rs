use derive_builder::Builder;
use log::*;
use std::path::PathBuf;

use crate::{
    ReleaseError, Result,
    config::{Config, Workflow},
};

#[derive(Debug, Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct ReleaseOptionsParams {
    pub config: Config,
    pub root: PathBuf,
    #[builder(default)]
    pub dry_run: bool,
    #[builder(default)]
    pub dist_tag: Option<String>,
    #[builder(default)]
    pub preid: Option<String>,
    /// Overrides the workflow from the config file
    #[builder(default)]
    pub workflow: Option<Workflow>,
}

impl ReleaseOptionsParamsBuilder {
    pub fn build(&self) -> Result<ReleaseOptions> {
        let params = self._build().map_err(|e| {
            ReleaseError::invalid_config(format!(
                "Failed to build release options: {}",
                e
            ))
        })?;
        Ok(ReleaseOptions::new(params))
    }
}

/// Everything a release run needs to know, resolved once from command line
/// flags and the config file and then handed to the orchestrator.
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    pub root: PathBuf,
    pub dry_run: bool,
    /// Registry distribution tag
    pub dist_tag: Option<String>,
    /// Pre-release identifier override, only set for workflows honoring it
    pub preid: Option<String>,
    pub workflow: Workflow,
    pub config: Config,
}

impl ReleaseOptions {
    pub fn builder() -> ReleaseOptionsParamsBuilder {
        ReleaseOptionsParamsBuilder::default()
    }

    pub fn new(params: ReleaseOptionsParams) -> Self {
        let workflow = params.workflow.unwrap_or(params.config.workflow);

        let preid = params.preid.filter(|id| !id.is_empty());
        let preid = match preid {
            Some(id) if !workflow.accepts_preid() => {
                warn!(
                    "--preid {id} is ignored by the {:?} workflow",
                    workflow
                );
                None
            }
            other => other,
        };

        Self {
            root: params.root,
            dry_run: params.dry_run,
            dist_tag: params.dist_tag.filter(|tag| !tag.is_empty()),
            preid,
            workflow,
            config: params.config,
        }
    }

    pub fn scope_prefix(&self) -> Option<&str> {
        self.config.scope_prefix.as_deref()
    }
}
