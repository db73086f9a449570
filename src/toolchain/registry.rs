use log::*;
use regex::Regex;
use std::{path::Path, rc::Rc, sync::LazyLock};

use crate::{
    ReleaseError, Result,
    config::RegistryConfig,
    exec::{manager::ExecManager, request::CommandRequest},
};

static ALREADY_PUBLISHED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"previously published").unwrap());

/// Publishes a package directory with the package manager.
pub struct Registry {
    exec: Rc<ExecManager>,
    program: String,
    config: RegistryConfig,
}

impl Registry {
    pub fn new(
        exec: Rc<ExecManager>,
        program: &str,
        config: RegistryConfig,
    ) -> Self {
        Self {
            exec,
            program: program.to_string(),
            config,
        }
    }

    /// Publish arguments: access level, registry URL and git-check bypass,
    /// then `--dry-run` and `--tag <dist_tag>` when applicable.
    pub fn publish_args(&self, dist_tag: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "publish".to_string(),
            "--access".into(),
            self.config.access.clone(),
            "--registry".into(),
            self.config.url.clone(),
            "--no-git-checks".into(),
        ];

        if self.exec.dry_run() {
            args.push("--dry-run".into());
        }

        if let Some(tag) = dist_tag {
            args.push("--tag".into());
            args.push(tag.into());
        }

        args
    }

    /// Publishes the package in `dir`. The registry's own dry-run flag covers
    /// dry-run mode, so this command is never gated. A rejection because the
    /// version already exists is reported as
    /// [`ReleaseError::AlreadyPublished`].
    pub async fn publish(
        &self,
        dir: &Path,
        version: &semver::Version,
        dist_tag: Option<&str>,
    ) -> Result<()> {
        let req = CommandRequest::new(&self.program)
            .args(self.publish_args(dist_tag))
            .cwd(dir)
            .capture();

        match self.exec.run(req).await {
            Ok(output) => {
                debug!("publish output: {}", output.stdout.trim());
                Ok(())
            }
            Err(err)
                if err
                    .stderr()
                    .is_some_and(|s| ALREADY_PUBLISHED_REGEX.is_match(s)) =>
            {
                Err(ReleaseError::AlreadyPublished(version.to_string()))
            }
            Err(err) => Err(err),
        }
    }
}
