//! Candidate package listing.
use serde_json::Value;
use std::path::PathBuf;
use tokio::fs;

use crate::{
    Result,
    cli::Args,
    command::common::{self, Workspace},
    package::{MANIFEST_FILE, descriptor::is_private, resolver::PackageResolver},
    parallel::run_parallel,
};

/// One line of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRow {
    pub name: String,
    pub version: Option<String>,
    pub private: bool,
    /// Why the manifest could not be read
    pub problem: Option<String>,
}

impl PackageRow {
    pub fn render(&self) -> String {
        if let Some(problem) = self.problem.as_ref() {
            return format!("{:<24} ({problem})", self.name);
        }

        let version = self.version.as_deref().unwrap_or("-");
        let private = if self.private { " [private]" } else { "" };
        format!("{:<24} {version}{private}", self.name)
    }
}

pub async fn execute(args: &Args) -> Result<()> {
    let workspace = common::load_workspace(args).await?;

    for row in collect(&workspace).await? {
        println!("{}", row.render());
    }

    Ok(())
}

/// Read every candidate's manifest, at most `concurrency` at a time.
pub async fn collect(workspace: &Workspace) -> Result<Vec<PackageRow>> {
    let resolver =
        PackageResolver::discover(&workspace.root, &workspace.config).await?;

    let sources: Vec<(String, PathBuf)> = resolver
        .candidates()
        .iter()
        .map(|name| (name.clone(), resolver.package_dir(name)))
        .collect();

    let rows = run_parallel(
        workspace.config.concurrency,
        sources,
        |(name, dir)| async move {
            match read_summary(dir).await {
                Ok((version, private)) => PackageRow {
                    name,
                    version,
                    private,
                    problem: None,
                },
                Err(err) => PackageRow {
                    name,
                    version: None,
                    private: false,
                    problem: Some(err.to_string()),
                },
            }
        },
    )
    .await;

    Ok(rows)
}

async fn read_summary(dir: PathBuf) -> Result<(Option<String>, bool)> {
    let path = dir.join(MANIFEST_FILE);

    if !fs::try_exists(&path).await? {
        return Err(color_eyre::eyre::eyre!("no {MANIFEST_FILE}").into());
    }

    let content = fs::read_to_string(&path).await?;
    let manifest: Value = serde_json::from_str(&content)?;

    let version = manifest
        .get("version")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok((version, is_private(&manifest)))
}
