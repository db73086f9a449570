//! CLI argument parsing.
use clap::Parser;
use std::{env, path::PathBuf};

use crate::{
    Result,
    config::{DEFAULT_CONFIG_FILE, Workflow, find_root_dir},
};

/// Interactively release one package: pick a version, test, build,
/// generate the changelog, commit, publish and push.
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Package name, or a fragment of one, to release.
    pub package: Option<String>,

    #[arg(short, long, default_value_t = false)]
    /// Log git mutations instead of running them; skips tests and build.
    pub dry: bool,

    #[arg(short = 't', long = "tag")]
    /// Registry distribution tag to publish under.
    pub tag: Option<String>,

    #[arg(short, long)]
    /// Pre-release identifier, e.g. "beta" (polyrepo workflow only).
    pub preid: Option<String>,

    #[arg(long, value_enum)]
    /// Override the workflow from pkgrel.toml.
    pub workflow: Option<Workflow>,

    #[arg(long)]
    /// Repository root. Defaults to the nearest directory containing
    /// pkgrel.toml, or the current directory.
    pub root: Option<PathBuf>,

    #[arg(short, long, default_value_t = false)]
    /// List candidate packages with their versions and exit.
    pub list: bool,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    pub fn resolve_root(&self) -> Result<PathBuf> {
        if let Some(root) = self.root.as_ref() {
            return Ok(root.clone());
        }

        let cwd = env::current_dir()?;
        Ok(find_root_dir(&cwd, DEFAULT_CONFIG_FILE).unwrap_or(cwd))
    }
}
