//! Common functionality shared between commands
use log::*;
use std::path::PathBuf;

use crate::{Result, cli::Args, config::Config};

/// Repository a command operates on.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
}

/// Locate the repository root and load its configuration.
pub async fn load_workspace(args: &Args) -> Result<Workspace> {
    let root = args.resolve_root()?;
    info!("using repository root {}", root.display());

    let config = Config::load(&root).await?;
    debug!("loaded configuration: {:#?}", config);

    Ok(Workspace { root, config })
}
