//! Typed wrappers around the external tools a release drives.
//!
//! Each wrapper only knows how to build the command line for its tool and
//! which of its commands must respect dry-run mode; execution goes through
//! the shared [`crate::exec::manager::ExecManager`].
use std::rc::Rc;

use crate::{config::Config, exec::manager::ExecManager};

/// conventional-changelog invocation.
pub mod changelog;

/// Version control commands.
pub mod git;

/// Package registry publishing.
pub mod registry;

/// Package manager test and build scripts.
pub mod scripts;

/// All collaborators for one release run, sharing one exec manager.
pub struct Toolchain {
    pub git: git::Git,
    pub registry: registry::Registry,
    pub changelog: changelog::Changelog,
    pub scripts: scripts::Scripts,
}

impl Toolchain {
    pub fn new(
        exec: Rc<ExecManager>,
        config: &Config,
        root: &std::path::Path,
    ) -> Self {
        Self {
            git: git::Git::new(Rc::clone(&exec), root, &config.remote),
            registry: registry::Registry::new(
                Rc::clone(&exec),
                &config.package_manager,
                config.registry.clone(),
            ),
            changelog: changelog::Changelog::new(
                Rc::clone(&exec),
                config.changelog.clone(),
            ),
            scripts: scripts::Scripts::new(exec, &config.package_manager),
        }
    }
}
