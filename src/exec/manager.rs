//! Manager that wraps command runner implementations
use log::*;

use crate::{
    Result,
    exec::{
        request::{CommandOutput, CommandRequest},
        traits::CommandRunner,
    },
};

/// Single gate for dry-run mode. Collaborators call [`ExecManager::run`] for
/// read-only or dry-run aware commands and [`ExecManager::run_if_not_dry`]
/// for anything that mutates repository state.
pub struct ExecManager {
    runner: Box<dyn CommandRunner>,
    dry_run: bool,
}

impl ExecManager {
    pub fn new(runner: Box<dyn CommandRunner>, dry_run: bool) -> Self {
        Self { runner, dry_run }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Always executes the command, dry run or not.
    pub async fn run(&self, req: CommandRequest) -> Result<CommandOutput> {
        debug!("executing: {req}");
        self.runner.run(req).await
    }

    /// Executes the command unless in dry-run mode, where it is only logged.
    pub async fn run_if_not_dry(
        &self,
        req: CommandRequest,
    ) -> Result<CommandOutput> {
        if self.dry_run {
            match req.cwd.as_ref() {
                Some(cwd) => {
                    info!("dry_run: would run: {req} (in {})", cwd.display())
                }
                None => info!("dry_run: would run: {req}"),
            }
            return Ok(CommandOutput::default());
        }

        self.run(req).await
    }
}
