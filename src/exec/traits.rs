//! Traits related to running external commands
use async_trait::async_trait;

use crate::{
    Result,
    exec::request::{CommandOutput, CommandRequest},
};

/// Executes external commands. A non-zero exit status must be reported as
/// [`crate::ReleaseError::CommandFailed`] carrying whatever stderr was
/// captured.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, req: CommandRequest) -> Result<CommandOutput>;
}
