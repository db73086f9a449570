//! Runner backed by real child processes.
use async_trait::async_trait;
use log::*;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

use crate::{
    ReleaseError, Result,
    exec::{
        request::{CommandOutput, CommandRequest},
        traits::CommandRunner,
    },
};

/// Spawns each request with `tokio::process`. Uncaptured commands inherit
/// the terminal so tool output streams to the operator as it happens.
#[derive(Debug, Default)]
pub struct SystemRunner {}

impl SystemRunner {
    pub fn new() -> Self {
        Self {}
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".into(),
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, req: CommandRequest) -> Result<CommandOutput> {
        debug!("running: {req}");

        let mut command = Command::new(&req.program);
        command.args(&req.args);

        if let Some(cwd) = req.cwd.as_ref() {
            command.current_dir(cwd);
        }

        if !req.capture {
            let status = command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .await?;

            if !status.success() {
                return Err(ReleaseError::command_failed(
                    req.to_string(),
                    describe_status(status),
                    "",
                ));
            }

            return Ok(CommandOutput::default());
        }

        let output = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(ReleaseError::command_failed(
                req.to_string(),
                describe_status(output.status),
                stderr,
            ));
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
