//! Common test helper functions shared across test modules.
//!
//! Provides a command runner that records every external invocation and
//! fixtures for on-disk package layouts.
use async_trait::async_trait;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tempfile::TempDir;

use crate::{
    ReleaseError, Result,
    exec::{
        request::{CommandOutput, CommandRequest},
        traits::CommandRunner,
    },
};

type Responder =
    Box<dyn Fn(&CommandRequest) -> Result<CommandOutput> + Send + Sync>;

/// Shared handle to the commands a [`RecordingRunner`] has seen.
#[derive(Debug, Clone, Default)]
pub struct CommandLog(Arc<Mutex<Vec<CommandRequest>>>);

impl CommandLog {
    pub fn requests(&self) -> Vec<CommandRequest> {
        self.0.lock().unwrap().clone()
    }

    /// Rendered command lines, e.g. `git tag v1.0.0`
    pub fn commands(&self) -> Vec<String> {
        self.requests().iter().map(ToString::to_string).collect()
    }

    pub fn contains(&self, command: &str) -> bool {
        self.commands().iter().any(|c| c == command)
    }

    /// Index of the first command starting with `prefix`
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.commands().iter().position(|c| c.starts_with(prefix))
    }

    fn record(&self, req: CommandRequest) {
        self.0.lock().unwrap().push(req);
    }
}

/// Command runner that records requests and answers them with a
/// configurable responder. By default `git diff` reports a change and
/// everything else succeeds with empty output.
pub struct RecordingRunner {
    log: CommandLog,
    responder: Responder,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::with_responder(default_response)
    }

    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&CommandRequest) -> Result<CommandOutput> + Send + Sync + 'static,
    {
        Self {
            log: CommandLog::default(),
            responder: Box::new(responder),
        }
    }

    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, req: CommandRequest) -> Result<CommandOutput> {
        let response = (self.responder)(&req);
        self.log.record(req);
        response
    }
}

/// `git diff` reports a modified manifest, everything else succeeds.
pub fn default_response(req: &CommandRequest) -> Result<CommandOutput> {
    if is_command(req, "git", "diff") {
        return Ok(CommandOutput {
            stdout: "diff --git a/package.json b/package.json".into(),
            stderr: String::new(),
        });
    }
    Ok(CommandOutput::default())
}

/// True when `req` runs `program` with `subcommand` as first argument
pub fn is_command(
    req: &CommandRequest,
    program: &str,
    subcommand: &str,
) -> bool {
    req.program == program
        && req.args.first().is_some_and(|arg| arg == subcommand)
}

/// Failure as reported by [`crate::exec::system::SystemRunner`].
pub fn command_error(req: &CommandRequest, stderr: &str) -> ReleaseError {
    ReleaseError::command_failed(req.to_string(), "exit code 1", stderr)
}

/// Writes a `package.json` with the given name and version.
pub fn write_manifest(dir: &Path, name: &str, version: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("package.json"),
        format!(
            "{{\n  \"name\": \"{name}\",\n  \"version\": \"{version}\",\n  \"main\": \"index.js\"\n}}\n"
        ),
    )
    .unwrap();
}

/// Reads back the `version` field of the manifest in `dir`.
pub fn read_manifest_version(dir: &Path) -> String {
    let content = fs::read_to_string(dir.join("package.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    value["version"].as_str().unwrap().to_string()
}

/// Temporary repository with a root package (`mono@1.0.0`) and two
/// packages under `packages/`: `ui@1.2.3` and `utils@0.1.0-beta.0`.
pub struct TestRepo {
    pub dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "mono", "1.0.0");
        write_manifest(
            &dir.path().join("packages").join("ui"),
            "@acme/ui",
            "1.2.3",
        );
        write_manifest(
            &dir.path().join("packages").join("utils"),
            "@acme/utils",
            "0.1.0-beta.0",
        );
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.root().join("packages").join(name)
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
