use std::{fmt, path::PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Describes one external program invocation.
pub struct CommandRequest {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory, or the current directory when unset
    pub cwd: Option<PathBuf>,
    /// Pipe stdout/stderr back to the caller instead of inheriting the
    /// terminal
    pub capture: bool,
}

impl CommandRequest {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn capture(mut self) -> Self {
        self.capture = true;
        self
    }

    /// Program followed by its arguments, e.g. `["git", "tag", "v1.0.0"]`
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for CommandRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Output of a successfully completed command. Streams are empty unless the
/// request asked for capture.
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}
