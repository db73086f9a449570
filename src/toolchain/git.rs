use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{
    Result,
    exec::{manager::ExecManager, request::CommandRequest},
};

/// System `git` invoked in the repository root. Every command that writes
/// to the index, history, tags or remote is dry-run gated.
pub struct Git {
    exec: Rc<ExecManager>,
    root: PathBuf,
    remote: String,
}

impl Git {
    pub fn new(exec: Rc<ExecManager>, root: &Path, remote: &str) -> Self {
        Self {
            exec,
            root: root.to_path_buf(),
            remote: remote.to_string(),
        }
    }

    fn request<I, S>(&self, args: I) -> CommandRequest
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandRequest::new("git").args(args).cwd(&self.root)
    }

    /// Unstaged working tree diff; empty when there is nothing to commit.
    pub async fn diff(&self) -> Result<String> {
        let output = self.exec.run(self.request(["diff"]).capture()).await?;
        Ok(output.stdout)
    }

    pub async fn add_all(&self) -> Result<()> {
        self.exec.run_if_not_dry(self.request(["add", "-A"])).await?;
        Ok(())
    }

    pub async fn commit(&self, message: &str) -> Result<()> {
        self.exec
            .run_if_not_dry(self.request(["commit", "-m", message]))
            .await?;
        Ok(())
    }

    /// Creates a lightweight tag at HEAD.
    pub async fn tag(&self, name: &str) -> Result<()> {
        self.exec.run_if_not_dry(self.request(["tag", name])).await?;
        Ok(())
    }

    pub async fn delete_tag(&self, name: &str) -> Result<()> {
        self.exec
            .run_if_not_dry(self.request(["tag", "-d", name]))
            .await?;
        Ok(())
    }

    /// Pushes a single ref, e.g. `refs/tags/v1.0.0`, to the release remote.
    pub async fn push_ref(&self, refspec: &str) -> Result<()> {
        let args = ["push", self.remote.as_str(), refspec];
        self.exec.run_if_not_dry(self.request(args)).await?;
        Ok(())
    }

    /// Pushes the current branch to its upstream.
    pub async fn push(&self) -> Result<()> {
        self.exec.run_if_not_dry(self.request(["push"])).await?;
        Ok(())
    }

    pub async fn reset_hard(&self, revision: &str) -> Result<()> {
        self.exec
            .run_if_not_dry(self.request(["reset", "--hard", revision]))
            .await?;
        Ok(())
    }
}
