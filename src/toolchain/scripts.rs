use std::{path::Path, rc::Rc};

use crate::{
    Result,
    exec::{manager::ExecManager, request::CommandRequest},
};

/// `<package manager> test` and `<package manager> build`. Callers skip
/// these entirely in dry-run mode.
pub struct Scripts {
    exec: Rc<ExecManager>,
    program: String,
}

impl Scripts {
    pub fn new(exec: Rc<ExecManager>, program: &str) -> Self {
        Self {
            exec,
            program: program.to_string(),
        }
    }

    pub async fn test(&self, dir: &Path) -> Result<()> {
        self.script("test", dir).await
    }

    pub async fn build(&self, dir: &Path) -> Result<()> {
        self.script("build", dir).await
    }

    async fn script(&self, name: &str, dir: &Path) -> Result<()> {
        let req = CommandRequest::new(&self.program).args([name]).cwd(dir);
        self.exec.run(req).await?;
        Ok(())
    }
}
