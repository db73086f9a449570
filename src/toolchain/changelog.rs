use std::{path::Path, rc::Rc};

use crate::{
    Result,
    config::ChangelogConfig,
    exec::{manager::ExecManager, request::CommandRequest},
};

/// conventional-changelog, rewritten in place in the package directory.
pub struct Changelog {
    exec: Rc<ExecManager>,
    config: ChangelogConfig,
}

impl Changelog {
    pub fn new(exec: Rc<ExecManager>, config: ChangelogConfig) -> Self {
        Self { exec, config }
    }

    /// Generator arguments scoped to the package's commit path and, for
    /// sub-packages, to the package name.
    pub fn args(&self, scope: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "conventional-changelog".to_string(),
            "-p".into(),
            self.config.preset.clone(),
            "-i".into(),
            self.config.infile.clone(),
            "-s".into(),
            "--commit-path".into(),
            ".".into(),
        ];

        if let Some(scope) = scope {
            args.push("--lerna-package".into());
            args.push(scope.into());
        }

        args
    }

    /// Runs in dry-run mode too, so the operator can inspect the result.
    pub async fn generate(
        &self,
        dir: &Path,
        scope: Option<&str>,
    ) -> Result<()> {
        let req = CommandRequest::new(&self.config.runner)
            .args(self.args(scope))
            .cwd(dir);
        self.exec.run(req).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{request::CommandOutput, traits::MockCommandRunner};

    fn changelog(runner: MockCommandRunner) -> Changelog {
        let exec = Rc::new(ExecManager::new(Box::new(runner), true));
        Changelog::new(exec, ChangelogConfig::default())
    }

    #[test]
    fn root_changelog_is_not_scoped() {
        let args = changelog(MockCommandRunner::new()).args(None);
        assert_eq!(
            args,
            vec![
                "conventional-changelog",
                "-p",
                "angular",
                "-i",
                "CHANGELOG.md",
                "-s",
                "--commit-path",
                ".",
            ]
        );
    }

    #[test]
    fn package_changelog_is_scoped() {
        let args = changelog(MockCommandRunner::new()).args(Some("ui"));
        assert_eq!(&args[8..], &["--lerna-package", "ui"]);
    }

    #[tokio::test]
    async fn generate_runs_even_in_dry_run() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|req| {
                req.program == "npx"
                    && req.cwd.as_deref() == Some(Path::new("/repo/ui"))
                    && req.args.last() == Some(&"ui".to_string())
            })
            .times(1)
            .returning(|_| Ok(CommandOutput::default()));

        changelog(runner)
            .generate(Path::new("/repo/ui"), Some("ui"))
            .await
            .unwrap();
    }
}
