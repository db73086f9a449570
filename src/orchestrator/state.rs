use std::fmt;

use crate::package::tag::ReleaseTag;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    SelectVersion,
    Confirm,
    Test,
    Bump,
    Build,
    Changelog,
    Commit,
    Publish,
    Push,
    Done,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::SelectVersion => "select version",
            Stage::Confirm => "confirm",
            Stage::Test => "test",
            Stage::Bump => "bump version",
            Stage::Build => "build",
            Stage::Changelog => "changelog",
            Stage::Commit => "commit",
            Stage::Publish => "publish",
            Stage::Push => "push",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What a single release run has done so far. Rollback only undoes the
/// steps recorded here.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    pub stage: Stage,
    pub tag: Option<ReleaseTag>,
    pub manifest_written: bool,
    pub commit_created: bool,
    pub tag_created: bool,
}

impl RunState {
    pub fn enter(&mut self, stage: Stage) {
        self.stage = stage;
    }

    /// True once the run has touched anything on disk or in git
    pub fn has_mutations(&self) -> bool {
        self.manifest_written || self.commit_created || self.tag_created
    }
}
