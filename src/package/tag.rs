use semver::Version;
use std::fmt;

use crate::package::descriptor::PackageDescriptor;

/// Package name used in tags, commit scopes and changelog scopes, with the
/// configured scope prefix removed.
pub fn release_target<'a>(
    package: &'a PackageDescriptor,
    scope_prefix: Option<&str>,
) -> &'a str {
    scope_prefix
        .filter(|prefix| !prefix.is_empty())
        .and_then(|prefix| package.name.strip_prefix(prefix))
        .unwrap_or(&package.name)
}

/// Version control tag for a release: `v{version}` for the root package,
/// `{target}@{version}` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag(String);

impl ReleaseTag {
    pub fn new(
        package: &PackageDescriptor,
        version: &Version,
        scope_prefix: Option<&str>,
    ) -> Self {
        if package.is_root {
            return Self(format!("v{version}"));
        }
        Self(format!("{}@{version}", release_target(package, scope_prefix)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully qualified ref pushed to the remote
    pub fn ref_name(&self) -> String {
        format!("refs/tags/{}", self.0)
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Release commit message embedding the package and new version.
pub fn commit_message(
    package: &PackageDescriptor,
    version: &Version,
    scope_prefix: Option<&str>,
) -> String {
    if package.is_root {
        return format!("release: v{version}");
    }
    format!(
        "release({}): v{version}",
        release_target(package, scope_prefix)
    )
}
