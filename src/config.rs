//! Configuration loading and parsing for `pkgrel.toml` files.
//!
//! Every field is optional: a repository without a config file gets the
//! defaults of a pnpm monorepo publishing to the public npm registry.
use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::Result;

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "pkgrel.toml";
/// Default directory holding the candidate packages.
pub const DEFAULT_PACKAGES_DIR: &str = "packages";
/// Sentinel package name that refers to the repository root.
pub const DEFAULT_ROOT_PACKAGE: &str = "release";
/// Public npm registry.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org/";
/// Default cap for concurrent manifest loads.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Release workflow variant.
#[derive(
    Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    /// Packages are versioned independently and tagged in the commit stage
    #[default]
    Monorepo,
    /// The root package is the main release; tags are created right before
    /// pushing and sub-packages skip the test stage
    Polyrepo,
}

impl Workflow {
    /// Whether the test stage runs for a package (dry run aside)
    pub fn runs_tests(&self, is_root: bool) -> bool {
        match self {
            Workflow::Monorepo => true,
            Workflow::Polyrepo => is_root,
        }
    }

    /// Whether the tag is created together with the release commit rather
    /// than in the push stage
    pub fn tags_with_commit(&self) -> bool {
        matches!(self, Workflow::Monorepo)
    }

    /// Whether a `--preid` override is honored
    pub fn accepts_preid(&self) -> bool {
        matches!(self, Workflow::Polyrepo)
    }
}

/// Changelog generator settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Program used to launch the generator
    pub runner: String,
    /// conventional-changelog preset
    pub preset: String,
    /// Changelog file, relative to the package directory
    pub infile: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            runner: "npx".into(),
            preset: "angular".into(),
            infile: "CHANGELOG.md".into(),
        }
    }
}

/// Package registry settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    pub url: String,
    pub access: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.into(),
            access: "public".into(),
        }
    }
}

/// Root configuration structure for `pkgrel.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Release workflow variant.
    pub workflow: Workflow,
    /// Directory, relative to the root, whose subdirectories are packages.
    ///
    /// Defaults to `packages`, so `ui` lives at `<root>/packages/ui`. Set it
    /// to `"."` to treat the root's own subdirectories as the packages.
    pub packages_dir: String,
    /// Package name that selects the repository root itself.
    pub root_package: String,
    /// Prefix stripped from package names in tags, commits and changelogs.
    pub scope_prefix: Option<String>,
    /// Program used to test, build and publish packages.
    pub package_manager: String,
    /// Remote that release tags are pushed to.
    pub remote: String,
    /// Concurrency cap when loading many manifests at once.
    pub concurrency: usize,
    pub changelog: ChangelogConfig,
    pub registry: RegistryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workflow: Workflow::default(),
            packages_dir: DEFAULT_PACKAGES_DIR.into(),
            root_package: DEFAULT_ROOT_PACKAGE.into(),
            scope_prefix: None,
            package_manager: "pnpm".into(),
            remote: "origin".into(),
            concurrency: DEFAULT_CONCURRENCY,
            changelog: ChangelogConfig::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl Config {
    /// Load `pkgrel.toml` from the root directory, falling back to defaults
    /// when the file does not exist.
    pub async fn load(root: &Path) -> Result<Self> {
        let path = root.join(DEFAULT_CONFIG_FILE);

        if !fs::try_exists(&path).await? {
            log::debug!("no {DEFAULT_CONFIG_FILE} found: using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).await?;
        let config: Config = toml::from_str(&content)?;

        if config.root_package.is_empty() {
            return Err(crate::ReleaseError::invalid_config(
                "root_package must not be empty",
            ));
        }

        Ok(config)
    }

    /// Absolute directory containing the candidate packages
    pub fn packages_root(&self, root: &Path) -> PathBuf {
        root.join(&self.packages_dir)
    }
}

/// Walk upward from `start` to the first directory containing `file`.
pub fn find_root_dir(start: &Path, file: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(file).exists())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    #[test]
    fn loads_defaults() {
        let config = Config::default();
        assert_eq!(config.workflow, Workflow::Monorepo);
        assert_eq!(config.packages_dir, "packages");
        assert_eq!(config.root_package, "release");
        assert_eq!(config.registry.url, "https://registry.npmjs.org/");
        assert_eq!(config.changelog.preset, "angular");
    }

    #[test]
    fn parses_partial_toml() {
        let content = r#"
workflow = "polyrepo"
scope_prefix = "common/"

[registry]
url = "https://npm.example.com/"
"#;
        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.workflow, Workflow::Polyrepo);
        assert_eq!(config.scope_prefix.as_deref(), Some("common/"));
        assert_eq!(config.registry.url, "https://npm.example.com/");
        assert_eq!(config.registry.access, "public");
        assert_eq!(config.package_manager, "pnpm");
    }

    #[test]
    fn workflow_variant_rules() {
        assert!(Workflow::Monorepo.runs_tests(false));
        assert!(Workflow::Polyrepo.runs_tests(true));
        assert!(!Workflow::Polyrepo.runs_tests(false));
        assert!(Workflow::Monorepo.tags_with_commit());
        assert!(!Workflow::Polyrepo.tags_with_commit());
        assert!(Workflow::Polyrepo.accepts_preid());
        assert!(!Workflow::Monorepo.accepts_preid());
    }

    #[tokio::test]
    async fn load_falls_back_to_default_without_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load(tmp.path()).await.unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn load_reads_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        std_fs::write(
            tmp.path().join(DEFAULT_CONFIG_FILE),
            "packages_dir = \".\"\nremote = \"upstream\"\n",
        )
        .unwrap();

        let config = Config::load(tmp.path()).await.unwrap();
        assert_eq!(config.packages_dir, ".");
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.packages_root(tmp.path()), tmp.path().join("."));
    }

    #[tokio::test]
    async fn load_rejects_empty_root_package() {
        let tmp = tempfile::tempdir().unwrap();
        std_fs::write(
            tmp.path().join(DEFAULT_CONFIG_FILE),
            "root_package = \"\"\n",
        )
        .unwrap();

        let err = Config::load(tmp.path()).await.unwrap_err();
        assert!(matches!(err, crate::ReleaseError::InvalidConfig(_)));
    }

    #[test]
    fn finds_root_dir_by_marker_file() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("packages").join("ui");
        std_fs::create_dir_all(&nested).unwrap();
        std_fs::write(tmp.path().join(DEFAULT_CONFIG_FILE), "").unwrap();

        let found = find_root_dir(&nested, DEFAULT_CONFIG_FILE).unwrap();
        assert_eq!(found, tmp.path());
    }

    #[test]
    fn find_root_dir_returns_none_without_marker() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(find_root_dir(tmp.path(), "no-such-marker.toml").is_none());
    }
}
