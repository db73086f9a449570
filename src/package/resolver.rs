use log::*;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{
    ReleaseError, Result,
    config::Config,
    package::descriptor::PackageDescriptor,
    prompt::{Prompter, SelectOption, SelectPrompt},
};

/// Outcome of matching an input fragment against the candidate names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Exactly one package matched
    Selected(String),
    /// The operator has to pick from these
    Choose(Vec<String>),
}

/// Locates the package to release from a (possibly empty) name fragment.
///
/// Candidates are the subdirectories of the packages directory plus the
/// root sentinel, which maps to the repository root itself.
#[derive(Debug, Clone)]
pub struct PackageResolver {
    root: PathBuf,
    packages_root: PathBuf,
    root_package: String,
    candidates: Vec<String>,
}

impl PackageResolver {
    pub fn new(root: &Path, config: &Config, candidates: Vec<String>) -> Self {
        Self {
            root: root.to_path_buf(),
            packages_root: config.packages_root(root),
            root_package: config.root_package.clone(),
            candidates,
        }
    }

    /// Build a resolver whose candidates are the non-hidden subdirectories
    /// of the packages directory, sorted, followed by the root sentinel.
    pub async fn discover(root: &Path, config: &Config) -> Result<Self> {
        let packages_root = config.packages_root(root);
        let mut candidates = vec![];

        if fs::try_exists(&packages_root).await? {
            let mut entries = fs::read_dir(&packages_root).await?;
            while let Some(entry) = entries.next_entry().await? {
                let name = entry.file_name().to_string_lossy().to_string();
                if name.starts_with('.') {
                    continue;
                }
                // follows symlinks; a dangling link is skipped
                let is_dir = fs::metadata(entry.path())
                    .await
                    .is_ok_and(|meta| meta.is_dir());
                if is_dir {
                    candidates.push(name);
                }
            }
        } else {
            warn!(
                "packages directory {} does not exist",
                packages_root.display()
            );
        }

        candidates.sort();
        candidates.retain(|c| c != &config.root_package);
        candidates.push(config.root_package.clone());

        debug!("candidate packages: {:?}", candidates);

        Ok(Self::new(root, config, candidates))
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn is_root(&self, name: &str) -> bool {
        name == self.root_package
    }

    /// Directory for a candidate: the repository root for the root
    /// sentinel, otherwise the same-named subdirectory of the packages
    /// directory.
    pub fn package_dir(&self, name: &str) -> PathBuf {
        if self.is_root(name) {
            return self.root.clone();
        }
        self.packages_root.join(name)
    }

    /// Match `input` against the candidates without prompting.
    pub fn match_input(&self, input: Option<&str>) -> Selection {
        let input = input.unwrap_or_default();

        if !input.is_empty() && self.candidates.iter().any(|c| c == input) {
            return Selection::Selected(input.to_string());
        }

        let filtered: Vec<String> = self
            .candidates
            .iter()
            .filter(|c| c.contains(input))
            .cloned()
            .collect();

        match filtered.len() {
            0 => Selection::Choose(self.candidates.clone()),
            1 => Selection::Selected(filtered[0].clone()),
            _ => Selection::Choose(filtered),
        }
    }

    /// Pick a package name, prompting when the input is ambiguous.
    pub async fn select(
        &self,
        input: Option<&str>,
        prompter: &dyn Prompter,
    ) -> Result<String> {
        let options = match self.match_input(input) {
            Selection::Selected(name) => return Ok(name),
            Selection::Choose(options) => options,
        };

        if options.is_empty() {
            return Err(ReleaseError::NoPackageSelected);
        }

        let answer = prompter
            .select(SelectPrompt {
                message: "Select release package:".into(),
                options: options.into_iter().map(SelectOption::plain).collect(),
            })
            .await?;

        answer
            .filter(|name| !name.is_empty())
            .ok_or(ReleaseError::NoPackageSelected)
    }

    /// Select and load the package descriptor.
    pub async fn resolve(
        &self,
        input: Option<&str>,
        prompter: &dyn Prompter,
    ) -> Result<PackageDescriptor> {
        let name = self.select(input, prompter).await?;
        let directory = self.package_dir(&name);

        info!("resolved package {} at {}", name, directory.display());

        PackageDescriptor::load(&name, &directory, self.is_root(&name)).await
    }
}
