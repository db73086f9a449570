//! Semantic version increments and target version validation.
//!
//! Increment rules follow npm's semver package so that the versions offered
//! to the operator match what the JavaScript ecosystem would compute.
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;

use crate::{ReleaseError, Result};

/// Value of the free-text option in the release type prompt.
pub const CUSTOM_CHOICE: &str = "custom";

/// Supported release increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseIncrement {
    Patch,
    Minor,
    Major,
    Prepatch,
    Preminor,
    Premajor,
    Prerelease,
}

impl ReleaseIncrement {
    pub const STABLE: [ReleaseIncrement; 3] = [
        ReleaseIncrement::Patch,
        ReleaseIncrement::Minor,
        ReleaseIncrement::Major,
    ];

    pub const PRE: [ReleaseIncrement; 4] = [
        ReleaseIncrement::Prepatch,
        ReleaseIncrement::Preminor,
        ReleaseIncrement::Premajor,
        ReleaseIncrement::Prerelease,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseIncrement::Patch => "patch",
            ReleaseIncrement::Minor => "minor",
            ReleaseIncrement::Major => "major",
            ReleaseIncrement::Prepatch => "prepatch",
            ReleaseIncrement::Preminor => "preminor",
            ReleaseIncrement::Premajor => "premajor",
            ReleaseIncrement::Prerelease => "prerelease",
        }
    }

    /// Increments offered for a release: pre-release variants only when a
    /// pre-release identifier is in play.
    pub fn available(preid: Option<&str>) -> Vec<ReleaseIncrement> {
        let mut increments = Self::STABLE.to_vec();
        if preid.is_some_and(|id| !id.is_empty()) {
            increments.extend(Self::PRE);
        }
        increments
    }
}

impl fmt::Display for ReleaseIncrement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One selectable increment with the version it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCandidate {
    pub increment: ReleaseIncrement,
    pub version: Version,
}

impl VersionCandidate {
    /// Prompt label, e.g. `minor (1.3.0)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.increment, self.version)
    }
}

/// Pre-release identifier for a run: the explicit override, or else the
/// first identifier of the current version's pre-release.
pub fn resolve_preid(current: &Version, preid: Option<&str>) -> Option<String> {
    if let Some(id) = preid.filter(|id| !id.is_empty()) {
        return Some(id.to_string());
    }

    current
        .pre
        .as_str()
        .split('.')
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Compute every offered increment for `current`.
pub fn candidates(
    current: &Version,
    preid: Option<&str>,
) -> Result<Vec<VersionCandidate>> {
    ReleaseIncrement::available(preid)
        .into_iter()
        .map(|increment| {
            Ok(VersionCandidate {
                increment,
                version: increment_version(current, increment, preid)?,
            })
        })
        .collect()
}

/// Apply an increment to `current`.
pub fn increment_version(
    current: &Version,
    increment: ReleaseIncrement,
    preid: Option<&str>,
) -> Result<Version> {
    let mut next = current.clone();
    next.build = BuildMetadata::EMPTY;
    let has_pre = !current.pre.is_empty();

    match increment {
        ReleaseIncrement::Major => {
            if !(has_pre && current.minor == 0 && current.patch == 0) {
                next.major = bump(current, current.major)?;
            }
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        ReleaseIncrement::Minor => {
            if !(has_pre && current.patch == 0) {
                next.minor = bump(current, current.minor)?;
            }
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        ReleaseIncrement::Patch => {
            if !has_pre {
                next.patch = bump(current, current.patch)?;
            }
            next.pre = Prerelease::EMPTY;
        }
        ReleaseIncrement::Premajor => {
            next.major = bump(current, current.major)?;
            next.minor = 0;
            next.patch = 0;
            next.pre = start_prerelease(preid)?;
        }
        ReleaseIncrement::Preminor => {
            next.minor = bump(current, current.minor)?;
            next.patch = 0;
            next.pre = start_prerelease(preid)?;
        }
        ReleaseIncrement::Prepatch => {
            next.patch = bump(current, current.patch)?;
            next.pre = start_prerelease(preid)?;
        }
        ReleaseIncrement::Prerelease => {
            if has_pre {
                next.pre = bump_prerelease(current, preid)?;
            } else {
                next.patch = bump(current, current.patch)?;
                next.pre = start_prerelease(preid)?;
            }
        }
    }

    Ok(next)
}

fn bump(current: &Version, component: u64) -> Result<u64> {
    component.checked_add(1).ok_or_else(|| {
        ReleaseError::InvalidVersion(format!(
            "{current} cannot be incremented any further"
        ))
    })
}

fn start_prerelease(preid: Option<&str>) -> Result<Prerelease> {
    let pre = match preid.filter(|id| !id.is_empty()) {
        Some(id) => format!("{id}.0"),
        None => "0".to_string(),
    };
    Ok(Prerelease::new(&pre)?)
}

fn bump_prerelease(
    current: &Version,
    preid: Option<&str>,
) -> Result<Prerelease> {
    let mut parts: Vec<String> =
        current.pre.as_str().split('.').map(str::to_string).collect();

    let last_numeric = parts
        .iter()
        .enumerate()
        .rev()
        .find_map(|(idx, p)| p.parse::<u64>().ok().map(|n| (idx, n)));

    match last_numeric {
        Some((idx, n)) => parts[idx] = bump(current, n)?.to_string(),
        None => parts.push("0".into()),
    }

    if let Some(id) = preid.filter(|id| !id.is_empty()) {
        let same_id = parts.first().is_some_and(|p| p == id);
        let numbered = parts.get(1).is_some_and(|p| p.parse::<u64>().is_ok());
        if !same_id || !numbered {
            parts = vec![id.to_string(), "0".into()];
        }
    }

    Ok(Prerelease::new(&parts.join("."))?)
}

/// Validate an operator-supplied version. Surrounding whitespace and one
/// leading `v` or `=` are tolerated; the normalized version is returned.
pub fn parse_target_version(input: &str) -> Result<Version> {
    let trimmed = input.trim();
    let stripped = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('='))
        .unwrap_or(trimmed);

    Version::parse(stripped)
        .map_err(|_| ReleaseError::InvalidVersion(input.to_string()))
}
