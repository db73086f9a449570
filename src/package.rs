//! Releasable packages: locating them, their manifests and release tags.

/// Parsed package manifest and its on-disk location.
pub mod descriptor;

/// Package selection from a free-text name fragment.
pub mod resolver;

/// Release tag, target name and commit message formatting.
pub mod tag;

/// Manifest file name inside every package directory.
pub const MANIFEST_FILE: &str = "package.json";
