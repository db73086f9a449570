use log::*;
use semver::Version;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{ReleaseError, Result, package::MANIFEST_FILE};

/// One releasable unit, created by resolution and owned by a single release
/// run. Concurrent runs against the same package are not coordinated.
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    /// Candidate name the package was selected by
    pub name: String,
    pub directory: PathBuf,
    pub manifest_path: PathBuf,
    /// Parsed manifest, key order preserved
    pub manifest: Value,
    /// True when this descriptor is the repository root package
    pub is_root: bool,
    pub current_version: Version,
}

impl PackageDescriptor {
    /// Load the manifest in `directory`, refusing missing or private
    /// packages.
    pub async fn load(
        name: &str,
        directory: &Path,
        is_root: bool,
    ) -> Result<Self> {
        let manifest_path = directory.join(MANIFEST_FILE);

        if !fs::try_exists(&manifest_path).await? {
            return Err(ReleaseError::PackageNotFound(name.to_string()));
        }

        let content = fs::read_to_string(&manifest_path).await?;
        let manifest: Value = serde_json::from_str(&content)?;

        if is_private(&manifest) {
            return Err(ReleaseError::PrivatePackage(name.to_string()));
        }

        let raw_version = manifest
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let current_version = Version::parse(raw_version).map_err(|_| {
            ReleaseError::InvalidVersion(format!(
                "{raw_version:?} (current version of {name})"
            ))
        })?;

        debug!(
            "loaded {} at {} ({})",
            name,
            manifest_path.display(),
            current_version
        );

        Ok(Self {
            name: name.to_string(),
            directory: directory.to_path_buf(),
            manifest_path,
            manifest,
            is_root,
            current_version,
        })
    }

    /// Name declared in the manifest, falling back to the candidate name
    pub fn manifest_name(&self) -> &str {
        self.manifest
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(&self.name)
    }

    /// Version currently held by the in-memory manifest
    pub fn manifest_version(&self) -> Option<&str> {
        self.manifest.get("version").and_then(Value::as_str)
    }

    pub fn set_version(&mut self, version: &Version) {
        self.manifest["version"] = json!(version.to_string());
    }

    /// Persist the manifest as two-space indented JSON with a trailing
    /// newline.
    pub async fn write_manifest(&self) -> Result<()> {
        let mut formatted = serde_json::to_string_pretty(&self.manifest)?;
        formatted.push('\n');
        fs::write(&self.manifest_path, formatted).await?;
        Ok(())
    }
}

/// Whether a manifest opts out of publishing
pub fn is_private(manifest: &Value) -> bool {
    is_truthy(manifest.get("private"))
}

/// JavaScript truthiness of an optional JSON value
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    fn write_pkg(dir: &Path, content: &str) {
        std_fs::create_dir_all(dir).unwrap();
        std_fs::write(dir.join(MANIFEST_FILE), content).unwrap();
    }

    #[tokio::test]
    async fn loads_publishable_package() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("ui");
        write_pkg(&dir, r#"{"name":"@acme/ui","version":"1.2.3"}"#);

        let pkg = PackageDescriptor::load("ui", &dir, false).await.unwrap();
        assert_eq!(pkg.name, "ui");
        assert_eq!(pkg.manifest_name(), "@acme/ui");
        assert_eq!(pkg.current_version, Version::new(1, 2, 3));
        assert_eq!(pkg.manifest_path, dir.join("package.json"));
        assert!(!pkg.is_root);
    }

    #[tokio::test]
    async fn missing_manifest_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = PackageDescriptor::load("ghost", tmp.path(), false)
            .await
            .unwrap_err();
        assert!(
            matches!(err, ReleaseError::PackageNotFound(n) if n == "ghost")
        );
    }

    #[tokio::test]
    async fn private_manifest_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_pkg(
            tmp.path(),
            r#"{"name":"x","version":"1.0.0","private":true}"#,
        );

        let err = PackageDescriptor::load("x", tmp.path(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, ReleaseError::PrivatePackage(_)));
    }

    #[tokio::test]
    async fn falsy_private_is_publishable() {
        let tmp = tempfile::tempdir().unwrap();
        write_pkg(tmp.path(), r#"{"version":"1.0.0","private":false}"#);
        assert!(PackageDescriptor::load("x", tmp.path(), true).await.is_ok());

        write_pkg(tmp.path(), r#"{"version":"1.0.0","private":""}"#);
        assert!(PackageDescriptor::load("x", tmp.path(), true).await.is_ok());
    }

    #[tokio::test]
    async fn invalid_current_version_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_pkg(tmp.path(), r#"{"name":"x"}"#);

        let err = PackageDescriptor::load("x", tmp.path(), false)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn writes_version_preserving_key_order() {
        let tmp = tempfile::tempdir().unwrap();
        write_pkg(
            tmp.path(),
            r#"{"name":"ui","version":"1.2.3","main":"index.js"}"#,
        );

        let mut pkg = PackageDescriptor::load("ui", tmp.path(), false)
            .await
            .unwrap();
        pkg.set_version(&Version::new(1, 3, 0));
        pkg.write_manifest().await.unwrap();

        let written =
            std_fs::read_to_string(tmp.path().join(MANIFEST_FILE)).unwrap();
        assert_eq!(
            written,
            "{\n  \"name\": \"ui\",\n  \"version\": \"1.3.0\",\n  \"main\": \"index.js\"\n}\n"
        );
        assert_eq!(pkg.manifest_version(), Some("1.3.0"));
    }

    #[test]
    fn truthiness_matches_javascript() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(is_truthy(Some(&json!(1))));
        assert!(is_truthy(Some(&json!("yes"))));
        assert!(is_truthy(Some(&json!({}))));
    }
}
