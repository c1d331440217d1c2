//! On-disk package store management.
//!
//! A store is a directory hierarchy keyed by version and platform: one
//! subdirectory per exported version, at most one artifact per platform
//! inside it. The root carries a marker file identifying it as a pakforge
//! store and recording the store format version.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use semver::Version;
use thiserror::Error;

use super::naming;
use crate::version::VersionSpec;

/// Store marker filename.
const STORE_MARKER: &str = ".pakforge-store";

/// Store marker header.
const STORE_HEADER: &str = "PAKFORGE PACKAGE STORE";

/// Current store format version.
const STORE_FORMAT_VERSION: &str = "1.0.0";

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur managing the package store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A store already exists at the given path.
    #[error("package store already exists at {}", .0.display())]
    StoreExists(PathBuf),

    /// No store found at the given path.
    #[error("no package store found at {}", .0.display())]
    StoreNotFound(PathBuf),

    /// The store marker file is invalid or corrupted.
    #[error("invalid store marker: {0}")]
    InvalidMarker(String),

    /// Failed to create a directory.
    #[error("failed to create directory {}: {}", .path.display(), .source)]
    CreateDirectoryFailed { path: PathBuf, source: io::Error },

    /// Failed to read a file or directory.
    #[error("failed to read {}: {}", .path.display(), .source)]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write a file.
    #[error("failed to write {}: {}", .path.display(), .source)]
    WriteFailed { path: PathBuf, source: io::Error },
}

/// A package store rooted at a directory on persistent storage.
///
/// The store is mutated only by successful export operations; everything
/// here is layout bookkeeping (directory and artifact paths, existence
/// checks, version listing).
#[derive(Debug, Clone)]
pub struct PackageStore {
    /// Root path of the store.
    root: PathBuf,

    /// Store format version from the marker.
    format_version: Version,

    /// When the store was created.
    created_at: DateTime<Utc>,

    /// Base name embedded in artifact filenames.
    artifact_name: String,
}

impl PackageStore {
    /// Initialize a new store at the given path.
    ///
    /// Creates the root directory (if absent) and the store marker.
    ///
    /// # Errors
    ///
    /// Returns an error if a store already exists at the path, or if
    /// directory creation or marker writing fails.
    pub fn init(path: impl AsRef<Path>, artifact_name: impl Into<String>) -> StoreResult<Self> {
        let root = path.as_ref().to_path_buf();

        let marker_path = root.join(STORE_MARKER);
        if marker_path.exists() {
            return Err(StoreError::StoreExists(root));
        }

        if !root.exists() {
            fs::create_dir_all(&root).map_err(|e| StoreError::CreateDirectoryFailed {
                path: root.clone(),
                source: e,
            })?;
        }

        let now = Utc::now();
        let format_version = Version::parse(STORE_FORMAT_VERSION).expect("valid version constant");

        let marker_content = format!(
            "{}\n{}\n{}\n",
            STORE_HEADER,
            STORE_FORMAT_VERSION,
            now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        );
        fs::write(&marker_path, marker_content).map_err(|e| StoreError::WriteFailed {
            path: marker_path,
            source: e,
        })?;

        Ok(Self {
            root,
            format_version,
            created_at: now,
            artifact_name: artifact_name.into(),
        })
    }

    /// Open an existing store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if no store exists at the path or the marker is
    /// invalid.
    pub fn open(path: impl AsRef<Path>, artifact_name: impl Into<String>) -> StoreResult<Self> {
        let root = path.as_ref().to_path_buf();
        let marker_path = root.join(STORE_MARKER);

        if !marker_path.exists() {
            return Err(StoreError::StoreNotFound(root));
        }

        let content = fs::read_to_string(&marker_path).map_err(|e| StoreError::ReadFailed {
            path: marker_path.clone(),
            source: e,
        })?;

        let lines: Vec<&str> = content.lines().collect();
        if lines.len() < 3 {
            return Err(StoreError::InvalidMarker(
                "marker file has insufficient lines".to_string(),
            ));
        }

        if lines[0].trim() != STORE_HEADER {
            return Err(StoreError::InvalidMarker(format!(
                "invalid header: expected '{}', got '{}'",
                STORE_HEADER,
                lines[0].trim()
            )));
        }

        let format_version = Version::parse(lines[1].trim())
            .map_err(|e| StoreError::InvalidMarker(format!("invalid format version: {}", e)))?;

        let created_at = DateTime::parse_from_rfc3339(lines[2].trim())
            .map_err(|e| StoreError::InvalidMarker(format!("invalid timestamp: {}", e)))?
            .with_timezone(&Utc);

        Ok(Self {
            root,
            format_version,
            created_at,
            artifact_name: artifact_name.into(),
        })
    }

    /// Open the store at the given path, initializing it first if absent.
    pub fn open_or_init(
        path: impl AsRef<Path>,
        artifact_name: impl Into<String>,
    ) -> StoreResult<Self> {
        if Self::exists(&path) {
            Self::open(path, artifact_name)
        } else {
            Self::init(path, artifact_name)
        }
    }

    /// Check if a store exists at the given path.
    pub fn exists(path: impl AsRef<Path>) -> bool {
        path.as_ref().join(STORE_MARKER).exists()
    }

    /// Get the root path of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the store format version.
    pub fn format_version(&self) -> &Version {
        &self.format_version
    }

    /// Get when the store was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the artifact base name used by this store.
    pub fn artifact_name(&self) -> &str {
        &self.artifact_name
    }

    /// Get the directory for a version's artifacts.
    pub fn version_dir(&self, version: &VersionSpec) -> PathBuf {
        self.root.join(naming::version_dir_name(version))
    }

    /// Get the artifact path for a version and platform.
    ///
    /// Purely derived from the pair; the artifact may or may not exist.
    pub fn artifact_path(&self, version: &VersionSpec, platform: &str) -> PathBuf {
        self.version_dir(version)
            .join(naming::artifact_filename(&self.artifact_name, version, platform))
    }

    /// Check if the artifact for a version and platform exists.
    pub fn artifact_exists(&self, version: &VersionSpec, platform: &str) -> bool {
        self.artifact_path(version, platform).is_file()
    }

    /// Ensure the version's output directory exists.
    ///
    /// Idempotent; this is the only store mutation permitted before an
    /// export is known to have succeeded.
    pub fn ensure_version_dir(&self, version: &VersionSpec) -> StoreResult<PathBuf> {
        let dir = self.version_dir(version);
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| StoreError::CreateDirectoryFailed {
                path: dir.clone(),
                source: e,
            })?;
        }
        Ok(dir)
    }

    /// List the version labels available in the store.
    ///
    /// Scans the store root for version directories and strips the fixed
    /// prefix. Recomputed on every call, never cached, so the listing always
    /// reflects the current store state. Files and foreign directories are
    /// ignored.
    pub fn list_versions(&self) -> StoreResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root).map_err(|e| StoreError::ReadFailed {
            path: self.root.clone(),
            source: e,
        })?;

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::ReadFailed {
                path: self.root.clone(),
                source: e,
            })?;

            if !entry.path().is_dir() {
                continue;
            }

            let name = entry.file_name();
            if let Some(label) = naming::version_label_from_dir(&name.to_string_lossy()) {
                versions.push(label.to_string());
            }
        }

        versions.sort();
        Ok(versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store(temp: &TempDir) -> PackageStore {
        PackageStore::init(temp.path().join("store"), "content").unwrap()
    }

    #[test]
    fn test_init_creates_root_and_marker() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        assert!(store.root().exists());
        assert!(store.root().join(STORE_MARKER).exists());
        assert_eq!(store.format_version(), &Version::new(1, 0, 0));
        assert_eq!(store.artifact_name(), "content");
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        test_store(&temp);

        let result = PackageStore::init(temp.path().join("store"), "content");
        assert!(matches!(result, Err(StoreError::StoreExists(_))));
    }

    #[test]
    fn test_open_existing() {
        let temp = TempDir::new().unwrap();
        let created = test_store(&temp);

        let opened = PackageStore::open(temp.path().join("store"), "content").unwrap();
        assert_eq!(opened.format_version(), created.format_version());
        assert_eq!(
            opened.created_at().timestamp(),
            created.created_at().timestamp()
        );
    }

    #[test]
    fn test_open_missing_fails() {
        let temp = TempDir::new().unwrap();
        let result = PackageStore::open(temp.path().join("nowhere"), "content");
        assert!(matches!(result, Err(StoreError::StoreNotFound(_))));
    }

    #[test]
    fn test_open_invalid_header() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("store");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(STORE_MARKER), "NOT A STORE\n1.0.0\nnope\n").unwrap();

        let result = PackageStore::open(&root, "content");
        assert!(matches!(result, Err(StoreError::InvalidMarker(_))));
    }

    #[test]
    fn test_open_truncated_marker() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("store");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(STORE_MARKER), "PAKFORGE PACKAGE STORE\n").unwrap();

        let result = PackageStore::open(&root, "content");
        assert!(matches!(result, Err(StoreError::InvalidMarker(_))));
    }

    #[test]
    fn test_open_or_init_both_paths() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("store");

        assert!(!PackageStore::exists(&root));
        PackageStore::open_or_init(&root, "content").unwrap();
        assert!(PackageStore::exists(&root));
        PackageStore::open_or_init(&root, "content").unwrap();
    }

    #[test]
    fn test_version_dir_and_artifact_path() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);
        let version = VersionSpec::new(1, 2, 3);

        assert_eq!(store.version_dir(&version), store.root().join("pak-v1.2.3"));
        assert_eq!(
            store.artifact_path(&version, "win64"),
            store
                .root()
                .join("pak-v1.2.3")
                .join("content-v1.2.3-win64.pak")
        );
    }

    #[test]
    fn test_artifact_exists() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);
        let version = VersionSpec::new(1, 0, 0);

        assert!(!store.artifact_exists(&version, "win64"));

        store.ensure_version_dir(&version).unwrap();
        fs::write(store.artifact_path(&version, "win64"), b"pack").unwrap();

        assert!(store.artifact_exists(&version, "win64"));
        // Platform-keyed: a different platform is still absent.
        assert!(!store.artifact_exists(&version, "android"));
    }

    #[test]
    fn test_ensure_version_dir_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);
        let version = VersionSpec::new(1, 0, 0);

        let first = store.ensure_version_dir(&version).unwrap();
        let second = store.ensure_version_dir(&version).unwrap();
        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn test_list_versions_empty() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);
        assert!(store.list_versions().unwrap().is_empty());
    }

    #[test]
    fn test_list_versions_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp);

        store.ensure_version_dir(&VersionSpec::new(1, 2, 0)).unwrap();
        store.ensure_version_dir(&VersionSpec::new(1, 0, 0)).unwrap();
        store
            .ensure_version_dir(&VersionSpec::new_prerelease(2, 0, 0, "a", 5))
            .unwrap();
        // Foreign directory and stray file are ignored.
        fs::create_dir_all(store.root().join("scratch")).unwrap();
        fs::write(store.root().join("notes.txt"), b"notes").unwrap();

        let versions = store.list_versions().unwrap();
        assert_eq!(versions, vec!["v1.0.0", "v1.2.0", "v2.0.0-a05"]);
    }
}
