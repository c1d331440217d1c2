//! Centralized package store naming conventions.
//!
//! This module is the single source of truth for all pakforge store naming:
//! - Version directory names (e.g., `pak-v1.2.3`)
//! - Artifact filenames (e.g., `content-v1.2.3-win64.pak`)
//! - The fixed quick-export filename (e.g., `content.pak`)
//!
//! All other modules should use these functions rather than constructing
//! names directly. Names are pure functions of the rendered version label,
//! so a store written under an older grammar stays readable under newer
//! ones.

use crate::version::VersionSpec;

/// Fixed prefix for version directories in the store root.
pub const VERSION_DIR_PREFIX: &str = "pak-";

/// File extension for package artifacts.
pub const ARTIFACT_EXTENSION: &str = "pak";

/// Generate the store directory name for a version.
///
/// # Examples
///
/// ```
/// use pakforge::store::version_dir_name;
/// use pakforge::version::VersionSpec;
///
/// assert_eq!(version_dir_name(&VersionSpec::new(1, 2, 3)), "pak-v1.2.3");
/// assert_eq!(
///     version_dir_name(&VersionSpec::new_prerelease(2, 0, 0, "a", 5)),
///     "pak-v2.0.0-a05"
/// );
/// ```
pub fn version_dir_name(version: &VersionSpec) -> String {
    format!("{}{}", VERSION_DIR_PREFIX, version)
}

/// Generate the artifact filename for a version and platform.
///
/// The platform is normalized to lowercase so existence checks are a pure
/// function of the `(version, platform)` pair.
///
/// # Examples
///
/// ```
/// use pakforge::store::artifact_filename;
/// use pakforge::version::VersionSpec;
///
/// assert_eq!(
///     artifact_filename("content", &VersionSpec::new(1, 2, 3), "win64"),
///     "content-v1.2.3-win64.pak"
/// );
/// assert_eq!(
///     artifact_filename("content", &VersionSpec::new(1, 0, 0), "Android"),
///     "content-v1.0.0-android.pak"
/// );
/// ```
pub fn artifact_filename(artifact_name: &str, version: &VersionSpec, platform: &str) -> String {
    format!(
        "{}-{}-{}.{}",
        artifact_name,
        version,
        platform.to_lowercase(),
        ARTIFACT_EXTENSION
    )
}

/// Generate the platform-agnostic fixed filename used by quick exports.
pub fn quick_artifact_filename(artifact_name: &str) -> String {
    format!("{}.{}", artifact_name, ARTIFACT_EXTENSION)
}

/// Extract the version label from a store directory name.
///
/// Returns `None` for directories that don't carry the store prefix. The
/// remainder is not re-validated against the current grammar, so listings
/// keep working across grammar evolutions.
///
/// # Examples
///
/// ```
/// use pakforge::store::version_label_from_dir;
///
/// assert_eq!(version_label_from_dir("pak-v1.2.3"), Some("v1.2.3"));
/// assert_eq!(version_label_from_dir("scratch"), None);
/// ```
pub fn version_label_from_dir(dir_name: &str) -> Option<&str> {
    dir_name.strip_prefix(VERSION_DIR_PREFIX)
}
