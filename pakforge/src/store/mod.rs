//! Package store layout and naming.
//!
//! The store is an on-disk collection of exported package artifacts,
//! organized as one directory per version with one artifact per platform
//! inside it:
//!
//! ```text
//! store root
//! ├── .pakforge-store                         store marker
//! ├── pak-v1.0.0/
//! │   └── content-v1.0.0-win64.pak
//! └── pak-v1.2.3/
//!     ├── content-v1.2.3-win64.pak
//!     └── content-v1.2.3-android.pak
//! ```
//!
//! Artifact locations are pure functions of `(version, platform)`; see
//! [`naming`] helpers for the exact patterns.

mod layout;
mod naming;

pub use layout::{PackageStore, StoreError, StoreResult};
pub use naming::{
    artifact_filename, quick_artifact_filename, version_dir_name, version_label_from_dir,
    ARTIFACT_EXTENSION, VERSION_DIR_PREFIX,
};
