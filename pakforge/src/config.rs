//! Configuration file handling.
//!
//! Pakforge reads an INI config file from the platform config directory
//! (`{config_dir}/pakforge/config.ini`):
//!
//! ```ini
//! [tool]
//! executable = /opt/builder/builder-console
//! project = Package
//!
//! [store]
//! root = /data/packages
//! artifact_name = content
//! platform = win64
//!
//! [quick]
//! target_dir = /data/dev
//! ```
//!
//! Every key is optional; missing keys fall back to defaults, and CLI
//! flags override file values.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

/// Directory under the platform config dir holding pakforge settings.
pub const CONFIG_DIR_NAME: &str = "pakforge";

/// Config filename.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Errors loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or parsed.
    #[error("failed to load config {}: {}", .path.display(), .message)]
    LoadFailed { path: PathBuf, message: String },
}

/// `[tool]` section: the external build tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSection {
    /// Path to the build tool executable.
    pub executable: Option<PathBuf>,

    /// Project identifier passed through to the tool.
    pub project: String,
}

impl Default for ToolSection {
    fn default() -> Self {
        Self {
            executable: None,
            project: "Package".to_string(),
        }
    }
}

/// `[store]` section: the package store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSection {
    /// Store root directory.
    pub root: Option<PathBuf>,

    /// Base name embedded in artifact filenames.
    pub artifact_name: String,

    /// Default target platform.
    pub platform: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            root: None,
            artifact_name: "content".to_string(),
            platform: "win64".to_string(),
        }
    }
}

/// `[quick]` section: quick-export workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuickSection {
    /// Directory quick exports are relocated into.
    pub target_dir: Option<PathBuf>,
}

/// Loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFile {
    /// Build tool settings.
    pub tool: ToolSection,

    /// Package store settings.
    pub store: StoreSection,

    /// Quick-export settings.
    pub quick: QuickSection,
}

impl ConfigFile {
    /// The default config file location, if a config directory exists.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the config from its default location.
    ///
    /// A missing file yields the defaults; a present but unreadable file
    /// is an error.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load the config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut config = Self::default();

        if let Some(section) = ini.section(Some("tool")) {
            if let Some(value) = section.get("executable") {
                config.tool.executable = Some(PathBuf::from(value));
            }
            if let Some(value) = section.get("project") {
                config.tool.project = value.to_string();
            }
        }

        if let Some(section) = ini.section(Some("store")) {
            if let Some(value) = section.get("root") {
                config.store.root = Some(PathBuf::from(value));
            }
            if let Some(value) = section.get("artifact_name") {
                config.store.artifact_name = value.to_string();
            }
            if let Some(value) = section.get("platform") {
                config.store.platform = value.to_string();
            }
        }

        if let Some(section) = ini.section(Some("quick")) {
            if let Some(value) = section.get("target_dir") {
                config.quick.target_dir = Some(PathBuf::from(value));
            }
        }

        Ok(config)
    }
}
