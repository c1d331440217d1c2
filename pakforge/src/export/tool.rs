//! Build tool invocation.
//!
//! The external build tool turns a project definition into a package
//! artifact, either standalone or as a patch layered on basis packages.
//! The tool is opaque: only its exit status and stderr are observed.
//!
//! [`BuildTool`] is the seam; [`CommandBuildTool`] is the production
//! implementation running the configured executable headlessly.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::error::{ExportError, ExportResult};

/// A single build request handed to the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Project identifier passed through to the tool.
    pub project: String,

    /// Path the tool writes the artifact to.
    pub output: PathBuf,

    /// Ordered basis artifacts for a patch build; empty for a full build.
    /// The tool applies patches in sequence, so order matters.
    pub basis: Vec<PathBuf>,
}

impl BuildRequest {
    /// Whether this request produces a patch (vs. a full package).
    pub fn is_patch(&self) -> bool {
        !self.basis.is_empty()
    }

    /// The basis list in the comma-joined form the tool expects.
    pub fn joined_basis(&self) -> String {
        self.basis
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// External package build tool.
pub trait BuildTool {
    /// Check that the tool is invocable.
    ///
    /// Called before any store mutation so a misconfigured tool fails fast.
    fn check(&self) -> ExportResult<()>;

    /// Run one build to completion.
    ///
    /// Blocks for the duration of the build (seconds to minutes). A
    /// non-success exit must be reported as an error; the tool may have
    /// left a partial artifact behind, which is deliberately not cleaned
    /// up here.
    fn build(&self, request: &BuildRequest) -> ExportResult<()>;
}

/// Build tool backed by a command-line executable.
///
/// Invocation shape:
/// - full:  `<exe> --headless --export-pack <project> <output>`
/// - patch: `<exe> --headless --export-patch <project> <output> --patches <a,b>`
#[derive(Debug, Clone)]
pub struct CommandBuildTool {
    executable: PathBuf,
}

impl CommandBuildTool {
    /// Create a build tool wrapper for the given executable.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// The configured executable path.
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl BuildTool for CommandBuildTool {
    fn check(&self) -> ExportResult<()> {
        if !self.executable.is_file() {
            return Err(ExportError::ToolNotFound(self.executable.clone()));
        }
        Ok(())
    }

    fn build(&self, request: &BuildRequest) -> ExportResult<()> {
        let mut command = Command::new(&self.executable);
        command.arg("--headless");

        if request.is_patch() {
            command
                .arg("--export-patch")
                .arg(&request.project)
                .arg(&request.output)
                .arg("--patches")
                .arg(request.joined_basis());
        } else {
            command
                .arg("--export-pack")
                .arg(&request.project)
                .arg(&request.output);
        }

        debug!(
            executable = %self.executable.display(),
            output = %request.output.display(),
            patch = request.is_patch(),
            "invoking build tool"
        );

        let output = command.output().map_err(|e| ExportError::BuildToolFailed {
            status: None,
            stderr: format!("failed to run {}: {}", self.executable.display(), e),
        })?;

        if !output.status.success() {
            return Err(ExportError::BuildToolFailed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}
