//! Export orchestration.
//!
//! Coordinates a single package export end to end:
//! 1. Acquire the exclusive in-flight token (fail fast when busy)
//! 2. Verify the build tool is invocable
//! 3. Verify required basis packages exist
//! 4. Guard against overwriting an existing artifact
//! 5. Decide full vs. patch mode and invoke the build tool
//! 6. Run post-success hooks
//!
//! Exports for lower-precision versions must already exist before a patch
//! export; the orchestrator never builds missing bases itself.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::{ExportError, ExportResult};
use super::tool::{BuildRequest, BuildTool};
use crate::store::{self, PackageStore};
use crate::version::VersionSpec;

/// Sentinel version pinned by quick exports.
pub const QUICK_EXPORT_VERSION: VersionSpec = VersionSpec::new(690, 0, 0);

/// How an export produced its artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportMode {
    /// Standalone package with no dependency on prior packages.
    Full,

    /// Delta against the ordered basis artifacts (major basis first, then
    /// minor basis if present).
    Patch(Vec<PathBuf>),
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// The exported version.
    pub version: VersionSpec,

    /// Target platform (normalized to lowercase).
    pub platform: String,

    /// Whether the artifact was built full or as a patch.
    pub mode: ExportMode,

    /// Path of the artifact in the store.
    pub artifact: PathBuf,
}

/// Hook invoked after a confirmed successful export.
///
/// Hooks are fire-and-forget notifications (store listings picking up the
/// new entry, "open the output folder" conveniences); they run strictly
/// after the build tool reports success and never on failure.
pub type ExportHook = Box<dyn Fn(&ExportOutcome) + Send + Sync>;

/// RAII token for the at-most-one-concurrent-export invariant.
struct InFlightToken {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightToken {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Package export orchestrator.
///
/// Owns the store handle, the build tool, and the exclusive-operation
/// token. At most one export runs at a time per orchestrator: concurrent
/// build-tool invocations against overlapping output directories are
/// unsafe, so a second call fails fast with [`ExportError::Busy`] instead
/// of racing or blocking.
pub struct Exporter {
    store: PackageStore,
    tool: Arc<dyn BuildTool + Send + Sync>,
    project: String,
    busy: Arc<AtomicBool>,
    hooks: Vec<ExportHook>,
}

impl Exporter {
    /// Create an orchestrator over a store and build tool.
    ///
    /// `project` is the project identifier passed through to the tool.
    pub fn new(
        store: PackageStore,
        tool: Arc<dyn BuildTool + Send + Sync>,
        project: impl Into<String>,
    ) -> Self {
        Self {
            store,
            tool,
            project: project.into(),
            busy: Arc::new(AtomicBool::new(false)),
            hooks: Vec::new(),
        }
    }

    /// Register a post-success hook (builder pattern).
    pub fn with_success_hook(mut self, hook: ExportHook) -> Self {
        self.hooks.push(hook);
        self
    }

    /// The store this orchestrator exports into.
    pub fn store(&self) -> &PackageStore {
        &self.store
    }

    /// Whether an export is currently in flight.
    ///
    /// Callers driving the export off-thread can poll this to surface a
    /// busy indicator without stalling on the build itself.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn try_acquire(&self) -> ExportResult<InFlightToken> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ExportError::Busy);
        }
        Ok(InFlightToken {
            flag: Arc::clone(&self.busy),
        })
    }

    /// Export a package for a version and platform.
    ///
    /// Full export when the version has no basis chain, patch export
    /// layered on the basis artifacts otherwise. Fails without invoking
    /// the build tool if a required basis is missing, or if the target
    /// artifact exists and `force` is not set. Blocks for the duration of
    /// the build; see [`Exporter::export_off_thread`] for interactive
    /// callers.
    ///
    /// # Errors
    ///
    /// All error conditions are recoverable values; see [`ExportError`].
    /// On [`ExportError::BuildToolFailed`] a partially-written artifact may
    /// remain under the target name for operator inspection.
    pub fn export(
        &self,
        version: &VersionSpec,
        platform: &str,
        force: bool,
    ) -> ExportResult<ExportOutcome> {
        let _token = self.try_acquire()?;
        self.export_locked(version, platform, force)
    }

    fn export_locked(
        &self,
        version: &VersionSpec,
        platform: &str,
        force: bool,
    ) -> ExportResult<ExportOutcome> {
        info!(%version, platform, force, "starting package export");

        self.tool.check()?;

        let chain = version.basis_chain();
        let mut basis_paths = Vec::new();
        for basis in chain.ordered() {
            let path = self.store.artifact_path(basis, platform);
            if !path.is_file() {
                warn!(basis = %basis, expected = %path.display(), "required basis package missing");
                return Err(ExportError::MissingBasis {
                    version: basis.clone(),
                    expected: path,
                });
            }
            debug!(basis = %basis, path = %path.display(), "basis package present");
            basis_paths.push(path);
        }

        let artifact = self.store.artifact_path(version, platform);
        if artifact.exists() && !force {
            return Err(ExportError::AlreadyExists(artifact));
        }

        self.store.ensure_version_dir(version)?;

        let mode = if basis_paths.is_empty() {
            info!(%version, "exporting full package");
            ExportMode::Full
        } else {
            info!(%version, layers = basis_paths.len(), "exporting patch package");
            ExportMode::Patch(basis_paths.clone())
        };

        let request = BuildRequest {
            project: self.project.clone(),
            output: artifact.clone(),
            basis: basis_paths,
        };
        self.tool.build(&request)?;

        info!(artifact = %artifact.display(), "export complete");

        let outcome = ExportOutcome {
            version: version.clone(),
            platform: platform.to_lowercase(),
            mode,
            artifact,
        };
        for hook in &self.hooks {
            hook(&outcome);
        }

        Ok(outcome)
    }

    /// Export on the blocking thread pool, leaving the caller free.
    ///
    /// The build tool run is the only long-blocking operation in the
    /// system; lifting it onto the blocking pool lets an interactive
    /// caller keep observing [`Exporter::is_busy`] while the export runs.
    pub async fn export_off_thread(
        self: Arc<Self>,
        version: VersionSpec,
        platform: String,
        force: bool,
    ) -> ExportResult<ExportOutcome> {
        tokio::task::spawn_blocking(move || self.export(&version, &platform, force))
            .await
            .expect("blocking export task panicked")
    }

    /// Quick export for rapid iteration workflows.
    ///
    /// Pins the sentinel version, always forces overwrite, exports for the
    /// given platform, then relocates the artifact into `target_dir` under
    /// the platform-agnostic fixed filename. The sentinel's store entry
    /// remains (without its artifact) after the move.
    pub fn quick_export(&self, platform: &str, target_dir: &Path) -> ExportResult<PathBuf> {
        let outcome = self.export(&QUICK_EXPORT_VERSION, platform, true)?;

        let destination =
            target_dir.join(store::quick_artifact_filename(self.store.artifact_name()));
        std::fs::rename(&outcome.artifact, &destination).map_err(|e| {
            ExportError::RelocateFailed {
                from: outcome.artifact.clone(),
                to: destination.clone(),
                source: e,
            }
        })?;

        info!(destination = %destination.display(), "quick export relocated");
        Ok(destination)
    }
}
