//! Package export orchestration.
//!
//! Turns a validated version into a package artifact in the store, either
//! as a standalone full package or as a patch layered on the version's
//! basis chain.
//!
//! # Overview
//!
//! The export workflow:
//! 1. Derive the basis chain from the version (major basis, then minor)
//! 2. Verify every required basis artifact already exists in the store
//! 3. Refuse to overwrite an existing artifact unless forced
//! 4. Invoke the external build tool in full or patch mode
//! 5. Notify registered post-success hooks
//!
//! At most one export runs at a time per [`Exporter`]; a concurrent call
//! observes [`ExportError::Busy`] instead of racing the build tool.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pakforge::export::{CommandBuildTool, Exporter};
//! use pakforge::store::PackageStore;
//!
//! let store = PackageStore::open_or_init("/data/packages", "content")?;
//! let tool = Arc::new(CommandBuildTool::new("/opt/builder/builder-console"));
//! let exporter = Exporter::new(store, tool, "Package");
//!
//! let version = "v1.2.3".parse()?;
//! let outcome = exporter.export(&version, "win64", false)?;
//! println!("wrote {}", outcome.artifact.display());
//! ```

mod error;
mod orchestrator;
mod tool;

pub use error::{ExportError, ExportResult};
pub use orchestrator::{ExportHook, ExportMode, ExportOutcome, Exporter, QUICK_EXPORT_VERSION};
pub use tool::{BuildRequest, BuildTool, CommandBuildTool};
