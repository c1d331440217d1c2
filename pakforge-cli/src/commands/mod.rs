//! CLI subcommand implementations.
//!
//! Each subcommand resolves its inputs from CLI flags first, then the
//! config file, and hands the real work to the `pakforge` library.

pub mod check;
pub mod export;
pub mod init;
pub mod list;
pub mod quick;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pakforge::config::ConfigFile;
use pakforge::export::{CommandBuildTool, Exporter};
use pakforge::store::PackageStore;

use crate::error::CliError;

/// Load config or return defaults.
pub(crate) fn load_config() -> ConfigFile {
    ConfigFile::load().unwrap_or_default()
}

/// Resolve the store root from a CLI flag or config.
///
/// Returns an error if neither is set.
pub(crate) fn require_store_root(
    cli_root: Option<PathBuf>,
    config: &ConfigFile,
) -> Result<PathBuf, CliError> {
    cli_root.or_else(|| config.store.root.clone()).ok_or_else(|| {
        CliError::Config(
            "no store root specified. Use --store or set root in config.ini [store] section."
                .to_string(),
        )
    })
}

/// Resolve the build tool executable from a CLI flag or config.
///
/// Returns an error if neither is set.
pub(crate) fn require_tool_executable(
    cli_tool: Option<PathBuf>,
    config: &ConfigFile,
) -> Result<PathBuf, CliError> {
    cli_tool.or_else(|| config.tool.executable.clone()).ok_or_else(|| {
        CliError::Config(
            "no build tool specified. Use --tool or set executable in config.ini [tool] section."
                .to_string(),
        )
    })
}

/// Assemble an exporter over the configured store and build tool.
///
/// Registers the store-refresh notification hook so listeners (here: the
/// log) learn about new entries after each confirmed success.
pub(crate) fn build_exporter(
    store_root: &Path,
    executable: PathBuf,
    config: &ConfigFile,
) -> Result<Exporter, CliError> {
    let store = PackageStore::open_or_init(store_root, &config.store.artifact_name)?;
    let tool = Arc::new(CommandBuildTool::new(executable));

    let exporter = Exporter::new(store, tool, &config.tool.project).with_success_hook(Box::new(
        |outcome| {
            tracing::info!(
                version = %outcome.version,
                artifact = %outcome.artifact.display(),
                "package store updated"
            );
        },
    ));

    Ok(exporter)
}
