//! `pakforge quick` - forced sentinel export for rapid iteration.
//!
//! Exports the pinned sentinel version with overwrite forced and drops the
//! artifact into the configured development folder under a fixed,
//! platform-agnostic name.

use std::path::PathBuf;

use clap::Args;

use super::export::busy_spinner;
use super::{build_exporter, load_config, require_store_root, require_tool_executable};
use crate::error::CliError;

/// Arguments for the quick command.
#[derive(Debug, Args)]
pub struct QuickArgs {
    /// Destination directory (defaults to target_dir in config.ini [quick] section).
    #[arg(long)]
    pub target_dir: Option<PathBuf>,

    /// Target platform (defaults to platform in config.ini [store] section).
    #[arg(long)]
    pub platform: Option<String>,

    /// Store root (defaults to root in config.ini [store] section).
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Build tool executable (defaults to executable in config.ini [tool] section).
    #[arg(long)]
    pub tool: Option<PathBuf>,
}

/// Run the quick command.
pub fn run(args: QuickArgs) -> Result<(), CliError> {
    let config = load_config();

    let target_dir = args
        .target_dir
        .or_else(|| config.quick.target_dir.clone())
        .ok_or_else(|| {
            CliError::Config(
                "no quick-export target specified. Use --target-dir or set target_dir in config.ini [quick] section."
                    .to_string(),
            )
        })?;

    let store_root = require_store_root(args.store, &config)?;
    let executable = require_tool_executable(args.tool, &config)?;
    let exporter = build_exporter(&store_root, executable, &config)?;

    let platform = args.platform.unwrap_or_else(|| config.store.platform.clone());

    let spinner = busy_spinner("quick export in progress");
    let result = exporter.quick_export(&platform, &target_dir);
    spinner.finish_and_clear();

    let destination = result?;
    println!("quick export ready at {}", destination.display());
    Ok(())
}
