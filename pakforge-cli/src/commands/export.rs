//! `pakforge export` - export a package for a version label.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use pakforge::export::ExportMode;
use pakforge::version::VersionSpec;

use super::{build_exporter, load_config, require_store_root, require_tool_executable};
use crate::error::CliError;

/// Arguments for the export command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Version label to export (e.g. v1.2.3 or v2.0.0-b01).
    pub version: String,

    /// Target platform; repeat to export several in sequence.
    #[arg(long = "platform")]
    pub platforms: Vec<String>,

    /// Replace an existing package artifact.
    #[arg(long)]
    pub force: bool,

    /// Store root (defaults to root in config.ini [store] section).
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Build tool executable (defaults to executable in config.ini [tool] section).
    #[arg(long)]
    pub tool: Option<PathBuf>,
}

/// Run the export command.
pub fn run(args: ExportArgs) -> Result<(), CliError> {
    let config = load_config();

    let version: VersionSpec = args.version.parse()?;
    let store_root = require_store_root(args.store, &config)?;
    let executable = require_tool_executable(args.tool, &config)?;
    let exporter = build_exporter(&store_root, executable, &config)?;

    let platforms = if args.platforms.is_empty() {
        vec![config.store.platform.clone()]
    } else {
        args.platforms
    };

    for platform in platforms {
        let spinner = busy_spinner(&format!("exporting {} for {}", version, platform));
        let result = exporter.export(&version, &platform, args.force);
        spinner.finish_and_clear();

        let outcome = result?;
        match &outcome.mode {
            ExportMode::Full => {
                println!("exported full package {}", outcome.artifact.display());
            }
            ExportMode::Patch(bases) => {
                println!(
                    "exported patch package {} ({} basis layer{})",
                    outcome.artifact.display(),
                    bases.len(),
                    if bases.len() == 1 { "" } else { "s" }
                );
            }
        }
    }

    Ok(())
}

/// Spinner shown while the build tool runs (seconds to minutes).
pub(crate) fn busy_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("valid spinner template"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
