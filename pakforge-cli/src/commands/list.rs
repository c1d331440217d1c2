//! `pakforge list` - list versions available in the package store.

use std::path::PathBuf;

use clap::Args;
use pakforge::store::PackageStore;

use super::{load_config, require_store_root};
use crate::error::CliError;

/// Arguments for the list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Store root (defaults to root in config.ini [store] section).
    #[arg(long)]
    pub store: Option<PathBuf>,
}

/// Run the list command.
///
/// The listing is recomputed from the store directory on every call, so it
/// always reflects the current state.
pub fn run(args: ListArgs) -> Result<(), CliError> {
    let config = load_config();
    let store_root = require_store_root(args.store, &config)?;

    let store = PackageStore::open(&store_root, &config.store.artifact_name)?;
    let versions = store.list_versions()?;

    if versions.is_empty() {
        println!("no packages exported yet");
        return Ok(());
    }

    for version in versions {
        println!("{}", version);
    }
    Ok(())
}
