//! `pakforge init` - initialise a new package store.

use std::path::PathBuf;

use clap::Args;
use pakforge::store::PackageStore;

use super::{load_config, require_store_root};
use crate::error::CliError;

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Store root (defaults to root in config.ini [store] section).
    #[arg(long)]
    pub store: Option<PathBuf>,
}

/// Run the init command.
pub fn run(args: InitArgs) -> Result<(), CliError> {
    let config = load_config();
    let store_root = require_store_root(args.store, &config)?;

    let store = PackageStore::init(&store_root, &config.store.artifact_name)?;
    println!("initialised package store at {}", store.root().display());
    Ok(())
}
