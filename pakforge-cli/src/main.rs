//! Pakforge CLI - command-line interface
//!
//! This binary provides a command-line interface to the pakforge library.

use clap::{Parser, Subcommand};
use console::style;

mod commands;
mod error;

use error::CliError;

#[derive(Debug, Parser)]
#[command(
    name = "pakforge",
    version,
    about = "Export versioned content packages as full builds or incremental patches"
)]
struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Export a package for a version label.
    Export(commands::export::ExportArgs),

    /// Forced sentinel export into the development folder.
    Quick(commands::quick::QuickArgs),

    /// List versions available in the package store.
    List(commands::list::ListArgs),

    /// Validate a version label without exporting.
    Check(commands::check::CheckArgs),

    /// Initialise a new package store.
    Init(commands::init::InitArgs),
}

fn main() {
    let cli = Cli::parse();
    pakforge::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Export(args) => commands::export::run(args),
        Commands::Quick(args) => commands::quick::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Init(args) => commands::init::run(args),
    };

    if let Err(error) = result {
        eprintln!("{} {}", style("error:").red().bold(), error);
        std::process::exit(1);
    }
}
