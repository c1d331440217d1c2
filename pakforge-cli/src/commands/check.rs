//! `pakforge check` - validate a version label without exporting.
//!
//! The same parse call backs live input validation and the final export
//! validation, so a label that passes here will be accepted by `export`.

use clap::Args;
use console::style;
use pakforge::version::VersionSpec;

use crate::error::CliError;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Version label to validate (e.g. v1.2.3 or v2.0.0-a05).
    pub version: String,
}

/// Run the check command.
pub fn run(args: CheckArgs) -> Result<(), CliError> {
    let version: VersionSpec = args.version.parse()?;

    let kind = match &version.prerelease {
        Some(pre) => format!("prerelease (channel {}, number {})", pre.channel, pre.number),
        None => "release".to_string(),
    };
    println!("{} {} - {}", style("ok").green().bold(), version, kind);

    let chain = version.basis_chain();
    if chain.is_empty() {
        println!("basis: none (exports as a full package)");
    } else {
        let bases: Vec<String> = chain.ordered().iter().map(|b| b.to_string()).collect();
        println!("basis: {}", bases.join(", "));
    }

    Ok(())
}
