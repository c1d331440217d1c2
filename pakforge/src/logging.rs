//! Logging initialisation for command-line use.
//!
//! Library code emits `tracing` events; this sets up the subscriber that
//! renders them to stderr. The filter honours `RUST_LOG` when set.

use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// `verbose` raises the default level from `info` to `debug`; an explicit
/// `RUST_LOG` always wins. Call once at process startup.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
