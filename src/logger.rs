//! Logging setup for the `docjs` binary.
//!
//! Logs go to stderr so rendered output piped elsewhere stays clean. The
//! level is chosen in this order:
//!
//! 1. `--verbose`: debug
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. info

use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("docjs=debug")
    } else if quiet {
        EnvFilter::new("docjs=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docjs=info"))
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .compact();

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
