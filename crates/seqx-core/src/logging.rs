//! Logging initialization for the seqx binary.
//!
//! Human-readable output on stderr; stdout stays reserved for the final
//! count and archive path. `SEQX_LOG` (then `RUST_LOG`) overrides the
//! level derived from the `-v` count.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter.
pub const ENV_LOG: &str = "SEQX_LOG";

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize the logging subsystem. Call once at startup.
pub fn init_logging(verbose: u8) {
    let filter = std::env::var(ENV_LOG)
        .ok()
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}
