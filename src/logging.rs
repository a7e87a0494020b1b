//! Logging initialization.
//!
//! Diagnostics always go to stderr: stdout carries the rendered board, JSON
//! output, or the bridge's JSON-RPC frames, and must stay clean.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The verbosity count maps to a default level (0 = warn, 1 = info,
/// 2 = debug, 3+ = trace); `quiet` forces errors only. An explicit
/// `RUST_LOG` overrides both.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbose: u8, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("trackline={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    Ok(())
}
