//! Serve command implementation.
//!
//! Runs the protocol bridge on stdin/stdout until the client closes the
//! pipe. Stdout belongs to the wire; all diagnostics go to stderr.

use crate::api::TrackerClient;
use crate::bridge::{run_stdio, BridgeServer};
use crate::config::Config;
use crate::error::Result;

/// Execute the serve command.
///
/// # Errors
///
/// Returns an error when configuration is incomplete or the stdio transport
/// fails.
pub fn execute(url: Option<String>, api_key: Option<String>) -> Result<()> {
    let config = Config::new(url, api_key)?;
    let client = TrackerClient::new(config);

    let mut server = BridgeServer::new(&client);
    run_stdio(&mut server)
}
