//! Projects command implementation.

use crate::api::TrackerClient;
use crate::config::Config;
use crate::error::Result;
use crate::format::pad_display;

/// Execute the projects command.
///
/// # Errors
///
/// Returns an error when configuration is incomplete or the fetch fails.
pub fn execute(url: Option<String>, api_key: Option<String>, json: bool) -> Result<()> {
    let config = Config::new(url, api_key)?;
    let client = TrackerClient::new(config);

    let projects = client.projects()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    for project in &projects {
        println!("#{:<6} {}", project.id, pad_display(&project.name, 40));
    }
    println!("\n{} project(s)", projects.len());

    Ok(())
}
