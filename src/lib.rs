//! `trackline` - Gantt timeline dashboard library
//!
//! This crate provides the core functionality for the `tln` CLI tool, a
//! read-only Gantt dashboard over a Redmine-compatible tracker plus a stdio
//! protocol bridge exposing the same API to tool-calling clients.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Tracker connection settings
//! - [`api`] - Blocking HTTP client and the [`api::Tracker`] seam
//! - [`load`] - The concurrent fetch-supplement-group load cycle
//! - [`format`] - Board and list rendering (text, JSON)
//! - [`bridge`] - Stdio JSON-RPC bridge server
//! - [`error`] - Error types and handling
//!
//! The pure engines (classification, grouping, filtering, timeline layout,
//! hour scaling) live in the `trackline-lib` crate; everything fallible sits
//! here at the I/O boundary.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod load;
pub mod logging;

pub use error::{Result, TracklineError};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
