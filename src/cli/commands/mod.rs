//! Command implementations.

pub mod board;
pub mod issues;
pub mod projects;
pub mod serve;
