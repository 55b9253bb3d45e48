//! `da-cli`: list and moderate drag marketplace submissions from a terminal.

/// Argument definitions.
pub mod cli;
/// Subcommand implementations.
pub mod commands;
/// Output rendering helpers.
pub mod utils;
