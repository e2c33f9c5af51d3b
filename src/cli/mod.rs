//! CLI module for CareerVerse
//!
//! Provides command-line interface for:
//! - serve: run the portal HTTP server
//! - nav: print a role's sidebar navigation
//! - resolve: run a path through the guard chain offline

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{load_config, nav, resolve, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
