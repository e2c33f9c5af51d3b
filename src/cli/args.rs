//! CLI argument definitions using clap
//!
//! Commands:
//! - careerverse serve [--config <path>] [--port <port>]
//! - careerverse nav --role <role>
//! - careerverse resolve --path <path> [--role <role>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::portal::Role;

/// CareerVerse - role-gated career development portal
#[derive(Parser, Debug)]
#[command(name = "careerverse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the portal HTTP server
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the sidebar navigation for a role
    Nav {
        /// student or mentor
        #[arg(long)]
        role: Role,
    },

    /// Run a path through the guard chain and print the outcome
    Resolve {
        /// Requested path, e.g. /dashboard/mentors
        #[arg(long)]
        path: String,

        /// Role of a signed-in viewer; omit for a signed-out viewer
        #[arg(long)]
        role: Option<Role>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
