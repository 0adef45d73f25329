//! Command-line argument definitions for dockhand.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Command-line interface for dockhand.
#[derive(Debug, Parser)]
#[command(name = "dockhand")]
#[command(
    author,
    version,
    about = "Docker provider bootstrap: validate connection settings and probe the daemon"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Docker daemon address (overrides the file and `DOCKER_HOST`).
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Directory containing `ca.pem`, `cert.pem`, and `key.pem`.
    #[arg(long, global = true)]
    pub cert_path: Option<Utf8PathBuf>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Configure the provider and ping the daemon.
    Check,

    /// Resolve and validate configuration without connecting.
    Validate,

    /// Print the recognised configuration options.
    Schema,

    /// List the registered resource and data-source handlers.
    Resources,
}
