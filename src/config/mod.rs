//! Configuration system for dockhand.
//!
//! This module declares the provider's connection options, loads explicit
//! values from a configuration file and the command line, and resolves every
//! unset option from its `DOCKER_*` environment variable or literal default.
//!
//! The configuration file is expected at `~/.config/dockhand/config.toml` by
//! default.
//!
//! # Example Configuration
//!
//! ```toml
//! host = "tcp://docker.internal:2376"
//! cert_path = "/home/user/.docker/machine/certs"
//! ```
//!
//! Inline PEM material is also accepted, but cannot be combined with
//! `cert_path`:
//!
//! ```toml
//! host = "tcp://docker.internal:2376"
//! ca_material = """
//! -----BEGIN CERTIFICATE-----
//! ...
//! -----END CERTIFICATE-----
//! """
//! ```

mod cli;
mod loader;
pub mod schema;
mod types;


pub use cli::{Cli, Commands};
pub use loader::{load_config, load_explicit};
pub use schema::{OptionSpec, env_var_names};
pub use types::{ProviderConfig, ResolvedConfig};
