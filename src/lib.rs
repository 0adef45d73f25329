//! Docker provider bootstrap for infrastructure-as-code orchestrators.
//!
//! `dockhand` declares the connection settings a Docker provider accepts,
//! resolves them against `DOCKER_*` environment defaults, rejects conflicting
//! TLS settings, builds a `Bollard` client, and pings the daemon before
//! handing a shared client handle to the registered resource handlers.
//!
//! # Modules
//!
//! - [`config`]: Option schema, configuration loading, and validation
//! - [`engine`]: Client construction, liveness probing, and the client handle
//! - [`error`]: Semantic error types for the provider
//! - [`provider`]: Handler registry and the configure operation

pub mod config;
pub mod engine;
pub mod error;
pub mod provider;
