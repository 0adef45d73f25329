//! Semantic error types for the dockhand provider.
//!
//! This module defines the error hierarchy for dockhand, following the
//! principle of using semantic error enums (via `thiserror`) for conditions the
//! caller might inspect or map to a diagnostic, while reserving opaque errors
//! (`eyre::Report`) for the application boundary.

use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Two mutually exclusive options were both given non-empty values.
    #[error("\"{first}\": conflicts with {second}")]
    ConflictingOptions {
        /// The option whose declaration names the conflict.
        first: String,
        /// The option it conflicts with.
        second: String,
    },

    /// A required configuration value is missing.
    #[error("missing required configuration: {field}")]
    MissingRequired {
        /// The name of the missing field.
        field: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// The `OrthoConfig` library returned an error while merging layers.
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Errors raised while building or verifying the Docker client.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The connection descriptor could not be turned into a client.
    ///
    /// Covers unparsable host addresses, invalid PEM material, and missing
    /// files in a certificate directory.
    #[error("Error initializing Docker client: {message}")]
    ClientInit {
        /// A description of the construction failure.
        message: String,
    },

    /// The daemon did not answer the liveness probe.
    #[error("Error pinging Docker server at {host}: {message}")]
    DaemonUnreachable {
        /// The host address that was probed.
        host: String,
        /// A description of the transport failure.
        message: String,
    },

    /// Failed to create the Tokio runtime used by the synchronous APIs.
    #[error("failed to create async runtime: {message}")]
    RuntimeCreationFailed {
        /// A description of the runtime creation failure.
        message: String,
    },
}

/// Errors returned by client handle operations on Docker objects.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The daemon reported that the object does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// The kind of object (`container`, `image`, `network`, `volume`).
        kind: &'static str,
        /// The identifier or name that was looked up.
        id: String,
    },

    /// The daemon rejected a request or the transport failed.
    #[error("failed to {operation} {kind}: {message}")]
    RequestFailed {
        /// The kind of object the request targeted.
        kind: &'static str,
        /// The operation that failed (`create`, `inspect`, `remove`, `pull`).
        operation: &'static str,
        /// A description of the failure.
        message: String,
    },
}

/// Top-level error type for the dockhand provider.
///
/// This enum aggregates all domain-specific errors into a single type. At the
/// application boundary (`main.rs`), these errors are converted to
/// `eyre::Report` for human-readable reporting.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error occurred while loading or validating configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An error occurred while building or verifying the client.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// An error occurred while operating on a Docker object.
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl ProviderError {
    /// Returns true when the error is a `ConflictingOptions` validation error.
    #[must_use]
    pub const fn is_conflicting_options(&self) -> bool {
        matches!(self, Self::Config(ConfigError::ConflictingOptions { .. }))
    }

    /// Returns true when the error is a `ClientInit` construction error.
    #[must_use]
    pub const fn is_client_init(&self) -> bool {
        matches!(self, Self::Engine(EngineError::ClientInit { .. }))
    }

    /// Returns true when the error is a `DaemonUnreachable` probe failure.
    #[must_use]
    pub const fn is_daemon_unreachable(&self) -> bool {
        matches!(self, Self::Engine(EngineError::DaemonUnreachable { .. }))
    }
}

/// A specialised `Result` type for dockhand operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
