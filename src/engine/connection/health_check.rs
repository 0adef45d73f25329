//! Liveness probe and connect-then-verify functionality.
//!
//! The probe is a ping bounded by a timeout. Any failure, including the
//! timeout, means the daemon is unreachable at the configured host.

use std::time::Duration;

use tracing::debug;

use super::{EngineConnector, HEALTH_CHECK_TIMEOUT_SECS};
use crate::engine::client::DockerApi;
use crate::error::{EngineError, ProviderError};

impl EngineConnector {
    // =========================================================================
    // Health check
    // =========================================================================

    /// Ping the daemon with a timeout.
    pub(crate) async fn ping_with_timeout(
        api: &dyn DockerApi,
        host: &str,
    ) -> Result<(), ProviderError> {
        let timeout = Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS);
        let unreachable = |message: String| {
            ProviderError::from(EngineError::DaemonUnreachable {
                host: String::from(host),
                message,
            })
        };

        tokio::time::timeout(timeout, api.ping())
            .await
            .map_err(|_| {
                unreachable(format!(
                    "no response within {HEALTH_CHECK_TIMEOUT_SECS} seconds"
                ))
            })?
            .map_err(|e| unreachable(e.to_string()))?;

        debug!(host, "Docker daemon answered ping");
        Ok(())
    }

    /// Verify the daemon is responsive (async version).
    ///
    /// # Errors
    ///
    /// Returns `EngineError::DaemonUnreachable` if the ping fails or times
    /// out.
    pub async fn health_check_async(api: &dyn DockerApi, host: &str) -> Result<(), ProviderError> {
        Self::ping_with_timeout(api, host).await
    }

    /// Verify the daemon is responsive.
    ///
    /// This creates a dedicated tokio runtime. Use
    /// [`Self::health_check_async`] when already in an async context.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::RuntimeCreationFailed` if the tokio runtime
    /// cannot be created.
    ///
    /// Returns `EngineError::DaemonUnreachable` if the ping fails or times
    /// out.
    pub fn health_check(api: &dyn DockerApi, host: &str) -> Result<(), ProviderError> {
        let rt = Self::create_runtime()?;
        rt.block_on(Self::health_check_async(api, host))
    }

    /// Create a tokio runtime for synchronous operations.
    pub(crate) fn create_runtime() -> Result<tokio::runtime::Runtime, ProviderError> {
        tokio::runtime::Runtime::new().map_err(|e| {
            ProviderError::from(EngineError::RuntimeCreationFailed {
                message: e.to_string(),
            })
        })
    }

    // =========================================================================
    // Connect and verify
    // =========================================================================

    /// Build a client with `connect_fn`, then probe it.
    pub(crate) async fn connect_then_verify<A, F>(
        connect_fn: F,
        host: &str,
    ) -> Result<A, ProviderError>
    where
        A: DockerApi,
        F: FnOnce() -> Result<A, ProviderError>,
    {
        let api = connect_fn()?;
        Self::ping_with_timeout(&api, host).await?;
        Ok(api)
    }
}
