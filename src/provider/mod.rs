//! The provider: its option schema, handler registry, and configure
//! operation.
//!
//! A host orchestrator builds one [`Provider`], resolves a configuration, and
//! calls [`Provider::configure`] once per session. Success yields a
//! [`ClientHandle`] shared by every registered resource and data-source
//! handler; failure yields exactly one error and no handle.


use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::schema::{OPTIONS, OptionSpec};
use crate::config::ResolvedConfig;
use crate::engine::{ClientHandle, ConnectionDescriptor, DockerApi, EngineConnector};
use crate::error::Result;

/// Docker object kinds managed by resource handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    /// `docker_container`
    Container,
    /// `docker_image`
    Image,
    /// `docker_network`
    Network,
    /// `docker_volume`
    Volume,
}

impl ResourceKind {
    /// Every resource kind, in registration order.
    pub const ALL: [Self; 4] = [Self::Container, Self::Image, Self::Network, Self::Volume];

    /// The name the orchestrator uses for this resource type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Container => "docker_container",
            Self::Image => "docker_image",
            Self::Network => "docker_network",
            Self::Volume => "docker_volume",
        }
    }
}

/// Read-only lookups exposed as data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataSourceKind {
    /// `docker_registry_image`
    RegistryImage,
}

impl DataSourceKind {
    /// Every data source kind, in registration order.
    pub const ALL: [Self; 1] = [Self::RegistryImage];

    /// The name the orchestrator uses for this data source.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RegistryImage => "docker_registry_image",
        }
    }
}

/// The Docker provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    resources: Vec<ResourceKind>,
    data_sources: Vec<DataSourceKind>,
}

impl Default for Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider {
    /// Build a provider with every resource and data source registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resources: ResourceKind::ALL.to_vec(),
            data_sources: DataSourceKind::ALL.to_vec(),
        }
    }

    /// The recognised configuration options.
    #[must_use]
    pub const fn schema() -> &'static [OptionSpec] {
        OPTIONS
    }

    /// Look up a resource handler by name.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<ResourceKind> {
        self.resources.iter().copied().find(|kind| kind.name() == name)
    }

    /// Look up a data source handler by name.
    #[must_use]
    pub fn data_source(&self, name: &str) -> Option<DataSourceKind> {
        self.data_sources
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
    }

    /// Names of the registered resource handlers.
    pub fn resource_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.iter().map(|kind| kind.name())
    }

    /// Names of the registered data source handlers.
    pub fn data_source_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.data_sources.iter().map(|kind| kind.name())
    }

    /// Validate the configuration, build a client, and ping the daemon
    /// (async version).
    ///
    /// Nothing is retried: the first failure is returned and no handle is
    /// produced.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConflictingOptions` or
    /// `ConfigError::MissingRequired` before any client is built.
    ///
    /// Returns `EngineError::ClientInit` if the host or TLS settings cannot
    /// produce a client. PEM material is checked before any network call.
    ///
    /// Returns `EngineError::DaemonUnreachable` if the daemon does not answer
    /// the ping.
    pub async fn configure_async(&self, config: &ResolvedConfig) -> Result<ClientHandle> {
        self.configure_with(config, EngineConnector::connect).await
    }

    /// Validate the configuration, build a client, and ping the daemon.
    ///
    /// Blocks the calling thread on a dedicated tokio runtime; must not be
    /// called from inside an async context. Use [`Self::configure_async`]
    /// there instead.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::RuntimeCreationFailed` if the tokio runtime
    /// cannot be created, and otherwise the same errors as
    /// [`Self::configure_async`].
    pub fn configure(&self, config: &ResolvedConfig) -> Result<ClientHandle> {
        let rt = EngineConnector::create_runtime()?;
        rt.block_on(self.configure_async(config))
    }

    /// Run the configure steps with an injectable client constructor.
    pub(crate) async fn configure_with<A, F>(
        &self,
        config: &ResolvedConfig,
        connect: F,
    ) -> Result<ClientHandle>
    where
        A: DockerApi + 'static,
        F: FnOnce(&ConnectionDescriptor) -> Result<A>,
    {
        info!(host = %config.host, "configuring Docker provider");

        config.validate().inspect_err(|error| {
            warn!(%error, "provider configuration rejected");
        })?;

        let descriptor = ConnectionDescriptor::from_config(config)?;
        debug!(tls = descriptor.tls().label(), "connection descriptor built");

        let host = descriptor.host();
        let api = EngineConnector::connect_then_verify(|| connect(&descriptor), host)
            .await
            .inspect_err(|error| warn!(%error, "Docker provider configuration failed"))?;

        info!(
            host,
            resources = self.resources.len(),
            data_sources = self.data_sources.len(),
            "Docker daemon reachable; client handle ready"
        );
        Ok(ClientHandle::new(Arc::new(api), host))
    }
}
