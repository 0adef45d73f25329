//! The configured client handle shared by resource handlers.

use std::sync::Arc;

use tracing::debug;

use super::{
    ContainerRecord, ContainerSpec, DockerApi, ImageRecord, NetworkRecord, NetworkSpec,
    ServerVersion, VolumeRecord, VolumeSpec,
};
use crate::error::{ProviderError, ResourceError};

const CONTAINER: &str = "container";
const IMAGE: &str = "image";
const NETWORK: &str = "network";
const VOLUME: &str = "volume";

/// A connected Docker client, produced by a successful configure call.
///
/// Cloning is cheap; every clone talks to the same daemon connection. The
/// handle is safe to share across tasks.
#[derive(Clone)]
pub struct ClientHandle {
    api: Arc<dyn DockerApi>,
    host: String,
}

impl std::fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientHandle")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

/// Map a Bollard error to a resource error for `kind`.
///
/// A 404 from the daemon means the object does not exist; anything else is a
/// failed request.
fn resource_error(
    kind: &'static str,
    operation: &'static str,
    id: &str,
    error: bollard::errors::Error,
) -> ProviderError {
    match error {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => ProviderError::from(ResourceError::NotFound {
            kind,
            id: String::from(id),
        }),
        other => ProviderError::from(ResourceError::RequestFailed {
            kind,
            operation,
            message: other.to_string(),
        }),
    }
}

impl ClientHandle {
    /// Wrap an API implementation for `host`.
    #[must_use]
    pub fn new(api: Arc<dyn DockerApi>, host: impl Into<String>) -> Self {
        Self {
            api,
            host: host.into(),
        }
    }

    /// The daemon address this handle is connected to.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Fetch daemon version information.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::RequestFailed` if the daemon does not answer.
    pub async fn server_version(&self) -> Result<ServerVersion, ProviderError> {
        self.api
            .server_version()
            .await
            .map_err(|e| resource_error("server", "query", &self.host, e))
    }

    /// Create a container.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::RequestFailed` if the daemon rejects the
    /// request, or `ResourceError::NotFound` if the image is missing.
    pub async fn create_container(
        &self,
        spec: ContainerSpec,
    ) -> Result<ContainerRecord, ProviderError> {
        let image = spec.image.clone();
        let record = self
            .api
            .create_container(spec)
            .await
            .map_err(|e| resource_error(CONTAINER, "create", &image, e))?;
        debug!(id = %record.id, %image, "created container");
        Ok(record)
    }

    /// Inspect a container.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::NotFound` if no such container exists.
    pub async fn inspect_container(&self, id: &str) -> Result<ContainerRecord, ProviderError> {
        self.api
            .inspect_container(String::from(id))
            .await
            .map_err(|e| resource_error(CONTAINER, "inspect", id, e))
    }

    /// Remove a container.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::NotFound` if no such container exists.
    pub async fn remove_container(&self, id: &str, force: bool) -> Result<(), ProviderError> {
        self.api
            .remove_container(String::from(id), force)
            .await
            .map_err(|e| resource_error(CONTAINER, "remove", id, e))?;
        debug!(id, "removed container");
        Ok(())
    }

    /// Pull an image and return its local record.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::NotFound` if the registry does not know the
    /// reference, or `ResourceError::RequestFailed` for other failures.
    pub async fn pull_image(&self, reference: &str) -> Result<ImageRecord, ProviderError> {
        self.api
            .pull_image(String::from(reference))
            .await
            .map_err(|e| resource_error(IMAGE, "pull", reference, e))?;
        debug!(reference, "pulled image");
        self.inspect_image(reference).await
    }

    /// Inspect a local image.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::NotFound` if the image is not present locally.
    pub async fn inspect_image(&self, reference: &str) -> Result<ImageRecord, ProviderError> {
        self.api
            .inspect_image(String::from(reference))
            .await
            .map_err(|e| resource_error(IMAGE, "inspect", reference, e))
    }

    /// Remove a local image.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::NotFound` if the image is not present locally.
    pub async fn remove_image(&self, reference: &str, force: bool) -> Result<(), ProviderError> {
        self.api
            .remove_image(String::from(reference), force)
            .await
            .map_err(|e| resource_error(IMAGE, "remove", reference, e))
    }

    /// Create a network.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::RequestFailed` if the daemon rejects the
    /// request.
    pub async fn create_network(&self, spec: NetworkSpec) -> Result<NetworkRecord, ProviderError> {
        let name = spec.name.clone();
        let record = self
            .api
            .create_network(spec)
            .await
            .map_err(|e| resource_error(NETWORK, "create", &name, e))?;
        debug!(id = %record.id, %name, "created network");
        Ok(record)
    }

    /// Inspect a network.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::NotFound` if no such network exists.
    pub async fn inspect_network(&self, id: &str) -> Result<NetworkRecord, ProviderError> {
        self.api
            .inspect_network(String::from(id))
            .await
            .map_err(|e| resource_error(NETWORK, "inspect", id, e))
    }

    /// Remove a network.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::NotFound` if no such network exists.
    pub async fn remove_network(&self, id: &str) -> Result<(), ProviderError> {
        self.api
            .remove_network(String::from(id))
            .await
            .map_err(|e| resource_error(NETWORK, "remove", id, e))
    }

    /// Create a volume.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::RequestFailed` if the daemon rejects the
    /// request.
    pub async fn create_volume(&self, spec: VolumeSpec) -> Result<VolumeRecord, ProviderError> {
        let name = spec.name.clone().unwrap_or_default();
        let record = self
            .api
            .create_volume(spec)
            .await
            .map_err(|e| resource_error(VOLUME, "create", &name, e))?;
        debug!(name = %record.name, "created volume");
        Ok(record)
    }

    /// Inspect a volume.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::NotFound` if no such volume exists.
    pub async fn inspect_volume(&self, name: &str) -> Result<VolumeRecord, ProviderError> {
        self.api
            .inspect_volume(String::from(name))
            .await
            .map_err(|e| resource_error(VOLUME, "inspect", name, e))
    }

    /// Remove a volume.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::NotFound` if no such volume exists.
    pub async fn remove_volume(&self, name: &str, force: bool) -> Result<(), ProviderError> {
        self.api
            .remove_volume(String::from(name), force)
            .await
            .map_err(|e| resource_error(VOLUME, "remove", name, e))
    }
}
