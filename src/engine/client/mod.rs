//! The Docker API seam and the client handle built on it.
//!
//! [`DockerApi`] is the narrow set of daemon calls the provider's resource
//! handlers rely on. It is implemented for `bollard::Docker` and mocked in
//! tests, so handle logic runs without a daemon.

mod handle;
mod records;

#[cfg(test)]
pub(crate) mod test_support;

use std::future::Future;
use std::pin::Pin;

use bollard::Docker;
use bollard::query_parameters::{
    CreateContainerOptionsBuilder, CreateImageOptionsBuilder, InspectContainerOptions,
    InspectNetworkOptions, RemoveContainerOptionsBuilder, RemoveImageOptionsBuilder,
    RemoveVolumeOptionsBuilder,
};
use futures_util::TryStreamExt;

pub use handle::ClientHandle;
pub use records::{
    ContainerRecord, ContainerSpec, ImageRecord, NetworkRecord, NetworkSpec, ServerVersion,
    VolumeRecord, VolumeSpec,
};

/// Boxed future type returned by [`DockerApi`] implementors.
pub type ApiFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, bollard::errors::Error>> + Send + 'a>>;

/// Daemon operations available to resource handlers.
pub trait DockerApi: Send + Sync {
    /// Liveness probe.
    fn ping(&self) -> ApiFuture<'_, ()>;

    /// Fetch daemon version information.
    fn server_version(&self) -> ApiFuture<'_, ServerVersion>;

    /// Create a container.
    fn create_container(&self, spec: ContainerSpec) -> ApiFuture<'_, ContainerRecord>;

    /// Inspect a container by ID or name.
    fn inspect_container(&self, id: String) -> ApiFuture<'_, ContainerRecord>;

    /// Remove a container by ID or name.
    fn remove_container(&self, id: String, force: bool) -> ApiFuture<'_, ()>;

    /// Pull an image reference, draining the progress stream.
    fn pull_image(&self, reference: String) -> ApiFuture<'_, ()>;

    /// Inspect a local image.
    fn inspect_image(&self, reference: String) -> ApiFuture<'_, ImageRecord>;

    /// Remove a local image.
    fn remove_image(&self, reference: String, force: bool) -> ApiFuture<'_, ()>;

    /// Create a network.
    fn create_network(&self, spec: NetworkSpec) -> ApiFuture<'_, NetworkRecord>;

    /// Inspect a network by ID or name.
    fn inspect_network(&self, id: String) -> ApiFuture<'_, NetworkRecord>;

    /// Remove a network by ID or name.
    fn remove_network(&self, id: String) -> ApiFuture<'_, ()>;

    /// Create a volume.
    fn create_volume(&self, spec: VolumeSpec) -> ApiFuture<'_, VolumeRecord>;

    /// Inspect a volume by name.
    fn inspect_volume(&self, name: String) -> ApiFuture<'_, VolumeRecord>;

    /// Remove a volume by name.
    fn remove_volume(&self, name: String, force: bool) -> ApiFuture<'_, ()>;
}

impl DockerApi for Docker {
    fn ping(&self) -> ApiFuture<'_, ()> {
        Box::pin(async move { Self::ping(self).await.map(drop) })
    }

    fn server_version(&self) -> ApiFuture<'_, ServerVersion> {
        Box::pin(async move { self.version().await.map(ServerVersion::from) })
    }

    fn create_container(&self, spec: ContainerSpec) -> ApiFuture<'_, ContainerRecord> {
        Box::pin(async move {
            let options = spec
                .name
                .as_deref()
                .map(|name| CreateContainerOptionsBuilder::new().name(name).build());
            let response = Self::create_container(self, options, spec.to_body()).await?;
            Ok(ContainerRecord {
                id: response.id,
                name: spec.name,
                image: Some(spec.image),
                running: false,
                warnings: response.warnings,
            })
        })
    }

    fn inspect_container(&self, id: String) -> ApiFuture<'_, ContainerRecord> {
        Box::pin(async move {
            Self::inspect_container(self, &id, None::<InspectContainerOptions>)
                .await
                .map(ContainerRecord::from)
        })
    }

    fn remove_container(&self, id: String, force: bool) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let options = RemoveContainerOptionsBuilder::new().force(force).build();
            Self::remove_container(self, &id, Some(options)).await
        })
    }

    fn pull_image(&self, reference: String) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let options = CreateImageOptionsBuilder::new()
                .from_image(&reference)
                .build();
            self.create_image(Some(options), None, None)
                .try_for_each(|_| async { Ok(()) })
                .await
        })
    }

    fn inspect_image(&self, reference: String) -> ApiFuture<'_, ImageRecord> {
        Box::pin(async move {
            Self::inspect_image(self, &reference)
                .await
                .map(ImageRecord::from)
        })
    }

    fn remove_image(&self, reference: String, force: bool) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let options = RemoveImageOptionsBuilder::new().force(force).build();
            Self::remove_image(self, &reference, Some(options), None)
                .await
                .map(drop)
        })
    }

    fn create_network(&self, spec: NetworkSpec) -> ApiFuture<'_, NetworkRecord> {
        Box::pin(async move {
            let response = Self::create_network(self, spec.to_request()).await?;
            let id: Option<String> = response.id.into();
            Ok(NetworkRecord {
                id: id.unwrap_or_default(),
                name: spec.name,
                driver: spec.driver,
            })
        })
    }

    fn inspect_network(&self, id: String) -> ApiFuture<'_, NetworkRecord> {
        Box::pin(async move {
            let network = Self::inspect_network(self, &id, None::<InspectNetworkOptions>).await?;
            Ok(NetworkRecord {
                id: network.id.unwrap_or_default(),
                name: network.name.unwrap_or_default(),
                driver: network.driver,
            })
        })
    }

    fn remove_network(&self, id: String) -> ApiFuture<'_, ()> {
        Box::pin(async move { Self::remove_network(self, &id).await })
    }

    fn create_volume(&self, spec: VolumeSpec) -> ApiFuture<'_, VolumeRecord> {
        Box::pin(async move {
            Self::create_volume(self, spec.to_options())
                .await
                .map(VolumeRecord::from)
        })
    }

    fn inspect_volume(&self, name: String) -> ApiFuture<'_, VolumeRecord> {
        Box::pin(async move {
            Self::inspect_volume(self, &name)
                .await
                .map(VolumeRecord::from)
        })
    }

    fn remove_volume(&self, name: String, force: bool) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let options = RemoveVolumeOptionsBuilder::new().force(force).build();
            Self::remove_volume(self, &name, Some(options)).await
        })
    }
}
