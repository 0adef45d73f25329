//! Docker client construction, liveness probing, and object operations.
//!
//! [`connection`] turns a resolved configuration into a `Bollard` client and
//! verifies the daemon answers; [`client`] wraps that client in the handle the
//! provider's resource handlers share.

pub mod client;
mod connection;

pub use client::{
    ApiFuture, ClientHandle, ContainerRecord, ContainerSpec, DockerApi, ImageRecord,
    NetworkRecord, NetworkSpec, ServerVersion, VolumeRecord, VolumeSpec,
};
pub use connection::{ConnectionDescriptor, EngineConnector, HostEndpoint, TlsMaterial, TlsSource};
