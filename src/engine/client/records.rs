//! Plain records exchanged with the Docker API seam.
//!
//! These types decouple handle callers from Bollard's generated models, which
//! carry dozens of optional fields the provider never reads.

use bollard::models::{
    ContainerCreateBody, ContainerInspectResponse, ImageInspect, NetworkCreateRequest,
    SystemVersion, Volume, VolumeCreateRequest,
};

/// Daemon version information returned by the version endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerVersion {
    /// Engine release, for example `27.3.1`.
    pub version: String,
    /// Highest API version the daemon speaks.
    pub api_version: String,
    /// Operating system the daemon runs on.
    pub os: String,
    /// CPU architecture the daemon runs on.
    pub arch: String,
}

impl From<SystemVersion> for ServerVersion {
    fn from(value: SystemVersion) -> Self {
        Self {
            version: value.version.unwrap_or_default(),
            api_version: value.api_version.unwrap_or_default(),
            os: value.os.unwrap_or_default(),
            arch: value.arch.unwrap_or_default(),
        }
    }
}

/// Parameters for creating a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Image reference to create from.
    pub image: String,
    /// Optional container name.
    pub name: Option<String>,
    /// Optional command override.
    pub command: Option<Vec<String>>,
    /// Environment entries in `KEY=value` form.
    pub env: Vec<String>,
}

impl ContainerSpec {
    /// Start a spec for `image`.
    #[must_use]
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }

    /// Set the container name. Blank names are ignored.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into()).filter(|value| !value.trim().is_empty());
        self
    }

    /// Set the command override.
    #[must_use]
    pub fn with_command(mut self, command: Vec<String>) -> Self {
        self.command = Some(command);
        self
    }

    /// Append an environment entry.
    #[must_use]
    pub fn with_env(mut self, entry: impl Into<String>) -> Self {
        self.env.push(entry.into());
        self
    }

    pub(crate) fn to_body(&self) -> ContainerCreateBody {
        ContainerCreateBody {
            image: Some(self.image.clone()),
            cmd: self.command.clone(),
            env: (!self.env.is_empty()).then(|| self.env.clone()),
            ..ContainerCreateBody::default()
        }
    }
}

/// Summary of a container known to the daemon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerRecord {
    /// Container ID.
    pub id: String,
    /// Container name without the leading slash, when known.
    pub name: Option<String>,
    /// Image the container was created from, when known.
    pub image: Option<String>,
    /// Whether the container is running.
    pub running: bool,
    /// Warnings returned by the create call.
    pub warnings: Vec<String>,
}

impl From<ContainerInspectResponse> for ContainerRecord {
    fn from(value: ContainerInspectResponse) -> Self {
        Self {
            id: value.id.unwrap_or_default(),
            name: value
                .name
                .map(|name| String::from(name.trim_start_matches('/'))),
            image: value.image,
            running: value
                .state
                .and_then(|state| state.running)
                .unwrap_or(false),
            warnings: Vec::new(),
        }
    }
}

/// Summary of a local image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRecord {
    /// Image ID (content digest).
    pub id: String,
    /// Repository tags pointing at the image.
    pub repo_tags: Vec<String>,
}

impl From<ImageInspect> for ImageRecord {
    fn from(value: ImageInspect) -> Self {
        Self {
            id: value.id.unwrap_or_default(),
            repo_tags: value.repo_tags.unwrap_or_default(),
        }
    }
}

/// Parameters for creating a network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSpec {
    /// Network name.
    pub name: String,
    /// Driver name; the daemon default (`bridge`) when unset.
    pub driver: Option<String>,
}

impl NetworkSpec {
    pub(crate) fn to_request(&self) -> NetworkCreateRequest {
        NetworkCreateRequest {
            name: self.name.clone(),
            driver: self.driver.clone(),
            ..NetworkCreateRequest::default()
        }
    }
}

/// Summary of a network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkRecord {
    /// Network ID.
    pub id: String,
    /// Network name.
    pub name: String,
    /// Driver name.
    pub driver: Option<String>,
}

/// Parameters for creating a volume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeSpec {
    /// Volume name; the daemon generates one when unset.
    pub name: Option<String>,
    /// Driver name; the daemon default (`local`) when unset.
    pub driver: Option<String>,
}

impl VolumeSpec {
    pub(crate) fn to_options(&self) -> VolumeCreateRequest {
        VolumeCreateRequest {
            name: self.name.clone(),
            driver: self.driver.clone(),
            ..VolumeCreateRequest::default()
        }
    }
}

/// Summary of a volume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeRecord {
    /// Volume name.
    pub name: String,
    /// Driver name.
    pub driver: String,
    /// Host path where the volume is mounted.
    pub mountpoint: String,
}

impl From<Volume> for VolumeRecord {
    fn from(value: Volume) -> Self {
        Self {
            name: value.name,
            driver: value.driver,
            mountpoint: value.mountpoint,
        }
    }
}
