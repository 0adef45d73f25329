//! Host parsing and Docker client construction.
//!
//! This module turns a resolved provider configuration into a connection
//! descriptor and then into a live `Bollard` client. Plain connections go over
//! a Unix socket, named pipe, or HTTP; TLS connections use either inline PEM
//! material or a certificate directory.

mod error_classification;
mod health_check;
mod tls;


use bollard::Docker;
use tracing::debug;

pub use tls::{TlsMaterial, TlsSource};

use crate::config::ResolvedConfig;
use crate::error::{EngineError, ProviderError};

/// Connection timeout in seconds for Docker API connections.
const CONNECTION_TIMEOUT_SECS: u64 = 120;

/// Timeout in seconds for the liveness probe.
const HEALTH_CHECK_TIMEOUT_SECS: u64 = 10;

/// Build a `ClientInit` error from a message.
pub(crate) fn client_init(message: impl Into<String>) -> ProviderError {
    ProviderError::from(EngineError::ClientInit {
        message: message.into(),
    })
}

/// A parsed daemon address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEndpoint {
    /// Unix socket or Windows named pipe URI (`unix://...`, `npipe://...`).
    Socket(String),
    /// `tcp://host:port`; plain HTTP unless TLS settings are present.
    Tcp(String),
    /// `http://host:port`.
    Http(String),
    /// `https://host:port`; only usable with TLS settings.
    Https(String),
}

impl HostEndpoint {
    /// Parse a host address.
    ///
    /// Supports the following formats:
    /// - Unix sockets: `unix:///path/to/socket`
    /// - Windows named pipes: `npipe:////./pipe/name`
    /// - TCP: `tcp://host:port`
    /// - HTTP and HTTPS: `http://host:port`, `https://host:port`
    /// - Bare paths: paths starting with `\\` or `//` are treated as Windows
    ///   named pipes; other absolute paths as Unix sockets. Detection is
    ///   syntax-based, not platform-based.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ClientInit` for an empty address, an unknown
    /// scheme, or a scheme with nothing after it.
    pub fn parse(host: &str) -> Result<Self, ProviderError> {
        let trimmed = host.trim();
        if trimmed.is_empty() {
            return Err(client_init("host address is empty"));
        }

        let Some((scheme, rest)) = trimmed.split_once("://") else {
            return Self::parse_bare_path(trimmed);
        };

        if rest.is_empty() {
            return Err(client_init(format!(
                "unable to parse docker host `{trimmed}`: missing address after scheme"
            )));
        }

        match scheme {
            "unix" | "npipe" => Ok(Self::Socket(String::from(trimmed))),
            "tcp" => Ok(Self::Tcp(String::from(rest))),
            "http" => Ok(Self::Http(String::from(rest))),
            "https" => Ok(Self::Https(String::from(rest))),
            other => Err(client_init(format!(
                "unable to parse docker host `{trimmed}`: unsupported scheme '{other}'"
            ))),
        }
    }

    /// Normalise a bare socket path to a URI with the appropriate scheme.
    fn parse_bare_path(path: &str) -> Result<Self, ProviderError> {
        // Named pipes typically start with \\ or // (e.g., \\.\pipe\docker_engine)
        if path.starts_with("\\\\") || path.starts_with("//") {
            Ok(Self::Socket(format!("npipe://{path}")))
        } else if path.starts_with('/') {
            Ok(Self::Socket(format!("unix://{path}")))
        } else {
            Err(client_init(format!(
                "unable to parse docker host `{path}`: expected a scheme such as unix:// or tcp://"
            )))
        }
    }

    /// Returns the network address for TLS connections, if the scheme allows
    /// TLS.
    fn tls_address(&self) -> Option<String> {
        match self {
            Self::Tcp(address) | Self::Https(address) => Some(format!("https://{address}")),
            Self::Socket(_) | Self::Http(_) => None,
        }
    }
}

/// Everything needed to construct a client: the daemon address and TLS
/// source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    host: String,
    endpoint: HostEndpoint,
    tls: TlsSource,
}

impl ConnectionDescriptor {
    /// Build a descriptor from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ClientInit` when the host cannot be parsed or
    /// only some of the PEM material options are set.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, ProviderError> {
        let endpoint = HostEndpoint::parse(&config.host)?;
        let tls = TlsSource::from_config(config)?;
        Ok(Self {
            host: config.host.clone(),
            endpoint,
            tls,
        })
    }

    /// The host address as configured.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The parsed endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &HostEndpoint {
        &self.endpoint
    }

    /// The TLS source.
    #[must_use]
    pub const fn tls(&self) -> &TlsSource {
        &self.tls
    }
}

/// Provides methods to build and verify Docker clients.
pub struct EngineConnector;

impl EngineConnector {
    /// Construct a client for the descriptor without contacting the daemon.
    ///
    /// PEM material is validated before any connection is attempted.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ClientInit` if the descriptor cannot produce a
    /// client: TLS requested over a socket or plain HTTP address, an
    /// `https://` host without TLS settings, invalid PEM, or an incomplete
    /// certificate directory.
    ///
    /// Returns `EngineError::DaemonUnreachable` if a socket path does not
    /// exist or cannot be opened.
    pub fn connect(descriptor: &ConnectionDescriptor) -> Result<Docker, ProviderError> {
        let host = descriptor.host();
        let endpoint = descriptor.endpoint();

        if matches!(descriptor.tls(), TlsSource::Plain) {
            debug!(host, "building plain Docker client");
            return Self::connect_plain(endpoint, host);
        }

        let Some(address) = endpoint.tls_address() else {
            return Err(client_init(format!(
                "TLS settings require a tcp:// or https:// host, got `{host}`"
            )));
        };

        debug!(host, source = descriptor.tls().label(), "building TLS Docker client");
        descriptor.tls().with_files(|files| {
            Docker::connect_with_ssl(
                &address,
                files.key.as_std_path(),
                files.cert.as_std_path(),
                files.ca.as_std_path(),
                CONNECTION_TIMEOUT_SECS,
                bollard::API_DEFAULT_VERSION,
            )
            .map_err(|e| ProviderError::from(error_classification::classify_connection_error(&e, host)))
        })
    }

    fn connect_plain(endpoint: &HostEndpoint, host: &str) -> Result<Docker, ProviderError> {
        let result = match endpoint {
            HostEndpoint::Socket(uri) => Docker::connect_with_socket(
                uri,
                CONNECTION_TIMEOUT_SECS,
                bollard::API_DEFAULT_VERSION,
            ),
            // Bollard only understands http:// for plain TCP.
            HostEndpoint::Tcp(address) | HostEndpoint::Http(address) => Docker::connect_with_http(
                &format!("http://{address}"),
                CONNECTION_TIMEOUT_SECS,
                bollard::API_DEFAULT_VERSION,
            ),
            HostEndpoint::Https(_) => {
                return Err(client_init(format!(
                    "https:// host `{host}` requires ca_material, cert_material, and key_material or cert_path"
                )));
            }
        };

        result.map_err(|e| {
            ProviderError::from(error_classification::classify_connection_error(&e, host))
        })
    }
}
