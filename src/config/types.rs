//! Configuration data types for dockhand.

use camino::Utf8PathBuf;
use mockable::Env;
use ortho_config::{OrthoConfig, OrthoResult, PostMergeContext, PostMergeHook};
use serde::{Deserialize, Serialize};

use super::schema::{
    self, CA_MATERIAL, CERT_MATERIAL, CERT_PATH, HOST, KEY_MATERIAL, OPTIONS, is_blank,
};
use crate::error::{ConfigError, ProviderError};

/// Caller-supplied provider configuration, before defaults are applied.
///
/// Every field is optional here: a `None` (or empty) value means "not set by
/// the caller", and [`ProviderConfig::resolve`] fills it from the matching
/// `DOCKER_*` environment variable or the literal default.
///
/// Configuration files are discovered in this order:
/// 1. Path specified via `DOCKHAND_CONFIG_PATH` environment variable
/// 2. `.dockhand.toml` in the current working directory
/// 3. `.dockhand.toml` in the home directory
/// 4. `~/.config/dockhand/config.toml` (XDG default)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "DOCKER",
    post_merge_hook,
    discovery(
        app_name = "dockhand",
        env_var = "DOCKHAND_CONFIG_PATH",
        config_file_name = "config.toml",
        dotfile_name = ".dockhand.toml",
        config_cli_long = "config",
        config_cli_visible = true,
    )
)]
pub struct ProviderConfig {
    /// The Docker daemon address.
    pub host: Option<String>,

    /// PEM-encoded content of the Docker host CA certificate.
    #[ortho_config(skip_cli)]
    pub ca_material: Option<String>,

    /// PEM-encoded content of the Docker client certificate.
    #[ortho_config(skip_cli)]
    pub cert_material: Option<String>,

    /// PEM-encoded content of the Docker client private key.
    #[ortho_config(skip_cli)]
    pub key_material: Option<String>,

    /// Path to a directory holding `ca.pem`, `cert.pem`, and `key.pem`.
    pub cert_path: Option<Utf8PathBuf>,
}

impl ProviderConfig {
    /// Return the explicitly supplied value of an option, if any.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        match name {
            HOST => self.host.as_deref(),
            CA_MATERIAL => self.ca_material.as_deref(),
            CERT_MATERIAL => self.cert_material.as_deref(),
            KEY_MATERIAL => self.key_material.as_deref(),
            CERT_PATH => self.cert_path.as_ref().map(|path| path.as_str()),
            _ => None,
        }
    }

    /// Apply environment and literal defaults to every unset option.
    ///
    /// Explicit non-empty values always win; the environment is consulted
    /// only for options the caller left unset.
    #[must_use]
    pub fn resolve<E: Env>(&self, env: &E) -> ResolvedConfig {
        let lookup = |name: &str| {
            schema::find(name).and_then(|spec| spec.resolve(self.value(name), env))
        };

        ResolvedConfig {
            host: lookup(HOST).unwrap_or_default(),
            ca_material: lookup(CA_MATERIAL),
            cert_material: lookup(CERT_MATERIAL),
            key_material: lookup(KEY_MATERIAL),
            cert_path: lookup(CERT_PATH).map(Utf8PathBuf::from),
        }
    }

    /// Replace empty or whitespace-only strings with `None`.
    fn normalise(&mut self) {
        for field in [
            &mut self.host,
            &mut self.ca_material,
            &mut self.cert_material,
            &mut self.key_material,
        ] {
            if field.as_deref().is_some_and(is_blank) {
                *field = None;
            }
        }
        if self
            .cert_path
            .as_ref()
            .is_some_and(|path| is_blank(path.as_str()))
        {
            self.cert_path = None;
        }
    }
}

impl PostMergeHook for ProviderConfig {
    fn post_merge(&mut self, _ctx: &PostMergeContext) -> OrthoResult<()> {
        self.normalise();
        Ok(())
    }
}

/// Connection configuration with every default applied.
///
/// This is the input to the provider's configure operation. It is built fresh
/// for each configure call and consumed to produce a client handle.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// The Docker daemon address.
    pub host: String,
    /// PEM-encoded CA certificate.
    pub ca_material: Option<String>,
    /// PEM-encoded client certificate.
    pub cert_material: Option<String>,
    /// PEM-encoded client private key.
    pub key_material: Option<String>,
    /// Directory containing `ca.pem`, `cert.pem`, and `key.pem`.
    pub cert_path: Option<Utf8PathBuf>,
}

impl ResolvedConfig {
    /// Build a resolved configuration for a plain connection to `host`.
    #[must_use]
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ca_material: None,
            cert_material: None,
            key_material: None,
            cert_path: None,
        }
    }

    /// Return the value of an option, treating blank strings as unset.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        let raw = match name {
            HOST => Some(self.host.as_str()),
            CA_MATERIAL => self.ca_material.as_deref(),
            CERT_MATERIAL => self.cert_material.as_deref(),
            KEY_MATERIAL => self.key_material.as_deref(),
            CERT_PATH => self.cert_path.as_ref().map(|path| path.as_str()),
            _ => None,
        };
        raw.filter(|value| !is_blank(value))
    }

    /// Collect every validation failure without stopping at the first.
    ///
    /// Conflict declarations from the option table are checked in table order,
    /// so the result is deterministic. An empty vector means the configuration
    /// is valid.
    #[must_use]
    pub fn validation_errors(&self) -> Vec<ConfigError> {
        let missing = OPTIONS
            .iter()
            .filter(|spec| spec.required && self.value(spec.name).is_none())
            .map(|spec| ConfigError::MissingRequired {
                field: String::from(spec.name),
            });

        let conflicts = OPTIONS
            .iter()
            .filter(|spec| self.value(spec.name).is_some())
            .flat_map(|spec| {
                spec.conflicts_with
                    .iter()
                    .filter(move |other| self.value(other).is_some())
                    .map(move |other| ConfigError::ConflictingOptions {
                        first: String::from(spec.name),
                        second: String::from(*other),
                    })
            });

        missing.chain(conflicts).collect()
    }

    /// Validate the configuration, returning the first failure.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRequired` when `host` is empty, or
    /// `ConfigError::ConflictingOptions` when `cert_path` is set alongside any
    /// of the PEM material options.
    pub fn validate(&self) -> crate::error::Result<()> {
        self.validation_errors()
            .into_iter()
            .next()
            .map_or(Ok(()), |error| Err(ProviderError::from(error)))
    }
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: Option<&String>| value.map(|_| "<redacted>");
        f.debug_struct("ResolvedConfig")
            .field("host", &self.host)
            .field("ca_material", &redact(self.ca_material.as_ref()))
            .field("cert_material", &redact(self.cert_material.as_ref()))
            .field("key_material", &redact(self.key_material.as_ref()))
            .field("cert_path", &self.cert_path)
            .finish()
    }
}
