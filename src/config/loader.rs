//! Configuration loading with layered precedence.
//!
//! Explicit layers are merged with `MergeComposer` in the order (lowest to
//! highest): empty defaults, configuration file, command-line arguments. The
//! `DOCKER_*` environment variables are deliberately not a merge layer: they
//! act as per-option defaults that only apply when no explicit layer set the
//! option, which [`ProviderConfig::resolve`] handles after merging.
//!
//! # Architecture Note: Why Manual Layer Composition?
//!
//! The `OrthoConfig` derive macro provides `load()`, which expects to own the
//! entire CLI and treats environment variables as a layer above files. The
//! provider contract needs the opposite precedence for the environment, and
//! the `Cli` struct already dispatches subcommands, so the layers are composed
//! here by hand.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use mockable::Env;
use ortho_config::discovery::ConfigDiscovery;
use ortho_config::serde_json::{self, Map, Value};
use ortho_config::{MergeComposer, toml};
use tracing::debug;

use crate::config::{Cli, ProviderConfig, ResolvedConfig};
use crate::error::{ConfigError, Result};

/// Load a configuration file and push it to the composer.
///
/// Uses `cap_std::fs_utf8` for capability-oriented filesystem access. The
/// function opens the parent directory of the config file and reads from
/// there.
fn load_config_file(path: &Utf8PathBuf, composer: &mut MergeComposer) -> Result<()> {
    let current_dir = Utf8PathBuf::from(".");
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| current_dir.as_ref());
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to open directory {parent}: {e}"),
        }
    })?;

    let content = dir
        .read_to_string(file_name)
        .map_err(|e| ConfigError::ParseError {
            message: format!("failed to read {path}: {e}"),
        })?;

    let value =
        toml::from_str::<serde_json::Value>(&content).map_err(|e| ConfigError::ParseError {
            message: format!("failed to parse {path}: {e}"),
        })?;

    debug!(%path, "loaded provider configuration file");
    composer.push_file(value, Some(path.clone()));
    Ok(())
}

/// Locate the configuration file to load, if any.
///
/// A `--config` path wins when it exists; otherwise the standard discovery
/// candidates are tried in order.
fn discover_config_path(cli: &Cli) -> Option<Utf8PathBuf> {
    cli.config.clone().filter(|p| p.exists()).or_else(|| {
        let discovery = ConfigDiscovery::builder("dockhand")
            .env_var("DOCKHAND_CONFIG_PATH")
            .config_file_name("config.toml")
            .dotfile_name(".dockhand.toml")
            .build();
        discovery
            .candidates()
            .into_iter()
            .filter(|p| p.exists())
            .find_map(|p| Utf8PathBuf::try_from(p).ok())
    })
}

/// Merge the explicit configuration layers without applying defaults.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` for unreadable or malformed files and
/// `ConfigError::OrthoConfig` when the merged layers do not deserialise.
pub fn load_explicit(cli: &Cli) -> Result<ProviderConfig> {
    let mut composer = MergeComposer::new();

    // Layer 1: Defaults. Every option is unset, so the environment and
    // literal defaults can still apply during resolution.
    let defaults =
        serde_json::to_value(ProviderConfig::default()).map_err(|e| ConfigError::ParseError {
            message: format!("failed to serialise defaults: {e}"),
        })?;
    composer.push_defaults(defaults);

    // Layer 2: Configuration file.
    if let Some(ref path) = discover_config_path(cli) {
        load_config_file(path, &mut composer)?;
    }

    // Layer 3: CLI overrides.
    let cli_overrides = build_cli_overrides(cli);
    if !cli_overrides.is_null() {
        composer.push_cli(cli_overrides);
    }

    let config =
        ProviderConfig::merge_from_layers(composer.layers()).map_err(ConfigError::OrthoConfig)?;

    Ok(config)
}

/// Load configuration and apply environment and literal defaults.
///
/// The result is ready to validate and hand to the provider's configure
/// operation.
///
/// # Errors
///
/// Returns `ConfigError` if configuration loading fails due to malformed
/// configuration files or layers that do not deserialise.
pub fn load_config<E: Env>(cli: &Cli, env: &E) -> Result<ResolvedConfig> {
    let explicit = load_explicit(cli)?;
    Ok(explicit.resolve(env))
}

/// Build a JSON value containing CLI overrides.
fn build_cli_overrides(cli: &Cli) -> Value {
    let mut overrides = Map::new();

    if let Some(ref host) = cli.host {
        overrides.insert(String::from("host"), Value::String(host.clone()));
    }

    if let Some(ref cert_path) = cli.cert_path {
        overrides.insert(
            String::from("cert_path"),
            Value::String(String::from(cert_path.as_str())),
        );
    }

    if overrides.is_empty() {
        Value::Null
    } else {
        Value::Object(overrides)
    }
}
