//! Declarative schema for the provider's connection options.
//!
//! Every recognised option is described once in [`OPTIONS`]: its environment
//! variable, literal default, requiredness, and the options it conflicts with.
//! Default resolution and conflict validation are both driven from this table,
//! so adding an option is a single entry here plus a field on the config
//! structs.

use mockable::Env;

/// Option identifier for the daemon address.
pub const HOST: &str = "host";
/// Option identifier for the inline CA certificate.
pub const CA_MATERIAL: &str = "ca_material";
/// Option identifier for the inline client certificate.
pub const CERT_MATERIAL: &str = "cert_material";
/// Option identifier for the inline client private key.
pub const KEY_MATERIAL: &str = "key_material";
/// Option identifier for the TLS certificate directory.
pub const CERT_PATH: &str = "cert_path";

/// Default daemon address used when neither the caller nor `DOCKER_HOST`
/// supplies one.
pub const DEFAULT_HOST: &str = "unix:///var/run/docker.sock";

/// Returns true when `value` is empty or only whitespace.
///
/// Blank values count as unset in every configuration layer.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Declaration of a single provider option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// The option identifier as it appears in configuration files.
    pub name: &'static str,
    /// The environment variable consulted when the option is unset.
    pub env_var: &'static str,
    /// The literal fallback when the environment variable is absent or empty.
    pub default: &'static str,
    /// Whether a non-empty value must be present after resolution.
    pub required: bool,
    /// Options that must not be set alongside this one.
    pub conflicts_with: &'static [&'static str],
    /// Human-readable description.
    pub description: &'static str,
}

impl OptionSpec {
    /// Resolve the effective value for this option.
    ///
    /// An explicit non-blank value wins. Otherwise the environment variable is
    /// read, and when that is absent or blank the literal default applies.
    /// Returns `None` when the final value is blank.
    #[must_use]
    pub fn resolve<E: Env>(&self, explicit: Option<&str>, env: &E) -> Option<String> {
        explicit
            .filter(|value| !is_blank(value))
            .map(String::from)
            .or_else(|| env.string(self.env_var).filter(|value| !is_blank(value)))
            .or_else(|| (!is_blank(self.default)).then(|| String::from(self.default)))
    }
}

/// Table of every option the provider recognises.
///
/// Conflicts are declared on the material options only; validation treats a
/// declaration as symmetric, so `cert_path` needs no mirror entry.
pub const OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        name: HOST,
        env_var: "DOCKER_HOST",
        default: DEFAULT_HOST,
        required: true,
        conflicts_with: &[],
        description: "The Docker daemon address",
    },
    OptionSpec {
        name: CA_MATERIAL,
        env_var: "DOCKER_CA_MATERIAL",
        default: "",
        required: false,
        conflicts_with: &[CERT_PATH],
        description: "PEM-encoded content of Docker host CA certificate",
    },
    OptionSpec {
        name: CERT_MATERIAL,
        env_var: "DOCKER_CERT_MATERIAL",
        default: "",
        required: false,
        conflicts_with: &[CERT_PATH],
        description: "PEM-encoded content of Docker client certificate",
    },
    OptionSpec {
        name: KEY_MATERIAL,
        env_var: "DOCKER_KEY_MATERIAL",
        default: "",
        required: false,
        conflicts_with: &[CERT_PATH],
        description: "PEM-encoded content of Docker client private key",
    },
    OptionSpec {
        name: CERT_PATH,
        env_var: "DOCKER_CERT_PATH",
        default: "",
        required: false,
        conflicts_with: &[],
        description: "Path to directory with Docker TLS config",
    },
];

/// Look up an option declaration by identifier.
#[must_use]
pub fn find(name: &str) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|spec| spec.name == name)
}

/// Every option that conflicts with `name`, whichever side declared it.
#[must_use]
pub fn conflicts_of(name: &str) -> Vec<&'static str> {
    OPTIONS
        .iter()
        .filter(|spec| spec.name != name)
        .filter(|spec| {
            spec.conflicts_with.contains(&name)
                || find(name).is_some_and(|own| own.conflicts_with.contains(&spec.name))
        })
        .map(|spec| spec.name)
        .collect()
}

/// Returns the environment variable names consulted during default resolution.
///
/// Tests use this to clear every variable the resolver reads, keeping them in
/// sync with the table rather than a hard-coded list.
#[must_use]
pub fn env_var_names() -> Vec<&'static str> {
    OPTIONS.iter().map(|spec| spec.env_var).collect()
}
