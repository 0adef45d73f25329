//! TLS source selection, PEM validation, and certificate staging.
//!
//! Bollard reads TLS material from files, so inline PEM strings are written
//! to a private temporary directory for the duration of client construction
//! and removed as soon as the client exists. A certificate directory is used
//! in place after its three files have been read and validated.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tempfile::TempDir;
use tracing::debug;

use super::client_init;
use crate::config::ResolvedConfig;
use crate::config::schema::{CA_MATERIAL, CERT_MATERIAL, CERT_PATH, KEY_MATERIAL};
use crate::error::ProviderError;

/// File name of the CA certificate inside a certificate directory.
const CA_FILE: &str = "ca.pem";
/// File name of the client certificate inside a certificate directory.
const CERT_FILE: &str = "cert.pem";
/// File name of the client private key inside a certificate directory.
const KEY_FILE: &str = "key.pem";

/// Inline PEM-encoded TLS material.
#[derive(Clone, PartialEq, Eq)]
pub struct TlsMaterial {
    ca: String,
    cert: String,
    key: String,
}

impl TlsMaterial {
    /// Bundle the three PEM strings.
    #[must_use]
    pub const fn new(ca: String, cert: String, key: String) -> Self {
        Self { ca, cert, key }
    }

    /// Check that each string holds PEM data of the expected type.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ClientInit` naming the first invalid field.
    pub fn validate(&self) -> Result<(), ProviderError> {
        validate_certificates(CA_MATERIAL, &self.ca)?;
        validate_certificates(CERT_MATERIAL, &self.cert)?;
        validate_private_key(KEY_MATERIAL, &self.key)
    }
}

impl std::fmt::Debug for TlsMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsMaterial")
            .field("ca", &"<redacted>")
            .field("cert", &"<redacted>")
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Where the client obtains its TLS configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsSource {
    /// No TLS settings; connect without TLS.
    Plain,
    /// Inline PEM material for the CA, client certificate, and key.
    Material(TlsMaterial),
    /// A directory holding `ca.pem`, `cert.pem`, and `key.pem`.
    Directory(Utf8PathBuf),
}

/// Paths handed to the TLS client constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TlsFiles {
    pub(super) ca: Utf8PathBuf,
    pub(super) cert: Utf8PathBuf,
    pub(super) key: Utf8PathBuf,
}

impl TlsFiles {
    fn in_dir(dir: &Utf8Path) -> Self {
        Self {
            ca: dir.join(CA_FILE),
            cert: dir.join(CERT_FILE),
            key: dir.join(KEY_FILE),
        }
    }
}

impl TlsSource {
    /// Select the TLS source for a resolved configuration.
    ///
    /// Inline material takes precedence when all three options are set. A
    /// certificate directory is used when only `cert_path` is set.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ClientInit` when only some of the PEM material
    /// options are set.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, ProviderError> {
        let ca = config.value(CA_MATERIAL);
        let cert = config.value(CERT_MATERIAL);
        let key = config.value(KEY_MATERIAL);

        match (ca, cert, key) {
            (Some(ca_pem), Some(cert_pem), Some(key_pem)) => Ok(Self::Material(TlsMaterial::new(
                String::from(ca_pem),
                String::from(cert_pem),
                String::from(key_pem),
            ))),
            (None, None, None) => Ok(config
                .value(CERT_PATH)
                .map_or(Self::Plain, |path| Self::Directory(Utf8PathBuf::from(path)))),
            _ => Err(client_init(
                "ca_material, cert_material, and key_material must all be specified",
            )),
        }
    }

    /// Short label used in log fields.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Material(_) => "material",
            Self::Directory(_) => "cert_path",
        }
    }

    /// Validate the TLS files and run `build` with their paths.
    ///
    /// Inline material is staged in a temporary directory that is removed
    /// when this function returns, whether or not `build` succeeds.
    pub(super) fn with_files<T, F>(&self, build: F) -> Result<T, ProviderError>
    where
        F: FnOnce(&TlsFiles) -> Result<T, ProviderError>,
    {
        match self {
            Self::Plain => Err(client_init("no TLS settings configured")),
            Self::Material(material) => {
                material.validate()?;
                let staging = stage_material(material)?;
                let files = TlsFiles::in_dir(&staging.root);
                build(&files)
            }
            Self::Directory(path) => {
                check_directory(path)?;
                build(&TlsFiles::in_dir(path))
            }
        }
    }
}

/// A temporary directory holding staged PEM files.
struct StagedMaterial {
    root: Utf8PathBuf,
    // Removes the directory on drop.
    _dir: TempDir,
}

fn stage_material(material: &TlsMaterial) -> Result<StagedMaterial, ProviderError> {
    let dir = TempDir::new()
        .map_err(|e| client_init(format!("failed to create directory for TLS material: {e}")))?;
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf())
        .map_err(|e| client_init(format!("temporary directory path is not UTF-8: {e}")))?;

    let staged = Dir::open_ambient_dir(&root, ambient_authority())
        .map_err(|e| client_init(format!("failed to open {root}: {e}")))?;
    for (name, contents) in [
        (CA_FILE, &material.ca),
        (CERT_FILE, &material.cert),
        (KEY_FILE, &material.key),
    ] {
        staged
            .write(name, contents.as_bytes())
            .map_err(|e| client_init(format!("failed to stage {name}: {e}")))?;
    }

    debug!(%root, "staged inline TLS material");
    Ok(StagedMaterial { root, _dir: dir })
}

/// Read and validate the three PEM files in a certificate directory.
fn check_directory(path: &Utf8Path) -> Result<(), ProviderError> {
    let dir = Dir::open_ambient_dir(path, ambient_authority())
        .map_err(|e| client_init(format!("cert_path: unable to open {path}: {e}")))?;

    let read = |name: &str| {
        dir.read_to_string(name)
            .map_err(|e| client_init(format!("cert_path: unable to read {path}/{name}: {e}")))
    };

    validate_certificates(CA_FILE, &read(CA_FILE)?)?;
    validate_certificates(CERT_FILE, &read(CERT_FILE)?)?;
    validate_private_key(KEY_FILE, &read(KEY_FILE)?)
}

/// Require at least one well-formed PEM certificate.
fn validate_certificates(field: &str, pem: &str) -> Result<(), ProviderError> {
    let mut found = false;
    for cert in CertificateDer::pem_slice_iter(pem.as_bytes()) {
        cert.map_err(|e| client_init(format!("{field}: invalid PEM certificate: {e}")))?;
        found = true;
    }
    if found {
        Ok(())
    } else {
        Err(client_init(format!("{field}: no PEM certificate found")))
    }
}

/// Require a well-formed PEM private key.
fn validate_private_key(field: &str, pem: &str) -> Result<(), ProviderError> {
    PrivateKeyDer::from_pem_slice(pem.as_bytes())
        .map(drop)
        .map_err(|e| client_init(format!("{field}: invalid PEM private key: {e}")))
}
