//! eFirma credential material read from the resolved configuration.
use std::{fmt, fs, path::Path};

use tracing::debug;

use crate::{cli::profile::Configuration, lib::errors::InputError};

/// Certificate, private key and passphrase used to sign requests.
///
/// The bytes are handed untouched to the gateway, which owns parsing and
/// signing.
#[derive(Clone)]
pub struct Credential {
    certificate: Vec<u8>,
    private_key: Vec<u8>,
    pass_phrase: String,
}

impl Credential {
    pub fn new(certificate: Vec<u8>, private_key: Vec<u8>, pass_phrase: impl Into<String>) -> Self {
        Self {
            certificate,
            private_key,
            pass_phrase: pass_phrase.into(),
        }
    }

    /// Build the credential, requiring both certificate and key paths.
    pub fn from_configuration(configuration: &Configuration) -> Result<Self, InputError> {
        let certificate_path = configuration
            .certificate
            .as_deref()
            .ok_or(InputError::MissingRequiredOption {
                field: "certificado",
            })?;
        let private_key_path = configuration
            .private_key
            .as_deref()
            .ok_or(InputError::MissingRequiredOption { field: "llave" })?;

        let certificate = read_material(certificate_path)?;
        let private_key = read_material(private_key_path)?;
        debug!(
            target: "descarga_masiva::config",
            certificate = %certificate_path.display(),
            private_key = %private_key_path.display(),
            "Loaded eFirma credential files"
        );

        Ok(Self::new(
            certificate,
            private_key,
            configuration.pass_phrase.clone(),
        ))
    }

    pub fn certificate(&self) -> &[u8] {
        &self.certificate
    }

    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    pub fn pass_phrase(&self) -> &str {
        &self.pass_phrase
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("certificate_len", &self.certificate.len())
            .field("private_key_len", &self.private_key.len())
            .field("pass_phrase", &"<redacted>")
            .finish()
    }
}

fn read_material(path: &Path) -> Result<Vec<u8>, InputError> {
    fs::read(path).map_err(|err| {
        InputError::invalid(
            "certificado",
            format!(
                "Unable to create the eFirma credential, {} could not be read: {err}",
                path.display()
            ),
        )
    })
}
