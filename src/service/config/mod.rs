//! Load the eFirma JSON configuration file.
use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::error;

use crate::lib::{errors::InputError, fs as config_fs};

pub mod telemetry;

/// Key holding the certificate path.
pub const CERTIFICATE_KEY: &str = "certificateFile";
/// Key holding the private key path.
pub const PRIVATE_KEY_KEY: &str = "privateKeyFile";
/// Key holding the private key passphrase.
pub const PASS_PHRASE_KEY: &str = "passPhrase";
/// Key holding the token cache path.
pub const TOKEN_FILE_KEY: &str = "tokenFile";

/// Values contributed by the eFirma configuration file.
///
/// Paths are already resolved against the file's directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigValues {
    pub certificate: Option<PathBuf>,
    pub private_key: Option<PathBuf>,
    pub pass_phrase: String,
    pub token_file: Option<PathBuf>,
    pub source_path: Option<PathBuf>,
}

impl ConfigValues {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read and parse the configuration file at `path`.
    pub fn load_from_path(path: &Path) -> Result<Self, InputError> {
        let contents = fs::read_to_string(path).map_err(|source| {
            error!(
                target: "descarga_masiva::config",
                path = %path.display(),
                reason = %source,
                "Failed to read eFirma configuration file"
            );
            InputError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let values = Self::parse(&contents, path).map_err(|err| {
            error!(
                target: "descarga_masiva::config",
                path = %path.display(),
                reason = %err,
                "Failed to parse eFirma configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&values);
        Ok(values)
    }

    /// Parse file contents; `path` locates relative entries and names errors.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, InputError> {
        let document: Value =
            serde_json::from_str(contents).map_err(|err| InputError::ConfigParse {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;
        let Value::Object(object) = document else {
            return Err(InputError::ConfigParse {
                path: path.to_path_buf(),
                reason: "JSON content is not an object".into(),
            });
        };

        let relative_to = config_fs::parent_dir(path);
        let resolve =
            |key: &str| config_fs::path_absolute_or_relative(string_value(&object, key), &relative_to);

        Ok(Self {
            certificate: resolve(CERTIFICATE_KEY),
            private_key: resolve(PRIVATE_KEY_KEY),
            pass_phrase: string_value(&object, PASS_PHRASE_KEY).to_string(),
            token_file: resolve(TOKEN_FILE_KEY),
            source_path: Some(path.to_path_buf()),
        })
    }
}

/// String entries only; other JSON types count as missing.
fn string_value<'a>(object: &'a Map<String, Value>, key: &str) -> &'a str {
    object.get(key).and_then(Value::as_str).unwrap_or_default()
}
