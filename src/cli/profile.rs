//! Effective configuration resolution from flags, environment and config file.
use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{
    lib::errors::InputError,
    service::config::{telemetry::log_source, ConfigValues},
};

/// Environment variable overriding the configured passphrase.
pub const PASS_PHRASE_ENV: &str = "EFIRMA_PASSPHRASE";

/// Resolved configuration for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    pub certificate: Option<PathBuf>,
    pub private_key: Option<PathBuf>,
    pub pass_phrase: String,
    pub token_file: Option<PathBuf>,
}

/// Raw flag values; an empty string means the flag was not given.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigFlags<'a> {
    pub certificate: &'a str,
    pub private_key: &'a str,
    pub pass_phrase: &'a str,
    pub token_file: &'a str,
    pub config_file: &'a str,
}

/// Read the passphrase override from the process environment.
pub fn pass_phrase_from_env() -> Option<String> {
    env::var(PASS_PHRASE_ENV).ok()
}

/// Resolve the configuration in the order: flag → environment (passphrase only) → config file → empty.
///
/// An empty `config_file` contributes nothing. Empty certificate or key values
/// are accepted here; building the credential rejects them.
pub fn resolve_configuration(
    flags: ConfigFlags<'_>,
    env_pass_phrase: Option<String>,
) -> Result<Configuration, InputError> {
    let file_values = if flags.config_file.is_empty() {
        ConfigValues::empty()
    } else {
        ConfigValues::load_from_path(Path::new(flags.config_file))?
    };

    let pass_phrase = if !flags.pass_phrase.is_empty() {
        log_source("password", "flag");
        flags.pass_phrase.to_string()
    } else if let Some(value) = env_pass_phrase {
        log_source("password", "env");
        value
    } else {
        log_source(
            "password",
            if file_values.pass_phrase.is_empty() {
                "default"
            } else {
                "file"
            },
        );
        file_values.pass_phrase
    };

    Ok(Configuration {
        certificate: pick_path("certificado", flags.certificate, file_values.certificate),
        private_key: pick_path("llave", flags.private_key, file_values.private_key),
        pass_phrase,
        token_file: pick_path("token", flags.token_file, file_values.token_file),
    })
}

fn pick_path(option: &'static str, flag: &str, from_file: Option<PathBuf>) -> Option<PathBuf> {
    if !flag.is_empty() {
        log_source(option, "flag");
        return Some(PathBuf::from(flag));
    }
    log_source(option, if from_file.is_some() { "file" } else { "default" });
    from_file
}
