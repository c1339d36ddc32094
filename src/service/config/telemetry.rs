use tracing::debug;

use super::ConfigValues;

pub fn log_loaded(values: &ConfigValues) {
    debug!(
        target: "descarga_masiva::config",
        path = %values
            .source_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
        certificate = values.certificate.is_some(),
        private_key = values.private_key.is_some(),
        pass_phrase = !values.pass_phrase.is_empty(),
        token_file = values.token_file.is_some(),
        "eFirma configuration file loaded"
    );
}

/// Record where one resolved option came from.
pub fn log_source(option: &'static str, source: &'static str) {
    debug!(
        target: "descarga_masiva::config",
        option,
        source,
        "Resolved configuration option"
    );
}
