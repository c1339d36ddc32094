use std::{io, path::PathBuf};

use thiserror::Error;
use zip::result::ZipError;

/// Exit code for malformed or missing user input.
pub const INPUT_ERROR_EXIT_CODE: u8 = 2;
/// Exit code for failures during an otherwise valid operation.
pub const EXECUTION_ERROR_EXIT_CODE: u8 = 1;

/// Malformed or missing user-supplied configuration or option.
///
/// Every variant is tagged with the option it refers to so callers can point
/// the user at the flag to correct.
#[derive(Debug, Error)]
pub enum InputError {
    /// Option value failed to parse or validate.
    #[error("{message}")]
    InvalidOption {
        field: &'static str,
        message: String,
    },
    /// Option is required for this command but resolved to nothing.
    #[error("The option `{field}` is required")]
    MissingRequiredOption { field: &'static str },
    /// The eFirma configuration file could not be read.
    #[error("Failed to open eFirma configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The eFirma configuration file is not a JSON object.
    #[error("Failed to parse eFirma configuration file {path} as a JSON object: {reason}")]
    ConfigParse { path: PathBuf, reason: String },
    /// Cross-field query rules failed.
    #[error("{}", messages.join("\n"))]
    QueryValidation { messages: Vec<String> },
}

impl InputError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            field,
            message: message.into(),
        }
    }

    /// Name of the option the error refers to (empty for aggregate errors).
    pub fn field(&self) -> &str {
        match self {
            InputError::InvalidOption { field, .. } => field,
            InputError::MissingRequiredOption { field } => field,
            InputError::ConfigRead { .. } | InputError::ConfigParse { .. } => "efirma",
            InputError::QueryValidation { .. } => "",
        }
    }
}

/// Failures reading or writing the token cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache file exists and has content, but it is not a valid token record.
    #[error("Token cache {path} is corrupted: invalid value on key `{field}` ({reason})")]
    Corrupted {
        path: PathBuf,
        field: &'static str,
        reason: String,
    },
    #[error("Failed to read token cache {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write token cache {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CacheError {
    /// Offending field for corrupted records.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CacheError::Corrupted { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Failures reported by the web service gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("No web service backend is linked into this build; unable to {operation}")]
    Unavailable { operation: &'static str },
    #[error("The eFirma credential was rejected: {reason}")]
    InvalidCredential { reason: String },
    #[error("Authentication against the web service failed: {message}")]
    Authentication { message: String },
    #[error("Web service call failed: {message}")]
    Transport { message: String },
}

/// Failures while opening or reading a downloaded package.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Package file {path} does not exist")]
    NotFound { path: PathBuf },
    #[error("Failed to open package {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Package {path} is not a valid ZIP archive: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: ZipError,
    },
    #[error("Failed to read entry `{entry}` of package {path}: {source}")]
    Entry {
        path: PathBuf,
        entry: String,
        #[source]
        source: io::Error,
    },
    #[error("Package {path} does not contain a metadata table")]
    MissingMetadata { path: PathBuf },
}

/// Failure during an otherwise valid operation.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("The request was not accepted: {code} - {message}")]
    NotAccepted { code: i32, message: String },
    #[error("The download request status code is not correct: {code} - {message}")]
    CodeRequestRejected { code: i32, message: String },
    #[error("The download request state is not correct: {code} - {message}")]
    StatusRequestRejected { code: i32, message: String },
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Gateway(GatewayError),
    #[error(transparent)]
    Package(#[from] PackageError),
    #[error("I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write {path}, exported {exported} of {total} files")]
    ExportInterrupted {
        path: PathBuf,
        exported: usize,
        total: usize,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write command output: {0}")]
    Output(#[source] io::Error),
}

/// Top-level error of a command invocation.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Input(_) => INPUT_ERROR_EXIT_CODE,
            CliError::Execution(_) => EXECUTION_ERROR_EXIT_CODE,
        }
    }
}

impl From<CacheError> for CliError {
    fn from(value: CacheError) -> Self {
        CliError::Execution(ExecutionError::Cache(value))
    }
}

impl From<PackageError> for CliError {
    fn from(value: PackageError) -> Self {
        CliError::Execution(ExecutionError::Package(value))
    }
}

impl From<GatewayError> for CliError {
    fn from(value: GatewayError) -> Self {
        match value {
            GatewayError::InvalidCredential { reason } => CliError::Input(InputError::invalid(
                "certificado",
                format!("Unable to create the eFirma credential: {reason}"),
            )),
            other => CliError::Execution(ExecutionError::Gateway(other)),
        }
    }
}

impl From<io::Error> for ExecutionError {
    fn from(value: io::Error) -> Self {
        ExecutionError::Output(value)
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        CliError::Execution(ExecutionError::Output(value))
    }
}
