//! CLI argument definitions.
use std::collections::BTreeMap;

use clap::{ArgAction, Args, Parser, Subcommand};

use super::profile::ConfigFlags;

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Consulta, verifica y descarga paquetes del servicio de descarga masiva del SAT",
    long_about = None
)]
pub struct Cli {
    /// Raise the log level (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

/// Commands of the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Submit a query and print the request identifier.
    #[command(visible_alias = "ws:consulta")]
    Query(QueryArgs),
    /// Check the state of a request.
    #[command(visible_alias = "ws:verifica")]
    Verify(VerifyArgs),
    /// Download a package of a finished request.
    #[command(visible_alias = "ws:descarga")]
    Download(DownloadArgs),
    /// List the complement codes of CFDI or Retenciones.
    #[command(visible_alias = "info:complementos")]
    ListComplements(ListComplementsArgs),
    /// Export the rows of a metadata package as a JSON array.
    #[command(name = "zip:metadata")]
    ZipMetadata(ZipExportArgs),
    /// Export the XML documents of a package into a directory.
    #[command(name = "zip:xml")]
    ZipXml(ZipExportArgs),
}

impl Command {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Query(_) => "query",
            Command::Verify(_) => "verify",
            Command::Download(_) => "download",
            Command::ListComplements(_) => "list-complements",
            Command::ZipMetadata(_) => "zip:metadata",
            Command::ZipXml(_) => "zip:xml",
        }
    }
}

/// eFirma and service options shared by the web service commands.
///
/// An empty value means the option was not given.
#[derive(Debug, Clone, Default, Args)]
pub struct CredentialArgs {
    /// eFirma JSON configuration file.
    #[arg(long, default_value = "")]
    pub efirma: String,
    /// eFirma certificate file.
    #[arg(long, default_value = "")]
    pub certificado: String,
    /// eFirma private key file.
    #[arg(long, default_value = "")]
    pub llave: String,
    /// Private key passphrase (EFIRMA_PASSPHRASE takes precedence over the config file).
    #[arg(long, default_value = "")]
    pub password: String,
    /// Token cache file; without it the token lives only for this invocation.
    #[arg(long, default_value = "")]
    pub token: String,
    /// Cfdi or Retenciones.
    #[arg(long, default_value = "cfdi")]
    pub servicio: String,
}

impl CredentialArgs {
    pub fn config_flags(&self) -> ConfigFlags<'_> {
        ConfigFlags {
            certificate: &self.certificado,
            private_key: &self.llave,
            pass_phrase: &self.password,
            token_file: &self.token,
            config_file: &self.efirma,
        }
    }
}

/// Arguments for `query`.
#[derive(Debug, Clone, Default, Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub credential: CredentialArgs,
    /// Start of the period.
    #[arg(long)]
    pub desde: Option<String>,
    /// End of the period.
    #[arg(long)]
    pub hasta: Option<String>,
    /// recibidos or emitidos [default: emitidos].
    #[arg(long)]
    pub tipo: Option<String>,
    /// Counterpart RFC filter.
    #[arg(long)]
    pub rfc: Option<String>,
    /// xml or metadata [default: metadata].
    #[arg(long)]
    pub paquete: Option<String>,
    /// vigentes or canceladas.
    #[arg(long)]
    pub estado: Option<String>,
    /// ingreso, egreso, traslado, pago or nómina.
    #[arg(long)]
    pub documento: Option<String>,
    /// Complement code (see `list-complements`).
    #[arg(long)]
    pub complemento: Option<String>,
    /// RFC on whose behalf the documents were issued.
    #[arg(long)]
    pub tercero: Option<String>,
    /// Query a single document by UUID.
    #[arg(long)]
    pub uuid: Option<String>,
    /// Skip the local query checks.
    #[arg(long = "no-prevalidar", default_value_t = false)]
    pub no_prevalidar: bool,
}

impl QueryArgs {
    /// Given query options keyed by option name; absent options are left out.
    pub fn options(&self) -> BTreeMap<String, String> {
        [
            ("desde", &self.desde),
            ("hasta", &self.hasta),
            ("tipo", &self.tipo),
            ("rfc", &self.rfc),
            ("paquete", &self.paquete),
            ("estado", &self.estado),
            ("documento", &self.documento),
            ("complemento", &self.complemento),
            ("tercero", &self.tercero),
            ("uuid", &self.uuid),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|value| (key.to_string(), value.clone())))
        .collect()
    }
}

/// Arguments for `verify`.
#[derive(Debug, Clone, Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub credential: CredentialArgs,
    /// Request identifier returned by `query`.
    pub solicitud: String,
}

/// Arguments for `download`.
#[derive(Debug, Clone, Args)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub credential: CredentialArgs,
    /// Package identifier returned by `verify`.
    pub paquete: String,
    /// Destination directory.
    #[arg(long, default_value = ".")]
    pub destino: String,
}

/// Arguments for `list-complements`.
#[derive(Debug, Clone, Args)]
pub struct ListComplementsArgs {
    /// Cfdi or Retenciones.
    #[arg(long, default_value = "cfdi")]
    pub servicio: String,
}

/// Arguments for `zip:metadata` and `zip:xml`.
#[derive(Debug, Clone, Args)]
pub struct ZipExportArgs {
    /// Package file.
    pub paquete: String,
    /// Output file (`zip:metadata`) or directory (`zip:xml`).
    pub destino: String,
}
