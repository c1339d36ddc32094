//! Command handlers; each one prints its blocks to the given writer.
use chrono::NaiveDateTime;
use tracing::debug;

use super::{args::CredentialArgs, profile::resolve_configuration};
use crate::{
    lib::errors::{CliError, ExecutionError},
    service::{
        gateway::StatusCode, Credential, ServiceEndpoints, ServiceGateway, ServiceType,
        TokenCache, TokenGuardedSession,
    },
};

pub mod complements;
pub mod download;
pub mod export;
pub mod query;
pub mod verify;

/// Process-level inputs shared by every command.
pub struct CommandContext<'a, G> {
    pub gateway: &'a G,
    /// Value of `EFIRMA_PASSPHRASE`, read once at the edge.
    pub env_pass_phrase: Option<String>,
    /// Reference time for query checks.
    pub now: NaiveDateTime,
}

pub type Session<G> = TokenGuardedSession<<G as ServiceGateway>::Session, TokenCache>;

/// Resolve configuration and credential, then open a cache-backed session.
pub(crate) fn open_session<G: ServiceGateway>(
    context: &CommandContext<'_, G>,
    args: &CredentialArgs,
) -> Result<(Session<G>, ServiceType), CliError> {
    let configuration =
        resolve_configuration(args.config_flags(), context.env_pass_phrase.clone())?;
    let credential = Credential::from_configuration(&configuration)?;
    let service_type = ServiceType::parse_option(&args.servicio)?;
    let cache = TokenCache::new(configuration.token_file.clone());
    debug!(
        target: "descarga_masiva::command",
        service = service_type.as_str(),
        token_file = ?configuration.token_file,
        "Opening web service session"
    );

    let session = TokenGuardedSession::open(
        context.gateway,
        credential,
        ServiceEndpoints::for_service(service_type),
        cache,
    )?;
    Ok((session, service_type))
}

/// Fail unless the service accepted the request.
pub(crate) fn ensure_accepted(status: &StatusCode) -> Result<(), CliError> {
    if status.is_accepted() {
        return Ok(());
    }
    Err(ExecutionError::NotAccepted {
        code: status.code,
        message: status.message.clone(),
    }
    .into())
}
