//! Seam towards the web service protocol client.
//!
//! Envelope construction, signing and transport live behind [`ServiceGateway`]
//! and [`RemoteSession`]; this crate only consumes their results.
use tracing::warn;

use super::{credential::Credential, endpoints::ServiceEndpoints, token::Token};
use crate::{lib::errors::GatewayError, query::QueryParameters};

/// Status code value the service uses for accepted requests.
pub const ACCEPTED_STATUS_CODE: i32 = 5000;

/// Status of a service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCode {
    pub code: i32,
    pub message: String,
}

impl StatusCode {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.code == ACCEPTED_STATUS_CODE
    }
}

/// Processing state of a query request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRequest {
    Accepted,
    InProgress,
    Finished,
    Failure,
    Rejected,
    Expired,
}

impl StatusRequest {
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Accepted),
            2 => Some(Self::InProgress),
            3 => Some(Self::Finished),
            4 => Some(Self::Failure),
            5 => Some(Self::Rejected),
            6 => Some(Self::Expired),
            _ => None,
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            Self::Accepted => 1,
            Self::InProgress => 2,
            Self::Finished => 3,
            Self::Failure => 4,
            Self::Rejected => 5,
            Self::Expired => 6,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Accepted => "Aceptada",
            Self::InProgress => "En proceso",
            Self::Finished => "Terminada",
            Self::Failure => "Error",
            Self::Rejected => "Rechazada",
            Self::Expired => "Vencida",
        }
    }

    /// States after which the request will never produce packages.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, Self::Failure | Self::Rejected | Self::Expired)
    }
}

/// Code describing the outcome of the download request itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRequest {
    Accepted,
    Exhausted,
    MaximumLimitReached,
    EmptyResult,
    Duplicated,
}

impl CodeRequest {
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            5000 => Some(Self::Accepted),
            5002 => Some(Self::Exhausted),
            5003 => Some(Self::MaximumLimitReached),
            5004 => Some(Self::EmptyResult),
            5005 => Some(Self::Duplicated),
            _ => None,
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            Self::Accepted => 5000,
            Self::Exhausted => 5002,
            Self::MaximumLimitReached => 5003,
            Self::EmptyResult => 5004,
            Self::Duplicated => 5005,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Accepted => "Solicitud de descarga recibida con éxito",
            Self::Exhausted => "Se agotó el número de solicitudes de por vida",
            Self::MaximumLimitReached => "Se alcanzó el tope máximo de elementos de la consulta",
            Self::EmptyResult => "No se encontró la información solicitada",
            Self::Duplicated => "Solicitud duplicada",
        }
    }

    pub fn is_unrecoverable(&self) -> bool {
        matches!(
            self,
            Self::Duplicated | Self::Exhausted | Self::MaximumLimitReached
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub status: StatusCode,
    /// Empty when the service did not assign a request id.
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyResult {
    pub status: StatusCode,
    pub status_request: StatusRequest,
    pub code_request: CodeRequest,
    pub number_cfdis: u64,
    pub package_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub status: StatusCode,
    pub package_content: Vec<u8>,
}

impl DownloadResult {
    pub fn package_size(&self) -> usize {
        self.package_content.len()
    }
}

/// Authenticated conversation with the web service.
///
/// `obtain_token` returns the token the session currently holds, asking the
/// service for a new one when that token is absent or expired.
pub trait RemoteSession {
    /// RFC of the credential owner.
    fn rfc(&self) -> String;

    fn obtain_token(&mut self) -> Result<Token, GatewayError>;

    fn query(
        &mut self,
        token: &Token,
        parameters: &QueryParameters,
    ) -> Result<QueryResult, GatewayError>;

    fn verify(&mut self, token: &Token, request_id: &str) -> Result<VerifyResult, GatewayError>;

    fn download(&mut self, token: &Token, package_id: &str)
        -> Result<DownloadResult, GatewayError>;
}

/// Factory of remote sessions for a credential and service.
pub trait ServiceGateway {
    type Session: RemoteSession;

    /// Open a session that starts from `token` when one is cached.
    fn open_session(
        &self,
        credential: Credential,
        endpoints: ServiceEndpoints,
        token: Option<Token>,
    ) -> Result<Self::Session, GatewayError>;
}

/// Gateway used when no protocol backend is linked into the binary.
///
/// Sessions open so that input validation runs in full; every remote
/// operation then fails with [`GatewayError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlinkedGateway;

#[derive(Debug)]
pub struct UnlinkedSession {
    token: Option<Token>,
}

impl ServiceGateway for UnlinkedGateway {
    type Session = UnlinkedSession;

    fn open_session(
        &self,
        _credential: Credential,
        endpoints: ServiceEndpoints,
        token: Option<Token>,
    ) -> Result<Self::Session, GatewayError> {
        warn!(
            target: "descarga_masiva::gateway",
            service = endpoints.service_type().as_str(),
            "No web service backend is linked; remote operations will fail"
        );
        Ok(UnlinkedSession { token })
    }
}

impl RemoteSession for UnlinkedSession {
    fn rfc(&self) -> String {
        "(desconocido)".to_string()
    }

    fn obtain_token(&mut self) -> Result<Token, GatewayError> {
        match &self.token {
            Some(token) if token.is_valid_at(chrono::Utc::now()) => Ok(token.clone()),
            _ => Err(GatewayError::Unavailable {
                operation: "authenticate",
            }),
        }
    }

    fn query(&mut self, _: &Token, _: &QueryParameters) -> Result<QueryResult, GatewayError> {
        Err(GatewayError::Unavailable { operation: "query" })
    }

    fn verify(&mut self, _: &Token, _: &str) -> Result<VerifyResult, GatewayError> {
        Err(GatewayError::Unavailable {
            operation: "verify",
        })
    }

    fn download(&mut self, _: &Token, _: &str) -> Result<DownloadResult, GatewayError> {
        Err(GatewayError::Unavailable {
            operation: "download",
        })
    }
}
