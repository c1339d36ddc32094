#![allow(dead_code)]

use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use chrono::{Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use descarga_masiva::{
    cli::{execute_command, Command, CommandContext, CredentialArgs},
    lib::errors::{CliError, GatewayError},
    query::QueryParameters,
    service::{
        gateway::{
            CodeRequest, DownloadResult, QueryResult, StatusCode, StatusRequest, VerifyResult,
        },
        Credential, RemoteSession, ServiceEndpoints, ServiceGateway, Token,
    },
};

pub const BINARY_NAME: &str = "descarga-masiva";

/// Reference time used by library-level command runs.
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid reference time")
}

pub fn token(value: &str) -> Token {
    let created = Utc
        .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    Token::new(created, created + Duration::minutes(5), value).expect("non-empty token")
}

/// Write dummy certificate and key files; the scripted gateway never parses them.
pub fn credential_files(dir: &Path) -> (PathBuf, PathBuf) {
    let certificate = dir.join("fiel.cer");
    let private_key = dir.join("fiel.key");
    fs::write(&certificate, b"certificate").expect("can write certificate fixture");
    fs::write(&private_key, b"private key").expect("can write key fixture");
    (certificate, private_key)
}

pub fn credential_args(dir: &Path, token_file: Option<&Path>) -> CredentialArgs {
    let (certificate, private_key) = credential_files(dir);
    CredentialArgs {
        certificado: certificate.to_string_lossy().to_string(),
        llave: private_key.to_string_lossy().to_string(),
        password: "12345678a".into(),
        token: token_file
            .map(|path| path.to_string_lossy().to_string())
            .unwrap_or_default(),
        servicio: "cfdi".into(),
        ..CredentialArgs::default()
    }
}

/// What a scripted session saw.
#[derive(Debug, Default)]
pub struct Calls {
    pub opened_with: Vec<Option<Token>>,
    pub pass_phrases: Vec<String>,
    pub operations: Vec<String>,
}

/// Gateway answering with canned results.
#[derive(Clone)]
pub struct ScriptedGateway {
    pub issued: Token,
    pub query: QueryResult,
    pub verify: VerifyResult,
    pub download: DownloadResult,
    pub calls: Rc<RefCell<Calls>>,
}

impl ScriptedGateway {
    pub fn accepting() -> Self {
        Self {
            issued: token("issued-token"),
            query: QueryResult {
                status: StatusCode::new(5000, "Solicitud Aceptada"),
                request_id: "4E80345D-917F-40BB-A98F-4A73939343C5".into(),
            },
            verify: VerifyResult {
                status: StatusCode::new(5000, "Solicitud Aceptada"),
                status_request: StatusRequest::Finished,
                code_request: CodeRequest::Accepted,
                number_cfdis: 12,
                package_ids: vec![
                    "4E80345D-917F-40BB-A98F-4A73939343C5_01".into(),
                    "4E80345D-917F-40BB-A98F-4A73939343C5_02".into(),
                ],
            },
            download: DownloadResult {
                status: StatusCode::new(5000, "Solicitud Aceptada"),
                package_content: b"PK-package-bytes".to_vec(),
            },
            calls: Rc::default(),
        }
    }
}

pub struct ScriptedSession {
    token: Option<Token>,
    gateway: ScriptedGateway,
}

impl ServiceGateway for ScriptedGateway {
    type Session = ScriptedSession;

    fn open_session(
        &self,
        credential: Credential,
        _endpoints: ServiceEndpoints,
        token: Option<Token>,
    ) -> Result<Self::Session, GatewayError> {
        let mut calls = self.calls.borrow_mut();
        calls.opened_with.push(token.clone());
        calls.pass_phrases.push(credential.pass_phrase().to_string());
        Ok(ScriptedSession {
            token,
            gateway: self.clone(),
        })
    }
}

impl RemoteSession for ScriptedSession {
    fn rfc(&self) -> String {
        "EKU9003173C9".into()
    }

    fn obtain_token(&mut self) -> Result<Token, GatewayError> {
        let current = self
            .token
            .clone()
            .filter(|token| token.is_valid_at(self.gateway.issued.created()))
            .unwrap_or_else(|| self.gateway.issued.clone());
        self.token = Some(current.clone());
        Ok(current)
    }

    fn query(
        &mut self,
        token: &Token,
        _parameters: &QueryParameters,
    ) -> Result<QueryResult, GatewayError> {
        self.record(format!("query:{}", token.value()));
        Ok(self.gateway.query.clone())
    }

    fn verify(&mut self, token: &Token, request_id: &str) -> Result<VerifyResult, GatewayError> {
        self.record(format!("verify:{}:{request_id}", token.value()));
        Ok(self.gateway.verify.clone())
    }

    fn download(
        &mut self,
        token: &Token,
        package_id: &str,
    ) -> Result<DownloadResult, GatewayError> {
        self.record(format!("download:{}:{package_id}", token.value()));
        Ok(self.gateway.download.clone())
    }
}

impl ScriptedSession {
    fn record(&self, operation: String) {
        self.gateway.calls.borrow_mut().operations.push(operation);
    }
}

/// Run a command against `gateway`, returning its result and printed report.
pub fn run<G: ServiceGateway>(
    command: &Command,
    gateway: &G,
    env_pass_phrase: Option<String>,
) -> (Result<(), CliError>, String) {
    let context = CommandContext {
        gateway,
        env_pass_phrase,
        now: now(),
    };
    let mut out = Vec::new();
    let result = execute_command(command, &context, &mut out);
    (result, String::from_utf8(out).expect("utf-8 output"))
}
