//! Remote session wrapper that keeps the token cache fresh.
use thiserror::Error;
use tracing::debug;

use super::{cache::TokenStore, Token};
use crate::{
    lib::errors::{CacheError, CliError, GatewayError},
    query::QueryParameters,
    service::{
        credential::Credential,
        endpoints::ServiceEndpoints,
        gateway::{DownloadResult, QueryResult, RemoteSession, ServiceGateway, VerifyResult},
    },
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl From<SessionError> for CliError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::Cache(error) => error.into(),
            SessionError::Gateway(error) => error.into(),
        }
    }
}

/// Session whose token retrieval goes through a [`TokenStore`].
///
/// The cache only seeds the session and records the token it ends up using.
/// The inner session stays the authority: a stale cached token is replaced
/// by whatever the session obtains.
#[derive(Debug)]
pub struct TokenGuardedSession<S, C> {
    inner: S,
    cache: C,
}

impl<S, C> TokenGuardedSession<S, C>
where
    S: RemoteSession,
    C: TokenStore,
{
    /// Open a session seeded with the cached token, if any.
    pub fn open<G>(
        gateway: &G,
        credential: Credential,
        endpoints: ServiceEndpoints,
        cache: C,
    ) -> Result<Self, SessionError>
    where
        G: ServiceGateway<Session = S>,
    {
        let cached = cache.load()?;
        debug!(
            target: "descarga_masiva::token",
            cached = cached.is_some(),
            "Opening remote session"
        );
        let inner = gateway.open_session(credential, endpoints, cached)?;
        Ok(Self { inner, cache })
    }

    /// Wrap an already opened session.
    pub fn from_parts(inner: S, cache: C) -> Self {
        Self { inner, cache }
    }

    /// Token the session uses, persisted when it differs from the cached one.
    pub fn current_token(&mut self) -> Result<Token, SessionError> {
        let current = self.inner.obtain_token()?;
        let stored = self.cache.load()?;
        let unchanged = stored
            .as_ref()
            .is_some_and(|stored| stored.serialize() == current.serialize());
        if unchanged {
            debug!(
                target: "descarga_masiva::token",
                "Cached token is current; skipping write"
            );
        } else {
            debug!(
                target: "descarga_masiva::token",
                had_cached = stored.is_some(),
                expires = %current.expires(),
                "Persisting token issued by the service"
            );
            self.cache.store(&current)?;
        }
        Ok(current)
    }

    pub fn rfc(&self) -> String {
        self.inner.rfc()
    }

    pub fn query(&mut self, parameters: &QueryParameters) -> Result<QueryResult, SessionError> {
        let token = self.current_token()?;
        Ok(self.inner.query(&token, parameters)?)
    }

    pub fn verify(&mut self, request_id: &str) -> Result<VerifyResult, SessionError> {
        let token = self.current_token()?;
        Ok(self.inner.verify(&token, request_id)?)
    }

    pub fn download(&mut self, package_id: &str) -> Result<DownloadResult, SessionError> {
        let token = self.current_token()?;
        Ok(self.inner.download(&token, package_id)?)
    }

}
