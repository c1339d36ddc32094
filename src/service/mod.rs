//! Credential, configuration, token cache and web service seams.

pub mod config;
pub mod credential;
pub mod endpoints;
pub mod gateway;
pub mod token;

pub use credential::Credential;
pub use endpoints::{ServiceEndpoints, ServiceType};
pub use gateway::{RemoteSession, ServiceGateway, UnlinkedGateway};
pub use token::{Token, TokenCache, TokenGuardedSession, TokenStore};
