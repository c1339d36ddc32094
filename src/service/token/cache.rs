//! Token cache backed by a file or by process memory.
use std::path::PathBuf;

use tracing::debug;

use super::Token;
use crate::lib::{errors::CacheError, fs as cache_fs};

/// Storage seam used by [`super::TokenGuardedSession`].
pub trait TokenStore {
    /// Current cached token; `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Token>, CacheError>;

    /// Replace the cached token.
    fn store(&mut self, token: &Token) -> Result<(), CacheError>;
}

/// Single-token cache.
///
/// Without a path the cache is an in-process cell. With a path the file is
/// read on every `load` and fully replaced on every `store`; it is never
/// deleted here.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    path: Option<PathBuf>,
    in_memory: Option<Token>,
}

impl TokenCache {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            in_memory: None,
        }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }
}

impl TokenStore for TokenCache {
    fn load(&self) -> Result<Option<Token>, CacheError> {
        let Some(path) = &self.path else {
            return Ok(self.in_memory.clone());
        };

        let contents = cache_fs::read_if_exists(path).map_err(|source| CacheError::Read {
            path: path.clone(),
            source,
        })?;
        let contents = match contents {
            Some(contents) if !contents.is_empty() => contents,
            _ => {
                debug!(
                    target: "descarga_masiva::token",
                    path = %path.display(),
                    "Token cache is absent or empty"
                );
                return Ok(None);
            }
        };

        Token::deserialize(&contents)
            .map(Some)
            .map_err(|err| CacheError::Corrupted {
                path: path.clone(),
                field: err.field,
                reason: err.reason,
            })
    }

    fn store(&mut self, token: &Token) -> Result<(), CacheError> {
        let Some(path) = &self.path else {
            self.in_memory = Some(token.clone());
            return Ok(());
        };

        cache_fs::write_atomic(path, token.serialize().as_bytes()).map_err(|source| {
            CacheError::Write {
                path: path.clone(),
                source,
            }
        })?;
        debug!(
            target: "descarga_masiva::token",
            path = %path.display(),
            expires = %token.expires(),
            "Stored token in cache file"
        );
        Ok(())
    }
}
