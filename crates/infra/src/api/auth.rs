//! Access token storage and lookup
//!
//! The refresher is the only writer of [`TokenHolder`]; every API call reads
//! it through [`AccessTokenProvider`]. Share one holder between both sides with
//! an `Arc`.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::errors::ApiError;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get the current access token
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// Shared, refreshable access token.
#[derive(Default)]
pub struct TokenHolder {
    token: RwLock<Option<String>>,
}

impl std::fmt::Debug for TokenHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenHolder").finish_non_exhaustive()
    }
}

impl TokenHolder {
    /// Create an empty holder. Calls fail with [`ApiError::Auth`] until the
    /// first refresh succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a holder seeded with a known token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: RwLock::new(Some(token.into())) }
    }

    /// Current token, if one has been stored.
    pub async fn get(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Replace the stored token.
    pub async fn set(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
        debug!("Access token replaced");
    }

    pub async fn is_empty(&self) -> bool {
        self.token.read().await.as_deref().map_or(true, str::is_empty)
    }
}

#[async_trait]
impl AccessTokenProvider for TokenHolder {
    async fn access_token(&self) -> Result<String, ApiError> {
        match self.token.read().await.as_deref() {
            Some(token) if !token.is_empty() => Ok(token.to_string()),
            _ => Err(ApiError::Auth("no access token available".to_string())),
        }
    }
}

/// Fixed token for callers that manage token lifetime themselves.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider").finish_non_exhaustive()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, ApiError> {
        if self.token.is_empty() {
            return Err(ApiError::Auth("access token is empty".to_string()));
        }
        Ok(self.token.clone())
    }
}
