//! Credential exchange and token refresh
//!
//! [`TokenClient`] performs the `client_credentials` exchange. [`TokenRefresher`]
//! runs that exchange with the configured credentials and publishes the result
//! into a shared [`TokenHolder`]. Scheduling lives in
//! [`crate::scheduling::TokenRefreshScheduler`].

use std::sync::Arc;

use async_trait::async_trait;
use facelink_domain::constants::{GRANT_TYPE_CLIENT_CREDENTIALS, TOKEN_PATH};
use facelink_domain::{Credentials, TokenResponse};
use reqwest::Method;
use tracing::{error, info, instrument};

use super::auth::TokenHolder;
use super::client::FaceApiConfig;
use super::envelope::{decode_plain, status_error};
use super::errors::ApiError;
use crate::http::HttpClient;

/// Client for the provider's OAuth token endpoint.
#[derive(Clone)]
pub struct TokenClient {
    http_client: HttpClient,
    base_url: String,
}

impl TokenClient {
    /// Create a token client sharing the API client's host and timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(config: &FaceApiConfig) -> Result<Self, ApiError> {
        let http_client = config.http_client()?;
        Ok(Self { http_client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// Exchange an application key pair for an access token.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Config`] for blank credentials (nothing is sent)
    /// - [`ApiError::Vendor`] when the provider rejects the credentials
    /// - [`ApiError::Network`]/[`ApiError::Timeout`] on transport failure
    /// - [`ApiError::Decode`] when the response carries no token
    #[instrument(skip(self, credentials), fields(app_key = %credentials.app_key))]
    pub async fn exchange(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        credentials.validate()?;

        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        let request = self.http_client.request(Method::GET, &url).query(&[
            ("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS),
            ("client_id", credentials.app_key.as_str()),
            ("client_secret", credentials.secret_key.as_str()),
        ]);

        let response = self.http_client.send(request).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read token response: {e}")))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let token: TokenResponse = decode_plain(&body)?;
        if token.access_token.is_empty() {
            return Err(ApiError::Decode("token response has no access_token".to_string()));
        }
        Ok(token)
    }
}

/// A job that refreshes the shared access token.
#[async_trait]
pub trait TokenRefreshJob: Send + Sync {
    /// Perform one refresh.
    async fn refresh(&self) -> Result<(), ApiError>;
}

/// Exchanges configured credentials and stores the resulting token.
pub struct TokenRefresher {
    token_client: TokenClient,
    credentials: Credentials,
    holder: Arc<TokenHolder>,
}

impl TokenRefresher {
    pub fn new(token_client: TokenClient, credentials: Credentials, holder: Arc<TokenHolder>) -> Self {
        Self { token_client, credentials, holder }
    }

    /// The holder this refresher writes to.
    pub fn holder(&self) -> Arc<TokenHolder> {
        Arc::clone(&self.holder)
    }
}

#[async_trait]
impl TokenRefreshJob for TokenRefresher {
    /// Exchange credentials and overwrite the shared token.
    ///
    /// On any failure the previously stored token is left untouched.
    async fn refresh(&self) -> Result<(), ApiError> {
        info!("token refresh start");

        match self.token_client.exchange(&self.credentials).await {
            Ok(token) => {
                self.holder.set(token.access_token).await;
                info!(expires_in = ?token.expires_in, "token refreshed");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, category = ?err.category(), "token refresh failed; keeping previous token");
                Err(err)
            }
        }
    }
}
