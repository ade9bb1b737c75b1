//! Face and ID-card API client
//!
//! One method per provider operation. Each call reads the current token from
//! the injected [`AccessTokenProvider`], sends a single request and decodes the
//! provider envelope. Failures are returned to the caller as-is.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use facelink_domain::constants::{
    ACCESS_TOKEN_PARAM, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, FACE_DETECT_PATH,
    FACE_LIVENESS_PATH, FACE_MATCH_PATH, ID_CARD_PATH,
};
use facelink_domain::{
    ApiSettings, FaceCheckResult, FaceDescriptor, FaceDetectRequest, FaceLiveRequest,
    FaceLiveResult, FaceMatchResult, FaceType, IdCardCheckRequest, IdCardCheckResult, IdCardSide,
    ImageReference, ImageType,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::auth::AccessTokenProvider;
use super::envelope::{decode_enveloped, decode_plain, status_error};
use super::errors::ApiError;
use super::files::read_image_file;
use crate::http::HttpClient;

/// Configuration for the face API client
#[derive(Debug, Clone)]
pub struct FaceApiConfig {
    /// Provider host, without a trailing path (e.g. "https://aip.baidubce.com")
    pub base_url: String,
    /// Timeout for each request
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for FaceApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl FaceApiConfig {
    pub fn from_settings(settings: &ApiSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            timeout: Duration::from_secs(settings.timeout_seconds),
            user_agent: settings.user_agent.clone(),
        }
    }

    pub(crate) fn http_client(&self) -> Result<HttpClient, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = HttpClient::builder().timeout(self.timeout).default_headers(headers);
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build().map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Client for the provider's face and OCR endpoints
pub struct FaceApiClient {
    http_client: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    config: FaceApiConfig,
}

impl FaceApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration
    /// * `auth` - Token source, usually a shared [`super::TokenHolder`]
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created
    pub fn new(
        config: FaceApiConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiError> {
        let http_client = config.http_client()?;
        Ok(Self { http_client, auth, config })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> FaceApiClientBuilder {
        FaceApiClientBuilder::default()
    }

    pub fn config(&self) -> &FaceApiConfig {
        &self.config
    }

    /// Detect up to ten faces in an image.
    ///
    /// # Errors
    ///
    /// Returns error if no token is available, the request fails, or the
    /// provider reports an error
    #[instrument(skip(self, image), fields(image_type = %image.image_type), err)]
    pub async fn face_detect(&self, image: &ImageReference) -> Result<FaceCheckResult, ApiError> {
        info!("face_detect start");
        let body = self.post_json(FACE_DETECT_PATH, &FaceDetectRequest::new(image)).await?;
        let result: FaceCheckResult = decode_enveloped(&body)?;
        info!(face_num = result.face_num, "face_detect success");
        Ok(result)
    }

    /// Compare two faces. The body is a two-element array in argument order.
    ///
    /// # Errors
    ///
    /// Returns error if no token is available, the request fails, or the
    /// provider reports an error
    #[instrument(skip_all, fields(first = %first.face_type, second = %second.face_type), err)]
    pub async fn face_match(
        &self,
        first: &FaceDescriptor,
        second: &FaceDescriptor,
    ) -> Result<FaceMatchResult, ApiError> {
        info!("face_match start");
        let body = self.post_json(FACE_MATCH_PATH, &[first, second]).await?;
        let result: FaceMatchResult = decode_enveloped(&body)?;
        info!(score = result.score, "face_match success");
        Ok(result)
    }

    /// Compare a live photo against an ID-card photo.
    ///
    /// # Errors
    ///
    /// See [`Self::face_match`]
    pub async fn face_match_live_with_id_card(
        &self,
        live: &ImageReference,
        id_card: &ImageReference,
    ) -> Result<FaceMatchResult, ApiError> {
        let live = FaceDescriptor::new(live.clone()).with_face_type(FaceType::Live);
        let id_card = FaceDescriptor::new(id_card.clone()).with_face_type(FaceType::IdCard);
        self.face_match(&live, &id_card).await
    }

    /// Compare a live photo against an ID-card photo, both given as raw values
    /// of the same image type.
    ///
    /// # Errors
    ///
    /// See [`Self::face_match`]
    pub async fn face_match_with(
        &self,
        image_type: ImageType,
        live: impl Into<String>,
        id_card: impl Into<String>,
    ) -> Result<FaceMatchResult, ApiError> {
        let live = ImageReference::new(live, image_type);
        let id_card = ImageReference::new(id_card, image_type);
        self.face_match_live_with_id_card(&live, &id_card).await
    }

    /// Run liveness detection over one or more faces in a single call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] for an empty batch, otherwise the same
    /// errors as the other operations
    #[instrument(skip_all, fields(faces = requests.len()), err)]
    pub async fn check_live(&self, requests: &[FaceLiveRequest]) -> Result<FaceLiveResult, ApiError> {
        if requests.is_empty() {
            return Err(ApiError::InvalidInput(
                "liveness detection needs at least one image".to_string(),
            ));
        }

        info!("check_live start");
        let body = self.post_json(FACE_LIVENESS_PATH, requests).await?;
        let result: FaceLiveResult = decode_enveloped(&body)?;
        info!(face_liveness = result.face_liveness, "check_live success");
        Ok(result)
    }

    /// Liveness detection for one image with the default face fields.
    ///
    /// # Errors
    ///
    /// See [`Self::check_live`]
    pub async fn check_live_single(
        &self,
        image: &ImageReference,
    ) -> Result<FaceLiveResult, ApiError> {
        self.check_live(&[FaceLiveRequest::with_defaults(image.clone())]).await
    }

    /// Liveness detection for a set of images sharing one image type.
    ///
    /// Duplicate values are submitted once, in order of first appearance.
    ///
    /// # Errors
    ///
    /// See [`Self::check_live`]
    pub async fn check_live_batch<I>(
        &self,
        image_type: ImageType,
        images: I,
    ) -> Result<FaceLiveResult, ApiError>
    where
        I: IntoIterator<Item = String>,
    {
        let requests = unique_live_requests(image_type, images);
        self.check_live(&requests).await
    }

    /// Recognise an ID card, always requesting risk and portrait detection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] for `FACE_TOKEN` images, otherwise
    /// the same errors as the other operations
    #[instrument(skip(self, image), fields(image_type = %image.image_type, side = %side), err)]
    pub async fn check_id_card(
        &self,
        image: &ImageReference,
        side: IdCardSide,
    ) -> Result<IdCardCheckResult, ApiError> {
        let fields = IdCardCheckRequest::new(image, side).form_fields()?;

        info!("check_id_card start");
        let body = self.post_form(ID_CARD_PATH, &fields).await?;
        let result: IdCardCheckResult = decode_plain(&body)?;
        info!(
            image_status = result.image_status.as_deref().unwrap_or("unknown"),
            words = result.words_result.len(),
            "check_id_card success"
        );
        Ok(result)
    }

    /// Recognise the portrait side of an ID card.
    ///
    /// # Errors
    ///
    /// See [`Self::check_id_card`]
    pub async fn check_id_card_front(
        &self,
        image: &ImageReference,
    ) -> Result<IdCardCheckResult, ApiError> {
        self.check_id_card(image, IdCardSide::Front).await
    }

    /// Recognise the national-emblem side of an ID card.
    ///
    /// # Errors
    ///
    /// See [`Self::check_id_card`]
    pub async fn check_id_card_back(
        &self,
        image: &ImageReference,
    ) -> Result<IdCardCheckResult, ApiError> {
        self.check_id_card(image, IdCardSide::Back).await
    }

    /// Read a local image, base64-encode it and recognise it as an ID card.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] if the file does not exist, otherwise
    /// see [`Self::check_id_card`]
    pub async fn check_id_card_file(
        &self,
        path: impl AsRef<Path>,
        side: IdCardSide,
    ) -> Result<IdCardCheckResult, ApiError> {
        let image = read_image_file(path).await?;
        self.check_id_card(&image, side).await
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String, ApiError> {
        let request = self.authorized(path).await?.json(body);
        self.read_body(request).await
    }

    async fn post_form(&self, path: &str, fields: &[(&str, String)]) -> Result<String, ApiError> {
        let request = self.authorized(path).await?.form(fields);
        self.read_body(request).await
    }

    async fn authorized(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.auth.access_token().await?;
        debug!(path = %path, "POST request");
        Ok(self
            .http_client
            .request(Method::POST, self.config.url(path))
            .query(&[(ACCESS_TOKEN_PARAM, token.as_str())]))
    }

    async fn read_body(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = self.http_client.send(request).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        Ok(body)
    }
}

fn unique_live_requests<I>(image_type: ImageType, images: I) -> Vec<FaceLiveRequest>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    images
        .into_iter()
        .filter(|image| seen.insert(image.clone()))
        .map(|image| FaceLiveRequest::with_defaults(ImageReference::new(image, image_type)))
        .collect()
}

/// Builder for [`FaceApiClient`]
#[derive(Default)]
pub struct FaceApiClientBuilder {
    config: Option<FaceApiConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl FaceApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: FaceApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the token source
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if no token source was set or client creation fails
    pub fn build(self) -> Result<FaceApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let auth =
            self.auth.ok_or_else(|| ApiError::Config("Auth provider not set".to_string()))?;

        FaceApiClient::new(config, auth)
    }
}
