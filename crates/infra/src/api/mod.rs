//! Provider API client
//!
//! HTTP client for the face detection, face comparison, liveness and ID-card
//! endpoints, plus the OAuth token exchange that feeds them.
//!
//! # Architecture
//!
//! - Transport goes through [`crate::http::HttpClient`], one attempt per call
//! - The access token is read from a shared [`TokenHolder`] at call time and
//!   sent as the `access_token` query parameter
//! - [`TokenRefresher`] is the holder's only writer
//! - Provider envelopes are unwrapped in [`envelope`]

pub mod auth;
pub mod client;
pub mod envelope;
pub mod errors;
pub mod files;
pub mod token;

pub use auth::{AccessTokenProvider, StaticTokenProvider, TokenHolder};
pub use client::{FaceApiClient, FaceApiClientBuilder, FaceApiConfig};
pub use errors::{ApiError, ApiErrorCategory};
pub use files::read_image_file;
pub use token::{TokenClient, TokenRefreshJob, TokenRefresher};
