//! # FaceLink Infrastructure
//!
//! I/O side of the FaceLink provider client.
//!
//! This crate contains:
//! - HTTP transport (single attempt, configurable timeout)
//! - The face/OCR API client and the OAuth token exchange
//! - The shared token holder and its cron-driven refresher
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Pure types live in `facelink-domain`
//! - Errors surface as [`api::ApiError`] or [`facelink_domain::FaceLinkError`]
//! - Nothing is retried; every failure reaches the caller

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod scheduling;

// Re-export commonly used items
pub use api::{
    AccessTokenProvider, ApiError, FaceApiClient, FaceApiConfig, TokenClient, TokenHolder,
    TokenRefresher,
};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use scheduling::{SchedulerError, TokenRefreshScheduler, TokenRefreshSchedulerConfig};
