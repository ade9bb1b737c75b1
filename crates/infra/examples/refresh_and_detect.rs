//! Example: refresh a token on schedule and run face detection
//!
//! Loads credentials from `FACELINK_APP_KEY` / `FACELINK_SECRET_KEY` (or a
//! `facelink.toml`), starts the token refresh scheduler and detects faces in
//! the image given on the command line.
//!
//! ```bash
//! export FACELINK_APP_KEY=... FACELINK_SECRET_KEY=...
//! RUST_LOG=info cargo run -p facelink-infra --example refresh_and_detect -- photo.jpg
//! ```

use std::sync::Arc;

use anyhow::Context;
use facelink_infra::api::{
    read_image_file, FaceApiClient, FaceApiConfig, TokenClient, TokenHolder, TokenRefreshJob,
    TokenRefresher,
};
use facelink_infra::config;
use facelink_infra::scheduling::{TokenRefreshScheduler, TokenRefreshSchedulerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let image_path = std::env::args().nth(1).context("usage: refresh_and_detect <image>")?;
    let config = config::load().context("failed to load configuration")?;

    let api_config = FaceApiConfig::from_settings(&config.api);
    let holder = Arc::new(TokenHolder::new());

    let refresher = Arc::new(TokenRefresher::new(
        TokenClient::new(&api_config)?,
        config.credentials.clone(),
        Arc::clone(&holder),
    ));
    let mut scheduler = TokenRefreshScheduler::with_config(
        TokenRefreshSchedulerConfig::from_settings(&config.refresh),
        refresher.clone(),
    );
    if config.refresh.enabled {
        scheduler.start().await?;
    } else {
        refresher.refresh().await?;
    }

    let client = FaceApiClient::builder().config(api_config).auth(holder).build()?;
    let image = read_image_file(&image_path).await?;
    let result = client.face_detect(&image).await?;

    for face in &result.face_list {
        info!(face_token = %face.face_token, probability = ?face.face_probability, "detected face");
    }

    if scheduler.is_running() {
        scheduler.stop().await?;
    }
    Ok(())
}
