//! Cron-driven access token refresh.
//!
//! Fires a [`TokenRefreshJob`] on a fixed calendar schedule, by default at
//! midnight UTC on the 1st and 15th of each month. Stopping or dropping the
//! scheduler cancels any in-flight refresh and shuts the cron runner down;
//! every asynchronous operation is wrapped in a timeout.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use facelink_domain::Credentials;
//! use facelink_infra::api::{FaceApiConfig, TokenClient, TokenHolder, TokenRefresher};
//! use facelink_infra::scheduling::{
//!     SchedulerResult, TokenRefreshScheduler, TokenRefreshSchedulerConfig,
//! };
//!
//! # async fn example() -> SchedulerResult<()> {
//! let holder = Arc::new(TokenHolder::new());
//! # let token_client = TokenClient::new(&FaceApiConfig::default()).unwrap();
//! let refresher = TokenRefresher::new(token_client, Credentials::new("ak", "sk"), holder);
//!
//! let mut scheduler = TokenRefreshScheduler::with_config(
//!     TokenRefreshSchedulerConfig::default(),
//!     Arc::new(refresher),
//! );
//!
//! scheduler.start().await?;
//! // ... application runs ...
//! scheduler.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use facelink_domain::constants::{DEFAULT_REFRESH_CRON, DEFAULT_REFRESH_JOB_TIMEOUT_SECS};
use facelink_domain::RefreshSettings;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::api::TokenRefreshJob;
use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Configuration for the token refresh scheduler.
#[derive(Debug, Clone)]
pub struct TokenRefreshSchedulerConfig {
    /// Six-field cron expression (seconds first), evaluated in UTC.
    pub cron_expression: String,
    /// Run one refresh as part of `start()`, before the first cron firing.
    pub refresh_on_start: bool,
    /// Timeout applied to a single refresh.
    pub job_timeout: Duration,
    /// Timeout for starting the underlying scheduler.
    pub start_timeout: Duration,
    /// Timeout for stopping the scheduler.
    pub stop_timeout: Duration,
}

impl Default for TokenRefreshSchedulerConfig {
    fn default() -> Self {
        Self {
            cron_expression: DEFAULT_REFRESH_CRON.into(),
            refresh_on_start: true,
            job_timeout: Duration::from_secs(DEFAULT_REFRESH_JOB_TIMEOUT_SECS),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
        }
    }
}

impl TokenRefreshSchedulerConfig {
    pub fn from_settings(settings: &RefreshSettings) -> Self {
        Self {
            cron_expression: settings.cron_expression.clone(),
            refresh_on_start: settings.refresh_on_start,
            job_timeout: Duration::from_secs(settings.job_timeout_seconds),
            ..Default::default()
        }
    }
}

/// Token refresh scheduler with explicit lifecycle management.
pub struct TokenRefreshScheduler {
    scheduler: Option<JobScheduler>,
    config: TokenRefreshSchedulerConfig,
    cancellation: CancellationToken,
    job: Arc<dyn TokenRefreshJob>,
}

impl TokenRefreshScheduler {
    /// Create a scheduler with the default timeouts.
    pub fn new(cron_expression: String, job: Arc<dyn TokenRefreshJob>) -> Self {
        let config = TokenRefreshSchedulerConfig { cron_expression, ..Default::default() };
        Self::with_config(config, job)
    }

    /// Create a scheduler with a custom configuration.
    pub fn with_config(config: TokenRefreshSchedulerConfig, job: Arc<dyn TokenRefreshJob>) -> Self {
        Self {
            scheduler: None,
            config,
            cancellation: CancellationToken::new(),
            job,
        }
    }

    /// Start the scheduler.
    ///
    /// With `refresh_on_start` the first refresh runs before this returns. A
    /// failed first refresh is logged and does not prevent the schedule from
    /// starting.
    #[instrument(skip(self), fields(cron = %self.config.cron_expression))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();

        let scheduler_instance = self.build_scheduler().await?;

        if self.config.refresh_on_start {
            Self::run_refresh(self.job.clone(), self.config.job_timeout).await;
        }

        let start_timeout = self.config.start_timeout;
        let start_result = tokio::time::timeout(start_timeout, scheduler_instance.start())
            .await
            .map_err(|source| SchedulerError::Timeout { duration: start_timeout, source })?;

        start_result.map_err(|source| SchedulerError::StartFailed { source })?;

        self.scheduler = Some(scheduler_instance);
        info!(scheduler = "token_refresh", event = "start", "Token refresh scheduler started");
        Ok(())
    }

    /// Stop the scheduler, cancelling any refresh that is still running.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation.cancel();

        let mut scheduler = match self.scheduler.take() {
            Some(scheduler) => scheduler,
            None => return Err(SchedulerError::NotRunning),
        };

        let stop_timeout = self.config.stop_timeout;
        let stop_result =
            tokio::time::timeout(stop_timeout, async move { scheduler.shutdown().await })
                .await
                .map_err(|source| SchedulerError::Timeout { duration: stop_timeout, source })?;

        stop_result.map_err(|source| SchedulerError::StopFailed { source })?;

        info!(scheduler = "token_refresh", event = "stop", "Token refresh scheduler stopped");
        self.cancellation = CancellationToken::new();
        Ok(())
    }

    /// Returns true when a scheduler instance is active.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }

    async fn build_scheduler(&self) -> SchedulerResult<JobScheduler> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|source| SchedulerError::CreationFailed { source })?;
        let cron_expr = self.config.cron_expression.clone();
        let job = self.job.clone();
        let job_timeout = self.config.job_timeout;
        let cancel = self.cancellation.clone();

        let job_definition = Job::new_async(cron_expr.as_str(), move |_id, _lock| {
            let job = job.clone();
            let cancel = cancel.clone();
            Box::pin(async move {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => {
                        debug!(
                            scheduler = "token_refresh",
                            event = "job_cancelled",
                            "Token refresh skipped, scheduler is shutting down"
                        );
                    }
                    () = Self::run_refresh(job, job_timeout) => {}
                }
            })
        })
        .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        let job_id = job_definition.guid();
        scheduler
            .add(job_definition)
            .await
            .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        debug!(cron = %self.config.cron_expression, job_id = %job_id, "Registered token refresh job");
        Ok(scheduler)
    }

    async fn run_refresh(job: Arc<dyn TokenRefreshJob>, job_timeout: Duration) {
        let started = Instant::now();

        match tokio::time::timeout(job_timeout, job.refresh()).await {
            Ok(Ok(())) => {
                debug!(
                    scheduler = "token_refresh",
                    event = "job_complete",
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Token refresh finished successfully"
                );
            }
            Ok(Err(err)) => {
                error!(
                    scheduler = "token_refresh",
                    error = %err,
                    error_kind = ?err.category(),
                    "Token refresh failed"
                );
            }
            Err(elapsed) => {
                warn!(
                    scheduler = "token_refresh",
                    event = "job_timeout",
                    timeout_secs = job_timeout.as_secs(),
                    "Token refresh timed out"
                );
                debug!(
                    scheduler = "token_refresh",
                    event = "job_timeout_details",
                    elapsed = ?elapsed,
                    "Timeout details"
                );
            }
        }
    }
}

impl Drop for TokenRefreshScheduler {
    fn drop(&mut self) {
        let Some(mut scheduler) = self.scheduler.take() else {
            return;
        };

        warn!(
            scheduler = "token_refresh",
            event = "drop_shutdown",
            "TokenRefreshScheduler dropped while running; shutting it down"
        );
        self.cancellation.cancel();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(err) = scheduler.shutdown().await {
                        warn!(
                            scheduler = "token_refresh",
                            error = %err,
                            "Failed to shut down dropped token refresh scheduler"
                        );
                    }
                });
            }
            Err(_) => {
                warn!(
                    scheduler = "token_refresh",
                    "No runtime available to shut down dropped scheduler; refreshes stay cancelled"
                );
            }
        }
    }
}
