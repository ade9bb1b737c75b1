//! Scheduling infrastructure for automated task execution
//!
//! Cron-based token refresh. Schedulers follow the same runtime rules:
//! - Explicit lifecycle management (start/stop)
//! - Join handles for spawned tasks
//! - Cancellation token support
//! - Timeout wrapping on all async operations

pub mod error;
pub mod token_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use token_scheduler::{TokenRefreshScheduler, TokenRefreshSchedulerConfig};
