//! # FaceLink Domain
//!
//! Domain types for the FaceLink provider client.
//!
//! This crate contains:
//! - Image references and face enums with their wire mappings
//! - Request payloads and result DTOs
//! - Error types and Result definitions
//! - Configuration structures and provider constants
//!
//! ## Architecture
//! - No dependencies on other FaceLink crates
//! - No I/O; HTTP and scheduling live in `facelink-infra`

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
