//! Provider constants
//!
//! Endpoint paths and fixed request values. Everything here is dictated by the
//! provider's API contract.

// Host and endpoint paths
pub const DEFAULT_BASE_URL: &str = "https://aip.baidubce.com";
pub const TOKEN_PATH: &str = "/oauth/2.0/token";
pub const FACE_DETECT_PATH: &str = "/rest/2.0/face/v3/detect";
pub const FACE_MATCH_PATH: &str = "/rest/2.0/face/v3/match";
pub const FACE_LIVENESS_PATH: &str = "/rest/2.0/face/v3/faceverify";
pub const ID_CARD_PATH: &str = "/rest/2.0/ocr/v1/idcard";

// Query parameter carrying the bearer token on every API call
pub const ACCESS_TOKEN_PARAM: &str = "access_token";
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

// Request defaults
pub const MAX_FACE_NUM: &str = "10";

// Envelope `error_code` value for a successful call
pub const VENDOR_SUCCESS_CODE: i64 = 0;

// Transport and scheduling defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REFRESH_CRON: &str = "0 0 0 1,15 * *"; // 00:00:00 on the 1st and 15th
pub const DEFAULT_REFRESH_JOB_TIMEOUT_SECS: u64 = 60;
