//! Request policy subsystem.
//!
//! # Design Decisions
//! - Rate limiting is per client IP, token-bucket, applied only to the
//!   `/api` mount point
//! - Baseline security headers are set on every response
//! - CORS, body limits, and compression are tower-http layers wired in
//!   `http::server`

pub mod headers;
pub mod rate_limit;

pub use rate_limit::RateLimiterState;
