//! Minimal HTTP service scaffold.
//!
//! Environment-driven configuration, structured logging, a health/root
//! endpoint pair with an `/api` mount point for future routes, and a
//! signal-triggered graceful shutdown sequencer.
//!
//! # Data Flow
//! ```text
//! process start
//!     → config::env (read environment, fail fast on missing keys)
//!     → observability::logging (console + file sinks)
//!     → http::server (bind listener, serve routes)
//!     → lifecycle::shutdown (armed against SIGINT/SIGTERM)
//!
//! On termination signal:
//!     Running → Draining (listener stops accepting, deadline starts)
//!     Draining → Stopped (drain completes first, exit 0)
//!     Draining → ForcedExit (deadline fires first, exit 1)
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::{ShutdownOutcome, ShutdownSequencer, SignalKind};
