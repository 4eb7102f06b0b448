//! HTTP surface subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, policy layers)
//!     → handlers.rs (/, /health, 404 fallback)
//!     → /api/* additionally passes security::rate_limit
//! ```
//!
//! # Design Decisions
//! - Policy (CORS, body limit, compression, tracing) wraps every route
//! - `/api` is a mount point; callers attach real routes via
//!   `HttpServer::with_api_routes`
//! - Shutdown is axum's graceful-shutdown future, resolved by the
//!   lifecycle sequencer's drain trigger

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
