//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ optional .env file loaded by main)
//!     → env.rs (read keys, apply defaults, fail on missing required)
//!     → AppConfig (validated, immutable)
//!     → shared with all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - Required keys abort startup before any socket binds
//! - Loading is written against an injectable lookup so tests never
//!   mutate the process environment

pub mod env;
pub mod schema;

pub use env::{load, ConfigError};
pub use schema::AppConfig;
