//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce tracing events
//!     → console layer (colorized, human-readable)
//!     → logs/error.log (JSON, ERROR only)
//!     → logs/combined.log (JSON, everything at or above threshold)
//! ```
//!
//! # Design Decisions
//! - File writers are non-blocking; the shutdown path never waits on a sink
//! - Rotation/retention is the log collector's concern, not ours
//! - Panics are logged through the subscriber but do not trigger shutdown

pub mod logging;
