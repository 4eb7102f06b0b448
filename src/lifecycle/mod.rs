//! Process lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! SIGINT / SIGTERM
//!     → shutdown.rs (Running → Draining, drain trigger broadcast)
//!     → HTTP surface stops accepting, in-flight requests finish
//!     → serve task completes (Stopped, exit 0)
//!       or grace deadline fires (ForcedExit, exit 1)
//! ```
//!
//! # Design Decisions
//! - Transitions are monotonic; terminal states absorb all later events
//! - First event processed wins the drain-vs-deadline race
//! - The deadline is the safety net: the process never outlives it

pub mod shutdown;

pub use shutdown::{ShutdownOutcome, ShutdownSequencer, ShutdownState, SignalKind};
