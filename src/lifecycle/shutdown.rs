//! Graceful shutdown sequencing.
//!
//! # Responsibilities
//! - Observe SIGINT/SIGTERM and start the drain exactly once
//! - Stop the HTTP surface accepting new connections (drain trigger)
//! - Bound the drain with a grace deadline
//! - Report the outcome as a process exit code
//!
//! # Design Decisions
//! - The transition table is plain guarded methods on owned state; the
//!   async driver feeds it future completions from one `select!` point,
//!   so "first event processed wins" and the loser is dropped
//! - Terminal states absorb every later event
//! - The drain trigger is a broadcast channel the serve task subscribes
//!   to via `with_graceful_shutdown`

use std::process::ExitCode;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Identity of a termination signal. Both kinds start the same drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Interrupt,
    Terminate,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::Interrupt => write!(f, "SIGINT"),
            SignalKind::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Lifecycle states of the sequencer. Transitions are monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    /// Accepting connections normally.
    Running,
    /// No new connections; in-flight requests finishing under a deadline.
    Draining,
    /// Drain completed before the deadline. Terminal.
    Stopped,
    /// Deadline fired before the drain completed. Terminal.
    ForcedExit,
}

/// Outcome of a completed shutdown, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// All in-flight requests finished within the grace period.
    Clean,
    /// The grace deadline elapsed with requests still in flight.
    Forced,
}

impl ShutdownOutcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            ShutdownOutcome::Clean => ExitCode::SUCCESS,
            ShutdownOutcome::Forced => ExitCode::FAILURE,
        }
    }
}

/// Orchestrates the ordered, time-bounded shutdown of the HTTP surface.
///
/// Created once at startup. The serve task subscribes to the drain
/// trigger through [`drain_receiver`](Self::drain_receiver) before the
/// sequencer is armed; its `JoinHandle` doubles as the drain-complete
/// notification.
pub struct ShutdownSequencer {
    state: ShutdownState,
    grace_period: Duration,
    drain: broadcast::Sender<()>,
}

impl ShutdownSequencer {
    pub fn new(grace_period: Duration) -> Self {
        let (drain, _) = broadcast::channel(1);
        Self {
            state: ShutdownState::Running,
            grace_period,
            drain,
        }
    }

    /// Subscribe to the drain trigger.
    ///
    /// Hand the receiver to [`HttpServer::run`](crate::http::HttpServer::run)
    /// before arming; it resolves the server's graceful-shutdown future.
    pub fn drain_receiver(&self) -> broadcast::Receiver<()> {
        self.drain.subscribe()
    }

    pub fn state(&self) -> ShutdownState {
        self.state
    }

    /// Handle a termination signal.
    ///
    /// The first signal transitions `Running → Draining` and fires the
    /// drain trigger; every later signal is a no-op. Returns whether the
    /// transition happened.
    pub fn on_signal(&mut self, kind: SignalKind) -> bool {
        match self.state {
            ShutdownState::Running => {
                self.state = ShutdownState::Draining;
                tracing::info!(
                    signal = %kind,
                    "Termination signal received, starting graceful shutdown"
                );
                let _ = self.drain.send(());
                true
            }
            _ => false,
        }
    }

    /// Drain finished: `Draining → Stopped`. Ignored in any other state.
    fn on_drain_complete(&mut self) -> Option<ShutdownOutcome> {
        match self.state {
            ShutdownState::Draining => {
                self.state = ShutdownState::Stopped;
                Some(ShutdownOutcome::Clean)
            }
            _ => None,
        }
    }

    /// Deadline fired: `Draining → ForcedExit`. Ignored in any other state.
    fn on_deadline(&mut self) -> Option<ShutdownOutcome> {
        match self.state {
            ShutdownState::Draining => {
                self.state = ShutdownState::ForcedExit;
                Some(ShutdownOutcome::Forced)
            }
            _ => None,
        }
    }

    /// Arm the sequencer against the OS signal channel and the serve task.
    ///
    /// Call exactly once, after the listener is bound. Resolves when the
    /// process should exit. If the serve task ends before any signal
    /// arrives, that is a fault and the outcome is `Forced`.
    pub async fn arm(mut self, mut server: JoinHandle<std::io::Result<()>>) -> ShutdownOutcome {
        let kind = tokio::select! {
            kind = wait_for_signal() => kind,
            result = &mut server => {
                log_server_result(result);
                tracing::error!("HTTP server stopped without a termination signal");
                return ShutdownOutcome::Forced;
            }
        };

        self.on_signal(kind);
        self.drive(server).await
    }

    /// Programmatic equivalent of a termination signal.
    ///
    /// Starts the drain immediately and waits out the race, without
    /// touching the OS signal channel.
    pub async fn shutdown_now(
        mut self,
        kind: SignalKind,
        server: JoinHandle<std::io::Result<()>>,
    ) -> ShutdownOutcome {
        self.on_signal(kind);
        self.drive(server).await
    }

    /// Race the drain-complete notification against the grace deadline.
    ///
    /// Must be entered in `Draining`. Whichever completion is observed
    /// first wins; dropping the future of the loser suppresses it.
    async fn drive(mut self, mut server: JoinHandle<std::io::Result<()>>) -> ShutdownOutcome {
        let deadline = tokio::time::sleep(self.grace_period);
        tokio::pin!(deadline);

        tokio::select! {
            result = &mut server => {
                log_server_result(result);
                tracing::info!("All requests completed, exiting process");
                self.on_drain_complete().unwrap_or(ShutdownOutcome::Clean)
            }
            _ = &mut deadline => {
                tracing::warn!(
                    grace_period_secs = self.grace_period.as_secs(),
                    "Forcing shutdown, drain deadline exceeded"
                );
                server.abort();
                self.on_deadline().unwrap_or(ShutdownOutcome::Forced)
            }
        }
    }
}

fn log_server_result(result: Result<std::io::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {
            tracing::info!("HTTP server closed, no longer accepting connections");
        }
        Ok(Err(e)) => tracing::error!(error = %e, "HTTP server exited with error"),
        Err(e) => tracing::error!(error = %e, "HTTP server task failed"),
    }
}

/// Wait for the first termination signal.
///
/// After this resolves the streams are dropped; later signals are
/// observed by no one and cannot restart the shutdown protocol.
#[cfg(unix)]
async fn wait_for_signal() -> SignalKind {
    use tokio::signal::unix::{signal, SignalKind as Sig};

    let mut interrupt = signal(Sig::interrupt()).expect("Failed to install SIGINT handler");
    let mut terminate = signal(Sig::terminate()).expect("Failed to install SIGTERM handler");

    tokio::select! {
        _ = interrupt.recv() => SignalKind::Interrupt,
        _ = terminate.recv() => SignalKind::Terminate,
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> SignalKind {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    SignalKind::Interrupt
}
