//! Process shutdown signals.
//!
//! Opt-in: nothing here is registered unless an embedder calls it, so several
//! monitors (or none) can share one process without global handlers.

use tokio_util::sync::CancellationToken;

/// Installed SIGINT/SIGTERM listeners (Ctrl-C elsewhere).
///
/// Signals delivered after [`listen`](Self::listen) returns are not lost, even
/// if nothing is awaiting [`recv`](Self::recv) yet.
pub struct ShutdownSignal {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl ShutdownSignal {
    /// Install the handlers. Must be called within a Tokio runtime.
    #[cfg(unix)]
    pub fn listen() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    pub fn listen() -> std::io::Result<Self> {
        Ok(Self {})
    }

    /// Resolve on the first SIGINT or SIGTERM.
    #[cfg(unix)]
    pub async fn recv(mut self) -> std::io::Result<()> {
        tokio::select! {
            _ = self.interrupt.recv() => {}
            _ = self.terminate.recv() => {}
        }
        Ok(())
    }

    #[cfg(not(unix))]
    pub async fn recv(self) -> std::io::Result<()> {
        tokio::signal::ctrl_c().await
    }

    /// Cancel `token` once a signal arrives.
    pub async fn cancel(self, token: CancellationToken) {
        match self.recv().await {
            Ok(()) => {
                tracing::info!("shutdown signal received");
                token.cancel();
            }
            Err(e) => tracing::warn!(error = %e, "could not listen for shutdown signals"),
        }
    }
}

/// Resolve on SIGINT (Ctrl-C) or SIGTERM.
pub async fn shutdown_signal() -> std::io::Result<()> {
    ShutdownSignal::listen()?.recv().await
}

/// Cancel `token` when a shutdown signal arrives.
///
/// If the signal handlers cannot be installed the token is left alone and the
/// failure is logged; the monitor keeps running until cancelled some other way.
pub async fn cancel_on_shutdown(token: CancellationToken) {
    match ShutdownSignal::listen() {
        Ok(signals) => signals.cancel(token).await,
        Err(e) => tracing::warn!(error = %e, "could not listen for shutdown signals"),
    }
}
