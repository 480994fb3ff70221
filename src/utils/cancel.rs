//! Cancellation for in-flight requests.
//!
//! A view that issues requests owns a [`CancelSignal`] and fires it on
//! teardown; requests raced against it resolve to `Cancelled` instead of
//! writing into state that is gone.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info};

#[derive(Clone)]
pub struct CancelSignal {
    sender: broadcast::Sender<()>,
    fired: Arc<AtomicBool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            sender,
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Idempotent; only the first call notifies waiters.
    pub fn cancel(&self) {
        if !self.fired.swap(true, Ordering::SeqCst) {
            debug!("Cancel signal fired");
            let _ = self.sender.send(());
        }
    }

    /// Resolves once [`cancel`](Self::cancel) has been called, including
    /// when that happened before this future was created.
    pub async fn cancelled(&self) {
        let mut rx = self.sender.subscribe();
        if self.is_cancelled() {
            return;
        }
        let _ = rx.recv().await;
    }

    /// Runs `fut` unless the signal fires first.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => None,
            out = fut => Some(out),
        }
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Fires `signal` on Ctrl+C.
pub async fn cancel_on_ctrl_c(signal: CancelSignal) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C, cancelling in-flight requests");
        signal.cancel();
    }
}
