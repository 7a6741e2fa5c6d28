//! Shutdown coordination.
//!
//! Startup is load-then-serve; shutdown runs the other way: the listener
//! stops accepting, in-flight requests drain, then the process exits.

use tokio::sync::watch;

/// Broadcasts the stop request to every long-running task.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Create a task-side handle.
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            rx: self.tx.subscribe(),
        }
    }

    /// Request shutdown. Idempotent; handles created later still observe it.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves once shutdown has been requested.
#[derive(Clone)]
pub struct ShutdownHandle {
    rx: watch::Receiver<bool>,
}

impl ShutdownHandle {
    /// Wait for the shutdown request.
    ///
    /// Also resolves when the coordinator is dropped, which only happens
    /// while the process is already going down.
    pub async fn wait(mut self) {
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}
