//! Graceful shutdown plumbing.
//!
//! Backed by a `watch` channel holding a single flag, so a signal taken
//! after the trigger still resolves immediately.

use tokio::sync::watch;

/// Owner side: flips the flag once.
#[derive(Debug)]
pub struct Shutdown {
    flag: watch::Sender<bool>,
}

/// Listener side, handed to the server.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    flag: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (flag, _) = watch::channel(false);
        Self { flag }
    }

    /// A future-producing handle that resolves once `trigger` is called.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            flag: self.flag.subscribe(),
        }
    }

    /// Request shutdown. Idempotent.
    pub fn trigger(&self) {
        self.flag.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.flag.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Wait for the trigger. Also resolves if the `Shutdown` is dropped,
    /// since nothing could trigger it afterwards.
    pub async fn recv(mut self) {
        let _ = self.flag.wait_for(|triggered| *triggered).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_reaches_every_signal() {
        let shutdown = Shutdown::new();
        let a = shutdown.signal();
        let b = a.clone();
        shutdown.trigger();
        a.recv().await;
        b.recv().await;
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_signal_taken_after_trigger_resolves() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), shutdown.signal().recv())
            .await
            .expect("late signal should see the earlier trigger");
    }

    #[tokio::test]
    async fn test_untriggered_signal_stays_pending() {
        let shutdown = Shutdown::new();
        let pending = tokio::time::timeout(Duration::from_millis(50), shutdown.signal().recv()).await;
        assert!(pending.is_err());
    }
}
