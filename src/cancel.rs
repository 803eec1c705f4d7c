//! Cooperative cancellation.
//!
//! A [`CancelSource`] is a broadcast one-shot event: once [`CancelSource::cancel`]
//! is called, every [`CancelSignal`] derived from it observes the cancellation,
//! including signals created afterwards. Signals compose with
//! [`CancelSignal::any`], which fires as soon as any of its inputs fires.
//!
//! ```
//! use opendota::cancel::CancelSource;
//!
//! let user = CancelSource::new();
//! let deadline = CancelSource::new();
//! let either = user.signal().any(&deadline.signal());
//!
//! assert!(!either.is_cancelled());
//! deadline.cancel();
//! assert!(either.is_cancelled());
//! ```

use futures_util::future::select_all;
use std::sync::Arc;
use tokio::sync::watch;

/// The firing side of a cancellation event.
///
/// Cloning a source yields another handle to the same event.
#[derive(Debug, Clone)]
pub struct CancelSource {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelSource {
    /// Creates a new, unfired source.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Fires the event. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Returns a signal that observes this source.
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            receivers: vec![self.tx.subscribe()],
        }
    }
}

impl Default for CancelSource {
    fn default() -> Self {
        Self::new()
    }
}

/// The observing side of one or more cancellation events.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    receivers: Vec<watch::Receiver<bool>>,
}

impl CancelSignal {
    /// Returns a signal that fires when either `self` or `other` fires.
    ///
    /// Already-fired inputs are visible immediately on the composed signal.
    pub fn any(&self, other: &CancelSignal) -> CancelSignal {
        let mut receivers = self.receivers.clone();
        receivers.extend(other.receivers.iter().cloned());
        CancelSignal { receivers }
    }

    /// Returns `true` if any input has fired.
    pub fn is_cancelled(&self) -> bool {
        self.receivers.iter().any(|rx| *rx.borrow())
    }

    /// Completes once any input fires.
    ///
    /// A source that is dropped without firing never completes this future.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        if self.receivers.is_empty() {
            return std::future::pending().await;
        }

        let waits = self.receivers.iter().cloned().map(|mut rx| {
            Box::pin(async move {
                if rx.wait_for(|fired| *fired).await.is_err() {
                    std::future::pending::<()>().await;
                }
            })
        });
        select_all(waits).await;
    }
}
