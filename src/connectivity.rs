//! Injected connectivity signal.
//!
//! The core never decides whether the device is online. The embedding
//! layer owns the platform network monitor and pushes its state through a
//! [`ConnectivityHandle`]; [`ConnectivityWatch`] is the read half handed
//! to the reconciliation layer, answering the "connected right now?"
//! question on every load and handing out change subscriptions to
//! reactive callers. Probing is async because real platform monitors are.

use async_trait::async_trait;
use tokio::sync::watch;

/// Answers whether the device currently has network access.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Latest best-effort connectivity answer, polled once per load.
    async fn is_connected(&self) -> bool;
}

/// Creates a linked connectivity writer/reader pair.
///
/// The handle feeds platform network events in; the watch serves the
/// latest value to any number of readers. Readers keep serving the last
/// pushed value even after the handle is dropped.
#[must_use]
pub fn channel(initially_connected: bool) -> (ConnectivityHandle, ConnectivityWatch) {
    let (sender, receiver) = watch::channel(initially_connected);
    (
        ConnectivityHandle { sender },
        ConnectivityWatch { receiver },
    )
}

/// Writer half, owned by whatever watches the platform network state
#[derive(Debug)]
pub struct ConnectivityHandle {
    sender: watch::Sender<bool>,
}

impl ConnectivityHandle {
    /// Publishes a new connectivity state to every watch.
    pub fn set_connected(&self, connected: bool) {
        self.sender.send_replace(connected);
    }
}

/// Reader half, used by the reconciliation layer and reactive consumers
#[derive(Debug, Clone)]
pub struct ConnectivityWatch {
    receiver: watch::Receiver<bool>,
}

impl ConnectivityWatch {
    /// Subscribes to connectivity change notifications.
    ///
    /// The returned receiver exposes the current value via `borrow` and
    /// wakes from `changed` on every `set_connected`.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.receiver.clone()
    }
}

#[async_trait]
impl ConnectivityProbe for ConnectivityWatch {
    async fn is_connected(&self) -> bool {
        *self.receiver.borrow()
    }
}
