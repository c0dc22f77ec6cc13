use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::model::ItineraryDocument;

/// An open subscription to one stored document. Dropping it (or calling
/// [`StoreSubscription::unsubscribe`]) stops delivery and any background
/// polling it owns.
pub struct StoreSubscription {
    receiver: watch::Receiver<Option<ItineraryDocument>>,
    poller: Option<JoinHandle<()>>,
}

impl StoreSubscription {
    pub fn new(receiver: watch::Receiver<Option<ItineraryDocument>>) -> Self {
        StoreSubscription {
            receiver,
            poller: None,
        }
    }

    pub fn with_poller(
        receiver: watch::Receiver<Option<ItineraryDocument>>,
        poller: JoinHandle<()>,
    ) -> Self {
        StoreSubscription {
            receiver,
            poller: Some(poller),
        }
    }

    /// The latest value seen, `None` if no document is stored.
    pub fn current(&self) -> Option<ItineraryDocument> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next pushed value. Returns `None` once the store side
    /// has gone away.
    pub async fn changed(&mut self) -> Option<Option<ItineraryDocument>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    pub fn unsubscribe(self) {}
}

impl Drop for StoreSubscription {
    fn drop(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.abort();
        }
    }
}
