//! Client-side synchronization.
//!
//! Each client keeps a mirror of the shared itinerary. Local edits are
//! applied to the mirror first and then written to the store as a whole
//! document; every snapshot the store pushes back replaces the mirror
//! outright. Nothing is merged: when two clients write concurrently, the
//! write that lands last is what everyone ends up with.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{DuoplanError, DuoplanResult};
use crate::model::ItineraryDocument;
use crate::store::{DocumentStore, StoreSubscription};

/// Builds the first document for a space that has none in the store.
#[async_trait]
pub trait Seeder: Send + Sync {
    async fn initial_document(&self, space_id: &str) -> ItineraryDocument;
}

#[derive(Clone)]
pub struct SyncEngine {
    store: Arc<dyn DocumentStore>,
    seeder: Arc<dyn Seeder>,
}

impl SyncEngine {
    pub fn new(store: Arc<dyn DocumentStore>, seeder: Arc<dyn Seeder>) -> Self {
        SyncEngine { store, seeder }
    }

    /// Open a live mirror of `space_id`. If the store has no document yet,
    /// one is seeded and written before this returns.
    pub async fn subscribe(&self, space_id: &str) -> DuoplanResult<LiveItinerary> {
        let subscription = self.store.subscribe(space_id).await?;

        let initial = match subscription.current() {
            Some(document) => document,
            None => {
                info!(space_id, "no itinerary in store, seeding a new one");
                let seeded = self.seeder.initial_document(space_id).await;
                self.store.write(space_id, &seeded).await?;
                seeded
            }
        };

        let mirror = Arc::new(watch::channel(initial).0);
        let receiver = mirror.subscribe();
        let pump = tokio::spawn(pump(subscription, mirror.clone(), space_id.to_string()));

        Ok(LiveItinerary {
            space_id: space_id.to_string(),
            store: self.store.clone(),
            mirror,
            receiver,
            pump,
        })
    }
}

/// Replace the mirror with every snapshot the store pushes.
async fn pump(
    mut subscription: StoreSubscription,
    mirror: Arc<watch::Sender<ItineraryDocument>>,
    space_id: String,
) {
    while let Some(pushed) = subscription.changed().await {
        match pushed {
            // Echoes of our own writes match the mirror and are not re-announced
            Some(document) => {
                let replaced = mirror.send_if_modified(|current| {
                    if *current == document {
                        false
                    } else {
                        *current = document;
                        true
                    }
                });
                if replaced {
                    debug!(space_id = %space_id, "mirror replaced by store snapshot");
                }
            }
            None => warn!(space_id = %space_id, "itinerary removed from store, keeping local copy"),
        }
    }
    debug!(space_id = %space_id, "store subscription closed");
}

/// A client's open view of one itinerary. Dropping it (or calling
/// [`LiveItinerary::unsubscribe`]) stops remote updates; writes already
/// issued still complete.
pub struct LiveItinerary {
    space_id: String,
    store: Arc<dyn DocumentStore>,
    mirror: Arc<watch::Sender<ItineraryDocument>>,
    receiver: watch::Receiver<ItineraryDocument>,
    pump: JoinHandle<()>,
}

impl LiveItinerary {
    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    /// The mirror as it stands, including optimistic local edits.
    pub fn current(&self) -> ItineraryDocument {
        self.mirror.borrow().clone()
    }

    /// Wait until the mirror changes (local edit or remote snapshot) and
    /// return the new value.
    pub async fn changed(&mut self) -> Option<ItineraryDocument> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// An independent receiver on the mirror.
    pub fn watch(&self) -> watch::Receiver<ItineraryDocument> {
        self.mirror.subscribe()
    }

    /// Apply `mutation` to the mirror immediately, then write the resulting
    /// document to the store. On a failed write the mirror keeps the edit and
    /// the error is returned; nothing is retried.
    pub async fn mutate<F>(&self, mutation: F) -> DuoplanResult<()>
    where
        F: FnOnce(&ItineraryDocument) -> ItineraryDocument,
    {
        let mut next = ItineraryDocument::default();
        self.mirror.send_modify(|document| {
            *document = mutation(document);
            next = document.clone();
        });

        self.store
            .write(&self.space_id, &next)
            .await
            .map_err(|e| {
                warn!(space_id = %self.space_id, error = %e, "failed to save itinerary");
                match e {
                    DuoplanError::Store(_) => e,
                    other => DuoplanError::Store(other.to_string()),
                }
            })
    }

    pub fn unsubscribe(self) {}
}

impl Drop for LiveItinerary {
    fn drop(&mut self) {
        self.pump.abort();
    }
}
