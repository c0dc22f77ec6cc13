//! In-process store. Every client sharing one `MemoryStore` sees the same
//! documents; used by tests and single-process sessions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, watch};

use crate::error::DuoplanResult;
use crate::model::{CoupleSpace, ItineraryDocument};
use crate::store::{DocumentStore, SpaceStore, StoreSubscription};

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    documents: HashMap<String, watch::Sender<Option<ItineraryDocument>>>,
    spaces: HashMap<String, CoupleSpace>,
    memberships: HashMap<String, String>,
}

impl MemoryState {
    fn document(&mut self, key: &str) -> &watch::Sender<Option<ItineraryDocument>> {
        self.documents
            .entry(key.to_string())
            .or_insert_with(|| watch::channel(None).0)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read(&self, key: &str) -> DuoplanResult<Option<ItineraryDocument>> {
        let state = self.inner.lock().await;
        Ok(state
            .documents
            .get(key)
            .and_then(|document| document.borrow().clone()))
    }

    async fn write(&self, key: &str, document: &ItineraryDocument) -> DuoplanResult<()> {
        let mut state = self.inner.lock().await;
        state.document(key).send_replace(Some(document.clone()));
        Ok(())
    }

    async fn subscribe(&self, key: &str) -> DuoplanResult<StoreSubscription> {
        let mut state = self.inner.lock().await;
        Ok(StoreSubscription::new(state.document(key).subscribe()))
    }
}

#[async_trait]
impl SpaceStore for MemoryStore {
    async fn read_space(&self, space_id: &str) -> DuoplanResult<Option<CoupleSpace>> {
        Ok(self.inner.lock().await.spaces.get(space_id).cloned())
    }

    async fn write_space(&self, space: &CoupleSpace) -> DuoplanResult<()> {
        let mut state = self.inner.lock().await;
        state.spaces.insert(space.id.clone(), space.clone());
        Ok(())
    }

    async fn delete_space(&self, space_id: &str) -> DuoplanResult<()> {
        let mut state = self.inner.lock().await;
        state.spaces.remove(space_id);
        if let Some(document) = state.documents.get(space_id) {
            document.send_replace(None);
        }
        Ok(())
    }

    async fn read_membership(&self, user_id: &str) -> DuoplanResult<Option<String>> {
        Ok(self.inner.lock().await.memberships.get(user_id).cloned())
    }

    async fn write_membership(&self, user_id: &str, space_id: Option<&str>) -> DuoplanResult<()> {
        let mut state = self.inner.lock().await;
        match space_id {
            Some(id) => state.memberships.insert(user_id.to_string(), id.to_string()),
            None => state.memberships.remove(user_id),
        };
        Ok(())
    }
}
