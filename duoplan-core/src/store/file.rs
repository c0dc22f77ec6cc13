//! Directory-backed store.
//!
//! Layout under the store root:
//!
//! ```text
//! itineraries/<space-id>.json
//! spaces/<space-id>.json
//! users/<user-id>.json
//! ```
//!
//! Every file is replaced atomically (write to `.tmp`, then rename). Writers
//! in this process notify local subscribers directly; writes from other
//! processes sharing the directory are picked up by polling. Each key's disk
//! access and the push that follows it run under one lock, so subscribers
//! never see a document older than one already delivered.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::constants::DEFAULT_POLL_INTERVAL;
use crate::error::{DuoplanError, DuoplanResult};
use crate::model::{CoupleSpace, ItineraryDocument};
use crate::store::{DocumentStore, SpaceStore, StoreSubscription};

/// Local fan-out for one itinerary key.
struct KeyChannel {
    sender: watch::Sender<Option<ItineraryDocument>>,
    /// Held from a disk read or write until its result has been pushed.
    io: Mutex<()>,
}

impl KeyChannel {
    fn new() -> Self {
        KeyChannel {
            sender: watch::channel(None).0,
            io: Mutex::new(()),
        }
    }

    fn is_idle(&self) -> bool {
        self.sender.receiver_count() == 0 && self.io.try_lock().is_ok()
    }
}

#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
    poll_interval: Duration,
    channels: Arc<Mutex<HashMap<String, Arc<KeyChannel>>>>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Membership {
    couple_space_id: Option<String>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore {
            root: root.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            channels: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn itinerary_path(&self, key: &str) -> PathBuf {
        self.root.join("itineraries").join(file_name(key))
    }

    fn space_path(&self, space_id: &str) -> PathBuf {
        self.root.join("spaces").join(file_name(space_id))
    }

    fn user_path(&self, user_id: &str) -> PathBuf {
        self.root.join("users").join(file_name(user_id))
    }

    /// Channel for `key`. Channels nobody listens to or uses are dropped.
    async fn channel(&self, key: &str) -> Arc<KeyChannel> {
        let mut channels = self.channels.lock().await;
        channels.retain(|k, channel| k == key || !channel.is_idle());
        channels
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(KeyChannel::new()))
            .clone()
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn read(&self, key: &str) -> DuoplanResult<Option<ItineraryDocument>> {
        read_json(&self.itinerary_path(key)).await
    }

    async fn write(&self, key: &str, document: &ItineraryDocument) -> DuoplanResult<()> {
        let channel = self.channel(key).await;
        let _io = channel.io.lock().await;

        write_json(&self.itinerary_path(key), document).await?;
        debug!(key, days = document.days.len(), "wrote itinerary");
        replace_if_changed(&channel.sender, Some(document.clone()));
        Ok(())
    }

    async fn subscribe(&self, key: &str) -> DuoplanResult<StoreSubscription> {
        let channel = self.channel(key).await;
        let receiver = {
            let _io = channel.io.lock().await;
            let on_disk = read_json(&self.itinerary_path(key)).await?;
            replace_if_changed(&channel.sender, on_disk);
            channel.sender.subscribe()
        };

        let path = self.itinerary_path(key);
        let poll_interval = self.poll_interval;
        let key = key.to_string();

        let poller = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            // First tick fires immediately; the channel already holds the disk state
            ticker.tick().await;
            loop {
                ticker.tick().await;

                let _io = channel.io.lock().await;
                let on_disk: Option<ItineraryDocument> = match read_json(&path).await {
                    Ok(document) => document,
                    Err(e) => {
                        warn!(key = %key, error = %e, "failed to poll itinerary");
                        continue;
                    }
                };

                if replace_if_changed(&channel.sender, on_disk) {
                    debug!(key = %key, "picked up external itinerary change");
                }
            }
        });

        Ok(StoreSubscription::with_poller(receiver, poller))
    }
}

#[async_trait]
impl SpaceStore for FileStore {
    async fn read_space(&self, space_id: &str) -> DuoplanResult<Option<CoupleSpace>> {
        read_json(&self.space_path(space_id)).await
    }

    async fn write_space(&self, space: &CoupleSpace) -> DuoplanResult<()> {
        write_json(&self.space_path(&space.id), space).await
    }

    async fn delete_space(&self, space_id: &str) -> DuoplanResult<()> {
        remove_if_exists(&self.space_path(space_id)).await?;

        let channel = self.channel(space_id).await;
        let _io = channel.io.lock().await;
        remove_if_exists(&self.itinerary_path(space_id)).await?;
        replace_if_changed(&channel.sender, None);
        Ok(())
    }

    async fn read_membership(&self, user_id: &str) -> DuoplanResult<Option<String>> {
        let membership: Option<Membership> = read_json(&self.user_path(user_id)).await?;
        Ok(membership.and_then(|m| m.couple_space_id))
    }

    async fn write_membership(&self, user_id: &str, space_id: Option<&str>) -> DuoplanResult<()> {
        let membership = Membership {
            couple_space_id: space_id.map(String::from),
        };
        write_json(&self.user_path(user_id), &membership).await
    }
}

/// Push `value` to subscribers unless it equals what they already have.
fn replace_if_changed(
    sender: &watch::Sender<Option<ItineraryDocument>>,
    value: Option<ItineraryDocument>,
) -> bool {
    sender.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    })
}

/// Keys become file names; path separators are not allowed through.
fn file_name(key: &str) -> String {
    format!("{}.json", key.replace(['/', '\\', ':'], "_"))
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> DuoplanResult<Option<T>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let value = serde_json::from_str(&content).map_err(|e| {
        DuoplanError::Store(format!("Failed to parse {}: {}", path.display(), e))
    })?;
    Ok(Some(value))
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> DuoplanResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            DuoplanError::Store(format!("Could not create {}: {}", parent.display(), e))
        })?;
    }

    let content = serde_json::to_string_pretty(value)?;
    // Unique per writer so two processes never share a temp file
    let temp = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

    tokio::fs::write(&temp, content)
        .await
        .map_err(|e| DuoplanError::Store(format!("Could not write {}: {}", temp.display(), e)))?;
    tokio::fs::rename(&temp, path)
        .await
        .map_err(|e| DuoplanError::Store(format!("Could not replace {}: {}", path.display(), e)))?;
    Ok(())
}

async fn remove_if_exists(path: &Path) -> DuoplanResult<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
