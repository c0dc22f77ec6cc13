use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Semaphore;

use duoplan_core::error::{DuoplanError, DuoplanResult};
use duoplan_core::model::{Day, Event, EventKind, ItineraryDocument};
use duoplan_core::mutation;
use duoplan_core::store::{DocumentStore, FileStore, MemoryStore, StoreSubscription};
use duoplan_core::sync::{LiveItinerary, Seeder, SyncEngine};

/// Seeds a fixed one-day document and counts how often it was asked to.
#[derive(Default)]
struct OneDaySeeder {
    calls: AtomicUsize,
}

#[async_trait]
impl Seeder for OneDaySeeder {
    async fn initial_document(&self, _space_id: &str) -> ItineraryDocument {
        self.calls.fetch_add(1, Ordering::SeqCst);
        one_day()
    }
}

/// Passes everything through to a shared store, but holds each write until
/// a permit is released. Closing the gate makes writes fail.
struct GatedStore {
    inner: MemoryStore,
    gate: Arc<Semaphore>,
}

impl GatedStore {
    fn new(inner: &MemoryStore) -> (Arc<Self>, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let store = GatedStore {
            inner: inner.clone(),
            gate: gate.clone(),
        };
        (Arc::new(store), gate)
    }
}

#[async_trait]
impl DocumentStore for GatedStore {
    async fn read(&self, key: &str) -> DuoplanResult<Option<ItineraryDocument>> {
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, document: &ItineraryDocument) -> DuoplanResult<()> {
        self.gate
            .acquire()
            .await
            .map_err(|_| DuoplanError::Store("store is offline".into()))?
            .forget();
        self.inner.write(key, document).await
    }

    async fn subscribe(&self, key: &str) -> DuoplanResult<StoreSubscription> {
        self.inner.subscribe(key).await
    }
}

fn one_day() -> ItineraryDocument {
    ItineraryDocument {
        days: vec![Day::new(
            "sat".to_string(),
            NaiveDate::from_ymd_opt(2026, 10, 24).unwrap(),
        )],
        default_weather_locations: vec![],
    }
}

fn with_event(document: &ItineraryDocument, id: &str) -> ItineraryDocument {
    let event = Event {
        id: id.to_string(),
        time: "10:00".to_string(),
        location: format!("{id} place"),
        kind: EventKind::Activity,
        notes: None,
    };
    mutation::update_day(document, "sat", |day| mutation::add_event(day, event))
}

fn engine(store: Arc<dyn DocumentStore>) -> SyncEngine {
    SyncEngine::new(store, Arc::new(OneDaySeeder::default()))
}

/// Wait until the mirror shows `expected`.
async fn settle(live: &mut LiveItinerary, expected: &ItineraryDocument) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while live.current() != *expected {
            live.changed().await;
        }
    })
    .await
    .expect("mirror never reached the expected document");
}

#[tokio::test]
async fn first_subscriber_seeds_the_store() {
    let store = MemoryStore::new();
    let seeder = Arc::new(OneDaySeeder::default());
    let engine = SyncEngine::new(Arc::new(store.clone()), seeder.clone());

    let first = engine.subscribe("space").await.unwrap();
    assert_eq!(first.current(), one_day());
    assert_eq!(store.read("space").await.unwrap(), Some(one_day()));

    let second = engine.subscribe("space").await.unwrap();
    assert_eq!(second.current(), one_day());
    assert_eq!(seeder.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn local_edit_is_visible_before_the_write_lands() {
    let shared = MemoryStore::new();
    shared.write("space", &one_day()).await.unwrap();
    let (store, gate) = GatedStore::new(&shared);

    let live = engine(store).subscribe("space").await.unwrap();
    let expected = with_event(&one_day(), "a");

    let (result, ()) = tokio::join!(live.mutate(|doc| with_event(doc, "a")), async {
        // The mutation has been applied locally but not yet written
        tokio::task::yield_now().await;
        assert_eq!(live.current(), expected);
        assert_eq!(shared.read("space").await.unwrap(), Some(one_day()));
        gate.add_permits(1);
    });

    result.unwrap();
    assert_eq!(shared.read("space").await.unwrap(), Some(expected));
}

#[tokio::test]
async fn remote_snapshot_replaces_the_mirror() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let engine = engine(store);

    let alice = engine.subscribe("space").await.unwrap();
    let mut bob = engine.subscribe("space").await.unwrap();

    alice.mutate(|doc| with_event(doc, "a")).await.unwrap();
    settle(&mut bob, &with_event(&one_day(), "a")).await;
}

#[tokio::test]
async fn failed_write_keeps_the_local_edit() {
    let shared = MemoryStore::new();
    shared.write("space", &one_day()).await.unwrap();
    let (store, gate) = GatedStore::new(&shared);
    gate.close();

    let live = engine(store).subscribe("space").await.unwrap();
    let result = live.mutate(|doc| with_event(doc, "a")).await;

    assert!(matches!(result, Err(DuoplanError::Store(_))));
    assert_eq!(live.current(), with_event(&one_day(), "a"));
    assert_eq!(shared.read("space").await.unwrap(), Some(one_day()));
}

#[tokio::test]
async fn concurrent_edits_keep_only_the_last_write() {
    let shared = MemoryStore::new();
    shared.write("space", &one_day()).await.unwrap();
    let (alice_store, alice_gate) = GatedStore::new(&shared);
    let (bob_store, bob_gate) = GatedStore::new(&shared);

    let mut alice = engine(alice_store).subscribe("space").await.unwrap();
    let mut bob = engine(bob_store).subscribe("space").await.unwrap();

    let alice_doc = with_event(&one_day(), "a");
    let bob_doc = with_event(&one_day(), "b");

    let (first, second, ()) = tokio::join!(
        alice.mutate(|doc| with_event(doc, "a")),
        bob.mutate(|doc| with_event(doc, "b")),
        async {
            alice_gate.add_permits(1);
            while shared.read("space").await.unwrap().as_ref() != Some(&alice_doc) {
                tokio::task::yield_now().await;
            }
            bob_gate.add_permits(1);
        }
    );
    first.unwrap();
    second.unwrap();

    assert_eq!(shared.read("space").await.unwrap(), Some(bob_doc.clone()));
    settle(&mut alice, &bob_doc).await;
    settle(&mut bob, &bob_doc).await;
    assert!(alice.current().days[0].event("a").is_none());
}

#[tokio::test]
async fn clients_on_separate_file_stores_converge() {
    let dir = tempfile::tempdir().unwrap();
    let poll = Duration::from_millis(20);
    let alice_store = FileStore::new(dir.path()).with_poll_interval(poll);
    let bob_store = FileStore::new(dir.path()).with_poll_interval(poll);

    let alice = engine(Arc::new(alice_store)).subscribe("space").await.unwrap();
    let mut bob = engine(Arc::new(bob_store)).subscribe("space").await.unwrap();
    assert_eq!(bob.current(), one_day());

    alice.mutate(|doc| with_event(doc, "a")).await.unwrap();
    settle(&mut bob, &with_event(&one_day(), "a")).await;
}
