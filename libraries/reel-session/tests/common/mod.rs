//! Shared test doubles for the session integration tests

use async_trait::async_trait;
use parking_lot::Mutex;
use reel_core::types::{CollectionId, Item, ItemId, SortDirection, SortKey};
use reel_session::{
    AutoplayBlocked, CancelFlag, HistoryBackend, HistoryEntry, LoadError, LoadResult,
    MediaElement, PlaybackController, Renderer, ResourceLoader, SearchField, SelectionKind,
    SessionConfig, ThumbFormat, UnloadScope,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

pub fn item(id: &str, collection: &str, position: u32) -> Item {
    let mut item = Item::new(
        ItemId::new(id),
        CollectionId::new(collection),
        position,
        format!("Item {}", id),
        format!("/media/{}.webm", id),
    );
    item.thumbnail = Some(format!("/thumbs/{}.webp", id));
    item
}

/// In-memory loader
///
/// Individual fetches can be gated to control resolution order in race
/// tests, or marked to fail once.
#[derive(Default)]
pub struct StubLoader {
    items: Mutex<HashMap<String, Item>>,
    collections: Mutex<HashMap<String, Vec<Item>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    failures: Mutex<HashSet<String>>,
    pub calls: Mutex<Vec<String>>,
    pub search_results: Mutex<Vec<Item>>,
    pub search_cancels: Mutex<Vec<CancelFlag>>,
    pub preferences: Mutex<Vec<(String, String)>>,
}

impl StubLoader {
    pub fn put_collection(&self, id: &str, items: Vec<Item>) {
        let mut known = self.items.lock();
        for item in &items {
            known.insert(item.id.as_str().to_string(), item.clone());
        }
        drop(known);
        self.collections.lock().insert(id.to_string(), items);
    }

    /// Make the fetch identified by `key` (e.g. `"item:42"`) fail once
    pub fn fail_once(&self, key: &str) {
        self.failures.lock().insert(key.to_string());
    }

    /// Gate the fetch identified by `key`: it will not resolve until the
    /// returned handle is notified
    pub fn gate(&self, key: &str) -> Arc<Notify> {
        self.gates
            .lock()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Notify::new()))
            .clone()
    }

    async fn wait_gate(&self, key: &str) {
        let gate = self.gates.lock().get(key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn should_fail(&self, key: &str) -> bool {
        self.failures.lock().remove(key)
    }
}

#[async_trait]
impl ResourceLoader for StubLoader {
    async fn fetch_collection(
        &self,
        id: &CollectionId,
        sort_key: SortKey,
        sort_direction: SortDirection,
    ) -> LoadResult<Vec<Item>> {
        let key = format!("collection:{}", id);
        self.calls.lock().push(format!(
            "{}?sort={}&direction={}",
            key,
            sort_key.as_str(),
            sort_direction.as_str()
        ));
        self.wait_gate(&key).await;
        if self.should_fail(&key) {
            return Err(LoadError::new("collection fetch failed"));
        }
        self.collections
            .lock()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| LoadError::new(format!("no collection {}", id)))
    }

    async fn fetch_item(&self, id: &ItemId) -> LoadResult<Item> {
        let key = format!("item:{}", id);
        self.calls.lock().push(key.clone());
        self.wait_gate(&key).await;
        if self.should_fail(&key) {
            return Err(LoadError::new("item fetch failed"));
        }
        self.items
            .lock()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| LoadError::new(format!("no item {}", id)))
    }

    async fn fetch_search(
        &self,
        field: SearchField,
        query: &str,
        cancel: CancelFlag,
    ) -> LoadResult<Vec<Item>> {
        let key = format!("search:{}:{}", field.as_str(), query);
        self.calls.lock().push(key.clone());
        self.search_cancels.lock().push(cancel.clone());
        self.wait_gate(&key).await;
        if cancel.is_cancelled() {
            return Err(LoadError::new("search cancelled"));
        }
        Ok(self.search_results.lock().clone())
    }

    async fn fetch_thumbnails(
        &self,
        ids: &[ItemId],
        _format: ThumbFormat,
    ) -> LoadResult<HashMap<ItemId, Vec<u8>>> {
        Ok(ids.iter().map(|id| (id.clone(), vec![0u8; 4])).collect())
    }

    async fn persist_preference(&self, name: &str, value: &str) -> LoadResult<()> {
        self.preferences
            .lock()
            .push((name.to_string(), value.to_string()));
        Ok(())
    }
}

/// Everything the renderer was told, in order
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    CollectionChanged { id: String, count: usize },
    ItemChanged { id: String },
    SelectionChanged {
        kind: SelectionKind,
        id: String,
        scroll_into_view: bool,
    },
    Cleared(UnloadScope),
    LoadFailed(String),
    ManualPlay(Option<String>),
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub events: Mutex<Vec<RenderEvent>>,
    /// Rows the sidebar currently shows; feeds `first_collection`
    pub rendered_collections: Mutex<Vec<CollectionId>>,
}

impl RecordingRenderer {
    pub fn contains(&self, event: &RenderEvent) -> bool {
        self.events.lock().iter().any(|seen| seen == event)
    }
}

impl Renderer for RecordingRenderer {
    fn collection_changed(&self, id: &CollectionId, items: &[Item]) {
        self.events.lock().push(RenderEvent::CollectionChanged {
            id: id.as_str().to_string(),
            count: items.len(),
        });
    }

    fn item_changed(&self, item: &Item) {
        self.events.lock().push(RenderEvent::ItemChanged {
            id: item.id.as_str().to_string(),
        });
    }

    fn selection_changed(&self, kind: SelectionKind, id: &str, scroll_into_view: bool) {
        self.events.lock().push(RenderEvent::SelectionChanged {
            kind,
            id: id.to_string(),
            scroll_into_view,
        });
    }

    fn cleared(&self, scope: UnloadScope) {
        self.events.lock().push(RenderEvent::Cleared(scope));
    }

    fn load_failed(&self, message: &str) {
        self.events
            .lock()
            .push(RenderEvent::LoadFailed(message.to_string()));
    }

    fn show_manual_play(&self, poster: Option<&str>) {
        self.events
            .lock()
            .push(RenderEvent::ManualPlay(poster.map(str::to_string)));
    }

    fn first_collection(&self) -> Option<CollectionId> {
        self.rendered_collections.lock().first().cloned()
    }
}

#[derive(Default)]
pub struct StubMedia {
    pub loaded: Mutex<Vec<String>>,
    pub block_autoplay: Mutex<bool>,
    pub playing: Mutex<bool>,
    pub stop_count: Mutex<u32>,
    pub seeks: Mutex<Vec<f64>>,
}

impl MediaElement for StubMedia {
    fn load(&self, item: &Item) {
        self.loaded.lock().push(item.id.as_str().to_string());
    }

    fn play(&self) -> Result<(), AutoplayBlocked> {
        if *self.block_autoplay.lock() {
            Err(AutoplayBlocked)
        } else {
            *self.playing.lock() = true;
            Ok(())
        }
    }

    fn pause(&self) {
        *self.playing.lock() = false;
    }

    fn seek_by(&self, seconds: f64) {
        self.seeks.lock().push(seconds);
    }

    fn seek_to(&self, position: Duration) {
        self.seeks.lock().push(position.as_secs_f64());
    }

    fn stop(&self) {
        *self.playing.lock() = false;
        *self.stop_count.lock() += 1;
    }
}

#[derive(Default)]
pub struct StubHistory {
    pub ops: Mutex<Vec<(&'static str, HistoryEntry, String)>>,
}

impl StubHistory {
    pub fn count(&self) -> usize {
        self.ops.lock().len()
    }
}

impl HistoryBackend for StubHistory {
    fn push(&self, entry: &HistoryEntry, path: &str) {
        self.ops
            .lock()
            .push(("push", entry.clone(), path.to_string()));
    }

    fn replace(&self, entry: &HistoryEntry, path: &str) {
        self.ops
            .lock()
            .push(("replace", entry.clone(), path.to_string()));
    }
}

pub struct Harness {
    pub controller: Arc<PlaybackController>,
    pub loader: Arc<StubLoader>,
    pub renderer: Arc<RecordingRenderer>,
    pub media: Arc<StubMedia>,
    pub history: Arc<StubHistory>,
}

pub fn harness(config: SessionConfig) -> Harness {
    let loader = Arc::new(StubLoader::default());
    let renderer = Arc::new(RecordingRenderer::default());
    let media = Arc::new(StubMedia::default());
    let history = Arc::new(StubHistory::default());
    let controller = Arc::new(PlaybackController::new(
        config,
        loader.clone(),
        renderer.clone(),
        media.clone(),
        history.clone(),
    ));

    Harness {
        controller,
        loader,
        renderer,
        media,
        history,
    }
}
