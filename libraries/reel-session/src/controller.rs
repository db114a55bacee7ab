//! Playback controller - transition orchestration
//!
//! Owns the session and coordinates the loader, shuffle derivation, history
//! recording, render notifications, and the media element. All state mutation
//! happens inside the named transitions below. The session lock is held only
//! for mutation, never across an await or a collaborator call, and every
//! asynchronous resumption re-checks its request token before touching state,
//! so a stale response can never overwrite newer session state.

use crate::error::{Result, SessionError};
use crate::history::{EntryKind, HistoryAdapter, HistoryBackend, HistoryEntry, HistoryMode};
use crate::loader::{LoadError, ResourceLoader};
use crate::media::MediaElement;
use crate::render::Renderer;
use crate::request::{CancelFlag, RequestClass, RequestToken, RequestTokens};
use crate::store::Session;
use crate::types::{
    prefs, Direction, OrderingMode, SearchField, SelectionKind, SessionConfig, SortUpdate,
    UnloadScope,
};
use parking_lot::{Mutex, MutexGuard};
use reel_core::types::{Collection, CollectionId, Item, ItemId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

struct ControllerState {
    session: Session,
    tokens: RequestTokens,
    /// Abort hint for the search currently in flight
    search_cancel: Option<CancelFlag>,
    authenticated: bool,
}

/// Orchestrates session transitions
///
/// Collaborators are injected as trait objects; the controller is the only
/// writer of session state.
pub struct PlaybackController {
    state: Mutex<ControllerState>,
    loader: Arc<dyn ResourceLoader>,
    renderer: Arc<dyn Renderer>,
    media: Arc<dyn MediaElement>,
    history: HistoryAdapter,
}

impl PlaybackController {
    /// Create a controller with an empty session
    pub fn new(
        config: SessionConfig,
        loader: Arc<dyn ResourceLoader>,
        renderer: Arc<dyn Renderer>,
        media: Arc<dyn MediaElement>,
        history: Arc<dyn HistoryBackend>,
    ) -> Self {
        Self {
            state: Mutex::new(ControllerState {
                session: Session::new(&config),
                tokens: RequestTokens::default(),
                search_cancel: None,
                authenticated: config.authenticated,
            }),
            loader,
            renderer,
            media,
            history: HistoryAdapter::new(history),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock()
    }

    /// Read-only view of the session for input adapters and tests
    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.lock().session)
    }

    // ===== Transitions =====

    /// Load a collection and make it current
    ///
    /// An empty result unloads the collection scope instead of loading it.
    pub async fn open_collection(&self, id: &CollectionId, history: HistoryMode) -> Result<()> {
        let (token, sort_key, sort_direction) = {
            let mut state = self.lock();
            let token = state.tokens.issue(RequestClass::Collection);
            (
                token,
                state.session.sort_key(),
                state.session.sort_direction(),
            )
        };
        debug!(id = %id, sort_key = %sort_key, sort_direction = %sort_direction, "loading collection");

        let items = match self
            .loader
            .fetch_collection(id, sort_key, sort_direction)
            .await
        {
            Ok(items) => items,
            Err(error) => return Err(self.fetch_failed(token, error)),
        };

        if items.is_empty() {
            let item_cleared = {
                let mut state = self.lock();
                if !state.tokens.is_current(token) {
                    debug!(id = %id, "discarding superseded collection load");
                    return Err(SessionError::Superseded);
                }
                let had_item = state.session.item().is_some();
                state.session.unload(UnloadScope::Collection);
                had_item && state.session.item().is_none()
            };

            info!(id = %id, "collection came back empty; unloading the scope");
            self.history.record(history, &HistoryEntry::collection(id));
            self.renderer.cleared(UnloadScope::Collection);
            if item_cleared {
                self.media.stop();
                self.renderer.cleared(UnloadScope::Item);
            }
            return Ok(());
        }

        let render_items = {
            let mut state = self.lock();
            if !state.tokens.is_current(token) {
                debug!(id = %id, "discarding superseded collection load");
                return Err(SessionError::Superseded);
            }

            let collection = Collection::new(id.clone(), items);
            let render_items = collection.items.clone();
            state.session.set_collection(collection)?;
            if state.session.ordering() == OrderingMode::Shuffled {
                state.session.derive_shuffled_view(None)?;
            }
            render_items
        };

        self.history.record(history, &HistoryEntry::collection(id));
        self.renderer.collection_changed(id, &render_items);
        self.renderer
            .selection_changed(SelectionKind::Collection, id.as_str(), false);

        Ok(())
    }

    /// Load an item and make it current, resolving its collection as needed
    ///
    /// When the item's collection differs from the loaded one (or none is
    /// loaded), that collection is fetched afterwards without re-fetching the
    /// item; the two fetches are sequential by data dependency.
    pub async fn open_item(&self, id: &ItemId, history: HistoryMode) -> Result<()> {
        let token = self.lock().tokens.issue(RequestClass::Item);
        debug!(id = %id, "loading item");

        let item = match self.loader.fetch_item(id).await {
            Ok(item) => item,
            Err(error) => return Err(self.fetch_failed(token, error)),
        };

        let (needs_collection, autoplay) = {
            let mut state = self.lock();
            if !state.tokens.is_current(token) {
                debug!(id = %id, "discarding superseded item load");
                return Err(SessionError::Superseded);
            }

            let collection_id = item.collection_id.clone();
            let same_collection = state.session.collection_id() == Some(&collection_id);
            state.session.set_item(item.clone());

            (
                (!same_collection).then_some(collection_id),
                state.session.autoplay(),
            )
        };

        self.history.record(history, &HistoryEntry::item(id));
        self.renderer.item_changed(&item);
        self.renderer.selection_changed(
            SelectionKind::Item,
            id.as_str(),
            history != HistoryMode::Push,
        );

        self.media.load(&item);
        if autoplay {
            if self.media.play().is_err() {
                self.renderer.show_manual_play(item.thumbnail.as_deref());
            }
        } else {
            self.renderer.show_manual_play(item.thumbnail.as_deref());
        }

        if let Some(collection_id) = needs_collection {
            // Sequential by data dependency: the collection only became
            // known from the fetched item.
            match self
                .open_collection(&collection_id, HistoryMode::None)
                .await
            {
                Err(SessionError::Superseded) => {}
                other => other?,
            }
        }

        Ok(())
    }

    /// Step to the neighbouring item in the active ordering
    ///
    /// Running off either end unloads the item rather than wrapping. With
    /// nothing loaded at all, falls back to the first rendered collection.
    pub async fn advance(&self, direction: Direction) -> Result<()> {
        enum Step {
            Open(ItemId),
            OffEnd,
            Bootstrap,
        }

        let step = {
            let state = self.lock();
            let session = &state.session;
            if let Some(item) = session.item() {
                let view = session.resolve_ordered_view()?;
                let target = view
                    .index
                    .position(&item.id)
                    .and_then(|position| match direction {
                        Direction::Next => position.checked_add(1),
                        Direction::Previous => position.checked_sub(1),
                    })
                    .and_then(|position| view.items.get(position));
                match target {
                    Some(next) => Step::Open(next.id.clone()),
                    None => Step::OffEnd,
                }
            } else if session.collection().is_some() {
                let view = session.resolve_ordered_view()?;
                let target = match direction {
                    Direction::Next => view.items.first(),
                    Direction::Previous => view.items.last(),
                };
                match target {
                    Some(item) => Step::Open(item.id.clone()),
                    None => Step::OffEnd,
                }
            } else {
                Step::Bootstrap
            }
        };

        match step {
            Step::Open(id) => self.open_item(&id, HistoryMode::Push).await,
            Step::OffEnd => {
                debug!("ran off the end of the ordered view; unloading the item");
                self.unload(UnloadScope::Item);
                Ok(())
            }
            Step::Bootstrap => {
                let Some(first) = self.renderer.first_collection() else {
                    debug!("advance with nothing loaded and no rendered collections");
                    return Ok(());
                };
                self.open_collection(&first, HistoryMode::Push).await?;

                let target = {
                    let state = self.lock();
                    state
                        .session
                        .resolve_ordered_view()
                        .ok()
                        .and_then(|view| match direction {
                            Direction::Next => view.items.first(),
                            Direction::Previous => view.items.last(),
                        })
                        .map(|item| item.id.clone())
                };
                match target {
                    Some(id) => self.open_item(&id, HistoryMode::Push).await,
                    None => Ok(()),
                }
            }
        }
    }

    /// Open the clicked list row
    ///
    /// Clicking an item while shuffled re-pins the draw at that item; plain
    /// next/previous navigation keeps walking the existing view instead.
    pub async fn select_and_load(&self, kind: SelectionKind, id: &str) -> Result<()> {
        match kind {
            SelectionKind::Collection => {
                self.open_collection(&CollectionId::new(id), HistoryMode::Push)
                    .await
            }
            SelectionKind::Item => {
                let item_id = ItemId::new(id);
                self.open_item(&item_id, HistoryMode::Push).await?;

                let mut state = self.lock();
                if state.session.ordering() == OrderingMode::Shuffled
                    && state.session.collection_id().is_some()
                {
                    match state.session.derive_shuffled_view(Some(&item_id)) {
                        Err(SessionError::NotFound(_)) => {
                            warn!(id = %item_id, "clicked item missing from the loaded listing; deriving unpinned");
                            state.session.derive_shuffled_view(None)?;
                        }
                        other => other?,
                    }
                }
                Ok(())
            }
        }
    }

    /// Replay a popped history entry; `None` clears both scopes
    pub async fn history_popped(&self, entry: Option<HistoryEntry>) -> Result<()> {
        match entry {
            Some(entry) => {
                debug!(path = %entry.path(), "replaying popped history entry");
                match entry.kind {
                    EntryKind::Collection => {
                        self.unload(UnloadScope::Item);
                        self.open_collection(&CollectionId::new(&entry.id), HistoryMode::None)
                            .await
                    }
                    EntryKind::Item => {
                        self.open_item(&ItemId::new(&entry.id), HistoryMode::None)
                            .await
                    }
                }
            }
            None => {
                self.unload(UnloadScope::Item);
                self.unload(UnloadScope::Collection);
                Ok(())
            }
        }
    }

    /// Flip the ordering preference; turning shuffle on with a collection
    /// loaded derives the view immediately
    pub async fn toggle_shuffle(&self) -> Result<()> {
        let ordering = {
            let mut state = self.lock();
            let next = match state.session.ordering() {
                OrderingMode::Natural => OrderingMode::Shuffled,
                OrderingMode::Shuffled => OrderingMode::Natural,
            };
            state.session.set_ordering(next);
            if next == OrderingMode::Shuffled && state.session.collection().is_some() {
                state.session.derive_shuffled_view(None)?;
            }
            next
        };
        info!(ordering = ordering.as_str(), "ordering mode toggled");
        self.persist(prefs::ORDERING, ordering.as_str()).await;
        Ok(())
    }

    /// Change sort key or direction and reload the collection in the new
    /// order
    ///
    /// The listing is replaced wholesale; history is corrected in place since
    /// the navigable state has not changed.
    pub async fn change_sort(&self, update: SortUpdate) -> Result<()> {
        let current = {
            let mut state = self.lock();
            let id = state
                .session
                .collection_id()
                .cloned()
                .ok_or(SessionError::InvalidState("no collection loaded to re-sort"))?;
            state.session.apply_sort(update);
            id
        };

        match update {
            SortUpdate::Key(key) => {
                self.persist(prefs::SORT_KEY, key.as_str()).await;
            }
            SortUpdate::Direction(direction) => {
                self.persist(prefs::SORT_DIRECTION, direction.as_str()).await;
            }
        }

        self.open_collection(&current, HistoryMode::Replace).await
    }

    /// Set the autoplay preference
    pub async fn set_autoplay(&self, enabled: bool) {
        self.lock().session.set_autoplay(enabled);
        self.persist(prefs::AUTOPLAY, if enabled { "true" } else { "false" })
            .await;
    }

    /// Clear the named scope and show its placeholder
    pub fn unload(&self, scope: UnloadScope) {
        let item_cleared = {
            let mut state = self.lock();
            let had_item = state.session.item().is_some();
            state.session.unload(scope);
            had_item && state.session.item().is_none()
        };

        if item_cleared {
            self.media.stop();
        }
        self.renderer.cleared(scope);
        if scope == UnloadScope::Collection && item_cleared {
            self.renderer.cleared(UnloadScope::Item);
        }
    }

    /// Search item metadata; stale responses are discarded
    ///
    /// Results go back to the caller and never into the session. Issuing a
    /// new search trips the previous request's cancellation flag.
    pub async fn search(&self, field: SearchField, query: &str) -> Result<Vec<Item>> {
        let (token, cancel) = {
            let mut state = self.lock();
            if let Some(previous) = state.search_cancel.take() {
                previous.cancel();
            }
            let cancel = CancelFlag::new();
            state.search_cancel = Some(cancel.clone());
            (state.tokens.issue(RequestClass::Search), cancel)
        };
        debug!(field = field.as_str(), query, "searching");

        let results = match self.loader.fetch_search(field, query, cancel).await {
            Ok(results) => results,
            Err(error) => return Err(self.fetch_failed(token, error)),
        };

        if !self.lock().tokens.is_current(token) {
            debug!("discarding superseded search results");
            return Err(SessionError::Superseded);
        }
        Ok(results)
    }

    // ===== Media passthroughs =====

    /// Attempt to start playback, falling back to the manual control when the
    /// host blocks it
    pub fn play(&self) {
        if self.media.play().is_err() {
            let poster = self.read(|session| {
                session.item().and_then(|item| item.thumbnail.clone())
            });
            self.renderer.show_manual_play(poster.as_deref());
        }
    }

    /// Pause playback
    pub fn pause(&self) {
        self.media.pause();
    }

    /// Seek relative to the current position, in seconds
    pub fn seek_by(&self, seconds: f64) {
        self.media.seek_by(seconds);
    }

    /// Seek to an absolute position
    pub fn seek_to(&self, position: Duration) {
        self.media.seek_to(position);
    }

    /// Stop playback and unload the current item
    pub fn stop(&self) {
        self.unload(UnloadScope::Item);
    }

    // ===== Internal =====

    /// Resolve a failed fetch against its token: a superseded failure is
    /// silently dropped, a current one surfaces as a transient message
    fn fetch_failed(&self, token: RequestToken, error: LoadError) -> SessionError {
        if !self.lock().tokens.is_current(token) {
            debug!(class = ?token.class(), "discarding a superseded fetch failure");
            return SessionError::Superseded;
        }
        warn!(error = %error, "resource load failed");
        self.renderer.load_failed(&error.to_string());
        SessionError::LoadFailed(error)
    }

    /// Best-effort preference write; unauthenticated sessions keep
    /// preferences in memory only
    async fn persist(&self, name: &str, value: &str) {
        if !self.lock().authenticated {
            return;
        }
        if let Err(error) = self.loader.persist_preference(name, value).await {
            warn!(name, error = %error, "failed to persist preference");
        }
    }
}
