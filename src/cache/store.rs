use crate::api::PropertyApi;
use crate::errors::{ApiError, ApiResult};
use crate::models::{Property, PropertyId};
use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct CacheState {
    /// `None` until the first successful fetch
    properties: Option<Vec<Property>>,
    fetched_at: Option<DateTime<Utc>>,
    last_error: Option<ApiError>,
    invalidated: bool,
    /// Bumped to cancel fetches that are still in flight
    generation: u64,
}

/// Copy of the cached collection taken before a mutation patches it
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    properties: Option<Vec<Property>>,
}

impl Snapshot {
    pub fn properties(&self) -> Option<&[Property]> {
        self.properties.as_deref()
    }
}

/// Proof that a list fetch was started; stale once fetches are cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// Session cache of the property collection.
///
/// Cheap to clone; clones share the same cache. The application root owns
/// one and hands clones to whatever needs to read or patch the list.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    inner: Arc<RwLock<CacheState>>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached collection, or `None` if nothing has been loaded yet
    pub fn properties(&self) -> Option<Vec<Property>> {
        self.read().properties.clone()
    }

    /// Borrow the cached collection (empty if not loaded)
    pub fn with_properties<R>(&self, f: impl FnOnce(&[Property]) -> R) -> R {
        let state = self.read();
        f(state.properties.as_deref().unwrap_or(&[]))
    }

    pub fn is_loaded(&self) -> bool {
        self.read().properties.is_some()
    }

    /// Error of the most recent fetch, cleared by the next successful one
    pub fn last_error(&self) -> Option<ApiError> {
        self.read().last_error.clone()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.read().fetched_at
    }

    /// Whether the list should be fetched again
    pub fn is_stale(&self, now: DateTime<Utc>, stale_after: Duration) -> bool {
        let state = self.read();
        if state.invalidated {
            return true;
        }
        match state.fetched_at {
            None => true,
            // an age too large for chrono never expires
            Some(at) => chrono::Duration::from_std(stale_after)
                .map_or(false, |max_age| now.signed_duration_since(at) >= max_age),
        }
    }

    /// Mark the cached list as out of date without dropping it
    pub fn invalidate(&self) {
        self.write().invalidated = true;
    }

    /// Replace the cached collection outright
    pub fn set_properties(&self, properties: Vec<Property>) {
        self.write().properties = Some(properties);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            properties: self.read().properties.clone(),
        }
    }

    /// Put the collection back exactly as it was when `snapshot` was taken
    pub fn restore(&self, snapshot: Snapshot) {
        self.write().properties = snapshot.properties;
    }

    /// Drop the listing with `id`; true if it was cached
    pub fn remove(&self, id: &PropertyId) -> bool {
        let mut state = self.write();
        let Some(properties) = state.properties.as_mut() else {
            return false;
        };
        let before = properties.len();
        properties.retain(|p| &p.id != id);
        properties.len() != before
    }

    /// Replace the cached listing with the same id; true if one was found
    pub fn replace(&self, property: Property) -> bool {
        let mut state = self.write();
        let slot = state
            .properties
            .as_mut()
            .and_then(|properties| properties.iter_mut().find(|p| p.id == property.id));
        match slot {
            Some(slot) => {
                *slot = property;
                true
            }
            None => false,
        }
    }

    /// Replace the listing with the same id, or append it
    pub fn upsert(&self, property: Property) {
        if !self.replace(property.clone()) {
            self.write()
                .properties
                .get_or_insert_with(Vec::new)
                .push(property);
        }
    }

    pub fn begin_fetch(&self) -> FetchTicket {
        FetchTicket {
            generation: self.read().generation,
        }
    }

    /// Make every fetch started so far land nowhere
    pub fn cancel_fetches(&self) {
        let mut state = self.write();
        state.generation += 1;
        debug!(generation = state.generation, "cancelled in-flight fetches");
    }

    /// Store the outcome of a fetch. Returns false if the fetch was cancelled
    /// after it started, in which case the cache is left untouched.
    pub fn finish_fetch(&self, ticket: FetchTicket, result: ApiResult<Vec<Property>>) -> bool {
        let mut state = self.write();
        if ticket.generation != state.generation {
            debug!("dropping result of cancelled fetch");
            return false;
        }
        match result {
            Ok(properties) => {
                state.properties = Some(properties);
                state.fetched_at = Some(Utc::now());
                state.last_error = None;
                state.invalidated = false;
            }
            Err(err) => {
                state.last_error = Some(err);
            }
        }
        true
    }

    /// Fetch the authoritative collection into the cache
    pub async fn refresh(&self, api: &dyn PropertyApi) -> ApiResult<()> {
        let ticket = self.begin_fetch();
        debug!(endpoint = api.endpoint(), "refreshing property list");

        let result = api.list().await;
        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
        let count = result.as_ref().map(Vec::len).unwrap_or(0);

        if self.finish_fetch(ticket, result) {
            match &outcome {
                Ok(()) => info!("Loaded {} properties", count),
                Err(err) => warn!(error = %err, "property list fetch failed"),
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::tests::listing;

    fn loaded(ids: &[&str]) -> PropertyStore {
        let store = PropertyStore::new();
        store.set_properties(ids.iter().map(|id| listing(id, Some(1000.0), Some(500))).collect());
        store
    }

    fn cached_ids(store: &PropertyStore) -> Vec<String> {
        store.with_properties(|ps| ps.iter().map(|p| p.id.to_string()).collect())
    }

    #[test]
    fn remove_and_restore() {
        let store = loaded(&["5", "7"]);
        let snapshot = store.snapshot();

        assert!(store.remove(&PropertyId::new("5")));
        assert!(!store.remove(&PropertyId::new("5")));
        assert_eq!(cached_ids(&store), ["7"]);

        store.restore(snapshot.clone());
        assert_eq!(cached_ids(&store), ["5", "7"]);
        assert_eq!(store.snapshot(), snapshot);
    }

    #[test]
    fn restoring_an_unloaded_snapshot_unloads() {
        let store = PropertyStore::new();
        let snapshot = store.snapshot();
        store.upsert(listing("1", None, None));
        assert!(store.is_loaded());

        store.restore(snapshot);
        assert!(!store.is_loaded());
    }

    #[test]
    fn replace_keeps_position_and_upsert_appends() {
        let store = loaded(&["a", "b", "c"]);
        let mut changed = listing("b", Some(5000.0), None);
        changed.address = "changed".to_string();

        assert!(store.replace(changed));
        assert!(!store.replace(listing("z", None, None)));
        let cached = store.properties().unwrap();
        assert_eq!(cached[1].address, "changed");
        assert_eq!(cached.len(), 3);

        store.upsert(listing("d", None, None));
        assert_eq!(cached_ids(&store), ["a", "b", "c", "d"]);
    }

    #[test]
    fn cancelled_fetch_does_not_overwrite_cache() {
        let store = loaded(&["5", "7"]);
        let ticket = store.begin_fetch();

        store.cancel_fetches();
        store.remove(&PropertyId::new("5"));

        let landed = store.finish_fetch(ticket, Ok(vec![listing("5", None, None), listing("7", None, None)]));
        assert!(!landed);
        assert_eq!(cached_ids(&store), ["7"]);
    }

    #[test]
    fn fetch_errors_are_kept_until_the_next_success() {
        let store = PropertyStore::new();
        let ticket = store.begin_fetch();
        store.finish_fetch(ticket, Err(ApiError::network("Failed to fetch properties")));
        assert_eq!(
            store.last_error(),
            Some(ApiError::network("Failed to fetch properties"))
        );
        assert!(!store.is_loaded());

        let ticket = store.begin_fetch();
        store.finish_fetch(ticket, Ok(vec![]));
        assert_eq!(store.last_error(), None);
        assert!(store.is_loaded());
    }

    #[test]
    fn staleness_follows_fetch_age_and_invalidation() {
        let store = PropertyStore::new();
        let five_minutes = Duration::from_secs(300);
        assert!(store.is_stale(Utc::now(), five_minutes));

        let ticket = store.begin_fetch();
        store.finish_fetch(ticket, Ok(vec![]));
        let fetched = store.fetched_at().unwrap();

        assert!(!store.is_stale(fetched + chrono::Duration::seconds(299), five_minutes));
        assert!(store.is_stale(fetched + chrono::Duration::seconds(300), five_minutes));

        store.invalidate();
        assert!(store.is_stale(fetched, five_minutes));
    }
}
