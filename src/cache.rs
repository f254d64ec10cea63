//! Per-show episode memoization with request de-duplication.
//!
//! Episode lists are fetched at most once per show and kept for the rest of
//! the session. While a fetch is in flight, other callers asking for the same
//! show wait on it instead of issuing their own request.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::types::{Episode, ShowId};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Immutable episode list shared between the cache and its readers.
pub type EpisodeList = Arc<[Episode]>;

/// Outcome slot of an in-flight fetch. `None` until the fetch resolves.
type Outcome = Option<Result<EpisodeList>>;

enum Claim {
    Lead(watch::Sender<Outcome>),
    Wait(watch::Receiver<Outcome>),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Removes the pending entry when the leading fetch finishes or is dropped.
struct PendingGuard<'a> {
    pending: &'a Mutex<HashMap<ShowId, watch::Receiver<Outcome>>>,
    show_id: ShowId,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        lock(self.pending).remove(&self.show_id);
    }
}

/// Unbounded episode cache in front of a [`Catalog`].
///
/// Entries are never evicted or invalidated; catalog data is treated as
/// immutable for the lifetime of the session.
pub struct EpisodeCache<C> {
    catalog: C,
    entries: Mutex<HashMap<ShowId, EpisodeList>>,
    pending: Mutex<HashMap<ShowId, watch::Receiver<Outcome>>>,
}

impl<C: Catalog> EpisodeCache<C> {
    /// Create an empty cache over `catalog`.
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            entries: Mutex::new(HashMap::new()),
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// The catalog this cache fetches from.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Cached episodes for `show_id`, without fetching.
    pub fn get(&self, show_id: ShowId) -> Option<EpisodeList> {
        lock(&self.entries).get(&show_id).cloned()
    }

    /// Store a snapshot for `show_id`, replacing any previous one.
    pub fn put(&self, show_id: ShowId, episodes: EpisodeList) {
        lock(&self.entries).insert(show_id, episodes);
    }

    /// Number of shows with cached episodes.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return cached episodes, fetching them once if needed.
    ///
    /// Concurrent calls for the same show share a single request and all
    /// receive its outcome. A failed fetch is not cached, so the next call
    /// tries again.
    pub async fn load_episodes(&self, show_id: ShowId) -> Result<EpisodeList> {
        loop {
            let claim = {
                let mut pending = lock(&self.pending);
                if let Some(hit) = self.get(show_id) {
                    debug!("Episode cache hit for show {}", show_id);
                    return Ok(hit);
                }
                match pending.get(&show_id) {
                    Some(rx) => Claim::Wait(rx.clone()),
                    None => {
                        let (tx, rx) = watch::channel(None);
                        pending.insert(show_id, rx);
                        Claim::Lead(tx)
                    }
                }
            };

            match claim {
                Claim::Lead(tx) => return self.lead_fetch(show_id, tx).await,
                Claim::Wait(mut rx) => {
                    debug!("Joining in-flight episode fetch for show {}", show_id);
                    let resolved = match rx.wait_for(Option::is_some).await {
                        Ok(outcome) => (*outcome).clone(),
                        Err(_) => {
                            // Leader was dropped before resolving; take over.
                            debug!("Episode fetch for show {} was abandoned", show_id);
                            None
                        }
                    };
                    if let Some(result) = resolved {
                        return result;
                    }
                }
            }
        }
    }

    async fn lead_fetch(&self, show_id: ShowId, tx: watch::Sender<Outcome>) -> Result<EpisodeList> {
        let guard = PendingGuard {
            pending: &self.pending,
            show_id,
        };

        let result = self
            .catalog
            .fetch_episodes(show_id)
            .await
            .map(EpisodeList::from);

        match &result {
            Ok(episodes) => self.put(show_id, Arc::clone(episodes)),
            Err(e) => warn!("Failed to load episodes for show {}: {}", show_id, e),
        }

        drop(guard);
        tx.send_replace(Some(result.clone()));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::types::Show;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn episode(id: u64) -> Episode {
        Episode {
            id,
            name: format!("Episode {}", id),
            season: 1,
            number: id as u32,
            url: String::new(),
            summary: String::new(),
            image_url: None,
        }
    }

    struct CountingCatalog {
        calls: AtomicUsize,
        fail_first: bool,
    }

    impl Catalog for CountingCatalog {
        async fn fetch_shows(&self) -> Result<Vec<Show>> {
            Ok(Vec::new())
        }

        async fn fetch_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail_first && call == 0 {
                return Err(AppError::Network("HTTP 500".to_string()));
            }
            Ok(vec![episode(show_id * 10), episode(show_id * 10 + 1)])
        }
    }

    fn cache(fail_first: bool) -> EpisodeCache<CountingCatalog> {
        EpisodeCache::new(CountingCatalog {
            calls: AtomicUsize::new(0),
            fail_first,
        })
    }

    #[test]
    fn test_get_on_empty_cache() {
        let cache = cache(false);
        assert!(cache.get(1).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_then_get() {
        let cache = cache(false);
        cache.put(5, EpisodeList::from(vec![episode(1)]));
        assert_eq!(cache.get(5).unwrap().len(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_second_load_is_served_from_cache() {
        let cache = cache(false);
        let first = cache.load_episodes(3).await.unwrap();
        let second = cache.load_episodes(3).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.catalog().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_request() {
        let cache = cache(false);
        let (a, b) = tokio::join!(cache.load_episodes(82), cache.load_episodes(82));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(cache.catalog().calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_concurrent_failure_reaches_every_caller() {
        let cache = cache(true);
        let (a, b) = tokio::join!(cache.load_episodes(82), cache.load_episodes(82));
        assert!(matches!(a, Err(AppError::Network(_))));
        assert!(matches!(b, Err(AppError::Network(_))));
        assert_eq!(cache.catalog().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let cache = cache(true);
        assert!(cache.load_episodes(82).await.is_err());
        assert!(cache.get(82).is_none());

        let retried = cache.load_episodes(82).await.unwrap();
        assert_eq!(retried.len(), 2);
        assert_eq!(cache.catalog().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_dropped_leader_releases_pending_entry() {
        let cache = cache(false);
        let abandoned =
            tokio::time::timeout(Duration::from_millis(1), cache.load_episodes(7)).await;
        assert!(abandoned.is_err());
        assert!(lock(&cache.pending).is_empty());

        let episodes = cache.load_episodes(7).await.unwrap();
        assert_eq!(episodes[0].id, 70);
    }
}
