// src/aggregate/cache.rs
// =============================================================================
// A small time-to-live cache for AggregatedUpdates.
//
// The caller creates and owns the cache, so how stale the data may get is a
// visible parameter instead of something implied by process lifetime:
// - ttl = Some(d): a cached value is reused for d, then reloaded
// - ttl = None:    a cached value is reused for as long as the cache lives
//
// Only one load runs at a time. Concurrent callers wait on the same async
// mutex, and once the first load finishes they get its result instead of
// starting their own.
//
// Whatever the loader returns is stored, failed sources included. Callers
// that want a failed source retried on the next round call invalidate().
//
// Rust concepts:
// - tokio::sync::Mutex: an async-aware lock that can be held across .await
// - Generic closures returning futures: F: FnOnce() -> Fut
// =============================================================================

use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::updates::AggregatedUpdates;

struct CachedUpdates {
    value: AggregatedUpdates,
    loaded_at: Instant,
}

pub struct UpdateCache {
    ttl: Option<Duration>,
    slot: Mutex<Option<CachedUpdates>>,
}

impl UpdateCache {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    // Returns the cached aggregate if still fresh, otherwise runs `load`
    //
    // The lock is held for the whole load, which is what keeps concurrent
    // callers from loading twice.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> AggregatedUpdates
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AggregatedUpdates>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if self.is_within_ttl(cached) {
                debug!("serving updates from cache");
                return cached.value.clone();
            }
        }

        debug!("loading updates");
        let value = load().await;

        *slot = Some(CachedUpdates {
            value: value.clone(),
            loaded_at: Instant::now(),
        });

        value
    }

    /// True when a value is cached and has not outlived the TTL.
    pub async fn is_fresh(&self) -> bool {
        let slot = self.slot.lock().await;
        slot.as_ref().map(|c| self.is_within_ttl(c)).unwrap_or(false)
    }

    /// Drops the cached value; the next get_or_load reloads.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }

    fn is_within_ttl(&self, cached: &CachedUpdates) -> bool {
        match self.ttl {
            Some(ttl) => cached.loaded_at.elapsed() < ttl,
            None => true,
        }
    }
}
