use actix_web::web::Bytes;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::metrics::PAGE_CACHE_EVENTS;

/// In-process render cache keyed by page identity.
///
/// Entries live for `ttl` from the moment they are written; concurrent writers
/// simply overwrite each other.
pub struct PageCache {
    entries: DashMap<String, CachedPage>,
    ttl: Duration,
}

#[derive(Clone)]
struct CachedPage {
    body: Bytes,
    stored_at: Instant,
}

impl PageCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn from_secs(ttl_secs: u64) -> Self {
        Self::new(Duration::from_secs(ttl_secs))
    }

    /// Key of an index page; `page_number` must already be clamped.
    pub fn index_key(page_number: usize) -> String {
        format!("index:page:{}", page_number)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &str) -> Option<Bytes> {
        let fresh = match self.entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.body.clone()),
            Some(_) => None,
            None => {
                PAGE_CACHE_EVENTS.with_label_values(&["miss"]).inc();
                debug!(key, "page cache MISS");
                return None;
            }
        };

        match fresh {
            Some(body) => {
                PAGE_CACHE_EVENTS.with_label_values(&["hit"]).inc();
                debug!(key, "page cache HIT");
                Some(body)
            }
            None => {
                // Only drop the entry if no fresher write replaced it meanwhile.
                let ttl = self.ttl;
                self.entries
                    .remove_if(key, |_, entry| entry.stored_at.elapsed() >= ttl);
                PAGE_CACHE_EVENTS.with_label_values(&["expired"]).inc();
                debug!(key, "page cache EXPIRED");
                None
            }
        }
    }

    pub fn put(&self, key: impl Into<String>, body: Bytes) {
        let key = key.into();
        self.purge_expired();
        debug!(key = %key, bytes = body.len(), ttl = ?self.ttl, "page cache WRITE");
        self.entries.insert(
            key,
            CachedPage {
                body,
                stored_at: Instant::now(),
            },
        );
    }

    fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    /// Drop every entry; returns how many were removed.
    pub fn clear(&self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        PAGE_CACHE_EVENTS.with_label_values(&["clear"]).inc();
        debug!(removed, "page cache CLEAR");
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
