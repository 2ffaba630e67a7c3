//! Single-slot TTL cache for the raw FAQ list.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::source::FaqSource;

#[derive(Clone)]
struct CacheEntry {
    value: Arc<Vec<Value>>,
    expires_at: Instant,
}

/// Holds the last fetched FAQ list until it expires.
///
/// Concurrent misses may each fetch; whichever finishes last wins the slot.
pub struct FaqCache {
    ttl: Duration,
    slot: RwLock<Option<CacheEntry>>,
}

impl FaqCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Returns the cached list while fresh, otherwise refetches from `source`.
    ///
    /// A failed refetch is logged and the previous list (or an empty one) is
    /// returned instead.
    pub async fn get_or_fetch(&self, source: &dyn FaqSource) -> Arc<Vec<Value>> {
        let previous = self.slot.read().await.clone();
        if let Some(entry) = &previous {
            if Instant::now() < entry.expires_at {
                debug!(count = entry.value.len(), "FAQ cache hit");
                return Arc::clone(&entry.value);
            }
        }

        match source.fetch_all().await {
            Ok(list) => {
                let value = Arc::new(list);
                *self.slot.write().await = Some(CacheEntry {
                    value: Arc::clone(&value),
                    expires_at: Instant::now() + self.ttl,
                });
                debug!(count = value.len(), ttl_secs = self.ttl.as_secs(), "FAQ cache refreshed");
                value
            }
            Err(e) => {
                warn!("FAQ source fetch failed, serving previous list: {e}");
                previous.map(|entry| entry.value).unwrap_or_default()
            }
        }
    }
}
