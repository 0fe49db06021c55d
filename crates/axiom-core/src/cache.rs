//! In-memory TTL cache for resolved resources.
//!
//! Entries are JSON snapshots of canonical records. A lookup whose entry has
//! lived for at least its TTL is a miss; the stale entry stays in the map until
//! the next `set` for that key overwrites it or `clear_expired` runs. There is
//! no capacity bound: the key space is the set of symbols and queries a caller
//! actually asks for.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Resource kinds with their own freshness window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Quote,
    Crypto,
    Forex,
    History,
    News,
    Macro,
}

impl ResourceKind {
    pub const ALL: [Self; 6] = [
        Self::Quote,
        Self::Crypto,
        Self::Forex,
        Self::History,
        Self::News,
        Self::Macro,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::Crypto => "crypto",
            Self::Forex => "forex",
            Self::History => "history",
            Self::News => "news",
            Self::Macro => "macro",
        }
    }

    pub const fn default_ttl(self) -> Duration {
        match self {
            Self::Quote | Self::Crypto => Duration::from_secs(60),
            Self::Forex => Duration::from_secs(120),
            Self::History | Self::News => Duration::from_secs(300),
            Self::Macro => Duration::from_secs(3_600),
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Value,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) < self.ttl
    }
}

/// Shared handle to the cache; clones see the same entries.
#[derive(Debug, Clone, Default)]
pub struct TtlCache {
    inner: Arc<tokio::sync::RwLock<HashMap<String, CacheEntry>>>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an owned copy of the value stored under `key` while it is fresh.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let payload = {
            let store = self.inner.read().await;
            let entry = store.get(key)?;
            if !entry.is_fresh(Instant::now()) {
                debug!(key, "cache entry expired");
                return None;
            }
            entry.payload.clone()
        };

        match serde_json::from_value(payload) {
            Ok(value) => {
                debug!(key, "cache hit");
                Some(value)
            }
            Err(error) => {
                warn!(key, %error, "cached payload has an unexpected shape");
                None
            }
        }
    }

    /// Stores a snapshot of `value` and hands the value back to the caller.
    pub async fn set<T: Serialize>(&self, key: impl Into<String>, value: T, ttl: Duration) -> T {
        let key = key.into();
        match serde_json::to_value(&value) {
            Ok(payload) => {
                let entry = CacheEntry {
                    payload,
                    created_at: Instant::now(),
                    ttl,
                };
                debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "cache store");
                self.inner.write().await.insert(key, entry);
            }
            Err(error) => warn!(key = %key, %error, "value not cached"),
        }
        value
    }

    pub async fn clear_expired(&self) {
        let now = Instant::now();
        self.inner.write().await.retain(|_, entry| entry.is_fresh(now));
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    /// Number of entries, including expired ones not yet overwritten.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
