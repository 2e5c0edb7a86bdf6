//! Process-local TTL cache.
//!
//! A single map from string keys to values with an absolute expiry timestamp.
//! Expired entries are evicted lazily on the next read; there is no background
//! sweep. The key space in practice is one key per GitHub username, so
//! unbounded growth is not a concern. A construction-time flag disables the
//! cache entirely, which forces live upstream calls in environments that need
//! them (tests, local development against fresh data).

use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

struct CacheEntry<T> {
    value: T,
    expires_at: DateTime<Utc>,
}

/// In-memory cache with per-entry time-to-live.
///
/// Reads at or after the expiry instant are misses and remove the entry from
/// the backing map. Writes with a zero TTL therefore succeed but are already
/// expired on the very next read.
pub struct TtlCache<T, C>
where
    C: Clock,
{
    entries: Arc<RwLock<HashMap<String, CacheEntry<T>>>>,
    default_ttl: Duration,
    enabled: bool,
    clock: Arc<C>,
}

impl<T, C> TtlCache<T, C>
where
    T: Clone,
    C: Clock,
{
    /// Creates a cache with the given default TTL.
    ///
    /// A disabled cache never stores anything: `get` always misses and `set`
    /// is a no-op.
    #[must_use]
    pub fn new(default_ttl: Duration, enabled: bool, clock: Arc<C>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
            enabled,
            clock,
        }
    }

    /// Returns the cached value for `key` when present and not yet expired.
    ///
    /// An expired entry is removed from the backing map before returning
    /// `None`.
    pub fn get(&self, key: &str) -> Option<T> {
        if !self.enabled {
            return None;
        }
        let Ok(mut entries) = self.entries.write() else {
            return None;
        };
        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => self.clock.utc() >= entry.expires_at,
        };
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Stores `value` under `key` with the default TTL.
    pub fn set(&self, key: impl Into<String>, value: T) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Stores `value` under `key`, expiring `ttl` from now.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: T, ttl: Duration) {
        if !self.enabled {
            return;
        }
        let Ok(mut entries) = self.entries.write() else {
            return;
        };
        entries.insert(
            key.into(),
            CacheEntry {
                value,
                expires_at: self.clock.utc() + ttl,
            },
        );
    }

    /// Returns the number of live-or-stale entries in the backing map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns `true` when the backing map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::TtlCache;
    use chrono::{DateTime, Duration, Local, Utc};
    use mockable::Clock;
    use std::sync::{Arc, RwLock};

    /// Manually advanced clock for deterministic expiry tests.
    struct FakeClock {
        now: RwLock<DateTime<Utc>>,
    }

    impl FakeClock {
        fn at(now: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self {
                now: RwLock::new(now),
            })
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.write().expect("clock lock");
            *now = *now + by;
        }
    }

    impl Clock for FakeClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.now.read().expect("clock lock")
        }
    }

    fn epoch() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
    }

    #[test]
    fn get_returns_value_before_expiry() {
        let clock = FakeClock::at(epoch());
        let cache = TtlCache::new(Duration::minutes(10), true, clock.clone());

        cache.set("gh:octocat:last5", 42);
        clock.advance(Duration::minutes(9));

        assert_eq!(cache.get("gh:octocat:last5"), Some(42));
    }

    #[test]
    fn get_misses_at_exact_expiry_and_evicts_the_key() {
        let clock = FakeClock::at(epoch());
        let cache = TtlCache::new(Duration::minutes(10), true, clock.clone());

        cache.set("gh:octocat:last5", 42);
        clock.advance(Duration::minutes(10));

        assert_eq!(cache.get("gh:octocat:last5"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_ttl_write_succeeds_but_next_read_misses() {
        let clock = FakeClock::at(epoch());
        let cache = TtlCache::new(Duration::minutes(10), true, clock);

        cache.set_with_ttl("key", 1, Duration::zero());

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("key"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn explicit_ttl_overrides_the_default() {
        let clock = FakeClock::at(epoch());
        let cache = TtlCache::new(Duration::minutes(10), true, clock.clone());

        cache.set_with_ttl("key", 1, Duration::seconds(30));
        clock.advance(Duration::seconds(29));
        assert_eq!(cache.get("key"), Some(1));

        clock.advance(Duration::seconds(1));
        assert_eq!(cache.get("key"), None);
    }

    #[test]
    fn disabled_cache_never_stores_or_returns() {
        let clock = FakeClock::at(epoch());
        let cache = TtlCache::new(Duration::minutes(10), false, clock);

        cache.set("key", 1);

        assert_eq!(cache.get("key"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn overwriting_a_key_refreshes_its_expiry() {
        let clock = FakeClock::at(epoch());
        let cache = TtlCache::new(Duration::minutes(10), true, clock.clone());

        cache.set("key", 1);
        clock.advance(Duration::minutes(9));
        cache.set("key", 2);
        clock.advance(Duration::minutes(9));

        assert_eq!(cache.get("key"), Some(2));
    }
}
