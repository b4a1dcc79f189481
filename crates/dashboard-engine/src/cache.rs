//! Keyed TTL cache for fetched inputs. Time comes in through the
//! `Clock` trait so expiry is unit-testable without a network or a
//! real wall clock.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

pub struct TtlCache<K, T> {
    entries: DashMap<K, CacheEntry<T>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K: Eq + Hash, T: Clone> TtlCache<K, T> {
    pub fn new(ttl_secs: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::seconds(ttl_secs),
            clock,
        }
    }

    /// Fresh value for `key`, if any. Expired entries are evicted on
    /// the way out.
    pub fn get(&self, key: &K) -> Option<T> {
        let now = self.clock.now();
        if let Some(entry) = self.entries.get(key) {
            if now - entry.cached_at < self.ttl {
                return Some(entry.data.clone());
            }
        }
        self.entries.remove(key);
        None
    }

    pub fn insert(&self, key: K, data: T) {
        self.entries.insert(
            key,
            CacheEntry {
                data,
                cached_at: self.clock.now(),
            },
        );
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ManualClock;
    use super::*;

    #[test]
    fn entries_expire_after_ttl() {
        let clock = Arc::new(ManualClock::at(Utc::now()));
        let cache: TtlCache<String, u32> = TtlCache::new(3600, clock.clone());

        cache.insert("RELIANCE.NS".to_string(), 7);
        assert_eq!(cache.get(&"RELIANCE.NS".to_string()), Some(7));

        clock.advance(3599);
        assert_eq!(cache.get(&"RELIANCE.NS".to_string()), Some(7));

        clock.advance(2);
        assert_eq!(cache.get(&"RELIANCE.NS".to_string()), None);
    }

    #[test]
    fn distinct_keys_do_not_collide() {
        let clock = Arc::new(ManualClock::at(Utc::now()));
        let cache: TtlCache<(String, u32), u32> = TtlCache::new(60, clock);

        cache.insert(("A".to_string(), 1), 10);
        cache.insert(("A".to_string(), 2), 20);
        assert_eq!(cache.get(&("A".to_string(), 1)), Some(10));
        assert_eq!(cache.get(&("A".to_string(), 2)), Some(20));
        assert_eq!(cache.get(&("B".to_string(), 1)), None);
    }
}
