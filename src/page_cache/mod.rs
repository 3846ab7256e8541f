use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use spdlog::{debug, error, info};
use tokio::task::JoinHandle;

use crate::error::BlogResult;

pub mod file;
pub mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expire {
    Never,
    After(Duration),
}

impl Expire {
    /// Lifetimes too long for a `Duration` never expire.
    pub fn after_secs(secs: i64) -> Self {
        match Duration::try_seconds(secs) {
            Some(duration) => Expire::After(duration),
            None => Expire::Never,
        }
    }

    pub fn expire_date(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Expire::Never => DateTime::<Utc>::MAX_UTC,
            Expire::After(duration) => now.checked_add_signed(*duration).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

/// Key/value store for fully rendered pages with per entry expiry.
///
/// Implementations are shared by every in-flight request and must keep
/// `get` and `set` atomic per key.
pub trait PageCache: Send + Sync {
    fn get(&self, key: &str) -> BlogResult<Option<String>>;

    /// Stores `value` under `key`, replacing whatever was there.
    fn set(&self, key: &str, value: &str, expire: Expire) -> BlogResult<()>;

    /// Drops expired entries and returns how many went away.
    fn purge_expired(&self) -> BlogResult<usize>;
}

/// Cache used when caching is turned off: nothing is ever stored.
pub struct NullCache;

impl PageCache for NullCache {
    fn get(&self, _key: &str) -> BlogResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str, _expire: Expire) -> BlogResult<()> {
        Ok(())
    }

    fn purge_expired(&self) -> BlogResult<usize> {
        Ok(0)
    }
}

pub fn post_key(slug: &str) -> String {
    format!("post:{}", slug)
}

pub const LISTING_KEY: &str = "blog_home";

/// Periodically drops expired entries. Needs a running tokio runtime.
pub fn spawn_janitor(cache: Arc<dyn PageCache>, every: StdDuration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache janitor, running every {} seconds", every.as_secs());
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match cache.purge_expired() {
                Ok(0) => debug!("Cache janitor found nothing to purge"),
                Ok(count) => info!("Cache janitor purged {} expired entries", count),
                Err(e) => error!("Cache janitor failed: {}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_cache() {
        let cache = NullCache;
        cache.set("key", "value", Expire::Never).unwrap();
        assert_eq!(cache.get("key").unwrap(), None);
        assert_eq!(cache.purge_expired().unwrap(), 0);
    }

    #[test]
    fn test_expire_date() {
        let now = Utc::now();
        assert_eq!(Expire::Never.expire_date(now), DateTime::<Utc>::MAX_UTC);
        assert_eq!(Expire::after_secs(3600).expire_date(now), now + Duration::seconds(3600));
        assert_eq!(Expire::After(Duration::MAX).expire_date(now), DateTime::<Utc>::MAX_UTC);
        assert_eq!(Expire::after_secs(i64::MAX), Expire::Never);
        assert_eq!(Expire::after_secs(i64::MAX).expire_date(now), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_keys() {
        assert_eq!(post_key("hello"), "post:hello");
        assert_ne!(post_key(LISTING_KEY), LISTING_KEY);
    }

    #[ntex::test]
    async fn test_janitor_purges() {
        let cache = Arc::new(MemoryCache::new());
        cache.set("old", "value", Expire::After(Duration::milliseconds(1))).unwrap();
        std::thread::sleep(StdDuration::from_millis(20));

        let handle = spawn_janitor(cache.clone(), StdDuration::from_millis(10));
        tokio::time::sleep(StdDuration::from_millis(50)).await;
        handle.abort();

        assert_eq!(cache.len(), 0);
    }
}
