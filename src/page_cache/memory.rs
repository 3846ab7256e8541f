use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::error::{BlogError, BlogResult};
use crate::page_cache::{Expire, PageCache};

struct CacheValue {
    expire_date: DateTime<Utc>,
    value: String,
}

/// In-process cache. Entries are lost on restart.
pub struct MemoryCache {
    cache: RwLock<HashMap<String, CacheValue>>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        MemoryCache {
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> BlogError {
    BlogError::Cache("memory cache lock is poisoned".to_string())
}

impl PageCache for MemoryCache {
    fn get(&self, key: &str) -> BlogResult<Option<String>> {
        let now = Utc::now();
        {
            let reader = self.cache.read().map_err(poisoned)?;
            match reader.get(key) {
                None => return Ok(None),
                Some(cache_value) if now <= cache_value.expire_date => {
                    return Ok(Some(cache_value.value.clone()));
                }
                Some(_) => {}
            }
        }

        // Expired. Re-check under the write lock, a fresh set may have landed.
        let mut writer = self.cache.write().map_err(poisoned)?;
        if let Some(cache_value) = writer.get(key) {
            if now > cache_value.expire_date {
                writer.remove(key);
            } else {
                return Ok(Some(cache_value.value.clone()));
            }
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: &str, expire: Expire) -> BlogResult<()> {
        let expire_date = expire.expire_date(Utc::now());
        let mut writer = self.cache.write().map_err(poisoned)?;
        writer.insert(key.to_string(), CacheValue {
            expire_date,
            value: value.to_string(),
        });
        Ok(())
    }

    fn purge_expired(&self) -> BlogResult<usize> {
        let now = Utc::now();
        let mut writer = self.cache.write().map_err(poisoned)?;
        let before = writer.len();
        writer.retain(|_, v| now <= v.expire_date);
        Ok(before - writer.len())
    }
}
