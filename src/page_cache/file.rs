//! Durable page cache.
//!
//! Every entry lives in its own JSON file inside the cache directory, named
//! after the SHA-256 of its key:
//!
//! ```text
//! {cache_dir}/
//! +-- 3f1c...e9.json   # {"key": "post:hello", "expires_at_ms": 1718000000000, "value": "<html>..."}
//! +-- a07b...12.json
//! ```
//!
//! Writes land in a temporary file first and are renamed into place, so a
//! reader sees either the old entry or the new one. Concurrent writers of the
//! same key resolve last-writer-wins. Renames and evictions share one lock so
//! an eviction never removes an entry that was just replaced.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use spdlog::{debug, warn};
use uuid::Uuid;

use crate::error::{BlogError, BlogResult};
use crate::page_cache::{Expire, PageCache};

const ENTRY_EXT: &str = "json";
const TMP_EXT: &str = "tmp";
/// Temp files older than this belong to a write that never finished.
const STALE_TMP_AGE: Duration = Duration::from_secs(600);

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    key: String,
    /// Unix time in milliseconds, `None` for entries that never expire.
    expires_at_ms: Option<i64>,
    value: String,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at_ms {
            Some(expires_at_ms) => now.timestamp_millis() > expires_at_ms,
            None => false,
        }
    }
}

pub struct FileCache {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCache {
    /// Opens the cache rooted at `root`, creating the directory if needed.
    pub fn new(root: &Path) -> BlogResult<Self> {
        fs::create_dir_all(root)?;
        Ok(FileCache {
            root: root.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    fn lock(&self) -> BlogResult<MutexGuard<'_, ()>> {
        self.write_lock.lock()
            .map_err(|_| BlogError::Cache("file cache lock is poisoned".to_string()))
    }

    /// Removes the entry at `path` if it is still expired once the lock is held.
    fn evict_if_expired(&self, path: &Path) -> BlogResult<bool> {
        let _guard = self.lock()?;
        let expired = match Self::read_entry(path)? {
            Some(entry) => entry.is_expired(Utc::now()),
            None => path.exists(),
        };
        if expired {
            Self::remove_quietly(path);
        }
        Ok(expired)
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.root.join(format!("{}.{}", hex::encode(digest), ENTRY_EXT))
    }

    fn read_entry(path: &Path) -> BlogResult<Option<CacheEntry>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice::<CacheEntry>(&bytes) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!("Ignoring unreadable cache entry {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    fn is_stale_tmp(path: &Path, now: SystemTime) -> bool {
        let modified = match fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => return false,
        };
        now.duration_since(modified).map(|age| age > STALE_TMP_AGE).unwrap_or(false)
    }

    fn remove_quietly(path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != ErrorKind::NotFound {
                warn!("Could not remove cache entry {}: {}", path.display(), e);
            }
        }
    }
}

impl PageCache for FileCache {
    fn get(&self, key: &str) -> BlogResult<Option<String>> {
        let path = self.entry_path(key);
        let Some(entry) = Self::read_entry(&path)? else {
            return Ok(None);
        };

        if entry.key != key {
            debug!("Cache entry {} belongs to another key", path.display());
            return Ok(None);
        }

        if entry.is_expired(Utc::now()) {
            debug!("Cache entry for {} expired", key);
            self.evict_if_expired(&path)?;
            return Ok(None);
        }

        Ok(Some(entry.value))
    }

    fn set(&self, key: &str, value: &str, expire: Expire) -> BlogResult<()> {
        let entry = CacheEntry {
            key: key.to_string(),
            expires_at_ms: match expire {
                Expire::Never => None,
                Expire::After(_) => Some(expire.expire_date(Utc::now()).timestamp_millis()),
            },
            value: value.to_string(),
        };
        let bytes = serde_json::to_vec(&entry)
            .map_err(|e| BlogError::Cache(format!("could not serialize entry for {}: {}", key, e)))?;

        let tmp_path = self.root.join(format!("{}.{}", Uuid::new_v4(), TMP_EXT));
        if let Err(e) = fs::write(&tmp_path, &bytes) {
            Self::remove_quietly(&tmp_path);
            return Err(e.into());
        }

        let _guard = self.lock()?;
        if let Err(e) = fs::rename(&tmp_path, self.entry_path(key)) {
            Self::remove_quietly(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }

    /// Also removes temp files left behind by writes that never finished.
    fn purge_expired(&self) -> BlogResult<usize> {
        let now = SystemTime::now();
        let mut purged = 0;
        for entry in fs::read_dir(&self.root)?.flatten() {
            let path = entry.path();
            match path.extension().and_then(|e| e.to_str()) {
                // Unreadable entries count as expired, they are never going to be served
                Some(ENTRY_EXT) => {
                    if self.evict_if_expired(&path)? {
                        purged += 1;
                    }
                }
                Some(TMP_EXT) if Self::is_stale_tmp(&path, now) => {
                    debug!("Removing stale cache temp file {}", path.display());
                    Self::remove_quietly(&path);
                    purged += 1;
                }
                _ => {}
            }
        }
        Ok(purged)
    }
}
