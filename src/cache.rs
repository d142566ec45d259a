//! Raw response cache.
//!
//! Cached bodies are keyed by the request URL (see [`cache_key`]). The
//! default store writes one file per key under a root directory, mirroring
//! the URL path, so cached responses can be inspected and replayed offline.

use crate::error::Result;
use std::collections::{HashMap, VecDeque};
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::debug;
use url::Url;

const CACHE_SUFFIX: &str = ".json";

/// Trait for cache implementations.
pub trait Cache: Send + Sync {
    /// Get a cached body by key. A missing entry is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store a body under a key, replacing any previous entry.
    fn put(&self, key: &str, body: &[u8]) -> Result<()>;
}

/// Derive the cache key of a request URL.
///
/// The key is the URL path (without its leading slash) whose last segment is
/// suffixed with the escaped `?query`, plus `.json`. For
/// `/v3/streams/feed%2Fa/ids?count=2` that is
/// `v3/streams/feed%2Fa/ids%3Fcount%3D2.json`.
pub fn cache_key(url: &Url) -> String {
    let path = url.path().trim_start_matches('/');
    let mut key = path.to_string();
    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        key.push_str(&urlencoding::encode(&format!("?{query}")));
    }
    key.push_str(CACHE_SUFFIX);
    key
}

/// File-backed cache: one file per key below `root`.
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Create a file cache rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key to a file below the root. Every segment must be a plain
    /// file name, so a key can never address a file outside the root.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let mut path = self.root.clone();
        for segment in key.split('/').filter(|segment| !segment.is_empty()) {
            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(name)), None) => path.push(name),
                _ => {
                    return Err(io::Error::new(
                        ErrorKind::InvalidInput,
                        format!("cache key {key:?} has an invalid segment {segment:?}"),
                    )
                    .into())
                }
            }
        }
        Ok(path)
    }
}

impl Default for FileCache {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, body: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&path, body)?;
        debug!(path = %path.display(), bytes = body.len(), "Wrote cached response");
        Ok(())
    }
}

/// In-memory cache with FIFO eviction.
pub struct MemoryCache {
    store: RwLock<HashMap<String, Vec<u8>>>,
    order: RwLock<VecDeque<String>>,
    max_entries: usize,
}

impl MemoryCache {
    /// Create a new memory cache with the given maximum entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: RwLock::new(HashMap::with_capacity(max_entries)),
            order: RwLock::new(VecDeque::with_capacity(max_entries)),
            max_entries: max_entries.max(1),
        }
    }

    /// Get the current number of entries.
    pub fn size(&self) -> usize {
        self.store.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let mut order = self.order.write().unwrap_or_else(PoisonError::into_inner);
        store.clear();
        order.clear();
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        Ok(store.get(key).cloned())
    }

    fn put(&self, key: &str, body: &[u8]) -> Result<()> {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let mut order = self.order.write().unwrap_or_else(PoisonError::into_inner);

        if !store.contains_key(key) {
            while store.len() >= self.max_entries {
                match order.pop_front() {
                    Some(oldest) => {
                        store.remove(&oldest);
                    }
                    None => break,
                }
            }
            order.push_back(key.to_string());
        }

        store.insert(key.to_string(), body.to_vec());
        Ok(())
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(100)
    }
}
