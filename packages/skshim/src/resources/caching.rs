use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::data::Data;
use crate::refcnt::Sp;
use crate::resources::ResourceProvider;

/// Memoizes successful loads of an inner provider by `(path, name)`.
///
/// Holds at most `max_entries` resources and evicts the least recently used
/// one beyond that. Misses and null handles are not cached, so a resource
/// that appears later is still found.
pub struct CachingResourceProvider<P> {
    inner: P,
    cache: Mutex<LruCache<(String, String), Sp<Data>>>,
}

impl<P: ResourceProvider> CachingResourceProvider<P> {
    /// Caches up to [`DEFAULT_MAX_CACHED_RESOURCES`] resources.
    ///
    /// [`DEFAULT_MAX_CACHED_RESOURCES`]: crate::constants::DEFAULT_MAX_CACHED_RESOURCES
    pub fn new(inner: P) -> Self {
        let max_entries = NonZeroUsize::new(crate::constants::DEFAULT_MAX_CACHED_RESOURCES)
            .unwrap_or(NonZeroUsize::MIN);
        Self::with_max_entries(inner, max_entries)
    }

    pub fn with_max_entries(inner: P, max_entries: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(max_entries)),
        }
    }

    /// Number of cached resources.
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.cache.lock().cap().get()
    }

    /// Drops every cached reference.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: ResourceProvider> ResourceProvider for CachingResourceProvider<P> {
    fn load(&self, path: &str, name: &str) -> Option<Sp<Data>> {
        let key = (path.to_string(), name.to_string());
        if let Some(data) = self.cache.lock().get(&key) {
            return Some(data.clone());
        }

        // Loaded outside the lock; concurrent misses may both reach the
        // inner provider and the last insert wins.
        let data = self.inner.load(path, name).filter(|data| !data.is_null())?;
        let evicted = self.cache.lock().push(key, data.clone());
        if let Some(((evicted_path, evicted_name), _)) = evicted {
            if evicted_path != path || evicted_name != name {
                log::trace!("Evicted cached resource {}/{}", evicted_path, evicted_name);
            }
        }
        Some(data)
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for CachingResourceProvider<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.cache.lock();
        f.debug_struct("CachingResourceProvider")
            .field("inner", &self.inner)
            .field("cached", &cache.len())
            .field("max_entries", &cache.cap())
            .finish()
    }
}
