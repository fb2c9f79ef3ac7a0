//! Memoizing front for [`Converter`].
//!
//! Conversion is a pure function of `(text, options)`, so repeated requests
//! can be answered from an LRU cache. Keys are compared by value; a hit
//! returns a clone of the stored fragments.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;

use super::converter::Converter;
use super::fragment::Fragment;
use super::options::ConversionOptions;

/// Default number of cached conversions.
pub const DEFAULT_CACHE_SIZE: usize = 1024;

type CacheKey = (String, ConversionOptions);

/// A [`Converter`] with an LRU cache of recent results.
///
/// The cache sits behind a mutex, so a `CachedConverter` can be shared across
/// threads like the converter itself. A poisoned lock only disables caching;
/// conversion still goes through.
pub struct CachedConverter {
    converter: Arc<Converter>,
    cache: Mutex<LruCache<CacheKey, Vec<Fragment>>>,
    capacity: usize,
}

impl CachedConverter {
    pub fn new(converter: Arc<Converter>) -> Self {
        Self::with_capacity(converter, DEFAULT_CACHE_SIZE)
    }

    /// Create a cached converter holding at most `capacity` results
    /// (at least one).
    pub fn with_capacity(converter: Arc<Converter>, capacity: usize) -> Self {
        let capacity_nz = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            converter,
            cache: Mutex::new(LruCache::new(capacity_nz)),
            capacity: capacity_nz.get(),
        }
    }

    /// Convert text, answering from the cache when possible.
    pub fn convert(&self, text: &str, options: &ConversionOptions) -> Vec<Fragment> {
        let key = (text.to_string(), options.clone());

        if let Ok(mut cache) = self.cache.lock() {
            if let Some(cached) = cache.get(&key) {
                return cached.clone();
            }
        }

        let fragments = self.converter.convert(text, options);

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, fragments.clone());
        }

        fragments
    }

    /// The wrapped converter.
    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear the conversion cache.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    /// Get the current number of cached results.
    pub fn cache_len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl Clone for CachedConverter {
    fn clone(&self) -> Self {
        // Caches are not shared between clones
        Self::with_capacity(Arc::clone(&self.converter), self.capacity)
    }
}
