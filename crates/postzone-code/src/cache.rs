//! # Construction Cache
//!
//! An optional store of already-constructed values, keyed by country,
//! cleaned input, and shortening policy. The value type knows nothing
//! about it; [`crate::PostalCodeFactory`] consults it when one is injected.

use dashmap::DashMap;

use postzone_core::CountryCode;

use crate::postal_code::PostalCode;

/// Lookup key for cached values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub country: CountryCode,
    pub input: String,
    pub allow_short: bool,
}

/// Shared store of constructed postal codes.
pub trait PostalCodeCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<PostalCode>;
    fn insert(&self, key: CacheKey, code: PostalCode);
}

/// Concurrent in-memory cache backed by `DashMap`.
#[derive(Debug, Default)]
pub struct DashMapCache {
    entries: DashMap<CacheKey, PostalCode>,
}

impl DashMapCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl PostalCodeCache for DashMapCache {
    fn get(&self, key: &CacheKey) -> Option<PostalCode> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn insert(&self, key: CacheKey, code: PostalCode) {
        self.entries.insert(key, code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postzone_core::{FormatCatalog, StaticFormatCatalog};

    #[test]
    fn test_insert_and_get() {
        let country = CountryCode::new("SE").unwrap();
        let table = StaticFormatCatalog::bundled().unwrap().formats_for(&country);
        let code = PostalCode::new(table, "114 55").unwrap();
        let key = CacheKey {
            country,
            input: "114 55".into(),
            allow_short: true,
        };

        let cache = DashMapCache::new();
        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), code.clone());
        assert_eq!(cache.get(&key), Some(code));
        assert_eq!(cache.len(), 1);

        let other_policy = CacheKey {
            allow_short: false,
            ..key
        };
        assert!(cache.get(&other_policy).is_none());

        cache.clear();
        assert!(cache.is_empty());
    }
}
