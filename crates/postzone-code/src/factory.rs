//! # Postal-Code Factory
//!
//! Wires the external collaborators together: a [`FormatCatalog`] for
//! tables, an [`InputNormalizer`] for free-form cleanup, and an optional
//! [`PostalCodeCache`]. Callers go from `(country, raw input)` straight to a
//! [`PostalCode`].

use std::fmt;
use std::sync::Arc;

use postzone_core::{
    BasicInputNormalizer, CountryCode, CountryResolver, FormatCatalog, InputNormalizer,
    PostalCodeError,
};

use crate::cache::{CacheKey, PostalCodeCache};
use crate::postal_code::PostalCode;

/// Builds postal codes for any country known to a catalog.
#[derive(Clone)]
pub struct PostalCodeFactory {
    catalog: Arc<dyn FormatCatalog>,
    normalizer: Arc<dyn InputNormalizer>,
    cache: Option<Arc<dyn PostalCodeCache>>,
}

impl fmt::Debug for PostalCodeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostalCodeFactory")
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl PostalCodeFactory {
    /// A factory using [`BasicInputNormalizer`] and no cache.
    pub fn new(catalog: Arc<dyn FormatCatalog>) -> Self {
        Self {
            catalog,
            normalizer: Arc::new(BasicInputNormalizer::new()),
            cache: None,
        }
    }

    pub fn with_normalizer(mut self, normalizer: Arc<dyn InputNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn PostalCodeCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn catalog(&self) -> &Arc<dyn FormatCatalog> {
        &self.catalog
    }

    /// Build a value for `country`, allowing auto-shortening.
    pub fn create(&self, country: &CountryCode, raw: &str) -> Result<PostalCode, PostalCodeError> {
        self.build(country, raw, true)
    }

    /// Build a value for `country`, keeping full-form matches at full length.
    pub fn create_full(
        &self,
        country: &CountryCode,
        raw: &str,
    ) -> Result<PostalCode, PostalCodeError> {
        self.build(country, raw, false)
    }

    /// Resolve a raw country string first, then build the value.
    pub fn resolve_and_create(
        &self,
        resolver: &dyn CountryResolver,
        country: &str,
        raw: &str,
    ) -> Result<PostalCode, PostalCodeError> {
        let country = resolver.resolve(country)?;
        self.create(&country, raw)
    }

    fn build(
        &self,
        country: &CountryCode,
        raw: &str,
        allow_short: bool,
    ) -> Result<PostalCode, PostalCodeError> {
        let input = self.normalizer.cleanup(country, raw);
        let key = self.cache.as_ref().map(|_| CacheKey {
            country: country.clone(),
            input: input.clone(),
            allow_short,
        });

        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(hit) = cache.get(key) {
                tracing::debug!(country = %country, input = %input, "postal code cache hit");
                return Ok(hit);
            }
        }

        let table = self.catalog.formats_for(country);
        let code = PostalCode::with_policy(table, &input, allow_short)?;

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.insert(key, code.clone());
        }
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DashMapCache;
    use postzone_core::{AliasCountryResolver, StaticFormatCatalog};

    fn cc(s: &str) -> CountryCode {
        CountryCode::new(s).unwrap()
    }

    fn factory() -> PostalCodeFactory {
        PostalCodeFactory::new(Arc::new(StaticFormatCatalog::bundled().unwrap()))
    }

    #[test]
    fn test_create_cleans_input() {
        let f = factory();
        let code = f.create(&cc("GB"), " sw1a  1aa. ").unwrap();
        assert_eq!(code.as_str(), "SW1A1");
        assert_eq!(code.table_key(), "GB");
    }

    #[test]
    fn test_create_full_keeps_length() {
        let code = factory().create_full(&cc("US"), "12345-6789").unwrap();
        assert_eq!(code.as_str(), "123456789");
    }

    #[test]
    fn test_custom_normalizer_strips_prefix() {
        let f = factory().with_normalizer(Arc::new(
            BasicInputNormalizer::new().with_prefix(cc("BB"), "BB"),
        ));
        let code = f.create(&cc("BB"), "BB15094").unwrap();
        assert_eq!(code.as_str(), "15094");
        assert_eq!(code.to_human_readable(), "BB15094");
    }

    #[test]
    fn test_resolve_and_create() {
        let resolver = AliasCountryResolver::new().with_alias("UK", cc("GB"));
        let code = factory()
            .resolve_and_create(&resolver, "uk", "EC1A 1BB")
            .unwrap();
        assert_eq!(code.table_key(), "GB");
        let err = factory()
            .resolve_and_create(&resolver, "GBR", "EC1A 1BB")
            .unwrap_err();
        assert!(matches!(err, PostalCodeError::InvalidCountryCode(_)));
    }

    #[test]
    fn test_cache_is_populated_and_reused() {
        let cache = Arc::new(DashMapCache::new());
        let f = factory().with_cache(cache.clone());
        let first = f.create(&cc("SE"), "114 55").unwrap();
        assert_eq!(cache.len(), 1);
        let second = f.create(&cc("SE"), "114   55").unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        f.create_full(&cc("SE"), "114 55").unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = Arc::new(DashMapCache::new());
        let f = factory().with_cache(cache.clone());
        assert!(f.create(&cc("CA"), "12345").is_err());
        assert!(cache.is_empty());
    }
}
