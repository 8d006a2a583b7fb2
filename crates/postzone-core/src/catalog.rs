//! # Format Catalog
//!
//! Maps country codes to their [`FormatTable`]. Countries without a table
//! of their own receive the catalog's default table.
//!
//! Catalogs are declarative YAML:
//!
//! ```yaml
//! default:
//!   formats:
//!     - name: numeric
//!       pattern: "^[0-9]{1,15}$"
//!       output: "xxxxxxxxxxxxxxx"
//! countries:
//!   NL:
//!     formats:
//!       - name: "9999 AA"
//!         pattern: "^[0-9]{4}[A-Z]{2}$"
//!         short_pattern: "^[0-9]{4}$"
//!         output: "xxxx xx"
//!         short_output: "xxxx"
//!         auto_shorten: true
//!         lowest_expansion: "AA"
//!         highest_expansion: "ZZ"
//!         left_padding: "0"
//! ```
//!
//! Every pattern is compiled once at load time. Tables are then shared
//! read-only behind `Arc` and may be used from any thread.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::country::CountryCode;
use crate::error::CatalogError;
use crate::format::{
    Compatibility, FormatSpec, FormatTable, PostalCodeFormat, DEFAULT_REDUNDANT_CHARACTERS,
};

/// Key of the fallback table.
pub const DEFAULT_TABLE_KEY: &str = "DEFAULT";

/// Source of format tables.
pub trait FormatCatalog: Send + Sync {
    /// The table for `country`, or the default table when the country has
    /// none of its own.
    fn formats_for(&self, country: &CountryCode) -> Arc<FormatTable>;
}

/// Serde record for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSpec {
    #[serde(default = "default_redundant_characters")]
    pub redundant_characters: String,
    #[serde(default)]
    pub compatibility: Compatibility,
    pub formats: Vec<FormatSpec>,
}

fn default_redundant_characters() -> String {
    DEFAULT_REDUNDANT_CHARACTERS.to_string()
}

/// Serde record for a whole catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    pub default: TableSpec,
    #[serde(default)]
    pub countries: BTreeMap<String, TableSpec>,
}

impl TableSpec {
    fn build(self, key: &str) -> Result<FormatTable, CatalogError> {
        let formats = self
            .formats
            .into_iter()
            .map(PostalCodeFormat::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FormatTable::new(key, formats)
            .with_redundant_characters(self.redundant_characters)
            .with_compatibility(self.compatibility))
    }
}

/// An immutable, fully compiled catalog.
#[derive(Debug, Clone)]
pub struct StaticFormatCatalog {
    default: Arc<FormatTable>,
    tables: HashMap<CountryCode, Arc<FormatTable>>,
}

impl StaticFormatCatalog {
    /// Compile a parsed catalog document.
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        let default = Arc::new(config.default.build(DEFAULT_TABLE_KEY)?);
        let mut tables = HashMap::with_capacity(config.countries.len());
        for (key, spec) in config.countries {
            let country =
                CountryCode::new(&key).map_err(|_| CatalogError::InvalidCountry(key.clone()))?;
            let table = spec.build(country.as_str())?;
            tables.insert(country, Arc::new(table));
        }
        tracing::info!(tables = tables.len(), "format catalog loaded");
        Ok(Self { default, tables })
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig = serde_yaml::from_str(yaml)?;
        Self::from_config(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// The sample catalog shipped with the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_yaml_str(include_str!("../catalog/formats.yaml"))
    }

    /// The fallback table.
    pub fn default_table(&self) -> Arc<FormatTable> {
        Arc::clone(&self.default)
    }

    /// Whether `country` has a table of its own.
    pub fn has_table(&self, country: &CountryCode) -> bool {
        self.tables.contains_key(country)
    }

    /// Number of country-specific tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FormatCatalog for StaticFormatCatalog {
    fn formats_for(&self, country: &CountryCode) -> Arc<FormatTable> {
        self.tables
            .get(country)
            .map(Arc::clone)
            .unwrap_or_else(|| Arc::clone(&self.default))
    }
}
