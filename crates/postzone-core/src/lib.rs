//! # postzone-core — Foundational Types for postzone
//!
//! This crate holds everything the postal-code value model consumes but
//! does not compute: the error taxonomy, the ordinal comparer, country
//! codes, declarative format tables, and the catalog that publishes them.
//! Every other crate in the workspace depends on `postzone-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Country identity is data.** A country is a key into a
//!    [`FormatTable`], not a type. One value type serves every country.
//!
//! 2. **Formats are configuration.** Tables are loaded from YAML by
//!    [`StaticFormatCatalog`] and compiled once. Patterns compare by
//!    source text.
//!
//! 3. **Alphabets come from patterns.** [`shape::parse_shape`] reads the
//!    per-position alphabet of fixed-width patterns so predecessor and
//!    successor can be computed by one generic algorithm.
//!
//! 4. **Collaborators behind traits.** [`CountryResolver`],
//!    [`FormatCatalog`], and [`InputNormalizer`] are the seams where
//!    callers plug in their own country tables and cleanup heuristics.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `postzone-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod catalog;
pub mod comparer;
pub mod country;
pub mod error;
pub mod format;
pub mod normalize;
pub mod shape;

// Re-export primary types for ergonomic imports.
pub use catalog::{CatalogConfig, FormatCatalog, StaticFormatCatalog, TableSpec, DEFAULT_TABLE_KEY};
pub use country::{AliasCountryResolver, CountryCode, CountryResolver};
pub use error::{CatalogError, PostalCodeError};
pub use format::{
    Compatibility, Expansion, FormType, FormatPattern, FormatSpec, FormatTable, PostalCodeFormat,
};
pub use normalize::{BasicInputNormalizer, InputNormalizer};
pub use shape::{CharClass, Direction, Slot, Step};
