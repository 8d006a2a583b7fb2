//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout postzone. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Value and range errors are local and synchronous. They are surfaced
//!   to the immediate caller and never retried internally.
//! - Every variant carries the offending inputs so the message alone is
//!   enough to reproduce the failure.
//! - Catalog errors are kept apart from value errors: a bad catalog is a
//!   deployment problem, a bad postal code is a data problem.

use thiserror::Error;

use crate::format::Expansion;

/// Errors raised while constructing or combining postal codes and ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostalCodeError {
    /// The raw input matches no declared format, even after padding.
    #[error("postal code {input:?} matches no format of table {table}")]
    FormatMismatch {
        /// Input after redundant-character stripping.
        input: String,
        /// Key of the format table that was searched.
        table: String,
    },

    /// A range was constructed with `start > end`.
    #[error("range start {start} is greater than range end {end}")]
    RangeOrderViolation {
        /// Requested start bound.
        start: String,
        /// Requested end bound.
        end: String,
    },

    /// A range was constructed from bounds of two different format tables.
    #[error("range bounds belong to different format tables ({start_table} and {end_table})")]
    IncompatibleBounds {
        /// Table key of the start bound.
        start_table: String,
        /// Table key of the end bound.
        end_table: String,
    },

    /// A short-form code was expanded but its format declares no filler.
    #[error("postal code {code} has no {direction} expansion in its format")]
    BoundaryExpansionUnavailable {
        /// Backing string of the short-form code.
        code: String,
        /// Which filler was requested.
        direction: Expansion,
    },

    /// Two ranges were combined across a gap.
    #[error("ranges {left} and {right} are neither adjacent nor overlapping")]
    AdjacencyViolation {
        /// Display form of the first range.
        left: String,
        /// Display form of the second range.
        right: String,
    },

    /// Subtraction needed a neighbour of a boundary that has none.
    #[error("cannot subtract from {range}: boundary {boundary} has no neighbour in its format")]
    SubtractionInconsistency {
        /// Display form of the range being subtracted.
        range: String,
        /// Backing string of the boundary without a neighbour.
        boundary: String,
    },

    /// Country resolution failed.
    #[error("invalid country code: {0:?}")]
    InvalidCountryCode(String),
}

/// Errors raised while loading a format catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Reading the catalog file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog document is not valid YAML for the catalog schema.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A format declares a pattern that does not compile.
    #[error("format {format:?} has invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// Name of the offending format.
        format: String,
        /// Pattern source text.
        pattern: String,
        /// Underlying regex compilation error.
        source: regex::Error,
    },

    /// A catalog key is not a valid country code.
    #[error("catalog key {0:?} is not a two-letter country code")]
    InvalidCountry(String),

    /// A padding declaration is not exactly one character.
    #[error("format {format:?} declares padding {padding:?}; expected a single character")]
    InvalidPadding {
        /// Name of the offending format.
        format: String,
        /// Declared padding text.
        padding: String,
    },
}
