//! # Postal-Code Ranges
//!
//! A [`PostalCodeRange`] is an inclusive interval `[start, end]` over
//! [`PostalCode`] where either bound may be absent, meaning unbounded in
//! that direction. With both bounds absent it is the default range, which
//! contains everything.
//!
//! Bounds are stored expanded: a short start becomes its lowest full code
//! and a short end its highest, so a range built from `"12345"` to
//! `"12399"` covers every ZIP+4 code in between.
//!
//! ## Tables
//!
//! Codes order by table key first, so each country is one contiguous
//! block. A half-open range therefore reaches into neighbouring tables:
//! `<20000-*>` built from German codes also covers every Polish code.
//! Callers build ranges within one table; splitting an open range around
//! another country's range can leave a piece whose bounds sit in two
//! tables, displayed as `<DE:20000-PL:49999>`.
//!
//! ## Canonical Order
//!
//! Ranges sort by descending start (an absent start sorts last), then by
//! ascending end (an absent end sorts last). Among overlapping ranges the
//! narrowest, latest-starting one sorts first, and the default range sorts
//! after everything.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use postzone_code::{PostalCode, PostalCodeFactory};
use postzone_core::{CountryCode, PostalCodeError};

/// An interval of postal codes with optional bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct PostalCodeRange {
    start: Option<PostalCode>,
    end: Option<PostalCode>,
}

impl PostalCodeRange {
    /// The universal range.
    pub const DEFAULT: PostalCodeRange = PostalCodeRange {
        start: None,
        end: None,
    };

    /// Build a range, expanding short bounds to full boundary codes.
    ///
    /// # Errors
    ///
    /// - [`PostalCodeError::IncompatibleBounds`] when the bounds come from
    ///   different format tables. Only the algebra itself builds ranges
    ///   across tables.
    /// - [`PostalCodeError::RangeOrderViolation`] when `start > end`.
    /// - [`PostalCodeError::BoundaryExpansionUnavailable`] when a short
    ///   bound's format declares no filler.
    pub fn new(start: Option<PostalCode>, end: Option<PostalCode>) -> Result<Self, PostalCodeError> {
        if let (Some(s), Some(e)) = (&start, &end) {
            if s.table_key() != e.table_key() {
                return Err(PostalCodeError::IncompatibleBounds {
                    start_table: s.table_key().to_string(),
                    end_table: e.table_key().to_string(),
                });
            }
            if s > e {
                return Err(PostalCodeError::RangeOrderViolation {
                    start: s.to_string(),
                    end: e.to_string(),
                });
            }
        }
        Ok(Self {
            start: start.map(|s| s.expand_as_lowest()).transpose()?,
            end: end.map(|e| e.expand_as_highest()).transpose()?,
        })
    }

    /// A range whose bounds may come from different tables, as produced by
    /// splitting or joining ranges of different countries. Bounds must
    /// already be full codes.
    pub(crate) fn spanning(
        start: Option<PostalCode>,
        end: Option<PostalCode>,
    ) -> Result<Self, PostalCodeError> {
        match (&start, &end) {
            (Some(s), Some(e)) if s.table_key() != e.table_key() => {
                if s > e {
                    return Err(PostalCodeError::RangeOrderViolation {
                        start: s.to_string(),
                        end: e.to_string(),
                    });
                }
                Ok(Self { start, end })
            }
            _ => Self::new(start, end),
        }
    }

    /// Whether both bounds are present and come from different tables.
    pub fn spans_tables(&self) -> bool {
        matches!((&self.start, &self.end), (Some(s), Some(e)) if s.table_key() != e.table_key())
    }

    /// `[start, end]`.
    pub fn bounded(start: PostalCode, end: PostalCode) -> Result<Self, PostalCodeError> {
        Self::new(Some(start), Some(end))
    }

    /// `[start, *]`.
    pub fn starting_at(start: PostalCode) -> Result<Self, PostalCodeError> {
        Self::new(Some(start), None)
    }

    /// `[*, end]`.
    pub fn ending_at(end: PostalCode) -> Result<Self, PostalCodeError> {
        Self::new(None, Some(end))
    }

    /// Build a range from raw strings through a factory. `None` leaves the
    /// bound open.
    pub fn parse(
        factory: &PostalCodeFactory,
        country: &CountryCode,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, PostalCodeError> {
        let start = start.map(|s| factory.create(country, s)).transpose()?;
        let end = end.map(|e| factory.create(country, e)).transpose()?;
        Self::new(start, end)
    }

    pub fn start(&self) -> Option<&PostalCode> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&PostalCode> {
        self.end.as_ref()
    }

    pub fn start_defined(&self) -> bool {
        self.start.is_some()
    }

    pub fn end_defined(&self) -> bool {
        self.end.is_some()
    }

    /// At least one bound is absent.
    pub fn is_indefinite(&self) -> bool {
        self.start.is_none() || self.end.is_none()
    }

    /// Both bounds are absent.
    pub fn is_default(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// The code just before this range, if the start is bounded and has one.
    pub fn predecessor_postal_code(&self) -> Option<PostalCode> {
        self.start.as_ref().and_then(PostalCode::predecessor)
    }

    /// The code just after this range, if the end is bounded and has one.
    pub fn successor_postal_code(&self) -> Option<PostalCode> {
        self.end.as_ref().and_then(PostalCode::successor)
    }
}

impl fmt::Display for PostalCodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.start, &self.end) {
            (None, None) => write!(f, "<*>"),
            (None, Some(e)) => write!(f, "<*-{e}>"),
            (Some(s), None) => write!(f, "<{s}-*>"),
            (Some(s), Some(e)) if self.spans_tables() => write!(
                f,
                "<{}:{s}-{}:{e}>",
                s.table_key(),
                e.table_key()
            ),
            (Some(s), Some(e)) => write!(f, "<{s}-{e}>"),
        }
    }
}

impl Ord for PostalCodeRange {
    fn cmp(&self, other: &Self) -> Ordering {
        let start = match (&self.start, &other.start) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => b.cmp(a),
        };
        start.then_with(|| match (&self.end, &other.end) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        })
    }
}

impl PartialOrd for PostalCodeRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{letters, numeric3, range};
    use postzone_core::{FormatCatalog, StaticFormatCatalog};
    use std::sync::Arc;

    // ---- construction ----

    #[test]
    fn test_default_range() {
        let d = PostalCodeRange::default();
        assert_eq!(d, PostalCodeRange::DEFAULT);
        assert!(d.is_default());
        assert!(d.is_indefinite());
        assert_eq!(d.to_string(), "<*>");
    }

    #[test]
    fn test_order_violation() {
        let t = numeric3();
        let err = PostalCodeRange::bounded(
            PostalCode::new(Arc::clone(&t), "005").unwrap(),
            PostalCode::new(t, "003").unwrap(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PostalCodeError::RangeOrderViolation {
                start: "005".into(),
                end: "003".into(),
            }
        );
    }

    #[test]
    fn test_incompatible_bounds() {
        let err = PostalCodeRange::bounded(
            PostalCode::new(numeric3(), "001").unwrap(),
            PostalCode::new(letters(), "C").unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, PostalCodeError::IncompatibleBounds { .. }));
    }

    #[test]
    fn test_single_value_range_allowed() {
        let r = range(&numeric3(), "004", "004");
        assert_eq!(r.to_string(), "<004-004>");
    }

    #[test]
    fn test_short_bounds_expand() {
        let catalog = StaticFormatCatalog::bundled().unwrap();
        let us = catalog.formats_for(&CountryCode::new("US").unwrap());
        let r = PostalCodeRange::bounded(
            PostalCode::new(Arc::clone(&us), "12345").unwrap(),
            PostalCode::new(us, "12399").unwrap(),
        )
        .unwrap();
        assert_eq!(r.start().unwrap().as_str(), "123450000");
        assert_eq!(r.end().unwrap().as_str(), "123999999");
    }

    #[test]
    fn test_display_forms() {
        let t = numeric3();
        assert_eq!(range(&t, "*", "005").to_string(), "<*-005>");
        assert_eq!(range(&t, "003", "*").to_string(), "<003-*>");
        assert_eq!(range(&t, "003", "005").to_string(), "<003-005>");
    }

    #[test]
    fn test_boundary_neighbours() {
        let t = numeric3();
        let r = range(&t, "003", "005");
        assert_eq!(r.predecessor_postal_code().unwrap().as_str(), "002");
        assert_eq!(r.successor_postal_code().unwrap().as_str(), "006");
        assert!(range(&t, "000", "999").predecessor_postal_code().is_none());
        assert!(range(&t, "000", "999").successor_postal_code().is_none());
        assert!(PostalCodeRange::DEFAULT.predecessor_postal_code().is_none());
    }

    // ---- ordering ----

    #[test]
    fn test_compare_against_c_to_e() {
        let t = letters();
        let base = range(&t, "C", "E");
        let cases = [
            ("*", "*", Ordering::Less),
            ("A", "B", Ordering::Less),
            ("A", "C", Ordering::Less),
            ("A", "D", Ordering::Less),
            ("A", "E", Ordering::Less),
            ("A", "G", Ordering::Less),
            ("C", "D", Ordering::Greater),
            ("C", "E", Ordering::Equal),
            ("C", "G", Ordering::Less),
            ("D", "E", Ordering::Greater),
            ("D", "G", Ordering::Greater),
            ("E", "G", Ordering::Greater),
            ("F", "G", Ordering::Greater),
        ];
        for (s, e, expected) in cases {
            let other = range(&t, s, e);
            assert_eq!(base.cmp(&other), expected, "{base} vs {other}");
            assert_eq!(base == other, expected == Ordering::Equal, "{base} == {other}");
        }
        assert!(Some(base) > None);
    }

    #[test]
    fn test_most_specific_sorts_first() {
        let t = numeric3();
        let r1 = range(&t, "006", "010");
        let r2 = range(&t, "005", "010");
        let r3 = range(&t, "005", "011");
        let r4 = PostalCodeRange::DEFAULT;
        assert!(r1 < r2 && r2 < r3 && r3 < r4);
        assert!(r4 > r1 && r4 >= r4.clone() && r1 <= r1.clone());
        let mut sorted = vec![r4.clone(), r3.clone(), r1.clone(), r2.clone()];
        sorted.sort();
        assert_eq!(sorted, vec![r1, r2, r3, r4]);
    }

    #[test]
    fn test_open_bounds_sort_last() {
        let t = numeric3();
        assert!(range(&t, "003", "005") < range(&t, "*", "005"));
        assert!(range(&t, "003", "005") < range(&t, "003", "*"));
    }

    // ---- serde ----

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(range(&numeric3(), "003", "*")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"start": {"table": "N3", "code": "003"}, "end": null})
        );
    }
}
