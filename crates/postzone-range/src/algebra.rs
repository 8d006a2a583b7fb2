//! # Range Set Algebra
//!
//! Containment, intersection, coincidence, overlap, adjacency, difference,
//! and union over [`PostalCodeRange`]. Every operation is a pure function
//! of its operands and returns new ranges.
//!
//! An absent bound acts as negative or positive infinity. The default
//! range contains every code and every range, and is coincident with
//! every range.
//!
//! `is_coincident_with`, `contains_range`, and `overlaps` are not
//! orthogonal: coincidence is "shares at least one code", overlap is
//! "contains either way, or coincident". Their truth tables are pinned by
//! the tests below.

use std::cmp::Ordering;

use postzone_code::PostalCode;
use postzone_core::{comparer, PostalCodeError};

use crate::range::PostalCodeRange;

// ─── Containment ─────────────────────────────────────────────────────

impl PostalCodeRange {
    /// Whether the whole block covered by `code` lies in this range.
    ///
    /// A short code is compared through its lowest and highest expansions.
    /// A bound from another table is compared by table key alone. Codes
    /// whose format is incompatible with a bound of their own table are
    /// never contained, except by the default range.
    pub fn contains(&self, code: &PostalCode) -> bool {
        if self.is_default() {
            return true;
        }
        let after_start = self.start().map_or(true, |s| {
            bound_order(s, code, code.lowest_expanded()).is_some_and(Ordering::is_le)
        });
        let before_end = self.end().map_or(true, |e| {
            bound_order(e, code, code.highest_expanded()).is_some_and(Ordering::is_ge)
        });
        after_start && before_end
    }

    /// [`contains`](Self::contains) over a possibly-absent code. An absent
    /// code is contained only by the default range.
    pub fn contains_bound(&self, code: Option<&PostalCode>) -> bool {
        match code {
            Some(code) => self.contains(code),
            None => self.is_default(),
        }
    }

    /// Whether `inner` lies entirely within this range.
    pub fn contains_range(&self, inner: &PostalCodeRange) -> bool {
        if self.is_default() {
            return true;
        }
        if inner.is_default() {
            return false;
        }
        let start_ok = match (self.start(), inner.start()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(o), Some(i)) => comparable(o, i) && o <= i,
        };
        let end_ok = match (self.end(), inner.end()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(o), Some(i)) => comparable(o, i) && o >= i,
        };
        start_ok && end_ok
    }

    // ─── Intersection ────────────────────────────────────────────────

    /// Whether either range contains a bound of the other.
    pub fn intersects(&self, other: &PostalCodeRange) -> bool {
        self.contains_bound(other.start())
            || self.contains_bound(other.end())
            || other.contains_bound(self.start())
            || other.contains_bound(self.end())
    }

    /// Whether the two ranges share at least one code. The default range
    /// is coincident with everything.
    pub fn is_coincident_with(&self, other: &PostalCodeRange) -> bool {
        self.is_default() || other.is_default() || self.intersects(other)
    }

    /// Whether either range contains the other, or they are coincident.
    pub fn overlaps(&self, other: &PostalCodeRange) -> bool {
        self.contains_range(other) || other.contains_range(self) || self.is_coincident_with(other)
    }

    /// Whether one range ends immediately before the other starts.
    pub fn is_adjacent_to(&self, other: &PostalCodeRange) -> bool {
        PostalCode::are_adjacent(self.start(), other.end())
            || PostalCode::are_adjacent(self.end(), other.start())
    }

    // ─── Difference ──────────────────────────────────────────────────

    /// Remove `other` from this range, leaving zero, one, or two pieces in
    /// left-to-right order.
    ///
    /// # Errors
    ///
    /// [`PostalCodeError::SubtractionInconsistency`] when a remainder is
    /// required next to a bound of `other` that has no neighbour in its
    /// format.
    pub fn subtract(&self, other: &PostalCodeRange) -> Result<Vec<PostalCodeRange>, PostalCodeError> {
        if self == other {
            return Ok(Vec::new());
        }
        if !self.is_coincident_with(other) {
            return Ok(vec![self.clone()]);
        }

        let mut pieces = Vec::with_capacity(2);

        if let Some(cut) = other.start() {
            if self.start().map_or(true, |s| s < cut) {
                let end = cut
                    .predecessor()
                    .ok_or_else(|| inconsistency(other, cut))?;
                pieces.push(PostalCodeRange::spanning(self.start().cloned(), Some(end))?);
            }
        }

        if let Some(cut) = other.end() {
            if self.end().map_or(true, |e| e > cut) {
                let start = cut
                    .successor()
                    .ok_or_else(|| inconsistency(other, cut))?;
                pieces.push(PostalCodeRange::spanning(Some(start), self.end().cloned())?);
            }
        }

        tracing::debug!(
            base = %self,
            removed = %other,
            pieces = pieces.len(),
            "subtracted postal code range"
        );
        Ok(pieces)
    }

    // ─── Union ───────────────────────────────────────────────────────

    /// Union of two ranges, assumed adjacent or overlapping.
    ///
    /// The lesser start and the greater end win; an absent bound beats any
    /// present one.
    pub fn combine(&self, other: &PostalCodeRange) -> Result<PostalCodeRange, PostalCodeError> {
        let start = match (self.start(), other.start()) {
            (Some(a), Some(b)) => Some(a.min(b).clone()),
            _ => None,
        };
        let end = match (self.end(), other.end()) {
            (Some(a), Some(b)) => Some(a.max(b).clone()),
            _ => None,
        };
        PostalCodeRange::spanning(start, end)
    }

    /// [`combine`](Self::combine), rejecting ranges separated by a gap.
    pub fn combine_checked(
        &self,
        other: &PostalCodeRange,
    ) -> Result<PostalCodeRange, PostalCodeError> {
        if !self.is_adjacent_to(other) && !self.is_coincident_with(other) {
            return Err(PostalCodeError::AdjacencyViolation {
                left: self.to_string(),
                right: other.to_string(),
            });
        }
        self.combine(other)
    }
}

/// Order of `bound` against `value`, a backing string of `code`. Bounds
/// of another table compare by key; bounds of the same table compare
/// ordinally when the formats are compatible and not at all otherwise.
fn bound_order(bound: &PostalCode, code: &PostalCode, value: &str) -> Option<Ordering> {
    if bound.table_key() != code.table_key() {
        return Some(bound.table_key().cmp(code.table_key()));
    }
    bound
        .is_format_compatible(code)
        .then(|| comparer::compare(bound.as_str(), value))
}

fn comparable(a: &PostalCode, b: &PostalCode) -> bool {
    a.table_key() != b.table_key() || a.is_format_compatible(b)
}

fn inconsistency(range: &PostalCodeRange, boundary: &PostalCode) -> PostalCodeError {
    tracing::warn!(
        range = %range,
        boundary = %boundary,
        "range boundary has no neighbour; cannot split"
    );
    PostalCodeError::SubtractionInconsistency {
        range: range.to_string(),
        boundary: boundary.to_string(),
    }
}

/// Coincidence over possibly-absent ranges; absent ranges coincide with
/// nothing.
pub fn are_coincident(left: Option<&PostalCodeRange>, right: Option<&PostalCodeRange>) -> bool {
    match (left, right) {
        (Some(l), Some(r)) => l.is_coincident_with(r),
        _ => false,
    }
}

/// Overlap over possibly-absent ranges; absent ranges overlap nothing.
pub fn are_overlapping(left: Option<&PostalCodeRange>, right: Option<&PostalCodeRange>) -> bool {
    match (left, right) {
        (Some(l), Some(r)) => l.overlaps(r),
        _ => false,
    }
}
