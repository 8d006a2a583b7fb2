//! # Zone Coverage
//!
//! [`ZoneCoverage`] maps postal-code ranges to zones (shipping, pricing,
//! tax, ...) and keeps the ranges pairwise disjoint. Assigning a range to
//! a zone carves it out of every existing entry, then merges entries of
//! the same zone that touch or overlap.
//!
//! Lookup returns the zone of the first containing range in canonical
//! order, so the most specific range wins.

use serde::Serialize;

use postzone_code::PostalCode;
use postzone_core::PostalCodeError;

use crate::range::PostalCodeRange;

/// One range and the zone it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneEntry<Z> {
    pub range: PostalCodeRange,
    pub zone: Z,
}

/// A set of disjoint, zone-labelled ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneCoverage<Z> {
    entries: Vec<ZoneEntry<Z>>,
}

impl<Z> Default for ZoneCoverage<Z> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<Z: Clone + PartialEq> ZoneCoverage<Z> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries ordered by position, lowest start first.
    pub fn entries(&self) -> &[ZoneEntry<Z>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assign `range` to `zone`, overriding whatever covered it before.
    ///
    /// On error the coverage is left unchanged.
    pub fn assign(&mut self, range: PostalCodeRange, zone: Z) -> Result<(), PostalCodeError> {
        let mut next = self.carve(&range)?;
        next.push(ZoneEntry { range, zone });
        self.entries = merge(next)?;
        Ok(())
    }

    /// Remove `range` from every entry.
    ///
    /// On error the coverage is left unchanged.
    pub fn unassign(&mut self, range: &PostalCodeRange) -> Result<(), PostalCodeError> {
        self.entries = self.carve(range)?;
        Ok(())
    }

    /// The zone covering `code`, if any.
    pub fn zone_for(&self, code: &PostalCode) -> Option<&Z> {
        self.entries
            .iter()
            .filter(|entry| entry.range.contains(code))
            .min_by(|a, b| a.range.cmp(&b.range))
            .map(|entry| &entry.zone)
    }

    /// Ranges assigned to `zone`.
    pub fn ranges_for(&self, zone: &Z) -> Vec<&PostalCodeRange> {
        self.entries
            .iter()
            .filter(|entry| entry.zone == *zone)
            .map(|entry| &entry.range)
            .collect()
    }

    fn carve(&self, range: &PostalCodeRange) -> Result<Vec<ZoneEntry<Z>>, PostalCodeError> {
        let mut carved = Vec::with_capacity(self.entries.len() + 1);
        for entry in &self.entries {
            for piece in entry.range.subtract(range)? {
                carved.push(ZoneEntry {
                    range: piece,
                    zone: entry.zone.clone(),
                });
            }
        }
        Ok(carved)
    }
}

/// Sort entries by position and fuse neighbours of the same zone.
fn merge<Z: PartialEq>(mut entries: Vec<ZoneEntry<Z>>) -> Result<Vec<ZoneEntry<Z>>, PostalCodeError> {
    entries.sort_by(|a, b| a.range.start().cmp(&b.range.start()));
    let mut merged: Vec<ZoneEntry<Z>> = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(last) = merged.last_mut() {
            if last.zone == entry.zone
                && (last.range.is_adjacent_to(&entry.range)
                    || last.range.is_coincident_with(&entry.range))
            {
                last.range = last.range.combine_checked(&entry.range)?;
                continue;
            }
        }
        merged.push(entry);
    }
    Ok(merged)
}
