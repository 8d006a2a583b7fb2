//! # postzone-range — Postal-Code Range Algebra
//!
//! Intervals over [`postzone_code::PostalCode`] with optional bounds, and
//! the set operations used to decide zone membership and to keep zone
//! coverage disjoint.
//!
//! ## Key Design Principles
//!
//! 1. **Absent bounds are infinities.** A range with no start runs from
//!    negative infinity; one with no end runs to positive infinity. The
//!    default range has neither and contains everything.
//!
//! 2. **Immutable intervals.** Every operation returns new ranges: zero,
//!    one, or two for subtraction, exactly one for union.
//!
//! 3. **Fail loudly.** Splitting a range next to a code with no neighbour
//!    and combining across a gap are errors, never silent data loss.
//!
//! ## Crate Policy
//!
//! - Depends on `postzone-core` and `postzone-code` only.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod algebra;
pub mod coverage;
pub mod range;

#[cfg(test)]
mod testing;

pub use algebra::{are_coincident, are_overlapping};
pub use coverage::{ZoneCoverage, ZoneEntry};
pub use range::PostalCodeRange;
