//! Fixture tables shared by the unit tests.

use std::sync::Arc;

use postzone_code::PostalCode;
use postzone_core::{FormatSpec, FormatTable, PostalCodeFormat};

use crate::range::PostalCodeRange;

/// Three-digit numeric codes, `000` through `999`.
pub(crate) fn numeric3() -> Arc<FormatTable> {
    let format = PostalCodeFormat::try_from(FormatSpec {
        name: "999".into(),
        pattern: "^[0-9]{3}$".into(),
        output: "xxx".into(),
        left_padding: Some("0".into()),
        ..FormatSpec::default()
    })
    .unwrap();
    Arc::new(FormatTable::new("N3", vec![format]))
}

/// Single-letter codes, `A` through `Z`.
pub(crate) fn letters() -> Arc<FormatTable> {
    let format = PostalCodeFormat::try_from(FormatSpec {
        name: "A".into(),
        pattern: "^[A-Z]$".into(),
        output: "x".into(),
        ..FormatSpec::default()
    })
    .unwrap();
    Arc::new(FormatTable::new("L1", vec![format]))
}

/// A range over `table`; `*` leaves a bound open.
pub(crate) fn range(table: &Arc<FormatTable>, start: &str, end: &str) -> PostalCodeRange {
    let bound = |s: &str| (s != "*").then(|| PostalCode::new(Arc::clone(table), s).unwrap());
    PostalCodeRange::new(bound(start), bound(end)).unwrap()
}
