//! # Ordinal Comparer
//!
//! Ordinal, ASCII-case-insensitive comparison of backing strings. Postal
//! codes compare character by character on their uppercased code points,
//! with no locale or collation rules. Hashing folds case the same way so
//! that `equals(a, b)` implies equal hashes.

use std::cmp::Ordering;
use std::hash::Hasher;

/// Compare two strings ordinally, ignoring ASCII case.
pub fn compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(|c| c.to_ascii_uppercase())
        .cmp(b.chars().map(|c| c.to_ascii_uppercase()))
}

/// Ordinal equality, ignoring ASCII case.
pub fn equals(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Feed the case-folded form of `s` into `state`.
pub fn hash_into<H: Hasher>(s: &str, state: &mut H) {
    for c in s.chars() {
        state.write_u32(c.to_ascii_uppercase() as u32);
    }
    state.write_u8(0xff);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(s: &str) -> u64 {
        let mut h = DefaultHasher::new();
        hash_into(s, &mut h);
        h.finish()
    }

    #[test]
    fn test_compare_ignores_case() {
        assert_eq!(compare("a1b2c3", "A1B2C3"), Ordering::Equal);
        assert!(equals("sw1a", "SW1A"));
    }

    #[test]
    fn test_compare_is_ordinal() {
        assert_eq!(compare("0999", "1000"), Ordering::Less);
        assert_eq!(compare("Z", "0"), Ordering::Greater);
        // Shorter prefix sorts first.
        assert_eq!(compare("123", "1234"), Ordering::Less);
    }

    #[test]
    fn test_hash_consistent_with_equals() {
        assert_eq!(hash_of("ab12"), hash_of("AB12"));
        assert_ne!(hash_of("AB12"), hash_of("AB13"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(s: &str) -> u64 {
        let mut h = DefaultHasher::new();
        hash_into(s, &mut h);
        h.finish()
    }

    proptest! {
        #[test]
        fn compare_is_antisymmetric(a in "[0-9A-Za-z -]{0,8}", b in "[0-9A-Za-z -]{0,8}") {
            prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
            prop_assert_eq!(compare(&a, &b) == Ordering::Equal, equals(&a, &b));
        }

        #[test]
        fn compare_is_transitive(
            a in "[0-9A-Z]{1,4}",
            b in "[0-9A-Z]{1,4}",
            c in "[0-9A-Z]{1,4}",
        ) {
            if compare(&a, &b).is_le() && compare(&b, &c).is_le() {
                prop_assert!(compare(&a, &c).is_le());
            }
        }

        #[test]
        fn case_folding_keeps_hash_and_order(a in "[0-9A-Za-z]{0,8}", b in "[0-9A-Za-z]{0,8}") {
            let upper = a.to_ascii_uppercase();
            prop_assert_eq!(hash_of(&a), hash_of(&upper));
            prop_assert_eq!(compare(&a, &b), compare(&upper, &b));
        }
    }
}
