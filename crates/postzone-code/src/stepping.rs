//! # Mixed-Radix Stepping
//!
//! A backing string is read as a number whose radix varies by position:
//! each position ranges over its own alphabet (digits, letters, or a single
//! fixed literal). Stepping by one unit is a right-to-left ripple carry.
//!
//! The rightmost variable position moves to the next (or previous) symbol
//! of its alphabet. When the alphabet is exhausted the position wraps and
//! the carry moves one position left. Literal positions are skipped. A
//! carry past the leftmost variable position means there is no neighbour.

use postzone_core::shape::{Direction, Slot, Step};

/// Step `value` one unit in `direction`.
///
/// `shape` is the per-position alphabet of the matched pattern. When it is
/// absent or its width differs from `value`, each position's alphabet is
/// inferred from its current character.
pub fn step(value: &str, shape: Option<&[Slot]>, direction: Direction) -> Option<String> {
    let mut chars: Vec<char> = value.chars().collect();
    let inferred: Vec<Slot>;
    let slots: &[Slot] = match shape {
        Some(shape) if shape.len() == chars.len() => shape,
        _ => {
            inferred = chars.iter().map(|&c| Slot::infer(c)).collect();
            &inferred
        }
    };

    for (pos, slot) in slots.iter().enumerate().rev() {
        let Slot::Class(class) = slot else {
            continue;
        };
        match class.step(chars[pos], direction)? {
            Step::Moved(c) => {
                chars[pos] = c;
                return Some(chars.into_iter().collect());
            }
            Step::Wrapped(c) => chars[pos] = c,
        }
    }
    None
}
