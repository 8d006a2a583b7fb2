//! # Input Pre-Normalization
//!
//! Free-form cleanup applied to caller input before a postal code is
//! constructed. The value model itself only strips a table's redundant
//! characters; everything else (stray punctuation, doubled spaces, known
//! country prefixes) happens here.

use std::collections::HashMap;

use crate::country::CountryCode;

/// Country-aware string cleanup.
pub trait InputNormalizer: Send + Sync {
    fn cleanup(&self, country: &CountryCode, raw: &str) -> String;
}

/// Trims, uppercases, drops punctuation other than `-`, collapses runs of
/// whitespace, and strips configured per-country prefixes.
#[derive(Debug, Clone, Default)]
pub struct BasicInputNormalizer {
    prefixes: HashMap<CountryCode, Vec<String>>,
}

impl BasicInputNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strip `prefix` from inputs for `country`, e.g. `BB` for Barbados.
    pub fn with_prefix(mut self, country: CountryCode, prefix: &str) -> Self {
        self.prefixes
            .entry(country)
            .or_default()
            .push(prefix.to_ascii_uppercase());
        self
    }
}

impl InputNormalizer for BasicInputNormalizer {
    fn cleanup(&self, country: &CountryCode, raw: &str) -> String {
        let mut cleaned = String::with_capacity(raw.len());
        for word in raw.split_whitespace() {
            let word: String = word
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '-')
                .map(|c| c.to_ascii_uppercase())
                .collect();
            if word.is_empty() {
                continue;
            }
            if !cleaned.is_empty() {
                cleaned.push(' ');
            }
            cleaned.push_str(&word);
        }

        if let Some(prefixes) = self.prefixes.get(country) {
            for prefix in prefixes {
                if let Some(rest) = cleaned.strip_prefix(prefix.as_str()) {
                    let rest = rest.trim_start_matches(&[' ', '-'][..]);
                    if !rest.is_empty() {
                        return rest.to_string();
                    }
                }
            }
        }
        cleaned
    }
}
