//! # Country Codes
//!
//! `CountryCode` is a validated two-letter uppercase code. It is the key
//! under which format tables are published and the data that carries a
//! postal code's "country identity".
//!
//! Resolution of arbitrary caller input (legacy aliases, withdrawn codes)
//! sits behind the [`CountryResolver`] trait. [`AliasCountryResolver`] is
//! a small table-driven implementation whose aliases and allow-list are
//! supplied by the caller; no ISO tables are bundled here.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PostalCodeError;

/// A canonical two-letter country code, e.g. `GB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Validate and normalize a country code.
    ///
    /// Surrounding whitespace is trimmed and letters are uppercased.
    /// Anything other than exactly two ASCII letters is rejected.
    pub fn new(raw: &str) -> Result<Self, PostalCodeError> {
        let trimmed = raw.trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PostalCodeError::InvalidCountryCode(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// The code as an uppercase string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CountryCode {
    type Err = PostalCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = PostalCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

/// Maps caller input to a canonical country code.
pub trait CountryResolver: Send + Sync {
    /// Resolve `raw` to a canonical code or fail with
    /// [`PostalCodeError::InvalidCountryCode`].
    fn resolve(&self, raw: &str) -> Result<CountryCode, PostalCodeError>;
}

/// Resolver backed by a caller-supplied alias table and an optional
/// allow-list of assigned codes.
#[derive(Debug, Clone, Default)]
pub struct AliasCountryResolver {
    aliases: HashMap<String, CountryCode>,
    allowed: Option<HashSet<CountryCode>>,
}

impl AliasCountryResolver {
    /// A resolver with no aliases that accepts every well-formed code.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `alias` (e.g. `UK`) onto `target` (e.g. `GB`).
    pub fn with_alias(mut self, alias: &str, target: CountryCode) -> Self {
        self.aliases
            .insert(alias.trim().to_ascii_uppercase(), target);
        self
    }

    /// Restrict resolution to the given codes. Aliases must resolve into
    /// this set as well.
    pub fn with_allowed(mut self, codes: impl IntoIterator<Item = CountryCode>) -> Self {
        self.allowed = Some(codes.into_iter().collect());
        self
    }
}

impl CountryResolver for AliasCountryResolver {
    fn resolve(&self, raw: &str) -> Result<CountryCode, PostalCodeError> {
        let key = raw.trim().to_ascii_uppercase();
        let code = match self.aliases.get(&key) {
            Some(target) => target.clone(),
            None => CountryCode::new(&key)
                .map_err(|_| PostalCodeError::InvalidCountryCode(raw.to_string()))?,
        };
        if let Some(allowed) = &self.allowed {
            if !allowed.contains(&code) {
                return Err(PostalCodeError::InvalidCountryCode(raw.to_string()));
            }
        }
        Ok(code)
    }
}
