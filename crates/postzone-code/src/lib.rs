//! # postzone-code — Postal-Code Values
//!
//! The ordered, country-formatted postal-code value and everything needed
//! to produce one: format selection with left-padding, auto-shortening,
//! boundary expansion, and predecessor/successor stepping over the
//! matched format's per-position alphabet.
//!
//! ## Key Design Principles
//!
//! 1. **One value type.** [`PostalCode`] holds its backing string and an
//!    `Arc` to its country's format table. There is no per-country type.
//!
//! 2. **One stepping algorithm.** [`stepping::step`] is a ripple carry over
//!    the shape of the matched pattern; neighbours are re-validated through
//!    the same table before they are returned.
//!
//! 3. **Caching is optional and external.** [`PostalCodeFactory`] consults
//!    an injected [`PostalCodeCache`]; values never do.
//!
//! ## Crate Policy
//!
//! - Depends only on `postzone-core` internally.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod cache;
pub mod factory;
pub mod postal_code;
pub mod stepping;

pub use cache::{CacheKey, DashMapCache, PostalCodeCache};
pub use factory::PostalCodeFactory;
pub use postal_code::PostalCode;
