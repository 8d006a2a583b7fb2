//! # Postal-Code Values
//!
//! [`PostalCode`] is an immutable, ordered value holding a normalized
//! backing string and a shared reference to the [`FormatTable`] it was
//! matched against. One type serves every country; the table carries the
//! country identity.
//!
//! ## Construction
//!
//! 1. Uppercase the input and strip the table's redundant characters.
//! 2. Try each format in order, full pattern before short pattern.
//! 3. Failing that, left-pad the input for every format that declares a
//!    padding character, to the short width and then the full width, and
//!    retry both patterns.
//! 4. No match by either route is a [`PostalCodeError::FormatMismatch`].
//! 5. A full match on a format that requests auto-shortening is truncated
//!    to the short width when the caller allows it.
//! 6. Short values remember their lowest and highest expansions.
//!
//! ## Ordering
//!
//! Values order by table key first, then ordinally on their case-folded
//! backing strings. Within one table this is plain ordinal order; across
//! tables every table occupies one contiguous block, so an open range
//! bounded in one table still has a definite position for every code of
//! every other table. An absent value is `Option::None`, which orders
//! before every present value and equal to itself.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use postzone_core::format::render_template;
use postzone_core::{
    comparer, Direction, Expansion, FormType, FormatTable, PostalCodeError, PostalCodeFormat,
};

use crate::stepping;

/// A postal code matched against a country's format table.
#[derive(Debug, Clone)]
pub struct PostalCode {
    value: String,
    table: Arc<FormatTable>,
    format_index: usize,
    form: FormType,
    allow_short: bool,
    lowest: Option<String>,
    highest: Option<String>,
}

impl PostalCode {
    /// Construct a value, allowing auto-shortening.
    pub fn new(table: Arc<FormatTable>, raw: &str) -> Result<Self, PostalCodeError> {
        Self::with_policy(table, raw, true)
    }

    /// Construct a value, keeping full-form matches at full length.
    pub fn new_full(table: Arc<FormatTable>, raw: &str) -> Result<Self, PostalCodeError> {
        Self::with_policy(table, raw, false)
    }

    /// Construct a value with an explicit auto-shortening policy.
    pub fn with_policy(
        table: Arc<FormatTable>,
        raw: &str,
        allow_short: bool,
    ) -> Result<Self, PostalCodeError> {
        let input = table.strip_redundant(raw);
        let Some((format_index, mut form, mut value)) = select_format(&table, &input) else {
            return Err(PostalCodeError::FormatMismatch {
                input,
                table: table.key().to_string(),
            });
        };

        let format = &table.formats()[format_index];
        if form == FormType::Default && allow_short && format.auto_shorten() {
            if let (Some(len), Some(short)) = (format.short_length(), format.short_pattern()) {
                let truncated: String = value.chars().take(len).collect();
                if short.is_match(&truncated) {
                    value = truncated;
                    form = FormType::Short;
                }
            }
        }

        let (lowest, highest) = match form {
            FormType::Short => (
                format.expansion(Expansion::Lowest).map(|f| format!("{value}{f}")),
                format.expansion(Expansion::Highest).map(|f| format!("{value}{f}")),
            ),
            FormType::Default => (None, None),
        };

        Ok(Self {
            value,
            table,
            format_index,
            form,
            allow_short,
            lowest,
            highest,
        })
    }

    /// The normalized backing string.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The format table this value was matched against.
    pub fn table(&self) -> &Arc<FormatTable> {
        &self.table
    }

    /// Key of the table this value was matched against.
    pub fn table_key(&self) -> &str {
        self.table.key()
    }

    /// The matched format.
    pub fn format(&self) -> &PostalCodeFormat {
        &self.table.formats()[self.format_index]
    }

    /// Position of the matched format within its table.
    pub fn format_index(&self) -> usize {
        self.format_index
    }

    /// Whether the value holds the full or the short form.
    pub fn form(&self) -> FormType {
        self.form
    }

    /// Auto-shortening policy the value was built with; neighbours inherit it.
    pub fn allows_short(&self) -> bool {
        self.allow_short
    }

    /// The backing string rendered through the matched output template.
    ///
    /// Falls back to the backing string when the template width does not
    /// fit the value (variable-width formats).
    pub fn to_human_readable(&self) -> String {
        self.format()
            .output_for(self.form)
            .and_then(|template| render_template(template, &self.value))
            .unwrap_or_else(|| self.value.clone())
    }

    /// Lowest full code covered by this value; the value itself when it
    /// is already full or declares no filler.
    pub fn lowest_expanded(&self) -> &str {
        self.lowest.as_deref().unwrap_or(&self.value)
    }

    /// Highest full code covered by this value; the value itself when it
    /// is already full or declares no filler.
    pub fn highest_expanded(&self) -> &str {
        self.highest.as_deref().unwrap_or(&self.value)
    }

    /// Expand a short value to the first full code of its block.
    pub fn expand_as_lowest(&self) -> Result<PostalCode, PostalCodeError> {
        self.expand(Expansion::Lowest)
    }

    /// Expand a short value to the last full code of its block.
    pub fn expand_as_highest(&self) -> Result<PostalCode, PostalCodeError> {
        self.expand(Expansion::Highest)
    }

    fn expand(&self, direction: Expansion) -> Result<PostalCode, PostalCodeError> {
        if self.form == FormType::Default {
            return Ok(self.clone());
        }
        let expanded = match direction {
            Expansion::Lowest => self.lowest.as_deref(),
            Expansion::Highest => self.highest.as_deref(),
        };
        match expanded {
            Some(full) => Self::new_full(Arc::clone(&self.table), full),
            None => Err(PostalCodeError::BoundaryExpansionUnavailable {
                code: self.value.clone(),
                direction,
            }),
        }
    }

    /// The previous value in this format's alphabet, or `None` at its start.
    pub fn predecessor(&self) -> Option<PostalCode> {
        self.neighbour(Direction::Backward)
    }

    /// The next value in this format's alphabet, or `None` at its end.
    pub fn successor(&self) -> Option<PostalCode> {
        self.neighbour(Direction::Forward)
    }

    fn neighbour(&self, direction: Direction) -> Option<PostalCode> {
        let shape = self
            .format()
            .pattern_for(self.form)
            .and_then(|pattern| pattern.shape());
        let stepped = stepping::step(&self.value, shape, direction)?;
        match Self::with_policy(Arc::clone(&self.table), &stepped, self.allow_short) {
            Ok(code) => Some(code),
            Err(err) => {
                tracing::debug!(
                    code = %self.value,
                    candidate = %stepped,
                    error = %err,
                    "stepped value failed format validation"
                );
                None
            }
        }
    }

    /// Whether the two values may be compared for adjacency and containment
    /// under their table's compatibility rule.
    pub fn is_format_compatible(&self, other: &PostalCode) -> bool {
        self.table_key() == other.table_key()
            && self.table.compatibility().allows(
                (self.format_index, &self.value),
                (other.format_index, &other.value),
            )
    }

    /// Whether `other` is this value's predecessor or successor.
    pub fn is_adjacent_to(&self, other: &PostalCode) -> bool {
        self.is_format_compatible(other)
            && (self.predecessor().as_ref() == Some(other)
                || self.successor().as_ref() == Some(other))
    }

    /// Symmetric adjacency over possibly-absent values. Absent values are
    /// never adjacent to anything.
    pub fn are_adjacent(left: Option<&PostalCode>, right: Option<&PostalCode>) -> bool {
        match (left, right) {
            (Some(l), Some(r)) => l.is_adjacent_to(r) && r.is_adjacent_to(l),
            _ => false,
        }
    }
}

/// First format (and form) matching `input`, directly or after padding.
fn select_format(table: &FormatTable, input: &str) -> Option<(usize, FormType, String)> {
    if input.is_empty() {
        return None;
    }

    for (index, format) in table.formats().iter().enumerate() {
        if let Some(form) = format.matches(input) {
            return Some((index, form, input.to_string()));
        }
    }

    let len = input.chars().count();
    for (index, format) in table.formats().iter().enumerate() {
        let Some(pad) = format.left_padding() else {
            continue;
        };
        for width in format.short_length().into_iter().chain([format.full_length()]) {
            if width <= len {
                continue;
            }
            let padded: String = std::iter::repeat(pad)
                .take(width - len)
                .chain(input.chars())
                .collect();
            if let Some(form) = format.matches(&padded) {
                tracing::debug!(
                    input,
                    padded = %padded,
                    format = format.name(),
                    "postal code matched after left-padding"
                );
                return Some((index, form, padded));
            }
        }
    }
    None
}

impl PartialEq for PostalCode {
    fn eq(&self, other: &Self) -> bool {
        self.table_key() == other.table_key() && comparer::equals(&self.value, &other.value)
    }
}

impl Eq for PostalCode {}

impl Ord for PostalCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.table_key()
            .cmp(other.table_key())
            .then_with(|| comparer::compare(&self.value, &other.value))
    }
}

impl PartialOrd for PostalCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for PostalCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.table_key().hash(state);
        comparer::hash_into(&self.value, state);
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Serialize for PostalCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PostalCode", 2)?;
        state.serialize_field("table", self.table_key())?;
        state.serialize_field("code", &self.value)?;
        state.end()
    }
}
