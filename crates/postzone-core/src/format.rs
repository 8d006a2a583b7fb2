//! # Postal-Code Formats
//!
//! A [`PostalCodeFormat`] is one declarative rule describing a valid shape
//! of a country's postal codes: a full pattern, an optional short pattern,
//! output templates, and the knobs that drive shortening, boundary
//! expansion, and left-padding. A [`FormatTable`] is the ordered list of
//! formats for one country; formats are tried in declaration order and the
//! first match wins.
//!
//! ## Output Templates
//!
//! Templates mix literal characters with the placeholder `x`, one per
//! backing character: `"xxxxx-xxxx"` renders `123456789` as `12345-6789`.
//! The placeholder count of the full template is the padding width; the
//! placeholder count of the short template is the truncation width used
//! by auto-shortening.
//!
//! ## Equality
//!
//! Formats compare structurally over every field. Patterns compare by
//! source text, never by compiled instance.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::shape::{parse_shape, same_kind, Slot};

/// Placeholder character in output templates.
pub const PLACEHOLDER: char = 'x';

/// Characters stripped from input when a table declares none.
pub const DEFAULT_REDUNDANT_CHARACTERS: &str = " -";

/// Which of a format's two patterns a value matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    /// The full pattern.
    Default,
    /// The abbreviated pattern.
    Short,
}

/// Direction of a boundary expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expansion {
    /// Expand to the first full code of the block.
    Lowest,
    /// Expand to the last full code of the block.
    Highest,
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expansion::Lowest => f.write_str("lowest"),
            Expansion::Highest => f.write_str("highest"),
        }
    }
}

/// A compiled match pattern together with its fixed-width shape, if any.
#[derive(Debug, Clone)]
pub struct FormatPattern {
    source: String,
    regex: Regex,
    shape: Option<Vec<Slot>>,
}

impl FormatPattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: source.to_string(),
            regex: Regex::new(source)?,
            shape: parse_shape(source),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// Per-position alphabet, when the pattern has a fixed layout.
    pub fn shape(&self) -> Option<&[Slot]> {
        self.shape.as_deref()
    }
}

impl PartialEq for FormatPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for FormatPattern {}

/// Serde record for one format, as it appears in catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatSpec {
    pub name: String,
    pub pattern: String,
    pub short_pattern: Option<String>,
    pub output: String,
    pub short_output: Option<String>,
    pub auto_shorten: bool,
    pub lowest_expansion: Option<String>,
    pub highest_expansion: Option<String>,
    pub left_padding: Option<String>,
}

/// One declarative postal-code format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalCodeFormat {
    name: String,
    pattern: FormatPattern,
    short_pattern: Option<FormatPattern>,
    output: String,
    short_output: Option<String>,
    auto_shorten: bool,
    lowest_expansion: Option<String>,
    highest_expansion: Option<String>,
    left_padding: Option<char>,
}

impl TryFrom<FormatSpec> for PostalCodeFormat {
    type Error = CatalogError;

    fn try_from(spec: FormatSpec) -> Result<Self, Self::Error> {
        let compile = |source: &str| {
            FormatPattern::new(source).map_err(|source_err| CatalogError::InvalidPattern {
                format: spec.name.clone(),
                pattern: source.to_string(),
                source: source_err,
            })
        };
        let pattern = compile(&spec.pattern)?;
        let short_pattern = spec.short_pattern.as_deref().map(compile).transpose()?;

        let left_padding = match spec.left_padding.as_deref() {
            None | Some("") => None,
            Some(p) => {
                let mut chars = p.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => {
                        return Err(CatalogError::InvalidPadding {
                            format: spec.name.clone(),
                            padding: p.to_string(),
                        })
                    }
                }
            }
        };

        Ok(Self {
            name: spec.name,
            pattern,
            short_pattern,
            output: spec.output,
            short_output: spec.short_output,
            auto_shorten: spec.auto_shorten,
            lowest_expansion: spec.lowest_expansion.filter(|s| !s.is_empty()),
            highest_expansion: spec.highest_expansion.filter(|s| !s.is_empty()),
            left_padding,
        })
    }
}

impl PostalCodeFormat {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &FormatPattern {
        &self.pattern
    }

    pub fn short_pattern(&self) -> Option<&FormatPattern> {
        self.short_pattern.as_ref()
    }

    /// The pattern backing values of the given form.
    pub fn pattern_for(&self, form: FormType) -> Option<&FormatPattern> {
        match form {
            FormType::Default => Some(&self.pattern),
            FormType::Short => self.short_pattern.as_ref(),
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn short_output(&self) -> Option<&str> {
        self.short_output.as_deref()
    }

    /// The output template for values of the given form.
    pub fn output_for(&self, form: FormType) -> Option<&str> {
        match form {
            FormType::Default => Some(&self.output),
            FormType::Short => self.short_output.as_deref(),
        }
    }

    pub fn auto_shorten(&self) -> bool {
        self.auto_shorten
    }

    pub fn left_padding(&self) -> Option<char> {
        self.left_padding
    }

    /// Filler suffix appended to a short value for the given expansion.
    pub fn expansion(&self, direction: Expansion) -> Option<&str> {
        match direction {
            Expansion::Lowest => self.lowest_expansion.as_deref(),
            Expansion::Highest => self.highest_expansion.as_deref(),
        }
    }

    /// Number of backing characters in a full value.
    pub fn full_length(&self) -> usize {
        placeholder_count(&self.output)
    }

    /// Number of backing characters in a short value, if a short form exists.
    pub fn short_length(&self) -> Option<usize> {
        self.short_output.as_deref().map(placeholder_count)
    }

    /// The form `value` matches, trying the full pattern first.
    pub fn matches(&self, value: &str) -> Option<FormType> {
        if self.pattern.is_match(value) {
            Some(FormType::Default)
        } else if self.short_pattern.as_ref().is_some_and(|p| p.is_match(value)) {
            Some(FormType::Short)
        } else {
            None
        }
    }
}

fn placeholder_count(template: &str) -> usize {
    template.chars().filter(|&c| c == PLACEHOLDER).count()
}

/// Fill `template`'s placeholders with the characters of `value`.
///
/// Returns `None` when the placeholder count differs from the value length.
pub fn render_template(template: &str, value: &str) -> Option<String> {
    if placeholder_count(template) != value.chars().count() {
        return None;
    }
    let mut chars = value.chars();
    template
        .chars()
        .map(|t| if t == PLACEHOLDER { chars.next() } else { Some(t) })
        .collect()
}

/// Per-table rule deciding whether two values may be compared for
/// adjacency and containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compatibility {
    /// Every pair of values is comparable.
    #[default]
    Any,
    /// Values must have matched the same format, and, when their backing
    /// strings have equal length, the same digit/letter layout at every
    /// position after the first.
    SameShape,
}

impl Compatibility {
    /// Apply the rule to two values, given the index of the format each
    /// matched and their backing strings.
    pub fn allows(&self, a: (usize, &str), b: (usize, &str)) -> bool {
        match self {
            Compatibility::Any => true,
            Compatibility::SameShape => {
                if a.0 != b.0 {
                    return false;
                }
                if a.1.len() != b.1.len() {
                    return true;
                }
                a.1.chars()
                    .zip(b.1.chars())
                    .skip(1)
                    .all(|(x, y)| same_kind(x, y))
            }
        }
    }
}

/// The ordered formats of one country, plus table-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTable {
    key: String,
    redundant_characters: String,
    compatibility: Compatibility,
    formats: Vec<PostalCodeFormat>,
}

impl FormatTable {
    /// A table keyed by `key` (a country code or `DEFAULT`).
    pub fn new(key: impl Into<String>, formats: Vec<PostalCodeFormat>) -> Self {
        Self {
            key: key.into(),
            redundant_characters: DEFAULT_REDUNDANT_CHARACTERS.to_string(),
            compatibility: Compatibility::Any,
            formats,
        }
    }

    pub fn with_redundant_characters(mut self, chars: impl Into<String>) -> Self {
        self.redundant_characters = chars.into();
        self
    }

    pub fn with_compatibility(mut self, compatibility: Compatibility) -> Self {
        self.compatibility = compatibility;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn formats(&self) -> &[PostalCodeFormat] {
        &self.formats
    }

    pub fn format(&self, index: usize) -> Option<&PostalCodeFormat> {
        self.formats.get(index)
    }

    pub fn compatibility(&self) -> Compatibility {
        self.compatibility
    }

    pub fn redundant_characters(&self) -> &str {
        &self.redundant_characters
    }

    /// Uppercase `raw` and drop the table's redundant characters.
    pub fn strip_redundant(&self, raw: &str) -> String {
        raw.chars()
            .filter(|c| !self.redundant_characters.contains(*c))
            .map(|c| c.to_ascii_uppercase())
            .collect()
    }
}
