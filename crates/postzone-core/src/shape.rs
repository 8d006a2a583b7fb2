//! # Position Shapes
//!
//! A shape is the per-position alphabet of a fixed-width format: for each
//! character position, either a fixed literal or a character class. Shapes
//! are read off a format's pattern source when the pattern stays within a
//! small, fixed-width subset of regex syntax:
//!
//! - anchors `^` and `$`
//! - bracket classes such as `[A-Z]`, `[0-9R]`, `[A-Z0-9]`
//! - the `\d` escape and escaped punctuation
//! - exact repetition `{n}` (or `{n,n}`)
//!
//! Anything else (optional parts, alternation, open repetition, negated
//! classes) has no fixed layout. For those formats [`parse_shape`]
//! returns `None` and callers fall back to [`Slot::infer`], which reads
//! the alphabet of each position off the current character.

/// Stepping direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the successor.
    Forward,
    /// Towards the predecessor.
    Backward,
}

/// Outcome of stepping a single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The position moved within its alphabet; no carry.
    Moved(char),
    /// The alphabet was exhausted; the position wrapped and carries left.
    Wrapped(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Digit,
    Letter,
    Other,
}

fn kind_of(c: char) -> Kind {
    if c.is_ascii_digit() {
        Kind::Digit
    } else if c.is_ascii_alphabetic() {
        Kind::Letter
    } else {
        Kind::Other
    }
}

/// Whether two characters are both digits, both letters, or both neither.
pub fn same_kind(a: char, b: char) -> bool {
    kind_of(a) == kind_of(b)
}

/// A set of characters, stored as sorted, non-overlapping inclusive ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    ranges: Vec<(char, char)>,
}

impl CharClass {
    /// Build a class from arbitrary inclusive ranges.
    pub fn from_ranges(ranges: impl IntoIterator<Item = (char, char)>) -> Self {
        let mut ranges: Vec<(char, char)> = ranges
            .into_iter()
            .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
            .collect();
        ranges.sort_unstable();
        let mut merged: Vec<(char, char)> = Vec::with_capacity(ranges.len());
        for (lo, hi) in ranges {
            match merged.last_mut() {
                Some(last) if (lo as u32) <= (last.1 as u32).saturating_add(1) => {
                    if hi > last.1 {
                        last.1 = hi;
                    }
                }
                _ => merged.push((lo, hi)),
            }
        }
        Self { ranges: merged }
    }

    /// `0-9`.
    pub fn digits() -> Self {
        Self::from_ranges([('0', '9')])
    }

    /// `A-Z`.
    pub fn letters() -> Self {
        Self::from_ranges([('A', 'Z')])
    }

    pub fn contains(&self, c: char) -> bool {
        self.ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi)
    }

    /// Members of the class sharing the kind (digit, letter, other) of `c`.
    ///
    /// A class mixing digits and letters steps each kind separately, so a
    /// digit position rolls `9 -> 0` and a letter position rolls `Z -> A`.
    fn alphabet_like(&self, c: char) -> Vec<char> {
        let kind = kind_of(c);
        self.ranges
            .iter()
            .flat_map(|&(lo, hi)| lo..=hi)
            .filter(|&s| kind_of(s) == kind)
            .collect()
    }

    /// Step `c` one symbol within its alphabet. Returns `None` when `c` is
    /// not a member of the class.
    pub fn step(&self, c: char, direction: Direction) -> Option<Step> {
        let alphabet = self.alphabet_like(c);
        let idx = alphabet.iter().position(|&s| s == c)?;
        let last = alphabet.len() - 1;
        let step = match direction {
            Direction::Forward if idx < last => Step::Moved(alphabet[idx + 1]),
            Direction::Forward => Step::Wrapped(alphabet[0]),
            Direction::Backward if idx > 0 => Step::Moved(alphabet[idx - 1]),
            Direction::Backward => Step::Wrapped(alphabet[last]),
        };
        Some(step)
    }
}

/// One character position of a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A fixed character that never participates in carry.
    Literal(char),
    /// A variable position ranging over a class.
    Class(CharClass),
}

impl Slot {
    /// Infer a position's alphabet from its current character: digits
    /// range over `0-9`, letters over `A-Z`, anything else is literal.
    pub fn infer(c: char) -> Self {
        match kind_of(c) {
            Kind::Digit => Slot::Class(CharClass::digits()),
            Kind::Letter => Slot::Class(CharClass::letters()),
            Kind::Other => Slot::Literal(c),
        }
    }
}

/// Read the fixed-width shape of a pattern source, or `None` when the
/// pattern has no fixed layout.
pub fn parse_shape(source: &str) -> Option<Vec<Slot>> {
    ShapeParser {
        chars: source.chars().collect(),
        pos: 0,
    }
    .parse()
}

struct ShapeParser {
    chars: Vec<char>,
    pos: usize,
}

impl ShapeParser {
    fn next(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied();
        self.pos += 1;
        c
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn parse(mut self) -> Option<Vec<Slot>> {
        if self.peek() == Some('^') {
            self.pos += 1;
        }
        let mut slots: Vec<Slot> = Vec::new();
        while let Some(c) = self.next() {
            match c {
                '$' if self.peek().is_none() => break,
                '[' => slots.push(Slot::Class(self.class()?)),
                '\\' => slots.push(self.escape()?),
                '{' => {
                    let count = self.repeat()?;
                    let last = slots.pop()?;
                    slots.extend(std::iter::repeat(last).take(count));
                }
                '$' | '^' | '(' | ')' | '|' | '.' | '?' | '*' | '+' | ']' | '}' => return None,
                other => slots.push(Slot::Literal(other)),
            }
        }
        Some(slots)
    }

    fn escape(&mut self) -> Option<Slot> {
        match self.next()? {
            'd' => Some(Slot::Class(CharClass::digits())),
            c if c.is_ascii_alphanumeric() => None,
            c => Some(Slot::Literal(c)),
        }
    }

    fn class(&mut self) -> Option<CharClass> {
        if self.peek() == Some('^') {
            return None;
        }
        let mut ranges = Vec::new();
        loop {
            let c = match self.next()? {
                ']' => break,
                '\\' => match self.next()? {
                    'd' => {
                        ranges.push(('0', '9'));
                        continue;
                    }
                    e if e.is_ascii_alphanumeric() => return None,
                    e => e,
                },
                c => c,
            };
            let is_range = self.peek() == Some('-')
                && self.chars.get(self.pos + 1).is_some_and(|&n| n != ']');
            if is_range {
                self.pos += 1;
                let hi = self.next()?;
                ranges.push((c, hi));
            } else {
                ranges.push((c, c));
            }
        }
        if ranges.is_empty() {
            return None;
        }
        Some(CharClass::from_ranges(ranges))
    }

    fn repeat(&mut self) -> Option<usize> {
        let min = self.number()?;
        match self.next()? {
            '}' => Some(min),
            ',' => {
                let max = self.number()?;
                (self.next()? == '}' && max == min).then_some(min)
            }
            _ => None,
        }
    }

    fn number(&mut self) -> Option<usize> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .parse()
            .ok()
    }
}
