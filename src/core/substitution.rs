//! Look-alike substitutions applied before encoding.
//!
//! Several characters that commonly show up in UTF-8 text have no mapping in
//! Shift_JIS or EUC-JP, or map to a glyph the reader would not expect. Each
//! entry here points at a visually equivalent character that does encode.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub(crate) const SEED: &[(char, char)] = &[
    // Wave dash -> fullwidth tilde (what 0x81 0x60 decodes to)
    ('\u{301C}', '\u{FF5E}'),
    // Hyphen and minus sign -> fullwidth hyphen-minus
    ('\u{2010}', '\u{FF0D}'),
    ('\u{2212}', '\u{FF0D}'),
    // Em dash -> horizontal bar
    ('\u{2014}', '\u{2015}'),
    // Yen sign -> fullwidth yen sign
    ('\u{00A5}', '\u{FFE5}'),
    // Curly and low double quotes
    ('\u{201C}', '"'),
    ('\u{201D}', '"'),
    ('\u{201E}', '"'),
    // Curly and low single quotes
    ('\u{2018}', '\''),
    ('\u{2019}', '\''),
    ('\u{201A}', '\''),
];

static TABLE: Lazy<SubstitutionTable> = Lazy::new(|| SubstitutionTable {
    map: SEED.iter().copied().collect(),
});

/// Immutable `char -> char` mapping shared by every encoder in the process.
#[derive(Debug)]
pub struct SubstitutionTable {
    map: HashMap<char, char>,
}

impl SubstitutionTable {
    /// The process-wide table, built on first use.
    pub fn global() -> &'static SubstitutionTable {
        &TABLE
    }

    /// Replacement for `c`, or `None` when `c` has no entry.
    pub fn lookup(&self, c: char) -> Option<char> {
        self.map.get(&c).copied()
    }

    /// Replacement for `c`, falling back to `c` itself.
    pub fn substitute(&self, c: char) -> char {
        self.lookup(c).unwrap_or(c)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
