//! Character palettes and the luminosity lookup
//!
//! A palette orders characters from visually darkest to lightest. The
//! built-in default covers the whole printable ASCII range and is used
//! whenever no font is supplied to measure a palette from.

use crate::error::{Error, Result};
use std::collections::HashSet;

/// Built-in palette, darkest ('B') to lightest (space)
///
/// 95 characters: every code point in [32, 127), pre-ordered by measured
/// darkness in a bold monospace face.
pub const DEFAULT_PALETTE: [char; 95] = [
    'B', '@', 'M', 'Q', 'W', 'N', 'g', 'R', 'D', '#', 'H', 'O', '&', '0', 'K', '8', 'U', 'd', 'b',
    '6', 'p', 'q', '9', 'G', 'E', 'A', '$', 'm', 'h', 'P', 'Z', 'k', 'X', 'S', 'V', 'a', 'e', '5',
    '4', '3', 'y', 'w', '2', 'F', 'I', 'o', 'u', 'n', 'j', 'C', 'Y', '1', 'f', 't', 'J', '{', '}',
    'z', '%', 'x', 'T', 's', 'l', '7', 'L', '[', 'v', ']', 'i', 'c', '=', ')', '(', '+', '|', '<',
    '>', 'r', '?', '*', '/', '\\', '!', ';', '"', '^', '~', '_', '-', ',', ':', '\'', '`', '.',
    ' ',
];

/// Maximum luminosity of a single pixel
pub const MAX_LUMINOSITY: f64 = 255.0;

/// An ordered alphabet of distinct characters, darkest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    chars: Vec<char>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            chars: DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl Palette {
    /// Build a palette from characters already ordered darkest to lightest
    ///
    /// # Errors
    /// `InvalidParameter` if `chars` is empty or contains duplicates.
    pub fn from_chars(chars: Vec<char>) -> Result<Self> {
        if chars.is_empty() {
            return Err(Error::InvalidParameter(
                "palette must contain at least one character".into(),
            ));
        }

        let mut seen = HashSet::with_capacity(chars.len());
        if let Some(dup) = chars.iter().find(|c| !seen.insert(**c)) {
            return Err(Error::InvalidParameter(format!(
                "palette contains duplicate character {dup:?}"
            )));
        }

        Ok(Self { chars })
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; a palette holds at least one character
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn darkest(&self) -> char {
        self.chars[0]
    }

    pub fn lightest(&self) -> char {
        self.chars[self.chars.len() - 1]
    }

    /// Map a luminosity to a palette index
    ///
    /// `floor(luminosity * len / 255)`, clamped to `[0, len - 1]` so that
    /// a pure white pixel lands on the last entry instead of one past it.
    pub fn index_for(&self, luminosity: f64) -> usize {
        let levels = self.chars.len();
        let scaled = (luminosity * levels as f64 / MAX_LUMINOSITY).floor();

        if scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(levels - 1)
        }
    }

    /// Character for a luminosity value
    #[inline]
    pub fn char_for(&self, luminosity: f64) -> char {
        self.chars[self.index_for(luminosity)]
    }
}
