#![forbid(unsafe_code)]

//! The ordered glyph ring a flap cycles through.
//!
//! An [`Alphabet`] is an immutable sequence of distinct characters. Positions
//! wrap: [`Alphabet::letter_at`] accepts any integer and reduces it with
//! Euclidean remainder, so animation code can let indices run past the end
//! (or below zero) without ever indexing out of bounds.
//!
//! # Invariants
//!
//! 1. `len() >= 2` and every glyph is distinct.
//! 2. `letter_at(i) == letter_at(i + len())` for every `i`.
//! 3. `index_of` never fails: glyphs outside the ring resolve to the last
//!    position, which holds the fallback symbol.
//!
//! # Failure Modes
//!
//! - Fewer than two glyphs: [`AlphabetError::TooShort`].
//! - A glyph appearing twice: [`AlphabetError::DuplicateGlyph`].

use std::fmt;

/// Glyph ring used by the reference board: blank, `A`-`Z`, `0`-`9`, and a
/// trailing bullet that stands in for anything unrecognized.
pub const STANDARD_GLYPHS: &str = " ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789•";

/// Character used to pad text shorter than the board.
pub const BLANK: char = ' ';

/// Errors from building an [`Alphabet`] out of caller-supplied glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    /// The ring needs at least two glyphs to flip between.
    TooShort { len: usize },
    /// The same glyph appears at two positions.
    DuplicateGlyph { glyph: char, first: usize, second: usize },
}

impl fmt::Display for AlphabetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len } => {
                write!(f, "alphabet needs at least 2 glyphs, got {len}")
            }
            Self::DuplicateGlyph {
                glyph,
                first,
                second,
            } => write!(
                f,
                "glyph {glyph:?} appears at positions {first} and {second}"
            ),
        }
    }
}

impl std::error::Error for AlphabetError {}

/// Ordered, wrapping sequence of flap glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    glyphs: Box<[char]>,
}

impl Alphabet {
    /// Build an alphabet from an ordered glyph sequence.
    ///
    /// The last glyph doubles as the fallback for characters that are not in
    /// the ring.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than two glyphs or any glyph
    /// repeats.
    pub fn new(glyphs: impl IntoIterator<Item = char>) -> Result<Self, AlphabetError> {
        let glyphs: Box<[char]> = glyphs.into_iter().collect();
        if glyphs.len() < 2 {
            return Err(AlphabetError::TooShort { len: glyphs.len() });
        }
        for (second, glyph) in glyphs.iter().enumerate() {
            if let Some(first) = glyphs[..second].iter().position(|g| g == glyph) {
                return Err(AlphabetError::DuplicateGlyph {
                    glyph: *glyph,
                    first,
                    second,
                });
            }
        }
        Ok(Self { glyphs })
    }

    /// The reference board's alphabet ([`STANDARD_GLYPHS`]).
    #[must_use]
    pub fn standard() -> Self {
        Self {
            glyphs: STANDARD_GLYPHS.chars().collect(),
        }
    }

    /// Number of glyphs in the ring.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; an alphabet holds at least two glyphs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Ring length as a signed index, for arithmetic on flip positions.
    #[inline]
    #[must_use]
    pub fn size(&self) -> i64 {
        self.glyphs.len() as i64
    }

    /// Position of the fallback glyph (always the last one).
    #[inline]
    #[must_use]
    pub fn fallback_index(&self) -> usize {
        self.glyphs.len() - 1
    }

    /// The fallback glyph.
    #[must_use]
    pub fn fallback(&self) -> char {
        self.glyphs[self.fallback_index()]
    }

    /// Glyph at `index`, wrapping in both directions.
    #[inline]
    #[must_use]
    pub fn letter_at(&self, index: i64) -> char {
        self.glyphs[index.rem_euclid(self.size()) as usize]
    }

    /// Position of `ch` in the ring, after folding it to uppercase.
    ///
    /// Characters that are not in the ring map to [`Self::fallback_index`].
    #[must_use]
    pub fn index_of(&self, ch: char) -> usize {
        let folded = fold_upper(ch);
        self.glyphs
            .iter()
            .position(|&g| g == folded)
            .unwrap_or_else(|| self.fallback_index())
    }

    /// Whether `ch` (case-folded) has its own position in the ring.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        let folded = fold_upper(ch);
        self.glyphs.contains(&folded)
    }

    /// Iterate over the glyphs in ring order.
    pub fn glyphs(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.iter().copied()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Single-character uppercase mapping.
///
/// Characters whose uppercase form expands to several code points (`ß`) are
/// left unchanged.
fn fold_upper(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout() {
        let a = Alphabet::standard();
        assert_eq!(a.len(), 38);
        assert_eq!(a.letter_at(0), ' ');
        assert_eq!(a.letter_at(1), 'A');
        assert_eq!(a.letter_at(26), 'Z');
        assert_eq!(a.letter_at(27), '0');
        assert_eq!(a.letter_at(37), '•');
        assert_eq!(a.fallback(), '•');
    }

    #[test]
    fn letter_at_wraps_forward() {
        let a = Alphabet::standard();
        assert_eq!(a.letter_at(38), ' ');
        assert_eq!(a.letter_at(39), 'A');
        assert_eq!(a.letter_at(38 * 5 + 3), 'C');
    }

    #[test]
    fn letter_at_wraps_negative() {
        let a = Alphabet::standard();
        assert_eq!(a.letter_at(-1), '•');
        assert_eq!(a.letter_at(-38), ' ');
        assert_eq!(a.letter_at(-37), 'A');
    }

    #[test]
    fn index_of_is_case_insensitive() {
        let a = Alphabet::standard();
        assert_eq!(a.index_of('c'), 3);
        assert_eq!(a.index_of('C'), 3);
        assert_eq!(a.index_of('z'), 26);
    }

    #[test]
    fn unknown_glyphs_fall_back() {
        let a = Alphabet::standard();
        assert_eq!(a.index_of('?'), 37);
        assert_eq!(a.index_of('é'), 37);
        assert_eq!(a.index_of('ß'), 37);
        assert!(!a.contains('?'));
        assert!(a.contains('q'));
    }

    #[test]
    fn blank_is_first_not_fallback() {
        let a = Alphabet::standard();
        assert_eq!(a.index_of(BLANK), 0);
    }

    #[test]
    fn custom_alphabet() {
        let a = Alphabet::new("01?".chars()).unwrap();
        assert_eq!(a.size(), 3);
        assert_eq!(a.index_of('1'), 1);
        assert_eq!(a.index_of('x'), 2);
        assert_eq!(a.letter_at(4), '1');
    }

    #[test]
    fn rejects_short_alphabet() {
        assert_eq!(
            Alphabet::new("x".chars()),
            Err(AlphabetError::TooShort { len: 1 })
        );
        assert_eq!(
            Alphabet::new(std::iter::empty()),
            Err(AlphabetError::TooShort { len: 0 })
        );
    }

    #[test]
    fn rejects_duplicates() {
        let err = Alphabet::new("ABCA".chars()).unwrap_err();
        assert_eq!(
            err,
            AlphabetError::DuplicateGlyph {
                glyph: 'A',
                first: 0,
                second: 3
            }
        );
        assert!(err.to_string().contains("positions 0 and 3"));
    }
}
