//! Single-edit operators: delete, transpose, substitute and insert.
//!
//! Each operator is a lazy iterator over the variants of one word. Words are
//! split into grapheme units first, so every edit removes, moves or places a
//! whole user-perceived character. Variants are built as [`SmolStr`], which
//! keeps short candidates off the heap.
//!
//! Operators do not deduplicate: substituting a letter with itself yields the
//! input word, and swapping two identical neighbours does too.
use std::iter::FusedIterator;

use smol_str::SmolStr;

use crate::alphabet::Alphabet;
use crate::tokenizer::Tokenize;

/// Splits `word` into its grapheme units.
#[inline(always)]
pub fn units(word: &str) -> Vec<&str> {
    word.graphemes().collect()
}

/// Replaces `removed` units starting at `at` with `inserted`.
#[inline(always)]
fn splice(units: &[&str], at: usize, removed: usize, inserted: &[&str]) -> SmolStr {
    units[..at]
        .iter()
        .chain(inserted)
        .chain(&units[at + removed..])
        .copied()
        .collect()
}

/// Every variant of `word` with one unit removed.
pub fn delete(word: &str) -> Deletes<'_> {
    Deletes {
        units: units(word),
        pos: 0,
    }
}

/// Every variant of `word` with two neighbouring units swapped.
pub fn transpose_adjacent(word: &str) -> Transposes<'_> {
    Transposes {
        units: units(word),
        pos: 0,
    }
}

/// Every variant of `word` with one unit replaced by a letter of `alphabet`.
pub fn substitute<'a>(word: &'a str, alphabet: &'a Alphabet) -> Substitutes<'a> {
    Substitutes {
        units: units(word),
        letters: alphabet.letters(),
        pos: 0,
        letter: 0,
    }
}

/// Every variant of `word` with one letter of `alphabet` inserted, at every
/// position including both ends.
pub fn insert<'a>(word: &'a str, alphabet: &'a Alphabet) -> Inserts<'a> {
    Inserts {
        units: units(word),
        letters: alphabet.letters(),
        pos: 0,
        letter: 0,
    }
}

/// Iterator returned by [`delete`].
#[derive(Debug, Clone)]
pub struct Deletes<'a> {
    units: Vec<&'a str>,
    pos: usize,
}

impl<'a> Iterator for Deletes<'a> {
    type Item = SmolStr;

    fn next(&mut self) -> Option<SmolStr> {
        if self.pos >= self.units.len() {
            return None;
        }

        let variant = splice(&self.units, self.pos, 1, &[]);
        self.pos += 1;
        Some(variant)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.units.len().saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Deletes<'_> {}
impl FusedIterator for Deletes<'_> {}

/// Iterator returned by [`transpose_adjacent`].
#[derive(Debug, Clone)]
pub struct Transposes<'a> {
    units: Vec<&'a str>,
    pos: usize,
}

impl<'a> Iterator for Transposes<'a> {
    type Item = SmolStr;

    fn next(&mut self) -> Option<SmolStr> {
        if self.pos + 1 >= self.units.len() {
            return None;
        }

        let i = self.pos;
        let variant = splice(&self.units, i, 2, &[self.units[i + 1], self.units[i]]);
        self.pos += 1;
        Some(variant)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.units.len().saturating_sub(self.pos + 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Transposes<'_> {}
impl FusedIterator for Transposes<'_> {}

/// Iterator returned by [`substitute`].
#[derive(Debug, Clone)]
pub struct Substitutes<'a> {
    units: Vec<&'a str>,
    letters: &'a [char],
    pos: usize,
    letter: usize,
}

impl<'a> Iterator for Substitutes<'a> {
    type Item = SmolStr;

    fn next(&mut self) -> Option<SmolStr> {
        if self.pos >= self.units.len() {
            return None;
        }

        let mut buf = [0u8; 4];
        let letter: &str = self.letters.get(self.letter)?.encode_utf8(&mut buf);
        let variant = splice(&self.units, self.pos, 1, &[letter]);

        self.letter += 1;
        if self.letter == self.letters.len() {
            self.letter = 0;
            self.pos += 1;
        }

        Some(variant)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.units.len().saturating_sub(self.pos) * self.letters.len())
            .saturating_sub(self.letter);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Substitutes<'_> {}
impl FusedIterator for Substitutes<'_> {}

/// Iterator returned by [`insert`].
#[derive(Debug, Clone)]
pub struct Inserts<'a> {
    units: Vec<&'a str>,
    letters: &'a [char],
    pos: usize,
    letter: usize,
}

impl<'a> Iterator for Inserts<'a> {
    type Item = SmolStr;

    fn next(&mut self) -> Option<SmolStr> {
        if self.pos > self.units.len() {
            return None;
        }

        let mut buf = [0u8; 4];
        let letter: &str = self.letters.get(self.letter)?.encode_utf8(&mut buf);
        let variant = splice(&self.units, self.pos, 0, &[letter]);

        self.letter += 1;
        if self.letter == self.letters.len() {
            self.letter = 0;
            self.pos += 1;
        }

        Some(variant)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let positions = (self.units.len() + 1).saturating_sub(self.pos);
        let remaining = (positions * self.letters.len()).saturating_sub(self.letter);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Inserts<'_> {}
impl FusedIterator for Inserts<'_> {}
