//! Letters used to generate substitution and insertion candidates.
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::constants::FULA_LETTERS;

/// An ordered, deduplicated set of letters.
///
/// Order only affects the order in which candidates are generated, never
/// which candidates are generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    /// Creates an alphabet, keeping the first occurrence of each letter.
    pub fn new<I: IntoIterator<Item = char>>(letters: I) -> Alphabet {
        Alphabet {
            letters: letters.into_iter().unique().collect(),
        }
    }

    /// The Fula (Pulaar) alphabet: `abɓcdɗefghijklmnŋñoprstuwyƴz`.
    pub fn fula() -> Alphabet {
        Alphabet::from(FULA_LETTERS)
    }

    /// The 26 lower-case ASCII letters.
    pub fn ascii() -> Alphabet {
        Alphabet::new('a'..='z')
    }

    /// gets the letters in insertion order
    #[inline(always)]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// iterates over the letters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().copied()
    }

    /// number of distinct letters
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// whether the alphabet has no letters at all
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// whether `ch` is part of the alphabet
    pub fn contains(&self, ch: char) -> bool {
        self.letters.contains(&ch)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::fula()
    }
}

impl From<&str> for Alphabet {
    fn from(s: &str) -> Self {
        Alphabet::new(s.chars())
    }
}

impl From<String> for Alphabet {
    fn from(s: String) -> Self {
        Alphabet::from(s.as_str())
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.letters.into_iter().collect()
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in &self.letters {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}
