//! Composition of the edit operators into candidate sets.
use hashbrown::HashSet;
use log::trace;
use rayon::prelude::*;
use smol_str::SmolStr;

use crate::alphabet::Alphabet;
use crate::edits;

/// Deduplicated set of candidate word-forms.
pub type CandidateSet = HashSet<SmolStr>;

/// Source of correction candidates for the speller cascade.
pub trait Candidates {
    /// all strings one edit away from `word`, never including `word` itself
    fn edit_distance_one(&self, word: &str) -> CandidateSet;

    /// the one-edit closure of an already computed one-edit set
    fn expand(&self, first: &CandidateSet) -> CandidateSet;

    /// all strings reachable with two rounds of single edits
    fn edit_distance_two(&self, word: &str) -> CandidateSet {
        self.expand(&self.edit_distance_one(word))
    }
}

/// Generates candidates with delete, substitute, insert and optionally
/// adjacent transposition over an [`Alphabet`].
#[derive(Debug, Clone, Copy)]
pub struct EditCandidates<'a> {
    alphabet: &'a Alphabet,
    include_transpose: bool,
}

impl<'a> EditCandidates<'a> {
    /// candidates over `alphabet` with transposition enabled
    pub fn new(alphabet: &'a Alphabet) -> EditCandidates<'a> {
        EditCandidates {
            alphabet,
            include_transpose: true,
        }
    }

    /// enables or disables adjacent transposition in both rounds
    pub fn with_transpose(mut self, include_transpose: bool) -> EditCandidates<'a> {
        self.include_transpose = include_transpose;
        self
    }

    #[inline(always)]
    fn extend_one(&self, out: &mut CandidateSet, word: &str) {
        out.extend(edits::delete(word));
        if self.include_transpose {
            out.extend(edits::transpose_adjacent(word));
        }
        out.extend(edits::substitute(word, self.alphabet));
        out.extend(edits::insert(word, self.alphabet));
    }
}

impl Candidates for EditCandidates<'_> {
    fn edit_distance_one(&self, word: &str) -> CandidateSet {
        let mut out = CandidateSet::new();
        self.extend_one(&mut out, word);
        // Self-substitution and swaps of identical neighbours reproduce the input.
        out.remove(word);
        trace!("edit_distance_one({}): {} candidates", word, out.len());
        out
    }

    fn expand(&self, first: &CandidateSet) -> CandidateSet {
        let first = first.iter().collect::<Vec<_>>();

        let out = first
            .par_iter()
            .fold(CandidateSet::new, |mut acc, w1| {
                acc.insert((*w1).clone());
                self.extend_one(&mut acc, w1);
                acc
            })
            .reduce(CandidateSet::new, |mut a, mut b| {
                if a.len() < b.len() {
                    std::mem::swap(&mut a, &mut b);
                }
                a.extend(b);
                a
            });

        trace!("expand: {} -> {} candidates", first.len(), out.len());
        out
    }
}

/// All strings one edit away from `word`, deduplicated and without `word`.
pub fn edit_distance_one(word: &str, alphabet: &Alphabet, include_transpose: bool) -> CandidateSet {
    EditCandidates::new(alphabet)
        .with_transpose(include_transpose)
        .edit_distance_one(word)
}

/// Union of [`edit_distance_one`] over every member of `edit_distance_one(word)`.
///
/// This is a closure, not an exact distance filter: the result also holds
/// strings one edit away, and usually `word` itself.
pub fn edit_distance_two(word: &str, alphabet: &Alphabet) -> CandidateSet {
    EditCandidates::new(alphabet).edit_distance_two(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edits::units;

    #[test]
    fn one_excludes_input() {
        let alphabet = Alphabet::default();
        for word in ["a", "aa", "ngaari", "ɓoɗɗi", "pucc", "man\u{0303}a"] {
            let set = edit_distance_one(word, &alphabet, true);
            assert!(!set.contains(word), "{}", word);
        }
    }

    #[test]
    fn one_is_deduplicated_union() {
        let alphabet = Alphabet::from("ab");
        let set = edit_distance_one("ab", &alphabet, true);

        let mut got = set.iter().map(|s| s.as_str()).collect::<Vec<_>>();
        got.sort_unstable();
        assert_eq!(
            got,
            vec!["a", "aa", "aab", "aba", "abb", "b", "ba", "bab", "bb"]
        );
    }

    #[test]
    fn one_without_transpose() {
        let alphabet = Alphabet::from("x");
        let with = edit_distance_one("ab", &alphabet, true);
        let without = edit_distance_one("ab", &alphabet, false);

        assert!(with.contains("ba"));
        assert!(!without.contains("ba"));
        assert_eq!(with.len(), without.len() + 1);
    }

    #[test]
    fn one_of_empty_word() {
        let alphabet = Alphabet::from("ɓɗ");
        let set = edit_distance_one("", &alphabet, true);
        assert_eq!(set.len(), 2);
        assert!(set.contains("ɓ"));
        assert!(set.contains("ɗ"));
    }

    #[test]
    fn one_lengths_within_one() {
        let alphabet = Alphabet::default();
        let word = "mbaroodi";
        let len = units(word).len();
        for candidate in edit_distance_one(word, &alphabet, true) {
            let n = units(&candidate).len();
            assert!(n + 1 >= len && n <= len + 1, "{}", candidate);
        }
    }

    #[test]
    fn two_reaches_double_edits() {
        let alphabet = Alphabet::default();
        let set = edit_distance_two("ngari", &alphabet);

        // one insertion, then a substitution
        assert!(set.contains("ngaaro"));
        // two deletions
        assert!(set.contains("gar"));
        // closure keeps one-edit members and the input
        assert!(set.contains("ngaari"));
        assert!(set.contains("ngari"));
        assert!(!set.contains("ngaaroo"));
    }

    #[test]
    fn two_is_superset_of_one() {
        let alphabet = Alphabet::from("abc");
        let candidates = EditCandidates::new(&alphabet);
        let first = candidates.edit_distance_one("cab");
        let second = candidates.expand(&first);

        assert!(first.is_subset(&second));
        assert_eq!(second, candidates.edit_distance_two("cab"));
    }

    #[test]
    fn two_keeps_diacritics_whole() {
        let alphabet = Alphabet::from("ɓŋ");
        let set = edit_distance_two("ɓa", &alphabet);
        assert!(set.iter().all(|s| s.chars().all(|c| c == 'a' || alphabet.contains(c))));
        assert!(set.contains("ŋ"));
        assert!(set.contains("aɓ"));
        assert!(set.contains("ɓaŋŋ"));
    }
}
