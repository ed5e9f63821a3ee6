//! Ranking corrections of a word against a corpus vocabulary.

use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use unic_ucd_category::GeneralCategory;

use self::error::SpellerError;
use crate::alphabet::Alphabet;
use crate::candidates::{Candidates, EditCandidates};
use crate::constants::{DEFAULT_MAX_EDIT_ONE_LEN, DEFAULT_MAX_EDIT_TWO_LEN, DEFAULT_N_BEST};
use crate::speller::suggestion::Suggestion;
use crate::tokenizer::{lower_case, Tokenize};
use crate::vocabulary::VocabularyModel;

pub mod error;
pub mod suggestion;

/// What to return when no tier of the cascade finds a known word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// the unverified input, with probability 0
    Original,
    /// no suggestions at all
    Nothing,
}

/// Tuning for the correction cascade.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpellerConfig {
    /// maximum number of suggestions, at least one
    pub n_best: usize,
    /// whether adjacent transpositions are generated
    pub include_transpose: bool,
    /// what the last tier returns
    pub fallback: Fallback,
    /// inputs longer than this many units skip both edit tiers
    pub max_edit_one_len: Option<usize>,
    /// inputs longer than this many units skip the two-edit tier
    pub max_edit_two_len: Option<usize>,
    /// also accept the lower-cased input as a known word
    ///
    /// Only the first tier looks at the lower-cased form. Edits and the
    /// fallback always start from the input as given.
    pub fold_case: bool,
}

impl SpellerConfig {
    /// Ten suggestions, transpositions on, the input as fallback, no case folding.
    pub const fn default() -> SpellerConfig {
        SpellerConfig {
            n_best: DEFAULT_N_BEST,
            include_transpose: true,
            fallback: Fallback::Original,
            max_edit_one_len: Some(DEFAULT_MAX_EDIT_ONE_LEN),
            max_edit_two_len: Some(DEFAULT_MAX_EDIT_TWO_LEN),
            fold_case: false,
        }
    }
}

/// The cascade tier that produced a set of suggestions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// the input is a known word
    Known,
    /// known words one edit away
    EditOne,
    /// known words two edits away
    EditTwo,
    /// nothing known was found
    Unknown,
}

/// Ranked suggestions together with the tier they came from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Corrections {
    /// the tier that produced `suggestions`
    pub tier: Tier,
    /// best first, at most `n_best`
    pub suggestions: Vec<Suggestion>,
}

/// Spell-checking over a shared, read-only speller.
pub trait Speller {
    /// whether `word` (or its lower-cased form) is known; words without letters always are
    fn is_correct(self: Arc<Self>, word: &str) -> bool;
    /// suggestions for `word` under [`SpellerConfig::default`]
    fn suggest(self: Arc<Self>, word: &str) -> Result<Vec<Suggestion>, SpellerError>;
    /// suggestions for `word` under `config`
    fn suggest_with_config(
        self: Arc<Self>,
        word: &str,
        config: &SpellerConfig,
    ) -> Result<Vec<Suggestion>, SpellerError>;
}

/// Ranks known words near the input by their corpus probability.
///
/// Tiers are tried in order and the first one with any known word wins:
/// the input itself, words one edit away, words two edits away, and finally
/// the [`Fallback`]. Suggestions are sorted by descending probability, ties
/// by the word-form, and truncated to `config.n_best`.
pub fn get_corrections<C: Candidates + ?Sized>(
    word: &str,
    vocabulary: &VocabularyModel,
    candidates: &C,
    config: &SpellerConfig,
) -> Result<Corrections, SpellerError> {
    if config.n_best == 0 {
        return Err(SpellerError::InvalidSuggestionCount(config.n_best));
    }

    let (tier, words) = if vocabulary.contains(word) {
        (Tier::Known, vec![SmolStr::from(word)])
    } else if let Some(lower) = folded_known(word, vocabulary, config) {
        (Tier::Known, vec![lower])
    } else if exceeds_limit(word, config.max_edit_one_len) {
        warn!("{}: too long for candidate generation, skipping", word);
        fallback(word, config)
    } else {
        let first = candidates.edit_distance_one(word);
        let known = vocabulary.known(&first);
        debug!("{}: {} one-edit candidates, {} known", word, first.len(), known.len());

        if !known.is_empty() {
            (Tier::EditOne, known)
        } else if exceeds_limit(word, config.max_edit_two_len) {
            warn!("{}: too long for two-edit candidates, skipping", word);
            fallback(word, config)
        } else {
            let second = candidates.expand(&first);
            let known = vocabulary.known(&second);
            debug!("{}: {} two-edit candidates, {} known", word, second.len(), known.len());

            if !known.is_empty() {
                (Tier::EditTwo, known)
            } else {
                fallback(word, config)
            }
        }
    };

    let mut suggestions = words
        .into_iter()
        .map(|w| {
            let probability = vocabulary.probability(&w);
            Suggestion::new(w, probability)
        })
        .collect::<Vec<_>>();
    suggestions.sort();
    suggestions.truncate(config.n_best);

    debug!("{}: {:?}, {} suggestions", word, tier, suggestions.len());
    Ok(Corrections { tier, suggestions })
}

#[inline(always)]
fn folded_known(
    word: &str,
    vocabulary: &VocabularyModel,
    config: &SpellerConfig,
) -> Option<SmolStr> {
    if !config.fold_case {
        return None;
    }

    let lower = lower_case(word);
    if vocabulary.contains(&lower) {
        Some(lower)
    } else {
        None
    }
}

#[inline(always)]
fn exceeds_limit(word: &str, limit: Option<usize>) -> bool {
    match limit {
        Some(limit) => word.graphemes().count() > limit,
        None => false,
    }
}

#[inline(always)]
fn fallback(word: &str, config: &SpellerConfig) -> (Tier, Vec<SmolStr>) {
    match config.fallback {
        Fallback::Original => (Tier::Unknown, vec![SmolStr::from(word)]),
        Fallback::Nothing => (Tier::Unknown, vec![]),
    }
}

/// A speller over a corpus vocabulary and an alphabet.
#[derive(Debug)]
pub struct ProbabilitySpeller {
    vocabulary: VocabularyModel,
    alphabet: Alphabet,
}

impl ProbabilitySpeller {
    /// A shared speller over `vocabulary`, editing with `alphabet`.
    pub fn new(vocabulary: VocabularyModel, alphabet: Alphabet) -> Arc<ProbabilitySpeller> {
        Arc::new(ProbabilitySpeller {
            vocabulary,
            alphabet,
        })
    }

    /// The corpus counts and probabilities.
    pub fn vocabulary(&self) -> &VocabularyModel {
        &self.vocabulary
    }

    /// Letters used for substitution and insertion.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The `n` most probable corrections of `word` under the default config.
    pub fn get_corrections(&self, word: &str, n: usize) -> Result<Vec<Suggestion>, SpellerError> {
        let config = SpellerConfig {
            n_best: n,
            ..SpellerConfig::default()
        };

        self.corrections_with_config(word, &config)
            .map(|c| c.suggestions)
    }

    /// Runs the cascade and reports which tier produced the suggestions.
    pub fn corrections_with_config(
        &self,
        word: &str,
        config: &SpellerConfig,
    ) -> Result<Corrections, SpellerError> {
        let candidates =
            EditCandidates::new(&self.alphabet).with_transpose(config.include_transpose);

        get_corrections(word, &self.vocabulary, &candidates, config)
    }
}

impl Speller for ProbabilitySpeller {
    fn is_correct(self: Arc<Self>, word: &str) -> bool {
        if word.is_empty() {
            return true;
        }

        // Check if there are zero letters in the word according to
        // Unicode letter category
        if word.chars().all(|c| !GeneralCategory::of(c).is_letter()) {
            return true;
        }

        self.vocabulary.contains(word) || self.vocabulary.contains(&lower_case(word))
    }

    #[inline]
    fn suggest(self: Arc<Self>, word: &str) -> Result<Vec<Suggestion>, SpellerError> {
        self.suggest_with_config(word, &SpellerConfig::default())
    }

    fn suggest_with_config(
        self: Arc<Self>,
        word: &str,
        config: &SpellerConfig,
    ) -> Result<Vec<Suggestion>, SpellerError> {
        self.corrections_with_config(word, config)
            .map(|c| c.suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::CandidateSet;

    fn speller(text: &str) -> Arc<ProbabilitySpeller> {
        ProbabilitySpeller::new(VocabularyModel::from_text(text), Alphabet::default())
    }

    fn values(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.value()).collect()
    }

    #[test]
    fn known_word_is_returned_alone() {
        let speller = speller("ngaari ngaari ngaaru mbaroodi");
        let p = speller.vocabulary().probability("ngaari");

        for n in [1, 2, 10] {
            let out = speller.get_corrections("ngaari", n).unwrap();
            assert_eq!(out, vec![Suggestion::new("ngaari".into(), p)]);
        }
    }

    #[test]
    fn one_missing_letter() {
        let speller = speller("mbaroodi");
        let out = speller.get_corrections("mbarodi", 2).unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value(), "mbaroodi");
        assert_eq!(out[0].probability(), 1.0);
    }

    #[test]
    fn ties_are_ordered_by_word() {
        let speller = speller("puccu pucci");
        let out = speller.get_corrections("pucc", 2).unwrap();

        assert_eq!(values(&out), vec!["pucci", "puccu"]);
        assert_eq!(out[0].probability(), 0.5);
        assert_eq!(out[1].probability(), 0.5);
    }

    #[test]
    fn higher_probability_first() {
        let speller = speller("puccu pucci puccu puccu");
        let out = speller.get_corrections("pucc", 10).unwrap();
        assert_eq!(values(&out), vec!["puccu", "pucci"]);
        assert_eq!(out[0].probability(), 0.75);
    }

    #[test]
    fn truncates_to_n() {
        let speller = speller("pucca pucce pucci puccu");
        assert_eq!(speller.get_corrections("pucc", 2).unwrap().len(), 2);
        assert_eq!(speller.get_corrections("pucc", 3).unwrap().len(), 3);
        assert_eq!(speller.get_corrections("pucc", 100).unwrap().len(), 4);
    }

    #[test]
    fn one_edit_tier_wins_over_two() {
        // "ngaari" is one edit from "ngari"; "ngaaro" needs two but is far more common
        let speller = speller("ngaari ngaaro ngaaro ngaaro ngaaro");
        let corrections = speller
            .corrections_with_config("ngari", &SpellerConfig::default())
            .unwrap();

        assert_eq!(corrections.tier, Tier::EditOne);
        assert_eq!(values(&corrections.suggestions), vec!["ngaari"]);
    }

    #[test]
    fn two_edit_tier() {
        let speller = speller("ngaaro");
        let corrections = speller
            .corrections_with_config("ngari", &SpellerConfig::default())
            .unwrap();

        assert_eq!(corrections.tier, Tier::EditTwo);
        assert_eq!(values(&corrections.suggestions), vec!["ngaaro"]);
    }

    #[test]
    fn fallback_returns_input() {
        let speller = speller("ngaari");
        let corrections = speller
            .corrections_with_config("xyzxyz", &SpellerConfig::default())
            .unwrap();

        assert_eq!(corrections.tier, Tier::Unknown);
        assert_eq!(corrections.suggestions, vec![Suggestion::new("xyzxyz".into(), 0.0)]);
    }

    #[test]
    fn fallback_nothing() {
        let speller = speller("ngaari");
        let config = SpellerConfig {
            fallback: Fallback::Nothing,
            ..SpellerConfig::default()
        };
        let corrections = speller.corrections_with_config("xyzxyz", &config).unwrap();

        assert_eq!(corrections.tier, Tier::Unknown);
        assert!(corrections.suggestions.is_empty());
    }

    #[test]
    fn zero_suggestions_is_an_error() {
        let speller = speller("ngaari");
        assert!(matches!(
            speller.get_corrections("ngaari", 0),
            Err(SpellerError::InvalidSuggestionCount(0))
        ));
    }

    #[test]
    fn transpose_can_be_disabled() {
        let speller = speller("ɓoɗɗi");
        let with = speller
            .corrections_with_config("oɓɗɗi", &SpellerConfig::default())
            .unwrap();
        assert_eq!(with.tier, Tier::EditOne);

        let config = SpellerConfig {
            include_transpose: false,
            ..SpellerConfig::default()
        };
        let without = speller.corrections_with_config("oɓɗɗi", &config).unwrap();
        assert_eq!(without.tier, Tier::EditTwo);
        assert_eq!(values(&without.suggestions), vec!["ɓoɗɗi"]);
    }

    #[test]
    fn long_words_skip_two_edits() {
        let speller = speller("ngaaro");
        let config = SpellerConfig {
            max_edit_two_len: Some(4),
            ..SpellerConfig::default()
        };
        let corrections = speller.corrections_with_config("ngari", &config).unwrap();
        assert_eq!(corrections.tier, Tier::Unknown);

        let config = SpellerConfig {
            max_edit_two_len: None,
            ..SpellerConfig::default()
        };
        let corrections = speller.corrections_with_config("ngari", &config).unwrap();
        assert_eq!(corrections.tier, Tier::EditTwo);
    }

    #[test]
    fn input_is_used_as_given() {
        // "Ngari" -> "ngaari" needs a substitution and an insertion
        let speller = speller("ngaari garii");
        let corrections = speller
            .corrections_with_config("Ngari", &SpellerConfig::default())
            .unwrap();
        assert_eq!(corrections.tier, Tier::EditTwo);
        assert_eq!(values(&corrections.suggestions), vec!["garii", "ngaari"]);

        let out = speller.get_corrections("QQQQQQ", 1).unwrap();
        assert_eq!(out, vec![Suggestion::new("QQQQQQ".into(), 0.0)]);
    }

    #[test]
    fn case_folding_only_adds_a_known_lookup() {
        let speller = speller("ngaari garii");
        let config = SpellerConfig {
            fold_case: true,
            ..SpellerConfig::default()
        };

        let corrections = speller.corrections_with_config("NGAARI", &config).unwrap();
        assert_eq!(corrections.tier, Tier::Known);
        assert_eq!(values(&corrections.suggestions), vec!["ngaari"]);

        let corrections = speller.corrections_with_config("Ngari", &config).unwrap();
        assert_eq!(corrections.tier, Tier::EditTwo);
        assert_eq!(values(&corrections.suggestions), vec!["garii", "ngaari"]);

        let corrections = speller.corrections_with_config("QQQQQQ", &config).unwrap();
        assert_eq!(corrections.tier, Tier::Unknown);
        assert_eq!(values(&corrections.suggestions), vec!["QQQQQQ"]);
    }

    #[test]
    fn long_words_skip_candidate_generation() {
        let speller = speller("mbaroodi");
        let config = SpellerConfig {
            max_edit_one_len: Some(4),
            ..SpellerConfig::default()
        };
        let corrections = speller.corrections_with_config("mbarodi", &config).unwrap();
        assert_eq!(corrections.tier, Tier::Unknown);
        assert_eq!(values(&corrections.suggestions), vec!["mbarodi"]);

        // the known-word tier is not capped
        let corrections = speller.corrections_with_config("mbaroodi", &config).unwrap();
        assert_eq!(corrections.tier, Tier::Known);

        let config = SpellerConfig {
            max_edit_one_len: None,
            ..SpellerConfig::default()
        };
        let corrections = speller.corrections_with_config("mbarodi", &config).unwrap();
        assert_eq!(corrections.tier, Tier::EditOne);
    }

    #[test]
    fn cascade_over_another_alphabet() {
        let vocabulary = VocabularyModel::from_text("play stay ɓe");
        let speller = ProbabilitySpeller::new(vocabulary.clone(), Alphabet::ascii());

        let out = speller.get_corrections("plsy", 3).unwrap();
        assert_eq!(values(&out), vec!["play"]);

        // hooked letters are outside the ASCII alphabet, so they cannot be inserted
        let corrections = speller
            .corrections_with_config("e", &SpellerConfig::default())
            .unwrap();
        assert_eq!(corrections.tier, Tier::Unknown);

        let fula = ProbabilitySpeller::new(vocabulary, Alphabet::fula());
        let corrections = fula.corrections_with_config("e", &SpellerConfig::default()).unwrap();
        assert_eq!(corrections.tier, Tier::EditOne);
        assert_eq!(values(&corrections.suggestions), vec!["ɓe"]);
    }

    #[test]
    fn is_correct() {
        let speller = speller("ngaari ɓe");
        assert!(Arc::clone(&speller).is_correct("ngaari"));
        assert!(Arc::clone(&speller).is_correct("Ɓe"));
        assert!(Arc::clone(&speller).is_correct(""));
        assert!(Arc::clone(&speller).is_correct("1234"));
        assert!(Arc::clone(&speller).is_correct("?!"));
        assert!(!speller.is_correct("ngari"));
    }

    struct Fixed(Vec<&'static str>, Vec<&'static str>);

    impl Candidates for Fixed {
        fn edit_distance_one(&self, _word: &str) -> CandidateSet {
            self.0.iter().map(|s| SmolStr::from(*s)).collect()
        }

        fn expand(&self, _first: &CandidateSet) -> CandidateSet {
            self.1.iter().map(|s| SmolStr::from(*s)).collect()
        }
    }

    #[test]
    fn cascade_uses_given_candidates() {
        let vocabulary = VocabularyModel::from_counts(vec![("a", 1), ("b", 3), ("c", 4)]);
        let config = SpellerConfig::default();

        let fixed = Fixed(vec!["x", "a"], vec!["b", "c"]);
        let out = get_corrections("z", &vocabulary, &fixed, &config).unwrap();
        assert_eq!(out.tier, Tier::EditOne);
        assert_eq!(values(&out.suggestions), vec!["a"]);

        let fixed = Fixed(vec!["x"], vec!["a", "b", "c", "y"]);
        let out = get_corrections("z", &vocabulary, &fixed, &config).unwrap();
        assert_eq!(out.tier, Tier::EditTwo);
        assert_eq!(values(&out.suggestions), vec!["c", "b", "a"]);
        assert_eq!(out.suggestions[0].probability(), 0.5);
    }

    #[test]
    fn shared_between_threads() {
        let speller = speller("pucci puccu ngaari mbaroodi");
        let handles = ["pucc", "ngari", "mbarodi"]
            .iter()
            .map(|&word| {
                let speller = Arc::clone(&speller);
                std::thread::spawn(move || speller.suggest(word).unwrap())
            })
            .collect::<Vec<_>>();

        let results = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(values(&results[0]), vec!["pucci", "puccu"]);
        assert_eq!(values(&results[1]), vec!["ngaari"]);
        assert_eq!(values(&results[2]), vec!["mbaroodi"]);
    }
}
