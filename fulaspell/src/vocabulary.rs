//! Frequency-weighted vocabulary built from a corpus.
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::candidates::CandidateSet;
use crate::tokenizer::word_tokens;

/// Errors that can occur while building a vocabulary.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum VocabularyError {
    /// Corpus file could not be read
    #[error("Failed to read corpus {path}")]
    Io {
        /// path of the corpus
        path: PathBuf,
        /// underlying error
        #[source]
        source: std::io::Error,
    },

    /// A counted word has no entry in a precomputed probability table
    #[error("No probability given for word `{0}`")]
    MissingProbability(SmolStr),

    /// A precomputed probability is outside of [0, 1]
    #[error("Invalid probability {value} for word `{word}`")]
    InvalidProbability {
        /// the offending word
        word: SmolStr,
        /// the offending value
        value: f64,
    },
}

/// Known words with their occurrence counts and relative frequencies.
///
/// Built once from a corpus and only read afterwards, so a single model can
/// be shared between threads behind an `Arc`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyModel {
    counts: HashMap<SmolStr, u64>,
    probabilities: HashMap<SmolStr, f64>,
    total: u64,
}

impl VocabularyModel {
    /// Builds a model from `(word, count)` pairs. Repeated words are summed.
    pub fn from_counts<I, S>(counts: I) -> VocabularyModel
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<SmolStr>,
    {
        let mut map: HashMap<SmolStr, u64> = HashMap::new();
        for (word, count) in counts {
            *map.entry(word.into()).or_insert(0) += count;
        }

        let total = map.values().sum::<u64>();
        let probabilities = map
            .iter()
            .map(|(word, count)| (word.clone(), relative_frequency(*count, total)))
            .collect();

        info!("Built vocabulary: {} words, {} tokens", map.len(), total);

        VocabularyModel {
            counts: map,
            probabilities,
            total,
        }
    }

    /// Counts each token once per occurrence.
    pub fn from_tokens<I, S>(tokens: I) -> VocabularyModel
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        VocabularyModel::from_counts(tokens.into_iter().map(|t| (t, 1)))
    }

    /// Lower-cases and tokenizes `text`, then counts the words.
    pub fn from_text(text: &str) -> VocabularyModel {
        VocabularyModel::from_tokens(word_tokens(text))
    }

    /// Reads a UTF-8 corpus file and builds the model as [`from_text`](Self::from_text).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<VocabularyModel, VocabularyError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Read corpus {} ({} bytes)", path.display(), text.len());
        Ok(VocabularyModel::from_text(&text))
    }

    /// Uses a precomputed probability table instead of deriving one from the counts.
    ///
    /// Every counted word needs a probability in `[0, 1]`. Extra entries in
    /// `probabilities` are kept but do not make a word known.
    pub fn with_probabilities(
        counts: HashMap<SmolStr, u64>,
        probabilities: HashMap<SmolStr, f64>,
    ) -> Result<VocabularyModel, VocabularyError> {
        for word in counts.keys() {
            if !probabilities.contains_key(word) {
                return Err(VocabularyError::MissingProbability(word.clone()));
            }
        }

        if let Some((word, value)) = probabilities
            .iter()
            .find(|(_, p)| !(0.0..=1.0).contains(*p))
        {
            return Err(VocabularyError::InvalidProbability {
                word: word.clone(),
                value: *value,
            });
        }

        let total = counts.values().sum();
        Ok(VocabularyModel {
            counts,
            probabilities,
            total,
        })
    }

    /// whether `word` is part of the vocabulary
    #[inline(always)]
    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    /// occurrence count of `word`, 0 when unknown
    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// relative frequency of `word`, 0 when unknown
    pub fn probability(&self, word: &str) -> f64 {
        self.probabilities.get(word).copied().unwrap_or(0.0)
    }

    /// number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// whether no words are known
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// sum of all counts
    pub fn total_count(&self) -> u64 {
        self.total
    }

    /// iterates over the known words in no particular order
    pub fn words(&self) -> impl Iterator<Item = &SmolStr> {
        self.counts.keys()
    }

    /// Members of `candidates` that are known words.
    pub fn known(&self, candidates: &CandidateSet) -> Vec<SmolStr> {
        candidates
            .iter()
            .filter(|word| self.contains(word))
            .cloned()
            .collect()
    }

    /// The `k` most frequent words, ties ordered by the word itself.
    pub fn most_common(&self, k: usize) -> Vec<(&SmolStr, u64)> {
        self.counts
            .iter()
            .map(|(word, count)| (word, *count))
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
            .take(k)
            .collect()
    }
}

#[inline(always)]
fn relative_frequency(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
