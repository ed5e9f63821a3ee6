//! Suggestion for a spelling correction.
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cmp::Ordering;
use std::cmp::Ordering::Equal;

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Suggestion for a spelling correction
pub struct Suggestion {
    /// the suggested word-form
    pub value: SmolStr,
    /// relative corpus frequency of the word-form, 0 when unknown
    pub probability: f64,
}

impl Suggestion {
    /// creates a spelling correction suggestion
    pub fn new(value: SmolStr, probability: f64) -> Suggestion {
        Suggestion { value, probability }
    }

    /// gets the suggested word-form
    pub fn value(&self) -> &str {
        &self.value
    }

    /// gets the corpus probability of the suggestion
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Most probable first; equal probabilities fall back to the word-form.
impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        let x = other
            .probability
            .partial_cmp(&self.probability)
            .unwrap_or(Equal);

        if let Equal = x {
            return self.value.cmp(&other.value);
        }

        x
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.probability == other.probability
    }
}

impl Eq for Suggestion {}
