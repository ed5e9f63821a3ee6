//! Word segmentation and case folding for corpus ingestion.
use smol_str::SmolStr;
use unic_segment::{GraphemeIndices, Graphemes, WordBoundIndices, Words};

/// Unicode segmentation of text into words and grapheme units.
pub trait Tokenize {
    /// every word boundary segment, including whitespace and punctuation
    fn word_bound_indices(&self) -> WordBoundIndices<'_>;
    /// only the segments containing at least one alphanumeric character
    fn words(&self) -> Words<'_>;
    /// user-perceived characters, so `n` followed by a combining tilde stays whole
    fn graphemes(&self) -> Graphemes<'_>;
    /// grapheme units with their byte offsets
    fn grapheme_indices(&self) -> GraphemeIndices<'_>;
}

impl Tokenize for str {
    fn word_bound_indices(&self) -> WordBoundIndices<'_> {
        WordBoundIndices::new(self)
    }

    fn words(&self) -> Words<'_> {
        Words::new(self, |s| s.chars().any(|ch| ch.is_alphanumeric()))
    }

    fn graphemes(&self) -> Graphemes<'_> {
        Graphemes::new(self)
    }

    fn grapheme_indices(&self) -> GraphemeIndices<'_> {
        GraphemeIndices::new(self)
    }
}

/// Full Unicode lower-casing, hooked capitals included.
#[inline(always)]
pub fn lower_case(s: &str) -> SmolStr {
    s.chars()
        .map(|c| c.to_lowercase().collect::<String>())
        .collect::<SmolStr>()
}

/// Lower-cased word tokens of `text`, in order of appearance.
pub fn word_tokens(text: &str) -> impl Iterator<Item = SmolStr> + '_ {
    text.words().map(lower_case)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_bounds_keep_byte_offsets() {
        let msg = "Ɓe ngaari, ŋaari!";
        assert_eq!(
            msg.word_bound_indices().collect::<Vec<_>>(),
            vec![
                (0, "Ɓe"),
                (3, " "),
                (4, "ngaari"),
                (10, ","),
                (11, " "),
                (12, "ŋaari"),
                (18, "!"),
            ]
        );
    }

    #[test]
    fn words_skip_punctuation() {
        let msg = "Mbaroodi, ɓe ngaari! 12 (ŋ)";
        assert_eq!(
            msg.words().collect::<Vec<_>>(),
            vec!["Mbaroodi", "ɓe", "ngaari", "12", "ŋ"]
        );
    }

    #[test]
    fn tokens_are_lower_case() {
        let msg = "Ɓe ƳIIƁE Ŋaari";
        assert_eq!(
            word_tokens(msg).collect::<Vec<_>>(),
            vec!["ɓe", "ƴiiɓe", "ŋaari"]
        );
    }

    #[test]
    fn combining_marks_stay_attached() {
        let word = "man\u{0303}a";
        assert_eq!(word.graphemes().count(), 4);
        assert_eq!(word.graphemes().nth(2), Some("n\u{0303}"));
        assert_eq!(
            word.grapheme_indices().map(|(i, _)| i).collect::<Vec<_>>(),
            vec![0, 1, 2, 5]
        );
    }
}
