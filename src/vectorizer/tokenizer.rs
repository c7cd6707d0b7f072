use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use stop_words::{get, LANGUAGE};

use crate::vectorizer::term::TermFrequency;

/// Tokenizer configuration and functionality.
///
/// Splits raw document text into normalized terms. Options:
/// - `lowercase`: case-fold before comparison (default on)
/// - `strip_accents`: fold Latin diacritics, e.g. "café" → "cafe"
///   (default off)
/// - stop words: a fixed set consulted by the vectorizer when building the
///   vocabulary (default: the English list from the stop-words crate)
///
/// `tokenize` emits every normalized token including stop-listed ones; stop
/// words are excluded from the vocabulary, not from the document length.
/// An empty document produces an empty term sequence, which later yields an
/// all-zero matrix row rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tokenizer {
    lowercase: bool,
    strip_accents: bool,
    stop_words: HashSet<String>,
}

impl Tokenizer {
    /// Create a tokenizer with default settings: lowercasing on, accent
    /// stripping off, English stop words.
    pub fn new() -> Self {
        Self {
            lowercase: true,
            strip_accents: false,
            stop_words: get(LANGUAGE::English).into_iter().collect(),
        }
    }

    /// Enable/disable lowercase conversion
    pub fn lowercase(mut self, enable: bool) -> Self {
        self.lowercase = enable;
        self
    }

    /// Enable/disable accent stripping
    pub fn strip_accents(mut self, enable: bool) -> Self {
        self.strip_accents = enable;
        self
    }

    /// Replace the stop-word set
    pub fn stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Clear the stop-word set (keep every term in the vocabulary)
    pub fn no_stop_words(mut self) -> Self {
        self.stop_words.clear();
        self
    }

    /// Whether a normalized term is in the stop-word set.
    /// Matching is exact, so with lowercasing disabled a capitalized token
    /// will not match the lowercase list entries.
    #[inline]
    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }

    /// Split a document into normalized terms.
    /// Splits on non-alphanumeric characters; every token is kept, stop
    /// words included.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                let term = if self.lowercase {
                    raw.to_lowercase()
                } else {
                    raw.to_string()
                };
                if self.strip_accents {
                    term.chars().map(fold_diacritic).collect()
                } else {
                    term
                }
            })
            .collect()
    }

    /// Tokenize a document and count its terms in one step.
    pub fn term_frequency(&self, text: &str) -> TermFrequency {
        let mut freq = TermFrequency::new();
        for term in self.tokenize(text) {
            freq.add_term(&term);
        }
        freq
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold a Latin diacritic to its base character, e.g. "café" → "cafe".
fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ñ' => 'n',
        'ç' => 'c',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ý' => 'Y',
        'Ñ' => 'N',
        'Ç' => 'C',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_keeps_every_token() {
        let tokenizer = Tokenizer::new();
        let terms = tokenizer.tokenize("Atomic Burger makes a tasty burger");
        assert_eq!(terms, vec!["atomic", "burger", "makes", "a", "tasty", "burger"]);
    }

    #[test]
    fn empty_document_yields_no_terms() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  ,;!  ").is_empty());
        assert!(tokenizer.term_frequency("").is_empty());
    }

    #[test]
    fn lowercase_can_be_disabled() {
        let tokenizer = Tokenizer::new().lowercase(false);
        assert_eq!(tokenizer.tokenize("Rust IS Fast"), vec!["Rust", "IS", "Fast"]);
    }

    #[test]
    fn accents_are_folded_when_enabled() {
        let tokenizer = Tokenizer::new().strip_accents(true);
        assert_eq!(tokenizer.tokenize("café naïve"), vec!["cafe", "naive"]);
        let plain = Tokenizer::new();
        assert_eq!(plain.tokenize("café"), vec!["café"]);
    }

    #[test]
    fn default_stop_list_marks_common_words() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.is_stop_word("the"));
        assert!(tokenizer.is_stop_word("a"));
        assert!(!tokenizer.is_stop_word("atomic"));
    }

    #[test]
    fn custom_stop_set_replaces_the_default() {
        let tokenizer = Tokenizer::new().stop_words(["foo", "bar"]);
        assert!(tokenizer.is_stop_word("foo"));
        assert!(!tokenizer.is_stop_word("the"));
        let open = Tokenizer::new().no_stop_words();
        assert!(!open.is_stop_word("the"));
    }

    #[test]
    fn term_frequency_counts_duplicates() {
        let tokenizer = Tokenizer::new();
        let freq = tokenizer.term_frequency("Atomic Burger makes a tasty burger");
        assert_eq!(freq.term_count("burger"), 2);
        assert_eq!(freq.term_sum(), 6);
    }
}
