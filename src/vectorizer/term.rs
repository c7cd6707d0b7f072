use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// TermFrequency struct
/// Manages the frequency of term occurrences within a single document.
/// Counts the number of times each term appears, plus the total number of
/// tokens the document produced. The total counts every token the tokenizer
/// emitted, so term frequencies stay relative to the full document length.
///
/// # Examples
/// ```
/// use tf_idf_clusterer::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("term1");
/// term_freq.add_term("term2");
/// term_freq.add_term("term1");
///
/// assert_eq!(term_freq.term_count("term1"), 2);
/// assert_eq!(term_freq.term_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u64>,
    total_term_count: u64,
}

/// Implementation for adding terms
impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        let count = self.term_count.entry(term.to_string()).or_insert(0);
        *count += 1;
        self.total_term_count += 1;
        self
    }

    /// Add multiple terms
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            let term_str = term.as_ref();
            self.add_term(term_str);
        }
        self
    }
}

/// Implementation for reading statistics
impl TermFrequency {
    /// Occurrence count of a term (zero when absent)
    ///
    /// # Arguments
    /// * `term` - term
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Total number of tokens counted in this document
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms
    #[inline]
    pub fn unique_term_num(&self) -> usize {
        self.term_count.len()
    }

    /// Iterate the distinct terms in insertion order
    #[inline]
    pub fn term_set(&self) -> impl Iterator<Item = &str> {
        self.term_count.keys().map(|t| t.as_str())
    }

    /// True when no token has been added
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_term_count == 0
    }
}
