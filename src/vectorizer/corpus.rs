use serde::{Deserialize, Serialize};

/// Ordered collection of raw documents.
/// A document is identified by its position in the corpus; the order is
/// preserved for indexing but carries no semantic meaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    docs: Vec<String>,
}

impl Corpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self { docs: Vec::new() }
    }

    /// Append a document
    ///
    /// # Arguments
    /// * `doc` - raw document text
    #[inline]
    pub fn push(&mut self, doc: impl Into<String>) -> &mut Self {
        self.docs.push(doc.into());
        self
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn doc_num(&self) -> usize {
        self.docs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Document text by position
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.docs.get(idx).map(|d| d.as_str())
    }

    /// The documents in corpus order
    #[inline]
    pub fn docs(&self) -> &[String] {
        &self.docs
    }

    /// Iterate the documents in corpus order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.docs.iter().map(|d| d.as_str())
    }
}

impl From<Vec<String>> for Corpus {
    fn from(docs: Vec<String>) -> Self {
        Self { docs }
    }
}

impl FromIterator<String> for Corpus {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            docs: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for Corpus {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            docs: iter.into_iter().map(String::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_preserved() {
        let mut corpus = Corpus::new();
        corpus.push("first").push("second");
        assert_eq!(corpus.doc_num(), 2);
        assert_eq!(corpus.get(0), Some("first"));
        assert_eq!(corpus.get(1), Some("second"));
        assert_eq!(corpus.get(2), None);
    }

    #[test]
    fn from_iterators() {
        let corpus: Corpus = ["a", "b", "c"].into_iter().collect();
        assert_eq!(corpus.doc_num(), 3);
        let owned: Corpus = vec!["x".to_string()].into_iter().collect();
        assert_eq!(owned.get(0), Some("x"));
    }

    #[test]
    fn empty_corpus() {
        let corpus = Corpus::new();
        assert!(corpus.is_empty());
        assert_eq!(corpus.iter().count(), 0);
    }
}
