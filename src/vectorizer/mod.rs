pub mod corpus;
pub mod serde;
pub mod term;
pub mod tfidf;
pub mod tokenizer;

use std::collections::BTreeMap;
use std::marker::PhantomData;

use ::serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use log::debug;
use num::Num;
use rayon::prelude::*;

use crate::error::{AnalyzeError, Result};
use crate::utils::datastruct::sparse::SpVec;
use crate::vectorizer::corpus::Corpus;
use crate::vectorizer::term::TermFrequency;
use crate::vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};
use crate::vectorizer::tokenizer::Tokenizer;

/// Corpus vocabulary.
/// Unique non-stop terms sorted lexicographically, each mapped to a stable
/// column index, with the per-term document frequency kept alongside.
/// The ordering is fixed once built from a given corpus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(with = "indexmap::map::serde_seq")]
    terms: IndexMap<Box<str>, u64>,
}

impl Vocabulary {
    /// 辞書順のBTreeMapから挿入して列順を固定する
    fn from_doc_freqs(doc_freqs: BTreeMap<Box<str>, u64>) -> Self {
        Self {
            terms: doc_freqs.into_iter().collect(),
        }
    }

    /// Number of terms (matrix column count)
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term at a column index
    #[inline]
    pub fn term(&self, idx: usize) -> Option<&str> {
        self.terms.get_index(idx).map(|(term, _)| term.as_ref())
    }

    /// Column index of a term
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Number of documents the term appears in (zero when unknown)
    #[inline]
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.terms.get(term).copied().unwrap_or(0)
    }

    /// Iterate terms in column order
    #[inline]
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(|term| term.as_ref())
    }

    /// Iterate (term, document frequency) pairs in column order
    #[inline]
    pub fn doc_freqs(&self) -> impl Iterator<Item = (&str, u64)> {
        self.terms.iter().map(|(term, &df)| (term.as_ref(), df))
    }
}

/// TF-IDF Vectorizer
/// Fits a corpus into an immutable [`TFIDFModel`]: tokenizes every document,
/// builds the sorted vocabulary (stop words excluded), and computes one
/// sparse tf-idf row per document.
///
/// `TFIDFVectorizer<N, E>` has the following generic parameters:
/// - `N`: matrix cell type (`f32` or `f64`, default `f64`)
/// - `E`: TF-IDF calculation engine type (default [`DefaultTFIDFEngine`])
///
/// Fitting is a pure function of the corpus and the configuration: the same
/// inputs always produce the same matrix and vocabulary ordering.
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<N = f64, E = DefaultTFIDFEngine>
where
    N: Num + Copy,
    E: TFIDFEngine<N>,
{
    tokenizer: Tokenizer,
    _marker: PhantomData<(N, E)>,
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Num + Copy + Send + Sync,
    E: TFIDFEngine<N>,
{
    /// Create a vectorizer with the default tokenizer
    pub fn new() -> Self {
        Self::with_tokenizer(Tokenizer::default())
    }

    /// Create a vectorizer with a configured tokenizer
    pub fn with_tokenizer(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            _marker: PhantomData,
        }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Fit the corpus and return the fitted model.
    ///
    /// # Arguments
    /// * `corpus` - ordered documents to vectorize
    ///
    /// # Returns
    /// * `TFIDFModel<N, E>` - immutable fitted model (vocabulary, idf,
    ///   term-document matrix rows)
    ///
    /// Fails with [`AnalyzeError::EmptyCorpus`] when the corpus contains no
    /// documents. An empty document is fine and yields an all-zero row.
    pub fn fit(&self, corpus: &Corpus) -> Result<TFIDFModel<N, E>>
    where
        E: Sync,
    {
        if corpus.is_empty() {
            return Err(AnalyzeError::EmptyCorpus);
        }

        // 文書ごとのterm頻度を並列に数える (collect preserves corpus order)
        let freqs: Vec<TermFrequency> = corpus
            .docs()
            .par_iter()
            .map(|doc| self.tokenizer.term_frequency(doc))
            .collect();

        // 語彙は辞書順で固定する。stop wordは語彙から除外するが、
        // 文書長のカウントには残る。
        let mut doc_freqs: BTreeMap<Box<str>, u64> = BTreeMap::new();
        for freq in &freqs {
            for term in freq.term_set() {
                if self.tokenizer.is_stop_word(term) {
                    continue;
                }
                *doc_freqs.entry(Box::from(term)).or_insert(0) += 1;
            }
        }
        let vocab = Vocabulary::from_doc_freqs(doc_freqs);
        let idf = E::idf_vec(corpus.doc_num(), &vocab);

        let rows: Vec<SpVec<N>> = freqs
            .par_iter()
            .map(|freq| {
                let mut row = E::tf_vec(freq, &vocab).hadamard_dense(&idf);
                row.shrink_to_fit();
                row
            })
            .collect();

        debug!(
            "fitted tf-idf model: {} documents, {} terms",
            rows.len(),
            vocab.len()
        );
        Ok(TFIDFModel {
            vocab,
            idf,
            rows,
            _marker: PhantomData,
        })
    }
}

impl<N, E> Default for TFIDFVectorizer<N, E>
where
    N: Num + Copy + Send + Sync,
    E: TFIDFEngine<N>,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Fitted TF-IDF model.
/// The immutable value returned from [`TFIDFVectorizer::fit`]: the sorted
/// vocabulary, the idf vector, and one sparse tf-idf row per document.
/// Downstream scoring of new documents takes this model explicitly instead
/// of relying on a stateful fitted vectorizer.
///
/// # Serialization
/// Supported, including compact CBOR helpers (`to_cbor` / `from_cbor`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TFIDFModel<N = f64, E = DefaultTFIDFEngine>
where
    N: Num + Copy,
{
    vocab: Vocabulary,
    idf: Vec<N>,
    rows: Vec<SpVec<N>>,
    #[serde(skip)]
    _marker: PhantomData<(N, E)>,
}

impl<N, E> TFIDFModel<N, E>
where
    N: Num + Copy,
    E: TFIDFEngine<N>,
{
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Number of documents (matrix row count)
    #[inline]
    pub fn doc_num(&self) -> usize {
        self.rows.len()
    }

    /// Number of vocabulary terms (matrix column count)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// IDF vector in vocabulary column order
    #[inline]
    pub fn idf(&self) -> &[N] {
        &self.idf
    }

    /// Matrix row for a document
    #[inline]
    pub fn row(&self, doc_idx: usize) -> Option<&SpVec<N>> {
        self.rows.get(doc_idx)
    }

    /// All matrix rows in corpus order
    #[inline]
    pub fn rows(&self) -> &[SpVec<N>] {
        &self.rows
    }

    /// TF-IDF score of a term in a document.
    /// Zero when the term is absent from the document or outside the
    /// vocabulary; `None` when the document index is out of range.
    pub fn score(&self, doc_idx: usize, term: &str) -> Option<N> {
        let row = self.rows.get(doc_idx)?;
        Some(match self.vocab.index_of(term) {
            Some(col) => row.get(col),
            None => N::zero(),
        })
    }

    /// Score a previously unseen document against the fitted vocabulary and
    /// idf. Terms outside the vocabulary are ignored.
    pub fn transform(&self, freq: &TermFrequency) -> SpVec<N> {
        E::tf_vec(freq, &self.vocab).hadamard_dense(&self.idf)
    }
}

impl<N, E> TFIDFModel<N, E>
where
    N: Num + Copy + Into<f64>,
{
    /// Densify the term-document matrix for the reducer / clusterer /
    /// distance reporter.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        self.rows.iter().map(|row| row.to_dense_f64()).collect()
    }
}
