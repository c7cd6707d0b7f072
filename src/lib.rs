/// This crate is a Document Clustering Engine using a TF-IDF Vectorizer.
pub mod cluster;
pub mod compare;
pub mod error;
pub mod reduce;
pub mod utils;
pub mod vectorizer;

/// TF-IDF Vectorizer
/// Converts a document collection into a TF-IDF term-document matrix.
/// It tokenizes every document, builds the sorted corpus vocabulary with
/// stop words excluded, and computes one sparse tf-idf row per document.
///
/// `TFIDFVectorizer<N, E>` has the following generic parameters:
/// - `N`: matrix cell type (e.g. f32, f64)
/// - `E`: TF-IDF calculation engine type (e.g. DefaultTFIDFEngine)
///
/// Fitting is a pure function of the corpus and configuration: identical
/// inputs always produce an identical matrix and vocabulary ordering. An
/// empty corpus is rejected as invalid input.
pub use vectorizer::TFIDFVectorizer;

/// Fitted TF-IDF Model
/// The immutable value returned by `TFIDFVectorizer::fit`. It holds:
/// - The corpus vocabulary (sorted, with document frequencies)
/// - The IDF vector
/// - Sparse tf-idf rows, one per document
///
/// The model is passed explicitly to downstream consumers; there is no
/// global fitted state. New documents can be scored against the fitted
/// vocabulary via `transform`.
///
/// # Serialization
/// Supported, including compact CBOR helpers (`to_cbor` / `from_cbor`).
pub use vectorizer::TFIDFModel;

/// Corpus for the TF-IDF Vectorizer
/// An ordered collection of raw documents. A document is identified by its
/// position; the order is preserved for indexing but carries no semantic
/// meaning.
pub use vectorizer::corpus::Corpus;

/// Corpus Vocabulary
/// The unique non-stop terms of a fitted corpus, sorted lexicographically,
/// each mapped to a stable matrix column index together with its document
/// frequency.
pub use vectorizer::Vocabulary;

/// Tokenizer
/// Splits raw document text into normalized terms. Lowercasing, Latin
/// accent folding, and the stop-word set are configurable; the default stop
/// words come from the bundled English list.
pub use vectorizer::tokenizer::Tokenizer;

/// Term Frequency structure
/// A struct for analyzing/managing term occurrence frequency within a
/// document. It manages the count of occurrences of each term and the total
/// number of tokens in the document, and is used as base data for TF
/// calculation.
pub use vectorizer::term::TermFrequency;

/// TF-IDF Calculation Engine Trait
/// A trait that defines the behavior of a TF-IDF calculation engine.
///
/// By implementing this trait, you can plug different TF-IDF calculation
/// strategies into `TFIDFVectorizer<N, E>`. A default implementation,
/// `DefaultTFIDFEngine`, is provided and performs textbook-style TF-IDF
/// calculation: tf = count / total tokens, idf = ln(N / df).
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Principal Component Analysis
/// Projects the term-document matrix onto the directions of maximal
/// variance, returning the low-dimensional representation and the
/// explained-variance ratios. Deterministic given fixed numerical
/// precision; there is no configuration randomness.
pub use reduce::PCA;

/// Clustering Strategies
/// The `Clustering` trait partitions document vectors into a fixed number
/// of groups; `KMeans` (centroid-based, explicit seed) and `Agglomerative`
/// (hierarchical merging under a configurable linkage and metric) are the
/// two interchangeable implementations. `silhouette_score` reports
/// clustering quality.
pub use cluster::{silhouette_score, Agglomerative, Clustering, KMeans, Linkage, Metric};

/// Distance Reporting
/// Cosine similarity/distance between document vectors, and the symmetric
/// pairwise distance matrix with a zero diagonal.
pub use compare::{cosine_distance, cosine_similarity, distance_matrix};

/// Analysis Errors
/// All invalid-input conditions (empty corpus, out-of-range cluster or
/// component counts, dimension mismatches, zero-magnitude vectors) are
/// reported synchronously through `AnalyzeError`.
pub use error::{AnalyzeError, Result};
