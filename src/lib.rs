//! This crate is the statistics and codec core of a document analysis service:
//! corpus-wide TF / IDF tables and a memoized Huffman encoder.

pub mod codec;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;
pub mod vectorizer;

/// Text Normalizer
/// Removes every Unicode punctuation code point and lowercases the rest.
/// Whitespace is kept, so normalized text tokenizes like the input.
pub use utils::normalizer::normalize;

/// TF / IDF Aggregators
/// `compute_tf` pools token counts over the whole corpus and divides by the
/// total number of tokens. `compute_idf` counts, per term, the documents that
/// contain it and yields `ln(documents / count)`.
///
/// Both tokenize on runs of whitespace, apply no normalization, and return an
/// empty table (never NaN) for a corpus without tokens.
pub use vectorizer::{
    compute_idf, compute_tf, InverseDocumentFrequencyTable, TermFrequencyTable, TermTable,
};

/// Token Frequency structure
/// Pooled token counter behind `compute_tf`.
/// Can be fed incrementally and converted to a TF table in any float type.
pub use vectorizer::token::TokenFrequency;

/// Document Frequency structure
/// Per-term document counts behind `compute_idf`.
/// Supports adding and removing documents, and CBOR snapshots so callers can
/// persist a collection's state and update its IDF incrementally.
pub use vectorizer::corpus::DocumentFrequency;

/// Analyzer
/// Composition root holding the configuration, the Huffman codec with its
/// bounded cache, and processing metrics. Computes TF and IDF concurrently
/// and builds per-term statistics reports for documents and collections.
pub use vectorizer::analyzer::{Analyzer, StatisticsReport, TermStat};

/// Huffman Codec
/// Builds a prefix-free code from the char frequencies of one text and
/// encodes the text into a `'0'` / `'1'` string.
///
/// `HuffmanCodec::encode` looks the exact content up in a bounded LRU cache
/// first; a hit returns the stored bit-string without building a tree.
/// Ties between equal frequencies are broken by symbol order, so codes are
/// reproducible.
pub use codec::{
    build_tree, encode_with_codes, generate_codes, CodeTable, CodecStats, CompressionReport,
    EncodedCache, HuffmanCodec, HuffmanTree,
};

pub use config::CoreConfig;
pub use error::{ConfigError, EncodingError, Error, Result, SnapshotError};
pub use metrics::{Metrics, MetricsSnapshot};
