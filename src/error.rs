//! Error types for the statistics and codec core.
//!
//! The aggregators are total functions and never fail; the only failure of
//! the core operations is a symbol without a Huffman code. Configuration and
//! snapshot handling have their own variants.

use thiserror::Error;

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Huffman encoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The code table has no entry for a symbol of the content.
    /// `position` is the char index (not byte offset) of the symbol.
    #[error("character {symbol:?} at position {position} not found in Huffman codes")]
    MissingCode { symbol: char, position: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cache_capacity must be greater than zero")]
    ZeroCacheCapacity,

    #[error("statistics_limit must be greater than zero")]
    ZeroStatisticsLimit,

    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cbor: {0}")]
    Cbor(#[from] serde_cbor::Error),

    /// Decoded snapshot violates `1 <= df <= documents`.
    #[error("term {term:?} has document count {count} outside 1..={documents}")]
    InconsistentCount {
        term: String,
        count: u64,
        documents: u64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
