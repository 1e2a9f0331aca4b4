use std::time::Instant;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::codec::{CodecStats, CompressionReport, HuffmanCodec};
use crate::config::CoreConfig;
use crate::error::{ConfigError, EncodingError};
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::vectorizer::{
    compute_idf, compute_tf, InverseDocumentFrequencyTable, TermFrequencyTable,
};

/// TF and IDF of one term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStat {
    pub term: String,
    pub tf: f64,
    pub idf: f64,
}

/// Per-term statistics, ascending by TF
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub stats: Vec<TermStat>,
}

impl StatisticsReport {
    /// Join a TF table with an IDF table.
    ///
    /// One entry per TF term; terms missing from `idf` get 0.0. Entries are
    /// sorted by TF ascending, then by term, and cut to `limit`.
    pub fn from_tables(
        tf: &TermFrequencyTable,
        idf: &InverseDocumentFrequencyTable,
        limit: usize,
    ) -> Self {
        let mut stats: Vec<TermStat> = tf
            .iter()
            .map(|(term, &tf)| TermStat {
                term: term.clone(),
                tf,
                idf: idf.get(term).copied().unwrap_or(0.0),
            })
            .collect();
        stats.sort_by(|a, b| a.tf.total_cmp(&b.tf).then_with(|| a.term.cmp(&b.term)));
        stats.truncate(limit);
        Self { stats }
    }

    /// `true` means "no statistics available"
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn get(&self, term: &str) -> Option<&TermStat> {
        self.stats.iter().find(|s| s.term == term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TermStat> {
        self.stats.iter()
    }
}

/// Composition root of the core.
///
/// Owns the Huffman codec (and through it the bounded encoding cache) and the
/// processing metrics. The aggregators themselves are stateless.
#[derive(Debug)]
pub struct Analyzer {
    config: CoreConfig,
    codec: HuffmanCodec,
    metrics: Metrics,
}

impl Analyzer {
    /// Create an analyzer with its own codec sized from `config`
    pub fn new(config: CoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let codec = HuffmanCodec::new(config.cache_capacity);
        Ok(Self::with_codec(config, codec))
    }

    /// Create an analyzer around an existing codec.
    /// `config.cache_capacity` is ignored in favor of the codec's cache.
    pub fn with_codec(config: CoreConfig, codec: HuffmanCodec) -> Self {
        Self {
            config,
            codec,
            metrics: Metrics::new(),
        }
    }

    /// TF and IDF of the same corpus.
    ///
    /// The two aggregates are independent; with `parallel` they run as two
    /// rayon tasks. The result is the same either way.
    pub fn corpus_tables<T>(&self, corpus: &[T]) -> (TermFrequencyTable, InverseDocumentFrequencyTable)
    where
        T: AsRef<str> + Sync,
    {
        let start = Instant::now();
        let tables = self.join(|| compute_tf(corpus), || compute_idf(corpus));
        self.metrics.record(corpus.len() as u64, start.elapsed());
        tables
    }

    /// Statistics of one document against the corpus it belongs to.
    ///
    /// TF is taken over `document` alone, IDF over `corpus`. With
    /// `dedupe_corpus`, identical corpus texts are counted once.
    pub fn document_statistics<T>(&self, document: &str, corpus: &[T]) -> StatisticsReport
    where
        T: AsRef<str>,
    {
        let start = Instant::now();
        let corpus: Vec<&str> = if self.config.dedupe_corpus {
            corpus
                .iter()
                .map(|doc| doc.as_ref())
                .collect::<IndexSet<&str>>()
                .into_iter()
                .collect()
        } else {
            corpus.iter().map(|doc| doc.as_ref()).collect()
        };

        let (tf, idf) = self.join(|| compute_tf(&[document]), || compute_idf(&corpus));
        let report = StatisticsReport::from_tables(&tf, &idf, self.config.statistics_limit);
        tracing::debug!(
            corpus = corpus.len(),
            terms = tf.len(),
            reported = report.len(),
            "document statistics"
        );
        self.metrics.record(1, start.elapsed());
        report
    }

    /// Statistics of a whole collection.
    ///
    /// TF is taken over all documents joined by a single space; IDF values are
    /// looked up in `idf`, typically restored from a snapshot of the
    /// collection's `DocumentFrequency`.
    pub fn collection_statistics<T>(
        &self,
        documents: &[T],
        idf: &InverseDocumentFrequencyTable,
    ) -> StatisticsReport
    where
        T: AsRef<str>,
    {
        let start = Instant::now();
        let combined = documents
            .iter()
            .map(|doc| doc.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");
        let tf = compute_tf(&[combined]);
        let report = StatisticsReport::from_tables(&tf, idf, self.config.statistics_limit);
        tracing::debug!(
            documents = documents.len(),
            terms = tf.len(),
            reported = report.len(),
            "collection statistics"
        );
        self.metrics.record(documents.len() as u64, start.elapsed());
        report
    }

    /// Huffman bit-string of `content`, served from the cache when possible
    #[inline]
    pub fn encode(&self, content: &str) -> Result<String, EncodingError> {
        self.codec.encode(content)
    }

    /// Size of `content` before and after Huffman coding
    #[inline]
    pub fn compression_report(&self, content: &str) -> Result<CompressionReport, EncodingError> {
        self.codec.report(content)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn codec_stats(&self) -> CodecStats {
        self.codec.stats()
    }

    #[inline]
    pub fn codec(&self) -> &HuffmanCodec {
        &self.codec
    }

    #[inline]
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        if self.config.parallel {
            rayon::join(a, b)
        } else {
            (a(), b())
        }
    }
}
