use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::codes::{encode_with_codes, CodeTable};
use crate::codec::tree::{symbol_frequencies, HuffmanTree};
use crate::error::EncodingError;
use crate::utils::cache::LruCache;

/// content -> encoded bit-string
pub type EncodedCache = LruCache<String, String>;

/// Huffman encoder memoizing results per content string.
///
/// The cache is an explicit, bounded object. Several codecs may share one
/// cache through `with_cache`; entries are keyed on the exact content, so a
/// shared cache never returns an encoding built from other text.
#[derive(Debug)]
pub struct HuffmanCodec {
    cache: Arc<EncodedCache>,
    trees_built: AtomicU64,
}

/// Size accounting of one encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionReport {
    /// UTF-8 size of the content in bits
    pub original_bits: u64,
    /// length of the Huffman bit-string
    pub encoded_bits: u64,
    /// distinct chars of the content
    pub symbols: usize,
}

impl CompressionReport {
    /// encoded / original, 0.0 for empty content
    pub fn ratio(&self) -> f64 {
        if self.original_bits == 0 {
            return 0.0;
        }
        self.encoded_bits as f64 / self.original_bits as f64
    }
}

/// Counters of a codec at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodecStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// trees constructed by this codec, i.e. cache misses that did real work
    pub trees_built: u64,
    pub cached_entries: usize,
}

impl HuffmanCodec {
    /// Create a codec with a private cache of `capacity` entries.
    ///
    /// A cache always holds at least one entry: a capacity of 0 is raised to
    /// 1. `CoreConfig::validate` rejects 0 instead, so `Analyzer::new` never
    /// reaches the raise.
    pub fn new(capacity: usize) -> Self {
        Self::with_cache(Arc::new(EncodedCache::new(capacity)))
    }

    /// Create a codec on an existing cache
    pub fn with_cache(cache: Arc<EncodedCache>) -> Self {
        Self {
            cache,
            trees_built: AtomicU64::new(0),
        }
    }

    /// Encode `content` into a string of `'0'` / `'1'`.
    ///
    /// A cached result is returned as is, without building a tree. On a miss
    /// the tree and code table are built from `content` itself and the result
    /// is cached before returning. Empty content encodes to an empty string
    /// and is not cached.
    ///
    /// # Errors
    /// `EncodingError::MissingCode` if a char has no code. The table is built
    /// from the same content, so this signals a broken invariant.
    pub fn encode(&self, content: &str) -> Result<String, EncodingError> {
        if content.is_empty() {
            return Ok(String::new());
        }
        if let Some(encoded) = self.cache.get(content) {
            tracing::debug!(bits = encoded.len(), "huffman cache hit");
            return Ok(encoded);
        }

        let tree = HuffmanTree::build(content);
        self.trees_built.fetch_add(1, Ordering::Relaxed);
        let codes = CodeTable::generate(tree.as_ref());
        tracing::debug!(
            symbols = codes.len(),
            bytes = content.len(),
            "huffman cache miss, built code table"
        );

        let encoded = encode_with_codes(&codes, content).map_err(|err| {
            tracing::warn!(%err, "huffman encoding failed");
            err
        })?;
        if self.cache.insert(content.to_string(), encoded.clone()).is_some() {
            tracing::debug!(capacity = self.cache.capacity(), "huffman cache evicted an entry");
        }
        Ok(encoded)
    }

    /// Encode `content` and report its size before and after
    pub fn report(&self, content: &str) -> Result<CompressionReport, EncodingError> {
        let encoded = self.encode(content)?;
        Ok(CompressionReport {
            original_bits: content.len() as u64 * 8,
            encoded_bits: encoded.len() as u64,
            symbols: symbol_frequencies(content).len(),
        })
    }

    pub fn stats(&self) -> CodecStats {
        let cache = self.cache.stats();
        CodecStats {
            hits: cache.hits,
            misses: cache.misses,
            evictions: cache.evictions,
            trees_built: self.trees_built.load(Ordering::Relaxed),
            cached_entries: cache.entries,
        }
    }

    /// Drop every cached encoding
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    #[inline]
    pub fn cache(&self) -> &Arc<EncodedCache> {
        &self.cache
    }
}

impl Default for HuffmanCodec {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rayon::prelude::*;

    #[test]
    fn single_symbol_content() {
        let codec = HuffmanCodec::default();
        assert_eq!(codec.encode("dddddd").unwrap(), "000000");
    }

    #[test]
    fn empty_content() {
        let codec = HuffmanCodec::default();
        assert_eq!(codec.encode("").unwrap(), "");
        assert_eq!(codec.stats().trees_built, 0);
        assert_eq!(codec.stats().cached_entries, 0);
    }

    #[test]
    fn length_is_explained_by_codes() {
        let codec = HuffmanCodec::default();
        let content = "aabbbc";
        let encoded = codec.encode(content).unwrap();
        let codes = CodeTable::generate(HuffmanTree::build(content).as_ref());
        let expected: usize = content.chars().map(|c| codes.get(c).unwrap().len()).sum();
        assert_eq!(encoded.len(), expected);
        assert_eq!(encoded, "111100010");
    }

    #[test]
    fn second_call_hits_the_cache() {
        let codec = HuffmanCodec::new(8);
        let first = codec.encode("mississippi").unwrap();
        let second = codec.encode("mississippi").unwrap();
        assert_eq!(first, second);

        let stats = codec.stats();
        assert_eq!(stats.trees_built, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.cached_entries, 1);
    }

    #[test]
    fn cache_is_bounded() {
        let codec = HuffmanCodec::new(2);
        for content in ["ab", "abc", "abcd", "ab"] {
            codec.encode(content).unwrap();
        }
        let stats = codec.stats();
        assert_eq!(stats.cached_entries, 2);
        assert_eq!(stats.evictions, 2);
        // "ab" was evicted before being requested again
        assert_eq!(stats.trees_built, 4);
    }

    #[test]
    fn zero_capacity_keeps_one_entry() {
        let codec = HuffmanCodec::new(0);
        assert_eq!(codec.cache().capacity(), 1);
        codec.encode("first").unwrap();
        codec.encode("second").unwrap();
        codec.encode("second").unwrap();
        let stats = codec.stats();
        assert_eq!(stats.cached_entries, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn clear_cache_forces_rebuild() {
        let codec = HuffmanCodec::new(4);
        codec.encode("hello").unwrap();
        codec.clear_cache();
        codec.encode("hello").unwrap();
        assert_eq!(codec.stats().trees_built, 2);
    }

    #[test]
    fn shared_cache_between_codecs() {
        let cache = Arc::new(EncodedCache::new(16));
        let a = HuffmanCodec::with_cache(Arc::clone(&cache));
        let b = HuffmanCodec::with_cache(Arc::clone(&cache));
        let encoded = a.encode("shared text").unwrap();
        assert_eq!(b.encode("shared text").unwrap(), encoded);
        assert_eq!(b.stats().trees_built, 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn multibyte_content_is_encoded_per_char() {
        let codec = HuffmanCodec::default();
        let report = codec.report("ёёёж").unwrap();
        // 4 chars, 8 UTF-8 bytes, two symbols with one-bit codes
        assert_eq!(report.original_bits, 64);
        assert_eq!(report.encoded_bits, 4);
        assert_eq!(report.symbols, 2);
        assert!((report.ratio() - 4.0 / 64.0).abs() < 1e-12);
    }

    #[test]
    fn report_of_empty_content() {
        let report = HuffmanCodec::default().report("").unwrap();
        assert_eq!(report.encoded_bits, 0);
        assert_eq!(report.ratio(), 0.0);
    }

    #[test]
    fn concurrent_encoding_agrees() {
        let codec = HuffmanCodec::new(4);
        let inputs: Vec<String> = (0..64).map(|i| format!("text number {}", i % 6)).collect();
        let encoded: Vec<String> = inputs.par_iter().map(|s| codec.encode(s).unwrap()).collect();
        for (input, bits) in inputs.iter().zip(&encoded) {
            assert_eq!(&codec.encode(input).unwrap(), bits);
        }
        assert!(codec.stats().cached_entries <= 4);
    }

    proptest! {
        #[test]
        fn encoding_is_prefix_free_and_accounted(content in "\\PC{0,64}") {
            let codec = HuffmanCodec::new(4);
            let encoded = codec.encode(&content).unwrap();
            let codes = CodeTable::generate(HuffmanTree::build(&content).as_ref());
            prop_assert!(codes.is_prefix_free());
            prop_assert_eq!(Some(encoded.len()), codes.encoded_len(&content));
            prop_assert!(encoded.chars().all(|c| c == '0' || c == '1'));
            prop_assert_eq!(codec.encode(&content).unwrap(), encoded);
        }
    }
}
