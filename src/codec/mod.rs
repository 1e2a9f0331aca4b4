//! Huffman coding of a single text into a `'0'`/`'1'` bit-string.
//!
//! `tree` builds the code tree from char frequencies, `codes` walks it into a
//! table and encodes with it, `encoder` wraps both behind a bounded cache.

pub mod codes;
pub mod encoder;
pub mod tree;

pub use codes::{encode_with_codes, CodeTable};
pub use encoder::{CodecStats, CompressionReport, EncodedCache, HuffmanCodec};
pub use tree::{symbol_frequencies, HuffmanNode, HuffmanTree};

/// Build the Huffman tree of `content`; `None` when it is empty
#[inline]
pub fn build_tree(content: &str) -> Option<HuffmanTree> {
    HuffmanTree::build(content)
}

/// Code table of a tree; a single-leaf tree gets `"0"`, no tree an empty table
#[inline]
pub fn generate_codes(tree: Option<&HuffmanTree>) -> CodeTable {
    CodeTable::generate(tree)
}
