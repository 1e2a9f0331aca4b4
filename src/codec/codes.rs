use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::codec::tree::{HuffmanNode, HuffmanTree};
use crate::error::EncodingError;

/// symbol -> Huffman code as a string of `'0'` / `'1'`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTable {
    #[serde(with = "indexmap::map::serde_seq")]
    codes: IndexMap<char, String>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self {
            codes: IndexMap::new(),
        }
    }

    /// Walk the tree depth-first, appending `0` for left and `1` for right.
    ///
    /// A tree that is a single leaf has no edge to walk; its symbol gets `"0"`.
    /// No tree gives an empty table.
    pub fn generate(tree: Option<&HuffmanTree>) -> Self {
        let mut table = Self::new();
        let root = match tree {
            Some(tree) => tree.root(),
            None => return table,
        };
        if let HuffmanNode::Leaf { symbol, .. } = root {
            table.codes.insert(*symbol, "0".to_string());
            return table;
        }

        // explicit stack; left is pushed last so it is visited first
        let mut stack: Vec<(&HuffmanNode, String)> = vec![(root, String::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    table.codes.insert(*symbol, path);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push('1');
                    stack.push((right.as_ref(), right_path));

                    let mut left_path = path;
                    left_path.push('0');
                    stack.push((left.as_ref(), left_path));
                }
            }
        }
        table
    }

    #[inline]
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    /// Replace or add a code. Codes are not checked for prefix freedom.
    pub fn insert(&mut self, symbol: char, code: impl Into<String>) -> Option<String> {
        self.codes.insert(symbol, code.into())
    }

    pub fn remove(&mut self, symbol: char) -> Option<String> {
        self.codes.shift_remove(&symbol)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.codes.iter().map(|(c, code)| (*c, code.as_str()))
    }

    /// No code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&str> = self.codes.values().map(String::as_str).collect();
        // after sorting, a prefix sorts directly before some code it prefixes
        codes.sort_unstable();
        codes.windows(2).all(|w| !w[1].starts_with(w[0]))
    }

    /// Bits needed to encode `content`, `None` if a char has no code
    pub fn encoded_len(&self, content: &str) -> Option<usize> {
        content
            .chars()
            .try_fold(0usize, |acc, c| self.codes.get(&c).map(|code| acc + code.len()))
    }
}

/// Concatenate the code of every char of `content`, in order.
///
/// # Errors
/// `EncodingError::MissingCode` for the first char without a code.
pub fn encode_with_codes(codes: &CodeTable, content: &str) -> Result<String, EncodingError> {
    let mut out = String::with_capacity(content.len() * 2);
    for (position, symbol) in content.chars().enumerate() {
        match codes.get(symbol) {
            Some(code) => out.push_str(code),
            None => return Err(EncodingError::MissingCode { symbol, position }),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tree_gives_empty_table() {
        assert!(CodeTable::generate(None).is_empty());
    }

    #[test]
    fn single_leaf_gets_zero() {
        let tree = HuffmanTree::build("dddddd");
        let codes = CodeTable::generate(tree.as_ref());
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get('d'), Some("0"));
    }

    #[test]
    fn codes_are_unique_non_empty_and_prefix_free() {
        let tree = HuffmanTree::build("aabbbc");
        let codes = CodeTable::generate(tree.as_ref());
        assert_eq!(codes.len(), 3);
        assert!(codes.iter().all(|(_, code)| !code.is_empty()));
        assert!(codes.is_prefix_free());
        // most frequent symbol gets the shortest code
        assert_eq!(codes.get('b').map(str::len), Some(1));
        assert_eq!(codes.get('a').map(str::len), Some(2));
        assert_eq!(codes.get('c').map(str::len), Some(2));
    }

    #[test]
    fn fixed_tie_break_gives_exact_codes() {
        let tree = HuffmanTree::build("aabbbc");
        let codes = CodeTable::generate(tree.as_ref());
        assert_eq!(codes.get('b'), Some("0"));
        assert_eq!(codes.get('c'), Some("10"));
        assert_eq!(codes.get('a'), Some("11"));
    }

    #[test]
    fn prefix_check_detects_violation() {
        let mut codes = CodeTable::new();
        codes.insert('a', "0");
        codes.insert('b', "01");
        assert!(!codes.is_prefix_free());
        codes.insert('b', "10");
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn encoded_len_matches_encoding() {
        let content = "abracadabra";
        let codes = CodeTable::generate(HuffmanTree::build(content).as_ref());
        let encoded = encode_with_codes(&codes, content).unwrap();
        assert_eq!(codes.encoded_len(content), Some(encoded.len()));
        assert!(encoded.chars().all(|c| c == '0' || c == '1'));
    }

    #[test]
    fn missing_code_is_an_error() {
        let content = "aabbbc";
        let mut codes = CodeTable::generate(HuffmanTree::build(content).as_ref());
        codes.remove('c');
        assert_eq!(
            encode_with_codes(&codes, content),
            Err(EncodingError::MissingCode { symbol: 'c', position: 5 })
        );
        assert_eq!(codes.encoded_len(content), None);
    }

    #[test]
    fn empty_content_encodes_to_empty() {
        assert_eq!(encode_with_codes(&CodeTable::new(), ""), Ok(String::new()));
    }
}
