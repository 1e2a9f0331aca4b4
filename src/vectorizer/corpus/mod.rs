use indexmap::{IndexMap, IndexSet};
use num::Float;
use serde::{Deserialize, Serialize};

use super::TermTable;

/// keep document count and per-term document counts
///
/// Each document contributes at most 1 to a term's count regardless of how
/// often the term repeats inside it, so `1 <= term_count <= doc_num` holds for
/// every stored term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFrequency {
    /// number of documents added minus documents removed
    pub(crate) doc_num: u64,
    /// term -> number of documents containing it
    #[serde(with = "indexmap::map::serde_seq")]
    pub(crate) term_counts: IndexMap<String, u64>,
}

impl DocumentFrequency {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::new(),
        }
    }

    /// Add a document, tokenized on whitespace
    pub fn add_document(&mut self, doc: &str) -> &mut Self {
        let terms: IndexSet<&str> = doc.split_whitespace().collect();
        self.add_set(&terms)
    }

    /// Remove a document previously added with `add_document`.
    /// Terms whose count drops to zero are removed.
    ///
    /// # Returns
    /// * `bool` - `false` if `doc` cannot have been added (no documents left,
    ///   a term of `doc` is unknown, or another term is in every document);
    ///   the counts are then left untouched
    pub fn remove_document(&mut self, doc: &str) -> bool {
        let terms: IndexSet<&str> = doc.split_whitespace().collect();
        if !self.can_remove(&terms) {
            return false;
        }
        self.sub_set(&terms);
        true
    }

    /// Add a document's distinct term set
    fn add_set(&mut self, terms: &IndexSet<&str>) -> &mut Self {
        self.doc_num += 1;
        for &term in terms {
            match self.term_counts.get_mut(term) {
                Some(count) => *count += 1,
                None => {
                    self.term_counts.insert(term.to_string(), 1);
                }
            }
        }
        self
    }

    /// `1 <= term_count <= doc_num` still holds after removing `terms`
    fn can_remove(&self, terms: &IndexSet<&str>) -> bool {
        let Some(remaining) = self.doc_num.checked_sub(1) else {
            return false;
        };
        if !terms.iter().all(|&term| self.term_counts.contains_key(term)) {
            return false;
        }
        self.term_counts.iter().all(|(term, &count)| {
            let after = if terms.contains(term.as_str()) { count.saturating_sub(1) } else { count };
            after <= remaining
        })
    }

    fn sub_set(&mut self, terms: &IndexSet<&str>) -> &mut Self {
        self.doc_num -= 1;
        for &term in terms {
            if let Some(count) = self.term_counts.get_mut(term) {
                if *count > 1 {
                    *count -= 1;
                } else {
                    self.term_counts.shift_remove(term);
                }
            }
        }
        self
    }

    /// Get the number of documents
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Get the number of documents containing `term`
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.doc_num == 0
    }
}

/// IDF calculation
impl DocumentFrequency {
    /// `ln(total_doc_count / doc_count)`
    ///
    /// Callers guarantee `1 <= doc_count <= total_doc_count`; a term present in
    /// every document therefore scores exactly 0.0.
    #[inline]
    pub fn idf_calc(total_doc_count: u64, doc_count: u64) -> f64 {
        (total_doc_count as f64 / doc_count as f64).ln()
    }

    /// IDF of every term, empty when no document has been added
    pub fn idf_table<N>(&self) -> TermTable<N>
    where
        N: Float,
    {
        if self.doc_num == 0 {
            return IndexMap::new();
        }
        self.term_counts
            .iter()
            .map(|(term, &doc_count)| {
                let idf = Self::idf_calc(self.doc_num, doc_count);
                (term.clone(), num::cast::<f64, N>(idf).unwrap_or_else(N::zero))
            })
            .collect()
    }

    /// IDF of a single term, `None` when no document contains it
    pub fn idf_term(&self, term: &str) -> Option<f64> {
        match self.term_counts.get(term) {
            Some(&doc_count) if self.doc_num > 0 => Some(Self::idf_calc(self.doc_num, doc_count)),
            _ => None,
        }
    }
}
