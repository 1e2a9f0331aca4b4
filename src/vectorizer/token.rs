use indexmap::IndexMap;
use num::Float;
use serde::{Deserialize, Serialize};

use super::TermTable;

/// TokenFrequency struct
/// Counts token occurrences over every document fed into it.
///
/// Counts are pooled: a token seen twice in one document and once in another
/// has count 3, and the total is the number of tokens of all documents
/// together. This is the base data of the corpus-wide TF table.
///
/// # Examples
/// ```
/// use tf_idf_huffman::TokenFrequency;
/// let mut freq = TokenFrequency::new();
/// freq.add_document("rust fast rust");
/// freq.add_document("rust safe");
///
/// assert_eq!(freq.token_count("rust"), 3);
/// assert_eq!(freq.token_total_count(), 5);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u64>,
    total_token_count: u64,
}

/// Adding tokens
impl TokenFrequency {
    /// Create a new TokenFrequency
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Add a token
    ///
    /// # Arguments
    /// * `token` - token to add
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        match self.token_count.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.token_count.insert(token.to_string(), 1);
            }
        }
        self.total_token_count += 1;
        self
    }

    /// Add multiple tokens
    ///
    /// # Arguments
    /// * `tokens` - slice of tokens to add
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Tokenize a document on runs of whitespace and add every token.
    /// No normalization is applied.
    ///
    /// # Arguments
    /// * `doc` - document text
    #[inline]
    pub fn add_document(&mut self, doc: &str) -> &mut Self {
        for token in doc.split_whitespace() {
            self.add_token(token);
        }
        self
    }

    /// Merge the counts of another TokenFrequency into self
    pub fn merge(&mut self, other: &TokenFrequency) -> &mut Self {
        for (token, &count) in &other.token_count {
            *self.token_count.entry(token.clone()).or_insert(0) += count;
        }
        self.total_token_count += other.total_token_count;
        self
    }

    /// Reset all counts
    #[inline]
    pub fn clear(&mut self) {
        self.token_count.clear();
        self.total_token_count = 0;
    }
}

/// TF calculation
impl TokenFrequency {
    /// TF of a single count
    ///
    /// # Arguments
    /// * `total` - total token count
    /// * `count` - count of the token
    ///
    /// # Returns
    /// * `f64` - `count / total`, or 0.0 when `total` is 0
    #[inline]
    pub fn tf_calc(total: u64, count: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        count as f64 / total as f64
    }

    /// TF of every token
    ///
    /// Empty when no token has been added, so the result never holds NaN.
    ///
    /// # Returns
    /// * `TermTable<N>` - token to TF, in first-seen order
    pub fn tf_table<N>(&self) -> TermTable<N>
    where
        N: Float,
    {
        let total = self.total_token_count;
        self.token_count
            .iter()
            .map(|(token, &count)| {
                let tf = Self::tf_calc(total, count);
                (token.clone(), num::cast::<f64, N>(tf).unwrap_or_else(N::zero))
            })
            .collect()
    }

    /// TF of a single token, 0.0 when unknown
    #[inline]
    pub fn tf_token(&self, token: &str) -> f64 {
        Self::tf_calc(self.total_token_count, self.token_count(token))
    }
}

/// Inspection
impl TokenFrequency {
    /// Occurrence count of a token
    #[inline]
    pub fn token_count(&self, token: &str) -> u64 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// Sum of all counts
    #[inline]
    pub fn token_total_count(&self) -> u64 {
        self.total_token_count
    }

    /// Number of unique tokens
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.token_count.contains_key(token)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_token_count == 0
    }

    /// Tokens with their counts, most frequent first (ties in dictionary order)
    pub fn sorted_frequency_vector(&self) -> Vec<(String, u64)> {
        let mut token_list: Vec<(String, u64)> = self
            .token_count
            .iter()
            .map(|(token, &count)| (token.clone(), count))
            .collect();
        token_list.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        token_list
    }

    /// Unique tokens / total tokens.
    /// 1.0 means every token is distinct; 0.0 for an empty counter.
    #[inline]
    pub fn unique_token_ratio(&self) -> f64 {
        if self.total_token_count == 0 {
            return 0.0;
        }
        self.token_count.len() as f64 / self.total_token_count as f64
    }
}
