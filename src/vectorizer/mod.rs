pub mod analyzer;
pub mod corpus;
pub mod serde;
pub mod token;

use indexmap::IndexMap;

use crate::vectorizer::{corpus::DocumentFrequency, token::TokenFrequency};

/// term -> score
///
/// Keys are unique; iteration follows the order in which terms were first
/// seen in the corpus, which callers must not rely on.
pub type TermTable<N = f64> = IndexMap<String, N>;

/// term -> `count(term) / total tokens` over the whole corpus
pub type TermFrequencyTable = TermTable<f64>;

/// term -> `ln(documents / documents containing term)`
pub type InverseDocumentFrequencyTable = TermTable<f64>;

/// Corpus-wide term frequency.
///
/// Every document is tokenized on runs of whitespace and all tokens are pooled
/// into one counter. No normalization is applied here.
///
/// # Arguments
/// * `corpus` - documents
///
/// # Returns
/// * `TermFrequencyTable` - empty when the corpus has no tokens
///
/// # Examples
/// ```
/// use tf_idf_huffman::compute_tf;
/// let tf = compute_tf(&["a b", "a"]);
/// assert!((tf["a"] - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn compute_tf<T>(corpus: &[T]) -> TermFrequencyTable
where
    T: AsRef<str>,
{
    let mut freq = TokenFrequency::new();
    for doc in corpus {
        freq.add_document(doc.as_ref());
    }
    tracing::trace!(
        documents = corpus.len(),
        tokens = freq.token_total_count(),
        unique = freq.token_num(),
        "computed term frequency"
    );
    freq.tf_table()
}

/// Inverse document frequency over a corpus.
///
/// A term repeated inside one document counts once for that document.
/// Terms found in every document score 0.0.
///
/// # Arguments
/// * `corpus` - documents
///
/// # Returns
/// * `InverseDocumentFrequencyTable` - empty for an empty corpus
pub fn compute_idf<T>(corpus: &[T]) -> InverseDocumentFrequencyTable
where
    T: AsRef<str>,
{
    let mut df = DocumentFrequency::new();
    for doc in corpus {
        df.add_document(doc.as_ref());
    }
    tracing::trace!(
        documents = df.doc_num(),
        vocab = df.vocab_size(),
        "computed inverse document frequency"
    );
    df.idf_table()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn tf_example() {
        let tf = compute_tf(&["это первая строка строка", "это вторая строка строка"]);
        assert_eq!(tf.len(), 4);
        assert_abs_diff_eq!(tf["строка"], 0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(tf["это"], 0.25, epsilon = 1e-4);
        assert_abs_diff_eq!(tf["первая"], 0.125, epsilon = 1e-4);
        assert_abs_diff_eq!(tf["вторая"], 0.125, epsilon = 1e-4);
    }

    #[test]
    fn idf_example() {
        let idf = compute_idf(&["ослик суслик", "паукан ослик", "ослик суслик паукан"]);
        assert_abs_diff_eq!(idf["ослик"], 0.0, epsilon = 1e-4);
        assert!(idf["суслик"] > idf["ослик"]);
        assert!(idf["паукан"] > 0.0);
    }

    #[test]
    fn idf_of_single_document_term_is_ln_n() {
        let idf = compute_idf(&["a b", "a", "a c", "a"]);
        assert_abs_diff_eq!(idf["b"], 4f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(idf["c"], 4f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(idf["a"], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_corpus() {
        let empty: [&str; 0] = [];
        assert!(compute_tf(&empty).is_empty());
        assert!(compute_idf(&empty).is_empty());
    }

    #[test]
    fn whitespace_only_corpus() {
        let corpus = ["   ", "\n\t"];
        assert!(compute_tf(&corpus).is_empty());
        assert!(compute_idf(&corpus).is_empty());
    }

    #[test]
    fn accepts_owned_strings() {
        let corpus = vec!["x y".to_string(), "y".to_string()];
        let tf = compute_tf(&corpus);
        assert_abs_diff_eq!(tf["y"], 2.0 / 3.0, epsilon = 1e-12);
    }

    fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-e ]{0,24}", 0..8)
    }

    proptest! {
        #[test]
        fn tf_sums_to_one(corpus in corpus_strategy()) {
            let tf = compute_tf(&corpus);
            let has_tokens = corpus.iter().any(|d| d.split_whitespace().next().is_some());
            if has_tokens {
                let sum: f64 = tf.values().sum();
                prop_assert!((sum - 1.0).abs() < 1e-9, "sum = {}", sum);
            } else {
                prop_assert!(tf.is_empty());
            }
            prop_assert!(tf.values().all(|v| v.is_finite() && *v > 0.0));
        }

        #[test]
        fn idf_is_bounded_by_ln_n(corpus in corpus_strategy()) {
            let idf = compute_idf(&corpus);
            let upper = (corpus.len() as f64).ln();
            for (term, value) in &idf {
                prop_assert!(value.is_finite());
                prop_assert!(*value >= 0.0 && *value <= upper + 1e-12, "{} = {}", term, value);
                prop_assert!(corpus.iter().any(|d| d.split_whitespace().any(|t| t == term.as_str())));
            }
        }

        #[test]
        fn idf_is_order_independent(mut corpus in corpus_strategy()) {
            let forward = compute_idf(&corpus);
            corpus.reverse();
            let backward = compute_idf(&corpus);
            prop_assert_eq!(forward.len(), backward.len());
            for (term, value) in &forward {
                prop_assert!((backward[term] - value).abs() < 1e-12);
            }
        }
    }
}
