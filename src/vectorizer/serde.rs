use crate::error::SnapshotError;
use crate::vectorizer::corpus::DocumentFrequency;

/// CBOR snapshots of `DocumentFrequency`.
///
/// The core does not own storage; callers persist these bytes wherever they
/// keep per-collection state and restore them to keep updating IDF
/// incrementally instead of rescanning every document.
impl DocumentFrequency {
    /// Serialize into CBOR bytes
    pub fn to_cbor(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(serde_cbor::to_vec(self)?)
    }

    /// Deserialize from CBOR bytes
    ///
    /// Rejects snapshots whose counts break `1 <= term_count <= doc_num`,
    /// since those would produce negative or infinite IDF values.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let df: DocumentFrequency = serde_cbor::from_slice(bytes)?;
        for (term, &count) in &df.term_counts {
            if count == 0 || count > df.doc_num {
                return Err(SnapshotError::InconsistentCount {
                    term: term.clone(),
                    count,
                    documents: df.doc_num,
                });
            }
        }
        Ok(df)
    }
}
