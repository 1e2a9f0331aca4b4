use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Processing counters, safe to update from any thread
#[derive(Debug, Default)]
pub struct Metrics {
    processed_documents: AtomicU64,
    processing_time_ns: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_processed_documents: u64,
    /// average processing time per document in milliseconds
    pub avg_processing_ms: f64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `docs` processed documents that took `elapsed` in total
    pub fn record(&self, docs: u64, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.processed_documents.fetch_add(docs, Ordering::Relaxed);
        self.processing_time_ns.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let docs = self.processed_documents.load(Ordering::Relaxed);
        let nanos = self.processing_time_ns.load(Ordering::Relaxed);
        let avg_processing_ms = if docs > 0 {
            nanos as f64 / docs as f64 / 1e6
        } else {
            0.0
        };
        MetricsSnapshot {
            total_processed_documents: docs,
            avg_processing_ms,
        }
    }
}
