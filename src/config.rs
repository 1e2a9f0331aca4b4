//! Configuration of the composed analyzer.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CACHE_CAPACITY: usize = 1024;
pub const DEFAULT_STATISTICS_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// maximum number of cached Huffman encodings
    pub cache_capacity: usize,
    /// maximum number of terms in a statistics report
    pub statistics_limit: usize,
    /// compute TF and IDF on two rayon tasks
    pub parallel: bool,
    /// count identical document texts once when computing IDF for a document
    pub dedupe_corpus: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            statistics_limit: DEFAULT_STATISTICS_LIMIT,
            parallel: true,
            dedupe_corpus: true,
        }
    }
}

impl CoreConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: CoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::ZeroCacheCapacity);
        }
        if self.statistics_limit == 0 {
            return Err(ConfigError::ZeroStatisticsLimit);
        }
        Ok(())
    }
}
