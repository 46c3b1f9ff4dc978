use serde::{Deserialize, Serialize};

use crate::error::{AlignError, AlignResult};

/// Largest number of blocks accepted on either side by default.
pub const DEFAULT_MAX_BLOCKS_PER_SIDE: usize = 5000;

/// Pairs at or below this similarity are reported as modified.
pub const DEFAULT_MODIFIED_THRESHOLD: f64 = 0.95;

/// Configuration for the block aligner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Inputs with more blocks than this on either side are rejected before
    /// the LCS table is allocated.
    pub max_blocks_per_side: usize,
    /// Matched pairs whose similarity ratio is at or below this value are
    /// classified as modified rather than matched.
    pub modified_threshold: f64,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            max_blocks_per_side: DEFAULT_MAX_BLOCKS_PER_SIDE,
            modified_threshold: DEFAULT_MODIFIED_THRESHOLD,
        }
    }
}

impl AlignConfig {
    /// Fail fast when either side is over the block limit.
    pub fn check_limits(&self, old_blocks: usize, new_blocks: usize) -> AlignResult<()> {
        if old_blocks > self.max_blocks_per_side || new_blocks > self.max_blocks_per_side {
            return Err(AlignError::ResourceLimitExceeded {
                old_blocks,
                new_blocks,
                limit: self.max_blocks_per_side,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_inclusive() {
        let config = AlignConfig::default();
        assert!(config.check_limits(5000, 5000).is_ok());
        assert_eq!(
            config.check_limits(1, 5001),
            Err(AlignError::ResourceLimitExceeded {
                old_blocks: 1,
                new_blocks: 5001,
                limit: 5000,
            })
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: AlignConfig = serde_json::from_str(r#"{"max_blocks_per_side": 10}"#).unwrap();
        assert_eq!(config.max_blocks_per_side, 10);
        assert_eq!(config.modified_threshold, DEFAULT_MODIFIED_THRESHOLD);
    }
}
