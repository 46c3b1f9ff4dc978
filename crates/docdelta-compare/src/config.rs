use std::path::Path;
use std::time::Duration;

use docdelta_align::{
    AlignConfig, SimilarityThresholds, DEFAULT_MAX_BLOCKS_PER_SIDE, DEFAULT_MODIFIED_THRESHOLD,
};
use docdelta_diff::DiffOptions;
use serde::{Deserialize, Serialize};

use crate::error::{CompareError, CompareResult};

/// Settings for the comparison engine.
///
/// Every field has a default, so a TOML file only needs the keys it
/// overrides:
///
/// ```toml
/// max_blocks_per_side = 2000
/// diff_timeout_ms = 500
///
/// [thresholds]
/// long = 0.75
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Inputs with more blocks than this on either side are rejected.
    pub max_blocks_per_side: usize,
    /// Matched pairs at or below this similarity ratio are "modified".
    pub modified_threshold: f64,
    /// Time budget for each text diff, in milliseconds.
    pub diff_timeout_ms: u64,
    /// Align diff boundaries on words and punctuation.
    pub semantic_cleanup: bool,
    /// Length-dependent cutoffs for pairing text blocks.
    pub thresholds: SimilarityThresholds,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            max_blocks_per_side: DEFAULT_MAX_BLOCKS_PER_SIDE,
            modified_threshold: DEFAULT_MODIFIED_THRESHOLD,
            diff_timeout_ms: 1000,
            semantic_cleanup: true,
            thresholds: SimilarityThresholds::default(),
        }
    }
}

impl CompareConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> CompareResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| CompareError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> CompareResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> CompareResult<String> {
        toml::to_string(self).map_err(|e| CompareError::Config(e.to_string()))
    }

    /// Reject settings the engine cannot honour.
    pub fn validate(&self) -> CompareResult<()> {
        if self.max_blocks_per_side == 0 {
            return Err(CompareError::Config(
                "max_blocks_per_side must be at least 1".into(),
            ));
        }
        let ratios = [
            ("modified_threshold", self.modified_threshold),
            ("thresholds.short", self.thresholds.short),
            ("thresholds.medium", self.thresholds.medium),
            ("thresholds.long", self.thresholds.long),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(CompareError::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.thresholds.short_max_len >= self.thresholds.medium_max_len {
            return Err(CompareError::Config(format!(
                "thresholds.short_max_len ({}) must be below thresholds.medium_max_len ({})",
                self.thresholds.short_max_len, self.thresholds.medium_max_len
            )));
        }
        Ok(())
    }

    pub fn align_config(&self) -> AlignConfig {
        AlignConfig {
            max_blocks_per_side: self.max_blocks_per_side,
            modified_threshold: self.modified_threshold,
        }
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            timeout: Duration::from_millis(self.diff_timeout_ms),
            semantic_cleanup: self.semantic_cleanup,
        }
    }
}
