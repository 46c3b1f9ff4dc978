use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tuning knobs for the text diff engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Time budget for the Myers search. When it runs out the engine falls
    /// back to a coarser, still fully reconstructing, edit script.
    pub timeout: Duration,
    /// Shift and merge segment boundaries onto word and punctuation breaks.
    pub semantic_cleanup: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            semantic_cleanup: true,
        }
    }
}

impl DiffOptions {
    /// Options with a custom time budget.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Default::default()
        }
    }
}
