use std::fmt;

use serde::{Deserialize, Serialize};

use crate::block::Block;

/// Classification of one aligned pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Matched,
    Modified,
    Added,
    Removed,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Matched => "matched",
            Self::Modified => "modified",
            Self::Added => "added",
            Self::Removed => "removed",
        })
    }
}

/// One row of a block alignment, borrowing the blocks of both versions.
///
/// `old` always refers to version 1 and `new` to version 2. Similarity is a
/// ratio in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "matchType", rename_all = "lowercase")]
pub enum AlignedPair<'a> {
    /// Both sides present and near-identical.
    Matched {
        #[serde(rename = "block1")]
        old: &'a Block,
        #[serde(rename = "block2")]
        new: &'a Block,
        similarity: f64,
    },
    /// Both sides present, same identity, content differs.
    Modified {
        #[serde(rename = "block1")]
        old: &'a Block,
        #[serde(rename = "block2")]
        new: &'a Block,
        similarity: f64,
    },
    /// Only present in version 2.
    Added {
        #[serde(rename = "block2")]
        new: &'a Block,
    },
    /// Only present in version 1.
    Removed {
        #[serde(rename = "block1")]
        old: &'a Block,
    },
}

impl<'a> AlignedPair<'a> {
    pub fn match_type(&self) -> MatchType {
        match self {
            Self::Matched { .. } => MatchType::Matched,
            Self::Modified { .. } => MatchType::Modified,
            Self::Added { .. } => MatchType::Added,
            Self::Removed { .. } => MatchType::Removed,
        }
    }

    /// The version-1 side, absent for added blocks.
    pub fn block1(&self) -> Option<&'a Block> {
        match *self {
            Self::Matched { old, .. } | Self::Modified { old, .. } | Self::Removed { old } => {
                Some(old)
            }
            Self::Added { .. } => None,
        }
    }

    /// The version-2 side, absent for removed blocks.
    pub fn block2(&self) -> Option<&'a Block> {
        match *self {
            Self::Matched { new, .. } | Self::Modified { new, .. } | Self::Added { new } => {
                Some(new)
            }
            Self::Removed { .. } => None,
        }
    }

    /// Similarity of a two-sided pair; `None` for added or removed blocks.
    pub fn similarity(&self) -> Option<f64> {
        match *self {
            Self::Matched { similarity, .. } | Self::Modified { similarity, .. } => {
                Some(similarity)
            }
            Self::Added { .. } | Self::Removed { .. } => None,
        }
    }

    /// Both sides, when the pair has both.
    pub fn both(&self) -> Option<(&'a Block, &'a Block)> {
        self.block1().zip(self.block2())
    }
}
