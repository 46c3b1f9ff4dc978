//! Block equivalence strategies.
//!
//! The aligner's DP backbone only asks "are these the same block?" and "how
//! similar are they?". The business rules answering those questions live
//! here, behind [`BlockMatcher`], so they can be tuned and tested on their own.

use docdelta_diff::{similarity_percent, DiffOptions, TextDiffer};
use docdelta_types::{Block, BlockContent};
use serde::{Deserialize, Serialize};

/// Decides whether two blocks from different versions are the same block.
pub trait BlockMatcher {
    /// Returns `true` if `new` is a version of `old`.
    fn blocks_match(&self, old: &Block, new: &Block) -> bool;

    /// Similarity ratio in `[0, 1]` for a matched pair.
    fn similarity(&self, old: &Block, new: &Block) -> f64;
}

impl<M: BlockMatcher + ?Sized> BlockMatcher for &M {
    fn blocks_match(&self, old: &Block, new: &Block) -> bool {
        (**self).blocks_match(old, new)
    }

    fn similarity(&self, old: &Block, new: &Block) -> f64 {
        (**self).similarity(old, new)
    }
}

/// Length-dependent similarity cutoffs for text blocks.
///
/// The band is chosen by the average character length of the two texts.
/// Short texts such as headings swing sharply on small edits and get a lower
/// bar; long paragraphs get a higher one so that unrelated paragraphs with
/// overlapping boilerplate are not paired.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityThresholds {
    /// Texts averaging fewer characters than this use `short`.
    pub short_max_len: usize,
    pub short: f64,
    /// Texts averaging fewer characters than this (and not short) use `medium`.
    pub medium_max_len: usize,
    pub medium: f64,
    /// Everything longer.
    pub long: f64,
}

impl Default for SimilarityThresholds {
    fn default() -> Self {
        Self {
            short_max_len: 50,
            short: 0.4,
            medium_max_len: 200,
            medium: 0.6,
            long: 0.7,
        }
    }
}

impl SimilarityThresholds {
    /// The cutoff for two texts of the given character lengths.
    pub fn threshold_for(&self, old_len: usize, new_len: usize) -> f64 {
        let average = (old_len + new_len) as f64 / 2.0;
        if average < self.short_max_len as f64 {
            self.short
        } else if average < self.medium_max_len as f64 {
            self.medium
        } else {
            self.long
        }
    }
}

/// The production matching rules.
///
/// - Blocks of different kinds never match.
/// - Images match when their image ids or their file names are equal. Two
///   images without any identifier match each other.
/// - Text blocks sharing a paragraph index occupy the same structural slot
///   and match regardless of wording.
/// - Other text blocks match when their similarity reaches the
///   length-dependent threshold.
#[derive(Clone, Debug, Default)]
pub struct DefaultMatcher {
    thresholds: SimilarityThresholds,
    differ: TextDiffer,
}

impl DefaultMatcher {
    pub fn new(thresholds: SimilarityThresholds, diff_options: DiffOptions) -> Self {
        Self {
            thresholds,
            differ: TextDiffer::new(diff_options),
        }
    }

    pub fn thresholds(&self) -> &SimilarityThresholds {
        &self.thresholds
    }

    fn texts_match(&self, old: &str, new: &str) -> bool {
        if old == new {
            return true;
        }
        let old_len = old.chars().count();
        let new_len = new.chars().count();
        let threshold = self.thresholds.threshold_for(old_len, new_len);

        // The distance is at least the length difference, so this is the
        // best score the pair could reach.
        let ceiling = similarity_percent(old_len.abs_diff(new_len), old_len, new_len) / 100.0;
        if ceiling < threshold {
            return false;
        }
        self.differ.similarity_ratio(old, new) >= threshold
    }
}

impl BlockMatcher for DefaultMatcher {
    fn blocks_match(&self, old: &Block, new: &Block) -> bool {
        match (&old.content, &new.content) {
            (
                BlockContent::Image {
                    image_id: old_id,
                    file_name: old_name,
                },
                BlockContent::Image {
                    image_id: new_id,
                    file_name: new_name,
                },
            ) => {
                let anonymous = old_id.is_none()
                    && old_name.is_none()
                    && new_id.is_none()
                    && new_name.is_none();
                anonymous || same_identifier(old_id, new_id) || same_identifier(old_name, new_name)
            }
            (
                BlockContent::Text {
                    text: old_text,
                    paragraph_index: old_index,
                },
                BlockContent::Text {
                    text: new_text,
                    paragraph_index: new_index,
                },
            ) => {
                if old_index.is_some() && old_index == new_index {
                    return true;
                }
                self.texts_match(old_text, new_text)
            }
            _ => false,
        }
    }

    fn similarity(&self, old: &Block, new: &Block) -> f64 {
        match (&old.content, &new.content) {
            (BlockContent::Text { text: a, .. }, BlockContent::Text { text: b, .. }) => {
                self.differ.similarity_ratio(a, b)
            }
            (BlockContent::Image { .. }, BlockContent::Image { .. }) => {
                if self.blocks_match(old, new) {
                    1.0
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }
}

fn same_identifier(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}
