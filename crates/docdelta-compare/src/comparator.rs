//! The comparison pipeline: align once, then diff every text pair.

use docdelta_align::{BlockAligner, BlockMatcher, DefaultMatcher};
use docdelta_diff::TextDiffer;
use docdelta_types::{AlignedPair, Block, DocumentVersion};
use tracing::{debug, info};

use crate::comparison::{Comparison, PairComparison, TextComparison};
use crate::config::CompareConfig;
use crate::error::CompareResult;

/// Compares document versions with fixed settings.
///
/// Holds no per-comparison state, so one instance can serve concurrent
/// callers.
#[derive(Clone, Debug)]
pub struct Comparator<M = DefaultMatcher> {
    aligner: BlockAligner<M>,
    differ: TextDiffer,
}

impl Comparator<DefaultMatcher> {
    /// Build a comparator from a validated configuration.
    pub fn new(config: &CompareConfig) -> CompareResult<Self> {
        let matcher = DefaultMatcher::new(config.thresholds.clone(), config.diff_options());
        Self::with_matcher(config, matcher)
    }
}

impl Default for Comparator<DefaultMatcher> {
    fn default() -> Self {
        let config = CompareConfig::default();
        Self::assemble(&config, DefaultMatcher::default())
    }
}

impl<M: BlockMatcher> Comparator<M> {
    /// Build a comparator around a custom block matcher. The matcher's own
    /// settings take precedence over `config.thresholds`.
    pub fn with_matcher(config: &CompareConfig, matcher: M) -> CompareResult<Self> {
        config.validate()?;
        Ok(Self::assemble(config, matcher))
    }

    fn assemble(config: &CompareConfig, matcher: M) -> Self {
        Self {
            aligner: BlockAligner::with_matcher(config.align_config(), matcher),
            differ: TextDiffer::new(config.diff_options()),
        }
    }

    /// Compare version 1 (`old`) against version 2 (`new`).
    pub fn compare<'a>(
        &self,
        old: &'a [Block],
        new: &'a [Block],
    ) -> CompareResult<Comparison<'a>> {
        let aligned = self.aligner.align(old, new)?;

        let pairs: Vec<PairComparison<'a>> = aligned
            .into_iter()
            .map(|pair| PairComparison {
                diff: self.diff_pair(&pair),
                pair,
            })
            .collect();

        let comparison = Comparison::from_pairs(pairs);
        info!(
            matched = comparison.summary.matched,
            modified = comparison.summary.modified,
            added = comparison.summary.added,
            removed = comparison.summary.removed,
            chars_added = comparison.stats.added,
            chars_removed = comparison.stats.removed,
            chars_unchanged = comparison.stats.unchanged,
            "comparison complete"
        );
        Ok(comparison)
    }

    /// Compare two validated document versions.
    pub fn compare_versions<'a>(
        &self,
        old: &'a DocumentVersion,
        new: &'a DocumentVersion,
    ) -> CompareResult<Comparison<'a>> {
        self.compare(old.blocks(), new.blocks())
    }

    /// Diff a two-sided text pair. One-sided pairs and images have nothing
    /// to diff.
    fn diff_pair(&self, pair: &AlignedPair<'_>) -> Option<TextComparison> {
        let (old, new) = pair.both()?;
        let (old_text, new_text) = (old.text_content()?, new.text_content()?);
        let diff = self.differ.compute(old_text, new_text);
        debug!(
            old = %old.id,
            new = %new.id,
            similarity = diff.similarity(),
            "diffed text pair"
        );
        Some(diff.into())
    }
}

/// Compare two block sequences with the default configuration.
pub fn compare<'a>(old: &'a [Block], new: &'a [Block]) -> CompareResult<Comparison<'a>> {
    Comparator::<DefaultMatcher>::default().compare(old, new)
}
