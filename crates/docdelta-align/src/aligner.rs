//! LCS-based block alignment.
//!
//! Positional comparison (`old[i]` against `new[i]`) turns one inserted
//! paragraph into a cascade of false modifications. Aligning on the longest
//! common subsequence under the matcher's equivalence isolates the actual
//! insertion or deletion and keeps every other pair in step.

use docdelta_types::{AlignedPair, Block};
use tracing::{debug, warn};

use crate::config::AlignConfig;
use crate::error::AlignResult;
use crate::lcs::LcsTable;
use crate::matcher::{BlockMatcher, DefaultMatcher};

/// Aligns two block sequences.
///
/// The result covers every block of both inputs exactly once. Filtering it
/// to pairs with a version-1 side reproduces the version-1 order, and
/// likewise for version 2.
#[derive(Clone, Debug, Default)]
pub struct BlockAligner<M = DefaultMatcher> {
    config: AlignConfig,
    matcher: M,
}

impl BlockAligner<DefaultMatcher> {
    /// An aligner using the production matching rules.
    pub fn new(config: AlignConfig) -> Self {
        Self {
            config,
            matcher: DefaultMatcher::default(),
        }
    }
}

impl<M: BlockMatcher> BlockAligner<M> {
    /// An aligner using a custom equivalence strategy.
    pub fn with_matcher(config: AlignConfig, matcher: M) -> Self {
        Self { config, matcher }
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Align `old` (version 1) against `new` (version 2).
    ///
    /// Fails with [`AlignError::ResourceLimitExceeded`](crate::AlignError)
    /// when either side is over the configured block limit; nothing is
    /// computed in that case.
    pub fn align<'a>(
        &self,
        old: &'a [Block],
        new: &'a [Block],
    ) -> AlignResult<Vec<AlignedPair<'a>>> {
        if let Err(e) = self.config.check_limits(old.len(), new.len()) {
            warn!(
                old_blocks = old.len(),
                new_blocks = new.len(),
                limit = self.config.max_blocks_per_side,
                "rejecting oversized alignment"
            );
            return Err(e);
        }

        debug!(old_blocks = old.len(), new_blocks = new.len(), "aligning blocks");
        let table = LcsTable::build(old, new, |a, b| self.matcher.blocks_match(a, b));
        let pairs = self.backtrack(old, new, &table);
        debug!(
            pairs = pairs.len(),
            common = table.lcs_len(),
            "alignment complete"
        );
        Ok(pairs)
    }

    fn backtrack<'a>(
        &self,
        old: &'a [Block],
        new: &'a [Block],
        table: &LcsTable,
    ) -> Vec<AlignedPair<'a>> {
        let mut pairs = Vec::with_capacity(old.len().max(new.len()));
        let (mut i, mut j) = (old.len(), new.len());

        while i > 0 || j > 0 {
            if i > 0 && j > 0 && self.matcher.blocks_match(&old[i - 1], &new[j - 1]) {
                let (a, b) = (&old[i - 1], &new[j - 1]);
                let similarity = self.matcher.similarity(a, b);
                pairs.push(if similarity <= self.config.modified_threshold {
                    AlignedPair::Modified {
                        old: a,
                        new: b,
                        similarity,
                    }
                } else {
                    AlignedPair::Matched {
                        old: a,
                        new: b,
                        similarity,
                    }
                });
                i -= 1;
                j -= 1;
            } else if j > 0 && (i == 0 || table.get(i, j - 1) >= table.get(i - 1, j)) {
                // Ties resolve toward an insertion in version 2.
                pairs.push(AlignedPair::Added { new: &new[j - 1] });
                j -= 1;
            } else {
                pairs.push(AlignedPair::Removed { old: &old[i - 1] });
                i -= 1;
            }
        }

        pairs.reverse();
        pairs
    }
}

/// Align two block sequences with the default configuration and matcher.
pub fn align<'a>(old: &'a [Block], new: &'a [Block]) -> AlignResult<Vec<AlignedPair<'a>>> {
    BlockAligner::new(AlignConfig::default()).align(old, new)
}

#[cfg(test)]
mod tests {
    use docdelta_types::MatchType;
    use proptest::prelude::*;

    use super::*;
    use crate::error::AlignError;

    fn texts(prefix: &str, contents: &[&str]) -> Vec<Block> {
        contents
            .iter()
            .enumerate()
            .map(|(i, c)| Block::text(format!("{prefix}{i}"), i, *c))
            .collect()
    }

    fn shape(pairs: &[AlignedPair<'_>]) -> Vec<(Option<String>, Option<String>, MatchType)> {
        pairs
            .iter()
            .map(|p| {
                (
                    p.block1().map(|b| b.text_content().unwrap_or_default().to_owned()),
                    p.block2().map(|b| b.text_content().unwrap_or_default().to_owned()),
                    p.match_type(),
                )
            })
            .collect()
    }

    fn row(
        a: Option<&str>,
        b: Option<&str>,
        t: MatchType,
    ) -> (Option<String>, Option<String>, MatchType) {
        (a.map(str::to_owned), b.map(str::to_owned), t)
    }

    const A: &str = "aaaaaaaaaa";
    const B: &str = "bbbbbbbbbb";
    const C: &str = "cccccccccc";
    const X: &str = "xxxxxxxxxx";

    #[test]
    fn pure_insertion() {
        let old = texts("o", &[A, B, C]);
        let new = texts("n", &[A, X, B, C]);
        let pairs = align(&old, &new).unwrap();
        assert_eq!(
            shape(&pairs),
            vec![
                row(Some(A), Some(A), MatchType::Matched),
                row(None, Some(X), MatchType::Added),
                row(Some(B), Some(B), MatchType::Matched),
                row(Some(C), Some(C), MatchType::Matched),
            ]
        );
    }

    #[test]
    fn pure_deletion() {
        let old = texts("o", &[A, X, B, C]);
        let new = texts("n", &[A, B, C]);
        let pairs = align(&old, &new).unwrap();
        assert_eq!(
            shape(&pairs),
            vec![
                row(Some(A), Some(A), MatchType::Matched),
                row(Some(X), None, MatchType::Removed),
                row(Some(B), Some(B), MatchType::Matched),
                row(Some(C), Some(C), MatchType::Matched),
            ]
        );
    }

    #[test]
    fn replacement_prefers_added_before_removed() {
        let old = texts("o", &[A, B]);
        let new = texts("n", &[A, X]);
        let pairs = align(&old, &new).unwrap();
        assert_eq!(
            shape(&pairs),
            vec![
                row(Some(A), Some(A), MatchType::Matched),
                row(Some(B), None, MatchType::Removed),
                row(None, Some(X), MatchType::Added),
            ]
        );
    }

    #[test]
    fn edited_paragraph_is_modified() {
        let old = texts("o", &[A, "Rent is due on the first day of each month."]);
        let new = texts("n", &[A, "Rent is due on the fifth day of each month."]);
        let pairs = align(&old, &new).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].match_type(), MatchType::Modified);
        let similarity = pairs[1].similarity().unwrap();
        assert!(similarity > 0.6 && similarity <= 0.95);
    }

    #[test]
    fn near_identical_threshold_is_inclusive() {
        // One substitution in 25 chars: 96% similar, above the cutoff.
        let old = texts("o", &["abcdefghijklmnopqrstuvwxy"]);
        let new = texts("n", &["abcdefghijklmnopqrstuvwxZ"]);
        let pairs = align(&old, &new).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].match_type(), MatchType::Matched);
        assert_eq!(pairs[0].similarity(), Some(0.96));

        // One substitution in 20 chars: exactly 95%, still modified.
        let old = texts("o", &["abcdefghijklmnopqrst"]);
        let new = texts("n", &["abcdefghijklmnopqrsZ"]);
        let pairs = align(&old, &new).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].match_type(), MatchType::Modified);
        assert_eq!(pairs[0].similarity(), Some(0.95));
    }

    #[test]
    fn empty_inputs() {
        let blocks = texts("o", &[A, B]);
        assert!(align(&[], &[]).unwrap().is_empty());

        let added = align(&[], &blocks).unwrap();
        assert!(added.iter().all(|p| p.match_type() == MatchType::Added));
        assert_eq!(added.len(), 2);

        let removed = align(&blocks, &[]).unwrap();
        assert!(removed.iter().all(|p| p.match_type() == MatchType::Removed));
        assert_eq!(removed[0].block1().unwrap().id.as_str(), "o0");
    }

    #[test]
    fn images_align_by_identifier() {
        let old = vec![
            Block::text("t0", 0, A),
            Block::image("i1", 1, Some("img-1"), Some("seal.png")),
        ];
        let new = vec![
            Block::image("j0", 0, Some("img-9"), Some("logo.png")),
            Block::text("u1", 1, A),
            Block::image("j2", 2, None, Some("seal.png")),
        ];
        let pairs = align(&old, &new).unwrap();
        let types: Vec<_> = pairs.iter().map(|p| p.match_type()).collect();
        assert_eq!(
            types,
            vec![MatchType::Added, MatchType::Matched, MatchType::Matched]
        );
        assert_eq!(pairs[2].block2().unwrap().id.as_str(), "j2");
    }

    #[test]
    fn oversized_input_is_rejected() {
        let old: Vec<Block> = (0..5001).map(|i| Block::text(format!("b{i}"), i, "")).collect();
        let new = vec![Block::text("n0", 0, "")];
        let err = align(&old, &new).unwrap_err();
        assert_eq!(
            err,
            AlignError::ResourceLimitExceeded {
                old_blocks: 5001,
                new_blocks: 1,
                limit: 5000,
            }
        );
    }

    #[test]
    fn configured_limit_applies() {
        let aligner = BlockAligner::new(AlignConfig {
            max_blocks_per_side: 2,
            ..Default::default()
        });
        let blocks = texts("o", &[A, B, C]);
        assert!(aligner.align(&blocks, &blocks[..1]).is_err());
        assert!(aligner.align(&blocks[..2], &blocks[..2]).is_ok());
    }

    struct ExactText;

    impl BlockMatcher for ExactText {
        fn blocks_match(&self, old: &Block, new: &Block) -> bool {
            old.text_content() == new.text_content()
        }

        fn similarity(&self, _old: &Block, _new: &Block) -> f64 {
            1.0
        }
    }

    #[test]
    fn custom_matcher_drives_alignment() {
        let old = texts("o", &["Heading", "Body"]);
        let new = texts("n", &["Heading!", "Body"]);
        let aligner = BlockAligner::with_matcher(AlignConfig::default(), ExactText);
        let types: Vec<_> = aligner
            .align(&old, &new)
            .unwrap()
            .iter()
            .map(|p| p.match_type())
            .collect();
        assert_eq!(
            types,
            vec![MatchType::Removed, MatchType::Added, MatchType::Matched]
        );
    }

    fn block_strategy() -> impl Strategy<Value = (u8, bool)> {
        (0u8..5, any::<bool>())
    }

    fn build(layout: &[(u8, bool)], prefix: &str) -> Vec<Block> {
        const WORDS: [&str; 5] = ["aaaaaaaa", "bbbbbbbb", "cccccccc", "dddddddd", "eeeeeeee"];
        layout.iter()
            .enumerate()
            .map(|(i, &(k, image))| {
                let id = format!("{prefix}{i}");
                if image {
                    let name = format!("img-{k}.png");
                    Block::image(id, i, None, Some(name.as_str()))
                } else {
                    Block::text(id, i, WORDS[k as usize])
                }
            })
            .collect()
    }

    fn ids<'a>(blocks: impl Iterator<Item = &'a Block>) -> Vec<String> {
        blocks.map(|b| b.id.to_string()).collect()
    }

    proptest! {
        #[test]
        fn covers_every_block_in_order(
            old in prop::collection::vec(block_strategy(), 0..12),
            new in prop::collection::vec(block_strategy(), 0..12),
        ) {
            let old = build(&old, "o");
            let new = build(&new, "n");
            let pairs = align(&old, &new).unwrap();

            prop_assert_eq!(ids(pairs.iter().filter_map(|p| p.block1())), ids(old.iter()));
            prop_assert_eq!(ids(pairs.iter().filter_map(|p| p.block2())), ids(new.iter()));
            prop_assert!(pairs.len() >= old.len().max(new.len()));
            prop_assert!(pairs.len() <= old.len() + new.len());
        }

        #[test]
        fn identical_input_is_all_matched(layout in prop::collection::vec(block_strategy(), 0..12)) {
            let blocks = build(&layout, "b");
            let pairs = align(&blocks, &blocks).unwrap();
            prop_assert_eq!(pairs.len(), blocks.len());
            for (pair, block) in pairs.iter().zip(&blocks) {
                prop_assert_eq!(pair.match_type(), MatchType::Matched);
                prop_assert_eq!(pair.block1().map(|b| &b.id), Some(&block.id));
                prop_assert_eq!(pair.block2().map(|b| &b.id), Some(&block.id));
            }
        }
    }
}
