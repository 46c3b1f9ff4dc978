use docdelta_diff::TextDiff;
use docdelta_types::{AlignedPair, ChangeStats, DiffSegment, MatchSummary, MatchType};
use serde::Serialize;

/// Character diff of one aligned text pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextComparison {
    pub segments: Vec<DiffSegment>,
    /// Similarity in percent, one decimal place.
    pub similarity: f64,
    pub stats: ChangeStats,
}

impl From<TextDiff> for TextComparison {
    fn from(diff: TextDiff) -> Self {
        let similarity = diff.similarity();
        let stats = diff.stats();
        Self {
            segments: diff.into_segments(),
            similarity,
            stats,
        }
    }
}

/// One aligned pair with its text diff, when both sides are text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PairComparison<'a> {
    #[serde(flatten)]
    pub pair: AlignedPair<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<TextComparison>,
}

impl<'a> PairComparison<'a> {
    pub fn match_type(&self) -> MatchType {
        self.pair.match_type()
    }

    /// Characters this pair contributes to the document totals.
    pub fn stats(&self) -> ChangeStats {
        if let Some(diff) = &self.diff {
            return diff.stats;
        }
        match self.pair {
            AlignedPair::Added { new } => ChangeStats::new(new.char_len(), 0, 0),
            AlignedPair::Removed { old } => ChangeStats::new(0, old.char_len(), 0),
            // Two-sided pairs without a diff are image pairs.
            AlignedPair::Matched { .. } | AlignedPair::Modified { .. } => ChangeStats::default(),
        }
    }
}

/// The full result of comparing two document versions.
///
/// Pair order matches version 1 when filtered to pairs with a `block1`, and
/// version 2 when filtered to pairs with a `block2`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison<'a> {
    pub pairs: Vec<PairComparison<'a>>,
    pub stats: ChangeStats,
    pub summary: MatchSummary,
}

impl<'a> Comparison<'a> {
    /// Assemble a result, deriving totals from the pairs.
    pub fn from_pairs(pairs: Vec<PairComparison<'a>>) -> Self {
        let stats = pairs.iter().map(PairComparison::stats).sum();
        let summary = pairs.iter().map(PairComparison::match_type).collect();
        Self {
            pairs,
            stats,
            summary,
        }
    }

    /// The bare alignment, in order.
    pub fn aligned_pairs(&self) -> impl Iterator<Item = &AlignedPair<'a>> + '_ {
        self.pairs.iter().map(|p| &p.pair)
    }

    /// Pairs that are not plain matches.
    pub fn changes(&self) -> impl Iterator<Item = &PairComparison<'a>> + '_ {
        self.pairs
            .iter()
            .filter(|p| p.match_type() != MatchType::Matched || p.stats().changed() > 0)
    }

    /// Returns `true` if the two versions have no differences at all.
    pub fn is_identical(&self) -> bool {
        self.summary.is_identical() && self.stats.is_unchanged()
    }
}
