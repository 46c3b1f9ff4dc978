use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::pair::MatchType;
use crate::segment::{DiffSegment, SegmentKind};

/// Character totals of a diff or a whole comparison.
///
/// Counts are Unicode scalar values, not bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl ChangeStats {
    pub fn new(added: usize, removed: usize, unchanged: usize) -> Self {
        Self {
            added,
            removed,
            unchanged,
        }
    }

    /// Tally a segment list.
    pub fn from_segments(segments: &[DiffSegment]) -> Self {
        segments.iter().fold(Self::default(), |mut acc, s| {
            let len = s.char_len();
            match s.kind {
                SegmentKind::Added => acc.added += len,
                SegmentKind::Removed => acc.removed += len,
                SegmentKind::Unchanged => acc.unchanged += len,
            }
            acc
        })
    }

    /// Returns `true` if nothing was added or removed.
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }

    /// Total characters touched by a change.
    pub fn changed(&self) -> usize {
        self.added + self.removed
    }
}

impl Add for ChangeStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            added: self.added + rhs.added,
            removed: self.removed + rhs.removed,
            unchanged: self.unchanged + rhs.unchanged,
        }
    }
}

impl AddAssign for ChangeStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for ChangeStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Number of aligned pairs per match type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub matched: usize,
    pub modified: usize,
    pub added: usize,
    pub removed: usize,
}

impl MatchSummary {
    pub fn record(&mut self, match_type: MatchType) {
        match match_type {
            MatchType::Matched => self.matched += 1,
            MatchType::Modified => self.modified += 1,
            MatchType::Added => self.added += 1,
            MatchType::Removed => self.removed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.matched + self.modified + self.added + self.removed
    }

    /// Returns `true` if every pair matched.
    pub fn is_identical(&self) -> bool {
        self.modified == 0 && self.added == 0 && self.removed == 0
    }
}

impl FromIterator<MatchType> for MatchSummary {
    fn from_iter<I: IntoIterator<Item = MatchType>>(iter: I) -> Self {
        let mut summary = Self::default();
        for match_type in iter {
            summary.record(match_type);
        }
        summary
    }
}
