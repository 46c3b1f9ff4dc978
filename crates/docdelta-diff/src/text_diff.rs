//! Character-level text diff.
//!
//! Uses the `similar` crate (Myers diff algorithm) over Unicode scalar
//! values, bounded by a deadline, followed by the cleanup passes in
//! [`crate::cleanup`].

use std::time::Instant;

use docdelta_types::{ChangeStats, DiffSegment, SegmentKind};
use similar::{Algorithm, ChangeTag};
use tracing::debug;

use crate::cleanup::{self, Edit};
use crate::metrics::{levenshtein, similarity_percent};
use crate::options::DiffOptions;

/// A computed diff between two texts together with its derived metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct TextDiff {
    segments: Vec<DiffSegment>,
    old_len: usize,
    new_len: usize,
}

impl TextDiff {
    /// Diff `old` against `new`.
    ///
    /// Identical texts yield a single unchanged segment (none when both are
    /// empty).
    pub fn compute(old: &str, new: &str, options: &DiffOptions) -> Self {
        let old_len = old.chars().count();
        let new_len = new.chars().count();

        if old == new {
            let segments = if old.is_empty() {
                Vec::new()
            } else {
                vec![DiffSegment::unchanged(old)]
            };
            return Self {
                segments,
                old_len,
                new_len,
            };
        }

        let mut edits = myers_edits(old, new, options);
        cleanup::merge(&mut edits);
        if options.semantic_cleanup {
            cleanup::cleanup_semantic(&mut edits);
        }

        Self {
            segments: cleanup::into_segments(edits),
            old_len,
            new_len,
        }
    }

    pub fn segments(&self) -> &[DiffSegment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<DiffSegment> {
        self.segments
    }

    /// Returns `true` if the texts were identical.
    pub fn is_unchanged(&self) -> bool {
        self.segments
            .iter()
            .all(|s| s.kind == SegmentKind::Unchanged)
    }

    /// Character length of the old text.
    pub fn old_len(&self) -> usize {
        self.old_len
    }

    /// Character length of the new text.
    pub fn new_len(&self) -> usize {
        self.new_len
    }

    pub fn stats(&self) -> ChangeStats {
        ChangeStats::from_segments(&self.segments)
    }

    /// Edit distance implied by the segments.
    pub fn levenshtein(&self) -> usize {
        levenshtein(&self.segments)
    }

    /// Similarity in percent, `[0, 100]`, one decimal place.
    pub fn similarity(&self) -> f64 {
        similarity_percent(self.levenshtein(), self.old_len, self.new_len)
    }

    /// Similarity as a ratio in `[0, 1]`.
    pub fn similarity_ratio(&self) -> f64 {
        self.similarity() / 100.0
    }
}

/// Raw Myers edit script, one edit per run of equal-kind changes.
fn myers_edits(old: &str, new: &str, options: &DiffOptions) -> Vec<Edit> {
    let mut config = similar::TextDiff::configure();
    config.algorithm(Algorithm::Myers);
    let deadline = Instant::now().checked_add(options.timeout);
    if let Some(deadline) = deadline {
        config.deadline(deadline);
    }
    let diff = config.diff_chars(old, new);

    let mut edits: Vec<Edit> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => SegmentKind::Unchanged,
            ChangeTag::Delete => SegmentKind::Removed,
            ChangeTag::Insert => SegmentKind::Added,
        };
        cleanup::push_chars(&mut edits, kind, change.value().chars());
    }

    if deadline.is_some_and(|d| Instant::now() >= d) {
        debug!(
            old_len = old.len(),
            new_len = new.len(),
            timeout = ?options.timeout,
            "text diff hit its deadline; edit script may not be minimal"
        );
    }
    edits
}

/// Reusable text differ with fixed options.
#[derive(Clone, Debug, Default)]
pub struct TextDiffer {
    options: DiffOptions,
}

impl TextDiffer {
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    pub fn compute(&self, old: &str, new: &str) -> TextDiff {
        TextDiff::compute(old, new, &self.options)
    }

    pub fn diff(&self, old: &str, new: &str) -> Vec<DiffSegment> {
        self.compute(old, new).into_segments()
    }

    pub fn similarity(&self, old: &str, new: &str) -> f64 {
        self.compute(old, new).similarity()
    }

    pub fn similarity_ratio(&self, old: &str, new: &str) -> f64 {
        self.compute(old, new).similarity_ratio()
    }

    pub fn stats(&self, old: &str, new: &str) -> ChangeStats {
        self.compute(old, new).stats()
    }
}

/// Diff two texts with default options.
pub fn diff(old: &str, new: &str) -> Vec<DiffSegment> {
    TextDiffer::default().diff(old, new)
}

/// Similarity of two texts in percent with default options.
pub fn similarity(old: &str, new: &str) -> f64 {
    TextDiffer::default().similarity(old, new)
}

/// Similarity of two texts as a ratio in `[0, 1]` with default options.
pub fn similarity_ratio(old: &str, new: &str) -> f64 {
    TextDiffer::default().similarity_ratio(old, new)
}

/// Character statistics of the diff between two texts with default options.
pub fn stats(old: &str, new: &str) -> ChangeStats {
    TextDiffer::default().stats(old, new)
}
