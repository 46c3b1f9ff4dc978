//! Text diff engine for docdelta.
//!
//! Produces character-level diffs between two strings, post-processed so that
//! segment boundaries fall on word and punctuation breaks, and derives edit
//! distance, similarity, and character statistics from the result.
//!
//! # Key Types
//!
//! - [`TextDiff`] -- One computed diff with its derived metrics
//! - [`TextDiffer`] -- Reusable differ carrying [`DiffOptions`]
//! - [`diff`] / [`similarity`] / [`stats`] -- One-shot helpers with default options

mod cleanup;
pub mod metrics;
pub mod options;
pub mod text_diff;

pub use docdelta_types::{ChangeStats, DiffSegment, SegmentKind};
pub use metrics::{levenshtein, similarity_percent};
pub use options::DiffOptions;
pub use text_diff::{diff, similarity, similarity_ratio, stats, TextDiff, TextDiffer};
