//! Comparison orchestrator for docdelta.
//!
//! Drives the block aligner over two document versions, runs the text diff
//! engine on every aligned text pair, and rolls the results up into
//! document-level change statistics.
//!
//! # Key Types
//!
//! - [`Comparator`] -- Configured entry point; [`compare`] uses defaults
//! - [`Comparison`] / [`PairComparison`] / [`TextComparison`] -- The result
//! - [`CompareConfig`] -- TOML-loadable engine settings
//! - [`CompareError`] -- Resource-limit, input, and configuration failures
//!
//! # Statistics policy
//!
//! Character statistics count Unicode scalar values. Matched and modified
//! text pairs contribute their diff totals; an added or removed text block
//! contributes its whole content as added or removed; image blocks never
//! contribute, whatever their match type.

pub mod comparator;
pub mod comparison;
pub mod config;
pub mod error;

pub use comparator::{compare, Comparator};
pub use comparison::{Comparison, PairComparison, TextComparison};
pub use config::CompareConfig;
pub use error::{CompareError, CompareResult};

pub use docdelta_align::{AlignError, BlockMatcher, DefaultMatcher, SimilarityThresholds};
pub use docdelta_types::{
    AlignedPair, Block, BlockContent, ChangeStats, DiffSegment, DocumentVersion, MatchSummary,
    MatchType, SegmentKind,
};
