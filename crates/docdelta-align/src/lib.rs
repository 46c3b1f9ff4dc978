//! Block aligner for docdelta.
//!
//! Aligns the blocks of two document versions with a longest-common-
//! subsequence search over a pluggable equivalence test, so that a single
//! inserted or deleted paragraph does not shift every later pair out of step.
//!
//! # Key Types
//!
//! - [`BlockAligner`] -- Configured aligner, generic over its [`BlockMatcher`]
//! - [`BlockMatcher`] / [`DefaultMatcher`] -- "Same block?" strategy
//! - [`SimilarityThresholds`] -- Length-dependent text similarity cutoffs
//! - [`LcsTable`] -- Flat `(m+1)*(n+1)` LCS length table
//! - [`AlignError`] -- Resource-limit rejection

pub mod aligner;
pub mod config;
pub mod error;
pub mod lcs;
pub mod matcher;

pub use aligner::{align, BlockAligner};
pub use config::{AlignConfig, DEFAULT_MAX_BLOCKS_PER_SIDE, DEFAULT_MODIFIED_THRESHOLD};
pub use error::{AlignError, AlignResult};
pub use lcs::LcsTable;
pub use matcher::{BlockMatcher, DefaultMatcher, SimilarityThresholds};
