//! Foundation types for docdelta.
//!
//! This crate provides the value types exchanged between the document
//! extraction step, the comparison engine, and whatever renders the result.
//! Every other docdelta crate depends on `docdelta-types`.
//!
//! # Key Types
//!
//! - [`Block`] / [`BlockContent`] — One paragraph or image of a document version
//! - [`RawBlock`] — The loosely-typed wire form produced by extraction
//! - [`DocumentVersion`] — A validated, ordered block sequence
//! - [`AlignedPair`] / [`MatchType`] — One row of a block alignment
//! - [`DiffSegment`] / [`SegmentKind`] — One run of a character diff
//! - [`ChangeStats`] — Added/removed/unchanged character totals
//! - [`MatchSummary`] — Pair counts per match type

pub mod block;
pub mod error;
pub mod pair;
pub mod segment;
pub mod stats;
pub mod version;

pub use block::{Block, BlockContent, BlockId, BlockKind, BlockMeta, RawBlock};
pub use error::{TypeError, TypeResult};
pub use pair::{AlignedPair, MatchType};
pub use segment::{new_text, old_text, DiffSegment, SegmentKind};
pub use stats::{ChangeStats, MatchSummary};
pub use version::DocumentVersion;
