use std::collections::HashSet;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::block::{Block, RawBlock};
use crate::error::{TypeError, TypeResult};

/// A validated block sequence for one document version.
///
/// Guarantees that every block's `order_index` equals its position and that
/// block ids are unique. Dereferences to `[Block]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RawBlock>", into = "Vec<Block>")]
pub struct DocumentVersion {
    blocks: Vec<Block>,
}

impl DocumentVersion {
    /// Validate an ordered block list.
    pub fn new(blocks: Vec<Block>) -> TypeResult<Self> {
        let mut seen = HashSet::with_capacity(blocks.len());
        for (position, block) in blocks.iter().enumerate() {
            if block.order_index != position {
                return Err(TypeError::OrderIndexMismatch {
                    id: block.id.to_string(),
                    expected: position,
                    actual: block.order_index,
                });
            }
            if !seen.insert(&block.id) {
                return Err(TypeError::DuplicateBlockId(block.id.to_string()));
            }
        }
        Ok(Self { blocks })
    }

    /// Build a version from extraction output, sorting by `order_index`
    /// first so that producers may emit blocks in any order.
    pub fn from_raw(raw: Vec<RawBlock>) -> TypeResult<Self> {
        let mut blocks = raw
            .into_iter()
            .map(Block::try_from)
            .collect::<TypeResult<Vec<_>>>()?;
        blocks.sort_by_key(|b| b.order_index);
        Self::new(blocks)
    }

    /// Parse a JSON array of raw blocks.
    pub fn from_json(json: &str) -> TypeResult<Self> {
        let raw: Vec<RawBlock> =
            serde_json::from_str(json).map_err(|e| TypeError::Serialization(e.to_string()))?;
        Self::from_raw(raw)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl Deref for DocumentVersion {
    type Target = [Block];

    fn deref(&self) -> &[Block] {
        &self.blocks
    }
}

impl TryFrom<Vec<RawBlock>> for DocumentVersion {
    type Error = TypeError;

    fn try_from(raw: Vec<RawBlock>) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<DocumentVersion> for Vec<Block> {
    fn from(version: DocumentVersion) -> Self {
        version.blocks
    }
}

impl TryFrom<Vec<Block>> for DocumentVersion {
    type Error = TypeError;

    fn try_from(blocks: Vec<Block>) -> Result<Self, Self::Error> {
        Self::new(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_contiguous_order() {
        let version = DocumentVersion::new(vec![
            Block::text("a", 0, "first"),
            Block::image("b", 1, Some("img"), None),
        ])
        .unwrap();
        assert_eq!(version.len(), 2);
        assert_eq!(version[1].id.as_str(), "b");
    }

    #[test]
    fn rejects_gap_in_order_index() {
        let err = DocumentVersion::new(vec![Block::text("a", 0, "x"), Block::text("b", 2, "y")])
            .unwrap_err();
        assert_eq!(
            err,
            TypeError::OrderIndexMismatch {
                id: "b".into(),
                expected: 1,
                actual: 2,
            }
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = DocumentVersion::new(vec![Block::text("a", 0, "x"), Block::text("a", 1, "y")])
            .unwrap_err();
        assert_eq!(err, TypeError::DuplicateBlockId("a".into()));
    }

    #[test]
    fn from_json_sorts_by_order_index() {
        let json = r#"[
            {"id":"second","orderIndex":1,"blockType":"image","meta":{"fileName":"logo.png"}},
            {"id":"first","orderIndex":0,"blockType":"Text","content":"Recitals"}
        ]"#;
        let version = DocumentVersion::from_json(json).unwrap();
        let ids: Vec<_> = version.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["first", "second"]);
    }

    #[test]
    fn from_json_surfaces_unknown_block_type() {
        let json = r#"[{"id":"t","orderIndex":0,"blockType":"table"}]"#;
        let err = DocumentVersion::from_json(json).unwrap_err();
        assert_eq!(err, TypeError::UnknownBlockType("table".into()));
    }

    #[test]
    fn from_json_rejects_malformed_json() {
        let err = DocumentVersion::from_json("{not json").unwrap_err();
        assert!(matches!(err, TypeError::Serialization(_)));
    }

    #[test]
    fn deserializes_and_serializes_as_array() {
        let json = r#"[{"id":"a","orderIndex":0,"blockType":"text","content":"x"}]"#;
        let version: DocumentVersion = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&version).unwrap();
        assert!(back.is_array());
        assert_eq!(back[0]["id"], "a");
    }

    #[test]
    fn from_raw_reports_unknown_block_type_directly() {
        let raw = vec![RawBlock {
            id: "t".into(),
            order_index: 0,
            block_type: "chart".into(),
            content: None,
            meta: None,
        }];
        let err = DocumentVersion::from_raw(raw).unwrap_err();
        assert_eq!(err, TypeError::UnknownBlockType("chart".into()));
    }
}
