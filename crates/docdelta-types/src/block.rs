use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of a block, unique within one document version.
///
/// The engine never interprets the value; it only carries it through to the
/// comparison result so callers can map pairs back to their own records.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The kind of a block, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Image,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("text") {
            Ok(Self::Text)
        } else if s.eq_ignore_ascii_case("image") {
            Ok(Self::Image)
        } else {
            Err(TypeError::UnknownBlockType(s.to_owned()))
        }
    }
}

/// Payload of a block. Only text blocks carry textual content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockContent {
    /// A paragraph of text.
    Text {
        text: String,
        /// Stable paragraph number from structure extraction (e.g. a DOCX
        /// paragraph index). Equal indices mark the same structural slot.
        paragraph_index: Option<u32>,
    },
    /// An image placeholder, identified by either of its identifiers.
    Image {
        image_id: Option<String>,
        file_name: Option<String>,
    },
}

/// One content block of a document version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub struct Block {
    /// Identifier, unique within the version.
    pub id: BlockId,
    /// Zero-based reading-order position within the version.
    pub order_index: usize,
    /// Typed payload.
    pub content: BlockContent,
}

impl Block {
    /// Create a text block without a paragraph index.
    pub fn text(id: impl Into<BlockId>, order_index: usize, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            order_index,
            content: BlockContent::Text {
                text: text.into(),
                paragraph_index: None,
            },
        }
    }

    /// Create an image block.
    pub fn image(
        id: impl Into<BlockId>,
        order_index: usize,
        image_id: Option<&str>,
        file_name: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            order_index,
            content: BlockContent::Image {
                image_id: image_id.map(str::to_owned),
                file_name: file_name.map(str::to_owned),
            },
        }
    }

    /// Attach a paragraph index. Has no effect on image blocks.
    pub fn with_paragraph_index(mut self, index: u32) -> Self {
        if let BlockContent::Text {
            paragraph_index, ..
        } = &mut self.content
        {
            *paragraph_index = Some(index);
        }
        self
    }

    pub fn kind(&self) -> BlockKind {
        match self.content {
            BlockContent::Text { .. } => BlockKind::Text,
            BlockContent::Image { .. } => BlockKind::Image,
        }
    }

    /// The text of a text block, `None` for images.
    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            BlockContent::Text { text, .. } => Some(text),
            BlockContent::Image { .. } => None,
        }
    }

    pub fn paragraph_index(&self) -> Option<u32> {
        match self.content {
            BlockContent::Text {
                paragraph_index, ..
            } => paragraph_index,
            BlockContent::Image { .. } => None,
        }
    }

    /// Number of characters (Unicode scalar values) of textual content.
    /// Images have none.
    pub fn char_len(&self) -> usize {
        self.text_content().map_or(0, |t| t.chars().count())
    }
}

/// Structural hints attached to a raw block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Wire form of a block as emitted by the extraction collaborator.
///
/// Every field that depends on the block type is optional here; converting
/// into [`Block`] normalizes missing text to `""` and rejects block types
/// other than `text` and `image`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub id: String,
    pub order_index: usize,
    pub block_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<BlockMeta>,
}

impl TryFrom<RawBlock> for Block {
    type Error = TypeError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        let meta = raw.meta.unwrap_or_default();
        let content = match raw.block_type.parse::<BlockKind>()? {
            BlockKind::Text => BlockContent::Text {
                text: raw.content.unwrap_or_default(),
                paragraph_index: meta.paragraph_index,
            },
            BlockKind::Image => BlockContent::Image {
                image_id: meta.image_id,
                file_name: meta.file_name,
            },
        };
        Ok(Self {
            id: BlockId(raw.id),
            order_index: raw.order_index,
            content,
        })
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let block_type = block.kind().as_str().to_owned();
        let (content, meta) = match block.content {
            BlockContent::Text {
                text,
                paragraph_index,
            } => (
                Some(text),
                BlockMeta {
                    paragraph_index,
                    ..Default::default()
                },
            ),
            BlockContent::Image {
                image_id,
                file_name,
            } => (
                None,
                BlockMeta {
                    image_id,
                    file_name,
                    ..Default::default()
                },
            ),
        };
        Self {
            id: block.id.0,
            order_index: block.order_index,
            block_type,
            content,
            meta: (meta != BlockMeta::default()).then_some(meta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_type_is_case_insensitive() {
        assert_eq!("TEXT".parse::<BlockKind>().unwrap(), BlockKind::Text);
        assert_eq!("Image".parse::<BlockKind>().unwrap(), BlockKind::Image);
    }

    #[test]
    fn unknown_block_type_is_rejected() {
        let json = r#"{"id":"b1","orderIndex":0,"blockType":"table","content":"x"}"#;
        let err = serde_json::from_str::<Block>(json).unwrap_err();
        assert!(err.to_string().contains("unknown block type"));
    }

    #[test]
    fn missing_text_content_becomes_empty() {
        let json = r#"{"id":"b1","orderIndex":0,"blockType":"text","content":null}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.text_content(), Some(""));
        assert_eq!(block.char_len(), 0);
    }

    #[test]
    fn text_meta_carries_paragraph_index() {
        let json = r#"{"id":"p","orderIndex":2,"blockType":"text","content":"Hi","meta":{"paragraphIndex":7}}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.paragraph_index(), Some(7));
        assert_eq!(block.order_index, 2);
    }

    #[test]
    fn image_ignores_content() {
        let json = r#"{"id":"i","orderIndex":0,"blockType":"image","content":"caption","meta":{"imageId":"img-1"}}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.kind(), BlockKind::Image);
        assert_eq!(block.text_content(), None);
        assert_eq!(
            block.content,
            BlockContent::Image {
                image_id: Some("img-1".into()),
                file_name: None,
            }
        );
    }

    #[test]
    fn serializes_back_to_wire_form() {
        let block = Block::text("a", 0, "Clause 1").with_paragraph_index(3);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["blockType"], "text");
        assert_eq!(json["content"], "Clause 1");
        assert_eq!(json["meta"]["paragraphIndex"], 3);

        let image = Block::image("i", 1, None, Some("seal.png"));
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["blockType"], "image");
        assert!(json.get("content").is_none());
        assert_eq!(json["meta"]["fileName"], "seal.png");
    }

    #[test]
    fn paragraph_index_ignored_on_images() {
        let image = Block::image("i", 0, Some("x"), None).with_paragraph_index(1);
        assert_eq!(image.paragraph_index(), None);
    }

    #[test]
    fn char_len_counts_scalars() {
        let block = Block::text("u", 0, "§ 4 – Haftung");
        assert_eq!(block.char_len(), 13);
    }
}
