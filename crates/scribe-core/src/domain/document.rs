//! Block-structured document model and parser.
//!
//! A draft body is a JSON array of blocks. Each block carries a `type`, a
//! `children` array of inlines and any number of extra attributes (an image
//! block keeps its `url` there). Inlines hold `text` plus optional boolean
//! style marks.
//!
//! The parser is strict about the top-level shape and permissive inside a
//! block: unknown block types read as paragraphs and unknown fields are kept
//! as attributes or ignored.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::{Map, Value};
use serde_json::error::Category;
use thiserror::Error;

/// Structural problems with a document body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("document is not valid JSON: {0}")]
    Syntax(String),

    #[error("document shape is invalid: {0}")]
    Shape(String),

    #[error("document has no blocks")]
    Empty,
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => DocumentError::Shape(err.to_string()),
            Category::Syntax | Category::Eof | Category::Io => {
                DocumentError::Syntax(err.to_string())
            }
        }
    }
}

/// The kind of a block. Anything that is not a title or an image counts as
/// a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Title,
    Image,
}

impl BlockKind {
    fn from_type(block_type: Option<&str>) -> Self {
        match block_type {
            Some("title") => BlockKind::Title,
            Some("image") => BlockKind::Image,
            _ => BlockKind::Paragraph,
        }
    }
}

/// A run of text with its style marks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inline {
    pub text: String,
    pub marks: BTreeSet<String>,
}

/// A top-level unit of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub children: Vec<Inline>,
    pub attrs: Map<String, Value>,
}

impl Block {
    /// The `url` attribute, if present and a string.
    pub fn url(&self) -> Option<&str> {
        self.attrs.get("url").and_then(Value::as_str)
    }

    /// Concatenated text of every inline in the block.
    pub fn text(&self) -> String {
        self.children.iter().map(|inline| inline.text.as_str()).collect()
    }
}

/// A parsed draft body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Parse a JSON-encoded document.
    pub fn parse(bytes: &[u8]) -> Result<Self, DocumentError> {
        let raw: Vec<RawBlock> = serde_json::from_slice(bytes)?;
        if raw.is_empty() {
            return Err(DocumentError::Empty);
        }

        Ok(Self {
            blocks: raw.into_iter().map(Block::from).collect(),
        })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Every inline in document order.
    pub fn inlines(&self) -> impl Iterator<Item = &Inline> {
        self.blocks.iter().flat_map(|block| block.children.iter())
    }

    /// The first block of the given kind.
    pub fn first_of(&self, kind: BlockKind) -> Option<&Block> {
        self.blocks.iter().find(|block| block.kind == kind)
    }
}

#[derive(Deserialize)]
struct RawBlock {
    #[serde(rename = "type", default)]
    block_type: Option<String>,
    children: Vec<RawInline>,
    #[serde(flatten)]
    attrs: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawInline {
    #[serde(default)]
    text: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        Self {
            kind: BlockKind::from_type(raw.block_type.as_deref()),
            children: raw.children.into_iter().map(Inline::from).collect(),
            attrs: raw.attrs,
        }
    }
}

impl From<RawInline> for Inline {
    fn from(raw: RawInline) -> Self {
        let marks = raw
            .rest
            .into_iter()
            .filter(|(_, value)| value.as_bool() == Some(true))
            .map(|(name, _)| name)
            .collect();

        Self {
            text: raw.text.unwrap_or_default(),
            marks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blocks_and_inlines() {
        let body = br#"[
            {"type": "title", "children": [{"text": "Hello"}, {"text": " world", "bold": true}]},
            {"type": "paragraph", "children": [{"text": "Body text"}]},
            {"type": "image", "url": "https://cdn.example.com/a.png", "children": [{"text": ""}]}
        ]"#;

        let doc = Document::parse(body).unwrap();

        assert_eq!(doc.blocks().len(), 3);
        assert_eq!(doc.blocks()[0].kind, BlockKind::Title);
        assert_eq!(doc.blocks()[0].text(), "Hello world");
        assert!(doc.blocks()[0].children[1].marks.contains("bold"));
        assert_eq!(doc.blocks()[2].url(), Some("https://cdn.example.com/a.png"));
    }

    #[test]
    fn test_unknown_block_type_reads_as_paragraph() {
        let doc = Document::parse(br#"[{"type": "quote", "children": [{"text": "x"}]}]"#).unwrap();
        assert_eq!(doc.blocks()[0].kind, BlockKind::Paragraph);

        let doc = Document::parse(br#"[{"children": [{"text": "x"}]}]"#).unwrap();
        assert_eq!(doc.blocks()[0].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_missing_text_defaults_to_empty() {
        let doc = Document::parse(br#"[{"type": "paragraph", "children": [{"italic": true}, {"text": null}]}]"#)
            .unwrap();
        assert_eq!(doc.blocks()[0].children[0].text, "");
        assert_eq!(doc.blocks()[0].children[1].text, "");
        assert!(doc.blocks()[0].children[0].marks.contains("italic"));
    }

    #[test]
    fn test_non_true_fields_are_not_marks() {
        let doc = Document::parse(
            br#"[{"children": [{"text": "a", "bold": false, "color": "red", "code": true}]}]"#,
        )
        .unwrap();
        let marks: Vec<&str> = doc.blocks()[0].children[0]
            .marks
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(marks, vec!["code"]);
    }

    #[test]
    fn test_empty_document_is_rejected() {
        assert_eq!(Document::parse(b"[]"), Err(DocumentError::Empty));
    }

    #[test]
    fn test_missing_children_is_rejected() {
        let err = Document::parse(br#"[{"type": "paragraph"}]"#).unwrap_err();
        assert!(matches!(err, DocumentError::Shape(_)));
    }

    #[test]
    fn test_non_array_shapes_are_rejected() {
        assert!(matches!(
            Document::parse(br#"{"type": "paragraph", "children": []}"#),
            Err(DocumentError::Shape(_))
        ));
        assert!(matches!(
            Document::parse(br#"[{"children": "text"}]"#),
            Err(DocumentError::Shape(_))
        ));
        assert!(matches!(
            Document::parse(br#"["paragraph"]"#),
            Err(DocumentError::Shape(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_a_syntax_error() {
        assert!(matches!(
            Document::parse(b"[{\"children\": ["),
            Err(DocumentError::Syntax(_))
        ));
        assert!(matches!(Document::parse(b""), Err(DocumentError::Syntax(_))));
    }
}
