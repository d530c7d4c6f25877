//! Content block model
//!
//! An article body is an ordered sequence of typed blocks. The sequence
//! index is the display order; blocks carry no position field and no
//! identity of their own outside the sequence.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Markup that the authoring surface has already vetted.
///
/// The renderer inserts this into the page without escaping, so the only
/// way to get a value in here is the explicit `from_author` constructor.
/// Callers own sanitization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Wrap author-provided markup.
    pub fn from_author<S: Into<String>>(html: S) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered or unordered list marker.
///
/// Persisted documents use the HTML tag names `"ol"`/`"ul"`; any other
/// value reads as unordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    #[default]
    Unordered,
}

impl ListKind {
    /// The HTML container tag for this list kind.
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

impl Serialize for ListKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for ListKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(if s == "ol" {
            ListKind::Ordered
        } else {
            ListKind::Unordered
        })
    }
}

fn default_heading_level() -> u8 {
    2
}

/// One unit of article content.
///
/// The `type` tag selects the variant; every field has a default so a
/// document missing a field still loads. Tags written by a newer authoring
/// surface fall into `Unknown`, which the renderer skips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Paragraph {
        #[serde(default)]
        content: TrustedHtml,
    },
    Heading {
        #[serde(default)]
        content: String,
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    List {
        /// Newline-delimited items; blank lines are dropped at render time.
        #[serde(default)]
        content: TrustedHtml,
        #[serde(rename = "listType", default)]
        list_type: ListKind,
    },
    Code {
        #[serde(default)]
        content: String,
        #[serde(default)]
        language: String,
    },
    Image {
        #[serde(default)]
        url: String,
        #[serde(default)]
        caption: Option<String>,
    },
    Youtube {
        #[serde(default)]
        url: String,
    },
    #[serde(other)]
    Unknown,
}

/// The authoring primitives an editor can insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading,
    List,
    Code,
    Image,
    Youtube,
}

impl ContentBlock {
    /// Create an empty block with type-appropriate defaults, the shape a
    /// freshly inserted editor block has before the author fills it in.
    pub fn new(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Paragraph => ContentBlock::Paragraph {
                content: TrustedHtml::default(),
            },
            BlockKind::Heading => ContentBlock::Heading {
                content: String::new(),
                level: 2,
            },
            BlockKind::List => ContentBlock::List {
                content: TrustedHtml::default(),
                list_type: ListKind::Unordered,
            },
            BlockKind::Code => ContentBlock::Code {
                content: String::new(),
                language: "python".to_string(),
            },
            BlockKind::Image => ContentBlock::Image {
                url: String::new(),
                caption: None,
            },
            BlockKind::Youtube => ContentBlock::Youtube { url: String::new() },
        }
    }

    /// The textual content of the block, if it has any.
    ///
    /// Image and youtube blocks carry no prose and contribute nothing to
    /// word counts.
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentBlock::Paragraph { content } => Some(content.as_str()),
            ContentBlock::Heading { content, .. } => Some(content),
            ContentBlock::List { content, .. } => Some(content.as_str()),
            ContentBlock::Code { content, .. } => Some(content),
            ContentBlock::Image { .. } | ContentBlock::Youtube { .. } | ContentBlock::Unknown => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_block_sequence_in_order() {
        let json = r#"[
            {"type": "heading", "content": "Intro", "level": 2},
            {"type": "paragraph", "content": "Hello <code>world</code>"},
            {"type": "code", "content": "puts hi", "language": "tcl"}
        ]"#;
        let blocks: Vec<ContentBlock> = serde_json::from_str(json).unwrap();
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], ContentBlock::Heading { .. }));
        assert!(matches!(blocks[1], ContentBlock::Paragraph { .. }));
        assert!(matches!(blocks[2], ContentBlock::Code { .. }));
    }

    #[test]
    fn test_unknown_type_tolerated() {
        let json = r#"{"type": "quiz", "content": "x", "choices": ["a", "b"]}"#;
        let block: ContentBlock = serde_json::from_str(json).unwrap();
        assert_eq!(block, ContentBlock::Unknown);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let block: ContentBlock = serde_json::from_str(r#"{"type": "heading"}"#).unwrap();
        match block {
            ContentBlock::Heading { content, level } => {
                assert_eq!(content, "");
                assert_eq!(level, 2);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_irrelevant_fields_ignored() {
        // A paragraph with leftover fields from a previous type edit
        let json = r#"{"type": "paragraph", "content": "text", "language": "python", "level": 3}"#;
        let block: ContentBlock = serde_json::from_str(json).unwrap();
        match block {
            ContentBlock::Paragraph { content } => assert_eq!(content.as_str(), "text"),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_list_type_round_trip() {
        let json = r#"{"type": "list", "content": "A\nB", "listType": "ol"}"#;
        let block: ContentBlock = serde_json::from_str(json).unwrap();
        match &block {
            ContentBlock::List { list_type, .. } => assert_eq!(*list_type, ListKind::Ordered),
            other => panic!("unexpected variant: {:?}", other),
        }
        let out = serde_json::to_string(&block).unwrap();
        assert!(out.contains(r#""listType":"ol""#));
    }

    #[test]
    fn test_unrecognized_list_type_reads_as_unordered() {
        let json = r#"{"type": "list", "content": "A", "listType": "fancy"}"#;
        let block: ContentBlock = serde_json::from_str(json).unwrap();
        match block {
            ContentBlock::List { list_type, .. } => assert_eq!(list_type, ListKind::Unordered),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_new_block_defaults() {
        match ContentBlock::new(BlockKind::Code) {
            ContentBlock::Code { content, language } => {
                assert_eq!(content, "");
                assert_eq!(language, "python");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
        match ContentBlock::new(BlockKind::List) {
            ContentBlock::List { list_type, .. } => assert_eq!(list_type, ListKind::Unordered),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_text_content() {
        let para = ContentBlock::Paragraph {
            content: TrustedHtml::from_author("hello world"),
        };
        assert_eq!(para.text(), Some("hello world"));

        let image = ContentBlock::Image {
            url: "/a.png".to_string(),
            caption: Some("cap".to_string()),
        };
        assert_eq!(image.text(), None);
    }
}
