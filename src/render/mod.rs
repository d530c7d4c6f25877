//! Block renderer - maps a block sequence to HTML fragments
//!
//! Rendering is a pure function of the input sequence: one fragment per
//! block, in sequence order. The only case where output length differs
//! from input length is a youtube block whose URL matches no known shape
//! (and unknown block types), which render as nothing.

pub mod highlight;

use lazy_static::lazy_static;
use regex::Regex;

use crate::content::{ContentBlock, ListKind, TrustedHtml};
use crate::helpers::html_escape;
use highlight::CodeHighlighter;

lazy_static! {
    /// The YouTube URL shapes an embed can be extracted from:
    /// watch?v=, embed/, and youtu.be short links, 11-character id.
    static ref YOUTUBE_URL: Regex =
        Regex::new(r"(?:youtube\.com/(?:watch\?v=|embed/)|youtu\.be/)([A-Za-z0-9_-]{11})")
            .expect("valid youtube pattern");
}

/// Extract the video id from a YouTube URL, if it has one of the known
/// shapes.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_URL
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Renders content blocks to HTML fragments.
pub struct BlockRenderer {
    highlighter: CodeHighlighter,
}

impl BlockRenderer {
    pub fn new() -> Self {
        Self {
            highlighter: CodeHighlighter::new(),
        }
    }

    /// Use a specific highlighter (theme, line numbers).
    pub fn with_highlighter(highlighter: CodeHighlighter) -> Self {
        Self { highlighter }
    }

    /// Render a block sequence to HTML fragments, one per block, in
    /// sequence order. Empty input yields empty output.
    pub fn render(&self, blocks: &[ContentBlock]) -> Vec<String> {
        blocks
            .iter()
            .filter_map(|block| self.render_block(block))
            .collect()
    }

    /// Render a block sequence to a single HTML string.
    pub fn render_to_string(&self, blocks: &[ContentBlock]) -> String {
        self.render(blocks).join("\n")
    }

    fn render_block(&self, block: &ContentBlock) -> Option<String> {
        match block {
            ContentBlock::Paragraph { content } => Some(render_paragraph(content)),
            ContentBlock::Heading { content, level } => Some(render_heading(content, *level)),
            ContentBlock::List { content, list_type } => Some(render_list(content, *list_type)),
            ContentBlock::Code { content, language } => {
                Some(self.highlighter.render(content, language))
            }
            ContentBlock::Image { url, caption } => Some(render_image(url, caption.as_deref())),
            ContentBlock::Youtube { url } => render_youtube(url),
            ContentBlock::Unknown => None,
        }
    }
}

impl Default for BlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_paragraph(content: &TrustedHtml) -> String {
    // content is author-trusted markup, inserted unescaped
    format!(r#"<p class="post-paragraph">{}</p>"#, content)
}

fn render_heading(content: &str, level: u8) -> String {
    // Only two tiers exist; anything unexpected gets the default tier
    if level == 3 {
        format!("<h3>{}</h3>", html_escape(content))
    } else {
        format!("<h2>{}</h2>", html_escape(content))
    }
}

fn render_list(content: &TrustedHtml, list_type: ListKind) -> String {
    let tag = list_type.tag();
    let items: String = content
        .as_str()
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("<li>{}</li>", line))
        .collect();
    format!(r#"<{tag} class="post-list">{items}</{tag}>"#)
}

fn render_image(url: &str, caption: Option<&str>) -> String {
    let alt = caption.unwrap_or("");
    let figcaption = match caption {
        Some(c) if !c.trim().is_empty() => {
            format!("<figcaption>{}</figcaption>", html_escape(c))
        }
        _ => String::new(),
    };
    format!(
        r#"<figure class="post-image"><img src="{}" alt="{}" loading="lazy">{}</figure>"#,
        html_escape(url),
        html_escape(alt),
        figcaption
    )
}

fn render_youtube(url: &str) -> Option<String> {
    let id = youtube_video_id(url)?;
    Some(format!(
        r#"<div class="video-embed"><iframe src="https://www.youtube.com/embed/{}" title="YouTube video" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe></div>"#,
        id
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BlockKind;

    fn paragraph(text: &str) -> ContentBlock {
        ContentBlock::Paragraph {
            content: TrustedHtml::from_author(text),
        }
    }

    #[test]
    fn test_empty_input_empty_output() {
        let renderer = BlockRenderer::new();
        assert!(renderer.render(&[]).is_empty());
        assert_eq!(renderer.render_to_string(&[]), "");
    }

    #[test]
    fn test_one_node_per_block_in_order() {
        let renderer = BlockRenderer::new();
        let blocks = vec![
            ContentBlock::Heading {
                content: "First".to_string(),
                level: 2,
            },
            paragraph("second"),
            ContentBlock::Image {
                url: "/img/die-shot.png".to_string(),
                caption: None,
            },
        ];
        let nodes = renderer.render(&blocks);
        assert_eq!(nodes.len(), 3);
        assert!(nodes[0].starts_with("<h2>"));
        assert!(nodes[1].starts_with("<p"));
        assert!(nodes[2].starts_with("<figure"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = BlockRenderer::new();
        let blocks = vec![
            paragraph("alpha"),
            ContentBlock::Code {
                content: "set x 1".to_string(),
                language: "tcl".to_string(),
            },
        ];
        assert_eq!(renderer.render(&blocks), renderer.render(&blocks));
    }

    #[test]
    fn test_paragraph_raw_html_passthrough() {
        let renderer = BlockRenderer::new();
        let nodes = renderer.render(&[paragraph("uses <code>set_max_delay</code> here")]);
        assert!(nodes[0].contains("<code>set_max_delay</code>"));
    }

    #[test]
    fn test_heading_levels() {
        let renderer = BlockRenderer::new();
        let h3 = renderer.render(&[ContentBlock::Heading {
            content: "Sub".to_string(),
            level: 3,
        }]);
        assert_eq!(h3[0], "<h3>Sub</h3>");

        // Unsupported level falls back to the default tier
        let h7 = renderer.render(&[ContentBlock::Heading {
            content: "Odd".to_string(),
            level: 7,
        }]);
        assert_eq!(h7[0], "<h2>Odd</h2>");
    }

    #[test]
    fn test_heading_text_is_escaped() {
        let renderer = BlockRenderer::new();
        let nodes = renderer.render(&[ContentBlock::Heading {
            content: "a < b".to_string(),
            level: 2,
        }]);
        assert_eq!(nodes[0], "<h2>a &lt; b</h2>");
    }

    #[test]
    fn test_list_split_drops_blank_lines() {
        let renderer = BlockRenderer::new();
        let nodes = renderer.render(&[ContentBlock::List {
            content: TrustedHtml::from_author("A\n\nB\n"),
            list_type: ListKind::Unordered,
        }]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].matches("<li>").count(), 2);
        assert!(nodes[0].contains("<li>A</li>"));
        assert!(nodes[0].contains("<li>B</li>"));
        assert!(nodes[0].starts_with("<ul"));
    }

    #[test]
    fn test_empty_list_renders_empty_container() {
        let renderer = BlockRenderer::new();
        let nodes = renderer.render(&[ContentBlock::List {
            content: TrustedHtml::from_author("\n  \n"),
            list_type: ListKind::Ordered,
        }]);
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].starts_with("<ol"));
        assert!(!nodes[0].contains("<li>"));
    }

    #[test]
    fn test_ordered_list_tag() {
        let renderer = BlockRenderer::new();
        let nodes = renderer.render(&[ContentBlock::List {
            content: TrustedHtml::from_author("one\ntwo"),
            list_type: ListKind::Ordered,
        }]);
        assert!(nodes[0].starts_with("<ol"));
        assert!(nodes[0].ends_with("</ol>"));
    }

    #[test]
    fn test_code_fallback_is_plain() {
        let renderer = BlockRenderer::new();
        let nodes = renderer.render(&[ContentBlock::Code {
            content: "x".to_string(),
            language: "cobol".to_string(),
        }]);
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].contains("language-text"));
    }

    #[test]
    fn test_image_with_and_without_caption() {
        let renderer = BlockRenderer::new();
        let with_caption = renderer.render(&[ContentBlock::Image {
            url: "/img/layout.png".to_string(),
            caption: Some("Final layout".to_string()),
        }]);
        assert!(with_caption[0].contains(r#"loading="lazy""#));
        assert!(with_caption[0].contains("<figcaption>Final layout</figcaption>"));

        let without = renderer.render(&[ContentBlock::Image {
            url: "/img/layout.png".to_string(),
            caption: None,
        }]);
        assert!(!without[0].contains("figcaption"));
    }

    #[test]
    fn test_youtube_id_extraction() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            youtube_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            youtube_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(youtube_video_id("https://example.com/not-a-video"), None);
    }

    #[test]
    fn test_unparseable_youtube_renders_nothing() {
        let renderer = BlockRenderer::new();
        let nodes = renderer.render(&[ContentBlock::Youtube {
            url: "https://example.com/not-a-video".to_string(),
        }]);
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_youtube_embed() {
        let renderer = BlockRenderer::new();
        let nodes = renderer.render(&[ContentBlock::Youtube {
            url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
        }]);
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].contains("youtube.com/embed/dQw4w9WgXcQ"));
    }

    #[test]
    fn test_unknown_type_renders_nothing() {
        let renderer = BlockRenderer::new();
        let block: ContentBlock =
            serde_json::from_str(r#"{"type": "quiz", "content": "x"}"#).unwrap();
        assert!(renderer.render(&[block]).is_empty());
    }

    #[test]
    fn test_order_preserved_around_omissions() {
        let renderer = BlockRenderer::new();
        let blocks = vec![
            paragraph("before"),
            ContentBlock::Youtube {
                url: "nope".to_string(),
            },
            paragraph("after"),
        ];
        let nodes = renderer.render(&blocks);
        assert_eq!(nodes.len(), 2);
        assert!(nodes[0].contains("before"));
        assert!(nodes[1].contains("after"));
    }

    #[test]
    fn test_freshly_added_blocks_render() {
        // An author can preview immediately after inserting empty blocks
        let renderer = BlockRenderer::new();
        let blocks = vec![
            ContentBlock::new(BlockKind::Paragraph),
            ContentBlock::new(BlockKind::List),
        ];
        assert_eq!(renderer.render(&blocks).len(), 2);
    }
}
