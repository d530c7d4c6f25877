//! Post model and the derivations computed at save time

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::block::ContentBlock;

/// Words per minute assumed when estimating reading time.
const READING_WPM: usize = 200;

/// A blog post
///
/// The `content` field is the ordered block sequence; everything derived
/// from it (`reading_time`) is recomputed on every save. The slug is fixed
/// at creation and survives title edits, since published URLs may already
/// be shared or indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// URL-safe identifier, set once at creation
    pub slug: String,

    /// Short description shown in listings and feeds
    #[serde(default)]
    pub excerpt: String,

    /// Single category (free vocabulary, configured per site)
    #[serde(default)]
    pub category: String,

    /// Tag labels, in author order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Banner image URL
    #[serde(default)]
    pub featured_image: Option<String>,

    /// Whether the post is pinned on the home page
    #[serde(default)]
    pub featured: bool,

    /// Whether the post is publicly visible
    #[serde(default)]
    pub published: bool,

    /// Estimated minutes to read, derived from the block sequence
    #[serde(default)]
    pub reading_time: u32,

    /// Public read counter
    #[serde(default)]
    pub views: u64,

    /// The article body
    #[serde(default)]
    pub content: Vec<ContentBlock>,

    /// Creation date
    pub created_at: DateTime<Local>,

    /// Last save date
    pub updated_at: DateTime<Local>,
}

impl Post {
    /// Create a new post with an empty body.
    ///
    /// The slug is derived from the title plus a time-based uniqueness
    /// suffix and never changes afterwards.
    pub fn new(title: &str, now: DateTime<Local>) -> Self {
        Self {
            title: title.to_string(),
            slug: unique_slug(title, now),
            excerpt: String::new(),
            category: String::new(),
            tags: Vec::new(),
            featured_image: None,
            featured: false,
            published: false,
            reading_time: reading_time(&[]),
            views: 0,
            content: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Recompute derived fields before the post is handed to storage.
    pub fn prepare_save(&mut self, now: DateTime<Local>) {
        self.reading_time = reading_time(&self.content);
        self.updated_at = now;
    }

    /// Count one public read. Called by the public post view, never by
    /// the editor.
    pub fn record_view(&mut self) {
        self.views += 1;
    }
}

/// Estimate reading time in minutes from a block sequence.
///
/// Concatenates every block's textual content with single spaces, counts
/// whitespace-separated words, and divides by 200 wpm, rounding up with a
/// floor of one minute. Blocks without text (image, youtube) contribute
/// nothing.
pub fn reading_time(blocks: &[ContentBlock]) -> u32 {
    let words: usize = blocks
        .iter()
        .filter_map(|b| b.text())
        .map(|t| t.split_whitespace().count())
        .sum();
    words.div_ceil(READING_WPM).max(1) as u32
}

/// Derive a URL-safe slug from a title.
///
/// Lowercases, collapses runs of whitespace and punctuation to single
/// hyphens, and strips leading/trailing hyphens. Pure: uniqueness is the
/// caller's responsibility.
pub fn create_slug(title: &str) -> String {
    slug::slugify(title)
}

/// A slug with a time-derived uniqueness suffix, used once at creation.
pub fn unique_slug(title: &str, now: DateTime<Local>) -> String {
    let millis = now.timestamp_millis().to_string();
    let suffix = &millis[millis.len().saturating_sub(4)..];
    format!("{}-{}", create_slug(title), suffix)
}

/// Normalize a comma-separated tag string into a tag list.
///
/// Splits on commas, trims each entry, and drops empties. Order and
/// duplicates are preserved as the author wrote them.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
