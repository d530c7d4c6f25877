//! Initialize a new blockpress site

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::Path;

use crate::content::block::{BlockKind, ContentBlock, TrustedHtml};
use crate::content::{Editor, Post, PostStore};
use crate::Blockpress;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("content/assets"))?;

    // Create default _config.yml
    let config_content = r#"# Blockpress Configuration

# Site
title: Blockpress
subtitle: ''
description: ''
keywords:
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
content_dir: content
public_dir: public
blog_dir: blog
category_dir: categories

# Writing
include_drafts: false
categories:
  - tutorial
  - career
  - tools
  - news
  - opinion
pages:
  - ''
  - /about
  - /blog
  - /projects
  - /resources
  - /contact
highlight:
  theme: InspiredGitHub
  line_number: true

# Social links (shown in the footer, in this order)
social: {}

# Metadata elements
meta_generator: true

# Date / Time format
date_format: YYYY-MM-DD
"#;

    fs::write(target_dir.join("_config.yml"), config_content)?;

    // Starter stylesheet referenced by the built-in layout
    let stylesheet = r#"body { max-width: 46rem; margin: 0 auto; padding: 0 1rem; font-family: system-ui, sans-serif; line-height: 1.6; color: #1f2937; }
.site-header { display: flex; justify-content: space-between; align-items: baseline; padding: 1rem 0; border-bottom: 1px solid #e5e7eb; }
.site-title { font-weight: 700; text-decoration: none; color: inherit; }
.site-nav a, .social-links a { margin-left: 0.75rem; }
.post-meta { color: #6b7280; font-size: 0.875rem; }
.post-meta > * + *::before { content: "\00b7"; margin: 0 0.4rem; }
.post-card { margin: 1.5rem 0; }
.post-card.featured { border-left: 3px solid #2563eb; padding-left: 1rem; }
.category-filter .chip { display: inline-block; margin-right: 0.5rem; font-size: 0.875rem; }
.tag { display: inline-block; margin-right: 0.5rem; font-size: 0.8rem; color: #2563eb; }
.post-image img, .card-image, .post-banner { max-width: 100%; border-radius: 6px; }
.post-image figcaption { text-align: center; color: #6b7280; font-size: 0.875rem; }
.code-block { border: 1px solid #e5e7eb; border-radius: 6px; overflow: hidden; margin: 1.5rem 0; }
.code-header { display: flex; justify-content: space-between; padding: 0.25rem 0.75rem; background: #f8fafc; border-bottom: 1px solid #e5e7eb; font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.08em; }
.highlight table { width: 100%; border-collapse: collapse; }
.highlight .gutter { color: #94a3b8; padding: 0 0.5rem; text-align: right; user-select: none; }
.highlight pre { margin: 0; font-size: 0.85rem; line-height: 1.6; }
.line-number { display: block; }
.video-embed { position: relative; padding-bottom: 56.25%; margin: 1.5rem 0; }
.video-embed iframe { position: absolute; inset: 0; width: 100%; height: 100%; border: 0; }
.site-footer { margin-top: 3rem; padding: 1rem 0; border-top: 1px solid #e5e7eb; color: #6b7280; font-size: 0.875rem; }
"#;
    fs::write(target_dir.join("content/assets/site.css"), stylesheet)?;

    // Create a sample post through the editing session, the same path an
    // authoring surface takes
    let now = Local::now();
    let mut editor = Editor::new();

    editor.append(BlockKind::Heading);
    if let Some(ContentBlock::Heading { content, .. }) = editor.block_mut(0) {
        *content = "Quick Start".to_string();
    }

    editor.append(BlockKind::Paragraph);
    if let Some(ContentBlock::Paragraph { content }) = editor.block_mut(1) {
        *content = TrustedHtml::from_author(
            "Welcome to Blockpress! Posts are JSON documents whose body is an \
             ordered list of content blocks. Edit this one under \
             <code>content/posts/</code>, then publish it.",
        );
    }

    editor.append(BlockKind::List);
    if let Some(ContentBlock::List { content, .. }) = editor.block_mut(2) {
        *content = TrustedHtml::from_author(
            "Create a post: <code>blockpress new \"My New Post\"</code>\n\
             Build the site: <code>blockpress generate</code>\n\
             See what exists: <code>blockpress list posts</code>",
        );
    }

    editor.append(BlockKind::Code);
    if let Some(ContentBlock::Code { content, language }) = editor.block_mut(3) {
        *content = "blockpress generate".to_string();
        *language = "bash".to_string();
    }

    let mut post = Post::new("Hello World", now);
    post.category = "news".to_string();
    post.excerpt = "Your very first blockpress post.".to_string();
    post.published = true;
    post.content = editor.persistable();

    let store = PostStore::new(target_dir.join("content/posts"));
    store.save(&mut post, now)?;

    Ok(())
}

/// Run the init command with an existing Blockpress instance
pub fn run(app: &Blockpress) -> Result<()> {
    init_site(&app.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_scaffolds_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").exists());
        assert!(dir.path().join("content/posts").is_dir());
        assert!(dir.path().join("content/assets/site.css").exists());

        let app = Blockpress::new(dir.path()).unwrap();
        let posts = app.store().load_all(false);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello World");
        assert_eq!(posts[0].content.len(), 4);
    }
}
