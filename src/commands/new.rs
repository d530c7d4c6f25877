//! Create a new post document

use anyhow::Result;
use chrono::Local;

use crate::content::{normalize_tags, Post};
use crate::Blockpress;

/// Create a new post document in the content directory.
///
/// The slug is fixed here, at creation, and never changes afterwards.
pub fn run(
    app: &Blockpress,
    title: &str,
    category: Option<&str>,
    excerpt: Option<&str>,
    tags: Option<&str>,
) -> Result<()> {
    if title.trim().is_empty() {
        anyhow::bail!("Title is required");
    }

    let now = Local::now();
    let mut post = Post::new(title, now);

    if let Some(category) = category {
        if !app.config.categories.iter().any(|c| c == category) {
            tracing::warn!(
                "Category '{}' is not in the configured vocabulary {:?}",
                category,
                app.config.categories
            );
        }
        post.category = category.to_string();
    }
    if let Some(excerpt) = excerpt {
        post.excerpt = excerpt.to_string();
    }
    if let Some(tags) = tags {
        post.tags = normalize_tags(tags);
    }

    let store = app.store();
    if store.exists(&post.slug) {
        anyhow::bail!("A post document already exists for slug '{}'", post.slug);
    }

    store.save(&mut post, now)?;

    println!("Created: {} ({}.json)", post.title, post.slug);

    Ok(())
}
