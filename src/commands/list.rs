//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::Blockpress;

/// List site content by type
pub fn run(app: &Blockpress, content_type: &str) -> Result<()> {
    let store = app.store();

    match content_type {
        "post" | "posts" => {
            let posts = store.load_all(true);
            println!("Posts ({}):", posts.len());
            for post in posts {
                let state = if post.published { "published" } else { "draft" };
                println!(
                    "  {} - {} [{}] ({}, {} min, {} views)",
                    post.created_at.format("%Y-%m-%d"),
                    post.title,
                    post.slug,
                    state,
                    post.reading_time,
                    post.views
                );
            }
        }
        "category" | "categories" => {
            let posts = store.load_all(true);
            let mut categories: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                if !post.category.trim().is_empty() {
                    *categories.entry(post.category.clone()).or_insert(0) += 1;
                }
            }
            println!("Categories ({}):", categories.len());
            let mut categories: Vec<_> = categories.into_iter().collect();
            categories.sort_by(|a, b| b.1.cmp(&a.1));
            for (cat, count) in categories {
                println!("  {} ({})", cat, count);
            }
        }
        "tag" | "tags" => {
            let posts = store.load_all(true);
            let mut tags: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category, tag",
                content_type
            );
        }
    }

    Ok(())
}
