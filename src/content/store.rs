//! Post storage - JSON documents under the content directory
//!
//! One document per post, named by slug. The block sequence is persisted
//! verbatim as the document's `content` array.

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::Post;

/// Errors from the post store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed post document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and writes post documents in a content directory.
pub struct PostStore {
    posts_dir: PathBuf,
}

impl PostStore {
    /// Create a store rooted at the given posts directory.
    pub fn new<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
        }
    }

    /// Load all posts, newest first.
    ///
    /// Documents that fail to parse are skipped with a warning; one bad
    /// file never sinks the batch. Unpublished posts are filtered out
    /// unless `include_drafts` is set.
    pub fn load_all(&self, include_drafts: bool) -> Vec<Post> {
        if !self.posts_dir.exists() {
            return Vec::new();
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_post_document(path) {
                match self.load_document(path) {
                    Ok(post) => {
                        if post.published || include_drafts {
                            posts.push(post);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Skipping post {:?}: {}", path, e);
                    }
                }
            }
        }

        // Newest first
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        posts
    }

    /// Load a single post by slug.
    pub fn load(&self, slug: &str) -> Result<Post, StoreError> {
        let path = self.post_path(slug);
        if !path.exists() {
            return Err(StoreError::NotFound(slug.to_string()));
        }
        self.load_document(&path)
    }

    /// Save a post, recomputing its derived fields first.
    pub fn save(&self, post: &mut Post, now: DateTime<Local>) -> Result<(), StoreError> {
        post.prepare_save(now);

        fs::create_dir_all(&self.posts_dir).map_err(|source| StoreError::Io {
            path: self.posts_dir.clone(),
            source,
        })?;

        let path = self.post_path(&post.slug);
        let json = serde_json::to_string_pretty(post).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Saved post {:?}", path);
        Ok(())
    }

    /// Whether a document for this slug already exists.
    pub fn exists(&self, slug: &str) -> bool {
        self.post_path(slug).exists()
    }

    fn load_document(&self, path: &Path) -> Result<Post, StoreError> {
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn post_path(&self, slug: &str) -> PathBuf {
        self.posts_dir.join(format!("{}.json", slug))
    }
}

/// Check if a file is a post document.
fn is_post_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "json")
        .unwrap_or(false)
}
