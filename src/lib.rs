//! blockpress: a block-based blog engine
//!
//! Article bodies are ordered sequences of typed content blocks. This
//! crate owns the block model, its save-time derivations (reading time,
//! slug, tags), a pure block-to-HTML renderer, and a static site
//! generator that publishes the content directory.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod render;
pub mod templates;

use anyhow::Result;
use std::path::Path;

use content::PostStore;

/// The main blockpress application
#[derive(Clone)]
pub struct Blockpress {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory (post documents and assets)
    pub content_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Blockpress {
    /// Create a new blockpress instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        })
    }

    /// The post store for this site
    pub fn store(&self) -> PostStore {
        PostStore::new(self.content_dir.join("posts"))
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
