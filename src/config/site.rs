//! Site configuration (_config.yml)

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub keywords: Option<Vec<String>>,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub blog_dir: String,
    pub category_dir: String,

    // Writing
    pub include_drafts: bool,
    /// The category vocabulary offered by the authoring surface
    pub categories: Vec<String>,
    /// Routes the deployed site serves besides blog posts; listed in the
    /// sitemap and the navigation bar ("" is the home page)
    pub pages: Vec<String>,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Social links, in display order
    #[serde(default)]
    pub social: IndexMap<String, String>,

    // Meta
    pub meta_generator: bool,

    // Date format
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blockpress".to_string(),
            subtitle: String::new(),
            description: String::new(),
            keywords: None,
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            blog_dir: "blog".to_string(),
            category_dir: "categories".to_string(),

            include_drafts: false,
            categories: vec![
                "tutorial".to_string(),
                "career".to_string(),
                "tools".to_string(),
                "news".to_string(),
                "opinion".to_string(),
            ],
            pages: vec![
                "".to_string(),
                "/about".to_string(),
                "/blog".to_string(),
                "/projects".to_string(),
                "/resources".to_string(),
                "/contact".to_string(),
            ],
            highlight: HighlightConfig::default(),

            social: IndexMap::new(),

            meta_generator: true,

            date_format: "YYYY-MM-DD".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "InspiredGitHub".to_string(),
            line_number: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Blockpress");
        assert_eq!(config.content_dir, "content");
        assert!(config.categories.contains(&"tutorial".to_string()));
        assert!(config.highlight.line_number);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Silicon Notes
author: Test User
url: https://silicon.example.com
categories:
  - tutorial
  - news
social:
  github: https://github.com/example
  linkedin: https://linkedin.com/in/example
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Silicon Notes");
        assert_eq!(config.categories, vec!["tutorial", "news"]);
        // Social links keep the order they were written in
        let keys: Vec<_> = config.social.keys().cloned().collect();
        assert_eq!(keys, vec!["github", "linkedin"]);
    }
}
