//! Generator module - renders the public site from the content store

use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use tera::Context;
use walkdir::WalkDir;

use crate::content::Post;
use crate::helpers::{full_url_for, meta_generator, open_graph, url_for};
use crate::render::highlight::CodeHighlighter;
use crate::render::BlockRenderer;
use crate::templates::{CategoryData, ConfigData, NavItem, PostData, SocialLink, TemplateRenderer};
use crate::Blockpress;

/// Static site generator
pub struct Generator {
    app: Blockpress,
    templates: TemplateRenderer,
    blocks: BlockRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &Blockpress) -> Result<Self> {
        let templates = TemplateRenderer::new()?;
        let highlighter = CodeHighlighter::with_options(
            &app.config.highlight.theme,
            app.config.highlight.line_number,
        );

        Ok(Self {
            app: app.clone(),
            templates,
            blocks: BlockRenderer::with_highlighter(highlighter),
        })
    }

    /// Generate the entire site
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.app.public_dir)?;

        self.copy_assets()?;

        self.generate_index(posts)?;
        self.generate_post_pages(posts)?;
        self.generate_category_pages(posts)?;
        self.generate_atom_feed(posts)?;
        self.generate_search_index(posts)?;
        self.generate_sitemap(posts)?;

        Ok(())
    }

    /// Create a base context with common variables
    fn create_base_context(&self) -> Context {
        let config = &self.app.config;

        let config_data = ConfigData {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            root: config.root.clone(),
            keyword: config
                .keywords
                .as_ref()
                .map(|k| k.join(", "))
                .unwrap_or_default(),
        };

        let nav: Vec<NavItem> = config
            .pages
            .iter()
            .map(|page| NavItem {
                name: page_display_name(page),
                path: url_for(config, &format!("{}/", page.trim_matches('/'))),
            })
            .collect();

        let social: Vec<SocialLink> = config
            .social
            .iter()
            .map(|(name, url)| SocialLink {
                name: name.clone(),
                url: url.clone(),
            })
            .collect();

        let meta_tags = if config.meta_generator {
            meta_generator()
        } else {
            String::new()
        };

        let mut context = Context::new();
        context.insert("config", &config_data);
        context.insert("nav", &nav);
        context.insert("social", &social);
        context.insert("meta_tags", &meta_tags);
        context.insert(
            "current_year",
            &chrono::Local::now().format("%Y").to_string(),
        );
        context
    }

    /// Generate the home/index page
    fn generate_index(&self, posts: &[Post]) -> Result<()> {
        let post_data: Vec<PostData> = posts.iter().map(|p| self.post_data(p)).collect();

        let mut context = self.create_base_context();
        context.insert("posts", &post_data);
        context.insert("categories", &self.category_data(posts));

        let html = self.templates.render("index.html", &context)?;

        let output_path = self.app.public_dir.join("index.html");
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    /// Generate individual post pages
    fn generate_post_pages(&self, posts: &[Post]) -> Result<()> {
        for post in posts {
            let content = self.blocks.render_to_string(&post.content);

            let permalink = full_url_for(&self.app.config, &self.post_path(post));
            let og = open_graph(
                &post.title,
                &post.excerpt,
                &permalink,
                post.featured_image.as_deref(),
                &self.app.config.title,
            );

            let mut context = self.create_base_context();
            context.insert("post", &self.post_data(post));
            context.insert("content", &content);

            // Page-specific meta tags replace the site-wide set
            let meta_tags = if self.app.config.meta_generator {
                format!("{}\n{}", meta_generator(), og)
            } else {
                og
            };
            context.insert("meta_tags", &meta_tags);

            let html = self.templates.render("post.html", &context)?;

            let output_path = self
                .app
                .public_dir
                .join(&self.app.config.blog_dir)
                .join(&post.slug)
                .join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, &html)?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        tracing::info!("Generated {} post pages", posts.len());
        Ok(())
    }

    /// Generate per-category listing pages
    fn generate_category_pages(&self, posts: &[Post]) -> Result<()> {
        let mut by_category: BTreeMap<String, Vec<PostData>> = BTreeMap::new();

        for post in posts {
            if post.category.trim().is_empty() {
                continue;
            }
            by_category
                .entry(post.category.clone())
                .or_default()
                .push(self.post_data(post));
        }

        for (category, category_posts) in &by_category {
            let category_slug = slug::slugify(category);
            if category_slug.is_empty() {
                continue;
            }

            let mut context = self.create_base_context();
            context.insert("category", category);
            context.insert("posts", category_posts);

            let html = self.templates.render("category.html", &context)?;

            let output_path = self
                .app
                .public_dir
                .join(&self.app.config.category_dir)
                .join(&category_slug)
                .join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)?;
        }

        tracing::info!("Generated {} category pages", by_category.len());
        Ok(())
    }

    /// Generate Atom feed
    fn generate_atom_feed(&self, posts: &[Post]) -> Result<()> {
        let config = &self.app.config;

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}/atom.xml\" rel=\"self\"/>\n",
            config.url.trim_end_matches('/')
        ));
        feed.push_str(&format!(
            "  <link href=\"{}/\"/>\n",
            config.url.trim_end_matches('/')
        ));
        feed.push_str(&format!(
            "  <updated>{}</updated>\n",
            chrono::Local::now().to_rfc3339()
        ));
        feed.push_str(&format!(
            "  <id>{}/</id>\n",
            config.url.trim_end_matches('/')
        ));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        // Include recent posts (limit to 20)
        for post in posts.iter().take(20) {
            let permalink = full_url_for(config, &self.post_path(post));

            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", permalink));
            feed.push_str(&format!("    <id>{}</id>\n", permalink));
            feed.push_str(&format!(
                "    <published>{}</published>\n",
                post.created_at.to_rfc3339()
            ));
            feed.push_str(&format!(
                "    <updated>{}</updated>\n",
                post.updated_at.to_rfc3339()
            ));

            let content = if post.excerpt.is_empty() {
                self.blocks.render_to_string(&post.content)
            } else {
                post.excerpt.clone()
            };
            let clean_content = strip_invalid_xml_chars(&content);
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                clean_content
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        let output_path = self.app.public_dir.join("atom.xml");
        fs::write(&output_path, feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }

    /// Generate search index (JSON)
    fn generate_search_index(&self, posts: &[Post]) -> Result<()> {
        let search_data: Vec<serde_json::Value> = posts
            .iter()
            .map(|p| {
                let text: Vec<&str> = p.content.iter().filter_map(|b| b.text()).collect();
                serde_json::json!({
                    "title": p.title,
                    "url": url_for(&self.app.config, &self.post_path(p)),
                    "excerpt": p.excerpt,
                    "category": p.category,
                    "tags": p.tags,
                    "content": crate::helpers::strip_html(&text.join(" ")),
                    "date": p.created_at.format("%Y-%m-%d").to_string(),
                })
            })
            .collect();

        let output_path = self.app.public_dir.join("search.json");
        let json = serde_json::to_string_pretty(&search_data)?;
        fs::write(&output_path, json)?;
        tracing::info!("Generated search.json");

        Ok(())
    }

    /// Generate sitemap.xml
    ///
    /// Static routes come first (home at priority 1.0, the rest at 0.8),
    /// then one entry per published post at 0.7 with its last save date.
    fn generate_sitemap(&self, posts: &[Post]) -> Result<()> {
        let config = &self.app.config;
        let base = config.url.trim_end_matches('/');

        let mut sitemap = String::new();
        sitemap.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        sitemap.push('\n');
        sitemap.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        sitemap.push('\n');

        for page in &config.pages {
            let priority = if page.is_empty() { "1.0" } else { "0.8" };
            sitemap.push_str("  <url>\n");
            sitemap.push_str(&format!("    <loc>{}{}</loc>\n", base, page));
            sitemap.push_str("    <changefreq>weekly</changefreq>\n");
            sitemap.push_str(&format!("    <priority>{}</priority>\n", priority));
            sitemap.push_str("  </url>\n");
        }

        for post in posts {
            sitemap.push_str("  <url>\n");
            sitemap.push_str(&format!(
                "    <loc>{}</loc>\n",
                full_url_for(config, &self.post_path(post))
            ));
            sitemap.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                post.updated_at.format("%Y-%m-%d")
            ));
            sitemap.push_str("    <changefreq>monthly</changefreq>\n");
            sitemap.push_str("    <priority>0.7</priority>\n");
            sitemap.push_str("  </url>\n");
        }

        sitemap.push_str("</urlset>\n");

        let output_path = self.app.public_dir.join("sitemap.xml");
        fs::write(&output_path, sitemap)?;
        tracing::info!("Generated sitemap.xml");

        Ok(())
    }

    /// Copy static assets (images, css) to the public directory
    fn copy_assets(&self) -> Result<()> {
        let assets_dir = self.app.content_dir.join("assets");
        if !assets_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(&assets_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() {
                let relative = path.strip_prefix(&assets_dir)?;
                let dest = self.app.public_dir.join("assets").join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }

    /// Site-relative path of a post page
    fn post_path(&self, post: &Post) -> String {
        format!("/{}/{}/", self.app.config.blog_dir, post.slug)
    }

    /// Build template data for one post
    fn post_data(&self, post: &Post) -> PostData {
        PostData {
            title: post.title.clone(),
            url: url_for(&self.app.config, &self.post_path(post)),
            date: post.created_at.format("%Y-%m-%d").to_string(),
            updated: post.updated_at.format("%Y-%m-%d").to_string(),
            category: post.category.clone(),
            tags: post.tags.clone(),
            excerpt: post.excerpt.clone(),
            reading_time: post.reading_time,
            views: post.views,
            featured: post.featured,
            featured_image: post.featured_image.clone(),
        }
    }

    /// Build category chips from the posts actually present
    fn category_data(&self, posts: &[Post]) -> Vec<CategoryData> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for post in posts {
            if !post.category.trim().is_empty() {
                *counts.entry(post.category.clone()).or_insert(0) += 1;
            }
        }

        counts
            .into_iter()
            .map(|(name, count)| {
                let path = url_for(
                    &self.app.config,
                    &format!("{}/{}/", self.app.config.category_dir, slug::slugify(&name)),
                );
                CategoryData { name, path, count }
            })
            .collect()
    }
}

/// Display name for a configured page route ("" is Home)
fn page_display_name(page: &str) -> String {
    let segment = page.trim_matches('/');
    if segment.is_empty() {
        return "Home".to_string();
    }
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}
