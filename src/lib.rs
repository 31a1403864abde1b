//! sgrecycle: content service and server for the SG Recycle site
//!
//! Posts come from a [`content::ContentSource`] (a posts directory, the
//! built-in placeholders, or a remote Content Provider) and are read through
//! [`content::ContentApi`]. The same crate can serve the provider API, render
//! the site pages with embedded Tera templates, and write sitemap and robots
//! files.

pub mod commands;
pub mod config;
pub mod contact;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod provider;
pub mod seo;
pub mod server;
pub mod templates;

use anyhow::Result;
use axum::Router;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::SourceKind;
use content::{ContentApi, ContentSource, RemoteSource, StaticSource};

/// The site application
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown posts directory
    pub posts_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a new site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.content.posts_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            public_dir,
        })
    }

    /// Origin used for every absolute URL
    pub fn base_url(&self) -> String {
        self.config.base_url()
    }

    /// The configured backing store
    pub fn content_source(&self) -> Result<Arc<dyn ContentSource>> {
        let content = &self.config.content;
        Ok(match content.source {
            SourceKind::Static => Arc::new(StaticSource::load(&self.posts_dir)?),
            SourceKind::Remote => {
                tracing::info!("Reading posts from {}", content.api_url);
                Arc::new(RemoteSource::new(
                    &content.api_url,
                    content.timeout(),
                    content.api_token.clone(),
                )?)
            }
        })
    }

    pub fn content_api(&self) -> Result<ContentApi> {
        Ok(ContentApi::new(self.content_source()?))
    }

    /// Page renderer bound to this site's metadata
    pub fn pages(&self) -> Result<templates::Pages> {
        let base_url = self.base_url();
        templates::Pages::new(
            seo::SiteMeta::new(&self.config, &base_url),
            templates::SiteData::new(
                &self.config.title,
                &self.config.description,
                &self.config.language,
                &base_url,
            ),
        )
    }

    /// Provider API routes, served only when posts are local
    pub fn provider_routes(&self) -> Result<Option<Router>> {
        if self.config.content.source != SourceKind::Static {
            return Ok(None);
        }
        let posts = StaticSource::load(&self.posts_dir)?.into_posts();
        let service = provider::CollectionService::new(provider::seed_from_posts(&posts))?;
        let controller = provider::PostController::new(service);
        Ok(Some(provider::routes(Arc::new(controller))))
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_site_defaults_without_config() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.public_dir, tmp.path().join("public"));
        assert_eq!(site.posts_dir, tmp.path().join("source/_posts"));
        assert!(site.provider_routes().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_site_reads_config_and_posts() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("_config.yml"),
            "title: Test Site\npublic_dir: out\ncontent:\n  posts_dir: posts\n",
        )
        .unwrap();
        std::fs::create_dir_all(tmp.path().join("posts")).unwrap();
        std::fs::write(
            tmp.path().join("posts/hello.md"),
            "---\ntitle: Hello\ndate: 2025-02-03\n---\nHi there",
        )
        .unwrap();

        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.config.title, "Test Site");
        assert_eq!(site.public_dir, tmp.path().join("out"));

        let slugs = site.content_api().unwrap().all_slugs().await.unwrap();
        assert_eq!(slugs, vec!["hello"]);

        site.generate().await.unwrap();
        assert!(tmp.path().join("out/blog/hello/index.html").is_file());
    }

    #[test]
    fn test_remote_site_has_no_provider_routes() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("_config.yml"),
            "content:\n  source: remote\n  api_url: http://127.0.0.1:1337\n",
        )
        .unwrap();
        let site = Site::new(tmp.path()).unwrap();
        assert!(site.provider_routes().unwrap().is_none());
        assert!(site.content_source().is_ok());
    }
}
