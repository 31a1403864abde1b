//! Generator module - writes the site's pages and SEO files to the public dir

use anyhow::Result;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use crate::contact::ContactFormState;
use crate::content::{is_url_safe_slug, or_empty, ContentApi, PostFilter};
use crate::seo::{build_sitemap, render_xml, RobotsPolicy};
use crate::server::{FEATURED_LIMIT, RELATED_LIMIT};
use crate::templates::Pages;

/// Counts of what a generation run wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateStats {
    pub posts: usize,
    pub files: usize,
}

/// Static site generator using Tera templates
pub struct Generator {
    api: ContentApi,
    pages: Pages,
    base_url: String,
    public_dir: PathBuf,
}

impl Generator {
    /// Create a new generator
    pub fn new(api: ContentApi, pages: Pages, base_url: &str, public_dir: &Path) -> Self {
        Self {
            api,
            pages,
            base_url: base_url.to_string(),
            public_dir: public_dir.to_path_buf(),
        }
    }

    /// Generate the entire site
    ///
    /// A failing content source still produces every page that does not
    /// depend on posts; the post pages are skipped and the sitemap only
    /// lists the static routes.
    pub async fn generate(&self) -> Result<GenerateStats> {
        fs::create_dir_all(&self.public_dir)?;
        let mut stats = GenerateStats::default();

        let posts = self.api.all_posts().await;
        let sitemap = build_sitemap(&self.base_url, &posts, Utc::now());
        let posts = or_empty(posts, "posts");

        // Home page
        let featured = or_empty(self.api.featured_posts(FEATURED_LIMIT).await, "featured posts");
        self.write("index.html", &self.pages.home(&featured)?)?;
        stats.files += 1;

        // Blog index
        let index = self
            .pages
            .blog_list(&posts, &posts, &PostFilter::default())?;
        self.write("blog/index.html", &index)?;
        stats.files += 1;

        // Post pages, one per slug
        let slugs = or_empty(self.api.all_slugs().await, "post slugs");
        for slug in &slugs {
            if !is_url_safe_slug(slug) {
                tracing::warn!("Slug `{}` is not a safe path segment, skipping", slug);
                continue;
            }
            let post = match self.api.post_by_slug(slug).await {
                Ok(Some(post)) => post,
                Ok(None) => {
                    tracing::warn!("Slug `{}` did not resolve to a post, skipping", slug);
                    continue;
                }
                Err(e) => {
                    tracing::error!("Failed to load post `{}`: {}", slug, e);
                    continue;
                }
            };
            let related: Vec<_> = posts
                .iter()
                .filter(|p| p.slug != post.slug)
                .take(RELATED_LIMIT)
                .cloned()
                .collect();
            let html = self.pages.blog_post(&post, &related)?;
            self.write(&format!("blog/{}/index.html", post.slug), &html)?;
            stats.posts += 1;
            stats.files += 1;
        }

        // Contact page
        self.write("contact/index.html", &self.pages.contact(&ContactFormState::new())?)?;
        stats.files += 1;

        // Not-found page for static hosts
        let not_found = self.pages.not_found(&self.pages.meta().not_found())?;
        self.write("404.html", &not_found)?;
        stats.files += 1;

        self.write("sitemap.xml", &render_xml(&sitemap))?;
        tracing::info!("Generated sitemap.xml");
        self.write("robots.txt", &RobotsPolicy::for_site(&self.base_url).to_text())?;
        stats.files += 2;

        Ok(stats)
    }

    fn write(&self, relative: &str, contents: &str) -> Result<()> {
        let output_path = self.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, contents)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Wrote {:?}", output_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{placeholder_posts, BlogPost, ContentError, ContentSource, StaticSource};
    use async_trait::async_trait;
    use crate::seo::SiteMeta;
    use crate::templates::SiteData;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Source that hands out posts without any slug checks
    struct Unchecked(Vec<BlogPost>);

    #[async_trait]
    impl ContentSource for Unchecked {
        async fn posts(&self) -> Result<Vec<BlogPost>, ContentError> {
            Ok(self.0.clone())
        }
    }

    fn generator(public: &Path) -> Generator {
        generator_with(Arc::new(StaticSource::placeholder()), public)
    }

    fn generator_with(source: Arc<dyn ContentSource>, public: &Path) -> Generator {
        let config = SiteConfig::default();
        let base = "https://sgrecycle.com";
        let pages = Pages::new(
            SiteMeta::new(&config, base),
            SiteData::new(&config.title, &config.description, &config.language, base),
        )
        .unwrap();
        let api = ContentApi::new(source);
        Generator::new(api, pages, base, public)
    }

    #[tokio::test]
    async fn test_generate_writes_every_page() {
        let tmp = TempDir::new().unwrap();
        let stats = generator(tmp.path()).generate().await.unwrap();
        assert_eq!(stats.posts, 3);
        assert_eq!(stats.files, 9);

        for file in [
            "index.html",
            "blog/index.html",
            "blog/singapore-journey-toward-zero-waste/index.html",
            "contact/index.html",
            "404.html",
            "sitemap.xml",
            "robots.txt",
        ] {
            assert!(tmp.path().join(file).is_file(), "missing {}", file);
        }

        let sitemap = fs::read_to_string(tmp.path().join("sitemap.xml")).unwrap();
        assert_eq!(sitemap.matches("<url>").count(), 6);
    }

    #[tokio::test]
    async fn test_generate_never_writes_outside_public_dir() {
        let tmp = TempDir::new().unwrap();
        let public = tmp.path().join("public");
        let mut posts = placeholder_posts();
        posts[0].slug = "../../escaped".to_string();

        let stats = generator_with(Arc::new(Unchecked(posts)), &public)
            .generate()
            .await
            .unwrap();
        assert_eq!(stats.posts, 2);
        assert!(!tmp.path().join("escaped").exists());
        assert!(public
            .join("blog/singapore-journey-toward-zero-waste/index.html")
            .is_file());
    }
}
