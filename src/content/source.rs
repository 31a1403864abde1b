//! Backing stores for post data

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use super::{is_url_safe_slug, placeholder_posts, BlogPost, ContentError, PostLoader};

/// Where post data comes from
///
/// Implementations return posts in their canonical order; ordering for
/// display is applied by [`super::ContentApi`].
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Every post, in canonical order
    async fn posts(&self) -> Result<Vec<BlogPost>, ContentError>;

    /// Every post whose slug equals `slug`
    async fn posts_with_slug(&self, slug: &str) -> Result<Vec<BlogPost>, ContentError> {
        Ok(self
            .posts()
            .await?
            .into_iter()
            .filter(|p| p.slug == slug)
            .collect())
    }
}

/// Immutable in-memory post set
#[derive(Debug, Clone)]
pub struct StaticSource {
    posts: Arc<Vec<BlogPost>>,
}

impl StaticSource {
    /// Build from posts in canonical order; slugs must be unique and URL-safe
    pub fn new(posts: Vec<BlogPost>) -> Result<Self, ContentError> {
        let mut seen = HashSet::new();
        for post in &posts {
            if !is_url_safe_slug(&post.slug) {
                return Err(ContentError::InvalidSlug(post.slug.clone()));
            }
            if !seen.insert(post.slug.as_str()) {
                return Err(ContentError::DuplicateSlug(post.slug.clone()));
            }
        }
        Ok(Self {
            posts: Arc::new(posts),
        })
    }

    /// The built-in placeholder posts
    pub fn placeholder() -> Self {
        Self {
            posts: Arc::new(placeholder_posts()),
        }
    }

    /// Load posts from a directory, falling back to the placeholders when it
    /// does not exist
    pub fn load<P: AsRef<Path>>(posts_dir: P) -> Result<Self, ContentError> {
        let posts_dir = posts_dir.as_ref();
        if !posts_dir.is_dir() {
            tracing::info!(
                "No posts directory at {:?}, serving placeholder posts",
                posts_dir
            );
            return Ok(Self::placeholder());
        }

        let posts = PostLoader::new(posts_dir).load_posts()?;
        tracing::info!("Loaded {} posts from {:?}", posts.len(), posts_dir);
        Self::new(posts)
    }

    /// The posts in canonical order
    pub fn into_posts(self) -> Vec<BlogPost> {
        Arc::try_unwrap(self.posts).unwrap_or_else(|shared| shared.as_ref().clone())
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[async_trait]
impl ContentSource for StaticSource {
    async fn posts(&self) -> Result<Vec<BlogPost>, ContentError> {
        Ok(self.posts.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_duplicate_slug_rejected() {
        let mut posts = placeholder_posts();
        posts[2].slug = posts[0].slug.clone();
        let err = StaticSource::new(posts).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug(s) if s == "revolutionary-plastic-bottle-recycling-technology"));
    }

    #[test]
    fn test_unsafe_slug_rejected() {
        let mut posts = placeholder_posts();
        posts[0].slug = "../../escaped".to_string();
        let err = StaticSource::new(posts).unwrap_err();
        assert!(matches!(err, ContentError::InvalidSlug(s) if s == "../../escaped"));
    }

    #[test]
    fn test_load_rejects_front_matter_slug_with_path() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("a.md"),
            "---\ntitle: Escape\nslug: ../outside\ndate: 2025-01-02\n---\nBody",
        )
        .unwrap();
        assert!(matches!(
            StaticSource::load(tmp.path()),
            Err(ContentError::InvalidSlug(_))
        ));
    }

    #[tokio::test]
    async fn test_static_source_keeps_canonical_order() {
        let source = StaticSource::placeholder();
        let ids: Vec<_> = source
            .posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_posts_with_slug() {
        let source = StaticSource::placeholder();
        let found = source
            .posts_with_slug("economics-of-paper-recycling")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(source.posts_with_slug("nope").await.unwrap().is_empty());
    }

    #[test]
    fn test_load_falls_back_to_placeholder() {
        let tmp = TempDir::new().unwrap();
        let source = StaticSource::load(tmp.path().join("missing")).unwrap();
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_load_from_directory() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("a.md"),
            "---\ntitle: Only\ndate: 2025-01-02\n---\nBody",
        )
        .unwrap();
        let source = StaticSource::load(tmp.path()).unwrap();
        assert_eq!(source.len(), 1);
    }
}
