//! The access layer presentation code reads posts through

use std::sync::Arc;

use super::{BlogPost, ContentError, ContentSource};
use crate::helpers::{full_date, parse_date};

/// Typed, async boundary over a [`ContentSource`]
///
/// Every read returns a `Result`; presentation code that must keep
/// rendering on failure goes through [`or_empty`].
#[derive(Clone)]
pub struct ContentApi {
    source: Arc<dyn ContentSource>,
}

impl ContentApi {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    /// All posts, newest first by published date
    ///
    /// The sort is stable, so posts sharing a date keep their canonical order.
    pub async fn all_posts(&self) -> Result<Vec<BlogPost>, ContentError> {
        let mut posts = self.source.posts().await?;
        posts.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        Ok(posts)
    }

    /// The post with `slug`, or `None` when no single post matches
    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, ContentError> {
        let mut matches = self.source.posts_with_slug(slug).await?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => {
                tracing::warn!("Slug `{}` matches {} posts, treating as not found", slug, n);
                Ok(None)
            }
        }
    }

    /// One slug per post, in canonical order
    pub async fn all_slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self
            .source
            .posts()
            .await?
            .into_iter()
            .map(|p| p.slug)
            .collect())
    }

    /// The first `limit` posts of the canonical order, not re-sorted
    pub async fn featured_posts(&self, limit: usize) -> Result<Vec<BlogPost>, ContentError> {
        let mut posts = self.source.posts().await?;
        posts.truncate(limit);
        Ok(posts)
    }
}

/// Long-form display date, e.g. "August 10, 2025"
pub fn format_date(date: &str) -> Result<String, ContentError> {
    parse_date(date)
        .map(|d| full_date(&d))
        .ok_or_else(|| ContentError::InvalidDate(date.to_string()))
}

/// Degrade a failed read to the type's empty value, logging the failure once
pub fn or_empty<T: Default>(result: Result<T, ContentError>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("Failed to load {}: {}", what, e);
            T::default()
        }
    }
}
