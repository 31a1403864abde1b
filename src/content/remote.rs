//! HTTP-backed content source talking to the Content Provider API

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{is_url_safe_slug, BlogPost, ContentError, ContentSource};
use crate::helpers::full_url_for;
use crate::provider::{Envelope, ProviderPost};

/// Page size requested when walking the post collection
const FETCH_PAGE_SIZE: usize = 100;

/// Reads posts from a remote Content Provider over HTTP
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
}

impl RemoteSource {
    /// Create a client for the provider at `api_url` (its origin, without `/api`)
    pub fn new(
        api_url: &str,
        timeout: Duration,
        api_token: Option<String>,
    ) -> Result<Self, ContentError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_token: api_token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn posts_url(&self) -> String {
        full_url_for(&self.api_url, "/api/posts")
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, ContentError> {
        let mut request = self.client.get(url).query(params);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Posts whose slug is not URL-safe are skipped with a warning
    fn convert(&self, docs: Vec<ProviderPost>) -> Result<Vec<BlogPost>, ContentError> {
        docs.into_iter()
            .filter(|doc| {
                let safe = is_url_safe_slug(&doc.slug);
                if !safe {
                    tracing::warn!("Skipping post {} with unsafe slug `{}`", doc.id, doc.slug);
                }
                safe
            })
            .map(|doc| doc.into_blog_post(&self.api_url))
            .collect()
    }
}

#[async_trait]
impl ContentSource for RemoteSource {
    async fn posts(&self) -> Result<Vec<BlogPost>, ContentError> {
        let url = self.posts_url();
        let mut posts = Vec::new();
        let mut page = 1;

        loop {
            let envelope: Envelope<Vec<ProviderPost>> = self
                .get(
                    &url,
                    &[
                        ("pagination[page]", page.to_string()),
                        ("pagination[pageSize]", FETCH_PAGE_SIZE.to_string()),
                    ],
                )
                .await?;

            let received = envelope.data.len();
            posts.extend(self.convert(envelope.data)?);

            let page_count = envelope
                .meta
                .pagination
                .map(|p| p.page_count)
                .unwrap_or(page);
            if received == 0 || page >= page_count {
                break;
            }
            page += 1;
        }

        tracing::debug!("Fetched {} posts from {}", posts.len(), url);
        Ok(posts)
    }

    async fn posts_with_slug(&self, slug: &str) -> Result<Vec<BlogPost>, ContentError> {
        let envelope: Envelope<Vec<ProviderPost>> = self
            .get(&self.posts_url(), &[("filters[slug][$eq]", slug.to_string())])
            .await?;
        self.convert(envelope.data)
    }
}
