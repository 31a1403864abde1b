//! Post controller: forces the post relations into every read

use std::sync::Arc;

use super::{augment, CoreService, Envelope, ProviderError, Query};

/// Wraps a collection service and augments each query before delegating
#[derive(Debug, Clone)]
pub struct PostController<S> {
    inner: Arc<S>,
}

impl<S: CoreService> PostController<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub async fn find(&self, query: Query) -> Result<Envelope<Vec<S::Doc>>, ProviderError> {
        let query = augment(query);
        if let Some(populate) = &query.populate {
            tracing::debug!("find posts with populate {}", populate.to_json());
        }
        self.inner.find(&query).await
    }

    pub async fn find_one(
        &self,
        id: &str,
        query: Query,
    ) -> Result<Option<Envelope<S::Doc>>, ProviderError> {
        let query = augment(query);
        self.inner.find_one(id, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::placeholder_posts;
    use crate::provider::{seed_from_posts, CollectionService, Populate, ProviderPost};

    fn controller() -> PostController<CollectionService<ProviderPost>> {
        PostController::new(CollectionService::new(seed_from_posts(&placeholder_posts())).unwrap())
    }

    #[tokio::test]
    async fn test_find_always_populates_relations() {
        let envelope = controller().find(Query::default()).await.unwrap();
        assert_eq!(envelope.data.len(), 3);
        for doc in &envelope.data {
            assert!(doc.featured_image.is_some());
            assert!(doc.og_image.is_some());
            let seo = doc.seo.as_ref().unwrap();
            assert!(seo.meta_image.is_some());
        }
    }

    #[tokio::test]
    async fn test_caller_populate_is_overridden() {
        let query = Query {
            populate: Some(Populate::fields([("author", Populate::leaf())])),
            ..Query::default()
        };
        let envelope = controller().find(query).await.unwrap();
        assert!(envelope.data.iter().all(|d| d.seo.is_some()));
    }

    #[tokio::test]
    async fn test_find_one_is_augmented() {
        let found = controller()
            .find_one("3", Query::default())
            .await
            .unwrap()
            .unwrap();
        assert!(found.data.featured_image.is_some());
        assert!(found.data.seo.unwrap().meta_image.is_some());
    }
}
