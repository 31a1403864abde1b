//! Generic collection retrieval

use async_trait::async_trait;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use super::{
    Envelope, Meta, PaginationMeta, Populate, ProviderError, Query, SortOrder, MAX_PAGE_SIZE,
};

/// Scalar attribute value used for filtering and sorting
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    Int(u64),
    Text(String),
}

impl FieldValue {
    /// Whether a raw query-string value equals this attribute
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            FieldValue::Int(n) => raw.trim().parse::<u64>() == Ok(*n),
            FieldValue::Text(s) => s == raw,
        }
    }
}

/// A record the generic collection service can serve
pub trait Document: Clone + Serialize + Send + Sync + 'static {
    /// Attributes accepted in `filters` and `sort`
    const FIELDS: &'static [&'static str];

    fn id(&self) -> u64;

    fn document_id(&self) -> &str;

    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Copy of the record with unpopulated relations removed
    fn project(&self, populate: Option<&Populate>) -> Self;

    fn validate(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// Default retrieve operations of a collection
#[async_trait]
pub trait CoreService: Send + Sync {
    type Doc: Document;

    /// Filtered, sorted, paginated listing
    async fn find(&self, query: &Query) -> Result<Envelope<Vec<Self::Doc>>, ProviderError>;

    /// Single record by numeric id or document id
    async fn find_one(
        &self,
        id: &str,
        query: &Query,
    ) -> Result<Option<Envelope<Self::Doc>>, ProviderError>;
}

/// In-memory collection backed by a fixed document set
#[derive(Debug, Clone)]
pub struct CollectionService<D> {
    docs: Arc<Vec<D>>,
}

impl<D: Document> CollectionService<D> {
    /// Validate and index the documents; ids and document ids must be unique
    pub fn new(docs: Vec<D>) -> Result<Self, ProviderError> {
        let mut ids = HashSet::new();
        let mut document_ids = HashSet::new();
        for doc in &docs {
            doc.validate()?;
            if !ids.insert(doc.id()) {
                return Err(ProviderError::Schema(format!("duplicate id {}", doc.id())));
            }
            if !document_ids.insert(doc.document_id().to_string()) {
                return Err(ProviderError::Schema(format!(
                    "duplicate documentId `{}`",
                    doc.document_id()
                )));
            }
        }
        Ok(Self {
            docs: Arc::new(docs),
        })
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn check_field(name: &str, context: &str) -> Result<(), ProviderError> {
        if D::FIELDS.contains(&name) {
            Ok(())
        } else {
            Err(ProviderError::InvalidQuery(format!(
                "invalid {} key `{}`",
                context, name
            )))
        }
    }
}

#[async_trait]
impl<D: Document> CoreService for CollectionService<D> {
    type Doc = D;

    async fn find(&self, query: &Query) -> Result<Envelope<Vec<D>>, ProviderError> {
        for field in query.filters.keys() {
            Self::check_field(field, "filter")?;
        }
        for sort in &query.sort {
            Self::check_field(&sort.field, "sort")?;
        }

        let mut matched: Vec<&D> = self
            .docs
            .iter()
            .filter(|doc| {
                query.filters.iter().all(|(field, expected)| {
                    doc.field(field)
                        .map(|value| value.matches(expected))
                        .unwrap_or(false)
                })
            })
            .collect();

        if !query.sort.is_empty() {
            matched.sort_by(|a, b| {
                for sort in &query.sort {
                    let ordering = a.field(&sort.field).cmp(&b.field(&sort.field));
                    let ordering = match sort.order {
                        SortOrder::Asc => ordering,
                        SortOrder::Desc => ordering.reverse(),
                    };
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                Ordering::Equal
            });
        }

        let total = matched.len();
        // Queries built by hand may carry a zero page or page size
        let page = query.pagination.page.max(1);
        let page_size = query.pagination.page_size.clamp(1, MAX_PAGE_SIZE);
        let page_count = total.div_ceil(page_size);
        let start = (page - 1).saturating_mul(page_size);

        let data = matched
            .into_iter()
            .skip(start)
            .take(page_size)
            .map(|doc| doc.project(query.populate.as_ref()))
            .collect();

        Ok(Envelope {
            data,
            meta: Meta {
                pagination: Some(PaginationMeta {
                    page,
                    page_size,
                    page_count,
                    total,
                }),
            },
        })
    }

    async fn find_one(&self, id: &str, query: &Query) -> Result<Option<Envelope<D>>, ProviderError> {
        let found = self
            .docs
            .iter()
            .find(|doc| doc.document_id() == id || doc.id().to_string() == id);

        Ok(found.map(|doc| Envelope {
            data: doc.project(query.populate.as_ref()),
            meta: Meta::default(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::placeholder_posts;
    use crate::provider::{seed_from_posts, Pagination, ProviderPost, Sort};

    fn service() -> CollectionService<ProviderPost> {
        CollectionService::new(seed_from_posts(&placeholder_posts())).unwrap()
    }

    #[tokio::test]
    async fn test_find_defaults_to_insertion_order() {
        let envelope = service().find(&Query::default()).await.unwrap();
        let ids: Vec<_> = envelope.data.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(
            envelope.meta.pagination,
            Some(PaginationMeta {
                page: 1,
                page_size: 25,
                page_count: 1,
                total: 3
            })
        );
        // No populate: relations are stripped
        assert!(envelope.data.iter().all(|d| d.seo.is_none()));
    }

    #[tokio::test]
    async fn test_find_filters_by_slug() {
        let mut query = Query::default();
        query
            .filters
            .insert("slug".to_string(), "economics-of-paper-recycling".to_string());
        let envelope = service().find(&query).await.unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].id, 3);

        query.filters.insert("id".to_string(), "1".to_string());
        assert!(service().find(&query).await.unwrap().data.is_empty());
    }

    #[tokio::test]
    async fn test_find_sorts_and_paginates() {
        let query = Query {
            sort: vec![Sort {
                field: "publishedDate".to_string(),
                order: SortOrder::Asc,
            }],
            pagination: Pagination {
                page: 2,
                page_size: 2,
            },
            ..Query::default()
        };
        let envelope = service().find(&query).await.unwrap();
        let ids: Vec<_> = envelope.data.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1]);
        let meta = envelope.meta.pagination.unwrap();
        assert_eq!(meta.page_count, 2);
        assert_eq!(meta.total, 3);
    }

    #[tokio::test]
    async fn test_zero_page_and_page_size_are_clamped() {
        let query = Query {
            pagination: Pagination {
                page: 0,
                page_size: 0,
            },
            ..Query::default()
        };
        let envelope = service().find(&query).await.unwrap();
        let ids: Vec<_> = envelope.data.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(
            envelope.meta.pagination,
            Some(PaginationMeta {
                page: 1,
                page_size: 1,
                page_count: 3,
                total: 3
            })
        );

        let query = Query {
            pagination: Pagination {
                page: 1,
                page_size: 10_000,
            },
            ..Query::default()
        };
        let meta = service().find(&query).await.unwrap().meta.pagination.unwrap();
        assert_eq!(meta.page_size, MAX_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_unknown_filter_or_sort_key_rejected() {
        let mut query = Query::default();
        query.filters.insert("content".to_string(), "x".to_string());
        assert!(matches!(
            service().find(&query).await,
            Err(ProviderError::InvalidQuery(_))
        ));

        let query = Query {
            sort: vec![Sort {
                field: "content".to_string(),
                order: SortOrder::Asc,
            }],
            ..Query::default()
        };
        assert!(service().find(&query).await.is_err());
    }

    #[tokio::test]
    async fn test_find_one_by_either_id() {
        let svc = service();
        let by_id = svc.find_one("2", &Query::default()).await.unwrap().unwrap();
        assert_eq!(by_id.data.slug, "singapore-journey-toward-zero-waste");
        assert_eq!(by_id.meta, Meta::default());
        assert!(svc.find_one("42", &Query::default()).await.unwrap().is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut docs = seed_from_posts(&placeholder_posts());
        docs[1].id = 1;
        assert!(matches!(
            CollectionService::new(docs),
            Err(ProviderError::Schema(_))
        ));
    }

    #[test]
    fn test_field_value_matches() {
        assert!(FieldValue::Int(7).matches("7"));
        assert!(!FieldValue::Int(7).matches("seven"));
        assert!(FieldValue::Text("a".to_string()).matches("a"));
    }
}
