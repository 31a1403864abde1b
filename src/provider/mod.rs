//! Content Provider: a headless-CMS style post collection
//!
//! A generic [`CollectionService`] answers filtered, sorted and paginated
//! reads over an in-memory document set. [`PostController`] sits in front of
//! it and forces the post relations (images and SEO) into every query, and
//! [`routes`] exposes the controller over HTTP.

mod augment;
mod controller;
mod model;
mod query;
mod routes;
mod service;

pub use augment::{augment, post_populate};
pub use controller::PostController;
pub use model::{
    seed_from_posts, Envelope, ErrorBody, Media, Meta, PaginationMeta, ProviderPost, Seo,
    META_DESCRIPTION_MAX, META_TITLE_MAX, OG_IMAGE_HEIGHT, OG_IMAGE_WIDTH,
};
pub use query::{Pagination, Populate, Query, Sort, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use routes::routes;
pub use service::{CollectionService, CoreService, Document, FieldValue};

use thiserror::Error;

/// Errors raised by the provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Malformed or unsupported read query
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A stored document violates the collection schema
    #[error("schema violation: {0}")]
    Schema(String),
}
