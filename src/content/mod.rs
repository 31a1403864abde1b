//! Content module - posts, where they come from, and the access layer over them

mod api;
mod filter;
mod frontmatter;
pub mod loader;
mod markdown;
mod placeholder;
mod post;
mod remote;
mod source;

pub use api::{format_date, or_empty, ContentApi};
pub use filter::{categories, PostFilter, ALL_CATEGORY};
pub use frontmatter::FrontMatter;
pub use loader::PostLoader;
pub use markdown::MarkdownRenderer;
pub use placeholder::placeholder_posts;
pub use post::{is_url_safe_slug, reading_time, Author, BlogPost, WORDS_PER_MINUTE};
pub use remote::RemoteSource;
pub use source::{ContentSource, StaticSource};

use thiserror::Error;

/// Errors raised while reading posts
#[derive(Debug, Error)]
pub enum ContentError {
    /// The content provider could not be reached or timed out
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    /// A response or document did not have the expected shape
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid front-matter: {message}")]
    FrontMatter { message: String },

    #[error("duplicate slug `{0}`")]
    DuplicateSlug(String),

    /// A slug that is not a single URL-safe path segment
    #[error("invalid slug `{0}`")]
    InvalidSlug(String),

    #[error("invalid date `{0}`")]
    InvalidDate(String),
}
