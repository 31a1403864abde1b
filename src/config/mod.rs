//! Configuration module

mod site;

pub use site::{
    resolve_base_url, ContentConfig, ServerConfig, SiteConfig, SourceKind, DEFAULT_SITE_URL,
    SITE_URL_ENV,
};
