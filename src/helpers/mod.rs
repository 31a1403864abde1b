//! Helper functions shared by templates, SEO output and the content layer

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
