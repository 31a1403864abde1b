//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Characters left unescaped by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Join the site origin and a path into an absolute URL
///
/// # Examples
/// ```ignore
/// full_url_for("https://sgrecycle.com/", "/blog") // -> "https://sgrecycle.com/blog"
/// full_url_for("https://sgrecycle.com", "") // -> "https://sgrecycle.com"
/// ```
pub fn full_url_for(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Resolve a possibly relative asset URL against an origin
///
/// Absolute `http(s)://` URLs and protocol-relative URLs pass through untouched.
pub fn absolute_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//") {
        url.to_string()
    } else {
        full_url_for(base_url, url)
    }
}

/// Encode a URL component
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Social networks a post can be shared to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Twitter,
    Facebook,
    Linkedin,
    Email,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 4] = [
        SharePlatform::Twitter,
        SharePlatform::Facebook,
        SharePlatform::Linkedin,
        SharePlatform::Email,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SharePlatform::Twitter => "Twitter",
            SharePlatform::Facebook => "Facebook",
            SharePlatform::Linkedin => "LinkedIn",
            SharePlatform::Email => "Email",
        }
    }
}

/// Build the share link for a page
pub fn share_url(platform: SharePlatform, url: &str, title: &str, description: &str) -> String {
    let url = encode_component(url);
    let title = encode_component(title);

    match platform {
        SharePlatform::Twitter => {
            format!("https://twitter.com/intent/tweet?url={}&text={}", url, title)
        }
        SharePlatform::Facebook => {
            format!("https://www.facebook.com/sharer/sharer.php?u={}", url)
        }
        SharePlatform::Linkedin => {
            format!("https://www.linkedin.com/sharing/share-offsite/?url={}", url)
        }
        SharePlatform::Email => format!(
            "mailto:?subject={}&body={}%0D%0A%0D%0A{}",
            title,
            encode_component(description),
            url
        ),
    }
}
