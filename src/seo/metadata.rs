//! Page metadata for search engines and social sharing

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::content::{BlogPost, ContentError};
use crate::helpers::{absolute_url, escape_html, full_url_for};
use crate::provider::{OG_IMAGE_HEIGHT, OG_IMAGE_WIDTH};

pub const NOT_FOUND_TITLE: &str = "Post Not Found";
pub const NOT_FOUND_DESCRIPTION: &str = "The requested blog post could not be found.";
pub const ERROR_TITLE: &str = "Error Loading Post";
pub const ERROR_DESCRIPTION: &str = "An error occurred while loading the blog post.";

const DEFAULT_OG_IMAGE: &str = "/images/og-image.jpg";
const OG_LOCALE: &str = "en_SG";
const TWITTER_CARD: &str = "summary_large_image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OgType {
    Website,
    Article,
}

impl OgType {
    fn as_str(self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: OgType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    pub images: Vec<OgImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    pub images: Vec<String>,
}

/// Everything that goes into a page's `<head>` besides assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    /// Render `title` as-is instead of through the site title template
    pub absolute_title: bool,
    pub description: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<TwitterCard>,
}

impl Metadata {
    /// Title and description only
    pub fn basic(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            absolute_title: false,
            description: description.to_string(),
            keywords: Vec::new(),
            canonical: None,
            open_graph: None,
            twitter: None,
        }
    }
}

/// Builds [`Metadata`] for every page of the site
#[derive(Debug, Clone)]
pub struct SiteMeta {
    base_url: String,
    site_title: String,
    description: String,
    keywords: Vec<String>,
    twitter: Option<String>,
}

impl SiteMeta {
    pub fn new(config: &SiteConfig, base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            site_title: config.title.clone(),
            description: config.description.clone(),
            keywords: config.keywords.clone(),
            twitter: config.twitter.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `%s | <site title>`, unless the metadata asks for an absolute title
    pub fn document_title(&self, meta: &Metadata) -> String {
        if meta.absolute_title {
            meta.title.clone()
        } else {
            format!("{} | {}", meta.title, self.site_title)
        }
    }

    fn default_image(&self, alt: &str) -> OgImage {
        OgImage {
            url: full_url_for(&self.base_url, DEFAULT_OG_IMAGE),
            width: OG_IMAGE_WIDTH,
            height: OG_IMAGE_HEIGHT,
            alt: alt.to_string(),
        }
    }

    /// Home page and fallback metadata
    pub fn site_defaults(&self) -> Metadata {
        let title = format!(
            "{} - Sustainable Recycling Solutions for Singapore",
            self.site_title
        );
        Metadata {
            title: title.clone(),
            absolute_title: true,
            description: self.description.clone(),
            keywords: self.keywords.clone(),
            canonical: Some(self.base_url.clone()),
            open_graph: Some(OpenGraph {
                title: title.clone(),
                description: self.description.clone(),
                kind: OgType::Website,
                published_time: None,
                url: Some(self.base_url.clone()),
                site_name: Some(self.site_title.clone()),
                locale: Some(OG_LOCALE.to_string()),
                images: vec![self.default_image(&title)],
            }),
            twitter: Some(TwitterCard {
                card: TWITTER_CARD.to_string(),
                title,
                description: self.description.clone(),
                site: self.twitter.clone(),
                creator: self.twitter.clone(),
                images: vec![full_url_for(&self.base_url, DEFAULT_OG_IMAGE)],
            }),
        }
    }

    /// Article metadata derived from a post
    ///
    /// The description falls back from the excerpt to the title; the share
    /// image is only present when the post has a featured image.
    pub fn post(&self, post: &BlogPost) -> Metadata {
        let description = post.description().to_string();
        let url = full_url_for(&self.base_url, &post.path());
        let image = post
            .featured_image
            .as_deref()
            .map(|src| absolute_url(&self.base_url, src));

        Metadata {
            title: post.title.clone(),
            absolute_title: false,
            description: description.clone(),
            keywords: post.tags().to_vec(),
            canonical: Some(url.clone()),
            open_graph: Some(OpenGraph {
                title: post.title.clone(),
                description: description.clone(),
                kind: OgType::Article,
                published_time: Some(post.published_date.format("%Y-%m-%d").to_string()),
                url: Some(url),
                site_name: Some(self.site_title.clone()),
                locale: None,
                images: image
                    .iter()
                    .map(|src| OgImage {
                        url: src.clone(),
                        width: OG_IMAGE_WIDTH,
                        height: OG_IMAGE_HEIGHT,
                        alt: post.title.clone(),
                    })
                    .collect(),
            }),
            twitter: Some(TwitterCard {
                card: TWITTER_CARD.to_string(),
                title: post.title.clone(),
                description,
                site: self.twitter.clone(),
                creator: None,
                images: image.into_iter().collect(),
            }),
        }
    }

    pub fn not_found(&self) -> Metadata {
        Metadata::basic(NOT_FOUND_TITLE, NOT_FOUND_DESCRIPTION)
    }

    pub fn error(&self) -> Metadata {
        Metadata::basic(ERROR_TITLE, ERROR_DESCRIPTION)
    }

    /// Metadata for a post page from the outcome of its lookup
    pub fn for_lookup(&self, lookup: &Result<Option<BlogPost>, ContentError>) -> Metadata {
        match lookup {
            Ok(Some(post)) => self.post(post),
            Ok(None) => self.not_found(),
            Err(e) => {
                tracing::error!("Failed to build post metadata: {}", e);
                self.error()
            }
        }
    }

    pub fn blog_index(&self) -> Metadata {
        let description = "Insights on recycling technology, sustainability and Singapore's journey toward zero waste.";
        let mut meta = Metadata::basic("Blog", description);
        meta.canonical = Some(full_url_for(&self.base_url, "/blog"));
        meta.open_graph = Some(OpenGraph {
            title: format!("Blog - {}", self.site_title),
            description: description.to_string(),
            kind: OgType::Website,
            published_time: None,
            url: meta.canonical.clone(),
            site_name: Some(self.site_title.clone()),
            locale: Some(OG_LOCALE.to_string()),
            images: Vec::new(),
        });
        meta
    }

    pub fn contact(&self) -> Metadata {
        let title = format!("Contact Us - {}", self.site_title);
        let mut meta = Metadata::basic(
            &title,
            &format!(
                "Get in touch with {} for sustainable recycling solutions. Contact our team for quotes, partnerships, and support.",
                self.site_title
            ),
        );
        meta.absolute_title = true;
        meta.canonical = Some(full_url_for(&self.base_url, "/contact"));
        meta.open_graph = Some(OpenGraph {
            title,
            description: format!(
                "Ready to transform your waste management? Contact {} for innovative recycling solutions.",
                self.site_title
            ),
            kind: OgType::Website,
            published_time: None,
            url: meta.canonical.clone(),
            site_name: Some(self.site_title.clone()),
            locale: None,
            images: Vec::new(),
        });
        meta
    }

    /// schema.org Organization record embedded on every page
    pub fn organization(&self) -> Value {
        json!({
            "@context": "https://schema.org",
            "@type": "Organization",
            "name": self.site_title,
            "description": "Sustainable recycling solutions for Singapore businesses",
            "url": self.base_url,
            "logo": full_url_for(&self.base_url, "/images/logo.svg"),
            "areaServed": { "@type": "Country", "name": "Singapore" },
            "industry": "Environmental Technology",
            "contactPoint": {
                "@type": "ContactPoint",
                "telephone": "+65-6789-1234",
                "contactType": "Customer Service",
                "email": "hello@sgrecycle.com",
                "availableLanguage": ["English"]
            },
            "address": {
                "@type": "PostalAddress",
                "streetAddress": "123 Innovation Drive",
                "addressLocality": "Singapore Science Park",
                "postalCode": "138588",
                "addressCountry": "SG"
            }
        })
    }

    /// `<title>`, `<meta>` and `<link rel="canonical">` tags for `meta`
    pub fn to_html(&self, meta: &Metadata) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "<title>{}</title>\n",
            escape_html(&self.document_title(meta))
        ));
        push_meta(&mut out, "name", "description", &meta.description);
        if !meta.keywords.is_empty() {
            push_meta(&mut out, "name", "keywords", &meta.keywords.join(", "));
        }
        if let Some(canonical) = &meta.canonical {
            out.push_str(&format!(
                "<link rel=\"canonical\" href=\"{}\">\n",
                escape_html(canonical)
            ));
        }

        if let Some(og) = &meta.open_graph {
            push_meta(&mut out, "property", "og:title", &og.title);
            push_meta(&mut out, "property", "og:description", &og.description);
            push_meta(&mut out, "property", "og:type", og.kind.as_str());
            if let Some(url) = &og.url {
                push_meta(&mut out, "property", "og:url", url);
            }
            if let Some(site_name) = &og.site_name {
                push_meta(&mut out, "property", "og:site_name", site_name);
            }
            if let Some(locale) = &og.locale {
                push_meta(&mut out, "property", "og:locale", locale);
            }
            if let Some(published) = &og.published_time {
                push_meta(&mut out, "property", "article:published_time", published);
            }
            for image in &og.images {
                push_meta(&mut out, "property", "og:image", &image.url);
                push_meta(&mut out, "property", "og:image:width", &image.width.to_string());
                push_meta(&mut out, "property", "og:image:height", &image.height.to_string());
                push_meta(&mut out, "property", "og:image:alt", &image.alt);
            }
        }

        if let Some(card) = &meta.twitter {
            push_meta(&mut out, "name", "twitter:card", &card.card);
            push_meta(&mut out, "name", "twitter:title", &card.title);
            push_meta(&mut out, "name", "twitter:description", &card.description);
            if let Some(site) = &card.site {
                push_meta(&mut out, "name", "twitter:site", site);
            }
            if let Some(creator) = &card.creator {
                push_meta(&mut out, "name", "twitter:creator", creator);
            }
            for image in &card.images {
                push_meta(&mut out, "name", "twitter:image", image);
            }
        }

        out
    }
}

fn push_meta(out: &mut String, attr: &str, key: &str, content: &str) {
    out.push_str(&format!(
        "<meta {}=\"{}\" content=\"{}\">\n",
        attr,
        key,
        escape_html(content)
    ));
}
