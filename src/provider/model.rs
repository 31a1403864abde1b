//! Wire types of the Content Provider

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Document, FieldValue, Populate, ProviderError};
use crate::content::{Author, BlogPost, ContentError};
use crate::helpers::{absolute_url, parse_date, truncate_chars};

pub const META_TITLE_MAX: usize = 60;
pub const META_DESCRIPTION_MAX: usize = 160;

/// Share image dimensions recommended for Open Graph
pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

/// Response envelope of every read endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total: usize,
}

/// Error body returned alongside `data: null`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub name: String,
    pub message: String,
}

/// Uploaded media reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: u64,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

/// SEO component attached to a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub meta_title: String,
    pub meta_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_image: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default = "default_meta_robots")]
    pub meta_robots: String,
    #[serde(
        rename = "canonicalURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub canonical_url: Option<String>,
    #[serde(default = "default_meta_viewport")]
    pub meta_viewport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<Value>,
}

fn default_meta_robots() -> String {
    "index,follow".to_string()
}

fn default_meta_viewport() -> String {
    "width=device-width, initial-scale=1".to_string()
}

impl Seo {
    fn validate(&self) -> Result<(), ProviderError> {
        if self.meta_title.chars().count() > META_TITLE_MAX {
            return Err(ProviderError::Schema(format!(
                "seo.metaTitle exceeds {} characters",
                META_TITLE_MAX
            )));
        }
        if self.meta_description.chars().count() > META_DESCRIPTION_MAX {
            return Err(ProviderError::Schema(format!(
                "seo.metaDescription exceeds {} characters",
                META_DESCRIPTION_MAX
            )));
        }
        Ok(())
    }
}

/// A post document as stored and served by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPost {
    pub id: u64,
    pub document_id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    pub content: String,
    pub published_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
}

impl ProviderPost {
    /// Build the stored document for a post at `position` in canonical order
    pub fn from_blog_post(position: usize, post: &BlogPost) -> Self {
        let id = position as u64 + 1;
        let image = post.featured_image.as_ref().map(|url| Media {
            id,
            url: url.clone(),
            alternative_text: Some(post.title.clone()),
            width: Some(OG_IMAGE_WIDTH),
            height: Some(OG_IMAGE_HEIGHT),
            mime: None,
        });

        Self {
            id,
            document_id: post.id.clone(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            published_date: post.published_date.format("%Y-%m-%d").to_string(),
            author: post.author.clone(),
            tags: post.tags.clone(),
            reading_time: post.reading_time,
            featured_image: image.clone(),
            og_image: image.clone(),
            seo: Some(Seo {
                meta_title: truncate_chars(&post.title, META_TITLE_MAX),
                meta_description: truncate_chars(post.description(), META_DESCRIPTION_MAX),
                meta_image: image,
                keywords: post.tags.as_ref().map(|tags| tags.join(", ")),
                meta_robots: default_meta_robots(),
                canonical_url: None,
                meta_viewport: default_meta_viewport(),
                structured_data: None,
            }),
        }
    }

    /// Convert a served document back into a presentation post
    ///
    /// Relative media URLs are resolved against `media_base`.
    pub fn into_blog_post(self, media_base: &str) -> Result<BlogPost, ContentError> {
        let published_date = parse_date(&self.published_date)
            .ok_or_else(|| ContentError::InvalidDate(self.published_date.clone()))?;
        let id = if self.document_id.is_empty() {
            self.id.to_string()
        } else {
            self.document_id
        };

        Ok(BlogPost {
            id,
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            content: self.content,
            featured_image: self
                .featured_image
                .map(|media| absolute_url(media_base, &media.url)),
            published_date,
            author: self.author,
            tags: self.tags,
            reading_time: self.reading_time,
        })
    }
}

/// Provider documents for a post set, in canonical order
pub fn seed_from_posts(posts: &[BlogPost]) -> Vec<ProviderPost> {
    posts
        .iter()
        .enumerate()
        .map(|(i, post)| ProviderPost::from_blog_post(i, post))
        .collect()
}

impl Document for ProviderPost {
    const FIELDS: &'static [&'static str] =
        &["id", "documentId", "title", "slug", "publishedDate"];

    fn id(&self) -> u64 {
        self.id
    }

    fn document_id(&self) -> &str {
        &self.document_id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "documentId" => Some(FieldValue::Text(self.document_id.clone())),
            "title" => Some(FieldValue::Text(self.title.clone())),
            "slug" => Some(FieldValue::Text(self.slug.clone())),
            "publishedDate" => Some(FieldValue::Text(self.published_date.clone())),
            _ => None,
        }
    }

    fn project(&self, populate: Option<&Populate>) -> Self {
        let mut doc = self.clone();
        let relation = |field: &str| populate.and_then(|p| p.get(field));

        if relation("featuredImage").is_none() {
            doc.featured_image = None;
        }
        if relation("ogImage").is_none() {
            doc.og_image = None;
        }
        match relation("seo") {
            None => doc.seo = None,
            Some(nested) => {
                if let Some(seo) = doc.seo.as_mut() {
                    if !nested.includes("metaImage") {
                        seo.meta_image = None;
                    }
                }
            }
        }
        doc
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.title.trim().is_empty() {
            return Err(ProviderError::Schema(format!(
                "post {} has an empty title",
                self.id
            )));
        }
        if self.slug.trim().is_empty() {
            return Err(ProviderError::Schema(format!(
                "post {} has an empty slug",
                self.id
            )));
        }
        if parse_date(&self.published_date).is_none() {
            return Err(ProviderError::Schema(format!(
                "post {} has an invalid publishedDate `{}`",
                self.id, self.published_date
            )));
        }
        match &self.seo {
            Some(seo) => seo.validate(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::placeholder_posts;
    use crate::provider::post_populate;

    fn doc() -> ProviderPost {
        ProviderPost::from_blog_post(0, &placeholder_posts()[0])
    }

    #[test]
    fn test_from_blog_post() {
        let doc = doc();
        assert_eq!(doc.id, 1);
        assert_eq!(doc.document_id, "1");
        assert_eq!(doc.published_date, "2025-08-10");
        let seo = doc.seo.as_ref().unwrap();
        assert!(seo.meta_title.chars().count() <= META_TITLE_MAX);
        assert!(seo.meta_description.chars().count() <= META_DESCRIPTION_MAX);
        assert_eq!(seo.meta_robots, "index,follow");
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_project_without_populate_drops_relations() {
        let projected = doc().project(None);
        assert!(projected.featured_image.is_none());
        assert!(projected.og_image.is_none());
        assert!(projected.seo.is_none());

        let json = serde_json::to_value(&projected).unwrap();
        assert!(json.get("featuredImage").is_none());
        assert!(json.get("seo").is_none());
    }

    #[test]
    fn test_project_with_post_populate_keeps_everything() {
        let original = doc();
        assert_eq!(original.project(Some(&post_populate())), original);
    }

    #[test]
    fn test_project_star_is_one_level_deep() {
        let projected = doc().project(Some(&Populate::All));
        assert!(projected.featured_image.is_some());
        assert!(projected.og_image.is_some());
        let seo = projected.seo.unwrap();
        assert!(seo.meta_image.is_none());
    }

    #[test]
    fn test_seo_limits_enforced() {
        let mut doc = doc();
        doc.seo.as_mut().unwrap().meta_title = "x".repeat(61);
        assert!(matches!(doc.validate(), Err(ProviderError::Schema(_))));

        let mut doc = self::doc();
        doc.seo.as_mut().unwrap().meta_description = "x".repeat(161);
        assert!(matches!(doc.validate(), Err(ProviderError::Schema(_))));
    }

    #[test]
    fn test_into_blog_post_round_trip() {
        let post = placeholder_posts()[1].clone();
        let back = ProviderPost::from_blog_post(1, &post)
            .into_blog_post("https://cms.sgrecycle.com")
            .unwrap();
        assert_eq!(
            back.featured_image.as_deref(),
            Some("https://cms.sgrecycle.com/images/blog/singapore-zero-waste.jpg")
        );
        assert_eq!(back.id, post.id);
        assert_eq!(back.published_date, post.published_date);
        assert_eq!(back.tags, post.tags);
    }

    #[test]
    fn test_into_blog_post_bad_date() {
        let mut doc = doc();
        doc.published_date = "someday".to_string();
        assert!(matches!(
            doc.into_blog_post(""),
            Err(ContentError::InvalidDate(_))
        ));
    }
}
