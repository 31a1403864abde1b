//! Blog post model

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::helpers::{count_words, parse_date};

/// Reading speed used for the "N min read" label
pub const WORDS_PER_MINUTE: usize = 200;

/// A blog post as seen by presentation code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Opaque identifier, stable for the post's lifetime
    pub id: String,

    /// Display title
    pub title: String,

    /// URL-safe lookup key, unique across posts
    pub slug: String,

    /// Short summary, also the fallback SEO description
    #[serde(default)]
    pub excerpt: String,

    /// Raw HTML body; author-controlled and rendered unescaped
    pub content: String,

    /// External image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,

    /// Publication date, used for display and ordering
    #[serde(deserialize_with = "deserialize_published_date")]
    pub published_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    /// Category tags; absent tags only match the "All" category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Precomputed reading time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
}

/// Embedded author value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl BlogPost {
    /// Tags as a slice, empty when the post has none
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }

    /// Site-relative URL path of the post page
    pub fn path(&self) -> String {
        format!("/blog/{}", self.slug)
    }

    /// Excerpt, or the title when the excerpt is empty
    pub fn description(&self) -> &str {
        if self.excerpt.trim().is_empty() {
            &self.title
        } else {
            &self.excerpt
        }
    }

    /// Precomputed reading time, derived from the content when absent
    pub fn reading_time_minutes(&self) -> u32 {
        self.reading_time
            .unwrap_or_else(|| reading_time(&self.content))
    }
}

/// Estimate reading time in minutes
///
/// Markup is stripped before counting words. The result is rounded up and
/// never drops below one minute, so empty content still reads as "1 min".
pub fn reading_time(content: &str) -> u32 {
    let words = count_words(content);
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Whether `slug` can be used as a single URL path segment
///
/// Only ASCII letters, digits, `-` and `_` are accepted, so a slug can never
/// name a parent directory or span several segments.
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn deserialize_published_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid publishedDate `{}`", raw)))
}
