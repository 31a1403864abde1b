//! Built-in site templates using Tera template engine
//!
//! All templates are embedded directly in the binary. Values are
//! HTML-escaped; post bodies and the generated `<head>` tags are marked
//! `safe` in the templates.

use anyhow::Result;
use chrono::{Datelike, Local};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::contact::{ContactFormState, Subject};
use crate::content::{BlogPost, PostFilter};
use crate::helpers::{full_date, full_url_for, share_url, truncate_chars, SharePlatform};
use crate::seo::{Metadata, SiteMeta};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("post_card.html", include_str!("site/post_card.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog_list.html", include_str!("site/blog_list.html")),
            ("blog_post.html", include_str!("site/blog_post.html")),
            ("contact.html", include_str!("site/contact.html")),
            ("not_found.html", include_str!("site/not_found.html")),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    Ok(tera::Value::String(truncate_chars(&s, length)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub language: String,
    pub base_url: String,
    pub year: i32,
}

impl SiteData {
    pub fn new(title: &str, description: &str, language: &str, base_url: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            language: language.to_string(),
            base_url: base_url.to_string(),
            year: Local::now().year(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareLink {
    pub label: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub title: String,
    pub path: String,
    pub url: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub date: String,
    pub date_iso: String,
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
    pub tags: Vec<String>,
    pub reading_time: u32,
    pub share: Vec<ShareLink>,
}

impl PostData {
    pub fn new(post: &BlogPost, base_url: &str) -> Self {
        let url = full_url_for(base_url, &post.path());
        let share = SharePlatform::ALL
            .into_iter()
            .map(|platform| ShareLink {
                label: platform.label(),
                url: share_url(platform, &url, &post.title, post.description()),
            })
            .collect();

        Self {
            title: post.title.clone(),
            path: post.path(),
            url,
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            featured_image: post.featured_image.clone(),
            date: full_date(&post.published_date),
            date_iso: post.published_date.format("%Y-%m-%d").to_string(),
            author_name: post.author.as_ref().map(|a| a.name.clone()),
            author_avatar: post.author.as_ref().and_then(|a| a.avatar.clone()),
            tags: post.tags().to_vec(),
            reading_time: post.reading_time_minutes(),
            share,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct SubjectOption {
    value: &'static str,
    label: &'static str,
}

/// Renders full pages: shared layout data plus per-page context
pub struct Pages {
    renderer: TemplateRenderer,
    meta: SiteMeta,
    site: SiteData,
}

impl Pages {
    pub fn new(meta: SiteMeta, site: SiteData) -> Result<Self> {
        Ok(Self {
            renderer: TemplateRenderer::new()?,
            meta,
            site,
        })
    }

    pub fn meta(&self) -> &SiteMeta {
        &self.meta
    }

    fn post_data(&self, posts: &[BlogPost]) -> Vec<PostData> {
        posts
            .iter()
            .map(|p| PostData::new(p, &self.site.base_url))
            .collect()
    }

    fn base_context(&self, metadata: &Metadata) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert("head", &self.meta.to_html(metadata));
        context.insert("json_ld", &self.meta.organization().to_string());
        context
    }

    pub fn home(&self, featured: &[BlogPost]) -> Result<String> {
        let mut context = self.base_context(&self.meta.site_defaults());
        context.insert("featured", &self.post_data(featured));
        self.renderer.render("home.html", &context)
    }

    /// Blog index; `all` feeds the category list, `posts` is the filtered view
    pub fn blog_list(
        &self,
        all: &[BlogPost],
        posts: &[BlogPost],
        filter: &PostFilter,
    ) -> Result<String> {
        let mut context = self.base_context(&self.meta.blog_index());
        let active = if filter.category.trim().is_empty() {
            crate::content::ALL_CATEGORY.to_string()
        } else {
            filter.category.trim().to_string()
        };
        context.insert("posts", &self.post_data(posts));
        context.insert("categories", &crate::content::categories(all));
        context.insert("active_category", &active);
        context.insert("filter", filter);
        context.insert("filter_active", &filter.is_active());
        context.insert("summary", &filter.summary(posts.len()));
        self.renderer.render("blog_list.html", &context)
    }

    pub fn blog_post(&self, post: &BlogPost, related: &[BlogPost]) -> Result<String> {
        let mut context = self.base_context(&self.meta.post(post));
        context.insert("post", &PostData::new(post, &self.site.base_url));
        context.insert("related", &self.post_data(related));
        self.renderer.render("blog_post.html", &context)
    }

    pub fn contact(&self, state: &ContactFormState) -> Result<String> {
        let mut context = self.base_context(&self.meta.contact());
        let subjects: Vec<SubjectOption> = Subject::ALL
            .into_iter()
            .map(|s| SubjectOption {
                value: s.value(),
                label: s.label(),
            })
            .collect();
        context.insert("form", &state.form);
        context.insert("errors", &state.errors);
        context.insert("submitted", &state.submitted);
        context.insert("subjects", &subjects);
        self.renderer.render("contact.html", &context)
    }

    /// Error page for a missing post or a failed load, with matching metadata
    pub fn not_found(&self, metadata: &Metadata) -> Result<String> {
        let mut context = self.base_context(metadata);
        context.insert("heading", &metadata.title);
        context.insert("message", &metadata.description);
        self.renderer.render("not_found.html", &context)
    }
}
