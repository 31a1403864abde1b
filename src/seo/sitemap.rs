//! sitemap.xml generation

use chrono::{DateTime, Utc};

use crate::content::{BlogPost, ContentError};
use crate::helpers::{date_xml, escape_xml, full_url_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Weekly,
    Monthly,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

/// Top-level routes: path, change frequency, priority
const STATIC_ROUTES: &[(&str, ChangeFreq, f32)] = &[
    ("/", ChangeFreq::Monthly, 1.0),
    ("/contact", ChangeFreq::Monthly, 0.8),
    ("/blog", ChangeFreq::Weekly, 0.9),
];

const POST_PRIORITY: f32 = 0.7;

/// Entries for the static routes plus one per post
///
/// A failed post read still yields the static routes, with a warning so the
/// missing post pages do not go unnoticed.
pub fn build_sitemap(
    base_url: &str,
    posts: &Result<Vec<BlogPost>, ContentError>,
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let generated = date_xml(&now);
    let mut entries: Vec<SitemapEntry> = STATIC_ROUTES
        .iter()
        .map(|(path, changefreq, priority)| SitemapEntry {
            loc: full_url_for(base_url, path),
            lastmod: generated.clone(),
            changefreq: *changefreq,
            priority: *priority,
        })
        .collect();

    match posts {
        Ok(posts) if posts.is_empty() => {
            tracing::info!("No posts to add to the sitemap");
        }
        Ok(posts) => {
            entries.extend(posts.iter().map(|post| SitemapEntry {
                loc: full_url_for(base_url, &post.path()),
                lastmod: post.published_date.format("%Y-%m-%d").to_string(),
                changefreq: ChangeFreq::Monthly,
                priority: POST_PRIORITY,
            }));
        }
        Err(e) => {
            tracing::warn!(
                "Sitemap is missing blog posts, only static pages were written: {}",
                e
            );
        }
    }

    entries
}

pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.changefreq.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::placeholder_posts;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_static_and_post_entries() {
        let entries = build_sitemap("https://sgrecycle.com", &Ok(placeholder_posts()), now());
        assert_eq!(entries.len(), 6);

        assert_eq!(entries[0].loc, "https://sgrecycle.com");
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[1].loc, "https://sgrecycle.com/contact");
        assert_eq!(entries[1].priority, 0.8);
        assert_eq!(entries[2].loc, "https://sgrecycle.com/blog");
        assert_eq!(entries[2].priority, 0.9);
        assert_eq!(entries[2].changefreq, ChangeFreq::Weekly);
        assert_eq!(entries[0].lastmod, "2025-09-01T12:00:00+00:00");

        let post = &entries[3];
        assert_eq!(
            post.loc,
            "https://sgrecycle.com/blog/revolutionary-plastic-bottle-recycling-technology"
        );
        assert_eq!(post.lastmod, "2025-08-10");
        assert_eq!(post.priority, 0.7);
        assert_eq!(post.changefreq, ChangeFreq::Monthly);
    }

    #[test]
    fn test_failure_keeps_static_routes() {
        let failed = Err(ContentError::Status {
            status: 500,
            url: "http://cms/api/posts".to_string(),
        });
        let entries = build_sitemap("https://sgrecycle.com", &failed, now());
        assert_eq!(entries.len(), 3);

        let empty = build_sitemap("https://sgrecycle.com", &Ok(Vec::new()), now());
        assert_eq!(empty, entries);
    }

    #[test]
    fn test_render_xml() {
        let entries = build_sitemap("https://example.org", &Ok(placeholder_posts()), now());
        let xml = render_xml(&entries);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(xml.matches("<url>").count(), 6);
        assert!(xml.contains("<loc>https://example.org/contact</loc>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert!(xml.contains("<lastmod>2025-07-28</lastmod>"));
    }
}
