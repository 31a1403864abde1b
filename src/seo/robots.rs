//! robots.txt policy

use crate::helpers::full_url_for;

/// Path prefixes crawlers are asked to skip
pub const DISALLOWED: &[&str] = &["/admin/", "/api/private/", "/_next/"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsPolicy {
    pub user_agent: String,
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
    pub sitemap: String,
}

impl RobotsPolicy {
    /// Allow everything except the internal prefixes, pointing at the sitemap
    pub fn for_site(base_url: &str) -> Self {
        Self {
            user_agent: "*".to_string(),
            allow: vec!["/".to_string()],
            disallow: DISALLOWED.iter().map(|p| p.to_string()).collect(),
            sitemap: full_url_for(base_url, "/sitemap.xml"),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("User-agent: {}\n", self.user_agent);
        for path in &self.allow {
            out.push_str(&format!("Allow: {}\n", path));
        }
        for path in &self.disallow {
            out.push_str(&format!("Disallow: {}\n", path));
        }
        out.push('\n');
        out.push_str(&format!("Sitemap: {}\n", self.sitemap));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_text() {
        let text = RobotsPolicy::for_site("https://sgrecycle.com/").to_text();
        assert_eq!(
            text,
            "User-agent: *\n\
             Allow: /\n\
             Disallow: /admin/\n\
             Disallow: /api/private/\n\
             Disallow: /_next/\n\
             \n\
             Sitemap: https://sgrecycle.com/sitemap.xml\n"
        );
    }
}
