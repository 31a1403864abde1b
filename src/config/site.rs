//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Origin used when neither `SITE_URL` nor `url` is set
pub const DEFAULT_SITE_URL: &str = "https://sgrecycle.com";

/// Environment variable that overrides the configured origin
pub const SITE_URL_ENV: &str = "SITE_URL";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub keywords: Vec<String>,
    /// Twitter handle used for the card creator, e.g. `@sgrecycle`
    pub twitter: Option<String>,

    // URL
    pub url: String,

    // Directory
    pub public_dir: String,

    pub server: ServerConfig,
    pub content: ContentConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "SG Recycle".to_string(),
            description: "Innovative recycling machines and sustainable waste management solutions for a zero-waste Singapore.".to_string(),
            author: "SG Recycle".to_string(),
            language: "en".to_string(),
            keywords: vec![
                "recycling".to_string(),
                "Singapore".to_string(),
                "zero waste".to_string(),
                "recycling machines".to_string(),
                "sustainability".to_string(),
            ],
            twitter: Some("@sgrecycle".to_string()),

            url: String::new(),

            public_dir: "public".to_string(),

            server: ServerConfig::default(),
            content: ContentConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Site origin without a trailing slash: `SITE_URL`, then `url`, then
    /// [`DEFAULT_SITE_URL`]
    pub fn base_url(&self) -> String {
        resolve_base_url(std::env::var(SITE_URL_ENV).ok(), &self.url)
    }
}

/// Pick the first non-blank origin among the override and the configured url
pub fn resolve_base_url(env_override: Option<String>, configured: &str) -> String {
    let url = env_override
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| configured.to_string());
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        DEFAULT_SITE_URL.to_string()
    } else {
        url.to_string()
    }
}

/// `serve` defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

/// Backing store for posts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Posts directory, or the built-in placeholders when it is missing
    #[default]
    Static,
    /// A Content Provider reached over HTTP
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub source: SourceKind,
    /// Provider origin, e.g. `http://localhost:1337`
    pub api_url: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
    pub posts_dir: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Static,
            api_url: "http://localhost:1337".to_string(),
            api_token: None,
            timeout_secs: 10,
            posts_dir: "source/_posts".to_string(),
        }
    }
}

impl ContentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "SG Recycle");
        assert_eq!(config.content.source, SourceKind::Static);
        assert_eq!(config.content.timeout(), Duration::from_secs(10));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Site
url: https://example.org/
content:
  source: remote
  api_url: https://cms.example.org
  timeout_secs: 3
server:
  port: 8080
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Site");
        assert_eq!(config.content.source, SourceKind::Remote);
        assert_eq!(config.content.api_url, "https://cms.example.org");
        assert_eq!(config.content.timeout(), Duration::from_secs(3));
        assert_eq!(config.content.posts_dir, "source/_posts");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "localhost");
    }

    #[test]
    fn test_resolve_base_url() {
        assert_eq!(resolve_base_url(None, ""), DEFAULT_SITE_URL);
        assert_eq!(
            resolve_base_url(None, "https://example.org/"),
            "https://example.org"
        );
        assert_eq!(
            resolve_base_url(Some("https://staging.example.org".to_string()), "https://example.org"),
            "https://staging.example.org"
        );
        assert_eq!(
            resolve_base_url(Some("  ".to_string()), "https://example.org"),
            "https://example.org"
        );
    }
}
