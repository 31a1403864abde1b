//! Post loader - loads posts from `source/_posts`

use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Author, BlogPost, ContentError, FrontMatter, MarkdownRenderer};
use crate::helpers::{parse_date, strip_html};

/// Loads Markdown posts with YAML front-matter from a directory
pub struct PostLoader {
    posts_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl PostLoader {
    pub fn new<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load every post, ordered by file name
    ///
    /// File-name order is the canonical order featured posts are drawn from.
    /// Files that fail to parse are skipped with a warning.
    pub fn load_posts(&self) -> Result<Vec<BlogPost>, ContentError> {
        if !self.posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path) {
                    Ok(post) => posts.push(post),
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<BlogPost, ContentError> {
        let raw = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&raw)?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let title = fm.title.unwrap_or_else(|| stem.clone());
        let slug = fm
            .slug
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| slug::slugify(&stem));

        let published_date = match fm.date {
            Some(ref date) => {
                parse_date(date).ok_or_else(|| ContentError::InvalidDate(date.clone()))?
            }
            None => {
                let modified = fs::metadata(path)?.modified()?;
                chrono::DateTime::<Local>::from(modified).date_naive()
            }
        };

        let (excerpt_md, full_md) = MarkdownRenderer::split_excerpt(body);
        let content = self.renderer.render(&full_md);
        let excerpt = match fm.excerpt {
            Some(excerpt) => excerpt,
            None => excerpt_md
                .map(|md| strip_html(&self.renderer.render(&md)).trim().to_string())
                .unwrap_or_default(),
        };

        let author = fm.author.map(|name| Author {
            name,
            avatar: fm.author_avatar,
        });

        Ok(BlogPost {
            id: fm.id.unwrap_or_else(|| slug.clone()),
            title,
            slug,
            excerpt,
            content,
            featured_image: fm.featured_image,
            published_date,
            author,
            tags: fm.tags,
            reading_time: fm.reading_time,
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
