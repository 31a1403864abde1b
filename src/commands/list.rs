//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::{categories, format_date};
use crate::Site;

/// List site content by type
pub async fn run(site: &Site, content_type: &str) -> Result<()> {
    let api = site.content_api()?;

    match content_type {
        "post" | "posts" => {
            let posts = api.all_posts().await?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}] {} min",
                    format_date(&post.published_date.to_string())?,
                    post.title,
                    post.slug,
                    post.reading_time_minutes()
                );
            }
        }
        "slug" | "slugs" => {
            let slugs = api.all_slugs().await?;
            println!("Slugs ({}):", slugs.len());
            for slug in slugs {
                println!("  {}", slug);
            }
        }
        "tag" | "tags" => {
            let posts = api.all_posts().await?;
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for tag in posts.iter().flat_map(|p| p.tags()) {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
            let tags: Vec<_> = categories(&posts).into_iter().skip(1).collect();
            println!("Tags ({}):", tags.len());
            for tag in tags {
                println!("  {} ({})", tag, counts.get(tag.as_str()).copied().unwrap_or(0));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, slugs, tags",
                content_type
            );
        }
    }

    Ok(())
}
