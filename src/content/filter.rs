//! Search and category filtering for the blog index

use serde::{Deserialize, Serialize};

use super::BlogPost;

/// Category that matches every post
pub const ALL_CATEGORY: &str = "All";

/// Blog index filter, as read from `?search=&category=`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFilter {
    pub search: String,
    pub category: String,
}

impl PostFilter {
    fn category(&self) -> &str {
        let category = self.category.trim();
        if category.is_empty() {
            ALL_CATEGORY
        } else {
            category
        }
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.category() != ALL_CATEGORY
    }

    /// Case-insensitive title/excerpt search, then category match
    pub fn matches(&self, post: &BlogPost) -> bool {
        let term = self.search.trim().to_lowercase();
        let search_ok = term.is_empty()
            || post.title.to_lowercase().contains(&term)
            || post.excerpt.to_lowercase().contains(&term);

        let category = self.category();
        search_ok && (category == ALL_CATEGORY || post.has_tag(category))
    }

    pub fn apply(&self, posts: Vec<BlogPost>) -> Vec<BlogPost> {
        posts.into_iter().filter(|p| self.matches(p)).collect()
    }

    /// e.g. `2 articles found for "plastic" in Recycling`
    pub fn summary(&self, count: usize) -> String {
        let mut out = format!(
            "{} article{} found",
            count,
            if count == 1 { "" } else { "s" }
        );
        let term = self.search.trim();
        if !term.is_empty() {
            out.push_str(&format!(" for \"{}\"", term));
        }
        let category = self.category();
        if category != ALL_CATEGORY {
            out.push_str(&format!(" in {}", category));
        }
        out
    }
}

/// "All" followed by every distinct tag, in first-seen order
pub fn categories(posts: &[BlogPost]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORY.to_string()];
    for tag in posts.iter().flat_map(|p| p.tags()) {
        if !out.contains(tag) {
            out.push(tag.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::placeholder_posts;

    fn filter(search: &str, category: &str) -> PostFilter {
        PostFilter {
            search: search.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_default_matches_everything() {
        let posts = placeholder_posts();
        assert_eq!(PostFilter::default().apply(posts.clone()).len(), posts.len());
        assert!(!PostFilter::default().is_active());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let found = filter("PLASTIC", "").apply(placeholder_posts());
        assert!(!found.is_empty());
        assert!(found
            .iter()
            .all(|p| p.title.to_lowercase().contains("plastic")
                || p.excerpt.to_lowercase().contains("plastic")));
    }

    #[test]
    fn test_untagged_post_only_in_all() {
        let mut posts = placeholder_posts();
        posts[0].tags = None;
        let tag = posts[1].tags()[0].clone();

        assert!(filter("", ALL_CATEGORY).matches(&posts[0]));
        assert!(!filter("", &tag).matches(&posts[0]));
        assert!(filter("", &tag).matches(&posts[1]));
    }

    #[test]
    fn test_categories_first_seen_unique() {
        let mut posts = placeholder_posts();
        posts[0].tags = Some(vec!["Recycling".to_string(), "Plastic".to_string()]);
        posts[1].tags = Some(vec!["Plastic".to_string(), "Singapore".to_string()]);
        posts[2].tags = None;
        assert_eq!(
            categories(&posts),
            vec!["All", "Recycling", "Plastic", "Singapore"]
        );
    }

    #[test]
    fn test_summary() {
        assert_eq!(filter("", "").summary(3), "3 articles found");
        assert_eq!(filter("x", "").summary(1), "1 article found for \"x\"");
        assert_eq!(
            filter(" x ", "Recycling").summary(2),
            "2 articles found for \"x\" in Recycling"
        );
    }
}
