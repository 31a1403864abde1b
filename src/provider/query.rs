//! Read-query model for the Content Provider
//!
//! Mirrors the query-string surface of a headless CMS collection endpoint:
//!
//! ```text
//! populate=*                      populate every relation one level deep
//! populate=featuredImage,seo      populate the named relations
//! populate[seo]=true              same, bracket form
//! filters[slug][$eq]=my-post      exact-match filter (filters[slug]=... also accepted)
//! sort=publishedDate:desc,id:asc  multi-key sort
//! pagination[page]=2              1-based page
//! pagination[pageSize]=10         page size, capped at MAX_PAGE_SIZE
//! ```

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

use super::ProviderError;

pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const MAX_PAGE_SIZE: usize = 100;

/// Inclusion specification: which relations to expand into a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Populate {
    /// Every relation, one level deep
    All,
    /// Named relations; an empty map is a leaf (`true`)
    Fields(IndexMap<String, Populate>),
}

impl Populate {
    /// A relation populated without nested relations
    pub fn leaf() -> Self {
        Populate::Fields(IndexMap::new())
    }

    pub fn fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Populate)>,
        K: Into<String>,
    {
        Populate::Fields(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Nested populate for `field`, or `None` when the field is not populated
    pub fn get(&self, field: &str) -> Option<Populate> {
        match self {
            Populate::All => Some(Populate::leaf()),
            Populate::Fields(map) => map.get(field).cloned(),
        }
    }

    pub fn includes(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Parse the value of a plain `populate=` parameter
    pub fn parse(raw: &str) -> Populate {
        let raw = raw.trim();
        if raw == "*" {
            return Populate::All;
        }
        Populate::fields(
            raw.split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(|f| (f, Populate::leaf())),
        )
    }

    /// CMS-style JSON rendering, e.g. `{"seo": {"populate": {"metaImage": true}}}`
    pub fn to_json(&self) -> Value {
        match self {
            Populate::All => json!("*"),
            Populate::Fields(map) => {
                let mut out = Map::new();
                for (field, nested) in map {
                    let value = match nested {
                        Populate::Fields(inner) if inner.is_empty() => Value::Bool(true),
                        other => json!({ "populate": other.to_json() }),
                    };
                    out.insert(field.clone(), value);
                }
                Value::Object(out)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    fn parse(raw: &str) -> Result<Sort, ProviderError> {
        let (field, order) = match raw.split_once(':') {
            Some((field, order)) => (field, order),
            None => (raw, "asc"),
        };
        let order = match order.to_ascii_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            other => {
                return Err(ProviderError::InvalidQuery(format!(
                    "unknown sort order `{}`",
                    other
                )))
            }
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(ProviderError::InvalidQuery("empty sort field".to_string()));
        }
        Ok(Sort {
            field: field.to_string(),
            order,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A read query against a collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub populate: Option<Populate>,
    /// Exact-match filters, field name to expected value
    pub filters: IndexMap<String, String>,
    pub sort: Vec<Sort>,
    pub pagination: Pagination,
}

impl Query {
    /// Build a query from decoded query-string parameters
    pub fn from_params(params: &HashMap<String, String>) -> Result<Query, ProviderError> {
        let mut query = Query::default();

        // Sorted for a deterministic populate/filter order
        let mut keys: Vec<&String> = params.keys().collect();
        keys.sort();

        for key in keys {
            let value = &params[key];
            if key == "populate" {
                query.populate = Some(Populate::parse(value));
            } else if let Some(rest) = key.strip_prefix("populate[") {
                let field = rest.trim_end_matches(']');
                if value == "false" {
                    continue;
                }
                let populate = query
                    .populate
                    .get_or_insert_with(|| Populate::Fields(IndexMap::new()));
                if let Populate::Fields(map) = populate {
                    map.insert(field.to_string(), Populate::leaf());
                }
            } else if let Some(rest) = key.strip_prefix("filters[") {
                let (field, operator) = parse_filter_key(rest)?;
                if operator != "$eq" {
                    return Err(ProviderError::InvalidQuery(format!(
                        "unsupported filter operator `{}`",
                        operator
                    )));
                }
                query.filters.insert(field, value.clone());
            } else if key == "sort" {
                query.sort = value
                    .split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(Sort::parse)
                    .collect::<Result<_, _>>()?;
            } else if key == "pagination[page]" {
                query.pagination.page = parse_number(key, value)?.max(1);
            } else if key == "pagination[pageSize]" {
                query.pagination.page_size = parse_number(key, value)?.clamp(1, MAX_PAGE_SIZE);
            }
        }

        Ok(query)
    }
}

/// Split `slug][$eq]` (the text after `filters[`) into field and operator
fn parse_filter_key(rest: &str) -> Result<(String, String), ProviderError> {
    let mut parts = rest.split("][").map(|p| p.trim_end_matches(']'));
    let field = parts
        .next()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| ProviderError::InvalidQuery("empty filter field".to_string()))?;
    let operator = parts.next().unwrap_or("$eq");
    if parts.next().is_some() {
        return Err(ProviderError::InvalidQuery(format!(
            "nested filter `{}` is not supported",
            rest
        )));
    }
    Ok((field.to_string(), operator.to_string()))
}

fn parse_number(key: &str, value: &str) -> Result<usize, ProviderError> {
    value
        .trim()
        .parse()
        .map_err(|_| ProviderError::InvalidQuery(format!("`{}` must be a number", key)))
}
