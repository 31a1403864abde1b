//! Search-engine outputs: page metadata, sitemap and robots policy

mod metadata;
mod robots;
mod sitemap;

pub use metadata::{
    Metadata, OgImage, OgType, OpenGraph, SiteMeta, TwitterCard, ERROR_DESCRIPTION, ERROR_TITLE,
    NOT_FOUND_DESCRIPTION, NOT_FOUND_TITLE,
};
pub use robots::{RobotsPolicy, DISALLOWED};
pub use sitemap::{build_sitemap, render_xml, ChangeFreq, SitemapEntry};
