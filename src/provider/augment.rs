//! Query augmentation for the post endpoints

use super::{Populate, Query};

/// Relations every post response carries: the featured image, the social
/// share image and the SEO component with its own image
pub fn post_populate() -> Populate {
    Populate::fields([
        ("featuredImage", Populate::leaf()),
        ("ogImage", Populate::leaf()),
        ("seo", Populate::fields([("metaImage", Populate::leaf())])),
    ])
}

/// Force the post relations into a query before it reaches the collection
///
/// Any caller-supplied `populate` is replaced wholesale, not merged field by
/// field. Filters, sort and pagination pass through untouched.
pub fn augment(mut query: Query) -> Query {
    query.populate = Some(post_populate());
    query
}
