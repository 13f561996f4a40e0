//! Substring matching over the archive records.
//!
//! Only the needle is lower-cased. Titles and urls are compared as stored, so
//! `"Hel"` in a title never matches the needle `"hel"`; a record is usually
//! found through its (already lower-case) url instead. Published archive pages
//! depend on this exact behaviour, so it is kept as is.

use super::resources::SearchResource;

/// Inputs this long or shorter clear the results instead of searching.
pub const QUERY_LENGTH_THRESHOLD: usize = 2;

/// Records whose title or url contains the lower-cased needle, in input order.
pub fn search_for<'a>(resources: &'a [SearchResource], needle: &str) -> Vec<&'a SearchResource> {
    let needle = needle.to_lowercase();
    resources
        .iter()
        .filter(|resource| matches(resource, &needle))
        .collect()
}

fn matches(resource: &SearchResource, lowered_needle: &str) -> bool {
    resource.title.contains(lowered_needle) || resource.url.contains(lowered_needle)
}

/// Length of an input value as the browser reports it (UTF-16 code units).
pub fn query_length(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Whether a typed value is long enough to trigger a search.
pub fn passes_length_gate(value: &str) -> bool {
    query_length(value) > QUERY_LENGTH_THRESHOLD
}
