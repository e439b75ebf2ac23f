//! Entity-tag headers for optimistic concurrency.
//!
//! Read a document with [`request_etag`] to learn its current tag, then write
//! it back with [`require_etag_match`]; the store rejects the write if the
//! document changed in between.

use crate::types::Headers;

/// Asks the store to return the document's entity tag.
pub const ETAG_REQUEST_HEADER: &str = "X-Firebase-ETag";
/// Carries the tag a conditional write expects.
pub const IF_MATCH_HEADER: &str = "if-match";
/// Response header holding the current tag.
pub const ETAG_HEADER: &str = "etag";

pub fn request_etag(headers: Headers) -> Headers {
    with_header(headers, ETAG_REQUEST_HEADER, "true")
}

pub fn require_etag_match(headers: Headers, etag: &str) -> Headers {
    with_header(headers, IF_MATCH_HEADER, etag)
}

fn with_header(mut headers: Headers, name: &str, value: &str) -> Headers {
    headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value.to_string());
    headers
}
