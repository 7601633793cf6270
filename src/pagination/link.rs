//! RFC 8288 Link header construction
//!
//! Builds `<uri>; rel="next"` / `<uri>; rel="prev"` entries for page
//! navigation. URIs are the listing's base path plus the caller's preserved
//! filter parameters and a `cursor` parameter holding the opaque token.

use url::form_urlencoded;

/// Build an RFC 8288 Link header value for the given cursors.
///
/// Query pairs are preserved in order, including repeated keys; any
/// pre-existing `cursor` parameter is replaced rather than duplicated.
/// Returns an empty string when neither cursor is present.
pub fn build_link_header(
    base_path: &str,
    query: &[(String, String)],
    next_cursor: &str,
    prev_cursor: &str,
) -> String {
    let mut links = Vec::with_capacity(2);
    if !next_cursor.is_empty() {
        links.push(format!(
            "<{}>; rel=\"next\"",
            page_url(base_path, query, next_cursor)
        ));
    }
    if !prev_cursor.is_empty() {
        links.push(format!(
            "<{}>; rel=\"prev\"",
            page_url(base_path, query, prev_cursor)
        ));
    }
    links.join(", ")
}

/// Join a base path with the preserved query plus a `cursor` parameter.
fn page_url(base_path: &str, query: &[(String, String)], cursor: &str) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in query {
        if key == "cursor" {
            continue;
        }
        serializer.append_pair(key, value);
    }
    serializer.append_pair("cursor", cursor);
    let encoded = serializer.finish();

    if encoded.is_empty() {
        base_path.to_string()
    } else {
        format!("{base_path}?{encoded}")
    }
}
