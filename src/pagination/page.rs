//! Page computation over an ordered collection snapshot
//!
//! [`paginate`] is pure and allocation-only: it never re-sorts the input,
//! performs no I/O, and holds no state between calls, so it is safe to call
//! from any number of request handlers concurrently.

use super::cursor::Cursor;
use super::link::build_link_header;

/// One page of a listing plus the navigation state to reach its neighbours.
#[derive(Debug, Clone, Default)]
pub struct Page<T> {
    /// Items visible on this page.
    pub items: Vec<T>,
    /// Size of the filtered collection before pagination.
    pub total: usize,
    /// Opaque token for the next page, empty on the last page.
    pub next_cursor: String,
    /// Opaque token for the previous page, empty on the first page.
    pub prev_cursor: String,
    /// RFC 8288 Link header value, empty when there is nothing to link.
    pub link_header: String,
}

/// Compute the page of `items` identified by `cursor`.
///
/// `items` must already be filtered and in the collection's natural order;
/// `limit` is assumed validated upstream. A cursor value that no longer
/// matches any item restarts at the beginning rather than erroring; callers
/// wanting strict validation must check membership before calling.
///
/// The previous-page cursor names the item just before the predecessor
/// page's start, so replaying it lands on that page rather than this one.
/// On page two that is the cursor with an empty value, meaning "go to page
/// one".
pub fn paginate<T, F>(
    items: &[T],
    cursor: &Cursor,
    limit: usize,
    cursor_kind: &str,
    id_of: F,
    base_path: &str,
    query: &[(String, String)],
) -> Page<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    let start = if cursor.value.is_empty() {
        0
    } else {
        items
            .iter()
            .position(|item| id_of(item) == cursor.value)
            .map_or(0, |idx| idx + 1)
    };

    let page_items: Vec<T> = items.iter().skip(start).take(limit).cloned().collect();
    let end = start + page_items.len();

    let next_cursor = if !page_items.is_empty() && end < items.len() {
        Cursor::new(cursor_kind, id_of(&items[end - 1])).encode()
    } else {
        String::new()
    };

    let prev_cursor = if start == 0 {
        String::new()
    } else if start <= limit {
        // Page two: the predecessor is page one, reached with an empty value.
        Cursor::new(cursor_kind, "").encode()
    } else {
        // Name the item just before the predecessor page so replaying the
        // cursor lands at that page's start.
        Cursor::new(cursor_kind, id_of(&items[start - limit - 1])).encode()
    };

    let link_header = build_link_header(base_path, query, &next_cursor, &prev_cursor);

    Page {
        items: page_items,
        total: items.len(),
        next_cursor,
        prev_cursor,
        link_header,
    }
}
