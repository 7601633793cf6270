//! Cursor-based pagination
//!
//! Supports: opaque cursor tokens, RFC 8288 Link headers, stateless paging
//!
//! # Overview
//!
//! Pagination is a pure function of (collection snapshot, cursor, limit):
//! nothing is persisted server-side, so pages remain replayable and safe
//! under concurrent filtering and deletion. Cursors are issued per endpoint
//! (`kind` field) so a token from one collection cannot resume another.

mod cursor;
mod link;
mod page;

pub use cursor::Cursor;
pub use link::build_link_header;
pub use page::{paginate, Page};

/// Default number of items per page.
pub const DEFAULT_LIMIT: usize = 20;

/// Maximum number of items per page.
pub const MAX_LIMIT: usize = 100;
