//! Opaque cursor codec
//!
//! A cursor names the collection that issued it (`kind`) and the identifier
//! of the last item the client saw (`value`). The two are joined with a
//! colon and base64url-encoded without padding so the token is safe in a
//! query string. `value` may contain any bytes, including further colons:
//! decoding splits on the first colon only.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::error::{Error, Result};

const SEPARATOR: char = ':';

/// Position marker for resuming a paginated listing.
///
/// The zero value (both fields empty) means "start of collection".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Logical name of the paginated resource that issued the cursor.
    pub kind: String,
    /// Identifier of the last item seen.
    pub value: String,
}

impl Cursor {
    /// Create a cursor for the given resource and item identifier.
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Whether this is the start-of-collection sentinel.
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty() && self.value.is_empty()
    }

    /// Serialize the cursor into an opaque URL-safe token.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(format!("{}{}{}", self.kind, SEPARATOR, self.value))
    }

    /// Decode an opaque token back into a cursor.
    ///
    /// An empty token is the "first page" sentinel and decodes to the zero
    /// cursor. Any token that is not valid base64url, not valid UTF-8, or
    /// lacks the type/value separator yields [`Error::InvalidCursor`].
    pub fn decode(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Ok(Self::default());
        }

        let raw = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| Error::InvalidCursor)?;
        let decoded = String::from_utf8(raw).map_err(|_| Error::InvalidCursor)?;

        let (kind, value) = decoded.split_once(SEPARATOR).ok_or(Error::InvalidCursor)?;
        Ok(Self {
            kind: kind.to_string(),
            value: value.to_string(),
        })
    }

    /// Check that a decoded cursor belongs to the expected resource.
    ///
    /// The zero cursor passes: it carries no origin to mismatch.
    pub fn expect_kind(&self, expected: &str) -> Result<()> {
        if !self.kind.is_empty() && self.kind != expected {
            return Err(Error::cursor_type_mismatch(expected, self.kind.clone()));
        }
        Ok(())
    }
}
