//! Offset paging: the cursor is a base64 row count.

use std::fmt;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use seekset_model::ordering::Orderings;

use crate::cursor::{decode_token, encode_token, Cursor};
use crate::error::{CursorError, PagerError};
use crate::pager::Pager;
use crate::query::QueryBuilder;

/// Position expressed as a number of rows to skip. Offset zero and the empty
/// token are the same position, so first-page requests need no cursor at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffsetCursor {
    offset: u64,
}

impl OffsetCursor {
    pub fn new(offset: u64) -> Self {
        OffsetCursor { offset }
    }

    /// Decodes a token produced by [`Cursor::encode`]; the empty token is
    /// the first page.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        if token.is_empty() {
            return Ok(OffsetCursor::default());
        }

        let payload = String::from_utf8(decode_token(token)?)?;
        Ok(OffsetCursor::new(payload.parse()?))
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl Cursor for OffsetCursor {
    fn encode(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        encode_token(self.offset.to_string().as_bytes())
    }

    fn is_empty(&self) -> bool {
        self.offset == 0
    }

    fn apply<Q: QueryBuilder>(&self, query: &mut Q) {
        if !self.is_empty() {
            query.set_skip(self.offset);
        }
    }

    // An offset is position-only; any ordering can carry it.
    fn validate(&self, _orderings: &Orderings) -> Result<(), CursorError> {
        Ok(())
    }
}

impl fmt::Display for OffsetCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for OffsetCursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for OffsetCursor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        OffsetCursor::decode(&token).map_err(de::Error::custom)
    }
}

impl Pager<OffsetCursor> {
    /// Trims a fetched row window to the page size and derives the cursor
    /// for the page after it, or `None` when this window was the last page.
    pub fn next_page<T>(
        &self,
        rows: Vec<T>,
    ) -> Result<(Vec<T>, Option<OffsetCursor>), PagerError> {
        self.validate()?;

        if self.is_last_page(&rows) {
            return Ok((rows, None));
        }

        let rows = self.trim_page(rows);
        let next = OffsetCursor::new(self.cursor().offset() + rows.len() as u64);

        Ok((rows, Some(next)))
    }
}
