//! Defines the cursor abstraction shared by both paging strategies.
//!
//! A cursor names a position in a result set and travels between requests as
//! an opaque URL-safe token. [`OffsetCursor`](offset::OffsetCursor) counts
//! skipped rows; [`KeysetCursor`](keyset::KeysetCursor) records the sort-key
//! values of the last row seen.

pub mod keyset;
pub mod offset;

use base64::{engine::general_purpose, Engine as _};
use seekset_model::ordering::Orderings;

use crate::error::CursorError;
use crate::query::QueryBuilder;

/// A resumable position in a paged result set.
pub trait Cursor: Default {
    /// Serializes the cursor to its token form. The default cursor encodes
    /// to the empty string.
    fn encode(&self) -> String;

    /// True when the cursor carries no position, i.e. the first page.
    fn is_empty(&self) -> bool;

    /// Adds the cursor's resumption condition to a query. Empty cursors
    /// leave the query untouched.
    fn apply<Q: QueryBuilder>(&self, query: &mut Q);

    /// Checks the cursor against the orderings it will be paired with.
    fn validate(&self, orderings: &Orderings) -> Result<(), CursorError>;
}

pub(crate) fn encode_token(payload: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(payload)
}

pub(crate) fn decode_token(token: &str) -> Result<Vec<u8>, CursorError> {
    Ok(general_purpose::URL_SAFE_NO_PAD.decode(token)?)
}
