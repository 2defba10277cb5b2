//! Cursor ("seek-method") pagination engine for SQL query builders.
//!
//! Two interchangeable strategies: [`cursor::keyset::KeysetCursor`] resumes
//! after the last row of the previous page through a keyset filter, and
//! [`cursor::offset::OffsetCursor`] is a compatibility layer over
//! LIMIT/OFFSET. [`pager::Pager`] orchestrates validation, ordering,
//! filtering and limits against any [`query::QueryBuilder`].

pub mod cursor;
pub mod error;
pub mod macros;
pub mod pager;
pub mod query;

mod filter;
