//! End-to-end paging scenarios against an in-memory table. The store in
//! [`utils`] executes the same sort, resumption and window semantics a SQL
//! backend would, so every walk checks that consecutive pages partition the
//! table with no skipped or repeated rows.

pub mod utils;
