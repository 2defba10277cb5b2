//! The seam between the pager and whatever builds the final query.

use seekset_model::core::value::Value;
use seekset_model::ordering::Direction;

pub mod dialect;
pub mod select;

/// A rendered boolean condition: a clause with `?` placeholders and the
/// values bound to them, in order. Placeholder style is resolved by the
/// consuming builder when the full statement is rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFilter {
    pub clause: String,
    pub params: Vec<Value>,
}

impl SqlFilter {
    pub fn new(clause: impl Into<String>, params: Vec<Value>) -> Self {
        SqlFilter {
            clause: clause.into(),
            params,
        }
    }
}

/// Mutable query under construction. Pagination only ever appends: sort
/// terms, filter conditions and the row window. Nothing is read back.
pub trait QueryBuilder {
    /// Appends one ORDER BY term.
    fn push_sort(&mut self, column: &str, direction: Direction);

    /// Appends a WHERE condition; conditions combine with AND.
    fn push_filter(&mut self, filter: SqlFilter);

    /// Caps the number of returned rows.
    fn set_limit(&mut self, limit: u64);

    /// Skips rows ahead of the window.
    fn set_skip(&mut self, skip: u64);
}
