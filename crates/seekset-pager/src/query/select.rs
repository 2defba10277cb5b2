use crate::query::dialect::Dialect;
use crate::query::{QueryBuilder, SqlFilter};
use seekset_model::core::value::Value;
use seekset_model::ordering::{Direction, OrderBy, Orderings};

/// Minimal SELECT builder implementing [`QueryBuilder`] — the reference
/// collaborator exercised by the tests. Filters are kept as `?`-placeholder
/// fragments; `to_sql` renumbers them for the target dialect.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: String,
    columns: Vec<String>,
    filters: Vec<SqlFilter>,
    sort: Orderings,
    limit: Option<u64>,
    skip: Option<u64>,
}

impl SelectQuery {
    pub fn new(table: impl Into<String>) -> Self {
        SelectQuery {
            table: table.into(),
            columns: Vec::new(),
            filters: Vec::new(),
            sort: Orderings::new(),
            limit: None,
            skip: None,
        }
    }

    /// Adds a projected column; with none registered, `*` is selected.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Adds a hand-written condition ahead of pagination.
    pub fn filter(mut self, filter: SqlFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Renders `SELECT … FROM … [WHERE …] [ORDER BY …] [LIMIT n] [OFFSET m]`
    /// with dialect placeholders and the bound parameters in order.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> (String, Vec<Value>) {
        let mut sql = String::from("SELECT ");
        let mut params = Vec::new();

        if self.columns.is_empty() {
            sql.push('*');
        } else {
            let columns: Vec<String> = self
                .columns
                .iter()
                .map(|column| dialect.quote_identifier(column))
                .collect();
            sql.push_str(&columns.join(", "));
        }

        sql.push_str(" FROM ");
        sql.push_str(&dialect.quote_identifier(&self.table));

        for (i, filter) in self.filters.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            push_renumbered(&mut sql, filter, &mut params, dialect);
        }

        if !self.sort.is_empty() {
            sql.push_str(" ORDER BY ");
            // Sort columns may be qualified or pre-quoted; they render as-is.
            sql.push_str(&self.sort.to_sql());
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        if let Some(skip) = self.skip {
            sql.push_str(&format!(" OFFSET {skip}"));
        }

        (sql, params)
    }
}

// Appends a filter fragment, replacing each `?` with the dialect placeholder
// for the next parameter position and moving its value into `params`.
fn push_renumbered(
    sql: &mut String,
    filter: &SqlFilter,
    params: &mut Vec<Value>,
    dialect: &dyn Dialect,
) {
    let mut values = filter.params.iter();

    for ch in filter.clause.chars() {
        match ch {
            '?' => {
                if let Some(value) = values.next() {
                    params.push(value.clone());
                    sql.push_str(&dialect.get_placeholder(params.len() - 1));
                } else {
                    sql.push(ch);
                }
            }
            _ => sql.push(ch),
        }
    }
}

impl QueryBuilder for SelectQuery {
    fn push_sort(&mut self, column: &str, direction: Direction) {
        self.sort.push(OrderBy::new(column, direction));
    }

    fn push_filter(&mut self, filter: SqlFilter) {
        self.filters.push(filter);
    }

    fn set_limit(&mut self, limit: u64) {
        self.limit = Some(limit);
    }

    fn set_skip(&mut self, skip: u64) {
        self.skip = Some(skip);
    }
}
