//! Defines the pager: page size, orderings, lookahead and the cursor,
//! assembled into query mutations and page-boundary decisions.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use seekset_model::ordering::{OrderBy, Orderings};
use seekset_model::pagination::limit::{clamp, clamp_default, MAX_LIMIT, NO_LIMIT};

use crate::cursor::keyset::KeysetCursor;
use crate::cursor::offset::OffsetCursor;
use crate::cursor::Cursor;
use crate::error::{CursorError, PagerError};
use crate::query::QueryBuilder;

/// One paging pass over a query: applies the sort, the cursor's resumption
/// condition and the row window, then judges the fetched rows.
///
/// With lookahead enabled the pager fetches one row beyond the page size;
/// whether that extra row arrives decides last-page detection without a
/// second query, and [`next_page`](Pager::next_page) trims it off.
#[derive(Debug, Clone)]
pub struct Pager<C> {
    lookahead: bool,
    limit: Option<u64>,
    cursor: C,
    sort: Orderings,
}

impl<C: Default> Default for Pager<C> {
    fn default() -> Self {
        // An unconfigured pager fetches nothing rather than everything.
        Pager {
            lookahead: false,
            limit: Some(0),
            cursor: C::default(),
            sort: Orderings::new(),
        }
    }
}

impl<C: Cursor> Pager<C> {
    pub fn new() -> Self {
        Pager::default()
    }

    /// Fetches one row beyond the page size to detect the last page.
    /// Requires a limit; [`validate`](Pager::validate) rejects the
    /// combination with unlimited paging.
    pub fn with_lookahead(mut self) -> Self {
        self.lookahead = true;
        self
    }

    /// Removes the row window entirely.
    pub fn with_unlimited(mut self) -> Self {
        self.limit = None;
        self
    }

    /// Sets the page size. [`NO_LIMIT`] switches to unlimited paging; any
    /// other value is normalized against the system cap.
    pub fn with_limit(mut self, limit: i64) -> Self {
        if limit == NO_LIMIT {
            return self.with_unlimited();
        }

        self.limit = Some(clamp_default(limit));
        self
    }

    pub fn with_cursor(mut self, cursor: C) -> Self {
        self.cursor = cursor;
        self
    }

    /// Appends sort terms, keeping at most one term per column: re-sorting
    /// a column moves it to the end with the new direction.
    pub fn with_sort(mut self, sort: impl IntoIterator<Item = OrderBy>) -> Self {
        for order in sort {
            self.sort.push(order);
        }
        self
    }

    /// Replaces the sort wholesale.
    pub fn with_replaced_sort(mut self, sort: impl IntoIterator<Item = OrderBy>) -> Self {
        self.sort = sort.into_iter().collect();
        self
    }

    pub fn sort(&self) -> &Orderings {
        &self.sort
    }

    pub fn cursor(&self) -> &C {
        &self.cursor
    }

    pub fn is_lookahead(&self) -> bool {
        self.lookahead
    }

    pub fn is_unlimited(&self) -> bool {
        self.limit.is_none()
    }

    /// The configured page size, or [`NO_LIMIT`] under unlimited paging.
    pub fn limit(&self) -> i64 {
        match self.limit {
            Some(limit) => limit as i64,
            None => NO_LIMIT,
        }
    }

    /// The number of rows a paging pass actually requests: the page size
    /// plus the lookahead row.
    pub fn fetch_limit(&self) -> i64 {
        self.limit() + i64::from(self.lookahead)
    }

    /// Checks the pager configuration and the cursor against the sort.
    /// Every paging entry point validates before touching anything.
    pub fn validate(&self) -> Result<(), PagerError> {
        if self.lookahead && self.limit.is_none() {
            return Err(PagerError::LookaheadRequiresLimit);
        }

        self.sort.validate()?;
        self.cursor.validate(&self.sort)?;

        Ok(())
    }

    /// Applies sort, cursor condition and row window to a query, in that
    /// order. The query is untouched when validation fails.
    pub fn paginate<Q: QueryBuilder>(&self, query: &mut Q) -> Result<(), PagerError> {
        self.validate()?;

        for order in &self.sort {
            query.push_sort(&order.column, order.direction);
        }

        self.cursor.apply(query);

        if let Some(limit) = self.limit {
            query.set_limit(limit + u64::from(self.lookahead));
        }

        debug!(
            sort = %self.sort.to_sql(),
            limit = self.fetch_limit(),
            lookahead = self.lookahead,
            "Applied pagination"
        );

        Ok(())
    }

    /// Judges a fetched row window. Under lookahead the page is final when
    /// the extra row failed to arrive; otherwise a short window is final.
    /// Unlimited paging never reports a last page.
    pub fn is_last_page<T>(&self, rows: &[T]) -> bool {
        let Some(limit) = self.limit else {
            return false;
        };

        (rows.len() as u64) < limit || (self.lookahead && rows.len() as u64 <= limit)
    }

    // Drops the lookahead row. Callers only trim windows that already
    // failed the last-page check, so the extra row is present.
    pub(crate) fn trim_page<T>(&self, mut rows: Vec<T>) -> Vec<T> {
        if self.lookahead {
            rows.pop();
        }

        rows
    }
}

/// Page parameters as they arrive on the wire: a requested size and the
/// token from the previous response. Decoding pairs them with the orderings
/// the endpoint serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageRequest {
    pub limit: i64,
    #[serde(default)]
    pub start_token: String,
}

impl RawPageRequest {
    pub fn new(limit: i64, start_token: impl Into<String>) -> Self {
        RawPageRequest {
            limit,
            start_token: start_token.into(),
        }
    }

    /// Decodes the start token as a keyset cursor and assembles the pager.
    pub fn decode(&self, sort: Orderings) -> Result<Pager<KeysetCursor>, CursorError> {
        let cursor = KeysetCursor::decode(&self.start_token)?;
        Ok(self.pager_with(cursor, sort))
    }

    /// Decodes the start token as an offset cursor and assembles the pager.
    pub fn decode_offset(&self, sort: Orderings) -> Result<Pager<OffsetCursor>, CursorError> {
        let cursor = OffsetCursor::decode(&self.start_token)?;
        Ok(self.pager_with(cursor, sort))
    }

    fn pager_with<C: Cursor>(&self, cursor: C, sort: Orderings) -> Pager<C> {
        if self.limit != NO_LIMIT {
            let (effective, unchanged) = clamp(self.limit, MAX_LIMIT);
            if !unchanged {
                warn!(
                    requested = self.limit,
                    effective, "Requested page size normalized"
                );
            }
        }

        Pager::new()
            .with_cursor(cursor)
            .with_replaced_sort(sort)
            .with_limit(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::dialect::Postgres;
    use crate::query::select::SelectQuery;
    use seekset_model::core::value::Value;
    use seekset_model::ordering::operator::Operator;
    use seekset_model::pagination::element::CursorElement;
    use seekset_model::pagination::limit::DEFAULT_LIMIT;

    #[test]
    fn unconfigured_pager_fetches_nothing() {
        let pager = Pager::<OffsetCursor>::new().with_sort([OrderBy::asc("id")]);

        let mut query = SelectQuery::new("users");
        pager.paginate(&mut query).unwrap();

        let (sql, _) = query.to_sql(&Postgres);
        assert_eq!(sql, r#"SELECT * FROM "users" ORDER BY id ASC LIMIT 0"#);
    }

    #[test]
    fn limits_are_normalized_on_the_way_in() {
        let pager = Pager::<OffsetCursor>::new().with_limit(0);
        assert_eq!(pager.limit(), DEFAULT_LIMIT as i64);

        let pager = Pager::<OffsetCursor>::new().with_limit(500);
        assert_eq!(pager.limit(), MAX_LIMIT as i64);

        let pager = Pager::<OffsetCursor>::new().with_limit(NO_LIMIT);
        assert!(pager.is_unlimited());
        assert_eq!(pager.limit(), NO_LIMIT);
    }

    #[test]
    fn fetch_limit_includes_the_lookahead_row() {
        let pager = Pager::<OffsetCursor>::new().with_limit(10);
        assert_eq!(pager.fetch_limit(), 10);

        let pager = pager.with_lookahead();
        assert_eq!(pager.fetch_limit(), 11);
    }

    #[test]
    fn paginate_applies_sort_cursor_and_window() {
        let cursor = KeysetCursor::new(vec![CursorElement::new(
            "id",
            Value::Int(1),
            Operator::GreaterThan,
        )]);
        let pager = Pager::new()
            .with_sort([OrderBy::asc("id")])
            .with_limit(10)
            .with_lookahead()
            .with_cursor(cursor);

        let mut query = SelectQuery::new("users");
        pager.paginate(&mut query).unwrap();

        let (sql, params) = query.to_sql(&Postgres);
        assert_eq!(
            sql,
            r#"SELECT * FROM "users" WHERE ((id > $1)) ORDER BY id ASC LIMIT 11"#
        );
        assert_eq!(params, vec![Value::Int(1)]);
    }

    #[test]
    fn unlimited_pagers_set_no_window() {
        let pager = Pager::<OffsetCursor>::new()
            .with_sort([OrderBy::asc("id")])
            .with_unlimited();

        let mut query = SelectQuery::new("users");
        pager.paginate(&mut query).unwrap();

        let (sql, _) = query.to_sql(&Postgres);
        assert_eq!(sql, r#"SELECT * FROM "users" ORDER BY id ASC"#);
    }

    #[test]
    fn lookahead_requires_a_limit() {
        let pager = Pager::<OffsetCursor>::new()
            .with_sort([OrderBy::asc("id")])
            .with_unlimited()
            .with_lookahead();

        let mut query = SelectQuery::new("users");
        let err = pager.paginate(&mut query).unwrap_err();

        assert!(matches!(err, PagerError::LookaheadRequiresLimit));
        // Validation failed before anything was applied.
        let (sql, _) = query.to_sql(&Postgres);
        assert_eq!(sql, r#"SELECT * FROM "users""#);
    }

    #[test]
    fn paginate_rejects_an_empty_sort() {
        let pager = Pager::<OffsetCursor>::new().with_limit(10);

        let mut query = SelectQuery::new("users");
        assert!(matches!(
            pager.paginate(&mut query),
            Err(PagerError::Ordering(_))
        ));
    }

    #[test]
    fn last_page_detection_without_lookahead() {
        let pager = Pager::<OffsetCursor>::new().with_limit(2);

        assert!(pager.is_last_page(&[1]));
        assert!(!pager.is_last_page(&[1, 2]));
    }

    #[test]
    fn last_page_detection_with_lookahead() {
        let pager = Pager::<OffsetCursor>::new().with_limit(2).with_lookahead();

        assert!(pager.is_last_page(&[1]));
        assert!(pager.is_last_page(&[1, 2]));
        assert!(!pager.is_last_page(&[1, 2, 3]));
    }

    #[test]
    fn unlimited_paging_never_reports_a_last_page() {
        let pager = Pager::<OffsetCursor>::new().with_unlimited();

        assert!(!pager.is_last_page::<i64>(&[]));
        assert!(!pager.is_last_page(&[1, 2, 3]));
    }

    #[test]
    fn resorting_a_column_moves_it_to_the_end() {
        let pager = Pager::<OffsetCursor>::new()
            .with_sort([OrderBy::asc("id"), OrderBy::asc("name")])
            .with_sort([OrderBy::desc("id")]);

        assert_eq!(pager.sort().to_sql(), "name ASC, id DESC");
    }

    #[test]
    fn raw_requests_decode_from_camel_case_json() {
        let request: RawPageRequest =
            serde_json::from_str(r#"{"limit":25,"startToken":"NDI"}"#).unwrap();

        let pager = request
            .decode_offset(vec![OrderBy::asc("id")].into())
            .unwrap();

        assert_eq!(pager.limit(), 25);
        assert_eq!(pager.cursor().offset(), 42);
    }

    #[test]
    fn raw_requests_default_to_an_empty_token() {
        let request: RawPageRequest = serde_json::from_str(r#"{"limit":5}"#).unwrap();

        assert_eq!(request.start_token, "");
        let pager = request.decode(vec![OrderBy::asc("id")].into()).unwrap();
        assert!(pager.cursor().is_empty());
    }

    #[test]
    fn raw_requests_decode_keyset_tokens() {
        let request = RawPageRequest::new(10, "W3siYyI6ImlkIiwidiI6MSwibyI6Ij4ifV0");

        let pager = request.decode(vec![OrderBy::asc("id")].into()).unwrap();

        assert_eq!(
            pager.cursor().elements(),
            &[CursorElement::new("id", Value::Int(1), Operator::GreaterThan)]
        );
    }

    #[test]
    fn raw_requests_normalize_the_limit() {
        let request = RawPageRequest::new(0, "");
        let pager = request.decode(vec![OrderBy::asc("id")].into()).unwrap();
        assert_eq!(pager.limit(), DEFAULT_LIMIT as i64);

        let request = RawPageRequest::new(NO_LIMIT, "");
        let pager = request.decode(vec![OrderBy::asc("id")].into()).unwrap();
        assert!(pager.is_unlimited());
    }

    #[test]
    fn raw_requests_surface_token_errors() {
        let request = RawPageRequest::new(10, "not!!valid");

        assert!(request.decode(vec![OrderBy::asc("id")].into()).is_err());
    }
}
