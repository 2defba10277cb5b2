use std::cmp::Ordering as CmpOrdering;

use chrono::{DateTime, Duration, TimeZone, Utc};

use seekset_model::core::value::Value;
use seekset_model::ordering::operator::Operator;
use seekset_model::ordering::parse::ColumnMapping;
use seekset_model::ordering::{Direction, Orderings};
use seekset_model::pagination::element::CursorElement;
use seekset_pager::cursor::keyset::{Getters, KeysetCursor};
use seekset_pager::cursor::offset::OffsetCursor;
use seekset_pager::cursor::Cursor;
use seekset_pager::getters;
use seekset_pager::pager::{Pager, RawPageRequest};

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub team: String,
    pub created_at: DateTime<Utc>,
}

/// Seven accounts with duplicate team names, so multi-column walks have
/// ties to break.
pub fn sample_accounts() -> Vec<Account> {
    let teams = ["ops", "ops", "dev", "dev", "dev", "qa", "ops"];
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();

    teams
        .iter()
        .enumerate()
        .map(|(i, team)| Account {
            id: i as i64 + 1,
            team: team.to_string(),
            created_at: base + Duration::hours(i as i64 + 1),
        })
        .collect()
}

pub fn account_getters() -> Getters<Account> {
    getters! {
        "id" => |account: &Account| Value::Int(account.id),
        "team" => |account: &Account| Value::String(account.team.clone()),
        "created_at" => |account: &Account| Value::Timestamp(account.created_at),
    }
}

pub fn alias_mapping() -> ColumnMapping {
    ColumnMapping::from([
        ("id".to_string(), "id".to_string()),
        ("team".to_string(), "team".to_string()),
        ("created_at".to_string(), "created_at".to_string()),
    ])
}

pub fn ids(rows: &[Account]) -> Vec<i64> {
    rows.iter().map(|account| account.id).collect()
}

/// Sorts rows the way ORDER BY would, comparing getter values column by
/// column.
pub fn sort_rows(rows: &mut [Account], sort: &Orderings, getters: &Getters<Account>) {
    rows.sort_by(|a, b| {
        for order in sort {
            let getter = getters.get(&order.column).expect("Getter for sort column");
            let ordering = match order.direction {
                Direction::Ascending => compare(&getter(a), &getter(b)),
                Direction::Descending => compare(&getter(b), &getter(a)),
            };
            if ordering != CmpOrdering::Equal {
                return ordering;
            }
        }

        CmpOrdering::Equal
    });
}

/// Executes one keyset paging pass: sort, drop rows at or before the cursor
/// boundary, cap at the fetch limit.
pub fn fetch_keyset(
    table: &[Account],
    pager: &Pager<KeysetCursor>,
    getters: &Getters<Account>,
) -> Vec<Account> {
    let mut rows = table.to_vec();
    sort_rows(&mut rows, pager.sort(), getters);

    let elements = pager.cursor().elements();
    if !elements.is_empty() {
        rows.retain(|row| matches_after(row, elements, getters));
    }

    truncate_to_fetch_limit(rows, pager.fetch_limit())
}

/// Executes one offset paging pass: sort, skip past rows, cap at the fetch
/// limit.
pub fn fetch_offset(
    table: &[Account],
    pager: &Pager<OffsetCursor>,
    getters: &Getters<Account>,
) -> Vec<Account> {
    let mut rows = table.to_vec();
    sort_rows(&mut rows, pager.sort(), getters);

    let rows = rows
        .into_iter()
        .skip(pager.cursor().offset() as usize)
        .collect();
    truncate_to_fetch_limit(rows, pager.fetch_limit())
}

/// Walks every page of the table with lookahead enabled, re-decoding each
/// token through [`RawPageRequest`] the way a fresh request would.
pub fn walk_keyset(table: &[Account], sort: &Orderings, limit: i64) -> Vec<Vec<i64>> {
    let getters = account_getters();
    let mut token = String::new();
    let mut pages = Vec::new();

    loop {
        let pager = RawPageRequest::new(limit, token)
            .decode(sort.clone())
            .expect("Decode keyset token")
            .with_lookahead();

        let fetched = fetch_keyset(table, &pager, &getters);
        let (rows, next) = pager.next_page(fetched, &getters).expect("Advance page");

        pages.push(ids(&rows));
        assert!(pages.len() <= table.len() + 1, "paging did not terminate");

        match next {
            Some(cursor) => token = cursor.encode(),
            None => return pages,
        }
    }
}

// Evaluates the resumption condition the rendered DNF stands for: some
// element strictly past its boundary, all elements before it tied.
fn matches_after(row: &Account, elements: &[CursorElement], getters: &Getters<Account>) -> bool {
    elements.iter().enumerate().any(|(i, element)| {
        let tied = elements[..i].iter().all(|prior| {
            let getter = getters.get(&prior.column).expect("Getter for cursor column");
            getter(row) == prior.value
        });

        let getter = getters.get(&element.column).expect("Getter for cursor column");
        tied && holds(&getter(row), element.operator, &element.value)
    })
}

fn holds(actual: &Value, operator: Operator, boundary: &Value) -> bool {
    match operator {
        Operator::GreaterThan => compare(actual, boundary) == CmpOrdering::Greater,
        Operator::LessThan => compare(actual, boundary) == CmpOrdering::Less,
        Operator::Equal => actual == boundary,
    }
}

fn compare(a: &Value, b: &Value) -> CmpOrdering {
    match (a, b) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b).unwrap_or(CmpOrdering::Equal),
        (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => CmpOrdering::Equal,
    }
}

fn truncate_to_fetch_limit(mut rows: Vec<Account>, fetch_limit: i64) -> Vec<Account> {
    if fetch_limit >= 0 {
        rows.truncate(fetch_limit as usize);
    }

    rows
}
