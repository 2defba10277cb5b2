use crate::error::OrderingError;
use crate::ordering::operator::Operator;
use std::{fmt, str::FromStr};

pub mod operator;
pub mod parse;

/// Sort direction for one ordered column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Maps the direction to the comparison operator that resumes a page in
    /// this direction: ascending rows continue after the boundary (`>`),
    /// descending rows continue before it (`<`).
    pub fn for_operator(&self) -> Operator {
        match self {
            Direction::Ascending => Operator::GreaterThan,
            Direction::Descending => Operator::LessThan,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = OrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Direction::Ascending),
            "DESC" => Ok(Direction::Descending),
            _ => Err(OrderingError::InvalidDirection(s.to_string())),
        }
    }
}

/// One ordered column with its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        OrderBy {
            column: column.into(),
            direction,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        OrderBy::new(column, Direction::Ascending)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        OrderBy::new(column, Direction::Descending)
    }

    /// Renders the term as `<column> <ASC|DESC>` for an ORDER BY clause.
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.column, self.direction)
    }

    fn validate(&self) -> Result<(), OrderingError> {
        if !self.column.chars().all(allowed_column_char) {
            return Err(OrderingError::ForbiddenColumnCharacters(
                self.column.clone(),
            ));
        }

        Ok(())
    }
}

// The column-name charset guard. Anything outside this set is rejected before
// a column ever reaches a rendered clause.
fn allowed_column_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '\'' | '`' | '"')
}

/// Ordered list of sort terms. Uniqueness by column name is maintained on
/// insertion: re-pushing a column removes the previous occurrence and appends
/// the new term at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Orderings(Vec<OrderBy>);

impl Orderings {
    pub fn new() -> Self {
        Orderings::default()
    }

    pub fn push(&mut self, order: OrderBy) {
        self.0.retain(|existing| existing.column != order.column);
        self.0.push(order);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderBy> {
        self.0.iter()
    }

    /// Fails on an empty list and on any column containing characters outside
    /// the allowed set (ASCII alphanumerics plus `` _ . ' ` " ``).
    pub fn validate(&self) -> Result<(), OrderingError> {
        if self.0.is_empty() {
            return Err(OrderingError::EmptyOrdering);
        }

        for order in &self.0 {
            order.validate()?;
        }

        Ok(())
    }

    /// Renders each term separately: `["a ASC", "b DESC"]`.
    pub fn to_sql_slice(&self) -> Vec<String> {
        self.0.iter().map(OrderBy::to_sql).collect()
    }

    /// Renders the full clause body: `"a ASC, b DESC"`.
    pub fn to_sql(&self) -> String {
        self.to_sql_slice().join(", ")
    }
}

impl From<Vec<OrderBy>> for Orderings {
    fn from(orders: Vec<OrderBy>) -> Self {
        orders.into_iter().collect()
    }
}

impl FromIterator<OrderBy> for Orderings {
    fn from_iter<I: IntoIterator<Item = OrderBy>>(iter: I) -> Self {
        let mut orderings = Orderings::new();
        for order in iter {
            orderings.push(order);
        }
        orderings
    }
}

impl IntoIterator for Orderings {
    type Item = OrderBy;
    type IntoIter = std::vec::IntoIter<OrderBy>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Orderings {
    type Item = &'a OrderBy;
    type IntoIter = std::slice::Iter<'a, OrderBy>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("asc".parse::<Direction>().unwrap(), Direction::Ascending);
        assert_eq!("DESC".parse::<Direction>().unwrap(), Direction::Descending);
        assert_eq!(
            "sideways".parse::<Direction>().unwrap_err(),
            OrderingError::InvalidDirection("sideways".into())
        );
    }

    #[test]
    fn renders_order_by_terms() {
        let orderings: Orderings =
            vec![OrderBy::asc("a"), OrderBy::desc("b")].into();

        assert_eq!(orderings.to_sql_slice(), vec!["a ASC", "b DESC"]);
        assert_eq!(orderings.to_sql(), "a ASC, b DESC");
    }

    #[test]
    fn push_replaces_previous_occurrence_of_a_column() {
        let mut orderings: Orderings = vec![OrderBy::asc("id")].into();
        orderings.push(OrderBy::desc("id"));
        orderings.push(OrderBy::asc("created_at"));

        let got: Vec<OrderBy> = orderings.into_iter().collect();
        assert_eq!(
            got,
            vec![OrderBy::desc("id"), OrderBy::asc("created_at")]
        );
    }

    #[test]
    fn validate_rejects_empty_list() {
        assert_eq!(
            Orderings::new().validate().unwrap_err(),
            OrderingError::EmptyOrdering
        );
    }

    #[test]
    fn validate_rejects_forbidden_column_characters() {
        let orderings: Orderings =
            vec![OrderBy::asc("id; DROP TABLE users")].into();

        assert_eq!(
            orderings.validate().unwrap_err(),
            OrderingError::ForbiddenColumnCharacters("id; DROP TABLE users".into())
        );
    }

    #[test]
    fn validate_accepts_qualified_and_quoted_columns() {
        let orderings: Orderings = vec![
            OrderBy::asc("users.id"),
            OrderBy::desc("\"createdAt\""),
            OrderBy::asc("`legacy_name`"),
        ]
        .into();

        assert!(orderings.validate().is_ok());
    }
}
