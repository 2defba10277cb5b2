use crate::ordering::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator carried by a cursor element.
///
/// `Equal` is internal: it builds the equality prefix of keyset filters and
/// never belongs in a valid public token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "=")]
    Equal,
}

impl Operator {
    /// True for the operators a decoded token is allowed to carry.
    pub fn is_valid(&self) -> bool {
        matches!(self, Operator::GreaterThan | Operator::LessThan)
    }

    /// Maps the operator back to the sort direction it implements.
    /// Panics on `Equal`, which no direction produces.
    pub fn for_ordering(&self) -> Direction {
        match self {
            Operator::GreaterThan => Direction::Ascending,
            Operator::LessThan => Direction::Descending,
            Operator::Equal => panic!("cannot map operator '=' to an ordering direction"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::Equal => "=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_and_operators_are_a_bijection() {
        assert_eq!(Direction::Ascending.for_operator(), Operator::GreaterThan);
        assert_eq!(Direction::Descending.for_operator(), Operator::LessThan);
        assert_eq!(Operator::GreaterThan.for_ordering(), Direction::Ascending);
        assert_eq!(Operator::LessThan.for_ordering(), Direction::Descending);
    }

    #[test]
    #[should_panic(expected = "cannot map operator")]
    fn equal_has_no_ordering_direction() {
        Operator::Equal.for_ordering();
    }

    #[test]
    fn only_comparison_operators_are_valid_in_tokens() {
        assert!(Operator::GreaterThan.is_valid());
        assert!(Operator::LessThan.is_valid());
        assert!(!Operator::Equal.is_valid());
    }

    #[test]
    fn serializes_as_the_bare_symbol() {
        assert_eq!(serde_json::to_string(&Operator::GreaterThan).unwrap(), "\">\"");
        assert_eq!(serde_json::to_string(&Operator::LessThan).unwrap(), "\"<\"");
        assert_eq!(serde_json::to_string(&Operator::Equal).unwrap(), "\"=\"");
        assert_eq!(
            serde_json::from_str::<Operator>("\"<\"").unwrap(),
            Operator::LessThan
        );
    }
}
