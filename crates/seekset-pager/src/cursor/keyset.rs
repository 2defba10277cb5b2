//! Keyset paging: the cursor records the sort-key values of the last row of
//! the previous page, one element per ordered column. Resumption is a WHERE
//! condition rather than a row skip, so a page costs the same no matter how
//! deep into the result set it sits.

use std::collections::HashMap;
use std::fmt;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use seekset_model::core::value::Value;
use seekset_model::ordering::operator::Operator;
use seekset_model::ordering::Orderings;
use seekset_model::pagination::element::CursorElement;

use crate::cursor::{decode_token, encode_token, Cursor};
use crate::error::{CursorError, PagerError};
use crate::filter::{Conjunct, Disjunct, Dnf};
use crate::pager::Pager;
use crate::query::{QueryBuilder, SqlFilter};

/// Position expressed as the boundary values of the previous page.
///
/// The resumption condition for elements `[(C1,O1,V1) … (Cn,On,Vn)]` is the
/// disjunction over `i` of `C1 = V1 AND … AND Ci-1 = Vi-1 AND Ci Oi Vi`:
/// either the first sort key moved past the boundary, or it tied and a later
/// one moved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeysetCursor {
    elements: Vec<CursorElement>,
}

impl KeysetCursor {
    pub fn new(elements: Vec<CursorElement>) -> Self {
        KeysetCursor { elements }
    }

    /// Decodes a token produced by [`Cursor::encode`]; the empty token is
    /// the first page.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        if token.is_empty() {
            return Ok(KeysetCursor::default());
        }

        let payload = decode_token(token)?;
        Ok(KeysetCursor::new(serde_json::from_slice(&payload)?))
    }

    pub fn elements(&self) -> &[CursorElement] {
        &self.elements
    }

    /// Renders the resumption condition. The empty cursor renders the
    /// always-true condition with no parameters.
    pub fn to_filter(&self) -> SqlFilter {
        self.to_dnf().to_filter()
    }

    fn to_dnf(&self) -> Dnf {
        let mut disjuncts = Vec::with_capacity(self.elements.len());

        for (i, element) in self.elements.iter().enumerate() {
            let mut conjuncts = Vec::with_capacity(i + 1);
            for prior in &self.elements[..i] {
                conjuncts.push(Conjunct::new(
                    prior.column.clone(),
                    Operator::Equal,
                    prior.value.clone(),
                ));
            }
            conjuncts.push(Conjunct::new(
                element.column.clone(),
                element.operator,
                element.value.clone(),
            ));
            disjuncts.push(Disjunct(conjuncts));
        }

        Dnf(disjuncts)
    }
}

impl Cursor for KeysetCursor {
    fn encode(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let payload =
            serde_json::to_vec(&self.elements).expect("Cursor elements are serializable");
        encode_token(&payload)
    }

    fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn apply<Q: QueryBuilder>(&self, query: &mut Q) {
        if !self.is_empty() {
            query.push_filter(self.to_filter());
        }
    }

    /// A non-empty cursor must mirror the orderings exactly: same columns in
    /// the same positions, each carrying the comparison operator its sort
    /// direction produces. Anything else is a token forged or reused under a
    /// different sort.
    fn validate(&self, orderings: &Orderings) -> Result<(), CursorError> {
        if self.is_empty() {
            return Ok(());
        }

        if self.elements.len() != orderings.len() {
            return Err(CursorError::ColumnCountMismatch {
                expected: orderings.len(),
                actual: self.elements.len(),
            });
        }

        for (position, (element, order)) in
            self.elements.iter().zip(orderings.iter()).enumerate()
        {
            if element.column != order.column {
                return Err(CursorError::UnexpectedColumn {
                    position,
                    column: element.column.clone(),
                });
            }

            // Validity first: `for_ordering` is not defined for `=`.
            if !element.operator.is_valid() {
                return Err(CursorError::InvalidOperator {
                    position,
                    operator: element.operator,
                });
            }

            if element.operator.for_ordering() != order.direction {
                return Err(CursorError::OperatorMismatch {
                    position,
                    operator: element.operator,
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for KeysetCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for KeysetCursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for KeysetCursor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        KeysetCursor::decode(&token).map_err(de::Error::custom)
    }
}

/// Per-column value extractors for a row type, used to lift the boundary row
/// of a page into cursor elements. Register one per ordered column, or build
/// the set with the [`getters!`](crate::getters) macro.
pub struct Getters<T> {
    getters: HashMap<String, Box<dyn Fn(&T) -> Value + Send + Sync>>,
}

impl<T> Getters<T> {
    pub fn new() -> Self {
        Getters {
            getters: HashMap::new(),
        }
    }

    pub fn with(
        mut self,
        column: impl Into<String>,
        getter: impl Fn(&T) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.getters.insert(column.into(), Box::new(getter));
        self
    }

    pub fn get(&self, column: &str) -> Option<&(dyn Fn(&T) -> Value + Send + Sync)> {
        self.getters.get(column).map(|getter| getter.as_ref())
    }
}

impl<T> Default for Getters<T> {
    fn default() -> Self {
        Getters::new()
    }
}

impl Pager<KeysetCursor> {
    /// Trims a fetched row window to the page size and derives the cursor
    /// for the page after it from the last kept row, or `None` when this
    /// window was the last page.
    pub fn next_page<T>(
        &self,
        rows: Vec<T>,
        getters: &Getters<T>,
    ) -> Result<(Vec<T>, Option<KeysetCursor>), PagerError> {
        self.validate()?;

        if self.is_last_page(&rows) {
            return Ok((rows, None));
        }

        let rows = self.trim_page(rows);
        let next = match rows.last() {
            Some(last) => Some(KeysetCursor::new(self.elements_from(last, getters)?)),
            None => None,
        };

        Ok((rows, next))
    }

    fn elements_from<T>(
        &self,
        row: &T,
        getters: &Getters<T>,
    ) -> Result<Vec<CursorElement>, PagerError> {
        let mut elements = Vec::with_capacity(self.sort().len());

        for order in self.sort() {
            let getter = getters
                .get(&order.column)
                .ok_or_else(|| PagerError::MissingGetter(order.column.clone()))?;

            elements.push(CursorElement::new(
                order.column.clone(),
                getter(row),
                order.direction.for_operator(),
            ));
        }

        Ok(elements)
    }
}
