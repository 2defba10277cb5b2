use crate::core::value::Value;
use crate::ordering::operator::Operator;
use serde::{Deserialize, Serialize};

/// One column of a keyset cursor: the boundary value of the previous page
/// and the comparison that resumes after it. Field names are shortened on
/// the wire to keep tokens compact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorElement {
    #[serde(rename = "c")]
    pub column: String,
    #[serde(rename = "v")]
    pub value: Value,
    #[serde(rename = "o")]
    pub operator: Operator,
}

impl CursorElement {
    pub fn new(column: impl Into<String>, value: Value, operator: Operator) -> Self {
        CursorElement {
            column: column.into(),
            value,
            operator,
        }
    }
}
