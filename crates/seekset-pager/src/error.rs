use seekset_model::error::OrderingError;
use seekset_model::ordering::operator::Operator;
use std::num::ParseIntError;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Failures while decoding a wire token or checking a cursor against the
/// orderings it is applied under. Validation errors identify the offending
/// element position.
#[derive(Debug, Error)]
pub enum CursorError {
    #[error("failed to decode base64 cursor token: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    #[error("failed to decode cursor elements: {0}")]
    ElementDecode(#[from] serde_json::Error),

    #[error("cursor token is not valid utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("failed to parse cursor offset value: {0}")]
    OffsetParse(#[from] ParseIntError),

    #[error("cursor carries {actual} columns, ordering has {expected}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("unexpected cursor column '{column}' at position {position}")]
    UnexpectedColumn { position: usize, column: String },

    #[error("invalid cursor operator '{operator}' at position {position}")]
    InvalidOperator { position: usize, operator: Operator },

    #[error("cursor operator '{operator}' contradicts the ordering at position {position}")]
    OperatorMismatch { position: usize, operator: Operator },
}

#[derive(Debug, Error)]
pub enum PagerError {
    #[error("cannot apply lookahead to unlimited paging")]
    LookaheadRequiresLimit,

    #[error(transparent)]
    Ordering(#[from] OrderingError),

    #[error(transparent)]
    Cursor(#[from] CursorError),

    #[error("no value getter registered for ordering column '{0}'")]
    MissingGetter(String),
}
