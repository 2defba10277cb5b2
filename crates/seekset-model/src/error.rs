use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderingError {
    #[error("empty ordering list")]
    EmptyOrdering,

    #[error("invalid ordering direction '{0}'")]
    InvalidDirection(String),

    #[error("ordering column contains forbidden characters '{0}'")]
    ForbiddenColumnCharacters(String),

    #[error("invalid ordering string format '{0}'")]
    MalformedOrderingString(String),

    #[error("unknown column alias '{alias}', closest match '{closest}'")]
    UnknownColumnAlias { alias: String, closest: String },
}
