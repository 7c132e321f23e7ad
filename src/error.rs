use thiserror::Error;

/// Errors raised while configuring inference. Classification itself never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TyperError {
    /// A type tag other than `int`, `float`, `date` or `string`.
    #[error("Unknown column type '{0}'. Supported types: int, float, date, string")]
    UnknownType(String),

    /// A date layout that chrono cannot interpret.
    #[error("Invalid date format '{0}'")]
    InvalidDateFormat(String),

    /// A delimiter that is not a single ASCII character.
    #[error("Invalid delimiter '{0}': {1}")]
    InvalidDelimiter(String, &'static str),
}

pub type Result<T> = std::result::Result<T, TyperError>;
