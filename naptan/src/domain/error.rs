//! Domain error types.
//!
//! These errors are construction failures: the raw row cannot become a
//! record at all. Values that are merely missing or unparseable timestamps
//! are not errors; they become `None` fields.

/// Failure to build a [`Stop`](super::Stop) from a raw row.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StopError {
    /// Row has the wrong number of columns
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// A whole-number column did not hold an integer
    #[error("invalid integer for {field}: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    /// A coordinate column did not hold a number
    #[error("invalid number for {field}: {value:?}")]
    InvalidFloat { field: &'static str, value: String },
}
