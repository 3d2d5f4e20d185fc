//! NaPTAN API error types.

use crate::domain::StopError;

/// Errors that can occur when fetching or decoding NaPTAN data.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error {status}: {reason}")]
    Api { status: u16, reason: String },

    /// Response body is not readable CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row could not be turned into a stop
    #[error("invalid stop on line {line}: {source}")]
    Row { line: u64, source: StopError },

    /// Client configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ApiError::Api {
            status: 400,
            reason: "Atco area codes or data format are incorrectly formatted".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error 400: Atco area codes or data format are incorrectly formatted"
        );

        let err = ApiError::Row {
            line: 7,
            source: StopError::FieldCount {
                expected: 43,
                found: 5,
            },
        };
        assert_eq!(
            err.to_string(),
            "invalid stop on line 7: expected 43 fields, found 5"
        );

        let err = ApiError::InvalidConfig("relative URL without a base".into());
        assert!(err.to_string().contains("relative URL"));
    }

    #[test]
    fn row_error_exposes_source() {
        use std::error::Error;

        let err = ApiError::Row {
            line: 2,
            source: StopError::InvalidInteger {
                field: "easting",
                value: "x".into(),
            },
        };
        assert!(err.source().is_some());
    }
}
