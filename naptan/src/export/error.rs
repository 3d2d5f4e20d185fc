//! Export error types.

/// Errors from writing stop exports.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Map template failed to render
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// Writing the output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing GeoJSON failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
