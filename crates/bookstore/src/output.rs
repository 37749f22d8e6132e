//! Output formatting functions.

use serde::Serialize;
use serde_json::json;

use bookstore_core::storage::{repository_error_to_status_code, RepositoryError, Result};

use crate::cli::OutputFormat;

/// Format a value for output.
///
/// Fails with `InvalidData` when the value cannot be represented as JSON.
pub fn format_output<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
    };
    rendered.map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize output");
        RepositoryError::InvalidData(format!("Cannot serialize output: {e}"))
    })
}

/// Format a repository error together with its status code.
pub fn format_error(error: &RepositoryError, format: OutputFormat) -> String {
    let body = json!({
        "status": repository_error_to_status_code(error),
        "error": error.to_string(),
    });
    format_output(&body, format).unwrap_or_else(|_| body.to_string())
}
