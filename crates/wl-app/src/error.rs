//! Error types for the wl-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors behind one
/// interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Script error: {0}")]
    Script(String),

    #[error("Export '{name}' not found in script (exports: {available})")]
    ExportNotFound { name: String, available: String },

    #[error("Document error: {0}")]
    Document(String),

    #[error("Document validation failed: {0}")]
    Validation(String),

    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported file type: {path} (expected .wl, .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for wl-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<wl_script::ScriptError> for AppError {
    fn from(err: wl_script::ScriptError) -> Self {
        match err {
            wl_script::ScriptError::ExportNotFound { name, available } => {
                AppError::ExportNotFound { name, available }
            }
            other => AppError::Script(other.to_string()),
        }
    }
}

impl From<wl_db::DbError> for AppError {
    fn from(err: wl_db::DbError) -> Self {
        match err {
            wl_db::DbError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Document(other.to_string()),
        }
    }
}
