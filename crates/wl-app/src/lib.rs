//! Shared application service layer for wirelang.
//!
//! Centralizes the workflows behind the CLI: evaluating scripts, compiling
//! them to documents, persisting documents, reversing them back to source
//! and summarizing them.

pub mod document_service;
pub mod error;
pub mod format;
pub mod script_service;

// Re-export key types for convenience
pub use document_service::{
    DocumentSummary, compile, component_ids_of, load_document, rebuild, reverse, save_document,
    summarize, validate_path, write_script,
};
pub use error::{AppError, AppResult};
pub use format::{FileKind, SCRIPT_EXTENSION};
pub use script_service::{compile_script, load_schematic, load_script};
