//! wl-db: portable document format for wirelang schematics.
//!
//! - [`compile_dsl_to_db`] projects a schematic into a [`Document`]
//! - [`reverse_db_to_dsl`] regenerates script source from a document
//! - identity helpers restore ids and labels on a rebuilt schematic
//! - JSON and YAML load/save with validation

pub mod compile;
pub mod identity;
pub mod reverse;
pub mod schema;
pub mod validate;

pub use compile::compile_dsl_to_db;
pub use identity::{
    ComponentIdentity, apply_component_identity, apply_node_identity, apply_pin_identity,
};
pub use reverse::{ReverseOptions, reverse_db_to_dsl};
pub use schema::*;
pub use validate::{ValidationError, validate_document};

pub type DbResult<T> = Result<T, DbError>;

#[derive(thiserror::Error, Debug)]
pub enum DbError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Graph error: {0}")]
    Graph(#[from] wl_graph::GraphError),

    #[error("Part error: {0}")]
    Part(#[from] wl_parts::PartError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> DbResult<Document> {
    let content = std::fs::read_to_string(path)?;
    let doc: Document = serde_yaml::from_str(&content)?;
    validate_document(&doc)?;
    Ok(doc)
}

pub fn save_yaml(path: &std::path::Path, doc: &Document) -> DbResult<()> {
    validate_document(doc)?;
    let content = serde_yaml::to_string(doc)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> DbResult<Document> {
    let content = std::fs::read_to_string(path)?;
    let doc: Document = serde_json::from_str(&content)?;
    validate_document(&doc)?;
    Ok(doc)
}

pub fn save_json(path: &std::path::Path, doc: &Document) -> DbResult<()> {
    validate_document(doc)?;
    let content = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, content)?;
    Ok(())
}
