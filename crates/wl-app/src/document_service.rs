//! Document compile, persistence, reverse and introspection.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::debug;
use wl_db::{Document, ReverseOptions};
use wl_graph::{Schematic, ValidationReport};
use wl_parts::PartKind;

use crate::error::{AppError, AppResult};
use crate::format::FileKind;
use crate::script_service;

/// Counts and health of a document, for listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub name: String,
    pub component_count: usize,
    pub node_count: usize,
    pub ground_node_count: usize,
    pub unconnected_pin_count: usize,
    /// Component count per part kind, ordered by kind tag.
    pub kinds: BTreeMap<String, usize>,
    pub report: ValidationReport,
}

pub fn compile(schematic: &Schematic) -> Document {
    wl_db::compile_dsl_to_db(schematic)
}

/// Load a JSON or YAML document, chosen by extension.
pub fn load_document(path: &Path) -> AppResult<Document> {
    let doc = match FileKind::from_path(path)? {
        FileKind::Json => wl_db::load_json(path)?,
        FileKind::Yaml => wl_db::load_yaml(path)?,
        FileKind::Script => {
            return Err(AppError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };
    debug!(path = %path.display(), components = doc.components.len(), "document loaded");
    Ok(doc)
}

/// Save a document as JSON or YAML, chosen by extension.
pub fn save_document(path: &Path, doc: &Document) -> AppResult<()> {
    match FileKind::from_path(path)? {
        FileKind::Json => wl_db::save_json(path, doc)?,
        FileKind::Yaml => wl_db::save_yaml(path, doc)?,
        FileKind::Script => {
            return Err(AppError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

pub fn reverse(doc: &Document, options: &ReverseOptions) -> AppResult<String> {
    Ok(wl_db::reverse_db_to_dsl(doc, options)?)
}

/// Reverse a document into a script file.
pub fn write_script(path: &Path, doc: &Document, options: &ReverseOptions) -> AppResult<()> {
    let source = reverse(doc, options)?;
    std::fs::write(path, source).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Rebuild the schematic a document describes by evaluating its reversed
/// source with identities preserved.
pub fn rebuild(doc: &Document) -> AppResult<Schematic> {
    let options = ReverseOptions::default();
    let source = reverse(doc, &options)?;
    Ok(wl_script::run(&source)?.into_export(&options.export_name)?)
}

pub fn summarize(doc: &Document) -> AppResult<DocumentSummary> {
    let schematic = rebuild(doc)?;
    let mut kinds = BTreeMap::new();
    for comp in &doc.components {
        *kinds.entry(comp.kind.tag().to_string()).or_insert(0) += 1;
    }
    Ok(DocumentSummary {
        name: doc.name.clone(),
        component_count: doc.components.len(),
        node_count: doc.nodes.len(),
        ground_node_count: doc.nodes.iter().filter(|n| n.is_ground).count(),
        unconnected_pin_count: doc
            .components
            .iter()
            .flat_map(|c| &c.pins)
            .filter(|p| p.node_id.is_none())
            .count(),
        kinds,
        report: schematic.validate(),
    })
}

/// Validate a script (its `export` schematic) or a document file.
pub fn validate_path(path: &Path, export: &str) -> AppResult<ValidationReport> {
    let schematic = match FileKind::from_path(path)? {
        FileKind::Script => script_service::load_schematic(path, export)?,
        FileKind::Json | FileKind::Yaml => rebuild(&load_document(path)?)?,
    };
    Ok(schematic.validate())
}

/// Components of one kind in a document, by id.
pub fn component_ids_of(doc: &Document, kind: PartKind) -> Vec<String> {
    doc.components
        .iter()
        .filter(|c| c.kind == kind)
        .map(|c| c.id.clone())
        .collect()
}
