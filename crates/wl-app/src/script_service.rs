//! Loading and evaluating script files.

use std::path::Path;

use tracing::{debug, warn};
use wl_db::Document;
use wl_graph::Schematic;
use wl_script::ScriptModule;

use crate::error::{AppError, AppResult};

/// Read and evaluate a script file.
pub fn load_script(path: &Path) -> AppResult<ScriptModule> {
    let source = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let module = wl_script::run(&source)?;
    for warning in &module.warnings {
        warn!(script = %path.display(), "{warning}");
    }
    debug!(
        script = %path.display(),
        exports = ?module.exports,
        "script loaded"
    );
    Ok(module)
}

/// Evaluate a script and take the schematic it exports under `export`.
pub fn load_schematic(path: &Path, export: &str) -> AppResult<Schematic> {
    Ok(load_script(path)?.into_export(export)?)
}

/// Evaluate a script and compile its export to a document.
pub fn compile_script(path: &Path, export: &str) -> AppResult<Document> {
    let schematic = load_schematic(path, export)?;
    Ok(wl_db::compile_dsl_to_db(&schematic))
}
