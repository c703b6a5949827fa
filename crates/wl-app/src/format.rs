//! File kinds the services understand, chosen by extension.

use std::path::Path;

use crate::error::{AppError, AppResult};

/// Extension used for script files.
pub const SCRIPT_EXTENSION: &str = "wl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Script,
    Json,
    Yaml,
}

impl FileKind {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some(SCRIPT_EXTENSION) => Ok(FileKind::Script),
            Some("json") => Ok(FileKind::Json),
            Some("yaml" | "yml") => Ok(FileKind::Yaml),
            _ => Err(AppError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn is_document(self) -> bool {
        matches!(self, FileKind::Json | FileKind::Yaml)
    }
}
