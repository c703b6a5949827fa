//! Error types for part lookups and conversions.

use thiserror::Error;
use wl_core::WlError;

/// Errors raised when naming or converting parts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PartError {
    #[error("Unknown part type: {tag}")]
    UnknownKind { tag: String },

    #[error("Unknown {what}: {name}")]
    UnknownName { what: &'static str, name: String },

    #[error("Part type mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: String, found: String },

    #[error(transparent)]
    Core(#[from] WlError),
}

pub type PartResult<T> = Result<T, PartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PartError::UnknownKind {
            tag: "flux_capacitor".into(),
        };
        assert!(err.to_string().contains("flux_capacitor"));
    }

    #[test]
    fn error_conversion() {
        let core = WlError::InvalidArg { what: "test" };
        let err: PartError = core.into();
        assert!(matches!(err, PartError::Core(_)));
    }
}
