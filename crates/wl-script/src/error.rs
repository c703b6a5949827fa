//! Error types for the script front end.

use thiserror::Error;
use wl_core::WlError;
use wl_graph::GraphError;
use wl_parts::PartError;

pub type ScriptResult<T> = Result<T, ScriptError>;

#[derive(Error, Debug)]
pub enum ScriptError {
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    Lex {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Error while executing a statement
    #[error("Evaluation error at line {line}: {message}")]
    Eval { line: usize, message: String },

    #[error("Export '{name}' not found (exports: {available})")]
    ExportNotFound { name: String, available: String },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Part(#[from] PartError),

    #[error(transparent)]
    Core(#[from] WlError),
}

impl ScriptError {
    pub fn lex(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Lex {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn eval(line: usize, message: impl Into<String>) -> Self {
        Self::Eval {
            line,
            message: message.into(),
        }
    }

    /// Attach a line to an error raised below the evaluator.
    pub(crate) fn at(self, line: usize) -> Self {
        match self {
            err @ (Self::Lex { .. } | Self::Parse { .. } | Self::Eval { .. }) => err,
            other => Self::eval(line, other.to_string()),
        }
    }
}
