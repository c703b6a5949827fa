use thiserror::Error;

pub type WlResult<T> = Result<T, WlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Cannot parse '{text}' as a quantity")]
    BadQuantity { text: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
