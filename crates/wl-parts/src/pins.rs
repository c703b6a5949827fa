//! Pin declarations.

use serde::{Deserialize, Serialize};

/// Advisory signal direction of a pin. Never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinDirection {
    Input,
    Output,
    Bidirectional,
}

/// A pin as declared by a part variant, before any node is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinSpec {
    pub name: String,
    pub direction: Option<PinDirection>,
}

impl PinSpec {
    pub fn new(name: impl Into<String>, direction: PinDirection) -> Self {
        Self {
            name: name.into(),
            direction: Some(direction),
        }
    }

    pub fn input(name: impl Into<String>) -> Self {
        Self::new(name, PinDirection::Input)
    }

    pub fn output(name: impl Into<String>) -> Self {
        Self::new(name, PinDirection::Output)
    }

    pub fn bidi(name: impl Into<String>) -> Self {
        Self::new(name, PinDirection::Bidirectional)
    }
}
