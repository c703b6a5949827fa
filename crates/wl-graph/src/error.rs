//! Graph-specific error types.

use thiserror::Error;
use wl_core::{CompId, NodeId, PinId, WlError};

/// Construction-time failures of the schematic and the topology builders.
///
/// Validation findings are never reported through this type; they are
/// collected in a [`ValidationReport`](crate::ValidationReport).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("series() requires at least one item")]
    EmptySeries,

    #[error("parallel() requires at least one item")]
    EmptyParallel,

    #[error("junction() requires at least two pins (got {count})")]
    JunctionTooSmall { count: usize },

    #[error("circuit layout has no paths")]
    EmptyLayout,

    #[error("path {index} is empty")]
    EmptyPath { index: usize },

    #[error("Component {component} has no pin named '{pin}'")]
    UnknownPin { component: String, pin: String },

    #[error("Component {id} does not belong to this schematic")]
    UnknownComponent { id: CompId },

    #[error("Node {id} does not belong to this schematic")]
    UnknownNode { id: NodeId },

    #[error("Pin {id} does not belong to this schematic")]
    UnknownPinId { id: PinId },
}

pub type GraphResult<T> = Result<T, GraphError>;

impl From<GraphError> for WlError {
    fn from(err: GraphError) -> Self {
        WlError::Invariant {
            what: err.to_string(),
        }
    }
}
