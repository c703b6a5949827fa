//! wl-graph: circuit topology layer for wirelang.
//!
//! Provides:
//! - Pin, node and component records held in a schematic arena
//! - The [`Schematic`] container with registration, binding and validation
//! - Ground merging and auto-grounding of sources
//! - Topology builders: series, parallel, wire, junction and multi-path
//! - The [`circuit`] entry point
//!
//! # Example
//!
//! ```
//! use wl_graph::{Item, Schematic, apply_to_circuit, series};
//! use wl_parts::{dc, ground, resistor};
//!
//! let mut s = Schematic::new("Divider");
//! let chain = series(
//!     &mut s,
//!     [dc(12.0), resistor(10e3), resistor(10e3), ground()].map(Item::from),
//! )
//! .unwrap();
//! apply_to_circuit(&mut s, &chain);
//! s.auto_connect_grounds().unwrap();
//!
//! assert_eq!(s.component_ids().len(), 4);
//! assert_eq!(s.node_ids().len(), 3);
//! ```

pub mod builder;
pub mod circuit;
pub mod error;
pub mod graph;
pub mod ground;
pub mod schematic;
pub mod sequence;
pub mod validate;

// Re-exports for ergonomics
pub use builder::{ConnectionResult, Item, apply_to_circuit, junction, parallel, paths, series, wire};
pub use circuit::{CircuitOptions, Layout, circuit, circuit_with};
pub use error::{GraphError, GraphResult};
pub use graph::{Component, Node, Pin};
pub use ground::AutoGroundReport;
pub use schematic::Schematic;
pub use validate::ValidationReport;
