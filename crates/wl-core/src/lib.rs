//! wl-core: stable foundation for wirelang.
//!
//! Contains:
//! - ids (compact arena IDs for nodes, pins and components)
//! - units (SI-prefix multipliers, parsing and formatting)
//! - numeric (float helpers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{WlError, WlResult};
pub use ids::*;
pub use numeric::*;
