//! wl-parts: component library for wirelang schematics.
//!
//! Provides the closed set of part variants a schematic can hold:
//! - Passives: resistor, capacitor, inductor
//! - Semiconductors: diode, LED, BJT, MOSFET
//! - Sources and references: voltage/current source, ground, power rail
//! - Integrated: op-amp (5-pin and 3-pin), logic gate
//! - Digital drivers: logic-level constant, clock
//!
//! Every variant exposes the same capabilities through [`PartSpec`]: a pin
//! list, two series terminals for chaining, and a validation routine. A
//! [`Part`] pairs the shared parameter bag with the variant's [`Extras`].
//!
//! # Example
//!
//! ```
//! use wl_parts::{resistor, PartKind};
//!
//! let r = resistor(330.0);
//! assert_eq!(r.kind(), PartKind::Resistor);
//! assert!(r.validate("R1").is_empty());
//! assert!(!resistor(0.0).validate("R2").is_empty());
//! ```

pub mod digital;
pub mod error;
pub mod extras;
pub mod factory;
pub mod integrated;
pub mod kind;
pub mod part;
pub mod passive;
pub mod pins;
pub mod semiconductor;
pub mod sources;
pub mod traits;

// Re-exports
pub use digital::{ClockExtras, LogicLevelExtras};
pub use error::{PartError, PartResult};
pub use extras::Extras;
pub use factory::*;
pub use integrated::{GateKind, LogicGateExtras, OpAmpExtras};
pub use kind::PartKind;
pub use part::{Params, Part};
pub use passive::{CapacitorExtras, InductorExtras, ResistorExtras};
pub use pins::{PinDirection, PinSpec};
pub use semiconductor::{
    BjtExtras, BjtPolarity, DiodeExtras, LedColor, LedExtras, MosfetChannel, MosfetExtras,
};
pub use sources::{
    CurrentSourceExtras, GroundExtras, PowerRailExtras, VoltageSourceExtras, Waveform,
};
pub use traits::PartSpec;
