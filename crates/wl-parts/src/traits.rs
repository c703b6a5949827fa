//! Core trait for part variants.

use crate::part::Params;
use crate::pins::PinSpec;

/// Capabilities every part variant provides.
///
/// Implemented by each variant's extras record. The graph layer never looks
/// past this trait, so adding a variant only touches this crate.
pub trait PartSpec {
    /// Pins in declaration order. Count and names are fixed once the part
    /// is placed.
    fn pins(&self) -> Vec<PinSpec>;

    /// Indices into [`pins`](Self::pins) of the incoming (`p1`) and
    /// outgoing (`p2`) series terminals.
    ///
    /// Default: first and second pin. Single-pin variants return `(0, 0)`.
    fn series_terminals(&self) -> (usize, usize) {
        (0, 1)
    }

    /// Primary value implied by the terse factory call, if the variant has one.
    fn default_value(&self) -> Option<f64> {
        None
    }

    /// Variant-specific rules. Push one message per problem, prefixed with
    /// `label`. The base rules (finite, non-negative) are checked by
    /// [`Part::validate`](crate::Part::validate).
    fn check(&self, _label: &str, _params: &Params, _problems: &mut Vec<String>) {}
}
