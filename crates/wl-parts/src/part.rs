//! Parameter bag and the unplaced part description.

use serde::{Deserialize, Serialize};

use crate::extras::Extras;
use crate::kind::PartKind;
use crate::pins::PinSpec;
use crate::traits::PartSpec;

/// Shared parameter bag: the primary value and its unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub value: f64,
    pub unit: String,
}

/// A part that has not been placed in a schematic yet: no ids, no label,
/// no node bindings. Placing it allocates those.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub params: Params,
    pub extras: Extras,
}

impl Part {
    /// Create a part with the unit implied by its variant.
    pub fn new(value: f64, extras: Extras) -> Self {
        Self {
            params: Params {
                value,
                unit: extras.kind().unit().to_string(),
            },
            extras,
        }
    }

    pub fn kind(&self) -> PartKind {
        self.extras.kind()
    }

    pub fn value(&self) -> f64 {
        self.params.value
    }

    pub fn pins(&self) -> Vec<PinSpec> {
        self.extras.pins()
    }

    pub fn series_terminals(&self) -> (usize, usize) {
        self.extras.series_terminals()
    }

    /// True when the primary value is what the terse factory would pick.
    pub fn has_default_value(&self) -> bool {
        self.extras.default_value() == Some(self.params.value)
    }

    /// Attach a part number. Only diodes, transistors and op-amps carry one;
    /// other variants are returned unchanged.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        let slot = match &mut self.extras {
            Extras::Diode(e) => &mut e.model,
            Extras::Bjt(e) => &mut e.model,
            Extras::Mosfet(e) => &mut e.model,
            Extras::OpAmp(e) | Extras::OpAmp3(e) => &mut e.model,
            _ => return self,
        };
        *slot = Some(model.into());
        self
    }

    /// Run the base rules and the variant's own rules. Returns one message per
    /// problem; empty means valid.
    pub fn validate(&self, label: &str) -> Vec<String> {
        let mut problems = Vec::new();
        let value = self.params.value;
        if !value.is_finite() {
            problems.push(format!("{label}: value must be a finite number"));
            return problems;
        }
        if value < 0.0 {
            problems.push(format!("{label}: value must not be negative (got {value})"));
        }
        self.extras.check(label, &self.params, &mut problems);
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::*;

    #[test]
    fn negative_value_always_invalid() {
        for part in [resistor(-1.0), capacitor(-1e-6), dc(-5.0), clock(-1.0)] {
            let problems = part.validate("X1");
            assert!(
                problems.iter().any(|p| p.contains("negative")),
                "{:?} should reject negative value",
                part.kind()
            );
        }
    }

    #[test]
    fn non_finite_value_rejected() {
        let problems = resistor(f64::NAN).validate("R1");
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("finite"));
    }

    #[test]
    fn unit_follows_kind() {
        assert_eq!(resistor(1.0).params.unit, "Ω");
        assert_eq!(clock(1.0).params.unit, "Hz");
    }

    #[test]
    fn model_only_on_modelled_parts() {
        let d = diode().model("1N4148");
        assert!(matches!(&d.extras, Extras::Diode(e) if e.model.as_deref() == Some("1N4148")));
        let r = resistor(10.0).model("ignored");
        assert_eq!(r, resistor(10.0));
    }
}
