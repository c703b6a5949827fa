//! Schematic validation.
//!
//! Validation never fails: every finding is collected into a
//! [`ValidationReport`]. Component rule violations are errors; wiring
//! smells are warnings.

use serde::Serialize;

use crate::schematic::Schematic;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

impl Schematic {
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.component_ids().is_empty() {
            errors.push("Circuit has no components".to_string());
        }

        for comp in self.components() {
            errors.extend(comp.validate());
        }

        for pin in self.unconnected_pins() {
            warnings.push(format!("Pin {} is not connected", self.pin_full_name(pin)));
        }

        for node in self.nodes().filter(|n| !n.is_ground()) {
            let pins = self.pins_at_node(node.id);
            if let [only] = pins.as_slice() {
                warnings.push(format!(
                    "Node {} has only one connection ({})",
                    node.display_name(),
                    self.pin_full_name(*only)
                ));
            }
        }

        let has_ground =
            self.nodes().any(|n| n.is_ground()) || self.components().any(|c| c.kind().is_ground());
        if !has_ground {
            warnings.push("Circuit has no ground reference".to_string());
        }

        ValidationReport::new(errors, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_parts::{dc, ground, resistor};

    #[test]
    fn empty_schematic_is_invalid() {
        let report = Schematic::new("empty").validate();
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["Circuit has no components"]);
        assert!(report.warnings.iter().any(|w| w.contains("ground")));
    }

    #[test]
    fn component_errors_are_errors() {
        let mut s = Schematic::new("t");
        s.place(resistor(0.0));
        s.place(ground());
        let report = s.validate();
        assert!(!report.valid);
        assert!(report.errors[0].contains("resistance"));
        assert!(report.errors[0].starts_with("R1"));
    }

    #[test]
    fn dangling_node_warns() {
        let mut s = Schematic::new("t");
        let v = s.place(dc(5.0));
        let n = s.create_node(None);
        let p = s.p2(v).unwrap();
        s.connect(p, n).unwrap();
        let report = s.validate();
        assert!(report.valid);
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.contains("only one connection") && w.contains("V1.positive"))
        );
        assert!(report.warnings.iter().any(|w| w == "Pin V1.negative is not connected"));
    }

    #[test]
    fn ground_node_counts_as_reference() {
        let mut s = Schematic::new("t");
        let r = s.place(resistor(10.0));
        let gnd = s.ground_node();
        let p = s.p2(r).unwrap();
        s.connect(p, gnd).unwrap();
        let report = s.validate();
        assert!(!report.warnings.iter().any(|w| w.contains("ground")));
        // single-pin ground node is not flagged
        assert!(!report.warnings.iter().any(|w| w.contains("GND has only")));
    }
}
