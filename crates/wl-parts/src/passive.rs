//! Two-terminal passives: resistor, capacitor, inductor.
//!
//! All three use pins "1" and "2" and chain 1 -> 2.

use serde::{Deserialize, Serialize};

use crate::part::Params;
use crate::pins::PinSpec;
use crate::traits::PartSpec;

fn two_terminal() -> Vec<PinSpec> {
    vec![PinSpec::bidi("1"), PinSpec::bidi("2")]
}

/// Resistor extras.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResistorExtras {
    /// Fractional tolerance, e.g. 0.05 for 5 %.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    /// Power rating in watts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_rating: Option<f64>,
}

impl ResistorExtras {
    pub fn is_plain(&self) -> bool {
        self.tolerance.is_none() && self.power_rating.is_none()
    }
}

impl PartSpec for ResistorExtras {
    fn pins(&self) -> Vec<PinSpec> {
        two_terminal()
    }

    fn check(&self, label: &str, params: &Params, problems: &mut Vec<String>) {
        if params.value == 0.0 {
            problems.push(format!("{label}: resistance must be greater than zero"));
        }
        if let Some(tol) = self.tolerance {
            if !(0.0..=1.0).contains(&tol) {
                problems.push(format!(
                    "{label}: tolerance must be between 0 and 1 (got {tol})"
                ));
            }
        }
        if let Some(p) = self.power_rating {
            if p <= 0.0 {
                problems.push(format!("{label}: power rating must be positive (got {p})"));
            }
        }
    }
}

/// Capacitor extras.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacitorExtras {
    /// Maximum working voltage in volts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage_rating: Option<f64>,
    /// Electrolytic/tantalum: pin "1" is the positive lead.
    #[serde(skip_serializing_if = "core::ops::Not::not")]
    pub polarized: bool,
}

impl CapacitorExtras {
    pub fn is_plain(&self) -> bool {
        self.voltage_rating.is_none() && !self.polarized
    }
}

impl PartSpec for CapacitorExtras {
    fn pins(&self) -> Vec<PinSpec> {
        two_terminal()
    }

    fn check(&self, label: &str, params: &Params, problems: &mut Vec<String>) {
        if params.value == 0.0 {
            problems.push(format!("{label}: capacitance must be greater than zero"));
        }
        if let Some(v) = self.voltage_rating {
            if v <= 0.0 {
                problems.push(format!("{label}: voltage rating must be positive (got {v})"));
            }
        }
    }
}

/// Inductor extras.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InductorExtras {
    /// Saturation current in amps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_rating: Option<f64>,
}

impl InductorExtras {
    pub fn is_plain(&self) -> bool {
        self.current_rating.is_none()
    }
}

impl PartSpec for InductorExtras {
    fn pins(&self) -> Vec<PinSpec> {
        two_terminal()
    }

    fn check(&self, label: &str, params: &Params, problems: &mut Vec<String>) {
        if params.value == 0.0 {
            problems.push(format!("{label}: inductance must be greater than zero"));
        }
        if let Some(i) = self.current_rating {
            if i <= 0.0 {
                problems.push(format!("{label}: current rating must be positive (got {i})"));
            }
        }
    }
}
