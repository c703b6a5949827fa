//! Integrated parts: op-amps and logic gates.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PartError;
use crate::part::Params;
use crate::pins::PinSpec;
use crate::traits::PartSpec;

/// Default open-loop gain.
pub const OPAMP_GAIN: f64 = 100_000.0;
/// Default gate propagation delay in seconds.
pub const GATE_DELAY: f64 = 10e-9;
/// Widest gate supported.
pub const MAX_GATE_INPUTS: u8 = 8;

const INPUT_NAMES: [&str; MAX_GATE_INPUTS as usize] = ["A", "B", "C", "D", "E", "F", "G", "H"];

/// Op-amp extras, shared by the 5-pin and 3-pin variants. Primary value is
/// the open-loop gain.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpAmpExtras {
    /// Part number, e.g. "TL072".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl OpAmpExtras {
    /// Signal pins, plus V+ / V- when the supply is exposed. Which of the two
    /// applies is decided by the variant tag, not stored here.
    pub fn pin_list(&self, supply_pins: bool) -> Vec<PinSpec> {
        let mut pins = vec![
            PinSpec::input("in+"),
            PinSpec::input("in-"),
            PinSpec::output("out"),
        ];
        if supply_pins {
            pins.push(PinSpec::input("V+"));
            pins.push(PinSpec::input("V-"));
        }
        pins
    }
}

impl PartSpec for OpAmpExtras {
    /// The 3-pin signal-only form.
    fn pins(&self) -> Vec<PinSpec> {
        self.pin_list(false)
    }

    /// Chains through the non-inverting input to the output.
    fn series_terminals(&self) -> (usize, usize) {
        (0, 2)
    }

    fn default_value(&self) -> Option<f64> {
        Some(OPAMP_GAIN)
    }

    fn check(&self, label: &str, params: &Params, problems: &mut Vec<String>) {
        if params.value == 0.0 {
            problems.push(format!(
                "{label}: open-loop gain must be greater than zero"
            ));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    #[default]
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
}

impl GateKind {
    pub const ALL: [GateKind; 7] = [
        GateKind::And,
        GateKind::Or,
        GateKind::Not,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Xor,
        GateKind::Xnor,
    ];

    /// Factory name in the script language (`NAND()`).
    pub fn symbol(self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Xnor => "XNOR",
        }
    }

    pub fn default_inputs(self) -> u8 {
        match self {
            GateKind::Not => 1,
            _ => 2,
        }
    }
}

impl FromStr for GateKind {
    type Err = PartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateKind::ALL
            .into_iter()
            .find(|g| g.symbol().eq_ignore_ascii_case(s))
            .ok_or_else(|| PartError::UnknownName {
                what: "gate",
                name: s.to_string(),
            })
    }
}

/// Logic gate extras. Primary value is the propagation delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogicGateExtras {
    pub gate: GateKind,
    pub inputs: u8,
}

impl LogicGateExtras {
    pub fn new(gate: GateKind) -> Self {
        Self {
            gate,
            inputs: gate.default_inputs(),
        }
    }
}

impl Default for LogicGateExtras {
    fn default() -> Self {
        Self::new(GateKind::default())
    }
}

impl PartSpec for LogicGateExtras {
    /// Inputs "A", "B", ... then output "Y".
    fn pins(&self) -> Vec<PinSpec> {
        let count = self.inputs.min(MAX_GATE_INPUTS) as usize;
        let mut pins: Vec<PinSpec> = INPUT_NAMES[..count]
            .iter()
            .map(|name| PinSpec::input(*name))
            .collect();
        pins.push(PinSpec::output("Y"));
        pins
    }

    /// First input to the output. A gate with no inputs chains through "Y".
    fn series_terminals(&self) -> (usize, usize) {
        let count = self.inputs.min(MAX_GATE_INPUTS) as usize;
        (0, count)
    }

    fn default_value(&self) -> Option<f64> {
        Some(GATE_DELAY)
    }

    fn check(&self, label: &str, _params: &Params, problems: &mut Vec<String>) {
        match self.gate {
            GateKind::Not if self.inputs != 1 => problems.push(format!(
                "{label}: NOT gate takes exactly one input (got {})",
                self.inputs
            )),
            GateKind::Not => {}
            _ if !(2..=MAX_GATE_INPUTS).contains(&self.inputs) => problems.push(format!(
                "{label}: {} gate needs 2 to {MAX_GATE_INPUTS} inputs (got {})",
                self.gate.symbol(),
                self.inputs
            )),
            _ => {}
        }
    }
}
