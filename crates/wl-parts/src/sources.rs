//! Sources and references: voltage source, current source, ground, power rail.

use serde::{Deserialize, Serialize};

use crate::part::Params;
use crate::pins::PinSpec;
use crate::traits::PartSpec;

/// Sources declare `positive` then `negative`, but chain negative -> positive
/// so a series loop reads in the direction conventional current flows.
fn source_pins() -> Vec<PinSpec> {
    vec![PinSpec::bidi("positive"), PinSpec::bidi("negative")]
}

const SOURCE_TERMINALS: (usize, usize) = (1, 0);

/// Name of the single pin of a ground symbol.
pub const GROUND_PIN: &str = "GND";

/// Name of the return pin auto-connected to ground.
pub const NEGATIVE_PIN: &str = "negative";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    #[default]
    Dc,
    Ac,
    Square,
}

/// Voltage source extras. Primary value is the amplitude (DC level for `dc`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VoltageSourceExtras {
    pub waveform: Waveform,
    /// Frequency in Hz; required for `ac` and `square`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
}

impl PartSpec for VoltageSourceExtras {
    fn pins(&self) -> Vec<PinSpec> {
        source_pins()
    }

    fn series_terminals(&self) -> (usize, usize) {
        SOURCE_TERMINALS
    }

    fn check(&self, label: &str, _params: &Params, problems: &mut Vec<String>) {
        match (self.waveform, self.frequency) {
            (Waveform::Dc, _) => {}
            (_, Some(f)) if f > 0.0 => {}
            (_, Some(f)) => problems.push(format!(
                "{label}: AC source frequency must be greater than zero (got {f})"
            )),
            (_, None) => problems.push(format!("{label}: AC source requires a frequency")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentSourceExtras {}

impl PartSpec for CurrentSourceExtras {
    fn pins(&self) -> Vec<PinSpec> {
        source_pins()
    }

    fn series_terminals(&self) -> (usize, usize) {
        SOURCE_TERMINALS
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundExtras {}

impl PartSpec for GroundExtras {
    fn pins(&self) -> Vec<PinSpec> {
        vec![PinSpec::bidi(GROUND_PIN)]
    }

    fn series_terminals(&self) -> (usize, usize) {
        (0, 0)
    }

    fn default_value(&self) -> Option<f64> {
        Some(0.0)
    }

    fn check(&self, label: &str, params: &Params, problems: &mut Vec<String>) {
        if params.value != 0.0 {
            problems.push(format!(
                "{label}: ground reference must be 0 V (got {})",
                params.value
            ));
        }
    }
}

/// Power rail extras. Primary value is the rail voltage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerRailExtras {
    /// Net name printed on the rail symbol, e.g. "VCC" or "3V3".
    pub net: String,
}

impl Default for PowerRailExtras {
    fn default() -> Self {
        Self { net: "VCC".into() }
    }
}

impl PartSpec for PowerRailExtras {
    fn pins(&self) -> Vec<PinSpec> {
        vec![PinSpec::output("out")]
    }

    fn series_terminals(&self) -> (usize, usize) {
        (0, 0)
    }

    fn check(&self, label: &str, _params: &Params, problems: &mut Vec<String>) {
        if self.net.trim().is_empty() {
            problems.push(format!("{label}: power rail needs a net name"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volts(value: f64) -> Params {
        Params {
            value,
            unit: "V".into(),
        }
    }

    #[test]
    fn source_chains_negative_to_positive() {
        let extras = VoltageSourceExtras::default();
        let pins = extras.pins();
        let (p1, p2) = extras.series_terminals();
        assert_eq!(pins[p1].name, "negative");
        assert_eq!(pins[p2].name, "positive");
    }

    #[test]
    fn ac_without_frequency_flagged() {
        let extras = VoltageSourceExtras {
            waveform: Waveform::Ac,
            frequency: None,
        };
        let mut problems = Vec::new();
        extras.check("V1", &volts(5.0), &mut problems);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("frequency"));
    }

    #[test]
    fn dc_has_no_frequency_rule() {
        let mut problems = Vec::new();
        VoltageSourceExtras::default().check("V1", &volts(5.0), &mut problems);
        assert!(problems.is_empty());
    }

    #[test]
    fn ground_single_pin() {
        let g = GroundExtras::default();
        assert_eq!(g.pins().len(), 1);
        assert_eq!(g.series_terminals(), (0, 0));
    }
}
