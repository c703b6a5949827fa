//! Digital drivers: logic-level constants and clock sources.

use serde::{Deserialize, Serialize};

use crate::part::Params;
use crate::pins::PinSpec;
use crate::traits::PartSpec;

/// Logic-high voltage of a `HIGH()` constant.
pub const LOGIC_HIGH_VOLTS: f64 = 5.0;

fn driver() -> Vec<PinSpec> {
    vec![PinSpec::output("out")]
}

/// Logic-level constant extras. Primary value is the driven voltage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogicLevelExtras {
    pub high: bool,
}

impl PartSpec for LogicLevelExtras {
    fn pins(&self) -> Vec<PinSpec> {
        driver()
    }

    fn series_terminals(&self) -> (usize, usize) {
        (0, 0)
    }

    fn default_value(&self) -> Option<f64> {
        Some(if self.high { LOGIC_HIGH_VOLTS } else { 0.0 })
    }
}

/// Clock extras. Primary value is the frequency in Hz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockExtras {
    /// Fraction of the period spent high, in (0, 1).
    pub duty_cycle: f64,
}

impl ClockExtras {
    pub const DEFAULT_DUTY_CYCLE: f64 = 0.5;
}

impl Default for ClockExtras {
    fn default() -> Self {
        Self {
            duty_cycle: Self::DEFAULT_DUTY_CYCLE,
        }
    }
}

impl PartSpec for ClockExtras {
    fn pins(&self) -> Vec<PinSpec> {
        driver()
    }

    fn series_terminals(&self) -> (usize, usize) {
        (0, 0)
    }

    fn check(&self, label: &str, params: &Params, problems: &mut Vec<String>) {
        if params.value == 0.0 {
            problems.push(format!("{label}: clock frequency must be greater than zero"));
        }
        if !(self.duty_cycle > 0.0 && self.duty_cycle < 1.0) {
            problems.push(format!(
                "{label}: duty cycle must be between 0 and 1 (got {})",
                self.duty_cycle
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_rules() {
        let params = Params {
            value: 0.0,
            unit: "Hz".into(),
        };
        let mut problems = Vec::new();
        ClockExtras { duty_cycle: 1.0 }.check("CLK1", &params, &mut problems);
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn logic_level_defaults() {
        assert_eq!(
            LogicLevelExtras { high: true }.default_value(),
            Some(LOGIC_HIGH_VOLTS)
        );
        assert_eq!(LogicLevelExtras { high: false }.default_value(), Some(0.0));
    }
}
