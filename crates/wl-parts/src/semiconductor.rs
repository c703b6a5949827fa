//! Semiconductors: diode, LED, BJT, MOSFET.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PartError;
use crate::part::Params;
use crate::pins::PinSpec;
use crate::traits::PartSpec;

/// Default silicon forward drop in volts.
pub const DIODE_FORWARD_VOLTAGE: f64 = 0.7;
/// Default small-signal current gain.
pub const BJT_BETA: f64 = 100.0;
/// Default gate threshold magnitude in volts.
pub const MOSFET_THRESHOLD: f64 = 2.0;

fn polarized() -> Vec<PinSpec> {
    vec![PinSpec::bidi("anode"), PinSpec::bidi("cathode")]
}

fn check_max_current(label: &str, max_current: Option<f64>, problems: &mut Vec<String>) {
    if let Some(i) = max_current {
        if i <= 0.0 {
            problems.push(format!(
                "{label}: maximum current must be positive (got {i})"
            ));
        }
    }
}

/// Diode extras. Primary value is the forward voltage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiodeExtras {
    /// Part number, e.g. "1N4148".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_current: Option<f64>,
}

impl PartSpec for DiodeExtras {
    fn pins(&self) -> Vec<PinSpec> {
        polarized()
    }

    fn default_value(&self) -> Option<f64> {
        Some(DIODE_FORWARD_VOLTAGE)
    }

    fn check(&self, label: &str, _params: &Params, problems: &mut Vec<String>) {
        check_max_current(label, self.max_current, problems);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedColor {
    #[default]
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    White,
}

impl LedColor {
    pub const ALL: [LedColor; 6] = [
        LedColor::Red,
        LedColor::Orange,
        LedColor::Yellow,
        LedColor::Green,
        LedColor::Blue,
        LedColor::White,
    ];

    /// Typical forward voltage for the color.
    pub fn forward_voltage(self) -> f64 {
        match self {
            LedColor::Red => 1.8,
            LedColor::Orange | LedColor::Yellow => 2.0,
            LedColor::Green => 2.1,
            LedColor::Blue | LedColor::White => 3.2,
        }
    }

    /// Upper-case constant name used by the script language (`LED(RED)`).
    pub fn symbol(self) -> &'static str {
        match self {
            LedColor::Red => "RED",
            LedColor::Orange => "ORANGE",
            LedColor::Yellow => "YELLOW",
            LedColor::Green => "GREEN",
            LedColor::Blue => "BLUE",
            LedColor::White => "WHITE",
        }
    }
}

impl FromStr for LedColor {
    type Err = PartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LedColor::ALL
            .into_iter()
            .find(|c| c.symbol().eq_ignore_ascii_case(s))
            .ok_or_else(|| PartError::UnknownName {
                what: "LED color",
                name: s.to_string(),
            })
    }
}

/// LED extras. Primary value is the forward voltage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedExtras {
    pub color: LedColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_current: Option<f64>,
}

impl PartSpec for LedExtras {
    fn pins(&self) -> Vec<PinSpec> {
        polarized()
    }

    fn default_value(&self) -> Option<f64> {
        Some(self.color.forward_voltage())
    }

    fn check(&self, label: &str, _params: &Params, problems: &mut Vec<String>) {
        check_max_current(label, self.max_current, problems);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BjtPolarity {
    #[default]
    Npn,
    Pnp,
}

/// BJT extras. Primary value is beta (hFE).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BjtExtras {
    pub polarity: BjtPolarity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl PartSpec for BjtExtras {
    fn pins(&self) -> Vec<PinSpec> {
        vec![
            PinSpec::input("B"),
            PinSpec::bidi("C"),
            PinSpec::bidi("E"),
        ]
    }

    /// Conventional current: NPN collector -> emitter, PNP emitter -> collector.
    fn series_terminals(&self) -> (usize, usize) {
        match self.polarity {
            BjtPolarity::Npn => (1, 2),
            BjtPolarity::Pnp => (2, 1),
        }
    }

    fn default_value(&self) -> Option<f64> {
        Some(BJT_BETA)
    }

    fn check(&self, label: &str, params: &Params, problems: &mut Vec<String>) {
        if params.value == 0.0 {
            problems.push(format!(
                "{label}: current gain (beta) must be greater than zero"
            ));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MosfetChannel {
    #[default]
    N,
    P,
}

/// MOSFET extras. Primary value is the threshold voltage magnitude.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MosfetExtras {
    pub channel: MosfetChannel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl PartSpec for MosfetExtras {
    fn pins(&self) -> Vec<PinSpec> {
        vec![
            PinSpec::input("G"),
            PinSpec::bidi("D"),
            PinSpec::bidi("S"),
        ]
    }

    fn series_terminals(&self) -> (usize, usize) {
        match self.channel {
            MosfetChannel::N => (1, 2),
            MosfetChannel::P => (2, 1),
        }
    }

    fn default_value(&self) -> Option<f64> {
        Some(MOSFET_THRESHOLD)
    }
}
