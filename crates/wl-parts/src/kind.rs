//! Variant tags.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PartError;

/// The closed set of part variants. The serialized form is the document's
/// `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    Resistor,
    Capacitor,
    Inductor,
    Diode,
    Led,
    VoltageSource,
    CurrentSource,
    Ground,
    PowerRail,
    Bjt,
    Mosfet,
    #[serde(rename = "opamp")]
    OpAmp,
    #[serde(rename = "opamp3")]
    OpAmp3,
    LogicGate,
    LogicLevel,
    Clock,
}

impl PartKind {
    pub const ALL: [PartKind; 16] = [
        PartKind::Resistor,
        PartKind::Capacitor,
        PartKind::Inductor,
        PartKind::Diode,
        PartKind::Led,
        PartKind::VoltageSource,
        PartKind::CurrentSource,
        PartKind::Ground,
        PartKind::PowerRail,
        PartKind::Bjt,
        PartKind::Mosfet,
        PartKind::OpAmp,
        PartKind::OpAmp3,
        PartKind::LogicGate,
        PartKind::LogicLevel,
        PartKind::Clock,
    ];

    /// Stable tag, also used as the prefix of generated component ids.
    pub fn tag(self) -> &'static str {
        match self {
            PartKind::Resistor => "resistor",
            PartKind::Capacitor => "capacitor",
            PartKind::Inductor => "inductor",
            PartKind::Diode => "diode",
            PartKind::Led => "led",
            PartKind::VoltageSource => "voltage_source",
            PartKind::CurrentSource => "current_source",
            PartKind::Ground => "ground",
            PartKind::PowerRail => "power_rail",
            PartKind::Bjt => "bjt",
            PartKind::Mosfet => "mosfet",
            PartKind::OpAmp => "opamp",
            PartKind::OpAmp3 => "opamp3",
            PartKind::LogicGate => "logic_gate",
            PartKind::LogicLevel => "logic_level",
            PartKind::Clock => "clock",
        }
    }

    /// Prefix for auto-generated labels ("R" -> "R1", "R2", ...).
    pub fn label_prefix(self) -> &'static str {
        match self {
            PartKind::Resistor => "R",
            PartKind::Capacitor => "C",
            PartKind::Inductor => "L",
            PartKind::Diode => "D",
            PartKind::Led => "LED",
            PartKind::VoltageSource => "V",
            PartKind::CurrentSource => "I",
            PartKind::Ground => "GND",
            PartKind::PowerRail => "PWR",
            PartKind::Bjt => "Q",
            PartKind::Mosfet => "M",
            PartKind::OpAmp | PartKind::OpAmp3 => "U",
            PartKind::LogicGate => "G",
            PartKind::LogicLevel => "LOGIC",
            PartKind::Clock => "CLK",
        }
    }

    /// Unit of the primary value.
    pub fn unit(self) -> &'static str {
        match self {
            PartKind::Resistor => "Ω",
            PartKind::Capacitor => "F",
            PartKind::Inductor => "H",
            PartKind::Diode
            | PartKind::Led
            | PartKind::VoltageSource
            | PartKind::Ground
            | PartKind::PowerRail
            | PartKind::Mosfet
            | PartKind::LogicLevel => "V",
            PartKind::CurrentSource => "A",
            PartKind::Bjt => "hFE",
            PartKind::OpAmp | PartKind::OpAmp3 => "V/V",
            PartKind::LogicGate => "s",
            PartKind::Clock => "Hz",
        }
    }

    pub fn is_ground(self) -> bool {
        self == PartKind::Ground
    }

    /// Voltage and current sources: the parts whose "negative" pin is
    /// auto-grounded.
    pub fn is_source(self) -> bool {
        matches!(self, PartKind::VoltageSource | PartKind::CurrentSource)
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PartKind {
    type Err = PartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartKind::ALL
            .into_iter()
            .find(|k| k.tag() == s)
            .ok_or_else(|| PartError::UnknownKind { tag: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        for kind in PartKind::ALL {
            assert_eq!(kind.tag().parse::<PartKind>().unwrap(), kind);
        }
    }

    #[test]
    fn serde_tag_matches_tag() {
        for kind in PartKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.tag()));
        }
    }

    #[test]
    fn unknown_tag_rejected() {
        assert!(matches!(
            "tube".parse::<PartKind>(),
            Err(PartError::UnknownKind { .. })
        ));
    }
}
