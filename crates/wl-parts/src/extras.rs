//! The variant-tagged extension record.

use serde::{Deserialize, Serialize};

use crate::digital::{ClockExtras, LogicLevelExtras};
use crate::integrated::{LogicGateExtras, OpAmpExtras};
use crate::kind::PartKind;
use crate::part::Params;
use crate::passive::{CapacitorExtras, InductorExtras, ResistorExtras};
use crate::pins::PinSpec;
use crate::semiconductor::{BjtExtras, DiodeExtras, LedExtras, MosfetExtras};
use crate::sources::{CurrentSourceExtras, GroundExtras, PowerRailExtras, VoltageSourceExtras};
use crate::traits::PartSpec;

/// Variant-specific fields of a part, one arm per [`PartKind`].
///
/// Serialized with an internal `type` tag equal to the kind tag, so a
/// document's `extras` object is self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Extras {
    Resistor(ResistorExtras),
    Capacitor(CapacitorExtras),
    Inductor(InductorExtras),
    Diode(DiodeExtras),
    Led(LedExtras),
    VoltageSource(VoltageSourceExtras),
    CurrentSource(CurrentSourceExtras),
    Ground(GroundExtras),
    PowerRail(PowerRailExtras),
    Bjt(BjtExtras),
    Mosfet(MosfetExtras),
    #[serde(rename = "opamp")]
    OpAmp(OpAmpExtras),
    #[serde(rename = "opamp3")]
    OpAmp3(OpAmpExtras),
    LogicGate(LogicGateExtras),
    LogicLevel(LogicLevelExtras),
    Clock(ClockExtras),
}

impl Extras {
    pub fn kind(&self) -> PartKind {
        match self {
            Extras::Resistor(_) => PartKind::Resistor,
            Extras::Capacitor(_) => PartKind::Capacitor,
            Extras::Inductor(_) => PartKind::Inductor,
            Extras::Diode(_) => PartKind::Diode,
            Extras::Led(_) => PartKind::Led,
            Extras::VoltageSource(_) => PartKind::VoltageSource,
            Extras::CurrentSource(_) => PartKind::CurrentSource,
            Extras::Ground(_) => PartKind::Ground,
            Extras::PowerRail(_) => PartKind::PowerRail,
            Extras::Bjt(_) => PartKind::Bjt,
            Extras::Mosfet(_) => PartKind::Mosfet,
            Extras::OpAmp(_) => PartKind::OpAmp,
            Extras::OpAmp3(_) => PartKind::OpAmp3,
            Extras::LogicGate(_) => PartKind::LogicGate,
            Extras::LogicLevel(_) => PartKind::LogicLevel,
            Extras::Clock(_) => PartKind::Clock,
        }
    }

    /// Default extras for a kind, as produced by its plainest factory call.
    pub fn default_for(kind: PartKind) -> Self {
        match kind {
            PartKind::Resistor => Extras::Resistor(Default::default()),
            PartKind::Capacitor => Extras::Capacitor(Default::default()),
            PartKind::Inductor => Extras::Inductor(Default::default()),
            PartKind::Diode => Extras::Diode(Default::default()),
            PartKind::Led => Extras::Led(Default::default()),
            PartKind::VoltageSource => Extras::VoltageSource(Default::default()),
            PartKind::CurrentSource => Extras::CurrentSource(Default::default()),
            PartKind::Ground => Extras::Ground(Default::default()),
            PartKind::PowerRail => Extras::PowerRail(Default::default()),
            PartKind::Bjt => Extras::Bjt(Default::default()),
            PartKind::Mosfet => Extras::Mosfet(Default::default()),
            PartKind::OpAmp => Extras::OpAmp(Default::default()),
            PartKind::OpAmp3 => Extras::OpAmp3(Default::default()),
            PartKind::LogicGate => Extras::LogicGate(Default::default()),
            PartKind::LogicLevel => Extras::LogicLevel(Default::default()),
            PartKind::Clock => Extras::Clock(Default::default()),
        }
    }

    fn spec(&self) -> &dyn PartSpec {
        match self {
            Extras::Resistor(e) => e,
            Extras::Capacitor(e) => e,
            Extras::Inductor(e) => e,
            Extras::Diode(e) => e,
            Extras::Led(e) => e,
            Extras::VoltageSource(e) => e,
            Extras::CurrentSource(e) => e,
            Extras::Ground(e) => e,
            Extras::PowerRail(e) => e,
            Extras::Bjt(e) => e,
            Extras::Mosfet(e) => e,
            Extras::OpAmp(e) | Extras::OpAmp3(e) => e,
            Extras::LogicGate(e) => e,
            Extras::LogicLevel(e) => e,
            Extras::Clock(e) => e,
        }
    }
}

impl PartSpec for Extras {
    fn pins(&self) -> Vec<PinSpec> {
        match self {
            Extras::OpAmp(e) => e.pin_list(true),
            other => other.spec().pins(),
        }
    }

    fn series_terminals(&self) -> (usize, usize) {
        self.spec().series_terminals()
    }

    fn default_value(&self) -> Option<f64> {
        self.spec().default_value()
    }

    fn check(&self, label: &str, params: &Params, problems: &mut Vec<String>) {
        self.spec().check(label, params, problems);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_for_matches_kind() {
        for kind in PartKind::ALL {
            assert_eq!(Extras::default_for(kind).kind(), kind);
        }
    }

    #[test]
    fn series_terminals_in_range() {
        for kind in PartKind::ALL {
            let extras = Extras::default_for(kind);
            let n = extras.pins().len();
            let (p1, p2) = extras.series_terminals();
            assert!(p1 < n && p2 < n, "{kind}: terminals out of range");
        }
    }

    #[test]
    fn serde_tag_is_kind_tag() {
        for kind in PartKind::ALL {
            let json = serde_json::to_value(Extras::default_for(kind)).unwrap();
            assert_eq!(json["type"], kind.tag());
            let back: Extras = serde_json::from_value(json).unwrap();
            assert_eq!(back.kind(), kind);
        }
    }

    #[test]
    fn five_pin_opamp_survives_serde() {
        let json = serde_json::to_string(&Extras::default_for(PartKind::OpAmp)).unwrap();
        let back: Extras = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pins().len(), 5);
    }
}
