//! Factory functions: the terse way to describe parts in code.

use crate::digital::{ClockExtras, LOGIC_HIGH_VOLTS, LogicLevelExtras};
use crate::extras::Extras;
use crate::integrated::{GATE_DELAY, GateKind, LogicGateExtras, OPAMP_GAIN, OpAmpExtras};
use crate::part::Part;
use crate::passive::{CapacitorExtras, InductorExtras, ResistorExtras};
use crate::semiconductor::{
    BJT_BETA, BjtExtras, BjtPolarity, DIODE_FORWARD_VOLTAGE, DiodeExtras, LedColor, LedExtras,
    MOSFET_THRESHOLD, MosfetChannel, MosfetExtras,
};
use crate::sources::{
    CurrentSourceExtras, GroundExtras, PowerRailExtras, VoltageSourceExtras, Waveform,
};

pub fn resistor(ohms: f64) -> Part {
    Part::new(ohms, Extras::Resistor(ResistorExtras::default()))
}

pub fn capacitor(farads: f64) -> Part {
    Part::new(farads, Extras::Capacitor(CapacitorExtras::default()))
}

pub fn inductor(henries: f64) -> Part {
    Part::new(henries, Extras::Inductor(InductorExtras::default()))
}

pub fn diode() -> Part {
    Part::new(DIODE_FORWARD_VOLTAGE, Extras::Diode(DiodeExtras::default()))
}

pub fn led(color: LedColor) -> Part {
    Part::new(
        color.forward_voltage(),
        Extras::Led(LedExtras {
            color,
            max_current: None,
        }),
    )
}

pub fn dc(volts: f64) -> Part {
    Part::new(volts, Extras::VoltageSource(VoltageSourceExtras::default()))
}

pub fn ac(volts: f64, hertz: f64) -> Part {
    Part::new(
        volts,
        Extras::VoltageSource(VoltageSourceExtras {
            waveform: Waveform::Ac,
            frequency: Some(hertz),
        }),
    )
}

pub fn current_source(amps: f64) -> Part {
    Part::new(amps, Extras::CurrentSource(CurrentSourceExtras::default()))
}

pub fn ground() -> Part {
    Part::new(0.0, Extras::Ground(GroundExtras::default()))
}

pub fn rail(volts: f64, net: impl Into<String>) -> Part {
    Part::new(volts, Extras::PowerRail(PowerRailExtras { net: net.into() }))
}

pub fn bjt(polarity: BjtPolarity) -> Part {
    Part::new(
        BJT_BETA,
        Extras::Bjt(BjtExtras {
            polarity,
            model: None,
        }),
    )
}

pub fn npn() -> Part {
    bjt(BjtPolarity::Npn)
}

pub fn pnp() -> Part {
    bjt(BjtPolarity::Pnp)
}

pub fn mosfet(channel: MosfetChannel) -> Part {
    Part::new(
        MOSFET_THRESHOLD,
        Extras::Mosfet(MosfetExtras {
            channel,
            model: None,
        }),
    )
}

pub fn nmos() -> Part {
    mosfet(MosfetChannel::N)
}

pub fn pmos() -> Part {
    mosfet(MosfetChannel::P)
}

/// 5-pin op-amp with supply pins.
pub fn opamp() -> Part {
    Part::new(OPAMP_GAIN, Extras::OpAmp(OpAmpExtras::default()))
}

/// 3-pin op-amp (supplies implicit).
pub fn opamp3() -> Part {
    Part::new(OPAMP_GAIN, Extras::OpAmp3(OpAmpExtras::default()))
}

pub fn gate(kind: GateKind) -> Part {
    Part::new(GATE_DELAY, Extras::LogicGate(LogicGateExtras::new(kind)))
}

pub fn gate_with_inputs(kind: GateKind, inputs: u8) -> Part {
    Part::new(GATE_DELAY, Extras::LogicGate(LogicGateExtras { gate: kind, inputs }))
}

pub fn logic_high() -> Part {
    Part::new(
        LOGIC_HIGH_VOLTS,
        Extras::LogicLevel(LogicLevelExtras { high: true }),
    )
}

pub fn logic_low() -> Part {
    Part::new(0.0, Extras::LogicLevel(LogicLevelExtras { high: false }))
}

pub fn clock(hertz: f64) -> Part {
    Part::new(hertz, Extras::Clock(ClockExtras::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::PartSpec;

    #[test]
    fn terse_factories_produce_valid_parts() {
        let parts = [
            resistor(330.0),
            capacitor(1e-6),
            inductor(1e-3),
            diode(),
            led(LedColor::Green),
            dc(5.0),
            ac(1.0, 60.0),
            current_source(0.01),
            ground(),
            rail(3.3, "3V3"),
            npn(),
            pmos(),
            opamp(),
            opamp3(),
            gate(GateKind::Not),
            gate_with_inputs(GateKind::Nand, 4),
            logic_high(),
            clock(1e3),
        ];
        for part in parts {
            let problems = part.validate("X1");
            assert!(problems.is_empty(), "{:?}: {problems:?}", part.kind());
            if part.extras.default_value().is_some() {
                assert!(part.has_default_value(), "{:?}", part.kind());
            }
        }
    }

    #[test]
    fn led_value_tracks_color() {
        assert_eq!(led(LedColor::Blue).value(), 3.2);
        assert!(led(LedColor::Red).has_default_value());
    }
}
