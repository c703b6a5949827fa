//! Part factories callable from scripts.
//!
//! Each factory has a terse form (`R(330)`, `LED(RED)`, `NAND(3)`) and a
//! verbose form taking one object: `R({ value: 1k, tolerance: 0.01 })`.
//! Verbose fields overlay the factory's default extras, so any field the
//! document format knows can be set.

use wl_parts::{
    Extras, GateKind, LedColor, Part, PartSpec, ac, capacitor, clock, current_source, dc,
    diode, gate, gate_with_inputs, ground, inductor, led, logic_high, logic_low, nmos, npn,
    opamp, opamp3, pmos, pnp, rail, resistor,
};

use crate::error::{ScriptError, ScriptResult};
use crate::value::{Value, field};

/// Names that resolve to a part factory.
pub const FACTORY_NAMES: &[&str] = &[
    "R", "C", "L", "D", "LED", "DC", "AC", "V", "I", "GND", "Rail", "NPN", "PNP", "BJT",
    "NMOS", "PMOS", "MOSFET", "OpAmp", "OpAmp3", "Gate", "AND", "OR", "NOT", "NAND", "NOR",
    "XOR", "XNOR", "HIGH", "LOW", "Logic", "Clock",
];

pub fn is_factory(name: &str) -> bool {
    FACTORY_NAMES.contains(&name)
}

/// Positional arguments of one factory call.
struct Args<'a> {
    name: &'a str,
    values: &'a [Value],
    line: usize,
}

impl Args<'_> {
    fn arity(&self, min: usize, max: usize) -> ScriptResult<()> {
        let n = self.values.len();
        if n < min || n > max {
            let expected = if min == max {
                min.to_string()
            } else {
                format!("{min} to {max}")
            };
            return Err(ScriptError::eval(
                self.line,
                format!("{}() takes {expected} argument(s), got {n}", self.name),
            ));
        }
        Ok(())
    }

    fn number(&self, i: usize) -> ScriptResult<f64> {
        self.values[i].as_number(self.line, &format!("{}() argument {}", self.name, i + 1))
    }

    fn text(&self, i: usize) -> ScriptResult<Option<&str>> {
        self.values
            .get(i)
            .map(|v| v.as_text(self.line, &format!("{}() argument {}", self.name, i + 1)))
            .transpose()
    }

    fn with_model(&self, part: Part) -> ScriptResult<Part> {
        self.arity(0, 1)?;
        Ok(match self.text(0)? {
            Some(model) => part.model(model),
            None => part,
        })
    }

    fn inputs(&self, i: usize) -> ScriptResult<Option<u8>> {
        let Some(value) = self.values.get(i) else {
            return Ok(None);
        };
        let n = value.as_number(self.line, "gate input count")?;
        if n.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&n) {
            return Err(ScriptError::eval(
                self.line,
                format!("gate input count must be a whole number, got {n}"),
            ));
        }
        Ok(Some(n as u8))
    }
}

/// The part a factory builds when called with no customisation. The
/// verbose form starts from its extras.
fn base(name: &str) -> Option<Part> {
    let part = match name {
        "R" => resistor(0.0),
        "C" => capacitor(0.0),
        "L" => inductor(0.0),
        "D" => diode(),
        "LED" => led(LedColor::default()),
        "DC" | "V" => dc(0.0),
        "AC" => ac(0.0, 0.0),
        "I" => current_source(0.0),
        "GND" => ground(),
        "Rail" => rail(0.0, "VCC"),
        "NPN" | "BJT" => npn(),
        "PNP" => pnp(),
        "NMOS" | "MOSFET" => nmos(),
        "PMOS" => pmos(),
        "OpAmp" => opamp(),
        "OpAmp3" => opamp3(),
        "Gate" => gate(GateKind::default()),
        "HIGH" | "Logic" => logic_high(),
        "LOW" => logic_low(),
        "Clock" => clock(0.0),
        other => gate(other.parse::<GateKind>().ok()?),
    };
    Some(part)
}

/// Build a part from a factory call. `Ok(None)` when `name` is not a factory.
pub fn call_factory(name: &str, values: &[Value], line: usize) -> ScriptResult<Option<Part>> {
    let Some(base) = base(name) else {
        return Ok(None);
    };
    if let [Value::Object(fields)] = values {
        return verbose(name, base, fields, line).map(Some);
    }

    let args = Args { name, values, line };
    let part = match name {
        "R" | "C" | "L" | "DC" | "V" | "I" | "Clock" => {
            args.arity(1, 1)?;
            let v = args.number(0)?;
            match name {
                "R" => resistor(v),
                "C" => capacitor(v),
                "L" => inductor(v),
                "I" => current_source(v),
                "Clock" => clock(v),
                _ => dc(v),
            }
        }
        "AC" => {
            args.arity(2, 2)?;
            ac(args.number(0)?, args.number(1)?)
        }
        "LED" => {
            args.arity(0, 1)?;
            match args.text(0)? {
                Some(color) => led(color.parse::<LedColor>()?),
                None => base,
            }
        }
        "Rail" => {
            args.arity(1, 2)?;
            rail(args.number(0)?, args.text(1)?.unwrap_or("VCC"))
        }
        "Gate" => {
            args.arity(1, 2)?;
            let kind = args.text(0)?.unwrap_or_default().parse::<GateKind>()?;
            match args.inputs(1)? {
                Some(n) => gate_with_inputs(kind, n),
                None => gate(kind),
            }
        }
        "GND" | "HIGH" | "LOW" => {
            args.arity(0, 0)?;
            base
        }
        "Logic" => {
            args.arity(1, 1)?;
            match &values[0] {
                Value::Bool(true) => logic_high(),
                Value::Bool(false) => logic_low(),
                other => {
                    return Err(crate::value::mismatch(line, "Logic() argument", "a bool", other));
                }
            }
        }
        "D" | "NPN" | "PNP" | "BJT" | "NMOS" | "PMOS" | "MOSFET" | "OpAmp" | "OpAmp3" => {
            args.with_model(base)?
        }
        _ => {
            // gate symbols
            args.arity(0, 1)?;
            match (&base.extras, args.inputs(0)?) {
                (Extras::LogicGate(e), Some(n)) => gate_with_inputs(e.gate, n),
                _ => base,
            }
        }
    };
    Ok(Some(part))
}

fn verbose(name: &str, base: Part, fields: &[(String, Value)], line: usize) -> ScriptResult<Part> {
    let mut json = serde_json::to_value(&base.extras)
        .map_err(|e| ScriptError::eval(line, e.to_string()))?;
    if let serde_json::Value::Object(map) = &mut json {
        for (key, value) in fields {
            if key == "value" || key == "type" {
                continue;
            }
            map.insert(key.clone(), value.to_json(line)?);
        }
    }
    let extras: Extras = serde_json::from_value(json)
        .map_err(|e| ScriptError::eval(line, format!("{name}(): {e}")))?;

    let value = match field(fields, "value") {
        Some(v) => v.as_number(line, &format!("{name}() value"))?,
        None => extras.default_value().ok_or_else(|| {
            ScriptError::eval(line, format!("{name}() needs a value field"))
        })?,
    };
    Ok(Part::new(value, extras))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_parts::{PartKind, ResistorExtras};

    fn make(name: &str, values: Vec<Value>) -> Part {
        call_factory(name, &values, 1).unwrap().unwrap()
    }

    fn obj(fields: &[(&str, Value)]) -> Value {
        Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn terse_calls_match_library_factories() {
        assert_eq!(make("R", vec![Value::Number(330.0)]), resistor(330.0));
        assert_eq!(make("LED", vec![Value::Symbol("GREEN".into())]), led(LedColor::Green));
        assert_eq!(
            make("AC", vec![Value::Number(1.0), Value::Number(60.0)]),
            ac(1.0, 60.0)
        );
        assert_eq!(make("NAND", vec![Value::Number(3.0)]), gate_with_inputs(GateKind::Nand, 3));
        assert_eq!(make("NOT", vec![]), gate(GateKind::Not));
        assert_eq!(make("NPN", vec![Value::Str("2N3904".into())]), npn().model("2N3904"));
        assert_eq!(make("GND", vec![]), ground());
        assert_eq!(make("Rail", vec![Value::Number(3.3)]), rail(3.3, "VCC"));
    }

    #[test]
    fn verbose_overlays_default_extras() {
        let part = make(
            "R",
            vec![obj(&[
                ("value", Value::Number(1e3)),
                ("tolerance", Value::Number(0.01)),
            ])],
        );
        assert_eq!(part.value(), 1e3);
        assert_eq!(
            part.extras,
            Extras::Resistor(ResistorExtras {
                tolerance: Some(0.01),
                power_rating: None,
            })
        );

        let gate = make("Gate", vec![obj(&[("gate", Value::Str("xor".into())), ("inputs", Value::Number(4.0))])]);
        assert_eq!(gate.kind(), PartKind::LogicGate);
        assert_eq!(gate, gate_with_inputs(GateKind::Xor, 4));
    }

    #[test]
    fn verbose_without_value_uses_default() {
        let d = make("D", vec![obj(&[("model", Value::Str("1N4148".into()))])]);
        assert_eq!(d, diode().model("1N4148"));

        let err = call_factory("R", &[obj(&[])], 3).unwrap_err();
        assert!(err.to_string().contains("value"), "{err}");
    }

    #[test]
    fn bad_arguments() {
        assert!(call_factory("R", &[], 1).is_err());
        assert!(call_factory("R", &[Value::Str("x".into())], 1).is_err());
        assert!(call_factory("LED", &[Value::Symbol("PURPLE".into())], 1).is_err());
        assert!(call_factory("NAND", &[Value::Number(2.5)], 1).is_err());
        assert!(call_factory("R", &[obj(&[("tolerance", Value::Str("x".into()))])], 1).is_err());
    }

    #[test]
    fn unknown_names_are_not_factories() {
        assert!(call_factory("series", &[], 1).unwrap().is_none());
        for name in FACTORY_NAMES {
            assert!(base(name).is_some(), "{name}");
        }
    }
}
