//! Document -> script source.
//!
//! The generated script rebuilds an equivalent schematic when evaluated:
//! node declarations, one factory call per component, identity overrides,
//! one `connect` per bound pin and a final export.

use std::collections::HashSet;
use std::fmt::Write as _;

use serde_json::Value;
use wl_core::fmt_real;
use wl_parts::integrated::{GATE_DELAY, OPAMP_GAIN};
use wl_parts::semiconductor::{BJT_BETA, DIODE_FORWARD_VOLTAGE, MOSFET_THRESHOLD};
use wl_parts::{
    BjtPolarity, ClockExtras, Extras, MosfetChannel, PartKind, PartSpec, VoltageSourceExtras,
    Waveform,
};

use crate::schema::{ComponentRecord, Document};
use crate::validate::validate_document;
use crate::{DbError, DbResult};

/// Words the script language reserves; generated identifiers avoid them.
pub const RESERVED_WORDS: [&str; 7] =
    ["use", "let", "export", "default", "true", "false", "null"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseOptions {
    /// Module named in the leading `use` statement.
    pub module_import: String,
    /// Name the schematic is exported under.
    pub export_name: String,
    /// Emit `identity(...)` statements restoring ids and labels.
    pub preserve_ids: bool,
}

impl Default for ReverseOptions {
    fn default() -> Self {
        Self {
            module_import: "wirelang".to_string(),
            export_name: "default".to_string(),
            preserve_ids: true,
        }
    }
}

/// Factory accepting the verbose `{ value: .., field: .. }` form for a kind.
pub fn verbose_factory(kind: PartKind) -> &'static str {
    match kind {
        PartKind::Resistor => "R",
        PartKind::Capacitor => "C",
        PartKind::Inductor => "L",
        PartKind::Diode => "D",
        PartKind::Led => "LED",
        PartKind::VoltageSource => "V",
        PartKind::CurrentSource => "I",
        PartKind::Ground => "GND",
        PartKind::PowerRail => "Rail",
        PartKind::Bjt => "BJT",
        PartKind::Mosfet => "MOSFET",
        PartKind::OpAmp => "OpAmp",
        PartKind::OpAmp3 => "OpAmp3",
        PartKind::LogicGate => "Gate",
        PartKind::LogicLevel => "Logic",
        PartKind::Clock => "Clock",
    }
}

/// Quote a string as a script literal.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Collision-free identifier allocation.
#[derive(Debug, Default)]
struct Names {
    taken: HashSet<String>,
}

impl Names {
    fn sanitize(raw: &str) -> String {
        let mut out: String = raw
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        if out.is_empty() {
            out.push('x');
        }
        if out.starts_with(|c: char| c.is_ascii_digit()) {
            out.insert_str(0, "n_");
        }
        if RESERVED_WORDS.contains(&out.as_str()) {
            out.push('_');
        }
        out
    }

    fn claim(&mut self, raw: &str) -> String {
        let base = Self::sanitize(raw);
        let mut name = base.clone();
        let mut n = 2;
        while self.taken.contains(&name) {
            name = format!("{base}_{n}");
            n += 1;
        }
        self.taken.insert(name.clone());
        name
    }
}

fn call(factory: &str, args: &[String]) -> String {
    format!("{factory}({})", args.join(", "))
}

fn model_arg(model: &Option<String>) -> Vec<String> {
    model.iter().map(|m| quote(m)).collect()
}

/// Terse factory call, when the record is eligible for one.
fn terse(rec: &ComponentRecord) -> Option<String> {
    let v = rec.params.value;
    let num = fmt_real(v);
    match &rec.extras {
        Extras::Resistor(e) => e.is_plain().then(|| call("R", &[num])),
        Extras::Capacitor(e) => e.is_plain().then(|| call("C", &[num])),
        Extras::Inductor(e) => e.is_plain().then(|| call("L", &[num])),
        Extras::Diode(e) => (v == DIODE_FORWARD_VOLTAGE && e.max_current.is_none())
            .then(|| call("D", &model_arg(&e.model))),
        Extras::Led(e) => (v == e.color.forward_voltage() && e.max_current.is_none())
            .then(|| call("LED", &[e.color.symbol().to_string()])),
        Extras::VoltageSource(VoltageSourceExtras {
            waveform,
            frequency,
        }) => match (waveform, frequency) {
            (Waveform::Dc, None) => Some(call("DC", &[num])),
            (Waveform::Ac, Some(f)) => Some(call("AC", &[num, fmt_real(*f)])),
            _ => None,
        },
        Extras::CurrentSource(_) => Some(call("I", &[num])),
        Extras::Ground(_) => (v == 0.0).then(|| call("GND", &[])),
        Extras::PowerRail(e) => Some(call("Rail", &[num, quote(&e.net)])),
        Extras::Bjt(e) => (v == BJT_BETA).then(|| {
            let name = match e.polarity {
                BjtPolarity::Npn => "NPN",
                BjtPolarity::Pnp => "PNP",
            };
            call(name, &model_arg(&e.model))
        }),
        Extras::Mosfet(e) => (v == MOSFET_THRESHOLD).then(|| {
            let name = match e.channel {
                MosfetChannel::N => "NMOS",
                MosfetChannel::P => "PMOS",
            };
            call(name, &model_arg(&e.model))
        }),
        Extras::OpAmp(e) => (v == OPAMP_GAIN).then(|| call("OpAmp", &model_arg(&e.model))),
        Extras::OpAmp3(e) => (v == OPAMP_GAIN).then(|| call("OpAmp3", &model_arg(&e.model))),
        Extras::LogicGate(e) => (v == GATE_DELAY).then(|| {
            let args = if e.inputs == e.gate.default_inputs() {
                Vec::new()
            } else {
                vec![e.inputs.to_string()]
            };
            call(e.gate.symbol(), &args)
        }),
        Extras::LogicLevel(e) => (Some(v) == e.default_value())
            .then(|| call(if e.high { "HIGH" } else { "LOW" }, &[])),
        Extras::Clock(e) => (e.duty_cycle == ClockExtras::DEFAULT_DUTY_CYCLE)
            .then(|| call("Clock", &[num])),
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_u64() {
            Some(u) => u.to_string(),
            None => n.as_f64().map(fmt_real).unwrap_or_else(|| n.to_string()),
        },
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let fields: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{k}: {}", literal(v)))
                .collect();
            format!("{{ {} }}", fields.join(", "))
        }
    }
}

/// `Factory({ value: .., field: .. })`, driven by the extras' serde form.
fn verbose(rec: &ComponentRecord) -> DbResult<String> {
    let mut fields = vec![format!("value: {}", fmt_real(rec.params.value))];
    if let Value::Object(map) = serde_json::to_value(&rec.extras)? {
        for (key, val) in &map {
            if key == "type" || val.is_null() {
                continue;
            }
            fields.push(format!("{key}: {}", literal(val)));
        }
    }
    Ok(format!(
        "{}({{ {} }})",
        verbose_factory(rec.kind),
        fields.join(", ")
    ))
}

/// Factory-call expression reconstructing one component.
pub fn factory_call(rec: &ComponentRecord) -> DbResult<String> {
    if rec.extras.kind() != rec.kind {
        return Err(DbError::Part(wl_parts::PartError::KindMismatch {
            expected: rec.kind.to_string(),
            found: rec.extras.kind().to_string(),
        }));
    }
    match terse(rec) {
        Some(text) => Ok(text),
        None => verbose(rec),
    }
}

fn identity_object(rec: &ComponentRecord) -> String {
    let mut fields = vec![
        format!("id: {}", quote(&rec.id)),
        format!("label: {}", quote(&rec.label)),
    ];
    let pins: Vec<String> = rec
        .pins
        .iter()
        .filter(|p| p.id != format!("{}.{}", rec.id, p.name))
        .map(|p| format!("{}: {}", quote(&p.name), quote(&p.id)))
        .collect();
    if !pins.is_empty() {
        fields.push(format!("pins: {{ {} }}", pins.join(", ")));
    }
    format!("{{ {} }}", fields.join(", "))
}

/// Regenerate script source from a document.
pub fn reverse_db_to_dsl(doc: &Document, options: &ReverseOptions) -> DbResult<String> {
    validate_document(doc)?;

    let mut names = Names::default();
    let node_vars: Vec<String> = doc
        .nodes
        .iter()
        .map(|n| names.claim(n.name.as_deref().unwrap_or(&n.id)))
        .collect();
    let comp_vars: Vec<String> = doc
        .components
        .iter()
        .map(|c| names.claim(&c.label))
        .collect();

    let mut out = String::new();
    // fmt::Write into a String cannot fail
    let _ = writeln!(out, "// Generated from {} document {}", doc.schema, quote(&doc.name));
    let _ = writeln!(out, "use {};", quote(&options.module_import));
    let _ = writeln!(out);
    let _ = writeln!(out, "circuit({});", quote(&doc.name));

    if !doc.nodes.is_empty() {
        let _ = writeln!(out);
        for (node, var) in doc.nodes.iter().zip(&node_vars) {
            match &node.name {
                Some(name) => {
                    let _ = writeln!(out, "let {var} = node({});", quote(name));
                }
                None => {
                    let _ = writeln!(out, "let {var} = node();");
                }
            }
        }
    }

    if !doc.components.is_empty() {
        let _ = writeln!(out);
        for (rec, var) in doc.components.iter().zip(&comp_vars) {
            let _ = writeln!(out, "let {var} = {};", factory_call(rec)?);
        }
    }

    if options.preserve_ids && !(doc.components.is_empty() && doc.nodes.is_empty()) {
        let _ = writeln!(out);
        for (rec, var) in doc.components.iter().zip(&comp_vars) {
            let _ = writeln!(out, "identity({var}, {});", identity_object(rec));
        }
        for (node, var) in doc.nodes.iter().zip(&node_vars) {
            let _ = writeln!(out, "identity({var}, {{ id: {} }});", quote(&node.id));
        }
    }

    let node_var = |id: &str| {
        doc.nodes
            .iter()
            .position(|n| n.id == id)
            .map(|i| node_vars[i].as_str())
    };
    let mut connects = Vec::new();
    for (rec, var) in doc.components.iter().zip(&comp_vars) {
        for pin in &rec.pins {
            let Some(node_id) = &pin.node_id else { continue };
            // validate_document guarantees the node exists
            if let Some(node) = node_var(node_id) {
                connects.push(format!("connect({var}.{}, {node});", quote(&pin.name)));
            }
        }
    }
    if !connects.is_empty() {
        let _ = writeln!(out);
        for line in connects {
            let _ = writeln!(out, "{line}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "export {};", export_target(&options.export_name));
    Ok(out)
}

fn export_target(name: &str) -> String {
    if name == "default" {
        name.to_string()
    } else {
        Names::sanitize(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PinRecord;
    use wl_parts::{
        GateKind, LedColor, Part, ResistorExtras, ac, gate, gate_with_inputs, led, npn, opamp3,
        resistor,
    };

    fn record(part: Part) -> ComponentRecord {
        ComponentRecord {
            id: format!("{}_1", part.kind().tag()),
            kind: part.kind(),
            label: "X1".into(),
            params: part.params.clone(),
            pins: Vec::new(),
            extras: part.extras,
        }
    }

    #[test]
    fn terse_forms() {
        let cases = [
            (resistor(330.0), "R(330)"),
            (led(LedColor::Red), "LED(RED)"),
            (ac(1.0, 60.0), "AC(1, 60)"),
            (npn().model("2N3904"), "NPN(\"2N3904\")"),
            (opamp3(), "OpAmp3()"),
            (gate(GateKind::Not), "NOT()"),
            (gate_with_inputs(GateKind::Nand, 3), "NAND(3)"),
        ];
        for (part, expected) in cases {
            assert_eq!(factory_call(&record(part)).unwrap(), expected);
        }
    }

    #[test]
    fn extras_force_verbose_form() {
        let mut part = resistor(1e3);
        part.extras = Extras::Resistor(ResistorExtras {
            tolerance: Some(0.01),
            power_rating: None,
        });
        assert_eq!(
            factory_call(&record(part)).unwrap(),
            "R({ value: 1000, tolerance: 0.01 })"
        );

        let mut bright = led(LedColor::Green);
        bright.params.value = 2.4;
        assert_eq!(
            factory_call(&record(bright)).unwrap(),
            "LED({ value: 2.4, color: \"green\" })"
        );
    }

    #[test]
    fn mismatched_extras_rejected() {
        let mut rec = record(resistor(1.0));
        rec.kind = PartKind::Capacitor;
        assert!(matches!(factory_call(&rec), Err(DbError::Part(_))));
    }

    #[test]
    fn identifiers_are_unique_and_escaped() {
        let mut names = Names::default();
        assert_eq!(names.claim("R1"), "r1");
        assert_eq!(names.claim("r1"), "r1_2");
        assert_eq!(names.claim("r1"), "r1_3");
        assert_eq!(names.claim("default"), "default_");
        assert_eq!(names.claim("3V3"), "n_3v3");
        assert_eq!(names.claim("V+ rail"), "v__rail");
        assert_eq!(names.claim(""), "x");
    }

    #[test]
    fn quoting_escapes() {
        assert_eq!(quote(r#"a "b" \c"#), r#""a \"b\" \\c""#);
    }

    #[test]
    fn identity_lists_only_custom_pins() {
        let mut rec = record(resistor(1.0));
        rec.pins = vec![
            PinRecord {
                id: "resistor_1.1".into(),
                name: "1".into(),
                direction: None,
                node_id: None,
            },
            PinRecord {
                id: "in".into(),
                name: "2".into(),
                direction: None,
                node_id: None,
            },
        ];
        assert_eq!(
            identity_object(&rec),
            r#"{ id: "resistor_1", label: "X1", pins: { "2": "in" } }"#
        );
    }
}
