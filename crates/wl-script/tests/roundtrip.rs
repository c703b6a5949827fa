//! compile -> reverse -> run -> compile.

use std::collections::BTreeMap;

use proptest::prelude::*;
use wl_db::{Document, ReverseOptions, compile_dsl_to_db, reverse_db_to_dsl};
use wl_graph::{Item, Layout, Schematic, apply_to_circuit, circuit, parallel, series};
use wl_parts::{
    Extras, GateKind, LedColor, ResistorExtras, ac, capacitor, dc, gate_with_inputs, ground,
    led, npn, opamp, rail, resistor,
};

fn rebuild(doc: &Document, options: &ReverseOptions) -> Document {
    let source = reverse_db_to_dsl(doc, options).unwrap();
    let module = wl_script::run(&source).unwrap_or_else(|e| panic!("{e}\n{source}"));
    let s = module.export(&options.export_name).unwrap();
    compile_dsl_to_db(s)
}

/// Structure without identities: parts in order, and for each node its
/// name plus the `(component index, pin name)` pairs bound to it.
type Shape = (Vec<(Extras, f64)>, Vec<(Option<String>, Vec<(usize, String)>)>);

fn shape(doc: &Document) -> Shape {
    let parts = doc
        .components
        .iter()
        .map(|c| (c.extras.clone(), c.params.value))
        .collect();
    let mut by_node: BTreeMap<&str, Vec<(usize, String)>> = BTreeMap::new();
    for (i, c) in doc.components.iter().enumerate() {
        for pin in &c.pins {
            if let Some(node) = &pin.node_id {
                by_node.entry(node).or_default().push((i, pin.name.clone()));
            }
        }
    }
    let mut nodes: Vec<_> = doc
        .nodes
        .iter()
        .map(|n| (n.name.clone(), by_node.remove(n.id.as_str()).unwrap_or_default()))
        .collect();
    nodes.sort();
    (parts, nodes)
}

fn led_circuit() -> Schematic {
    circuit("LED", |_| {
        Ok(Layout::series([
            dc(5.0),
            resistor(330.0),
            led(LedColor::Red),
            ground(),
        ]))
    })
    .unwrap()
}

fn mixed() -> Schematic {
    let mut s = Schematic::new("Mixed \"bench\"");
    let mut precise = resistor(1e3);
    precise.extras = Extras::Resistor(ResistorExtras {
        tolerance: Some(0.01),
        power_rating: Some(2.0),
    });
    let mut dim = led(LedColor::Green);
    dim.params.value = 1.9;

    let inner = parallel(&mut s, [capacitor(1e-6).into(), capacitor(4.7e-9).into()]).unwrap();
    let bank = parallel(&mut s, [inner.into(), precise.into()]).unwrap();
    let chain = series(
        &mut s,
        [ac(1.0, 60.0).into(), bank.into(), dim.into(), ground().into()],
    )
    .unwrap();
    apply_to_circuit(&mut s, &chain);

    s.place(rail(3.3, "3V3"));
    s.place(npn().model("2N3904"));
    s.place(opamp());
    s.place(gate_with_inputs(GateKind::Nand, 3));
    let vout = s.create_node(Some("vout"));
    let amp = s.component_ids()[s.component_ids().len() - 2];
    let out = s.pin_named(amp, "out").unwrap();
    s.connect(out, vout).unwrap();
    s.set_pin_uid(out, "amp_output").unwrap();
    s.set_label(amp, "U_amp").unwrap();
    s.auto_connect_grounds().unwrap();
    s
}

fn shared_transistor() -> Schematic {
    circuit("Switch", |s| {
        let q = s.create(npn());
        Ok(Layout::Paths(vec![
            vec![dc(9.0).into(), resistor(1e3).into(), Item::component(q), ground().into()],
            vec![Item::component(q), resistor(220.0).into()],
        ]))
    })
    .unwrap()
}

fn common_emitter() -> Schematic {
    circuit("CE", |s| {
        let q = s.create(npn());
        let [c, e, b] = ["C", "E", "B"].map(|name| s.pin_named(q, name));
        Ok(Layout::Paths(vec![
            vec![dc(9.0).into(), resistor(1e3).into(), Item::pin(c?)],
            vec![Item::pin(e?), ground().into()],
            vec![dc(3.3).into(), resistor(10e3).into(), Item::pin(b?)],
        ]))
    })
    .unwrap()
}

#[test]
fn identities_preserved() {
    for s in [led_circuit(), mixed(), shared_transistor(), common_emitter()] {
        let doc = compile_dsl_to_db(&s);
        assert_eq!(rebuild(&doc, &ReverseOptions::default()), doc, "{}", doc.name);
    }
}

#[test]
fn without_identities_structure_survives() {
    let options = ReverseOptions {
        preserve_ids: false,
        export_name: "main".into(),
        ..Default::default()
    };
    for s in [led_circuit(), mixed(), shared_transistor(), common_emitter()] {
        let doc = compile_dsl_to_db(&s);
        let rebuilt = rebuild(&doc, &options);
        assert_eq!(rebuilt.name, doc.name);
        assert_eq!(shape(&rebuilt), shape(&doc), "{}", doc.name);
    }
}

#[test]
fn rebuilt_circuit_validates_like_the_original() {
    let s = mixed();
    let doc = compile_dsl_to_db(&s);
    let source = reverse_db_to_dsl(&doc, &ReverseOptions::default()).unwrap();
    let rebuilt = wl_script::run(&source).unwrap();
    assert_eq!(rebuilt.schematic.validate(), s.validate());
}

#[test]
fn empty_schematic_round_trips() {
    let doc = compile_dsl_to_db(&Schematic::new("blank"));
    assert_eq!(rebuild(&doc, &ReverseOptions::default()), doc);
}

proptest! {
    #[test]
    fn series_ladders_round_trip(values in prop::collection::vec(1e-3f64..1e7, 1..8)) {
        let mut s = Schematic::new("ladder");
        let mut items: Vec<Item> = vec![dc(5.0).into()];
        items.extend(values.iter().map(|&v| Item::from(resistor(v))));
        items.push(ground().into());
        let chain = series(&mut s, items).unwrap();
        apply_to_circuit(&mut s, &chain);
        s.auto_connect_grounds().unwrap();

        let doc = compile_dsl_to_db(&s);
        prop_assert_eq!(rebuild(&doc, &ReverseOptions::default()), doc);
    }
}
