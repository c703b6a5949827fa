use wl_db::*;
use wl_graph::{Layout, Schematic, circuit, parallel};
use wl_parts::{LedColor, capacitor, dc, ground, led, resistor};

fn led_doc() -> Document {
    let s = circuit("LED", |_| {
        Ok(Layout::series([
            dc(5.0),
            resistor(330.0),
            led(LedColor::Red),
            ground(),
        ]))
    })
    .unwrap();
    compile_dsl_to_db(&s)
}

#[test]
fn roundtrip_json_led() {
    let doc = led_doc();
    let path = std::env::temp_dir().join("wl_db_roundtrip_led.json");
    save_json(&path, &doc).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(doc, loaded);
}

#[test]
fn roundtrip_yaml_with_unconnected_pins() {
    let mut s = Schematic::new("Bank");
    let bank = parallel(&mut s, [capacitor(1e-6).into(), capacitor(1e-5).into()]).unwrap();
    wl_graph::apply_to_circuit(&mut s, &bank);
    s.place(resistor(47.0));
    let doc = compile_dsl_to_db(&s);

    let path = std::env::temp_dir().join("wl_db_roundtrip_bank.yaml");
    save_yaml(&path, &doc).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(doc, loaded);

    let loose = loaded.component("resistor_1").unwrap();
    assert!(loose.pins.iter().all(|p| p.node_id.is_none()));
}

#[test]
fn unknown_type_fails_to_decode() {
    let json = serde_json::to_string(&led_doc()).unwrap();
    let broken = json.replacen("\"type\":\"resistor\"", "\"type\":\"memristor\"", 1);
    assert!(serde_json::from_str::<Document>(&broken).is_err());
}

#[test]
fn reverse_emits_expected_statements() {
    let src = reverse_db_to_dsl(&led_doc(), &ReverseOptions::default()).unwrap();

    assert!(src.contains("use \"wirelang\";"));
    assert!(src.contains("circuit(\"LED\");"));
    assert!(src.contains("let v1 = DC(5);"));
    assert!(src.contains("let r1 = R(330);"));
    assert!(src.contains("let led1 = LED(RED);"));
    assert!(src.contains("let gnd1 = GND();"));
    assert!(src.contains("identity(r1, { id: \"resistor_1\", label: \"R1\" });"));
    assert!(src.contains("connect(v1.\"negative\", node_3);"));
    assert!(src.trim_end().ends_with("export default;"));
}

#[test]
fn reverse_options_are_honored() {
    let options = ReverseOptions {
        module_import: "wirelang/core".into(),
        export_name: "Blinky".into(),
        preserve_ids: false,
    };
    let src = reverse_db_to_dsl(&led_doc(), &options).unwrap();
    assert!(src.contains("use \"wirelang/core\";"));
    assert!(!src.contains("identity("));
    assert!(src.contains("export blinky;"));
}

#[test]
fn reverse_validates_first() {
    let mut doc = led_doc();
    doc.schema = "other@v9".into();
    assert!(matches!(
        reverse_db_to_dsl(&doc, &ReverseOptions::default()),
        Err(DbError::Validation(_))
    ));
}
