//! Schematic -> document.

use tracing::debug;
use wl_graph::Schematic;

use crate::schema::{ComponentRecord, Document, NodeRecord, PinRecord};

/// Project the registered components and nodes into a document, preserving
/// registration order. Pins carry a `node_id` only when bound.
pub fn compile_dsl_to_db(s: &Schematic) -> Document {
    let mut doc = Document::new(s.name());

    for comp in s.components() {
        let pins = comp
            .pins
            .iter()
            .filter_map(|&p| s.pin(p))
            .map(|pin| PinRecord {
                id: pin.uid.clone(),
                name: pin.name.clone(),
                direction: pin.direction,
                node_id: pin.node.and_then(|n| s.node(n)).map(|n| n.uid.clone()),
            })
            .collect();
        doc.components.push(ComponentRecord {
            id: comp.uid.clone(),
            kind: comp.kind(),
            label: comp.label.clone(),
            params: comp.params().clone(),
            pins,
            extras: comp.extras().clone(),
        });
    }

    doc.nodes = s
        .nodes()
        .map(|n| NodeRecord {
            id: n.uid.clone(),
            name: n.name.clone(),
            is_ground: n.is_ground(),
        })
        .collect();

    debug!(
        circuit = %doc.name,
        components = doc.components.len(),
        nodes = doc.nodes.len(),
        "compiled"
    );
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_graph::{Layout, circuit};
    use wl_parts::{PartKind, dc, ground, resistor};

    #[test]
    fn compile_preserves_order_and_bindings() {
        let s = circuit("Divider", |_| {
            Ok(Layout::series([dc(12.0), resistor(10e3), resistor(10e3), ground()]))
        })
        .unwrap();
        let doc = compile_dsl_to_db(&s);

        assert_eq!(doc.name, "Divider");
        let kinds: Vec<PartKind> = doc.components.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            [PartKind::VoltageSource, PartKind::Resistor, PartKind::Resistor, PartKind::Ground]
        );
        assert_eq!(doc.components[1].id, "resistor_1");
        assert_eq!(doc.components[2].label, "R2");
        assert_eq!(doc.nodes.len(), 3);
        let r1 = &doc.components[1];
        assert_eq!(r1.pins[0].id, "resistor_1.1");
        assert_eq!(r1.pins[0].node_id.as_deref(), Some("node_1"));
    }

    #[test]
    fn unconnected_pin_has_no_node_id() {
        let mut s = Schematic::new("loose");
        s.place(resistor(1.0));
        let doc = compile_dsl_to_db(&s);
        assert!(doc.components[0].pins.iter().all(|p| p.node_id.is_none()));

        let json = serde_json::to_value(&doc).unwrap();
        let pin = &json["components"][0]["pins"][0];
        assert!(pin.get("node_id").is_none());
        assert_eq!(pin["name"], "1");
    }

    #[test]
    fn ground_flag_follows_name() {
        let mut s = Schematic::new("g");
        let g = s.place(ground());
        let node = s.ground_node();
        s.connect(s.p1(g).unwrap(), node).unwrap();
        let doc = compile_dsl_to_db(&s);
        assert!(doc.nodes[0].is_ground);
        assert_eq!(doc.nodes[0].name.as_deref(), Some("GND"));
    }
}
