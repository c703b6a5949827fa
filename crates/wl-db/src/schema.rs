//! Portable document schema.

use serde::{Deserialize, Serialize};
use wl_parts::{Extras, Params, PartKind, PinDirection};

/// Schema tag written into every document.
pub const SCHEMA: &str = "wirelang-db@v1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub schema: String,
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: SCHEMA.to_string(),
            name: name.into(),
            components: Vec::new(),
            nodes: Vec::new(),
        }
    }

    pub fn component(&self, id: &str) -> Option<&ComponentRecord> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "StoredComponent")]
pub struct ComponentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PartKind,
    pub label: String,
    pub params: Params,
    #[serde(default)]
    pub pins: Vec<PinRecord>,
    pub extras: Extras,
}

/// A component as read from disk. `extras` may be left out, in which case
/// the variant's defaults apply.
#[derive(Deserialize)]
struct StoredComponent {
    id: String,
    #[serde(rename = "type")]
    kind: PartKind,
    label: String,
    params: Params,
    #[serde(default)]
    pins: Vec<PinRecord>,
    #[serde(default)]
    extras: Option<Extras>,
}

impl From<StoredComponent> for ComponentRecord {
    fn from(stored: StoredComponent) -> Self {
        Self {
            extras: stored
                .extras
                .unwrap_or_else(|| Extras::default_for(stored.kind)),
            id: stored.id,
            kind: stored.kind,
            label: stored.label,
            params: stored.params,
            pins: stored.pins,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PinRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<PinDirection>,
    /// Absent when the pin is unconnected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub is_ground: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_extras_take_variant_defaults() {
        let json = r#"{
            "schema": "wirelang-db@v1",
            "name": "Bare",
            "components": [
                { "id": "isrc_1", "type": "current_source", "label": "I1",
                  "params": { "value": 0.01, "unit": "A" } },
                { "id": "ground_1", "type": "ground", "label": "GND1",
                  "params": { "value": 0.0, "unit": "" },
                  "pins": [{ "id": "ground_1.GND", "name": "GND", "node_id": "node_1" }] }
            ],
            "nodes": [{ "id": "node_1", "is_ground": true }]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        for comp in &doc.components {
            assert_eq!(comp.extras, Extras::default_for(comp.kind));
        }
        assert_eq!(doc.components[1].pins[0].node_id.as_deref(), Some("node_1"));
    }

    #[test]
    fn explicit_extras_still_win() {
        let json = r#"{ "id": "led_1", "type": "led", "label": "LED1",
            "params": { "value": 2.0, "unit": "V" },
            "extras": { "type": "led", "color": "blue" } }"#;
        let comp: ComponentRecord = serde_json::from_str(json).unwrap();
        assert_ne!(comp.extras, Extras::default_for(PartKind::Led));
    }
}
