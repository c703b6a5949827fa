//! Document validation logic.

use std::collections::HashSet;

use crate::schema::{Document, SCHEMA};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unsupported schema: {found} (expected wirelang-db@v1)")]
    UnsupportedSchema { found: String },

    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Component {id} has type {kind} but its extras are tagged {extras}")]
    ExtrasMismatch {
        id: String,
        kind: String,
        extras: String,
    },
}

pub fn validate_document(doc: &Document) -> Result<(), ValidationError> {
    if doc.schema != SCHEMA {
        return Err(ValidationError::UnsupportedSchema {
            found: doc.schema.clone(),
        });
    }

    let mut node_ids = HashSet::new();
    for node in &doc.nodes {
        if !node_ids.insert(node.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: node.id.clone(),
                context: "nodes".to_string(),
            });
        }
    }

    let mut component_ids = HashSet::new();
    let mut pin_ids = HashSet::new();
    for comp in &doc.components {
        if !component_ids.insert(comp.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: comp.id.clone(),
                context: "components".to_string(),
            });
        }

        if comp.extras.kind() != comp.kind {
            return Err(ValidationError::ExtrasMismatch {
                id: comp.id.clone(),
                kind: comp.kind.to_string(),
                extras: comp.extras.kind().to_string(),
            });
        }

        for pin in &comp.pins {
            if !pin_ids.insert(pin.id.as_str()) {
                return Err(ValidationError::DuplicateId {
                    id: pin.id.clone(),
                    context: format!("pins of {}", comp.id),
                });
            }
            if let Some(node_id) = &pin.node_id {
                if !node_ids.contains(node_id.as_str()) {
                    return Err(ValidationError::MissingReference {
                        id: node_id.clone(),
                        context: format!("pin {}", pin.id),
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ComponentRecord, NodeRecord, PinRecord};
    use wl_parts::{Extras, PartKind, resistor};

    fn doc_with_resistor() -> Document {
        let part = resistor(100.0);
        let mut doc = Document::new("t");
        doc.nodes.push(NodeRecord {
            id: "node_1".into(),
            name: None,
            is_ground: false,
        });
        doc.components.push(ComponentRecord {
            id: "resistor_1".into(),
            kind: PartKind::Resistor,
            label: "R1".into(),
            params: part.params,
            pins: vec![
                PinRecord {
                    id: "resistor_1.1".into(),
                    name: "1".into(),
                    direction: None,
                    node_id: Some("node_1".into()),
                },
                PinRecord {
                    id: "resistor_1.2".into(),
                    name: "2".into(),
                    direction: None,
                    node_id: None,
                },
            ],
            extras: part.extras,
        });
        doc
    }

    #[test]
    fn valid_document_passes() {
        validate_document(&doc_with_resistor()).unwrap();
    }

    #[test]
    fn schema_tag_checked() {
        let mut doc = doc_with_resistor();
        doc.schema = "wirelang-db@v0".into();
        assert!(matches!(
            validate_document(&doc),
            Err(ValidationError::UnsupportedSchema { .. })
        ));
    }

    #[test]
    fn dangling_node_reference() {
        let mut doc = doc_with_resistor();
        doc.components[0].pins[1].node_id = Some("node_9".into());
        let err = validate_document(&doc).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingReference {
                id: "node_9".into(),
                context: "pin resistor_1.2".into()
            }
        );
    }

    #[test]
    fn duplicate_pin_ids() {
        let mut doc = doc_with_resistor();
        doc.components[0].pins[1].id = "resistor_1.1".into();
        assert!(matches!(
            validate_document(&doc),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn extras_must_match_type() {
        let mut doc = doc_with_resistor();
        doc.components[0].extras = Extras::default_for(PartKind::Capacitor);
        assert!(matches!(
            validate_document(&doc),
            Err(ValidationError::ExtrasMismatch { .. })
        ));
    }
}
