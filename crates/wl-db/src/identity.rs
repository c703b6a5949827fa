//! Identity overrides: restore ids and labels on a rebuilt schematic.
//!
//! These are the one place a placed component's identity changes after
//! construction. Regenerated source calls them so that a rebuilt graph
//! compiles to the same document as the original.

use wl_core::{CompId, NodeId};
use wl_graph::{GraphResult, Schematic};

/// Identity to stamp onto a component. `None` leaves the field as is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentIdentity {
    pub id: Option<String>,
    pub label: Option<String>,
    /// `(pin name, pin id)` overrides.
    pub pins: Vec<(String, String)>,
}

/// Apply a component identity.
///
/// Changing the component id also renames pins whose id still follows the
/// generated `{component}.{pin}` pattern; explicit pin overrides win.
pub fn apply_component_identity(
    s: &mut Schematic,
    comp: CompId,
    identity: &ComponentIdentity,
) -> GraphResult<()> {
    if let Some(id) = &identity.id {
        let (old, pins) = match s.component(comp) {
            Some(c) => (c.uid.clone(), c.pins.clone()),
            None => return Err(wl_graph::GraphError::UnknownComponent { id: comp }),
        };
        for pin in pins {
            let Some(p) = s.pin(pin) else { continue };
            if p.uid == format!("{old}.{}", p.name) {
                let renamed = format!("{id}.{}", p.name);
                s.set_pin_uid(pin, renamed)?;
            }
        }
        s.set_component_uid(comp, id.clone())?;
    }
    if let Some(label) = &identity.label {
        s.set_label(comp, label.clone())?;
    }
    for (name, id) in &identity.pins {
        apply_pin_identity(s, comp, name, id)?;
    }
    Ok(())
}

pub fn apply_pin_identity(
    s: &mut Schematic,
    comp: CompId,
    pin_name: &str,
    id: &str,
) -> GraphResult<()> {
    let pin = s.pin_named(comp, pin_name)?;
    s.set_pin_uid(pin, id)
}

pub fn apply_node_identity(s: &mut Schematic, node: NodeId, id: &str) -> GraphResult<()> {
    s.set_node_uid(node, id)
}
