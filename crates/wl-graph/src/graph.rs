//! Pin, node and component records stored in the schematic arena.

use wl_core::{CompId, NodeId, PinId};
use wl_parts::{Extras, Params, Part, PartKind, PinDirection};

/// Reserved node names that mark a ground node.
pub const GROUND_NAMES: [&str; 2] = ["GND", "0"];

/// A shared electrical potential.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Stable string id ("node_3") used in documents.
    pub uid: String,
    pub name: Option<String>,
}

impl Node {
    pub fn is_ground(&self) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| GROUND_NAMES.contains(&n))
    }

    /// Name if set, otherwise the uid.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.uid)
    }
}

/// A terminal of a component, or a virtual rail pin owned by no component.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub id: PinId,
    pub uid: String,
    pub name: String,
    pub direction: Option<PinDirection>,
    /// Back-reference to the owning component; `None` for virtual pins.
    pub component: Option<CompId>,
    pub node: Option<NodeId>,
}

impl Pin {
    /// Bind to `node`, replacing any previous binding.
    pub fn connect_to(&mut self, node: NodeId) {
        self.node = Some(node);
    }

    pub fn disconnect(&mut self) {
        self.node = None;
    }

    pub fn is_connected(&self) -> bool {
        self.node.is_some()
    }

    pub fn is_virtual(&self) -> bool {
        self.component.is_none()
    }
}

/// A placed part: identity, parameters and its fixed pin list.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: CompId,
    /// Stable string id scoped by kind ("resistor_2").
    pub uid: String,
    pub label: String,
    pub part: Part,
    /// Pins in declaration order.
    pub pins: Vec<PinId>,
}

impl Component {
    pub fn kind(&self) -> PartKind {
        self.part.kind()
    }

    pub fn params(&self) -> &Params {
        &self.part.params
    }

    pub fn extras(&self) -> &Extras {
        &self.part.extras
    }

    /// Incoming series terminal.
    pub fn p1(&self) -> PinId {
        self.pins[self.part.series_terminals().0]
    }

    /// Outgoing series terminal.
    pub fn p2(&self) -> PinId {
        self.pins[self.part.series_terminals().1]
    }

    pub fn validate(&self) -> Vec<String> {
        self.part.validate(&self.label)
    }
}
