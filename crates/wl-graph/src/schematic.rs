//! The schematic: arena and registered-order container.

use tracing::debug;
use wl_core::{CompId, NodeId, PinId};
use wl_parts::{Part, PartKind};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Component, GROUND_NAMES, Node, Pin};
use crate::sequence::Sequence;

/// Owns every node, pin and component created through it.
///
/// Two views coexist:
/// - the arena tables, indexed by `Id`, holding everything ever created;
/// - the registered lists (`component_order`, `node_order`), which define
///   what the circuit contains and in which order it serializes.
///
/// A component created with [`create`](Self::create) lives in the arena but
/// is not part of the circuit until [`add_component`](Self::add_component).
#[derive(Debug, Clone, Default)]
pub struct Schematic {
    name: String,
    nodes: Vec<Node>,
    pins: Vec<Pin>,
    components: Vec<Component>,
    component_order: Vec<CompId>,
    node_order: Vec<NodeId>,
    ground: Option<NodeId>,
    seq: Sequence,
}

impl Schematic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // ---- arena lookups ----

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    pub fn pin(&self, id: PinId) -> Option<&Pin> {
        self.pins.get(id.slot())
    }

    pub fn component(&self, id: CompId) -> Option<&Component> {
        self.components.get(id.slot())
    }

    pub(crate) fn try_node(&self, id: NodeId) -> GraphResult<&Node> {
        self.node(id).ok_or(GraphError::UnknownNode { id })
    }

    pub(crate) fn try_pin(&self, id: PinId) -> GraphResult<&Pin> {
        self.pin(id).ok_or(GraphError::UnknownPinId { id })
    }

    pub(crate) fn try_component(&self, id: CompId) -> GraphResult<&Component> {
        self.component(id)
            .ok_or(GraphError::UnknownComponent { id })
    }

    fn pin_mut(&mut self, id: PinId) -> GraphResult<&mut Pin> {
        self.pins
            .get_mut(id.slot())
            .ok_or(GraphError::UnknownPinId { id })
    }

    /// Every pin in the arena, registered or not.
    pub(crate) fn arena_pins(&self) -> &[Pin] {
        &self.pins
    }

    // ---- registered views ----

    /// Registered components in insertion order. May repeat an id if it was
    /// added twice.
    pub fn component_ids(&self) -> &[CompId] {
        &self.component_order
    }

    /// Registered nodes in insertion order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_order
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> + '_ {
        self.component_order
            .iter()
            .filter_map(move |&id| self.component(id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.node_order.iter().filter_map(move |&id| self.node(id))
    }

    pub fn is_registered(&self, comp: CompId) -> bool {
        self.component_order.contains(&comp)
    }

    pub fn is_node_registered(&self, node: NodeId) -> bool {
        self.node_order.contains(&node)
    }

    pub fn component_by_uid(&self, uid: &str) -> Option<&Component> {
        self.components().find(|c| c.uid == uid)
    }

    pub fn component_by_label(&self, label: &str) -> Option<&Component> {
        self.components().find(|c| c.label == label)
    }

    // ---- construction ----

    /// Instantiate `part` in the arena with a generated id, label and pins.
    /// The component is not registered.
    pub fn create(&mut self, part: Part) -> CompId {
        let id = CompId::next_for(self.components.len());
        let (uid, label) = self.seq.next_component(part.kind());
        let mut pins = Vec::new();
        for spec in part.pins() {
            let pin_id = PinId::next_for(self.pins.len());
            self.pins.push(Pin {
                id: pin_id,
                uid: format!("{uid}.{}", spec.name),
                name: spec.name,
                direction: spec.direction,
                component: Some(id),
                node: None,
            });
            pins.push(pin_id);
        }
        self.components.push(Component {
            id,
            uid,
            label,
            part,
            pins,
        });
        id
    }

    /// Instantiate and register in one step.
    pub fn place(&mut self, part: Part) -> CompId {
        let id = self.create(part);
        self.add_component(id);
        id
    }

    /// Append to the registered list. No dedup, no validation.
    pub fn add_component(&mut self, comp: CompId) {
        self.component_order.push(comp);
    }

    pub fn add_components(&mut self, comps: impl IntoIterator<Item = CompId>) {
        self.component_order.extend(comps);
    }

    /// Allocate a node without registering it.
    pub fn new_node(&mut self, name: Option<&str>) -> NodeId {
        let id = NodeId::next_for(self.nodes.len());
        let uid = self.seq.next_node();
        self.nodes.push(Node {
            id,
            uid,
            name: name.map(str::to_string),
        });
        id
    }

    /// Register a node; already-registered nodes are ignored.
    pub fn add_node(&mut self, node: NodeId) {
        if !self.node_order.contains(&node) {
            self.node_order.push(node);
        }
    }

    /// Allocate and register a fresh node.
    pub fn create_node(&mut self, name: Option<&str>) -> NodeId {
        let id = self.new_node(name);
        self.add_node(id);
        id
    }

    /// Drop a node from the registered list. Pins still bound to it are
    /// left alone.
    pub fn remove_node(&mut self, node: NodeId) {
        self.node_order.retain(|&n| n != node);
        if self.ground == Some(node) {
            self.ground = None;
        }
    }

    /// Allocate a pin owned by no component.
    pub fn virtual_pin(&mut self, name: &str) -> PinId {
        let id = PinId::next_for(self.pins.len());
        let uid = self.seq.next_virtual_pin();
        self.pins.push(Pin {
            id,
            uid,
            name: name.to_string(),
            direction: None,
            component: None,
            node: None,
        });
        id
    }

    // ---- binding ----

    /// Bind `pin` to `node` without registering the node.
    pub fn bind(&mut self, pin: PinId, node: NodeId) -> GraphResult<()> {
        self.try_node(node)?;
        self.pin_mut(pin)?.connect_to(node);
        Ok(())
    }

    /// Bind `pin` to `node` and register the node.
    pub fn connect(&mut self, pin: PinId, node: NodeId) -> GraphResult<()> {
        self.bind(pin, node)?;
        self.add_node(node);
        Ok(())
    }

    pub fn disconnect(&mut self, pin: PinId) -> GraphResult<()> {
        self.pin_mut(pin)?.disconnect();
        Ok(())
    }

    /// Repoint every arena pin bound to `from` onto `to`.
    pub(crate) fn rebind_all(&mut self, from: NodeId, to: NodeId) -> usize {
        let mut moved = 0;
        for pin in self.pins.iter_mut().filter(|p| p.node == Some(from)) {
            pin.disconnect();
            pin.connect_to(to);
            moved += 1;
        }
        moved
    }

    // ---- pin queries ----

    pub fn pin_named(&self, comp: CompId, name: &str) -> GraphResult<PinId> {
        let component = self.try_component(comp)?;
        component
            .pins
            .iter()
            .copied()
            .find(|&p| self.pin(p).is_some_and(|pin| pin.name == name))
            .ok_or_else(|| GraphError::UnknownPin {
                component: component.label.clone(),
                pin: name.to_string(),
            })
    }

    pub fn p1(&self, comp: CompId) -> GraphResult<PinId> {
        Ok(self.try_component(comp)?.p1())
    }

    pub fn p2(&self, comp: CompId) -> GraphResult<PinId> {
        Ok(self.try_component(comp)?.p2())
    }

    /// Node the pin is bound to, if any.
    pub fn node_of(&self, pin: PinId) -> Option<NodeId> {
        self.pin(pin).and_then(|p| p.node)
    }

    fn registered_pins(&self) -> impl Iterator<Item = &Pin> + '_ {
        self.components()
            .flat_map(|c| c.pins.iter())
            .filter_map(move |&p| self.pin(p))
    }

    /// Pins of registered components bound to `node`, in component then
    /// pin-declaration order.
    pub fn pins_at_node(&self, node: NodeId) -> Vec<PinId> {
        self.registered_pins()
            .filter(|p| p.node == Some(node))
            .map(|p| p.id)
            .collect()
    }

    pub fn unconnected_pins(&self) -> Vec<PinId> {
        self.registered_pins()
            .filter(|p| !p.is_connected())
            .map(|p| p.id)
            .collect()
    }

    /// "R1.1" for a component pin, the bare name for a virtual pin.
    pub fn pin_full_name(&self, pin: PinId) -> String {
        let Some(p) = self.pin(pin) else {
            return format!("<pin {pin}>");
        };
        match p.component.and_then(|c| self.component(c)) {
            Some(comp) => format!("{}.{}", comp.label, p.name),
            None => p.name.clone(),
        }
    }

    /// The canonical ground node, created as "GND" and registered on first
    /// access. A registered node already named as ground is adopted instead.
    pub fn ground_node(&mut self) -> NodeId {
        if let Some(id) = self.ground {
            return id;
        }
        let existing = self.nodes().find(|n| n.is_ground()).map(|n| n.id);
        let id = match existing {
            Some(id) => id,
            None => {
                debug!(circuit = %self.name, "creating ground node");
                self.create_node(Some(GROUND_NAMES[0]))
            }
        };
        self.ground = Some(id);
        id
    }

    // ---- identity overrides ----

    pub fn set_component_uid(&mut self, comp: CompId, uid: impl Into<String>) -> GraphResult<()> {
        self.try_component(comp)?;
        self.components[comp.slot()].uid = uid.into();
        Ok(())
    }

    pub fn set_label(&mut self, comp: CompId, label: impl Into<String>) -> GraphResult<()> {
        self.try_component(comp)?;
        self.components[comp.slot()].label = label.into();
        Ok(())
    }

    pub fn set_node_uid(&mut self, node: NodeId, uid: impl Into<String>) -> GraphResult<()> {
        self.try_node(node)?;
        self.nodes[node.slot()].uid = uid.into();
        Ok(())
    }

    pub fn set_node_name(&mut self, node: NodeId, name: Option<String>) -> GraphResult<()> {
        self.try_node(node)?;
        self.nodes[node.slot()].name = name;
        Ok(())
    }

    pub fn set_pin_uid(&mut self, pin: PinId, uid: impl Into<String>) -> GraphResult<()> {
        self.pin_mut(pin)?.uid = uid.into();
        Ok(())
    }

    /// Registered components of `kind`, in order.
    pub fn components_of(&self, kind: PartKind) -> Vec<CompId> {
        self.components()
            .filter(|c| c.kind() == kind)
            .map(|c| c.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_parts::{dc, ground, resistor};

    #[test]
    fn create_does_not_register() {
        let mut s = Schematic::new("t");
        let r = s.create(resistor(1e3));
        assert!(!s.is_registered(r));
        assert_eq!(s.components().count(), 0);
        s.add_component(r);
        s.add_component(r);
        assert_eq!(s.component_ids().len(), 2);
    }

    #[test]
    fn generated_identity() {
        let mut s = Schematic::new("t");
        let r1 = s.place(resistor(1.0));
        let r2 = s.place(resistor(2.0));
        let c = s.component(r2).unwrap();
        assert_eq!(c.uid, "resistor_2");
        assert_eq!(c.label, "R2");
        let pin = s.pin_named(r1, "2").unwrap();
        assert_eq!(s.pin(pin).unwrap().uid, "resistor_1.2");
        assert_eq!(s.pin_full_name(pin), "R1.2");
    }

    #[test]
    fn add_node_dedups() {
        let mut s = Schematic::new("t");
        let n = s.new_node(None);
        s.add_node(n);
        s.add_node(n);
        assert_eq!(s.node_ids(), &[n]);
    }

    #[test]
    fn connect_registers_bind_does_not() {
        let mut s = Schematic::new("t");
        let r = s.place(resistor(1.0));
        let p = s.p1(r).unwrap();
        let n = s.new_node(None);
        s.bind(p, n).unwrap();
        assert!(!s.is_node_registered(n));
        s.connect(p, n).unwrap();
        assert!(s.is_node_registered(n));
        assert_eq!(s.pins_at_node(n), vec![p]);
    }

    #[test]
    fn unknown_pin_name_is_an_error() {
        let mut s = Schematic::new("t");
        let r = s.place(resistor(1.0));
        let err = s.pin_named(r, "anode").unwrap_err();
        assert!(matches!(err, GraphError::UnknownPin { .. }));
    }

    #[test]
    fn source_terminals_are_reversed() {
        let mut s = Schematic::new("t");
        let v = s.place(dc(5.0));
        assert_eq!(s.p1(v).unwrap(), s.pin_named(v, "negative").unwrap());
        assert_eq!(s.p2(v).unwrap(), s.pin_named(v, "positive").unwrap());
        let g = s.place(ground());
        assert_eq!(s.p1(g).unwrap(), s.p2(g).unwrap());
    }

    #[test]
    fn ground_node_is_memoized() {
        let mut s = Schematic::new("t");
        let a = s.ground_node();
        let b = s.ground_node();
        assert_eq!(a, b);
        assert!(s.node(a).unwrap().is_ground());
        assert_eq!(s.node_ids(), &[a]);
    }

    #[test]
    fn ground_node_adopts_registered_gnd() {
        let mut s = Schematic::new("t");
        let n = s.create_node(Some("0"));
        assert_eq!(s.ground_node(), n);
    }

    #[test]
    fn unconnected_pins_in_order() {
        let mut s = Schematic::new("t");
        let r = s.place(resistor(1.0));
        let p1 = s.p1(r).unwrap();
        let p2 = s.p2(r).unwrap();
        assert_eq!(s.unconnected_pins(), vec![p1, p2]);
        let n = s.create_node(None);
        s.connect(p1, n).unwrap();
        assert_eq!(s.unconnected_pins(), vec![p2]);
    }
}
