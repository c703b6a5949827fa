//! Topology builders: series, parallel, wire, junction and multi-path.
//!
//! Builders allocate components and nodes in the schematic arena but never
//! register them. The returned [`ConnectionResult`] says what was touched;
//! [`apply_to_circuit`] merges it into the circuit.

use tracing::debug;
use wl_core::{CompId, NodeId, PinId};
use wl_parts::Part;

use crate::error::{GraphError, GraphResult};
use crate::schematic::Schematic;

/// Something a builder can chain.
#[derive(Debug, Clone)]
pub enum Item {
    /// A part to instantiate.
    Part(Part),
    /// An existing component; chained through its series terminals.
    Component(CompId),
    /// A raw pin, used as both boundaries.
    Pin(PinId),
    /// The result of a nested builder call.
    Group(ConnectionResult),
}

impl Item {
    pub fn component(id: CompId) -> Self {
        Item::Component(id)
    }

    pub fn pin(id: PinId) -> Self {
        Item::Pin(id)
    }
}

impl From<Part> for Item {
    fn from(part: Part) -> Self {
        Item::Part(part)
    }
}

impl From<ConnectionResult> for Item {
    fn from(result: ConnectionResult) -> Self {
        Item::Group(result)
    }
}

/// What one builder call produced or touched, plus its two boundary pins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionResult {
    pub components: Vec<CompId>,
    pub nodes: Vec<NodeId>,
    pub first_pin: PinId,
    pub last_pin: PinId,
}

/// Boundaries and contents of a resolved item.
struct Span {
    first: PinId,
    last: PinId,
    components: Vec<CompId>,
    nodes: Vec<NodeId>,
}

fn resolve(s: &mut Schematic, item: Item) -> GraphResult<Span> {
    match item {
        Item::Part(part) => {
            let comp = s.create(part);
            span_of(s, comp)
        }
        Item::Component(comp) => span_of(s, comp),
        Item::Pin(pin) => {
            s.try_pin(pin)?;
            Ok(Span {
                first: pin,
                last: pin,
                components: Vec::new(),
                nodes: Vec::new(),
            })
        }
        Item::Group(r) => Ok(Span {
            first: r.first_pin,
            last: r.last_pin,
            components: r.components,
            nodes: r.nodes,
        }),
    }
}

fn span_of(s: &Schematic, comp: CompId) -> GraphResult<Span> {
    let c = s.try_component(comp)?;
    Ok(Span {
        first: c.p1(),
        last: c.p2(),
        components: vec![comp],
        nodes: Vec::new(),
    })
}

/// The rail a virtual pin stands for, if it is bound.
fn rail_of(s: &Schematic, pin: PinId) -> Option<NodeId> {
    s.pin(pin).filter(|p| p.is_virtual()).and_then(|p| p.node)
}

/// How two boundaries were joined.
enum Joint {
    Fresh(NodeId),
    Reused,
    /// The right-hand rail was folded into the left-hand one.
    Absorbed(NodeId),
}

fn join(s: &mut Schematic, left: PinId, right: PinId) -> GraphResult<Joint> {
    match (rail_of(s, left), rail_of(s, right)) {
        (Some(a), Some(b)) if a == b => Ok(Joint::Reused),
        (Some(a), Some(b)) => {
            s.rebind_all(b, a);
            Ok(Joint::Absorbed(b))
        }
        (Some(a), None) => {
            s.bind(right, a)?;
            Ok(Joint::Reused)
        }
        (None, Some(b)) => {
            s.bind(left, b)?;
            Ok(Joint::Reused)
        }
        (None, None) => {
            let node = s.new_node(None);
            s.bind(left, node)?;
            s.bind(right, node)?;
            Ok(Joint::Fresh(node))
        }
    }
}

/// Chain items end to end: one fresh node between each adjacent pair.
pub fn series<I>(s: &mut Schematic, items: I) -> GraphResult<ConnectionResult>
where
    I: IntoIterator<Item = Item>,
{
    let mut spans = Vec::new();
    for item in items {
        spans.push(resolve(s, item)?);
    }
    let (Some(first), Some(last)) = (spans.first(), spans.last()) else {
        return Err(GraphError::EmptySeries);
    };
    let (first_pin, last_pin) = (first.first, last.last);

    let mut components = Vec::new();
    let mut nodes = Vec::new();
    let mut prev: Option<PinId> = None;
    for span in spans {
        let mut absorbed = None;
        if let Some(left) = prev {
            match join(s, left, span.first)? {
                Joint::Fresh(node) => nodes.push(node),
                Joint::Absorbed(node) => absorbed = Some(node),
                Joint::Reused => {}
            }
        }
        components.extend(span.components);
        nodes.extend(span.nodes.into_iter().filter(|&n| Some(n) != absorbed));
        prev = Some(span.last);
    }

    debug!(components = components.len(), nodes = nodes.len(), "series");
    Ok(ConnectionResult {
        components,
        nodes,
        first_pin,
        last_pin,
    })
}

/// Bind a boundary to a rail. A nested rail is folded into the outer one.
fn attach(s: &mut Schematic, pin: PinId, rail: NodeId) -> GraphResult<Option<NodeId>> {
    match rail_of(s, pin) {
        Some(inner) if inner == rail => Ok(None),
        Some(inner) => {
            s.rebind_all(inner, rail);
            Ok(Some(inner))
        }
        None => {
            s.bind(pin, rail)?;
            Ok(None)
        }
    }
}

/// Put items side by side between two fresh rails. The result's boundary
/// pins are virtual pins bound to the start and end rails.
pub fn parallel<I>(s: &mut Schematic, items: I) -> GraphResult<ConnectionResult>
where
    I: IntoIterator<Item = Item>,
{
    let mut spans = Vec::new();
    for item in items {
        spans.push(resolve(s, item)?);
    }
    if spans.is_empty() {
        return Err(GraphError::EmptyParallel);
    }

    let start = s.new_node(None);
    let end = s.new_node(None);
    let mut components = Vec::new();
    let mut nodes = vec![start, end];
    for span in spans {
        let dropped = [attach(s, span.first, start)?, attach(s, span.last, end)?];
        components.extend(span.components);
        nodes.extend(
            span.nodes
                .into_iter()
                .filter(|n| !dropped.contains(&Some(*n))),
        );
    }

    let first_pin = s.virtual_pin("start");
    let last_pin = s.virtual_pin("end");
    s.bind(first_pin, start)?;
    s.bind(last_pin, end)?;

    debug!(components = components.len(), "parallel");
    Ok(ConnectionResult {
        components,
        nodes,
        first_pin,
        last_pin,
    })
}

/// Join two pins with a fresh node.
pub fn wire(s: &mut Schematic, a: PinId, b: PinId) -> GraphResult<ConnectionResult> {
    junction(s, [a, b])
}

/// Join two or more pins with one fresh node.
pub fn junction<I>(s: &mut Schematic, pins: I) -> GraphResult<ConnectionResult>
where
    I: IntoIterator<Item = PinId>,
{
    let pins: Vec<PinId> = pins.into_iter().collect();
    let (Some(&first_pin), Some(&last_pin)) = (pins.first(), pins.last()) else {
        return Err(GraphError::JunctionTooSmall { count: 0 });
    };
    if pins.len() < 2 {
        return Err(GraphError::JunctionTooSmall { count: pins.len() });
    }
    for &pin in &pins {
        s.try_pin(pin)?;
    }
    let node = s.new_node(None);
    for &pin in &pins {
        s.bind(pin, node)?;
    }
    Ok(ConnectionResult {
        components: Vec::new(),
        nodes: vec![node],
        first_pin,
        last_pin,
    })
}

/// Register a builder result: components appended as-is, nodes deduplicated.
pub fn apply_to_circuit(s: &mut Schematic, result: &ConnectionResult) {
    s.add_components(result.components.iter().copied());
    for &node in &result.nodes {
        s.add_node(node);
    }
}

/// Pick the node two path boundaries share. A pin that already has a node
/// keeps it, the left one when both do. A bound group rail on the right is
/// folded into the left node along with every pin on it.
fn meet(s: &mut Schematic, left: PinId, right: PinId) -> GraphResult<(NodeId, Option<NodeId>)> {
    match (s.node_of(left), s.node_of(right)) {
        (Some(a), Some(b)) if a == b => Ok((a, None)),
        (Some(a), Some(b)) if rail_of(s, right).is_some() => {
            s.rebind_all(b, a);
            Ok((a, Some(b)))
        }
        (Some(a), _) => {
            s.bind(right, a)?;
            Ok((a, None))
        }
        (None, Some(b)) => {
            s.bind(left, b)?;
            Ok((b, None))
        }
        (None, None) => {
            let node = s.new_node(None);
            s.bind(left, node)?;
            s.bind(right, node)?;
            Ok((node, None))
        }
    }
}

fn push_unique<T: PartialEq>(list: &mut Vec<T>, value: T) {
    if !list.contains(&value) {
        list.push(value);
    }
}

/// Assemble several paths that may share components.
///
/// Each element keeps its own boundaries: a component goes through its
/// series terminals, a raw pin is both of its own boundaries and a nested
/// result exposes its first and last pins. Adjacent elements are joined
/// outgoing-to-incoming, reusing any node already on either pin, so paths
/// through the same pin land on the same node. Every distinct owning
/// component is registered once, in first-seen order, along with every node
/// the paths touched.
pub fn paths(s: &mut Schematic, paths: Vec<Vec<Item>>) -> GraphResult<()> {
    if paths.is_empty() {
        return Err(GraphError::EmptyLayout);
    }

    let mut order: Vec<CompId> = Vec::new();
    let mut touched: Vec<NodeId> = Vec::new();
    let mut folded: Vec<NodeId> = Vec::new();
    for (index, path) in paths.into_iter().enumerate() {
        if path.is_empty() {
            return Err(GraphError::EmptyPath { index });
        }

        let mut prev: Option<PinId> = None;
        for item in path {
            let owner = match &item {
                Item::Pin(pin) => s.try_pin(*pin)?.component,
                _ => None,
            };
            let span = resolve(s, item)?;
            if let Some(left) = prev {
                let (node, absorbed) = meet(s, left, span.first)?;
                push_unique(&mut touched, node);
                folded.extend(absorbed);
            }
            for comp in owner.into_iter().chain(span.components) {
                push_unique(&mut order, comp);
            }
            for node in span.nodes {
                push_unique(&mut touched, node);
            }
            prev = Some(span.last);
        }
    }

    for comp in order {
        if !s.is_registered(comp) {
            s.add_component(comp);
        }
    }
    for node in touched {
        if !folded.contains(&node) {
            s.add_node(node);
        }
    }
    for node in folded {
        s.remove_node(node);
    }
    debug!(components = s.component_ids().len(), "paths");
    Ok(())
}
