//! Per-schematic counters for generated ids and labels.

use std::collections::HashMap;

use wl_parts::PartKind;

/// Sequence generator owned by a schematic. Two schematics never share
/// counters, so a fresh schematic always starts at `R1`, `node_1`, ...
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    kinds: HashMap<PartKind, u32>,
    labels: HashMap<&'static str, u32>,
    nodes: u32,
    virtual_pins: u32,
}

fn bump(counter: &mut u32) -> u32 {
    *counter += 1;
    *counter
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(uid, label)` for the next component of `kind`, e.g.
    /// `("resistor_1", "R1")`. Op-amp variants share the `U` label series.
    pub fn next_component(&mut self, kind: PartKind) -> (String, String) {
        let n = bump(self.kinds.entry(kind).or_default());
        let prefix = kind.label_prefix();
        let l = bump(self.labels.entry(prefix).or_default());
        (format!("{}_{n}", kind.tag()), format!("{prefix}{l}"))
    }

    pub fn next_node(&mut self) -> String {
        format!("node_{}", bump(&mut self.nodes))
    }

    pub fn next_virtual_pin(&mut self) -> String {
        format!("vpin_{}", bump(&mut self.virtual_pins))
    }
}
