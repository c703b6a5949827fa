//! Ground merging and auto-grounding of sources.

use tracing::{debug, warn};
use wl_core::{CompId, PinId};
use wl_parts::PartKind;
use wl_parts::sources::NEGATIVE_PIN;

use crate::error::GraphResult;
use crate::schematic::Schematic;

/// Outcome of [`Schematic::auto_connect_grounds`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AutoGroundReport {
    /// Source pins that were bound to ground by this call.
    pub connected: Vec<PinId>,
    pub warnings: Vec<String>,
}

impl Schematic {
    fn ground_pin(&self, comp: CompId) -> GraphResult<PinId> {
        self.p1(comp)
    }

    /// Collapse every ground component onto one node.
    ///
    /// The first ground component's node is the master. Pins on any other
    /// ground's node are repointed onto the master and the orphaned node is
    /// unregistered. An unbound ground is bound to the master. Nothing
    /// happens with fewer than two grounds or when the first is unbound.
    pub fn merge_grounds(&mut self) -> GraphResult<()> {
        let grounds = self.components_of(PartKind::Ground);
        let Some((&first, rest)) = grounds.split_first() else {
            return Ok(());
        };
        if rest.is_empty() {
            return Ok(());
        }
        let Some(master) = self.node_of(self.ground_pin(first)?) else {
            debug!(circuit = %self.name(), "first ground is unbound, skipping merge");
            return Ok(());
        };

        for &g in rest {
            let pin = self.ground_pin(g)?;
            match self.node_of(pin) {
                Some(node) if node == master => {}
                Some(node) => {
                    for p in self.pins_at_node(node) {
                        self.disconnect(p)?;
                        self.connect(p, master)?;
                    }
                    self.remove_node(node);
                    debug!(from = %node, to = %master, "merged ground node");
                }
                None => self.connect(pin, master)?,
            }
        }
        Ok(())
    }

    /// Merge grounds, then bind every source's unbound `negative` pin to the
    /// ground node. Safe to run repeatedly.
    pub fn auto_connect_grounds(&mut self) -> GraphResult<AutoGroundReport> {
        self.merge_grounds()?;
        let mut report = AutoGroundReport::default();

        let Some(&first) = self.components_of(PartKind::Ground).first() else {
            let msg = "No ground component found; sources were not auto-grounded".to_string();
            warn!(circuit = %self.name(), "{msg}");
            report.warnings.push(msg);
            return Ok(report);
        };

        let gpin = self.ground_pin(first)?;
        let master = match self.node_of(gpin) {
            Some(node) => node,
            None => {
                let node = self.ground_node();
                self.connect(gpin, node)?;
                self.merge_grounds()?;
                node
            }
        };
        self.add_node(master);

        let sources: Vec<CompId> = self
            .components()
            .filter(|c| c.kind().is_source())
            .map(|c| c.id)
            .collect();
        for src in sources {
            let pin = self.pin_named(src, NEGATIVE_PIN)?;
            if self.node_of(pin).is_none() {
                self.connect(pin, master)?;
                debug!(pin = %self.pin_full_name(pin), "auto-grounded");
                report.connected.push(pin);
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_parts::{dc, ground, resistor};

    #[test]
    fn merge_is_noop_with_one_ground() {
        let mut s = Schematic::new("t");
        let g = s.place(ground());
        s.merge_grounds().unwrap();
        assert!(s.node_of(s.p1(g).unwrap()).is_none());
    }

    #[test]
    fn merge_binds_unbound_grounds_to_master() {
        let mut s = Schematic::new("t");
        let g1 = s.place(ground());
        let g2 = s.place(ground());
        let n = s.create_node(Some("GND"));
        s.connect(s.p1(g1).unwrap(), n).unwrap();
        s.merge_grounds().unwrap();
        assert_eq!(s.node_of(s.p1(g2).unwrap()), Some(n));
    }

    #[test]
    fn merge_skips_when_first_ground_unbound() {
        let mut s = Schematic::new("t");
        s.place(ground());
        let g2 = s.place(ground());
        let n = s.create_node(None);
        s.connect(s.p1(g2).unwrap(), n).unwrap();
        s.merge_grounds().unwrap();
        assert_eq!(s.node_ids(), &[n]);
    }

    #[test]
    fn no_ground_component_warns() {
        let mut s = Schematic::new("t");
        s.place(dc(5.0));
        let report = s.auto_connect_grounds().unwrap();
        assert!(report.connected.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn floating_ground_gets_canonical_node() {
        let mut s = Schematic::new("t");
        let v = s.place(dc(9.0));
        let g = s.place(ground());
        s.place(resistor(100.0));
        let report = s.auto_connect_grounds().unwrap();
        let gnd = s.node_of(s.p1(g).unwrap()).unwrap();
        assert!(s.node(gnd).unwrap().is_ground());
        assert_eq!(report.connected, vec![s.pin_named(v, "negative").unwrap()]);
        assert_eq!(s.node_of(report.connected[0]), Some(gnd));
    }
}
