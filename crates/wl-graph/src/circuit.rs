//! The `circuit` entry point.

use tracing::debug;

use crate::builder::{Item, apply_to_circuit, paths, series};
use crate::error::GraphResult;
use crate::schematic::Schematic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitOptions {
    /// Run [`Schematic::auto_connect_grounds`] once the layout is built.
    pub auto_ground: bool,
}

impl Default for CircuitOptions {
    fn default() -> Self {
        Self { auto_ground: true }
    }
}

/// How the circuit's items are arranged.
#[derive(Debug, Clone)]
pub enum Layout {
    /// One series chain.
    Series(Vec<Item>),
    /// Several paths that may share components.
    Paths(Vec<Vec<Item>>),
}

impl Layout {
    pub fn series<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        Layout::Series(items.into_iter().map(Into::into).collect())
    }
}

/// Build a schematic with default options.
///
/// `layout` receives the fresh schematic so it can create shared components
/// before describing the arrangement.
///
/// ```
/// use wl_graph::{circuit, Layout};
/// use wl_parts::{dc, ground, led, resistor, LedColor};
///
/// let s = circuit("LED", |_| {
///     Ok(Layout::series([dc(5.0), resistor(330.0), led(LedColor::Red), ground()]))
/// })
/// .unwrap();
/// assert_eq!(s.component_ids().len(), 4);
/// assert!(s.validate().valid);
/// ```
pub fn circuit<F>(name: impl Into<String>, layout: F) -> GraphResult<Schematic>
where
    F: FnOnce(&mut Schematic) -> GraphResult<Layout>,
{
    circuit_with(name, CircuitOptions::default(), layout)
}

pub fn circuit_with<F>(
    name: impl Into<String>,
    options: CircuitOptions,
    layout: F,
) -> GraphResult<Schematic>
where
    F: FnOnce(&mut Schematic) -> GraphResult<Layout>,
{
    let mut s = Schematic::new(name);
    match layout(&mut s)? {
        Layout::Series(items) => {
            let result = series(&mut s, items)?;
            apply_to_circuit(&mut s, &result);
        }
        Layout::Paths(p) => paths(&mut s, p)?,
    }
    if options.auto_ground {
        s.auto_connect_grounds()?;
    }
    debug!(
        circuit = %s.name(),
        components = s.component_ids().len(),
        nodes = s.node_ids().len(),
        "circuit built"
    );
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_parts::{dc, ground, resistor};

    #[test]
    fn auto_ground_can_be_disabled() {
        let s = circuit_with(
            "t",
            CircuitOptions { auto_ground: false },
            |_| Ok(Layout::series([dc(5.0), resistor(1.0), ground()])),
        )
        .unwrap();
        let v = s.component_ids()[0];
        let neg = s.pin_named(v, "negative").unwrap();
        assert!(s.node_of(neg).is_none());
    }

    #[test]
    fn empty_series_layout_fails() {
        let err = circuit("t", |_| Ok(Layout::Series(Vec::new()))).unwrap_err();
        assert_eq!(err, crate::GraphError::EmptySeries);
    }
}
