//! Runtime values produced while evaluating a script.

use wl_core::{CompId, NodeId, PinId};
use wl_graph::{ConnectionResult, Item};
use wl_parts::Part;

use crate::error::{ScriptError, ScriptResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Number(f64),
    Str(String),
    Bool(bool),
    /// An upper-case bare word that names no variable (`RED`, `NPN`).
    Symbol(String),
    /// A part not yet placed in the schematic.
    Part(Part),
    Component(CompId),
    Node(NodeId),
    Pin(PinId),
    /// The result of a builder call.
    Group(ConnectionResult),
    Object(Vec<(String, Value)>),
    Array(Vec<Value>),
    Unit,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Symbol(_) => "symbol",
            Value::Part(_) => "part",
            Value::Component(_) => "component",
            Value::Node(_) => "node",
            Value::Pin(_) => "pin",
            Value::Group(_) => "group",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::Unit => "nothing",
        }
    }

    pub fn as_number(&self, line: usize, what: &str) -> ScriptResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(mismatch(line, what, "a number", other)),
        }
    }

    /// Strings and symbols both count as text.
    pub fn as_text(&self, line: usize, what: &str) -> ScriptResult<&str> {
        match self {
            Value::Str(s) | Value::Symbol(s) => Ok(s),
            other => Err(mismatch(line, what, "a string", other)),
        }
    }

    pub fn as_pin(&self, line: usize, what: &str) -> ScriptResult<PinId> {
        match self {
            Value::Pin(p) => Ok(*p),
            other => Err(mismatch(line, what, "a pin", other)),
        }
    }

    pub fn as_node(&self, line: usize, what: &str) -> ScriptResult<NodeId> {
        match self {
            Value::Node(n) => Ok(*n),
            other => Err(mismatch(line, what, "a node", other)),
        }
    }

    pub fn into_item(self, line: usize) -> ScriptResult<Item> {
        match self {
            Value::Part(p) => Ok(Item::Part(p)),
            Value::Component(c) => Ok(Item::Component(c)),
            Value::Pin(p) => Ok(Item::Pin(p)),
            Value::Group(g) => Ok(Item::Group(g)),
            other => Err(mismatch(line, "builder argument", "a part, pin or group", &other)),
        }
    }

    /// Convert a plain data value to JSON. Integral numbers become JSON
    /// integers so they deserialize into integer fields.
    pub fn to_json(&self, line: usize) -> ScriptResult<serde_json::Value> {
        use serde_json::Value as Json;
        Ok(match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Str(s) | Value::Symbol(s) => Json::String(s.clone()),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                Json::from(*n as i64)
            }
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .ok_or_else(|| ScriptError::eval(line, format!("{n} is not a finite number")))?,
            Value::Array(items) => Json::Array(
                items
                    .iter()
                    .map(|v| v.to_json(line))
                    .collect::<ScriptResult<_>>()?,
            ),
            Value::Object(fields) => {
                let mut map = serde_json::Map::new();
                for (key, value) in fields {
                    map.insert(key.clone(), value.to_json(line)?);
                }
                Json::Object(map)
            }
            other => {
                return Err(mismatch(line, "field value", "plain data", other));
            }
        })
    }
}

pub(crate) fn mismatch(line: usize, what: &str, wanted: &str, found: &Value) -> ScriptError {
    ScriptError::eval(
        line,
        format!("{what} must be {wanted}, got {}", found.type_name()),
    )
}

/// Look up a field of an object value.
pub(crate) fn field<'a>(fields: &'a [(String, Value)], key: &str) -> Option<&'a Value> {
    fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_become_json_integers() {
        assert_eq!(Value::Number(3.0).to_json(1).unwrap(), serde_json::json!(3));
        assert_eq!(Value::Number(0.05).to_json(1).unwrap(), serde_json::json!(0.05));
    }

    #[test]
    fn graph_values_are_not_data() {
        let err = Value::Unit.to_json(7).unwrap_err();
        assert!(matches!(err, ScriptError::Eval { line: 7, .. }));
    }
}
