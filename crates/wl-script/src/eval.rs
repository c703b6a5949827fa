//! Statement evaluation: turns a parsed script into a schematic.

use std::collections::HashMap;

use tracing::debug;
use wl_core::NodeId;
use wl_db::reverse::RESERVED_WORDS;
use wl_db::{ComponentIdentity, apply_component_identity, apply_node_identity};
use wl_graph::{
    CircuitOptions, ConnectionResult, Item, Schematic, apply_to_circuit, junction, parallel,
    paths, series, wire,
};

use crate::ast::{Expr, Program, Stmt, StmtKind};
use crate::error::{ScriptError, ScriptResult};
use crate::factories::call_factory;
use crate::value::{Value, mismatch};

/// Circuit name used until a `circuit(...)` call sets one.
pub const DEFAULT_CIRCUIT_NAME: &str = "untitled";

/// The outcome of running a script.
#[derive(Debug)]
pub struct ScriptModule {
    pub schematic: Schematic,
    /// Names given by `export` statements, in order.
    pub exports: Vec<String>,
    /// Module named by the `use` statement, if any.
    pub module: Option<String>,
    /// Warnings from auto-grounding passes.
    pub warnings: Vec<String>,
}

impl ScriptModule {
    /// The schematic, if the script exported it under `name`.
    pub fn export(&self, name: &str) -> ScriptResult<&Schematic> {
        self.check_export(name)?;
        Ok(&self.schematic)
    }

    pub fn into_export(self, name: &str) -> ScriptResult<Schematic> {
        self.check_export(name)?;
        Ok(self.schematic)
    }

    fn check_export(&self, name: &str) -> ScriptResult<()> {
        if self.exports.iter().any(|e| e == name) {
            return Ok(());
        }
        let available = if self.exports.is_empty() {
            "none".to_string()
        } else {
            self.exports.join(", ")
        };
        Err(ScriptError::ExportNotFound {
            name: name.to_string(),
            available,
        })
    }
}

pub struct Interpreter {
    schematic: Schematic,
    vars: HashMap<String, Value>,
    exports: Vec<String>,
    module: Option<String>,
    warnings: Vec<String>,
    /// Nodes registered by applying builder results.
    builder_nodes: Vec<NodeId>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            schematic: Schematic::new(DEFAULT_CIRCUIT_NAME),
            vars: HashMap::new(),
            exports: Vec::new(),
            module: None,
            warnings: Vec::new(),
            builder_nodes: Vec::new(),
        }
    }

    pub fn execute(&mut self, program: &Program) -> ScriptResult<()> {
        for stmt in &program.statements {
            self.exec(stmt).map_err(|e| e.at(stmt.line))?;
        }
        Ok(())
    }

    pub fn finish(self) -> ScriptModule {
        debug!(
            circuit = %self.schematic.name(),
            components = self.schematic.component_ids().len(),
            nodes = self.schematic.node_ids().len(),
            exports = ?self.exports,
            "script evaluated"
        );
        ScriptModule {
            schematic: self.schematic,
            exports: self.exports,
            module: self.module,
            warnings: self.warnings,
        }
    }

    fn exec(&mut self, stmt: &Stmt) -> ScriptResult<()> {
        let line = stmt.line;
        match &stmt.kind {
            StmtKind::Use(module) => {
                debug!(module = %module, "use");
                self.module = Some(module.clone());
            }
            StmtKind::Let { name, value } => {
                if RESERVED_WORDS.contains(&name.as_str()) {
                    return Err(ScriptError::eval(
                        line,
                        format!("'{name}' is reserved and cannot be a variable name"),
                    ));
                }
                let value = self.eval(value, line)?;
                let value = self.materialize(value);
                self.vars.insert(name.clone(), value);
            }
            StmtKind::Export(name) => {
                if !self.exports.contains(name) {
                    self.exports.push(name.clone());
                }
            }
            StmtKind::Expr(expr) => {
                let value = self.eval(expr, line)?;
                self.materialize(value);
            }
        }
        Ok(())
    }

    /// Statement-level results take effect: parts are placed and builder
    /// results are registered.
    fn materialize(&mut self, value: Value) -> Value {
        match value {
            Value::Part(part) => Value::Component(self.schematic.place(part)),
            Value::Group(group) => {
                self.apply(&group);
                Value::Group(group)
            }
            other => other,
        }
    }

    fn apply(&mut self, result: &ConnectionResult) {
        let fresh: Vec<_> = result
            .components
            .iter()
            .copied()
            .filter(|&c| !self.schematic.is_registered(c))
            .collect();
        apply_to_circuit(
            &mut self.schematic,
            &ConnectionResult {
                components: fresh,
                ..result.clone()
            },
        );
        for &node in &result.nodes {
            if !self.builder_nodes.contains(&node) {
                self.builder_nodes.push(node);
            }
        }

        // Rails folded into an enclosing builder's rails lose every pin.
        let s = &mut self.schematic;
        let folded: Vec<NodeId> = self
            .builder_nodes
            .iter()
            .copied()
            .filter(|&n| s.is_node_registered(n) && s.pins_at_node(n).is_empty())
            .collect();
        for &node in &folded {
            s.remove_node(node);
        }
        self.builder_nodes.retain(|n| !folded.contains(n));
    }

    fn eval(&mut self, expr: &Expr, line: usize) -> ScriptResult<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Null => Ok(Value::Null),
            Expr::Ident(name) => self.lookup(name, line),
            Expr::Neg(inner) => match self.eval(inner, line)? {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => Err(mismatch(line, "operand of '-'", "a number", &other)),
            },
            Expr::Member { target, name } => {
                let target = self.eval(target, line)?;
                self.member(target, name, line)
            }
            Expr::Object(fields) => {
                let mut out = Vec::with_capacity(fields.len());
                for (key, value) in fields {
                    out.push((key.clone(), self.eval(value, line)?));
                }
                Ok(Value::Object(out))
            }
            Expr::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.eval(item, line)?);
                }
                Ok(Value::Array(out))
            }
            Expr::Call { name, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg, line)?);
                }
                self.call(name, values, line)
            }
        }
    }

    fn lookup(&self, name: &str, line: usize) -> ScriptResult<Value> {
        if let Some(value) = self.vars.get(name) {
            return Ok(value.clone());
        }
        if name.starts_with(|c: char| c.is_ascii_uppercase()) {
            return Ok(Value::Symbol(name.to_string()));
        }
        Err(ScriptError::eval(line, format!("undefined variable '{name}'")))
    }

    fn member(&mut self, target: Value, name: &str, line: usize) -> ScriptResult<Value> {
        match target {
            Value::Component(comp) => Ok(Value::Pin(self.schematic.pin_named(comp, name)?)),
            Value::Group(group) => match name {
                "first" => Ok(Value::Pin(group.first_pin)),
                "last" => Ok(Value::Pin(group.last_pin)),
                _ => Err(ScriptError::eval(
                    line,
                    format!("a group has 'first' and 'last', not '{name}'"),
                )),
            },
            other => Err(mismatch(line, &format!("target of '.{name}'"), "a component or group", &other)),
        }
    }

    fn call(&mut self, name: &str, args: Vec<Value>, line: usize) -> ScriptResult<Value> {
        match name {
            "circuit" => self.circuit(args, line),
            "node" => {
                let label = match args.as_slice() {
                    [] => None,
                    [value] => Some(value.as_text(line, "node name")?),
                    _ => return Err(arity(line, name, "0 or 1", args.len())),
                };
                Ok(Value::Node(self.schematic.create_node(label)))
            }
            "connect" => {
                let [pin, node] = two(name, &args, line)?;
                let (pin, node) = (pin.as_pin(line, "pin")?, node.as_node(line, "node")?);
                self.schematic.connect(pin, node)?;
                Ok(Value::Unit)
            }
            "identity" => {
                let [target, spec] = two(name, &args, line)?;
                let Value::Object(fields) = spec else {
                    return Err(mismatch(line, "identity overrides", "an object", spec));
                };
                self.identity(target, fields, line)?;
                Ok(Value::Unit)
            }
            "series" | "parallel" => {
                let items = items(args, line)?;
                let group = if name == "series" {
                    series(&mut self.schematic, items)?
                } else {
                    parallel(&mut self.schematic, items)?
                };
                Ok(Value::Group(group))
            }
            "wire" => {
                let [a, b] = two(name, &args, line)?;
                let (a, b) = (a.as_pin(line, "wire end")?, b.as_pin(line, "wire end")?);
                Ok(Value::Group(wire(&mut self.schematic, a, b)?))
            }
            "junction" => {
                let pins = args
                    .iter()
                    .map(|v| v.as_pin(line, "junction argument"))
                    .collect::<ScriptResult<Vec<_>>>()?;
                Ok(Value::Group(junction(&mut self.schematic, pins)?))
            }
            "paths" => {
                let layout = path_list(args, line)?;
                paths(&mut self.schematic, layout)?;
                Ok(Value::Unit)
            }
            "add" => {
                for value in args {
                    self.add(value, line)?;
                }
                Ok(Value::Unit)
            }
            "auto_ground" => {
                if !args.is_empty() {
                    return Err(arity(line, name, "0", args.len()));
                }
                self.auto_ground()?;
                Ok(Value::Unit)
            }
            _ => match call_factory(name, &args, line)? {
                Some(part) => Ok(Value::Part(part)),
                None => Err(ScriptError::eval(line, format!("unknown function '{name}'"))),
            },
        }
    }

    /// `circuit(name)` names the schematic. Extra arguments describe a
    /// layout: items chain in series, a single array of arrays is a set of
    /// paths. An options object may precede the layout. A layout is
    /// auto-grounded unless the options say `auto_ground: false`.
    fn circuit(&mut self, mut args: Vec<Value>, line: usize) -> ScriptResult<Value> {
        if args.is_empty() {
            return Err(arity(line, "circuit", "at least 1", 0));
        }
        let name = args.remove(0);
        self.schematic.set_name(name.as_text(line, "circuit name")?);
        let options = match args.first() {
            Some(Value::Object(fields)) => {
                let options = circuit_options(fields, line)?;
                args.remove(0);
                options
            }
            _ => CircuitOptions::default(),
        };
        if args.is_empty() {
            return Ok(Value::Unit);
        }

        let is_paths = matches!(
            args.as_slice(),
            [Value::Array(rows)] if rows.iter().all(|r| matches!(r, Value::Array(_)))
        );
        if is_paths {
            let Some(Value::Array(rows)) = args.pop() else {
                return Ok(Value::Unit);
            };
            let layout = path_list(rows, line)?;
            paths(&mut self.schematic, layout)?;
        } else {
            let single_array = matches!(args.as_slice(), [Value::Array(_)]);
            let args = match args.pop() {
                Some(Value::Array(items)) if single_array => items,
                Some(last) => {
                    args.push(last);
                    args
                }
                None => args,
            };
            let chain = series(&mut self.schematic, items(args, line)?)?;
            self.apply(&chain);
        }
        if options.auto_ground {
            self.auto_ground()?;
        }
        Ok(Value::Unit)
    }

    fn auto_ground(&mut self) -> ScriptResult<()> {
        let report = self.schematic.auto_connect_grounds()?;
        self.warnings.extend(report.warnings);
        Ok(())
    }

    fn add(&mut self, value: Value, line: usize) -> ScriptResult<()> {
        match self.materialize(value) {
            Value::Component(comp) => {
                if !self.schematic.is_registered(comp) {
                    self.schematic.add_component(comp);
                }
            }
            Value::Node(node) => self.schematic.add_node(node),
            Value::Group(_) => {}
            Value::Array(values) => {
                for value in values {
                    self.add(value, line)?;
                }
            }
            other => return Err(mismatch(line, "add() argument", "a component, node or group", &other)),
        }
        Ok(())
    }

    fn identity(&mut self, target: &Value, fields: &[(String, Value)], line: usize) -> ScriptResult<()> {
        let text = |v: &Value, what: &str| v.as_text(line, what).map(str::to_string);
        match target {
            Value::Component(comp) => {
                let mut identity = ComponentIdentity::default();
                for (key, value) in fields {
                    match key.as_str() {
                        "id" => identity.id = Some(text(value, "component id")?),
                        "label" => identity.label = Some(text(value, "component label")?),
                        "pins" => {
                            let Value::Object(pins) = value else {
                                return Err(mismatch(line, "pins", "an object", value));
                            };
                            for (pin, id) in pins {
                                identity.pins.push((pin.clone(), text(id, "pin id")?));
                            }
                        }
                        other => return Err(unknown_field(line, "component", other)),
                    }
                }
                apply_component_identity(&mut self.schematic, *comp, &identity)?;
            }
            Value::Node(node) => {
                for (key, value) in fields {
                    match key.as_str() {
                        "id" => apply_node_identity(&mut self.schematic, *node, &text(value, "node id")?)?,
                        "name" => {
                            let name = match value {
                                Value::Null => None,
                                other => Some(text(other, "node name")?),
                            };
                            self.schematic.set_node_name(*node, name)?;
                        }
                        other => return Err(unknown_field(line, "node", other)),
                    }
                }
            }
            Value::Pin(pin) => {
                for (key, value) in fields {
                    match key.as_str() {
                        "id" => self.schematic.set_pin_uid(*pin, text(value, "pin id")?)?,
                        other => return Err(unknown_field(line, "pin", other)),
                    }
                }
            }
            other => return Err(mismatch(line, "identity target", "a component, node or pin", other)),
        }
        Ok(())
    }
}

fn arity(line: usize, name: &str, expected: &str, got: usize) -> ScriptError {
    ScriptError::eval(line, format!("{name}() takes {expected} argument(s), got {got}"))
}

fn two<'a>(name: &str, args: &'a [Value], line: usize) -> ScriptResult<[&'a Value; 2]> {
    match args {
        [a, b] => Ok([a, b]),
        _ => Err(arity(line, name, "2", args.len())),
    }
}

fn unknown_field(line: usize, what: &str, field: &str) -> ScriptError {
    ScriptError::eval(line, format!("unknown {what} identity field '{field}'"))
}

fn circuit_options(fields: &[(String, Value)], line: usize) -> ScriptResult<CircuitOptions> {
    let mut options = CircuitOptions::default();
    for (key, value) in fields {
        match (key.as_str(), value) {
            ("auto_ground", Value::Bool(on)) => options.auto_ground = *on,
            ("auto_ground", other) => {
                return Err(mismatch(line, "auto_ground", "a boolean", other));
            }
            (other, _) => {
                return Err(ScriptError::eval(line, format!("unknown circuit option '{other}'")));
            }
        }
    }
    Ok(options)
}

fn items(values: Vec<Value>, line: usize) -> ScriptResult<Vec<Item>> {
    values.into_iter().map(|v| v.into_item(line)).collect()
}

fn path_list(values: Vec<Value>, line: usize) -> ScriptResult<Vec<Vec<Item>>> {
    values
        .into_iter()
        .map(|row| match row {
            Value::Array(row) => items(row, line),
            other => Err(mismatch(line, "path", "an array", &other)),
        })
        .collect()
}

/// Parse and evaluate a script.
pub fn run(source: &str) -> ScriptResult<ScriptModule> {
    let program = crate::parser::parse(source)?;
    let mut interpreter = Interpreter::new();
    interpreter.execute(&program)?;
    Ok(interpreter.finish())
}
