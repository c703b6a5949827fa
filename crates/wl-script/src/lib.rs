//! wl-script: the wirelang circuit description language.
//!
//! A script is a sequence of statements that builds one schematic. It is the
//! format `wl_db::reverse_db_to_dsl` emits and the CLI compiles.
//!
//! # Grammar Overview
//!
//! ```text
//! script     = { statement }
//! statement  = "use" string ";"
//!            | "let" ident "=" expr ";"
//!            | "export" (ident | string) ";"
//!            | expr ";"
//! expr       = "-" expr | primary { "." (ident | string | number) }
//! primary    = number | string | "true" | "false" | "null"
//!            | ident [ "(" [ expr { "," expr } ] ")" ]
//!            | "[" [ expr { "," expr } ] "]"
//!            | "{" [ field { "," field } ] "}"
//!            | "(" expr ")"
//! field      = (ident | string | number) ":" expr
//!
//! number     = digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+] [si_suffix]
//! si_suffix  = 'p' | 'n' | 'u' | 'µ' | 'm' | 'k' | 'M' | "meg" | 'G'
//! comment    = "//" { any_char }
//! ```
//!
//! # Builtins
//!
//! | Call | Effect |
//! |------|--------|
//! | `circuit("name", { auto_ground }?, items...)` | Name the schematic; optional series or `[[path], ...]` layout, auto-grounded unless disabled |
//! | `node()`, `node("GND")` | New registered node |
//! | `connect(r1."1", n1)` | Bind a pin to a node |
//! | `identity(r1, { id, label, pins })` | Override generated ids |
//! | `series(..)`, `parallel(..)` | Topology builders; applied at statement level |
//! | `wire(a, b)`, `junction(a, b, ..)` | Join pins with a fresh node |
//! | `paths([..], [..])` | Multi-path layout sharing components; elements may be pins such as `q1.B` |
//! | `add(x, ..)` | Register components, nodes or groups |
//! | `auto_ground()` | Merge grounds and ground source returns |
//!
//! Part factories (`R`, `C`, `LED`, `NPN`, `NAND`, ...) live in
//! [`factories`]. A part is placed when a statement evaluates to it, so
//! `let r1 = R(330);` registers `r1` immediately.
//!
//! # Example
//!
//! ```
//! let module = wl_script::run(r#"
//!     use "wirelang";
//!     circuit("LED", DC(5), R(330), LED(RED), GND());
//!     export default;
//! "#).unwrap();
//! let s = module.export("default").unwrap();
//! assert_eq!(s.component_ids().len(), 4);
//! assert!(s.validate().valid);
//! ```

pub mod ast;
pub mod error;
pub mod eval;
pub mod factories;
pub mod lexer;
pub mod parser;
pub mod value;

pub use error::{ScriptError, ScriptResult};
pub use eval::{DEFAULT_CIRCUIT_NAME, Interpreter, ScriptModule, run};
pub use parser::parse;
pub use value::Value;
