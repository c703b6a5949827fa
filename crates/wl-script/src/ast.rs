//! Abstract syntax tree for wirelang scripts.

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
    /// Variable reference, or an upper-case symbol such as `RED`.
    Ident(String),
    Neg(Box<Expr>),
    /// Builtin or factory call: `R(330)`, `series(a, b)`.
    Call { name: String, args: Vec<Expr> },
    /// `target.name` or `target."name"`: a pin, or a group boundary.
    Member { target: Box<Expr>, name: String },
    Object(Vec<(String, Expr)>),
    Array(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Use(String),
    Let { name: String, value: Expr },
    Export(String),
    Expr(Expr),
}

/// A statement and the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: usize,
}

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}
