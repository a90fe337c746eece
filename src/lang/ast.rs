//! AST node types for the restricted component language.
//!
//! The parser produces `Vec<Stmt>` from candidate source text; downstream
//! modules (the compiler's top-level execution and the render-time
//! interpreter) operate on these nodes rather than raw strings.

// ─── Patterns ─────────────────────────────────────────────────────────────────

/// Binding target of a `const`/`let` declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum Pat {
    Ident(String),
    /// Array destructuring, e.g. `const [n, setN] = useState(0);`.
    Array(Vec<String>),
}

// ─── Statements ───────────────────────────────────────────────────────────────

/// Every statement that can appear in candidate source.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// `const`/`let` declaration.  `mutable` is true for `let`.
    Decl {
        pat: Pat,
        init: Expr,
        mutable: bool,
    },
    Return(Option<Expr>),
    If {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    Expr(Expr),
}

// ─── Expressions ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    StrictEq,
    StrictNe,
    And,
    Or,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    Not,
    Neg,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Array(Vec<Expr>),
    Ident(String),
    /// Property access, e.g. `Math.floor`.
    Member {
        object: Box<Expr>,
        property: String,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Unary {
        op: UnOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Ternary `cond ? a : b`.
    Cond {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    /// Assignment to a plain identifier (`x = expr`).
    Assign {
        name: String,
        value: Box<Expr>,
    },
    Arrow {
        params: Vec<String>,
        body: ArrowBody,
    },
    Element(JsxElement),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArrowBody {
    Expr(Box<Expr>),
    Block(Vec<Stmt>),
}

// ─── Markup ───────────────────────────────────────────────────────────────────

/// A JSX-style element.  The tag is resolved through the scope chain at
/// evaluation time; the registry's bindings form the root scope.
#[derive(Clone, Debug, PartialEq)]
pub struct JsxElement {
    pub tag: String,
    /// Attribute name → value expression.  A bare attribute parses as `true`.
    pub props: Vec<(String, Expr)>,
    pub children: Vec<JsxChild>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum JsxChild {
    Text(String),
    Expr(Expr),
    Element(JsxElement),
}
