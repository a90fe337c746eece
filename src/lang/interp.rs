//! Tree-walking interpreter for the restricted component language.
//!
//! Evaluates AST nodes against a scope chain whose root contains exactly
//! the capability registry's bindings.  The interpreter owns no global
//! state: hook slots, the dirty flag and the platform handle travel in a
//! [`RuntimeCtx`] supplied per execution (one for the compiler's single
//! top-level run, one per mounted instance at render time).
//!
//! Faults are ordinary `Result` values carrying a [`SynthesisError`]; the
//! interpreter never panics on bad candidate code.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use crate::error::{ErrorKind, SynthResult, SynthesisError};
use crate::lang::ast::{ArrowBody, BinOp, Expr, JsxChild, JsxElement, Pat, Stmt, UnOp};
use crate::platform::Platform;
use crate::render::Node;

/// Nested calls beyond this depth abort evaluation instead of overflowing
/// the host stack.
const MAX_CALL_DEPTH: usize = 256;

// ─── Values ───────────────────────────────────────────────────────────────────

/// Signature of a host-provided capability function.
pub type NativeImpl = dyn Fn(&mut RuntimeCtx, &[Value]) -> SynthResult<Value>;

/// A named host function injected through the capability registry (or
/// minted by a hook, e.g. a state setter).
#[derive(Clone)]
pub struct NativeValue {
    pub name: &'static str,
    pub f: Rc<NativeImpl>,
}

impl NativeValue {
    pub fn new(
        name: &'static str,
        f: impl Fn(&mut RuntimeCtx, &[Value]) -> SynthResult<Value> + 'static,
    ) -> Self {
        Self { name, f: Rc::new(f) }
    }
}

/// A user-defined function: arrow parameters, body and captured scope.
pub struct Closure {
    pub params: Vec<String>,
    pub body: ArrowBody,
    pub env: Env,
}

/// Generic runtime value.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    List(Rc<RefCell<Vec<Value>>>),
    /// Namespace-style bundle of named members (`Math`, `JSON`, `storage`).
    Object(Rc<BTreeMap<String, Value>>),
    /// An already-rendered subtree.
    Node(Node),
    Closure(Rc<Closure>),
    Native(NativeValue),
    /// A registered UI primitive, usable only in tag position.
    Component(Rc<str>),
}

impl Value {
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn object(members: BTreeMap<String, Value>) -> Self {
        Value::Object(Rc::new(members))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Num(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "array",
            Value::Object(_) => "object",
            Value::Node(_) => "node",
            Value::Closure(_) | Value::Native(_) => "function",
            Value::Component(_) => "component",
        }
    }

    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Num(n) => write!(f, "{}", fmt_num(*n)),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(items) => f.debug_list().entries(items.borrow().iter()).finish(),
            Value::Object(m) => write!(f, "<object {{{}}}>", m.keys().cloned().collect::<Vec<_>>().join(", ")),
            Value::Node(n) => write!(f, "<node {}>", n.summary()),
            Value::Closure(c) => write!(f, "<fn({})>", c.params.join(", ")),
            Value::Native(n) => write!(f, "<native {}>", n.name),
            Value::Component(name) => write!(f, "<component {}>", name),
        }
    }
}

/// Integer-friendly number formatting (`1` rather than `1.0`).
pub fn fmt_num(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// String form used by `+` concatenation and text rendering.
pub fn to_display_string(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Num(n) => fmt_num(*n),
        Value::Str(s) => s.clone(),
        Value::List(items) => items
            .borrow()
            .iter()
            .map(to_display_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Node(_) => "[node]".to_string(),
        Value::Closure(_) | Value::Native(_) => "[function]".to_string(),
        Value::Component(name) => format!("[component {}]", name),
    }
}

fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Num(x), Value::Num(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::List(x), Value::List(y)) => Rc::ptr_eq(x, y),
        (Value::Object(x), Value::Object(y)) => Rc::ptr_eq(x, y),
        (Value::Closure(x), Value::Closure(y)) => Rc::ptr_eq(x, y),
        (Value::Native(x), Value::Native(y)) => Rc::ptr_eq(&x.f, &y.f),
        (Value::Component(x), Value::Component(y)) => x == y,
        _ => false,
    }
}

/// Element-wise comparison used for effect dependency lists.
pub fn shallow_list_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::List(x), Value::List(y)) => {
            let (x, y) = (x.borrow(), y.borrow());
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(p, q)| strict_eq(p, q))
        }
        _ => strict_eq(a, b),
    }
}

// ─── Environment ──────────────────────────────────────────────────────────────

/// A lexical scope chain.  Cloning an `Env` shares the underlying scopes,
/// which is exactly what closure capture needs.
#[derive(Clone)]
pub struct Env {
    scopes: Vec<Rc<RefCell<HashMap<String, Value>>>>,
}

impl Env {
    pub fn new() -> Self {
        Self {
            scopes: vec![Rc::new(RefCell::new(HashMap::new()))],
        }
    }

    pub fn from_bindings(bindings: HashMap<String, Value>) -> Self {
        Self {
            scopes: vec![Rc::new(RefCell::new(bindings))],
        }
    }

    /// New innermost scope sharing all outer scopes.
    pub fn child(&self) -> Env {
        let mut scopes = self.scopes.clone();
        scopes.push(Rc::new(RefCell::new(HashMap::new())));
        Self { scopes }
    }

    /// Bind `name` in the innermost scope (declaration, shadows outer).
    pub fn declare(&self, name: &str, value: Value) {
        self.scopes
            .last()
            .expect("scope chain is never empty")
            .borrow_mut()
            .insert(name.to_string(), value);
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        for scope in self.scopes.iter().rev() {
            if let Some(v) = scope.borrow().get(name) {
                return Some(v.clone());
            }
        }
        None
    }

    /// Overwrite the nearest existing binding.  Returns false if `name`
    /// is not declared anywhere in the chain.
    pub fn assign(&self, name: &str, value: Value) -> bool {
        for scope in self.scopes.iter().rev() {
            let mut map = scope.borrow_mut();
            if map.contains_key(name) {
                map.insert(name.to_string(), value);
                return true;
            }
        }
        false
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<env depth {}>", self.scopes.len())
    }
}

// ─── Runtime context ──────────────────────────────────────────────────────────

/// Per-execution state threaded through the interpreter: hook slots for
/// the current mount, the re-render dirty flag, the injected platform and
/// the effects queued during this pass.
pub struct RuntimeCtx {
    pub hooks: Rc<RefCell<Vec<Value>>>,
    pub cursor: usize,
    pub dirty: Rc<Cell<bool>>,
    pub platform: Rc<dyn Platform>,
    pub effects: Vec<Value>,
}

impl RuntimeCtx {
    /// Fresh context with its own hook slots (used by the compiler's
    /// single top-level execution).
    pub fn detached(platform: Rc<dyn Platform>) -> Self {
        Self::for_mount(
            Rc::new(RefCell::new(Vec::new())),
            Rc::new(Cell::new(false)),
            platform,
        )
    }

    /// Context sharing a mount's hook slots and dirty flag.
    pub fn for_mount(
        hooks: Rc<RefCell<Vec<Value>>>,
        dirty: Rc<Cell<bool>>,
        platform: Rc<dyn Platform>,
    ) -> Self {
        Self {
            hooks,
            cursor: 0,
            dirty,
            platform,
            effects: Vec::new(),
        }
    }

    /// Reserve the next hook slot, initializing it on first use.
    /// Returns the slot index.
    pub fn next_hook_slot(&mut self, init: impl FnOnce() -> Value) -> usize {
        let idx = self.cursor;
        self.cursor += 1;
        let mut slots = self.hooks.borrow_mut();
        if idx >= slots.len() {
            slots.push(init());
        }
        idx
    }
}

// ─── Interpreter ──────────────────────────────────────────────────────────────

/// Result of executing a statement sequence.
pub enum Flow {
    Normal,
    Return(Value),
}

pub struct Interp<'a> {
    pub ctx: &'a mut RuntimeCtx,
    depth: usize,
}

impl<'a> Interp<'a> {
    pub fn new(ctx: &'a mut RuntimeCtx) -> Self {
        Self { ctx, depth: 0 }
    }

    // ── Statements ──

    /// Execute statements in `env`; stops early on `return`.
    pub fn exec_block(&mut self, stmts: &[Stmt], env: &Env) -> SynthResult<Flow> {
        for stmt in stmts {
            if let Flow::Return(v) = self.exec_stmt(stmt, env)? {
                return Ok(Flow::Return(v));
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &Env) -> SynthResult<Flow> {
        match stmt {
            Stmt::Decl { pat, init, .. } => {
                let value = self.eval(init, env)?;
                self.bind_pattern(pat, value, env)?;
                Ok(Flow::Normal)
            }
            Stmt::Return(expr) => {
                let v = match expr {
                    Some(e) => self.eval(e, env)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(v))
            }
            Stmt::If {
                cond,
                then_body,
                else_body,
            } => {
                let branch = if self.eval(cond, env)?.truthy() {
                    then_body
                } else {
                    else_body
                };
                self.exec_block(branch, &env.child())
            }
            Stmt::Expr(e) => {
                self.eval(e, env)?;
                Ok(Flow::Normal)
            }
        }
    }

    fn bind_pattern(&mut self, pat: &Pat, value: Value, env: &Env) -> SynthResult<()> {
        match pat {
            Pat::Ident(name) => {
                env.declare(name, value);
                Ok(())
            }
            Pat::Array(names) => {
                let items = match &value {
                    Value::List(items) => items.borrow().clone(),
                    other => {
                        return Err(SynthesisError::new(
                            ErrorKind::TypeError,
                            format!("cannot destructure a {} value", other.type_name()),
                        ))
                    }
                };
                for (i, name) in names.iter().enumerate() {
                    env.declare(name, items.get(i).cloned().unwrap_or(Value::Null));
                }
                Ok(())
            }
        }
    }

    // ── Expressions ──

    pub fn eval(&mut self, expr: &Expr, env: &Env) -> SynthResult<Value> {
        match expr {
            Expr::Null => Ok(Value::Null),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Num(n) => Ok(Value::Num(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.eval(item, env)?);
                }
                Ok(Value::list(out))
            }
            Expr::Ident(name) => env.lookup(name).ok_or_else(|| {
                SynthesisError::new(
                    ErrorKind::ReferenceError,
                    format!("'{}' is not defined", name),
                )
            }),
            Expr::Member { object, property } => {
                let obj = self.eval(object, env)?;
                self.member(&obj, property)
            }
            Expr::Call { callee, args } => {
                let f = self.eval(callee, env)?;
                let mut argv = Vec::with_capacity(args.len());
                for a in args {
                    argv.push(self.eval(a, env)?);
                }
                self.call(&f, &argv)
            }
            Expr::Unary { op, expr } => {
                let v = self.eval(expr, env)?;
                match op {
                    UnOp::Not => Ok(Value::Bool(!v.truthy())),
                    UnOp::Neg => match v {
                        Value::Num(n) => Ok(Value::Num(-n)),
                        other => Err(type_error(format!(
                            "cannot negate a {} value",
                            other.type_name()
                        ))),
                    },
                }
            }
            Expr::Binary { op, lhs, rhs } => self.eval_binary(*op, lhs, rhs, env),
            Expr::Cond {
                cond,
                then_expr,
                else_expr,
            } => {
                if self.eval(cond, env)?.truthy() {
                    self.eval(then_expr, env)
                } else {
                    self.eval(else_expr, env)
                }
            }
            Expr::Assign { name, value } => {
                let v = self.eval(value, env)?;
                if env.assign(name, v.clone()) {
                    Ok(v)
                } else {
                    Err(SynthesisError::new(
                        ErrorKind::ReferenceError,
                        format!("assignment to undeclared variable '{}'", name),
                    ))
                }
            }
            Expr::Arrow { params, body } => Ok(Value::Closure(Rc::new(Closure {
                params: params.clone(),
                body: body.clone(),
                env: env.clone(),
            }))),
            Expr::Element(el) => {
                let node = self.eval_element(el, env)?;
                Ok(Value::Node(node))
            }
        }
    }

    fn eval_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr, env: &Env) -> SynthResult<Value> {
        // Short-circuit forms first.
        match op {
            BinOp::And => {
                let l = self.eval(lhs, env)?;
                return if l.truthy() { self.eval(rhs, env) } else { Ok(l) };
            }
            BinOp::Or => {
                let l = self.eval(lhs, env)?;
                return if l.truthy() { Ok(l) } else { self.eval(rhs, env) };
            }
            _ => {}
        }

        let l = self.eval(lhs, env)?;
        let r = self.eval(rhs, env)?;
        match op {
            BinOp::Add => match (&l, &r) {
                (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a + b)),
                (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::Str(format!(
                    "{}{}",
                    to_display_string(&l),
                    to_display_string(&r)
                ))),
                _ => Err(type_error(format!(
                    "cannot add {} and {}",
                    l.type_name(),
                    r.type_name()
                ))),
            },
            BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem => {
                let (a, b) = numeric_operands(&l, &r, op)?;
                Ok(Value::Num(match op {
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => a / b,
                    _ => a % b,
                }))
            }
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => match (&l, &r) {
                (Value::Num(a), Value::Num(b)) => Ok(Value::Bool(compare(op, *a, *b))),
                (Value::Str(a), Value::Str(b)) => Ok(Value::Bool(match op {
                    BinOp::Lt => a < b,
                    BinOp::Le => a <= b,
                    BinOp::Gt => a > b,
                    _ => a >= b,
                })),
                _ => Err(type_error(format!(
                    "cannot compare {} and {}",
                    l.type_name(),
                    r.type_name()
                ))),
            },
            BinOp::Eq | BinOp::StrictEq => Ok(Value::Bool(strict_eq(&l, &r))),
            BinOp::Ne | BinOp::StrictNe => Ok(Value::Bool(!strict_eq(&l, &r))),
            BinOp::And | BinOp::Or => unreachable!("handled above"),
        }
    }

    fn member(&mut self, obj: &Value, property: &str) -> SynthResult<Value> {
        match obj {
            Value::Object(members) => Ok(members.get(property).cloned().unwrap_or(Value::Null)),
            Value::List(items) if property == "length" => {
                Ok(Value::Num(items.borrow().len() as f64))
            }
            Value::Str(s) if property == "length" => Ok(Value::Num(s.chars().count() as f64)),
            Value::Null => Err(type_error(format!(
                "cannot read property '{}' of null",
                property
            ))),
            other => Err(type_error(format!(
                "cannot read property '{}' of a {} value",
                property,
                other.type_name()
            ))),
        }
    }

    /// Invoke a callable value.  Extra parameters are bound to `null`.
    pub fn call(&mut self, callee: &Value, args: &[Value]) -> SynthResult<Value> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(SynthesisError::new(
                ErrorKind::UnknownCompileError,
                "maximum call depth exceeded",
            ));
        }
        self.depth += 1;
        let result = self.call_inner(callee, args);
        self.depth -= 1;
        result
    }

    fn call_inner(&mut self, callee: &Value, args: &[Value]) -> SynthResult<Value> {
        match callee {
            Value::Closure(c) => {
                let scope = c.env.child();
                for (i, param) in c.params.iter().enumerate() {
                    scope.declare(param, args.get(i).cloned().unwrap_or(Value::Null));
                }
                match &c.body {
                    ArrowBody::Expr(e) => self.eval(e, &scope),
                    ArrowBody::Block(stmts) => match self.exec_block(stmts, &scope)? {
                        Flow::Return(v) => Ok(v),
                        Flow::Normal => Ok(Value::Null),
                    },
                }
            }
            Value::Native(n) => (n.f.clone())(self.ctx, args),
            Value::Component(name) => Err(type_error(format!(
                "UI primitive '{}' must be used as markup, not called",
                name
            ))),
            other => Err(type_error(format!(
                "a {} value is not a function",
                other.type_name()
            ))),
        }
    }

    // ── Markup evaluation ──

    /// Evaluate a JSX element into a render node.  The tag resolves
    /// through the scope chain, so locals shadow registry components and
    /// unknown tags surface as reference errors.
    pub fn eval_element(&mut self, el: &JsxElement, env: &Env) -> SynthResult<Node> {
        let tag_value = env.lookup(&el.tag).ok_or_else(|| {
            SynthesisError::new(
                ErrorKind::ReferenceError,
                format!("'{}' is not defined", el.tag),
            )
        })?;

        let mut props = Vec::with_capacity(el.props.len());
        for (name, expr) in &el.props {
            props.push((name.clone(), self.eval(expr, env)?));
        }

        let mut children = Vec::new();
        for child in &el.children {
            match child {
                JsxChild::Text(t) => children.push(Node::Text(t.clone())),
                JsxChild::Element(nested) => children.push(self.eval_element(nested, env)?),
                JsxChild::Expr(e) => {
                    let v = self.eval(e, env)?;
                    push_value_as_nodes(&v, &mut children)?;
                }
            }
        }

        match tag_value {
            Value::Component(name) => Ok(Node::Element {
                tag: name.to_string(),
                props,
                children,
            }),
            Value::Closure(_) => {
                // User-defined component: invoke it, passing the props as
                // a single object argument when any are present.
                let args: Vec<Value> = if props.is_empty() {
                    Vec::new()
                } else {
                    vec![Value::object(props.into_iter().collect())]
                };
                let out = self.call(&tag_value, &args)?;
                let mut nodes = Vec::new();
                push_value_as_nodes(&out, &mut nodes)?;
                Ok(match nodes.len() {
                    1 => nodes.remove(0),
                    _ => Node::Element {
                        tag: "Fragment".to_string(),
                        props: Vec::new(),
                        children: nodes,
                    },
                })
            }
            other => Err(type_error(format!(
                "'{}' is a {} value and cannot be rendered as markup",
                el.tag,
                other.type_name()
            ))),
        }
    }
}

/// Flatten an interpolated value into child nodes.  `null` and booleans
/// render as nothing, matching the host framework convention.
pub(crate) fn push_value_as_nodes(v: &Value, out: &mut Vec<Node>) -> SynthResult<()> {
    match v {
        Value::Null | Value::Bool(_) => Ok(()),
        Value::Num(n) => {
            out.push(Node::Text(fmt_num(*n)));
            Ok(())
        }
        Value::Str(s) => {
            out.push(Node::Text(s.clone()));
            Ok(())
        }
        Value::Node(n) => {
            out.push(n.clone());
            Ok(())
        }
        Value::List(items) => {
            for item in items.borrow().iter() {
                push_value_as_nodes(item, out)?;
            }
            Ok(())
        }
        other => Err(type_error(format!(
            "cannot render a {} value",
            other.type_name()
        ))),
    }
}

fn type_error(detail: String) -> SynthesisError {
    SynthesisError::new(ErrorKind::TypeError, detail)
}

fn numeric_operands(l: &Value, r: &Value, op: BinOp) -> SynthResult<(f64, f64)> {
    match (l, r) {
        (Value::Num(a), Value::Num(b)) => Ok((*a, *b)),
        _ => Err(type_error(format!(
            "operator {:?} requires numbers, got {} and {}",
            op,
            l.type_name(),
            r.type_name()
        ))),
    }
}

fn compare(op: BinOp, a: f64, b: f64) -> bool {
    match op {
        BinOp::Lt => a < b,
        BinOp::Le => a <= b,
        BinOp::Gt => a > b,
        _ => a >= b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::parser::parse;
    use crate::platform::NullPlatform;

    fn run_expr(src: &str) -> SynthResult<Value> {
        let stmts = parse(src).unwrap();
        let mut ctx = RuntimeCtx::detached(Rc::new(NullPlatform));
        let mut interp = Interp::new(&mut ctx);
        let env = Env::new();
        let mut last = Value::Null;
        for s in &stmts {
            match s {
                Stmt::Expr(e) => last = interp.eval(e, &env)?,
                other => {
                    interp.exec_stmt(other, &env)?;
                }
            }
        }
        Ok(last)
    }

    #[test]
    fn arithmetic_and_precedence() {
        match run_expr("1 + 2 * 3").unwrap() {
            Value::Num(n) => assert_eq!(n, 7.0),
            v => panic!("unexpected {:?}", v),
        }
    }

    #[test]
    fn string_concat_formats_integers() {
        match run_expr("\"n=\" + 2").unwrap() {
            Value::Str(s) => assert_eq!(s, "n=2"),
            v => panic!("unexpected {:?}", v),
        }
    }

    #[test]
    fn closures_capture_scope() {
        let v = run_expr("const make = (a) => (b) => a + b; make(2)(3)").unwrap();
        match v {
            Value::Num(n) => assert_eq!(n, 5.0),
            v => panic!("unexpected {:?}", v),
        }
    }

    #[test]
    fn unknown_identifier_is_reference_error() {
        let err = run_expr("mystery + 1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ReferenceError);
        assert!(err.detail.contains("mystery"));
    }

    #[test]
    fn calling_a_number_is_type_error() {
        let err = run_expr("const x = 3; x()").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError);
    }

    #[test]
    fn destructuring_non_array_is_type_error() {
        let err = run_expr("const [a, b] = 5; a").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeError);
    }

    #[test]
    fn runaway_recursion_is_bounded() {
        let err = run_expr("const f = () => f(); f()").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownCompileError);
    }

    #[test]
    fn ternary_and_logic() {
        match run_expr("true && (1 > 2 ? \"a\" : \"b\")").unwrap() {
            Value::Str(s) => assert_eq!(s, "b"),
            v => panic!("unexpected {:?}", v),
        }
    }
}
