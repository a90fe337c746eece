//! Recursive-descent parser for the restricted component language.
//!
//! Walks raw source text with a byte cursor and produces the AST defined
//! in [`crate::lang::ast`].  The accepted grammar is deliberately small:
//! `const`/`let` declarations (with array destructuring), `return`,
//! `if`/`else`, arrow functions, calls, member access, the usual operator
//! ladder, and JSX-style markup.  Everything else is a `SyntaxError`.

use crate::error::{ErrorKind, SynthResult, SynthesisError};
use crate::lang::ast::{ArrowBody, BinOp, Expr, JsxChild, JsxElement, Pat, Stmt, UnOp};
use crate::lang::lexer::{byte_to_line_col, is_ident_part, is_ident_start};

/// Nesting beyond this depth is rejected instead of risking cursor-stack
/// exhaustion on pathological input; it also bounds the depth of the AST
/// handed to evaluation.
const MAX_NESTING_DEPTH: usize = 200;

// ─── Public entry point ───────────────────────────────────────────────────────

/// Parse a full candidate document into a statement list.
pub fn parse(src: &str) -> SynthResult<Vec<Stmt>> {
    let mut p = Parser {
        src,
        pos: 0,
        depth: 0,
    };
    let mut stmts = Vec::new();

    p.skip_ws();
    while !p.at_end() {
        stmts.push(p.parse_stmt()?);
        p.skip_ws();
        while p.eat_char(';') {
            p.skip_ws();
        }
    }
    Ok(stmts)
}

// ─── Parser state ─────────────────────────────────────────────────────────────

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    // ── Cursor helpers ──

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek2(&self) -> Option<char> {
        let mut it = self.rest().chars();
        it.next();
        it.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume `s` if the source starts with it here.
    fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn expect_char(&mut self, c: char) -> SynthResult<()> {
        if self.eat_char(c) {
            Ok(())
        } else {
            Err(self.err(&format!("expected '{}'", c)))
        }
    }

    fn err(&self, msg: &str) -> SynthesisError {
        let (line, col) = byte_to_line_col(self.src, self.pos.min(self.src.len()));
        SynthesisError::new(
            ErrorKind::SyntaxError,
            format!("{} at line {}, column {}", msg, line, col),
        )
    }

    /// Skip whitespace plus `//` and `/* */` comments.
    fn skip_ws(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek2() == Some('/') => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('/') if self.peek2() == Some('*') => {
                    self.pos += 2;
                    match self.rest().find("*/") {
                        Some(off) => self.pos += off + 2,
                        None => self.pos = self.src.len(),
                    }
                }
                _ => break,
            }
        }
    }

    // ── Identifiers and keywords ──

    fn peek_ident(&self) -> Option<&'a str> {
        let rest = self.rest();
        let first = rest.chars().next()?;
        if !is_ident_start(first) {
            return None;
        }
        let end = rest
            .char_indices()
            .find(|(_, c)| !is_ident_part(*c))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }

    fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.peek_ident() == Some(kw) {
            self.pos += kw.len();
            true
        } else {
            false
        }
    }

    fn parse_ident(&mut self) -> SynthResult<String> {
        match self.peek_ident() {
            Some(id) => {
                self.pos += id.len();
                Ok(id.to_string())
            }
            None => Err(self.err("expected identifier")),
        }
    }

    // ── Statements ──

    fn parse_stmt(&mut self) -> SynthResult<Stmt> {
        self.skip_ws();
        if self.eat_keyword("const") {
            return self.parse_decl(false);
        }
        if self.eat_keyword("let") {
            return self.parse_decl(true);
        }
        if self.eat_keyword("return") {
            self.skip_ws();
            if self.at_end() || self.peek() == Some(';') || self.peek() == Some('}') {
                return Ok(Stmt::Return(None));
            }
            let e = self.parse_expr()?;
            self.skip_ws();
            self.eat_char(';');
            return Ok(Stmt::Return(Some(e)));
        }
        if self.eat_keyword("if") {
            return self.parse_if();
        }
        let e = self.parse_expr()?;
        self.skip_ws();
        self.eat_char(';');
        Ok(Stmt::Expr(e))
    }

    fn parse_decl(&mut self, mutable: bool) -> SynthResult<Stmt> {
        self.skip_ws();
        let pat = if self.eat_char('[') {
            let mut names = Vec::new();
            loop {
                self.skip_ws();
                names.push(self.parse_ident()?);
                self.skip_ws();
                if self.eat_char(']') {
                    break;
                }
                self.expect_char(',')?;
            }
            Pat::Array(names)
        } else {
            Pat::Ident(self.parse_ident()?)
        };
        self.skip_ws();
        self.expect_char('=')?;
        let init = self.parse_expr()?;
        self.skip_ws();
        self.eat_char(';');
        Ok(Stmt::Decl { pat, init, mutable })
    }

    fn parse_if(&mut self) -> SynthResult<Stmt> {
        self.enter_nested()?;
        let result = self.parse_if_inner();
        self.depth -= 1;
        result
    }

    fn parse_if_inner(&mut self) -> SynthResult<Stmt> {
        self.skip_ws();
        self.expect_char('(')?;
        let cond = self.parse_expr()?;
        self.skip_ws();
        self.expect_char(')')?;
        let then_body = self.parse_block()?;
        self.skip_ws();
        let else_body = if self.eat_keyword("else") {
            self.skip_ws();
            if self.peek_ident() == Some("if") {
                self.pos += 2;
                vec![self.parse_if()?]
            } else {
                self.parse_block()?
            }
        } else {
            Vec::new()
        };
        Ok(Stmt::If {
            cond,
            then_body,
            else_body,
        })
    }

    fn parse_block(&mut self) -> SynthResult<Vec<Stmt>> {
        self.enter_nested()?;
        let result = self.parse_block_inner();
        self.depth -= 1;
        result
    }

    fn parse_block_inner(&mut self) -> SynthResult<Vec<Stmt>> {
        self.skip_ws();
        self.expect_char('{')?;
        let mut stmts = Vec::new();
        loop {
            self.skip_ws();
            while self.eat_char(';') {
                self.skip_ws();
            }
            if self.eat_char('}') {
                return Ok(stmts);
            }
            if self.at_end() {
                return Err(self.err("unterminated block"));
            }
            stmts.push(self.parse_stmt()?);
        }
    }

    // ── Expressions (precedence ladder) ──

    /// Track recursion depth across the constructs that nest (grouping,
    /// unary chains, blocks, markup, `else if`).  Past the bound every
    /// path fails with the same `SyntaxError` instead of recursing.
    fn enter_nested(&mut self) -> SynthResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(self.err("nesting too deep"));
        }
        Ok(())
    }

    fn parse_expr(&mut self) -> SynthResult<Expr> {
        self.parse_assign()
    }

    fn parse_assign(&mut self) -> SynthResult<Expr> {
        self.enter_nested()?;
        let result = self.parse_assign_inner();
        self.depth -= 1;
        result
    }

    fn parse_assign_inner(&mut self) -> SynthResult<Expr> {
        let lhs = self.parse_cond()?;
        self.skip_ws();
        // Plain `=`, but not `==`, `===` or `=>`.
        if self.peek() == Some('=') && self.peek2() != Some('=') && self.peek2() != Some('>') {
            if let Expr::Ident(name) = lhs {
                self.bump();
                let value = self.parse_assign()?;
                return Ok(Expr::Assign {
                    name,
                    value: Box::new(value),
                });
            }
            return Err(self.err("invalid assignment target"));
        }
        Ok(lhs)
    }

    fn parse_cond(&mut self) -> SynthResult<Expr> {
        let cond = self.parse_or()?;
        self.skip_ws();
        if self.eat_char('?') {
            let then_expr = self.parse_assign()?;
            self.skip_ws();
            self.expect_char(':')?;
            let else_expr = self.parse_assign()?;
            return Ok(Expr::Cond {
                cond: Box::new(cond),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            });
        }
        Ok(cond)
    }

    fn parse_or(&mut self) -> SynthResult<Expr> {
        let mut lhs = self.parse_and()?;
        loop {
            self.skip_ws();
            if self.eat_str("||") {
                let rhs = self.parse_and()?;
                lhs = bin(BinOp::Or, lhs, rhs);
            } else {
                return Ok(lhs);
            }
        }
    }

    fn parse_and(&mut self) -> SynthResult<Expr> {
        let mut lhs = self.parse_eq()?;
        loop {
            self.skip_ws();
            if self.eat_str("&&") {
                let rhs = self.parse_eq()?;
                lhs = bin(BinOp::And, lhs, rhs);
            } else {
                return Ok(lhs);
            }
        }
    }

    fn parse_eq(&mut self) -> SynthResult<Expr> {
        let mut lhs = self.parse_rel()?;
        loop {
            self.skip_ws();
            let op = if self.eat_str("===") {
                BinOp::StrictEq
            } else if self.eat_str("!==") {
                BinOp::StrictNe
            } else if self.eat_str("==") {
                BinOp::Eq
            } else if self.eat_str("!=") {
                BinOp::Ne
            } else {
                return Ok(lhs);
            };
            let rhs = self.parse_rel()?;
            lhs = bin(op, lhs, rhs);
        }
    }

    fn parse_rel(&mut self) -> SynthResult<Expr> {
        let mut lhs = self.parse_add()?;
        loop {
            self.skip_ws();
            let op = if self.eat_str("<=") {
                BinOp::Le
            } else if self.eat_str(">=") {
                BinOp::Ge
            } else if self.peek() == Some('<') && self.peek2() != Some('/') {
                self.bump();
                BinOp::Lt
            } else if self.peek() == Some('>') {
                self.bump();
                BinOp::Gt
            } else {
                return Ok(lhs);
            };
            let rhs = self.parse_add()?;
            lhs = bin(op, lhs, rhs);
        }
    }

    fn parse_add(&mut self) -> SynthResult<Expr> {
        let mut lhs = self.parse_mul()?;
        loop {
            self.skip_ws();
            let op = if self.eat_char('+') {
                BinOp::Add
            } else if self.peek() == Some('-') {
                self.bump();
                BinOp::Sub
            } else {
                return Ok(lhs);
            };
            let rhs = self.parse_mul()?;
            lhs = bin(op, lhs, rhs);
        }
    }

    fn parse_mul(&mut self) -> SynthResult<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            self.skip_ws();
            let op = if self.eat_char('*') {
                BinOp::Mul
            } else if self.peek() == Some('/') {
                self.bump();
                BinOp::Div
            } else if self.eat_char('%') {
                BinOp::Rem
            } else {
                return Ok(lhs);
            };
            let rhs = self.parse_unary()?;
            lhs = bin(op, lhs, rhs);
        }
    }

    fn parse_unary(&mut self) -> SynthResult<Expr> {
        self.enter_nested()?;
        let result = self.parse_unary_inner();
        self.depth -= 1;
        result
    }

    fn parse_unary_inner(&mut self) -> SynthResult<Expr> {
        self.skip_ws();
        if self.eat_char('!') {
            let e = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnOp::Not,
                expr: Box::new(e),
            });
        }
        if self.peek() == Some('-') {
            self.bump();
            let e = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnOp::Neg,
                expr: Box::new(e),
            });
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> SynthResult<Expr> {
        let mut e = self.parse_primary()?;
        loop {
            self.skip_ws();
            if self.eat_char('.') {
                self.skip_ws();
                let property = self.parse_ident()?;
                e = Expr::Member {
                    object: Box::new(e),
                    property,
                };
            } else if self.eat_char('(') {
                let mut args = Vec::new();
                self.skip_ws();
                if !self.eat_char(')') {
                    loop {
                        args.push(self.parse_assign()?);
                        self.skip_ws();
                        if self.eat_char(')') {
                            break;
                        }
                        self.expect_char(',')?;
                    }
                }
                e = Expr::Call {
                    callee: Box::new(e),
                    args,
                };
            } else {
                return Ok(e);
            }
        }
    }

    fn parse_primary(&mut self) -> SynthResult<Expr> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.err("unexpected end of input")),
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            Some('"') | Some('\'') => {
                let s = self.parse_string()?;
                Ok(Expr::Str(s))
            }
            Some('(') => {
                if self.arrow_ahead() {
                    return self.parse_arrow();
                }
                self.bump();
                let e = self.parse_expr()?;
                self.skip_ws();
                self.expect_char(')')?;
                Ok(e)
            }
            Some('[') => {
                self.bump();
                let mut items = Vec::new();
                self.skip_ws();
                if !self.eat_char(']') {
                    loop {
                        items.push(self.parse_assign()?);
                        self.skip_ws();
                        if self.eat_char(']') {
                            break;
                        }
                        self.expect_char(',')?;
                    }
                }
                Ok(Expr::Array(items))
            }
            Some('<') => {
                let el = self.parse_jsx_element()?;
                Ok(Expr::Element(el))
            }
            Some(c) if is_ident_start(c) => {
                if self.eat_keyword("true") {
                    return Ok(Expr::Bool(true));
                }
                if self.eat_keyword("false") {
                    return Ok(Expr::Bool(false));
                }
                if self.eat_keyword("null") || self.eat_keyword("undefined") {
                    return Ok(Expr::Null);
                }
                if self.arrow_ahead() {
                    return self.parse_arrow();
                }
                let name = self.parse_ident()?;
                Ok(Expr::Ident(name))
            }
            Some(c) => Err(self.err(&format!("unexpected character '{}'", c))),
        }
    }

    fn parse_number(&mut self) -> SynthResult<Expr> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        if self.peek() == Some('.') && matches!(self.peek2(), Some(c) if c.is_ascii_digit()) {
            self.bump();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
        }
        let text = &self.src[start..self.pos];
        text.parse::<f64>()
            .map(Expr::Num)
            .map_err(|_| self.err(&format!("invalid number '{}'", text)))
    }

    fn parse_string(&mut self) -> SynthResult<String> {
        let quote = self.bump().unwrap_or('"');
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.err("unterminated string literal")),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => out.push(c),
                    None => return Err(self.err("unterminated string literal")),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    // ── Arrow functions ──

    /// Lookahead: does an arrow function start at the cursor?
    /// Either `ident => ...` or `( params ) => ...`.
    fn arrow_ahead(&self) -> bool {
        let rest = self.rest();
        if let Some(first) = rest.chars().next() {
            if is_ident_start(first) {
                let end = rest
                    .char_indices()
                    .find(|(_, c)| !is_ident_part(*c))
                    .map(|(i, _)| i)
                    .unwrap_or(rest.len());
                return rest[end..].trim_start().starts_with("=>");
            }
            if first == '(' {
                // Scan to the matching ')' (string-aware), then look for `=>`.
                let mut depth = 0i32;
                let mut quote: Option<char> = None;
                let mut escaped = false;
                for (i, c) in rest.char_indices() {
                    if let Some(q) = quote {
                        if escaped {
                            escaped = false;
                        } else if c == '\\' {
                            escaped = true;
                        } else if c == q {
                            quote = None;
                        }
                        continue;
                    }
                    match c {
                        '"' | '\'' => quote = Some(c),
                        '(' => depth += 1,
                        ')' => {
                            depth -= 1;
                            if depth == 0 {
                                return rest[i + 1..].trim_start().starts_with("=>");
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
        false
    }

    fn parse_arrow(&mut self) -> SynthResult<Expr> {
        let mut params = Vec::new();
        if self.eat_char('(') {
            self.skip_ws();
            if !self.eat_char(')') {
                loop {
                    self.skip_ws();
                    params.push(self.parse_ident()?);
                    self.skip_ws();
                    if self.eat_char(')') {
                        break;
                    }
                    self.expect_char(',')?;
                }
            }
        } else {
            params.push(self.parse_ident()?);
        }
        self.skip_ws();
        if !self.eat_str("=>") {
            return Err(self.err("expected '=>'"));
        }
        self.skip_ws();
        let body = if self.peek() == Some('{') {
            ArrowBody::Block(self.parse_block()?)
        } else {
            ArrowBody::Expr(Box::new(self.parse_assign()?))
        };
        Ok(Expr::Arrow { params, body })
    }

    // ── Markup ──

    fn parse_jsx_element(&mut self) -> SynthResult<JsxElement> {
        self.enter_nested()?;
        let result = self.parse_jsx_element_inner();
        self.depth -= 1;
        result
    }

    fn parse_jsx_element_inner(&mut self) -> SynthResult<JsxElement> {
        self.expect_char('<')?;
        let tag = self.parse_ident()?;
        let mut props = Vec::new();

        // Attributes until `>` or `/>`.
        loop {
            self.skip_ws();
            if self.eat_str("/>") {
                return Ok(JsxElement {
                    tag,
                    props,
                    children: Vec::new(),
                });
            }
            if self.eat_char('>') {
                break;
            }
            let name = self.parse_ident()?;
            self.skip_ws();
            let value = if self.eat_char('=') {
                self.skip_ws();
                match self.peek() {
                    Some('"') | Some('\'') => Expr::Str(self.parse_string()?),
                    Some('{') => {
                        self.bump();
                        let e = self.parse_expr()?;
                        self.skip_ws();
                        self.expect_char('}')?;
                        e
                    }
                    _ => return Err(self.err("expected attribute value")),
                }
            } else {
                Expr::Bool(true)
            };
            props.push((name, value));
        }

        // Children until the matching closing tag.
        let mut children = Vec::new();
        loop {
            if self.at_end() {
                return Err(self.err(&format!("unclosed element <{}>", tag)));
            }
            if self.rest().starts_with("</") {
                self.pos += 2;
                self.skip_ws();
                let closer = self.parse_ident()?;
                self.skip_ws();
                self.expect_char('>')?;
                if closer != tag {
                    return Err(self.err(&format!(
                        "mismatched closing tag: expected </{}>, found </{}>",
                        tag, closer
                    )));
                }
                return Ok(JsxElement {
                    tag,
                    props,
                    children,
                });
            }
            if self.peek() == Some('<') {
                children.push(JsxChild::Element(self.parse_jsx_element()?));
                continue;
            }
            if self.eat_char('{') {
                let e = self.parse_expr()?;
                self.skip_ws();
                self.expect_char('}')?;
                children.push(JsxChild::Expr(e));
                continue;
            }
            let text = self.read_jsx_text();
            if !text.is_empty() {
                children.push(JsxChild::Text(text));
            }
        }
    }

    /// Read raw text up to the next `<` or `{`, collapsing whitespace runs.
    /// Leading/trailing whitespace is dropped only when it spans a newline,
    /// matching the usual markup formatting expectations.
    fn read_jsx_text(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '<' || c == '{' {
                break;
            }
            self.bump();
        }
        let raw = &self.src[start..self.pos];

        let mut out = String::new();
        let mut ws_run = String::new();
        for c in raw.chars() {
            if c.is_whitespace() {
                ws_run.push(c);
            } else {
                if !ws_run.is_empty() {
                    if !(out.is_empty() && ws_run.contains('\n')) {
                        out.push(' ');
                    }
                    ws_run.clear();
                }
                out.push(c);
            }
        }
        if !ws_run.is_empty() && !out.is_empty() && !ws_run.contains('\n') {
            out.push(' ');
        }
        out
    }
}

fn bin(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_counter_component() {
        let src = "const ToolComponent = () => { const [n,setN]=useState(0); \
                   return <Button onClick={() => setN(n+1)}>{n}</Button>; };";
        let stmts = parse(src).unwrap();
        assert_eq!(stmts.len(), 1);
        match &stmts[0] {
            Stmt::Decl { pat, init, .. } => {
                assert_eq!(*pat, Pat::Ident("ToolComponent".into()));
                assert!(matches!(init, Expr::Arrow { .. }));
            }
            other => panic!("expected decl, got {:?}", other),
        }
    }

    #[test]
    fn destructuring_and_calls() {
        let stmts = parse("const [a, b] = useState(1); a(b);").unwrap();
        assert_eq!(stmts.len(), 2);
        assert!(matches!(
            &stmts[0],
            Stmt::Decl {
                pat: Pat::Array(names),
                ..
            } if names == &vec!["a".to_string(), "b".to_string()]
        ));
    }

    #[test]
    fn jsx_attrs_and_nesting() {
        let stmts =
            parse("const x = <Card title=\"Hi\"><Play /><Label>on</Label></Card>;").unwrap();
        let Stmt::Decl { init: Expr::Element(el), .. } = &stmts[0] else {
            panic!("expected element decl");
        };
        assert_eq!(el.tag, "Card");
        assert_eq!(el.props.len(), 1);
        assert_eq!(el.children.len(), 2);
    }

    #[test]
    fn jsx_text_keeps_inline_spacing() {
        let stmts = parse("const x = <Label>Count: {1}</Label>;").unwrap();
        let Stmt::Decl { init: Expr::Element(el), .. } = &stmts[0] else {
            panic!();
        };
        assert_eq!(el.children[0], JsxChild::Text("Count: ".into()));
    }

    #[test]
    fn relational_less_than_is_not_markup() {
        let stmts = parse("const f = (a) => a < 3 ? 1 : 2;").unwrap();
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn mismatched_closing_tag_is_syntax_error() {
        let err = parse("const x = <Card></Stack>;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::SyntaxError);
    }

    #[test]
    fn reports_line_and_column() {
        let err = parse("const x = ;").unwrap_err();
        assert!(err.detail.contains("line 1"), "detail: {}", err.detail);
    }

    #[test]
    fn pathological_nesting_is_rejected() {
        let src = format!(
            "const ToolComponent = () => {}1{};",
            "(".repeat(10_000),
            ")".repeat(10_000)
        );
        let err = parse(&src).unwrap_err();
        assert_eq!(err.kind, ErrorKind::SyntaxError);
        assert!(err.detail.contains("nesting too deep"), "detail: {}", err.detail);
    }

    #[test]
    fn reasonable_nesting_parses() {
        let src = format!("const x = {}1{};", "(".repeat(50), ")".repeat(50));
        assert!(parse(&src).is_ok());
    }

    #[test]
    fn comments_are_skipped() {
        let stmts = parse("// header\nconst x = 1; /* mid */ const y = 2;").unwrap();
        assert_eq!(stmts.len(), 2);
    }
}
