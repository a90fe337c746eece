//! Restricted component language: AST, parser, static validation,
//! textual repair, and the interpreter the compiler and renderer share.

pub mod ast;
pub mod interp;
pub mod lexer;
pub mod normalizer;
pub mod parser;
pub mod validator;

// ─── Re-exports ───────────────────────────────────────────────────────────────

pub use normalizer::normalize;
pub use parser::parse;
pub use validator::{validate, ValidationResult};
