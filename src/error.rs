//! Error taxonomy for the synthesis pipeline.
//!
//! Every failure a caller can observe is a [`SynthesisError`] carrying one
//! of the fixed [`ErrorKind`]s plus a human-readable detail string.  The
//! kinds split into structural rejections (caught by the validator before
//! any execution), compile-time rejections (raised while the compiler runs
//! the candidate once) and render-time faults (caught by the isolation
//! boundary).  None of them are fatal to the host.

use thiserror::Error;

// ─── Kinds ────────────────────────────────────────────────────────────────────

/// Classification of a synthesis failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErrorKind {
    // Structural rejections — validator, pre-execution.
    #[error("forbidden construct")]
    ForbiddenConstruct,
    #[error("missing entry point")]
    MissingEntryPoint,
    #[error("disallowed qualified reference")]
    DisallowedQualifiedReference,
    #[error("bad identifier casing")]
    BadIdentifierCasing,
    #[error("unbalanced delimiters")]
    UnbalancedDelimiters,

    // Compile-time rejections — single execution inside the compiler.
    #[error("syntax error")]
    SyntaxError,
    #[error("reference error")]
    ReferenceError,
    #[error("type error")]
    TypeError,
    #[error("entry point is not invocable")]
    NotInvocable,
    #[error("unknown compile error")]
    UnknownCompileError,
}

// ─── Error value ──────────────────────────────────────────────────────────────

/// A structured, displayable synthesis failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct SynthesisError {
    pub kind: ErrorKind,
    pub detail: String,
}

impl SynthesisError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// A short, user-facing recovery hint shown next to the error message.
    ///
    /// The fallback display renders `detail` + `suggestion()`; callers that
    /// re-request generation can feed both back to the generation service.
    pub fn suggestion(&self) -> &'static str {
        match self.kind {
            ErrorKind::ForbiddenConstruct => {
                "Remove import/export/class statements; all capabilities are already in scope."
            }
            ErrorKind::MissingEntryPoint => {
                "Define the component as `const ToolComponent = () => ...;`."
            }
            ErrorKind::DisallowedQualifiedReference => {
                "Use the bare hook name (e.g. `useState`), not a namespaced one."
            }
            ErrorKind::BadIdentifierCasing => {
                "Icon names are case-sensitive; match the declared capitalization."
            }
            ErrorKind::UnbalancedDelimiters => {
                "Check that every (, [ and { has a matching closer."
            }
            ErrorKind::SyntaxError => "Simplify the component; only the documented subset is accepted.",
            ErrorKind::ReferenceError => {
                "Only registered capability names are in scope; remove or replace the unknown name."
            }
            ErrorKind::TypeError => "A capability was used with the wrong kind of value.",
            ErrorKind::NotInvocable => {
                "`ToolComponent` must be a zero-argument function returning markup."
            }
            ErrorKind::UnknownCompileError => "Try regenerating the component.",
        }
    }
}

/// Shorthand used across the pipeline modules.
pub type SynthResult<T> = Result<T, SynthesisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_detail() {
        let e = SynthesisError::new(ErrorKind::ReferenceError, "'foo' is not defined");
        assert_eq!(e.to_string(), "reference error: 'foo' is not defined");
    }

    #[test]
    fn every_kind_has_a_suggestion() {
        let kinds = [
            ErrorKind::ForbiddenConstruct,
            ErrorKind::MissingEntryPoint,
            ErrorKind::DisallowedQualifiedReference,
            ErrorKind::BadIdentifierCasing,
            ErrorKind::UnbalancedDelimiters,
            ErrorKind::SyntaxError,
            ErrorKind::ReferenceError,
            ErrorKind::TypeError,
            ErrorKind::NotInvocable,
            ErrorKind::UnknownCompileError,
        ];
        for k in kinds {
            assert!(!SynthesisError::new(k, "x").suggestion().is_empty());
        }
    }
}
