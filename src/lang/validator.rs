//! Static validation of candidate source text.
//!
//! Checks performed in order (fail-fast, first failure reported):
//! 1. Forbidden constructs (`import` / `export` / `class`)
//! 2. Entry-point presence (`const ToolComponent` at top level)
//! 3. Disallowed namespace-qualified reactive primitives (`React.useState`)
//! 4. Icon identifier casing in tag position (`<play />` vs `<Play />`)
//! 5. Delimiter balance for `()`, `[]`, `{}`
//!
//! All checks run before any code path touches the interpreter.

use crate::error::{ErrorKind, SynthesisError};
use crate::lang::lexer::{
    byte_to_line_col, for_each_char_outside_strings, ident_at, words_outside_strings,
};
use crate::registry::CapabilityRegistry;
use crate::CandidateSource;

/// The top-level constant every candidate must define.
pub const ENTRY_POINT: &str = "ToolComponent";

/// Namespace whose qualified reactive-primitive references are rejected.
pub const REACTIVE_NAMESPACE: &str = "React";

/// Reactive primitives that must be referenced as bare identifiers.
pub const REACTIVE_PRIMITIVES: &[&str] =
    &["useState", "useEffect", "useMemo", "useCallback", "useRef"];

// ─── Result type ──────────────────────────────────────────────────────────────

/// Outcome of static validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(SynthesisError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

// ─── Public entry point ───────────────────────────────────────────────────────

/// Validate candidate source against the registry's contract.
pub fn validate(source: &CandidateSource, registry: &CapabilityRegistry) -> ValidationResult {
    let src = source.text.as_str();

    let checks = [
        check_forbidden_constructs(src),
        check_entry_point(src),
        check_qualified_references(src),
        check_icon_casing(src, registry),
        check_balanced_delimiters(src),
    ];
    for check in checks {
        if let Some(err) = check {
            return ValidationResult::Invalid(err);
        }
    }
    ValidationResult::Valid
}

// ─── Checks ───────────────────────────────────────────────────────────────────

fn check_forbidden_constructs(src: &str) -> Option<SynthesisError> {
    for (pos, word) in words_outside_strings(src) {
        let construct = match word.as_str() {
            "import" => "an import statement",
            "export" => "an export statement",
            "class" => "a class definition",
            _ => continue,
        };
        let (line, col) = byte_to_line_col(src, pos);
        return Some(SynthesisError::new(
            ErrorKind::ForbiddenConstruct,
            format!(
                "{} is not allowed (line {}, column {}); capabilities are injected, not imported",
                construct, line, col
            ),
        ));
    }
    None
}

/// Does the source declare `const ToolComponent` at brace depth zero?
pub(crate) fn has_entry_declaration(src: &str) -> bool {
    let mut found = false;
    let mut depth: i32 = 0;
    let mut words: Vec<(i32, String)> = Vec::new();

    // Collect identifier words tagged with the brace depth where they start.
    let mut current: Option<(i32, String)> = None;
    for_each_char_outside_strings(src, |_, ch| {
        if crate::lang::lexer::is_ident_part(ch) {
            match &mut current {
                Some((_, w)) => w.push(ch),
                None => {
                    if crate::lang::lexer::is_ident_start(ch) {
                        current = Some((depth, ch.to_string()));
                    }
                }
            }
            return;
        }
        if let Some(w) = current.take() {
            words.push(w);
        }
        match ch {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
    });
    if let Some(w) = current.take() {
        words.push(w);
    }

    for pair in words.windows(2) {
        if pair[0].0 == 0 && pair[0].1 == "const" && pair[1].1 == ENTRY_POINT {
            found = true;
            break;
        }
    }
    found
}

fn check_entry_point(src: &str) -> Option<SynthesisError> {
    if has_entry_declaration(src) {
        None
    } else {
        Some(SynthesisError::new(
            ErrorKind::MissingEntryPoint,
            format!("no top-level `const {}` declaration found", ENTRY_POINT),
        ))
    }
}

fn check_qualified_references(src: &str) -> Option<SynthesisError> {
    let words = words_outside_strings(src);
    for (i, (pos, word)) in words.iter().enumerate() {
        if word != REACTIVE_NAMESPACE {
            continue;
        }
        // The qualifier only counts when a `.primitive` follows directly.
        let after = &src[pos + word.len()..];
        if !after.starts_with('.') {
            continue;
        }
        if let Some((_, next)) = words.get(i + 1) {
            if REACTIVE_PRIMITIVES.contains(&next.as_str()) {
                let (line, col) = byte_to_line_col(src, *pos);
                return Some(SynthesisError::new(
                    ErrorKind::DisallowedQualifiedReference,
                    format!(
                        "`{}.{}` must be written as bare `{}` (line {}, column {})",
                        REACTIVE_NAMESPACE, next, next, line, col
                    ),
                ));
            }
        }
    }
    None
}

fn check_icon_casing(src: &str, registry: &CapabilityRegistry) -> Option<SynthesisError> {
    // Known icon names, keyed by lowercase form.
    let icons: Vec<&str> = registry.icon_names().collect();

    for (pos, ident) in tag_idents(src) {
        if registry.resolve(ident).is_some() {
            continue;
        }
        let lower = ident.to_lowercase();
        if let Some(canonical) = icons.iter().find(|n| n.to_lowercase() == lower) {
            let (line, col) = byte_to_line_col(src, pos);
            return Some(SynthesisError::new(
                ErrorKind::BadIdentifierCasing,
                format!(
                    "tag <{}> does not match the declared casing of '{}' (line {}, column {})",
                    ident, canonical, line, col
                ),
            ));
        }
    }
    None
}

fn check_balanced_delimiters(src: &str) -> Option<SynthesisError> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut failure: Option<SynthesisError> = None;

    for_each_char_outside_strings(src, |i, ch| {
        if failure.is_some() {
            return;
        }
        match ch {
            '(' | '{' | '[' => stack.push((ch, i)),
            ')' | '}' | ']' => {
                if let Some((open, _)) = stack.pop() {
                    let expected = matching_close(open);
                    if ch != expected {
                        let (line, col) = byte_to_line_col(src, i);
                        failure = Some(SynthesisError::new(
                            ErrorKind::UnbalancedDelimiters,
                            format!(
                                "mismatched delimiter '{}' at line {}, column {} (expected '{}')",
                                ch, line, col, expected
                            ),
                        ));
                    }
                } else {
                    let (line, col) = byte_to_line_col(src, i);
                    failure = Some(SynthesisError::new(
                        ErrorKind::UnbalancedDelimiters,
                        format!("unmatched closing '{}' at line {}, column {}", ch, line, col),
                    ));
                }
            }
            _ => {}
        }
    });
    if failure.is_some() {
        return failure;
    }

    if let Some((open, pos)) = stack.first().copied() {
        let (line, col) = byte_to_line_col(src, pos);
        return Some(SynthesisError::new(
            ErrorKind::UnbalancedDelimiters,
            format!(
                "unclosed '{}' at line {}, column {} (missing '{}')",
                open,
                line,
                col,
                matching_close(open)
            ),
        ));
    }
    None
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Identifiers appearing in markup tag position (`<Name` or `</Name`),
/// with the identifier's byte offset.
pub(crate) fn tag_idents(src: &str) -> Vec<(usize, &str)> {
    let mut positions: Vec<usize> = Vec::new();
    for_each_char_outside_strings(src, |i, ch| {
        if ch == '<' {
            positions.push(i);
        }
    });

    let mut out = Vec::new();
    for pos in positions {
        let mut start = pos + 1;
        if src[start..].starts_with('/') {
            start += 1;
        }
        if let Some(ident) = ident_at(src, start) {
            out.push((start, ident));
        }
    }
    out
}

fn matching_close(open: char) -> char {
    match open {
        '(' => ')',
        '{' => '}',
        '[' => ']',
        _ => '?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::default_registry;

    fn validate_text(text: &str) -> ValidationResult {
        validate(&CandidateSource::new(text), &default_registry())
    }

    fn expect_kind(text: &str, kind: ErrorKind) {
        match validate_text(text) {
            ValidationResult::Invalid(err) => assert_eq!(err.kind, kind, "detail: {}", err.detail),
            ValidationResult::Valid => panic!("expected {:?}, got Valid", kind),
        }
    }

    #[test]
    fn accepts_well_formed_component() {
        let src = "const ToolComponent = () => { const [n,setN]=useState(0); \
                   return <Button onClick={() => setN(n+1)}>{n}</Button>; };";
        assert!(validate_text(src).is_valid());
    }

    #[test]
    fn rejects_import_statements() {
        expect_kind(
            "import React from 'react'; const ToolComponent = () => null;",
            ErrorKind::ForbiddenConstruct,
        );
    }

    #[test]
    fn rejects_export_and_class() {
        expect_kind(
            "export const ToolComponent = () => null;",
            ErrorKind::ForbiddenConstruct,
        );
        expect_kind(
            "class Tool {} const ToolComponent = () => null;",
            ErrorKind::ForbiddenConstruct,
        );
    }

    #[test]
    fn import_inside_string_is_fine() {
        let src = "const ToolComponent = () => <Label>{\"import nothing\"}</Label>;";
        assert!(validate_text(src).is_valid());
    }

    #[test]
    fn rejects_missing_entry_point() {
        expect_kind("const Other = () => null;", ErrorKind::MissingEntryPoint);
    }

    #[test]
    fn entry_point_must_be_top_level() {
        expect_kind(
            "const Outer = () => { const ToolComponent = () => null; return null; };",
            ErrorKind::MissingEntryPoint,
        );
    }

    #[test]
    fn rejects_qualified_reactive_primitive() {
        expect_kind(
            "const ToolComponent = () => { const [a,b] = React.useState(0); return null; };",
            ErrorKind::DisallowedQualifiedReference,
        );
    }

    #[test]
    fn unrelated_member_access_is_fine() {
        let src = "const ToolComponent = () => <Label>{Math.floor(1.5)}</Label>;";
        assert!(validate_text(src).is_valid());
    }

    #[test]
    fn rejects_lowercase_icon_tag() {
        expect_kind(
            "const ToolComponent = () => <play />;",
            ErrorKind::BadIdentifierCasing,
        );
    }

    #[test]
    fn casing_error_names_the_canonical_icon() {
        match validate_text("const ToolComponent = () => <pLaY />;") {
            ValidationResult::Invalid(err) => {
                assert_eq!(err.kind, ErrorKind::BadIdentifierCasing);
                assert!(err.detail.contains("'Play'"), "detail: {}", err.detail);
            }
            ValidationResult::Valid => panic!("expected casing failure"),
        }
    }

    #[test]
    fn unknown_tags_pass_casing_check() {
        // Not an icon near-miss; left for the compiler's reference check.
        let src = "const ToolComponent = () => <Widget />;";
        assert!(validate_text(src).is_valid());
    }

    #[test]
    fn rejects_unclosed_paren_at_its_position() {
        match validate_text("const ToolComponent = () => (<Button>") {
            ValidationResult::Invalid(err) => {
                assert_eq!(err.kind, ErrorKind::UnbalancedDelimiters);
                assert!(err.detail.contains("column 29"), "detail: {}", err.detail);
                assert!(err.detail.contains("missing ')'"), "detail: {}", err.detail);
            }
            ValidationResult::Valid => panic!("expected delimiter failure"),
        }
    }

    #[test]
    fn apostrophe_in_element_text_is_fine() {
        let src = "const ToolComponent = () => (<Label>don't panic</Label>);";
        assert!(validate_text(src).is_valid());
    }

    #[test]
    fn rejects_mismatched_closer() {
        expect_kind(
            "const ToolComponent = () => { return [1, 2); };",
            ErrorKind::UnbalancedDelimiters,
        );
    }

    #[test]
    fn balanced_source_passes_delimiter_check() {
        assert!(validate_text("const ToolComponent = () => (<Label>ok</Label>);").is_valid());
    }

    #[test]
    fn check_order_is_fixed() {
        // Both an import and unbalanced delimiters: the forbidden construct
        // must win because checks run in fixed order.
        expect_kind(
            "import x from 'y'; const ToolComponent = () => ((",
            ErrorKind::ForbiddenConstruct,
        );
    }
}
