//! Best-effort repair pass for near-miss candidate source.
//!
//! A pure text-to-text transform applied once, before validation, in the
//! standard synthesis flow.  Rewrites in order:
//! 1. Strip leading/trailing code-fence lines
//! 2. Canonicalize icon tag casing (`<play />` → `<Play />`)
//! 3. Strip the `React.` qualifier from reactive primitives
//! 4. Drop `import`/`export` lines
//! 5. Wrap a bare arrow function or bare markup into the entry declaration
//! 6. Terminate the final statement with `;`
//!
//! Module lines are dropped before the wrapping rule runs; otherwise a
//! stray import above bare markup would defer the wrap to a second pass.
//! The pass never fails and is idempotent: a second application returns
//! the text unchanged.

use crate::lang::lexer::words_outside_strings;
use crate::lang::validator::{
    has_entry_declaration, tag_idents, ENTRY_POINT, REACTIVE_NAMESPACE, REACTIVE_PRIMITIVES,
};
use crate::registry::CapabilityRegistry;
use crate::CandidateSource;

// ─── Public entry point ───────────────────────────────────────────────────────

/// Apply all repair rules and return the rewritten source.
pub fn normalize(source: &CandidateSource, registry: &CapabilityRegistry) -> CandidateSource {
    let mut text = source.text.clone();

    text = strip_fences(&text);
    text = repair_tag_casing(&text, registry);
    text = strip_qualifiers(&text);
    text = strip_module_lines(&text);
    text = wrap_entry_point(&text);
    text = ensure_terminator(&text);

    CandidateSource::new(text)
}

// ─── Rules ────────────────────────────────────────────────────────────────────

/// Drop a first/last line consisting solely of a fence token, optionally
/// tagged with a language name (e.g. ```` ```jsx ````).
fn strip_fences(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut start = 0usize;
    let mut end = lines.len();

    if let Some(first) = lines.first() {
        if is_fence_line(first) {
            start = 1;
        }
    }
    // Ignore trailing blank lines when looking for the closing fence.
    let mut last_content = end;
    while last_content > start && lines[last_content - 1].trim().is_empty() {
        last_content -= 1;
    }
    if last_content > start && is_fence_line(lines[last_content - 1]) {
        end = last_content - 1;
    }

    if start == 0 && end == lines.len() {
        return text.to_string();
    }
    lines[start..end].join("\n")
}

fn is_fence_line(line: &str) -> bool {
    let t = line.trim();
    t.starts_with("```") && t[3..].chars().all(|c| c.is_ascii_alphanumeric())
}

/// Rewrite tag-position identifiers whose lowercase form matches a known
/// icon's lowercase form to the icon's declared casing.  Only tag
/// occurrences are touched, never arbitrary substrings.
fn repair_tag_casing(text: &str, registry: &CapabilityRegistry) -> String {
    let icons: Vec<&str> = registry.icon_names().collect();

    // Collect (start, end, replacement) spans, then rewrite back-to-front
    // so earlier spans keep their offsets.
    let mut spans: Vec<(usize, usize, &str)> = Vec::new();
    for (pos, ident) in tag_idents(text) {
        if registry.resolve(ident).is_some() {
            continue;
        }
        let lower = ident.to_lowercase();
        if let Some(canonical) = icons.iter().find(|n| n.to_lowercase() == lower) {
            spans.push((pos, pos + ident.len(), canonical));
        }
    }
    if spans.is_empty() {
        return text.to_string();
    }

    let mut out = text.to_string();
    for (start, end, replacement) in spans.into_iter().rev() {
        out.replace_range(start..end, replacement);
    }
    out
}

/// Rewrite `React.useState` → `useState` for the fixed primitive set.
/// Only whole-word occurrences outside string literals are touched.
fn strip_qualifiers(text: &str) -> String {
    let words = words_outside_strings(text);
    let mut starts: Vec<usize> = Vec::new();
    for (i, (pos, word)) in words.iter().enumerate() {
        if word != REACTIVE_NAMESPACE || !text[pos + word.len()..].starts_with('.') {
            continue;
        }
        if let Some((next_pos, next)) = words.get(i + 1) {
            if *next_pos == pos + word.len() + 1 && REACTIVE_PRIMITIVES.contains(&next.as_str()) {
                starts.push(*pos);
            }
        }
    }
    if starts.is_empty() {
        return text.to_string();
    }

    let mut out = text.to_string();
    for pos in starts.into_iter().rev() {
        out.replace_range(pos..pos + REACTIVE_NAMESPACE.len() + 1, "");
    }
    out
}

/// If no entry declaration exists, wrap a bare arrow function or a bare
/// markup expression into `const ToolComponent = ...`.
fn wrap_entry_point(text: &str) -> String {
    if has_entry_declaration(text) {
        return text.to_string();
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return text.to_string();
    }

    if starts_with_arrow_function(trimmed) {
        return format!("const {} = {}", ENTRY_POINT, trimmed);
    }
    if trimmed.starts_with('<') {
        return format!("const {} = () => (\n{}\n)", ENTRY_POINT, trimmed);
    }
    text.to_string()
}

/// Heuristic for a bare function expression: `(params) => ...` or
/// `ident => ...` at the start of the text.
fn starts_with_arrow_function(t: &str) -> bool {
    if t.starts_with('(') {
        let mut depth = 0i32;
        for (i, c) in t.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return t[i + 1..].trim_start().starts_with("=>");
                    }
                }
                _ => {}
            }
        }
        return false;
    }
    let ident_len = t
        .char_indices()
        .find(|(_, c)| !crate::lang::lexer::is_ident_part(*c))
        .map(|(i, _)| i)
        .unwrap_or(t.len());
    ident_len > 0 && t[ident_len..].trim_start().starts_with("=>")
}

/// Append a statement terminator when the entry declaration is present
/// but the text does not end with one.
fn ensure_terminator(text: &str) -> String {
    if !has_entry_declaration(text) {
        return text.to_string();
    }
    let trimmed_end = text.trim_end();
    if trimmed_end.ends_with(';') {
        return text.to_string();
    }
    format!("{};", trimmed_end)
}

/// Drop any line whose first word is `import` or `export`.
fn strip_module_lines(text: &str) -> String {
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| {
            let t = line.trim_start();
            let word_len = t
                .char_indices()
                .find(|(_, c)| !crate::lang::lexer::is_ident_part(*c))
                .map(|(i, _)| i)
                .unwrap_or(t.len());
            !matches!(&t[..word_len], "import" | "export")
        })
        .collect();
    if kept.len() == text.lines().count() {
        return text.to_string();
    }
    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::default_registry;
    use crate::lang::validator::{validate, ValidationResult};

    fn normalize_text(text: &str) -> String {
        normalize(&CandidateSource::new(text), &default_registry()).text
    }

    #[test]
    fn strips_fence_lines() {
        let out = normalize_text("```jsx\nconst ToolComponent = () => null;\n```");
        assert_eq!(out, "const ToolComponent = () => null;");
    }

    #[test]
    fn repairs_icon_tag_casing() {
        let out = normalize_text("const ToolComponent = () => <play />;");
        assert!(out.contains("<Play />"), "got: {}", out);
        let reg = default_registry();
        assert!(validate(&CandidateSource::new(out.as_str()), &reg).is_valid());
    }

    #[test]
    fn casing_repair_leaves_non_tag_occurrences() {
        let out = normalize_text("const ToolComponent = () => <Label>{\"play\"}</Label>;");
        assert!(out.contains("\"play\""), "got: {}", out);
    }

    #[test]
    fn strips_react_qualifier() {
        let out =
            normalize_text("const ToolComponent = () => { React.useState(0); return null; };");
        assert!(out.contains("useState(0)"));
        assert!(!out.contains("React."));
    }

    #[test]
    fn qualifier_strip_skips_embedded_and_string_occurrences() {
        let out = normalize_text(
            "const ToolComponent = () => { myReact.useState; \
             const s = \"React.useState\"; React.useState(0); return null; };",
        );
        assert!(out.contains("myReact.useState"), "got: {}", out);
        assert!(out.contains("\"React.useState\""), "got: {}", out);
        assert!(out.contains("; useState(0)"), "got: {}", out);
    }

    #[test]
    fn wraps_bare_arrow_function() {
        let out = normalize_text("() => <Label>hi</Label>");
        assert!(out.starts_with("const ToolComponent = () =>"), "got: {}", out);
        assert!(out.trim_end().ends_with(';'), "got: {}", out);
    }

    #[test]
    fn wraps_bare_markup() {
        let out = normalize_text("<Button>Go</Button>");
        assert!(out.starts_with("const ToolComponent = () => ("), "got: {}", out);
        let reg = default_registry();
        assert!(validate(&CandidateSource::new(out.as_str()), &reg).is_valid());
    }

    #[test]
    fn appends_missing_terminator() {
        let out = normalize_text("const ToolComponent = () => null");
        assert_eq!(out, "const ToolComponent = () => null;");
    }

    #[test]
    fn strips_import_and_export_lines() {
        let out = normalize_text(
            "import React from 'react';\nconst ToolComponent = () => null;\nexport default ToolComponent;",
        );
        assert_eq!(out, "const ToolComponent = () => null;");
    }

    #[test]
    fn untouched_text_passes_through() {
        let src = "const ToolComponent = () => <Label>ok</Label>;";
        assert_eq!(normalize_text(src), src);
    }

    #[test]
    fn idempotent_on_messy_input() {
        let messy = "```jsx\nimport x from 'y';\n<pause />\n```";
        let once = normalize_text(&messy);
        let twice = normalize_text(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn idempotent_on_already_clean_input() {
        let clean = "const ToolComponent = () => { const [a,b] = useState(1); return <Card>{a}</Card>; };";
        let once = normalize_text(clean);
        assert_eq!(once, clean);
        assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn normalization_preserves_validity() {
        let reg = default_registry();
        let valid = "const ToolComponent = () => <Stack><Play /></Stack>;";
        assert!(validate(&CandidateSource::new(valid), &reg).is_valid());
        let out = normalize(&CandidateSource::new(valid), &reg);
        assert_eq!(validate(&out, &reg), ValidationResult::Valid);
    }
}
