//! Low-level text helpers shared by the parser, validator and normalizer.
//!
//! There is no separate token stream: the parser walks raw source with a
//! cursor, and the validator/normalizer need the same string-aware
//! character scanning (skip string literals, find identifier words, map
//! byte offsets to line/column).  Those shared pieces live here.

// ─── Character classes ────────────────────────────────────────────────────────

pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

pub fn is_ident_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

// ─── Positions ────────────────────────────────────────────────────────────────

/// Convert a byte index into a 1-based (line, column) pair.
pub fn byte_to_line_col(src: &str, byte_idx: usize) -> (usize, usize) {
    let mut line = 1usize;
    let mut col = 1usize;
    let mut seen = 0usize;
    for ch in src.chars() {
        if seen >= byte_idx {
            break;
        }
        seen += ch.len_utf8();
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

// ─── String-aware scanning ────────────────────────────────────────────────────

/// Iterate `(byte_index, char)` pairs of `src`, skipping the contents of
/// single- and double-quoted string literals (escape-aware) and calling
/// `f` only for characters outside them.  Quote characters themselves are
/// also skipped.  An apostrophe directly after an identifier character is
/// prose (`don't`, a trailing possessive), common in unquoted markup
/// text, and does not open a string.
pub fn for_each_char_outside_strings<F: FnMut(usize, char)>(src: &str, mut f: F) {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev: Option<char> = None;

    for (i, ch) in src.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        let opens_string = match ch {
            '"' => true,
            '\'' => !prev.map_or(false, is_ident_part),
            _ => false,
        };
        if opens_string {
            quote = Some(ch);
            continue;
        }
        prev = Some(ch);
        f(i, ch);
    }
}

/// Collect identifier words outside string literals as `(byte_index, word)`.
pub fn words_outside_strings(src: &str) -> Vec<(usize, String)> {
    let mut out: Vec<(usize, String)> = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for_each_char_outside_strings(src, |i, ch| {
        match &mut current {
            Some((_, w)) if is_ident_part(ch) => w.push(ch),
            Some(_) => {
                out.push(current.take().unwrap());
                if is_ident_start(ch) {
                    current = Some((i, ch.to_string()));
                }
            }
            None if is_ident_start(ch) => current = Some((i, ch.to_string())),
            None => {}
        }
        // A word interrupted by skipped string content still terminates at
        // the next non-ident char; adjacency across a literal cannot occur
        // because the quote itself breaks the run.
    });
    if let Some(w) = current {
        out.push(w);
    }
    out
}

/// Read the identifier starting at `pos`, if any.
pub fn ident_at(src: &str, pos: usize) -> Option<&str> {
    let rest = &src[pos..];
    let mut end = 0usize;
    for (i, c) in rest.char_indices() {
        if i == 0 {
            if !is_ident_start(c) {
                return None;
            }
        } else if !is_ident_part(c) {
            end = i;
            break;
        }
        end = i + c.len_utf8();
    }
    if end == 0 {
        None
    } else {
        Some(&rest[..end])
    }
}
