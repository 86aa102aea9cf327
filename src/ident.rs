//! C identifier sanitization.
//!
//! `sanitize` is total over all text and is used both for header guards
//! (as returned, upper-cased) and for type/member names (lower-cased by the
//! caller). `MemberNames` layers keyword and collision handling on top so a
//! struct never declares the same member twice.
use std::collections::HashSet;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_IDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9_]").expect("static pattern")
});

static C_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "auto", "break", "case", "char", "const", "continue", "default", "do",
        "double", "else", "enum", "extern", "float", "for", "goto", "if",
        "inline", "int", "long", "register", "restrict", "return", "short",
        "signed", "sizeof", "static", "struct", "switch", "typedef", "union",
        "unsigned", "void", "volatile", "while", "bool", "true", "false",
        "alignas", "alignof", "nullptr", "static_assert", "thread_local",
        "typeof", "constexpr",
    ]
    .into_iter()
    .collect()
});

/// Replace every char outside `[A-Za-z0-9_]` with `_`, prefix `_` before a
/// leading digit, upper-case the result.
pub fn sanitize(name: &str) -> String {
    let replaced = NON_IDENT.replace_all(name, "_");
    let mut out = String::with_capacity(replaced.len() + 1);
    if replaced.starts_with(|c: char| c.is_ascii_digit()) {
        out.push('_');
    }
    out.push_str(&replaced);
    out.to_ascii_uppercase()
}

/// Lower-case variant used for member, type and function names.
pub fn sanitize_lower(name: &str) -> String {
    sanitize(name).to_ascii_lowercase()
}

pub fn is_c_keyword(name: &str) -> bool {
    C_KEYWORDS.contains(name)
}

/// Allocates unique member names within one struct.
#[derive(Debug, Default)]
pub struct MemberNames {
    taken: HashSet<String>,
}

impl MemberNames {
    pub fn new() -> Self { Self::default() }

    /// `suffix` is appended before uniqueness is checked (e.g. `_data`).
    pub fn claim(&mut self, key: &str, suffix: &str) -> String {
        let mut base = sanitize_lower(key);
        if base.is_empty() {
            base.push('_');
        }
        base.push_str(suffix);
        if is_c_keyword(&base) {
            base.push('_');
        }
        let mut candidate = base.clone();
        let mut n = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}
