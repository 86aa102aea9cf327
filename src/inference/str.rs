/// How a text value is written back as YAML.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    /// bare scalar, re-parses as the same string
    Plain,
    /// double-quoted scalar with escapes
    Quoted,
    /// literal block scalar (`|`), one indented line per source line
    Block(Chomp),
}

/// Block scalar chomping indicator, chosen from the trailing newlines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chomp {
    /// exactly one trailing newline: `|`
    Clip,
    /// no trailing newline: `|-`
    Strip,
    /// more than one trailing newline: `|+`
    Keep,
}

impl Chomp {
    pub fn indicator(self) -> &'static str {
        match self {
            Chomp::Clip => "|",
            Chomp::Strip => "|-",
            Chomp::Keep => "|+",
        }
    }
}

/// Where a scalar ends up; flow collections additionally reserve `,[]{}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Context {
    Block,
    Flow,
}

pub fn text_style(s: &str) -> TextStyle {
    if s.contains('\n') {
        return block_style(s).unwrap_or(TextStyle::Quoted);
    }
    if needs_quotes(s, Context::Block) {
        TextStyle::Quoted
    } else {
        TextStyle::Plain
    }
}

/// Style for a list element inside `[...]`. Never a block scalar.
pub fn flow_style(s: &str) -> TextStyle {
    if needs_quotes(s, Context::Flow) {
        TextStyle::Quoted
    } else {
        TextStyle::Plain
    }
}

fn block_style(s: &str) -> Option<TextStyle> {
    if s.chars().any(|c| (c.is_control() && c != '\n' && c != '\t') || is_unicode_break(c)) {
        return None;
    }
    // indentation is detected from the first non-empty line, which therefore
    // must not start with a space (covers space-only leading lines too)
    if s.split('\n').find(|line| !line.is_empty()).is_some_and(|line| line.starts_with(' ')) {
        return None;
    }
    let body = s.trim_end_matches('\n');
    if body.is_empty() {
        return None;
    }
    let chomp = match s.len() - body.len() {
        0 => Chomp::Strip,
        1 => Chomp::Clip,
        _ => Chomp::Keep,
    };
    Some(TextStyle::Block(chomp))
}

const INDICATORS: &[char] = &[
    '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
];

const RESERVED_WORDS: &[&str] = &[
    "true", "false", "yes", "no", "on", "off", "y", "n", "null", "~",
];

/// True when `s` would not read back as the same string if written bare.
pub fn needs_quotes(s: &str, ctx: Context) -> bool {
    let Some(first) = s.chars().next() else {
        return true;
    };
    if first.is_whitespace() || s.ends_with(char::is_whitespace) {
        return true;
    }
    if INDICATORS.contains(&first) {
        return true;
    }
    if s.contains(": ") || s.contains(" #") || s.ends_with(':') {
        return true;
    }
    if ctx == Context::Flow && s.contains([',', '[', ']', '{', '}']) {
        return true;
    }
    if s.chars().any(|c| c.is_control() || is_unicode_break(c)) {
        return true;
    }
    looks_like_non_string(s)
}

fn looks_like_non_string(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    if RESERVED_WORDS.contains(&lower.as_str()) {
        return true;
    }
    if matches!(lower.as_str(), ".inf" | "+.inf" | "-.inf" | ".nan") {
        return true;
    }
    let digits = lower.strip_prefix(['+', '-']).unwrap_or(&lower);
    if digits.starts_with("0x") || digits.starts_with("0o") || digits.starts_with("0b") {
        return true;
    }
    s.parse::<f64>().is_ok()
}

/// NEL, LINE SEPARATOR and PARAGRAPH SEPARATOR are line breaks to a YAML reader.
pub fn is_unicode_break(c: char) -> bool {
    matches!(c, '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Double-quoted YAML scalar. Escapes match the generated C helper.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{85}' => out.push_str("\\N"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Plain or quoted, as decided by `style`. Block styles are not handled here.
pub fn scalar(s: &str, style: TextStyle) -> String {
    match style {
        TextStyle::Plain => s.to_string(),
        _ => quote(s),
    }
}
