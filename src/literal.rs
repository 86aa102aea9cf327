//! YAML value → C initializer expression.
use serde_yaml::Value;

use crate::ident::sanitize_lower;

/// Mappings nested past this depth collapse to a placeholder comment.
pub const MAX_DEPTH: usize = 2;

pub const NESTED_PLACEHOLDER: &str = "/* Complex nested structure omitted */";
pub const ARRAY_PLACEHOLDER: &str = "/* Complex array omitted */";

pub fn render(value: &Value) -> String {
    render_at(value, 0)
}

pub fn render_at(value: &Value, depth: usize) -> String {
    match value {
        Value::Mapping(map) => {
            if depth > MAX_DEPTH {
                return NESTED_PLACEHOLDER.to_string();
            }
            let items = map
                .iter()
                .map(|(k, v)| {
                    let key = match k {
                        Value::String(s) => sanitize_lower(s),
                        other => sanitize_lower(&crate::flow::to_flow(other)),
                    };
                    format!("    .{key} = {}", render_at(v, depth + 1))
                })
                .collect::<Vec<_>>();
            format!("{{\n{}\n}}", items.join(",\n"))
        }
        Value::Sequence(xs) => {
            if xs.is_empty() {
                return "{}".to_string();
            }
            if xs.iter().all(is_scalar) {
                let items = xs.iter().map(|x| render_at(x, depth + 1)).collect::<Vec<_>>();
                format!("{{{}}}", items.join(", "))
            } else {
                ARRAY_PLACEHOLDER.to_string()
            }
        }
        Value::String(s) => c_string(s),
        Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
        Value::Number(n) => number(n),
        Value::Null => "NULL".to_string(),
        Value::Tagged(_) => c_string(&crate::flow::to_flow(value)),
    }
}

fn is_scalar(v: &Value) -> bool {
    matches!(v, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn number(n: &serde_yaml::Number) -> String {
    if let Some(u) = n.as_u64() {
        return if u > i64::MAX as u64 { format!("{u}u") } else { u.to_string() };
    }
    if let Some(i) = n.as_i64() {
        // `-9223372036854775808` negates a constant that does not fit `long long`
        return if i == i64::MIN { "(-9223372036854775807LL - 1)".to_string() } else { i.to_string() };
    }
    match n.as_f64() {
        Some(f) if f.is_nan() => "NAN".to_string(),
        Some(f) if f.is_infinite() && f > 0.0 => "INFINITY".to_string(),
        Some(f) if f.is_infinite() => "-INFINITY".to_string(),
        Some(f) => float_literal(f),
        None => c_string(&n.to_string()),
    }
}

/// Shortest decimal that round-trips, always with a `.` or exponent so C
/// treats it as a double.
fn float_literal(f: f64) -> String {
    let s = format!("{f:?}");
    if s.contains(['.', 'e', 'E']) { s } else { format!("{s}.0") }
}

/// Quoted C string literal.
pub fn c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut after_hex = false;
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                out.push_str(&format!("\\x{:02x}", c as u32));
                after_hex = true;
                continue;
            }
            // a hex escape swallows following hex digits; split the literal
            c if after_hex && c.is_ascii_hexdigit() => {
                out.push_str("\"\"");
                out.push(c);
            }
            c => out.push(c),
        }
        after_hex = false;
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn scalars() {
        assert_eq!(render(&yaml("true")), "1");
        assert_eq!(render(&yaml("false")), "0");
        assert_eq!(render(&yaml("42")), "42");
        assert_eq!(render(&yaml("-3")), "-3");
        assert_eq!(render(&yaml("-9223372036854775808")), "(-9223372036854775807LL - 1)");
        assert_eq!(render(&yaml("-9223372036854775807")), "-9223372036854775807");
        assert_eq!(render(&yaml("2.5")), "2.5");
        assert_eq!(render(&yaml("3.0")), "3.0");
        assert_eq!(render(&yaml("null")), "NULL");
    }

    #[test]
    fn strings_escape_backslash_quote_newline() {
        assert_eq!(c_string("a\\b"), r#""a\\b""#);
        assert_eq!(c_string("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(c_string("one\ntwo"), r#""one\ntwo""#);
        assert_eq!(c_string("\u{1}f"), r#""\x01""f""#);
    }

    #[test]
    fn uniform_scalar_list() {
        assert_eq!(render(&yaml("[R, W]")), r#"{"R", "W"}"#);
        assert_eq!(render(&yaml("[1, 2]")), "{1, 2}");
        assert_eq!(render(&yaml("[]")), "{}");
        assert_eq!(render(&yaml("[[1], 2]")), ARRAY_PLACEHOLDER);
        assert_eq!(render(&yaml("[null]")), ARRAY_PLACEHOLDER);
    }

    #[test]
    fn mapping_renders_designated_initializers() {
        assert_eq!(
            render(&yaml("{Match: '0110011', op-code: 51}")),
            "{\n    .match = \"0110011\",\n    .op_code = 51\n}"
        );
    }

    #[test]
    fn depth_beyond_two_becomes_placeholder() {
        let v = yaml("{a: {b: {c: {d: 1}}}}");
        let out = render(&v);
        assert!(out.contains(NESTED_PLACEHOLDER), "{out}");
        assert!(!out.contains(".d ="), "{out}");
        assert!(out.contains(".c = "), "{out}");

        let shallow = render(&yaml("{a: {b: {c: 1}}}"));
        assert!(!shallow.contains(NESTED_PLACEHOLDER), "{shallow}");
    }

    #[test]
    fn tagged_falls_back_to_quoted_text() {
        assert_eq!(render(&yaml("!expr x")), r#""!expr x""#);
    }
}
